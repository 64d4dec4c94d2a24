use arbor_geom::{Aabb, Vec3};
use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn approx_abs_rel(a: f32, b: f32, atol: f32, rtol: f32) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= atol + rtol * scale
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e6)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Addition commutativity: a + b == b + a (element-wise)
    #[test]
    fn vec3_add_commutative(
        a in arb_vec3(),
        b in arb_vec3(),
    ) {
        prop_assert!(vapprox(a + b, b + a, 1e-5));
    }

    // Distributive property of dot over addition: (a + b)·c = a·c + b·c
    #[test]
    fn vec3_dot_distributive(
        a in arb_vec3(),
        b in arb_vec3(),
        c in arb_vec3(),
    ) {
        let left = (a + b).dot(c);
        let right = a.dot(c) + b.dot(c);
        prop_assert!(approx_abs_rel(left, right, 1e-6, 1e-5));
    }

    // Cross anti-commutativity: a×b = -(b×a)  -> a×b + b×a ≈ 0
    #[test]
    fn vec3_cross_anticommutative(
        a in arb_vec3(),
        b in arb_vec3(),
    ) {
        let sum = a.cross(b) + b.cross(a);
        prop_assert!(vapprox(sum, Vec3::ZERO, 1e-3));
    }

    // Scalar distributivity: k*(a + b) = k*a + k*b
    #[test]
    fn vec3_scalar_distributivity(
        a in arb_vec3(),
        b in arb_vec3(),
        k in bounded_f32(),
    ) {
        let left = (a + b) * k;
        let right = (a * k) + (b * k);
        prop_assert!(approx_abs_rel(left.x, right.x, 1e-6, 1e-5));
        prop_assert!(approx_abs_rel(left.y, right.y, 1e-6, 1e-5));
        prop_assert!(approx_abs_rel(left.z, right.z, 1e-6, 1e-5));
    }

    // splat(k) dotted with a unit axis recovers k
    #[test]
    fn vec3_splat_axis_projection(
        k in bounded_f32(),
    ) {
        let s = Vec3::splat(k);
        prop_assert!(approx(s.dot(Vec3::UP), k, 1e-6));
        prop_assert!(approx(s.dot(Vec3::FORWARD), k, 1e-6));
    }

    // A box grown point-by-point contains every point it was grown with
    #[test]
    fn aabb_union_point_contains(
        seed in arb_vec3(),
        pts in proptest::collection::vec(arb_vec3(), 1..8),
    ) {
        let mut bb = Aabb::at_point(seed);
        for p in &pts {
            bb = bb.union_point(*p);
        }
        for p in pts.iter().chain(std::iter::once(&seed)) {
            prop_assert!(bb.min.x <= p.x && p.x <= bb.max.x);
            prop_assert!(bb.min.y <= p.y && p.y <= bb.max.y);
            prop_assert!(bb.min.z <= p.z && p.z <= bb.max.z);
        }
    }

    // union_point is monotone: growing never shrinks the box
    #[test]
    fn aabb_union_point_monotone(
        a in arb_vec3(),
        b in arb_vec3(),
        p in arb_vec3(),
    ) {
        let bb = Aabb::at_point(a).union_point(b);
        let grown = bb.union_point(p);
        prop_assert!(grown.min.x <= bb.min.x && grown.max.x >= bb.max.x);
        prop_assert!(grown.min.y <= bb.min.y && grown.max.y >= bb.max.y);
        prop_assert!(grown.min.z <= bb.min.z && grown.max.z >= bb.max.z);
    }
}
