use arbor_geom::{Quat, Vec3};
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn arb_degrees() -> impl Strategy<Value = f32> {
    -720.0f32..720.0f32
}

fn arb_axis() -> impl Strategy<Value = Vec3> {
    (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0)
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
        .prop_filter("nondegenerate axis", |v| v.length() > 1e-3)
}

fn arb_quat() -> impl Strategy<Value = Quat> {
    (arb_axis(), arb_degrees()).prop_map(|(axis, deg)| Quat::from_axis_angle(axis, deg))
}

fn arb_point() -> impl Strategy<Value = Vec3> {
    (-100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0)
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Axis-angle quaternions are unit quaternions
    #[test]
    fn quat_axis_angle_is_unit(q in arb_quat()) {
        prop_assert!(approx(q.length(), 1.0, 1e-4));
    }

    // Rotation preserves vector length
    #[test]
    fn quat_rotate_preserves_length(q in arb_quat(), v in arb_point()) {
        prop_assert!(approx(q.rotate(v).length(), v.length(), 1e-2 + 1e-4 * v.length()));
    }

    // Identity rotates nothing
    #[test]
    fn quat_identity_rotate(v in arb_point()) {
        prop_assert!(vapprox(Quat::IDENTITY.rotate(v), v, 1e-5));
    }

    // Composition convention: (a * b).rotate(v) == a.rotate(b.rotate(v))
    #[test]
    fn quat_composition_matches_sequential(
        a in arb_quat(),
        b in arb_quat(),
        v in arb_point(),
    ) {
        let eps = 1e-2 + 1e-4 * v.length();
        prop_assert!(vapprox((a * b).rotate(v), a.rotate(b.rotate(v)), eps));
    }

    // Opposite angles about the same axis cancel
    #[test]
    fn quat_opposite_angles_cancel(
        axis in arb_axis(),
        deg in arb_degrees(),
        v in arb_point(),
    ) {
        let q = Quat::from_axis_angle(axis, deg) * Quat::from_axis_angle(axis, -deg);
        let eps = 1e-2 + 1e-4 * v.length();
        prop_assert!(vapprox(q.rotate(v), v, eps));
    }

    // Rotation about an axis leaves that axis fixed
    #[test]
    fn quat_axis_is_fixed_point(axis in arb_axis(), deg in arb_degrees()) {
        let q = Quat::from_axis_angle(axis, deg);
        let a = axis.normalized();
        prop_assert!(vapprox(q.rotate(a), a, 1e-3));
    }

    // Hamilton product of unit quaternions stays unit
    #[test]
    fn quat_product_stays_unit(a in arb_quat(), b in arb_quat()) {
        prop_assert!(approx((a * b).length(), 1.0, 1e-3));
    }
}

#[test]
fn quat_quarter_turn_about_up() {
    let q = Quat::from_axis_angle(Vec3::UP, 90.0);
    let v = q.rotate(Vec3::new(1.0, 0.0, 0.0));
    // Right-handed: +X rotated 90° about +Y lands on -Z
    assert!(vapprox(v, Vec3::new(0.0, 0.0, -1.0), 1e-5));
}
