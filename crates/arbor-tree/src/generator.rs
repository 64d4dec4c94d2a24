use arbor_geom::{Aabb, Quat, Vec3};
use rand::Rng;
use serde::Serialize;

use crate::config::{ConfigError, TreeConfig};
use crate::host::{Host, RenderableRef};

/// Diameter multiplier applied once per tier; compounds geometrically with depth.
pub const DIAMETER_TAPER: f32 = 0.7;
/// Per-child branch length multiplier range, against the parent's scale.
pub const LENGTH_RANGE: (f32, f32) = (0.5, 0.8);
/// Diameter steps of the three stacked sub-segments, base to tip.
pub const SEGMENT_DIAMETER_STEPS: [f32; 3] = [1.0, 0.9, 0.8];
/// Each sub-segment covers roughly a third of the span.
pub const SEGMENT_HEIGHT_FRACTION: f32 = 0.34;
/// Pitch range in degrees; larger values flatten the tree.
pub const PITCH_RANGE: (f32, f32) = (10.0, 30.0);
/// Roll range in degrees for the tier>1 left/right lean.
pub const ROLL_RANGE: (f32, f32) = (30.0, 50.0);
/// Uniform foliage scale multiplier range.
pub const FOLIAGE_SCALE_RANGE: (f32, f32) = (3.0, 8.0);
/// Tiers above this emit no geometry when pruning is on; they still recurse.
pub const PRUNE_TIER_LIMIT: u32 = 3;
pub const ROOT_EXTRA_BRANCH_ATTEMPTS: u32 = 4;
pub const ROOT_EXTRA_BRANCH_PROBABILITY: f32 = 0.5;

/// Left/right alternation signs; the mandatory pair recurses +1 first.
const ODD_EVEN: [f32; 2] = [1.0, -1.0];

/// Growth frame at the base of a section. Derived fresh per recursive call;
/// siblings never observe each other's in-progress values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Pose {
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: Quat,
}

impl Pose {
    #[inline]
    pub const fn new(position: Vec3, scale: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }

    /// Upright unit-scale frame, the usual root of a tree.
    #[inline]
    pub const fn upright(position: Vec3) -> Self {
        Self {
            position,
            scale: Vec3::ONE,
            rotation: Quat::IDENTITY,
        }
    }
}

/// One of the three stacked sub-segments of a [`Section`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SegmentPart {
    pub position: Vec3,
    pub scale: Vec3,
}

/// A placed trunk/branch element spanning one tier transition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    pub tier: u32,
    pub rotation: Quat,
    pub parts: [SegmentPart; 3],
    pub variant: String,
}

/// A placed leaf mass at a terminal tier.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FoliageCluster {
    pub position: Vec3,
    pub yaw_deg: f32,
    pub scale: f32,
    pub variant: String,
}

/// Append-only renderable groups, filled during traversal and never reordered.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LodBuckets {
    pub high: Vec<RenderableRef>,
    pub medium: Vec<RenderableRef>,
    pub low: Vec<RenderableRef>,
}

/// Result of one generation pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Generation {
    pub sections: Vec<Section>,
    pub foliage: Vec<FoliageCluster>,
    pub lod: LodBuckets,
    /// Bounds over every placement position, for host-side LOD group sizing.
    pub bounds: Aabb,
}

/// Grow a tree from `root`. One synchronous depth-first pass; all placements
/// go through `host`, and every random draw comes from `rng` in a fixed
/// traversal order, so a seeded generator reproduces the tree exactly.
pub fn generate<H: Host, R: Rng>(
    root: Pose,
    cfg: &TreeConfig,
    rng: &mut R,
    host: &mut H,
) -> Result<Generation, ConfigError> {
    cfg.validate()?;

    let mut growth = Growth {
        cfg,
        rng: &mut *rng,
        host: &mut *host,
        sections: Vec::new(),
        foliage: Vec::new(),
        lod: LodBuckets::default(),
        bounds: Aabb::at_point(root.position),
    };
    growth.grow_section(&root, 0, 1.0);

    let Growth {
        sections,
        foliage,
        lod,
        bounds,
        ..
    } = growth;

    if cfg.create_lod_group {
        host.register_lod_group(&lod.high, &lod.medium, &lod.low, cfg.lod_thresholds);
    }

    log::debug!(
        "tree generated: {} sections, {} foliage clusters, lod {}/{}/{}",
        sections.len(),
        foliage.len(),
        lod.high.len(),
        lod.medium.len(),
        lod.low.len(),
    );

    Ok(Generation {
        sections,
        foliage,
        lod,
        bounds,
    })
}

struct Growth<'a, H, R> {
    cfg: &'a TreeConfig,
    rng: &'a mut R,
    host: &'a mut H,
    sections: Vec<Section>,
    foliage: Vec<FoliageCluster>,
    lod: LodBuckets,
    bounds: Aabb,
}

impl<H: Host, R: Rng> Growth<'_, H, R> {
    fn grow_section(&mut self, origin: &Pose, tier: u32, odd_even: f32) {
        if tier >= self.cfg.max_tiers {
            return;
        }

        // Placeholder tip: straight up, scaled by the parent's length. The
        // composed rotation below supplies the actual direction.
        let mut tip = Pose::new(
            origin.position + Vec3::new(0.0, self.cfg.height * origin.scale.y, 0.0),
            origin.scale,
            origin.rotation,
        );

        if tier > 0 {
            if tier == 1 {
                // Seen from above the tree is a clock face and the branch a
                // hand; this is the only tier with a free compass heading.
                let spin = odd_even * self.rng.gen_range(0.0..360.0);
                tip.rotation = tip.rotation * Quat::from_axis_angle(Vec3::UP, spin);
            }
            let pitch = self.rng.gen_range(PITCH_RANGE.0..PITCH_RANGE.1);
            tip.rotation = tip.rotation * Quat::from_axis_angle(Vec3::FORWARD, pitch);
            if tier > 1 {
                let roll = odd_even * self.rng.gen_range(ROLL_RANGE.0..ROLL_RANGE.1);
                tip.rotation = tip.rotation * Quat::from_axis_angle(Vec3::LEFT, roll);
            }
            tip.position = tip.rotation.rotate(tip.position - origin.position) + origin.position;
        }

        // Pruned tiers still recurse; only the visible geometry is skipped.
        if !self.cfg.prune_small_branches || tier <= PRUNE_TIER_LIMIT {
            self.emit_section(origin, &tip, tier);
        }

        if tier + 1 == self.cfg.max_tiers && self.cfg.show_foliage {
            self.emit_foliage(tip.position);
        }

        // Diameter tapers once per tier; every child of this tier shares it.
        tip.scale.z *= DIAMETER_TAPER;
        tip.scale.x = tip.scale.z;

        // Unconditional left/right pair so no section dead-ends into one child.
        for sign in ODD_EVEN {
            let mut child = tip;
            child.scale.y = origin.scale.y * self.rng.gen_range(LENGTH_RANGE.0..LENGTH_RANGE.1);
            self.grow_section(&child, tier + 1, sign);
        }

        if tier == 0 {
            // Thicken the base canopy with a few coin-flip extras.
            for _ in 0..ROOT_EXTRA_BRANCH_ATTEMPTS {
                if self.rng.gen_range(0.0..1.0) >= ROOT_EXTRA_BRANCH_PROBABILITY {
                    let sign = ODD_EVEN[self.rng.gen_range(0..ODD_EVEN.len())];
                    let mut child = tip;
                    child.scale.y =
                        origin.scale.y * self.rng.gen_range(LENGTH_RANGE.0..LENGTH_RANGE.1);
                    self.grow_section(&child, tier + 1, sign);
                }
            }
        }

        // Branches that sprout partway up a straight section rather than at a
        // joint. The trunk only participates when explicitly configured.
        if tier > 0 || self.cfg.probability_to_branch_on_trunk > 0.0 {
            let probability = if tier > 0 {
                self.cfg.probability_to_branch_in_midsection
            } else {
                self.cfg.probability_to_branch_on_trunk
            };
            let mut midpoint = Pose::new(
                origin.position + (tip.position - origin.position) * 0.5,
                origin.scale,
                origin.rotation,
            );
            midpoint.scale.y *= 0.5;
            for sign in ODD_EVEN {
                if self.rng.gen_range(0.0..1.0) >= 1.0 - probability {
                    self.grow_section(&midpoint, tier + 1, sign);
                }
            }
        }
    }

    /// Place the three tapering sub-segments spanning `origin` -> `tip`, plus
    /// the coarse single-segment proxy when detail levels are enabled.
    fn emit_section(&mut self, origin: &Pose, tip: &Pose, tier: u32) {
        let delta = tip.position - origin.position;
        let part_scale = Vec3::new(
            origin.scale.x,
            origin.scale.y * SEGMENT_HEIGHT_FRACTION * self.cfg.height,
            origin.scale.z,
        );

        let mut parts = [SegmentPart {
            position: origin.position,
            scale: part_scale,
        }; 3];
        for (i, step) in SEGMENT_DIAMETER_STEPS.iter().enumerate() {
            let position = origin.position + delta * (i as f32 / 3.0);
            let scale = Vec3::new(part_scale.x * step, part_scale.y, part_scale.z * step);
            parts[i] = SegmentPart { position, scale };
            let handle =
                self.host
                    .place_segment(position, tip.rotation, scale, &self.cfg.trunk_variant);
            self.lod.high.push(handle);
            self.bounds = self.bounds.union_point(position);
        }
        self.bounds = self.bounds.union_point(tip.position);

        if self.cfg.create_lod_group {
            // One proxy spanning the full height, shared by medium and low.
            let proxy_scale = Vec3::new(
                part_scale.x,
                self.cfg.height * origin.scale.y,
                part_scale.z,
            );
            let proxy = self.host.place_segment(
                origin.position,
                tip.rotation,
                proxy_scale,
                &self.cfg.trunk_low_res_variant,
            );
            self.lod.medium.push(proxy);
            self.lod.low.push(proxy);
        }

        self.sections.push(Section {
            tier,
            rotation: tip.rotation,
            parts,
            variant: self.cfg.trunk_variant.clone(),
        });
    }

    /// Place one leaf mass at a terminal tip, one renderable per detail level.
    fn emit_foliage(&mut self, position: Vec3) {
        let variants = &self.cfg.foliage_variants;
        let variant = variants[self.rng.gen_range(0..variants.len())].clone();
        let yaw_deg = self.rng.gen_range(0.0..360.0);
        let scale =
            self.rng.gen_range(FOLIAGE_SCALE_RANGE.0..FOLIAGE_SCALE_RANGE.1);

        let rotation = Quat::from_axis_angle(Vec3::UP, yaw_deg);
        let scale3 = Vec3::splat(scale);

        let handle = self.host.place_segment(position, rotation, scale3, &variant);
        self.lod.high.push(handle);
        self.bounds = self.bounds.union_point(position);

        if self.cfg.create_lod_group {
            let medium = self.host.place_segment(
                position,
                rotation,
                scale3,
                &self.cfg.foliage_medium_variant,
            );
            self.lod.medium.push(medium);
            let low = self.host.place_segment(
                position,
                rotation,
                scale3,
                &self.cfg.foliage_low_variant,
            );
            self.lod.low.push(low);
        }

        self.foliage.push(FoliageCluster {
            position,
            yaw_deg,
            scale,
            variant,
        });
    }
}
