//! Decorative ground-cover placement: grass-patch scatter and per-instance
//! jitter. Placement math only; mesh merging and animation stay host-side.
#![forbid(unsafe_code)]

use std::f32::consts::TAU;

use arbor_geom::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-axis scale jitter applied to each tuft before the authoring base scale.
pub const TUFT_JITTER_X: (f32, f32) = (0.5, 0.85);
pub const TUFT_JITTER_Y: (f32, f32) = (0.25, 0.65);
pub const TUFT_JITTER_Z: (f32, f32) = (0.5, 0.85);

#[derive(Clone, Debug, Deserialize)]
pub struct GrassPatchConfig {
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_tufts")]
    pub tufts: u32,
    /// Uniform base scale baked into the source asset's authoring units.
    #[serde(default = "default_base_scale")]
    pub base_scale: f32,
}

fn default_radius() -> f32 {
    5.0
}
fn default_tufts() -> u32 {
    30
}
fn default_base_scale() -> f32 {
    0.5
}

impl Default for GrassPatchConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            tufts: default_tufts(),
            base_scale: default_base_scale(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TuftPlacement {
    /// Offset from the patch center, on the ground plane.
    pub offset: Vec3,
    pub yaw_deg: f32,
    pub scale: Vec3,
}

/// Scatter tuft placements uniformly inside a disc of the patch radius, each
/// with its own yaw and per-axis scale jitter.
pub fn scatter_patch<R: Rng>(cfg: &GrassPatchConfig, rng: &mut R) -> Vec<TuftPlacement> {
    let mut out = Vec::with_capacity(cfg.tufts as usize);
    for _ in 0..cfg.tufts {
        // sqrt keeps the disc sampling area-uniform rather than center-heavy
        let theta = rng.gen_range(0.0..TAU);
        let r = cfg.radius * rng.gen_range(0.0f32..1.0).sqrt();
        let offset = Vec3::new(r * theta.cos(), 0.0, r * theta.sin());
        let yaw_deg = rng.gen_range(0.0..360.0);
        let scale = Vec3::new(
            rng.gen_range(TUFT_JITTER_X.0..TUFT_JITTER_X.1),
            rng.gen_range(TUFT_JITTER_Y.0..TUFT_JITTER_Y.1),
            rng.gen_range(TUFT_JITTER_Z.0..TUFT_JITTER_Z.1),
        ) * cfg.base_scale;
        out.push(TuftPlacement {
            offset,
            yaw_deg,
            scale,
        });
    }
    out
}

/// Uniform scale + yaw jitter for a standalone tuft. A minimum above the
/// maximum drags the maximum up rather than failing.
pub fn tuft_jitter<R: Rng>(min_scale: f32, max_scale: f32, rng: &mut R) -> (f32, f32) {
    let max_scale = max_scale.max(min_scale);
    let scale = rng.gen_range(min_scale..=max_scale);
    let yaw_deg = rng.gen_range(0.0..360.0);
    (scale, yaw_deg)
}

/// A selectable look for a two-sided foliage card: an opaque variant name and
/// the upper bound of its height-scale jitter.
#[derive(Clone, Debug, Deserialize)]
pub struct CardVariant {
    pub variant: String,
    pub max_scale: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardJitter {
    pub variant_index: usize,
    /// Vertical stretch in [0.1, variant max); x and z stay 1.
    pub height_scale: f32,
}

/// Pick a card variant and its height jitter. Empty variant lists yield
/// nothing; callers treat that as a configuration error upstream.
pub fn card_jitter<R: Rng>(variants: &[CardVariant], rng: &mut R) -> Option<CardJitter> {
    if variants.is_empty() {
        return None;
    }
    let variant_index = rng.gen_range(0..variants.len());
    let max = variants[variant_index].max_scale.max(0.1);
    let height_scale = rng.gen_range(0.1..=max);
    Some(CardJitter {
        variant_index,
        height_scale,
    })
}
