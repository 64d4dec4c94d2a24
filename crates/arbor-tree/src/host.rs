use arbor_geom::{Quat, Vec3};
use serde::Serialize;

/// Opaque handle to a renderable instantiated by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RenderableRef(pub u32);

/// Capability surface the generator consumes from a scene system.
///
/// The generator decides *what* to place, at *which* transform, under *which*
/// asset variant; instantiation, materials, and the distance-based LOD switch
/// stay on the host side.
pub trait Host {
    fn place_segment(
        &mut self,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        variant: &str,
    ) -> RenderableRef;

    fn register_lod_group(
        &mut self,
        high: &[RenderableRef],
        medium: &[RenderableRef],
        low: &[RenderableRef],
        thresholds: [f32; 3],
    );
}

/// One placed renderable as recorded by [`RecordingHost`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub variant: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordedLodGroup {
    pub high: Vec<RenderableRef>,
    pub medium: Vec<RenderableRef>,
    pub low: Vec<RenderableRef>,
    pub thresholds: [f32; 3],
}

/// Host that records every placement instead of rendering it. Used by the CLI
/// and tests; also the reference behavior for real host implementations:
/// handles are dense indices in placement order.
#[derive(Default, Clone, Debug, PartialEq, Serialize)]
pub struct RecordingHost {
    pub placements: Vec<Placement>,
    pub lod_group: Option<RecordedLodGroup>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placement(&self, r: RenderableRef) -> Option<&Placement> {
        self.placements.get(r.0 as usize)
    }
}

impl Host for RecordingHost {
    fn place_segment(
        &mut self,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        variant: &str,
    ) -> RenderableRef {
        let handle = RenderableRef(self.placements.len() as u32);
        self.placements.push(Placement {
            position,
            rotation,
            scale,
            variant: variant.to_string(),
        });
        handle
    }

    fn register_lod_group(
        &mut self,
        high: &[RenderableRef],
        medium: &[RenderableRef],
        low: &[RenderableRef],
        thresholds: [f32; 3],
    ) {
        self.lod_group = Some(RecordedLodGroup {
            high: high.to_vec(),
            medium: medium.to_vec(),
            low: low.to_vec(),
            thresholds,
        });
    }
}
