//! Recursive tree growth: section placement, foliage clusters, and LOD bucketing.
#![forbid(unsafe_code)]

pub mod config;
pub mod generator;
pub mod host;

pub use config::{ConfigError, TreeConfig};
pub use generator::{
    FoliageCluster, Generation, LodBuckets, Pose, Section, SegmentPart, generate,
};
pub use host::{Host, Placement, RecordedLodGroup, RecordingHost, RenderableRef};
