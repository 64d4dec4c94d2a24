use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Valid range for `max_tiers`; enforced by `validate`, never clamped at runtime.
pub const MIN_TIERS: u32 = 3;
pub const MAX_TIERS: u32 = 6;

#[derive(Clone, Debug, Deserialize)]
pub struct TreeConfig {
    /// Unit length of one tier span before per-branch scaling.
    #[serde(default = "default_height")]
    pub height: f32,
    /// Recursion depth bound (exclusive); sections exist for tiers 0..max_tiers.
    #[serde(default = "default_max_tiers")]
    pub max_tiers: u32,
    #[serde(default = "default_midsection_probability")]
    pub probability_to_branch_in_midsection: f32,
    #[serde(default)]
    pub probability_to_branch_on_trunk: f32,
    #[serde(default = "default_true")]
    pub show_foliage: bool,
    #[serde(default = "default_true")]
    pub prune_small_branches: bool,
    #[serde(default = "default_true")]
    pub create_lod_group: bool,
    /// Opaque asset identifiers, passed through to the host untouched.
    #[serde(default = "default_trunk_variant")]
    pub trunk_variant: String,
    #[serde(default = "default_trunk_low_res_variant")]
    pub trunk_low_res_variant: String,
    #[serde(default = "default_foliage_variants")]
    pub foliage_variants: Vec<String>,
    #[serde(default = "default_foliage_medium_variant")]
    pub foliage_medium_variant: String,
    #[serde(default = "default_foliage_low_variant")]
    pub foliage_low_variant: String,
    /// Screen-fraction cutoffs handed opaquely to the host's LOD switch.
    #[serde(default = "default_lod_thresholds")]
    pub lod_thresholds: [f32; 3],
}

fn default_height() -> f32 {
    5.0
}
fn default_max_tiers() -> u32 {
    5
}
fn default_midsection_probability() -> f32 {
    0.5
}
fn default_true() -> bool {
    true
}
fn default_trunk_variant() -> String {
    "trunk_branch".to_string()
}
fn default_trunk_low_res_variant() -> String {
    "trunk_branch_low".to_string()
}
fn default_foliage_variants() -> Vec<String> {
    vec!["foliage".to_string()]
}
fn default_foliage_medium_variant() -> String {
    "foliage_medium".to_string()
}
fn default_foliage_low_variant() -> String {
    "foliage_low".to_string()
}
fn default_lod_thresholds() -> [f32; 3] {
    [0.5, 0.3, 0.1]
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
            max_tiers: default_max_tiers(),
            probability_to_branch_in_midsection: default_midsection_probability(),
            probability_to_branch_on_trunk: 0.0,
            show_foliage: true,
            prune_small_branches: true,
            create_lod_group: true,
            trunk_variant: default_trunk_variant(),
            trunk_low_res_variant: default_trunk_low_res_variant(),
            foliage_variants: default_foliage_variants(),
            foliage_medium_variant: default_foliage_medium_variant(),
            foliage_low_variant: default_foliage_low_variant(),
            lod_thresholds: default_lod_thresholds(),
        }
    }
}

impl TreeConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: TreeConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Checked once before recursion begins; a traversal never fails midway.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.height > 0.0) {
            return Err(ConfigError::NonPositiveHeight(self.height));
        }
        if self.max_tiers < MIN_TIERS || self.max_tiers > MAX_TIERS {
            return Err(ConfigError::MaxTiersOutOfRange(self.max_tiers));
        }
        for (field, value) in [
            (
                "probability_to_branch_in_midsection",
                self.probability_to_branch_in_midsection,
            ),
            (
                "probability_to_branch_on_trunk",
                self.probability_to_branch_on_trunk,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { field, value });
            }
        }
        if self.trunk_variant.is_empty() {
            return Err(ConfigError::MissingVariant("trunk_variant"));
        }
        if self.create_lod_group && self.trunk_low_res_variant.is_empty() {
            return Err(ConfigError::MissingVariant("trunk_low_res_variant"));
        }
        if self.show_foliage {
            if self.foliage_variants.is_empty()
                || self.foliage_variants.iter().any(|v| v.is_empty())
            {
                return Err(ConfigError::EmptyFoliageVariants);
            }
            if self.create_lod_group {
                if self.foliage_medium_variant.is_empty() {
                    return Err(ConfigError::MissingVariant("foliage_medium_variant"));
                }
                if self.foliage_low_variant.is_empty() {
                    return Err(ConfigError::MissingVariant("foliage_low_variant"));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositiveHeight(f32),
    MaxTiersOutOfRange(u32),
    ProbabilityOutOfRange { field: &'static str, value: f32 },
    MissingVariant(&'static str),
    EmptyFoliageVariants,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveHeight(h) => {
                write!(f, "height must be positive, got {h}")
            }
            ConfigError::MaxTiersOutOfRange(t) => {
                write!(f, "max_tiers must be in {MIN_TIERS}..={MAX_TIERS}, got {t}")
            }
            ConfigError::ProbabilityOutOfRange { field, value } => {
                write!(f, "{field} must be in 0..=1, got {value}")
            }
            ConfigError::MissingVariant(field) => {
                write!(f, "{field} must name an asset variant")
            }
            ConfigError::EmptyFoliageVariants => {
                write!(
                    f,
                    "foliage_variants must name at least one asset variant when show_foliage is set"
                )
            }
        }
    }
}

impl Error for ConfigError {}
