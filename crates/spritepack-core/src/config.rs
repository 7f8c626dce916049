use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// MaxRects placement heuristics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaxRectsHeuristic {
    BestShortSideFit,
    BestLongSideFit,
    BestAreaFit,
    BottomLeft,
    ContactPoint,
}

impl MaxRectsHeuristic {
    /// The fixed order in which the pipeline tries every heuristic.
    pub const PORTFOLIO: [MaxRectsHeuristic; 5] = [
        MaxRectsHeuristic::BestShortSideFit,
        MaxRectsHeuristic::BestLongSideFit,
        MaxRectsHeuristic::BestAreaFit,
        MaxRectsHeuristic::BottomLeft,
        MaxRectsHeuristic::ContactPoint,
    ];
}

impl FromStr for MaxRectsHeuristic {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bssf" | "bestshortsidefit" => Ok(Self::BestShortSideFit),
            "blsf" | "bestlongsidefit" => Ok(Self::BestLongSideFit),
            "baf" | "bestareafit" => Ok(Self::BestAreaFit),
            "bl" | "bottomleft" => Ok(Self::BottomLeft),
            "cp" | "contactpoint" => Ok(Self::ContactPoint),
            _ => Err(()),
        }
    }
}

/// Packing configuration for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Bin width in pixels.
    pub bin_width: u32,
    /// Bin height in pixels.
    pub bin_height: u32,
    /// Allow 90 degree rotations for placements where beneficial.
    pub allow_rotation: bool,
    /// Stamp an opaque red 1px ring on each sprite's outer edge (debug).
    pub border: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            bin_width: 512,
            bin_height: 512,
            allow_rotation: true,
            border: false,
        }
    }
}

impl PackerConfig {
    /// Returns an error if either bin dimension is zero.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.bin_width == 0 || self.bin_height == 0 {
            return Err(crate::error::SpritePackError::InvalidDimensions {
                width: self.bin_width,
                height: self.bin_height,
            });
        }
        Ok(())
    }

    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_bin_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.bin_width = w;
        self.cfg.bin_height = h;
        self
    }
    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.cfg.allow_rotation = v;
        self
    }
    pub fn border(mut self, v: bool) -> Self {
        self.cfg.border = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
