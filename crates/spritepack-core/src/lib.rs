//! Core library for squeezing a directory of sprites into a single texture
//! atlas.
//!
//! - Packer: MaxRects free-list with five placement heuristics
//!   (BSSF/BLSF/BAF/BL/CP); the pipeline tries all five and keeps the run
//!   with the highest occupancy.
//! - Pipeline: `pack_directory` scans, alpha-trims and packs sprite files;
//!   `pack_sprites` does the same for in-memory images.
//! - Descriptors: fixed XML schema, a `%`-specifier template format, and a
//!   JSON export. The data model is serde-serializable.
//!
//! Quick example:
//! ```ignore
//! use spritepack_core::{pack_directory, PackerConfig};
//! # fn main() -> anyhow::Result<()> {
//! let cfg = PackerConfig::builder().with_bin_dimensions(512, 512).build();
//! let out = pack_directory("sprites/".as_ref(), &cfg)?;
//! out.save_atlas("atlas.png".as_ref())?;
//! std::fs::write("atlas.xml", spritepack_core::to_xml(&out.layout))?;
//! # Ok(()) }
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod image_ops;
pub mod model;
pub mod packer;
pub mod pipeline;

pub use config::*;
pub use descriptor::*;
pub use error::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `spritepack_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{MaxRectsHeuristic, PackerConfig, PackerConfigBuilder};
    pub use crate::descriptor::{to_json, to_template, to_xml, TemplateSpec};
    pub use crate::error::{Result, SpritePackError};
    pub use crate::model::{AtlasLayout, Placement, Rect, SpriteFrame, TrimInfo};
    pub use crate::packer::{MaxRectsPacker, PackingRun};
    pub use crate::pipeline::{pack_directory, pack_sprites, InputSprite, PackOutput};
}
