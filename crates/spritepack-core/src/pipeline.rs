use std::path::{Path, PathBuf};

use image::{ImageReader, RgbaImage};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::config::{MaxRectsHeuristic, PackerConfig};
use crate::error::{Result, SpritePackError};
use crate::image_ops;
use crate::model::{AtlasLayout, Placement, SpriteFrame, TrimInfo};
use crate::packer::maxrects::{self, PackingRun};

/// In-memory sprite to pack (name + decoded image).
pub struct InputSprite {
    pub name: String,
    pub image: RgbaImage,
}

/// Output of a packing run: the composited bin and its layout record.
#[derive(Debug)]
pub struct PackOutput {
    pub atlas: RgbaImage,
    pub layout: AtlasLayout,
}

impl PackOutput {
    /// Write the atlas PNG to `path`.
    pub fn save_atlas(&self, path: &Path) -> Result<()> {
        self.atlas
            .save(path)
            .map_err(|source| SpritePackError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// A sprite after the measuring pass: trimmed size plus trim metadata.
/// Pixels are not kept; the render phase reloads them.
struct Measured {
    name: String,
    width: u32,
    height: u32,
    trim: TrimInfo,
}

#[instrument(skip_all)]
/// Packs every sprite found in `dir` into one `bin_width x bin_height`
/// atlas.
///
/// Entries whose file name starts with `.` are skipped; everything else
/// must decode as an image. Sprites are scanned in file-name order so two
/// runs over the same directory produce identical output. Each sprite is
/// decoded twice, once to measure its trimmed size and once to composite
/// it, keeping peak memory at the bin plus a single sprite.
pub fn pack_directory(dir: &Path, cfg: &PackerConfig) -> Result<PackOutput> {
    cfg.validate()?;
    let paths = scan_dir(dir)?;
    if paths.is_empty() {
        return Err(SpritePackError::Empty);
    }
    info!(count = paths.len(), dir = %dir.display(), "scanned sprite directory");

    let mut measured = Vec::with_capacity(paths.len());
    for path in &paths {
        let img = decode(path)?;
        measured.push(measure(sprite_name(path), path, &img)?);
    }

    let run = best_run(&measured, cfg)?;
    let atlas = render(cfg, &measured, &run.placements, |i| decode(&paths[i]))?;
    Ok(assemble(cfg, measured, run, atlas))
}

#[instrument(skip_all)]
/// In-memory variant of [`pack_directory`] for library consumers: packs
/// already-decoded sprites. The render phase re-trims each held image, so
/// the measure/render dimension check is exercised exactly as in the
/// directory flow.
pub fn pack_sprites(inputs: Vec<InputSprite>, cfg: &PackerConfig) -> Result<PackOutput> {
    cfg.validate()?;
    if inputs.is_empty() {
        return Err(SpritePackError::Empty);
    }

    let mut measured = Vec::with_capacity(inputs.len());
    for inp in &inputs {
        let pseudo_path = Path::new(&inp.name);
        measured.push(measure(inp.name.clone(), pseudo_path, &inp.image)?);
    }

    let run = best_run(&measured, cfg)?;
    let atlas = render(cfg, &measured, &run.placements, |i| {
        Ok(inputs[i].image.clone())
    })?;
    Ok(assemble(cfg, measured, run, atlas))
}

/// Non-recursive directory scan, dot-prefixed names skipped, sorted by
/// path for deterministic input order.
fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| SpritePackError::ScanDir {
            path: dir.to_path_buf(),
            source: source.into(),
        })?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if entry.file_type().is_file() {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

fn sprite_name(path: &Path) -> String {
    match path.file_stem() {
        Some(stem) => stem.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}

fn decode(path: &Path) -> Result<RgbaImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| SpritePackError::Decode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        })?
        .with_guessed_format()
        .map_err(|e| SpritePackError::Decode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        })?;
    let img = reader.decode().map_err(|source| SpritePackError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Record the trimmed size and offsets without keeping any pixels. A fully
/// transparent sprite has no trimmed rectangle and is a fatal scan error.
fn measure(name: String, path: &Path, img: &RgbaImage) -> Result<Measured> {
    let (origin_width, origin_height) = img.dimensions();
    let bounds =
        image_ops::opaque_bounds(img).ok_or_else(|| SpritePackError::FullyTransparent {
            path: path.to_path_buf(),
        })?;
    Ok(Measured {
        name,
        width: bounds.w,
        height: bounds.h,
        trim: TrimInfo {
            offset_left: bounds.x,
            offset_top: bounds.y,
            origin_width,
            origin_height,
        },
    })
}

/// Try every heuristic in the fixed portfolio order and keep the run with
/// the highest occupancy; on ties the earlier heuristic wins. Individual
/// heuristic failures are skipped, not errors.
fn best_run(measured: &[Measured], cfg: &PackerConfig) -> Result<PackingRun> {
    let sizes: Vec<(u32, u32)> = measured.iter().map(|m| (m.width, m.height)).collect();
    let mut best: Option<PackingRun> = None;
    for heuristic in MaxRectsHeuristic::PORTFOLIO {
        match maxrects::pack(
            cfg.bin_width,
            cfg.bin_height,
            &sizes,
            heuristic,
            cfg.allow_rotation,
        ) {
            Ok(run) => {
                debug!(?heuristic, occupancy = run.occupancy, "heuristic run");
                if best.as_ref().map_or(true, |b| run.occupancy > b.occupancy) {
                    best = Some(run);
                }
            }
            Err(e) => {
                debug!(?heuristic, error = %e, "heuristic run failed");
            }
        }
    }
    let run = best.ok_or(SpritePackError::PackingFailed)?;
    info!(
        heuristic = ?run.heuristic,
        occupancy = format!("{:.2}%", run.occupancy * 100.0),
        "selected best run"
    );
    Ok(run)
}

/// Composite every sprite into a fresh transparent bin. `load` yields the
/// pixels for input `i`; the result is re-trimmed and must reproduce the
/// measured dimensions before it is bordered, rotated and blitted.
fn render<F>(
    cfg: &PackerConfig,
    measured: &[Measured],
    placements: &[Placement],
    mut load: F,
) -> Result<RgbaImage>
where
    F: FnMut(usize) -> Result<RgbaImage>,
{
    let mut bin = RgbaImage::new(cfg.bin_width, cfg.bin_height);
    for (i, m) in measured.iter().enumerate() {
        let img = load(i)?;
        let (mut trimmed, _, _) = image_ops::trim(&img);
        drop(img);
        if trimmed.dimensions() != (m.width, m.height) {
            return Err(SpritePackError::TrimMismatch {
                name: m.name.clone(),
                expected_w: m.width,
                expected_h: m.height,
                actual_w: trimmed.width(),
                actual_h: trimmed.height(),
            });
        }
        if cfg.border {
            image_ops::add_border(&mut trimmed);
        }
        let placement = placements[i];
        let sprite = if placement.rotated {
            image_ops::rotate90(&trimmed)
        } else {
            trimmed
        };
        debug!(
            name = %m.name,
            left = placement.left,
            top = placement.top,
            rotated = placement.rotated,
            "composite"
        );
        image_ops::composite(&mut bin, &sprite, placement.left, placement.top);
    }
    Ok(bin)
}

fn assemble(
    cfg: &PackerConfig,
    measured: Vec<Measured>,
    run: PackingRun,
    atlas: RgbaImage,
) -> PackOutput {
    let sprites = measured
        .into_iter()
        .zip(run.placements)
        .map(|(m, placement)| SpriteFrame {
            name: m.name,
            width: m.width,
            height: m.height,
            trim: m.trim,
            placement,
        })
        .collect();
    PackOutput {
        atlas,
        layout: AtlasLayout {
            width: cfg.bin_width,
            height: cfg.bin_height,
            occupancy: run.occupancy,
            sprites,
        },
    }
}
