use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use spritepack_core::{pack_directory, to_template, to_xml, PackerConfig, TemplateSpec};
use tracing::info;

const SPECIFIER_HELP: &str = "\
Format specifiers for --infoHeader/--infoBody/--infoFooter/--infoSplit:
    %W  bin width            %H  bin height
    %n  sprite name          %w  trimmed width        %h  trimmed height
    %x  placement left       %y  placement top
    %l  trim offset left     %t  trim offset top
    %c  origin width         %r  origin height
    %f  1 if rotated else 0  %%  literal '%'
    escapes: \\n \\r \\t \\\\";

#[derive(Parser, Debug)]
#[command(
    name = "spritepack",
    about = "Pack a directory of sprites into a single texture atlas",
    version,
    after_help = SPECIFIER_HELP
)]
struct Cli {
    /// Sprite image directory
    dir: PathBuf,

    /// Bin width in pixels
    #[arg(long = "width", value_name = "N", default_value_t = 512, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Bin height in pixels
    #[arg(long = "height", value_name = "N", default_value_t = 512, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Allow 90 degree rotation during packing (false iff value starts with F/f/N/n/0)
    #[arg(long = "allowRotations", value_name = "V", default_value = "true", value_parser = parse_flexible_bool)]
    allow_rotations: bool,

    /// Stamp a 1px red border on each sprite (false iff value starts with F/f/N/n/0)
    #[arg(long = "border", value_name = "V", default_value = "false", value_parser = parse_flexible_bool)]
    border: bool,

    /// Atlas PNG output path
    #[arg(long = "outputTexture", value_name = "PATH", default_value = "atlas.png")]
    output_texture: PathBuf,

    /// Descriptor output path
    #[arg(long = "outputInfo", value_name = "PATH", default_value = "atlas.xml")]
    output_info: PathBuf,

    /// Template mode: header, emitted once before all sprites
    #[arg(long = "infoHeader", value_name = "S")]
    info_header: Option<String>,

    /// Template mode: per-sprite body (presence enables template mode)
    #[arg(long = "infoBody", value_name = "S")]
    info_body: Option<String>,

    /// Template mode: footer, emitted once after all sprites
    #[arg(long = "infoFooter", value_name = "S")]
    info_footer: Option<String>,

    /// Template mode: separator emitted between sprites
    #[arg(long = "infoSplit", value_name = "S")]
    info_split: Option<String>,

    /// Enable progress logging
    #[arg(long)]
    verbose: bool,
}

/// Loose boolean parsing: a value is false iff its first character is one
/// of `F f N n 0`, otherwise true.
fn parse_flexible_bool(s: &str) -> Result<bool, String> {
    Ok(!matches!(
        s.chars().next(),
        Some('F' | 'f' | 'N' | 'n' | '0')
    ))
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = PackerConfig {
        bin_width: cli.width,
        bin_height: cli.height,
        allow_rotation: cli.allow_rotations,
        border: cli.border,
    };

    let out = pack_directory(&cli.dir, &cfg)
        .with_context(|| format!("pack {}", cli.dir.display()))?;

    out.save_atlas(&cli.output_texture)
        .with_context(|| format!("write {}", cli.output_texture.display()))?;
    info!(path = %cli.output_texture.display(), "atlas written");

    let descriptor = match &cli.info_body {
        Some(body) => {
            let spec = TemplateSpec {
                header: cli.info_header.clone(),
                body: body.clone(),
                footer: cli.info_footer.clone(),
                split: cli.info_split.clone(),
            };
            to_template(&out.layout, &spec)
        }
        None => to_xml(&out.layout),
    };
    fs::write(&cli.output_info, descriptor)
        .with_context(|| format!("write {}", cli.output_info.display()))?;
    info!(path = %cli.output_info.display(), "descriptor written");

    Ok(())
}
