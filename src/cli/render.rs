//! Card rendering command (`idcard render`).

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use idcard::{
    AssetKind, CardFonts, CardRenderOptions, DEFAULT_COLUMNS, DEFAULT_OUTPUT,
    DEFAULT_WATERMARK_OPACITY, create_id_card, render_preview,
};

use crate::cli::common::{DetailsArgs, PreviewStyleArg};
use crate::cli::utils::{load_optional_asset, resolve_details};

/// Args for `idcard render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub details: DetailsArgs,
    /// Picture of the card holder.
    #[arg(long)]
    pub photo: Option<PathBuf>,
    /// Image blended faintly over the whole card.
    #[arg(long)]
    pub watermark: Option<PathBuf>,
    /// Watermark opacity between 0 and 1.
    #[arg(long = "watermark-opacity", default_value_t = DEFAULT_WATERMARK_OPACITY)]
    pub watermark_opacity: f32,
    /// TrueType font; the built-in bitmap font is used if it cannot be loaded.
    #[arg(long)]
    pub font: Option<PathBuf>,
    /// Output PNG path.
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    /// Display the finished card in the terminal.
    #[arg(long)]
    pub preview: bool,
    /// Preview style.
    #[arg(long = "preview-style", default_value_t = PreviewStyleArg::Truecolor, value_enum)]
    pub preview_style: PreviewStyleArg,
    /// Preview width in terminal columns.
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: u32,
}

/// Execute `idcard render`. The cause is reported before the failure line.
pub fn handle(args: RenderArgs) -> Result<()> {
    render(&args).map_err(|err| {
        eprintln!("{err:#}");
        anyhow!("ID card creation failed.")
    })
}

fn render(args: &RenderArgs) -> Result<()> {
    let details = resolve_details(&args.details)?;
    let fonts = CardFonts::resolve(args.font.as_deref());
    let watermark = load_optional_asset(args.watermark.as_deref(), AssetKind::Watermark)?;
    let photo = load_optional_asset(args.photo.as_deref(), AssetKind::Photo)?;

    let options = CardRenderOptions {
        fonts: &fonts,
        photo: photo.as_ref(),
        watermark: watermark.as_ref(),
        watermark_opacity: args.watermark_opacity.clamp(0.0, 1.0),
    };
    let summary = create_id_card(&details, &options, &args.output)
        .with_context(|| format!("failed to create ID card {}", args.output.display()))?;

    if args.preview {
        let card = image::open(&summary.path)
            .with_context(|| format!("failed to reopen {}", summary.path.display()))?;
        print!(
            "{}",
            render_preview(&card, args.columns, args.preview_style.into())
        );
    }

    println!(
        "Saved ID card to {} ({}x{}, sha256 {})",
        summary.path.display(),
        summary.width,
        summary.height,
        summary.sha256
    );
    Ok(())
}
