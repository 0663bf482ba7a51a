//! Terminal display of a card image (`idcard show`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use idcard::{DEFAULT_COLUMNS, DEFAULT_OUTPUT, render_preview};

use crate::cli::common::PreviewStyleArg;

/// Args for `idcard show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Image to display.
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub image: PathBuf,
    /// Preview style.
    #[arg(long, default_value_t = PreviewStyleArg::Truecolor, value_enum)]
    pub style: PreviewStyleArg,
    /// Width in terminal columns.
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: u32,
}

pub fn handle(args: ShowArgs) -> Result<()> {
    let image = image::open(&args.image)
        .with_context(|| format!("failed to open {}", args.image.display()))?;
    print!("{}", render_preview(&image, args.columns, args.style.into()));
    Ok(())
}
