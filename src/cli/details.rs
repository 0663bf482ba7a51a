//! Card details inspection (`idcard details`).

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::common;
use crate::cli::utils::resolve_details;

/// Args for `idcard details`.
#[derive(Args, Debug)]
pub struct DetailsCommandArgs {
    #[command(flatten)]
    pub details: common::DetailsArgs,
}

pub fn handle(args: DetailsCommandArgs) -> Result<()> {
    let details = resolve_details(&args.details)?;
    let json = details
        .to_json_pretty()
        .context("failed to serialize card details")?;
    println!("{json}");
    println!("QR payload: {}", details.qr_payload());
    Ok(())
}
