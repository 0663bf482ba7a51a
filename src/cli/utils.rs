//! Convenience helpers shared across command handlers.

use std::path::Path;

use anyhow::{Context, Result};
use idcard::{AssetKind, CardDetails, load_asset};
use image::DynamicImage;

use crate::cli::common::DetailsArgs;

/// Defaults, then the details file, then individual flags.
pub fn resolve_details(args: &DetailsArgs) -> Result<CardDetails> {
    let mut details = match &args.details {
        Some(path) => CardDetails::load(path)
            .with_context(|| format!("failed to read card details {}", path.display()))?,
        None => CardDetails::default(),
    };
    args.apply(&mut details);
    Ok(details)
}

/// Load an optional image argument.
pub fn load_optional_asset(
    path: Option<&Path>,
    kind: AssetKind,
) -> Result<Option<DynamicImage>> {
    path.map(|path| load_asset(path, kind).map_err(anyhow::Error::from))
        .transpose()
}
