use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which user-supplied image an asset error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Photo,
    Watermark,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Photo => write!(f, "user picture"),
            AssetKind::Watermark => write!(f, "watermark"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CardError {
    #[error("error loading {kind} {}: {source}", path.display())]
    Asset {
        kind: AssetKind,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read font {}: {source}", path.display())]
    FontIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a usable font", path.display())]
    InvalidFont { path: PathBuf },

    #[error("failed to parse card details {}: {source}", path.display())]
    Details {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode QR payload: {0}")]
    QrCode(#[from] qrcode::types::QrError),

    #[error("failed to write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
