//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use idcard::{CardDetails, PreviewStyle};

/// Terminal preview styles.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PreviewStyleArg {
    Truecolor,
    Ascii,
}

impl From<PreviewStyleArg> for PreviewStyle {
    fn from(value: PreviewStyleArg) -> PreviewStyle {
        match value {
            PreviewStyleArg::Truecolor => PreviewStyle::Truecolor,
            PreviewStyleArg::Ascii => PreviewStyle::Ascii,
        }
    }
}

/// Card details sources: an optional JSON file, then per-field flags on top.
#[derive(Args, Debug, Default)]
pub struct DetailsArgs {
    /// JSON file with card details; absent keys keep their defaults.
    #[arg(long = "details")]
    pub details: Option<PathBuf>,
    /// Header title.
    #[arg(long)]
    pub title: Option<String>,
    /// Card holder name.
    #[arg(long)]
    pub name: Option<String>,
    /// Roll number.
    #[arg(long = "roll-no")]
    pub roll_no: Option<String>,
    /// Campus location.
    #[arg(long)]
    pub location: Option<String>,
    /// Distance learning (free text, e.g. Yes/No).
    #[arg(long = "distance-learning")]
    pub distance_learning: Option<String>,
    /// Class day and time.
    #[arg(long = "day-time")]
    pub day_time: Option<String>,
    /// Batch number.
    #[arg(long = "batch-no")]
    pub batch_no: Option<String>,
    /// Footer caption above the signature line.
    #[arg(long)]
    pub signature: Option<String>,
}

impl DetailsArgs {
    /// Overwrite fields of `details` with any flag that was given.
    pub fn apply(&self, details: &mut CardDetails) {
        let overrides = [
            (&self.title, &mut details.title),
            (&self.name, &mut details.name),
            (&self.roll_no, &mut details.roll_no),
            (&self.location, &mut details.location),
            (&self.distance_learning, &mut details.distance_learning),
            (&self.day_time, &mut details.day_time),
            (&self.batch_no, &mut details.batch_no),
            (&self.signature, &mut details.signature),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
    }
}
