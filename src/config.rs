// File: src/config.rs
use crate::core::engine::{EngineSettings, PROPER_NAME_STROKE_LIMIT};
use clap::Parser;
use std::path::PathBuf;

/// Command-line configuration for the augmentor.
#[derive(Debug, Clone, Parser)]
#[command(name = "steno_augment")]
#[command(about = "Generate additional outlines for a steno theory dictionary")]
pub struct Config {
    /// Source dictionary path (repeatable; later files override earlier keys)
    #[arg(long = "lapwing_source", alias = "lapwing-source", value_name = "PATH", required = true)]
    pub sources: Vec<PathBuf>,

    /// Target dictionary path (repeatable; each receives the same output)
    #[arg(long = "output_target", alias = "output-target", value_name = "PATH", required = true)]
    pub targets: Vec<PathBuf>,

    /// Optional path for a JSON report of what each pass did
    #[arg(long = "report_target", alias = "report-target", value_name = "PATH")]
    pub report_target: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Capitalized outlines with more strokes than this are not expanded
    #[arg(long, default_value_t = PROPER_NAME_STROKE_LIMIT)]
    pub proper_name_stroke_limit: usize,

    /// Log progress every N original entries (0 disables progress lines)
    #[arg(long, default_value_t = 10_000)]
    pub progress_interval: usize,
}

impl Config {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            proper_name_stroke_limit: self.proper_name_stroke_limit,
            original_progress_interval: self.progress_interval,
            additional_progress_interval: self.progress_interval / 10,
        }
    }
}
