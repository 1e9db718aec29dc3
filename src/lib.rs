// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub use crate::core::engine::{AugmentEngine, AugmentReport, EngineSettings};
pub use crate::core::types::Dictionary;
pub use crate::error::AugmentError;

use std::collections::BTreeMap;

/// Runs the full pipeline over `original` with default settings and
/// returns only the generated entries.
pub fn augment(original: Dictionary) -> BTreeMap<String, String> {
    let mut engine = AugmentEngine::new(original);
    engine.run();
    engine.into_output()
}
