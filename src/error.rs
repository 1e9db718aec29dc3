// File: src/error.rs
use std::path::PathBuf;

/// Failures of the file layer around the engine. The engine itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum AugmentError {
    #[error("could not read dictionary {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse dictionary {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dictionary {path:?} is not a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("dictionary {path:?} maps {key:?} to a non-string value")]
    NonStringValue { path: PathBuf, key: String },

    #[error("could not write dictionary {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize dictionary for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not move finished dictionary into {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}
