//! Error types shared by configuration loading and the entity pools.

use std::path::PathBuf;

use thiserror::Error;

use crate::resources::pool::{PoolKind, TemplateBehavior};

/// Failures while loading the INI configuration or the JSON arena layout.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse INI {path:?}: {message}")]
    Ini { path: PathBuf, message: String },
    #[error("failed to parse arena layout: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for [{section}] {key}: {reason}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
}

/// Failures reported by [`EntityPools`](crate::resources::pool::EntityPools).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The template registered for a pool does not carry the behavior the
    /// pool hands out. Reported once; the pool stays disabled afterwards.
    #[error("pool {kind:?} expects a {expected:?} template, found {found:?}")]
    Misconfigured {
        kind: PoolKind,
        expected: TemplateBehavior,
        found: TemplateBehavior,
    },
    #[error("pool {0:?} is disabled by an earlier configuration error")]
    Disabled(PoolKind),
    #[error("no pool registered for {0:?}")]
    MissingTemplate(PoolKind),
}
