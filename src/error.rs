use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("read product catalog {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse product catalog {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reload needs both files; either one failing aborts it.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a product.")]
    NoProduct,

    #[error("Please select a view.")]
    NoView,

    #[error("'{0}' cannot be sent as a path segment.")]
    UnroutableId(String),
}

/// Everything that stops a submit before the first outbound call.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    #[error("a submit is already in progress")]
    Busy,

    #[error("build http client")]
    Client(#[source] reqwest::Error),
}
