use crate::fetch::FetchError;
use std::path::PathBuf;
use thiserror::Error;

pub type NewsResult<T> = Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("utc offset of {0} hours is out of range")]
    InvalidOffset(i32),

    #[error("host document has no `{{{{ content }}}}` mount point")]
    MissingMountPoint,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}
