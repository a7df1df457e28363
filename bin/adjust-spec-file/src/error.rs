use std::{io, path::PathBuf};

use thiserror::Error;

/// Gathers errors from chain spec patching.
#[derive(Debug, Error)]
pub enum PatchError {
    /// An input file could not be read.
    #[error("Could not read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// An input file does not hold JSON of the expected shape.
    #[error("Could not parse `{}`: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The chain spec lacks a field that is about to be patched.
    #[error("Chain spec has no `{0}` field")]
    MissingPath(String),
    /// A patched field exists but holds a different kind of JSON value.
    #[error("Chain spec field `{path}` is not {expected}")]
    UnexpectedType {
        path: String,
        expected: &'static str,
    },
    /// Inline balance entry is not in the `<account>=<amount>` format.
    #[error("Malformed balance entry `{0}`, expected format: <account>=<amount>")]
    InvalidBalance(String),
    /// A non-mainnet spec would ship with a sudo key other than the development one.
    #[error(
        "Sudo key {found} differs from the default development key, pass --sudo-key to override it"
    )]
    SudoKeyMismatch { found: String },
    /// Balance merging was requested for the production network.
    #[error("Cannot merge balances on mainnet")]
    MergeOnMainnet,
}

pub type Result<T> = std::result::Result<T, PatchError>;
