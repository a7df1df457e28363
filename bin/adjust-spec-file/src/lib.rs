//! Adjusts a chain spec file with environment specific values: chain identity,
//! bootnodes, authority keys, sudo key and initial balances.

pub mod config;
pub mod error;
pub mod inputs;
pub mod patcher;
pub mod spec;

pub use config::NodeEnv;
pub use error::{PatchError, Result};
pub use patcher::{apply, patch_spec_file, PatchParams};
pub use spec::{ChainSpec, ChainType};
