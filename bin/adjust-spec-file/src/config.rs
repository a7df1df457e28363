//! Well-known values baked into patched chain specs and the environment label
//! that selects between them.

use std::{convert::Infallible, fmt, str::FromStr};

use crate::spec::ChainType;

/// SS58 address of the `//Alice` development account.
///
/// Non-mainnet specs are expected to carry it as the sudo key unless an explicit
/// override is supplied.
pub const DEFAULT_SUDO_KEY: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

/// Environment label of the production network.
pub const MAINNET_LABEL: &str = "mainnet";

/// Chain id used by the production network.
pub const MAINNET_CHAIN_ID: &str = "torus";

/// Every other network gets `{CHAIN_ID_PREFIX}-{label}` as its chain id.
pub const CHAIN_ID_PREFIX: &str = "torus";

pub const DEFAULT_NODE_NAME: &str = "Torus";

/// Network a chain spec is prepared for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeEnv {
    Mainnet,
    /// Any non-production network, e.g. `testnet`.
    Other(String),
}

impl NodeEnv {
    pub fn new(label: &str) -> Self {
        match label {
            MAINNET_LABEL => NodeEnv::Mainnet,
            other => NodeEnv::Other(other.to_string()),
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, NodeEnv::Mainnet)
    }

    pub fn label(&self) -> &str {
        match self {
            NodeEnv::Mainnet => MAINNET_LABEL,
            NodeEnv::Other(label) => label,
        }
    }

    pub fn chain_type(&self) -> ChainType {
        match self {
            NodeEnv::Mainnet => ChainType::Live,
            NodeEnv::Other(_) => ChainType::Development,
        }
    }

    pub fn chain_id(&self) -> String {
        match self {
            NodeEnv::Mainnet => MAINNET_CHAIN_ID.to_string(),
            NodeEnv::Other(label) => format!("{}-{}", CHAIN_ID_PREFIX, label),
        }
    }
}

/// Casting from `String`, any label is accepted.
impl FromStr for NodeEnv {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NodeEnv::new(s))
    }
}

impl fmt::Display for NodeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
