//! The patch pipeline: an ordered sequence of conditional overwrites applied to a
//! freshly loaded chain spec.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use crate::{
    config::{NodeEnv, DEFAULT_SUDO_KEY},
    error::{PatchError, Result},
    inputs::{load_json, parse_balances},
    spec::{ChainSpec, RuntimePatch},
};

const LOG_TARGET: &str = "adjust-spec-file";

/// Everything that decides how a chain spec gets adjusted.
#[derive(Clone, Debug)]
pub struct PatchParams {
    pub node_env: NodeEnv,
    /// Display name, left untouched when `None` or empty.
    pub name: Option<String>,
    pub bootnodes_file: Option<PathBuf>,
    pub aura_list_file: Option<PathBuf>,
    pub gran_list_file: Option<PathBuf>,
    pub balances_file: Option<PathBuf>,
    /// Inline `<account>=<amount>` entries, appended after the balances file content.
    pub balances: Vec<String>,
    pub merge_balances: bool,
    /// Sudo key override, an empty key counts as no override.
    pub sudo_key: Option<String>,
}

impl PatchParams {
    /// Parameters that only set the chain type and id.
    pub fn new(node_env: NodeEnv) -> Self {
        PatchParams {
            node_env,
            name: None,
            bootnodes_file: None,
            aura_list_file: None,
            gran_list_file: None,
            balances_file: None,
            balances: Vec::new(),
            merge_balances: false,
            sudo_key: None,
        }
    }
}

/// Load the chain spec from `spec_file` and adjust it according to `params`.
pub fn patch_spec_file(spec_file: &Path, params: &PatchParams) -> Result<ChainSpec> {
    info!(target: LOG_TARGET, "Loading chain spec from {:?}", spec_file);
    let mut spec = ChainSpec::load(spec_file)?;
    apply(&mut spec, params)?;
    Ok(spec)
}

/// Adjust `spec` in place.
///
/// Stops at the first failing step, so `spec` may be left partially patched on error.
pub fn apply(spec: &mut ChainSpec, params: &PatchParams) -> Result<()> {
    let node_env = &params.node_env;

    let chain_type = node_env.chain_type();
    let chain_id = node_env.chain_id();
    info!(
        target: LOG_TARGET,
        "Preparing `{}` spec: chain type {:?}, id `{}`", node_env, chain_type, chain_id
    );
    spec.set_chain_type(chain_type);
    spec.set_id(&chain_id);

    if let Some(name) = params.name.as_deref().filter(|name| !name.is_empty()) {
        info!(target: LOG_TARGET, "Setting chain name to `{}`", name);
        spec.set_name(name);
    }

    if let Some(path) = given(&params.bootnodes_file) {
        let bootnodes: Vec<String> = load_json(path)?;
        info!(target: LOG_TARGET, "Injecting {} bootnodes", bootnodes.len());
        spec.set_boot_nodes(bootnodes);
    }

    let mut patch = spec.runtime_patch_mut()?;

    if let Some(path) = given(&params.aura_list_file) {
        let authorities: Vec<Value> = load_json(path)?;
        info!(target: LOG_TARGET, "Injecting {} AURA authorities", authorities.len());
        patch.set_aura_authorities(authorities)?;
    }

    if let Some(path) = given(&params.gran_list_file) {
        let authorities: Vec<Value> = load_json(path)?;
        info!(target: LOG_TARGET, "Injecting {} GRANDPA authorities", authorities.len());
        patch.set_grandpa_authorities(authorities)?;
    }

    let sudo_key = params.sudo_key.as_deref().filter(|key| !key.is_empty());
    resolve_sudo_key(&mut patch, node_env, sudo_key)?;
    patch_balances(&mut patch, params)
}

/// Empty paths count as not given.
fn given(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|path| !path.as_os_str().is_empty())
}

fn resolve_sudo_key(
    patch: &mut RuntimePatch,
    node_env: &NodeEnv,
    sudo_key: Option<&str>,
) -> Result<()> {
    match sudo_key {
        Some(key) => {
            info!(target: LOG_TARGET, "Setting sudo key to {}", key);
            patch.set_sudo_key(key)
        }
        None if node_env.is_mainnet() => {
            debug!(target: LOG_TARGET, "Keeping the mainnet sudo key as is");
            Ok(())
        }
        None => {
            let key = patch.sudo_key()?;
            if key.as_str() != Some(DEFAULT_SUDO_KEY) {
                return Err(PatchError::SudoKeyMismatch {
                    found: key.to_string(),
                });
            }
            debug!(target: LOG_TARGET, "Sudo key is the default development key");
            Ok(())
        }
    }
}

fn patch_balances(patch: &mut RuntimePatch, params: &PatchParams) -> Result<()> {
    if params.merge_balances && params.node_env.is_mainnet() {
        return Err(PatchError::MergeOnMainnet);
    }

    let mut balances = match given(&params.balances_file) {
        Some(path) => Some(load_json::<Vec<Value>>(path)?),
        None => None,
    };
    if !params.balances.is_empty() {
        balances
            .get_or_insert_with(Vec::new)
            .extend(parse_balances(&params.balances)?);
    }

    let Some(balances) = balances else {
        debug!(target: LOG_TARGET, "No balances given, keeping the existing ones");
        return Ok(());
    };

    if params.merge_balances {
        info!(target: LOG_TARGET, "Merging {} balance entries", balances.len());
        patch.append_balances(balances)
    } else {
        info!(target: LOG_TARGET, "Replacing balances with {} entries", balances.len());
        patch.replace_balances(balances)
    }
}
