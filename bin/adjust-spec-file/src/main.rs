use std::{
    env,
    io::{self, Write},
    path::PathBuf,
};

use adjust_spec_file::{config::DEFAULT_NODE_NAME, patch_spec_file, NodeEnv, PatchParams};
use anyhow::Context;
use clap::Parser;
use log::info;

#[derive(Debug, Parser, Clone)]
#[command(version, about = "Adjust chain spec file with node configuration")]
struct Config {
    /// Node environment (e.g. mainnet, testnet)
    pub node_env: NodeEnv,

    /// Path to the input chain spec file
    pub spec_file: PathBuf,

    /// Path to the bootnodes file (JSON array of multiaddresses)
    #[arg(long, value_name = "PATH")]
    pub bootnodes_file: Option<PathBuf>,

    /// Path to the AURA authority list file (JSON)
    #[arg(long, value_name = "PATH")]
    pub aura_list_file: Option<PathBuf>,

    /// Path to the GRANDPA authority list file (JSON)
    #[arg(long, value_name = "PATH")]
    pub gran_list_file: Option<PathBuf>,

    /// Path to the balances file (JSON)
    #[arg(long, value_name = "PATH")]
    pub balances_file: Option<PathBuf>,

    /// Extra balance entry, added after the balances file entries
    #[arg(long = "balance", value_name = "ACCOUNT=AMOUNT")]
    pub balances: Vec<String>,

    /// Merge external balances with the spec file balances
    #[arg(long)]
    pub merge_balances: bool,

    /// Sudo key to use
    #[arg(long, value_name = "KEY")]
    pub sudo_key: Option<String>,

    /// Node name
    #[arg(long, default_value = DEFAULT_NODE_NAME)]
    pub name: String,
}

impl From<Config> for PatchParams {
    fn from(config: Config) -> Self {
        PatchParams {
            node_env: config.node_env,
            name: Some(config.name),
            bootnodes_file: config.bootnodes_file,
            aura_list_file: config.aura_list_file,
            gran_list_file: config.gran_list_file,
            balances_file: config.balances_file,
            balances: config.balances,
            merge_balances: config.merge_balances,
            sudo_key: config.sudo_key,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_env();

    let config = Config::parse();
    let mut stdout = io::stdout().lock();
    run(config, &mut stdout)?;
    info!("Chain spec written to stdout");

    Ok(())
}

/// Patches the spec described by `config` and writes it to `out`.
///
/// Nothing is written unless every patch step succeeded.
fn run(config: Config, out: &mut impl Write) -> anyhow::Result<()> {
    let spec_file = config.spec_file.clone();

    let spec = patch_spec_file(&spec_file, &config.into())
        .with_context(|| format!("Failed to adjust chain spec {:?}", spec_file))?;
    let json = spec.to_json_pretty()?;

    writeln!(out, "{}", json).context("Failed to write chain spec")?;
    out.flush()?;

    Ok(())
}

fn init_env() {
    if env::var(env_logger::DEFAULT_FILTER_ENV).is_err() {
        env::set_var(env_logger::DEFAULT_FILTER_ENV, "info");
    }
    env_logger::init();
}

#[cfg(test)]
mod tests {
    use adjust_spec_file::{config::DEFAULT_SUDO_KEY, PatchError};
    use clap::CommandFactory;
    use serde_json::{json, Value};
    use tempfile::NamedTempFile;

    use super::*;

    fn spec_file(sudo_key: &str) -> NamedTempFile {
        let spec = json!({
            "name": "Torus",
            "id": "dev",
            "chainType": "Development",
            "genesis": {
                "runtimeGenesis": {
                    "patch": {
                        "sudo": { "key": sudo_key },
                        "balances": { "balances": [] }
                    }
                }
            }
        });
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", spec).unwrap();
        file
    }

    fn config(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("adjust-spec-file").chain(args.iter().copied()))
            .unwrap()
    }

    fn patch_error(err: &anyhow::Error) -> &PatchError {
        err.downcast_ref::<PatchError>().unwrap()
    }

    #[test]
    fn cli_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn positional_arguments_are_required() {
        assert!(Config::try_parse_from(["adjust-spec-file", "mainnet"]).is_err());
    }

    #[test]
    fn flags_map_onto_patch_params() {
        let config = Config::try_parse_from([
            "adjust-spec-file",
            "testnet",
            "spec.json",
            "--aura-list-file",
            "aura.json",
            "--balance",
            "5Alice=1",
            "--balance",
            "5Bob=2",
            "--merge-balances",
            "--sudo-key",
            "5Sudo",
        ])
        .unwrap();
        assert_eq!(config.spec_file, PathBuf::from("spec.json"));

        let params = PatchParams::from(config);
        assert_eq!(params.node_env, NodeEnv::new("testnet"));
        assert_eq!(params.name.as_deref(), Some(DEFAULT_NODE_NAME));
        assert_eq!(params.aura_list_file, Some(PathBuf::from("aura.json")));
        assert_eq!(params.gran_list_file, None);
        assert_eq!(params.balances, ["5Alice=1", "5Bob=2"]);
        assert!(params.merge_balances);
        assert_eq!(params.sudo_key.as_deref(), Some("5Sudo"));
    }

    #[test]
    fn mainnet_label_parses_to_mainnet() {
        let config = Config::try_parse_from(["adjust-spec-file", "mainnet", "spec.json"]).unwrap();
        assert!(config.node_env.is_mainnet());
    }

    #[test]
    fn writes_patched_spec() {
        let file = spec_file(DEFAULT_SUDO_KEY);
        let path = file.path().to_str().unwrap();
        let mut out = Vec::new();

        run(config(&["testnet", path]), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.ends_with("}\n"));
        let spec: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(spec["id"], json!("torus-testnet"));
        assert_eq!(spec["chainType"], json!("Development"));
    }

    #[test]
    fn nothing_is_written_on_merge_on_mainnet() {
        let file = spec_file("5MainnetSudo");
        let path = file.path().to_str().unwrap();
        let mut out = Vec::new();

        let err = run(config(&["mainnet", path, "--merge-balances"]), &mut out).unwrap_err();

        assert!(matches!(patch_error(&err), PatchError::MergeOnMainnet));
        assert!(out.is_empty());
    }

    #[test]
    fn nothing_is_written_on_sudo_key_mismatch() {
        let file = spec_file("5NotAlice");
        let path = file.path().to_str().unwrap();
        let mut out = Vec::new();

        let err = run(config(&["testnet", path]), &mut out).unwrap_err();

        assert!(matches!(patch_error(&err), PatchError::SudoKeyMismatch { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn empty_sudo_key_flag_does_not_skip_the_check() {
        let file = spec_file("5NotAlice");
        let path = file.path().to_str().unwrap();
        let mut out = Vec::new();

        let err = run(config(&["testnet", path, "--sudo-key", ""]), &mut out).unwrap_err();

        assert!(matches!(patch_error(&err), PatchError::SudoKeyMismatch { .. }));
        assert!(out.is_empty());
    }
}
