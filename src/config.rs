use std::path::{Path, PathBuf};

use eyre::Context;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::cli::{Args, DeploymentMode, PrivateKey};
use crate::serde_utils;
use crate::types::ContractName;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_ARTIFACTS_DIR: &str = "out";
pub const DEFAULT_OUTPUT_DIR: &str = "client/src/contracts-data";

/// Contents of the optional deployment configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub accounts: Vec<PrivateKey>,
    pub confirmations: usize,
    pub legacy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub name: ContractName,
    pub project_root: PathBuf,
    pub artifacts_dir: PathBuf,
    pub build: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            accounts: vec![],
            confirmations: 1,
            legacy: false,
        }
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            name: ContractName::default(),
            project_root: PathBuf::from("."),
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            build: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    pub async fn load(path: Option<&Path>) -> eyre::Result<Self> {
        match path {
            Some(path) => serde_utils::read_deserialize(path)
                .await
                .wrap_err("Loading deployment configuration"),
            None => Ok(Self::default()),
        }
    }
}

/// Everything a deployment run needs, after layering the command line over
/// the configuration file over the defaults
#[derive(Debug, Clone)]
pub struct Settings {
    pub mode: DeploymentMode,
    pub rpc_url: Url,
    pub accounts: Vec<PrivateKey>,
    pub confirmations: usize,
    pub legacy: bool,
    pub contract_name: ContractName,
    pub project_root: PathBuf,
    pub artifacts_dir: PathBuf,
    pub build: bool,
    pub output_dir: PathBuf,
}

impl Settings {
    pub fn resolve(args: Args, config: Config) -> eyre::Result<Self> {
        let Config {
            network,
            contract,
            output,
        } = config;

        let rpc_url = args.rpc_url.unwrap_or(network.rpc_url);
        let rpc_url: Url = rpc_url
            .parse()
            .with_context(|| format!("Invalid RPC url {rpc_url:?}"))?;

        let accounts = if args.private_keys.is_empty() {
            network.accounts
        } else {
            args.private_keys
        };

        Ok(Self {
            mode: args.mode,
            rpc_url,
            accounts,
            confirmations: args.confirmations.unwrap_or(network.confirmations),
            legacy: args.legacy.unwrap_or(network.legacy),
            contract_name: args
                .contract_name
                .map(ContractName)
                .unwrap_or(contract.name),
            project_root: args.project_root.unwrap_or(contract.project_root),
            artifacts_dir: args
                .artifacts_dir
                .unwrap_or(contract.artifacts_dir),
            build: if args.skip_build {
                false
            } else {
                args.build.unwrap_or(contract.build)
            },
            output_dir: args.output_dir.unwrap_or(output.dir),
        })
    }

    /// File the artifact document for the client application is written to
    pub fn output_path(&self) -> PathBuf {
        self.project_root
            .join(&self.output_dir)
            .join(self.contract_name.artifact_file_name())
    }
}
