use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub mod private_key;

pub use private_key::PrivateKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, derive_more::Display)]
#[clap(rename_all = "kebab-case")]
pub enum DeploymentMode {
    /// Deploy and print the address
    #[display(fmt = "basic")]
    Basic,
    /// Deploy and write the address and ABI for the client application
    #[display(fmt = "persist")]
    Persist,
}

#[derive(Debug, Clone, Parser)]
#[clap(rename_all = "kebab-case", version, about)]
pub struct Args {
    /// Path to the deployment configuration file
    #[clap(short, long, env)]
    pub config: Option<PathBuf>,

    #[clap(short, long, env, default_value = "persist")]
    pub mode: DeploymentMode,

    /// The RPC Url to use for the deployment
    #[clap(short, long, env)]
    pub rpc_url: Option<String>,

    /// Private keys of the available signers, the first one deploys
    ///
    /// When none are given anywhere, the node's unlocked accounts are used
    #[clap(
        short,
        long = "private-key",
        env = "PRIVATE_KEYS",
        value_delimiter = ','
    )]
    pub private_keys: Vec<PrivateKey>,

    /// Name of the contract template to deploy
    #[clap(long, env)]
    pub contract_name: Option<String>,

    /// Root of the contracts project, other paths are relative to it
    #[clap(long, env)]
    pub project_root: Option<PathBuf>,

    /// Where the compiler puts its artifacts
    #[clap(long, env)]
    pub artifacts_dir: Option<PathBuf>,

    /// Where the deployment artifact for the client application goes
    #[clap(short, long, env)]
    pub output_dir: Option<PathBuf>,

    /// Number of confirmations to wait for
    #[clap(long, env)]
    pub confirmations: Option<usize>,

    /// Send a legacy (pre EIP-1559) deployment transaction
    ///
    /// `--legacy false` switches it off when the configuration file enables
    /// it
    #[clap(long, env, num_args = 0..=1, default_missing_value = "true")]
    pub legacy: Option<bool>,

    /// Whether to run `forge build` before looking up the artifacts
    #[clap(long, env, num_args = 0..=1, default_missing_value = "true")]
    pub build: Option<bool>,

    /// Use the existing artifacts instead of running `forge build`
    #[clap(long, env, conflicts_with = "build")]
    pub skip_build: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_0: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_1: &str =
        "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    #[test]
    fn defaults_to_persisting() -> eyre::Result<()> {
        let args = Args::try_parse_from(["election-deployer"])?;

        assert_eq!(args.mode, DeploymentMode::Persist);
        assert_eq!(args.legacy, None);
        assert_eq!(args.build, None);
        assert!(!args.skip_build);

        Ok(())
    }

    #[test]
    fn parses_every_flag() -> eyre::Result<()> {
        let args = Args::try_parse_from([
            "election-deployer",
            "--mode",
            "basic",
            "--rpc-url",
            "http://localhost:8545",
            "--private-key",
            &format!("{KEY_0},{KEY_1}"),
            "--contract-name",
            "Ballot",
            "--project-root",
            "contracts",
            "--artifacts-dir",
            "artifacts",
            "--output-dir",
            "web/abi",
            "--confirmations",
            "3",
            "--legacy",
            "--skip-build",
        ])?;

        assert_eq!(args.mode, DeploymentMode::Basic);
        assert_eq!(args.rpc_url.as_deref(), Some("http://localhost:8545"));
        assert_eq!(args.private_keys.len(), 2);
        assert_eq!(args.private_keys[0], KEY_0.parse::<PrivateKey>()?);
        assert_eq!(args.contract_name.as_deref(), Some("Ballot"));
        assert_eq!(args.project_root, Some(PathBuf::from("contracts")));
        assert_eq!(args.artifacts_dir, Some(PathBuf::from("artifacts")));
        assert_eq!(args.output_dir, Some(PathBuf::from("web/abi")));
        assert_eq!(args.confirmations, Some(3));
        assert_eq!(args.legacy, Some(true));
        assert!(args.skip_build);

        Ok(())
    }

    #[test]
    fn switches_accept_an_explicit_value() -> eyre::Result<()> {
        let args = Args::try_parse_from([
            "election-deployer",
            "--legacy",
            "false",
            "--build",
            "--confirmations",
            "2",
        ])?;

        assert_eq!(args.legacy, Some(false));
        assert_eq!(args.build, Some(true));
        assert_eq!(args.confirmations, Some(2));

        Ok(())
    }

    #[test]
    fn build_and_skip_build_conflict() {
        let result = Args::try_parse_from([
            "election-deployer",
            "--build",
            "--skip-build",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn rejects_malformed_private_key() {
        let result = Args::try_parse_from([
            "election-deployer",
            "--private-key",
            "0x1234",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn mode_displays_as_its_flag_value() {
        assert_eq!(DeploymentMode::Basic.to_string(), "basic");
        assert_eq!(DeploymentMode::Persist.to_string(), "persist");
    }
}
