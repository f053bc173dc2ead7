use std::sync::Arc;

use ethers::abi::Abi;
use ethers::contract::ContractFactory;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use eyre::Context;
use serde_json::Value;
use tracing::{info, instrument};

use crate::cli::PrivateKey;
use crate::config::Settings;
use crate::contract_artifacts::{ArtifactStore, CompiledContract};
use crate::deployment_info::{resolve_interface, DeployedContract};
use crate::types::ContractName;

/// The outside world as seen by a deployment
#[allow(async_fn_in_trait)]
pub trait Network {
    /// Accounts able to sign the deployment, in configured order
    async fn signers(&self) -> eyre::Result<Vec<Address>>;

    async fn contract_factory(
        &self,
        name: &ContractName,
    ) -> eyre::Result<CompiledContract>;

    /// Sends the deployment transaction (no constructor arguments) and waits
    /// until it is confirmed
    async fn deploy(
        &self,
        signer: Address,
        contract: &CompiledContract,
    ) -> eyre::Result<DeployedContract>;
}

/// JSON-RPC node plus the local project's compiler artifacts
#[derive(Debug)]
pub struct RpcNetwork {
    provider: Provider<Http>,
    wallets: Vec<LocalWallet>,
    artifacts: ArtifactStore,
    confirmations: usize,
    legacy: bool,
}

impl RpcNetwork {
    pub fn new(
        provider: Provider<Http>,
        wallets: Vec<LocalWallet>,
        artifacts: ArtifactStore,
    ) -> Self {
        Self {
            provider,
            wallets,
            artifacts,
            confirmations: 1,
            legacy: false,
        }
    }

    pub fn with_confirmations(mut self, confirmations: usize) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn with_legacy(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }

    #[instrument(skip_all, fields(rpc_url = %settings.rpc_url))]
    pub async fn connect(settings: &Settings) -> eyre::Result<Self> {
        let provider = Provider::<Http>::try_from(settings.rpc_url.as_str())?;

        let mut wallets: Vec<LocalWallet> =
            settings.accounts.iter().map(PrivateKey::wallet).collect();

        // Node managed accounts are signed for by the node itself
        if !wallets.is_empty() {
            let chain_id = provider
                .get_chainid()
                .await
                .wrap_err("Fetching chain id")?
                .as_u64();

            info!(chain_id, "Connected");

            wallets = wallets
                .into_iter()
                .map(|wallet| wallet.with_chain_id(chain_id))
                .collect();
        }

        let artifacts =
            ArtifactStore::new(&settings.project_root, &settings.artifacts_dir)
                .with_build(settings.build);

        Ok(Self::new(provider, wallets, artifacts)
            .with_confirmations(settings.confirmations)
            .with_legacy(settings.legacy))
    }

    async fn deploy_with<M>(
        &self,
        client: Arc<M>,
        abi: Abi,
        contract: &CompiledContract,
    ) -> eyre::Result<DeployedContract>
    where
        M: Middleware + 'static,
    {
        let factory =
            ContractFactory::new(abi, contract.bytecode.clone(), client);

        let mut deployer = factory
            .deploy(())
            .wrap_err_with(|| {
                format!("Preparing deployment of {}", contract.name)
            })?
            .confirmations(self.confirmations);

        if self.legacy {
            deployer = deployer.legacy();
        }

        info!(
            confirmations = self.confirmations,
            legacy = self.legacy,
            "Sending deployment transaction"
        );

        let (instance, receipt) = deployer
            .send_with_receipt()
            .await
            .wrap_err_with(|| format!("Deploying {}", contract.name))?;

        info!(
            transaction_hash = ?receipt.transaction_hash,
            block = ?receipt.block_number,
            "Confirmed"
        );

        Ok(DeployedContract {
            deployed_to: Some(instance.address()),
            contract_address: receipt.contract_address,
            abi: contract.abi.clone(),
            transaction_hash: Some(receipt.transaction_hash),
        })
    }
}

impl Network for RpcNetwork {
    async fn signers(&self) -> eyre::Result<Vec<Address>> {
        if !self.wallets.is_empty() {
            return Ok(self.wallets.iter().map(Signer::address).collect());
        }

        self.provider
            .get_accounts()
            .await
            .wrap_err("Listing node accounts")
    }

    async fn contract_factory(
        &self,
        name: &ContractName,
    ) -> eyre::Result<CompiledContract> {
        self.artifacts.load(name).await
    }

    #[instrument(skip(self, contract), fields(contract = %contract.name))]
    async fn deploy(
        &self,
        signer: Address,
        contract: &CompiledContract,
    ) -> eyre::Result<DeployedContract> {
        let abi: Abi =
            serde_json::from_value(Value::Array(resolve_interface(
                &contract.abi,
            )?))
            .wrap_err_with(|| format!("Decoding ABI of {}", contract.name))?;

        let wallet = self
            .wallets
            .iter()
            .find(|wallet| wallet.address() == signer);

        match wallet {
            Some(wallet) => {
                let client = SignerMiddleware::new(
                    self.provider.clone(),
                    wallet.clone(),
                );

                self.deploy_with(Arc::new(client), abi, contract).await
            }
            None => {
                let client = self.provider.clone().with_sender(signer);

                self.deploy_with(Arc::new(client), abi, contract).await
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::str::FromStr;

    use ethers::types::Bytes;
    use serde_json::json;

    use super::*;
    use crate::cli::DeploymentMode;

    const KEY_0: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_1: &str =
        "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    const UNREACHABLE: &str = "http://127.0.0.1:1";

    fn settings(accounts: Vec<PrivateKey>) -> Settings {
        Settings {
            mode: DeploymentMode::Persist,
            rpc_url: UNREACHABLE.parse().unwrap(),
            accounts,
            confirmations: 1,
            legacy: false,
            contract_name: ContractName::default(),
            project_root: PathBuf::from("."),
            artifacts_dir: PathBuf::from("out"),
            build: false,
            output_dir: PathBuf::from("client/src/contracts-data"),
        }
    }

    fn wallets() -> eyre::Result<Vec<LocalWallet>> {
        Ok(vec![
            KEY_0.parse::<PrivateKey>()?.wallet(),
            KEY_1.parse::<PrivateKey>()?.wallet(),
        ])
    }

    #[tokio::test]
    async fn configured_wallets_are_the_signers_in_order() -> eyre::Result<()>
    {
        let network = RpcNetwork::new(
            Provider::<Http>::try_from(UNREACHABLE)?,
            wallets()?,
            ArtifactStore::new(".", "out"),
        );

        let signers = network.signers().await?;

        assert_eq!(
            signers,
            vec![
                Address::from_str(
                    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
                )?,
                Address::from_str(
                    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
                )?,
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn connecting_without_accounts_needs_no_node() -> eyre::Result<()> {
        let network = RpcNetwork::connect(&settings(vec![])).await?;

        assert!(network.wallets.is_empty());
        assert!(network.signers().await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn connecting_with_accounts_fails_without_node() -> eyre::Result<()>
    {
        let accounts = vec![KEY_0.parse::<PrivateKey>()?];
        let result = RpcNetwork::connect(&settings(accounts)).await;

        assert!(format!("{:?}", result.unwrap_err()).contains("chain id"));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_abi_never_reaches_the_node() -> eyre::Result<()> {
        let network = RpcNetwork::new(
            Provider::<Http>::try_from(UNREACHABLE)?,
            wallets()?,
            ArtifactStore::new(".", "out"),
        );

        let contract = CompiledContract {
            name: ContractName::default(),
            abi: json!({ "not": "an abi" }),
            bytecode: Bytes::from(vec![0x60, 0x80]),
            source: PathBuf::from("out/ScientificClubElection.sol"),
        };

        let err = network
            .deploy(network.signers().await?[0], &contract)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Unsupported ABI shape"));

        Ok(())
    }
}
