use ethers::types::Address;
use ethers::utils::to_checksum;
use eyre::Context;
use tracing::{info, instrument};
use tracing_indicatif::indicatif_println;

use crate::deployment::DeploymentContext;
use crate::deployment_info::DeployedContract;
use crate::network::Network;

#[instrument(skip_all, fields(contract = %context.settings.contract_name))]
pub async fn deploy_contract<N>(
    context: &DeploymentContext<N>,
    signer: Address,
) -> eyre::Result<DeployedContract>
where
    N: Network,
{
    let name = &context.settings.contract_name;

    let factory = context
        .network
        .contract_factory(name)
        .await
        .wrap_err_with(|| format!("Getting contract factory for {name}"))?;

    let deployment = context.network.deploy(signer, &factory).await?;

    let address = deployment.resolve_address()?;

    info!(transaction_hash = ?deployment.transaction_hash, "Deployed");

    indicatif_println!(
        "{name} deployed to: {}",
        to_checksum(&address, None)
    );

    Ok(deployment)
}
