use ethers::types::Address;
use ethers::utils::to_checksum;
use eyre::{Context, ContextCompat};
use tracing::instrument;
use tracing_indicatif::indicatif_println;

use crate::deployment::DeploymentContext;
use crate::network::Network;

/// Picks the first available signer
#[instrument(skip_all)]
pub async fn acquire_signer<N>(
    context: &DeploymentContext<N>,
) -> eyre::Result<Address>
where
    N: Network,
{
    let signers = context
        .network
        .signers()
        .await
        .wrap_err("Acquiring signing account")?;

    let signer = signers.first().copied().context(
        "No signing accounts available, configure a private key \
         or unlock an account on the node",
    )?;

    indicatif_println!(
        "Deploying contracts with the account: {}",
        to_checksum(&signer, None)
    );

    Ok(signer)
}
