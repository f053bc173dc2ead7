use std::path::PathBuf;

use tracing::instrument;

use self::steps::acquire_signer::acquire_signer;
use self::steps::deploy_contract::deploy_contract;
use self::steps::persist_artifact::persist_artifact;
use crate::cli::DeploymentMode;
use crate::deployment_info::DeployedContract;
use crate::network::Network;

pub mod deployment_context;
pub mod steps;

pub use self::deployment_context::DeploymentContext;

#[instrument(skip_all, fields(mode = %context.settings.mode))]
pub async fn run_deployment<N>(
    context: &DeploymentContext<N>,
) -> eyre::Result<()>
where
    N: Network,
{
    match context.settings.mode {
        DeploymentMode::Basic => {
            deploy(context).await?;
        }
        DeploymentMode::Persist => {
            deploy_and_persist(context).await?;
        }
    }

    Ok(())
}

/// Deploys one fresh instance and reports its address
pub async fn deploy<N>(
    context: &DeploymentContext<N>,
) -> eyre::Result<DeployedContract>
where
    N: Network,
{
    let signer = acquire_signer(context).await?;

    deploy_contract(context, signer).await
}

/// Deploys like [`deploy`] and then writes the artifact document
pub async fn deploy_and_persist<N>(
    context: &DeploymentContext<N>,
) -> eyre::Result<PathBuf>
where
    N: Network,
{
    let deployment = deploy(context).await?;

    persist_artifact(context, &deployment).await
}
