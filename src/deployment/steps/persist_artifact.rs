use std::path::PathBuf;

use eyre::Context;
use tracing::instrument;
use tracing_indicatif::indicatif_println;

use crate::deployment::DeploymentContext;
use crate::deployment_info::DeployedContract;
use crate::network::Network;
use crate::report::ArtifactDocument;

/// Writes the address and ABI where the client application expects them
#[instrument(skip_all)]
pub async fn persist_artifact<N>(
    context: &DeploymentContext<N>,
    deployment: &DeployedContract,
) -> eyre::Result<PathBuf>
where
    N: Network,
{
    let resolved = deployment
        .resolve()
        .wrap_err("Resolving deployment info")?;

    let document = ArtifactDocument::from(resolved);

    let path = context.output_path();
    document
        .write(&path)
        .await
        .wrap_err("Persisting deployment artifact")?;

    indicatif_println!("Deployment artifact written to {}", path.display());

    Ok(path)
}
