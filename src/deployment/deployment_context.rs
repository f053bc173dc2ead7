use std::path::PathBuf;

use crate::config::Settings;
use crate::network::Network;

/// Explicit replacement for an ambient network/signer environment
#[derive(Debug)]
pub struct DeploymentContext<N> {
    pub settings: Settings,
    pub network: N,
}

impl<N> DeploymentContext<N>
where
    N: Network,
{
    pub fn new(settings: Settings, network: N) -> Self {
        Self { settings, network }
    }

    pub fn output_path(&self) -> PathBuf {
        self.settings.output_path()
    }
}
