use std::path::Path;

use ethers::utils::to_checksum;
use eyre::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::deployment_info::ResolvedDeployment;
use crate::serde_utils;

/// What the client application reads to talk to the deployed contract
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactDocument {
    pub address: String,
    pub abi: Vec<Value>,
}

impl From<ResolvedDeployment> for ArtifactDocument {
    fn from(value: ResolvedDeployment) -> Self {
        Self {
            address: to_checksum(&value.address, None),
            abi: value.abi,
        }
    }
}

impl ArtifactDocument {
    /// Writes the document to `path`, creating missing parent directories
    /// and replacing any previous document
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn write(&self, path: &Path) -> eyre::Result<()> {
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await.with_context(|| {
                format!("Creating output directory {}", dir.display())
            })?;
        }

        serde_utils::write_json_pretty(path, self).await?;

        info!(address = %self.address, entries = self.abi.len(), "Written");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ethers::types::{Address, H160};
    use hex_literal::hex;
    use serde_json::json;

    use super::*;

    const ADDRESS: Address =
        H160(hex!("5fbdb2315678afecb367f032d93f642f64180aa3"));

    #[test]
    fn address_is_checksummed() {
        let document = ArtifactDocument::from(ResolvedDeployment {
            address: ADDRESS,
            abi: vec![],
        });

        assert_eq!(
            document.address,
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }

    #[test]
    fn serializes_exactly_address_and_abi() -> eyre::Result<()> {
        let document = ArtifactDocument {
            address: "0xABC".to_string(),
            abi: vec![],
        };

        let value = serde_json::to_value(&document)?;

        assert_eq!(value, json!({ "address": "0xABC", "abi": [] }));

        Ok(())
    }

    #[test]
    fn extra_keys_are_not_a_document() {
        let result = serde_json::from_value::<ArtifactDocument>(json!({
            "address": "0xABC",
            "abi": [],
            "network": "sepolia"
        }));

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn write_creates_missing_directories() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("client/src/contracts-data/Election.json");

        let document = ArtifactDocument {
            address: "0xABC".to_string(),
            abi: vec![json!({ "type": "fallback" })],
        };
        document.write(&path).await?;

        let written: ArtifactDocument = serde_utils::read_json(&path).await?;
        assert_eq!(written, document);

        Ok(())
    }

    #[tokio::test]
    async fn write_into_existing_directory_is_fine() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Election.json");

        let document = ArtifactDocument {
            address: "0xABC".to_string(),
            abi: vec![],
        };
        document.write(&path).await?;
        document.write(&path).await?;

        let written: ArtifactDocument = serde_utils::read_json(&path).await?;
        assert_eq!(written, document);

        Ok(())
    }

    #[tokio::test]
    async fn write_fails_when_a_parent_is_a_file() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        tokio::fs::write(dir.path().join("client"), "not a directory").await?;

        let document = ArtifactDocument {
            address: "0xABC".to_string(),
            abi: vec![],
        };
        let result = document
            .write(&dir.path().join("client/contracts-data/Election.json"))
            .await;

        assert!(result.is_err());

        Ok(())
    }
}
