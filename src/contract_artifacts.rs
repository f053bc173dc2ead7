use std::path::{Path, PathBuf};

use ethers::types::Bytes;
use eyre::Context;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::forge_utils::ForgeBuild;
use crate::serde_utils;
use crate::types::ContractName;

/// A compiled contract template, everything needed to deploy it
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledContract {
    pub name: ContractName,
    /// The ABI exactly as the compiler emitted it
    pub abi: Value,
    pub bytecode: Bytes,
    pub source: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ArtifactFile {
    abi: Value,
    bytecode: BytecodeShape,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BytecodeShape {
    /// Foundry: `{ "object": "0x..", "sourceMap": .., .. }`
    Object { object: String },
    /// Hardhat: `"0x.."`
    Raw(String),
}

impl BytecodeShape {
    fn as_hex(&self) -> &str {
        match self {
            Self::Object { object } => object,
            Self::Raw(raw) => raw,
        }
    }
}

/// Looks up compiled contracts in a project's artifacts directory,
/// optionally compiling the project first
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    project_root: PathBuf,
    artifacts_dir: PathBuf,
    build: bool,
}

impl ArtifactStore {
    pub fn new(
        project_root: impl AsRef<Path>,
        artifacts_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            project_root: project_root.as_ref().to_owned(),
            artifacts_dir: artifacts_dir.as_ref().to_owned(),
            build: false,
        }
    }

    pub fn with_build(mut self, build: bool) -> Self {
        self.build = build;
        self
    }

    /// Artifact locations for `name`, most likely first
    pub fn candidate_paths(&self, name: &ContractName) -> Vec<PathBuf> {
        let root = self.project_root.join(&self.artifacts_dir);
        let source_file = format!("{name}.sol");
        let artifact_file = format!("{name}.json");

        vec![
            root.join(&source_file).join(&artifact_file),
            root.join("contracts").join(&source_file).join(&artifact_file),
        ]
    }

    #[instrument(skip_all, fields(name = %name))]
    pub async fn load(
        &self,
        name: &ContractName,
    ) -> eyre::Result<CompiledContract> {
        if self.build {
            ForgeBuild::new()
                .with_cwd(&self.project_root)
                .with_out_dir(&self.artifacts_dir)
                .run()
                .await
                .wrap_err_with(|| format!("Compiling {name}"))?;
        }

        let candidates = self.candidate_paths(name);

        for path in &candidates {
            if tokio::fs::try_exists(path).await? {
                return read_artifact(name, path).await;
            }
        }

        let tried = candidates
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        eyre::bail!("Contract template {name} not found (tried {tried})")
    }
}

async fn read_artifact(
    name: &ContractName,
    path: &Path,
) -> eyre::Result<CompiledContract> {
    let artifact: ArtifactFile = serde_utils::read_json(path)
        .await
        .wrap_err_with(|| format!("Reading artifact of {name}"))?;

    let hex_code = artifact.bytecode.as_hex().trim_start_matches("0x");

    let bytecode: Bytes = hex::decode(hex_code)
        .wrap_err_with(|| {
            format!("Decoding bytecode of {name} (unlinked libraries?)")
        })?
        .into();

    if bytecode.is_empty() {
        eyre::bail!(
            "{name} has no creation bytecode, is it an interface or abstract?"
        );
    }

    info!(path = %path.display(), bytes = bytecode.len(), "Loaded artifact");

    Ok(CompiledContract {
        name: name.clone(),
        abi: artifact.abi,
        bytecode,
        source: path.to_owned(),
    })
}
