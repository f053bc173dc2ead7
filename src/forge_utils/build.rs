use std::ffi::OsString;
use std::path::{Path, PathBuf};

use eyre::Context;
use tracing::{info, instrument};

/// Compiles a Foundry project by shelling out to `forge build`
#[derive(Debug)]
pub struct ForgeBuild {
    program: OsString,
    cwd: Option<PathBuf>,
    out_dir: Option<PathBuf>,
}

impl ForgeBuild {
    pub fn new() -> Self {
        Self {
            program: OsString::from("forge"),
            cwd: None,
            out_dir: None,
        }
    }

    /// Runs a different executable instead of `forge` from `PATH`
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_owned());
        self
    }

    pub fn with_out_dir(mut self, out_dir: impl AsRef<Path>) -> Self {
        self.out_dir = Some(out_dir.as_ref().to_owned());
        self
    }

    fn command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.arg("build");

        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        if let Some(out_dir) = &self.out_dir {
            cmd.arg("--out");
            cmd.arg(out_dir);
        }

        cmd
    }

    #[instrument(name = "forge_build", skip_all)]
    pub async fn run(&self) -> eyre::Result<()> {
        let mut cmd = self.command();

        info!("Building contracts with {cmd:#?}");

        let output = cmd
            .output()
            .await
            .with_context(|| format!("Spawning {:?}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            eyre::bail!("forge build failed: {}", stderr);
        }

        Ok(())
    }
}
