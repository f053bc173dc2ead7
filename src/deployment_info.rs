//! What a deployment hands back, and the resolution of the shapes it may come
//! in.
//!
//! Depending on where a deployment comes from, the address is either known
//! from the contract handle or only recorded on the transaction receipt, and
//! the ABI is either a JSON array or that same array serialized into a
//! string (legacy `solc --combined-json` output). [`DeployedContract::resolve`]
//! tries the shapes in priority order so the rest of the pipeline only ever
//! sees a [`ResolvedDeployment`].

use ethers::types::{Address, H256};
use eyre::ContextCompat;
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeployedContract {
    /// Address of the contract handle produced by the deployment
    pub deployed_to: Option<Address>,
    /// Address recorded on the deployment transaction receipt
    pub contract_address: Option<Address>,
    pub abi: Value,
    pub transaction_hash: Option<H256>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedDeployment {
    pub address: Address,
    pub abi: Vec<Value>,
}

impl DeployedContract {
    pub fn resolve_address(&self) -> eyre::Result<Address> {
        self.deployed_to.or(self.contract_address).context(
            "Deployment reported no contract address \
             (neither the contract handle nor the receipt carry one)",
        )
    }

    pub fn resolve_abi(&self) -> eyre::Result<Vec<Value>> {
        resolve_interface(&self.abi)
    }

    pub fn resolve(&self) -> eyre::Result<ResolvedDeployment> {
        Ok(ResolvedDeployment {
            address: self.resolve_address()?,
            abi: self.resolve_abi()?,
        })
    }
}

/// Turns an ABI in any of its known shapes into its list of entries
pub fn resolve_interface(abi: &Value) -> eyre::Result<Vec<Value>> {
    match abi {
        Value::Array(entries) => Ok(entries.clone()),
        Value::String(serialized) => {
            match serde_json::from_str(serialized) {
                Ok(Value::Array(entries)) => Ok(entries),
                Ok(other) => eyre::bail!(
                    "Serialized ABI must be a JSON array, got {}",
                    kind(&other)
                ),
                Err(err) => Err(eyre::Report::new(err)
                    .wrap_err("Parsing serialized ABI")),
            }
        }
        other => eyre::bail!(
            "Unsupported ABI shape: expected a JSON array or a string \
             holding one, got {}",
            kind(other)
        ),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
