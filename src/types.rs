use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;

pub const DEFAULT_CONTRACT_NAME: &str = "ScientificClubElection";

/// Name of a contract template, as used by the compiler
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Shrinkwrap,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct ContractName(pub String);

impl ContractName {
    pub fn new(name: impl ToString) -> Self {
        Self(name.to_string())
    }

    /// File name of the artifact document written for this contract
    pub fn artifact_file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl Default for ContractName {
    fn default() -> Self {
        Self::new(DEFAULT_CONTRACT_NAME)
    }
}
