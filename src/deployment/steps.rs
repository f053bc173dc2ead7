pub mod acquire_signer;
pub mod deploy_contract;
pub mod persist_artifact;
