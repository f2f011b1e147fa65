use serde::{Deserialize, Serialize};

/// Which trie encoding a [`MerkleProof`] should be checked against.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    Ethereum,
    Substrate,
}

/// A proof request: the claimed root, the proof's raw node set, and the
/// keys being checked against it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MerkleProof {
    pub root: [u8; 32],
    pub proof: Vec<Vec<u8>>,
    pub keys: Vec<Vec<u8>>,
    pub domain: Domain,
}

/// The verified value for each requested key, alongside the root and
/// domain they were checked against.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProofOutput {
    pub domain: Domain,
    pub root: [u8; 32],
    pub keys: Vec<Vec<u8>>,
    pub values: Vec<Vec<u8>>,
}
