//! Shared request/response types for verifying Merkle-Patricia trie proofs
//! across domains.

mod types;

pub use types::{Domain, MerkleProof, ProofOutput};
