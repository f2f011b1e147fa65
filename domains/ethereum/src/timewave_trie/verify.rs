//! Verifies Ethereum state-trie proofs.
//!
//! Thin entry point over the shared traversal engine: build a proof index
//! keyed by Keccak-256 hash, then look each key up against the trusted
//! root using [`EthereumDecoder`].

use trie_core::{lookup, ProofIndex, Result};

use crate::timewave_trie::types::EthereumDecoder;

/// Looks up each of `keys` under `root`, given an unordered bag of
/// RLP-encoded proof nodes. Returns one value per key, in the same order;
/// a key absent under `root` (or whose proof does not reach far enough to
/// tell) comes back as an empty vector.
pub fn verify_proof(root: [u8; 32], proof: &[Vec<u8>], keys: &[Vec<u8>]) -> Result<Vec<Vec<u8>>> {
    let index = ProofIndex::build(proof);
    let decoder = EthereumDecoder;
    tracing::debug!(proof_nodes = proof.len(), keys = keys.len(), "verifying ethereum proof");
    keys.iter().map(|key| lookup(&index, &decoder, root, key)).collect()
}
