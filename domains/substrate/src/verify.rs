use trie_core::{lookup, ProofIndex, Result};

use crate::codec::SubstrateDecoder;

/// Verifies each of `keys` against a Substrate state-trie proof rooted at
/// `root`, returning the corresponding value (empty for an absent key) or
/// the first decode/missing-node error encountered.
pub fn verify_proof(root: [u8; 32], proof: &[Vec<u8>], keys: &[Vec<u8>]) -> Result<Vec<Vec<u8>>> {
    let index = ProofIndex::build(proof);
    let decoder = SubstrateDecoder;
    tracing::debug!(proof_nodes = proof.len(), keys = keys.len(), "verifying substrate proof");
    keys.iter().map(|key| lookup(&index, &decoder, root, key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parity_scale_codec::Encode;
    use trie_core::keccak::keccak256;

    fn leaf_node(nibble_key: &[u8], value: &[u8]) -> Vec<u8> {
        assert_eq!(nibble_key.len() % 2, 0);
        let mut raw = vec![0x40 | nibble_key.len() as u8];
        for pair in nibble_key.chunks(2) {
            raw.push((pair[0] << 4) | pair[1]);
        }
        raw.extend_from_slice(&parity_scale_codec::Compact::<u32>(value.len() as u32).encode());
        raw.extend_from_slice(value);
        raw
    }

    #[test]
    fn verifies_a_single_leaf_trie() {
        let key = b"abcd".to_vec();
        let value = b"substrate-value".to_vec();
        let nibbles: Vec<u8> = key.iter().flat_map(|b| [b >> 4, b & 0x0f]).collect();
        let leaf = leaf_node(&nibbles, &value);
        let root = keccak256(&leaf);

        let out = verify_proof(root, &[leaf], &[key]).unwrap();
        assert_eq!(out, vec![value]);
    }

    #[test]
    fn absent_key_returns_empty_value() {
        let key = b"abcd".to_vec();
        let value = b"substrate-value".to_vec();
        let nibbles: Vec<u8> = key.iter().flat_map(|b| [b >> 4, b & 0x0f]).collect();
        let leaf = leaf_node(&nibbles, &value);
        let root = keccak256(&leaf);

        let out = verify_proof(root, &[leaf], &[b"zzzz".to_vec()]).unwrap();
        assert_eq!(out, vec![Vec::<u8>::new()]);
    }
}
