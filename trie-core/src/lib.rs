//! Domain-agnostic Merkle-Patricia trie primitives.
//!
//! This crate holds everything the verifier needs that does not care
//! whether the wire encoding is Ethereum's RLP + hex-prefix or Substrate's
//! SCALE + bit-packed header: the nibble slice, the node model, the
//! content-addressed proof index, and the generic bounded traversal loop.
//! Concrete decoders live in the `ethereum` and `substrate-trie` crates.

pub mod decoder;
pub mod error;
pub mod index;
pub mod keccak;
pub mod nibble;
pub mod node;
pub mod traversal;

pub use decoder::NodeDecoder;
pub use error::{DecodeError, Result, TrieError};
pub use index::ProofIndex;
pub use nibble::NibbleSlice;
pub use node::{ChildHandle, Children, NodeKind};
pub use traversal::{lookup, MAX_TRIE_DEPTH};

#[cfg(test)]
mod property_tests {
    use super::*;

    /// A tiny synthetic encoding used only to exercise traversal-engine
    /// properties that do not depend on RLP or SCALE: each raw node is
    /// either a single `0x00` byte (Empty) or a single nibble `n` (0-15)
    /// followed by a 32-byte child hash, forming a straight-line chain.
    struct ChainDecoder;

    impl NodeDecoder for ChainDecoder {
        fn decode_node_kind<'a>(&self, raw: &'a [u8]) -> Result<NodeKind<'a>> {
            if raw == [0x00] {
                return Ok(NodeKind::Empty);
            }
            assert_eq!(raw.len(), 33, "malformed synthetic node");
            let hash: [u8; 32] = raw[1..].try_into().unwrap();
            let mut children: Children<'_> = [None; 16];
            children[raw[0] as usize] = Some(ChildHandle::Hash(hash));
            Ok(NodeKind::Branch {
                children,
                value: None,
            })
        }
    }

    fn chain_node(nibble: u8, child_hash: [u8; 32]) -> Vec<u8> {
        let mut raw = vec![nibble];
        raw.extend_from_slice(&child_hash);
        raw
    }

    #[test]
    fn depth_bound_rejects_an_overlong_chain_without_diverging() {
        // A chain of MAX_TRIE_DEPTH + 5 branch nodes, each consuming one
        // nibble. The key is long enough to walk the whole thing, so a
        // correct implementation must stop at MAX_TRIE_DEPTH and report
        // absence rather than loop forever or panic.
        let depth = MAX_TRIE_DEPTH + 5;
        let key: Vec<u8> = (0..depth).map(|i| (i % 16) as u8).collect();
        // nibble_as_byte repeats each nibble value twice to fill a byte;
        // what matters is that `at(i)` yields `i % 16` for i < depth.
        let key_bytes: Vec<u8> = key.chunks(2).map(|c| (c[0] << 4) | c.get(1).copied().unwrap_or(0)).collect();

        let mut proof: Vec<Vec<u8>> = Vec::new();
        let mut hashes: Vec<[u8; 32]> = Vec::new();
        // Leaf-most node first: an Empty node, then branch nodes chaining
        // back up to the root.
        let empty = vec![0x00u8];
        hashes.push(keccak::keccak256(&empty));
        proof.push(empty);
        for i in (0..depth).rev() {
            let nibble = (i % 16) as u8;
            let child_hash = *hashes.last().unwrap();
            let node = chain_node(nibble, child_hash);
            hashes.push(keccak::keccak256(&node));
            proof.push(node);
        }
        let root = *hashes.last().unwrap();

        let index = ProofIndex::build(&proof);
        let result = lookup(&index, &ChainDecoder, root, &key_bytes).unwrap();
        assert_eq!(result, Vec::<u8>::new());
    }

    #[test]
    fn missing_root_surfaces_missing_node() {
        let proof: Vec<Vec<u8>> = vec![];
        let index = ProofIndex::build(&proof);
        let root = [0xab; 32];
        let err = lookup(&index, &ChainDecoder, root, &[0x01]).unwrap_err();
        assert_eq!(err, TrieError::MissingNode { hash: root });
    }
}
