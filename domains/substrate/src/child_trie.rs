//! Default child-trie verification.
//!
//! A Substrate state trie stores each child trie's root under a
//! well-known key in the parent (default) trie: the
//! `:child_storage:default:` prefix followed by the child trie's storage
//! key. Checking a claim about a value living inside a child trie is
//! therefore two lookups against the same proof bag: resolve the child
//! root from the parent trie, then look the key up again with that root.

use trie_core::{lookup, ProofIndex, Result, TrieError};

use crate::codec::SubstrateDecoder;

/// Prefix Substrate uses for default child-trie root entries in the
/// parent trie's storage.
pub const DEFAULT_CHILD_STORAGE_PREFIX: &[u8] = b":child_storage:default:";

/// Verifies `keys` against the child trie named by `child_info`, whose
/// root is itself looked up (and proven) inside the parent trie rooted at
/// `root`. `proof` supplies nodes for both lookups.
pub fn read_child_proof_check(
    root: [u8; 32],
    proof: &[Vec<u8>],
    keys: &[Vec<u8>],
    child_info: &[u8],
) -> Result<Vec<Vec<u8>>> {
    let index = ProofIndex::build(proof);
    let decoder = SubstrateDecoder;

    let mut full_key = Vec::with_capacity(DEFAULT_CHILD_STORAGE_PREFIX.len() + child_info.len());
    full_key.extend_from_slice(DEFAULT_CHILD_STORAGE_PREFIX);
    full_key.extend_from_slice(child_info);

    let child_root_bytes = lookup(&index, &decoder, root, &full_key)?;
    let child_root: [u8; 32] = child_root_bytes
        .as_slice()
        .try_into()
        .map_err(|_| TrieError::InvalidChildProof)?;
    if child_root == [0u8; 32] {
        return Err(TrieError::InvalidChildProof);
    }

    tracing::debug!(
        child_info = %hex_prefix(child_info),
        keys = keys.len(),
        "verifying substrate child-trie proof"
    );

    keys.iter()
        .map(|key| lookup(&index, &decoder, child_root, key))
        .collect()
}

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(8).map(|b| format!("{b:02x}")).collect()
}
