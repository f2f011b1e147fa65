//! Content-addressed lookup of proof nodes by their Keccak-256 hash.

use std::collections::HashMap;

use crate::error::{Result, TrieError};
use crate::keccak::keccak256;
use crate::node::ChildHandle;

/// Built once at verify entry by pairing each raw proof node with its digest.
/// Duplicate hashes are allowed; any matching occurrence may be returned.
pub struct ProofIndex<'a> {
    by_hash: HashMap<[u8; 32], &'a [u8]>,
}

impl<'a> ProofIndex<'a> {
    pub fn build(proof: &'a [Vec<u8>]) -> Self {
        let mut by_hash = HashMap::with_capacity(proof.len());
        for raw in proof {
            by_hash.insert(keccak256(raw), raw.as_slice());
        }
        Self { by_hash }
    }

    /// Resolves a hash to the raw bytes of the proof node it names.
    pub fn get(&self, hash: &[u8; 32]) -> Result<&'a [u8]> {
        self.by_hash.get(hash).copied().ok_or_else(|| {
            tracing::error!(hash = %hex_prefix(hash), "proof node missing from proof set");
            TrieError::MissingNode { hash: *hash }
        })
    }

    /// Resolves a child handle: returns inline bytes directly, or delegates
    /// to `get` for a hash handle.
    pub fn load(&self, handle: ChildHandle<'a>) -> Result<&'a [u8]> {
        match handle {
            ChildHandle::Inline(bytes) => Ok(bytes),
            ChildHandle::Hash(hash) => self.get(&hash),
        }
    }
}

fn hex_prefix(bytes: &[u8; 32]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
}
