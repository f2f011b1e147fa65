//! The generic key-lookup loop, parameterised by a [`NodeDecoder`].
//!
//! Shared between the Ethereum and Substrate domains: everything here is
//! agnostic to RLP vs SCALE, it only knows the node model in `node.rs`.

use crate::decoder::NodeDecoder;
use crate::error::Result;
use crate::index::ProofIndex;
use crate::nibble::NibbleSlice;
use crate::node::{ChildHandle, NodeKind};

/// Hard cap on traversal depth. A proof whose node graph extends past this
/// along a key's path is treated as insufficient to prove presence, not as
/// a hard error (spec.md §4.4/§7).
pub const MAX_TRIE_DEPTH: usize = 50;

/// Looks up `key` under `root` in the proof indexed by `index`, using
/// `decoder` to interpret raw node bytes. Returns the empty vector both for
/// "key not present" and "depth bound exceeded" — the two are
/// indistinguishable by design (spec.md §9, Open Questions).
pub fn lookup<D: NodeDecoder>(
    index: &ProofIndex<'_>,
    decoder: &D,
    root: [u8; 32],
    key: &[u8],
) -> Result<Vec<u8>> {
    let root_raw = index.get(&root)?;
    let mut current = decoder.decode_node_kind(root_raw)?;
    let mut k = NibbleSlice::new(key, 0);

    for _ in 0..MAX_TRIE_DEPTH {
        match current {
            NodeKind::Empty => {
                tracing::debug!("lookup ended at an empty node");
                return Ok(Vec::new());
            }
            NodeKind::Leaf { key: lk, value } => {
                return if lk == k {
                    Ok(index.load(value)?.to_vec())
                } else {
                    Ok(Vec::new())
                };
            }
            NodeKind::Extension { key: ek, child } => {
                if !k.starts_with(&ek) {
                    return Ok(Vec::new());
                }
                k = k.mid(ek.len());
                current = decoder.decode_node_kind(index.load(child)?)?;
            }
            NodeKind::Branch { children, value } => {
                if k.is_empty() {
                    return Ok(load_optional(index, value)?);
                }
                let i = k.at(0) as usize;
                match children[i] {
                    Some(child) => {
                        k = k.mid(1);
                        current = decoder.decode_node_kind(index.load(child)?)?;
                    }
                    None => return Ok(Vec::new()),
                }
            }
            NodeKind::NibbledBranch {
                key: nk,
                children,
                value,
            } => {
                if !k.starts_with(&nk) {
                    return Ok(Vec::new());
                }
                if k.len() == nk.len() {
                    return Ok(load_optional(index, value)?);
                }
                let i = k.at(nk.len()) as usize;
                match children[i] {
                    Some(child) => {
                        k = k.mid(nk.len() + 1);
                        current = decoder.decode_node_kind(index.load(child)?)?;
                    }
                    None => return Ok(Vec::new()),
                }
            }
        }
    }

    tracing::debug!(depth = MAX_TRIE_DEPTH, "traversal depth bound exceeded");
    Ok(Vec::new())
}

fn load_optional(index: &ProofIndex<'_>, value: Option<ChildHandle<'_>>) -> Result<Vec<u8>> {
    match value {
        Some(handle) => Ok(index.load(handle)?.to_vec()),
        None => Ok(Vec::new()),
    }
}
