//! Decoding Ethereum state-trie nodes: RLP framing plus hex-prefix nibble
//! keys, straight into the shared [`trie_core::NodeKind`] model.
//!
//! Same RLP-list dispatch as a classic `TrieNode::decode` (17 items is a
//! branch, 2 is a leaf or extension) and the same hex-prefix flag nibble,
//! but writes the result directly as a borrowed `NodeKind` rather than
//! through an owned intermediate tree, since `trie_core::lookup` expects
//! node content borrowed straight out of the proof bytes (inline children
//! are re-decoded from their own slice rather than copied out).

use trie_core::{ChildHandle, Children, DecodeError, NibbleSlice, NodeDecoder, NodeKind, Result};

use crate::timewave_rlp::{self, Header, PayloadView};
use crate::timewave_trie::constants::*;

/// Decodes nodes encoded the way `timewave_rlp` emits Ethereum state trie
/// nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct EthereumDecoder;

impl NodeDecoder for EthereumDecoder {
    fn decode_node_kind<'a>(&self, raw: &'a [u8]) -> Result<NodeKind<'a>> {
        let mut buf = raw;
        let items = match Header::decode_raw(&mut buf).map_err(rlp_err)? {
            PayloadView::List(items) => items,
            PayloadView::String(s) => {
                return if s.is_empty() {
                    Ok(NodeKind::Empty)
                } else {
                    Err(DecodeError::UnexpectedShape.into())
                };
            }
        };

        match items.len() {
            17 => decode_branch(&items),
            2 => decode_leaf_or_extension(items[0], items[1]),
            _ => Err(DecodeError::UnexpectedShape.into()),
        }
    }
}

fn rlp_err(_: timewave_rlp::Error) -> trie_core::TrieError {
    DecodeError::Custom("malformed RLP trie node").into()
}

fn decode_branch<'a>(items: &[&'a [u8]]) -> Result<NodeKind<'a>> {
    let mut children: Children<'a> = [None; 16];
    for (idx, item) in items[..16].iter().enumerate() {
        children[idx] = child_handle(item)?;
    }
    let value = decode_value(items[16])?;
    Ok(NodeKind::Branch { children, value })
}

/// Decodes a terminal value (a branch's 17th item, or a leaf's second item):
/// unlike a child slot, a value is never a hash reference, so a 32-byte
/// payload is still read as the value's own bytes rather than classified
/// via `child_handle`.
fn decode_value<'a>(item: &'a [u8]) -> Result<Option<ChildHandle<'a>>> {
    let mut buf = item;
    let bytes = Header::decode_bytes(&mut buf, false).map_err(rlp_err)?;
    if bytes.is_empty() {
        Ok(None)
    } else {
        Ok(Some(ChildHandle::Inline(bytes)))
    }
}

fn decode_leaf_or_extension<'a>(key_item: &'a [u8], value_item: &'a [u8]) -> Result<NodeKind<'a>> {
    let mut key_buf = key_item;
    let encoded_key = Header::decode_bytes(&mut key_buf, false).map_err(rlp_err)?;
    if encoded_key.is_empty() {
        return Err(DecodeError::Custom("trie node key is empty").into());
    }

    let key_flag = encoded_key[0] & 0xf0;
    let odd = matches!(key_flag, ODD_FLAG | EXTENSION_ODD_FLAG);
    let key = NibbleSlice::new(encoded_key, if odd { 1 } else { 2 });

    match key_flag {
        EVEN_FLAG | ODD_FLAG => {
            let mut v = value_item;
            let value = Header::decode_bytes(&mut v, false).map_err(rlp_err)?;
            Ok(NodeKind::Leaf {
                key,
                value: ChildHandle::Inline(value),
            })
        }
        EXTENSION_EVEN_FLAG | EXTENSION_ODD_FLAG => {
            let child = child_handle(value_item)?
                .ok_or(DecodeError::Custom("extension node missing a child"))?;
            Ok(NodeKind::Extension { key, child })
        }
        _ => Err(DecodeError::Custom("invalid hex-prefix flag nibble").into()),
    }
}

/// Classifies one RLP list item as a child handle: an empty string means no
/// child at that slot, a 32-byte string is the child's hash, anything else
/// is the child's own RLP encoding embedded in place.
fn child_handle<'a>(item: &'a [u8]) -> Result<Option<ChildHandle<'a>>> {
    if item == [EMPTY_STRING_CODE] {
        return Ok(None);
    }
    let mut buf = item;
    if let Ok(bytes) = Header::decode_bytes(&mut buf, false) {
        if bytes.len() == 32 {
            let hash: [u8; 32] = bytes.try_into().expect("checked len above");
            return Ok(Some(ChildHandle::Hash(hash)));
        }
    }
    Ok(Some(ChildHandle::Inline(item)))
}
