//! Decoding Substrate (Parity "no-extension" trie) nodes: a header byte
//! whose top two bits select Empty / Leaf / BranchNoValue / BranchWithValue,
//! a varint nibble count, packed nibble bytes, a little-endian 16-bit child
//! bitmap (branches only), and SCALE compact-length-prefixed byte strings
//! for the value and each present child.
//!
//! Grounded in the `reference-trie` no-extension codec (the retrieval
//! pack's `trie` reference implementation): same header masks and the same
//! two-phase varint (six header bits, then 255-valued continuation bytes),
//! reimplemented to decode straight into `trie_core::NodeKind` instead of
//! that crate's own `Node<N>`.

use parity_scale_codec::{Compact, Decode};

use trie_core::{ChildHandle, Children, DecodeError, NibbleSlice, NodeDecoder, NodeKind, Result};

const EMPTY_TRIE: u8 = 0;
const LEAF_PREFIX_MASK: u8 = 0b_01 << 6;
const BRANCH_WITHOUT_VALUE_MASK: u8 = 0b_10 << 6;
const BRANCH_WITH_VALUE_MASK: u8 = 0b_11 << 6;
const HEADER_TYPE_MASK: u8 = 0b_11 << 6;
const HEADER_SIZE_MASK: u8 = 0b_0011_1111;
/// The header's low 6 bits saturate at this value; past it the nibble
/// count continues into one or more trailing bytes.
const HEADER_SIZE_CUTOFF: usize = 63;
const NIBBLE_COUNT_BOUND: usize = u16::MAX as usize;

/// Decodes nodes encoded the way a Substrate SCALE trie emits them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstrateDecoder;

enum Header {
    Empty,
    Leaf(usize),
    Branch { has_value: bool, nibble_count: usize },
}

impl NodeDecoder for SubstrateDecoder {
    fn decode_node_kind<'a>(&self, raw: &'a [u8]) -> Result<NodeKind<'a>> {
        let mut buf = raw;
        match decode_header(&mut buf)? {
            Header::Empty => Ok(NodeKind::Empty),
            Header::Leaf(nibble_count) => decode_leaf(buf, nibble_count),
            Header::Branch {
                has_value,
                nibble_count,
            } => decode_branch(buf, has_value, nibble_count),
        }
    }
}

fn decode_header(buf: &mut &[u8]) -> Result<Header> {
    let (&first, rest) = buf.split_first().ok_or(DecodeError::InputTooShort)?;
    *buf = rest;
    if first == EMPTY_TRIE {
        return Ok(Header::Empty);
    }
    match first & HEADER_TYPE_MASK {
        LEAF_PREFIX_MASK => Ok(Header::Leaf(decode_size(first, buf)?)),
        BRANCH_WITHOUT_VALUE_MASK => Ok(Header::Branch {
            has_value: false,
            nibble_count: decode_size(first, buf)?,
        }),
        BRANCH_WITH_VALUE_MASK => Ok(Header::Branch {
            has_value: true,
            nibble_count: decode_size(first, buf)?,
        }),
        _ => Err(DecodeError::Custom("reserved header bits set").into()),
    }
}

/// Decodes the nibble-count varint: the header's low 6 bits, continued
/// across trailing bytes once that field saturates at 63.
fn decode_size(first: u8, buf: &mut &[u8]) -> Result<usize> {
    let mut result = (first & HEADER_SIZE_MASK) as usize;
    if result < HEADER_SIZE_CUTOFF {
        return Ok(result);
    }
    result -= 1;
    while result <= NIBBLE_COUNT_BOUND {
        let (&n, rest) = buf.split_first().ok_or(DecodeError::InputTooShort)?;
        *buf = rest;
        if (n as usize) < 255 {
            return Ok(result + n as usize + 1);
        }
        result += 255;
    }
    Err(DecodeError::LengthMismatch.into())
}

fn take<'a>(buf: &mut &'a [u8], count: usize) -> Result<&'a [u8]> {
    if buf.len() < count {
        return Err(DecodeError::InputTooShort.into());
    }
    let (head, rest) = buf.split_at(count);
    *buf = rest;
    Ok(head)
}

fn decode_nibble_key<'a>(buf: &mut &'a [u8], nibble_count: usize) -> Result<NibbleSlice<'a>> {
    let byte_count = nibble_count.div_ceil(2);
    let bytes = take(buf, byte_count)?;
    let offset = if nibble_count % 2 == 1 { 1 } else { 0 };
    Ok(NibbleSlice::new(bytes, offset))
}

fn decode_compact_bytes<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8]> {
    let len = Compact::<u32>::decode(buf)
        .map_err(|_| DecodeError::Custom("malformed SCALE compact length"))?
        .0 as usize;
    take(buf, len)
}

fn decode_leaf<'a>(mut buf: &'a [u8], nibble_count: usize) -> Result<NodeKind<'a>> {
    let key = decode_nibble_key(&mut buf, nibble_count)?;
    let value = decode_compact_bytes(&mut buf)?;
    Ok(NodeKind::Leaf {
        key,
        value: ChildHandle::Inline(value),
    })
}

fn decode_branch<'a>(
    mut buf: &'a [u8],
    has_value: bool,
    nibble_count: usize,
) -> Result<NodeKind<'a>> {
    let key = decode_nibble_key(&mut buf, nibble_count)?;
    let bitmap_bytes = take(&mut buf, 2)?;
    let bitmap = u16::from_le_bytes([bitmap_bytes[0], bitmap_bytes[1]]);

    let value = if has_value {
        Some(ChildHandle::Inline(decode_compact_bytes(&mut buf)?))
    } else {
        None
    };

    let mut children: Children<'a> = [None; 16];
    for i in 0..16u32 {
        if bitmap & (1 << i) != 0 {
            let slot = decode_compact_bytes(&mut buf)?;
            children[i as usize] = Some(classify_child(slot));
        }
    }

    Ok(NodeKind::NibbledBranch {
        key,
        children,
        value,
    })
}

/// A 32-byte slot is the child's hash; anything else is its own encoding,
/// embedded in place.
fn classify_child(slot: &[u8]) -> ChildHandle<'_> {
    if slot.len() == 32 {
        let hash: [u8; 32] = slot.try_into().expect("checked len above");
        ChildHandle::Hash(hash)
    } else {
        ChildHandle::Inline(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parity_scale_codec::Encode;

    fn header_byte(mask: u8, nibble_count: usize) -> Vec<u8> {
        assert!(nibble_count < 63, "fixture helper only covers the short form");
        vec![mask + nibble_count as u8]
    }

    #[test]
    fn decodes_an_empty_node() {
        let kind = SubstrateDecoder.decode_node_kind(&[EMPTY_TRIE]).unwrap();
        assert!(matches!(kind, NodeKind::Empty));
    }

    #[test]
    fn decodes_an_even_leaf() {
        let mut raw = header_byte(LEAF_PREFIX_MASK, 4);
        raw.extend_from_slice(&[0x12, 0x34]); // nibbles 1,2,3,4
        raw.extend_from_slice(&Compact::<u32>::from(2u32).encode());
        raw.extend_from_slice(b"hi");

        match SubstrateDecoder.decode_node_kind(&raw).unwrap() {
            NodeKind::Leaf { key, value } => {
                assert_eq!(key.to_vec(), vec![1, 2, 3, 4]);
                match value {
                    ChildHandle::Inline(bytes) => assert_eq!(bytes, b"hi"),
                    ChildHandle::Hash(_) => panic!("expected inline value"),
                }
            }
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn decodes_an_odd_leaf() {
        let mut raw = header_byte(LEAF_PREFIX_MASK, 3);
        raw.push(0x01); // padding nibble (0) + nibble 1
        raw.push(0x23); // nibbles 2, 3
        raw.extend_from_slice(&Compact::<u32>::from(1u32).encode());
        raw.push(b'v');

        match SubstrateDecoder.decode_node_kind(&raw).unwrap() {
            NodeKind::Leaf { key, .. } => assert_eq!(key.to_vec(), vec![1, 2, 3]),
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn decodes_a_nibbled_branch_with_value_and_one_child() {
        let mut raw = header_byte(BRANCH_WITH_VALUE_MASK, 0);
        raw.extend_from_slice(&0u16.to_le_bytes()); // placeholder, overwritten below
        let bitmap_index = raw.len() - 2;
        let bitmap: u16 = 1 << 5;
        raw[bitmap_index..].copy_from_slice(&bitmap.to_le_bytes());
        raw.extend_from_slice(&Compact::<u32>::from(5u32).encode());
        raw.extend_from_slice(b"value");
        let child_hash = [7u8; 32];
        raw.extend_from_slice(&Compact::<u32>::from(32u32).encode());
        raw.extend_from_slice(&child_hash);

        match SubstrateDecoder.decode_node_kind(&raw).unwrap() {
            NodeKind::NibbledBranch {
                key,
                children,
                value,
            } => {
                assert!(key.is_empty());
                assert!(matches!(children[5], Some(ChildHandle::Hash(h)) if h == child_hash));
                assert!(children[0].is_none());
                match value {
                    Some(ChildHandle::Inline(bytes)) => assert_eq!(bytes, b"value"),
                    other => panic!("expected inline value, got {other:?}"),
                }
            }
            other => panic!("expected nibbled branch, got {other:?}"),
        }
    }
}
