//! The interface each concrete trie encoding implements so the generic
//! traversal engine can walk it without knowing RLP from SCALE.

use crate::error::Result;
use crate::node::NodeKind;

pub trait NodeDecoder {
    /// Parses a single raw node's bytes into the shared node model. The
    /// returned `NodeKind` borrows from `raw`.
    fn decode_node_kind<'a>(&self, raw: &'a [u8]) -> Result<NodeKind<'a>>;
}
