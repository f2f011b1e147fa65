//! The decoded node model shared by every trie encoding.
//!
//! A closed tagged union dispatched on by `match`, not virtual calls —
//! `Extension`/`Branch` are Ethereum-only, `NibbledBranch` is Substrate-only,
//! and a single enum with unused variants per encoding is intentional (see
//! DESIGN.md).

use crate::nibble::NibbleSlice;

/// Either an inline payload carried verbatim inside the parent's encoding,
/// or a 32-byte digest that must be resolved against the proof set.
#[derive(Debug, Clone, Copy)]
pub enum ChildHandle<'a> {
    Hash([u8; 32]),
    Inline(&'a [u8]),
}

pub type Children<'a> = [Option<ChildHandle<'a>>; 16];

#[derive(Debug)]
pub enum NodeKind<'a> {
    Empty,
    Leaf {
        key: NibbleSlice<'a>,
        value: ChildHandle<'a>,
    },
    /// Ethereum only.
    Extension {
        key: NibbleSlice<'a>,
        child: ChildHandle<'a>,
    },
    /// Ethereum only.
    Branch {
        children: Children<'a>,
        value: Option<ChildHandle<'a>>,
    },
    /// Substrate only.
    NibbledBranch {
        key: NibbleSlice<'a>,
        children: Children<'a>,
        value: Option<ChildHandle<'a>>,
    },
}
