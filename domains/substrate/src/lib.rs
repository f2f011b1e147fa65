//! Substrate state-trie proof decoding: SCALE framing and bit-packed
//! headers layered on top of the shared [`trie_core`] traversal engine.

pub mod child_trie;
pub mod codec;
pub mod verify;

pub use child_trie::read_child_proof_check;
pub use codec::SubstrateDecoder;
pub use verify::verify_proof;
