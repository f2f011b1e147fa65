//! Error taxonomy shared by every trie decoder and the traversal engine.
//!
//! Hand-written, the way the workspace's RLP codec writes its own `Error`
//! enum (manual `Display` + `std::error::Error`, no `thiserror`): the
//! workspace never pulls in a derive-macro error crate, so neither does
//! this one.

use core::fmt;

pub type Result<T> = core::result::Result<T, TrieError>;

/// Why a single node's raw bytes failed to parse under the expected
/// encoding. The traversal engine never needs to distinguish these causes;
/// they exist purely for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended before a header/payload could be read in full.
    InputTooShort,
    /// A list did not have 2 or 17 items (Ethereum) or an unexpected header
    /// tag was found (Substrate).
    UnexpectedShape,
    /// A length prefix decoded to something larger than the remaining input.
    LengthMismatch,
    /// Catch-all for a specific, named failure not worth its own variant.
    Custom(&'static str),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputTooShort => f.write_str("input truncated"),
            Self::UnexpectedShape => f.write_str("unexpected node shape"),
            Self::LengthMismatch => f.write_str("length prefix exceeds remaining input"),
            Self::Custom(msg) => f.write_str(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// A hash handle required by traversal was absent from the proof.
    MissingNode { hash: [u8; 32] },
    /// A raw node's bytes did not parse under the expected encoding.
    Decode(DecodeError),
    /// The child-root lookup returned the zero digest, or no value at all.
    InvalidChildProof,
}

impl fmt::Display for TrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode { hash } => {
                write!(f, "missing proof node for hash 0x{}", hex_encode(hash))
            }
            Self::Decode(e) => write!(f, "failed to decode trie node: {e}"),
            Self::InvalidChildProof => {
                f.write_str("child-trie root lookup returned the zero digest or no value")
            }
        }
    }
}

impl std::error::Error for TrieError {}

impl From<DecodeError> for TrieError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
