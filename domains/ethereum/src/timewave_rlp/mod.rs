//! A small RLP (Recursive Length Prefix) codec, written the way
//! `alloy-rlp` is, vendored so the trie decoder below has no external RLP
//! dependency to trust.

mod decode;
pub use decode::{decode_exact, Decodable, Rlp};

mod encode;
pub use encode::{
    encode, encode_iter, encode_list, length_of_length, list_length, Encodable, MaxEncodedLen,
    MaxEncodedLenAssoc,
};

mod error;
pub use error::{Error, Result};

mod header;
pub use header::{Header, PayloadView};

#[doc(no_inline)]
pub use bytes::{Buf, BufMut, Bytes, BytesMut};

/// RLP prefix byte for a 0-length string.
pub const EMPTY_STRING_CODE: u8 = 0x80;

/// RLP prefix byte for a 0-length list.
pub const EMPTY_LIST_CODE: u8 = 0xC0;
