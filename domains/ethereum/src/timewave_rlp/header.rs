use crate::timewave_rlp::{Error, Result, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
use bytes::BufMut;

extern crate alloc;
use alloc::vec::Vec;

/// An RLP header: whether the payload is a list, and how long it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub list: bool,
    pub payload_length: usize,
}

/// The payload of a decoded RLP item, still split into its top-level items
/// if it was a list.
#[derive(Debug)]
pub enum PayloadView<'a> {
    String(&'a [u8]),
    List(Vec<&'a [u8]>),
}

impl Header {
    pub fn encode(&self, out: &mut dyn BufMut) {
        if self.payload_length < 56 {
            let code = if self.list {
                EMPTY_LIST_CODE
            } else {
                EMPTY_STRING_CODE
            };
            out.put_u8(code + self.payload_length as u8);
        } else {
            let len_be = self.payload_length.to_be_bytes();
            let len_be = &len_be[(self.payload_length.leading_zeros() / 8) as usize..];
            let code = if self.list { 0xF7 } else { 0xB7 };
            out.put_u8(code + len_be.len() as u8);
            out.put_slice(len_be);
        }
    }

    /// Decodes a header from the front of `buf`, advancing it past the
    /// header bytes (but not the payload).
    pub fn decode(buf: &mut &[u8]) -> Result<Self> {
        let &first = buf.first().ok_or(Error::InputTooShort)?;

        if first < EMPTY_STRING_CODE {
            // A single byte below 0x80 is its own RLP encoding; callers that
            // need the payload re-slice `buf` themselves afterwards.
            Ok(Self {
                list: false,
                payload_length: 1,
            })
        } else if first < 0xB8 {
            *buf = &buf[1..];
            let len = (first - EMPTY_STRING_CODE) as usize;
            if len == 1 {
                let next = buf.first().ok_or(Error::InputTooShort)?;
                if *next < EMPTY_STRING_CODE {
                    return Err(Error::NonCanonicalSingleByte);
                }
            }
            Ok(Self {
                list: false,
                payload_length: len,
            })
        } else if first < EMPTY_LIST_CODE {
            *buf = &buf[1..];
            let len_of_len = (first - 0xB7) as usize;
            let payload_length = decode_length(buf, len_of_len)?;
            Ok(Self {
                list: false,
                payload_length,
            })
        } else if first < 0xF8 {
            *buf = &buf[1..];
            Ok(Self {
                list: true,
                payload_length: (first - EMPTY_LIST_CODE) as usize,
            })
        } else {
            *buf = &buf[1..];
            let len_of_len = (first - 0xF7) as usize;
            let payload_length = decode_length(buf, len_of_len)?;
            Ok(Self {
                list: true,
                payload_length,
            })
        }
    }

    /// Decodes a string (`is_list = false`) or list (`is_list = true`)
    /// header and returns the raw payload bytes, advancing `buf` past them.
    pub fn decode_bytes<'a>(buf: &mut &'a [u8], is_list: bool) -> Result<&'a [u8]> {
        let &first = buf.first().ok_or(Error::InputTooShort)?;
        if !is_list && first < EMPTY_STRING_CODE {
            let out = &buf[..1];
            *buf = &buf[1..];
            return Ok(out);
        }
        let header = Self::decode(buf)?;
        if header.list != is_list {
            return Err(if is_list {
                Error::UnexpectedString
            } else {
                Error::UnexpectedList
            });
        }
        if buf.len() < header.payload_length {
            return Err(Error::InputTooShort);
        }
        let (payload, rest) = buf.split_at(header.payload_length);
        *buf = rest;
        Ok(payload)
    }

    pub fn decode_str<'a>(buf: &mut &'a [u8]) -> Result<&'a str> {
        let bytes = Self::decode_bytes(buf, false)?;
        core::str::from_utf8(bytes).map_err(|_| Error::Custom("invalid utf-8 in RLP string"))
    }

    /// Decodes a single header and splits its payload: a string payload is
    /// returned whole, a list payload is split into the raw (header
    /// included) encoding of each of its items.
    pub fn decode_raw<'a>(buf: &mut &'a [u8]) -> Result<PayloadView<'a>> {
        let is_list = {
            let &first = buf.first().ok_or(Error::InputTooShort)?;
            first >= EMPTY_LIST_CODE
        };
        if !is_list {
            return Ok(PayloadView::String(Self::decode_bytes(buf, false)?));
        }
        let mut payload = Self::decode_bytes(buf, true)?;
        let mut items = Vec::new();
        while !payload.is_empty() {
            let rest_before = payload;
            let item_header = Self::decode(&mut payload)?;
            let header_len = rest_before.len() - payload.len();
            let total_len = header_len + item_header.payload_length;
            if total_len > rest_before.len() {
                return Err(Error::InputTooShort);
            }
            items.push(&rest_before[..total_len]);
            payload = &payload[item_header.payload_length..];
        }
        Ok(PayloadView::List(items))
    }
}

fn decode_length(buf: &mut &[u8], len_of_len: usize) -> Result<usize> {
    if buf.len() < len_of_len {
        return Err(Error::InputTooShort);
    }
    let (len_bytes, rest) = buf.split_at(len_of_len);
    if len_bytes[0] == 0 {
        return Err(Error::NonCanonicalSize);
    }
    let mut padded = [0u8; core::mem::size_of::<usize>()];
    if len_of_len > padded.len() {
        return Err(Error::Overflow);
    }
    padded[padded.len() - len_of_len..].copy_from_slice(len_bytes);
    let len = usize::from_be_bytes(padded);
    if len < 56 {
        return Err(Error::NonCanonicalSize);
    }
    *buf = rest;
    Ok(len)
}
