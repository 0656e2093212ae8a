//! Solidity ABI codec
//!
//! Covers exactly the shapes the board contract uses:
//!
//! - call data for `()`, `(uint256)`, `(uint256,uint8)` and `(string,string)`
//! - return data for `address` and
//!   `(uint256,string,string,uint8,uint256,address)[]`
//! - `Error(string)` revert payloads
//!
//! Every read is bounds checked; malformed return data yields an
//! [`AbiError`], never a panic.

use primitive_types::U256;
use sha3::{Digest, Keccak256};
use shared_types::{Address, RawRecord};

use crate::errors::AbiError;

/// Size of one ABI word.
pub const WORD: usize = 32;

/// Selector of the standard `Error(string)` revert payload.
pub const ERROR_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// First four bytes of the Keccak-256 of a canonical function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

// =============================================================================
// ENCODING
// =============================================================================

/// An ABI value to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(U256),
    Address(Address),
    String(String),
    Array(Vec<Token>),
    Tuple(Vec<Token>),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        match self {
            Token::Uint(_) | Token::Address(_) => false,
            Token::String(_) | Token::Array(_) => true,
            Token::Tuple(items) => items.iter().any(Token::is_dynamic),
        }
    }

    /// Bytes this token occupies in its enclosing head.
    fn head_len(&self) -> usize {
        match self {
            Token::Tuple(items) if !self.is_dynamic() => items.iter().map(Token::head_len).sum(),
            _ => WORD,
        }
    }

    fn encode_body(&self) -> Vec<u8> {
        match self {
            Token::Uint(value) => uint_word(*value).to_vec(),
            Token::Address(address) => address_word(address).to_vec(),
            Token::String(text) => {
                let bytes = text.as_bytes();
                let mut out = uint_word(U256::from(bytes.len())).to_vec();
                out.extend_from_slice(bytes);
                out.resize(WORD + padded_len(bytes.len()), 0);
                out
            }
            Token::Array(items) => {
                let mut out = uint_word(U256::from(items.len())).to_vec();
                out.extend(encode_tokens(items));
                out
            }
            Token::Tuple(items) => encode_tokens(items),
        }
    }
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

fn address_word(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Head/tail encode a token sequence.
pub fn encode_tokens(tokens: &[Token]) -> Vec<u8> {
    let head_len: usize = tokens.iter().map(Token::head_len).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&uint_word(U256::from(head_len + tail.len())));
            tail.extend(token.encode_body());
        } else {
            head.extend(token.encode_body());
        }
    }

    head.extend(tail);
    head
}

/// Selector followed by the encoded arguments.
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut data = selector(signature).to_vec();
    data.extend(encode_tokens(args));
    data
}

/// Return data of a `(uint256,string,string,uint8,uint256,address)[]` getter.
pub fn encode_record_list(records: &[RawRecord]) -> Vec<u8> {
    let rows = records
        .iter()
        .map(|r| {
            Token::Tuple(vec![
                Token::Uint(r.id),
                Token::String(r.title.clone()),
                Token::String(r.description.clone()),
                Token::Uint(r.status),
                Token::Uint(r.votes),
                Token::Address(r.raised_by),
            ])
        })
        .collect();
    encode_tokens(&[Token::Array(rows)])
}

/// Revert payload in `Error(string)` form.
pub fn encode_revert_reason(reason: &str) -> Vec<u8> {
    let mut data = ERROR_SELECTOR.to_vec();
    data.extend(encode_tokens(&[Token::String(reason.to_string())]));
    data
}

// =============================================================================
// DECODING
// =============================================================================

fn word(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    let end = offset.checked_add(WORD).ok_or(AbiError::OutOfBounds {
        offset,
        len: data.len(),
    })?;
    data.get(offset..end).ok_or(AbiError::OutOfBounds {
        offset,
        len: data.len(),
    })
}

fn read_uint(data: &[u8], offset: usize) -> Result<U256, AbiError> {
    word(data, offset).map(U256::from_big_endian)
}

fn read_usize(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let value = read_uint(data, offset)?;
    if value > U256::from(usize::MAX) {
        return Err(AbiError::ValueOverflow(value.to_string()));
    }
    Ok(value.as_usize())
}

fn read_address(data: &[u8], offset: usize) -> Result<Address, AbiError> {
    let word = word(data, offset)?;
    if word[..12].iter().any(|b| *b != 0) {
        return Err(AbiError::ValueOverflow(format!("0x{}", hex::encode(word))));
    }
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&word[12..]);
    Ok(Address::from_bytes(bytes))
}

fn read_string(data: &[u8], offset: usize) -> Result<String, AbiError> {
    let len = read_usize(data, offset)?;
    let start = offset + WORD;
    let bytes = start
        .checked_add(len)
        .and_then(|end| data.get(start..end))
        .ok_or(AbiError::OutOfBounds {
            offset: start,
            len: data.len(),
        })?;
    String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidUtf8 { offset: start })
}

/// Offset stored at `at`, resolved against `base`.
fn read_offset(data: &[u8], base: usize, at: usize) -> Result<usize, AbiError> {
    let relative = read_usize(data, at)?;
    base.checked_add(relative).ok_or(AbiError::OutOfBounds {
        offset: relative,
        len: data.len(),
    })
}

/// Decode a single `address` return value.
pub fn decode_address(data: &[u8]) -> Result<Address, AbiError> {
    read_address(data, 0)
}

/// Decode the list getters' return value into typed records.
pub fn decode_record_list(data: &[u8]) -> Result<Vec<RawRecord>, AbiError> {
    let array_at = read_offset(data, 0, 0)?;
    let len = read_usize(data, array_at)?;
    let base = array_at + WORD;

    // Each element needs at least its offset word.
    if len > data.len().saturating_sub(base) / WORD {
        return Err(AbiError::LengthMismatch {
            declared: len,
            available: data.len().saturating_sub(base) / WORD,
        });
    }

    (0..len)
        .map(|i| {
            let tuple = read_offset(data, base, base + i * WORD)?;
            Ok(RawRecord {
                id: read_uint(data, tuple)?,
                title: read_string(data, read_offset(data, tuple, tuple + WORD)?)?,
                description: read_string(data, read_offset(data, tuple, tuple + 2 * WORD)?)?,
                status: read_uint(data, tuple + 3 * WORD)?,
                votes: read_uint(data, tuple + 4 * WORD)?,
                raised_by: read_address(data, tuple + 5 * WORD)?,
            })
        })
        .collect()
}

/// Reason string of an `Error(string)` revert payload, if it is one.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    let body = data.strip_prefix(&ERROR_SELECTOR[..])?;
    let offset = read_usize(body, 0).ok()?;
    read_string(body, offset).ok()
}

// =============================================================================
// HEX
// =============================================================================

/// `0x`-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex with or without `0x`. `0x` alone is empty data.
pub fn from_hex(s: &str) -> Result<Vec<u8>, AbiError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| AbiError::InvalidHex(e.to_string()))
}
