//! # Chain Primitives
//!
//! Address and transaction hash newtypes, plus the typed contract row.
//!
//! ## Clusters
//!
//! - **Identity**: [`Address`] with EIP-55 checksum rendering
//! - **Transactions**: [`TxHash`]
//! - **Contract rows**: [`RawRecord`]

use std::fmt;
use std::str::FromStr;

use primitive_types::{H160, H256};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::errors::AddressError;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// Strip an optional `0x`/`0X` prefix and decode exactly `N` bytes of hex.
fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N], AddressError> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let bytes = hex::decode(body).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
    if bytes.len() != N {
        return Err(AddressError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }

    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

// =============================================================================
// ADDRESS
// =============================================================================

/// A 20-byte account address.
///
/// Displays and serializes in EIP-55 checksummed form. Parsing accepts any
/// letter case, with or without the `0x` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub H160);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address(H160([0u8; 20]));

    /// Build an address from raw bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(H160::from(bytes))
    }

    /// Build a test-friendly address whose low 8 bytes hold `value`.
    pub fn from_low_u64_be(value: u64) -> Self {
        Self(H160::from_low_u64_be(value))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// EIP-55 mixed-case checksum encoding, `0x`-prefixed.
    ///
    /// Each hex letter is uppercased when the matching nibble of
    /// `keccak256(lowercase_hex)` is 8 or greater.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0.as_bytes());
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, ch) in lower.chars().enumerate() {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if ch.is_ascii_alphabetic() && nibble >= 8 {
                out.push(ch.to_ascii_uppercase());
            } else {
                out.push(ch);
            }
        }
        out
    }

    /// Compare two accounts after normalizing both to checksummed form.
    pub fn same_account(&self, other: &Address) -> bool {
        self.to_checksum() == other.to_checksum()
    }
}

impl From<H160> for Address {
    fn from(value: H160) -> Self {
        Self(value)
    }
}

impl From<Address> for H160 {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed::<20>(s).map(Self::from_bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// =============================================================================
// TRANSACTION HASH
// =============================================================================

/// A 32-byte transaction hash as returned by `eth_sendTransaction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TxHash(pub H256);

impl TxHash {
    /// Build a hash whose low 8 bytes hold `value`.
    pub fn from_low_u64_be(value: u64) -> Self {
        Self(H256::from_low_u64_be(value))
    }
}

impl FromStr for TxHash {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed::<32>(s).map(|bytes| Self(H256::from(bytes)))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl Serialize for TxHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// =============================================================================
// CONTRACT ROW
// =============================================================================

/// One row of a request list as returned by the contract.
///
/// Mirrors the Solidity tuple `(uint256,string,string,uint8,uint256,address)`.
/// `status` stays a `U256` here so that out-of-range codes survive decoding
/// and are classified later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: U256,
    pub title: String,
    pub description: String,
    pub status: U256,
    pub votes: U256,
    pub raised_by: Address,
}
