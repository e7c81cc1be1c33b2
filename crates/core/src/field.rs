//! Field element type shared by the witness ABI and every oracle.
//!
//! [`Fr`] wraps the BN254 scalar field used by the arithmetic circuits. All
//! data exchanged with the virtual machine, storage slots and values, and
//! effect identifiers (commitments, nullifiers, messages) are `Fr`.
use std::fmt;
use std::str::FromStr;

use ark_ff::{BigInteger, PrimeField, Zero};

/// Number of bytes in the canonical big-endian encoding of a field element.
pub const FIELD_BYTES: usize = 32;

/// Element of the BN254 scalar field.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fr(ark_bn254::Fr);

impl Fr {
    /// The additive identity, used as the sentinel return of effect oracles.
    #[inline]
    pub fn zero() -> Self {
        Self(ark_bn254::Fr::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Reduces an arbitrary big-endian byte string into the field.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(ark_bn254::Fr::from_be_bytes_mod_order(bytes))
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn to_be_bytes(&self) -> [u8; FIELD_BYTES] {
        let bytes = self.0.into_bigint().to_bytes_be();
        let mut out = [0u8; FIELD_BYTES];
        let offset = FIELD_BYTES.saturating_sub(bytes.len());
        out[offset..].copy_from_slice(&bytes[bytes.len().saturating_sub(FIELD_BYTES)..]);
        out
    }

    /// Last byte of the big-endian encoding (one character per field in logs).
    #[inline]
    pub fn trailing_byte(&self) -> u8 {
        self.to_be_bytes()[FIELD_BYTES - 1]
    }

    /// Returns the value as `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        let bytes = self.to_be_bytes();
        let (high, low) = bytes.split_at(FIELD_BYTES - 8);
        if high.iter().any(|b| *b != 0) {
            return None;
        }
        let mut buf = [0u8; 8];
        buf.copy_from_slice(low);
        Some(u64::from_be_bytes(buf))
    }

    /// Abbreviated hex form for log lines, e.g. `0x0000…002a`.
    pub fn to_short_string(&self) -> String {
        let full = hex::encode(self.to_be_bytes());
        format!("0x{}…{}", &full[..4], &full[full.len() - 4..])
    }

    /// Access to the underlying arkworks element.
    pub fn inner(&self) -> &ark_bn254::Fr {
        &self.0
    }
}

impl From<ark_bn254::Fr> for Fr {
    fn from(value: ark_bn254::Fr) -> Self {
        Self(value)
    }
}

impl From<u64> for Fr {
    fn from(value: u64) -> Self {
        Self(ark_bn254::Fr::from(value))
    }
}

impl From<u32> for Fr {
    fn from(value: u32) -> Self {
        Self::from(u64::from(value))
    }
}

impl From<bool> for Fr {
    fn from(value: bool) -> Self {
        Self::from(u64::from(value))
    }
}

impl std::ops::Add for Fr {
    type Output = Fr;

    fn add(self, rhs: Fr) -> Fr {
        Fr(self.0 + rhs.0)
    }
}

impl fmt::Display for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_be_bytes()))
    }
}

impl fmt::Debug for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fr({})", self)
    }
}

/// Failure to parse a hex string into a field element.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldParseError {
    #[error("field literal is longer than {FIELD_BYTES} bytes")]
    TooLong,

    #[error("invalid hex in field literal: {0}")]
    InvalidHex(String),
}

impl FromStr for Fr {
    type Err = FieldParseError;

    /// Parses `0x`-prefixed (or bare) big-endian hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let padded = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_owned()
        };
        let bytes =
            hex::decode(&padded).map_err(|e| FieldParseError::InvalidHex(e.to_string()))?;
        if bytes.len() > FIELD_BYTES {
            return Err(FieldParseError::TooLong);
        }
        Ok(Self::from_be_bytes_mod_order(&bytes))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = <String as serde::Deserialize>::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}
