//! Identifiers for L2 contracts, their L1 portals, and function selectors.
use std::fmt;

use crate::field::{FIELD_BYTES, Fr};

/// Address of an L2 contract. Addresses are field elements on L2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AztecAddress(pub Fr);

impl AztecAddress {
    pub fn zero() -> Self {
        Self(Fr::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn to_field(self) -> Fr {
        self.0
    }
}

impl From<Fr> for AztecAddress {
    fn from(value: Fr) -> Self {
        Self(value)
    }
}

impl From<u64> for AztecAddress {
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl fmt::Display for AztecAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Address of the L1 portal contract paired with an L2 contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EthAddress(pub [u8; 20]);

impl EthAddress {
    /// Placeholder used when a contract has no registered portal.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Big-endian embedding into a field element.
    pub fn to_field(self) -> Fr {
        Fr::from_be_bytes_mod_order(&self.0)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Four-byte identifier of a contract function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionSelector(pub [u8; 4]);

impl FunctionSelector {
    pub const SIZE: usize = 4;

    /// Recovers a selector from the trailing four bytes of a field element.
    pub fn from_field(value: Fr) -> Self {
        let bytes = value.to_be_bytes();
        let mut selector = [0u8; Self::SIZE];
        selector.copy_from_slice(&bytes[FIELD_BYTES - Self::SIZE..]);
        Self(selector)
    }

    pub fn to_field(self) -> Fr {
        Fr::from_be_bytes_mod_order(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; Self::SIZE]
    }
}

impl From<u32> for FunctionSelector {
    fn from(value: u32) -> Self {
        Self(value.to_be_bytes())
    }
}

impl fmt::Display for FunctionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
