use crate::*;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// Prefix carried by every hex string on the wire.
pub const HEX_PREFIX: &str = "0x";

/// Lowercase, `0x`-prefixed hex of `bytes`. The empty slice maps to `"0x"`.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("{}{}", HEX_PREFIX, hex::encode(bytes))
}

/// Inverse of [`to_hex`]. Digits may be in either case, the prefix is required.
pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    let digits = text
        .strip_prefix(HEX_PREFIX)
        .ok_or_else(|| HarnessError::InvalidHex(format!("{:?} lacks the 0x prefix", text)))?;
    hex::decode(digits).map_err(|e| HarnessError::InvalidHex(e.to_string()))
}

/// Bytes that travel through JSON as a `0x` hex string.
#[derive(Debug, Clone, Default, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct HexBytes(pub Vec<u8>);

impl HexBytes {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for HexBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex(&self.0))
    }
}

impl FromStr for HexBytes {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self> {
        from_hex(s).map(Self)
    }
}
