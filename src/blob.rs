//! Minting blob codec.
//!
//! The bridge hands `mint_for` a blob of the form `{<token_id>}:{<blueprint>}`.
//! The contract splits it at the first `:` and strips one brace from each end
//! of both halves; anything else makes the mint revert.

use crate::*;
use std::fmt;

const SEPARATOR: u8 = b':';

/// Token id and blueprint carried by a single `mint_for` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintingBlob {
    pub token_id: u64,
    pub blueprint: String,
}

impl MintingBlob {
    pub fn new(token_id: u64, blueprint: impl Into<String>) -> Self {
        Self {
            token_id,
            blueprint: blueprint.into(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    pub fn to_hex(&self) -> String {
        to_hex(&self.to_bytes())
    }

    /// Splits `blob` the way the minting entry point does.
    pub fn parse(blob: &[u8]) -> Result<Self> {
        let split = blob
            .iter()
            .position(|b| *b == SEPARATOR)
            .ok_or_else(|| malformed("missing ':' separator"))?;
        let (id_segment, blueprint_segment) = (&blob[..split], &blob[split + 1..]);

        let digits = strip_braces(id_segment)
            .ok_or_else(|| malformed("token id must be wrapped in braces"))?;
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(malformed("token id must be a decimal number"));
        }
        // digits are ascii, so this never fails
        let digits = std::str::from_utf8(digits).map_err(|e| malformed(&e.to_string()))?;
        let token_id = digits
            .parse::<u64>()
            .map_err(|e| malformed(&format!("token id {}: {}", digits, e)))?;

        let blueprint = strip_braces(blueprint_segment)
            .ok_or_else(|| malformed("blueprint must be wrapped in braces"))?;
        let blueprint = String::from_utf8(blueprint.to_vec())
            .map_err(|e| malformed(&format!("blueprint is not utf-8: {}", e)))?;

        Ok(Self {
            token_id,
            blueprint,
        })
    }

    pub fn from_hex(text: &str) -> Result<Self> {
        Self::parse(&from_hex(text)?)
    }
}

impl fmt::Display for MintingBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}:{{{}}}", self.token_id, self.blueprint)
    }
}

/// Bytes of `{<token_id>}:{<blueprint>}`.
pub fn encode_minting_blob(token_id: u64, blueprint: &str) -> Vec<u8> {
    format!("{{{}}}:{{{}}}", token_id, blueprint).into_bytes()
}

fn strip_braces(segment: &[u8]) -> Option<&[u8]> {
    segment.strip_prefix(b"{")?.strip_suffix(b"}")
}

fn malformed(reason: &str) -> HarnessError {
    HarnessError::MalformedBlob(reason.to_string())
}
