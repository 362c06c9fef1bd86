use crate::*;
use serde_json::Value;

/// Prefix of NEP-297 event logs.
pub const EVENT_JSON_PREFIX: &str = "EVENT_JSON:";

/// This is the name of the NFT standard whose events we read
pub const NFT_STANDARD_NAME: &str = "nep171";

/// One `EVENT_JSON:` log line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(crate = "near_sdk::serde")]
pub struct EventLog {
    pub standard: String,
    pub version: String,
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Payload entry of an `nft_mint` event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(crate = "near_sdk::serde")]
pub struct NftMintLog {
    pub owner_id: AccountId,
    pub token_ids: Vec<TokenId>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl EventLog {
    /// Mint entries when this is an NFT mint event.
    pub fn nft_mints(&self) -> Option<Vec<NftMintLog>> {
        if self.standard != NFT_STANDARD_NAME || self.event != "nft_mint" {
            return None;
        }
        serde_json::from_value(self.data.clone()).ok()
    }
}

/// Parses `log` if it is an event; plain logs and broken JSON give `None`.
pub fn parse_event(log: &str) -> Option<EventLog> {
    let json = log.strip_prefix(EVENT_JSON_PREFIX)?;
    serde_json::from_str(json).ok()
}

/// Token ids announced by `nft_mint` events, in log order.
pub fn minted_token_ids(logs: &[String]) -> Vec<TokenId> {
    logs.iter()
        .filter_map(|log| parse_event(log))
        .filter_map(|event| event.nft_mints())
        .flatten()
        .flat_map(|mint| mint.token_ids)
        .collect()
}
