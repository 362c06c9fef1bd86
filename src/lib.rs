//! Deployment and smoke-test harness for an NFT contract minted through a
//! layer-2 bridge.
//!
//! The contract itself is an external collaborator. What lives here is the
//! minting blob codec, typed bindings for the contract's methods, the
//! JSON-RPC glue underneath them and the smoke checks built on top.

use near_contract_standards::non_fungible_token::metadata::NFTContractMetadata;
use near_contract_standards::non_fungible_token::Token;
use near_sdk::json_types::U128;
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::{AccountId, Balance, Gas};

pub use crate::blob::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::events::*;
pub use crate::hex_codec::*;
pub use crate::mint::*;
pub use crate::mintable::*;
pub use crate::provider::*;
pub use crate::smoke::*;

mod blob;
mod config;
mod error;
mod events;
mod hex_codec;
mod mint;
mod mintable;
mod provider;
mod smoke;
