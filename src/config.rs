use crate::*;
use std::str::FromStr;

/// Version of the NFT metadata standard the contract is initialized with.
pub const NFT_METADATA_SPEC: &str = "nft-1.0.0";

pub const ENV_OWNER_ID: &str = "CONTRACT_OWNER_ID";
pub const ENV_NAME: &str = "CONTRACT_NAME";
pub const ENV_SYMBOL: &str = "CONTRACT_SYMBOL";
pub const ENV_IMX_ID: &str = "IMX_ACCOUNT_ID";
pub const ENV_BASE_URI: &str = "BASE_URI";

pub const ENV_MINT_RECIPIENT: &str = "MINT_RECIPIENT";
pub const ENV_MINT_TOKEN_ID: &str = "MINT_TOKEN_ID";
pub const ENV_MINT_BLUEPRINT: &str = "MINT_BLUEPRINT";
pub const ENV_MINT_QUANTITY: &str = "MINT_QUANTITY";

/// Everything the contract is initialized with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    pub owner_id: AccountId,
    pub name: String,
    pub symbol: String,
    //bridge account allowed to call mint_for
    pub imx_id: AccountId,
    pub base_uri: String,
}

/// Arguments of the contract's `new` method.
#[derive(Serialize, Deserialize)]
#[serde(crate = "near_sdk::serde")]
pub struct InitArgs {
    pub owner_id: AccountId,
    pub imx_id: AccountId,
    pub metadata: NFTContractMetadata,
}

impl ContractConfig {
    /// Reads the process environment, loading `.env` first when present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            owner_id: parse_account_id(&required(&lookup, ENV_OWNER_ID)?)?,
            name: required(&lookup, ENV_NAME)?,
            symbol: required(&lookup, ENV_SYMBOL)?,
            imx_id: parse_account_id(&required(&lookup, ENV_IMX_ID)?)?,
            base_uri: required(&lookup, ENV_BASE_URI)?,
        })
    }

    pub fn init_args(&self) -> InitArgs {
        InitArgs {
            owner_id: self.owner_id.clone(),
            imx_id: self.imx_id.clone(),
            metadata: NFTContractMetadata {
                spec: NFT_METADATA_SPEC.to_string(),
                name: self.name.clone(),
                symbol: self.symbol.clone(),
                icon: None,
                base_uri: Some(self.base_uri.clone()),
                reference: None,
                reference_hash: None,
            },
        }
    }

    /// URI the contract is expected to report for `token_id`.
    pub fn token_uri(&self, token_id: u64) -> String {
        format!("{}{}", self.base_uri, token_id)
    }
}

impl MintRequest {
    /// Reads the one-off mint from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let recipient = parse_account_id(&required(&lookup, ENV_MINT_RECIPIENT)?)?;
        let token_id = parse_value(ENV_MINT_TOKEN_ID, &required(&lookup, ENV_MINT_TOKEN_ID)?)?;
        let blueprint = lookup(ENV_MINT_BLUEPRINT).unwrap_or_default();
        let quantity = match lookup(ENV_MINT_QUANTITY) {
            Some(raw) => parse_value(ENV_MINT_QUANTITY, &raw)?,
            None => 1,
        };
        Ok(Self {
            recipient,
            quantity,
            token_id,
            blueprint,
        })
    }
}

pub fn parse_account_id(raw: &str) -> Result<AccountId> {
    AccountId::from_str(raw).map_err(|e| HarnessError::InvalidAccountId {
        account_id: raw.to_string(),
        reason: e.to_string(),
    })
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(HarnessError::MissingEnv(key.to_string())),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| HarnessError::InvalidConfig {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
