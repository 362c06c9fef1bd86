use crate::*;
use near_sdk::serde::de::DeserializeOwned;

pub type TokenId = String;

const GAS_FOR_INIT: Gas = Gas(30_000_000_000_000);
const GAS_FOR_MINT_FOR: Gas = Gas(50_000_000_000_000);

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct MintForArgs<'a> {
    to: &'a AccountId,
    quantity: U128,
    minting_blob: HexBytes,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct TokenIdArgs {
    token_id: TokenId,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct NoArgs {}

/// Typed bindings for a deployed NFT contract that accepts bridge mints.
///
/// Every method is a single round trip through the [`Provider`]; nothing is
/// cached between calls.
pub struct MintableContract<P> {
    provider: P,
    contract_id: AccountId,
}

impl<P: Provider> MintableContract<P> {
    pub fn new(provider: P, contract_id: AccountId) -> Self {
        Self {
            provider,
            contract_id,
        }
    }

    pub fn contract_id(&self) -> &AccountId {
        &self.contract_id
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Calls the `new` initializer of a freshly deployed contract.
    pub fn init(&self, args: &InitArgs) -> Result<CallOutcome> {
        tracing::info!(contract = %self.contract_id, owner = %args.owner_id, "initializing contract");
        self.call_json("new", args, GAS_FOR_INIT, 0)
    }

    /// Bridge entry point. A blob the contract cannot split makes the call
    /// revert, reported as [`HarnessError::Reverted`].
    pub fn mint_for(&self, to: &AccountId, quantity: u128, minting_blob: &[u8]) -> Result<CallOutcome> {
        let args = MintForArgs {
            to,
            quantity: U128(quantity),
            minting_blob: HexBytes::from(minting_blob),
        };
        self.call_json("mint_for", &args, GAS_FOR_MINT_FOR, 0)
    }

    /// Blueprint stored for `token_id`, decoded from its hex form.
    pub fn blueprints(&self, token_id: u64) -> Result<Vec<u8>> {
        let blueprint: HexBytes = self.view_json("blueprints", &token_args(token_id))?;
        Ok(blueprint.into_inner())
    }

    pub fn total_supply(&self) -> Result<u128> {
        let supply: U128 = self.view_json("nft_total_supply", &NoArgs {})?;
        Ok(supply.0)
    }

    pub fn token(&self, token_id: u64) -> Result<Option<Token>> {
        self.view_json("nft_token", &token_args(token_id))
    }

    pub fn owner_of(&self, token_id: u64) -> Result<AccountId> {
        self.token(token_id)?
            .map(|token| token.owner_id)
            .ok_or_else(|| HarnessError::TokenNotFound(token_id.to_string()))
    }

    pub fn metadata(&self) -> Result<NFTContractMetadata> {
        self.view_json("nft_metadata", &NoArgs {})
    }

    /// Contract owner.
    pub fn owner(&self) -> Result<AccountId> {
        self.view_json("owner", &NoArgs {})
    }

    /// Bridge account allowed to mint.
    pub fn imx(&self) -> Result<AccountId> {
        self.view_json("imx", &NoArgs {})
    }

    pub fn token_uri(&self, token_id: u64) -> Result<String> {
        self.view_json("token_uri", &token_args(token_id))
    }

    fn view_json<A, R>(&self, method: &str, args: &A) -> Result<R>
    where
        A: Serialize,
        R: DeserializeOwned,
    {
        let args = serde_json::to_vec(args)?;
        let raw = self.provider.view(&self.contract_id, method, args)?;
        Ok(serde_json::from_slice(&raw)?)
    }

    fn call_json<A: Serialize>(
        &self,
        method: &str,
        args: &A,
        gas: Gas,
        deposit: Balance,
    ) -> Result<CallOutcome> {
        let outcome = self.provider.call(FunctionCall {
            receiver_id: self.contract_id.clone(),
            method_name: method.to_string(),
            args: serde_json::to_vec(args)?,
            gas,
            deposit,
        })?;
        match outcome.status {
            CallStatus::Success(_) => Ok(outcome),
            CallStatus::Failure(reason) => Err(HarnessError::Reverted {
                method: method.to_string(),
                reason,
            }),
        }
    }
}

fn token_args(token_id: u64) -> TokenIdArgs {
    TokenIdArgs {
        token_id: token_id.to_string(),
    }
}
