#![allow(dead_code)]

use near_sdk::json_types::U128;
use near_sdk::serde::Deserialize;
use near_sdk::AccountId;
use nft_bridge_harness::*;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::str::FromStr;

/// How the fake contract treats minting blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobRule {
    /// Splits the blob like the real bridge contract and reverts on garbage.
    Strict,
    /// Stores whatever arrives under token "0" without looking at it.
    AcceptAnything,
}

struct State {
    owner_id: AccountId,
    imx_id: AccountId,
    metadata: Value,
    //token id -> (owner, blueprint)
    tokens: BTreeMap<String, (AccountId, Vec<u8>)>,
}

/// In-process stand-in for a deployed bridge NFT contract.
pub struct FakeBridge {
    contract_id: AccountId,
    rule: BlobRule,
    state: RefCell<Option<State>>,
    pub calls: RefCell<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(crate = "near_sdk::serde")]
struct InitCall {
    owner_id: AccountId,
    imx_id: AccountId,
    metadata: Value,
}

#[derive(Deserialize)]
#[serde(crate = "near_sdk::serde")]
struct MintForCall {
    to: AccountId,
    quantity: U128,
    minting_blob: HexBytes,
}

#[derive(Deserialize)]
#[serde(crate = "near_sdk::serde")]
struct TokenIdCall {
    token_id: String,
}

impl FakeBridge {
    pub fn new(contract_id: AccountId, rule: BlobRule) -> Self {
        Self {
            contract_id,
            rule,
            state: RefCell::new(None),
            calls: RefCell::new(vec![]),
        }
    }

    fn failure(reason: impl Into<String>) -> CallOutcome {
        CallOutcome {
            status: CallStatus::Failure(reason.into()),
            logs: vec![],
        }
    }

    fn init(&self, args: &[u8]) -> Result<CallOutcome> {
        if self.state.borrow().is_some() {
            return Ok(Self::failure("The contract has already been initialized"));
        }
        let args: InitCall = serde_json::from_slice(args)?;
        *self.state.borrow_mut() = Some(State {
            owner_id: args.owner_id,
            imx_id: args.imx_id,
            metadata: args.metadata,
            tokens: BTreeMap::new(),
        });
        Ok(CallOutcome {
            status: CallStatus::Success(vec![]),
            logs: vec![],
        })
    }

    fn mint_for(&self, args: &[u8]) -> Result<CallOutcome> {
        let args: MintForCall = serde_json::from_slice(args)?;
        let mut state = self.state.borrow_mut();
        let state = match state.as_mut() {
            Some(state) => state,
            None => return Ok(Self::failure("The contract is not initialized")),
        };
        if args.quantity.0 != 1 {
            return Ok(Self::failure("Mintable: invalid quantity"));
        }

        let (token_id, blueprint) = match self.rule {
            BlobRule::Strict => match MintingBlob::parse(args.minting_blob.as_slice()) {
                Ok(blob) => (blob.token_id.to_string(), blob.blueprint.into_bytes()),
                Err(err) => return Ok(Self::failure(err.to_string())),
            },
            BlobRule::AcceptAnything => ("0".to_string(), args.minting_blob.into_inner()),
        };
        if state.tokens.contains_key(&token_id) {
            return Ok(Self::failure("Token already exists"));
        }
        state
            .tokens
            .insert(token_id.clone(), (args.to.clone(), blueprint));

        let event = json!({
            "standard": "nep171",
            "version": "1.0.0",
            "event": "nft_mint",
            "data": [{ "owner_id": args.to, "token_ids": [token_id] }],
        });
        Ok(CallOutcome {
            status: CallStatus::Success(vec![]),
            logs: vec![format!("EVENT_JSON:{}", event)],
        })
    }
}

impl Provider for FakeBridge {
    fn view(&self, contract_id: &AccountId, method_name: &str, args: Vec<u8>) -> Result<Vec<u8>> {
        assert_eq!(contract_id, &self.contract_id);
        self.calls.borrow_mut().push(method_name.to_string());
        let state = self.state.borrow();
        let state = state.as_ref().ok_or_else(|| HarnessError::Rpc {
            code: 0,
            message: "wasm execution failed with error: contract is not initialized".to_string(),
        })?;

        let token = || -> Result<String> {
            let args: TokenIdCall = serde_json::from_slice(&args)?;
            Ok(args.token_id)
        };
        let value = match method_name {
            "nft_total_supply" => json!(U128(state.tokens.len() as u128)),
            "nft_metadata" => state.metadata.clone(),
            "owner" => json!(state.owner_id),
            "imx" => json!(state.imx_id),
            "nft_token" => {
                let token_id = token()?;
                match state.tokens.get(&token_id) {
                    Some((owner_id, _)) => json!({
                        "token_id": token_id,
                        "owner_id": owner_id,
                        "metadata": null,
                        "approved_account_ids": {},
                    }),
                    None => Value::Null,
                }
            }
            "blueprints" => {
                let token_id = token()?;
                let blueprint = state
                    .tokens
                    .get(&token_id)
                    .map(|(_, blueprint)| blueprint.as_slice())
                    .unwrap_or_default();
                json!(to_hex(blueprint))
            }
            "token_uri" => {
                let base_uri = state.metadata["base_uri"].as_str().unwrap_or_default();
                json!(format!("{}{}", base_uri, token()?))
            }
            other => {
                return Err(HarnessError::Rpc {
                    code: 0,
                    message: format!("wasm execution failed with error: MethodNotFound {}", other),
                })
            }
        };
        Ok(serde_json::to_vec(&value)?)
    }

    fn call(&self, call: FunctionCall) -> Result<CallOutcome> {
        assert_eq!(call.receiver_id, self.contract_id);
        self.calls.borrow_mut().push(call.method_name.clone());
        match call.method_name.as_str() {
            "new" => self.init(&call.args),
            "mint_for" => self.mint_for(&call.args),
            other => Ok(Self::failure(format!("MethodNotFound {}", other))),
        }
    }
}

/// Hands out a fresh fake contract per deployment.
pub struct FakeDeployer {
    rule: BlobRule,
    pub deployed: usize,
}

impl FakeDeployer {
    pub fn new(rule: BlobRule) -> Self {
        Self { rule, deployed: 0 }
    }
}

impl Deployer for FakeDeployer {
    type Provider = FakeBridge;

    fn deploy(&mut self) -> Result<MintableContract<FakeBridge>> {
        let contract_id = AccountId::from_str(&format!("nft-{}.test.near", self.deployed))
            .map_err(|e| HarnessError::Transport(e.to_string()))?;
        self.deployed += 1;
        Ok(MintableContract::new(
            FakeBridge::new(contract_id.clone(), self.rule),
            contract_id,
        ))
    }
}

pub fn account(name: &str) -> AccountId {
    AccountId::from_str(name).unwrap()
}

pub fn config() -> ContractConfig {
    ContractConfig {
        owner_id: account("owner.test.near"),
        name: "Nova".to_string(),
        symbol: "NOVA".to_string(),
        imx_id: account("imx.test.near"),
        base_uri: "https://example.org/api/v0/imx/metadata/".to_string(),
    }
}

/// A deployed and initialized strict contract.
pub fn initialized_contract() -> MintableContract<FakeBridge> {
    let contract = FakeDeployer::new(BlobRule::Strict).deploy().unwrap();
    contract.init(&config().init_args()).unwrap();
    contract
}
