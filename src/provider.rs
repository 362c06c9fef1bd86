//! Seam between the harness and the network.
//!
//! [`Provider`] is what the contract bindings talk to. [`JsonRpcProvider`]
//! implements it on top of the NEAR JSON-RPC API; the actual HTTP round trip
//! and transaction signing are left to a [`Transport`] and a
//! [`TransactionSigner`] supplied by the caller.

use crate::*;
use near_sdk::json_types::Base64VecU8;
use serde_json::{json, Value};

const JSON_RPC_VERSION: &str = "2.0";
const REQUEST_ID: &str = "nft-bridge-harness";

/// A change call against a contract.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub receiver_id: AccountId,
    pub method_name: String,
    pub args: Vec<u8>,
    pub gas: Gas,
    pub deposit: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallStatus {
    /// Execution finished, carrying the raw return value.
    Success(Vec<u8>),
    /// Execution failed on chain (the call reverted).
    Failure(String),
}

/// Final result of a change call once the provider has waited for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    pub status: CallStatus,
    pub logs: Vec<String>,
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, CallStatus::Success(_))
    }
}

pub trait Provider {
    /// Runs a view method and returns its raw return value.
    fn view(&self, contract_id: &AccountId, method_name: &str, args: Vec<u8>) -> Result<Vec<u8>>;

    /// Submits a change call and blocks until its outcome is final.
    fn call(&self, call: FunctionCall) -> Result<CallOutcome>;
}

/// Sends a JSON-RPC body and returns the decoded response body.
pub trait Transport {
    fn post(&self, body: &Value) -> Result<Value>;
}

/// Produces the base64 encoding of a signed transaction wrapping `call`.
pub trait TransactionSigner {
    fn sign_function_call(&self, call: &FunctionCall) -> Result<String>;
}

/// Block reference used for view queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finality {
    Optimistic,
    Final,
}

impl Finality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Finality::Optimistic => "optimistic",
            Finality::Final => "final",
        }
    }
}

pub struct JsonRpcProvider<T, S> {
    transport: T,
    signer: S,
    finality: Finality,
}

impl<T: Transport, S: TransactionSigner> JsonRpcProvider<T, S> {
    pub fn new(transport: T, signer: S) -> Self {
        Self {
            transport,
            signer,
            finality: Finality::Final,
        }
    }

    pub fn with_finality(mut self, finality: Finality) -> Self {
        self.finality = finality;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": JSON_RPC_VERSION,
            "id": REQUEST_ID,
            "method": method,
            "params": params,
        });
        tracing::debug!(method, "sending JSON-RPC request");
        let response = self.transport.post(&body)?;
        into_result(response)
    }
}

impl<T: Transport, S: TransactionSigner> Provider for JsonRpcProvider<T, S> {
    fn view(&self, contract_id: &AccountId, method_name: &str, args: Vec<u8>) -> Result<Vec<u8>> {
        let result = self.send(
            "query",
            json!({
                "request_type": "call_function",
                "finality": self.finality.as_str(),
                "account_id": contract_id,
                "method_name": method_name,
                "args_base64": Base64VecU8::from(args),
            }),
        )?;
        let result: ViewResult = serde_json::from_value(result)?;
        match (result.result, result.error) {
            (_, Some(error)) => Err(HarnessError::Rpc {
                code: 0,
                message: error,
            }),
            (Some(bytes), None) => Ok(bytes),
            (None, None) => Err(HarnessError::Rpc {
                code: 0,
                message: format!("view {} returned no result", method_name),
            }),
        }
    }

    fn call(&self, call: FunctionCall) -> Result<CallOutcome> {
        let signed = self.signer.sign_function_call(&call)?;
        let result = self.send("broadcast_tx_commit", json!([signed]))?;
        let outcome: TxResult = serde_json::from_value(result)?;

        let logs = std::iter::once(outcome.transaction_outcome)
            .chain(outcome.receipts_outcome)
            .flat_map(|o| o.outcome.logs)
            .collect();
        let status = match outcome.status {
            TxStatus::SuccessValue(value) => CallStatus::Success(value.0),
            TxStatus::Failure(failure) => CallStatus::Failure(failure.to_string()),
        };
        let success = matches!(status, CallStatus::Success(_));
        tracing::debug!(method = %call.method_name, success, "transaction committed");
        Ok(CallOutcome { status, logs })
    }
}

#[derive(Deserialize)]
#[serde(crate = "near_sdk::serde")]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

fn into_result(mut response: Value) -> Result<Value> {
    if let Some(error) = response
        .get_mut("error")
        .map(Value::take)
        .filter(|error| !error.is_null())
    {
        let error: RpcError = serde_json::from_value(error)?;
        let message = match error.data {
            Some(Value::String(data)) => format!("{}: {}", error.message, data),
            Some(data) if !data.is_null() => format!("{}: {}", error.message, data),
            _ => error.message,
        };
        return Err(HarnessError::Rpc {
            code: error.code,
            message,
        });
    }
    response
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| HarnessError::Transport("response carries neither result nor error".to_string()))
}

#[derive(Deserialize)]
#[serde(crate = "near_sdk::serde")]
struct ViewResult {
    #[serde(default)]
    result: Option<Vec<u8>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "near_sdk::serde")]
struct TxResult {
    status: TxStatus,
    transaction_outcome: OutcomeWithId,
    #[serde(default)]
    receipts_outcome: Vec<OutcomeWithId>,
}

#[derive(Deserialize)]
#[serde(crate = "near_sdk::serde")]
enum TxStatus {
    SuccessValue(Base64VecU8),
    Failure(Value),
}

#[derive(Deserialize)]
#[serde(crate = "near_sdk::serde")]
struct OutcomeWithId {
    outcome: ExecutionOutcome,
}

#[derive(Deserialize)]
#[serde(crate = "near_sdk::serde")]
struct ExecutionOutcome {
    #[serde(default)]
    logs: Vec<String>,
}
