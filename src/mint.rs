use crate::*;

/// A single bridge mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    pub recipient: AccountId,
    pub quantity: u128,
    pub token_id: u64,
    pub blueprint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub token_id: u64,
    //blob as it crossed the wire
    pub blob_hex: String,
    //ids reported by nft_mint events
    pub minted: Vec<TokenId>,
    pub outcome: CallOutcome,
}

impl MintRequest {
    pub fn new(recipient: AccountId, token_id: u64, blueprint: impl Into<String>) -> Self {
        Self {
            recipient,
            quantity: 1,
            token_id,
            blueprint: blueprint.into(),
        }
    }

    pub fn minting_blob(&self) -> MintingBlob {
        MintingBlob::new(self.token_id, self.blueprint.clone())
    }
}

/// Encodes the request's blob and sends it through `mint_for`.
pub fn mint_token<P: Provider>(
    contract: &MintableContract<P>,
    request: &MintRequest,
) -> Result<MintReceipt> {
    let blob = request.minting_blob().to_bytes();
    let blob_hex = to_hex(&blob);
    tracing::info!(
        contract = %contract.contract_id(),
        recipient = %request.recipient,
        token_id = request.token_id,
        blob = %blob_hex,
        "minting token"
    );

    let outcome = match contract.mint_for(&request.recipient, request.quantity, &blob) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(token_id = request.token_id, error = %err, "mint failed");
            return Err(err);
        }
    };

    let minted = minted_token_ids(&outcome.logs);
    tracing::info!(token_id = request.token_id, minted = ?minted, "mint committed");
    Ok(MintReceipt {
        token_id: request.token_id,
        blob_hex,
        minted,
        outcome,
    })
}
