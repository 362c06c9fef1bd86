//! Smoke checks run against freshly deployed contracts.
//!
//! Each check gets its own deployment from a [`Deployer`], initializes it
//! from the [`ContractConfig`] and then pokes at it through the bindings.

use crate::*;
use std::fmt;

/// Token id minted by the checks.
pub const SMOKE_TOKEN_ID: u64 = 1;
/// Blueprint minted by the checks that need a non-empty one.
pub const SMOKE_BLUEPRINT: &str = "1000";
/// A blob with a separator but no segments.
pub const INVALID_BLOB: &[u8] = b":";

/// Supplies uninitialized contracts with the code already uploaded.
pub trait Deployer {
    type Provider: Provider;

    fn deploy(&mut self) -> Result<MintableContract<Self::Provider>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeCheck {
    Metadata,
    TotalSupplyAfterMint,
    TokenUri,
    OwnerAndBlueprint,
    EmptyBlueprint,
    InvalidBlobRejected,
}

impl SmokeCheck {
    pub const ALL: [SmokeCheck; 6] = [
        SmokeCheck::Metadata,
        SmokeCheck::TotalSupplyAfterMint,
        SmokeCheck::TokenUri,
        SmokeCheck::OwnerAndBlueprint,
        SmokeCheck::EmptyBlueprint,
        SmokeCheck::InvalidBlobRejected,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SmokeCheck::Metadata => "metadata",
            SmokeCheck::TotalSupplyAfterMint => "total_supply_after_mint",
            SmokeCheck::TokenUri => "token_uri",
            SmokeCheck::OwnerAndBlueprint => "owner_and_blueprint",
            SmokeCheck::EmptyBlueprint => "empty_blueprint",
            SmokeCheck::InvalidBlobRejected => "invalid_blob_rejected",
        }
    }
}

impl fmt::Display for SmokeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default)]
pub struct SmokeReport {
    pub results: Vec<(SmokeCheck, Result<()>)>,
}

impl SmokeReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (SmokeCheck, &HarnessError)> + '_ {
        self.results
            .iter()
            .filter_map(|(check, result)| result.as_ref().err().map(|err| (*check, err)))
    }
}

/// Runs every check, each on its own deployment.
pub fn run_all<D: Deployer>(deployer: &mut D, config: &ContractConfig) -> SmokeReport {
    let mut report = SmokeReport::default();
    for check in SmokeCheck::ALL {
        let result = run_check(deployer, config, check);
        match &result {
            Ok(()) => tracing::info!(check = %check, "smoke check passed"),
            Err(err) => tracing::warn!(check = %check, error = %err, "smoke check failed"),
        }
        report.results.push((check, result));
    }
    report
}

pub fn run_check<D: Deployer>(deployer: &mut D, config: &ContractConfig, check: SmokeCheck) -> Result<()> {
    let contract = deployer.deploy()?;
    contract.init(&config.init_args())?;
    let name = check.name();

    match check {
        SmokeCheck::Metadata => {
            let metadata = contract.metadata()?;
            expect_eq(name, &config.name, &metadata.name)?;
            expect_eq(name, &config.symbol, &metadata.symbol)?;
            expect_eq(name, &Some(config.base_uri.clone()), &metadata.base_uri)?;
            expect_eq(name, &config.owner_id, &contract.owner()?)?;
            expect_eq(name, &config.imx_id, &contract.imx()?)
        }
        SmokeCheck::TotalSupplyAfterMint => {
            mint_smoke_token(&contract, config, SMOKE_BLUEPRINT)?;
            expect_eq(name, &1, &contract.total_supply()?)
        }
        SmokeCheck::TokenUri => {
            mint_smoke_token(&contract, config, SMOKE_BLUEPRINT)?;
            expect_eq(
                name,
                &config.token_uri(SMOKE_TOKEN_ID),
                &contract.token_uri(SMOKE_TOKEN_ID)?,
            )
        }
        SmokeCheck::OwnerAndBlueprint => {
            mint_smoke_token(&contract, config, SMOKE_BLUEPRINT)?;
            expect_eq(name, &config.owner_id, &contract.owner_of(SMOKE_TOKEN_ID)?)?;
            expect_blueprint(name, SMOKE_BLUEPRINT, &contract.blueprints(SMOKE_TOKEN_ID)?)
        }
        SmokeCheck::EmptyBlueprint => {
            mint_smoke_token(&contract, config, "")?;
            expect_blueprint(name, "", &contract.blueprints(SMOKE_TOKEN_ID)?)
        }
        SmokeCheck::InvalidBlobRejected => {
            let supply_before = contract.total_supply()?;
            match contract.mint_for(&config.owner_id, 1, INVALID_BLOB) {
                Err(err) if err.is_revert() => {}
                Err(err) => return Err(err),
                Ok(_) => {
                    return Err(HarnessError::CheckFailed {
                        check: name,
                        expected: "revert".to_string(),
                        actual: "mint succeeded".to_string(),
                    })
                }
            }
            expect_eq(name, &supply_before, &contract.total_supply()?)
        }
    }
}

fn mint_smoke_token<P: Provider>(
    contract: &MintableContract<P>,
    config: &ContractConfig,
    blueprint: &str,
) -> Result<MintReceipt> {
    let request = MintRequest::new(config.owner_id.clone(), SMOKE_TOKEN_ID, blueprint);
    mint_token(contract, &request)
}

fn expect_blueprint(check: &'static str, expected: &str, stored: &[u8]) -> Result<()> {
    let actual = String::from_utf8_lossy(stored);
    expect_eq(check, expected, &*actual)
}

fn expect_eq<T>(check: &'static str, expected: &T, actual: &T) -> Result<()>
where
    T: PartialEq + fmt::Debug + ?Sized,
{
    if expected == actual {
        return Ok(());
    }
    Err(HarnessError::CheckFailed {
        check,
        expected: format!("{:?}", expected),
        actual: format!("{:?}", actual),
    })
}
