//! Token deployer
//!
//! Token representations are cw20 contracts created with `instantiate2`, so
//! their address depends only on the code checksum, the creating linker and
//! a salt:
//!
//! ```text
//! address = instantiate2_address(checksum(token_code_id), canonical(linker), salt)
//! ```
//!
//! Remote representations use the token id as salt, which lets anyone
//! predict the address a destination chain will use before the Deploy
//! message lands there.
//!
//! # cw20 metadata
//! cw20-base only accepts tickers matching `[a-zA-Z\-]{3,12}`, names of 3 to
//! 50 bytes and at most 18 decimals. Metadata from other chains is fitted to
//! those rules before instantiation; the untouched values are emitted with
//! the deploy event. Amounts are never rescaled, so a clamped `decimals` only
//! changes how the wrapped balance displays.

use cosmwasm_std::{
    instantiate2_address, to_json_binary, Addr, Binary, CosmosMsg, Deps, StdError, StdResult,
    Uint128, WasmMsg,
};
use cw20::{Cw20Coin, MinterResponse};

use crate::error::ContractError;
use crate::state::Config;

/// Highest `decimals` cw20-base accepts
pub const MAX_DECIMALS: u8 = 18;

const MIN_TICKER_LEN: usize = 3;
const MAX_TICKER_LEN: usize = 12;
const MIN_NAME_LEN: usize = 3;
const MAX_NAME_LEN: usize = 50;

/// Metadata for a token representation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenMetadata {
    /// The same metadata, fitted to what cw20-base accepts.
    pub fn to_cw20(&self) -> TokenMetadata {
        TokenMetadata {
            name: cw20_name(&self.name),
            symbol: cw20_ticker(&self.symbol),
            decimals: self.decimals.min(MAX_DECIMALS),
        }
    }
}

/// Characters outside `[a-zA-Z-]` become `-`; short tickers are padded.
fn cw20_ticker(symbol: &str) -> String {
    let mut ticker: String = symbol
        .chars()
        .map(|c| if c.is_ascii_alphabetic() || c == '-' { c } else { '-' })
        .take(MAX_TICKER_LEN)
        .collect();
    while ticker.len() < MIN_TICKER_LEN {
        ticker.push('-');
    }
    ticker
}

/// Truncated on a char boundary to the byte limit, padded when short.
fn cw20_name(name: &str) -> String {
    let mut fitted = String::new();
    for c in name.chars() {
        if fitted.len() + c.len_utf8() > MAX_NAME_LEN {
            break;
        }
        fitted.push(c);
    }
    while fitted.len() < MIN_NAME_LEN {
        fitted.push('-');
    }
    fitted
}

/// Address a token instantiated by `deployer` with `salt` will receive.
pub fn predict_address(
    deps: Deps,
    deployer: &Addr,
    code_id: u64,
    salt: &[u8],
) -> StdResult<Addr> {
    let checksum = deps.querier.query_wasm_code_info(code_id)?.checksum;
    let creator = deps.api.addr_canonicalize(deployer.as_str())?;
    let canonical = instantiate2_address(checksum.as_slice(), &creator, salt)
        .map_err(|e| StdError::generic_err(format!("instantiate2 address: {}", e)))?;
    deps.api.addr_humanize(&canonical)
}

/// Build the instantiate message for a token minted by `deployer`.
///
/// Returns the predicted address together with the message; callers register
/// the address in the same transaction. Fails with `DeployCollision` when a
/// contract already lives at the address.
pub fn deploy_token(
    deps: Deps,
    deployer: &Addr,
    config: &Config,
    salt: &[u8],
    metadata: &TokenMetadata,
    initial_balances: Vec<Cw20Coin>,
) -> Result<(Addr, CosmosMsg), ContractError> {
    let address = predict_address(deps, deployer, config.token_code_id, salt)?;
    if deps.querier.query_wasm_contract_info(&address).is_ok() {
        return Err(ContractError::DeployCollision {
            address: address.to_string(),
        });
    }

    let cw20 = metadata.to_cw20();
    let msg = cw20_base::msg::InstantiateMsg {
        name: cw20.name,
        symbol: cw20.symbol,
        decimals: cw20.decimals,
        initial_balances,
        mint: Some(MinterResponse {
            minter: deployer.to_string(),
            cap: None,
        }),
        marketing: None,
    };

    let instantiate = CosmosMsg::Wasm(WasmMsg::Instantiate2 {
        admin: Some(deployer.to_string()),
        code_id: config.token_code_id,
        label: format!("linked token {}", metadata.symbol),
        msg: to_json_binary(&msg)?,
        funds: vec![],
        salt: Binary::from(salt),
    });

    Ok((address, instantiate))
}

/// Initial balance list for a fresh token; empty when nothing is minted.
pub fn initial_balance(owner: &Addr, amount: Uint128) -> Vec<Cw20Coin> {
    if amount.is_zero() {
        return vec![];
    }
    vec![Cw20Coin {
        address: owner.to_string(),
        amount,
    }]
}
