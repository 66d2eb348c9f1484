//! Query handlers for the Token Linker contract.

use cosmwasm_std::{Binary, Deps, Env, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use crate::deployer::predict_address;
use crate::identity::{
    derive_gateway_id, derive_origin_id, interchain_token_salt, parse_token_id, TokenId,
};
use crate::msg::{
    AddressResponse, ConfigResponse, DerivedIdResponse, RemoteLinkerResponse,
    RemoteLinkersResponse, TokenAddressResponse, TokenIdResponse, TokenResponse, TokensResponse,
};
use crate::state::{RemoteLinker, TokenRecord, CONFIG, REMOTE_LINKERS, TOKENS, TOKEN_IDS};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

fn to_token_id(token_id: &Binary) -> StdResult<TokenId> {
    parse_token_id(token_id).map_err(|e| StdError::generic_err(e.to_string()))
}

fn token_response(token_id: &[u8], record: TokenRecord) -> TokenResponse {
    TokenResponse {
        token_id: Binary::from(token_id),
        token_address: record.token_address,
        transfer_mode: record.transfer_mode,
        origin_chain: record.origin_chain,
        gateway_symbol: record.gateway_symbol,
    }
}

fn remote_linker_response(chain: String, remote: RemoteLinker) -> RemoteLinkerResponse {
    RemoteLinkerResponse {
        chain,
        linker_address: remote.linker_address,
        gateway_supported: remote.gateway_supported,
    }
}

// ============================================================================
// Configuration
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        chain_name: config.chain_name,
        gateway: config.gateway,
        gas_service: config.gas_service,
        gas_denom: config.gas_denom,
        token_code_id: config.token_code_id,
    })
}

// ============================================================================
// Token Registry
// ============================================================================

pub fn query_token_address(deps: Deps, token_id: Binary) -> StdResult<TokenAddressResponse> {
    let id = to_token_id(&token_id)?;
    let token_address = TOKENS
        .may_load(deps.storage, id.as_slice())?
        .map(|record| record.token_address);
    Ok(TokenAddressResponse {
        token_id,
        token_address,
    })
}

pub fn query_token_id(deps: Deps, token_address: String) -> StdResult<TokenIdResponse> {
    let token_address = deps.api.addr_validate(&token_address)?;
    let token_id = TOKEN_IDS
        .may_load(deps.storage, &token_address)?
        .map(|id| Binary::from(id.to_vec()));
    Ok(TokenIdResponse {
        token_address,
        token_id,
    })
}

pub fn query_token(deps: Deps, token_id: Binary) -> StdResult<Option<TokenResponse>> {
    let id = to_token_id(&token_id)?;
    Ok(TOKENS
        .may_load(deps.storage, id.as_slice())?
        .map(|record| token_response(&id, record)))
}

pub fn query_tokens(
    deps: Deps,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<TokensResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_after = start_after.map(|id| id.to_vec());
    let start = start_after.as_deref().map(Bound::exclusive);

    let tokens = TOKENS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (token_id, record) = item?;
            Ok(token_response(&token_id, record))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TokensResponse { tokens })
}

// ============================================================================
// Identity
// ============================================================================

pub fn query_origin_token_id(deps: Deps, token_address: String) -> StdResult<DerivedIdResponse> {
    let config = CONFIG.load(deps.storage)?;
    let token_id = derive_origin_id(&config.chain_name, &token_address);
    Ok(DerivedIdResponse {
        token_id: Binary::from(token_id.to_vec()),
    })
}

pub fn query_gateway_token_id(symbol: String) -> StdResult<DerivedIdResponse> {
    Ok(DerivedIdResponse {
        token_id: Binary::from(derive_gateway_id(&symbol).to_vec()),
    })
}

// ============================================================================
// Remote Linkers
// ============================================================================

pub fn query_remote_linker(deps: Deps, chain: String) -> StdResult<Option<RemoteLinkerResponse>> {
    Ok(REMOTE_LINKERS
        .may_load(deps.storage, &chain)?
        .map(|remote| remote_linker_response(chain, remote)))
}

pub fn query_remote_linkers(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<RemoteLinkersResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let linkers = REMOTE_LINKERS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (chain, remote) = item?;
            Ok(remote_linker_response(chain, remote))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(RemoteLinkersResponse { linkers })
}

// ============================================================================
// Address Prediction
// ============================================================================

pub fn query_predict_token_address(deps: Deps, env: Env, salt: Binary) -> StdResult<AddressResponse> {
    let config = CONFIG.load(deps.storage)?;
    let address = predict_address(
        deps,
        &env.contract.address,
        config.token_code_id,
        salt.as_slice(),
    )?;
    Ok(AddressResponse { address })
}

pub fn query_wrapped_token_address(
    deps: Deps,
    env: Env,
    token_id: Binary,
) -> StdResult<AddressResponse> {
    let id = to_token_id(&token_id)?;
    query_predict_token_address(deps, env, Binary::from(id.to_vec()))
}

pub fn query_interchain_token_address(
    deps: Deps,
    env: Env,
    sender: String,
    salt: Binary,
) -> StdResult<AddressResponse> {
    let sender = deps.api.addr_validate(&sender)?;
    let salt = interchain_token_salt(sender.as_str(), salt.as_slice());
    query_predict_token_address(deps, env, Binary::from(salt.to_vec()))
}
