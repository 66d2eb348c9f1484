//! Token registration and remote deployment handlers.

use cosmwasm_std::{
    Addr, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response, Uint128,
};
use cw20::{Cw20QueryMsg, MinterResponse, TokenInfoResponse};

use common::{GatewayQueryMsg, TokenAddressResponse};

use crate::deployer::{deploy_token, initial_balance, TokenMetadata, MAX_DECIMALS};
use crate::error::ContractError;
use crate::execute::admin::ensure_admin;
use crate::execute::outbound::{call_contract, gas_coins, gas_from_funds, RemoteCall};
use crate::identity::{
    derive_gateway_id, derive_origin_id, interchain_token_salt, parse_token_id, token_id_to_hex,
    TokenId,
};
use crate::payload::LinkerMessage;
use crate::registry::{lookup, register};
use crate::remote::load_remote_linker;
use crate::state::{Config, TokenRecord, TransferMode, CONFIG};

// ============================================================================
// Helpers
// ============================================================================

/// Register a cw20 living on this chain; returns the id and stored record.
fn register_origin(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    token_address: &str,
) -> Result<(TokenId, TokenRecord), ContractError> {
    let token = deps.api.addr_validate(token_address)?;
    let minter: Option<MinterResponse> = deps
        .querier
        .query_wasm_smart(&token, &Cw20QueryMsg::Minter {})?;
    let transfer_mode = match minter {
        Some(minter) if minter.minter == env.contract.address.as_str() => TransferMode::MintBurn,
        _ => TransferMode::LockRelease,
    };

    let token_id = derive_origin_id(&config.chain_name, token.as_str());
    register(
        deps.storage,
        &token_id,
        &TokenRecord {
            token_address: token,
            transfer_mode,
            origin_chain: None,
            gateway_symbol: None,
        },
    )?;
    Ok((token_id, lookup(deps.storage, &token_id)?))
}

fn token_metadata(deps: Deps, record: &TokenRecord) -> Result<TokenMetadata, ContractError> {
    let info: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(&record.token_address, &Cw20QueryMsg::TokenInfo {})?;
    Ok(TokenMetadata {
        name: info.name,
        symbol: record.gateway_symbol.clone().unwrap_or(info.symbol),
        decimals: info.decimals,
    })
}

fn gateway_token_address(
    deps: Deps,
    config: &Config,
    symbol: &str,
) -> Result<Addr, ContractError> {
    let response: TokenAddressResponse = deps.querier.query_wasm_smart(
        &config.gateway,
        &GatewayQueryMsg::TokenAddress {
            symbol: symbol.to_string(),
        },
    )?;
    response
        .address
        .ok_or_else(|| ContractError::GatewayTokenNotFound {
            symbol: symbol.to_string(),
        })
}

/// One Deploy message per destination, each prepaid with its gas amount.
#[allow(clippy::too_many_arguments)]
fn deploy_remote(
    deps: Deps,
    env: &Env,
    config: &Config,
    token_id: &TokenId,
    record: &TokenRecord,
    metadata: TokenMetadata,
    destination_chains: &[String],
    gas_amounts: &[Uint128],
    funds: &[Coin],
    refund_address: &str,
) -> Result<Vec<CosmosMsg>, ContractError> {
    if destination_chains.len() != gas_amounts.len() {
        return Err(ContractError::LengthMismatch {
            chains: destination_chains.len(),
            gas_amounts: gas_amounts.len(),
        });
    }
    if !record.is_origin() {
        return Err(ContractError::NotOriginToken {
            token_id: token_id_to_hex(token_id),
        });
    }

    let paid = gas_from_funds(funds, &config.gas_denom)?;
    let expected = gas_amounts
        .iter()
        .try_fold(Uint128::zero(), |total, gas| total.checked_add(*gas))
        .map_err(|_| ContractError::InvalidAmount {
            reason: "gas amounts overflow".to_string(),
        })?;
    if paid != expected {
        return Err(ContractError::GasPaymentMismatch { expected, got: paid });
    }

    let payload = LinkerMessage::Deploy {
        token_id: *token_id,
        name: metadata.name,
        symbol: metadata.symbol,
        decimals: metadata.decimals,
    }
    .encode();

    let mut messages = vec![];
    for (chain, gas) in destination_chains.iter().zip(gas_amounts) {
        let remote = load_remote_linker(deps.storage, chain)?;
        if record.gateway_symbol.is_some() && remote.gateway_supported {
            return Err(ContractError::GatewaySupportedDestination {
                chain: chain.clone(),
            });
        }
        messages.extend(call_contract(
            config,
            &env.contract.address,
            RemoteCall {
                destination_chain: chain,
                destination_address: &remote.linker_address,
                payload: payload.clone(),
            },
            gas_coins(&config.gas_denom, *gas),
            refund_address,
        )?);
    }
    Ok(messages)
}

fn registration_response(action: &str, token_id: &TokenId, record: &TokenRecord) -> Response {
    Response::new()
        .add_attribute("action", action)
        .add_attribute("token_id", token_id_to_hex(token_id))
        .add_attribute("token_address", record.token_address.to_string())
        .add_attribute("transfer_mode", record.transfer_mode.as_str())
}

// ============================================================================
// Handlers
// ============================================================================

pub fn execute_register_origin_token(
    deps: DepsMut,
    env: Env,
    token_address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let (token_id, record) = register_origin(deps, &env, &config, &token_address)?;
    Ok(registration_response("register_origin_token", &token_id, &record))
}

pub fn execute_deploy_remote_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: Binary,
    destination_chains: Vec<String>,
    gas_amounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let token_id = parse_token_id(&token_id)?;
    let record = lookup(deps.storage, &token_id)?;
    let metadata = token_metadata(deps.as_ref(), &record)?;

    let messages = deploy_remote(
        deps.as_ref(),
        &env,
        &config,
        &token_id,
        &record,
        metadata,
        &destination_chains,
        &gas_amounts,
        &info.funds,
        info.sender.as_str(),
    )?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "deploy_remote_tokens")
        .add_attribute("token_id", token_id_to_hex(&token_id))
        .add_attribute("destination_chains", destination_chains.join(",")))
}

pub fn execute_register_origin_token_and_deploy_remote_tokens(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_address: String,
    destination_chains: Vec<String>,
    gas_amounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let (token_id, record) = register_origin(deps.branch(), &env, &config, &token_address)?;
    let metadata = token_metadata(deps.as_ref(), &record)?;

    let messages = deploy_remote(
        deps.as_ref(),
        &env,
        &config,
        &token_id,
        &record,
        metadata,
        &destination_chains,
        &gas_amounts,
        &info.funds,
        info.sender.as_str(),
    )?;

    Ok(
        registration_response("register_origin_token_and_deploy_remote_tokens", &token_id, &record)
            .add_messages(messages)
            .add_attribute("destination_chains", destination_chains.join(",")),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn execute_deploy_interchain_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    metadata: TokenMetadata,
    owner: String,
    initial_supply: Uint128,
    salt: Binary,
    destination_chains: Vec<String>,
    gas_amounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let owner = deps.api.addr_validate(&owner)?;
    // the local token is the origin, so it must hold exactly this metadata
    if metadata.decimals > MAX_DECIMALS {
        return Err(ContractError::InvalidMetadata {
            reason: format!("decimals must not exceed {}", MAX_DECIMALS),
        });
    }
    let salt = interchain_token_salt(info.sender.as_str(), salt.as_slice());

    let (token_address, instantiate) = deploy_token(
        deps.as_ref(),
        &env.contract.address,
        &config,
        &salt,
        &metadata,
        initial_balance(&owner, initial_supply),
    )?;

    let token_id = derive_origin_id(&config.chain_name, token_address.as_str());
    let record = TokenRecord {
        token_address,
        transfer_mode: TransferMode::MintBurn,
        origin_chain: None,
        gateway_symbol: None,
    };
    register(deps.storage, &token_id, &record)?;

    // The token is not instantiated yet, so metadata comes from the request
    let remote = deploy_remote(
        deps.as_ref(),
        &env,
        &config,
        &token_id,
        &record,
        metadata,
        &destination_chains,
        &gas_amounts,
        &info.funds,
        info.sender.as_str(),
    )?;

    Ok(registration_response("deploy_interchain_token", &token_id, &record)
        .add_message(instantiate)
        .add_messages(remote)
        .add_attribute("owner", owner)
        .add_attribute("initial_supply", initial_supply))
}

pub fn execute_register_origin_gateway_token(
    deps: DepsMut,
    info: MessageInfo,
    symbol: String,
) -> Result<Response, ContractError> {
    let config = ensure_admin(deps.as_ref(), &info)?;
    let token_address = gateway_token_address(deps.as_ref(), &config, &symbol)?;

    let token_id = derive_gateway_id(&symbol);
    let record = TokenRecord {
        token_address,
        transfer_mode: TransferMode::GatewayNative,
        origin_chain: None,
        gateway_symbol: Some(symbol.clone()),
    };
    register(deps.storage, &token_id, &record)?;

    Ok(registration_response("register_origin_gateway_token", &token_id, &record)
        .add_attribute("symbol", symbol))
}

pub fn execute_register_remote_gateway_token(
    deps: DepsMut,
    info: MessageInfo,
    symbol: String,
    token_id: Binary,
    origin_chain: String,
) -> Result<Response, ContractError> {
    let config = ensure_admin(deps.as_ref(), &info)?;
    let token_id = parse_token_id(&token_id)?;
    let expected = derive_gateway_id(&symbol);
    if token_id != expected {
        return Err(ContractError::TokenIdMismatch {
            expected: token_id_to_hex(&expected),
            got: token_id_to_hex(&token_id),
        });
    }
    load_remote_linker(deps.storage, &origin_chain)?;
    let token_address = gateway_token_address(deps.as_ref(), &config, &symbol)?;

    let record = TokenRecord {
        token_address,
        transfer_mode: TransferMode::GatewayNative,
        origin_chain: Some(origin_chain.clone()),
        gateway_symbol: Some(symbol.clone()),
    };
    register(deps.storage, &token_id, &record)?;

    Ok(registration_response("register_remote_gateway_token", &token_id, &record)
        .add_attribute("symbol", symbol)
        .add_attribute("origin_chain", origin_chain))
}
