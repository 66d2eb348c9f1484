//! Token Linker - Entry Points
//!
//! Handlers live in `execute/` and `query`; this module only validates
//! instantiation and dispatches.

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, StdResult,
};
use cw2::set_contract_version;

use crate::deployer::TokenMetadata;
use crate::error::ContractError;
use crate::execute::{
    execute_add_gateway_supported_chains, execute_deploy_interchain_token,
    execute_deploy_remote_tokens, execute_inbound, execute_receive,
    execute_register_origin_gateway_token, execute_register_origin_token,
    execute_register_origin_token_and_deploy_remote_tokens, execute_register_remote_gateway_token,
    execute_remove_gateway_supported_chains, execute_send_token, execute_send_token_with_data,
    execute_set_remote_linker, reply_callback, DeliveredTokens,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_gateway_token_id, query_interchain_token_address, query_origin_token_id,
    query_predict_token_address, query_remote_linker, query_remote_linkers, query_token,
    query_token_address, query_token_id, query_tokens, query_wrapped_token_address,
};
use crate::remote::check_chain_name;
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, REPLY_CALLBACK};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    check_chain_name(&msg.chain_name)?;

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        chain_name: msg.chain_name,
        gateway: deps.api.addr_validate(&msg.gateway)?,
        gas_service: deps.api.addr_validate(&msg.gas_service)?,
        gas_denom: msg.gas_denom,
        token_code_id: msg.token_code_id,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("chain_name", config.chain_name)
        .add_attribute("gateway", config.gateway)
        .add_attribute("token_code_id", config.token_code_id.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Remote linkers
        ExecuteMsg::SetRemoteLinker {
            chain,
            linker_address,
            gateway_supported,
        } => execute_set_remote_linker(deps, info, chain, linker_address, gateway_supported),
        ExecuteMsg::AddGatewaySupportedChains { chains } => {
            execute_add_gateway_supported_chains(deps, info, chains)
        }
        ExecuteMsg::RemoveGatewaySupportedChains { chains } => {
            execute_remove_gateway_supported_chains(deps, info, chains)
        }

        // Registration & deployment
        ExecuteMsg::RegisterOriginToken { token_address } => {
            execute_register_origin_token(deps, env, token_address)
        }
        ExecuteMsg::DeployRemoteTokens {
            token_id,
            destination_chains,
            gas_amounts,
        } => execute_deploy_remote_tokens(
            deps,
            env,
            info,
            token_id,
            destination_chains,
            gas_amounts,
        ),
        ExecuteMsg::RegisterOriginTokenAndDeployRemoteTokens {
            token_address,
            destination_chains,
            gas_amounts,
        } => execute_register_origin_token_and_deploy_remote_tokens(
            deps,
            env,
            info,
            token_address,
            destination_chains,
            gas_amounts,
        ),
        ExecuteMsg::DeployInterchainToken {
            name,
            symbol,
            decimals,
            owner,
            initial_supply,
            salt,
            destination_chains,
            gas_amounts,
        } => execute_deploy_interchain_token(
            deps,
            env,
            info,
            TokenMetadata {
                name,
                symbol,
                decimals,
            },
            owner,
            initial_supply,
            salt,
            destination_chains,
            gas_amounts,
        ),
        ExecuteMsg::RegisterOriginGatewayToken { symbol } => {
            execute_register_origin_gateway_token(deps, info, symbol)
        }
        ExecuteMsg::RegisterRemoteGatewayToken {
            symbol,
            token_id,
            origin_chain,
        } => execute_register_remote_gateway_token(deps, info, symbol, token_id, origin_chain),

        // Transfers
        ExecuteMsg::SendToken {
            token_id,
            destination_chain,
            recipient,
            amount,
        } => execute_send_token(
            deps,
            env,
            info,
            token_id,
            destination_chain,
            recipient,
            amount,
        ),
        ExecuteMsg::SendTokenWithData {
            token_id,
            destination_chain,
            destination_contract,
            amount,
            data,
        } => execute_send_token_with_data(
            deps,
            env,
            info,
            token_id,
            destination_chain,
            destination_contract,
            amount,
            data,
        ),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),

        // Inbound
        ExecuteMsg::Execute {
            source_chain,
            source_address,
            payload,
        } => execute_inbound(deps, env, info, source_chain, source_address, payload, None),
        ExecuteMsg::ExecuteWithToken {
            source_chain,
            source_address,
            payload,
            symbol,
            amount,
        } => execute_inbound(
            deps,
            env,
            info,
            source_chain,
            source_address,
            payload,
            Some(DeliveredTokens { symbol, amount }),
        ),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        REPLY_CALLBACK => reply_callback(msg),
        id => Err(StdError::generic_err(format!("Unknown reply id: {}", id)).into()),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::TokenAddress { token_id } => to_json_binary(&query_token_address(deps, token_id)?),
        QueryMsg::TokenId { token_address } => to_json_binary(&query_token_id(deps, token_address)?),
        QueryMsg::Token { token_id } => to_json_binary(&query_token(deps, token_id)?),
        QueryMsg::Tokens { start_after, limit } => {
            to_json_binary(&query_tokens(deps, start_after, limit)?)
        }
        QueryMsg::OriginTokenId { token_address } => {
            to_json_binary(&query_origin_token_id(deps, token_address)?)
        }
        QueryMsg::GatewayTokenId { symbol } => to_json_binary(&query_gateway_token_id(symbol)?),
        QueryMsg::RemoteLinker { chain } => to_json_binary(&query_remote_linker(deps, chain)?),
        QueryMsg::RemoteLinkers { start_after, limit } => {
            to_json_binary(&query_remote_linkers(deps, start_after, limit)?)
        }
        QueryMsg::PredictTokenAddress { salt } => {
            to_json_binary(&query_predict_token_address(deps, env, salt)?)
        }
        QueryMsg::WrappedTokenAddress { token_id } => {
            to_json_binary(&query_wrapped_token_address(deps, env, token_id)?)
        }
        QueryMsg::InterchainTokenAddress { sender, salt } => {
            to_json_binary(&query_interchain_token_address(deps, env, sender, salt)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
