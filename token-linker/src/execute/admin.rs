//! Admin handlers for remote linker bindings.

use cosmwasm_std::{Deps, DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::remote::{set_gateway_supported, set_remote_linker};
use crate::state::{Config, CONFIG};

/// Load the config, failing unless the caller is the admin.
pub fn ensure_admin(deps: Deps, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

/// Bind or re-point a remote chain's linker.
///
/// Re-pointing takes effect immediately: messages from the previous linker
/// are rejected from then on.
pub fn execute_set_remote_linker(
    deps: DepsMut,
    info: MessageInfo,
    chain: String,
    linker_address: String,
    gateway_supported: bool,
) -> Result<Response, ContractError> {
    let config = ensure_admin(deps.as_ref(), &info)?;
    if chain == config.chain_name {
        return Err(ContractError::InvalidChainName {
            reason: format!("{} is this chain", chain),
        });
    }
    set_remote_linker(deps.storage, &chain, linker_address.clone(), gateway_supported)?;

    Ok(Response::new()
        .add_attribute("action", "set_remote_linker")
        .add_attribute("chain", chain)
        .add_attribute("linker_address", linker_address)
        .add_attribute("gateway_supported", gateway_supported.to_string()))
}

fn update_gateway_supported(
    deps: DepsMut,
    info: MessageInfo,
    chains: Vec<String>,
    supported: bool,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    for chain in &chains {
        set_gateway_supported(deps.storage, chain, supported)?;
    }

    let action = if supported {
        "add_gateway_supported_chains"
    } else {
        "remove_gateway_supported_chains"
    };
    Ok(Response::new()
        .add_attribute("action", action)
        .add_attribute("chains", chains.join(",")))
}

pub fn execute_add_gateway_supported_chains(
    deps: DepsMut,
    info: MessageInfo,
    chains: Vec<String>,
) -> Result<Response, ContractError> {
    update_gateway_supported(deps, info, chains, true)
}

pub fn execute_remove_gateway_supported_chains(
    deps: DepsMut,
    info: MessageInfo,
    chains: Vec<String>,
) -> Result<Response, ContractError> {
    update_gateway_supported(deps, info, chains, false)
}
