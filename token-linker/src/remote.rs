//! Remote linker bindings
//!
//! Each remote chain name maps to the linker expected to speak for it and to
//! whether that chain holds native gateway tokens.

use cosmwasm_std::{StdResult, Storage};

use crate::error::ContractError;
use crate::identity::GATEWAY_NAMESPACE;
use crate::state::{RemoteLinker, REMOTE_LINKERS};

/// Chain names share the id namespace with gateway symbols.
pub fn check_chain_name(chain: &str) -> Result<(), ContractError> {
    if chain == GATEWAY_NAMESPACE {
        return Err(ContractError::ReservedChainName {
            chain: chain.to_string(),
        });
    }
    if chain.is_empty() {
        return Err(ContractError::InvalidChainName {
            reason: "chain name must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Bind `chain` to `linker_address`, replacing any earlier binding.
pub fn set_remote_linker(
    storage: &mut dyn Storage,
    chain: &str,
    linker_address: String,
    gateway_supported: bool,
) -> Result<(), ContractError> {
    check_chain_name(chain)?;
    REMOTE_LINKERS.save(
        storage,
        chain,
        &RemoteLinker {
            linker_address,
            gateway_supported,
        },
    )?;
    Ok(())
}

/// True only when `chain` is bound and `claimed_sender` is its linker.
pub fn authenticate(storage: &dyn Storage, chain: &str, claimed_sender: &str) -> StdResult<bool> {
    Ok(REMOTE_LINKERS
        .may_load(storage, chain)?
        .map(|remote| remote.linker_address == claimed_sender)
        .unwrap_or(false))
}

pub fn is_gateway_supported(storage: &dyn Storage, chain: &str) -> StdResult<bool> {
    Ok(REMOTE_LINKERS
        .may_load(storage, chain)?
        .map(|remote| remote.gateway_supported)
        .unwrap_or(false))
}

pub fn set_gateway_supported(
    storage: &mut dyn Storage,
    chain: &str,
    supported: bool,
) -> Result<(), ContractError> {
    let mut remote = load_remote_linker(storage, chain)?;
    remote.gateway_supported = supported;
    REMOTE_LINKERS.save(storage, chain, &remote)?;
    Ok(())
}

pub fn load_remote_linker(storage: &dyn Storage, chain: &str) -> Result<RemoteLinker, ContractError> {
    REMOTE_LINKERS
        .may_load(storage, chain)?
        .ok_or_else(|| ContractError::RemoteChainNotRegistered {
            chain: chain.to_string(),
        })
}
