//! Outbound transfers.
//!
//! Value leaves according to the token's transfer mode:
//! - `MintBurn`: burned here, minted on the destination
//! - `LockRelease`: locked in linker custody, released when it comes back
//! - `GatewayNative`: moved by the gateway itself towards gateway supported
//!   chains, locked at the origin for chains without the gateway token
//!
//! Gateway tokens only ever reach unsupported chains through their origin,
//! which holds the custody backing every wrapped representation.

use cosmwasm_std::{
    from_json, Addr, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response,
    Uint128,
};
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};

use crate::error::ContractError;
use crate::execute::outbound::{
    call_contract, call_contract_with_token, check_balance_and_allowance, cw20_execute,
    gas_coins, gas_from_funds, RemoteCall,
};
use crate::identity::{parse_token_id, token_id_to_hex, TokenId};
use crate::msg::ReceiveMsg;
use crate::payload::LinkerMessage;
use crate::registry::{lookup, lookup_reverse};
use crate::remote::load_remote_linker;
use crate::state::{Config, TokenRecord, TransferMode, CONFIG};

/// Where the debited tokens are
pub enum Funding {
    /// Still with the owner, pulled through the linker's allowance
    Allowance(Addr),
    /// Already in the linker's balance
    Held,
}

/// A transfer leaving this chain
pub struct OutboundTransfer {
    pub token_id: TokenId,
    pub destination_chain: String,
    pub recipient: String,
    pub amount: Uint128,
    /// Callback data; the recipient is also the callback target
    pub data: Option<Binary>,
}

impl OutboundTransfer {
    fn transfer_message(&self) -> LinkerMessage {
        match &self.data {
            Some(data) => LinkerMessage::TransferWithData {
                token_id: self.token_id,
                recipient: self.recipient.clone(),
                amount: self.amount,
                target: self.recipient.clone(),
                data: data.clone(),
            },
            None => LinkerMessage::Transfer {
                token_id: self.token_id,
                recipient: self.recipient.clone(),
                amount: self.amount,
            },
        }
    }

    fn forward_message(&self) -> Result<LinkerMessage, ContractError> {
        self.reject_data("forwarded through the origin")?;
        Ok(LinkerMessage::ForwardToken {
            token_id: self.token_id,
            destination_chain: self.destination_chain.clone(),
            recipient: self.recipient.clone(),
            amount: self.amount,
        })
    }

    /// Message travelling with gateway tokens; the destination hands on
    /// what the gateway delivered instead of minting or releasing.
    fn gateway_message(&self) -> LinkerMessage {
        match self.data {
            Some(_) => self.transfer_message(),
            None => LinkerMessage::SelfGiveToken {
                token_id: self.token_id,
                recipient: self.recipient.clone(),
                amount: self.amount,
            },
        }
    }

    fn reject_data(&self, route: &str) -> Result<(), ContractError> {
        if self.data.is_some() {
            return Err(ContractError::UnsupportedRoute {
                reason: format!(
                    "transfers to {} are {} and cannot carry data",
                    self.destination_chain, route
                ),
            });
        }
        Ok(())
    }
}

fn validate_amount(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}

fn gateway_symbol(record: &TokenRecord) -> Result<&str, ContractError> {
    record
        .gateway_symbol
        .as_deref()
        .ok_or_else(|| ContractError::GatewayTokenNotFound {
            symbol: record.token_address.to_string(),
        })
}

/// Debit `transfer` from `funding` and hand the matching message to the
/// gateway. `gas` is attached to the first outbound call.
#[allow(clippy::too_many_arguments)]
pub fn route_transfer(
    deps: Deps,
    env: &Env,
    config: &Config,
    record: &TokenRecord,
    transfer: &OutboundTransfer,
    funding: &Funding,
    gas: Vec<Coin>,
    refund_address: &str,
) -> Result<Vec<CosmosMsg>, ContractError> {
    let linker = &env.contract.address;
    let token = &record.token_address;
    let destination = load_remote_linker(deps.storage, &transfer.destination_chain)?;
    let mut messages = vec![];

    match record.transfer_mode {
        TransferMode::MintBurn => {
            messages.push(match funding {
                Funding::Allowance(owner) => cw20_execute(
                    token,
                    &Cw20ExecuteMsg::BurnFrom {
                        owner: owner.to_string(),
                        amount: transfer.amount,
                    },
                )?,
                Funding::Held => cw20_execute(
                    token,
                    &Cw20ExecuteMsg::Burn {
                        amount: transfer.amount,
                    },
                )?,
            });

            // Wrapped gateway token heading to a chain holding the native
            // token: the origin releases it from custody.
            let detour = match (&record.gateway_symbol, &record.origin_chain) {
                (Some(_), Some(origin))
                    if destination.gateway_supported && *origin != transfer.destination_chain =>
                {
                    Some(origin)
                }
                _ => None,
            };

            let call = match detour {
                Some(origin) => {
                    let origin_linker = load_remote_linker(deps.storage, origin)?;
                    call_contract(
                        config,
                        linker,
                        RemoteCall {
                            destination_chain: origin,
                            destination_address: &origin_linker.linker_address,
                            payload: transfer.forward_message()?.encode(),
                        },
                        gas,
                        refund_address,
                    )?
                }
                None => call_contract(
                    config,
                    linker,
                    RemoteCall {
                        destination_chain: &transfer.destination_chain,
                        destination_address: &destination.linker_address,
                        payload: transfer.transfer_message().encode(),
                    },
                    gas,
                    refund_address,
                )?,
            };
            messages.extend(call);
        }
        TransferMode::LockRelease => {
            messages.extend(pull_into_custody(token, linker, transfer.amount, funding)?);
            messages.extend(call_contract(
                config,
                linker,
                RemoteCall {
                    destination_chain: &transfer.destination_chain,
                    destination_address: &destination.linker_address,
                    payload: transfer.transfer_message().encode(),
                },
                gas,
                refund_address,
            )?);
        }
        TransferMode::GatewayNative => {
            let symbol = gateway_symbol(record)?;
            messages.extend(pull_into_custody(token, linker, transfer.amount, funding)?);

            if destination.gateway_supported {
                messages.extend(call_contract_with_token(
                    config,
                    linker,
                    RemoteCall {
                        destination_chain: &transfer.destination_chain,
                        destination_address: &destination.linker_address,
                        payload: transfer.gateway_message().encode(),
                    },
                    token,
                    symbol,
                    transfer.amount,
                    gas,
                    refund_address,
                )?);
            } else if let Some(origin) = &record.origin_chain {
                let origin_linker = load_remote_linker(deps.storage, origin)?;
                messages.extend(call_contract_with_token(
                    config,
                    linker,
                    RemoteCall {
                        destination_chain: origin,
                        destination_address: &origin_linker.linker_address,
                        payload: transfer.forward_message()?.encode(),
                    },
                    token,
                    symbol,
                    transfer.amount,
                    gas,
                    refund_address,
                )?);
            } else {
                // origin custody backs the wrapped supply
                messages.extend(call_contract(
                    config,
                    linker,
                    RemoteCall {
                        destination_chain: &transfer.destination_chain,
                        destination_address: &destination.linker_address,
                        payload: transfer.transfer_message().encode(),
                    },
                    gas,
                    refund_address,
                )?);
            }
        }
    }

    Ok(messages)
}

fn pull_into_custody(
    token: &Addr,
    linker: &Addr,
    amount: Uint128,
    funding: &Funding,
) -> Result<Vec<CosmosMsg>, ContractError> {
    match funding {
        Funding::Allowance(owner) => Ok(vec![cw20_execute(
            token,
            &Cw20ExecuteMsg::TransferFrom {
                owner: owner.to_string(),
                recipient: linker.to_string(),
                amount,
            },
        )?]),
        Funding::Held => Ok(vec![]),
    }
}

fn send_response(
    action: &str,
    record: &TokenRecord,
    transfer: &OutboundTransfer,
    messages: Vec<CosmosMsg>,
) -> Response {
    Response::new()
        .add_messages(messages)
        .add_attribute("action", action)
        .add_attribute("token_id", token_id_to_hex(&transfer.token_id))
        .add_attribute("token_address", record.token_address.to_string())
        .add_attribute("transfer_mode", record.transfer_mode.as_str())
        .add_attribute("destination_chain", transfer.destination_chain.clone())
        .add_attribute("recipient", transfer.recipient.clone())
        .add_attribute("amount", transfer.amount)
}

/// Shared path for `SendToken` and `SendTokenWithData`: the caller approved
/// the linker beforehand.
fn send_from_allowance(
    deps: Deps,
    env: Env,
    info: MessageInfo,
    action: &str,
    transfer: OutboundTransfer,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let record = lookup(deps.storage, &transfer.token_id)?;
    validate_amount(transfer.amount)?;
    let gas = gas_from_funds(&info.funds, &config.gas_denom)?;

    check_balance_and_allowance(
        &deps.querier,
        &record.token_address,
        &info.sender,
        &env.contract.address,
        transfer.amount,
    )?;

    let messages = route_transfer(
        deps,
        &env,
        &config,
        &record,
        &transfer,
        &Funding::Allowance(info.sender.clone()),
        gas_coins(&config.gas_denom, gas),
        info.sender.as_str(),
    )?;

    Ok(send_response(action, &record, &transfer, messages).add_attribute("sender", info.sender))
}

pub fn execute_send_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: Binary,
    destination_chain: String,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let transfer = OutboundTransfer {
        token_id: parse_token_id(&token_id)?,
        destination_chain,
        recipient,
        amount,
        data: None,
    };
    send_from_allowance(deps.as_ref(), env, info, "send_token", transfer)
}

#[allow(clippy::too_many_arguments)]
pub fn execute_send_token_with_data(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: Binary,
    destination_chain: String,
    destination_contract: String,
    amount: Uint128,
    data: Binary,
) -> Result<Response, ContractError> {
    let transfer = OutboundTransfer {
        token_id: parse_token_id(&token_id)?,
        destination_chain,
        recipient: destination_contract,
        amount,
        data: Some(data),
    };
    send_from_allowance(deps.as_ref(), env, info, "send_token_with_data", transfer)
}

/// cw20 `Send` to the linker; the sending contract identifies the token.
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let token_id = lookup_reverse(deps.storage, &info.sender)?;
    let record = lookup(deps.storage, &token_id)?;
    let sender = deps.api.addr_validate(&cw20_msg.sender)?;
    validate_amount(cw20_msg.amount)?;

    let (action, transfer) = match from_json(&cw20_msg.msg)? {
        ReceiveMsg::SendToken {
            destination_chain,
            recipient,
        } => (
            "send_token",
            OutboundTransfer {
                token_id,
                destination_chain,
                recipient,
                amount: cw20_msg.amount,
                data: None,
            },
        ),
        ReceiveMsg::SendTokenWithData {
            destination_chain,
            destination_contract,
            data,
        } => (
            "send_token_with_data",
            OutboundTransfer {
                token_id,
                destination_chain,
                recipient: destination_contract,
                amount: cw20_msg.amount,
                data: Some(data),
            },
        ),
    };

    let messages = route_transfer(
        deps.as_ref(),
        &env,
        &config,
        &record,
        &transfer,
        &Funding::Held,
        vec![],
        sender.as_str(),
    )?;

    Ok(send_response(action, &record, &transfer, messages).add_attribute("sender", sender))
}
