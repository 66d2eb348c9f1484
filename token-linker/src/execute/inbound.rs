//! Inbound messages delivered by the gateway.
//!
//! Order of checks: the caller must be the configured gateway, the claimed
//! source must be the registered remote linker, and only then is the payload
//! decoded. Any failure reverts the whole delivery.

use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, DepsMut, Env, Event, MessageInfo, Reply, Response,
    StdError, SubMsg, SubMsgResult, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use common::InterchainTokenExecutableMsg;

use crate::deployer::{deploy_token, TokenMetadata};
use crate::error::ContractError;
use crate::execute::outbound::cw20_execute;
use crate::execute::send::{route_transfer, Funding, OutboundTransfer};
use crate::identity::{derive_gateway_id, token_id_to_hex, TokenId};
use crate::payload::LinkerMessage;
use crate::registry::{lookup, register};
use crate::remote::{authenticate, is_gateway_supported};
use crate::state::{Config, TokenRecord, TransferMode, CONFIG, REPLY_CALLBACK, TOKENS};

/// Gateway tokens credited to the linker together with the message
pub struct DeliveredTokens {
    pub symbol: String,
    pub amount: Uint128,
}

pub fn execute_inbound(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    source_chain: String,
    source_address: String,
    payload: Binary,
    delivered: Option<DeliveredTokens>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.gateway {
        return Err(ContractError::NotGateway);
    }
    if !authenticate(deps.storage, &source_chain, &source_address)? {
        return Err(ContractError::Unauthenticated {
            source_chain,
            source_address,
        });
    }

    let message = LinkerMessage::decode(payload.as_slice())?;
    let kind = message.kind();
    let token_id = *message.token_id();

    let response = match (message, delivered) {
        (
            LinkerMessage::Deploy {
                token_id,
                name,
                symbol,
                decimals,
            },
            None,
        ) => handle_deploy(
            deps,
            &env,
            &config,
            &source_chain,
            token_id,
            TokenMetadata {
                name,
                symbol,
                decimals,
            },
        )?,
        (
            LinkerMessage::Transfer {
                token_id,
                recipient,
                amount,
            },
            None,
        ) => {
            let record = lookup(deps.storage, &token_id)?;
            let recipient = deps.api.addr_validate(&recipient)?;
            Response::new()
                .add_message(credit(&record, &recipient, amount)?)
                .add_attribute("recipient", recipient)
                .add_attribute("amount", amount)
        }
        (
            LinkerMessage::TransferWithData {
                token_id,
                recipient,
                amount,
                target,
                data,
            },
            delivered,
        ) => {
            let record = lookup(deps.storage, &token_id)?;
            let recipient = deps.api.addr_validate(&recipient)?;
            let target = deps.api.addr_validate(&target)?;
            // gateway tokens already sit with the linker; hand them on
            let credit_msg = match &delivered {
                Some(delivered) => {
                    check_delivered(&record, delivered, amount)?;
                    cw20_execute(
                        &record.token_address,
                        &Cw20ExecuteMsg::Transfer {
                            recipient: recipient.to_string(),
                            amount,
                        },
                    )?
                }
                None => credit(&record, &recipient, amount)?,
            };
            let callback = WasmMsg::Execute {
                contract_addr: target.to_string(),
                msg: to_json_binary(&InterchainTokenExecutableMsg::ExecuteWithInterchainToken {
                    source_chain: source_chain.clone(),
                    token_id: Binary::from(token_id.to_vec()),
                    token: record.token_address.to_string(),
                    amount,
                    data,
                })?,
                funds: vec![],
            };
            Response::new()
                .add_message(credit_msg)
                .add_submessage(SubMsg::reply_on_error(callback, REPLY_CALLBACK))
                .add_attribute("recipient", recipient)
                .add_attribute("target", target)
                .add_attribute("amount", amount)
        }
        (
            LinkerMessage::SelfGiveToken {
                token_id,
                recipient,
                amount,
            },
            Some(delivered),
        ) => {
            let record = lookup(deps.storage, &token_id)?;
            check_delivered(&record, &delivered, amount)?;
            let recipient = deps.api.addr_validate(&recipient)?;
            Response::new()
                .add_message(cw20_execute(
                    &record.token_address,
                    &Cw20ExecuteMsg::Transfer {
                        recipient: recipient.to_string(),
                        amount,
                    },
                )?)
                .add_attribute("recipient", recipient)
                .add_attribute("amount", amount)
        }
        (
            LinkerMessage::ForwardToken {
                token_id,
                destination_chain,
                recipient,
                amount,
            },
            delivered,
        ) => handle_forward(
            deps,
            &env,
            &config,
            &source_chain,
            OutboundTransfer {
                token_id,
                destination_chain,
                recipient,
                amount,
                data: None,
            },
            delivered,
        )?,
        (LinkerMessage::SelfGiveToken { .. }, None) => {
            return Err(ContractError::invalid_payload(
                "self_give_token must arrive with gateway tokens",
            ))
        }
        (message, Some(_)) => {
            return Err(ContractError::invalid_payload(format!(
                "{} cannot carry gateway tokens",
                message.kind()
            )))
        }
    };

    Ok(response
        .add_attribute("action", "execute")
        .add_attribute("message_type", kind)
        .add_attribute("source_chain", source_chain)
        .add_attribute("token_id", token_id_to_hex(&token_id)))
}

/// Deploy is idempotent: a second delivery for a known id changes nothing.
fn handle_deploy(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    source_chain: &str,
    token_id: TokenId,
    metadata: TokenMetadata,
) -> Result<Response, ContractError> {
    if TOKENS.has(deps.storage, token_id.as_slice()) {
        return Ok(Response::new().add_attribute("status", "already_registered"));
    }

    let (token_address, instantiate) = deploy_token(
        deps.as_ref(),
        &env.contract.address,
        config,
        &token_id,
        &metadata,
        vec![],
    )?;

    let gateway_symbol =
        (derive_gateway_id(&metadata.symbol) == token_id).then(|| metadata.symbol.clone());
    let record = TokenRecord {
        token_address: token_address.clone(),
        transfer_mode: TransferMode::MintBurn,
        origin_chain: Some(source_chain.to_string()),
        gateway_symbol,
    };
    register(deps.storage, &token_id, &record)?;

    Ok(Response::new()
        .add_message(instantiate)
        .add_attribute("status", "deployed")
        .add_attribute("token_address", token_address)
        .add_attribute("name", metadata.name.clone())
        .add_attribute("symbol", metadata.symbol.clone())
        .add_attribute("decimals", metadata.decimals.to_string())
        .add_attribute("cw20_symbol", metadata.to_cw20().symbol))
}

/// Value for `transfer` now sits in origin custody; send it on by the origin
/// rules. Hop gas is paid off-chain through the gas service.
fn handle_forward(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    source_chain: &str,
    transfer: OutboundTransfer,
    delivered: Option<DeliveredTokens>,
) -> Result<Response, ContractError> {
    let record = lookup(deps.storage, &transfer.token_id)?;
    if !record.is_origin() || record.transfer_mode != TransferMode::GatewayNative {
        return Err(ContractError::invalid_payload(
            "forward_token is only accepted by the origin of a gateway token",
        ));
    }

    match &delivered {
        Some(delivered) => check_delivered(&record, delivered, transfer.amount)?,
        // Without tokens the sender must have burned a wrapped claim
        None => {
            if is_gateway_supported(deps.storage, source_chain)? {
                return Err(ContractError::invalid_payload(
                    "forward_token from a gateway supported chain must carry tokens",
                ));
            }
        }
    }

    let messages = route_transfer(
        deps.as_ref(),
        env,
        config,
        &record,
        &transfer,
        &Funding::Held,
        vec![],
        env.contract.address.as_str(),
    )?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("destination_chain", transfer.destination_chain)
        .add_attribute("recipient", transfer.recipient)
        .add_attribute("amount", transfer.amount))
}

fn check_delivered(
    record: &TokenRecord,
    delivered: &DeliveredTokens,
    amount: Uint128,
) -> Result<(), ContractError> {
    if record.transfer_mode != TransferMode::GatewayNative
        || record.gateway_symbol.as_deref() != Some(delivered.symbol.as_str())
    {
        return Err(ContractError::invalid_payload(format!(
            "delivered {} does not match the token",
            delivered.symbol
        )));
    }
    if delivered.amount != amount {
        return Err(ContractError::invalid_payload(format!(
            "delivered amount {} does not match payload amount {}",
            delivered.amount, amount
        )));
    }
    Ok(())
}

/// Mint for mint/burn tokens, release from custody otherwise.
fn credit(record: &TokenRecord, recipient: &Addr, amount: Uint128) -> Result<CosmosMsg, ContractError> {
    let msg = match record.transfer_mode {
        TransferMode::MintBurn => Cw20ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        },
        TransferMode::LockRelease | TransferMode::GatewayNative => Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        },
    };
    Ok(cw20_execute(&record.token_address, &msg)?)
}

/// Only failed callbacks reach here; the credit before them stands.
pub fn reply_callback(msg: Reply) -> Result<Response, ContractError> {
    match msg.result {
        SubMsgResult::Err(error) => Ok(Response::new()
            .add_event(Event::new("callback_failed").add_attribute("error", error))
            .add_attribute("action", "callback_failed")),
        SubMsgResult::Ok(_) => Err(StdError::generic_err("unexpected callback success reply").into()),
    }
}
