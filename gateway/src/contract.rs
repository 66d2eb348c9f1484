use cosmwasm_std::{
    entry_point, from_json, to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo,
    Order, Response, StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};
use cw_storage_plus::Bound;

use common::ExecutableMsg;

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ContractCallEntry, ContractCallsResponse, ExecuteMsg, GasPaymentEntry,
    GasPaymentsResponse, InstantiateMsg, QueryMsg, ReceiveMsg, TokenAddressResponse,
};
use crate::state::{
    Config, ContractCall, GasPayment, TokenAmount, CALL_COUNT, CONFIG, CONTRACT_CALLS,
    CONTRACT_NAME, CONTRACT_VERSION, DELIVERED, GAS_PAYMENTS, GAS_PAYMENT_COUNT, TOKENS,
    TOKEN_SYMBOLS,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let relayer = deps.api.addr_validate(&msg.relayer)?;
    CONFIG.save(
        deps.storage,
        &Config {
            relayer: relayer.clone(),
            chain_name: msg.chain_name.clone(),
        },
    )?;
    CALL_COUNT.save(deps.storage, &0)?;
    GAS_PAYMENT_COUNT.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("relayer", relayer)
        .add_attribute("chain_name", msg.chain_name))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CallContract {
            destination_chain,
            destination_address,
            payload,
        } => execute_call_contract(
            deps,
            info,
            destination_chain,
            destination_address,
            payload,
        ),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, info, cw20_msg),
        ExecuteMsg::PayNativeGasForContractCall {
            source_address,
            destination_chain,
            destination_address,
            payload,
            refund_address,
        } => execute_pay_gas(
            deps,
            info,
            GasPayment {
                source_address,
                destination_chain,
                destination_address,
                payload,
                refund_address,
                funds: vec![],
            },
        ),
        ExecuteMsg::RegisterToken { symbol, address } => {
            execute_register_token(deps, info, symbol, address)
        }
        ExecuteMsg::Deliver {
            message_id,
            source_chain,
            source_address,
            destination_address,
            payload,
            token,
        } => execute_deliver(
            deps,
            info,
            message_id,
            source_chain,
            source_address,
            destination_address,
            payload,
            token,
        ),
    }
}

fn record_call(deps: DepsMut, call: ContractCall) -> StdResult<u64> {
    let sequence = CALL_COUNT.load(deps.storage)?;
    CONTRACT_CALLS.save(deps.storage, sequence, &call)?;
    CALL_COUNT.save(deps.storage, &(sequence + 1))?;
    Ok(sequence)
}

fn execute_call_contract(
    deps: DepsMut,
    info: MessageInfo,
    destination_chain: String,
    destination_address: String,
    payload: Binary,
) -> Result<Response, ContractError> {
    let sequence = record_call(
        deps,
        ContractCall {
            sender: info.sender.clone(),
            destination_chain: destination_chain.clone(),
            destination_address: destination_address.clone(),
            payload,
            token: None,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "contract_call")
        .add_attribute("sequence", sequence.to_string())
        .add_attribute("sender", info.sender)
        .add_attribute("destination_chain", destination_chain)
        .add_attribute("destination_address", destination_address))
}

/// Gateway tokens sent with a call are burned here and minted on delivery.
fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let sender = deps.api.addr_validate(&cw20_msg.sender)?;
    let ReceiveMsg::CallContractWithToken {
        destination_chain,
        destination_address,
        payload,
        symbol,
    } = from_json(&cw20_msg.msg)?;

    let registered = TOKENS
        .may_load(deps.storage, &symbol)?
        .ok_or(ContractError::TokenNotRegistered {
            symbol: symbol.clone(),
        })?;
    if registered != info.sender {
        return Err(ContractError::TokenMismatch {
            token: info.sender.to_string(),
            symbol,
        });
    }
    if cw20_msg.amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }

    let sequence = record_call(
        deps,
        ContractCall {
            sender: sender.clone(),
            destination_chain: destination_chain.clone(),
            destination_address,
            payload,
            token: Some(TokenAmount {
                symbol: symbol.clone(),
                amount: cw20_msg.amount,
            }),
        },
    )?;

    let burn = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: info.sender.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Burn {
            amount: cw20_msg.amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(burn)
        .add_attribute("action", "contract_call_with_token")
        .add_attribute("sequence", sequence.to_string())
        .add_attribute("sender", sender)
        .add_attribute("destination_chain", destination_chain)
        .add_attribute("symbol", symbol)
        .add_attribute("amount", cw20_msg.amount))
}

fn execute_pay_gas(
    deps: DepsMut,
    info: MessageInfo,
    mut payment: GasPayment,
) -> Result<Response, ContractError> {
    payment.funds = info.funds;
    let paid: Uint128 = payment.funds.iter().map(|c| c.amount).sum();

    let sequence = GAS_PAYMENT_COUNT.load(deps.storage)?;
    GAS_PAYMENTS.save(deps.storage, sequence, &payment)?;
    GAS_PAYMENT_COUNT.save(deps.storage, &(sequence + 1))?;

    Ok(Response::new()
        .add_attribute("action", "pay_gas")
        .add_attribute("sequence", sequence.to_string())
        .add_attribute("source_address", payment.source_address)
        .add_attribute("destination_chain", payment.destination_chain)
        .add_attribute("amount", paid))
}

fn execute_register_token(
    deps: DepsMut,
    info: MessageInfo,
    symbol: String,
    address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.relayer {
        return Err(ContractError::Unauthorized);
    }
    if TOKENS.has(deps.storage, &symbol) {
        return Err(ContractError::TokenAlreadyRegistered { symbol });
    }

    let token = deps.api.addr_validate(&address)?;
    TOKENS.save(deps.storage, &symbol, &token)?;
    TOKEN_SYMBOLS.save(deps.storage, &token, &symbol)?;

    Ok(Response::new()
        .add_attribute("action", "register_token")
        .add_attribute("symbol", symbol)
        .add_attribute("token", token))
}

#[allow(clippy::too_many_arguments)]
fn execute_deliver(
    deps: DepsMut,
    info: MessageInfo,
    message_id: String,
    source_chain: String,
    source_address: String,
    destination_address: String,
    payload: Binary,
    token: Option<TokenAmount>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.relayer {
        return Err(ContractError::Unauthorized);
    }
    if DELIVERED.has(deps.storage, &message_id) {
        return Err(ContractError::AlreadyDelivered { message_id });
    }
    DELIVERED.save(deps.storage, &message_id, &true)?;

    let destination = deps.api.addr_validate(&destination_address)?;
    let mut messages: Vec<CosmosMsg> = vec![];

    let execute_msg = match token {
        Some(TokenAmount { symbol, amount }) => {
            let token_addr = TOKENS.may_load(deps.storage, &symbol)?.ok_or(
                ContractError::TokenNotRegistered {
                    symbol: symbol.clone(),
                },
            )?;
            messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: token_addr.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::Mint {
                    recipient: destination.to_string(),
                    amount,
                })?,
                funds: vec![],
            }));
            ExecutableMsg::ExecuteWithToken {
                source_chain: source_chain.clone(),
                source_address,
                payload,
                symbol,
                amount,
            }
        }
        None => ExecutableMsg::Execute {
            source_chain: source_chain.clone(),
            source_address,
            payload,
        },
    };

    messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: destination.to_string(),
        msg: to_json_binary(&execute_msg)?,
        funds: vec![],
    }));

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "deliver")
        .add_attribute("message_id", message_id)
        .add_attribute("source_chain", source_chain)
        .add_attribute("destination_address", destination))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&ConfigResponse {
                relayer: config.relayer,
                chain_name: config.chain_name,
            })
        }
        QueryMsg::TokenAddress { symbol } => {
            let address = TOKENS.may_load(deps.storage, &symbol)?;
            to_json_binary(&TokenAddressResponse { symbol, address })
        }
        QueryMsg::ContractCalls { start_after, limit } => {
            to_json_binary(&query_contract_calls(deps, start_after, limit)?)
        }
        QueryMsg::GasPayments { start_after, limit } => {
            to_json_binary(&query_gas_payments(deps, start_after, limit)?)
        }
        QueryMsg::IsDelivered { message_id } => {
            to_json_binary(&DELIVERED.has(deps.storage, &message_id))
        }
    }
}

fn query_contract_calls(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<ContractCallsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let calls = CONTRACT_CALLS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (sequence, call) = item?;
            Ok(ContractCallEntry { sequence, call })
        })
        .collect::<StdResult<_>>()?;

    Ok(ContractCallsResponse { calls })
}

fn query_gas_payments(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<GasPaymentsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let payments = GAS_PAYMENTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (sequence, payment) = item?;
            Ok(GasPaymentEntry { sequence, payment })
        })
        .collect::<StdResult<_>>()?;

    Ok(GasPaymentsResponse { payments })
}
