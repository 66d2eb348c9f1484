//! Outbound hand-off to the gateway and gas service, plus cw20 helpers.

use cosmwasm_std::{
    to_json_binary, Addr, Binary, Coin, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw20::{AllowanceResponse, BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};

use common::{GasServiceExecuteMsg, GatewayExecuteMsg, GatewayReceiveMsg};

use crate::error::ContractError;
use crate::state::Config;

/// One outbound linker message
pub struct RemoteCall<'a> {
    pub destination_chain: &'a str,
    pub destination_address: &'a str,
    pub payload: Binary,
}

pub fn cw20_execute(token: &Addr, msg: &Cw20ExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

/// Total gas-denom value attached; any other denom is refused.
pub fn gas_from_funds(funds: &[Coin], gas_denom: &str) -> Result<Uint128, ContractError> {
    let mut total = Uint128::zero();
    for coin in funds {
        if coin.denom != gas_denom {
            return Err(ContractError::UnexpectedFunds {
                denom: gas_denom.to_string(),
            });
        }
        total = total
            .checked_add(coin.amount)
            .map_err(|_| ContractError::InvalidAmount {
                reason: "attached funds overflow".to_string(),
            })?;
    }
    Ok(total)
}

pub fn gas_coins(gas_denom: &str, amount: Uint128) -> Vec<Coin> {
    if amount.is_zero() {
        return vec![];
    }
    vec![Coin {
        denom: gas_denom.to_string(),
        amount,
    }]
}

fn pay_gas(
    config: &Config,
    linker: &Addr,
    call: &RemoteCall,
    gas: Vec<Coin>,
    refund_address: &str,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.gas_service.to_string(),
        msg: to_json_binary(&GasServiceExecuteMsg::PayNativeGasForContractCall {
            source_address: linker.to_string(),
            destination_chain: call.destination_chain.to_string(),
            destination_address: call.destination_address.to_string(),
            payload: call.payload.clone(),
            refund_address: refund_address.to_string(),
        })?,
        funds: gas,
    }))
}

/// Gas prepayment followed by the gateway call.
pub fn call_contract(
    config: &Config,
    linker: &Addr,
    call: RemoteCall,
    gas: Vec<Coin>,
    refund_address: &str,
) -> StdResult<Vec<CosmosMsg>> {
    let pay = pay_gas(config, linker, &call, gas, refund_address)?;
    let send = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.gateway.to_string(),
        msg: to_json_binary(&GatewayExecuteMsg::CallContract {
            destination_chain: call.destination_chain.to_string(),
            destination_address: call.destination_address.to_string(),
            payload: call.payload,
        })?,
        funds: vec![],
    });
    Ok(vec![pay, send])
}

/// Gas prepayment followed by a cw20 `Send` of gateway tokens held by the
/// linker to the gateway.
#[allow(clippy::too_many_arguments)]
pub fn call_contract_with_token(
    config: &Config,
    linker: &Addr,
    call: RemoteCall,
    token: &Addr,
    symbol: &str,
    amount: Uint128,
    gas: Vec<Coin>,
    refund_address: &str,
) -> StdResult<Vec<CosmosMsg>> {
    let pay = pay_gas(config, linker, &call, gas, refund_address)?;
    let hook = GatewayReceiveMsg::CallContractWithToken {
        destination_chain: call.destination_chain.to_string(),
        destination_address: call.destination_address.to_string(),
        payload: call.payload,
        symbol: symbol.to_string(),
    };
    let send = cw20_execute(
        token,
        &Cw20ExecuteMsg::Send {
            contract: config.gateway.to_string(),
            amount,
            msg: to_json_binary(&hook)?,
        },
    )?;
    Ok(vec![pay, send])
}

/// Fail before emitting anything if `owner` cannot cover `amount` through
/// an allowance to `spender`.
pub fn check_balance_and_allowance(
    querier: &QuerierWrapper,
    token: &Addr,
    owner: &Addr,
    spender: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let balance: BalanceResponse = querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Balance {
            address: owner.to_string(),
        },
    )?;
    if balance.balance < amount {
        return Err(ContractError::InsufficientBalance {
            balance: balance.balance,
            required: amount,
        });
    }

    let allowance: AllowanceResponse = querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Allowance {
            owner: owner.to_string(),
            spender: spender.to_string(),
        },
    )?;
    if allowance.allowance < amount {
        return Err(ContractError::InsufficientAllowance {
            allowance: allowance.allowance,
            required: amount,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::coin;

    #[test]
    fn test_gas_from_funds() {
        assert_eq!(gas_from_funds(&[], "ugas").unwrap(), Uint128::zero());
        assert_eq!(
            gas_from_funds(&[coin(5, "ugas"), coin(7, "ugas")], "ugas").unwrap(),
            Uint128::new(12)
        );
        assert_eq!(
            gas_from_funds(&[coin(5, "ugas"), coin(1, "uatom")], "ugas").unwrap_err(),
            ContractError::UnexpectedFunds {
                denom: "ugas".to_string()
            }
        );
    }

    #[test]
    fn test_gas_from_funds_overflow() {
        let funds = [coin(u128::MAX, "ugas"), coin(1, "ugas")];
        assert!(matches!(
            gas_from_funds(&funds, "ugas").unwrap_err(),
            ContractError::InvalidAmount { .. }
        ));
    }

    #[test]
    fn test_gas_coins_skips_zero() {
        assert!(gas_coins("ugas", Uint128::zero()).is_empty());
        assert_eq!(gas_coins("ugas", Uint128::new(3)), vec![coin(3, "ugas")]);
    }
}
