//! Messaging gateway interface.
//!
//! Outbound: a contract asks the gateway to relay `payload` to
//! `destination_address` on `destination_chain`. Gateway-native value travels
//! alongside the payload by sending the cw20 to the gateway with a
//! [`GatewayReceiveMsg::CallContractWithToken`] hook.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

/// Subset of the gateway execute surface used by callers.
#[cw_serde]
pub enum GatewayExecuteMsg {
    /// Relay a contract call to another chain.
    CallContract {
        destination_chain: String,
        destination_address: String,
        payload: Binary,
    },
    /// cw20 receiver hook, used for calls that carry gateway-native tokens.
    Receive(cw20::Cw20ReceiveMsg),
}

/// Hook message embedded in a cw20 `Send` to the gateway.
#[cw_serde]
pub enum GatewayReceiveMsg {
    CallContractWithToken {
        destination_chain: String,
        destination_address: String,
        payload: Binary,
        /// Gateway symbol of the token being sent; must match the cw20 sender
        symbol: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum GatewayQueryMsg {
    /// Local address of a gateway-native token.
    #[returns(TokenAddressResponse)]
    TokenAddress { symbol: String },
}

#[cw_serde]
pub struct TokenAddressResponse {
    pub symbol: String,
    pub address: Option<Addr>,
}
