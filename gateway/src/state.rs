use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Coin, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:interchain-gateway";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Config {
    /// Registers gateway tokens and delivers relayed calls
    pub relayer: Addr,
    pub chain_name: String,
}

/// Gateway-native value attached to a call
#[cw_serde]
pub struct TokenAmount {
    pub symbol: String,
    pub amount: Uint128,
}

/// Outbound call waiting to be picked up by a relayer
#[cw_serde]
pub struct ContractCall {
    pub sender: Addr,
    pub destination_chain: String,
    pub destination_address: String,
    pub payload: Binary,
    pub token: Option<TokenAmount>,
}

#[cw_serde]
pub struct GasPayment {
    pub source_address: String,
    pub destination_chain: String,
    pub destination_address: String,
    pub payload: Binary,
    pub refund_address: String,
    pub funds: Vec<Coin>,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// symbol => token address
pub const TOKENS: Map<&str, Addr> = Map::new("tokens");

/// token address => symbol
pub const TOKEN_SYMBOLS: Map<&Addr, String> = Map::new("token_symbols");

pub const CALL_COUNT: Item<u64> = Item::new("call_count");

/// sequence => outbound call
pub const CONTRACT_CALLS: Map<u64, ContractCall> = Map::new("contract_calls");

pub const GAS_PAYMENT_COUNT: Item<u64> = Item::new("gas_payment_count");

/// sequence => gas payment
pub const GAS_PAYMENTS: Map<u64, GasPayment> = Map::new("gas_payments");

/// message id => delivered
pub const DELIVERED: Map<&str, bool> = Map::new("delivered");
