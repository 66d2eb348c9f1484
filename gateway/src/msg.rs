use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

pub use common::gateway::{GatewayReceiveMsg as ReceiveMsg, TokenAddressResponse};

use crate::state::{ContractCall, GasPayment, TokenAmount};

#[cw_serde]
pub struct InstantiateMsg {
    /// Relayer allowed to register tokens and deliver calls
    pub relayer: String,
    /// Name of the chain this gateway serves
    pub chain_name: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Record a call for relay to another chain
    CallContract {
        destination_chain: String,
        destination_address: String,
        payload: Binary,
    },
    /// cw20 hook: record a call that carries gateway-native tokens (burned here)
    Receive(cw20::Cw20ReceiveMsg),
    /// Gas service: prepay relay of a call with the attached native funds
    PayNativeGasForContractCall {
        source_address: String,
        destination_chain: String,
        destination_address: String,
        payload: Binary,
        refund_address: String,
    },
    /// Relayer: register a gateway-native token this gateway mints
    RegisterToken { symbol: String, address: String },
    /// Relayer: deliver a call relayed from `source_chain`
    Deliver {
        /// Unique id of the relayed call, delivered at most once
        message_id: String,
        source_chain: String,
        source_address: String,
        destination_address: String,
        payload: Binary,
        token: Option<TokenAmount>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(TokenAddressResponse)]
    TokenAddress { symbol: String },
    /// Outbound calls in sequence order
    #[returns(ContractCallsResponse)]
    ContractCalls {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(GasPaymentsResponse)]
    GasPayments {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(bool)]
    IsDelivered { message_id: String },
}

#[cw_serde]
pub struct ConfigResponse {
    pub relayer: Addr,
    pub chain_name: String,
}

#[cw_serde]
pub struct ContractCallEntry {
    pub sequence: u64,
    pub call: ContractCall,
}

#[cw_serde]
pub struct ContractCallsResponse {
    pub calls: Vec<ContractCallEntry>,
}

#[cw_serde]
pub struct GasPaymentEntry {
    pub sequence: u64,
    pub payment: GasPayment,
}

#[cw_serde]
pub struct GasPaymentsResponse {
    pub payments: Vec<GasPaymentEntry>,
}
