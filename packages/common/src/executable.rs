//! Interfaces the gateway and the linker invoke on destination contracts.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128};

/// Delivery of an authenticated cross-chain call, sent by the gateway.
#[cw_serde]
pub enum ExecutableMsg {
    Execute {
        source_chain: String,
        source_address: String,
        payload: Binary,
    },
    /// Same as `Execute`, but the gateway has already credited `amount` of
    /// the gateway-native token `symbol` to the destination contract.
    ExecuteWithToken {
        source_chain: String,
        source_address: String,
        payload: Binary,
        symbol: String,
        amount: Uint128,
    },
}

/// Callback a `TransferWithData` target receives after it has been credited.
#[cw_serde]
pub enum InterchainTokenExecutableMsg {
    ExecuteWithInterchainToken {
        source_chain: String,
        /// 32-byte token id
        token_id: Binary,
        /// Local token contract that was credited
        token: String,
        amount: Uint128,
        data: Binary,
    },
}
