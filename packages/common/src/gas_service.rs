use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;

/// Relay prepayment. The attached native funds pay for delivering the call
/// identified by `(source_address, destination_chain, destination_address, payload)`.
#[cw_serde]
pub enum GasServiceExecuteMsg {
    PayNativeGasForContractCall {
        source_address: String,
        destination_chain: String,
        destination_address: String,
        payload: Binary,
        refund_address: String,
    },
}
