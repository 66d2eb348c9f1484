//! Error types for the Token Linker contract

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only the gateway can deliver messages")]
    NotGateway,

    #[error("Unauthenticated: {source_address} is not the linker on {source_chain}")]
    Unauthenticated {
        source_chain: String,
        source_address: String,
    },

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Token already registered: {token_id} is bound to {token_address}")]
    AlreadyRegistered {
        token_id: String,
        token_address: String,
    },

    #[error("Token not registered: {token_id}")]
    NotRegistered { token_id: String },

    #[error("No token id is bound to {token_address}")]
    UnknownToken { token_address: String },

    #[error("Token {token_id} did not originate on this chain")]
    NotOriginToken { token_id: String },

    #[error("Token id mismatch: expected {expected}, got {got}")]
    TokenIdMismatch { expected: String, got: String },

    #[error("Invalid token id length: expected 32 bytes, got {got}")]
    InvalidTokenId { got: usize },

    #[error("Gateway token not found: {symbol}")]
    GatewayTokenNotFound { symbol: String },

    // ========================================================================
    // Remote Chain Errors
    // ========================================================================

    #[error("Remote chain not registered: {chain}")]
    RemoteChainNotRegistered { chain: String },

    #[error("Chain name is reserved: {chain}")]
    ReservedChainName { chain: String },

    #[error("Invalid chain name: {reason}")]
    InvalidChainName { reason: String },

    #[error("Gateway token cannot be deployed to gateway supported chain {chain}")]
    GatewaySupportedDestination { chain: String },

    #[error("Unsupported route: {reason}")]
    UnsupportedRoute { reason: String },

    // ========================================================================
    // Amount & Funds Errors
    // ========================================================================

    #[error("Destination chains and gas amounts differ in length: {chains} vs {gas_amounts}")]
    LengthMismatch { chains: usize, gas_amounts: usize },

    #[error("Insufficient balance: has {balance}, needs {required}")]
    InsufficientBalance { balance: Uint128, required: Uint128 },

    #[error("Insufficient allowance: has {allowance}, needs {required}")]
    InsufficientAllowance {
        allowance: Uint128,
        required: Uint128,
    },

    #[error("Gas payment mismatch: expected {expected}, got {got}")]
    GasPaymentMismatch { expected: Uint128, got: Uint128 },

    #[error("Unexpected funds: only {denom} is accepted")]
    UnexpectedFunds { denom: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    // ========================================================================
    // Deployment & Payload Errors
    // ========================================================================

    #[error("Invalid token metadata: {reason}")]
    InvalidMetadata { reason: String },

    #[error("Deploy collision: {address} is already occupied")]
    DeployCollision { address: String },

    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },
}

impl ContractError {
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        ContractError::InvalidPayload {
            reason: reason.into(),
        }
    }
}
