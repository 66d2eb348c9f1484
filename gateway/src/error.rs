use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only the relayer can perform this action")]
    Unauthorized,

    #[error("Gateway token not registered: {symbol}")]
    TokenNotRegistered { symbol: String },

    #[error("Gateway token already registered: {symbol}")]
    TokenAlreadyRegistered { symbol: String },

    #[error("Token {token} is not the gateway token for {symbol}")]
    TokenMismatch { token: String, symbol: String },

    #[error("Message already delivered: {message_id}")]
    AlreadyDelivered { message_id: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },
}
