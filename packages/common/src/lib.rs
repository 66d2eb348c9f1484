//! Common - Shared Interfaces for the Interchain Token Linker Contracts
//!
//! The linker talks to two external collaborators on its own chain: the
//! messaging gateway (outbound calls, inbound delivery, gateway-native tokens)
//! and the gas service (relay prepayment). This package holds the wire types
//! both sides agree on, plus the callback interface that receivers of
//! `TransferWithData` implement.

pub mod executable;
pub mod gas_service;
pub mod gateway;

pub use executable::{ExecutableMsg, InterchainTokenExecutableMsg};
pub use gas_service::GasServiceExecuteMsg;
pub use gateway::{GatewayExecuteMsg, GatewayQueryMsg, GatewayReceiveMsg, TokenAddressResponse};
