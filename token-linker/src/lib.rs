//! Interchain Token Linker - one instance per chain
//!
//! Keeps a single logical token consistent across chains that only talk
//! through an asynchronous message gateway.
//!
//! # Identity
//! Every token has a 32-byte id derived from where it originated
//! (`keccak256(abi.encode(chain, address))`) or, for tokens the gateway
//! itself issues, from its symbol (`keccak256(abi.encode("gateway", symbol))`).
//! Each linker binds ids to local cw20 contracts; bindings never change.
//!
//! # Flow
//! 1. A token is registered on its origin chain (`RegisterOriginToken`)
//! 2. `DeployRemoteTokens` sends a Deploy message per destination, whose
//!    linker instantiates a mint/burn representation at a predictable address
//! 3. `SendToken` burns or locks on the source and sends a Transfer message;
//!    the destination mints or releases to the recipient
//!
//! Gateway tokens are bound by symbol on every chain holding them and moved
//! by the gateway; chains without them receive a wrapped representation
//! backed by custody on the origin.
//!
//! # Inbound
//! Only the configured gateway may deliver messages, and only from the
//! linker registered for the claimed source chain.

pub mod contract;
pub mod deployer;
pub mod error;
mod execute;
pub mod identity;
pub mod msg;
pub mod payload;
mod query;
pub mod registry;
pub mod remote;
pub mod state;

pub use crate::error::ContractError;
pub use crate::identity::{derive_gateway_id, derive_origin_id, keccak256, TokenId};
pub use crate::payload::LinkerMessage;
