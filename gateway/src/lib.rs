//! Local messaging gateway for the Interchain Token Linker.
//!
//! Stands in for the external gateway and gas service on test and local
//! networks: outbound calls and gas payments are recorded for a relayer to
//! pick up, and the relayer delivers calls to their destination contract
//! through the `Execute` / `ExecuteWithToken` interface. Gateway-native tokens
//! are burned when they leave and minted to the destination contract when
//! they arrive.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
