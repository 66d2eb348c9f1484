//! Execute handlers for the Token Linker contract.
//!
//! - `admin` - remote linker bindings and gateway support flags
//! - `register` - token registration and remote deployment
//! - `send` - outbound transfers
//! - `inbound` - messages delivered by the gateway
//! - `outbound` - gateway, gas service and cw20 message builders

mod admin;
mod inbound;
mod outbound;
mod register;
mod send;

pub use admin::*;
pub use inbound::*;
pub use register::*;
pub use send::{execute_receive, execute_send_token, execute_send_token_with_data};
