//! State definitions for the Token Linker contract
//!
//! Each linker owns its chain's view of the token registry and of the remote
//! linkers it trusts. Nothing here is shared with other chains; they are
//! reconciled only through relayed messages.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

// ============================================================================
// Configuration
// ============================================================================

/// Per-chain configuration, fixed at instantiation
#[cw_serde]
pub struct Config {
    /// Administrator for remote linker and gateway token management
    pub admin: Addr,
    /// Name of this chain as known to the gateway and to remote linkers
    pub chain_name: String,
    /// Messaging gateway; the only sender allowed to deliver inbound messages
    pub gateway: Addr,
    /// Gas service receiving relay prepayments
    pub gas_service: Addr,
    /// Native denom used for relay prepayment
    pub gas_denom: String,
    /// cw20 code instantiated for wrapped and interchain tokens
    pub token_code_id: u64,
}

// ============================================================================
// Token Registry
// ============================================================================

/// How value leaves and enters this chain for a token
#[cw_serde]
#[derive(Copy, Eq)]
pub enum TransferMode {
    /// The linker is the token's minter: burn on send, mint on receive
    MintBurn,
    /// Externally owned token: lock in custody on send, release on receive
    LockRelease,
    /// Token minted by the messaging gateway itself
    GatewayNative,
}

impl TransferMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferMode::MintBurn => "mint_burn",
            TransferMode::LockRelease => "lock_release",
            TransferMode::GatewayNative => "gateway_native",
        }
    }
}

/// Binding of a token id to its local representation
#[cw_serde]
pub struct TokenRecord {
    /// Local cw20 contract; never changes once bound
    pub token_address: Addr,
    pub transfer_mode: TransferMode,
    /// `None` when the token originated on this chain
    pub origin_chain: Option<String>,
    /// Gateway symbol for gateway tokens and their wrapped representations
    pub gateway_symbol: Option<String>,
}

impl TokenRecord {
    pub fn is_origin(&self) -> bool {
        self.origin_chain.is_none()
    }
}

// ============================================================================
// Remote Linkers
// ============================================================================

/// Counterpart linker on a remote chain
#[cw_serde]
pub struct RemoteLinker {
    /// Expected sender of inbound messages from that chain
    pub linker_address: String,
    /// Whether the chain has a native instance of the gateway tokens
    pub gateway_supported: bool,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:interchain-token-linker";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reply id for `TransferWithData` callbacks
pub const REPLY_CALLBACK: u64 = 1;

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

/// Key: 32-byte token id, Value: TokenRecord
pub const TOKENS: Map<&[u8], TokenRecord> = Map::new("tokens");

/// Reverse index. Key: token address, Value: 32-byte token id
pub const TOKEN_IDS: Map<&Addr, [u8; 32]> = Map::new("token_ids");

/// Key: remote chain name, Value: RemoteLinker
pub const REMOTE_LINKERS: Map<&str, RemoteLinker> = Map::new("remote_linkers");
