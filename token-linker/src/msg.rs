//! Message types for the Token Linker contract
//!
//! `Execute` and `ExecuteWithToken` mirror the executable interface the
//! gateway calls on destination contracts; every other variant is a user or
//! administrator operation.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::state::TransferMode;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Administrator for remote linkers and gateway tokens
    pub admin: String,
    /// Name of this chain as used by the gateway; "gateway" is reserved
    pub chain_name: String,
    /// Messaging gateway address
    pub gateway: String,
    /// Gas service address
    pub gas_service: String,
    /// Native denom accepted for relay gas
    pub gas_denom: String,
    /// Stored cw20-base code used for deployed tokens
    pub token_code_id: u64,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Remote Linkers (admin)
    // ========================================================================
    /// Bind a remote chain to its linker, replacing any earlier binding
    SetRemoteLinker {
        chain: String,
        linker_address: String,
        gateway_supported: bool,
    },
    /// Mark registered chains as holding native gateway tokens
    AddGatewaySupportedChains { chains: Vec<String> },
    /// Clear the gateway flag on registered chains
    RemoveGatewaySupportedChains { chains: Vec<String> },

    // ========================================================================
    // Registration & Deployment
    // ========================================================================
    /// Register a cw20 that lives on this chain. Mint/burn when the linker
    /// is its minter, lock/release otherwise.
    RegisterOriginToken { token_address: String },

    /// Announce a registered origin token to remote chains.
    ///
    /// Attach `sum(gas_amounts)` of the gas denom; `gas_amounts[i]` prepays
    /// the message to `destination_chains[i]`.
    DeployRemoteTokens {
        token_id: Binary,
        destination_chains: Vec<String>,
        gas_amounts: Vec<Uint128>,
    },

    RegisterOriginTokenAndDeployRemoteTokens {
        token_address: String,
        destination_chains: Vec<String>,
        gas_amounts: Vec<Uint128>,
    },

    /// Create a new mint/burn token on this chain and announce it remotely.
    /// `initial_supply` is minted to `owner`.
    DeployInterchainToken {
        name: String,
        symbol: String,
        decimals: u8,
        owner: String,
        initial_supply: Uint128,
        salt: Binary,
        destination_chains: Vec<String>,
        gas_amounts: Vec<Uint128>,
    },

    /// Admin: register the gateway token `symbol` with this chain as origin
    RegisterOriginGatewayToken { symbol: String },

    /// Admin: bind the local gateway token `symbol` to an id originating on
    /// `origin_chain`
    RegisterRemoteGatewayToken {
        symbol: String,
        token_id: Binary,
        origin_chain: String,
    },

    // ========================================================================
    // Transfers
    // ========================================================================
    /// Send tokens the caller approved to the linker. Attached gas-denom
    /// funds prepay relay gas.
    SendToken {
        token_id: Binary,
        destination_chain: String,
        recipient: String,
        amount: Uint128,
    },

    /// As `SendToken`, then call `destination_contract` with `data` on arrival
    SendTokenWithData {
        token_id: Binary,
        destination_chain: String,
        destination_contract: String,
        amount: Uint128,
        data: Binary,
    },

    /// cw20 receive hook, see [`ReceiveMsg`]
    Receive(cw20::Cw20ReceiveMsg),

    // ========================================================================
    // Inbound (gateway only)
    // ========================================================================
    Execute {
        source_chain: String,
        source_address: String,
        payload: Binary,
    },
    ExecuteWithToken {
        source_chain: String,
        source_address: String,
        payload: Binary,
        symbol: String,
        amount: Uint128,
    },
}

/// Hooks for tokens sent to the linker with cw20 `Send`
#[cw_serde]
pub enum ReceiveMsg {
    SendToken {
        destination_chain: String,
        recipient: String,
    },
    SendTokenWithData {
        destination_chain: String,
        destination_contract: String,
        data: Binary,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Local token bound to an id
    #[returns(TokenAddressResponse)]
    TokenAddress { token_id: Binary },

    /// Id bound to a local token
    #[returns(TokenIdResponse)]
    TokenId { token_address: String },

    #[returns(Option<TokenResponse>)]
    Token { token_id: Binary },

    #[returns(TokensResponse)]
    Tokens {
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    /// Id a token originating on this chain at `token_address` gets
    #[returns(DerivedIdResponse)]
    OriginTokenId { token_address: String },

    #[returns(DerivedIdResponse)]
    GatewayTokenId { symbol: String },

    #[returns(Option<RemoteLinkerResponse>)]
    RemoteLinker { chain: String },

    #[returns(RemoteLinkersResponse)]
    RemoteLinkers {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Address a token deployed by this linker with `salt` gets
    #[returns(AddressResponse)]
    PredictTokenAddress { salt: Binary },

    /// Address a Deploy of `token_id` creates on this chain
    #[returns(AddressResponse)]
    WrappedTokenAddress { token_id: Binary },

    /// Address `DeployInterchainToken` from `sender` with `salt` creates
    #[returns(AddressResponse)]
    InterchainTokenAddress { sender: String, salt: Binary },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub chain_name: String,
    pub gateway: Addr,
    pub gas_service: Addr,
    pub gas_denom: String,
    pub token_code_id: u64,
}

#[cw_serde]
pub struct TokenAddressResponse {
    pub token_id: Binary,
    pub token_address: Option<Addr>,
}

#[cw_serde]
pub struct TokenIdResponse {
    pub token_address: Addr,
    pub token_id: Option<Binary>,
}

#[cw_serde]
pub struct TokenResponse {
    pub token_id: Binary,
    pub token_address: Addr,
    pub transfer_mode: TransferMode,
    pub origin_chain: Option<String>,
    pub gateway_symbol: Option<String>,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<TokenResponse>,
}

#[cw_serde]
pub struct DerivedIdResponse {
    pub token_id: Binary,
}

#[cw_serde]
pub struct RemoteLinkerResponse {
    pub chain: String,
    pub linker_address: String,
    pub gateway_supported: bool,
}

#[cw_serde]
pub struct RemoteLinkersResponse {
    pub linkers: Vec<RemoteLinkerResponse>,
}

#[cw_serde]
pub struct AddressResponse {
    pub address: Addr,
}
