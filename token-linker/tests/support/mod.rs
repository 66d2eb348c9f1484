//! Multi-chain test harness.
//!
//! Each chain is its own `App` with a gateway, a linker and the cw20 code.
//! The relayer copies calls recorded by one chain's gateway into `Deliver`
//! calls on the destination chain's gateway, so delivery order is fully in
//! the test's hands.

#![allow(dead_code)]

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    coins, to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response,
    StdError, StdResult, Uint128,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse, TokenInfoResponse};
use cw_multi_test::{MockAddressGenerator, MockApiBech32};
use cw_multi_test::{
    no_init, App, AppBuilder, AppResponse, BankKeeper, Contract, ContractWrapper, Executor,
    WasmKeeper,
};
use cw_storage_plus::Item;

use common::InterchainTokenExecutableMsg;
use gateway::msg::{
    ContractCallEntry, ContractCallsResponse, ExecuteMsg as GatewayExecuteMsg,
    InstantiateMsg as GatewayInstantiateMsg, QueryMsg as GatewayQueryMsg,
};
use token_linker::msg::{
    ExecuteMsg, InstantiateMsg, QueryMsg, TokenAddressResponse, TokenResponse,
};
use token_linker::TokenId;

pub type ChainApp = App<BankKeeper, MockApiBech32>;

pub const GAS_DENOM: &str = "ugas";
pub const INITIAL_GAS: u128 = 1_000_000_000;

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_linker() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        token_linker::contract::execute,
        token_linker::contract::instantiate,
        token_linker::contract::query,
    )
    .with_reply(token_linker::contract::reply);
    Box::new(contract)
}

pub fn contract_gateway() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        gateway::contract::execute,
        gateway::contract::instantiate,
        gateway::contract::query,
    );
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

// ----------------------------------------------------------------------------
// Callback receiver for TransferWithData
// ----------------------------------------------------------------------------

#[cw_serde]
pub struct ReceiverInstantiateMsg {
    pub fail: bool,
}

#[cw_serde]
pub struct ReceivedCall {
    pub source_chain: String,
    pub token_id: Binary,
    pub token: String,
    pub amount: Uint128,
    pub data: Binary,
}

const RECEIVER_FAIL: Item<bool> = Item::new("fail");
const RECEIVER_LAST: Item<ReceivedCall> = Item::new("last");

fn receiver_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: ReceiverInstantiateMsg,
) -> StdResult<Response> {
    RECEIVER_FAIL.save(deps.storage, &msg.fail)?;
    Ok(Response::new())
}

fn receiver_execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InterchainTokenExecutableMsg,
) -> StdResult<Response> {
    if RECEIVER_FAIL.load(deps.storage)? {
        return Err(StdError::generic_err("receiver rejects the call"));
    }
    let InterchainTokenExecutableMsg::ExecuteWithInterchainToken {
        source_chain,
        token_id,
        token,
        amount,
        data,
    } = msg;
    RECEIVER_LAST.save(
        deps.storage,
        &ReceivedCall {
            source_chain,
            token_id,
            token,
            amount,
            data,
        },
    )?;
    Ok(Response::new().add_attribute("action", "received"))
}

fn receiver_query(deps: Deps, _env: Env, _msg: Empty) -> StdResult<Binary> {
    to_json_binary(&RECEIVER_LAST.may_load(deps.storage)?)
}

pub fn contract_receiver() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        receiver_execute,
        receiver_instantiate,
        receiver_query,
    ))
}

// ============================================================================
// Chain
// ============================================================================

pub struct Chain {
    pub name: String,
    pub app: ChainApp,
    pub admin: Addr,
    pub relayer: Addr,
    pub user: Addr,
    pub attacker: Addr,
    pub gateway: Addr,
    pub linker: Addr,
    pub cw20_code_id: u64,
}

impl Chain {
    /// `prefix` is the chain's bech32 prefix, so addresses differ per chain.
    pub fn new(name: &str, prefix: &'static str) -> Self {
        let mut app: ChainApp = AppBuilder::default()
            .with_api(MockApiBech32::new(prefix))
            .with_wasm(WasmKeeper::default().with_address_generator(MockAddressGenerator))
            .build(no_init);

        let admin = app.api().addr_make("admin");
        let relayer = app.api().addr_make("relayer");
        let user = app.api().addr_make("user");
        let attacker = app.api().addr_make("attacker");

        app.init_modules(|router, _, storage| {
            for account in [&admin, &user, &attacker] {
                router
                    .bank
                    .init_balance(storage, account, coins(INITIAL_GAS, GAS_DENOM))
                    .unwrap();
            }
        });

        let gateway_code_id = app.store_code(contract_gateway());
        let cw20_code_id = app.store_code(contract_cw20());
        let linker_code_id = app.store_code(contract_linker());

        let gateway = app
            .instantiate_contract(
                gateway_code_id,
                admin.clone(),
                &GatewayInstantiateMsg {
                    relayer: relayer.to_string(),
                    chain_name: name.to_string(),
                },
                &[],
                "gateway",
                None,
            )
            .unwrap();

        let linker = app
            .instantiate_contract(
                linker_code_id,
                admin.clone(),
                &InstantiateMsg {
                    admin: admin.to_string(),
                    chain_name: name.to_string(),
                    gateway: gateway.to_string(),
                    gas_service: gateway.to_string(),
                    gas_denom: GAS_DENOM.to_string(),
                    token_code_id: cw20_code_id,
                },
                &[],
                "token-linker",
                Some(admin.to_string()),
            )
            .unwrap();

        Chain {
            name: name.to_string(),
            app,
            admin,
            relayer,
            user,
            attacker,
            gateway,
            linker,
            cw20_code_id,
        }
    }

    // ------------------------------------------------------------------------
    // Linker
    // ------------------------------------------------------------------------

    pub fn execute(
        &mut self,
        sender: &Addr,
        msg: &ExecuteMsg,
        gas: u128,
    ) -> anyhow::Result<AppResponse> {
        let funds = if gas == 0 {
            vec![]
        } else {
            coins(gas, GAS_DENOM)
        };
        self.app
            .execute_contract(sender.clone(), self.linker.clone(), msg, &funds)
    }

    /// Bind `other`'s linker on this chain.
    pub fn link(&mut self, other: &Chain, gateway_supported: bool) {
        let admin = self.admin.clone();
        self.execute(
            &admin,
            &ExecuteMsg::SetRemoteLinker {
                chain: other.name.clone(),
                linker_address: other.linker.to_string(),
                gateway_supported,
            },
            0,
        )
        .unwrap();
    }

    pub fn token_address(&self, token_id: &TokenId) -> Option<Addr> {
        let response: TokenAddressResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.linker,
                &QueryMsg::TokenAddress {
                    token_id: id_binary(token_id),
                },
            )
            .unwrap();
        response.token_address
    }

    pub fn token(&self, token_id: &TokenId) -> Option<TokenResponse> {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.linker,
                &QueryMsg::Token {
                    token_id: id_binary(token_id),
                },
            )
            .unwrap()
    }

    /// Register an origin token and return its id.
    pub fn register_origin_token(&mut self, token: &Addr) -> TokenId {
        let user = self.user.clone();
        self.execute(
            &user,
            &ExecuteMsg::RegisterOriginToken {
                token_address: token.to_string(),
            },
            0,
        )
        .unwrap();
        token_linker::derive_origin_id(&self.name, token.as_str())
    }

    pub fn deploy_remote(&mut self, token_id: &TokenId, chains: &[&str]) -> AppResponse {
        let user = self.user.clone();
        self.execute(
            &user,
            &ExecuteMsg::DeployRemoteTokens {
                token_id: id_binary(token_id),
                destination_chains: chains.iter().map(|c| c.to_string()).collect(),
                gas_amounts: vec![Uint128::zero(); chains.len()],
            },
            0,
        )
        .unwrap()
    }

    /// Approve the linker and send `amount` to `recipient` on `destination`.
    pub fn send(
        &mut self,
        owner: &Addr,
        token_id: &TokenId,
        destination: &str,
        recipient: &Addr,
        amount: u128,
    ) -> anyhow::Result<AppResponse> {
        let token = self.token_address(token_id).unwrap();
        self.approve(owner, &token, amount);
        self.execute(
            owner,
            &ExecuteMsg::SendToken {
                token_id: id_binary(token_id),
                destination_chain: destination.to_string(),
                recipient: recipient.to_string(),
                amount: Uint128::new(amount),
            },
            0,
        )
    }

    // ------------------------------------------------------------------------
    // cw20
    // ------------------------------------------------------------------------

    pub fn create_cw20(
        &mut self,
        symbol: &str,
        holder: &Addr,
        amount: u128,
        minter: Option<&Addr>,
    ) -> Addr {
        let admin = self.admin.clone();
        self.app
            .instantiate_contract(
                self.cw20_code_id,
                admin,
                &cw20_base::msg::InstantiateMsg {
                    name: format!("{} Token", symbol),
                    symbol: symbol.to_string(),
                    decimals: 6,
                    initial_balances: vec![Cw20Coin {
                        address: holder.to_string(),
                        amount: Uint128::new(amount),
                    }],
                    mint: minter.map(|minter| MinterResponse {
                        minter: minter.to_string(),
                        cap: None,
                    }),
                    marketing: None,
                },
                &[],
                symbol,
                None,
            )
            .unwrap()
    }

    /// Gateway-native token: minted by the gateway and registered with it.
    pub fn create_gateway_token(&mut self, symbol: &str, holder: &Addr, amount: u128) -> Addr {
        let gateway = self.gateway.clone();
        let token = self.create_cw20(symbol, holder, amount, Some(&gateway));
        let relayer = self.relayer.clone();
        self.app
            .execute_contract(
                relayer,
                gateway,
                &GatewayExecuteMsg::RegisterToken {
                    symbol: symbol.to_string(),
                    address: token.to_string(),
                },
                &[],
            )
            .unwrap();
        token
    }

    pub fn approve(&mut self, owner: &Addr, token: &Addr, amount: u128) {
        let linker = self.linker.to_string();
        self.app
            .execute_contract(
                owner.clone(),
                token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: linker,
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn mint(&mut self, minter: &Addr, token: &Addr, recipient: &Addr, amount: u128) {
        self.app
            .execute_contract(
                minter.clone(),
                token.clone(),
                &Cw20ExecuteMsg::Mint {
                    recipient: recipient.to_string(),
                    amount: Uint128::new(amount),
                },
                &[],
            )
            .unwrap();
    }

    pub fn balance(&self, token: &Addr, owner: &Addr) -> u128 {
        let response: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: owner.to_string(),
                },
            )
            .unwrap();
        response.balance.u128()
    }

    pub fn supply(&self, token: &Addr) -> u128 {
        let response: TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})
            .unwrap();
        response.total_supply.u128()
    }

    // ------------------------------------------------------------------------
    // Gateway
    // ------------------------------------------------------------------------

    pub fn contract_calls(&self) -> Vec<ContractCallEntry> {
        let mut calls = vec![];
        let mut start_after = None;
        loop {
            let page: ContractCallsResponse = self
                .app
                .wrap()
                .query_wasm_smart(
                    &self.gateway,
                    &GatewayQueryMsg::ContractCalls {
                        start_after,
                        limit: Some(50),
                    },
                )
                .unwrap();
            match page.calls.last() {
                Some(last) => start_after = Some(last.sequence),
                None => break,
            }
            calls.extend(page.calls);
        }
        calls
    }

    pub fn is_delivered(&self, message_id: &str) -> bool {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.gateway,
                &GatewayQueryMsg::IsDelivered {
                    message_id: message_id.to_string(),
                },
            )
            .unwrap()
    }
}

pub fn id_binary(token_id: &TokenId) -> Binary {
    Binary::from(token_id.to_vec())
}

// ============================================================================
// Relayer
// ============================================================================

pub fn message_id(source: &Chain, sequence: u64) -> String {
    format!("{}-{}", source.name, sequence)
}

/// Calls recorded on `from` for `to` that `to` has not executed yet.
pub fn pending(from: &Chain, to: &Chain) -> Vec<ContractCallEntry> {
    from.contract_calls()
        .into_iter()
        .filter(|entry| entry.call.destination_chain == to.name)
        .filter(|entry| !to.is_delivered(&message_id(from, entry.sequence)))
        .collect()
}

/// Deliver one recorded call on the destination chain.
pub fn deliver(
    source_chain: &str,
    entry: &ContractCallEntry,
    to: &mut Chain,
) -> anyhow::Result<AppResponse> {
    let relayer = to.relayer.clone();
    let gateway = to.gateway.clone();
    to.app.execute_contract(
        relayer,
        gateway,
        &GatewayExecuteMsg::Deliver {
            message_id: format!("{}-{}", source_chain, entry.sequence),
            source_chain: source_chain.to_string(),
            source_address: entry.call.sender.to_string(),
            destination_address: entry.call.destination_address.clone(),
            payload: entry.call.payload.clone(),
            token: entry.call.token.clone(),
        },
        &[],
    )
}

/// Deliver everything pending from `from` to `to`, in recorded order.
pub fn relay(from: &Chain, to: &mut Chain) -> usize {
    let calls = pending(from, to);
    for entry in &calls {
        deliver(&from.name, entry, to).unwrap();
    }
    calls.len()
}

/// Relay between all chains until no call is left, following forwarding hops.
pub fn relay_all(chains: &mut [Chain]) {
    loop {
        let mut delivered = 0;
        for i in 0..chains.len() {
            for j in 0..chains.len() {
                if i == j {
                    continue;
                }
                let calls = pending(&chains[i], &chains[j]);
                let source = chains[i].name.clone();
                for entry in &calls {
                    deliver(&source, entry, &mut chains[j]).unwrap();
                }
                delivered += calls.len();
            }
        }
        if delivered == 0 {
            break;
        }
    }
}

/// Three chains, linked both ways with the given gateway support flags.
pub fn three_chains(supported: [bool; 3]) -> [Chain; 3] {
    let mut chains = [
        Chain::new("chain-a", "chaina"),
        Chain::new("chain-b", "chainb"),
        Chain::new("chain-c", "chainc"),
    ];
    for i in 0..3 {
        for j in 0..3 {
            if i == j {
                continue;
            }
            let name = chains[j].name.clone();
            let linker = chains[j].linker.to_string();
            let admin = chains[i].admin.clone();
            chains[i]
                .execute(
                    &admin,
                    &ExecuteMsg::SetRemoteLinker {
                        chain: name,
                        linker_address: linker,
                        gateway_supported: supported[j],
                    },
                    0,
                )
                .unwrap();
        }
    }
    chains
}

pub fn two_chains() -> (Chain, Chain) {
    let mut a = Chain::new("chain-a", "chaina");
    let mut b = Chain::new("chain-b", "chainb");
    a.link(&b, false);
    b.link(&a, false);
    (a, b)
}

pub fn root_cause(err: anyhow::Error) -> String {
    err.root_cause().to_string()
}
