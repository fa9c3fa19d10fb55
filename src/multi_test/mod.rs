//! [`cw_multi_test`] integration: a Stargate module speaking the Osmosis
//! token factory protobuf messages, a custom module serving the contract
//! bindings, and a preconfigured app wiring both to the bank.

use anyhow::Result as AnyResult;
use cosmwasm_std::testing::{mock_env, MockApi, MockStorage};
use cosmwasm_std::{Addr, Coin};
use cw_multi_test::{
    App, BankKeeper, BasicAppBuilder, DistributionKeeper, GovFailingModule, IbcFailingModule, StakeKeeper, WasmKeeper,
};

use crate::bindings::{TokenFactoryMsg, TokenFactoryQuery};
use crate::config::TokenFactoryConfig;
use crate::gas::SharedGasMeter;
use crate::types::GenesisState;

/// Bank adapters implementing the keeper's ledger traits.
pub mod ledger;
/// The token factory [`cw_multi_test::Module`] implementations.
pub mod modules;

pub use modules::{TokenFactory, TokenFactoryBindings};

pub type TokenFactoryApp = App<
    BankKeeper,
    MockApi,
    MockStorage,
    TokenFactoryBindings,
    WasmKeeper<TokenFactoryMsg, TokenFactoryQuery>,
    StakeKeeper,
    DistributionKeeper,
    IbcFailingModule,
    GovFailingModule,
    TokenFactory,
>;

/// Builds a [`TokenFactoryApp`] with initial balances and a token factory
/// genesis.
///
/// # Panics
///
/// [`TokenFactoryAppBuilder::build`] panics when the genesis or the initial
/// balances cannot be loaded. A chain refuses to start on a bad genesis.
#[derive(Default)]
pub struct TokenFactoryAppBuilder {
    config: TokenFactoryConfig,
    genesis: GenesisState,
    balances: Vec<(Addr, Vec<Coin>)>,
    gas: SharedGasMeter,
}

impl TokenFactoryAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: TokenFactoryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_genesis(mut self, genesis: GenesisState) -> Self {
        self.genesis = genesis;
        self
    }

    pub fn with_balance(mut self, address: impl Into<String>, coins: Vec<Coin>) -> Self {
        self.balances.push((Addr::unchecked(address), coins));
        self
    }

    /// Shares `gas` with the modules, so the caller can inspect consumption.
    pub fn with_gas_meter(mut self, gas: SharedGasMeter) -> Self {
        self.gas = gas;
        self
    }

    pub fn build(self) -> TokenFactoryApp {
        let Self {
            config,
            genesis,
            balances,
            gas,
        } = self;

        let factory = TokenFactory::new(config).with_gas_meter(gas);
        let bindings = TokenFactoryBindings::new(factory.clone());

        BasicAppBuilder::<TokenFactoryMsg, TokenFactoryQuery>::new_custom()
            .with_custom(bindings)
            .with_stargate(factory)
            .build(|router, api, storage| {
                for (address, coins) in balances {
                    if let Err(err) = router.bank.init_balance(storage, &address, coins) {
                        panic!("cannot fund {address}: {err}");
                    }
                }

                let block = mock_env().block;
                if let Err(err) = router.stargate.init_genesis(api, storage, &*router, &block, &genesis) {
                    tracing::error!(error = %err, "failed to load tokenfactory genesis");
                    panic!("invalid tokenfactory genesis: {err}");
                }
            })
    }
}

/// Exports the token factory genesis of a running app.
pub fn export_genesis(app: &TokenFactoryApp) -> AnyResult<GenesisState> {
    app.read_module(|router, _api, storage| router.stargate.export_genesis(storage, app))
}
