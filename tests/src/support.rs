//! Shared fixture for integration tests: a ledger wired to the in-memory
//! store and a scripted host, plus small constructors for names and
//! amounts.

use std::sync::Arc;

use ledger_core::{AccountName, Amount, InMemoryLedgerStore, Ledger, ScriptedHost, Symbol};

/// A ledger under test with handles to both adapters.
pub struct Bench {
    pub store: Arc<InMemoryLedgerStore>,
    pub host: Arc<ScriptedHost>,
    pub ledger: Ledger,
}

impl Bench {
    /// Fresh bench. The ledger authority `ledger` is pre-authorized so
    /// `create` works out of the box. Set `RUST_LOG=debug` to see the
    /// service's tracing output while a test runs.
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let store = Arc::new(InMemoryLedgerStore::new());
        let host = Arc::new(ScriptedHost::new());
        let authority = name("ledger");
        host.grant_auth(&authority);
        let ledger = Ledger::new(store.clone(), host.clone(), authority);
        Self {
            store,
            host,
            ledger,
        }
    }

    /// Creates a token and authorizes its issuer in one step.
    pub fn create_token(&self, issuer: &str, max_supply: &str) {
        let issuer = name(issuer);
        self.host.grant_auth(&issuer);
        self.ledger
            .create(&issuer, &amt(max_supply))
            .expect("create failed");
    }

    /// Balance of `owner` in raw units, or None if no record exists.
    pub fn raw_balance(&self, owner: &str, amount_like: &str) -> Option<i64> {
        use ledger_core::LedgerStore;
        let symbol = amt(amount_like).symbol;
        self.store
            .find_balance(&name(owner), symbol.code())
            .unwrap()
            .map(|record| record.balance.amount)
    }

    /// Current supply in raw units.
    pub fn raw_supply(&self, amount_like: &str) -> i64 {
        use ledger_core::LedgerStore;
        let symbol = amt(amount_like).symbol;
        self.store
            .find_supply(symbol.code())
            .unwrap()
            .expect("no supply record")
            .supply
            .amount
    }

    /// Asserts `sum(balances) == supply` for the symbol of `amount_like`.
    pub fn assert_conservation(&self, amount_like: &str) {
        let symbol = amt(amount_like).symbol;
        assert_eq!(
            self.store.total_balance(symbol.code()).unwrap(),
            self.raw_supply(amount_like),
            "conservation violated for {symbol}"
        );
    }
}

pub fn name(s: &str) -> AccountName {
    AccountName::new(s).unwrap()
}

pub fn amt(s: &str) -> Amount {
    s.parse().unwrap()
}

pub fn sym(code: &str, precision: u8) -> Symbol {
    Symbol::parse(code, precision).unwrap()
}
