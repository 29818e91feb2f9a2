//! # Token Lifecycle Flows
//!
//! End-to-end create → issue → transfer → retire → open/close sequences
//! through the public `Ledger` API, with the conservation invariant
//! (`sum(balances) == supply`) asserted at every quiescent point.

#[cfg(test)]
mod tests {
    use crate::support::{amt, name, sym, Bench};
    use ledger_core::{LedgerError, TransferNoticePayload};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // =========================================================================
    // CREATE
    // =========================================================================

    #[test]
    fn test_create_requires_ledger_authority() {
        let bench = Bench::new();
        bench.host.revoke_auth(&name("ledger"));
        assert!(matches!(
            bench.ledger.create(&name("alice"), &amt("1000.0000 TKN")),
            Err(LedgerError::MissingAuthority { .. })
        ));
    }

    #[test]
    fn test_create_rejects_duplicate_symbol_code() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        // Same code with a different precision still collides.
        assert!(matches!(
            bench.ledger.create(&name("bob"), &amt("1000.00 TKN")),
            Err(LedgerError::SupplyAlreadyExists { .. })
        ));
    }

    #[test]
    fn test_create_rejects_non_positive_max_supply() {
        let bench = Bench::new();
        assert_eq!(
            bench.ledger.create(&name("alice"), &amt("0.0000 TKN")),
            Err(LedgerError::NonPositiveQuantity)
        );
        assert_eq!(
            bench.ledger.create(&name("alice"), &amt("-1.0000 TKN")),
            Err(LedgerError::NonPositiveQuantity)
        );
    }

    // =========================================================================
    // ISSUE
    // =========================================================================

    #[test]
    fn test_issue_credits_issuer_and_supply() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        bench
            .ledger
            .issue(&name("alice"), &amt("100.0000 TKN"), "")
            .unwrap();

        assert_eq!(bench.raw_supply("0.0000 TKN"), 1_000_000);
        assert_eq!(bench.raw_balance("alice", "0.0000 TKN"), Some(1_000_000));
        bench.assert_conservation("0.0000 TKN");
    }

    #[test]
    fn test_issue_beyond_max_supply_fails_cleanly() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        bench
            .ledger
            .issue(&name("alice"), &amt("100.0000 TKN"), "")
            .unwrap();

        // 100 + 901 > 1000
        let err = bench
            .ledger
            .issue(&name("alice"), &amt("901.0000 TKN"), "")
            .unwrap_err();
        assert!(matches!(err, LedgerError::SupplyCeilingExceeded { .. }));

        // State unchanged.
        assert_eq!(bench.raw_supply("0.0000 TKN"), 1_000_000);
        assert_eq!(bench.raw_balance("alice", "0.0000 TKN"), Some(1_000_000));
        bench.assert_conservation("0.0000 TKN");
    }

    #[test]
    fn test_issue_only_to_issuer_account() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        bench.host.grant_auth(&name("bob"));
        assert_eq!(
            bench.ledger.issue(&name("bob"), &amt("1.0000 TKN"), ""),
            Err(LedgerError::IssueToNonIssuer)
        );
    }

    #[test]
    fn test_issue_requires_issuer_authority() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        bench.host.revoke_auth(&name("alice"));
        assert!(matches!(
            bench.ledger.issue(&name("alice"), &amt("1.0000 TKN"), ""),
            Err(LedgerError::MissingAuthority { .. })
        ));
    }

    #[test]
    fn test_issue_validates_symbol_precision_memo_and_sign() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");

        assert!(matches!(
            bench.ledger.issue(&name("alice"), &amt("1.00 TKN"), ""),
            Err(LedgerError::SymbolMismatch { .. })
        ));
        assert_eq!(
            bench.ledger.issue(&name("alice"), &amt("0.0000 TKN"), ""),
            Err(LedgerError::NonPositiveQuantity)
        );
        assert!(matches!(
            bench
                .ledger
                .issue(&name("alice"), &amt("1.0000 TKN"), &"m".repeat(257)),
            Err(LedgerError::MemoTooLong { .. })
        ));
        assert!(matches!(
            bench.ledger.issue(&name("alice"), &amt("1.0000 GEM"), ""),
            Err(LedgerError::SupplyNotFound { .. })
        ));
    }

    // =========================================================================
    // TRANSFER
    // =========================================================================

    #[test]
    fn test_transfer_moves_balance_and_notifies_both_parties() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        bench
            .ledger
            .issue(&name("alice"), &amt("100.0000 TKN"), "")
            .unwrap();
        bench.host.add_account(&name("bob"));

        bench
            .ledger
            .transfer(&name("alice"), &name("bob"), &amt("40.0000 TKN"), "pay")
            .unwrap();

        assert_eq!(bench.raw_balance("alice", "0.0000 TKN"), Some(600_000));
        assert_eq!(bench.raw_balance("bob", "0.0000 TKN"), Some(400_000));
        bench.assert_conservation("0.0000 TKN");

        let notifications = bench.host.notifications();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].0, name("alice"));
        assert_eq!(notifications[1].0, name("bob"));
        let notice: TransferNoticePayload = bincode::deserialize(&notifications[0].1).unwrap();
        assert_eq!(notice.quantity, amt("40.0000 TKN"));
        assert_eq!(notice.memo, "pay");
    }

    #[test]
    fn test_transfer_rejections_leave_state_untouched() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        bench
            .ledger
            .issue(&name("alice"), &amt("100.0000 TKN"), "")
            .unwrap();
        bench.host.add_account(&name("bob"));

        assert_eq!(
            bench
                .ledger
                .transfer(&name("alice"), &name("alice"), &amt("1.0000 TKN"), ""),
            Err(LedgerError::SelfTransfer)
        );
        assert!(matches!(
            bench
                .ledger
                .transfer(&name("alice"), &name("ghost"), &amt("1.0000 TKN"), ""),
            Err(LedgerError::AccountNotFound { .. })
        ));
        assert!(matches!(
            bench
                .ledger
                .transfer(&name("alice"), &name("bob"), &amt("500.0000 TKN"), ""),
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert!(matches!(
            bench
                .ledger
                .transfer(&name("bob"), &name("alice"), &amt("1.0000 TKN"), ""),
            Err(LedgerError::MissingAuthority { .. })
        ));

        assert_eq!(bench.raw_balance("alice", "0.0000 TKN"), Some(1_000_000));
        assert_eq!(bench.raw_balance("bob", "0.0000 TKN"), None);
        bench.assert_conservation("0.0000 TKN");
    }

    #[test]
    fn test_transfer_storage_payer_attribution() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        bench
            .ledger
            .issue(&name("alice"), &amt("100.0000 TKN"), "")
            .unwrap();

        // bob exists but has not authorized the acting context: sender pays.
        bench.host.add_account(&name("bob"));
        bench
            .ledger
            .transfer(&name("alice"), &name("bob"), &amt("1.0000 TKN"), "")
            .unwrap();
        let code = amt("0.0000 TKN").symbol.code().clone();
        assert_eq!(
            bench.store.balance_payer(&name("bob"), &code).unwrap(),
            Some(name("alice"))
        );

        // carol has authorized the acting context: she pays for her row.
        bench.host.grant_auth(&name("carol"));
        bench
            .ledger
            .transfer(&name("alice"), &name("carol"), &amt("1.0000 TKN"), "")
            .unwrap();
        assert_eq!(
            bench.store.balance_payer(&name("carol"), &code).unwrap(),
            Some(name("carol"))
        );
    }

    // =========================================================================
    // RETIRE
    // =========================================================================

    #[test]
    fn test_retire_debits_issuer_and_shrinks_supply() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        bench
            .ledger
            .issue(&name("alice"), &amt("100.0000 TKN"), "")
            .unwrap();
        bench.host.add_account(&name("bob"));
        bench
            .ledger
            .transfer(&name("alice"), &name("bob"), &amt("40.0000 TKN"), "pay")
            .unwrap();

        bench
            .ledger
            .retire(&amt("10.0000 TKN"), "")
            .unwrap();

        assert_eq!(bench.raw_supply("0.0000 TKN"), 900_000);
        assert_eq!(bench.raw_balance("alice", "0.0000 TKN"), Some(500_000));
        bench.assert_conservation("0.0000 TKN");
    }

    #[test]
    fn test_retire_beyond_issuer_balance_fails() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        bench
            .ledger
            .issue(&name("alice"), &amt("100.0000 TKN"), "")
            .unwrap();
        bench.host.add_account(&name("bob"));
        bench
            .ledger
            .transfer(&name("alice"), &name("bob"), &amt("60.0000 TKN"), "")
            .unwrap();

        // Circulating supply is 100 but the issuer only holds 40.
        assert!(matches!(
            bench.ledger.retire(&amt("50.0000 TKN"), ""),
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert_eq!(bench.raw_supply("0.0000 TKN"), 1_000_000);
        bench.assert_conservation("0.0000 TKN");
    }

    // =========================================================================
    // OPEN / CLOSE
    // =========================================================================

    #[test]
    fn test_open_is_idempotent_and_payer_authorized() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        bench.host.add_account(&name("bob"));
        bench.host.grant_auth(&name("payer"));

        bench
            .ledger
            .open(&name("bob"), &sym("TKN", 4), &name("payer"))
            .unwrap();
        assert_eq!(bench.raw_balance("bob", "0.0000 TKN"), Some(0));

        // Second open: no-op, not an error, single record.
        bench
            .ledger
            .open(&name("bob"), &sym("TKN", 4), &name("payer"))
            .unwrap();
        assert_eq!(bench.raw_balance("bob", "0.0000 TKN"), Some(0));
        let code = sym("TKN", 4).code().clone();
        assert_eq!(
            bench.store.balance_payer(&name("bob"), &code).unwrap(),
            Some(name("payer"))
        );

        // Unauthorized payer cannot open.
        assert!(matches!(
            bench
                .ledger
                .open(&name("bob"), &sym("TKN", 4), &name("freeloader")),
            Err(LedgerError::MissingAuthority { .. })
        ));
        // Precision must match the supply record exactly.
        assert!(matches!(
            bench.ledger.open(&name("bob"), &sym("TKN", 2), &name("payer")),
            Err(LedgerError::SymbolMismatch { .. })
        ));
        // Owner must exist.
        assert!(matches!(
            bench
                .ledger
                .open(&name("ghost"), &sym("TKN", 4), &name("payer")),
            Err(LedgerError::AccountNotFound { .. })
        ));
    }

    #[test]
    fn test_close_requires_exactly_zero_balance() {
        let bench = Bench::new();
        bench.create_token("alice", "1000.0000 TKN");
        bench
            .ledger
            .issue(&name("alice"), &amt("100.0000 TKN"), "")
            .unwrap();
        bench.host.grant_auth(&name("bob"));
        bench
            .ledger
            .transfer(&name("alice"), &name("bob"), &amt("40.0000 TKN"), "")
            .unwrap();

        // Non-zero balance: close fails, record persists.
        assert!(matches!(
            bench.ledger.close(&name("bob"), &sym("TKN", 4)),
            Err(LedgerError::NonZeroBalance { .. })
        ));
        assert_eq!(bench.raw_balance("bob", "0.0000 TKN"), Some(400_000));

        // Drain and close.
        bench
            .ledger
            .transfer(&name("bob"), &name("alice"), &amt("40.0000 TKN"), "back")
            .unwrap();
        bench.ledger.close(&name("bob"), &sym("TKN", 4)).unwrap();
        assert_eq!(bench.raw_balance("bob", "0.0000 TKN"), None);
        bench.assert_conservation("0.0000 TKN");

        // Missing record: close fails.
        assert!(matches!(
            bench.ledger.close(&name("bob"), &sym("TKN", 4)),
            Err(LedgerError::BalanceNotFound { .. })
        ));
    }

    // =========================================================================
    // CONSERVATION UNDER RANDOM SEQUENCES
    // =========================================================================

    #[test]
    fn test_conservation_holds_across_random_operation_mix() {
        let bench = Bench::new();
        bench.create_token("alice", "100000.0000 TKN");
        for account in ["bob", "carol"] {
            bench.host.grant_auth(&name(account));
        }

        let accounts = ["alice", "bob", "carol"];
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let raw: i64 = rng.gen_range(1..=50_000);
            let quantity = ledger_core::Amount::new(raw, sym("TKN", 4)).unwrap();
            match rng.gen_range(0..4) {
                0 => {
                    let _ = bench.ledger.issue(&name("alice"), &quantity, "");
                }
                1 => {
                    let _ = bench.ledger.retire(&quantity, "");
                }
                _ => {
                    let from = accounts[rng.gen_range(0..accounts.len())];
                    let to = accounts[rng.gen_range(0..accounts.len())];
                    let _ = bench
                        .ledger
                        .transfer(&name(from), &name(to), &quantity, "");
                }
            }
            bench.assert_conservation("0.0000 TKN");
        }
    }
}
