use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::states::dividend_ledger::tests::RecordingSink;
use crate::states::{
    DividendTracker, HolderAccount, HolderSet, Liquidation, TokenLedger, TokenState, TransferReceipt,
};

const T: u64 = ONE_TOKEN;
const NOW: i64 = 1_700_000_000;

fn key(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

const AUTHORITY: u8 = 1;
const STATE: u8 = 2;

struct Launch {
    state: TokenState,
    holders: HolderSet,
}

impl Launch {
    /// Opens the recipient's record if needed, then transfers.
    fn send(&mut self, from: u8, to: u8, amount: u64) -> Result<TransferReceipt> {
        if !self.holders.contains(&key(to)) {
            self.holders.insert(HolderAccount::new(key(to), 255));
        }
        self.state.transfer(&mut self.holders, &key(from), &key(to), amount)
    }

    fn balance(&self, n: u8) -> u64 {
        self.state.token.balance_of(&self.holders, &key(n)).unwrap()
    }

    fn holder(&self, n: u8) -> &HolderAccount {
        self.holders.get(&key(n)).unwrap()
    }

    fn registered(&self) -> Vec<Pubkey> {
        let registry = &self.state.tracker.registry;
        (0..registry.len())
            .map(|index| registry.at(&self.holders, index).unwrap().unwrap())
            .collect()
    }
}

/// Same layout `initialize` produces, after two launch allocations
fn launched_state() -> Launch {
    let tracker = DividendTracker::with_settings(
        DEFAULT_CLAIM_WAIT_SECONDS,
        DEFAULT_MINIMUM_TRACKED_BALANCE,
        DEFAULT_SCALE_DECIMALS,
    )
    .unwrap();
    let token = TokenLedger::new(key(AUTHORITY), key(STATE), TOTAL_SUPPLY);
    let mut holders = HolderSet::default();
    holders.insert(token.genesis_holder(key(AUTHORITY), 255));

    let state = TokenState {
        authority: key(AUTHORITY),
        reward_mint: key(3),
        reward_vault: key(4),
        processing_budget: DEFAULT_PROCESSING_BUDGET,
        bump: 255,
        vault_bump: 255,
        token,
        tracker,
    };
    let mut launch = Launch { state, holders };
    launch.state.token.update_liquidation_threshold(1_000 * T).unwrap();
    launch.state.token.enable_trading().unwrap();
    launch.send(AUTHORITY, 10, 100_000 * T).unwrap();
    launch.send(AUTHORITY, 11, 300_000 * T).unwrap();
    launch
}

#[test]
fn test_launch_distribution_is_fee_free() {
    let launch = launched_state();
    assert_eq!(launch.balance(STATE), 0);
    assert_eq!(launch.registered(), vec![key(10), key(11)]);
    assert_eq!(launch.state.tracker.ledger.total_supply, 400_000 * T);
    assert!(!launch.holder(AUTHORITY).is_registered());
}

#[test]
fn test_taxed_transfers_feed_liquidation_and_rewards() {
    let mut launch = launched_state();
    launch.state.tracker.distribute(40).unwrap();

    let receipt = launch.send(10, 12, 20_000 * T).unwrap();
    assert_eq!(receipt.fee, 1_200 * T);
    assert_eq!(receipt.liquidation, None);
    assert_eq!(launch.balance(STATE), 1_200 * T);
    assert_eq!(launch.state.tracker.withdrawable_of(launch.holder(12)).unwrap(), 0);

    let receipt = launch.send(11, 12, 1_000 * T).unwrap();
    assert_eq!(
        receipt.liquidation,
        Some(Liquidation {
            tokens_for_liquidity: 400 * T,
            tokens_for_rewards: 800 * T,
        })
    );
    assert_eq!(launch.balance(STATE), 60 * T);
    assert_eq!(launch.balance(AUTHORITY), TOTAL_SUPPLY - 400_000 * T + 1_200 * T);
    assert!(!launch.state.token.is_swapping());

    let tracked = launch.balance(10) + launch.balance(11) + launch.balance(12);
    assert_eq!(launch.state.tracker.ledger.total_supply, tracked);

    let supply: u64 = launch.holders.iter().map(|holder| holder.balance).sum();
    assert_eq!(supply + launch.balance(STATE), TOTAL_SUPPLY);

    let mut sink = RecordingSink::default();
    let Launch { state, holders } = &mut launch;
    let report = state
        .tracker
        .process_batch(holders, state.processing_budget, NOW, &mut sink)
        .unwrap();
    assert_eq!(report.processed, 3);
    assert_eq!(report.paid, 2);
    assert_eq!(sink.paid, vec![(key(10), 10), (key(11), 30)]);
}

#[test]
fn test_trading_gate_before_launch() {
    let mut launch = launched_state();
    launch.state.token.trading_enabled = false;

    assert_eq!(launch.send(10, 12, T).unwrap_err(), error!(ErrorCode::TradingNotEnabled));
    let Launch { state, holders } = &mut launch;
    state.token.allow_pre_trading_transfer(holders, &key(10)).unwrap();
    let receipt = launch.send(10, 12, T).unwrap();
    assert_eq!(receipt.fee, 0);
}

#[test]
fn test_small_holders_are_not_tracked() {
    let mut launch = launched_state();
    launch.send(10, 13, 5_000 * T).unwrap();

    assert!(!launch.holder(13).is_registered());
    assert_eq!(launch.holder(13).tracked_balance, 0);

    launch.send(10, 13, 6_000 * T).unwrap();
    assert!(launch.holder(13).is_registered());
    assert_eq!(launch.holder(13).tracked_balance, launch.balance(13));
}

#[test]
fn test_dust_recipients_cost_nothing_globally() {
    let mut launch = launched_state();
    let registered = launch.registered();
    let supply = launch.state.tracker.ledger.total_supply;

    for n in 100..=250 {
        launch.send(10, n, 1).unwrap();
    }

    assert_eq!(launch.registered(), registered);
    assert_eq!(launch.state.tracker.ledger.total_supply, supply - 151);
    launch.state.tracker.registry.verify(&launch.holders).unwrap();
}

#[test]
fn test_registry_survives_many_joins_and_leaves() {
    let mut launch = launched_state();
    for n in 20..60 {
        launch.send(AUTHORITY, n, 20_000 * T).unwrap();
    }
    assert_eq!(launch.state.tracker.registry.len(), 42);

    // every fourth holder sells out to one wallet that joins once
    for n in (20..60).step_by(4) {
        launch.send(n, 200, 20_000 * T).unwrap();
    }
    assert_eq!(launch.state.tracker.registry.len(), 33);
    assert!(launch.holder(200).is_registered());
    launch.state.tracker.registry.verify(&launch.holders).unwrap();

    let tracked: u64 = launch.holders.iter().map(|holder| holder.tracked_balance).sum();
    assert_eq!(launch.state.tracker.ledger.total_supply, tracked);
}

#[test]
fn test_leaving_holder_can_claim_and_close() {
    let mut launch = launched_state();
    launch.state.tracker.distribute(4_000).unwrap();
    launch.send(10, 12, 100_000 * T).unwrap();

    let Launch { state, holders } = &mut launch;
    let record = holders.get_mut(&key(10)).unwrap();
    assert!(!record.is_closable(&state.tracker.ledger).unwrap());

    let mut sink = RecordingSink::default();
    assert_eq!(state.tracker.claim(record, NOW, &mut sink).unwrap(), 1_000);
    assert!(record.is_closable(&state.tracker.ledger).unwrap());
}

#[test]
fn test_underfunded_vault_halts_payouts() {
    let mut launch = launched_state();
    launch.state.tracker.distribute(40).unwrap();
    let mut sink = RecordingSink { vault: Some(20), ..Default::default() };

    let Launch { state, holders } = &mut launch;
    assert_eq!(
        state.tracker.process_batch(holders, 2, NOW, &mut sink).unwrap_err(),
        error!(ErrorCode::InsufficientRewardReserve)
    );
}
