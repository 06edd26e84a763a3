//! Integration tests for the account lifecycle
//!
//! Drives AccountService through its ports with a manual clock and a real
//! event log in a temp directory.
//!
//! Run with: cargo test --test account_lifecycle_test -- --nocapture

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use tempfile::TempDir;

use fundline_core::adapters::{ManualClock, MemoryNotifier, SwitchVerifier};
use fundline_core::config::Config;
use fundline_core::services::{EntryPoint, LoggingService};
use fundline_core::{AccountError, AccountService, AccountStatus};

// ============================================================================
// Test Helpers
// ============================================================================

struct Fixture {
    service: AccountService,
    clock: Arc<ManualClock>,
    verifier: Arc<SwitchVerifier>,
    notifier: Arc<MemoryNotifier>,
    logger: Arc<LoggingService>,
    _dir: TempDir,
}

const THRESHOLD_SECONDS: i64 = 30 * 24 * 60 * 60;

fn fixture(initial_balance: i64) -> Fixture {
    fixture_with_notifier(initial_balance, MemoryNotifier::new())
}

fn fixture_with_notifier(initial_balance: i64, notifier: MemoryNotifier) -> Fixture {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(LoggingService::new(dir.path(), EntryPoint::Embedded, "test").unwrap());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
    ));
    let verifier = Arc::new(SwitchVerifier::new(true));
    let notifier = Arc::new(notifier);

    let service = AccountService::open(
        "Saka",
        "id-saka",
        Decimal::from(initial_balance),
        &Config::default(),
        verifier.clone(),
        notifier.clone(),
        clock.clone(),
    )
    .unwrap()
    .with_logger(Arc::clone(&logger));

    Fixture {
        service,
        clock,
        verifier,
        notifier,
        logger,
        _dir: dir,
    }
}

fn events(f: &Fixture) -> Vec<String> {
    f.logger
        .get_for_account(f.service.account().id())
        .unwrap()
        .into_iter()
        .map(|e| e.event)
        .collect()
}

// ============================================================================
// Dormancy and reactivation
// ============================================================================

#[test]
fn test_dormancy_and_reactivation_walkthrough() {
    let mut f = fixture(100);

    let outcome = f.service.deposit(Decimal::from(50)).unwrap();
    assert_eq!(outcome.balance, Decimal::from(150));
    assert_eq!(f.service.status(), AccountStatus::Active);

    f.clock.advance(Duration::seconds(THRESHOLD_SECONDS + 1));
    assert_eq!(f.service.check_dormancy(), Ok(true));
    assert_eq!(f.service.status(), AccountStatus::Dormant);

    // Unverified attempt while still dormant
    f.verifier.set_verified(false);
    assert_eq!(
        f.service.withdraw(Decimal::from(10)),
        Err(AccountError::IdentityNotVerified)
    );
    assert_eq!(f.service.balance(), Decimal::from(150));
    assert_eq!(f.service.status(), AccountStatus::Dormant);
    assert_eq!(f.notifier.count(), 0);

    f.verifier.set_verified(true);
    let outcome = f.service.withdraw(Decimal::from(30)).unwrap();
    assert!(outcome.reactivated);
    assert_eq!(f.service.balance(), Decimal::from(120));
    assert_eq!(f.service.status(), AccountStatus::Active);
    assert_eq!(f.notifier.count(), 1);
    assert_eq!(f.notifier.sent(), vec![f.service.account().id()]);

    assert_eq!(
        events(&f),
        vec![
            "account_opened",
            "deposit",
            "account_deactivated",
            "operation_rejected",
            "withdrawal",
            "account_reactivated",
        ]
    );
}

#[test]
fn test_failed_notification_is_logged_and_deposit_stands() {
    let mut f = fixture_with_notifier(100, MemoryNotifier::failing());

    f.clock.advance(Duration::seconds(THRESHOLD_SECONDS + 1));
    assert_eq!(f.service.check_dormancy(), Ok(true));

    let outcome = f.service.deposit(Decimal::from(10)).unwrap();
    assert!(outcome.reactivated);
    assert_eq!(f.service.balance(), Decimal::from(110));
    assert_eq!(f.service.status(), AccountStatus::Active);
    assert_eq!(f.notifier.count(), 1);

    let events = events(&f);
    assert_eq!(
        events[events.len() - 3..],
        ["deposit", "account_reactivated", "notification_failed"]
    );

    let failure = f
        .logger
        .get_for_account(f.service.account().id())
        .unwrap()
        .pop()
        .unwrap();
    assert_eq!(failure.operation.as_deref(), Some("deposit"));
    assert!(failure.error_message.is_some());
}

#[test]
fn test_activity_resets_dormancy_window() {
    let mut f = fixture(10);

    f.clock.advance(Duration::seconds(THRESHOLD_SECONDS - 5));
    f.service.deposit(Decimal::ONE).unwrap();
    f.clock.advance(Duration::seconds(10));

    assert_eq!(f.service.check_dormancy(), Ok(false));
    assert_eq!(f.service.status(), AccountStatus::Active);
}

#[test]
fn test_repeated_dormancy_cycles_notify_each_time() {
    let mut f = fixture(10);

    for round in 1..=3 {
        f.clock.advance(Duration::seconds(THRESHOLD_SECONDS + 1));
        assert_eq!(f.service.check_dormancy(), Ok(true));
        f.service.deposit(Decimal::ONE).unwrap();
        assert_eq!(f.notifier.count(), round);
    }
}

// ============================================================================
// Closing
// ============================================================================

#[test]
fn test_closed_account_rejects_everything() {
    let mut f = fixture(0);

    f.service.close().unwrap();
    assert_eq!(f.service.status(), AccountStatus::Closed);
    let last_activity = f.service.account().last_activity_time();

    f.clock.advance(Duration::days(400));
    assert_eq!(f.service.deposit(Decimal::from(10)), Err(AccountError::AccountClosed));
    assert_eq!(f.service.withdraw(Decimal::from(10)), Err(AccountError::AccountClosed));
    assert_eq!(f.service.check_dormancy(), Err(AccountError::AccountClosed));
    assert_eq!(f.service.close(), Err(AccountError::AlreadyClosed));

    assert_eq!(f.service.balance(), Decimal::ZERO);
    assert_eq!(f.service.status(), AccountStatus::Closed);
    assert_eq!(f.service.account().last_activity_time(), last_activity);

    let errors = f.logger.get_errors(10).unwrap();
    assert_eq!(errors.len(), 4);
    assert_eq!(errors[0].error_details, Some("already_closed".to_string()));
}

#[test]
fn test_close_dormant_account_does_not_notify() {
    let mut f = fixture(40);

    f.clock.advance(Duration::seconds(THRESHOLD_SECONDS + 1));
    f.service.check_dormancy().unwrap();
    f.service.close().unwrap();

    assert_eq!(f.service.status(), AccountStatus::Closed);
    assert_eq!(f.service.balance(), Decimal::from(40));
    assert_eq!(f.notifier.count(), 0);
}

// ============================================================================
// Logging is optional
// ============================================================================

#[test]
fn test_service_without_logger() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let mut service = AccountService::open(
        "Saka",
        "id-saka",
        Decimal::ZERO,
        &Config::default(),
        Arc::new(SwitchVerifier::new(true)),
        Arc::new(MemoryNotifier::new()),
        clock,
    )
    .unwrap();

    service.deposit(Decimal::from(5)).unwrap();
    service.withdraw(Decimal::from(5)).unwrap();
    assert_eq!(service.balance(), Decimal::ZERO);
    assert_eq!(service.withdraw(Decimal::ONE), Err(AccountError::InsufficientFunds));
}
