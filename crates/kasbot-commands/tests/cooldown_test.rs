//! Integration tests for the cooldown tracker's public behavior.

use kasbot_commands::cooldown::{format_wait_message, is_gated, CooldownTracker, COOLDOWN_WINDOW};
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn successful_invocation_blocks_until_the_window_elapses() {
    let tracker = CooldownTracker::new();
    let t0 = Instant::now();
    tracker.record(42, "kexchanges", t0);

    // blocked for every epsilon short of the window
    for offset in [1u64, 60, 14 * 60, 15 * 60 - 1] {
        assert!(
            tracker
                .check(42, "kexchanges", t0 + Duration::from_secs(offset))
                .is_some(),
            "expected blocked at +{offset}s"
        );
    }

    // free exactly at and after the window
    assert!(tracker.check(42, "kexchanges", t0 + COOLDOWN_WINDOW).is_none());
    assert!(tracker
        .check(42, "kexchanges", t0 + COOLDOWN_WINDOW + Duration::from_secs(1))
        .is_none());
}

#[tokio::test(start_paused = true)]
async fn gating_is_independent_per_command_and_user() {
    let tracker = CooldownTracker::new();
    let t0 = Instant::now();
    tracker.record(42, "kexchanges", t0);

    let probe = t0 + Duration::from_secs(5);
    // same user, other gated command: free
    assert!(tracker.check(42, "kcoingecko", probe).is_none());
    // other user, same command: free
    assert!(tracker.check(43, "kexchanges", probe).is_none());
    // the recorded pair itself: blocked
    assert!(tracker.check(42, "kexchanges", probe).is_some());
}

#[tokio::test(start_paused = true)]
async fn expired_entries_are_cleaned_up_automatically() {
    let tracker = CooldownTracker::new();
    tracker.record(42, "kexchanges", Instant::now());
    tracker.record(42, "kcoingecko", Instant::now());
    assert_eq!(tracker.active_entries(), 2);

    tokio::time::sleep(COOLDOWN_WINDOW + Duration::from_secs(1)).await;
    tokio::task::yield_now().await;

    assert_eq!(tracker.active_entries(), 0);
    assert_eq!(tracker.tracked_users(), 0, "empty user record must be dropped");
}

#[tokio::test(start_paused = true)]
async fn remaining_time_counts_down() {
    let tracker = CooldownTracker::new();
    let t0 = Instant::now();
    tracker.record(42, "kcoingecko", t0);

    let remaining = tracker
        .check(42, "kcoingecko", t0 + Duration::from_secs(60))
        .expect("blocked");
    assert_eq!(remaining, Duration::from_secs(14 * 60));

    let message = format_wait_message("kcoingecko", remaining);
    assert!(message.contains("**14 minutes and 0 seconds**"));
    assert!(message.contains("`kcoingecko`"));
}

#[test]
fn only_the_two_market_commands_are_gated() {
    let gated: Vec<&str> = ["kprice", "kexchanges", "kbal", "kcoingecko", "khash-details"]
        .into_iter()
        .filter(|c| is_gated(c))
        .collect();
    assert_eq!(gated, vec!["kexchanges", "kcoingecko"]);
}
