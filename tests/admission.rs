use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use taskgate::admission::{AdmissionControl, LoginFailure};
use taskgate::config::{AdmissionConfig, LimiterConfig};
use taskgate::error::Error;
use taskgate::types::ids::UserId;
use taskgate::types::timestamp::ManualClock;

fn control(login: usize, api: usize) -> (Arc<AdmissionControl>, Arc<ManualClock>) {
    let config = AdmissionConfig {
        login: LimiterConfig::new(login, 60.0),
        api: LimiterConfig::new(api, 60.0),
    };
    let clock = Arc::new(ManualClock::new(0.0));
    let control = AdmissionControl::with_clock(&config, clock.clone()).unwrap();
    (Arc::new(control), clock)
}

fn ip(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(192, 168, 1, last))
}

#[test]
fn failed_logins_count_down_then_lock_out() {
    let (control, clock) = control(3, 60);
    let client = ip(10);

    assert!(control.guard_login(client).is_ok());
    assert_eq!(control.login_failed(client), LoginFailure::Retry { remaining: 2 });
    clock.advance(5.0);
    assert_eq!(control.login_failed(client), LoginFailure::Retry { remaining: 1 });
    clock.advance(5.0);
    assert_eq!(control.login_failed(client), LoginFailure::LockedOut { retry_after_secs: 50 });

    match control.guard_login(client) {
        Err(Error::TooManyAttempts { retry_after_secs }) => assert_eq!(retry_after_secs, 50),
        other => panic!("expected lockout, got {:?}", other),
    }

    // Other clients are unaffected
    assert!(control.guard_login(ip(11)).is_ok());

    clock.advance(50.5);
    assert!(control.guard_login(client).is_ok());
}

#[test]
fn successful_login_resets_penalty() {
    let (control, _) = control(2, 60);
    let client = ip(20);

    control.login_failed(client);
    control.login_failed(client);
    assert!(control.guard_login(client).is_err());

    control.login_succeeded(client);
    assert!(control.guard_login(client).is_ok());
    assert_eq!(control.login_limiter().get_remaining_requests(&client.to_string()), 2);
}

#[test]
fn api_budget_is_per_user_and_address() {
    let (control, clock) = control(5, 2);
    let user = UserId(7);

    assert_eq!(control.admit_api(user, ip(1)).unwrap().remaining, 1);
    assert_eq!(control.admit_api(user, ip(1)).unwrap().remaining, 0);

    clock.advance(0.4);
    let err = control.admit_api(user, ip(1)).unwrap_err();
    assert_eq!(err.retry_after_secs(), Some(60));
    assert!(matches!(err, Error::RateLimited { ref key, .. } if key == "7:192.168.1.1"));

    // Same user from another address, and another user from the same address
    assert!(control.admit_api(user, ip(2)).is_ok());
    assert!(control.admit_api(UserId(8), ip(1)).is_ok());
}

#[test]
fn login_and_api_budgets_are_separate() {
    let (control, _) = control(1, 1);
    let client = ip(30);

    control.login_failed(client);
    assert!(control.guard_login(client).is_err());
    assert!(control.admit_api(UserId(1), client).is_ok());
}

#[test]
fn concurrent_login_failures_see_distinct_counts() {
    let (control, _) = control(3, 60);
    let client = ip(40);

    let outcomes: Vec<LoginFailure> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| control.login_failed(client)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut retries: Vec<usize> = outcomes
        .iter()
        .filter_map(|o| match o {
            LoginFailure::Retry { remaining } => Some(*remaining),
            LoginFailure::LockedOut { .. } => None,
        })
        .collect();
    retries.sort_unstable();
    assert_eq!(retries, vec![1, 2]);
    assert!(outcomes.contains(&LoginFailure::LockedOut { retry_after_secs: 60 }));
    assert_eq!(outcomes.len() - retries.len(), 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_api_requests_respect_budget() {
    let (control, _) = control(5, 25);
    let user = UserId(99);
    let client = ip(99);

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let control = Arc::clone(&control);
            tokio::spawn(async move { control.admit_api(user, client).is_ok() })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 25);
    assert!(control.api_limiter().is_blocked("99:192.168.1.99"));
}
