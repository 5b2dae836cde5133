use whisper_gateway::application::services::SessionLimiter;

#[test]
fn given_free_capacity_when_acquiring_then_returns_permit() {
    let limiter = SessionLimiter::new(2);

    let permit = limiter.try_acquire();

    assert!(permit.is_some());
    assert_eq!(limiter.active(), 1);
}

#[test]
fn given_full_limiter_when_acquiring_then_returns_none() {
    let limiter = SessionLimiter::new(1);
    let _held = limiter.try_acquire().unwrap();

    assert!(limiter.try_acquire().is_none());
    assert_eq!(limiter.active(), 1);
}

#[test]
fn given_dropped_permit_when_acquiring_again_then_capacity_is_restored() {
    let limiter = SessionLimiter::new(1);
    drop(limiter.try_acquire().unwrap());

    assert_eq!(limiter.active(), 0);
    assert!(limiter.try_acquire().is_some());
}

#[test]
fn given_cloned_limiter_when_acquiring_then_clones_share_capacity() {
    let limiter = SessionLimiter::new(1);
    let clone = limiter.clone();
    let _held = limiter.try_acquire().unwrap();

    assert!(clone.try_acquire().is_none());
    assert_eq!(clone.capacity(), 1);
}
