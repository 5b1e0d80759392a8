use super::*;

#[test]
fn timers_fire_in_due_order_with_registration_tiebreak() {
    let s = Scheduler::new();
    let a = s.set_interval(Millis(80));
    let b = s.set_interval(Millis(80));
    let c = s.set_interval(Millis(50));

    let mut fired = Vec::new();
    while let Some(id) = s.pop_due(Millis(160)) {
        fired.push(id);
    }
    // 50: c, 80: a b, 100: c, 150: c, 160: a b
    assert_eq!(
        fired,
        vec![c.id(), a.id(), b.id(), c.id(), c.id(), a.id(), b.id()]
    );
    assert_eq!(s.now(), Millis(160));
    assert_eq!(s.next_due(), Some(Millis(200)));
}

#[test]
fn dropping_the_handle_cancels_the_timer() {
    let s = Scheduler::new();
    let h = s.set_interval(Millis(80));
    let id = h.id();
    assert!(s.is_active(id));
    assert_eq!(s.active_timers(), 1);

    drop(h);
    assert!(!s.is_active(id));
    assert_eq!(s.pop_due(Millis(1_000)), None);
    assert_eq!(s.next_due(), None);
}

#[test]
fn explicit_cancel_and_outliving_the_scheduler_are_safe() {
    let s = Scheduler::new();
    let h = s.set_interval(Millis(80));
    h.cancel();
    assert_eq!(s.active_timers(), 0);

    let h = s.set_interval(Millis(80));
    drop(s);
    drop(h);
}

#[test]
fn settle_moves_clock_forward_only() {
    let s = Scheduler::new();
    s.settle(Millis(30));
    s.settle(Millis(10));
    assert_eq!(s.now(), Millis(30));

    let h = s.set_interval(Millis(0));
    assert_eq!(s.pop_due(Millis(31)), Some(h.id()));
    assert_eq!(s.now(), Millis(31));
}

#[test]
fn timer_at_the_end_of_the_clock_fires_once_then_retires() {
    let s = Scheduler::new();
    s.settle(Millis(u64::MAX - 10));
    let h = s.set_interval(Millis(80));
    assert_eq!(s.next_due(), Some(Millis(u64::MAX)));

    let mut fired = 0;
    while s.pop_due(Millis(u64::MAX)).is_some() {
        fired += 1;
        assert!(fired < 2, "timer fired repeatedly at one due time");
    }
    assert_eq!(fired, 1);
    assert!(!s.is_active(h.id()));
    assert_eq!(s.next_due(), None);
    drop(h);
}
