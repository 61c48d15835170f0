//! Stable-level wait against a scripted readiness input.

use smartdrain::drivers::stabilizer::await_stable_level;
use smartdrain::pins::{InputPin, Level};

use crate::mock_hw::{MockBoard, ReadyBehaviour};

fn board(ready: ReadyBehaviour) -> MockBoard {
    let mut b = MockBoard::new(10.0);
    b.ready = ready;
    b
}

#[test]
fn steady_target_returns_after_hold() {
    let mut b = board(ReadyBehaviour::Constant(Level::High));
    let got = await_stable_level(&mut b, InputPin::PrimeReady, Level::High, 5_000, 30_000);
    assert_eq!(got, Level::High);
    assert!((5_000..=5_020).contains(&b.now()), "returned at {}", b.now());
}

#[test]
fn wrong_level_times_out() {
    let mut b = board(ReadyBehaviour::Constant(Level::Low));
    let got = await_stable_level(&mut b, InputPin::PrimeReady, Level::High, 5_000, 30_000);
    assert_eq!(got, Level::Low);
    assert!((30_000..=30_020).contains(&b.now()));
}

#[test]
fn glitch_restarts_hold_window() {
    let mut b = board(ReadyBehaviour::Script(Box::new(|t| {
        if (2_000..2_010).contains(&t) { Level::Low } else { Level::High }
    })));
    let got = await_stable_level(&mut b, InputPin::PrimeReady, Level::High, 5_000, 30_000);
    assert_eq!(got, Level::High);
    assert!(b.now() >= 7_000, "hold must restart after the glitch");
    assert!(b.now() <= 7_020);
}

#[test]
fn late_settle_reports_matching_last_sample() {
    // Becomes HIGH at 28s: only 2s left in the budget, hold needs 5s.
    let mut b = board(ReadyBehaviour::Script(Box::new(|t| Level::from(t >= 28_000))));
    let got = await_stable_level(&mut b, InputPin::PrimeReady, Level::High, 5_000, 30_000);
    // The last sample matches even though the hold never completed.
    assert_eq!(got, Level::High);
    assert!((30_000..=30_020).contains(&b.now()));
}

#[test]
fn works_across_clock_wrap() {
    let mut b = board(ReadyBehaviour::Constant(Level::Low));
    b.set_now(u32::MAX - 2_000);
    let start = b.now();
    let got = await_stable_level(&mut b, InputPin::PrimeReady, Level::Low, 10_000, 60_000);
    assert_eq!(got, Level::Low);
    let elapsed = b.now().wrapping_sub(start);
    assert!((10_000..=10_020).contains(&elapsed));
}
