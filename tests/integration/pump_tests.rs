//! Pump controller: readiness handshake, prime and flush sequences.

use smartdrain::config::DrainConfig;
use smartdrain::drivers::pump::{PrimeTiming, PumpController, PumpSelector};
use smartdrain::pins::Level;

use crate::mock_hw::{MockBoard, ReadyBehaviour};

fn setup(ready: ReadyBehaviour) -> (PumpController, MockBoard) {
    let mut board = MockBoard::new(10.0);
    board.ready = ready;
    let pumps = PumpController::new(PrimeTiming::from_config(&DrainConfig::default()));
    (pumps, board)
}

#[test]
fn prime_succeeds_when_readiness_drops() {
    let (mut pumps, mut b) = setup(ReadyBehaviour::FollowsPump);
    assert!(pumps.prime(&mut b, PumpSelector::A));
    assert_eq!(b.pump(), PumpSelector::None);
    assert_eq!(pumps.current(), PumpSelector::None);
    assert!(!pumps.is_running());
    assert_eq!(b.pumps_run(), vec![PumpSelector::A]);
    // 5s ready hold + 10s completion hold.
    assert!(b.now() >= 15_000 && b.now() < 15_100, "took {}ms", b.now());
}

#[test]
fn prime_never_activates_pump_if_not_ready() {
    let (mut pumps, mut b) = setup(ReadyBehaviour::Constant(Level::Low));
    assert!(!pumps.prime(&mut b, PumpSelector::B));
    assert!(b.pumps_run().is_empty());
    assert_eq!(b.pump(), PumpSelector::None);
    assert!(b.now() >= 30_000 && b.now() < 30_100);
}

#[test]
fn prime_fails_and_stops_pump_if_readiness_stays_high() {
    let (mut pumps, mut b) = setup(ReadyBehaviour::Constant(Level::High));
    assert!(!pumps.prime(&mut b, PumpSelector::B));
    assert_eq!(b.pumps_run(), vec![PumpSelector::B]);
    assert_eq!(b.pump(), PumpSelector::None);
    // 5s ready hold + full 60s completion budget.
    assert!(b.now() >= 65_000 && b.now() < 65_100);
}

#[test]
fn prime_fails_on_flapping_readiness() {
    // Drops once the pump runs, but bounces HIGH every 5s.
    let (mut pumps, mut b) = setup(ReadyBehaviour::Script(Box::new(|t| {
        if t < 5_100 || t % 5_000 < 20 { Level::High } else { Level::Low }
    })));
    assert!(!pumps.prime(&mut b, PumpSelector::C));
    assert_eq!(b.pump(), PumpSelector::None);
}

#[test]
fn prime_sequence_runs_a_b_c_and_reports() {
    let (mut pumps, mut b) = setup(ReadyBehaviour::FollowsPump);
    let mut announced = Vec::new();
    let report = pumps.run_prime_sequence(&mut b, |_hw, pump| announced.push(pump));

    assert_eq!(announced, PumpSelector::PUMPS.to_vec());
    assert_eq!(b.pumps_run(), PumpSelector::PUMPS.to_vec());
    assert_eq!(report.primed_count(), 3);
    assert_eq!(b.led_writes(), vec![Level::Low]);
    assert_eq!(b.pump(), PumpSelector::None);
    // Three 15s primes plus the 1s settle.
    assert!(b.now() >= 46_000 && b.now() < 46_300);
}

#[test]
fn prime_sequence_continues_past_failures() {
    let (mut pumps, mut b) = setup(ReadyBehaviour::Constant(Level::Low));
    let mut attempts = 0;
    let report = pumps.run_prime_sequence(&mut b, |_hw, _pump| attempts += 1);
    assert_eq!(attempts, 3);
    assert_eq!(report.primed_count(), 0);
    assert!(report.results.iter().all(|(_, ok)| !ok));
    assert_eq!(
        report.results.map(|(p, _)| p),
        [PumpSelector::A, PumpSelector::B, PumpSelector::C]
    );
}

#[test]
fn flush_runs_each_pump_for_a_second() {
    let (mut pumps, mut b) = setup(ReadyBehaviour::Constant(Level::Low));
    pumps.run_flush_sequence(&mut b);

    let running: Vec<_> = b
        .pump_history
        .iter()
        .filter(|(_, p)| *p != PumpSelector::None)
        .copied()
        .collect();
    assert_eq!(
        running,
        vec![(0, PumpSelector::A), (1_000, PumpSelector::B), (2_000, PumpSelector::C)]
    );
    assert_eq!(b.pump_history.last(), Some(&(3_000, PumpSelector::None)));
    assert_eq!(b.now(), 4_000);
    assert_eq!(b.led_writes(), vec![Level::Low]);
}
