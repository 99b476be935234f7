#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use zkhuman_behavior::BehavioralCollector;
use zkhuman_nullables::NullClock;
use zkhuman_types::VerificationParams;

#[derive(Debug, Arbitrary)]
enum Input {
    Move { dt: u16, x: f64, y: f64 },
    Interaction { dt: u16 },
    Reset,
}

// The collector's score stays in [0, 100] for any input sequence, including
// non-finite coordinates.
fuzz_target!(|inputs: Vec<Input>| {
    let clock = NullClock::new(0);
    let mut collector = BehavioralCollector::with_clock(&clock, &VerificationParams::default());
    for input in inputs {
        match input {
            Input::Move { dt, x, y } => {
                clock.advance(u64::from(dt));
                collector.track_move(x, y);
            }
            Input::Interaction { dt } => {
                clock.advance(u64::from(dt));
                collector.track_interaction();
            }
            Input::Reset => collector.reset(),
        }
        let score = collector.human_score();
        assert!((0.0..=100.0).contains(&score), "score {score} out of range");
    }
    assert!(collector.sample_count() <= 100);
});
