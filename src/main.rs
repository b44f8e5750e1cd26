//! Carrom headless entry point
//!
//! Plays a computer-vs-computer match with the simulation core and prints
//! the result. Pass a JSON match config as the first argument, e.g.
//! `carrom-sim '{"seats":"Four","difficulty":"Hard","seed":7}'`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use carrom_sim::sim::{MatchEvent, Phase};
    use carrom_sim::{MatchConfig, Session};

    /// Give up on matches that stall (roughly an hour of play at 60 Hz)
    const MAX_FRAMES: u64 = 60 * 60 * 60;

    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(json) => MatchConfig::from_json(&json).unwrap_or_else(|e| {
            log::error!("Bad match config ({e}), using defaults");
            MatchConfig::default()
        }),
        None => MatchConfig::default(),
    };
    log::info!("Carrom (headless) starting...");

    let result = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&result);
    let mut session = Session::new(
        config,
        Some(Box::new(move |winner: Option<&str>| {
            *sink.borrow_mut() = Some(winner.map(str::to_string));
        })),
    )
    .with_autoplay(true);

    let mut frames = 0u64;
    let mut fouls = 0u32;
    while session.is_running() && session.state().phase != Phase::GameOver {
        session.frame();
        fouls += session
            .drain_events()
            .iter()
            .filter(|e| matches!(e, MatchEvent::Foul { .. }))
            .count() as u32;

        frames += 1;
        if frames >= MAX_FRAMES {
            log::warn!("No winner after {frames} frames, abandoning match");
            session.exit();
        }
    }

    let scores = session.state().scores();
    println!(
        "Shots: {}  Fouls: {}  White: {}/9  Black: {}/9  Frames: {}",
        session.state().shots_taken,
        fouls,
        scores.white,
        scores.black,
        frames
    );
    match result.borrow().as_ref() {
        Some(Some(winner)) => println!("{winner} wins!"),
        _ => println!("Match abandoned"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm
}
