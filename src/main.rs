//! Skyline Duel headless driver
//!
//! Stands in for the real rendering/input collaborators: plays a scripted
//! match through the cooperative tick loop (one flight step per would-be
//! rendered frame), logs every resolution, and drains audio cues to the
//! log as they arrive. Pass a seed as the first argument to replay a
//! specific match.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use skyline_duel::audio::CueQueue;
use skyline_duel::config::MatchConfig;
use skyline_duel::sim::{FlightStep, Match, MatchPhase, ShotCommand};

/// Give up and abandon the match after this many throws; stands in for the
/// player pressing escape mid-game.
const MAX_THROWS: u32 = 400;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC17B);
    let config = MatchConfig {
        seed,
        ..Default::default()
    };

    let (cues, cue_rx) = CueQueue::channel();
    let mut game = Match::new(config, cues);
    log::info!("playing a scripted match with seed {seed}");

    // Crude stand-in for two human players: random angles and speeds.
    let mut aim = Pcg32::seed_from_u64(seed ^ 0x5EED);
    let mut throws = 0;

    while game.phase() != MatchPhase::MatchOver {
        match game.phase() {
            MatchPhase::RoundSetup => game.start_round(),
            MatchPhase::AwaitingShot => {
                if throws >= MAX_THROWS {
                    game.abandon();
                    continue;
                }
                throws += 1;

                let cmd = ShotCommand {
                    angle: aim.random_range(20.0..80.0),
                    speed: aim.random_range(30.0..90.0),
                };
                let Some(mut flight) = game.throw(cmd) else {
                    continue;
                };

                // One step per frame; a real driver would render and poll
                // input between steps.
                let outcome = loop {
                    let step = {
                        let Some(env) = game.flight_env() else {
                            break None;
                        };
                        flight.step(&env)
                    };
                    if let FlightStep::Done(outcome) = step {
                        break Some(outcome);
                    }
                };

                if let Some(outcome) = outcome {
                    if let Some(res) = game.resolve(outcome) {
                        log::info!(
                            "throw {throws}: {:?}{}",
                            res.outcome,
                            match res.scorer {
                                Some(p) => format!(", point to player {p}"),
                                None => String::new(),
                            }
                        );
                    }
                }

                for cue in cue_rx.try_iter() {
                    log::debug!("audio cue: {cue:?}");
                }
            }
            MatchPhase::Resolving | MatchPhase::MatchOver => {}
        }
    }

    let snapshot = game.snapshot();
    println!(
        "final score after {} round(s): {} {} - {} {}",
        snapshot.round_index,
        snapshot.combatants[0].name,
        snapshot.scores[0],
        snapshot.scores[1],
        snapshot.combatants[1].name,
    );
}
