//! Match state and the round/turn state machine
//!
//! A `Match` owns everything one game session needs: both combatants, the
//! current round's skyline/raster/wind, the seeded RNG, and the phase.
//! The driving game loop is the only owner; no state lives anywhere else.
//!
//! Phase cycle: `RoundSetup -> AwaitingShot -> Resolving -> (AwaitingShot |
//! RoundSetup | MatchOver)`. `throw` hands the driver a `Flight` to step
//! cooperatively; the driver feeds the finished outcome back through
//! `resolve`. External cancellation calls `abandon` at any point.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::flight::{Flight, FlightEnv, Outcome};
use super::placement;
use super::skyline::{self, Skyline};
use super::terrain::CityRaster;
use crate::audio::{AudioCue, CueQueue};
use crate::config::MatchConfig;
use crate::consts::*;

/// Index of one of the two players (0 = left, 1 = right)
pub type PlayerId = usize;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// A fresh skyline is about to be generated
    RoundSetup,
    /// Waiting for the active player's angle and speed
    AwaitingShot,
    /// A projectile is in the air
    Resolving,
    /// Someone reached the target score, or the match was abandoned
    MatchOver,
}

/// One player's on-field avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    /// Top-left of the fixed square footprint; set once per round
    pub pos: IVec2,
    pub alive: bool,
    /// Cumulative across rounds
    pub score: u32,
}

/// Angle and speed for one throw, as handed over by the input collaborator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShotCommand {
    /// Degrees above horizontal, toward the playfield center
    pub angle: f32,
    pub speed: f32,
}

/// Per-round state, rebuilt from scratch at every round setup
pub struct Round {
    pub skyline: Skyline,
    pub terrain: CityRaster,
    pub wind: i32,
    /// The previous attempt clipped the sun; display-only
    pub sun_startled: bool,
}

/// What `Match::resolve` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Player whose score went up, if any
    pub scorer: Option<PlayerId>,
    /// A combatant went down and the round is over
    pub round_over: bool,
    pub match_over: bool,
}

/// Read-only view of everything the renderer needs for one frame
pub struct Snapshot<'a> {
    pub phase: MatchPhase,
    pub round_index: u32,
    pub active: PlayerId,
    pub combatants: &'a [Combatant; 2],
    pub scores: [u32; 2],
    pub target_score: u32,
    pub skyline: Option<&'a Skyline>,
    pub terrain: Option<&'a CityRaster>,
    /// Zero between rounds
    pub wind: i32,
    pub sun_startled: bool,
}

/// The top-level aggregate owning one full game session
pub struct Match {
    config: MatchConfig,
    rng: Pcg32,
    cues: CueQueue,
    combatants: [Combatant; 2],
    active: PlayerId,
    round_index: u32,
    phase: MatchPhase,
    round: Option<Round>,
    /// Shooter of the projectile currently resolving
    pending_shooter: Option<PlayerId>,
}

impl Match {
    pub fn new(config: MatchConfig, cues: CueQueue) -> Self {
        let config = config.sanitized();
        let rng = Pcg32::seed_from_u64(config.seed);
        let combatants = [0, 1].map(|i: usize| Combatant {
            name: config.player_names[i].clone(),
            pos: IVec2::ZERO,
            alive: true,
            score: 0,
        });
        Self {
            config,
            rng,
            cues,
            combatants,
            active: 0,
            round_index: 0,
            phase: MatchPhase::RoundSetup,
            round: None,
            pending_shooter: None,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    pub fn combatants(&self) -> &[Combatant; 2] {
        &self.combatants
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn scores(&self) -> [u32; 2] {
        [self.combatants[0].score, self.combatants[1].score]
    }

    /// Build the round: fresh skyline, raster, wind and placements. Only
    /// meaningful in `RoundSetup`; a call in any other phase is ignored.
    pub fn start_round(&mut self) {
        if self.phase != MatchPhase::RoundSetup {
            return;
        }

        let (skyline, wind) = skyline::generate(FIELD_WIDTH, FIELD_HEIGHT, &mut self.rng);
        let terrain = CityRaster::build(&skyline);
        let positions = placement::place(&skyline, &mut self.rng);
        for (combatant, pos) in self.combatants.iter_mut().zip(positions) {
            combatant.pos = pos;
            combatant.alive = true;
        }

        self.round_index += 1;
        log::info!(
            "round {} starting: {} structures, wind {}, {} to throw",
            self.round_index,
            skyline.structures.len(),
            wind,
            self.combatants[self.active].name,
        );

        self.round = Some(Round {
            skyline,
            terrain,
            wind,
            sun_startled: false,
        });
        self.phase = MatchPhase::AwaitingShot;
    }

    /// Accept the active player's shot and hand back the flight for the
    /// driver to step. Returns `None` outside `AwaitingShot`.
    pub fn throw(&mut self, cmd: ShotCommand) -> Option<Flight> {
        if self.phase != MatchPhase::AwaitingShot {
            return None;
        }
        let round = self.round.as_mut()?;
        // The startled face belongs to the previous attempt only.
        round.sun_startled = false;

        let shooter = self.active;
        let angle = cmd.angle.min(360.0);
        log::debug!(
            "player {shooter} throws at angle {angle}, speed {}",
            cmd.speed
        );
        let flight = Flight::launch(shooter, &self.combatants[shooter], angle, cmd.speed);
        self.pending_shooter = Some(shooter);
        self.phase = MatchPhase::Resolving;
        self.cues.dispatch(AudioCue::Throw);
        Some(flight)
    }

    /// Environment the in-flight projectile integrates against. `None`
    /// before the first round is set up.
    pub fn flight_env(&self) -> Option<FlightEnv<'_>> {
        let round = self.round.as_ref()?;
        Some(FlightEnv {
            terrain: &round.terrain,
            combatants: &self.combatants,
            wind: round.wind,
            gravity: self.config.gravity,
        })
    }

    /// Apply a finished flight's outcome. Returns `None` outside
    /// `Resolving`.
    pub fn resolve(&mut self, outcome: Outcome) -> Option<Resolution> {
        if self.phase != MatchPhase::Resolving {
            return None;
        }
        let shooter = self.pending_shooter.take()?;
        let round = self.round.as_mut()?;

        let mut resolution = Resolution {
            outcome,
            scorer: None,
            round_over: false,
            match_over: false,
        };

        match outcome {
            Outcome::OutOfBounds => {
                self.active = 1 - shooter;
                self.phase = MatchPhase::AwaitingShot;
            }
            Outcome::HitTerrain(point) => {
                round.terrain.carve(point, CARVE_RADIUS);
                self.cues.dispatch(AudioCue::Explosion);
                self.active = 1 - shooter;
                self.phase = MatchPhase::AwaitingShot;
            }
            Outcome::HitSun => {
                round.sun_startled = true;
                self.active = 1 - shooter;
                self.phase = MatchPhase::AwaitingShot;
            }
            Outcome::HitCombatant(id) => {
                self.combatants[id].alive = false;
                self.cues.dispatch(AudioCue::Elimination);

                // Hitting yourself hands the point to your opponent.
                let scorer = if id == shooter { 1 - shooter } else { shooter };
                self.combatants[scorer].score += 1;
                resolution.scorer = Some(scorer);
                resolution.round_over = true;
                self.cues.dispatch(AudioCue::Victory);

                // The player who did not just throw opens the next round.
                self.active = 1 - shooter;

                if self.combatants[scorer].score >= self.config.target_score {
                    resolution.match_over = true;
                    self.phase = MatchPhase::MatchOver;
                    log::info!(
                        "match over: {} {} - {} {}",
                        self.combatants[0].name,
                        self.combatants[0].score,
                        self.combatants[1].score,
                        self.combatants[1].name,
                    );
                } else {
                    self.phase = MatchPhase::RoundSetup;
                }
            }
        }

        Some(resolution)
    }

    /// External cancellation: abandon the match unconditionally. Scores
    /// already recorded stay as they are; nothing further is committed.
    pub fn abandon(&mut self) {
        if self.phase != MatchPhase::MatchOver {
            log::info!("match abandoned");
            self.phase = MatchPhase::MatchOver;
        }
    }

    /// Everything the rendering collaborator needs to draw one frame
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            round_index: self.round_index,
            active: self.active,
            combatants: &self.combatants,
            scores: self.scores(),
            target_score: self.config.target_score,
            skyline: self.round.as_ref().map(|r| &r.skyline),
            terrain: self.round.as_ref().map(|r| &r.terrain),
            wind: self.round.as_ref().map_or(0, |r| r.wind),
            sun_startled: self.round.as_ref().is_some_and(|r| r.sun_startled),
        }
    }
}
