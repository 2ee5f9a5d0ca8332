//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed flight timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The game loop owns a `Match`, steps at most one `Flight` at a time (one
//! `step` per rendered frame), and feeds the resulting `Outcome` back
//! through `Match::resolve`.

pub mod flight;
pub mod placement;
pub mod skyline;
pub mod state;
pub mod terrain;

pub use flight::{Flight, FlightEnv, FlightStep, Outcome};
pub use placement::place;
pub use skyline::{Skyline, SlopeMode, Structure, Window, generate};
pub use state::{
    Combatant, Match, MatchPhase, PlayerId, Resolution, Round, ShotCommand, Snapshot,
};
pub use terrain::CityRaster;
