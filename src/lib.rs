//! Skyline Duel - a two-player artillery duel over a destructible city
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain generation, ballistics, match state)
//! - `audio`: Cue identifiers and the fire-and-forget dispatch queue
//! - `config`: Immutable match configuration
//!
//! Rendering, input widgets and sound synthesis live outside this crate.
//! The engine hands those collaborators read-only snapshots, per-tick
//! projectile positions and discrete audio cues, and consumes nothing back
//! beyond the angle/speed of each throw.

pub mod audio;
pub mod config;
pub mod sim;

pub use config::MatchConfig;
pub use sim::{Flight, FlightStep, Match, MatchPhase, Outcome, ShotCommand};

/// Game configuration constants
pub mod consts {
    /// Reference playfield dimensions (EGA-era 640x350)
    pub const FIELD_WIDTH: i32 = 640;
    pub const FIELD_HEIGHT: i32 = 350;
    /// Vertical physics are tuned against a 350-line display; other field
    /// heights rescale the gravity term by `field_height / REFERENCE_HEIGHT`
    pub const REFERENCE_HEIGHT: f32 = 350.0;
    /// The ground baseline sits this many pixels above the bottom edge
    pub const BASELINE_MARGIN: i32 = 5;

    /// One flight integration step = one rendered frame (0.1 simulated seconds)
    pub const FLIGHT_DT: f32 = 0.1;
    /// A projectile this far past the side or bottom edges is gone
    pub const FLIGHT_BOUNDS_MARGIN: f32 = 50.0;
    /// Wind contributes `wind / WIND_DIVISOR` to horizontal acceleration
    pub const WIND_DIVISOR: f32 = 5.0;

    /// Structure geometry
    pub const MIN_STRUCTURE_HEIGHT: i32 = 10;
    pub const MAX_STRUCTURE_HEIGHT: i32 = 200;
    pub const MIN_STRUCTURE_WIDTH: i32 = 37;
    pub const MAX_STRUCTURE_WIDTH: i32 = 74;
    pub const STRUCTURE_GAP: i32 = 2;

    /// Window grid inside a structure's interior margin
    pub const WINDOW_WIDTH: i32 = 3;
    pub const WINDOW_HEIGHT: i32 = 6;
    pub const WINDOW_STRIDE_X: i32 = 10;
    pub const WINDOW_STRIDE_Y: i32 = 15;
    pub const WINDOW_MARGIN: i32 = 3;

    /// Combatant footprint (square, top-left anchored)
    pub const COMBATANT_SIZE: i32 = 30;

    /// Sun disc: centered horizontally, fixed height and hit radius
    pub const SUN_CENTER_Y: f32 = 40.0;
    pub const SUN_RADIUS: f32 = 12.0;

    /// Radius of the hole an impact punches into the terrain
    pub const CARVE_RADIUS: i32 = 14;
}

/// Palette indices shared with the rendering collaborator (EGA numbering)
pub mod palette {
    /// Transparent / carved-away raster cell
    pub const EMPTY: u8 = 0;
    pub const BACKGROUND: u8 = 1;
    pub const EXPLOSION: u8 = 4;
    pub const ACTOR: u8 = 6;
    pub const WINDOW_UNLIT: u8 = 8;
    pub const WINDOW_LIT: u8 = 14;
    pub const SUN: u8 = 14;
    /// The four fills structure bodies are drawn in
    pub const STRUCTURE_FILLS: [u8; 4] = [4, 5, 6, 7];
}
