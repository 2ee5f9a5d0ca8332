//! Ballistic flight of a thrown projectile
//!
//! Integration is cooperative: the driver calls `step` once per rendered
//! frame, each call advancing 0.1 s of simulated time. Position is closed
//! form in elapsed time, so a step only has to classify the new point.
//! The flight never mutates the terrain; on `HitTerrain` the state machine
//! carves the hole.

use glam::{IVec2, Vec2};

use super::state::{Combatant, PlayerId};
use super::terrain::CityRaster;
use crate::consts::*;

/// How one flight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The projectile landed inside a combatant's footprint
    HitCombatant(PlayerId),
    /// The projectile struck a structure at this cell
    HitTerrain(IVec2),
    /// The projectile clipped the sun
    HitSun,
    /// The projectile left the playfield
    OutOfBounds,
}

/// Result of one `Flight::step`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightStep {
    /// Still airborne; the renderer should draw the projectile here
    InFlight(Vec2),
    Done(Outcome),
}

/// Read-only world the projectile flies through
pub struct FlightEnv<'a> {
    pub terrain: &'a CityRaster,
    pub combatants: &'a [Combatant; 2],
    pub wind: i32,
    pub gravity: f32,
}

/// A projectile mid-throw
#[derive(Debug, Clone)]
pub struct Flight {
    shooter: PlayerId,
    origin: Vec2,
    /// Launch velocity components (vx, vy), vy pointing up
    velocity: Vec2,
    t: f32,
    pos: Vec2,
}

impl Flight {
    /// Launch from a combatant's throwing hand.
    ///
    /// The right-hand player's angle is mirrored to `180 - angle` so both
    /// players aim toward the center with increasing angle.
    pub fn launch(shooter: PlayerId, thrower: &Combatant, angle_deg: f32, speed: f32) -> Self {
        let (angle_deg, hand) = if shooter == 0 {
            (angle_deg, Vec2::new(25.0, 8.0))
        } else {
            (180.0 - angle_deg, Vec2::new(5.0, 8.0))
        };
        let origin = thrower.pos.as_vec2() + hand;
        let angle = angle_deg.to_radians();
        Self {
            shooter,
            origin,
            velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
            t: 0.0,
            pos: origin,
        }
    }

    pub fn shooter(&self) -> PlayerId {
        self.shooter
    }

    /// Current position for the renderer
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Which of the 4 tumble frames the projectile sprite shows right now
    pub fn sprite_frame(&self) -> u8 {
        (self.t * 10.0).rem_euclid(4.0) as u8
    }

    /// Advance one step and classify the new position.
    ///
    /// Checks run in priority order: out of bounds, then (while the point
    /// is below the top edge) the other combatant's footprint, terrain
    /// solidity, and finally the sun disc. First match ends the flight.
    pub fn step(&mut self, env: &FlightEnv<'_>) -> FlightStep {
        let field_w = env.terrain.width() as f32;
        let field_h = env.terrain.height() as f32;

        let t = self.t;
        let x = self.origin.x + self.velocity.x * t + 0.5 * (env.wind as f32 / WIND_DIVISOR) * t * t;
        let y = self.origin.y
            + (-self.velocity.y * t + 0.5 * env.gravity * t * t) * (field_h / REFERENCE_HEIGHT);
        self.pos = Vec2::new(x, y);

        if x < -FLIGHT_BOUNDS_MARGIN || x > field_w + FLIGHT_BOUNDS_MARGIN
            || y > field_h + FLIGHT_BOUNDS_MARGIN
        {
            return FlightStep::Done(Outcome::OutOfBounds);
        }

        // Above the visible area the projectile can still be tracked but
        // nothing up there can be hit.
        if y > 0.0 {
            let cell = IVec2::new(x as i32, y as i32);

            if let Some(id) = self.combatant_at(cell, env.combatants) {
                return FlightStep::Done(Outcome::HitCombatant(id));
            }
            if env.terrain.is_solid(cell) {
                return FlightStep::Done(Outcome::HitTerrain(cell));
            }
            let sun_center = Vec2::new(field_w / 2.0, SUN_CENTER_Y);
            if cell.as_vec2().distance(sun_center) < SUN_RADIUS {
                return FlightStep::Done(Outcome::HitSun);
            }
        }

        self.t += FLIGHT_DT;
        FlightStep::InFlight(self.pos)
    }

    /// Drive the flight to completion. For headless drivers and tests; the
    /// out-of-bounds check guarantees this returns.
    pub fn run(mut self, env: &FlightEnv<'_>) -> Outcome {
        loop {
            if let FlightStep::Done(outcome) = self.step(env) {
                return outcome;
            }
        }
    }

    /// Living non-shooter combatant whose footprint contains `point`
    fn combatant_at(&self, point: IVec2, combatants: &[Combatant; 2]) -> Option<PlayerId> {
        combatants.iter().enumerate().find_map(|(id, c)| {
            if id == self.shooter || !c.alive {
                return None;
            }
            let within = point.x >= c.pos.x
                && point.x <= c.pos.x + COMBATANT_SIZE
                && point.y >= c.pos.y
                && point.y <= c.pos.y + COMBATANT_SIZE;
            within.then_some(id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::skyline::{Skyline, Structure, baseline};

    fn combatant(x: i32, y: i32) -> Combatant {
        Combatant {
            name: String::new(),
            pos: IVec2::new(x, y),
            alive: true,
            score: 0,
        }
    }

    /// A single slab spanning the whole playfield at the given height
    fn flat_ground(height: i32) -> CityRaster {
        CityRaster::build(&Skyline {
            structures: vec![Structure {
                x: 0,
                width: FIELD_WIDTH,
                height,
                color: 4,
                windows: Vec::new(),
            }],
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
        })
    }

    fn open_air() -> CityRaster {
        CityRaster::build(&Skyline {
            structures: Vec::new(),
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
        })
    }

    #[test]
    fn test_straight_drop_lands_below_launch() {
        // Angle 90, speed 0, no wind: the projectile falls straight down
        // and must strike the ground within a pixel of the launch column.
        let terrain = flat_ground(50);
        let shooter = combatant(100, baseline(FIELD_HEIGHT) - 50 - COMBATANT_SIZE);
        let others = [shooter.clone(), combatant(500, 100)];
        let env = FlightEnv {
            terrain: &terrain,
            combatants: &others,
            wind: 0,
            gravity: 9.8,
        };

        let flight = Flight::launch(0, &others[0], 90.0, 0.0);
        let launch_x = others[0].pos.x + 25;
        let ground_top = baseline(FIELD_HEIGHT) - 50;
        match flight.run(&env) {
            Outcome::HitTerrain(p) => {
                assert!((p.x - launch_x).abs() <= 1);
                // First solid cell at or just below the surface; the step
                // cadence can overshoot by a pixel or two.
                assert!((ground_top..=ground_top + 2).contains(&p.y));
            }
            other => panic!("expected a terrain strike, got {other:?}"),
        }
    }

    #[test]
    fn test_right_player_throws_mirrored() {
        let terrain = open_air();
        let combatants = [combatant(100, 200), combatant(500, 200)];
        let env = FlightEnv {
            terrain: &terrain,
            combatants: &combatants,
            wind: 0,
            gravity: 9.8,
        };

        // Same 45-degree input from both sides.
        let mut from_left = Flight::launch(0, &combatants[0], 45.0, 60.0);
        let mut from_right = Flight::launch(1, &combatants[1], 45.0, 60.0);
        for _ in 0..5 {
            from_left.step(&env);
            from_right.step(&env);
        }
        assert!(from_left.position().x > combatants[0].pos.x as f32 + 25.0);
        assert!(from_right.position().x < combatants[1].pos.x as f32 + 5.0);
    }

    #[test]
    fn test_combatant_check_wins_over_terrain_at_the_same_cell() {
        // The first classified cell is both inside the target's footprint
        // and solid; the footprint check must win because it runs first.
        let terrain = flat_ground(200);
        let ground_top = baseline(FIELD_HEIGHT) - 200;
        let target = combatant(300, ground_top - 5);
        // Hand offset (25, 8) puts the launch cell at (305, ground_top + 11).
        let shooter = combatant(280, ground_top + 3);
        let combatants = [shooter, target];
        let env = FlightEnv {
            terrain: &terrain,
            combatants: &combatants,
            wind: 0,
            gravity: 9.8,
        };

        let launch_cell = IVec2::new(305, ground_top + 11);
        assert!(terrain.is_solid(launch_cell));

        let mut flight = Flight::launch(0, &combatants[0], 45.0, 50.0);
        match flight.step(&env) {
            FlightStep::Done(Outcome::HitCombatant(id)) => assert_eq!(id, 1),
            other => panic!("expected an immediate combatant hit, got {other:?}"),
        }
    }

    #[test]
    fn test_dead_combatants_are_not_targets() {
        // A flat throw from (125, 208) at speed 30 passes through the
        // footprint of a combatant at (200, 250) around t = 3.
        let terrain = open_air();
        let shooter = combatant(100, 200);
        let target = combatant(200, 250);
        let mut combatants = [shooter, target];
        let env = FlightEnv {
            terrain: &terrain,
            combatants: &combatants,
            wind: 0,
            gravity: 9.8,
        };
        assert_eq!(
            Flight::launch(0, &combatants[0], 0.0, 30.0).run(&env),
            Outcome::HitCombatant(1)
        );

        // Same throw once the target is down: it sails through.
        combatants[1].alive = false;
        let env = FlightEnv {
            terrain: &terrain,
            combatants: &combatants,
            wind: 0,
            gravity: 9.8,
        };
        assert_eq!(
            Flight::launch(0, &combatants[0], 0.0, 30.0).run(&env),
            Outcome::OutOfBounds
        );
    }

    #[test]
    fn test_shooter_never_hits_itself_at_launch() {
        let terrain = open_air();
        let combatants = [combatant(100, 200), combatant(500, 200)];
        let env = FlightEnv {
            terrain: &terrain,
            combatants: &combatants,
            wind: 0,
            gravity: 9.8,
        };

        // The launch point sits inside the shooter's own footprint.
        let mut flight = Flight::launch(0, &combatants[0], 45.0, 50.0);
        assert!(matches!(flight.step(&env), FlightStep::InFlight(_)));
    }

    #[test]
    fn test_sun_graze_reports_hit_sun() {
        let terrain = open_air();
        // Launch hand lands within the sun's radius: center (320, 40).
        let shooter = combatant(290, 25);
        let combatants = [shooter, combatant(500, 200)];
        let env = FlightEnv {
            terrain: &terrain,
            combatants: &combatants,
            wind: 0,
            gravity: 9.8,
        };

        let flight = Flight::launch(0, &combatants[0], 0.0, 0.0);
        assert_eq!(flight.run(&env), Outcome::HitSun);
    }

    #[test]
    fn test_wild_shot_leaves_the_field() {
        let terrain = open_air();
        // The bystander sits well below the flat arc.
        let combatants = [combatant(100, 200), combatant(500, 300)];
        let env = FlightEnv {
            terrain: &terrain,
            combatants: &combatants,
            wind: 0,
            gravity: 9.8,
        };

        let flight = Flight::launch(0, &combatants[0], 0.0, 500.0);
        assert_eq!(flight.run(&env), Outcome::OutOfBounds);
    }

    #[test]
    fn test_flight_terminates_within_bounded_steps() {
        let terrain = open_air();
        let combatants = [combatant(100, 200), combatant(500, 200)];

        for (angle, speed, wind, gravity) in [
            (89.9, 150.0, 0, 1.0),
            (45.0, 0.1, -20, 9.8),
            (0.0, 0.0, 0, 0.5),
            (270.0, 80.0, 20, 25.0),
        ] {
            let env = FlightEnv {
                terrain: &terrain,
                combatants: &combatants,
                wind,
                gravity,
            };
            let mut flight = Flight::launch(0, &combatants[0], angle, speed);
            let mut steps = 0;
            loop {
                if let FlightStep::Done(_) = flight.step(&env) {
                    break;
                }
                steps += 1;
                assert!(steps < 10_000, "flight failed to terminate");
            }
        }
    }

    #[test]
    fn test_sprite_frame_tumbles_through_four_frames() {
        let terrain = open_air();
        let combatants = [combatant(100, 200), combatant(500, 200)];
        let env = FlightEnv {
            terrain: &terrain,
            combatants: &combatants,
            wind: 0,
            gravity: 9.8,
        };

        let mut flight = Flight::launch(0, &combatants[0], 60.0, 80.0);
        let mut seen = [false; 4];
        for _ in 0..8 {
            seen[flight.sprite_frame() as usize] = true;
            flight.step(&env);
        }
        assert_eq!(seen, [true; 4]);
    }
}
