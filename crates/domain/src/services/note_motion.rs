//! Motion engine for floating space notes.
//!
//! Each note bubble owns a position and velocity. A fixed-timestep tick
//! advances positions, applies pairwise repulsion when two bubbles sit closer
//! than a minimum separation, reflects velocity off the viewport edges with
//! damping, and clamps speed. Repulsion is a single pass over pairs, an
//! approximation that looks right rather than a globally consistent solve.
//!
//! Positions are persisted on a throttle: only after enough wall time has
//! passed AND the bubble has drifted far enough since the last write.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Simulation timestep in seconds (20 Hz).
pub const TICK_SECONDS: f64 = 0.05;

/// Minimum separation between bubble centers, in viewport units.
pub const MIN_SEPARATION: f64 = 0.12;

/// Repulsion acceleration applied to overlapping pairs, units per second^2.
const REPULSION_STRENGTH: f64 = 0.6;

/// Velocity retained after bouncing off a viewport edge.
const EDGE_DAMPING: f64 = 0.8;

/// Maximum bubble speed, units per second.
const MAX_SPEED: f64 = 0.25;

/// Seconds that must elapse between position writes for one bubble.
const PERSIST_INTERVAL_SECS: f64 = 5.0;

/// Displacement since the last write below which a write is skipped.
const PERSIST_MIN_DISPLACEMENT: f64 = 0.01;

/// A 2D vector in viewport units (0.0..=1.0 spans the visible area).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Vec2) -> f64 {
        Vec2::new(self.x - other.x, self.y - other.y).length()
    }
}

/// Rectangular bounds the bubbles bounce inside.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

/// A note bubble participating in the simulation.
#[derive(Debug, Clone)]
pub struct NoteBody {
    pub note_id: Uuid,
    pub position: Vec2,
    pub velocity: Vec2,
}

impl NoteBody {
    pub fn new(note_id: Uuid, position: Vec2, velocity: Vec2) -> Self {
        Self {
            note_id,
            position,
            velocity,
        }
    }

    /// A body at rest at the given position.
    pub fn at_rest(note_id: Uuid, position: Vec2) -> Self {
        Self::new(note_id, position, Vec2::default())
    }
}

/// Advances all bodies by one fixed timestep.
///
/// Order within a tick: repulsion accelerations, integration, edge
/// reflection, speed clamp.
pub fn tick(bodies: &mut [NoteBody], viewport: &Viewport) {
    apply_repulsion(bodies);

    for body in bodies.iter_mut() {
        body.position.x += body.velocity.x * TICK_SECONDS;
        body.position.y += body.velocity.y * TICK_SECONDS;

        reflect_off_edges(body, viewport);
        clamp_speed(body);
    }
}

/// Pushes apart every pair closer than [`MIN_SEPARATION`].
///
/// Coincident bubbles get a deterministic nudge derived from their ids so a
/// pile dropped on the same spot still disperses.
fn apply_repulsion(bodies: &mut [NoteBody]) {
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let delta = Vec2::new(
                bodies[j].position.x - bodies[i].position.x,
                bodies[j].position.y - bodies[i].position.y,
            );
            let dist = delta.length();

            if dist >= MIN_SEPARATION {
                continue;
            }

            let (dir_x, dir_y) = if dist > f64::EPSILON {
                (delta.x / dist, delta.y / dist)
            } else {
                separation_axis(&bodies[i].note_id, &bodies[j].note_id)
            };

            // Stronger push the deeper the overlap
            let overlap = (MIN_SEPARATION - dist) / MIN_SEPARATION;
            let impulse = REPULSION_STRENGTH * overlap * TICK_SECONDS;

            bodies[i].velocity.x -= dir_x * impulse;
            bodies[i].velocity.y -= dir_y * impulse;
            bodies[j].velocity.x += dir_x * impulse;
            bodies[j].velocity.y += dir_y * impulse;
        }
    }
}

/// Unit direction for two coincident bubbles, derived from their ids.
fn separation_axis(a: &Uuid, b: &Uuid) -> (f64, f64) {
    let seed = a
        .as_bytes()
        .iter()
        .zip(b.as_bytes())
        .fold(0u32, |acc, (x, y)| {
            acc.wrapping_mul(31).wrapping_add((*x ^ *y) as u32)
        });
    let angle = (seed % 360) as f64 * std::f64::consts::PI / 180.0;
    (angle.cos(), angle.sin())
}

/// Reflects a body off the viewport edges, damping the bounce.
fn reflect_off_edges(body: &mut NoteBody, viewport: &Viewport) {
    if body.position.x < 0.0 {
        body.position.x = 0.0;
        body.velocity.x = -body.velocity.x * EDGE_DAMPING;
    } else if body.position.x > viewport.width {
        body.position.x = viewport.width;
        body.velocity.x = -body.velocity.x * EDGE_DAMPING;
    }

    if body.position.y < 0.0 {
        body.position.y = 0.0;
        body.velocity.y = -body.velocity.y * EDGE_DAMPING;
    } else if body.position.y > viewport.height {
        body.position.y = viewport.height;
        body.velocity.y = -body.velocity.y * EDGE_DAMPING;
    }
}

/// Clamps speed to [`MAX_SPEED`], preserving direction.
fn clamp_speed(body: &mut NoteBody) {
    let speed = body.velocity.length();
    if speed > MAX_SPEED {
        let scale = MAX_SPEED / speed;
        body.velocity.x *= scale;
        body.velocity.y *= scale;
    }
}

/// Decides when a bubble's position is worth writing back to storage.
#[derive(Debug, Clone)]
pub struct PersistThrottle {
    last_written: Vec2,
    elapsed_secs: f64,
}

impl PersistThrottle {
    /// Starts the throttle at the position already in storage.
    pub fn new(initial: Vec2) -> Self {
        Self {
            last_written: initial,
            elapsed_secs: 0.0,
        }
    }

    /// Advances the throttle clock and reports whether `current` should be
    /// persisted now. A write requires both the interval to have elapsed and
    /// the bubble to have moved a perceptible distance.
    pub fn observe(&mut self, current: Vec2, dt_secs: f64) -> bool {
        self.elapsed_secs += dt_secs;
        if self.elapsed_secs < PERSIST_INTERVAL_SECS {
            return false;
        }
        if current.distance(&self.last_written) < PERSIST_MIN_DISPLACEMENT {
            return false;
        }
        self.last_written = current;
        self.elapsed_secs = 0.0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f64, y: f64) -> NoteBody {
        NoteBody::at_rest(Uuid::new_v4(), Vec2::new(x, y))
    }

    #[test]
    fn test_overlapping_bubbles_diverge() {
        let mut bodies = vec![body_at(0.5, 0.5), body_at(0.5 + 0.01, 0.5)];
        let viewport = Viewport::default();

        let initial = bodies[0].position.distance(&bodies[1].position);
        for _ in 0..40 {
            tick(&mut bodies, &viewport);
        }
        let after = bodies[0].position.distance(&bodies[1].position);

        assert!(
            after > initial,
            "bubbles should diverge: {} -> {}",
            initial,
            after
        );
    }

    #[test]
    fn test_coincident_bubbles_still_separate() {
        let mut bodies = vec![body_at(0.5, 0.5), body_at(0.5, 0.5)];
        let viewport = Viewport::default();

        for _ in 0..40 {
            tick(&mut bodies, &viewport);
        }

        assert!(bodies[0].position.distance(&bodies[1].position) > 0.0);
    }

    #[test]
    fn test_separated_bubbles_unaffected() {
        let mut bodies = vec![body_at(0.1, 0.1), body_at(0.9, 0.9)];
        let viewport = Viewport::default();

        tick(&mut bodies, &viewport);

        assert_eq!(bodies[0].velocity, Vec2::default());
        assert_eq!(bodies[1].velocity, Vec2::default());
    }

    #[test]
    fn test_edge_reflection_damps_velocity() {
        let mut body = NoteBody::new(Uuid::new_v4(), Vec2::new(-0.02, 0.5), Vec2::new(-0.2, 0.0));
        reflect_off_edges(&mut body, &Viewport::default());

        assert_eq!(body.position.x, 0.0);
        assert!(body.velocity.x > 0.0, "x velocity should flip sign");
        assert!(
            body.velocity.x.abs() < 0.2,
            "bounce should lose energy, got {}",
            body.velocity.x
        );
    }

    #[test]
    fn test_bodies_stay_inside_viewport() {
        let mut bodies = vec![
            NoteBody::new(Uuid::new_v4(), Vec2::new(0.05, 0.05), Vec2::new(-0.3, -0.3)),
            NoteBody::new(Uuid::new_v4(), Vec2::new(0.95, 0.95), Vec2::new(0.3, 0.3)),
        ];
        let viewport = Viewport::default();

        for _ in 0..200 {
            tick(&mut bodies, &viewport);
        }

        for body in &bodies {
            assert!((0.0..=viewport.width).contains(&body.position.x));
            assert!((0.0..=viewport.height).contains(&body.position.y));
        }
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut body = NoteBody::new(Uuid::new_v4(), Vec2::new(0.5, 0.5), Vec2::new(9.0, 9.0));
        clamp_speed(&mut body);

        assert!(body.velocity.length() <= MAX_SPEED + 1e-9);
    }

    #[test]
    fn test_speed_clamp_preserves_direction() {
        let mut body = NoteBody::new(Uuid::new_v4(), Vec2::new(0.5, 0.5), Vec2::new(3.0, 4.0));
        clamp_speed(&mut body);

        let ratio = body.velocity.x / body.velocity.y;
        assert!((ratio - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_throttle_requires_interval() {
        let mut throttle = PersistThrottle::new(Vec2::new(0.0, 0.0));

        // Bubble has moved plenty, but not enough time has passed
        assert!(!throttle.observe(Vec2::new(0.5, 0.5), 1.0));
        assert!(!throttle.observe(Vec2::new(0.5, 0.5), 3.0));
        // Interval reached
        assert!(throttle.observe(Vec2::new(0.5, 0.5), 1.5));
    }

    #[test]
    fn test_throttle_requires_displacement() {
        let mut throttle = PersistThrottle::new(Vec2::new(0.5, 0.5));

        // Interval elapsed but the bubble barely moved
        assert!(!throttle.observe(Vec2::new(0.5005, 0.5), 6.0));
    }

    #[test]
    fn test_throttle_resets_after_write() {
        let mut throttle = PersistThrottle::new(Vec2::new(0.0, 0.0));

        assert!(throttle.observe(Vec2::new(0.3, 0.3), 6.0));
        // Clock restarted; immediate second write is suppressed
        assert!(!throttle.observe(Vec2::new(0.6, 0.6), 1.0));
        assert!(throttle.observe(Vec2::new(0.6, 0.6), 5.0));
    }

    #[test]
    fn test_separation_axis_is_unit_length() {
        let (x, y) = separation_axis(&Uuid::new_v4(), &Uuid::new_v4());
        assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-9);
    }
}
