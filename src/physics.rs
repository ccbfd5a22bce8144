//! Drop, bounce and fracture of a single cube.
//!
//! The world is either `Intact`, integrating the [`RigidBody`], or `Broken`,
//! integrating the debris the body shattered into. `Broken` is terminal
//! until the next [`PhysicsWorld::reset`].

use log::{debug, info};
use rand::Rng;

use crate::config::{PhysicsParams, SpawnState};
use crate::debris::DebrisSegment;
use crate::fracture::fracture;
use crate::rigid_body::RigidBody;

#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsState {
    Intact(RigidBody),
    Broken { debris: Vec<DebrisSegment> },
}

/// Something worth reporting that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsEvent {
    Bounced { impact_speed: f32 },
    Fractured { impact_speed: f32, segments: usize },
    /// The last debris segment ran out of life
    DebrisCleared,
}

#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    params: PhysicsParams,
    spawn: SpawnState,
    state: PhysicsState,
}

impl PhysicsWorld {
    pub fn new(params: PhysicsParams, spawn: SpawnState) -> Self {
        Self {
            params,
            spawn,
            state: PhysicsState::Intact(RigidBody::from_spawn(&spawn)),
        }
    }

    pub fn state(&self) -> &PhysicsState {
        &self.state
    }

    pub fn is_broken(&self) -> bool {
        matches!(self.state, PhysicsState::Broken { .. })
    }

    /// The live body, or `None` once it has shattered.
    pub fn body(&self) -> Option<&RigidBody> {
        match &self.state {
            PhysicsState::Intact(body) => Some(body),
            PhysicsState::Broken { .. } => None,
        }
    }

    pub fn debris(&self) -> &[DebrisSegment] {
        match &self.state {
            PhysicsState::Intact(_) => &[],
            PhysicsState::Broken { debris, .. } => debris,
        }
    }

    /// Back to the configured spawn pose with zero orientation and no debris.
    pub fn reset(&mut self) {
        let spawn = self.spawn;
        self.reset_with(spawn);
    }

    /// Like [`reset`](Self::reset) but from `spawn` instead of the configured pose.
    pub fn reset_with(&mut self, spawn: SpawnState) {
        debug!(
            "Physics reset: position {:?}, angular velocity {:?}",
            spawn.position, spawn.angular_velocity
        );
        self.state = PhysicsState::Intact(RigidBody::from_spawn(&spawn));
    }

    /// Advance the world by `dt` seconds.
    ///
    /// `rng` is only drawn from on the tick that shatters the body.
    pub fn tick<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Option<PhysicsEvent> {
        match &mut self.state {
            PhysicsState::Intact(body) => {
                let (next, impact) = body.advanced(dt, &self.params);
                *body = next;
                let impact = impact?;

                if impact.speed <= self.params.break_speed {
                    debug!("Bounce at {:.2} units/s", impact.speed);
                    return Some(PhysicsEvent::Bounced {
                        impact_speed: impact.speed,
                    });
                }

                let debris = fracture(&next, &self.params, rng);
                let segments = debris.len();
                info!(
                    "Cube shattered at {:.2} units/s into {} segments",
                    impact.speed, segments
                );
                self.state = PhysicsState::Broken { debris };
                Some(PhysicsEvent::Fractured {
                    impact_speed: impact.speed,
                    segments,
                })
            }
            PhysicsState::Broken { debris, .. } => {
                if debris.is_empty() {
                    return None;
                }
                for segment in debris.iter_mut() {
                    *segment = segment.advanced(dt, self.params.gravity, self.params.floor_y);
                }
                debris.retain(DebrisSegment::is_alive);

                if debris.is_empty() {
                    debug!("All debris expired");
                    Some(PhysicsEvent::DebrisCleared)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Point3, Vector3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(PhysicsParams::default(), SpawnState::default())
    }

    fn run_until_event(world: &mut PhysicsWorld, rng: &mut StdRng, max_ticks: usize) -> Option<PhysicsEvent> {
        for _ in 0..max_ticks {
            if let Some(event) = world.tick(DT, rng) {
                return Some(event);
            }
        }
        None
    }

    #[test]
    fn test_default_drop_bounces_below_threshold() {
        let mut world = world();
        let mut rng = StdRng::seed_from_u64(0);

        let event = run_until_event(&mut world, &mut rng, 600).unwrap();
        let PhysicsEvent::Bounced { impact_speed } = event else {
            panic!("expected a bounce, got {event:?}");
        };

        // Analytic impact for a 3.2 unit fall is sqrt(2 * 9.8 * 3.2) ~ 7.92.
        assert!(impact_speed < 8.0);
        assert_relative_eq!(impact_speed, (2.0f32 * 9.8 * 3.2).sqrt(), epsilon = 0.15);
        assert!(!world.is_broken());

        let body = world.body().unwrap();
        assert_eq!(body.position.y, -2.0);
        assert!(body.velocity.y > 0.0);
    }

    #[test]
    fn test_default_episode_never_breaks() {
        let mut world = world();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..(60 * 20) {
            let event = world.tick(DT, &mut rng);
            assert!(!matches!(event, Some(PhysicsEvent::Fractured { .. })));
        }
        assert!(!world.is_broken());
    }

    #[test]
    fn test_resting_body_never_breaks() {
        let params = PhysicsParams::default();
        let spawn = SpawnState {
            position: [0.0, params.floor_y + params.half_extent, 0.0],
            ..SpawnState::default()
        };
        let mut world = PhysicsWorld::new(params, spawn);
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..600 {
            world.tick(DT, &mut rng);
            assert!(!world.is_broken());
            assert_eq!(world.body().unwrap().position.y, -2.0);
        }
    }

    #[test]
    fn test_hard_drop_breaks_exactly_once() {
        let mut world = world();
        let mut rng = StdRng::seed_from_u64(42);
        world.reset_with(SpawnState::dropped_from(6.0));

        let mut fractures = 0;
        let mut segments_at_break = 0;
        for _ in 0..(60 * 10) {
            if let Some(PhysicsEvent::Fractured { impact_speed, segments }) = world.tick(DT, &mut rng) {
                assert!(impact_speed > 8.0);
                fractures += 1;
                segments_at_break = segments;
                assert_eq!(world.debris().len(), 12);
            }
        }

        assert_eq!(fractures, 1);
        assert_eq!(segments_at_break, 12);
        assert!(world.is_broken());
        assert!(world.body().is_none());
    }

    #[test]
    fn test_debris_expires_and_world_stays_broken() {
        let mut world = world();
        let mut rng = StdRng::seed_from_u64(5);
        world.reset_with(SpawnState::dropped_from(8.0));

        let mut cleared = false;
        for _ in 0..(60 * 12) {
            if let Some(PhysicsEvent::DebrisCleared) = world.tick(DT, &mut rng) {
                cleared = true;
            }
            for seg in world.debris() {
                assert!(seg.life > 0.0);
            }
        }
        assert!(cleared);
        assert!(world.debris().is_empty());
        assert!(world.is_broken());
    }

    #[test]
    fn test_debris_stays_above_floor() {
        let mut world = world();
        let mut rng = StdRng::seed_from_u64(11);
        world.reset_with(SpawnState::dropped_from(8.0));

        for _ in 0..(60 * 4) {
            world.tick(DT, &mut rng);
            for seg in world.debris() {
                assert!(seg.p0.y >= -3.0);
                assert!(seg.p1.y >= -3.0);
            }
        }
    }

    #[test]
    fn test_short_lived_debris_is_pruned() {
        let mut world = world();
        world.state = PhysicsState::Broken {
            debris: vec![
                DebrisSegment::new(
                    Point3::new(0.0, 0.0, 8.0),
                    Point3::new(1.0, 0.0, 8.0),
                    Vector3::new(0.0, 0.0, 0.0),
                    0.001,
                ),
                DebrisSegment::new(
                    Point3::new(0.0, 0.0, 8.0),
                    Point3::new(1.0, 0.0, 8.0),
                    Vector3::new(0.0, 0.0, 0.0),
                    2.0,
                ),
            ],
        };

        let event = world.tick(0.1, &mut StdRng::seed_from_u64(0));
        assert_eq!(event, None);
        assert_eq!(world.debris().len(), 1);
        assert_relative_eq!(world.debris()[0].life, 1.9, epsilon = 1e-6);
    }

    #[test]
    fn test_reset_restores_intact_spawn() {
        let mut world = world();
        let mut rng = StdRng::seed_from_u64(1);
        world.reset_with(SpawnState::dropped_from(8.0));
        while !world.is_broken() {
            world.tick(DT, &mut rng);
        }

        world.reset();
        assert!(!world.is_broken());
        assert!(world.debris().is_empty());
        let body = world.body().unwrap();
        assert_eq!(body.position, Point3::new(0.0, 1.2, 0.0));
        assert_eq!(body.velocity, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(body.orientation, crate::math::Orientation::default());
        assert_eq!(body.angular_velocity, Vector3::new(1.5, 0.9, 1.1));
    }
}
