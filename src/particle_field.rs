//! A floating particle swarm that is pushed away from the pointer.
//!
//! Each particle tracks two positions: where it is drawn, and an anchor it
//! relaxes back toward. The anchor drifts continuously and reflects off the
//! surface edges, which gives the swarm its ambient motion; the pointer
//! displaces the drawn position directly and the relaxation pulls it home
//! again afterward.

use glam::Vec2;

use crate::config::ParticleFieldConfig;
use crate::field::{connection_alpha, Field, PointSprite, Segment, MIN_DISTANCE};
use crate::pointer::PointerState;
use crate::spawn::SpawnContext;

#[derive(Debug, Clone)]
struct Particle {
    position: Vec2,
    anchor: Vec2,
    /// Anchor drift velocity in pixels per frame.
    velocity: Vec2,
    radius: f32,
    /// Repulsion strength, fixed at spawn.
    density: f32,
    color: [f32; 4],
}

/// Ambient particle swarm with mouse-repulsion physics.
///
/// The whole point set is regenerated on every resize; individual particles
/// are never created or destroyed between resizes.
pub struct ParticleField {
    config: ParticleFieldConfig,
    bounds: Vec2,
    particles: Vec<Particle>,
    running: bool,
}

impl ParticleField {
    /// Create a field sized to a `width` x `height` surface.
    pub fn new(config: ParticleFieldConfig, width: f32, height: f32) -> Self {
        let bounds = Vec2::new(width, height);
        let particles = spawn(&config, bounds);
        Self {
            config,
            bounds,
            particles,
            running: true,
        }
    }

    /// Number of particles in the field.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The field's configuration.
    pub fn config(&self) -> &ParticleFieldConfig {
        &self.config
    }
}

fn spawn(config: &ParticleFieldConfig, bounds: Vec2) -> Vec<Particle> {
    (0..config.count)
        .map(|i| {
            let mut ctx = SpawnContext::new(i, config.count);
            let position = ctx.random_in_rect(bounds.x, bounds.y);
            Particle {
                position,
                anchor: position,
                velocity: ctx.drift_velocity(config.drift_speed),
                radius: ctx.random_range(config.radius.0, config.radius.1),
                density: ctx.random_range(config.density.0, config.density.1),
                color: *ctx.pick(&config.palette),
            }
        })
        .collect()
}

impl Field for ParticleField {
    fn step(&mut self, pointer: &PointerState) {
        if !self.running {
            return;
        }

        let cfg = &self.config;
        for p in &mut self.particles {
            let pushed = if pointer.is_active() {
                let to_pointer = pointer.position() - p.position;
                let distance = to_pointer.length();
                if distance < cfg.pointer_radius {
                    // Linear falloff, clamped away from zero so coincident
                    // points never divide by zero.
                    let clamped = distance.max(MIN_DISTANCE);
                    let direction = if distance < MIN_DISTANCE {
                        Vec2::X
                    } else {
                        to_pointer / clamped
                    };
                    let force = (cfg.pointer_radius - clamped) / cfg.pointer_radius;
                    p.position -= direction * force * p.density;
                    true
                } else {
                    false
                }
            } else {
                false
            };

            if !pushed {
                // Exponential relaxation toward the anchor.
                p.position -= (p.position - p.anchor) * cfg.relaxation;
            }

            // The anchor drifts on its own and reflects at the edges.
            p.anchor += p.velocity;
            if p.anchor.x < 0.0 || p.anchor.x > self.bounds.x {
                p.velocity.x = -p.velocity.x;
            }
            if p.anchor.y < 0.0 || p.anchor.y > self.bounds.y {
                p.velocity.y = -p.velocity.y;
            }
            p.anchor = p.anchor.clamp(Vec2::ZERO, self.bounds);

            // Bounds invariant: the drawn position never leaves the surface.
            p.position = p.position.clamp(Vec2::ZERO, self.bounds);
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
        // Full regeneration; no carry-over of previous state.
        self.particles = spawn(&self.config, self.bounds);
    }

    fn bounds(&self) -> Vec2 {
        self.bounds
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn sprites(&self, out: &mut Vec<PointSprite>) {
        for p in &self.particles {
            out.push(PointSprite {
                position: p.position,
                radius: p.radius,
                glow: self.config.glow.max(p.radius),
                color: p.color,
            });
        }
    }

    fn connections(&self, out: &mut Vec<Segment>) {
        let cfg = &self.config;
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let a = self.particles[i].position;
                let b = self.particles[j].position;
                let distance = a.distance(b);
                if distance < cfg.connection_threshold {
                    let alpha =
                        connection_alpha(distance, cfg.connection_threshold, cfg.connection_opacity);
                    let [r, g, bl] = cfg.connection_color;
                    out.push(Segment {
                        a,
                        b,
                        color: [r, g, bl, alpha],
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_config() -> ParticleFieldConfig {
        // No anchor drift, so relaxation targets are fixed.
        ParticleFieldConfig {
            drift_speed: 0.0,
            ..ParticleFieldConfig::default()
        }
    }

    fn in_bounds(field: &ParticleField) -> bool {
        let mut sprites = Vec::new();
        field.sprites(&mut sprites);
        sprites.iter().all(|s| {
            s.position.x >= 0.0
                && s.position.x <= field.bounds().x
                && s.position.y >= 0.0
                && s.position.y <= field.bounds().y
        })
    }

    #[test]
    fn test_spawn_count_and_bounds() {
        let field = ParticleField::new(ParticleFieldConfig::default(), 800.0, 600.0);
        assert_eq!(field.len(), 50);
        assert!(in_bounds(&field));
    }

    #[test]
    fn test_positions_stay_in_bounds_over_many_steps() {
        let mut field = ParticleField::new(ParticleFieldConfig::default(), 800.0, 600.0);
        let pointer = PointerState::inactive();
        for _ in 0..1000 {
            field.step(&pointer);
        }
        assert!(in_bounds(&field));
    }

    #[test]
    fn test_positions_stay_in_bounds_under_pointer_pressure() {
        let mut field = ParticleField::new(ParticleFieldConfig::default(), 800.0, 600.0);
        // Sweep the pointer across the surface; repulsion near the edges
        // must not push anything outside.
        for i in 0..500 {
            let t = i as f32 / 500.0;
            let pointer = PointerState::at(t * 800.0, t * 600.0);
            field.step(&pointer);
        }
        assert!(in_bounds(&field));
    }

    #[test]
    fn test_relaxation_converges_to_anchor() {
        let mut field = ParticleField::new(still_config(), 800.0, 600.0);

        // Disturb everything, then leave the pointer inactive.
        let pointer = PointerState::at(400.0, 300.0);
        for _ in 0..30 {
            field.step(&pointer);
        }
        let inactive = PointerState::inactive();
        for _ in 0..300 {
            field.step(&inactive);
        }

        for p in &field.particles {
            assert!(
                p.position.distance(p.anchor) < 1e-3,
                "particle should settle onto its anchor"
            );
        }
    }

    #[test]
    fn test_displacement_monotonic_in_pointer_proximity() {
        // Closer pointer => larger single-step displacement. Density is
        // pinned so the runs are comparable.
        let config = ParticleFieldConfig {
            drift_speed: 0.0,
            density: (10.0, 10.0),
            ..ParticleFieldConfig::default()
        };
        let mut displacements = Vec::new();
        for &offset in &[140.0_f32, 100.0, 60.0, 20.0] {
            let mut field = ParticleField::new(config.clone(), 800.0, 600.0);
            // Pin one particle mid-surface so nothing is clamped.
            field.particles[0].position = Vec2::new(400.0, 300.0);
            field.particles[0].anchor = Vec2::new(400.0, 300.0);
            let before = field.particles[0].position;
            let pointer = PointerState::at(400.0 + offset, 300.0);
            field.step(&pointer);
            displacements.push(field.particles[0].position.distance(before));
        }
        for pair in displacements.windows(2) {
            assert!(pair[1] > pair[0], "displacement must grow as distance shrinks");
        }
    }

    #[test]
    fn test_pointer_on_top_of_particle_uses_clamped_distance() {
        let config = ParticleFieldConfig {
            drift_speed: 0.0,
            density: (5.0, 5.0),
            ..ParticleFieldConfig::default()
        };
        let mut field = ParticleField::new(config, 800.0, 600.0);
        field.particles[0].position = Vec2::new(400.0, 300.0);
        field.particles[0].anchor = Vec2::new(400.0, 300.0);

        let pointer = PointerState::at(400.0, 300.0);
        field.step(&pointer);

        let displaced = field.particles[0].position.distance(Vec2::new(400.0, 300.0));
        assert!(displaced.is_finite());
        // force -> 1 as distance -> 0, so the push is density * 1.
        assert!((displaced - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_resize_regenerates_full_set_in_new_bounds() {
        let mut field = ParticleField::new(ParticleFieldConfig::default(), 800.0, 600.0);
        field.resize(300.0, 200.0);
        assert_eq!(field.len(), 50);
        assert!(in_bounds(&field));
    }

    #[test]
    fn test_stopped_field_does_not_move() {
        let mut field = ParticleField::new(ParticleFieldConfig::default(), 800.0, 600.0);
        field.stop();
        let before: Vec<Vec2> = field.particles.iter().map(|p| p.position).collect();
        field.step(&PointerState::at(400.0, 300.0));
        let after: Vec<Vec2> = field.particles.iter().map(|p| p.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_connections_respect_threshold() {
        let mut field = ParticleField::new(ParticleFieldConfig::default(), 800.0, 600.0);
        // Two particles exactly at the threshold must not connect; two just
        // inside must.
        field.particles[0].position = Vec2::new(100.0, 100.0);
        field.particles[1].position = Vec2::new(220.0, 100.0); // d = 120
        let mut segments = Vec::new();
        field.connections(&mut segments);
        assert!(segments
            .iter()
            .all(|s| !(s.a == Vec2::new(100.0, 100.0) && s.b == Vec2::new(220.0, 100.0))));

        field.particles[1].position = Vec2::new(219.0, 100.0); // d = 119
        segments.clear();
        field.connections(&mut segments);
        assert!(segments
            .iter()
            .any(|s| s.a == Vec2::new(100.0, 100.0) && s.b == Vec2::new(219.0, 100.0)));
    }
}
