//! A point swarm attracted toward the pointer.
//!
//! Unlike the particle field, the pointer never moves a neuron directly: it
//! accumulates an impulse into the neuron's velocity, and a per-frame
//! damping factor keeps the resulting speed bounded. Outside the cursor
//! radius each neuron blends its velocity back toward a stored home
//! velocity, so the swarm settles into its undisturbed drift.

use glam::Vec2;

use crate::config::NeuronFieldConfig;
use crate::field::{connection_alpha, Field, PointSprite, Segment};
use crate::pointer::PointerState;
use crate::spawn::SpawnContext;

#[derive(Debug, Clone)]
struct Neuron {
    position: Vec2,
    velocity: Vec2,
    /// Undisturbed drift velocity the neuron relaxes back toward.
    home_velocity: Vec2,
    radius: f32,
}

/// Cursor-reactive neuron swarm.
///
/// The point set is created once. Resizing only changes the bounds, and
/// stopping the field retains every neuron, so restarting picks up exactly
/// where the swarm left off.
pub struct NeuronField {
    config: NeuronFieldConfig,
    bounds: Vec2,
    neurons: Vec<Neuron>,
    running: bool,
}

impl NeuronField {
    /// Create a field sized to a `width` x `height` surface.
    pub fn new(config: NeuronFieldConfig, width: f32, height: f32) -> Self {
        let bounds = Vec2::new(width, height);
        let neurons = (0..config.count)
            .map(|i| {
                let mut ctx = SpawnContext::new(i, config.count);
                let home = ctx.drift_velocity(config.speed);
                Neuron {
                    position: ctx.random_in_rect(bounds.x, bounds.y),
                    velocity: home,
                    home_velocity: home,
                    radius: config.radius,
                }
            })
            .collect();

        Self {
            config,
            bounds,
            neurons,
            running: true,
        }
    }

    /// Number of neurons in the field.
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    /// Whether the field holds no neurons.
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// The field's configuration.
    pub fn config(&self) -> &NeuronFieldConfig {
        &self.config
    }
}

impl Field for NeuronField {
    fn step(&mut self, pointer: &PointerState) {
        if !self.running {
            return;
        }

        let cfg = &self.config;
        for n in &mut self.neurons {
            let to_pointer = pointer.position() - n.position;
            let distance = to_pointer.length();

            if pointer.is_active() && distance < cfg.cursor_radius {
                // Impulse toward the pointer, strongest at distance zero.
                // The offset vector itself carries the direction, so there
                // is no division to guard here.
                let force = (1.0 - distance / cfg.cursor_radius) * cfg.attraction;
                n.velocity += to_pointer * force;
            } else {
                // Slow blend back toward the undisturbed drift.
                n.velocity += (n.home_velocity - n.velocity) * cfg.home_blend;
            }

            n.position += n.velocity;

            // Edge collision reflects both velocities and clamps inside.
            if n.position.x < 0.0 || n.position.x > self.bounds.x {
                n.velocity.x = -n.velocity.x;
                n.home_velocity.x = -n.home_velocity.x;
                n.position.x = n.position.x.clamp(0.0, self.bounds.x);
            }
            if n.position.y < 0.0 || n.position.y > self.bounds.y {
                n.velocity.y = -n.velocity.y;
                n.home_velocity.y = -n.home_velocity.y;
                n.position.y = n.position.y.clamp(0.0, self.bounds.y);
            }

            // Unconditional damping bounds speed growth under attraction.
            n.velocity *= cfg.damping;
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        // The point set survives resizes; only the bounds change. Clamp so
        // the bounds invariant holds immediately on a shrink.
        self.bounds = Vec2::new(width, height);
        for n in &mut self.neurons {
            n.position = n.position.clamp(Vec2::ZERO, self.bounds);
        }
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
        for n in &self.neurons {
            out.push(PointSprite {
                position: n.position,
                radius: n.radius,
                glow: self.config.glow.max(n.radius),
                color: self.config.color,
            });
        }
    }

    fn connections(&self, out: &mut Vec<Segment>) {
        let cfg = &self.config;
        for i in 0..self.neurons.len() {
            for j in (i + 1)..self.neurons.len() {
                let a = self.neurons[i].position;
                let b = self.neurons[j].position;
                let distance = a.distance(b);
                if distance < cfg.connection_threshold {
                    let alpha =
                        connection_alpha(distance, cfg.connection_threshold, cfg.connection_opacity);
                    let [r, g, bl, _] = cfg.color;
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

    fn in_bounds(field: &NeuronField) -> bool {
        field.neurons.iter().all(|n| {
            n.position.x >= 0.0
                && n.position.x <= field.bounds().x
                && n.position.y >= 0.0
                && n.position.y <= field.bounds().y
        })
    }

    #[test]
    fn test_spawn_count_and_bounds() {
        let field = NeuronField::new(NeuronFieldConfig::default(), 800.0, 600.0);
        assert_eq!(field.len(), 80);
        assert!(in_bounds(&field));
    }

    #[test]
    fn test_positions_stay_in_bounds_over_many_steps() {
        let mut field = NeuronField::new(NeuronFieldConfig::default(), 800.0, 600.0);
        let pointer = PointerState::inactive();
        for _ in 0..1000 {
            field.step(&pointer);
        }
        assert!(in_bounds(&field));
    }

    #[test]
    fn test_positions_stay_in_bounds_under_attraction() {
        let mut field = NeuronField::new(NeuronFieldConfig::default(), 800.0, 600.0);
        // Park the pointer in a corner; neurons pile up but never escape.
        let pointer = PointerState::at(0.0, 0.0);
        for _ in 0..1000 {
            field.step(&pointer);
        }
        assert!(in_bounds(&field));
    }

    #[test]
    fn test_velocity_relaxes_to_home_velocity() {
        let mut field = NeuronField::new(NeuronFieldConfig::default(), 4000.0, 4000.0);
        // Stir the swarm, then let it settle with the pointer gone.
        let pointer = PointerState::at(2000.0, 2000.0);
        for _ in 0..60 {
            field.step(&pointer);
        }
        let inactive = PointerState::inactive();
        for _ in 0..2000 {
            field.step(&inactive);
        }

        // Damping applies to velocity but not to home velocity, so the
        // fixed point of the relaxation sits slightly below home. With
        // blend 0.01 and damping 0.99 the steady state is
        // home * (blend * damping) / (1 - damping * (1 - blend)).
        let cfg = field.config();
        let gain = (cfg.home_blend * cfg.damping) / (1.0 - cfg.damping * (1.0 - cfg.home_blend));
        for n in &field.neurons {
            let target = n.home_velocity * gain;
            assert!(
                n.velocity.distance(target) < 0.05,
                "velocity should converge near its damped home velocity"
            );
        }
    }

    #[test]
    fn test_attraction_gain_monotonic_in_proximity() {
        // The impulse is the offset vector scaled by the falloff gain
        // (1 - d / cursor_radius) * attraction. The gain, not the raw
        // impulse, grows as the pointer gets closer.
        let config = NeuronFieldConfig::default();
        let mut gains = Vec::new();
        for &offset in &[180.0_f32, 120.0, 60.0, 20.0] {
            let mut field = NeuronField::new(config.clone(), 800.0, 600.0);
            field.neurons[0].position = Vec2::new(400.0, 300.0);
            field.neurons[0].velocity = Vec2::ZERO;
            field.neurons[0].home_velocity = Vec2::ZERO;
            let pointer = PointerState::at(400.0 + offset, 300.0);
            field.step(&pointer);
            // One step from rest: velocity = offset * gain * damping.
            let gain = field.neurons[0].velocity.length() / (offset * config.damping);
            let expected = (1.0 - offset / config.cursor_radius) * config.attraction;
            assert!((gain - expected).abs() < 1e-5);
            gains.push(gain);
        }
        for pair in gains.windows(2) {
            assert!(pair[1] > pair[0], "gain must grow as distance shrinks");
        }
    }

    #[test]
    fn test_edge_collision_reflects_both_velocities() {
        let mut field = NeuronField::new(NeuronFieldConfig::default(), 800.0, 600.0);
        field.neurons[0].position = Vec2::new(0.5, 300.0);
        field.neurons[0].velocity = Vec2::new(-2.0, 0.0);
        field.neurons[0].home_velocity = Vec2::new(-0.2, 0.0);

        field.step(&PointerState::inactive());

        let n = &field.neurons[0];
        assert!(n.position.x >= 0.0);
        assert!(n.velocity.x > 0.0, "current velocity reflects");
        assert!(n.home_velocity.x > 0.0, "home velocity reflects too");
    }

    #[test]
    fn test_resize_keeps_point_set_and_clamps() {
        let mut field = NeuronField::new(NeuronFieldConfig::default(), 800.0, 600.0);
        let before: Vec<Vec2> = field.neurons.iter().map(|n| n.velocity).collect();
        field.resize(200.0, 150.0);
        assert_eq!(field.len(), 80);
        assert!(in_bounds(&field));
        // Velocities are untouched; this is not a regeneration.
        let after: Vec<Vec2> = field.neurons.iter().map(|n| n.velocity).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_stop_retains_state_and_start_resumes() {
        let mut field = NeuronField::new(NeuronFieldConfig::default(), 800.0, 600.0);
        field.stop();
        let frozen: Vec<Vec2> = field.neurons.iter().map(|n| n.position).collect();
        field.step(&PointerState::at(400.0, 300.0));
        let still: Vec<Vec2> = field.neurons.iter().map(|n| n.position).collect();
        assert_eq!(frozen, still);

        field.start();
        field.step(&PointerState::inactive());
        let moved = field
            .neurons
            .iter()
            .zip(&frozen)
            .any(|(n, p)| n.position != *p);
        assert!(moved, "stepping resumes after start");
    }

    #[test]
    fn test_damping_bounds_speed_under_sustained_attraction() {
        let mut field = NeuronField::new(NeuronFieldConfig::default(), 800.0, 600.0);
        let pointer = PointerState::at(400.0, 300.0);
        let mut max_speed: f32 = 0.0;
        for _ in 0..2000 {
            field.step(&pointer);
            for n in &field.neurons {
                max_speed = max_speed.max(n.velocity.length());
            }
        }
        // Geometric damping against a bounded impulse keeps speed finite
        // and well under the impulse/(1-damping) ceiling.
        let cfg = field.config();
        let ceiling = cfg.cursor_radius * cfg.attraction / (1.0 - cfg.damping);
        assert!(max_speed.is_finite());
        assert!(max_speed < ceiling);
    }
}
