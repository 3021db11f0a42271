//! Static tunables for the built-in fields.
//!
//! Every value here is fixed for a field's lifetime. Construct a config,
//! adjust what you want, and hand it to the field constructor.

/// Minimum logical window width at which fields run.
///
/// Below this the host stage stops the field and draws nothing, matching
/// the usual "decorative effects off on small screens" behavior.
pub const DESKTOP_MIN_WIDTH: f64 = 768.0;

/// Tunables for [`ParticleField`](crate::ParticleField).
#[derive(Debug, Clone)]
pub struct ParticleFieldConfig {
    /// Number of particles in the swarm.
    pub count: usize,
    /// Pointer interaction radius in pixels.
    pub pointer_radius: f32,
    /// Magnitude of the random anchor drift velocity. Each axis is drawn
    /// uniformly from `-drift_speed / 2 .. drift_speed / 2`.
    pub drift_speed: f32,
    /// Per-particle repulsion strength, drawn uniformly from this range at
    /// spawn time.
    pub density: (f32, f32),
    /// Particle core radius range in pixels, drawn at spawn time.
    pub radius: (f32, f32),
    /// Maximum pairwise distance at which a connection line is drawn.
    pub connection_threshold: f32,
    /// Opacity of a connection line at distance zero.
    pub connection_opacity: f32,
    /// RGB of the connection lines (0.0-1.0).
    pub connection_color: [f32; 3],
    /// Glow radius around each particle in pixels.
    pub glow: f32,
    /// Fraction of the position-to-anchor offset removed per frame while
    /// the pointer is not pushing the particle.
    pub relaxation: f32,
    /// RGBA palette. Each particle picks one entry at spawn time.
    pub palette: [[f32; 4]; 3],
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            count: 50,
            pointer_radius: 150.0,
            drift_speed: 0.5,
            density: (1.0, 31.0),
            radius: (1.0, 4.0),
            connection_threshold: 120.0,
            connection_opacity: 0.2,
            connection_color: [74.0 / 255.0, 144.0 / 255.0, 226.0 / 255.0],
            glow: 10.0,
            relaxation: 0.1,
            palette: [
                [74.0 / 255.0, 144.0 / 255.0, 226.0 / 255.0, 0.8],
                [0.0, 217.0 / 255.0, 1.0, 0.8],
                [0.0, 1.0, 148.0 / 255.0, 0.6],
            ],
        }
    }
}

/// Tunables for [`NeuronField`](crate::NeuronField).
#[derive(Debug, Clone)]
pub struct NeuronFieldConfig {
    /// Number of neurons in the swarm.
    pub count: usize,
    /// Pointer attraction radius in pixels.
    pub cursor_radius: f32,
    /// Attraction impulse scale. The per-frame impulse is the vector toward
    /// the pointer times `(1 - distance / cursor_radius) * attraction`.
    pub attraction: f32,
    /// Magnitude of the random drift velocity. Each axis is drawn uniformly
    /// from `-speed / 2 .. speed / 2`.
    pub speed: f32,
    /// Maximum pairwise distance at which a connection line is drawn.
    pub connection_threshold: f32,
    /// Opacity of a connection line at distance zero.
    pub connection_opacity: f32,
    /// Neuron core radius in pixels.
    pub radius: f32,
    /// Glow radius around each neuron in pixels.
    pub glow: f32,
    /// Velocity retained per frame. Applied unconditionally, which bounds
    /// speed growth under sustained attraction.
    pub damping: f32,
    /// Fraction of the velocity-to-home offset blended back per frame while
    /// outside the cursor radius.
    pub home_blend: f32,
    /// RGBA accent color shared by all neurons and their connections.
    pub color: [f32; 4],
}

impl Default for NeuronFieldConfig {
    fn default() -> Self {
        Self {
            count: 80,
            cursor_radius: 200.0,
            attraction: 0.03,
            speed: 0.5,
            connection_threshold: 150.0,
            connection_opacity: 0.15,
            radius: 3.0,
            glow: 8.0,
            damping: 0.99,
            home_blend: 0.01,
            color: [0.0, 217.0 / 255.0, 1.0, 1.0],
        }
    }
}
