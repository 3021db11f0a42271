//! # driftfield
//!
//! Ambient 2D particle fields with cursor interaction.
//!
//! driftfield drives small decorative point swarms on the CPU and renders
//! them through wgpu: glowing dots, distance-faded connection lines, and a
//! pointer that pushes or pulls the swarm around.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     let field = ParticleField::new(ParticleFieldConfig::default(), 1280.0, 720.0);
//!     Stage::new(field)
//!         .with_title("drifting particles")
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Fields
//!
//! A [`Field`] owns a fixed-size set of points and advances them one frame
//! at a time. Two fields are built in:
//!
//! - [`ParticleField`] - points are pushed directly away from the pointer
//!   and relax back toward a drifting anchor position afterward.
//! - [`NeuronField`] - the pointer accumulates an attraction impulse into
//!   point velocities, which relax toward a stored home velocity otherwise.
//!
//! Both draw lines between points closer than a connection threshold, with
//! opacity fading linearly to zero at the threshold. The pairwise pass is
//! O(n²) per frame, which is fine at the default counts (50-80 points).
//!
//! ### Stage
//!
//! [`Stage`] hosts one field in a winit window: it feeds pointer events into
//! a [`PointerState`], steps the field at a fixed 60 Hz, and renders sprites
//! and segments each redraw. Below a desktop width threshold the field is
//! stopped and nothing is drawn; crossing back above restarts it.
//!
//! ### Configuration
//!
//! All tunables (point counts, interaction radii, drift speeds, connection
//! thresholds, glow sizes) are fixed at construction via
//! [`ParticleFieldConfig`] and [`NeuronFieldConfig`].

pub mod config;
pub mod cursor;
mod error;
pub mod field;
mod gpu;
pub mod neuron_field;
pub mod particle_field;
pub mod pointer;
pub mod spawn;
pub mod time;
mod window;

pub use config::{NeuronFieldConfig, ParticleFieldConfig, DESKTOP_MIN_WIDTH};
pub use cursor::CursorHalo;
pub use error::{GpuError, RunError};
pub use field::{connection_alpha, Field, PointSprite, Segment};
pub use glam::Vec2;
pub use neuron_field::NeuronField;
pub use particle_field::ParticleField;
pub use pointer::PointerState;
pub use spawn::SpawnContext;
pub use window::Stage;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use driftfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{NeuronFieldConfig, ParticleFieldConfig, DESKTOP_MIN_WIDTH};
    pub use crate::cursor::CursorHalo;
    pub use crate::error::{GpuError, RunError};
    pub use crate::field::{connection_alpha, Field, PointSprite, Segment};
    pub use crate::neuron_field::NeuronField;
    pub use crate::particle_field::ParticleField;
    pub use crate::pointer::PointerState;
    pub use crate::spawn::SpawnContext;
    pub use crate::time::Time;
    pub use crate::window::Stage;
    pub use crate::Vec2;
}
