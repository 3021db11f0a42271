//! # Drifting Particles Demo
//!
//! A swarm of glowing dots that drifts slowly across the window and scatters
//! away from the cursor. Dots closer than 120 px are joined by lines whose
//! opacity fades with distance.
//!
//! ## What This Demonstrates
//!
//! - `ParticleField` - direct pointer repulsion with anchor relaxation
//! - `ParticleFieldConfig` - tuning counts, radii and the color palette
//! - `Stage` - window setup, fixed-rate stepping, cursor halo
//!
//! Move the mouse through the swarm to push particles aside; they ease back
//! to their drifting anchors once the cursor leaves. Shrink the window below
//! 768 logical px wide and the field pauses entirely.

use driftfield::prelude::*;

fn main() -> Result<(), RunError> {
    let config = ParticleFieldConfig {
        count: 50,
        pointer_radius: 150.0,
        ..Default::default()
    };

    let field = ParticleField::new(config, 1280.0, 720.0);

    Stage::new(field)
        .with_title("driftfield - drifting particles")
        .with_size(1280, 720)
        .run()
}
