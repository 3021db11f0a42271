//! # Neuron Web Demo
//!
//! A cyan web of points that leans toward the cursor instead of fleeing it.
//! The pointer feeds an attraction impulse into each point's velocity, and
//! per-frame damping keeps the swarm from running away.
//!
//! ## What This Demonstrates
//!
//! - `NeuronField` - velocity-based pointer attraction with damping
//! - Home-velocity relaxation: the swarm settles back into its own drift
//!   once the cursor leaves
//! - Edge collisions that reflect both the current and home velocity, so a
//!   bounced neuron keeps its new heading after it relaxes
//!
//! Hold the cursor still inside the web and watch nearby points gather;
//! the 150 px connection threshold makes the web visibly densify.

use driftfield::prelude::*;

fn main() -> Result<(), RunError> {
    let config = NeuronFieldConfig {
        count: 80,
        cursor_radius: 200.0,
        ..Default::default()
    };

    let field = NeuronField::new(config, 1280.0, 720.0);

    Stage::new(field)
        .with_title("driftfield - neuron web")
        .with_size(1280, 720)
        .run()
}
