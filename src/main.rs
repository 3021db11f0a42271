use driftfield::prelude::*;

fn main() -> Result<(), RunError> {
    let field = ParticleField::new(ParticleFieldConfig::default(), 1280.0, 720.0);
    Stage::new(field)
        .with_title("driftfield - drifting particles")
        .run()
}
