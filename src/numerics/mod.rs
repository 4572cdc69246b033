pub mod drift;
pub mod stepper;
pub mod timing;

pub use drift::{DriftError, DriftExit, DriftSolver, DriftTrace};
pub use stepper::Stepper;
