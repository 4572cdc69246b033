use super::geometry::DomainBounds;
use nalgebra::{Point2, Vector2};
use thiserror::Error;

/// Point evaluation of a solved vector field (electric or weighting field).
///
/// The solution stays owned by the solver; transport only borrows the sampler.
/// Samplers shared between threads must tolerate concurrent reads.
pub trait FieldSampler {
    type Error: std::error::Error + 'static;

    fn evaluate(&self, x: &Point2<f64>) -> Result<Vector2<f64>, Self::Error>;
}

impl<F, E> FieldSampler for F
where
    F: Fn(&Point2<f64>) -> Result<Vector2<f64>, E>,
    E: std::error::Error + 'static,
{
    type Error = E;

    fn evaluate(&self, x: &Point2<f64>) -> Result<Vector2<f64>, E> {
        self(x)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SamplerError {
    #[error("point ({x}, {y}) is outside the solved domain")]
    OutsideDomain { x: f64, y: f64 },
}

/// Constant field over a rectangular domain, e.g. a fully depleted pad diode.
#[derive(Clone, Copy, Debug)]
pub struct UniformField {
    pub field: Vector2<f64>,
    pub domain: DomainBounds,
}

impl UniformField {
    pub fn new(field: Vector2<f64>, domain: DomainBounds) -> Self {
        Self { field, domain }
    }

    /// Field of a planar diode biased at `voltage` across `domain.depth`,
    /// with the back plane at the higher potential when `voltage > 0`.
    pub fn planar(voltage: f64, domain: DomainBounds) -> Self {
        Self::new(Vector2::new(0.0, -voltage / domain.depth), domain)
    }
}

impl FieldSampler for UniformField {
    type Error = SamplerError;

    fn evaluate(&self, x: &Point2<f64>) -> Result<Vector2<f64>, SamplerError> {
        if self.domain.contains(x.x, x.y) {
            Ok(self.field)
        } else {
            Err(SamplerError::OutsideDomain { x: x.x, y: x.y })
        }
    }
}
