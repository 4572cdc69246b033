use super::field::FieldSampler;
use super::mobility::{CarrierType, MobilityModel};
use nalgebra::{Point2, Vector2};

/// Thermal diffusion mode of a carrier packet.
///
/// Stored with the transport settings; the drift velocity does not use it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Diffusion {
    #[default]
    Off,
    Thermal,
}

/// Integer flag form: `0` is off, anything else turns diffusion on.
impl From<i32> for Diffusion {
    fn from(flag: i32) -> Self {
        if flag == 0 {
            Diffusion::Off
        } else {
            Diffusion::Thermal
        }
    }
}

/// Per-carrier transport settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransportConfig {
    pub carrier: CarrierType,
    /// Lattice temperature [K].
    pub temperature: f64,
    /// Stored only; drift ignores it.
    pub diffusion: Diffusion,
    /// Integration step the carrier is advanced with. Stored only.
    pub dt: f64,
}

impl TransportConfig {
    pub fn new(carrier: CarrierType, temperature: f64) -> Self {
        Self {
            carrier,
            temperature,
            diffusion: Diffusion::Off,
            dt: 1e-12,
        }
    }

    pub fn with_diffusion(mut self, diffusion: impl Into<Diffusion>) -> Self {
        self.diffusion = diffusion.into();
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }
}

/// Drift velocity of one carrier species in a borrowed field.
///
/// This is the right-hand side of `dx/dt = f(x, t)`; it holds no per-call
/// state, so a single evaluator can be shared across integrator threads when
/// the sampler and mobility model are `Sync`.
pub struct DriftTransport<'a, S, M> {
    field: &'a S,
    mobility: M,
    config: TransportConfig,
    sign: f64,
}

impl<'a, S, M> DriftTransport<'a, S, M>
where
    S: FieldSampler,
    M: MobilityModel,
{
    pub fn new(field: &'a S, mobility: M, config: TransportConfig) -> Self {
        Self {
            field,
            mobility,
            sign: config.carrier.sign(),
            config,
        }
    }

    pub fn carrier(&self) -> CarrierType {
        self.config.carrier
    }

    pub fn sign(&self) -> f64 {
        self.sign
    }

    pub fn temperature(&self) -> f64 {
        self.config.temperature
    }

    pub fn diffusion(&self) -> Diffusion {
        self.config.diffusion
    }

    pub fn dt(&self) -> f64 {
        self.config.dt
    }

    pub fn field(&self) -> &'a S {
        self.field
    }

    /// `v = sign · μ(|E|) · E` at `x`.
    ///
    /// `_t` is accepted for the integrator's benefit; the field is static.
    /// Sampler failures are returned unchanged.
    pub fn velocity(&self, x: &Point2<f64>, _t: f64) -> Result<Vector2<f64>, S::Error> {
        let e_field = self.field.evaluate(x)?;
        Ok(self.velocity_in(&e_field))
    }

    /// Velocity for an already sampled field value.
    pub fn velocity_in(&self, e_field: &Vector2<f64>) -> Vector2<f64> {
        let mu = self
            .mobility
            .mobility(self.config.carrier, self.config.temperature, e_field.norm());
        e_field * (self.sign * mu)
    }
}
