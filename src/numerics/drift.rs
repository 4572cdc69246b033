use crate::numerics::stepper::Stepper;
#[allow(unused)]
use crate::numerics::timing::{finalize_and_report, record_step, reset_timing};
use crate::physics::field::FieldSampler;
use crate::physics::geometry::DomainBounds;
use crate::physics::mobility::MobilityModel;
use crate::physics::transport::DriftTransport;
use nalgebra::{Point2, Vector2};
use thiserror::Error;
use tracing::{debug, trace, warn};

#[cfg(feature = "timing")]
use std::time::Instant;

/// Elementary charge [C].
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;

#[derive(Debug, Error)]
pub enum DriftError<E: std::error::Error + 'static> {
    #[error("field evaluation failed")]
    Sampler(#[source] E),
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("carrier starts outside the device at ({x}, {y})")]
    StartOutsideDomain { x: f64, y: f64 },
}

/// Why a drift run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriftExit {
    /// The carrier left, or was about to leave, the device.
    Collected,
    TimeLimit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftSample {
    pub t: f64,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    /// Induced current [A], recorded when a weighting field is given.
    pub current: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct DriftTrace {
    pub samples: Vec<DriftSample>,
    pub exit: DriftExit,
}

impl DriftTrace {
    pub fn final_position(&self) -> Option<Point2<f64>> {
        self.samples.last().map(|s| s.position)
    }

    /// Induced charge, the time integral of the current (trapezoidal).
    pub fn induced_charge(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| {
                let (a, b) = (&w[0], &w[1]);
                0.5 * (a.current.unwrap_or(0.0) + b.current.unwrap_or(0.0)) * (b.t - a.t)
            })
            .sum()
    }
}

/// Advances a single carrier through the device until it is collected or the
/// time window closes.
pub struct DriftSolver {
    pub t_start: f64,
    pub t_end: f64,
    pub dt: f64,
    pub stepper: Stepper,
    /// Number of elementary charges carried by the simulated packet.
    pub charges: f64,
}

impl Default for DriftSolver {
    fn default() -> Self {
        Self {
            t_start: 0.0,
            t_end: 20e-9,
            dt: 1e-12,
            stepper: Stepper::Rk4,
            charges: 1.0,
        }
    }
}

impl DriftSolver {
    pub fn run<S, M>(
        &self,
        transport: &DriftTransport<'_, S, M>,
        bounds: &DomainBounds,
        start: Point2<f64>,
    ) -> Result<DriftTrace, DriftError<S::Error>>
    where
        S: FieldSampler,
        M: MobilityModel,
    {
        self.drift(transport, None::<&S>, bounds, start)
    }

    /// Like [`run`](Self::run), also recording the Shockley–Ramo current
    /// `i = q v · E_w` induced on the electrode whose weighting field is given.
    pub fn run_with_signal<S, M, W>(
        &self,
        transport: &DriftTransport<'_, S, M>,
        weighting: &W,
        bounds: &DomainBounds,
        start: Point2<f64>,
    ) -> Result<DriftTrace, DriftError<S::Error>>
    where
        S: FieldSampler,
        M: MobilityModel,
        W: FieldSampler<Error = S::Error>,
    {
        self.drift(transport, Some(weighting), bounds, start)
    }

    fn drift<S, M, W>(
        &self,
        transport: &DriftTransport<'_, S, M>,
        weighting: Option<&W>,
        bounds: &DomainBounds,
        start: Point2<f64>,
    ) -> Result<DriftTrace, DriftError<S::Error>>
    where
        S: FieldSampler,
        M: MobilityModel,
        W: FieldSampler<Error = S::Error>,
    {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(DriftError::InvalidTimeStep(self.dt));
        }
        if !bounds.contains(start.x, start.y) {
            return Err(DriftError::StartOutsideDomain {
                x: start.x,
                y: start.y,
            });
        }

        #[cfg(feature = "timing")]
        reset_timing();
        #[cfg(feature = "timing")]
        let run_start = Instant::now();

        let q = transport.sign() * ELEMENTARY_CHARGE * self.charges;
        // shave rounding noise so that an exact multiple of dt is not rounded up
        let span = (self.t_end - self.t_start) / self.dt;
        let n_max = (span * (1.0 - 1e-12)).ceil().max(0.0) as usize;

        let mut samples = Vec::with_capacity(n_max.min(1 << 16) + 1);
        let mut x = start;
        let mut n = 0;

        let exit = loop {
            if !bounds.contains(x.x, x.y) {
                break DriftExit::Collected;
            }
            let t = self.t_start + n as f64 * self.dt;
            let velocity = transport.velocity(&x, t).map_err(DriftError::Sampler)?;
            let current = match weighting {
                Some(w) => {
                    let e_w = w.evaluate(&x).map_err(DriftError::Sampler)?;
                    Some(q * velocity.dot(&e_w))
                }
                None => None,
            };
            samples.push(DriftSample {
                t,
                position: x,
                velocity,
                current,
            });
            trace!(step = n, t, x = x.x, y = x.y, "drift step");

            if n >= n_max {
                break DriftExit::TimeLimit;
            }
            let probe = x + velocity * self.dt;
            if !bounds.contains(probe.x, probe.y) {
                break DriftExit::Collected;
            }

            x = record_step(|| {
                self.stepper
                    .step(&x, t, self.dt, |p, tp| transport.velocity(p, tp))
            })
            .map_err(DriftError::Sampler)?;
            n += 1;
        };

        #[cfg(feature = "timing")]
        finalize_and_report(run_start.elapsed());

        match exit {
            DriftExit::Collected => debug!(
                carrier = ?transport.carrier(),
                steps = n,
                "carrier collected"
            ),
            DriftExit::TimeLimit => warn!(
                carrier = ?transport.carrier(),
                x = x.x,
                y = x.y,
                "carrier still inside the device at the end of the time window"
            ),
        }

        Ok(DriftTrace { samples, exit })
    }
}
