use thiserror::Error;

/// Reference temperature of the mobility parametrisation [K].
const T_REF: f64 = 300.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarrierError {
    #[error("unknown carrier indicator {0:?}, expected 'e' or 'h'")]
    UnknownIndicator(char),
}

/// Mobile charge carrier species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CarrierType {
    Electron,
    Hole,
}

impl CarrierType {
    /// Permissive mapping: `'e'` is an electron, anything else a hole.
    pub fn from_indicator(indicator: char) -> Self {
        if indicator == 'e' {
            CarrierType::Electron
        } else {
            CarrierType::Hole
        }
    }

    /// Drift direction relative to the field.
    pub fn sign(self) -> f64 {
        match self {
            CarrierType::Electron => -1.0,
            CarrierType::Hole => 1.0,
        }
    }
}

impl TryFrom<char> for CarrierType {
    type Error = CarrierError;

    fn try_from(indicator: char) -> Result<Self, Self::Error> {
        match indicator {
            'e' => Ok(CarrierType::Electron),
            'h' => Ok(CarrierType::Hole),
            other => Err(CarrierError::UnknownIndicator(other)),
        }
    }
}

/// Scalar mobility as a function of carrier, temperature [K] and field magnitude.
pub trait MobilityModel {
    fn mobility(&self, carrier: CarrierType, temperature: f64, field_magnitude: f64) -> f64;
}

impl<F> MobilityModel for F
where
    F: Fn(CarrierType, f64, f64) -> f64,
{
    fn mobility(&self, carrier: CarrierType, temperature: f64, field_magnitude: f64) -> f64 {
        self(carrier, temperature, field_magnitude)
    }
}

/// Field-independent mobility, mostly useful as a test double.
#[derive(Clone, Copy, Debug)]
pub struct ConstantMobility(pub f64);

impl MobilityModel for ConstantMobility {
    fn mobility(&self, _: CarrierType, _: f64, _: f64) -> f64 {
        self.0
    }
}

/// Parameters of the saturated-velocity law at one temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaturationParams {
    /// Low-field mobility [µm²/(V·s)].
    pub mu0: f64,
    /// Saturation velocity [µm/s].
    pub v_sat: f64,
    pub beta: f64,
}

/// Caughey–Thomas mobility for silicon, `<100>` orientation.
///
/// `μ(E) = μ0 / (1 + (μ0 E / v_sat)^β)^(1/β)`, with all three parameters scaled
/// as a power of `T / 300 K`. Units are µm, V and s.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaugheyThomas;

impl CaugheyThomas {
    pub fn params(carrier: CarrierType, temperature: f64) -> SaturationParams {
        let t = temperature / T_REF;
        match carrier {
            CarrierType::Electron => SaturationParams {
                mu0: 1440.0e8 * t.powf(-2.260),
                v_sat: 1.054e11 * t.powf(-0.602),
                beta: 0.992 * t.powf(0.572),
            },
            CarrierType::Hole => SaturationParams {
                mu0: 474.0e8 * t.powf(-2.619),
                v_sat: 0.940e11 * t.powf(-0.226),
                beta: 1.181 * t.powf(0.633),
            },
        }
    }
}

impl MobilityModel for CaugheyThomas {
    fn mobility(&self, carrier: CarrierType, temperature: f64, field_magnitude: f64) -> f64 {
        let p = Self::params(carrier, temperature);
        let ratio = p.mu0 * field_magnitude / p.v_sat;
        p.mu0 / (1.0 + ratio.powf(p.beta)).powf(1.0 / p.beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn indicator_mapping() {
        assert_eq!(CarrierType::from_indicator('e'), CarrierType::Electron);
        assert_eq!(CarrierType::from_indicator('h'), CarrierType::Hole);
        assert_eq!(CarrierType::from_indicator('x'), CarrierType::Hole);
        assert_eq!(
            CarrierType::try_from('x'),
            Err(CarrierError::UnknownIndicator('x'))
        );
        assert_eq!(CarrierType::try_from('e'), Ok(CarrierType::Electron));
    }

    #[test]
    fn low_field_limit_is_mu0() {
        let mu = CaugheyThomas.mobility(CarrierType::Electron, 300.0, 0.0);
        assert_relative_eq!(mu, 1440.0e8);
        let mu = CaugheyThomas.mobility(CarrierType::Hole, 300.0, 0.0);
        assert_relative_eq!(mu, 474.0e8);
    }

    #[test]
    fn drift_speed_saturates() {
        // 100 V/µm is far into saturation for both carriers
        for carrier in [CarrierType::Electron, CarrierType::Hole] {
            let field = 100.0;
            let speed = CaugheyThomas.mobility(carrier, 300.0, field) * field;
            let v_sat = CaugheyThomas::params(carrier, 300.0).v_sat;
            assert!(speed < v_sat);
            assert!(speed > 0.9 * v_sat, "{carrier:?}: {speed} vs {v_sat}");
        }
    }

    #[test]
    fn mobility_drops_with_temperature() {
        let cold = CaugheyThomas.mobility(CarrierType::Electron, 250.0, 0.1);
        let warm = CaugheyThomas.mobility(CarrierType::Electron, 350.0, 0.1);
        assert!(cold > warm);
    }
}
