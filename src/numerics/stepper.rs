use nalgebra::{Point2, Vector2};

/// Explicit one-step schemes for `dx/dt = f(x, t)` in the device plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stepper {
    Euler,
    #[default]
    Rk4,
}

impl Stepper {
    /// Advance `x` from `t` to `t + dt`. The first failing evaluation of `rhs`
    /// aborts the step and is returned as is.
    pub fn step<F, E>(self, x: &Point2<f64>, t: f64, dt: f64, mut rhs: F) -> Result<Point2<f64>, E>
    where
        F: FnMut(&Point2<f64>, f64) -> Result<Vector2<f64>, E>,
    {
        match self {
            Stepper::Euler => Ok(x + rhs(x, t)? * dt),
            Stepper::Rk4 => {
                let half = 0.5 * dt;
                let k1 = rhs(x, t)?;
                let k2 = rhs(&(x + k1 * half), t + half)?;
                let k3 = rhs(&(x + k2 * half), t + half)?;
                let k4 = rhs(&(x + k3 * dt), t + dt)?;
                Ok(x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0))
            }
        }
    }

    pub fn stages(self) -> usize {
        match self {
            Stepper::Euler => 1,
            Stepper::Rk4 => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::convert::Infallible;

    #[test]
    fn rk4_integrates_rotation() {
        // dx/dt = (-y, x) has the exact solution of a rotation
        let rhs = |p: &Point2<f64>, _t: f64| -> Result<Vector2<f64>, Infallible> {
            Ok(Vector2::new(-p.y, p.x))
        };
        let mut x = Point2::new(1.0, 0.0);
        let dt = 0.01;
        for n in 0..100 {
            x = Stepper::Rk4.step(&x, n as f64 * dt, dt, rhs).unwrap();
        }
        assert_relative_eq!(x.x, 1.0f64.cos(), epsilon = 1e-9);
        assert_relative_eq!(x.y, 1.0f64.sin(), epsilon = 1e-9);
    }

    #[test]
    fn steppers_agree_for_constant_velocity() {
        let rhs = |_: &Point2<f64>, _: f64| -> Result<Vector2<f64>, Infallible> {
            Ok(Vector2::new(3.0, -4.0))
        };
        let x = Point2::new(1.0, 1.0);
        let euler = Stepper::Euler.step(&x, 0.0, 0.5, rhs).unwrap();
        let rk4 = Stepper::Rk4.step(&x, 0.0, 0.5, rhs).unwrap();
        assert_relative_eq!(euler, Point2::new(2.5, -1.0));
        assert_relative_eq!(rk4, euler, epsilon = 1e-12);
    }

    #[test]
    fn failing_stage_aborts_step() {
        let mut calls = 0;
        let result = Stepper::Rk4.step(&Point2::origin(), 0.0, 1.0, |_, _| {
            calls += 1;
            if calls == 2 { Err("outside") } else { Ok(Vector2::new(1.0, 0.0)) }
        });
        assert_eq!(result, Err("outside"));
        assert_eq!(calls, 2);
    }

    #[test]
    fn stage_count_matches_rhs_calls() {
        for stepper in [Stepper::Euler, Stepper::Rk4] {
            let mut calls = 0;
            stepper
                .step(&Point2::origin(), 0.0, 0.1, |_, _| {
                    calls += 1;
                    Ok::<_, Infallible>(Vector2::new(0.0, 1.0))
                })
                .unwrap();
            assert_eq!(calls, stepper.stages());
        }
    }
}
