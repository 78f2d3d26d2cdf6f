//! # Numerical Integration
//!
//! Fixed-step integrators over small state arrays.

/// Classical fourth-order Runge-Kutta step of length `dt`.
///
/// `derivs` maps a state to its time derivative. The four evaluations are
/// combined with weights 1:2:2:1 as `y0 + dt/6 * (k1 + (2 k2 + (2 k3 + k4)))`.
///
/// # Errors
///
/// Stops at the first derivative evaluation that fails.
pub fn rk4<const N: usize, E>(
    y0: &[f32; N],
    dt: f32,
    mut derivs: impl FnMut(&[f32; N]) -> Result<[f32; N], E>,
) -> Result<[f32; N], E> {
    let half = dt * 0.5;
    let k1 = derivs(y0)?;
    let k2 = derivs(&axpy(y0, &k1, half))?;
    let k3 = derivs(&axpy(y0, &k2, half))?;
    let k4 = derivs(&axpy(y0, &k3, dt))?;

    let mut out = [0.0; N];
    for i in 0..N {
        let sum = k1[i] + (k2[i] * 2.0 + (k3[i] * 2.0 + k4[i]));
        out[i] = y0[i] + sum * (dt / 6.0);
    }
    Ok(out)
}

/// `y + k * scale`, elementwise.
fn axpy<const N: usize>(y: &[f32; N], k: &[f32; N], scale: f32) -> [f32; N] {
    let mut out = *y;
    for (o, &d) in out.iter_mut().zip(k) {
        *o += d * scale;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn constant_derivative_is_exact() {
        let y = rk4(&[1.0, -1.0], 0.5, |_| Ok::<_, Infallible>([2.0, 4.0])).unwrap();
        assert!((y[0] - 2.0).abs() < 1e-6);
        assert!((y[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn exponential_growth_is_fourth_order_accurate() {
        // dy/dt = y over one step of 0.1 should match e^0.1 closely.
        let y = rk4(&[1.0], 0.1, |s| Ok::<_, Infallible>([s[0]])).unwrap();
        assert!((y[0] - 0.1f32.exp()).abs() < 1e-6);
    }

    #[test]
    fn derivative_errors_propagate() {
        let mut calls = 0;
        let out: Result<[f32; 1], &str> = rk4(&[0.0], 0.1, |_| {
            calls += 1;
            if calls == 2 { Err("boom") } else { Ok([1.0]) }
        });
        assert_eq!(out, Err("boom"));
        assert_eq!(calls, 2);
    }
}
