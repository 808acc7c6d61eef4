//! Least-squares polynomial smoothing for the trend lines.
//!
//! Batch sizes are mapped to `[-1, 1]` and the fit is expanded in polynomials
//! orthogonal over the sampled points (three-term recurrence), so sweeps that
//! crowd one end of the range, like powers of two, still get the full degree.
//! The degree is only capped by the number of distinct batch sizes.

use itertools::Itertools;
use tracing::debug;

/// Upper bound on refinement sweeps over the basis
const MAX_PASSES: usize = 16;

/// A polynomial in the mapped variable `t = (x - offset) / scale`, stored as
/// weights of the recurrence `p[k+1] = (t - alpha[k]) p[k] - beta[k] p[k-1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    /// Lowest order first
    coefficients: Vec<f64>,
    alphas: Vec<f64>,
    betas: Vec<f64>,
    offset: f64,
    scale: f64,
}

impl Polynomial {
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn eval(&self, x: f64) -> f64 {
        let t = (x - self.offset) / self.scale;
        let (mut prev, mut cur, mut sum) = (0.0, 1.0, 0.0);
        for (k, c) in self.coefficients.iter().enumerate() {
            sum += c * cur;
            let next = (t - self.alphas[k]) * cur - self.betas[k] * prev;
            prev = cur;
            cur = next;
        }
        sum
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Fits `ys` against `xs` with `degree`, or `distinct xs - 1` when that is lower.
/// `None` when there are no points or the input is not finite.
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Option<Polynomial> {
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }

    let (min, max) = xs.iter().copied().minmax().into_option()?;
    let offset = (min + max) / 2.0;
    let scale = if max > min { (max - min) / 2.0 } else { 1.0 };
    let ts = xs.iter().map(|x| (x - offset) / scale).collect::<Vec<_>>();

    let distinct = xs.iter().map(|x| x.to_bits()).unique().count();
    let degree = degree.min(distinct - 1);

    // basis polynomials evaluated at the sample points
    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(degree + 1);
    let mut norms = Vec::with_capacity(degree + 1);
    let mut alphas = Vec::with_capacity(degree + 1);
    let mut betas = Vec::with_capacity(degree + 1);
    let mut prev = vec![0.0; ts.len()];
    let mut cur = vec![1.0; ts.len()];
    let mut prev_norm = 1.0;
    for k in 0..=degree {
        let norm = dot(&cur, &cur);
        if !norm.is_finite() || norm <= 0.0 {
            debug!("Basis of degree {k} vanishes on the samples, stopping at {}", k.saturating_sub(1));
            break;
        }
        let alpha = ts.iter().zip(&cur).map(|(t, p)| t * p * p).sum::<f64>() / norm;
        let beta = if k == 0 { 0.0 } else { norm / prev_norm };
        let next = ts
            .iter()
            .zip(cur.iter().zip(&prev))
            .map(|(t, (p, q))| (t - alpha) * p - beta * q)
            .collect::<Vec<_>>();

        basis.push(cur.clone());
        norms.push(norm);
        alphas.push(alpha);
        betas.push(beta);
        prev = std::mem::replace(&mut cur, next);
        prev_norm = norm;
    }
    if basis.is_empty() {
        return None;
    }

    // Orthogonality drifts for crowded samples; repeated projection of the
    // residual converges to the least-squares weights regardless.
    let peaks = basis
        .iter()
        .map(|p| p.iter().fold(0.0, |m: f64, v| m.max(v.abs())))
        .collect::<Vec<_>>();
    let y_scale = ys.iter().fold(0.0, |m: f64, y| m.max(y.abs()));
    let mut coefficients = vec![0.0; basis.len()];
    let mut residual = ys.to_vec();
    for pass in 0..MAX_PASSES {
        let mut largest_change = 0.0f64;
        for (k, p) in basis.iter().enumerate() {
            let c = dot(&residual, p) / norms[k];
            coefficients[k] += c;
            residual.iter_mut().zip(p).for_each(|(r, v)| *r -= c * v);
            largest_change = largest_change.max(c.abs() * peaks[k]);
        }
        if !largest_change.is_finite() {
            return None;
        }
        if largest_change <= f64::EPSILON * y_scale {
            debug!("Degree {} fit converged after {} passes", basis.len() - 1, pass + 1);
            break;
        }
    }

    Some(Polynomial {
        coefficients,
        alphas,
        betas,
        offset,
        scale,
    })
}

/// Evaluates `poly` on `start, start + step, ...` while below `stop`
pub fn sample_curve(poly: &Polynomial, start: f64, stop: f64, step: f64) -> Vec<(f64, f64)> {
    if step.is_nan() || step <= 0.0 {
        return Vec::new();
    }
    (0u64..)
        .map(|i| start + i as f64 * step)
        .take_while(|x| *x < stop)
        .map(|x| (x, poly.eval(x)))
        .collect()
}
