use std::f64::consts::PI;

/// Number of evaluation points of a density curve.
pub const GRID_SIZE: usize = 200;

/// How many bandwidths the curve extends past the extreme samples.
pub const CUT: f64 = 3.0;

/// A Gaussian kernel density estimate evaluated on an even grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    pub bandwidth: f64,
    pub points: Vec<(f64, f64)>,
}

impl DensityCurve {
    pub fn x_range(&self) -> (f64, f64) {
        let first = self.points.first().map_or(0.0, |p| p.0);
        let last = self.points.last().map_or(0.0, |p| p.0);
        (first, last)
    }

    pub fn max_density(&self) -> f64 {
        self.points.iter().map(|p| p.1).fold(0.0, f64::max)
    }
}

/// Estimates the density of `samples` with a Gaussian kernel.
///
/// The bandwidth follows Scott's rule, `n^(-1/5)` times the sample standard
/// deviation. Returns `None` when there is nothing to estimate: fewer than two
/// samples, zero variance, or fewer than two grid points.
pub fn gaussian_kde(samples: &[f64], grid_size: usize) -> Option<DensityCurve> {
    let n = samples.len();
    if n < 2 || grid_size < 2 {
        return None;
    }

    let nf = n as f64;
    let mean = samples.iter().sum::<f64>() / nf;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (nf - 1.0);
    let std_dev = variance.sqrt();
    if !std_dev.is_finite() || std_dev <= f64::EPSILON {
        return None;
    }

    let bandwidth = std_dev * nf.powf(-0.2);
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lo = min - CUT * bandwidth;
    let hi = max + CUT * bandwidth;
    let step = (hi - lo) / (grid_size - 1) as f64;
    let norm = 1.0 / (nf * bandwidth * (2.0 * PI).sqrt());

    let points = (0..grid_size)
        .map(|i| {
            let x = lo + step * i as f64;
            let density = samples
                .iter()
                .map(|s| {
                    let z = (x - s) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            (x, density)
        })
        .collect();

    Some(DensityCurve { bandwidth, points })
}
