//! Gaussian position belief for point landmarks.
//!
//! A landmark's true position is modeled as a 3D multivariate normal
//! distribution. Observations are associated with landmarks by Mahalanobis
//! distance, and Monte-Carlo localization draws position hypotheses from
//! the same distribution.

use nalgebra::{Cholesky, Matrix3, Vector3};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::{Error, Result};

/// A 3D Gaussian distribution over a landmark position.
///
/// Both the covariance inverse (for Mahalanobis distance) and the Cholesky
/// lower factor (for sampling) are computed once at construction, so queries
/// never hit a factorization failure at runtime.
///
/// # Distance Form
///
/// [`mahalanobis`](Self::mahalanobis) returns the square-rooted form
/// `sqrt((p-μ)ᵀ Σ⁻¹ (p-μ))`, i.e. "how many standard deviations away",
/// consistently across search and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct Gaussian3 {
    mean: Vector3<f64>,
    covariance: Matrix3<f64>,
    inverse: Matrix3<f64>,
    lower: Matrix3<f64>,
}

impl Gaussian3 {
    /// Create a Gaussian from a mean and a 3×3 covariance matrix.
    ///
    /// # Errors
    /// Returns [`Error::SingularCovariance`] when the covariance cannot be
    /// inverted or has no Cholesky factorization (not symmetric positive
    /// definite).
    pub fn new(mean: Vector3<f64>, covariance: Matrix3<f64>) -> Result<Self> {
        let inverse = covariance
            .try_inverse()
            .ok_or(Error::SingularCovariance)?;
        let lower = Cholesky::new(covariance)
            .ok_or(Error::SingularCovariance)?
            .l();
        Ok(Self {
            mean,
            covariance,
            inverse,
            lower,
        })
    }

    /// Mean of the distribution.
    #[inline]
    pub fn mean(&self) -> Vector3<f64> {
        self.mean
    }

    /// Covariance of the distribution.
    #[inline]
    pub fn covariance(&self) -> Matrix3<f64> {
        self.covariance
    }

    /// Mahalanobis distance from `point` to the distribution mean.
    ///
    /// Non-negative; smaller means more likely under the distribution.
    pub fn mahalanobis(&self, point: &Vector3<f64>) -> f64 {
        let diff = point - self.mean;
        diff.dot(&(self.inverse * diff)).sqrt()
    }

    /// Draw one sample from the distribution.
    ///
    /// Uses the affine transform `μ + L·z` with `z ~ N(0, I)` and `L` the
    /// Cholesky lower factor of the covariance.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        let z = Vector3::new(
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
        );
        self.mean + self.lower * z
    }
}
