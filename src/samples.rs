//! # Sample container
//!
//! [Samples] owns a batch of collected observations and lazily computes (and
//! caches) the common statistics the tests need. The data is validated at
//! construction: NaNs and infinities are rejected so that later computations
//! cannot silently propagate them.

use crate::errors::TestError;

/// Stores the sample statistics of the data if they have been computed.
#[derive(Debug, Clone, Copy, Default)]
struct SampleProperties {
    /// the average of the sample, or None if `data.len() == 0`
    mean: Option<f64>,
    /// the unbiased sample variance, or None if `data.len() <= 1`
    variance: Option<f64>,
}

/// A validated, owned sample of finite `f64` observations.
#[derive(Debug, Clone)]
pub struct Samples {
    data: Vec<f64>,
    properties: SampleProperties,
}

impl Samples {
    /// Creates a new instance of [Samples] with a copy of the given `data`.
    ///
    /// `data` must not contain NaNs or infinities (`+-inf`), otherwise
    /// [TestError::NanErr] is returned.
    ///
    /// If you want to just move the data without copying it,
    /// use [Samples::new_move].
    pub fn new(data: &[f64]) -> Result<Samples, TestError> {
        return Samples::new_move(Vec::from(data));
    }

    /// Creates a new instance of [Samples] taking ownership of `data`.
    ///
    /// `data` must not contain NaNs or infinities (`+-inf`), otherwise
    /// [TestError::NanErr] is returned.
    pub fn new_move(data: Vec<f64>) -> Result<Samples, TestError> {
        let invalid_contained: bool = data.iter().any(|f: &f64| !f.is_finite());
        if invalid_contained {
            return Err(TestError::NanErr);
        }

        return Ok(Samples {
            data,
            properties: SampleProperties::default(),
        });
    }

    /// Gives a reference to the contained data.
    #[must_use]
    pub fn peek_data(&self) -> &[f64] {
        return &self.data;
    }

    /// The number of observations.
    #[must_use]
    pub fn count(&self) -> usize {
        return self.data.len();
    }

    /// Computes the sample [mean](https://en.wikipedia.org/wiki/Mean) and
    /// returns it. `None` if the sample is empty.
    ///
    /// The value is cached: subsequent calls are free.
    pub fn mean(&mut self) -> Option<f64> {
        if let Some(m) = self.properties.mean {
            return Some(m);
        }
        if self.data.is_empty() {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let mean: f64 = self.data.iter().sum::<f64>() / (self.data.len() as f64);
        self.properties.mean = Some(mean);
        return Some(mean);
    }

    /// Computes the unbiased sample
    /// [variance](https://en.wikipedia.org/wiki/Variance) (`n - 1`
    /// denominator) and returns it. `None` if there are less than 2 samples.
    ///
    /// The value is cached: subsequent calls are free.
    pub fn variance(&mut self) -> Option<f64> {
        if let Some(v) = self.properties.variance {
            return Some(v);
        }
        if self.data.len() <= 1 {
            return None;
        }

        let mean: f64 = self.mean()?;
        let sum_sq: f64 = self.data.iter().map(|&x| (x - mean) * (x - mean)).sum();
        #[allow(clippy::cast_precision_loss)]
        let variance: f64 = sum_sq / ((self.data.len() - 1) as f64);
        self.properties.variance = Some(variance);
        return Some(variance);
    }
}
