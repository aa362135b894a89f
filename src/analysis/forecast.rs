use chrono::NaiveDate;
use ndarray::Array1;
use thiserror::Error;

use crate::data::PriceTable;

#[derive(Debug, Error)]
pub enum FitError {
    #[error("Need at least 2 observations to fit a trend, got {observations}")]
    InsufficientData { observations: usize },
    #[error("All observations share one arrival date; the slope is undefined")]
    DegenerateInput,
}

pub type Result<T> = std::result::Result<T, FitError>;

/// A fitted `days_since_epoch → modal_price` line, bundled with the epoch of
/// the table it was fit on. Carrying the epoch inside the model means a
/// prediction can never be evaluated against the wrong reference date.
/// Immutable once fitted; refit from scratch when the selection changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendModel {
    slope: f64,
    intercept: f64,
    epoch: NaiveDate,
}

impl TrendModel {
    /// Fit ordinary least squares over one table snapshot.
    ///
    /// Uses the closed-form simple-regression solution: slope is the ratio
    /// of x/y covariance to x variance, intercept follows from the means.
    /// Rows sharing a date are kept as separate observations at the same x;
    /// no scaling, regularization, or outlier removal is applied.
    pub fn fit(table: &PriceTable) -> Result<TrendModel> {
        let n = table.len();
        if n < 2 {
            return Err(FitError::InsufficientData { observations: n });
        }
        // n >= 2, so the epoch exists.
        let epoch = table
            .epoch()
            .ok_or(FitError::InsufficientData { observations: 0 })?;

        let x = Array1::from_iter(table.days_since_epoch().into_iter().map(|d| d as f64));
        let y = Array1::from_iter(table.records().iter().map(|r| r.modal_price));

        let mean_x = x.sum() / n as f64;
        let mean_y = y.sum() / n as f64;
        let centered_x = &x - mean_x;
        let centered_y = &y - mean_y;

        let sxx = centered_x.dot(&centered_x);
        if sxx == 0.0 {
            return Err(FitError::DegenerateInput);
        }
        let sxy = centered_x.dot(&centered_y);

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        Ok(TrendModel {
            slope,
            intercept,
            epoch,
        })
    }

    /// Evaluate the line at an arbitrary date, clamping negative results to
    /// zero (prices cannot be negative; the clamp is a post-fit policy, not
    /// part of the regression). Dates before the epoch back-extrapolate with
    /// a negative day count; extrapolation distance is unbounded and far
    /// predictions may be arbitrarily inaccurate.
    pub fn predict(&self, target_date: NaiveDate) -> f64 {
        let days = (target_date - self.epoch).num_days() as f64;
        (self.slope * days + self.intercept).max(0.0)
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// The minimum arrival date of the table this model was fit on.
    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }
}
