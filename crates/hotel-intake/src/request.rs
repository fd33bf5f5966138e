//! The caller-facing intake request.

use chrono::NaiveDate;
use hotel_core::guest::{Attribution, DocumentCapture, full_name};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Freshly captured guest data, as submitted from the front desk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestIntakeRequest {
  pub family_name:          String,
  #[serde(default)]
  pub middle_name:          String,
  #[serde(default)]
  pub given_name:           String,
  #[serde(default)]
  pub birth_date:           Option<NaiveDate>,
  #[serde(default)]
  pub address:              Option<String>,
  #[serde(default)]
  pub country_of_origin:    Option<String>,
  #[serde(default)]
  pub phone_number:         Option<String>,
  pub channel_number:       String,
  pub channel_country_code: String,
  #[serde(default)]
  pub email:                Option<String>,
  #[serde(default)]
  pub comment:              Option<String>,
  /// Requested stay in nights. Missing means one night; fractions are
  /// rounded down, but never below one.
  #[serde(default)]
  pub nights:               Option<f64>,
  #[serde(default)]
  pub document:             Option<DocumentCapture>,
  #[serde(default)]
  pub submitted_by:         Attribution,
}

impl GuestIntakeRequest {
  /// Family, middle and given names joined by single spaces.
  pub fn full_name(&self) -> String {
    full_name([
      self.family_name.as_str(),
      self.middle_name.as_str(),
      self.given_name.as_str(),
    ])
  }

  pub fn stay_nights(&self) -> Result<u32, ValidationError> {
    match self.nights {
      None => Ok(1),
      Some(n) if !n.is_finite() || n <= 0.0 => {
        Err(ValidationError::InvalidStayLength(n))
      }
      Some(n) => Ok((n.floor().min(f64::from(u32::MAX)) as u32).max(1)),
    }
  }
}

/// Trim an optional free-text field; blank becomes `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
  value
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_owned)
}
