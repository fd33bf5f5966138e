//! Stay counting and loyalty scoring.
//!
//! Every recognised return adds [`RETURN_VISIT_STEP`] to the score of the
//! visit it continues, capped at [`MAX_LOYALTY_SCORE`]. The constants are
//! fixed policy.

use hotel_core::guest::GuestRecord;
use uuid::Uuid;

pub const FIRST_VISIT_SCORE: u8 = 10;
pub const RETURN_VISIT_STEP: u8 = 10;
pub const MAX_LOYALTY_SCORE: u8 = 100;

/// The counters written onto a new guest record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loyalty {
  pub stay_count:     u32,
  /// Nights of this stay only; history is not carried over.
  pub night_count:    u32,
  pub loyalty_score:  u8,
  pub is_duplicate:   bool,
  pub previous_visit: Option<Uuid>,
}

/// Score an intake against the duplicate matcher's result.
pub fn score(matched: Option<&GuestRecord>, nights: u32) -> Loyalty {
  match matched {
    None => Loyalty {
      stay_count:     1,
      night_count:    nights,
      loyalty_score:  FIRST_VISIT_SCORE,
      is_duplicate:   false,
      previous_visit: None,
    },
    Some(prior) => Loyalty {
      stay_count:     prior.stay_count.saturating_add(1),
      night_count:    nights,
      loyalty_score:  prior
        .loyalty_score
        .saturating_add(RETURN_VISIT_STEP)
        .min(MAX_LOYALTY_SCORE),
      is_duplicate:   true,
      previous_visit: Some(prior.id),
    },
  }
}
