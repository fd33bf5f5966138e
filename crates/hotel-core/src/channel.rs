//! Messaging-channel number validation.
//!
//! The intake engine never decides on its own whether a channel number is
//! usable; it asks a [`ChannelValidator`] and treats the answer as a
//! precondition.

/// Decides whether a messaging-channel number is acceptable.
pub trait ChannelValidator: Send + Sync {
  fn is_valid(&self, number: &str, country_code: &str) -> bool;
}

impl<F> ChannelValidator for F
where
  F: Fn(&str, &str) -> bool + Send + Sync,
{
  fn is_valid(&self, number: &str, country_code: &str) -> bool {
    self(number, country_code)
  }
}

/// A permissive structural check: the country code is `+` followed by one to
/// three digits, and the national number has between `min_digits` and
/// `max_digits` digits once common separators are removed.
///
/// A number written in international form (leading `+`) must start with the
/// given country code, which is stripped before counting.
#[derive(Debug, Clone, Copy)]
pub struct DigitCountValidator {
  pub min_digits: usize,
  pub max_digits: usize,
}

impl Default for DigitCountValidator {
  fn default() -> Self { Self { min_digits: 6, max_digits: 12 } }
}

impl ChannelValidator for DigitCountValidator {
  fn is_valid(&self, number: &str, country_code: &str) -> bool {
    let Some(code) = country_code.strip_prefix('+') else {
      return false;
    };
    if code.is_empty() || code.len() > 3 || !code.chars().all(|c| c.is_ascii_digit()) {
      return false;
    }

    let compact: String = number
      .chars()
      .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
      .collect();

    let national = match compact.strip_prefix('+') {
      Some(rest) => match rest.strip_prefix(code) {
        Some(national) => national,
        None => return false,
      },
      None => compact.as_str(),
    };

    !national.is_empty()
      && national.chars().all(|c| c.is_ascii_digit())
      && (self.min_digits..=self.max_digits).contains(&national.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_national_and_international_forms() {
    let v = DigitCountValidator::default();
    assert!(v.is_valid("900 111 222", "+243"));
    assert!(v.is_valid("+243900111222", "+243"));
    assert!(v.is_valid("(0)812-345.678", "+243"));
  }

  #[test]
  fn rejects_wrong_country_or_length() {
    let v = DigitCountValidator::default();
    assert!(!v.is_valid("+33612345678", "+243"));
    assert!(!v.is_valid("12345", "+243"));
    assert!(!v.is_valid("1234567890123", "+243"));
    assert!(!v.is_valid("900111222", "243"));
    assert!(!v.is_valid("900111222", "+"));
    assert!(!v.is_valid("", "+243"));
  }

  #[test]
  fn closures_are_validators() {
    let always = |_: &str, _: &str| true;
    assert!(always.is_valid("anything", "+1"));
  }
}
