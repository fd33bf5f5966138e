//! Matricules — the human-readable guest reference printed on every record.
//!
//! A matricule has the fixed shape `HT{yy}{mm}-{XXXX}` where `yy`/`mm` are the
//! UTC year and month of generation and `XXXX` is four uppercase base-36
//! characters. The 7-character prefix `HTyymm-` sorts by creation month.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Utc};
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const PREFIX: &str = "HT";
const SUFFIX_LEN: usize = 4;
const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Total length of a matricule, e.g. `HT2610-4QZ7`.
pub const MATRICULE_LEN: usize = PREFIX.len() + 4 + 1 + SUFFIX_LEN;

/// Largest multiple of 36 that fits in a `u32`; draws above it are rejected
/// so every suffix character is uniformly distributed.
const REJECTION_BOUND: u32 = u32::MAX - (u32::MAX % 36);

/// A validated guest reference.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Matricule(String);

impl Matricule {
  /// Synthesize a fresh matricule for the month of `now`.
  ///
  /// Uniqueness is not guaranteed by construction: callers persist it behind
  /// a uniqueness constraint and regenerate on conflict.
  pub fn generate(now: DateTime<Utc>, rng: &mut impl RngCore) -> Self {
    let mut s = String::with_capacity(MATRICULE_LEN);
    s.push_str(PREFIX);
    s.push_str(&format!("{:02}{:02}-", now.year().rem_euclid(100), now.month()));
    for _ in 0..SUFFIX_LEN {
      s.push(base36_char(rng));
    }
    Self(s)
  }

  /// Validate a matricule read from storage or supplied by a caller.
  pub fn parse(s: &str) -> Result<Self> {
    if is_well_formed(s) {
      Ok(Self(s.to_owned()))
    } else {
      Err(Error::InvalidMatricule(s.to_owned()))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// The sortable `HTyymm` part, without the trailing dash.
  pub fn month_prefix(&self) -> &str { &self.0[..PREFIX.len() + 4] }
}

fn base36_char(rng: &mut impl RngCore) -> char {
  loop {
    let draw = rng.next_u32();
    if draw < REJECTION_BOUND {
      return ALPHABET[(draw % 36) as usize] as char;
    }
  }
}

fn is_well_formed(s: &str) -> bool {
  let b = s.as_bytes();
  if b.len() != MATRICULE_LEN || !s.starts_with(PREFIX) {
    return false;
  }
  let digits = &b[2..6];
  if !digits.iter().all(u8::is_ascii_digit) {
    return false;
  }
  let month = (digits[2] - b'0') * 10 + (digits[3] - b'0');
  if !(1..=12).contains(&month) || b[6] != b'-' {
    return false;
  }
  b[7..]
    .iter()
    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
}

impl fmt::Display for Matricule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for Matricule {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for Matricule {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> {
    if is_well_formed(&s) {
      Ok(Self(s))
    } else {
      Err(Error::InvalidMatricule(s))
    }
  }
}

impl From<Matricule> for String {
  fn from(m: Matricule) -> Self { m.0 }
}
