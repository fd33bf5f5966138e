//! Guest records — one row per intake.
//!
//! A guest record is written exactly once and never updated. A returning
//! guest gets a fresh record that points at the visit it continues through
//! [`GuestRecord::previous_visit`].

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matricule::Matricule;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Who submitted the intake.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::AsRefStr,
  strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Attribution {
  FrontDesk,
  #[default]
  Admin,
}

/// Administrative status of a guest record. Intake always writes `Active`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::AsRefStr,
  strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GuestStatus {
  #[default]
  Active,
  Inactive,
}

/// The kind of identity document attached to a record.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::AsRefStr,
  strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentKind {
  IdentityCard,
}

// ─── Document capture ────────────────────────────────────────────────────────

/// Output of the document-capture subsystem: an opaque reference to the
/// captured image plus whatever fields text extraction produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCapture {
  pub image_ref:        String,
  #[serde(default)]
  pub extracted_fields: BTreeMap<String, String>,
}

// ─── GuestRecord ─────────────────────────────────────────────────────────────

/// A persisted guest record. Every field is fixed at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestRecord {
  /// Store-assigned identifier.
  pub id:                   Uuid,
  /// Store-assigned insert timestamp.
  pub created_at:           DateTime<Utc>,
  pub matricule:            Matricule,

  pub family_name:          String,
  pub middle_name:          String,
  pub given_name:           String,
  pub full_name:            String,
  pub birth_date:           Option<NaiveDate>,
  pub address:              Option<String>,
  pub country_of_origin:    Option<String>,

  pub phone_number:         Option<String>,
  pub channel_number:       String,
  pub channel_country_code: String,
  pub email:                Option<String>,
  pub comment:              Option<String>,

  pub document_kind:        Option<DocumentKind>,
  pub document_image_ref:   Option<String>,
  pub document_fields:      Option<BTreeMap<String, String>>,

  pub stay_count:           u32,
  pub night_count:          u32,
  /// Always within `0..=100`.
  pub loyalty_score:        u8,
  pub tags:                 Vec<String>,
  pub status:               GuestStatus,
  pub attribution:          Attribution,
  pub is_duplicate:         bool,
  pub is_vip:               bool,
  /// The record this intake was scored from, if it matched a returning guest.
  pub previous_visit:       Option<Uuid>,
}

impl GuestRecord {
  pub fn has_document(&self) -> bool { self.document_image_ref.is_some() }
}

// ─── NewGuest ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::GuestStore::insert_guest`].
/// `id` and `created_at` are always assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGuest {
  pub matricule:            Matricule,
  pub family_name:          String,
  pub middle_name:          String,
  pub given_name:           String,
  pub full_name:            String,
  pub birth_date:           Option<NaiveDate>,
  pub address:              Option<String>,
  pub country_of_origin:    Option<String>,
  pub phone_number:         Option<String>,
  pub channel_number:       String,
  pub channel_country_code: String,
  pub email:                Option<String>,
  pub comment:              Option<String>,
  pub document_kind:        Option<DocumentKind>,
  pub document_image_ref:   Option<String>,
  pub document_fields:      Option<BTreeMap<String, String>>,
  pub stay_count:           u32,
  pub night_count:          u32,
  pub loyalty_score:        u8,
  pub tags:                 Vec<String>,
  pub status:               GuestStatus,
  pub attribution:          Attribution,
  pub is_duplicate:         bool,
  pub is_vip:               bool,
  pub previous_visit:       Option<Uuid>,
}

impl NewGuest {
  /// Attach the store-assigned identity, producing the persisted form.
  pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> GuestRecord {
    GuestRecord {
      id,
      created_at,
      matricule: self.matricule,
      family_name: self.family_name,
      middle_name: self.middle_name,
      given_name: self.given_name,
      full_name: self.full_name,
      birth_date: self.birth_date,
      address: self.address,
      country_of_origin: self.country_of_origin,
      phone_number: self.phone_number,
      channel_number: self.channel_number,
      channel_country_code: self.channel_country_code,
      email: self.email,
      comment: self.comment,
      document_kind: self.document_kind,
      document_image_ref: self.document_image_ref,
      document_fields: self.document_fields,
      stay_count: self.stay_count,
      night_count: self.night_count,
      loyalty_score: self.loyalty_score,
      tags: self.tags,
      status: self.status,
      attribution: self.attribution,
      is_duplicate: self.is_duplicate,
      is_vip: self.is_vip,
      previous_visit: self.previous_visit,
    }
  }
}

/// Join the non-empty name parts with single spaces.
pub fn full_name<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
  parts
    .into_iter()
    .map(str::trim)
    .filter(|p| !p.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn full_name_skips_blank_parts() {
    assert_eq!(full_name(["Kalume", "", "Jean"]), "Kalume Jean");
    assert_eq!(full_name(["  Kalume ", " Mbuyi", "Jean  "]), "Kalume Mbuyi Jean");
    assert_eq!(full_name(["", "  ", ""]), "");
  }

  #[test]
  fn attribution_wire_names() {
    assert_eq!(Attribution::FrontDesk.as_ref(), "front_desk");
    assert_eq!("admin".parse::<Attribution>().unwrap(), Attribution::Admin);
    assert_eq!(
      serde_json::to_string(&Attribution::FrontDesk).unwrap(),
      "\"front_desk\""
    );
  }
}
