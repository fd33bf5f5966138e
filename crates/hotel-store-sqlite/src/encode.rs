//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, dates as `YYYY-MM-DD`.
//! Tags and document fields are stored as compact JSON. UUIDs are stored as
//! hyphenated lowercase strings. Enums use their snake_case names.

use std::{collections::BTreeMap, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use hotel_core::{
  guest::{GuestRecord, NewGuest},
  matricule::Matricule,
  notification::NotificationRecord,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(e.to_string()))
}

/// Parse a snake_case enum column.
pub fn decode_enum<T: FromStr>(kind: &'static str, s: &str) -> Result<T> {
  s.parse().map_err(|_| {
    Error::Core(hotel_core::Error::UnknownDiscriminant {
      kind,
      value: s.to_owned(),
    })
  })
}

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_tags(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

pub fn encode_fields(fields: &BTreeMap<String, String>) -> Result<String> {
  Ok(serde_json::to_string(fields)?)
}

pub fn decode_fields(s: &str) -> Result<BTreeMap<String, String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Guest rows ──────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` over `guests`, in [`RawGuest`]
/// order.
pub const GUEST_COLUMNS: &str = "
  g.guest_id, g.created_at, g.matricule,
  g.family_name, g.middle_name, g.given_name, g.full_name,
  g.birth_date, g.address, g.country_of_origin,
  g.phone_number, g.channel_number, g.channel_country_code,
  g.email, g.comment,
  g.document_kind, g.document_image_ref, g.document_fields,
  g.stay_count, g.night_count, g.loyalty_score, g.tags,
  g.status, g.attribution, g.is_duplicate, g.is_vip, g.previous_visit";

/// Raw column values for a `guests` row, read or about to be written.
pub struct RawGuest {
  pub guest_id:             String,
  pub created_at:           String,
  pub matricule:            String,
  pub family_name:          String,
  pub middle_name:          String,
  pub given_name:           String,
  pub full_name:            String,
  pub birth_date:           Option<String>,
  pub address:              Option<String>,
  pub country_of_origin:    Option<String>,
  pub phone_number:         Option<String>,
  pub channel_number:       String,
  pub channel_country_code: String,
  pub email:                Option<String>,
  pub comment:              Option<String>,
  pub document_kind:        Option<String>,
  pub document_image_ref:   Option<String>,
  pub document_fields:      Option<String>,
  pub stay_count:           u32,
  pub night_count:          u32,
  pub loyalty_score:        u8,
  pub tags:                 String,
  pub status:               String,
  pub attribution:          String,
  pub is_duplicate:         bool,
  pub is_vip:               bool,
  pub previous_visit:       Option<String>,
}

impl RawGuest {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      guest_id:             row.get(0)?,
      created_at:           row.get(1)?,
      matricule:            row.get(2)?,
      family_name:          row.get(3)?,
      middle_name:          row.get(4)?,
      given_name:           row.get(5)?,
      full_name:            row.get(6)?,
      birth_date:           row.get(7)?,
      address:              row.get(8)?,
      country_of_origin:    row.get(9)?,
      phone_number:         row.get(10)?,
      channel_number:       row.get(11)?,
      channel_country_code: row.get(12)?,
      email:                row.get(13)?,
      comment:              row.get(14)?,
      document_kind:        row.get(15)?,
      document_image_ref:   row.get(16)?,
      document_fields:      row.get(17)?,
      stay_count:           row.get(18)?,
      night_count:          row.get(19)?,
      loyalty_score:        row.get(20)?,
      tags:                 row.get(21)?,
      status:               row.get(22)?,
      attribution:          row.get(23)?,
      is_duplicate:         row.get(24)?,
      is_vip:               row.get(25)?,
      previous_visit:       row.get(26)?,
    })
  }

  pub fn encode(guest: &GuestRecord) -> Result<Self> {
    Ok(Self {
      guest_id:             encode_uuid(guest.id),
      created_at:           encode_dt(guest.created_at),
      matricule:            guest.matricule.to_string(),
      family_name:          guest.family_name.clone(),
      middle_name:          guest.middle_name.clone(),
      given_name:           guest.given_name.clone(),
      full_name:            guest.full_name.clone(),
      birth_date:           guest.birth_date.map(encode_date),
      address:              guest.address.clone(),
      country_of_origin:    guest.country_of_origin.clone(),
      phone_number:         guest.phone_number.clone(),
      channel_number:       guest.channel_number.clone(),
      channel_country_code: guest.channel_country_code.clone(),
      email:                guest.email.clone(),
      comment:              guest.comment.clone(),
      document_kind:        guest.document_kind.map(|k| k.as_ref().to_owned()),
      document_image_ref:   guest.document_image_ref.clone(),
      document_fields:      guest.document_fields.as_ref().map(encode_fields).transpose()?,
      stay_count:           guest.stay_count,
      night_count:          guest.night_count,
      loyalty_score:        guest.loyalty_score,
      tags:                 encode_tags(&guest.tags)?,
      status:               guest.status.as_ref().to_owned(),
      attribution:          guest.attribution.as_ref().to_owned(),
      is_duplicate:         guest.is_duplicate,
      is_vip:               guest.is_vip,
      previous_visit:       guest.previous_visit.map(encode_uuid),
    })
  }

  pub fn into_guest(self) -> Result<GuestRecord> {
    let new = NewGuest {
      matricule:            Matricule::parse(&self.matricule)?,
      family_name:          self.family_name,
      middle_name:          self.middle_name,
      given_name:           self.given_name,
      full_name:            self.full_name,
      birth_date:           self.birth_date.as_deref().map(decode_date).transpose()?,
      address:              self.address,
      country_of_origin:    self.country_of_origin,
      phone_number:         self.phone_number,
      channel_number:       self.channel_number,
      channel_country_code: self.channel_country_code,
      email:                self.email,
      comment:              self.comment,
      document_kind:        self
        .document_kind
        .as_deref()
        .map(|k| decode_enum("document kind", k))
        .transpose()?,
      document_image_ref:   self.document_image_ref,
      document_fields:      self.document_fields.as_deref().map(decode_fields).transpose()?,
      stay_count:           self.stay_count,
      night_count:          self.night_count,
      loyalty_score:        self.loyalty_score,
      tags:                 decode_tags(&self.tags)?,
      status:               decode_enum("guest status", &self.status)?,
      attribution:          decode_enum("attribution", &self.attribution)?,
      is_duplicate:         self.is_duplicate,
      is_vip:               self.is_vip,
      previous_visit:       self.previous_visit.as_deref().map(decode_uuid).transpose()?,
    };
    Ok(new.into_record(decode_uuid(&self.guest_id)?, decode_dt(&self.created_at)?))
  }
}

// ─── Notification rows ───────────────────────────────────────────────────────

pub const NOTIFICATION_COLUMNS: &str =
  "notification_id, title, body, guest_id, kind, created_at, is_read";

/// Raw column values for a `notifications` row.
pub struct RawNotification {
  pub notification_id: String,
  pub title:           String,
  pub body:            String,
  pub guest_id:        Option<String>,
  pub kind:            String,
  pub created_at:      String,
  pub is_read:         bool,
}

impl RawNotification {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      notification_id: row.get(0)?,
      title:           row.get(1)?,
      body:            row.get(2)?,
      guest_id:        row.get(3)?,
      kind:            row.get(4)?,
      created_at:      row.get(5)?,
      is_read:         row.get(6)?,
    })
  }

  pub fn into_notification(self) -> Result<NotificationRecord> {
    Ok(NotificationRecord {
      id:         decode_uuid(&self.notification_id)?,
      title:      self.title,
      body:       self.body,
      guest_id:   self.guest_id.as_deref().map(decode_uuid).transpose()?,
      kind:       decode_enum("notification kind", &self.kind)?,
      created_at: decode_dt(&self.created_at)?,
      read:       self.is_read,
    })
  }
}
