//! [`SqliteStore`] — the SQLite implementation of [`GuestStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use hotel_core::{
  guest::{GuestRecord, NewGuest},
  notification::{NewNotification, NotificationRecord},
  store::{GuestQuery, GuestStore},
};

use crate::{
  Result,
  encode::{
    GUEST_COLUMNS, NOTIFICATION_COLUMNS, RawGuest, RawNotification, encode_dt,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A guest registry backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    tracing::debug!(path = %path.display(), "opening guest store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn query_guests(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Vec<GuestRecord>> {
    let raws: Vec<RawGuest> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawGuest::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGuest::into_guest).collect()
  }
}

fn sql_limit(limit: Option<usize>) -> i64 {
  limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX))
}

// ─── GuestStore impl ─────────────────────────────────────────────────────────

impl GuestStore for SqliteStore {
  type Error = crate::Error;

  // ── Guests ────────────────────────────────────────────────────────────────

  async fn insert_guest(&self, guest: NewGuest) -> Result<GuestRecord> {
    let record = guest.into_record(Uuid::new_v4(), Utc::now());
    let raw    = RawGuest::encode(&record)?;
    let folded = record.full_name.to_lowercase();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO guests (
             guest_id, created_at, matricule,
             family_name, middle_name, given_name, full_name, full_name_folded,
             birth_date, address, country_of_origin,
             phone_number, channel_number, channel_country_code,
             email, comment,
             document_kind, document_image_ref, document_fields,
             stay_count, night_count, loyalty_score, tags,
             status, attribution, is_duplicate, is_vip, previous_visit
           ) VALUES (
             ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
             ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28
           )",
          rusqlite::params![
            raw.guest_id,
            raw.created_at,
            raw.matricule,
            raw.family_name,
            raw.middle_name,
            raw.given_name,
            raw.full_name,
            folded,
            raw.birth_date,
            raw.address,
            raw.country_of_origin,
            raw.phone_number,
            raw.channel_number,
            raw.channel_country_code,
            raw.email,
            raw.comment,
            raw.document_kind,
            raw.document_image_ref,
            raw.document_fields,
            raw.stay_count,
            raw.night_count,
            raw.loyalty_score,
            raw.tags,
            raw.status,
            raw.attribution,
            raw.is_duplicate,
            raw.is_vip,
            raw.previous_visit,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn find_guests(&self, query: &GuestQuery) -> Result<Vec<GuestRecord>> {
    use rusqlite::types::Value;

    let channel = query.channel_number.clone().map(Value::Text).unwrap_or(Value::Null);
    let name = query
      .name_contains
      .as_deref()
      .map(|n| Value::Text(n.to_lowercase()))
      .unwrap_or(Value::Null);

    // Both alternatives unset means "everything"; a NULL operand never
    // matches on its own.
    let sql = format!(
      "SELECT {GUEST_COLUMNS}
       FROM guests g
       WHERE ((?1 IS NULL AND ?2 IS NULL)
              OR g.channel_number = ?1
              OR instr(g.full_name_folded, ?2) > 0)
         AND (?3 = 0 OR NOT EXISTS (
               SELECT 1 FROM guests later WHERE later.previous_visit = g.guest_id))
       ORDER BY coalesce(g.channel_number = ?1, 0) DESC, g.rowid DESC
       LIMIT ?4"
    );

    self
      .query_guests(sql, vec![
        channel,
        name,
        Value::Integer(i64::from(query.heads_only)),
        Value::Integer(sql_limit(query.limit)),
      ])
      .await
  }

  async fn get_guest(&self, id: Uuid) -> Result<Option<GuestRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawGuest> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {GUEST_COLUMNS} FROM guests g WHERE g.guest_id = ?1"),
              rusqlite::params![id_str],
              RawGuest::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawGuest::into_guest).transpose()
  }

  async fn list_guests(&self, limit: usize, offset: usize) -> Result<Vec<GuestRecord>> {
    use rusqlite::types::Value;

    self
      .query_guests(
        format!("SELECT {GUEST_COLUMNS} FROM guests g ORDER BY g.rowid DESC LIMIT ?1 OFFSET ?2"),
        vec![
          Value::Integer(sql_limit(Some(limit))),
          Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)),
        ],
      )
      .await
  }

  async fn count_guests(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT count(*) FROM guests", [], |r| r.get(0))?))
      .await?;
    Ok(n.max(0) as u64)
  }

  // ── Notifications ─────────────────────────────────────────────────────────

  async fn insert_notification(
    &self,
    notification: NewNotification,
  ) -> Result<NotificationRecord> {
    let record = notification.into_record(Uuid::new_v4(), Utc::now());

    let id_str       = encode_uuid(record.id);
    let title        = record.title.clone();
    let body         = record.body.clone();
    let guest_id_str = record.guest_id.map(encode_uuid);
    let kind_str     = record.kind.as_ref().to_owned();
    let at_str       = encode_dt(record.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO notifications (notification_id, title, body, guest_id, kind, created_at, is_read)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
          rusqlite::params![id_str, title, body, guest_id_str, kind_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn list_notifications(
    &self,
    unread_only: bool,
    limit: usize,
  ) -> Result<Vec<NotificationRecord>> {
    let limit_val = sql_limit(Some(limit));

    let raws: Vec<RawNotification> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {NOTIFICATION_COLUMNS}
           FROM notifications
           WHERE ?1 = 0 OR is_read = 0
           ORDER BY rowid DESC
           LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![unread_only, limit_val], RawNotification::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNotification::into_notification).collect()
  }

  async fn count_unread_notifications(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT count(*) FROM notifications WHERE is_read = 0",
          [],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(n.max(0) as u64)
  }

  async fn mark_notification_read(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE notifications SET is_read = 1 WHERE notification_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}
