//! SQL schema for the hotel SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Guest records are insert-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS guests (
    guest_id             TEXT PRIMARY KEY,
    created_at           TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    matricule            TEXT NOT NULL UNIQUE,
    family_name          TEXT NOT NULL,
    middle_name          TEXT NOT NULL,
    given_name           TEXT NOT NULL,
    full_name            TEXT NOT NULL,
    full_name_folded     TEXT NOT NULL,   -- Unicode-lowercased full_name
    birth_date           TEXT,            -- YYYY-MM-DD
    address              TEXT,
    country_of_origin    TEXT,
    phone_number         TEXT,
    channel_number       TEXT NOT NULL,
    channel_country_code TEXT NOT NULL,
    email                TEXT,
    comment              TEXT,
    document_kind        TEXT,
    document_image_ref   TEXT,
    document_fields      TEXT,            -- JSON object or NULL
    stay_count           INTEGER NOT NULL CHECK (stay_count >= 1),
    night_count          INTEGER NOT NULL CHECK (night_count >= 1),
    loyalty_score        INTEGER NOT NULL CHECK (loyalty_score BETWEEN 0 AND 100),
    tags                 TEXT NOT NULL DEFAULT '[]',
    status               TEXT NOT NULL,   -- 'active' | 'inactive'
    attribution          TEXT NOT NULL,   -- 'front_desk' | 'admin'
    is_duplicate         INTEGER NOT NULL,
    is_vip               INTEGER NOT NULL DEFAULT 0,
    -- A visit is continued by at most one later visit.
    previous_visit       TEXT UNIQUE REFERENCES guests(guest_id)
);

CREATE TABLE IF NOT EXISTS notifications (
    notification_id TEXT PRIMARY KEY,
    title           TEXT NOT NULL,
    body            TEXT NOT NULL,
    guest_id        TEXT REFERENCES guests(guest_id),
    kind            TEXT NOT NULL,    -- 'new_guest' | 'duplicate_detected' | 'document_captured'
    created_at      TEXT NOT NULL,
    is_read         INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS guests_channel_idx       ON guests(channel_number);
CREATE INDEX IF NOT EXISTS notifications_unread_idx ON notifications(is_read);

PRAGMA user_version = 1;
";
