//! SQL schema for the Sabha SQLite store.
//!
//! Executed once when a connection is opened.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Self-referential: parent_event_id forms a forest of events.
CREATE TABLE IF NOT EXISTS events (
    id               TEXT PRIMARY KEY,
    event_id         TEXT NOT NULL,
    event_name       TEXT NOT NULL,
    event_type       TEXT NOT NULL,
    event_date_start TEXT NOT NULL,   -- RFC 3339 UTC, millisecond precision
    parent_event_id  TEXT REFERENCES events(id)
);

CREATE TABLE IF NOT EXISTS sessions (
    id                TEXT PRIMARY KEY,
    session_name      TEXT NOT NULL,
    session_date      TEXT NOT NULL,  -- RFC 3339 UTC, millisecond precision
    sequence_in_event INTEGER NOT NULL,
    event_id          TEXT NOT NULL REFERENCES events(id)
);

CREATE TABLE IF NOT EXISTS topics (
    id   TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT NOT NULL CHECK (type IN (
      'Deities', 'Practices', 'Core Teachings', 'Texts', 'Historical Figures'
    ))
);

CREATE TABLE IF NOT EXISTS categories (
    id   TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT NOT NULL CHECK (type IN (
      'Deities', 'Practices', 'Core Teachings', 'Texts', 'Historical Figures'
    ))
);

CREATE TABLE IF NOT EXISTS session_topics (
    session_id TEXT NOT NULL REFERENCES sessions(id),
    topic_id   TEXT NOT NULL REFERENCES topics(id),
    PRIMARY KEY (session_id, topic_id)
);

CREATE TABLE IF NOT EXISTS session_categories (
    session_id  TEXT NOT NULL REFERENCES sessions(id),
    category_id TEXT NOT NULL REFERENCES categories(id),
    PRIMARY KEY (session_id, category_id)
);

CREATE INDEX IF NOT EXISTS events_parent_idx  ON events(parent_event_id);
CREATE INDEX IF NOT EXISTS sessions_event_idx ON sessions(event_id);
";
