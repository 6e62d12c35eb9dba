//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use sabha_core::{
  event::{ChildEvent, Event, NewEvent},
  reference::{Category, ReferenceType, Topic},
  session::{NewSession, Session, SessionSummary},
  store::CatalogStore,
  timestamp,
};

use crate::{
  encode::{
    encode_dt, new_id, RawChildEvent, RawEvent, RawReference, RawSessionSummary,
  },
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A catalog store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
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

  /// Shared body of `add_topic` / `add_category`; `table` is a fixed literal.
  async fn insert_reference(
    &self,
    table: &'static str,
    name:  String,
    kind:  ReferenceType,
  ) -> Result<RawReference> {
    let raw = RawReference {
      id:   new_id(),
      name,
      kind: kind.as_str().to_owned(),
    };
    let (id, name, kind_str) = (raw.id.clone(), raw.name.clone(), raw.kind.clone());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!("INSERT INTO {table} (id, name, type) VALUES (?1, ?2, ?3)"),
          rusqlite::params![id, name, kind_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(raw)
  }

  /// Shared body of `get_topic` / `get_category`.
  async fn get_reference(
    &self,
    table: &'static str,
    id:    &str,
  ) -> Result<Option<RawReference>> {
    let id = id.to_owned();
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT id, name, type FROM {table} WHERE id = ?1"),
              rusqlite::params![id],
              RawReference::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }

  /// Shared body of `list_topics` / `list_categories`.
  async fn list_references(&self, table: &'static str) -> Result<Vec<RawReference>> {
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT id, name, type FROM {table} ORDER BY name ASC"))?;
        let rows = stmt
          .query_map([], RawReference::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(raws)
  }
}

/// `true` if `sql` (a `SELECT 1 ... WHERE id = ?1` probe) matches a row.
fn row_exists(conn: &rusqlite::Connection, sql: &str, id: &str) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(sql, rusqlite::params![id], |_| Ok(()))
      .optional()?
      .is_some(),
  )
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn child_events(&self, parent_event_id: &str) -> Result<Vec<ChildEvent>> {
    let parent = parent_event_id.to_owned();

    let raws: Vec<RawChildEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, event_id, event_name, event_type, event_date_start
           FROM events
           WHERE parent_event_id = ?1
           ORDER BY event_date_start ASC, event_name ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![parent], |row| {
            Ok(RawChildEvent {
              id:               row.get(0)?,
              event_id:         row.get(1)?,
              event_name:       row.get(2)?,
              event_type:       row.get(3)?,
              event_date_start: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawChildEvent::into_child).collect()
  }

  async fn event_sessions(&self, event_id: &str) -> Result<Vec<SessionSummary>> {
    let event_id = event_id.to_owned();

    let raws: Vec<RawSessionSummary> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, session_name, session_date, sequence_in_event
           FROM sessions
           WHERE event_id = ?1
           ORDER BY sequence_in_event ASC, session_date ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![event_id], |row| {
            Ok(RawSessionSummary {
              id:                row.get(0)?,
              session_name:      row.get(1)?,
              session_date:      row.get(2)?,
              sequence_in_event: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSessionSummary::into_summary).collect()
  }

  async fn list_events(&self) -> Result<Vec<Event>> {
    let raws: Vec<RawEvent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM events ORDER BY event_name ASC",
          RawEvent::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawEvent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn list_topics(&self) -> Result<Vec<Topic>> {
    self
      .list_references("topics")
      .await?
      .into_iter()
      .map(RawReference::into_topic)
      .collect()
  }

  async fn list_categories(&self) -> Result<Vec<Category>> {
    self
      .list_references("categories")
      .await?
      .into_iter()
      .map(RawReference::into_category)
      .collect()
  }

  async fn get_event(&self, id: &str) -> Result<Option<Event>> {
    let id = id.to_owned();

    let raw: Option<RawEvent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM events WHERE id = ?1", RawEvent::COLUMNS),
              rusqlite::params![id],
              RawEvent::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEvent::into_event).transpose()
  }

  async fn get_topic(&self, id: &str) -> Result<Option<Topic>> {
    self
      .get_reference("topics", id)
      .await?
      .map(RawReference::into_topic)
      .transpose()
  }

  async fn get_category(&self, id: &str) -> Result<Option<Category>> {
    self
      .get_reference("categories", id)
      .await?
      .map(RawReference::into_category)
      .transpose()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn add_event(&self, input: NewEvent) -> Result<Event> {
    let event = Event {
      id:               new_id(),
      event_id:         input.event_id,
      event_name:       input.event_name,
      event_type:       input.event_type,
      event_date_start: timestamp::normalize(input.event_date_start)?,
      parent_event_id:  input.parent_event_id,
    };

    let id         = event.id.clone();
    let event_id   = event.event_id.clone();
    let name       = event.event_name.clone();
    let event_type = event.event_type.clone();
    let start_str  = encode_dt(event.event_date_start);
    let parent     = event.parent_event_id.clone();

    self
      .conn
      .call(move |conn| {
        if let Some(p) = &parent
          && !row_exists(conn, "SELECT 1 FROM events WHERE id = ?1", p)?
        {
          return Ok(Err(sabha_core::Error::ParentEventNotFound(p.clone())));
        }
        conn.execute(
          "INSERT INTO events (
             id, event_id, event_name, event_type, event_date_start, parent_event_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id, event_id, name, event_type, start_str, parent],
        )?;
        Ok(Ok(()))
      })
      .await??;

    Ok(event)
  }

  async fn add_topic(&self, name: String, kind: ReferenceType) -> Result<Topic> {
    self.insert_reference("topics", name, kind).await?.into_topic()
  }

  async fn add_category(&self, name: String, kind: ReferenceType) -> Result<Category> {
    self
      .insert_reference("categories", name, kind)
      .await?
      .into_category()
  }

  async fn add_session(&self, input: NewSession) -> Result<Session> {
    let session = Session {
      id:                new_id(),
      session_name:      input.session_name,
      session_date:      timestamp::normalize(input.session_date)?,
      sequence_in_event: input.sequence_in_event,
      event_id:          input.event_id,
      topic_ids:         input.topic_ids,
      category_ids:      input.category_ids,
    };

    let id           = session.id.clone();
    let name         = session.session_name.clone();
    let date_str     = encode_dt(session.session_date);
    let sequence     = session.sequence_in_event;
    let event_id     = session.event_id.clone();
    let topic_ids    = session.topic_ids.clone();
    let category_ids = session.category_ids.clone();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if !row_exists(&tx, "SELECT 1 FROM events WHERE id = ?1", &event_id)? {
          return Ok(Err(sabha_core::Error::EventNotFound(event_id)));
        }
        for topic_id in &topic_ids {
          if !row_exists(&tx, "SELECT 1 FROM topics WHERE id = ?1", topic_id)? {
            return Ok(Err(sabha_core::Error::TopicNotFound(topic_id.clone())));
          }
        }
        for category_id in &category_ids {
          if !row_exists(&tx, "SELECT 1 FROM categories WHERE id = ?1", category_id)? {
            return Ok(Err(sabha_core::Error::CategoryNotFound(category_id.clone())));
          }
        }

        tx.execute(
          "INSERT INTO sessions (id, session_name, session_date, sequence_in_event, event_id)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id, name, date_str, sequence, event_id],
        )?;
        for topic_id in &topic_ids {
          tx.execute(
            "INSERT OR IGNORE INTO session_topics (session_id, topic_id) VALUES (?1, ?2)",
            rusqlite::params![id, topic_id],
          )?;
        }
        for category_id in &category_ids {
          tx.execute(
            "INSERT OR IGNORE INTO session_categories (session_id, category_id)
             VALUES (?1, ?2)",
            rusqlite::params![id, category_id],
          )?;
        }

        tx.commit()?;
        Ok(Ok(()))
      })
      .await??;

    tracing::debug!(session = %session.id, event = %session.event_id, "session recorded");
    Ok(session)
  }
}
