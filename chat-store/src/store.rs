//! SQLite store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::models::{DocumentRecord, ExchangeRecord, SessionRecord, UserRecord};
use crate::{Result, StoreError};

/// Maximum derived-title length before truncation.
const TITLE_CHARS: usize = 50;

/// Hex SHA-256 digest of a password.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    format!("{digest:x}")
}

/// Chat persistence backed by SQLite.
pub struct ChatStore {
    conn: Mutex<Connection>,
}

impl ChatStore {
    /// Opens (or creates) the store at the path named by `CHAT_DB_PATH`,
    /// defaulting to `./bankchat.db`.
    pub fn open_default() -> Result<Self> {
        let path = std::env::var("CHAT_DB_PATH").unwrap_or_else(|_| "./bankchat.db".to_string());
        Self::open(Path::new(&path))
    }

    /// Opens (or creates) the store at `path` and initializes the schema.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        store.seed_default_users()?;
        info!(path = %path.display(), "chat store opened");
        Ok(store)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        store.init_schema()?;
        store.seed_default_users()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock();

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'user',
                created_at TEXT NOT NULL,
                last_login TEXT,
                is_active INTEGER NOT NULL DEFAULT 1
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS chat_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                conversation_id TEXT UNIQUE NOT NULL,
                user_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                last_activity TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS chat_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                conversation_id TEXT NOT NULL,
                user_message TEXT NOT NULL,
                ai_response TEXT NOT NULL,
                language TEXT NOT NULL DEFAULT 'en',
                sources TEXT,
                created_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                document_id TEXT UNIQUE NOT NULL,
                filename TEXT NOT NULL,
                classification TEXT NOT NULL DEFAULT 'public',
                uploaded_by INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'processing',
                created_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        Ok(())
    }

    /// Seeds the default accounts used by the proof-of-concept deployment.
    /// Existing rows are left untouched.
    fn seed_default_users(&self) -> Result<()> {
        let defaults = [
            ("admin", "admin123", "Administrator", "admin@bank.example", "admin"),
            ("user1", "user123", "Bank Officer", "officer@bank.example", "user"),
            ("analyst", "analyst123", "Data Analyst", "analyst@bank.example", "analyst"),
        ];

        let conn = self.lock();
        for (username, password, name, email, role) in defaults {
            conn.execute(
                "INSERT OR IGNORE INTO users (username, password_hash, name, email, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![username, hash_password(password), name, email, role, now()],
            )?;
        }
        Ok(())
    }

    /// Looks up an active user by username.
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let conn = self.lock();
        let user = conn
            .query_row(
                "SELECT id, username, password_hash, name, email, role, is_active
                 FROM users WHERE username = ?1 AND is_active = 1",
                params![username],
                |row| {
                    Ok(UserRecord {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password_hash: row.get(2)?,
                        name: row.get(3)?,
                        email: row.get(4)?,
                        role: row.get(5)?,
                        is_active: row.get::<_, i64>(6)? != 0,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Stamps the user's last successful login.
    pub fn update_last_login(&self, username: &str) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            "UPDATE users SET last_login = ?1 WHERE username = ?2",
            params![now(), username],
        )?;
        Ok(())
    }

    /// Registers a chat session unless it already exists.
    pub fn create_session(&self, conversation_id: &str, user_id: i64) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT OR IGNORE INTO chat_sessions (conversation_id, user_id, created_at, last_activity)
             VALUES (?1, ?2, ?3, ?3)",
            params![conversation_id, user_id, now()],
        )?;
        Ok(())
    }

    /// Saves one message exchange and bumps the session's last activity.
    pub fn save_exchange(
        &self,
        conversation_id: &str,
        user_message: &str,
        ai_response: &str,
        language: &str,
        sources: &serde_json::Value,
    ) -> Result<()> {
        let sources_json = serde_json::to_string(sources)?;
        let conn = self.lock();
        conn.execute(
            "INSERT INTO chat_messages (conversation_id, user_message, ai_response, language, sources, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![conversation_id, user_message, ai_response, language, sources_json, now()],
        )?;
        conn.execute(
            "UPDATE chat_sessions SET last_activity = ?1 WHERE conversation_id = ?2",
            params![now(), conversation_id],
        )?;
        Ok(())
    }

    /// Lists the user's sessions, most recent activity first, each with
    /// its exchanges in chronological order.
    pub fn list_sessions(&self, user_id: i64) -> Result<Vec<SessionRecord>> {
        let conn = self.lock();

        let mut stmt = conn.prepare(
            "SELECT conversation_id, created_at, last_activity
             FROM chat_sessions WHERE user_id = ?1 ORDER BY last_activity DESC",
        )?;
        let heads = stmt
            .query_map(params![user_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut sessions = Vec::with_capacity(heads.len());
        for (conversation_id, created_at, last_activity) in heads {
            let exchanges = Self::exchanges_for(&conn, &conversation_id)?;
            let title = exchanges
                .first()
                .map(|e| derive_title(&e.user_message))
                .unwrap_or_else(|| "New Chat".to_string());
            sessions.push(SessionRecord {
                conversation_id,
                title,
                created_at,
                last_activity,
                exchanges,
            });
        }
        Ok(sessions)
    }

    /// Deletes a session (and its messages) owned by `user_id`.
    /// Returns whether a session row was actually removed.
    ///
    /// The ownership check runs first; a caller who is not the owner
    /// must not touch the messages either.
    pub fn delete_session(&self, conversation_id: &str, user_id: i64) -> Result<bool> {
        let conn = self.lock();
        let deleted = conn.execute(
            "DELETE FROM chat_sessions WHERE conversation_id = ?1 AND user_id = ?2",
            params![conversation_id, user_id],
        )?;
        if deleted == 0 {
            return Ok(false);
        }
        conn.execute(
            "DELETE FROM chat_messages WHERE conversation_id = ?1",
            params![conversation_id],
        )?;
        Ok(true)
    }

    /// Records an uploaded document's metadata.
    pub fn save_document(
        &self,
        document_id: &str,
        filename: &str,
        classification: &str,
        uploaded_by: i64,
    ) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO documents (document_id, filename, classification, uploaded_by, status, created_at)
             VALUES (?1, ?2, ?3, ?4, 'processed', ?5)",
            params![document_id, filename, classification, uploaded_by, now()],
        )?;
        Ok(())
    }

    /// Documents uploaded by the user, newest first.
    pub fn documents_for_user(&self, user_id: i64) -> Result<Vec<DocumentRecord>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT document_id, filename, classification, status, created_at
             FROM documents WHERE uploaded_by = ?1 ORDER BY created_at DESC",
        )?;
        let docs = stmt
            .query_map(params![user_id], |row| {
                Ok(DocumentRecord {
                    document_id: row.get(0)?,
                    filename: row.get(1)?,
                    classification: row.get(2)?,
                    status: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(docs)
    }

    /* --------------------- Internals --------------------- */

    fn exchanges_for(conn: &Connection, conversation_id: &str) -> Result<Vec<ExchangeRecord>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_message, ai_response, language, sources, created_at
             FROM chat_messages WHERE conversation_id = ?1 ORDER BY created_at, id",
        )?;
        let rows = stmt
            .query_map(params![conversation_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut exchanges = Vec::with_capacity(rows.len());
        for (id, user_message, ai_response, language, sources, created_at) in rows {
            let sources = match sources {
                Some(json) => serde_json::from_str(&json).map_err(StoreError::SourcesDecode)?,
                None => serde_json::Value::Array(Vec::new()),
            };
            exchanges.push(ExchangeRecord {
                id,
                conversation_id: conversation_id.to_string(),
                user_message,
                ai_response,
                language,
                sources,
                created_at,
            });
        }
        Ok(exchanges)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned lock means a panic mid-statement; propagating the
        // panic is the only sane option for an embedded database handle.
        self.conn.lock().expect("chat store mutex poisoned")
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

fn derive_title(first_message: &str) -> String {
    if first_message.chars().count() > TITLE_CHARS {
        let head: String = first_message.chars().take(TITLE_CHARS).collect();
        format!("{head}...")
    } else {
        first_message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_users_are_seeded_and_verifiable() {
        let store = ChatStore::open_in_memory().unwrap();
        let user = store.get_user_by_username("admin").unwrap().unwrap();
        assert_eq!(user.role, "admin");
        assert_eq!(user.password_hash, hash_password("admin123"));
        assert!(store.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn exchanges_round_trip_with_sources() {
        let store = ChatStore::open_in_memory().unwrap();
        let user = store.get_user_by_username("user1").unwrap().unwrap();

        store.create_session("conv_1", user.id).unwrap();
        store
            .save_exchange(
                "conv_1",
                "what are the loan limits?",
                "Loans are capped.",
                "en",
                &json!([{"excerpt": "cap...", "relevance_score": 0.9, "attributes": {}}]),
            )
            .unwrap();

        let sessions = store.list_sessions(user.id).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].title, "what are the loan limits?");
        assert_eq!(sessions[0].exchanges.len(), 1);
        assert_eq!(
            sessions[0].exchanges[0].sources[0]["relevance_score"],
            json!(0.9)
        );
    }

    #[test]
    fn long_first_message_truncates_title() {
        let store = ChatStore::open_in_memory().unwrap();
        let user = store.get_user_by_username("user1").unwrap().unwrap();
        store.create_session("conv_t", user.id).unwrap();
        let long = "x".repeat(80);
        store
            .save_exchange("conv_t", &long, "a", "en", &json!([]))
            .unwrap();
        let sessions = store.list_sessions(user.id).unwrap();
        assert_eq!(sessions[0].title.chars().count(), 53);
        assert!(sessions[0].title.ends_with("..."));
    }

    #[test]
    fn delete_session_is_scoped_to_owner() {
        let store = ChatStore::open_in_memory().unwrap();
        let owner = store.get_user_by_username("user1").unwrap().unwrap();
        let other = store.get_user_by_username("analyst").unwrap().unwrap();

        store.create_session("conv_d", owner.id).unwrap();
        store
            .save_exchange("conv_d", "what is the loan cap?", "It depends.", "en", &json!([]))
            .unwrap();

        // A non-owner knowing the conversation id must not delete the
        // session nor its messages.
        assert!(!store.delete_session("conv_d", other.id).unwrap());
        let sessions = store.list_sessions(owner.id).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].exchanges.len(), 1);

        assert!(store.delete_session("conv_d", owner.id).unwrap());
        assert!(store.list_sessions(owner.id).unwrap().is_empty());
        assert!(!store.delete_session("conv_d", owner.id).unwrap());
    }

    #[test]
    fn documents_listing_is_per_user() {
        let store = ChatStore::open_in_memory().unwrap();
        let user = store.get_user_by_username("user1").unwrap().unwrap();
        store
            .save_document("doc_1", "circular.pdf", "public", user.id)
            .unwrap();
        let docs = store.documents_for_user(user.id).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].status, "processed");
        assert!(store.documents_for_user(user.id + 999).unwrap().is_empty());
    }
}
