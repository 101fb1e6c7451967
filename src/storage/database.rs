//! SQLite Task Store
//!
//! Embedded database for task persistence using rusqlite with r2d2
//! connection pooling. Every query is scoped by the owning user id, so the
//! pipeline can never read or mutate another user's rows. Also holds the
//! chat-identity link table used by the bot channels.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Row};

use taskmind_core::{
    Priority, Status, StoreError, StoreResult, Task, TaskDraft, TaskPatch, TaskStore,
};

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database service backing the `TaskStore` trait
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create a new database instance at the given path
    pub fn new(path: &std::path::Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::backend(format!("Failed to create data dir: {}", e)))?;
        }

        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| StoreError::backend(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Create an in-memory database for testing.
    pub fn new_in_memory() -> StoreResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| StoreError::backend(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    fn conn(&self) -> StoreResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| StoreError::backend(format!("Failed to get connection: {}", e)))
    }

    /// Initialize the database schema
    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                summary TEXT NOT NULL,
                description TEXT,
                due_date TEXT NOT NULL,
                estimated_duration TEXT NOT NULL DEFAULT '',
                priority TEXT NOT NULL DEFAULT 'Medium',
                status TEXT NOT NULL DEFAULT 'To Do',
                category TEXT NOT NULL DEFAULT 'General',
                external_links TEXT NOT NULL DEFAULT '[]',
                folder_id TEXT,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .map_err(sql_err)?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_tasks_owner_created
                ON tasks (owner_id, created_at DESC)",
            [],
        )
        .map_err(sql_err)?;

        // Chat-identity links for the bot channels
        conn.execute(
            "CREATE TABLE IF NOT EXISTS channel_links (
                channel TEXT NOT NULL,
                chat_id TEXT NOT NULL,
                owner_id TEXT NOT NULL,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (channel, chat_id)
            )",
            [],
        )
        .map_err(sql_err)?;

        Ok(())
    }

    /// Map an external chat identity to an owning user id.
    pub fn link_chat(&self, channel: &str, chat_id: &str, owner: &str) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO channel_links (channel, chat_id, owner_id) VALUES (?1, ?2, ?3)
             ON CONFLICT (channel, chat_id) DO UPDATE SET owner_id = excluded.owner_id",
            params![channel, chat_id, owner],
        )
        .map_err(sql_err)?;
        Ok(())
    }

    /// Resolve a chat identity to its linked owner, if any.
    pub fn owner_for_chat(&self, channel: &str, chat_id: &str) -> StoreResult<Option<String>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT owner_id FROM channel_links WHERE channel = ?1 AND chat_id = ?2",
            params![channel, chat_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(sql_err)
    }

    fn fetch_task(&self, owner: &str, id: &str) -> StoreResult<Task> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, summary, description, due_date, estimated_duration, priority,
                    status, category, external_links, folder_id, created_at
             FROM tasks WHERE owner_id = ?1 AND id = ?2",
            params![owner, id],
            row_to_task,
        )
        .optional()
        .map_err(sql_err)?
        .ok_or_else(|| StoreError::not_found(format!("task {}", id)))
    }
}

/// Map a tasks row into the domain type
fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let priority: String = row.get(5)?;
    let status: String = row.get(6)?;
    let links: String = row.get(8)?;
    Ok(Task {
        id: row.get(0)?,
        summary: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        estimated_duration: row.get(4)?,
        priority: Priority::from_label(&priority).unwrap_or_default(),
        status: Status::from_label(&status).unwrap_or_default(),
        category: row.get(7)?,
        external_links: serde_json::from_str(&links).unwrap_or_default(),
        folder_id: row.get(9)?,
        created_at: row.get(10)?,
    })
}

fn sql_err(err: rusqlite::Error) -> StoreError {
    StoreError::backend(err.to_string())
}

#[async_trait::async_trait]
impl TaskStore for Database {
    async fn insert(&self, owner: &str, draft: TaskDraft) -> StoreResult<Task> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        let links = serde_json::to_string(&draft.external_links)
            .map_err(|e| StoreError::backend(e.to_string()))?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO tasks (id, owner_id, summary, description, due_date,
                                estimated_duration, priority, status, category,
                                external_links, folder_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                id,
                owner,
                draft.summary,
                draft.description,
                draft.due_date,
                draft.estimated_duration,
                draft.priority.as_str(),
                draft.status.as_str(),
                draft.category,
                links,
                draft.folder_id,
                created_at,
            ],
        )
        .map_err(sql_err)?;
        drop(conn);

        self.fetch_task(owner, &id)
    }

    async fn update(&self, owner: &str, id: &str, patch: TaskPatch) -> StoreResult<Task> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE tasks SET
                    summary = COALESCE(?3, summary),
                    description = COALESCE(?4, description),
                    due_date = COALESCE(?5, due_date),
                    estimated_duration = COALESCE(?6, estimated_duration),
                    priority = COALESCE(?7, priority),
                    status = COALESCE(?8, status),
                    category = COALESCE(?9, category),
                    folder_id = COALESCE(?10, folder_id)
                 WHERE owner_id = ?1 AND id = ?2",
                params![
                    owner,
                    id,
                    patch.summary,
                    patch.description,
                    patch.due_date,
                    patch.estimated_duration,
                    patch.priority.map(|p| p.as_str().to_string()),
                    patch.status.map(|s| s.as_str().to_string()),
                    patch.category,
                    patch.folder_id,
                ],
            )
            .map_err(sql_err)?;
        drop(conn);

        if changed == 0 {
            return Err(StoreError::not_found(format!("task {}", id)));
        }
        self.fetch_task(owner, id)
    }

    async fn delete(&self, owner: &str, id: &str) -> StoreResult<()> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "DELETE FROM tasks WHERE owner_id = ?1 AND id = ?2",
                params![owner, id],
            )
            .map_err(sql_err)?;
        if changed == 0 {
            return Err(StoreError::not_found(format!("task {}", id)));
        }
        Ok(())
    }

    async fn recent(&self, owner: &str, limit: usize) -> StoreResult<Vec<Task>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, summary, description, due_date, estimated_duration, priority,
                        status, category, external_links, folder_id, created_at
                 FROM tasks WHERE owner_id = ?1
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?2",
            )
            .map_err(sql_err)?;
        let rows = stmt
            .query_map(params![owner, limit as i64], row_to_task)
            .map_err(sql_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sql_err)
    }

    async fn search(&self, owner: &str, text: &str) -> StoreResult<Vec<Task>> {
        let pattern = format!("%{}%", text.trim());
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, summary, description, due_date, estimated_duration, priority,
                        status, category, external_links, folder_id, created_at
                 FROM tasks
                 WHERE owner_id = ?1
                   AND (summary LIKE ?2 OR description LIKE ?2 OR category LIKE ?2)
                 ORDER BY created_at DESC, rowid DESC",
            )
            .map_err(sql_err)?;
        let rows = stmt
            .query_map(params![owner, pattern], row_to_task)
            .map_err(sql_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sql_err)
    }
}
