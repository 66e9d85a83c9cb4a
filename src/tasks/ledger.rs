use anyhow::{Context, Result, bail};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use super::TaskClient;
use super::types::{CompletedTask, LedgerStats, TaskReceipt, TaskRecord};
use crate::lists::ItemId;

const TASK_COLUMNS: &str = "t.id, t.title, t.items, t.digest, t.created_at";

/// SQLite-backed record of created tasks and submitted answers
pub struct TaskLedger {
    conn: Connection,
}

impl TaskLedger {
    /// Create a new in-memory ledger
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .context("Failed to create in-memory database")?;
        let ledger = Self { conn };
        ledger.init_schema()?;
        Ok(ledger)
    }

    /// Open (or create) a ledger file
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .context(format!("Failed to open ledger at {}", path))?;
        let ledger = Self { conn };
        ledger.init_schema()?;
        Ok(ledger)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                items TEXT NOT NULL,
                digest TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS results (
                task_id TEXT PRIMARY KEY,
                worker TEXT NOT NULL,
                answer TEXT NOT NULL,
                completed_at TEXT NOT NULL,
                FOREIGN KEY (task_id) REFERENCES tasks(id)
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_digest ON tasks(digest);
            "#,
            )
            .context("Failed to initialize ledger schema")?;
        Ok(())
    }

    /// Look up a task by id
    pub fn get_task(&self, task_id: &str) -> Result<Option<TaskRecord>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks t WHERE t.id = ?1");
        let raw = self
            .conn
            .query_row(&sql, params![task_id], raw_task)
            .optional()
            .context(format!("Failed to query task: {}", task_id))?;

        raw.map(RawTask::into_record).transpose()
    }

    /// Record a worker's answer for a task
    ///
    /// Fails if the task does not exist or already has an answer.
    pub fn complete_task(&self, task_id: &str, worker: &str, answer: &str) -> Result<()> {
        if self.get_task(task_id)?.is_none() {
            bail!("Unknown task: {}", task_id);
        }

        let already: bool = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM results WHERE task_id = ?1)",
                params![task_id],
                |row| row.get(0),
            )
            .context("Failed to check task status")?;
        if already {
            bail!("Task already completed: {}", task_id);
        }

        self.conn
            .execute(
                "INSERT INTO results (task_id, worker, answer, completed_at) VALUES (?1, ?2, ?3, ?4)",
                params![task_id, worker, answer, Utc::now().to_rfc3339()],
            )
            .context(format!("Failed to record result for task: {}", task_id))?;

        info!(task_id, worker, "task completed");
        Ok(())
    }

    /// Tasks with no answer yet, oldest first
    pub fn pending_tasks(&self) -> Result<Vec<TaskRecord>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks t
             WHERE NOT EXISTS (SELECT 1 FROM results r WHERE r.task_id = t.id)
             ORDER BY t.created_at, t.rowid"
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .context("Failed to prepare statement")?;

        let raws = stmt
            .query_map([], raw_task)
            .context("Failed to query pending tasks")?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to collect pending tasks")?;

        raws.into_iter().map(RawTask::into_record).collect()
    }

    /// Get statistics
    pub fn get_stats(&self) -> Result<LedgerStats> {
        let task_count: u32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))
            .context("Failed to count tasks")?;

        let completed_count: u32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM results", [], |row| row.get(0))
            .context("Failed to count results")?;

        Ok(LedgerStats {
            task_count,
            completed_count,
        })
    }
}

impl TaskClient for TaskLedger {
    fn create_task(&mut self, title: &str, items: &[ItemId]) -> Result<TaskReceipt> {
        if items.is_empty() {
            bail!("Refusing to create task '{}' with no items", title);
        }

        let items_json =
            serde_json::to_string(items).context("Failed to serialize task items")?;
        let digest = task_digest(title, &items_json);
        let task_id = Uuid::new_v4().to_string();

        self.conn
            .execute(
                "INSERT INTO tasks (id, title, items, digest, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![task_id, title, items_json, digest, Utc::now().to_rfc3339()],
            )
            .context(format!("Failed to insert task: {}", title))?;

        info!(%task_id, items = items.len(), "task created");

        Ok(TaskReceipt {
            task_id,
            digest,
            item_count: items.len(),
        })
    }

    fn read_completed_tasks(&self) -> Result<Vec<CompletedTask>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS}, r.worker, r.answer, r.completed_at
             FROM tasks t JOIN results r ON r.task_id = t.id
             ORDER BY r.completed_at, r.rowid"
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .context("Failed to prepare statement")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    raw_task(row)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                ))
            })
            .context("Failed to query completed tasks")?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to collect completed tasks")?;

        rows.into_iter()
            .map(|(raw, worker, answer, completed_at)| {
                Ok(CompletedTask {
                    task: raw.into_record()?,
                    worker,
                    answer,
                    completed_at,
                })
            })
            .collect()
    }
}

/// Task row before the items column is decoded
struct RawTask {
    id: String,
    title: String,
    items: String,
    digest: String,
    created_at: String,
}

impl RawTask {
    fn into_record(self) -> Result<TaskRecord> {
        let items: Vec<ItemId> = serde_json::from_str(&self.items)
            .context(format!("Corrupt item list for task: {}", self.id))?;
        Ok(TaskRecord {
            id: self.id,
            title: self.title,
            items,
            digest: self.digest,
            created_at: self.created_at,
        })
    }
}

fn raw_task(row: &Row<'_>) -> rusqlite::Result<RawTask> {
    Ok(RawTask {
        id: row.get(0)?,
        title: row.get(1)?,
        items: row.get(2)?,
        digest: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn task_digest(title: &str, items_json: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update([0u8]);
    hasher.update(items_json.as_bytes());
    hex::encode(hasher.finalize())
}
