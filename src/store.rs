//! SQLite-backed menu store.
//!
//! Read-only from this service's perspective: the `menu` table is owned and
//! populated elsewhere. The tokio-rusqlite handle serializes all calls onto
//! a dedicated connection thread and clones cheaply, so one store value is
//! shared across concurrent request handlers.

use rusqlite::params_from_iter;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::Connection;
use tracing::info;

use crate::error::Result;

const SELECT_COLUMNS: &str = "SELECT id, title, category, description, price FROM menu";

/// One row of the `menu` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: f64,
}

/// Shared handle to the menu database.
#[derive(Clone)]
pub struct MenuStore {
    conn: Connection,
}

impl MenuStore {
    /// Open the database and verify the `menu` table is readable.
    ///
    /// Callers treat a failure here as fatal at startup: the service must
    /// not begin serving without a reachable store.
    pub async fn connect(path: &str) -> Result<Self> {
        let conn = Connection::open(path).await?;
        let store = Self { conn };
        let items = store.count().await?;
        info!("menu store ready at {path} ({items} items)");
        Ok(store)
    }

    /// All menu rows in store order.
    pub async fn list_all(&self) -> Result<Vec<MenuItem>> {
        let items = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
                let rows = stmt.query_map([], item_from_row)?;
                Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
            })
            .await?;
        Ok(items)
    }

    /// Rows whose title, category, or description case-insensitively
    /// contains `filter`.
    ///
    /// The filter value is passed as a bound parameter with LIKE wildcards
    /// escaped, never spliced into the query text.
    pub async fn list_filtered(&self, filter: &str) -> Result<Vec<MenuItem>> {
        let pattern = format!("%{}%", escape_like(filter));
        let items = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    r"{SELECT_COLUMNS}
                      WHERE LOWER(title) LIKE LOWER(?1) ESCAPE '\'
                         OR LOWER(category) LIKE LOWER(?1) ESCAPE '\'
                         OR LOWER(description) LIKE LOWER(?1) ESCAPE '\'
                      ORDER BY id"
                ))?;
                let rows = stmt.query_map([pattern], item_from_row)?;
                Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
            })
            .await?;
        Ok(items)
    }

    /// Exactly the rows whose id appears in `ids`, in store order.
    ///
    /// Unknown ids simply yield no row.
    pub async fn list_by_ids(&self, ids: Vec<i64>) -> Result<Vec<MenuItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let items = self
            .conn
            .call(move |conn| {
                let placeholders = vec!["?"; ids.len()].join(", ");
                let mut stmt = conn.prepare(&format!(
                    "{SELECT_COLUMNS} WHERE id IN ({placeholders}) ORDER BY id"
                ))?;
                let rows = stmt.query_map(params_from_iter(ids.iter()), item_from_row)?;
                Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
            })
            .await?;
        Ok(items)
    }

    /// Number of rows in the `menu` table.
    pub async fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM menu", [], |row| row.get(0))?))
            .await?;
        Ok(count)
    }
}

fn item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MenuItem> {
    Ok(MenuItem {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        price: row.get(4)?,
    })
}

/// Escape LIKE wildcards so a filter value only ever matches literally.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('%', r"\%")
        .replace('_', r"\_")
}

#[cfg(test)]
impl MenuStore {
    /// Fresh in-memory store with the `menu` schema created.
    pub(crate) async fn open_in_memory() -> Self {
        let conn = Connection::open_in_memory().await.unwrap();
        conn.call(|conn| {
            conn.execute(
                "CREATE TABLE menu (
                     id INTEGER PRIMARY KEY,
                     title TEXT NOT NULL,
                     category TEXT NOT NULL,
                     description TEXT NOT NULL,
                     price REAL NOT NULL
                 )",
                [],
            )?;
            Ok(())
        })
        .await
        .unwrap();
        Self { conn }
    }

    pub(crate) async fn insert(&self, item: MenuItem) {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO menu (id, title, category, description, price)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    rusqlite::params![
                        item.id,
                        item.title,
                        item.category,
                        item.description,
                        item.price
                    ],
                )?;
                Ok(())
            })
            .await
            .unwrap();
    }
}
