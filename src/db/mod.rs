mod schema;

use rusqlite::types::{Type, ValueRef};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;
use crate::models::*;
use crate::store::Store;

const TRANSACTION_COLUMNS: &str = "id, title, type, value, category_id, created_at";

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn query_transactions(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::types::ToSql],
    ) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, transaction_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

impl Store for Database {
    // ── Transactions ──────────────────────────────────────────

    fn transactions(&self) -> Result<Vec<Transaction>> {
        self.query_transactions(
            &format!("SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY id"),
            params![],
        )
    }

    fn transactions_by_type(&self, kind: TransactionType) -> Result<Vec<Transaction>> {
        self.query_transactions(
            &format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE type = ?1 ORDER BY id"),
            params![kind.as_str()],
        )
    }

    fn transaction_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        let result = self.conn.query_row(
            &format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1"),
            params![id],
            transaction_from_row,
        );
        match result {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn insert_transaction(&mut self, txn: &Transaction) -> Result<Transaction> {
        self.conn.execute(
            "INSERT INTO transactions (title, type, value, category_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                txn.title,
                txn.kind.as_str(),
                txn.value.to_string(),
                txn.category_id,
                txn.created_at,
            ],
        )?;
        Ok(Transaction {
            id: Some(self.conn.last_insert_rowid()),
            ..txn.clone()
        })
    }

    fn insert_transactions(&mut self, txns: &[Transaction]) -> Result<Vec<Transaction>> {
        let tx = self.conn.transaction()?;
        let mut stored = Vec::with_capacity(txns.len());
        for txn in txns {
            tx.execute(
                "INSERT INTO transactions (title, type, value, category_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    txn.title,
                    txn.kind.as_str(),
                    txn.value.to_string(),
                    txn.category_id,
                    txn.created_at,
                ],
            )?;
            stored.push(Transaction {
                id: Some(tx.last_insert_rowid()),
                ..txn.clone()
            });
        }
        tx.commit()?;
        Ok(stored)
    }

    fn delete_transaction(&mut self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    fn categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, created_at FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: Some(row.get(0)?),
                title: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn insert_categories(&mut self, categories: &[Category]) -> Result<Vec<Category>> {
        let tx = self.conn.transaction()?;
        let mut stored = Vec::with_capacity(categories.len());
        for cat in categories {
            tx.execute(
                "INSERT INTO categories (title, created_at) VALUES (?1, ?2)",
                params![cat.title, cat.created_at],
            )?;
            stored.push(Category {
                id: Some(tx.last_insert_rowid()),
                ..cat.clone()
            });
        }
        tx.commit()?;
        Ok(stored)
    }
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let kind_str: String = row.get(2)?;
    let kind = TransactionType::parse(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("unknown transaction type '{kind_str}'").into(),
        )
    })?;
    Ok(Transaction {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        kind,
        value: coerce_decimal(row.get_ref(3)?),
        category_id: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Read a stored value as a number. Anything that is not one counts as zero.
fn coerce_decimal(value: ValueRef<'_>) -> Decimal {
    match value {
        ValueRef::Integer(i) => Decimal::from(i),
        ValueRef::Real(f) => Decimal::try_from(f).unwrap_or_default(),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| Decimal::from_str(s.trim()).ok())
            .unwrap_or_default(),
        ValueRef::Null | ValueRef::Blob(_) => Decimal::ZERO,
    }
}
