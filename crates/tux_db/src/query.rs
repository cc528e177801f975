//! Typed query capability shared by every controller.
//!
//! # Responsibility
//! - Map one table to one typed row (`Table`).
//! - Offer `find_many`, `find_first`, `create`, `update`, `upsert` and
//!   `delete` as single statements over that row (`TableQuery`).
//!
//! # Invariants
//! - Column names are compile-time constants; only values are bound.
//! - Every call is exactly one statement, served from the connection's
//!   prepared-statement cache.
//! - Misses are `None`/empty, never errors. Storage failures propagate as-is.
//! - `update` and `delete` refuse to run without a filter.

use crate::db::DbError;
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::marker::PhantomData;
use std::time::Instant;
use thiserror::Error;

pub type QueryResult<T> = Result<T, QueryError>;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted data in `{table}`: {message}")]
    InvalidData {
        table: &'static str,
        message: String,
    },
    #[error("refusing to {op} every row of `{table}` without a filter")]
    UnscopedWrite {
        table: &'static str,
        op: &'static str,
    },
    #[error("write to `{0}` has no assignments")]
    EmptyChangeSet(&'static str),
}

impl From<rusqlite::Error> for QueryError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl QueryError {
    /// Primary SQLite result code, when the engine produced the failure.
    pub fn sqlite_error_code(&self) -> Option<rusqlite::ErrorCode> {
        match self {
            Self::Db(DbError::Sqlite(err)) => err.sqlite_error_code(),
            _ => None,
        }
    }
}

/// A table whose rows map onto `Self`.
pub trait Table: Sized {
    const NAME: &'static str;
    /// Columns selected and returned by every statement, in row order.
    const COLUMNS: &'static [&'static str];
    const ORDER_BY: &'static str;

    fn from_row(row: &Row<'_>) -> QueryResult<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Eq,
    Lte,
}

impl Comparison {
    fn operator(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lte => "<=",
        }
    }
}

/// Conjunction of column comparisons. An empty filter matches every row.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    terms: Vec<(&'static str, Comparison, Value)>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self::all().and_eq(column, value)
    }

    pub fn lte(column: &'static str, value: impl Into<Value>) -> Self {
        Self::all().and_lte(column, value)
    }

    pub fn and_eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.terms.push((column, Comparison::Eq, value.into()));
        self
    }

    pub fn and_lte(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.terms.push((column, Comparison::Lte, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn where_clause(&self, binds: &mut Vec<Value>) -> String {
        if self.terms.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = self
            .terms
            .iter()
            .map(|(column, comparison, value)| {
                binds.push(value.clone());
                format!("{column} {} ?", comparison.operator())
            })
            .collect();
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

#[derive(Debug, Clone)]
enum Assignment {
    Set(Value),
    Increment(i64),
}

/// Column assignments for inserts and updates.
#[derive(Debug, Clone, Default)]
pub struct Data {
    entries: Vec<(&'static str, Assignment)>,
}

impl Data {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.entries.push((column, Assignment::Set(value.into())));
        self
    }

    /// Adds `by` to the stored value on update; inserts `by` on insert.
    pub fn increment(mut self, column: &'static str, by: i64) -> Self {
        self.entries.push((column, Assignment::Increment(by)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_clause(&self, binds: &mut Vec<Value>) -> String {
        if self.entries.is_empty() {
            return "DEFAULT VALUES".to_string();
        }
        let mut columns = Vec::with_capacity(self.entries.len());
        for (column, assignment) in &self.entries {
            columns.push(*column);
            binds.push(match assignment {
                Assignment::Set(value) => value.clone(),
                Assignment::Increment(by) => Value::Integer(*by),
            });
        }
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!("({}) VALUES ({placeholders})", columns.join(", "))
    }

    fn set_clause(&self, binds: &mut Vec<Value>) -> String {
        self.entries
            .iter()
            .map(|(column, assignment)| match assignment {
                Assignment::Set(value) => {
                    binds.push(value.clone());
                    format!("{column} = ?")
                }
                Assignment::Increment(by) => {
                    binds.push(Value::Integer(*by));
                    format!("{column} = {column} + ?")
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Query handle for one table, borrowing the shared connection.
pub struct TableQuery<'conn, T> {
    conn: &'conn Connection,
    _row: PhantomData<fn() -> T>,
}

impl<'conn, T: Table> TableQuery<'conn, T> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _row: PhantomData,
        }
    }

    /// Every row matching `filter`, in `T::ORDER_BY` order.
    pub fn find_many(&self, filter: &Filter) -> QueryResult<Vec<T>> {
        let mut binds = Vec::new();
        let sql = format!(
            "SELECT {} FROM {}{} ORDER BY {};",
            T::COLUMNS.join(", "),
            T::NAME,
            filter.where_clause(&mut binds),
            T::ORDER_BY
        );
        logged(T::NAME, "find_many", Vec::len, || {
            let mut stmt = self.conn.prepare_cached(&sql)?;
            let mut rows = stmt.query(params_from_iter(binds))?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(T::from_row(row)?);
            }
            Ok(items)
        })
    }

    /// First row matching `filter` in `T::ORDER_BY` order.
    pub fn find_first(&self, filter: &Filter) -> QueryResult<Option<T>> {
        let mut binds = Vec::new();
        let sql = format!(
            "SELECT {} FROM {}{} ORDER BY {} LIMIT 1;",
            T::COLUMNS.join(", "),
            T::NAME,
            filter.where_clause(&mut binds),
            T::ORDER_BY
        );
        logged(T::NAME, "find_first", found, || {
            self.fetch_optional(&sql, binds)
        })
    }

    /// Inserts one row and returns it as stored.
    pub fn create(&self, data: &Data) -> QueryResult<T> {
        let mut binds = Vec::new();
        let sql = format!(
            "INSERT INTO {} {} RETURNING {};",
            T::NAME,
            data.insert_clause(&mut binds),
            T::COLUMNS.join(", ")
        );
        logged(T::NAME, "create", |_| 1, || self.fetch_one(&sql, binds))
    }

    /// Applies `data` to rows matching `filter`; returns the first updated row.
    pub fn update(&self, filter: &Filter, data: &Data) -> QueryResult<Option<T>> {
        self.require_scope(filter, "update")?;
        if data.is_empty() {
            return Err(QueryError::EmptyChangeSet(T::NAME));
        }

        let mut binds = Vec::new();
        let assignments = data.set_clause(&mut binds);
        let sql = format!(
            "UPDATE {} SET {assignments}{} RETURNING {};",
            T::NAME,
            filter.where_clause(&mut binds),
            T::COLUMNS.join(", ")
        );
        logged(T::NAME, "update", found, || {
            self.fetch_optional(&sql, binds)
        })
    }

    /// Inserts `data`, or applies `changes` to the row that conflicts on
    /// `conflict`. Returns the resulting row either way.
    pub fn upsert(
        &self,
        data: &Data,
        conflict: &[&'static str],
        changes: &Data,
    ) -> QueryResult<T> {
        if changes.is_empty() {
            return Err(QueryError::EmptyChangeSet(T::NAME));
        }

        let mut binds = Vec::new();
        let insert = data.insert_clause(&mut binds);
        let assignments = changes.set_clause(&mut binds);
        let sql = format!(
            "INSERT INTO {} {insert} ON CONFLICT ({}) DO UPDATE SET {assignments} RETURNING {};",
            T::NAME,
            conflict.join(", "),
            T::COLUMNS.join(", ")
        );
        logged(T::NAME, "upsert", |_| 1, || self.fetch_one(&sql, binds))
    }

    /// Deletes rows matching `filter` and reports how many went away.
    pub fn delete(&self, filter: &Filter) -> QueryResult<usize> {
        self.require_scope(filter, "delete")?;

        let mut binds = Vec::new();
        let sql = format!("DELETE FROM {}{};", T::NAME, filter.where_clause(&mut binds));
        logged(T::NAME, "delete", |changed: &usize| *changed, || {
            let mut stmt = self.conn.prepare_cached(&sql)?;
            Ok(stmt.execute(params_from_iter(binds))?)
        })
    }

    fn fetch_optional(&self, sql: &str, binds: Vec<Value>) -> QueryResult<Option<T>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        match rows.next()? {
            Some(row) => Ok(Some(T::from_row(row)?)),
            None => Ok(None),
        }
    }

    fn fetch_one(&self, sql: &str, binds: Vec<Value>) -> QueryResult<T> {
        self.fetch_optional(sql, binds)?
            .ok_or_else(|| rusqlite::Error::QueryReturnedNoRows.into())
    }

    fn require_scope(&self, filter: &Filter, op: &'static str) -> QueryResult<()> {
        if filter.is_empty() {
            return Err(QueryError::UnscopedWrite { table: T::NAME, op });
        }
        Ok(())
    }
}

fn found<T>(row: &Option<T>) -> usize {
    usize::from(row.is_some())
}

fn logged<R>(
    table: &'static str,
    op: &'static str,
    rows: fn(&R) -> usize,
    run: impl FnOnce() -> QueryResult<R>,
) -> QueryResult<R> {
    let started_at = Instant::now();
    let result = run();
    match &result {
        Ok(value) => debug!(
            "event=db_query module=query status=ok table={table} op={op} rows={} duration_ms={}",
            rows(value),
            started_at.elapsed().as_millis()
        ),
        Err(err) => warn!(
            "event=db_query module=query status=error table={table} op={op} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{Data, Filter, QueryError, QueryResult, Table, TableQuery};
    use rusqlite::{Connection, Row};

    #[derive(Debug, PartialEq, Eq)]
    struct Counter {
        id: i64,
        label: String,
        hits: i64,
    }

    impl Table for Counter {
        const NAME: &'static str = "counters";
        const COLUMNS: &'static [&'static str] = &["id", "label", "hits"];
        const ORDER_BY: &'static str = "id ASC";

        fn from_row(row: &Row<'_>) -> QueryResult<Self> {
            Ok(Self {
                id: row.get("id")?,
                label: row.get("label")?,
                hits: row.get("hits")?,
            })
        }
    }

    fn counters() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE counters (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                label TEXT NOT NULL UNIQUE,
                hits INTEGER NOT NULL DEFAULT 0
            );",
        )
        .unwrap();
        conn
    }

    #[test]
    fn where_clause_binds_in_order() {
        let mut binds = Vec::new();
        let clause = Filter::eq("guild_id", 7_i64)
            .and_lte("expires_at", 100_i64)
            .where_clause(&mut binds);
        assert_eq!(clause, " WHERE guild_id = ? AND expires_at <= ?");
        assert_eq!(binds.len(), 2);
        assert!(Filter::all().where_clause(&mut binds).is_empty());
    }

    #[test]
    fn increment_renders_relative_assignment() {
        let mut binds = Vec::new();
        let data = Data::new().set("label", "x".to_string()).increment("hits", 1);
        assert_eq!(data.set_clause(&mut binds), "label = ?, hits = hits + ?");
        assert_eq!(
            data.insert_clause(&mut binds),
            "(label, hits) VALUES (?, ?)"
        );
        assert_eq!(binds.len(), 4);
    }

    #[test]
    fn create_returns_stored_row_with_defaults() {
        let conn = counters();
        let table = TableQuery::<Counter>::new(&conn);

        let created = table
            .create(&Data::new().set("label", "alpha".to_string()))
            .unwrap();
        assert_eq!(
            created,
            Counter {
                id: 1,
                label: "alpha".to_string(),
                hits: 0
            }
        );
    }

    #[test]
    fn find_first_follows_order_and_misses_are_none() {
        let conn = counters();
        let table = TableQuery::<Counter>::new(&conn);
        for label in ["b", "a"] {
            table
                .create(&Data::new().set("label", label.to_string()))
                .unwrap();
        }

        let first = table.find_first(&Filter::all()).unwrap().unwrap();
        assert_eq!(first.label, "b");
        assert!(table.find_first(&Filter::eq("id", 99_i64)).unwrap().is_none());
    }

    #[test]
    fn writes_without_filter_are_refused() {
        let conn = counters();
        let table = TableQuery::<Counter>::new(&conn);
        table
            .create(&Data::new().set("label", "keep".to_string()))
            .unwrap();

        let update = table.update(&Filter::all(), &Data::new().set("hits", 5_i64));
        assert!(matches!(
            update,
            Err(QueryError::UnscopedWrite { table: "counters", op: "update" })
        ));
        let delete = table.delete(&Filter::all());
        assert!(matches!(
            delete,
            Err(QueryError::UnscopedWrite { op: "delete", .. })
        ));
        assert_eq!(table.find_many(&Filter::all()).unwrap().len(), 1);
    }

    #[test]
    fn update_without_assignments_is_refused() {
        let conn = counters();
        let table = TableQuery::<Counter>::new(&conn);
        let result = table.update(&Filter::eq("id", 1_i64), &Data::new());
        assert!(matches!(result, Err(QueryError::EmptyChangeSet("counters"))));
    }

    #[test]
    fn upsert_inserts_then_applies_changes() {
        let conn = counters();
        let table = TableQuery::<Counter>::new(&conn);
        let insert = Data::new().set("label", "hot".to_string()).increment("hits", 1);
        let bump = Data::new().increment("hits", 1);

        assert_eq!(table.upsert(&insert, &["label"], &bump).unwrap().hits, 1);
        assert_eq!(table.upsert(&insert, &["label"], &bump).unwrap().hits, 2);
        assert_eq!(table.find_many(&Filter::all()).unwrap().len(), 1);
    }

    #[test]
    fn delete_reports_affected_rows() {
        let conn = counters();
        let table = TableQuery::<Counter>::new(&conn);
        let row = table
            .create(&Data::new().set("label", "gone".to_string()))
            .unwrap();

        assert_eq!(table.delete(&Filter::eq("id", row.id)).unwrap(), 1);
        assert_eq!(table.delete(&Filter::eq("id", row.id)).unwrap(), 0);
    }

    #[test]
    fn constraint_failures_keep_sqlite_code() {
        let conn = counters();
        let table = TableQuery::<Counter>::new(&conn);
        let data = Data::new().set("label", "dup".to_string());
        table.create(&data).unwrap();

        let err = table.create(&data).unwrap_err();
        assert_eq!(
            err.sqlite_error_code(),
            Some(rusqlite::ErrorCode::ConstraintViolation)
        );
    }
}
