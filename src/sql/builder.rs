//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the student table.

use crate::model::Sort;

/// Columns of the student table in select order. Row tuples follow this order.
pub const STUDENT_COLUMNS: [&str; 4] = ["id", "firstname", "lastname", "email"];

/// Schema-qualified table the student records live in.
#[derive(Clone, Debug)]
pub struct TableRef {
    pub schema: String,
    pub table: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        TableRef {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Full qualified table name.
    pub fn qualified(&self) -> String {
        format!("{}.{}", quoted(&self.schema), quoted(&self.table))
    }
}

/// Quote identifier for PostgreSQL (safe: only from config).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn select_column_list() -> String {
    STUDENT_COLUMNS
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT all rows ordered by the sort, with id as the final tiebreaker.
pub fn select_list(table: &TableRef, sort: &Sort) -> String {
    let order_clause = sort
        .effective_orders()
        .iter()
        .map(|o| format!("{} {}", quoted(o.property.column()), o.direction.keyword()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(),
        table.qualified(),
        order_clause
    )
}

/// SELECT by primary key. Caller binds id as $1.
pub fn select_by_id(table: &TableRef) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(),
        table.qualified(),
        quoted("id")
    )
}

/// INSERT the three fields ($1..$3); id comes from the sequence.
pub fn insert(table: &TableRef) -> String {
    format!(
        "INSERT INTO {} ({}, {}, {}) VALUES ($1, $2, $3) RETURNING {}",
        table.qualified(),
        quoted("firstname"),
        quoted("lastname"),
        quoted("email"),
        select_column_list()
    )
}

/// UPDATE all three fields ($1..$3) of the row with id $4.
pub fn update(table: &TableRef) -> String {
    format!(
        "UPDATE {} SET {} = $1, {} = $2, {} = $3 WHERE {} = $4 RETURNING {}",
        table.qualified(),
        quoted("firstname"),
        quoted("lastname"),
        quoted("email"),
        quoted("id"),
        select_column_list()
    )
}

/// DELETE by id.
pub fn delete(table: &TableRef) -> String {
    format!("DELETE FROM {} WHERE {} = $1", table.qualified(), quoted("id"))
}

pub fn count(table: &TableRef) -> String {
    format!("SELECT COUNT(*) FROM {}", table.qualified())
}

/// CREATE TABLE IF NOT EXISTS with a BIGSERIAL id and three required text columns.
pub fn create_table(table: &TableRef) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            {} BIGSERIAL PRIMARY KEY,
            {} VARCHAR(255) NOT NULL,
            {} VARCHAR(255) NOT NULL,
            {} VARCHAR(255) NOT NULL
        )
        "#,
        table.qualified(),
        quoted("id"),
        quoted("firstname"),
        quoted("lastname"),
        quoted("email")
    )
}
