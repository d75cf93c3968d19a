//! Parameterized statement construction. Identifiers come from resource
//! configuration only; request values travel as a single bound JSONB
//! parameter and are converted to column types by `jsonb_populate_record`,
//! so no per-column bind or decode ladder is needed. Rows come back as JSON
//! through `row_to_json`.

use serde_json::{Map, Value};

/// Quote an identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// One page of rows as JSON. `select` is the configured selection expression
/// (default `*`); limit and offset are already-clamped numbers.
pub fn select_page(table: &str, select: &str, limit: u32, offset: u64) -> String {
    format!(
        "SELECT row_to_json(t.*) AS row FROM (SELECT {} FROM {} LIMIT {} OFFSET {}) t",
        select,
        quoted(table),
        limit,
        offset
    )
}

/// Exact row count for pagination metadata.
pub fn count(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", quoted(table))
}

/// INSERT the columns present in `row`, converting values through the table's
/// row type; absent columns keep their defaults. Returns the inserted row as
/// JSON. Expects the row object bound as $1. An empty row falls back to
/// DEFAULT VALUES and takes no parameter.
pub fn insert(table: &str, row: &Map<String, Value>) -> String {
    let q_table = quoted(table);
    if row.is_empty() {
        return format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING row_to_json({}.*) AS row",
            q_table, q_table
        );
    }
    let columns: Vec<String> = row.keys().map(|k| quoted(k)).collect();
    let sources: Vec<String> = row.keys().map(|k| format!("v.{}", quoted(k))).collect();
    format!(
        "INSERT INTO {} ({}) SELECT {} FROM jsonb_populate_record(NULL::{}, $1) AS v RETURNING row_to_json({}.*) AS row",
        q_table,
        columns.join(", "),
        sources.join(", "),
        q_table,
        q_table
    )
}

/// UPDATE the columns present in `fields` on the row whose id matches the
/// bound payload's id. `fields` must be non-empty; callers reject empty
/// updates before building a statement. Expects one JSONB parameter holding
/// id plus fields. Returns the updated row as JSON, or no row when the id
/// does not exist.
pub fn update_by_id(table: &str, fields: &Map<String, Value>) -> String {
    let q_table = quoted(table);
    let assignments: Vec<String> = fields
        .keys()
        .map(|k| format!("{} = v.{}", quoted(k), quoted(k)))
        .collect();
    format!(
        "UPDATE {} SET {} FROM jsonb_populate_record(NULL::{}, $1) AS v WHERE {}.\"id\" = v.\"id\" RETURNING row_to_json({}.*) AS row",
        q_table,
        assignments.join(", "),
        q_table,
        q_table,
        q_table
    )
}

/// DELETE the row whose id matches the bound payload's id. Expects one JSONB
/// parameter of the shape {"id": ...}; the affected-row count is read from
/// the execution result.
pub fn delete_by_id(table: &str) -> String {
    let q_table = quoted(table);
    format!(
        "DELETE FROM {} USING jsonb_populate_record(NULL::{}, $1) AS v WHERE {}.\"id\" = v.\"id\"",
        q_table, q_table, q_table
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn select_page_wraps_rows_as_json() {
        let sql = select_page("course", "*", 10, 20);
        assert_eq!(
            sql,
            "SELECT row_to_json(t.*) AS row FROM (SELECT * FROM \"course\" LIMIT 10 OFFSET 20) t"
        );
    }

    #[test]
    fn select_page_keeps_configured_selection() {
        let sql = select_page("course", "id, title", 5, 0);
        assert!(sql.contains("SELECT id, title FROM \"course\""));
    }

    #[test]
    fn insert_lists_only_present_columns() {
        let sql = insert("university", &obj(json!({"name": "MIT"})));
        assert_eq!(
            sql,
            "INSERT INTO \"university\" (\"name\") SELECT v.\"name\" FROM jsonb_populate_record(NULL::\"university\", $1) AS v RETURNING row_to_json(\"university\".*) AS row"
        );
    }

    #[test]
    fn insert_with_empty_row_uses_defaults() {
        let sql = insert("university", &Map::new());
        assert_eq!(
            sql,
            "INSERT INTO \"university\" DEFAULT VALUES RETURNING row_to_json(\"university\".*) AS row"
        );
    }

    #[test]
    fn update_assigns_only_present_fields() {
        let sql = update_by_id("college", &obj(json!({"name": "x"})));
        assert_eq!(
            sql,
            "UPDATE \"college\" SET \"name\" = v.\"name\" FROM jsonb_populate_record(NULL::\"college\", $1) AS v WHERE \"college\".\"id\" = v.\"id\" RETURNING row_to_json(\"college\".*) AS row"
        );
    }

    #[test]
    fn delete_filters_by_id() {
        let sql = delete_by_id("department");
        assert_eq!(
            sql,
            "DELETE FROM \"department\" USING jsonb_populate_record(NULL::\"department\", $1) AS v WHERE \"department\".\"id\" = v.\"id\""
        );
    }

    #[test]
    fn identifiers_are_quoted() {
        let sql = count("weird\"name");
        assert_eq!(sql, "SELECT COUNT(*) FROM \"weird\"\"name\"");
    }
}
