//! SQL text built from the record schema.
//!
//! Column names only ever come from [`Field::key`], so no caller-supplied
//! text is interpolated into a statement. Values are always bound.

use crate::config::StoreConfig;
use crate::schema::Field;

/// `CREATE TABLE` statement for the record table.
pub(crate) fn create_table() -> String {
    let columns: Vec<String> = Field::ALL
        .iter()
        .map(|f| format!("{} TEXT NOT NULL DEFAULT ''", f.key()))
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            {}
        )",
        StoreConfig::TABLE_NAME,
        columns.join(",\n            ")
    )
}

/// Columns missing from an older table, for `ALTER TABLE ... ADD COLUMN`.
pub(crate) fn add_column(field: Field) -> String {
    format!(
        "ALTER TABLE {} ADD COLUMN {} TEXT NOT NULL DEFAULT ''",
        StoreConfig::TABLE_NAME,
        field.key()
    )
}

/// `id` followed by every content column, in schema order.
pub(crate) fn select_columns() -> String {
    let mut columns = vec!["id"];
    columns.extend(Field::ALL.iter().map(|f| f.key()));
    columns.join(", ")
}

pub(crate) fn select_all() -> String {
    format!(
        "SELECT {} FROM {} ORDER BY id",
        select_columns(),
        StoreConfig::TABLE_NAME
    )
}

pub(crate) fn select_one() -> String {
    format!(
        "SELECT {} FROM {} WHERE id = ?1",
        select_columns(),
        StoreConfig::TABLE_NAME
    )
}

/// Insert binding every content column as `?1..?N`.
pub(crate) fn insert() -> String {
    let columns: Vec<&str> = Field::ALL.iter().map(|f| f.key()).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        StoreConfig::TABLE_NAME,
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Update binding every content column as `?1..?N` and the id as `?N+1`.
pub(crate) fn update_all() -> String {
    let assignments: Vec<String> = Field::ALL
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{} = ?{}", f.key(), i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        StoreConfig::TABLE_NAME,
        assignments.join(", "),
        Field::COUNT + 1
    )
}

pub(crate) fn update_one(field: Field) -> String {
    format!(
        "UPDATE {} SET {} = ?1 WHERE id = ?2",
        StoreConfig::TABLE_NAME,
        field.key()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_placeholder_count() {
        let sql = insert();
        assert!(sql.contains(&format!("?{}", Field::COUNT)));
        assert!(!sql.contains(&format!("?{}", Field::COUNT + 1)));
    }

    #[test]
    fn test_update_binds_id_last() {
        let sql = update_all();
        assert!(sql.ends_with(&format!("WHERE id = ?{}", Field::COUNT + 1)));
        assert!(sql.contains("manuscript = ?"));
    }

    #[test]
    fn test_select_starts_with_id() {
        assert!(select_columns().starts_with("id, pericope"));
    }
}
