//! DDL generation.
//!
//! Column definitions follow declaration order. A single-column
//! autoincrement key is declared inline on its column; every other key is a
//! trailing `PRIMARY KEY(...)` table constraint.

use entable_schema::{Database, Entity};
use entable_sql::quote_ident;

/// Extension trait for rendering the model to SQL.
pub trait SchemaCodegen {
    /// Generate the SQL that creates every table.
    fn to_sql(&self) -> String;
}

impl SchemaCodegen for Entity {
    fn to_sql(&self) -> String {
        create_table_sql(self)
    }
}

impl SchemaCodegen for Database {
    fn to_sql(&self) -> String {
        create_all_tables_sql(self)
            .iter()
            .map(|stmt| format!("{stmt};"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Generate the CREATE TABLE statement for an entity.
pub fn create_table_sql(entity: &Entity) -> String {
    let mut sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (",
        quote_ident(entity.table_name().as_str())
    );

    let auto_increment = entity.auto_increment_column().map(|c| c.name());

    let mut parts: Vec<String> = entity
        .columns()
        .iter()
        .map(|col| {
            let mut def = format!(
                "{} {}",
                quote_ident(col.name().as_str()),
                col.logical_type().affinity()
            );

            if auto_increment == Some(col.name()) {
                def.push_str(" PRIMARY KEY AUTOINCREMENT");
            }

            // Applies to the autoincrement column too
            if !col.is_nullable() {
                def.push_str(" NOT NULL");
            }

            def
        })
        .collect();

    if auto_increment.is_none() {
        let quoted_pk_cols: Vec<_> = entity
            .primary_key()
            .columns()
            .iter()
            .map(|c| quote_ident(c.as_str()))
            .collect();
        parts.push(format!("PRIMARY KEY({})", quoted_pk_cols.join(", ")));
    }

    sql.push_str(&parts.join(", "));
    sql.push(')');

    tracing::debug!(
        table = %entity.table_name(),
        columns = entity.columns().len(),
        "rendered create table"
    );

    sql
}

/// Generate one CREATE TABLE statement per entity, in database order.
pub fn create_all_tables_sql(database: &Database) -> Vec<String> {
    database.iter().map(create_table_sql).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use entable_schema::{Column, LogicalType, PrimaryKey, Primitive};

    #[test]
    fn test_blob_and_real_affinities() {
        let entity = Entity::builder("attachment")
            .column(Column::new("id", LogicalType::Text).not_null())
            .column(Column::new("data", LogicalType::Blob))
            .column(Column::primitive("ratio", Primitive::F64))
            .primary_key(PrimaryKey::new(["id"]))
            .build()
            .unwrap();

        insta::assert_snapshot!(create_table_sql(&entity), @"CREATE TABLE IF NOT EXISTS `attachment` (`id` TEXT NOT NULL, `data` BLOB, `ratio` REAL NOT NULL, PRIMARY KEY(`id`))");
    }

    #[test]
    fn test_database_to_sql() {
        let user = Entity::builder("user")
            .column(Column::primitive("id", Primitive::I64))
            .column(Column::new("email", LogicalType::Text))
            .primary_key(PrimaryKey::auto_increment("id"))
            .build()
            .unwrap();
        let follow = Entity::builder("user_follow")
            .column(Column::primitive("follower_id", Primitive::I64))
            .column(Column::primitive("followed_id", Primitive::I64))
            .primary_key(PrimaryKey::new(["follower_id", "followed_id"]))
            .build()
            .unwrap();
        let db = Database::new([user, follow]).unwrap();

        insta::assert_snapshot!(db.to_sql(), @r"
        CREATE TABLE IF NOT EXISTS `user` (`id` INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, `email` TEXT);
        CREATE TABLE IF NOT EXISTS `user_follow` (`follower_id` INTEGER NOT NULL, `followed_id` INTEGER NOT NULL, PRIMARY KEY(`follower_id`, `followed_id`));
        ");
    }

    #[test]
    fn test_empty_database() {
        let db = Database::default();
        assert!(create_all_tables_sql(&db).is_empty());
        assert_eq!(db.to_sql(), "");
    }
}
