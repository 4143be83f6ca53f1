//! Compile entity definitions to SQLite `CREATE TABLE` statements.
//!
//! This crate provides:
//! - The validated entity model (re-exported from `entable-schema`)
//! - DDL generation: one `CREATE TABLE IF NOT EXISTS` statement per entity
//!
//! # Example
//!
//! ```
//! use entable::{Column, Entity, LogicalType, Primitive, PrimaryKey};
//!
//! let entity = Entity::builder("MyEntity")
//!     .column(Column::primitive("uuid", Primitive::I64))
//!     .column(Column::new("name", LogicalType::Text))
//!     .primary_key(PrimaryKey::auto_increment("uuid"))
//!     .build()?;
//!
//! assert_eq!(
//!     entable::create_table_sql(&entity),
//!     "CREATE TABLE IF NOT EXISTS `MyEntity` (`uuid` INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, `name` TEXT)"
//! );
//! # Ok::<(), entable::SchemaError>(())
//! ```
//!
//! Generation never fails: everything that could make a statement invalid is
//! rejected when the [`Entity`] is constructed.

pub mod schema;

pub use schema::{SchemaCodegen, create_all_tables_sql, create_table_sql};

pub use entable_schema::{
    Affinity, AutoIncrementViolation, Column, ColumnName, Database, Entity, EntityBuilder,
    LogicalType, PrimaryKey, Primitive, SchemaError, TableName,
};
pub use entable_sql::{Ident, quote_ident};
