use thiserror::Error;

use crate::{ColumnName, LogicalType, TableName};

/// Why an entity can't be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("invalid identifier {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    #[error("duplicate column `{column}` in table `{table}`")]
    DuplicateColumn {
        table: TableName,
        column: ColumnName,
    },

    #[error("primary key of `{table}` references unknown column `{column}`")]
    DanglingKeyReference {
        table: TableName,
        column: ColumnName,
    },

    #[error("table `{table}` cannot autoincrement: {violation}")]
    InvalidAutoIncrement {
        table: TableName,
        violation: AutoIncrementViolation,
    },

    #[error("table `{table}` has an empty primary key")]
    EmptyPrimaryKey { table: TableName },

    #[error("primary key of `{table}` lists column `{column}` more than once")]
    DuplicateKeyColumn {
        table: TableName,
        column: ColumnName,
    },

    #[error("table `{table}` is defined more than once")]
    DuplicateTable { table: TableName },
}

/// The ways an autoincrement request can be invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutoIncrementViolation {
    #[error("the key has {columns} columns, autoincrement needs exactly one")]
    CompositeKey { columns: usize },

    #[error("column `{column}` is {logical_type}, autoincrement needs integer")]
    NonIntegerColumn {
        column: ColumnName,
        logical_type: LogicalType,
    },
}
