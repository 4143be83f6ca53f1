//! Entity schema model for entable.
//!
//! This crate contains the validated table model that sits between entity
//! discovery (whatever produces table definitions) and `entable`'s DDL
//! generation. Every type here is an immutable value: all validation happens
//! once, when an [`Entity`] or [`Database`] is constructed, so rendering a
//! valid entity can't fail.
//!
//! ## Example
//!
//! ```
//! use entable_schema::{Column, Entity, LogicalType, Primitive, PrimaryKey};
//!
//! let entity = Entity::builder("MyEntity")
//!     .column(Column::new("uuid", LogicalType::Text))
//!     .column(Column::new("name", LogicalType::Text))
//!     .column(Column::primitive("age", Primitive::I32))
//!     .primary_key(PrimaryKey::new(["uuid"]))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(entity.columns().len(), 3);
//! assert!(!entity.column("age").unwrap().is_nullable());
//! ```

use std::fmt;

use indexmap::IndexMap;

pub use entable_sql::{Affinity, ColumnName, TableName};

mod error;
pub use error::{AutoIncrementViolation, SchemaError};

/// The semantic kind of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Text,
    Integer,
    Real,
    Blob,
}

impl LogicalType {
    /// The storage type affinity this kind is declared with.
    pub fn affinity(&self) -> Affinity {
        match self {
            LogicalType::Text => Affinity::Text,
            LogicalType::Integer => Affinity::Integer,
            LogicalType::Real => Affinity::Real,
            LogicalType::Blob => Affinity::Blob,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Text => write!(f, "text"),
            LogicalType::Integer => write!(f, "integer"),
            LogicalType::Real => write!(f, "real"),
            LogicalType::Blob => write!(f, "blob"),
        }
    }
}

/// Primitive field kinds. Columns built from these are never nullable.
///
/// `u64` is left out: SQLite integers are signed 64-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    F32,
    F64,
}

impl Primitive {
    /// Map this primitive to the logical type it's stored as.
    pub fn logical_type(&self) -> LogicalType {
        match self {
            Primitive::Bool
            | Primitive::I8
            | Primitive::I16
            | Primitive::I32
            | Primitive::I64
            | Primitive::U8
            | Primitive::U16
            | Primitive::U32 => LogicalType::Integer,
            Primitive::F32 | Primitive::F64 => LogicalType::Real,
        }
    }
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: ColumnName,
    logical_type: LogicalType,
    nullable: bool,
}

impl Column {
    /// Create a nullable column.
    pub fn new(name: impl Into<ColumnName>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
            nullable: true,
        }
    }

    /// Create a column for a primitive field. Always `NOT NULL`.
    pub fn primitive(name: impl Into<ColumnName>, primitive: Primitive) -> Self {
        Self {
            name: name.into(),
            logical_type: primitive.logical_type(),
            nullable: false,
        }
    }

    /// Mark the column as not accepting NULL.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn name(&self) -> &ColumnName {
        &self.name
    }

    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// The primary key of an entity: an ordered list of column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    columns: Vec<ColumnName>,
    auto_generate: bool,
}

impl PrimaryKey {
    /// A key over `columns`, in the given order.
    pub fn new<I, C>(columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnName>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            auto_generate: false,
        }
    }

    /// A single-column key whose values the storage engine assigns.
    pub fn auto_increment(column: impl Into<ColumnName>) -> Self {
        Self::new([column]).auto_generate(true)
    }

    /// Request (or stop requesting) engine-assigned key values.
    ///
    /// Only valid on a single integer column; checked when the entity is built.
    pub fn auto_generate(mut self, auto_generate: bool) -> Self {
        self.auto_generate = auto_generate;
        self
    }

    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    pub fn is_auto_generate(&self) -> bool {
        self.auto_generate
    }
}

/// A validated table definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    table_name: TableName,
    columns: Vec<Column>,
    primary_key: PrimaryKey,
}

impl Entity {
    /// Construct an entity, validating names, column uniqueness and the key.
    pub fn new(
        table_name: impl Into<TableName>,
        columns: Vec<Column>,
        primary_key: PrimaryKey,
    ) -> Result<Self, SchemaError> {
        let entity = Self {
            table_name: table_name.into(),
            columns,
            primary_key,
        };
        entity.validate()?;
        tracing::trace!(
            table = %entity.table_name,
            columns = entity.columns.len(),
            "entity validated"
        );
        Ok(entity)
    }

    /// Start building an entity column by column.
    pub fn builder(table_name: impl Into<TableName>) -> EntityBuilder {
        EntityBuilder::new(table_name)
    }

    pub fn table_name(&self) -> &TableName {
        &self.table_name
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn primary_key(&self) -> &PrimaryKey {
        &self.primary_key
    }

    /// Look up a column by name, ignoring ASCII case like SQLite does.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.as_str().eq_ignore_ascii_case(name))
    }

    /// The column the engine assigns values to, if the key autoincrements.
    pub fn auto_increment_column(&self) -> Option<&Column> {
        if !self.primary_key.auto_generate {
            return None;
        }
        let [column] = self.primary_key.columns.as_slice() else {
            return None;
        };
        self.column(column.as_str())
    }

    fn validate(&self) -> Result<(), SchemaError> {
        check_ident(self.table_name.as_str())?;

        // SQLite identifiers are case-insensitive for ASCII
        let mut by_name: IndexMap<String, &Column> = IndexMap::with_capacity(self.columns.len());
        for column in &self.columns {
            check_ident(column.name.as_str())?;
            let folded = column.name.as_str().to_ascii_lowercase();
            if by_name.insert(folded, column).is_some() {
                return Err(SchemaError::DuplicateColumn {
                    table: self.table_name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        let key = &self.primary_key;
        if key.columns.is_empty() {
            return Err(SchemaError::EmptyPrimaryKey {
                table: self.table_name.clone(),
            });
        }

        let mut key_columns: Vec<&Column> = Vec::with_capacity(key.columns.len());
        for name in &key.columns {
            let folded = name.as_str().to_ascii_lowercase();
            let Some(column) = by_name.get(&folded).copied() else {
                return Err(SchemaError::DanglingKeyReference {
                    table: self.table_name.clone(),
                    column: name.clone(),
                });
            };
            if key_columns.iter().any(|c| std::ptr::eq(*c, column)) {
                return Err(SchemaError::DuplicateKeyColumn {
                    table: self.table_name.clone(),
                    column: name.clone(),
                });
            }
            key_columns.push(column);
        }

        if key.auto_generate {
            let violation = match key_columns.as_slice() {
                [column] if column.logical_type == LogicalType::Integer => None,
                [column] => Some(AutoIncrementViolation::NonIntegerColumn {
                    column: column.name.clone(),
                    logical_type: column.logical_type,
                }),
                columns => Some(AutoIncrementViolation::CompositeKey {
                    columns: columns.len(),
                }),
            };
            if let Some(violation) = violation {
                return Err(SchemaError::InvalidAutoIncrement {
                    table: self.table_name.clone(),
                    violation,
                });
            }
        }

        Ok(())
    }
}

fn check_ident(name: &str) -> Result<(), SchemaError> {
    match entable_sql::ident_violation(name) {
        Some(reason) => Err(SchemaError::InvalidIdentifier {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Typed builder for [`Entity`].
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    table_name: TableName,
    columns: Vec<Column>,
    primary_key: Option<PrimaryKey>,
}

impl EntityBuilder {
    pub fn new(table_name: impl Into<TableName>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
            primary_key: None,
        }
    }

    /// Append a column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Append several columns, in order.
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn primary_key(mut self, primary_key: PrimaryKey) -> Self {
        self.primary_key = Some(primary_key);
        self
    }

    /// Validate and produce the entity. A missing key is an empty key.
    pub fn build(self) -> Result<Entity, SchemaError> {
        let primary_key = self
            .primary_key
            .unwrap_or_else(|| PrimaryKey::new(Vec::<ColumnName>::new()));
        Entity::new(self.table_name, self.columns, primary_key)
    }
}

/// A set of entities with distinct table names, in declaration order.
///
/// Table names are compared ignoring ASCII case.
#[derive(Debug, Clone, Default)]
pub struct Database {
    /// Entities indexed by lowercased table name
    entities: IndexMap<String, Entity>,
}

impl Database {
    /// Collect entities, rejecting a table name that appears twice.
    pub fn new(entities: impl IntoIterator<Item = Entity>) -> Result<Self, SchemaError> {
        let mut map = IndexMap::new();
        for entity in entities {
            let key = entity.table_name.as_str().to_ascii_lowercase();
            if map.contains_key(&key) {
                return Err(SchemaError::DuplicateTable {
                    table: entity.table_name,
                });
            }
            map.insert(key, entity);
        }
        Ok(Self { entities: map })
    }

    /// Get an entity by table name, ignoring ASCII case.
    pub fn get(&self, table_name: &str) -> Option<&Entity> {
        self.entities.get(&table_name.to_ascii_lowercase())
    }

    /// Iterate over entities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
