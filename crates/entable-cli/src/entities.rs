//! Entity definition files.
//!
//! A definition file maps entity names to their columns and key:
//!
//! ```styx
//! MyEntity {
//!   columns {
//!     uuid @text
//!     name @text
//!     age @not-null(@integer)
//!   }
//!   primary-key (uuid)
//! }
//! ```

use entable::{Column, Database, Entity, LogicalType, PrimaryKey, SchemaError};
use facet::Facet;
use indexmap::IndexMap;
use thiserror::Error;

/// An entity definition file - top level is a map of entity names to declarations.
#[derive(Debug, Facet)]
#[facet(transparent)]
pub struct EntityFile(pub IndexMap<String, EntityDecl>);

/// A single entity declaration.
#[derive(Debug, Facet)]
#[facet(rename_all = "kebab-case")]
pub struct EntityDecl {
    /// Table name, if different from the entity name.
    pub table: Option<String>,

    /// Columns in declaration order.
    pub columns: Columns,

    /// Key column names, in key order.
    pub primary_key: Vec<String>,

    /// Let the storage engine assign key values.
    pub auto_generate: Option<bool>,
}

/// Column name -> column type.
#[derive(Debug, Facet)]
pub struct Columns {
    #[facet(flatten)]
    pub columns: IndexMap<String, ColumnType>,
}

/// Column type. Bare types are nullable.
#[derive(Debug, Facet)]
#[facet(rename_all = "kebab-case")]
#[repr(u8)]
pub enum ColumnType {
    Text,
    Integer,
    Real,
    Blob,
    /// Non-nullable type: @not-null(@integer) -> NotNull(vec![Integer])
    NotNull(Vec<ColumnType>),
}

impl ColumnType {
    /// Resolve to a logical type and nullability.
    fn resolve(&self) -> Option<(LogicalType, bool)> {
        match self {
            ColumnType::Text => Some((LogicalType::Text, true)),
            ColumnType::Integer => Some((LogicalType::Integer, true)),
            ColumnType::Real => Some((LogicalType::Real, true)),
            ColumnType::Blob => Some((LogicalType::Blob, true)),
            ColumnType::NotNull(inner) => match inner.as_slice() {
                [ColumnType::NotNull(_)] => None,
                [inner] => inner.resolve().map(|(ty, _)| (ty, false)),
                _ => None,
            },
        }
    }
}

/// Errors turning a definition file into a [`Database`].
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to parse entity definitions: {0}")]
    Parse(String),

    #[error("column `{column}` of `{entity}`: @not-null takes exactly one plain type")]
    BadNotNull { entity: String, column: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Parse an entity definition file.
pub fn parse(source: &str) -> Result<EntityFile, DefinitionError> {
    facet_styx::from_str(source).map_err(|e| DefinitionError::Parse(e.to_string()))
}

impl EntityFile {
    /// Validate every declaration and collect them in file order.
    pub fn to_database(&self) -> Result<Database, DefinitionError> {
        let entities = self
            .0
            .iter()
            .map(|(name, decl)| decl.to_entity(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Database::new(entities)?)
    }
}

impl EntityDecl {
    /// Build the validated entity for this declaration.
    pub fn to_entity(&self, name: &str) -> Result<Entity, DefinitionError> {
        let table = self.table.as_deref().unwrap_or(name);

        let mut columns = Vec::with_capacity(self.columns.columns.len());
        for (column, ty) in &self.columns.columns {
            let Some((logical_type, nullable)) = ty.resolve() else {
                return Err(DefinitionError::BadNotNull {
                    entity: name.to_string(),
                    column: column.clone(),
                });
            };
            let column = Column::new(column.as_str(), logical_type);
            columns.push(if nullable { column } else { column.not_null() });
        }

        let primary_key = PrimaryKey::new(self.primary_key.iter().map(String::as_str))
            .auto_generate(self.auto_generate.unwrap_or(false));

        Ok(Entity::builder(table)
            .columns(columns)
            .primary_key(primary_key)
            .build()?)
    }
}
