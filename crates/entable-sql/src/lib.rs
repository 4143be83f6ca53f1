//! SQLite dialect primitives.
//!
//! Identifier newtypes, back-quote identifier quoting, and the type-affinity
//! keywords that column definitions are rendered with.

use std::fmt;

use strid::braid;

/// The name of a table.
#[braid]
pub struct TableName;

/// The name of a column.
#[braid]
pub struct ColumnName;

/// A SQLite identifier wrapper.
///
/// Display writes the value wrapped in back-quotes. Nothing is escaped:
/// callers are expected to have validated the identifier (see
/// [`ident_violation`]).
///
/// # Example
/// ```
/// use entable_sql::Ident;
/// assert_eq!(format!("{}", Ident("user")), "`user`");
/// assert_eq!(format!("{}", Ident("MyEntity")), "`MyEntity`");
/// ```
pub struct Ident<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> fmt::Display for Ident<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.0.as_ref())
    }
}

/// Quote a SQLite identifier with back-quotes.
///
/// Always quotes, so reserved words like `order` or `group` are safe as
/// table and column names.
pub fn quote_ident(name: &str) -> String {
    format!("{}", Ident(name))
}

/// Returns why `name` can't be used as a quoted identifier, if it can't.
///
/// Back-quote quoting has no escape here, so an embedded back-quote would
/// end the identifier early.
///
/// # Examples
///
/// ```
/// assert_eq!(entable_sql::ident_violation("uuid"), None);
/// assert_eq!(entable_sql::ident_violation(""), Some("identifier is empty"));
/// assert!(entable_sql::ident_violation("bad`name").is_some());
/// ```
pub fn ident_violation(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("identifier is empty");
    }
    if name.contains('`') {
        return Some("identifier contains a back-quote");
    }
    if name.chars().any(|c| c.is_ascii_control()) {
        return Some("identifier contains a control character");
    }
    None
}

/// SQLite column type affinities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affinity {
    /// TEXT
    Text,
    /// INTEGER
    Integer,
    /// REAL (8 bytes floating point)
    Real,
    /// BLOB (binary, stored as given)
    Blob,
}

impl Affinity {
    /// The keyword written in column definitions.
    pub fn keyword(&self) -> &'static str {
        match self {
            Affinity::Text => "TEXT",
            Affinity::Integer => "INTEGER",
            Affinity::Real => "REAL",
            Affinity::Blob => "BLOB",
        }
    }
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
