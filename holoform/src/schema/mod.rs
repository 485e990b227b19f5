//! Table metadata consumed by the schema-to-form mapper
//!
//! The mapper never talks to a database itself. It reads column and
//! foreign-key metadata through [`SchemaSource`], which is implemented by:
//! - [`SchemaSnapshot`] - one table's metadata held in memory
//! - [`MySqlSchema`] - live introspection over `sqlx`, captured into a
//!   [`SchemaSnapshot`] with [`MySqlSchema::snapshot`]

mod driver;
mod mysql;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{HoloFormError, Result};

pub use driver::Driver;
pub use mysql::MySqlSchema;

/// One column of a table, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Raw SQL type, e.g. `varchar(255)` or `int(11)`
    pub sql_type: String,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Column default, if any
    pub default_value: Option<String>,
}

impl ColumnDescriptor {
    /// Create a descriptor for a column with no default
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable,
            default_value: None,
        }
    }

    /// Set the column default
    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }
}

/// A column's reference to another table's column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDescriptor {
    /// Referencing column in the introspected table
    pub column_name: String,
    /// Referenced table
    pub referenced_table: String,
    /// Referenced column
    pub referenced_column: String,
}

impl ForeignKeyDescriptor {
    /// Create a foreign key descriptor
    #[must_use]
    pub fn new(
        column_name: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
        }
    }
}

/// Foreign keys of one table, keyed by referencing column
pub type ForeignKeyMap = HashMap<String, ForeignKeyDescriptor>;

/// Synchronous provider of table metadata
pub trait SchemaSource {
    /// Columns of `table` in declaration order
    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// Foreign keys of `table`, keyed by column name
    fn foreign_keys(&self, table: &str) -> Result<ForeignKeyMap>;

    /// Distinct existing values of `table.column`
    fn distinct_values(&self, table: &str, column: &str) -> Result<Vec<String>>;
}

/// One table's metadata held in memory
///
/// Holds the distinct values of referenced columns too, so mapping from a
/// snapshot needs no further I/O.
///
/// # Examples
///
/// ```rust
/// use holoform::schema::{ColumnDescriptor, SchemaSnapshot, SchemaSource};
///
/// let snapshot = SchemaSnapshot::new("users")
///     .column(ColumnDescriptor::new("email", "varchar(255)", false))
///     .column(ColumnDescriptor::new("role_id", "int(11)", false))
///     .foreign_key("role_id", "roles", "id")
///     .values("roles", "id", ["1", "2", "3"]);
///
/// assert_eq!(snapshot.columns("users").unwrap().len(), 2);
/// assert_eq!(snapshot.distinct_values("roles", "id").unwrap(), vec!["1", "2", "3"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    table: String,
    columns: Vec<ColumnDescriptor>,
    foreign_keys: ForeignKeyMap,
    values: HashMap<String, HashMap<String, Vec<String>>>,
}

impl SchemaSnapshot {
    /// Create an empty snapshot of `table`
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Table this snapshot describes
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Append a column
    #[must_use]
    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    /// Record a foreign key; the first key recorded for a column wins
    #[must_use]
    pub fn foreign_key(
        mut self,
        column_name: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        let fk = ForeignKeyDescriptor::new(column_name, referenced_table, referenced_column);
        self.foreign_keys
            .entry(fk.column_name.clone())
            .or_insert(fk);
        self
    }

    /// Record the distinct values of `table.column`
    #[must_use]
    pub fn values<I, S>(
        mut self,
        table: impl Into<String>,
        column: impl Into<String>,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values
            .entry(table.into())
            .or_default()
            .insert(column.into(), values.into_iter().map(Into::into).collect());
        self
    }

    fn ensure_table(&self, table: &str) -> Result<()> {
        if table == self.table {
            Ok(())
        } else {
            Err(HoloFormError::UnknownTable {
                table: table.to_string(),
            })
        }
    }
}

impl SchemaSource for SchemaSnapshot {
    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        self.ensure_table(table)?;
        Ok(self.columns.clone())
    }

    fn foreign_keys(&self, table: &str) -> Result<ForeignKeyMap> {
        self.ensure_table(table)?;
        Ok(self.foreign_keys.clone())
    }

    fn distinct_values(&self, table: &str, column: &str) -> Result<Vec<String>> {
        Ok(self
            .values
            .get(table)
            .and_then(|columns| columns.get(column))
            .cloned()
            .unwrap_or_default())
    }
}
