//! `MySQL` schema introspection over `sqlx`
//!
//! Column and foreign-key metadata come from `information_schema` of the
//! connection's current database. Referenced values come from the referenced
//! tables themselves.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::FromRow;

use super::{ColumnDescriptor, Driver, ForeignKeyDescriptor, ForeignKeyMap, SchemaSnapshot};
use crate::config::DatabaseSettings;
use crate::error::Result;

#[derive(Debug, FromRow)]
struct ColumnRow {
    name: String,
    sql_type: String,
    is_nullable: String,
    default_value: Option<String>,
}

impl From<ColumnRow> for ColumnDescriptor {
    fn from(row: ColumnRow) -> Self {
        Self {
            name: row.name,
            sql_type: row.sql_type,
            nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
            default_value: row.default_value.and_then(column_default),
        }
    }
}

/// Normalize a `COLUMN_DEFAULT` value to the literal it stands for
///
/// `MariaDB` reports defaults as SQL expressions: `DEFAULT NULL` becomes the
/// text `NULL` and string literals keep their quotes (`'guest'`, `'it''s'`).
/// `MySQL` already reports real NULLs and bare literals, which pass through.
fn column_default(raw: String) -> Option<String> {
    if raw == "NULL" {
        return None;
    }

    let literal = raw
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .map(|literal| literal.replace("''", "'"));
    Some(literal.unwrap_or(raw))
}

#[derive(Debug, FromRow)]
struct ForeignKeyRow {
    column_name: String,
    referenced_table: String,
    referenced_column: String,
}

/// Live metadata provider for a `MySQL` database
///
/// # Example
///
/// ```rust,no_run
/// use holoform::forms::FormModel;
/// use holoform::mapper;
/// use holoform::schema::MySqlSchema;
///
/// # async fn example(pool: sqlx::MySqlPool) -> holoform::error::Result<()> {
/// let schema = MySqlSchema::new(pool);
/// let snapshot = schema.snapshot("users").await?;
///
/// let mut form = FormModel::new("users");
/// mapper::fields_from_source(&mut form, &snapshot, "users")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MySqlSchema {
    pool: MySqlPool,
}

impl MySqlSchema {
    /// Wrap a pool owned by the host application
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Build a lazily connecting pool from settings
    ///
    /// The driver is checked before anything else, so an unsupported URL
    /// never opens a connection.
    ///
    /// # Errors
    ///
    /// Returns [`HoloFormError::UnsupportedDriver`](crate::error::HoloFormError::UnsupportedDriver)
    /// for non-`MySQL` URLs, or a database error if the URL cannot be parsed.
    pub fn connect_lazy(settings: &DatabaseSettings) -> Result<Self> {
        let driver = Driver::from_url(&settings.url)?;
        let pool = MySqlPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_lazy(&settings.url)?;

        tracing::debug!(
            %driver,
            max_connections = settings.max_connections,
            "Created introspection pool"
        );
        Ok(Self::new(pool))
    }

    /// Get the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Columns of `table` in declaration order
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails
    pub async fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows = sqlx::query_as::<_, ColumnRow>(
            r"
            SELECT CAST(COLUMN_NAME AS CHAR) AS name,
                   CAST(COLUMN_TYPE AS CHAR) AS sql_type,
                   CAST(IS_NULLABLE AS CHAR) AS is_nullable,
                   CAST(COLUMN_DEFAULT AS CHAR) AS default_value
            FROM information_schema.COLUMNS
            WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
            ORDER BY ORDINAL_POSITION
            ",
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ColumnDescriptor::from).collect())
    }

    /// Foreign keys of `table`, keyed by referencing column
    ///
    /// A column taking part in several references keeps the first one.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails
    pub async fn foreign_keys(&self, table: &str) -> Result<ForeignKeyMap> {
        let rows = sqlx::query_as::<_, ForeignKeyRow>(
            r"
            SELECT CAST(COLUMN_NAME AS CHAR) AS column_name,
                   CAST(REFERENCED_TABLE_NAME AS CHAR) AS referenced_table,
                   CAST(REFERENCED_COLUMN_NAME AS CHAR) AS referenced_column
            FROM information_schema.KEY_COLUMN_USAGE
            WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
              AND REFERENCED_TABLE_NAME IS NOT NULL
              AND REFERENCED_COLUMN_NAME IS NOT NULL
            ORDER BY CONSTRAINT_NAME, ORDINAL_POSITION
            ",
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        let mut foreign_keys = ForeignKeyMap::new();
        for row in rows {
            foreign_keys
                .entry(row.column_name.clone())
                .or_insert_with(|| {
                    ForeignKeyDescriptor::new(
                        row.column_name,
                        row.referenced_table,
                        row.referenced_column,
                    )
                });
        }
        Ok(foreign_keys)
    }

    /// Distinct non-null values of `table.column`, ordered by the column
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails
    pub async fn distinct_values(&self, table: &str, column: &str) -> Result<Vec<String>> {
        let query = distinct_values_query(table, column);
        let values = sqlx::query_scalar::<_, String>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(values)
    }

    /// Capture `table`'s metadata, including every referenced column's values
    ///
    /// # Errors
    ///
    /// Returns error if any database query fails
    pub async fn snapshot(&self, table: &str) -> Result<SchemaSnapshot> {
        let mut snapshot = SchemaSnapshot::new(table);

        for column in self.columns(table).await? {
            snapshot = snapshot.column(column);
        }

        let foreign_keys = self.foreign_keys(table).await?;
        for fk in foreign_keys.values() {
            let values = self
                .distinct_values(&fk.referenced_table, &fk.referenced_column)
                .await?;
            snapshot = snapshot
                .foreign_key(&fk.column_name, &fk.referenced_table, &fk.referenced_column)
                .values(&fk.referenced_table, &fk.referenced_column, values);
        }

        tracing::info!(
            table,
            foreign_keys = foreign_keys.len(),
            "Captured schema snapshot"
        );
        Ok(snapshot)
    }
}

/// Quote a `MySQL` identifier with back-ticks
fn quote_identifier(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}

fn distinct_values_query(table: &str, column: &str) -> String {
    let table = quote_identifier(table);
    let column = quote_identifier(column);
    format!(
        "SELECT CAST({column} AS CHAR) AS value FROM {table} \
         WHERE {column} IS NOT NULL GROUP BY {column} ORDER BY {column}"
    )
}
