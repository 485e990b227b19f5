//! holoform: form models generated from database table schemas
//!
//! holoform builds an in-memory representation of an HTML form and can
//! populate it by introspecting a table's columns and foreign keys:
//! - **forms**: the ordered form model with a fluent registration API
//! - **mapper**: column and foreign-key metadata to field definitions
//! - **schema**: metadata providers, including live `MySQL` introspection
//!
//! Rendering is left to the host application. The form model serializes
//! with serde and exposes its fields in order.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use holoform::prelude::*;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = HoloFormConfig::load_for_service("my-app")?;
//! let schema = MySqlSchema::connect_lazy(&config.database)?;
//! let snapshot = schema.snapshot("users").await?;
//!
//! let mut form = FormModel::from_settings("users", &config.forms);
//! mapper::fields_from_source(&mut form, &snapshot, "users")?;
//!
//! // Later, repopulate from the resubmitted values
//! form.apply_values([("email", "you@example.com")])?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod forms;
pub mod mapper;
pub mod observability;
pub mod schema;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use holoform::prelude::*;
    //! ```

    // Form model
    pub use crate::forms::{
        Encoding, FieldBuilder, FieldDefinition, FieldExtras, FormModel, InputKind,
    };

    // Mapping
    pub use crate::mapper::{self, fields_from_source, infer_input_kind, map_columns_to_form};

    // Schema metadata
    pub use crate::schema::{
        ColumnDescriptor, Driver, ForeignKeyDescriptor, ForeignKeyMap, MySqlSchema, SchemaSnapshot,
        SchemaSource,
    };

    // Configuration
    pub use crate::config::{DatabaseSettings, FormSettings, HoloFormConfig};

    // Error types
    pub use crate::error::{HoloFormError, Result};
}
