//! Schema-to-form mapping
//!
//! Turns column and foreign-key metadata into field definitions:
//! - Columns with a foreign key become selects listing the referenced values
//! - Columns named like `password` or `token` become password inputs
//! - `varchar` columns become text inputs, `int` columns number inputs
//! - Non-nullable columns are required; column defaults become values
//!
//! Any other SQL type is rejected with
//! [`HoloFormError::UnsupportedType`] so new types get handled explicitly.
//!
//! # Example
//!
//! ```rust
//! use holoform::forms::{FormModel, InputKind};
//! use holoform::mapper;
//! use holoform::schema::{ColumnDescriptor, SchemaSnapshot};
//!
//! let snapshot = SchemaSnapshot::new("users")
//!     .column(ColumnDescriptor::new("email", "varchar(255)", false))
//!     .column(ColumnDescriptor::new("password", "varchar(60)", false))
//!     .column(ColumnDescriptor::new("role_id", "int(10) unsigned", false))
//!     .foreign_key("role_id", "roles", "id")
//!     .values("roles", "id", ["1", "2", "3"]);
//!
//! let mut form = FormModel::new("users");
//! mapper::fields_from_source(&mut form, &snapshot, "users")?;
//!
//! assert_eq!(form.get("email").unwrap().kind, InputKind::Text);
//! assert_eq!(form.get("password").unwrap().kind, InputKind::Password);
//! assert_eq!(form.get("role_id").unwrap().options, vec!["1", "2", "3"]);
//! # Ok::<(), holoform::error::HoloFormError>(())
//! ```

use crate::error::{HoloFormError, Result};
use crate::forms::{FieldDefinition, FormModel, InputKind};
use crate::schema::{ColumnDescriptor, ForeignKeyMap, SchemaSource};

/// Name fragments that mark a column as secret
pub const SECRET_NAME_MARKERS: &[&str] = &["password", "token"];

/// Class applied to fields of non-nullable columns
pub const REQUIRED_CLASS: &str = "required";

/// Infer the input kind for a column without a foreign key
///
/// The name check runs first: a `varchar` column named `password` is still
/// a password input. Matching is case-sensitive substring matching.
///
/// # Errors
///
/// Returns [`HoloFormError::UnsupportedType`] naming `sql_type` when no rule
/// matches.
///
/// # Examples
///
/// ```rust
/// use holoform::forms::InputKind;
/// use holoform::mapper::infer_input_kind;
///
/// assert_eq!(infer_input_kind("varchar(60)", "password").unwrap(), InputKind::Password);
/// assert_eq!(infer_input_kind("varchar(255)", "email").unwrap(), InputKind::Text);
/// assert_eq!(infer_input_kind("int(11)", "age").unwrap(), InputKind::Number);
/// assert!(infer_input_kind("datetime", "created_at").is_err());
/// ```
pub fn infer_input_kind(sql_type: &str, field_name: &str) -> Result<InputKind> {
    if SECRET_NAME_MARKERS
        .iter()
        .any(|marker| field_name.contains(marker))
    {
        return Ok(InputKind::Password);
    }

    if sql_type.contains("varchar") {
        Ok(InputKind::Text)
    } else if sql_type.contains("int") {
        Ok(InputKind::Number)
    } else {
        Err(HoloFormError::UnsupportedType {
            sql_type: sql_type.to_string(),
        })
    }
}

/// Register one field per column on `form`, in column order
///
/// `distinct_values` is called with the referenced table and column of every
/// column that has a foreign key; its result becomes the select options.
///
/// Mapping stops at the first failing column. Fields registered for earlier
/// columns stay on `form`: on error, at least one field may already be
/// registered.
///
/// # Errors
///
/// Returns [`HoloFormError::UnsupportedType`] for a column whose type has no
/// mapping, or whatever error `distinct_values` returns.
pub fn map_columns_to_form<'f, F>(
    form: &'f mut FormModel,
    columns: &[ColumnDescriptor],
    foreign_keys: &ForeignKeyMap,
    mut distinct_values: F,
) -> Result<&'f mut FormModel>
where
    F: FnMut(&str, &str) -> Result<Vec<String>>,
{
    for column in columns {
        let (kind, options) = match foreign_keys.get(&column.name) {
            Some(fk) => (
                InputKind::Select,
                distinct_values(&fk.referenced_table, &fk.referenced_column)?,
            ),
            None => (infer_input_kind(&column.sql_type, &column.name)?, Vec::new()),
        };

        let required = !column.nullable;
        tracing::debug!(
            form_id = form.form_id(),
            column = %column.name,
            sql_type = %column.sql_type,
            %kind,
            required,
            "Mapped column"
        );

        let mut field = FieldDefinition::new(&column.name, kind);
        field.value.clone_from(&column.default_value);
        field.required = required;
        field.options = options;
        if required {
            field.classes = Some(REQUIRED_CLASS.to_string());
        }
        form.register_field(field);
    }

    tracing::info!(
        form_id = form.form_id(),
        columns = columns.len(),
        "Mapped columns to form fields"
    );
    Ok(form)
}

/// Register fields for every column of `table` as described by `source`
///
/// # Errors
///
/// Returns any error from `source`, or from [`map_columns_to_form`].
pub fn fields_from_source<'f, S>(
    form: &'f mut FormModel,
    source: &S,
    table: &str,
) -> Result<&'f mut FormModel>
where
    S: SchemaSource + ?Sized,
{
    let columns = source.columns(table)?;
    let foreign_keys = source.foreign_keys(table)?;
    map_columns_to_form(form, &columns, &foreign_keys, |ref_table, ref_column| {
        source.distinct_values(ref_table, ref_column)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ForeignKeyDescriptor;

    fn no_lookup(_: &str, _: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    #[test]
    fn test_password_name_beats_varchar() {
        assert_eq!(infer_input_kind("varchar(60)", "password").unwrap(), InputKind::Password);
        assert_eq!(
            infer_input_kind("varchar(100)", "remember_token").unwrap(),
            InputKind::Password
        );
        assert_eq!(infer_input_kind("int(11)", "token_count").unwrap(), InputKind::Password);
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        assert_eq!(infer_input_kind("varchar(60)", "Password").unwrap(), InputKind::Text);
    }

    #[test]
    fn test_varchar_checked_before_int() {
        assert_eq!(infer_input_kind("varchar(11)", "name").unwrap(), InputKind::Text);
        assert_eq!(infer_input_kind("bigint(20) unsigned", "id").unwrap(), InputKind::Number);
        assert_eq!(infer_input_kind("tinyint(1)", "active").unwrap(), InputKind::Number);
    }

    #[test]
    fn test_unsupported_type() {
        let err = infer_input_kind("enum('a','b')", "status").unwrap_err();
        assert!(matches!(
            err,
            HoloFormError::UnsupportedType { ref sql_type } if sql_type == "enum('a','b')"
        ));
    }

    #[test]
    fn test_text_column_is_required_when_not_null() {
        let mut form = FormModel::new("users");
        let columns = [ColumnDescriptor::new("email", "varchar(255)", false)];
        map_columns_to_form(&mut form, &columns, &ForeignKeyMap::new(), no_lookup).unwrap();

        let field = form.get("email").unwrap();
        assert_eq!(field.kind, InputKind::Text);
        assert!(field.required);
        assert_eq!(field.classes.as_deref(), Some(REQUIRED_CLASS));
        assert!(field.value.is_none());
    }

    #[test]
    fn test_nullable_int_with_default() {
        let mut form = FormModel::new("users");
        let columns = [ColumnDescriptor::new("age", "int(11)", true).with_default("18")];
        map_columns_to_form(&mut form, &columns, &ForeignKeyMap::new(), no_lookup).unwrap();

        let field = form.get("age").unwrap();
        assert_eq!(field.kind, InputKind::Number);
        assert!(!field.required);
        assert!(field.classes.is_none());
        assert_eq!(field.value.as_deref(), Some("18"));
    }

    #[test]
    fn test_foreign_key_becomes_select() {
        let mut form = FormModel::new("users");
        let columns = [ColumnDescriptor::new("role_id", "int(10) unsigned", false)];
        let foreign_keys = ForeignKeyMap::from([(
            "role_id".to_string(),
            ForeignKeyDescriptor::new("role_id", "roles", "id"),
        )]);

        let mut calls = Vec::new();
        map_columns_to_form(&mut form, &columns, &foreign_keys, |table, column| {
            calls.push(format!("{table}.{column}"));
            Ok(vec!["1".into(), "2".into(), "3".into()])
        })
        .unwrap();

        assert_eq!(calls, vec!["roles.id"]);
        let field = form.get("role_id").unwrap();
        assert_eq!(field.kind, InputKind::Select);
        assert_eq!(field.options, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_foreign_key_skips_type_inference() {
        let mut form = FormModel::new("posts");
        let columns = [ColumnDescriptor::new("status", "enum('draft','live')", false)];
        let foreign_keys = ForeignKeyMap::from([(
            "status".to_string(),
            ForeignKeyDescriptor::new("status", "statuses", "name"),
        )]);

        map_columns_to_form(&mut form, &columns, &foreign_keys, |_, _| {
            Ok(vec!["draft".into(), "live".into()])
        })
        .unwrap();

        assert_eq!(form.get("status").unwrap().kind, InputKind::Select);
    }

    #[test]
    fn test_failure_keeps_earlier_fields() {
        let mut form = FormModel::new("users");
        let columns = [
            ColumnDescriptor::new("name", "varchar(50)", false),
            ColumnDescriptor::new("born_at", "datetime", true),
            ColumnDescriptor::new("age", "int(11)", true),
        ];

        let err = map_columns_to_form(&mut form, &columns, &ForeignKeyMap::new(), no_lookup)
            .unwrap_err();

        assert!(matches!(
            err,
            HoloFormError::UnsupportedType { ref sql_type } if sql_type == "datetime"
        ));
        assert_eq!(form.field_ids().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_lookup_error_propagates() {
        let mut form = FormModel::new("users");
        let columns = [ColumnDescriptor::new("role_id", "int(11)", false)];
        let foreign_keys = ForeignKeyMap::from([(
            "role_id".to_string(),
            ForeignKeyDescriptor::new("role_id", "roles", "id"),
        )]);

        let err = map_columns_to_form(&mut form, &columns, &foreign_keys, |table, _| {
            Err(HoloFormError::UnknownTable {
                table: table.to_string(),
            })
        })
        .unwrap_err();

        assert!(matches!(err, HoloFormError::UnknownTable { .. }));
        assert!(form.is_empty());
    }

    #[test]
    fn test_input_names_use_form_id() {
        let mut form = FormModel::new("signup");
        let columns = [ColumnDescriptor::new("email", "varchar(255)", false)];
        map_columns_to_form(&mut form, &columns, &ForeignKeyMap::new(), no_lookup).unwrap();

        assert_eq!(form.get("email").unwrap().input_name, "signup[email]");
    }
}
