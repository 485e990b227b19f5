//! Form model with a fluent registration API
//!
//! A [`FormModel`] is an insertion-ordered collection of
//! [`FieldDefinition`]s plus the attributes of the `<form>` element itself.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::field::{Encoding, FieldDefinition, FieldExtras, InputKind};
use crate::config::FormSettings;
use crate::error::{HoloFormError, Result};

/// In-memory representation of an HTML form
///
/// # Examples
///
/// ```rust
/// use holoform::forms::{Encoding, FormModel, InputKind};
///
/// let mut form = FormModel::new("userUploadForm");
/// form.field("csvFile", InputKind::File)
///         .done()
///     .field("b2bUser", InputKind::Checkbox)
///         .value("1")
///         .done()
///     .field("submit", InputKind::Submit)
///         .value("Submit")
///         .done()
///     .set_encoding(Encoding::Multipart);
///
/// assert_eq!(form.len(), 3);
/// assert_eq!(form.get("csvFile").unwrap().input_name, "userUploadForm[csvFile]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormModel {
    /// Form ID, namespaces every field's input name
    form_id: String,
    /// HTTP method
    pub method: String,
    /// Form action URL
    pub action: String,
    /// CSS classes
    pub classes: Option<String>,
    /// Custom attributes for the form element
    pub extra_attrs: Vec<(String, String)>,
    /// Body encoding
    encoding: Encoding,
    /// Registered fields in rendering order
    fields: IndexMap<String, FieldDefinition>,
}

impl Default for FormModel {
    fn default() -> Self {
        Self::new("form")
    }
}

impl FormModel {
    /// Create an empty form posting to the current URL
    #[must_use]
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            method: "POST".into(),
            action: String::new(),
            classes: None,
            extra_attrs: Vec::new(),
            encoding: Encoding::default(),
            fields: IndexMap::new(),
        }
    }

    /// Create an empty form using configured defaults
    #[must_use]
    pub fn from_settings(form_id: impl Into<String>, settings: &FormSettings) -> Self {
        Self {
            method: settings.method.clone(),
            action: settings.action.clone(),
            classes: settings.classes.clone(),
            encoding: settings.encoding,
            ..Self::new(form_id)
        }
    }

    /// Set the HTTP method
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the action URL
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Set the form CSS class
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes = Some(class.into());
        self
    }

    /// Add a custom attribute to the form element
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_attrs.push((name.into(), value.into()));
        self
    }

    /// Set the body encoding
    pub fn set_encoding(&mut self, encoding: Encoding) -> &mut Self {
        self.encoding = encoding;
        self
    }

    /// Form ID
    #[must_use]
    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// Body encoding
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Start registering a field; finish with [`FieldBuilder::done`]
    pub fn field(&mut self, field_id: impl Into<String>, kind: InputKind) -> FieldBuilder<'_> {
        FieldBuilder::new(self, FieldDefinition::new(field_id, kind))
    }

    /// Register a pre-built field
    ///
    /// The input name is derived from this form's ID. Registering an ID that
    /// already exists replaces that definition without moving it. Options on
    /// a non-select field are discarded.
    pub fn register_field(&mut self, mut field: FieldDefinition) -> &mut Self {
        field.input_name =
            FieldDefinition::input_name_for(&self.form_id, &field.field_id, field.multi_valued);

        if !field.is_select() && !field.options.is_empty() {
            tracing::warn!(
                form_id = %self.form_id,
                field_id = %field.field_id,
                kind = %field.kind,
                "Discarding options on a non-select field"
            );
            field.options.clear();
        }

        self.fields.insert(field.field_id.clone(), field);
        self
    }

    /// Overwrite field values from a resubmitted payload
    ///
    /// Every key must name a registered field. The payload is checked in full
    /// before anything is written, so on error no value has changed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use holoform::forms::{FormModel, InputKind};
    ///
    /// let mut form = FormModel::new("users");
    /// form.field("age", InputKind::Number).value("18").done();
    ///
    /// form.apply_values(BTreeMap::from([("age", "21")])).unwrap();
    /// assert_eq!(form.get("age").unwrap().value.as_deref(), Some("21"));
    ///
    /// assert!(form.apply_values([("unknown", "x")]).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`HoloFormError::UnknownField`] naming the first key, in
    /// submission order, that has no registered field.
    pub fn apply_values<I, K, V>(&mut self, submission: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut updates = Vec::new();
        for (key, value) in submission {
            let Some(index) = self.fields.get_index_of(key.as_ref()) else {
                return Err(HoloFormError::UnknownField {
                    field_id: key.as_ref().to_string(),
                });
            };
            updates.push((index, value.into()));
        }

        for (index, value) in updates {
            if let Some((_, field)) = self.fields.get_index_mut(index) {
                field.value = Some(value);
            }
        }
        Ok(())
    }

    /// Get a field by ID
    #[must_use]
    pub fn get(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields.get(field_id)
    }

    /// Check if a field is registered
    #[must_use]
    pub fn contains(&self, field_id: &str) -> bool {
        self.fields.contains_key(field_id)
    }

    /// Iterate over fields in rendering order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    /// Field IDs in rendering order
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of registered fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// Field Builder
// =============================================================================

/// Builder for a single field, returned by [`FormModel::field`]
pub struct FieldBuilder<'a> {
    form: &'a mut FormModel,
    field: FieldDefinition,
}

impl<'a> FieldBuilder<'a> {
    const fn new(form: &'a mut FormModel, field: FieldDefinition) -> Self {
        Self { form, field }
    }

    /// Set the current value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.field.value = Some(value.into());
        self
    }

    /// Set the value from an optional source, such as a column default
    #[must_use]
    pub fn maybe_value(mut self, value: Option<impl Into<String>>) -> Self {
        self.field.value = value.map(Into::into);
        self
    }

    /// Mark field as required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.field.required = true;
        self
    }

    /// Set CSS class
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.field.classes = Some(class.into());
        self
    }

    /// Add a select option
    #[must_use]
    pub fn option(mut self, option: impl Into<String>) -> Self {
        self.field.options.push(option.into());
        self
    }

    /// Add several select options
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field.options.extend(options.into_iter().map(Into::into));
        self
    }

    /// Submit multiple values (appends `[]` to the input name)
    #[must_use]
    pub const fn multiple(mut self) -> Self {
        self.field.multi_valued = true;
        self
    }

    /// Add a custom attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field.extra_attrs.push((name.into(), value.into()));
        self
    }

    /// Set the comment annotation
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.field.comment = Some(comment.into());
        self
    }

    /// Apply recognised extra options
    #[must_use]
    pub fn extras(mut self, extras: FieldExtras) -> Self {
        self.field.apply_extras(extras);
        self
    }

    /// Finish building this field and return to the form
    pub fn done(self) -> &'a mut FormModel {
        self.form.register_field(self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_form_model_defaults() {
        let form = FormModel::default();
        assert_eq!(form.form_id(), "form");
        assert_eq!(form.method, "POST");
        assert_eq!(form.action, "");
        assert_eq!(form.encoding(), Encoding::UrlEncoded);
        assert!(form.is_empty());
    }

    #[test]
    fn test_form_attributes() {
        let form = FormModel::new("login")
            .method("GET")
            .action("/search")
            .class("form-styled")
            .attr("novalidate", "");

        assert_eq!(form.method, "GET");
        assert_eq!(form.action, "/search");
        assert_eq!(form.classes.as_deref(), Some("form-styled"));
        assert_eq!(form.extra_attrs, vec![("novalidate".to_string(), String::new())]);
    }

    #[test]
    fn test_field_builder() {
        let mut form = FormModel::new("users");
        form.field("email", InputKind::Text)
            .value("a@b.c")
            .required()
            .class("required")
            .comment("Login address")
            .done();

        let field = form.get("email").unwrap();
        assert_eq!(field.input_name, "users[email]");
        assert_eq!(field.value.as_deref(), Some("a@b.c"));
        assert!(field.required);
        assert_eq!(field.classes.as_deref(), Some("required"));
        assert_eq!(field.comment.as_deref(), Some("Login address"));
    }

    #[test]
    fn test_maybe_value() {
        let default: Option<String> = None;
        let mut form = FormModel::new("users");
        form.field("nickname", InputKind::Text)
            .value("x")
            .maybe_value(default)
            .done()
            .field("age", InputKind::Number)
            .maybe_value(Some("18"))
            .done();

        assert!(form.get("nickname").unwrap().value.is_none());
        assert_eq!(form.get("age").unwrap().value.as_deref(), Some("18"));
    }

    #[test]
    fn test_multiple_appends_brackets() {
        let mut form = FormModel::new("users");
        form.field("tags", InputKind::Select)
            .options(["a", "b"])
            .multiple()
            .done();

        assert_eq!(form.get("tags").unwrap().input_name, "users[tags][]");
    }

    #[test]
    fn test_reregister_keeps_position() {
        let mut form = FormModel::new("f");
        form.field("a", InputKind::Text)
            .done()
            .field("b", InputKind::Text)
            .done()
            .field("c", InputKind::Text)
            .done()
            .field("a", InputKind::Number)
            .value("1")
            .done();

        let ids: Vec<_> = form.field_ids().collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        let a = form.get("a").unwrap();
        assert_eq!(a.kind, InputKind::Number);
        assert_eq!(a.value.as_deref(), Some("1"));
    }

    #[test]
    fn test_options_dropped_on_non_select() {
        let mut form = FormModel::new("f");
        form.field("name", InputKind::Text).option("x").done();
        assert!(form.get("name").unwrap().options.is_empty());
    }

    #[test]
    fn test_register_field_overwrites_input_name() {
        let mut field = FieldDefinition::new("age", InputKind::Number);
        field.input_name = "bogus".into();

        let mut form = FormModel::new("people");
        form.register_field(field);
        assert_eq!(form.get("age").unwrap().input_name, "people[age]");
    }

    #[test]
    fn test_apply_values_updates_only_named_fields() {
        let mut form = FormModel::new("users");
        form.field("age", InputKind::Number)
            .value("18")
            .done()
            .field("name", InputKind::Text)
            .value("Ann")
            .done();

        form.apply_values(HashMap::from([("age".to_string(), "21".to_string())]))
            .unwrap();

        assert_eq!(form.get("age").unwrap().value.as_deref(), Some("21"));
        assert_eq!(form.get("name").unwrap().value.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_apply_values_unknown_field_changes_nothing() {
        let mut form = FormModel::new("users");
        form.field("age", InputKind::Number).value("18").done();

        let err = form
            .apply_values([("age", "30"), ("unknown", "x")])
            .unwrap_err();

        assert!(matches!(
            err,
            HoloFormError::UnknownField { ref field_id } if field_id == "unknown"
        ));
        assert_eq!(form.get("age").unwrap().value.as_deref(), Some("18"));
    }

    #[test]
    fn test_set_encoding() {
        let mut form = FormModel::new("upload");
        form.set_encoding(Encoding::Multipart);
        assert_eq!(form.encoding(), Encoding::Multipart);
    }

    #[test]
    fn test_from_settings() {
        let settings = FormSettings {
            method: "PUT".into(),
            action: "/save".into(),
            encoding: Encoding::Multipart,
            classes: Some("holo".into()),
        };
        let form = FormModel::from_settings("users", &settings);
        assert_eq!(form.form_id(), "users");
        assert_eq!(form.method, "PUT");
        assert_eq!(form.action, "/save");
        assert_eq!(form.encoding(), Encoding::Multipart);
        assert_eq!(form.classes.as_deref(), Some("holo"));
    }
}
