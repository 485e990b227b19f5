//! Form field types and input configuration
//!
//! Defines the input kinds, form encodings and field definitions
//! held by a [`FormModel`](super::FormModel).

use serde::{Deserialize, Serialize};

/// HTML input kinds a field can render as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Text input (default)
    #[default]
    Text,
    /// Number input
    Number,
    /// Password input (masked)
    Password,
    /// Select dropdown
    Select,
    /// Checkbox
    Checkbox,
    /// Hidden input
    Hidden,
    /// Multi-line text
    Textarea,
    /// Submit button
    Submit,
    /// Generic button
    Button,
    /// File upload
    File,
}

impl InputKind {
    /// Get the HTML type attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Password => "password",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Hidden => "hidden",
            Self::Textarea => "textarea",
            Self::Submit => "submit",
            Self::Button => "button",
            Self::File => "file",
        }
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Form body encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// `application/x-www-form-urlencoded` (default)
    #[default]
    UrlEncoded,
    /// `multipart/form-data`, required for file uploads
    Multipart,
}

impl Encoding {
    /// Get the HTML enctype attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UrlEncoded => "application/x-www-form-urlencoded",
            Self::Multipart => "multipart/form-data",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recognised extra options for a field
///
/// Only `comment` is recognised. Anything else passed through
/// [`FieldExtras::from_pairs`] is dropped with a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldExtras {
    /// Free-form annotation, typically rendered as a tooltip
    pub comment: Option<String>,
}

impl FieldExtras {
    /// Key carrying [`FieldExtras::comment`]
    pub const COMMENT_KEY: &'static str = "comment";

    /// Keys accepted by [`FieldExtras::from_pairs`]
    pub const RECOGNISED_KEYS: &'static [&'static str] = &[Self::COMMENT_KEY];

    /// Build extras from loosely typed key/value pairs
    ///
    /// # Examples
    ///
    /// ```rust
    /// use holoform::forms::FieldExtras;
    ///
    /// let extras = FieldExtras::from_pairs([("comment", "Shown on hover"), ("onclick", "x()")]);
    /// assert_eq!(extras.comment.as_deref(), Some("Shown on hover"));
    /// ```
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut extras = Self::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            if key == Self::COMMENT_KEY {
                extras.comment = Some(value.into());
            } else {
                tracing::warn!(key, "Ignoring unrecognised field option");
            }
        }
        extras
    }
}

/// A registered form field with everything a renderer needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field identifier, unique within its form
    pub field_id: String,
    /// Submission name, `form_id[field_id]` or `form_id[field_id][]`
    pub input_name: String,
    /// Input kind
    pub kind: InputKind,
    /// Current or default value
    pub value: Option<String>,
    /// Whether a value is required
    pub required: bool,
    /// CSS class(es)
    pub classes: Option<String>,
    /// Select options (empty unless `kind` is [`InputKind::Select`])
    pub options: Vec<String>,
    /// Whether the field submits multiple values
    pub multi_valued: bool,
    /// Opaque attributes passed through to rendering
    pub extra_attrs: Vec<(String, String)>,
    /// Optional annotation
    pub comment: Option<String>,
}

impl FieldDefinition {
    /// Create a field definition with no value, options or attributes
    ///
    /// `input_name` stays empty until the field is registered on a form.
    #[must_use]
    pub fn new(field_id: impl Into<String>, kind: InputKind) -> Self {
        Self {
            field_id: field_id.into(),
            input_name: String::new(),
            kind,
            value: None,
            required: false,
            classes: None,
            options: Vec::new(),
            multi_valued: false,
            extra_attrs: Vec::new(),
            comment: None,
        }
    }

    /// Submission name for a field inside the form `form_id`
    #[must_use]
    pub fn input_name_for(form_id: &str, field_id: &str, multi_valued: bool) -> String {
        if multi_valued {
            format!("{form_id}[{field_id}][]")
        } else {
            format!("{form_id}[{field_id}]")
        }
    }

    /// Apply recognised extras onto this definition
    pub fn apply_extras(&mut self, extras: FieldExtras) {
        if extras.comment.is_some() {
            self.comment = extras.comment;
        }
    }

    /// Check if this field is a select
    #[must_use]
    pub const fn is_select(&self) -> bool {
        matches!(self.kind, InputKind::Select)
    }
}
