//! Form models for HTML rendering layers
//!
//! This module provides the in-memory form representation:
//! - An insertion-ordered set of field definitions
//! - Submission names namespaced by the form ID
//! - A fluent builder for registering fields
//! - Repopulation from resubmitted values
//!
//! # Quick Start
//!
//! ```rust
//! use holoform::forms::{FormModel, InputKind};
//!
//! let mut form = FormModel::new("users").action("/users");
//! form.field("email", InputKind::Text)
//!         .required()
//!         .done()
//!     .field("password", InputKind::Password)
//!         .required()
//!         .done()
//!     .field("role_id", InputKind::Select)
//!         .options(["1", "2", "3"])
//!         .done();
//!
//! // On resubmission, repopulate with the submitted values
//! form.apply_values([("email", "you@example.com")])?;
//! # Ok::<(), holoform::error::HoloFormError>(())
//! ```
//!
//! Rendering is left to the host: [`FormModel`] serializes with serde and
//! exposes its fields in order for templates to iterate.

mod field;
mod model;

pub use field::{Encoding, FieldDefinition, FieldExtras, InputKind};
pub use model::{FieldBuilder, FormModel};
