//! Errors of the form lifecycle.
//!
//! Field validation itself never fails: bad input only makes a field
//! invalid. Errors arise when the form is asked to do something its current
//! state does not allow, such as submitting while a field is invalid, or
//! when a caller names a field that does not exist.

use crate::field::FieldKind;
use crate::form::FormStatus;
use std::fmt;

/// Errors returned by [`crate::CardEntryForm`] lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// Submission was requested while some fields are not valid.
    NotReady {
        /// The fields that currently fail validation, in declared order.
        invalid: Vec<FieldKind>,
    },

    /// The form was already completed or cancelled.
    Closed(FormStatus),

    /// A field name did not match any form field.
    UnknownField(String),
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady { invalid } => {
                let names: Vec<&str> = invalid.iter().map(|k| k.name()).collect();
                write!(f, "form is not ready: invalid {}", names.join(", "))
            }
            Self::Closed(status) => write!(f, "form is already {}", status),
            Self::UnknownField(name) => write!(f, "unknown field: {:?}", name),
        }
    }
}

impl std::error::Error for EntryError {}
