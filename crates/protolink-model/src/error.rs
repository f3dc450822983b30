use std::fmt;

use crate::ids::{FieldId, MethodId};

/// Which side of a method signature a type reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoRole {
    Input,
    Output,
}

impl fmt::Display for IoRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoRole::Input => f.write_str("input"),
            IoRole::Output => f.write_str("output"),
        }
    }
}

/// Internal-consistency failures. Any of these aborts the whole build: the
/// request is malformed upstream and no partial model is returned.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("method {method}: {role} type {type_name} is not a registered message ({known_messages} known)")]
    UnresolvedMethodType {
        method: MethodId,
        role: IoRole,
        type_name: String,
        known_messages: usize,
    },

    #[error("field {field}: oneof index {index} out of range ({declared} declared)")]
    OneofIndexOutOfRange {
        field: FieldId,
        index: i32,
        declared: usize,
    },

    #[error("duplicate {kind} identifier {id}")]
    DuplicateIdentifier { kind: &'static str, id: String },
}
