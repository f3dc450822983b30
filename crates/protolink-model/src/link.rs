//! Cross-reference linking: textual type names to registry identifiers.
//!
//! Type names in a plugin request are always fully qualified (leading `.`),
//! and type identifiers are built to equal those names (see [`crate::ids`]).
//! Linking is therefore a conversion, never a scope search.

use protolink_descriptor::{FieldDescriptorProto, FieldType, MethodDescriptorProto};

use crate::error::{IoRole, LinkError};
use crate::ids::{EnumId, MessageId, MethodId};
use crate::registry::Registry;

/// What a field's declared type points at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeRef {
    /// Scalar (or a group, whose body is never linked).
    #[default]
    Scalar,
    Message(MessageId),
    Enum(EnumId),
}

impl TypeRef {
    pub fn message(&self) -> Option<&MessageId> {
        match self {
            TypeRef::Message(id) => Some(id),
            _ => None,
        }
    }

    pub fn enumeration(&self) -> Option<&EnumId> {
        match self {
            TypeRef::Enum(id) => Some(id),
            _ => None,
        }
    }
}

/// Link a field's `type_name`.
///
/// The referenced type may be declared later in the request (or not at all
/// when the request is partial), so the identifier is recorded without
/// checking; accessors resolve it lazily and yield `None` on a miss.
pub(crate) fn field_type(desc: &FieldDescriptorProto) -> TypeRef {
    let Some(type_name) = desc.type_name.as_deref().filter(|s| !s.is_empty()) else {
        return TypeRef::Scalar;
    };
    match desc.r#type {
        FieldType::Message => TypeRef::Message(MessageId::from(type_name)),
        FieldType::Enum => TypeRef::Enum(EnumId::from(type_name)),
        _ => TypeRef::Scalar,
    }
}

/// Link a method's input and output types, which must already be registered.
///
/// protoc orders files so dependencies precede dependents, so by the time a
/// service is registered every message it can name exists. A miss means the
/// request is malformed.
pub(crate) fn method_types(
    registry: &Registry,
    method: &MethodId,
    desc: &MethodDescriptorProto,
) -> Result<(MessageId, MessageId), LinkError> {
    let input = resolve_message(registry, method, IoRole::Input, &desc.input_type)?;
    let output = resolve_message(registry, method, IoRole::Output, &desc.output_type)?;
    Ok((input, output))
}

fn resolve_message(
    registry: &Registry,
    method: &MethodId,
    role: IoRole,
    type_name: &str,
) -> Result<MessageId, LinkError> {
    let id = MessageId::from(type_name);
    if registry.messages.contains(&id) {
        Ok(id)
    } else {
        Err(LinkError::UnresolvedMethodType {
            method: method.clone(),
            role,
            type_name: type_name.to_string(),
            known_messages: registry.messages.len(),
        })
    }
}
