//! Identifiers and the namespace rules that derive them.
//!
//! Every entity is keyed by a string derived from its enclosing scope:
//!
//! | entity              | identifier                         |
//! |---------------------|------------------------------------|
//! | file                | `.` package `:` file name          |
//! | root message / enum | `.` package `.` name               |
//! | nested message/enum | parent id `.` name                 |
//! | service             | `.` package `.` name               |
//! | field / oneof       | message id `:` name                |
//! | enum value          | enum id `:` name                   |
//! | method              | service id `:` name                |
//!
//! Type identifiers coincide with the fully-qualified names protoc writes into
//! `type_name`, so linking a reference is a lookup, not a search. Members use
//! `:` so a field can never collide with a nested type of the same name.

use std::borrow::Borrow;
use std::fmt;

macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(String);

            impl $name {
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl From<String> for $name {
                fn from(s: String) -> Self {
                    Self(s)
                }
            }

            impl From<&str> for $name {
                fn from(s: &str) -> Self {
                    Self(s.to_string())
                }
            }

            impl Borrow<str> for $name {
                fn borrow(&self) -> &str {
                    &self.0
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    };
}

define_id!(
    /// `.pkg:path/to/file.proto`
    FileId,
    /// `.pkg.Outer.Inner`
    MessageId,
    /// `.pkg.Outer:field_name`
    FieldId,
    /// `.pkg.Outer.Kind`
    EnumId,
    /// `.pkg.Outer.Kind:VALUE`
    EnumValueId,
    /// `.pkg.Outer:choice`
    OneofId,
    /// `.pkg.Service`
    ServiceId,
    /// `.pkg.Service:Method`
    MethodId,
);

pub(crate) fn file_id(package: &str, file_name: &str) -> FileId {
    FileId(format!(".{package}:{file_name}"))
}

/// Identifier of a top-level message, enum, or service.
///
/// An empty package yields `.Name`, matching the fully-qualified form protoc
/// emits for package-less files.
pub(crate) fn root_scoped(package: &str, name: &str) -> String {
    if package.is_empty() {
        format!(".{name}")
    } else {
        format!(".{package}.{name}")
    }
}

pub(crate) fn nested_scoped(parent: &str, name: &str) -> String {
    format!("{parent}.{name}")
}

pub(crate) fn member_of(parent: &str, name: &str) -> String {
    format!("{parent}:{name}")
}
