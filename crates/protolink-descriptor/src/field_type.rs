//! `FieldDescriptorProto.Type` / `.Label`.
//!
//! The JSON rendering of a descriptor may spell enum values either by name
//! (`"TYPE_STRING"`) or by number (`9`); both decode to the same variant.

use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum EnumRepr {
    Name(String),
    Number(i32),
}

// =============================================================================
// Field type
// =============================================================================

/// Declared type of a field.
///
/// `Double` is the default because it is the first declared value, which is what
/// protobuf yields for an absent enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "EnumRepr")]
pub enum FieldType {
    #[default]
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

impl FieldType {
    pub const ALL: [FieldType; 18] = [
        FieldType::Double,
        FieldType::Float,
        FieldType::Int64,
        FieldType::Uint64,
        FieldType::Int32,
        FieldType::Fixed64,
        FieldType::Fixed32,
        FieldType::Bool,
        FieldType::String,
        FieldType::Group,
        FieldType::Message,
        FieldType::Bytes,
        FieldType::Uint32,
        FieldType::Enum,
        FieldType::Sfixed32,
        FieldType::Sfixed64,
        FieldType::Sint32,
        FieldType::Sint64,
    ];

    /// Wire number, symbolic descriptor name, and `.proto` keyword.
    fn info(self) -> (i32, &'static str, &'static str) {
        match self {
            FieldType::Double => (1, "TYPE_DOUBLE", "double"),
            FieldType::Float => (2, "TYPE_FLOAT", "float"),
            FieldType::Int64 => (3, "TYPE_INT64", "int64"),
            FieldType::Uint64 => (4, "TYPE_UINT64", "uint64"),
            FieldType::Int32 => (5, "TYPE_INT32", "int32"),
            FieldType::Fixed64 => (6, "TYPE_FIXED64", "fixed64"),
            FieldType::Fixed32 => (7, "TYPE_FIXED32", "fixed32"),
            FieldType::Bool => (8, "TYPE_BOOL", "bool"),
            FieldType::String => (9, "TYPE_STRING", "string"),
            FieldType::Group => (10, "TYPE_GROUP", "group"),
            FieldType::Message => (11, "TYPE_MESSAGE", "message"),
            FieldType::Bytes => (12, "TYPE_BYTES", "bytes"),
            FieldType::Uint32 => (13, "TYPE_UINT32", "uint32"),
            FieldType::Enum => (14, "TYPE_ENUM", "enum"),
            FieldType::Sfixed32 => (15, "TYPE_SFIXED32", "sfixed32"),
            FieldType::Sfixed64 => (16, "TYPE_SFIXED64", "sfixed64"),
            FieldType::Sint32 => (17, "TYPE_SINT32", "sint32"),
            FieldType::Sint64 => (18, "TYPE_SINT64", "sint64"),
        }
    }

    pub fn number(self) -> i32 {
        self.info().0
    }

    /// Symbolic descriptor name, e.g. `TYPE_STRING`.
    pub fn name(self) -> &'static str {
        self.info().1
    }

    /// Keyword used in `.proto` source, e.g. `string`.
    pub fn keyword(self) -> &'static str {
        self.info().2
    }

    pub fn from_number(number: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.number() == number)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl TryFrom<EnumRepr> for FieldType {
    type Error = String;

    fn try_from(repr: EnumRepr) -> Result<Self, Self::Error> {
        match repr {
            EnumRepr::Name(name) => {
                Self::from_name(&name).ok_or_else(|| format!("unknown field type `{name}`"))
            }
            EnumRepr::Number(n) => {
                Self::from_number(n).ok_or_else(|| format!("unknown field type number {n}"))
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Field label
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "EnumRepr")]
pub enum FieldLabel {
    #[default]
    Optional,
    Required,
    Repeated,
}

impl FieldLabel {
    pub fn number(self) -> i32 {
        match self {
            FieldLabel::Optional => 1,
            FieldLabel::Required => 2,
            FieldLabel::Repeated => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldLabel::Optional => "LABEL_OPTIONAL",
            FieldLabel::Required => "LABEL_REQUIRED",
            FieldLabel::Repeated => "LABEL_REPEATED",
        }
    }

    pub fn from_number(number: i32) -> Option<Self> {
        match number {
            1 => Some(FieldLabel::Optional),
            2 => Some(FieldLabel::Required),
            3 => Some(FieldLabel::Repeated),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "LABEL_OPTIONAL" => Some(FieldLabel::Optional),
            "LABEL_REQUIRED" => Some(FieldLabel::Required),
            "LABEL_REPEATED" => Some(FieldLabel::Repeated),
            _ => None,
        }
    }
}

impl TryFrom<EnumRepr> for FieldLabel {
    type Error = String;

    fn try_from(repr: EnumRepr) -> Result<Self, Self::Error> {
        match repr {
            EnumRepr::Name(name) => {
                Self::from_name(&name).ok_or_else(|| format!("unknown field label `{name}`"))
            }
            EnumRepr::Number(n) => {
                Self::from_number(n).ok_or_else(|| format!("unknown field label number {n}"))
            }
        }
    }
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
