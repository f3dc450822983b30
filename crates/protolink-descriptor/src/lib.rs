//! Descriptor input model (protobuf JSON rendering).
//!
//! This crate is the upstream boundary of protolink: it holds the already
//! parsed, already validated descriptor trees a compiler plugin receives, in
//! the JSON form produced by `buf build --as-file-descriptor-set` or by a
//! `CodeGeneratorRequest` converted with the protobuf JSON mapping.
//!
//! Why JSON?
//!
//! Custom options are encoded as extensions. Decoding them from the binary
//! wire format requires an extension-aware reflective stack, whereas the JSON
//! rendering spells them out under bracketed keys
//! (`"[template.field_meta]": {...}`), which keeps metadata lookup a plain map
//! access. See [`Options`].
//!
//! Only the subset of `descriptor.proto` needed to build a linked model is
//! represented. Absent scalars and lists decode to their protobuf defaults.

pub mod field_type;
pub mod options;

pub use field_type::{FieldLabel, FieldType};
pub use options::Options;

use serde::Deserialize;
use std::io::Read;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to parse request JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read request: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Public API
// =============================================================================

/// Parse a `CodeGeneratorRequest` rendered as JSON.
pub fn parse_request_json(text: &str) -> Result<CodeGeneratorRequest, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

/// Read and parse a `CodeGeneratorRequest` from any reader (e.g. stdin).
pub fn read_request_json<R: Read>(mut reader: R) -> Result<CodeGeneratorRequest, DecodeError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_request_json(&text)
}

/// Parse a `FileDescriptorSet` rendered as JSON.
pub fn parse_descriptor_set_json(text: &str) -> Result<FileDescriptorSet, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

// =============================================================================
// Plugin request
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeGeneratorRequest {
    /// Files the caller wants output for. Every other file in `proto_file` is
    /// present only so references into it can be resolved.
    #[serde(alias = "file_to_generate")]
    pub file_to_generate: Vec<String>,
    /// Opaque, plugin-defined parameter string.
    pub parameter: Option<String>,
    /// Every file in the compilation, dependencies before dependents.
    #[serde(alias = "proto_file")]
    pub proto_file: Vec<FileDescriptorProto>,
    #[serde(alias = "compiler_version")]
    pub compiler_version: Option<CompilerVersion>,
}

impl CodeGeneratorRequest {
    /// Lift a descriptor set into a request, marking `file_to_generate` for output.
    pub fn from_descriptor_set(set: FileDescriptorSet, file_to_generate: Vec<String>) -> Self {
        Self {
            file_to_generate,
            parameter: None,
            proto_file: set.file,
            compiler_version: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerVersion {
    pub major: i32,
    pub minor: i32,
    pub patch: i32,
    pub suffix: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileDescriptorSet {
    pub file: Vec<FileDescriptorProto>,
}

// =============================================================================
// Descriptor trees
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileDescriptorProto {
    pub name: String,
    pub package: String,
    pub dependency: Vec<String>,
    #[serde(alias = "message_type")]
    pub message_type: Vec<DescriptorProto>,
    #[serde(alias = "enum_type")]
    pub enum_type: Vec<EnumDescriptorProto>,
    pub service: Vec<ServiceDescriptorProto>,
    pub options: Options,
    #[serde(alias = "source_code_info")]
    pub source_code_info: Option<SourceCodeInfo>,
    /// `"proto2"`, `"proto3"`, or absent (which means proto2).
    pub syntax: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescriptorProto {
    pub name: String,
    pub field: Vec<FieldDescriptorProto>,
    #[serde(alias = "nested_type")]
    pub nested_type: Vec<DescriptorProto>,
    #[serde(alias = "enum_type")]
    pub enum_type: Vec<EnumDescriptorProto>,
    #[serde(alias = "oneof_decl")]
    pub oneof_decl: Vec<OneofDescriptorProto>,
    pub options: Options,
    #[serde(alias = "reserved_range")]
    pub reserved_range: Vec<ReservedRange>,
    #[serde(alias = "reserved_name")]
    pub reserved_name: Vec<String>,
}

/// Reserved field numbers, `start` inclusive and `end` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReservedRange {
    pub start: i32,
    pub end: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDescriptorProto {
    pub name: String,
    pub number: i32,
    pub label: FieldLabel,
    #[serde(rename = "type")]
    pub r#type: FieldType,
    /// Fully-qualified (leading `.`) name of the message or enum type, for
    /// reference-typed fields.
    #[serde(alias = "type_name")]
    pub type_name: Option<String>,
    #[serde(alias = "default_value")]
    pub default_value: Option<String>,
    #[serde(alias = "oneof_index")]
    pub oneof_index: Option<i32>,
    #[serde(alias = "json_name")]
    pub json_name: Option<String>,
    pub options: Options,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OneofDescriptorProto {
    pub name: String,
    pub options: Options,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnumDescriptorProto {
    pub name: String,
    pub value: Vec<EnumValueDescriptorProto>,
    pub options: Options,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnumValueDescriptorProto {
    pub name: String,
    pub number: i32,
    pub options: Options,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceDescriptorProto {
    pub name: String,
    pub method: Vec<MethodDescriptorProto>,
    pub options: Options,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MethodDescriptorProto {
    pub name: String,
    #[serde(alias = "input_type")]
    pub input_type: String,
    #[serde(alias = "output_type")]
    pub output_type: String,
    pub options: Options,
    #[serde(alias = "client_streaming")]
    pub client_streaming: bool,
    #[serde(alias = "server_streaming")]
    pub server_streaming: bool,
}

// =============================================================================
// Source info
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceCodeInfo {
    pub location: Vec<Location>,
}

/// A span of source plus the comments attached to it.
///
/// `path` locates the declaration inside the serialized `FileDescriptorProto`
/// as alternating (field number, index) pairs, e.g. `[4, 0, 2, 1]` is the
/// second field of the first message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub path: Vec<i32>,
    pub span: Vec<i32>,
    #[serde(alias = "leading_comments")]
    pub leading_comments: Option<String>,
    #[serde(alias = "trailing_comments")]
    pub trailing_comments: Option<String>,
    #[serde(alias = "leading_detached_comments")]
    pub leading_detached_comments: Vec<String>,
}
