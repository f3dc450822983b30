//! Source comments, correlated to declarations by structural path.
//!
//! `SourceCodeInfo` records comments against a path of (field number, index)
//! pairs into the serialized `FileDescriptorProto`. Each registration step in
//! ingest extends its parent's path with the `descriptor.proto` field number of
//! the list it is walking, so the numbers below must match that file exactly.

use protolink_descriptor::SourceCodeInfo;
use std::collections::HashMap;
use std::fmt;

// `FileDescriptorProto`
pub const FILE_PACKAGE: i32 = 2;
pub const FILE_MESSAGE_TYPE: i32 = 4;
pub const FILE_ENUM_TYPE: i32 = 5;
pub const FILE_SERVICE: i32 = 6;

// `DescriptorProto`
pub const MESSAGE_FIELD: i32 = 2;
pub const MESSAGE_NESTED_TYPE: i32 = 3;
pub const MESSAGE_ENUM_TYPE: i32 = 4;
pub const MESSAGE_ONEOF_DECL: i32 = 8;

// `EnumDescriptorProto`
pub const ENUM_VALUE: i32 = 2;

// `ServiceDescriptorProto`
pub const SERVICE_METHOD: i32 = 2;

/// Comments attached to one declaration. All fields are empty when the
/// declaration has no recorded comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    pub leading: String,
    pub trailing: String,
    pub leading_detached: Vec<String>,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty() && self.leading_detached.is_empty()
    }
}

impl fmt::Display for Comments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.leading)
    }
}

/// Structural path of a declaration inside its file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourcePath(Vec<i32>);

impl SourcePath {
    pub fn root(field_number: i32) -> Self {
        Self(vec![field_number])
    }

    pub fn element(field_number: i32, index: usize) -> Self {
        Self(vec![field_number, index as i32])
    }

    /// Path of the `index`-th element of list `field_number` under `self`.
    pub fn child(&self, field_number: i32, index: usize) -> Self {
        let mut parts = Vec::with_capacity(self.0.len() + 2);
        parts.extend_from_slice(&self.0);
        parts.push(field_number);
        parts.push(index as i32);
        Self(parts)
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// Per-file index from structural path to comments.
#[derive(Debug, Clone, Default)]
pub struct CommentTable {
    by_path: HashMap<SourcePath, Comments>,
}

impl CommentTable {
    pub fn from_source_info(info: Option<&SourceCodeInfo>) -> Self {
        let Some(info) = info else {
            return Self::default();
        };

        let mut by_path = HashMap::with_capacity(info.location.len());
        for loc in &info.location {
            let comments = Comments {
                leading: loc.leading_comments.clone().unwrap_or_default(),
                trailing: loc.trailing_comments.clone().unwrap_or_default(),
                leading_detached: loc.leading_detached_comments.clone(),
            };
            // Spans without comments are common (every token gets a location).
            if comments.is_empty() {
                continue;
            }
            by_path.insert(SourcePath(loc.path.clone()), comments);
        }
        Self { by_path }
    }

    /// Comments at `path`; a miss is normal and yields an empty record.
    pub fn lookup(&self, path: &SourcePath) -> Comments {
        self.by_path.get(path).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
