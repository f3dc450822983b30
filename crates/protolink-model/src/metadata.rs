//! Custom generator metadata carried in option extensions.
//!
//! Each declaration kind may carry a metadata extension (see
//! [`crate::config::MetadataExtensions`] for the names looked up):
//!
//! ```json
//! "[template.field_meta]": {
//!   "visibility": "PRIVATE",
//!   "generator": "email",
//!   "tags": ["tag1", "tag2"],
//!   "extra": { "k": "v" }
//! }
//! ```
//!
//! An absent extension is the common case and reads as [`Metadata::default`].

use protolink_descriptor::Options;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "VisibilityRepr")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VisibilityRepr {
    Name(String),
    Number(i32),
}

impl TryFrom<VisibilityRepr> for Visibility {
    type Error = String;

    fn try_from(repr: VisibilityRepr) -> Result<Self, Self::Error> {
        match repr {
            VisibilityRepr::Name(name) => match name.as_str() {
                "PUBLIC" => Ok(Visibility::Public),
                "PRIVATE" => Ok(Visibility::Private),
                other => Err(format!("unknown visibility `{other}`")),
            },
            VisibilityRepr::Number(0) => Ok(Visibility::Public),
            VisibilityRepr::Number(1) => Ok(Visibility::Private),
            VisibilityRepr::Number(n) => Err(format!("unknown visibility number {n}")),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => f.write_str("PUBLIC"),
            Visibility::Private => f.write_str("PRIVATE"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub visibility: Visibility,
    pub tags: Vec<String>,
    pub extra: BTreeMap<String, String>,
    /// Value-generator hint; only meaningful on fields.
    pub generator: Option<String>,
}

impl Metadata {
    /// Read the metadata extension `extension` from `options`.
    ///
    /// Returns `None` when the extension is absent. A present but malformed
    /// extension is logged and also yields `None`, so callers fall back to the
    /// default rather than failing the whole request.
    pub fn from_options(options: &Options, extension: &str) -> Option<Metadata> {
        let value = options.extension(extension)?;
        match Metadata::deserialize(value) {
            Ok(meta) => Some(meta),
            Err(err) => {
                tracing::warn!(
                    extension = %extension,
                    error = %err,
                    "ignoring malformed metadata extension"
                );
                None
            }
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
