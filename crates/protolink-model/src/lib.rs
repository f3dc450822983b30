//! Linked semantic model over a compiler plugin request.
//!
//! Input is a [`CodeGeneratorRequest`]: a flat list of per-file descriptor
//! trees that refer to each other by fully-qualified name. Output is a
//! [`Model`] in which every declaration has a unique identifier, every type
//! reference points at its target, every declaration carries its source
//! comments, and derived properties (visibility, deprecation) are answered by
//! walking enclosing scopes.
//!
//! Pipeline (one pass, in request order):
//!
//! - **ingest** walks each file depth-first and registers each declaration
//!   (`ingest`), assigning identifiers on the way ([`ids`]);
//! - **link** turns field and method type names into identifiers ([`link`]);
//! - **comments** are matched by structural path ([`comments`]);
//! - **semantics** computes visibility/deprecation on demand ([`semantics`]);
//! - **query** returns ordered, filterable [`Selection`]s ([`query`]).
//!
//! ```ignore
//! let request = protolink_descriptor::parse_request_json(&text)?;
//! let model = Model::from_request(&request, ModelConfig::default())?;
//! for message in model.messages().to_generate().visible() {
//!     println!("{} ({} fields)", message.id(), message.fields().len());
//! }
//! ```

#[macro_use]
mod view;

pub mod comments;
pub mod config;
pub mod enumeration;
pub mod error;
pub mod field;
pub mod file;
pub mod ids;
pub mod link;
pub mod message;
pub mod metadata;
pub mod model;
pub mod oneof;
pub mod query;
pub mod semantics;
pub mod service;

mod ingest;
mod registry;

pub use comments::{CommentTable, Comments, SourcePath};
pub use config::{ConfigError, EnumDeprecationRule, MetadataExtensions, ModelConfig};
pub use enumeration::{Enum, EnumValue};
pub use error::{IoRole, LinkError};
pub use field::Field;
pub use file::File;
pub use ids::{EnumId, EnumValueId, FieldId, FileId, MessageId, MethodId, OneofId, ServiceId};
pub use link::TypeRef;
pub use message::Message;
pub use metadata::{Metadata, Visibility};
pub use model::Model;
pub use oneof::Oneof;
pub use query::Selection;
pub use semantics::{Nestable, Semantic};
pub use service::{Method, Service};

pub use protolink_descriptor::{CodeGeneratorRequest, FieldLabel, FieldType};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn model_is_shareable_across_threads() {
        assert_send_sync::<Model>();
        assert_send_sync::<Message<'static>>();
        assert_send_sync::<Selection<Field<'static>>>();
    }
}
