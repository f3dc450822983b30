//! Entity records and the per-kind arenas that own them.
//!
//! Records reference each other only by identifier; the arenas map an
//! identifier to its slot in O(1). Nothing here is mutated once ingest
//! finishes.

use ahash::AHashMap;
use protolink_descriptor::{FieldLabel, FieldType, Options, ReservedRange};
use std::hash::Hash;

use crate::comments::{CommentTable, Comments};
use crate::ids::{EnumId, EnumValueId, FieldId, FileId, MessageId, MethodId, OneofId, ServiceId};
use crate::link::TypeRef;
use crate::metadata::Metadata;

// =============================================================================
// Arena
// =============================================================================

#[derive(Debug, Clone)]
pub(crate) struct Arena<I, T> {
    items: Vec<T>,
    index: AHashMap<I, usize>,
}

impl<I, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: AHashMap::new(),
        }
    }
}

impl<I: Eq + Hash + Clone, T> Arena<I, T> {
    /// Insert `item` under `id`. Returns the rejected item if `id` is taken.
    pub(crate) fn insert(&mut self, id: I, item: T) -> Result<usize, T> {
        if self.index.contains_key(&id) {
            return Err(item);
        }
        let slot = self.items.len();
        self.items.push(item);
        self.index.insert(id, slot);
        Ok(slot)
    }

    pub(crate) fn get<Q>(&self, id: &Q) -> Option<&T>
    where
        I: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(id).map(|&slot| &self.items[slot])
    }

    pub(crate) fn contains(&self, id: &I) -> bool {
        self.index.contains_key(id)
    }

    /// Lookup for identifiers recorded structurally during ingest (parents,
    /// children, method I/O). Those are inserted before anything refers to
    /// them, so a miss means the registry itself is corrupt.
    pub(crate) fn resolve(&self, id: &I) -> &T {
        &self.items[self.index[id]]
    }

    pub(crate) fn resolve_mut(&mut self, id: &I) -> &mut T {
        let slot = self.index[id];
        &mut self.items[slot]
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone)]
pub(crate) struct FileRecord {
    pub(crate) order: usize,
    pub(crate) id: FileId,
    pub(crate) name: String,
    pub(crate) package: String,
    pub(crate) syntax: String,
    pub(crate) dependencies: Vec<String>,
    pub(crate) generate: bool,
    pub(crate) meta: Metadata,
    pub(crate) options: Options,
    pub(crate) comments: Comments,
    pub(crate) comment_table: CommentTable,
    pub(crate) messages: Vec<MessageId>,
    pub(crate) enums: Vec<EnumId>,
    pub(crate) services: Vec<ServiceId>,
}

#[derive(Debug, Clone)]
pub(crate) struct MessageRecord {
    pub(crate) order: usize,
    pub(crate) id: MessageId,
    pub(crate) name: String,
    pub(crate) file: FileId,
    pub(crate) parent: Option<MessageId>,
    pub(crate) meta: Metadata,
    pub(crate) options: Options,
    pub(crate) comments: Comments,
    pub(crate) reserved_ranges: Vec<ReservedRange>,
    pub(crate) reserved_names: Vec<String>,
    pub(crate) fields: Vec<FieldId>,
    pub(crate) messages: Vec<MessageId>,
    pub(crate) enums: Vec<EnumId>,
    pub(crate) oneofs: Vec<OneofId>,
}

#[derive(Debug, Clone)]
pub(crate) struct FieldRecord {
    pub(crate) order: usize,
    pub(crate) id: FieldId,
    pub(crate) name: String,
    pub(crate) parent: MessageId,
    pub(crate) oneof: Option<OneofId>,
    pub(crate) type_ref: TypeRef,
    pub(crate) number: i32,
    pub(crate) label: FieldLabel,
    pub(crate) field_type: FieldType,
    pub(crate) default_value: String,
    pub(crate) json_name: String,
    pub(crate) meta: Metadata,
    pub(crate) options: Options,
    pub(crate) comments: Comments,
}

#[derive(Debug, Clone)]
pub(crate) struct OneofRecord {
    pub(crate) id: OneofId,
    pub(crate) name: String,
    pub(crate) parent: MessageId,
    pub(crate) options: Options,
    pub(crate) comments: Comments,
    pub(crate) fields: Vec<FieldId>,
}

#[derive(Debug, Clone)]
pub(crate) struct EnumRecord {
    pub(crate) id: EnumId,
    pub(crate) name: String,
    pub(crate) file: FileId,
    pub(crate) parent: Option<MessageId>,
    pub(crate) meta: Metadata,
    pub(crate) options: Options,
    pub(crate) comments: Comments,
    pub(crate) values: Vec<EnumValueId>,
}

#[derive(Debug, Clone)]
pub(crate) struct EnumValueRecord {
    pub(crate) id: EnumValueId,
    pub(crate) name: String,
    pub(crate) number: i32,
    pub(crate) parent: EnumId,
    pub(crate) meta: Metadata,
    pub(crate) options: Options,
    pub(crate) comments: Comments,
}

#[derive(Debug, Clone)]
pub(crate) struct ServiceRecord {
    pub(crate) id: ServiceId,
    pub(crate) name: String,
    pub(crate) file: FileId,
    pub(crate) meta: Metadata,
    pub(crate) options: Options,
    pub(crate) comments: Comments,
    pub(crate) methods: Vec<MethodId>,
}

#[derive(Debug, Clone)]
pub(crate) struct MethodRecord {
    pub(crate) id: MethodId,
    pub(crate) name: String,
    pub(crate) parent: ServiceId,
    pub(crate) input: MessageId,
    pub(crate) output: MessageId,
    pub(crate) client_streaming: bool,
    pub(crate) server_streaming: bool,
    pub(crate) meta: Metadata,
    pub(crate) options: Options,
    pub(crate) comments: Comments,
}

/// All arenas for one request.
#[derive(Debug, Clone, Default)]
pub(crate) struct Registry {
    pub(crate) files: Arena<FileId, FileRecord>,
    pub(crate) messages: Arena<MessageId, MessageRecord>,
    pub(crate) fields: Arena<FieldId, FieldRecord>,
    pub(crate) oneofs: Arena<OneofId, OneofRecord>,
    pub(crate) enums: Arena<EnumId, EnumRecord>,
    pub(crate) enum_values: Arena<EnumValueId, EnumValueRecord>,
    pub(crate) services: Arena<ServiceId, ServiceRecord>,
    pub(crate) methods: Arena<MethodId, MethodRecord>,
}
