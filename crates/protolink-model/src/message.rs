use protolink_descriptor::{FieldType, ReservedRange};

use crate::enumeration::Enum;
use crate::field::Field;
use crate::file::File;
use crate::metadata::Metadata;
use crate::oneof::Oneof;
use crate::query::Selection;

define_view! {
    /// A message type, top-level or nested.
    Message => MessageRecord, MessageId
}

impl<'m> Message<'m> {
    pub fn file(&self) -> File<'m> {
        File::new(self.model, self.model.registry.files.resolve(&self.record.file))
    }

    /// Enclosing message, or `None` at file scope.
    pub fn parent(&self) -> Option<Message<'m>> {
        self.record
            .parent
            .as_ref()
            .map(|id| Message::new(self.model, self.model.registry.messages.resolve(id)))
    }

    /// Outermost enclosing message; `self` when top-level.
    pub fn root(&self) -> Message<'m> {
        let mut current = *self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    pub fn meta(&self) -> &'m Metadata {
        &self.record.meta
    }

    /// Fields in declaration order. Group-typed fields are never listed.
    pub fn fields(&self) -> Selection<Field<'m>> {
        let mut out: Vec<_> = self
            .record
            .fields
            .iter()
            .map(|id| Field::new(self.model, self.model.registry.fields.resolve(id)))
            .filter(|f| f.field_type() != FieldType::Group)
            .collect();
        out.sort_by_key(|f| f.record.order);
        out.into()
    }

    /// Directly nested messages, in declaration order.
    pub fn messages(&self) -> Selection<Message<'m>> {
        let mut out: Vec<_> = self
            .record
            .messages
            .iter()
            .map(|id| Message::new(self.model, self.model.registry.messages.resolve(id)))
            .collect();
        out.sort_by_key(|m| m.record.order);
        out.into()
    }

    pub fn enums(&self) -> Selection<Enum<'m>> {
        self.record
            .enums
            .iter()
            .map(|id| Enum::new(self.model, self.model.registry.enums.resolve(id)))
            .collect()
    }

    pub fn oneofs(&self) -> Selection<Oneof<'m>> {
        self.record
            .oneofs
            .iter()
            .map(|id| Oneof::new(self.model, self.model.registry.oneofs.resolve(id)))
            .collect()
    }

    pub fn reserved_ranges(&self) -> &'m [ReservedRange] {
        &self.record.reserved_ranges
    }

    pub fn reserved_names(&self) -> &'m [String] {
        &self.record.reserved_names
    }

    /// Whether field `number` falls in a reserved range (`end` is exclusive).
    pub fn is_reserved_number(&self, number: i32) -> bool {
        self.record
            .reserved_ranges
            .iter()
            .any(|r| (r.start..r.end).contains(&number))
    }

    /// Synthesized `FooEntry` messages protoc creates for `map<K, V>` fields.
    pub fn is_map_entry(&self) -> bool {
        self.record.options.flag("mapEntry")
    }
}
