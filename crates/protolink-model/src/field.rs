use protolink_descriptor::{FieldLabel, FieldType};

use crate::enumeration::Enum;
use crate::file::File;
use crate::link::TypeRef;
use crate::message::Message;
use crate::metadata::Metadata;
use crate::oneof::Oneof;

define_view! {
    /// A message field.
    Field => FieldRecord, FieldId
}

impl<'m> Field<'m> {
    pub fn parent(&self) -> Message<'m> {
        Message::new(self.model, self.model.registry.messages.resolve(&self.record.parent))
    }

    pub fn file(&self) -> File<'m> {
        self.parent().file()
    }

    pub fn meta(&self) -> &'m Metadata {
        &self.record.meta
    }

    /// The oneof this field belongs to, if any.
    pub fn oneof(&self) -> Option<Oneof<'m>> {
        self.record
            .oneof
            .as_ref()
            .map(|id| Oneof::new(self.model, self.model.registry.oneofs.resolve(id)))
    }

    pub fn is_oneof(&self) -> bool {
        self.record.oneof.is_some()
    }

    /// Linked type reference as recorded at ingest.
    pub fn type_ref(&self) -> &'m TypeRef {
        &self.record.type_ref
    }

    /// Target message of a message-typed field. `None` for other types, or when
    /// the target is not part of the request.
    pub fn type_message(&self) -> Option<Message<'m>> {
        self.record
            .type_ref
            .message()
            .and_then(|id| self.model.message(id.as_str()))
    }

    /// Target enum of an enum-typed field; `None` as for [`Self::type_message`].
    pub fn type_enum(&self) -> Option<Enum<'m>> {
        self.record
            .type_ref
            .enumeration()
            .and_then(|id| self.model.enumeration(id.as_str()))
    }

    pub fn number(&self) -> i32 {
        self.record.number
    }

    pub fn label(&self) -> FieldLabel {
        self.record.label
    }

    pub fn field_type(&self) -> FieldType {
        self.record.field_type
    }

    pub fn is_type(&self, ty: FieldType) -> bool {
        self.record.field_type == ty
    }

    pub fn is_repeated(&self) -> bool {
        self.record.label == FieldLabel::Repeated
    }

    /// Default value as written in the source; empty when unset.
    pub fn default_value(&self) -> &'m str {
        &self.record.default_value
    }

    pub fn json_name(&self) -> &'m str {
        &self.record.json_name
    }

    /// Display form of the field's type.
    ///
    /// Linked types print their qualified name without the leading dot,
    /// scalars print their `.proto` keyword, and repeated fields get a `[]`
    /// prefix: `string`, `[]int32`, `acme.v1.Order`, `[]acme.v1.Order.Line`.
    pub fn type_name_string(&self) -> String {
        let base = match &self.record.type_ref {
            TypeRef::Message(id) => id.as_str().trim_start_matches('.'),
            TypeRef::Enum(id) => id.as_str().trim_start_matches('.'),
            TypeRef::Scalar => self.record.field_type.keyword(),
        };
        if self.is_repeated() {
            format!("[]{base}")
        } else {
            base.to_string()
        }
    }
}
