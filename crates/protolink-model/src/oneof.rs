use protolink_descriptor::FieldType;

use crate::field::Field;
use crate::file::File;
use crate::message::Message;
use crate::query::Selection;

define_view! {
    /// A named group of fields of which at most one is set.
    Oneof => OneofRecord, OneofId
}

impl<'m> Oneof<'m> {
    pub fn parent(&self) -> Message<'m> {
        Message::new(self.model, self.model.registry.messages.resolve(&self.record.parent))
    }

    pub fn file(&self) -> File<'m> {
        self.parent().file()
    }

    /// Member fields in declaration order, groups excluded.
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
}
