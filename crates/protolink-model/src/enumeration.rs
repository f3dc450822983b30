use crate::file::File;
use crate::message::Message;
use crate::metadata::Metadata;
use crate::query::Selection;

define_view! {
    /// An enum type, top-level or nested in a message.
    Enum => EnumRecord, EnumId
}

define_view! {
    /// One named value of an enum.
    EnumValue => EnumValueRecord, EnumValueId
}

impl<'m> Enum<'m> {
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

    pub fn meta(&self) -> &'m Metadata {
        &self.record.meta
    }

    /// Values in declaration order.
    pub fn values(&self) -> Selection<EnumValue<'m>> {
        self.record
            .values
            .iter()
            .map(|id| EnumValue::new(self.model, self.model.registry.enum_values.resolve(id)))
            .collect()
    }
}

impl<'m> EnumValue<'m> {
    pub fn parent(&self) -> Enum<'m> {
        Enum::new(self.model, self.model.registry.enums.resolve(&self.record.parent))
    }

    pub fn file(&self) -> File<'m> {
        self.parent().file()
    }

    pub fn number(&self) -> i32 {
        self.record.number
    }

    pub fn meta(&self) -> &'m Metadata {
        &self.record.meta
    }
}
