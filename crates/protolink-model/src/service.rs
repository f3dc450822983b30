use crate::file::File;
use crate::message::Message;
use crate::metadata::Metadata;
use crate::query::Selection;

define_view! {
    /// An RPC service.
    Service => ServiceRecord, ServiceId
}

define_view! {
    /// One RPC method of a service.
    Method => MethodRecord, MethodId
}

impl<'m> Service<'m> {
    pub fn file(&self) -> File<'m> {
        File::new(self.model, self.model.registry.files.resolve(&self.record.file))
    }

    pub fn meta(&self) -> &'m Metadata {
        &self.record.meta
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> Selection<Method<'m>> {
        self.record
            .methods
            .iter()
            .map(|id| Method::new(self.model, self.model.registry.methods.resolve(id)))
            .collect()
    }
}

impl<'m> Method<'m> {
    pub fn parent(&self) -> Service<'m> {
        Service::new(self.model, self.model.registry.services.resolve(&self.record.parent))
    }

    pub fn file(&self) -> File<'m> {
        self.parent().file()
    }

    pub fn meta(&self) -> &'m Metadata {
        &self.record.meta
    }

    // Input and output were checked against the message arena at ingest.
    pub fn input_type(&self) -> Message<'m> {
        Message::new(self.model, self.model.registry.messages.resolve(&self.record.input))
    }

    pub fn output_type(&self) -> Message<'m> {
        Message::new(self.model, self.model.registry.messages.resolve(&self.record.output))
    }

    pub fn client_streaming(&self) -> bool {
        self.record.client_streaming
    }

    pub fn server_streaming(&self) -> bool {
        self.record.server_streaming
    }
}
