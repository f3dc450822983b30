//! The linked model and its query facade.

use protolink_descriptor::{CodeGeneratorRequest, CompilerVersion, FieldType};

use crate::config::ModelConfig;
use crate::enumeration::{Enum, EnumValue};
use crate::error::LinkError;
use crate::field::Field;
use crate::file::File;
use crate::ingest::Ingest;
use crate::message::Message;
use crate::oneof::Oneof;
use crate::query::Selection;
use crate::registry::Registry;
use crate::semantics::Semantic;
use crate::service::{Method, Service};

/// Every declaration of one request, identified, linked, and annotated.
///
/// Built once by [`Model::from_request`] and read-only afterwards; any number
/// of readers may share it across threads.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) registry: Registry,
    config: ModelConfig,
    parameter: String,
    files_to_generate: Vec<String>,
    compiler_version: Option<CompilerVersion>,
}

impl Model {
    /// Ingest every file of `request`, in request order.
    ///
    /// Fails on the first internal-consistency error; no partial model is
    /// returned.
    pub fn from_request(request: &CodeGeneratorRequest, config: ModelConfig) -> Result<Self, LinkError> {
        let mut ingest = Ingest::new(&config, &request.file_to_generate);
        for file in &request.proto_file {
            ingest.register_file(file)?;
        }
        let registry = ingest.finish();

        for name in &request.file_to_generate {
            if !registry.files.iter().any(|f| &f.name == name) {
                tracing::warn!(file = %name, "file to generate is not part of the request");
            }
        }

        tracing::debug!(
            files = registry.files.len(),
            messages = registry.messages.len(),
            fields = registry.fields.len(),
            enums = registry.enums.len(),
            services = registry.services.len(),
            methods = registry.methods.len(),
            "linked request"
        );

        Ok(Self {
            registry,
            config,
            parameter: request.parameter.clone().unwrap_or_default(),
            files_to_generate: request.file_to_generate.clone(),
            compiler_version: request.compiler_version.clone(),
        })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The request's opaque parameter string; empty when absent.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn files_to_generate(&self) -> &[String] {
        &self.files_to_generate
    }

    pub fn compiler_version(&self) -> Option<&CompilerVersion> {
        self.compiler_version.as_ref()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn files(&self) -> Selection<File<'_>> {
        let mut out: Vec<_> = self.registry.files.iter().map(|r| File::new(self, r)).collect();
        out.sort_by_key(|f| f.record.order);
        out.into()
    }

    /// Every message, nested ones included, in declaration order.
    pub fn messages(&self) -> Selection<Message<'_>> {
        let mut out: Vec<_> = self
            .registry
            .messages
            .iter()
            .map(|r| Message::new(self, r))
            .collect();
        out.sort_by_key(|m| m.record.order);
        out.into()
    }

    /// Every field in declaration order. Group-typed fields are never listed.
    pub fn fields(&self) -> Selection<Field<'_>> {
        let mut out: Vec<_> = self
            .registry
            .fields
            .iter()
            .filter(|r| r.field_type != FieldType::Group)
            .map(|r| Field::new(self, r))
            .collect();
        out.sort_by_key(|f| f.record.order);
        out.into()
    }

    pub fn oneofs(&self) -> Selection<Oneof<'_>> {
        self.registry.oneofs.iter().map(|r| Oneof::new(self, r)).collect()
    }

    pub fn enums(&self) -> Selection<Enum<'_>> {
        self.registry.enums.iter().map(|r| Enum::new(self, r)).collect()
    }

    pub fn enum_values(&self) -> Selection<EnumValue<'_>> {
        self.registry
            .enum_values
            .iter()
            .map(|r| EnumValue::new(self, r))
            .collect()
    }

    pub fn services(&self) -> Selection<Service<'_>> {
        self.registry.services.iter().map(|r| Service::new(self, r)).collect()
    }

    pub fn methods(&self) -> Selection<Method<'_>> {
        self.registry.methods.iter().map(|r| Method::new(self, r)).collect()
    }

    /// Distinct packages of the files marked for generation, in file order.
    pub fn packages_to_generate(&self) -> Vec<&str> {
        let mut packages: Vec<&str> = Vec::new();
        for file in self.files().iter().filter(|f| f.is_generated()) {
            if !packages.contains(&file.package()) {
                packages.push(file.package());
            }
        }
        packages
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn file(&self, id: &str) -> Option<File<'_>> {
        self.registry.files.get(id).map(|r| File::new(self, r))
    }

    /// Look a file up by its name as given in the request (`acme/v1/order.proto`).
    pub fn file_by_name(&self, name: &str) -> Option<File<'_>> {
        self.registry
            .files
            .iter()
            .find(|r| r.name == name)
            .map(|r| File::new(self, r))
    }

    pub fn message(&self, id: &str) -> Option<Message<'_>> {
        self.registry.messages.get(id).map(|r| Message::new(self, r))
    }

    pub fn field(&self, id: &str) -> Option<Field<'_>> {
        self.registry.fields.get(id).map(|r| Field::new(self, r))
    }

    pub fn oneof(&self, id: &str) -> Option<Oneof<'_>> {
        self.registry.oneofs.get(id).map(|r| Oneof::new(self, r))
    }

    pub fn enumeration(&self, id: &str) -> Option<Enum<'_>> {
        self.registry.enums.get(id).map(|r| Enum::new(self, r))
    }

    pub fn enum_value(&self, id: &str) -> Option<EnumValue<'_>> {
        self.registry.enum_values.get(id).map(|r| EnumValue::new(self, r))
    }

    pub fn service(&self, id: &str) -> Option<Service<'_>> {
        self.registry.services.get(id).map(|r| Service::new(self, r))
    }

    pub fn method(&self, id: &str) -> Option<Method<'_>> {
        self.registry.methods.get(id).map(|r| Method::new(self, r))
    }
}
