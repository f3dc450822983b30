//! Descriptor ingest: one pre-order walk per file that registers every
//! declaration, assigns its identifier, links its references, and attaches its
//! comments.
//!
//! Order matters:
//! - a parent's record is inserted before its children, whose identifiers are
//!   prefixed by the parent's;
//! - oneofs before fields, because a field names its oneof by position;
//! - fields before nested types;
//! - messages before services, because methods check their I/O types exist.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use protolink_descriptor::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, MethodDescriptorProto, OneofDescriptorProto, ServiceDescriptorProto,
};

use crate::comments::{self, CommentTable, Comments, SourcePath};
use crate::config::ModelConfig;
use crate::error::LinkError;
use crate::ids::{
    self, EnumId, EnumValueId, FieldId, FileId, MessageId, MethodId, OneofId, ServiceId,
};
use crate::link;
use crate::metadata::Metadata;
use crate::registry::{
    Arena, EnumRecord, EnumValueRecord, FieldRecord, FileRecord, MessageRecord, MethodRecord,
    OneofRecord, Registry, ServiceRecord,
};

/// Declaration-order counters. Files, messages, and fields are the kinds whose
/// queries sort; the rest are read back in append order.
#[derive(Debug, Default)]
struct Counters {
    files: usize,
    messages: usize,
    fields: usize,
}

fn next(counter: &mut usize) -> usize {
    let n = *counter;
    *counter += 1;
    n
}

pub(crate) struct Ingest<'a> {
    registry: Registry,
    config: &'a ModelConfig,
    to_generate: HashSet<&'a str>,
    counters: Counters,
}

impl<'a> Ingest<'a> {
    pub(crate) fn new(config: &'a ModelConfig, files_to_generate: &'a [String]) -> Self {
        Self {
            registry: Registry::default(),
            config,
            to_generate: files_to_generate.iter().map(String::as_str).collect(),
            counters: Counters::default(),
        }
    }

    pub(crate) fn finish(self) -> Registry {
        self.registry
    }

    fn comments(&self, file: &FileId, path: &SourcePath) -> Comments {
        self.registry.files.resolve(file).comment_table.lookup(path)
    }

    // =========================================================================
    // Files
    // =========================================================================

    pub(crate) fn register_file(&mut self, desc: &FileDescriptorProto) -> Result<FileId, LinkError> {
        let id = ids::file_id(&desc.package, &desc.name);
        let comment_table = CommentTable::from_source_info(desc.source_code_info.as_ref());
        let generate = self.to_generate.contains(desc.name.as_str());

        let record = FileRecord {
            order: next(&mut self.counters.files),
            id: id.clone(),
            name: desc.name.clone(),
            package: desc.package.clone(),
            syntax: desc.syntax.clone().unwrap_or_else(|| "proto2".to_string()),
            dependencies: desc.dependency.clone(),
            generate,
            meta: Metadata::from_options(&desc.options, &self.config.extensions.file)
                .unwrap_or_default(),
            options: desc.options.clone(),
            comments: comment_table.lookup(&SourcePath::root(comments::FILE_PACKAGE)),
            comment_table,
            messages: Vec::with_capacity(desc.message_type.len()),
            enums: Vec::with_capacity(desc.enum_type.len()),
            services: Vec::with_capacity(desc.service.len()),
        };
        insert(&mut self.registry.files, "file", &id, record)?;

        for (i, m) in desc.message_type.iter().enumerate() {
            let path = SourcePath::element(comments::FILE_MESSAGE_TYPE, i);
            let child = self.register_message(&id, &desc.package, None, m, path)?;
            self.registry.files.resolve_mut(&id).messages.push(child);
        }

        for (i, e) in desc.enum_type.iter().enumerate() {
            let path = SourcePath::element(comments::FILE_ENUM_TYPE, i);
            let child = self.register_enum(&id, &desc.package, None, e, path)?;
            self.registry.files.resolve_mut(&id).enums.push(child);
        }

        for (i, s) in desc.service.iter().enumerate() {
            let path = SourcePath::element(comments::FILE_SERVICE, i);
            let child = self.register_service(&id, &desc.package, s, path)?;
            self.registry.files.resolve_mut(&id).services.push(child);
        }

        tracing::debug!(
            file = %desc.name,
            package = %desc.package,
            generate,
            messages = desc.message_type.len(),
            enums = desc.enum_type.len(),
            services = desc.service.len(),
            "registered file"
        );
        Ok(id)
    }

    // =========================================================================
    // Messages, oneofs, fields
    // =========================================================================

    fn register_message(
        &mut self,
        file: &FileId,
        package: &str,
        parent: Option<&MessageId>,
        desc: &DescriptorProto,
        path: SourcePath,
    ) -> Result<MessageId, LinkError> {
        let id = MessageId::from(match parent {
            None => ids::root_scoped(package, &desc.name),
            Some(p) => ids::nested_scoped(p.as_str(), &desc.name),
        });

        let record = MessageRecord {
            order: next(&mut self.counters.messages),
            id: id.clone(),
            name: desc.name.clone(),
            file: file.clone(),
            parent: parent.cloned(),
            meta: Metadata::from_options(&desc.options, &self.config.extensions.message)
                .unwrap_or_default(),
            options: desc.options.clone(),
            comments: self.comments(file, &path),
            reserved_ranges: desc.reserved_range.clone(),
            reserved_names: desc.reserved_name.clone(),
            fields: Vec::with_capacity(desc.field.len()),
            messages: Vec::with_capacity(desc.nested_type.len()),
            enums: Vec::with_capacity(desc.enum_type.len()),
            oneofs: Vec::with_capacity(desc.oneof_decl.len()),
        };
        insert(&mut self.registry.messages, "message", &id, record)?;

        for (i, o) in desc.oneof_decl.iter().enumerate() {
            let child_path = path.child(comments::MESSAGE_ONEOF_DECL, i);
            let child = self.register_oneof(file, &id, o, child_path)?;
            self.registry.messages.resolve_mut(&id).oneofs.push(child);
        }

        for (i, f) in desc.field.iter().enumerate() {
            let child_path = path.child(comments::MESSAGE_FIELD, i);
            let child = self.register_field(file, &id, f, child_path)?;
            self.registry.messages.resolve_mut(&id).fields.push(child);
        }

        for (i, m) in desc.nested_type.iter().enumerate() {
            let child_path = path.child(comments::MESSAGE_NESTED_TYPE, i);
            let child = self.register_message(file, package, Some(&id), m, child_path)?;
            self.registry.messages.resolve_mut(&id).messages.push(child);
        }

        for (i, e) in desc.enum_type.iter().enumerate() {
            let child_path = path.child(comments::MESSAGE_ENUM_TYPE, i);
            let child = self.register_enum(file, package, Some(&id), e, child_path)?;
            self.registry.messages.resolve_mut(&id).enums.push(child);
        }

        Ok(id)
    }

    fn register_oneof(
        &mut self,
        file: &FileId,
        parent: &MessageId,
        desc: &OneofDescriptorProto,
        path: SourcePath,
    ) -> Result<OneofId, LinkError> {
        let id = OneofId::from(ids::member_of(parent.as_str(), &desc.name));
        let record = OneofRecord {
            id: id.clone(),
            name: desc.name.clone(),
            parent: parent.clone(),
            options: desc.options.clone(),
            comments: self.comments(file, &path),
            fields: Vec::new(),
        };
        insert(&mut self.registry.oneofs, "oneof", &id, record)?;
        Ok(id)
    }

    fn register_field(
        &mut self,
        file: &FileId,
        parent: &MessageId,
        desc: &FieldDescriptorProto,
        path: SourcePath,
    ) -> Result<FieldId, LinkError> {
        let id = FieldId::from(ids::member_of(parent.as_str(), &desc.name));

        let oneof = match desc.oneof_index {
            None => None,
            Some(index) => {
                let declared = &self.registry.messages.resolve(parent).oneofs;
                let found = usize::try_from(index).ok().and_then(|i| declared.get(i));
                match found {
                    Some(oneof) => Some(oneof.clone()),
                    None => {
                        return Err(LinkError::OneofIndexOutOfRange {
                            field: id,
                            index,
                            declared: declared.len(),
                        })
                    }
                }
            }
        };

        let record = FieldRecord {
            order: next(&mut self.counters.fields),
            id: id.clone(),
            name: desc.name.clone(),
            parent: parent.clone(),
            oneof: oneof.clone(),
            type_ref: link::field_type(desc),
            number: desc.number,
            label: desc.label,
            field_type: desc.r#type,
            default_value: desc.default_value.clone().unwrap_or_default(),
            json_name: desc.json_name.clone().unwrap_or_default(),
            meta: Metadata::from_options(&desc.options, &self.config.extensions.field)
                .unwrap_or_default(),
            options: desc.options.clone(),
            comments: self.comments(file, &path),
        };
        insert(&mut self.registry.fields, "field", &id, record)?;

        if let Some(oneof) = oneof {
            self.registry.oneofs.resolve_mut(&oneof).fields.push(id.clone());
        }
        Ok(id)
    }

    // =========================================================================
    // Enums
    // =========================================================================

    fn register_enum(
        &mut self,
        file: &FileId,
        package: &str,
        parent: Option<&MessageId>,
        desc: &EnumDescriptorProto,
        path: SourcePath,
    ) -> Result<EnumId, LinkError> {
        let id = EnumId::from(match parent {
            None => ids::root_scoped(package, &desc.name),
            Some(p) => ids::nested_scoped(p.as_str(), &desc.name),
        });

        let record = EnumRecord {
            id: id.clone(),
            name: desc.name.clone(),
            file: file.clone(),
            parent: parent.cloned(),
            meta: Metadata::from_options(&desc.options, &self.config.extensions.enumeration)
                .unwrap_or_default(),
            options: desc.options.clone(),
            comments: self.comments(file, &path),
            values: Vec::with_capacity(desc.value.len()),
        };
        insert(&mut self.registry.enums, "enum", &id, record)?;

        for (i, v) in desc.value.iter().enumerate() {
            let child_path = path.child(comments::ENUM_VALUE, i);
            let child = self.register_enum_value(file, &id, v, child_path)?;
            self.registry.enums.resolve_mut(&id).values.push(child);
        }

        Ok(id)
    }

    fn register_enum_value(
        &mut self,
        file: &FileId,
        parent: &EnumId,
        desc: &EnumValueDescriptorProto,
        path: SourcePath,
    ) -> Result<EnumValueId, LinkError> {
        let id = EnumValueId::from(ids::member_of(parent.as_str(), &desc.name));
        let record = EnumValueRecord {
            id: id.clone(),
            name: desc.name.clone(),
            number: desc.number,
            parent: parent.clone(),
            meta: Metadata::from_options(&desc.options, &self.config.extensions.enum_value)
                .unwrap_or_default(),
            options: desc.options.clone(),
            comments: self.comments(file, &path),
        };
        insert(&mut self.registry.enum_values, "enum value", &id, record)?;
        Ok(id)
    }

    // =========================================================================
    // Services
    // =========================================================================

    fn register_service(
        &mut self,
        file: &FileId,
        package: &str,
        desc: &ServiceDescriptorProto,
        path: SourcePath,
    ) -> Result<ServiceId, LinkError> {
        let id = ServiceId::from(ids::root_scoped(package, &desc.name));
        let record = ServiceRecord {
            id: id.clone(),
            name: desc.name.clone(),
            file: file.clone(),
            meta: Metadata::from_options(&desc.options, &self.config.extensions.service)
                .unwrap_or_default(),
            options: desc.options.clone(),
            comments: self.comments(file, &path),
            methods: Vec::with_capacity(desc.method.len()),
        };
        insert(&mut self.registry.services, "service", &id, record)?;

        for (i, m) in desc.method.iter().enumerate() {
            let child_path = path.child(comments::SERVICE_METHOD, i);
            let child = self.register_method(file, &id, m, child_path)?;
            self.registry.services.resolve_mut(&id).methods.push(child);
        }

        Ok(id)
    }

    fn register_method(
        &mut self,
        file: &FileId,
        parent: &ServiceId,
        desc: &MethodDescriptorProto,
        path: SourcePath,
    ) -> Result<MethodId, LinkError> {
        let id = MethodId::from(ids::member_of(parent.as_str(), &desc.name));
        let (input, output) = link::method_types(&self.registry, &id, desc)?;

        let record = MethodRecord {
            id: id.clone(),
            name: desc.name.clone(),
            parent: parent.clone(),
            input,
            output,
            client_streaming: desc.client_streaming,
            server_streaming: desc.server_streaming,
            meta: Metadata::from_options(&desc.options, &self.config.extensions.method)
                .unwrap_or_default(),
            options: desc.options.clone(),
            comments: self.comments(file, &path),
        };
        insert(&mut self.registry.methods, "method", &id, record)?;
        Ok(id)
    }
}

fn insert<I, T>(arena: &mut Arena<I, T>, kind: &'static str, id: &I, record: T) -> Result<(), LinkError>
where
    I: Eq + Hash + Clone + Display,
{
    arena
        .insert(id.clone(), record)
        .map(|_| ())
        .map_err(|_| LinkError::DuplicateIdentifier {
            kind,
            id: id.to_string(),
        })
}
