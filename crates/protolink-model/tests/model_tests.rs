//! Linked model E2E tests over `fixtures/request.json`.

use protolink_descriptor::{parse_request_json, CodeGeneratorRequest};
use protolink_model::*;

const FIXTURE: &str = include_str!("fixtures/request.json");

fn fixture() -> CodeGeneratorRequest {
    parse_request_json(FIXTURE).expect("fixture parses")
}

fn model() -> Model {
    Model::from_request(&fixture(), ModelConfig::default()).expect("fixture links")
}

fn model_with(rule: EnumDeprecationRule) -> Model {
    let config = ModelConfig {
        enum_deprecation: rule,
        ..ModelConfig::default()
    };
    Model::from_request(&fixture(), config).expect("fixture links")
}

fn ids<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> Vec<String> {
    items.into_iter().map(|e| e.to_string()).collect()
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_identifiers_are_unique() {
    let model = model();
    let mut all = Vec::new();
    all.extend(ids(model.files()));
    all.extend(ids(model.messages()));
    all.extend(ids(model.fields()));
    all.extend(ids(model.oneofs()));
    all.extend(ids(model.enums()));
    all.extend(ids(model.enum_values()));
    all.extend(ids(model.services()));
    all.extend(ids(model.methods()));

    let mut deduped = all.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), all.len());
}

#[test]
fn test_identifier_naming() {
    let model = model();
    assert_eq!(
        ids(model.files()),
        vec![".common:common.proto", ".testv2:testv2.proto", ".testv2:extra.proto"]
    );

    for message in model.messages().iter() {
        match message.parent() {
            Some(parent) => assert_eq!(
                message.id().as_str(),
                format!("{}.{}", parent.id(), message.name())
            ),
            None => assert_eq!(
                message.id().as_str(),
                format!(".{}.{}", message.file().package(), message.name())
            ),
        }
    }

    for field in model.fields().iter() {
        assert_eq!(
            field.id().as_str(),
            format!("{}:{}", field.parent().id(), field.name())
        );
    }

    assert!(model.enum_value(".testv2.Enum:ENUM_VALUE").is_some());
    assert!(model.method(".testv2.Service:Stream").is_some());
    assert!(model.oneof(".testv2.Message:oneof_field").is_some());
    assert!(model.enumeration(".testv2.Message.EmbeddedEnum").is_some());
}

// ============================================================================
// Ordering and filtering
// ============================================================================

#[test]
fn test_messages_in_declaration_order() {
    let model = model();
    assert_eq!(
        ids(model.messages()),
        vec![
            ".common.Timestamp",
            ".testv2.Message",
            ".testv2.Message.EmbeddedMessage",
            ".testv2.Message.OtherEmbeddedMessage",
            ".testv2.Message.LegacyGroup",
            ".testv2.OtherMessage",
            ".testv2.OtherMessage.LabelsEntry",
            ".testv2.PrivateMessage",
            ".testv2.PrivateMessage.Inner",
            ".testv2.Hidden",
        ]
    );
}

#[test]
fn test_fields_in_declaration_order() {
    let model = model();
    let message = model.message(".testv2.Message").unwrap();
    let names: Vec<_> = message.fields().iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec![
            "string_field",
            "repeated_string_field",
            "enum_field",
            "other_message_field",
            "bool_field",
            "embedded_enum_field",
            "embedded_message_field",
            "int_field",
            "other_enum_field",
        ]
    );

    let global: Vec<_> = model
        .fields()
        .iter()
        .filter(|f| f.parent() == message)
        .map(|f| f.name())
        .collect();
    assert_eq!(global, names);
    assert_eq!(model.fields().len(), 20);
}

#[test]
fn test_to_generate_keeps_flagged_files_only() {
    let model = model();
    let generated = model.messages().to_generate();
    assert!(!generated.is_empty());
    assert!(generated.iter().all(|m| m.file().package() == "testv2"));
    assert!(!ids(generated).contains(&".common.Timestamp".to_string()));

    assert_eq!(
        ids(model.files().to_generate()),
        vec![".testv2:testv2.proto", ".testv2:extra.proto"]
    );
    assert!(model.enums().to_generate().iter().all(|e| e.file().name() != "common.proto"));
}

#[test]
fn test_filters_compose() {
    let model = model();
    assert_eq!(
        ids(model.messages().to_generate().visible().not_nested()),
        vec![".testv2.Message", ".testv2.OtherMessage"]
    );
    assert_eq!(
        ids(model.messages().to_generate().visible()),
        vec![
            ".testv2.Message",
            ".testv2.Message.EmbeddedMessage",
            ".testv2.Message.LegacyGroup",
            ".testv2.OtherMessage",
            ".testv2.OtherMessage.LabelsEntry",
        ]
    );
    assert_eq!(
        ids(model.enums().to_generate().not_nested().visible()),
        vec![".testv2.Enum"]
    );
    assert_eq!(
        ids(model.services().visible().not_deprecated()),
        vec![".testv2.Service"]
    );
    assert_eq!(
        ids(model.methods().not_deprecated()),
        vec![".testv2.Service:Stream"]
    );
}

#[test]
fn test_group_fields_never_listed() {
    let model = model();
    let group = ".testv2.Message:legacy_group";

    // Registered, and reachable by identifier...
    assert!(model.field(group).is_some());

    // ...but absent from every listing under every filter combination.
    let listings = [
        model.fields(),
        model.fields().visible(),
        model.fields().not_deprecated(),
        model.fields().to_generate(),
        model.fields().to_generate().visible().not_deprecated(),
        model.message(".testv2.Message").unwrap().fields(),
        model.message(".testv2.Message").unwrap().fields().visible(),
    ];
    for listing in listings {
        assert!(listing.iter().all(|f| f.id().as_str() != group));
        assert!(listing.iter().all(|f| !f.is_type(FieldType::Group)));
    }
}

#[test]
fn test_packages_to_generate_are_deduplicated() {
    let model = model();
    assert_eq!(model.packages_to_generate(), vec!["testv2"]);
}

// ============================================================================
// Linking
// ============================================================================

#[test]
fn test_field_types_are_linked() {
    let model = model();
    let field = model.field(".testv2.Message:other_message_field").unwrap();
    assert_eq!(field.type_message().unwrap().id().as_str(), ".testv2.OtherMessage");
    assert!(field.type_enum().is_none());

    let field = model.field(".testv2.Message:embedded_enum_field").unwrap();
    assert_eq!(
        field.type_enum().unwrap().id().as_str(),
        ".testv2.Message.EmbeddedEnum"
    );

    // Across files.
    let stamp = model.field(".testv2.OtherMessage:stamp").unwrap();
    assert_eq!(stamp.type_message().unwrap().file().name(), "common.proto");

    let scalar = model.field(".testv2.Message:repeated_string_field").unwrap();
    assert_eq!(scalar.type_ref(), &TypeRef::Scalar);
    assert!(scalar.type_message().is_none());
}

#[test]
fn test_method_types_are_linked() {
    let model = model();
    let stream = model.method(".testv2.Service:Stream").unwrap();
    assert_eq!(stream.input_type().id().as_str(), ".testv2.Message");
    assert_eq!(stream.output_type().id().as_str(), ".common.Timestamp");
    assert!(stream.server_streaming());
    assert!(!stream.client_streaming());
    assert_eq!(stream.parent().id().as_str(), ".testv2.Service");

    let names: Vec<_> = model
        .service(".testv2.Service")
        .unwrap()
        .methods()
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(names, vec!["Get", "Stream"]);
}

#[test]
fn test_oneof_integrity() {
    let model = model();
    for field in model.fields().iter().filter(|f| f.is_oneof()) {
        let owners: Vec<_> = model
            .oneofs()
            .into_iter()
            .filter(|o| o.fields().contains(field))
            .collect();
        assert_eq!(owners.len(), 1, "{field} belongs to exactly one oneof");
        assert_eq!(owners[0].parent(), field.parent());
        assert_eq!(field.oneof(), Some(owners[0]));
    }

    let oneof = model.oneof(".testv2.Message:oneof_field").unwrap();
    let names: Vec<_> = oneof.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["bool_field", "int_field"]);
    assert_eq!(
        ids(model.oneofs()),
        vec![".testv2.Message:oneof_field", ".testv2.OtherMessage:choice"]
    );
}

// ============================================================================
// Visibility and deprecation
// ============================================================================

#[test]
fn test_private_file_hides_public_message() {
    let model = model();
    let file = model.file_by_name("extra.proto").unwrap();
    assert!(!file.is_visible());
    let hidden = model.message(".testv2.Hidden").unwrap();
    assert!(hidden.meta().is_public());
    assert!(!hidden.is_visible());
}

#[test]
fn test_private_parent_hides_nested_message() {
    let model = model();
    assert!(!model.message(".testv2.PrivateMessage").unwrap().is_visible());
    let inner = model.message(".testv2.PrivateMessage.Inner").unwrap();
    assert!(inner.meta().is_public());
    assert!(!inner.is_visible());
    assert!(!model.message(".testv2.Message.OtherEmbeddedMessage").unwrap().is_visible());
    assert!(model.message(".testv2.Message.EmbeddedMessage").unwrap().is_visible());
}

#[test]
fn test_field_visibility_consults_linked_type() {
    let model = model();
    let message = model.message(".testv2.Message").unwrap();
    let names: Vec<_> = message.fields().visible().iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec![
            "repeated_string_field",
            "enum_field",
            "other_message_field",
            "bool_field",
            "embedded_enum_field",
            "embedded_message_field",
            "int_field",
        ]
    );
    // Public itself, but typed by a private enum.
    let field = model.field(".testv2.Message:other_enum_field").unwrap();
    assert!(field.meta().is_public());
    assert!(!field.is_visible());
}

#[test]
fn test_deprecation_propagates_from_message() {
    let model = model();
    let parent = model.message(".testv2.OtherMessage").unwrap();
    assert!(parent.is_deprecated());
    let field = model.field(".testv2.OtherMessage:text").unwrap();
    assert!(!field.options().deprecated());
    assert!(field.is_deprecated());
    assert!(model.oneof(".testv2.OtherMessage:choice").unwrap().is_deprecated());
    assert!(model.message(".testv2.OtherMessage.LabelsEntry").unwrap().is_deprecated());

    // Through a linked type.
    assert!(model.field(".testv2.Message:other_message_field").unwrap().is_deprecated());
    // Through a method's output type, and through the service.
    assert!(model.method(".testv2.Service:Get").unwrap().is_deprecated());
    assert!(model.method(".testv2.OtherService:Ping").unwrap().is_deprecated());

    // A deprecated file deprecates everything in it.
    assert!(model.message(".testv2.Hidden").unwrap().is_deprecated());
}

#[test]
fn test_enum_values_follow_their_enum() {
    let model = model();
    let values: Vec<_> = model
        .enumeration(".testv2.Enum")
        .unwrap()
        .values()
        .iter()
        .map(|v| (v.name(), v.number(), v.is_deprecated()))
        .collect();
    assert_eq!(
        values,
        vec![("ENUM_UNKNOWN", 0, false), ("ENUM_VALUE", 1, true)]
    );
    assert!(!model.enum_value(".testv2.OtherEnum:OTHER_UNKNOWN").unwrap().is_visible());
    assert!(model.enum_value(".testv2.Enum:ENUM_UNKNOWN").unwrap().is_visible());
}

#[test]
fn test_enum_deprecation_follows_ancestors_by_default() {
    let model = model_with(EnumDeprecationRule::Ancestors);
    let deprecated = |id: &str| model.enumeration(id).unwrap().is_deprecated();
    assert!(!deprecated(".testv2.Enum"));
    assert!(!deprecated(".testv2.Message.EmbeddedEnum"));
    assert!(!deprecated(".common.Zone"));
    assert!(deprecated(".testv2.HiddenEnum"));

    let message = model.message(".testv2.Message").unwrap();
    let names: Vec<_> = message.fields().not_deprecated().iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec![
            "repeated_string_field",
            "enum_field",
            "bool_field",
            "embedded_enum_field",
            "embedded_message_field",
            "int_field",
            "other_enum_field",
        ]
    );
}

#[test]
fn test_enum_deprecation_legacy_visibility_rule() {
    let model = model_with(EnumDeprecationRule::LegacyVisibility);
    let deprecated = |id: &str| model.enumeration(id).unwrap().is_deprecated();
    // Visible enclosing scopes mark the enum deprecated.
    assert!(deprecated(".testv2.Enum"));
    assert!(deprecated(".testv2.Message.EmbeddedEnum"));
    assert!(deprecated(".common.Zone"));
    // A deprecated but private file does not.
    assert!(!deprecated(".testv2.HiddenEnum"));

    let message = model.message(".testv2.Message").unwrap();
    let names: Vec<_> = message.fields().not_deprecated().iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec![
            "repeated_string_field",
            "bool_field",
            "embedded_message_field",
            "int_field",
        ]
    );
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_comments_attach_by_path() {
    let model = model();
    let file = model.file_by_name("testv2.proto").unwrap();
    assert_eq!(file.comments().leading, " testv2 package docs\n");

    let message = model.message(".testv2.Message").unwrap();
    assert_eq!(message.comments().leading, " Message docs\n");
    assert_eq!(message.comments().leading_detached, vec![" detached\n"]);
    assert_eq!(message.comments().to_string(), " Message docs\n");

    let field = model.field(".testv2.Message:string_field").unwrap();
    assert_eq!(field.comments().leading, " string_field docs\n");

    let nested = model.field(".testv2.Message.EmbeddedMessage:uint32_field").unwrap();
    assert_eq!(nested.comments().trailing, " uint32 trailing\n");
    assert!(nested.comments().leading.is_empty());

    let check = |comments: &Comments, leading: &str| assert_eq!(comments.leading, leading);
    check(
        model.oneof(".testv2.Message:oneof_field").unwrap().comments(),
        " oneof docs\n",
    );
    check(
        model.enumeration(".testv2.Message.EmbeddedEnum").unwrap().comments(),
        " EmbeddedEnum docs\n",
    );
    check(model.enumeration(".testv2.Enum").unwrap().comments(), " Enum docs\n");
    check(
        model.enum_value(".testv2.Enum:ENUM_VALUE").unwrap().comments(),
        " ENUM_VALUE docs\n",
    );
    check(model.service(".testv2.Service").unwrap().comments(), " Service docs\n");
    check(
        model.method(".testv2.Service:Stream").unwrap().comments(),
        " Stream docs\n",
    );
}

#[test]
fn test_comment_miss_is_empty() {
    let model = model();
    // Has a location, but no comment text.
    let field = model.field(".testv2.Message:repeated_string_field").unwrap();
    assert_eq!(field.comments(), &Comments::default());
    // No location at all.
    let method = model.method(".testv2.Service:Get").unwrap();
    let comments = method.comments();
    assert!(comments.leading.is_empty());
    assert!(comments.trailing.is_empty());
    assert!(comments.leading_detached.is_empty());
    // File without source info.
    assert!(model.file_by_name("common.proto").unwrap().comments().is_empty());
}

// ============================================================================
// Entity properties
// ============================================================================

#[test]
fn test_file_properties() {
    let model = model();
    let file = model.file_by_name("testv2.proto").unwrap();
    assert_eq!(file.id().as_str(), ".testv2:testv2.proto");
    assert_eq!(file.package(), "testv2");
    assert_eq!(file.syntax(), "proto3");
    assert_eq!(file.dependencies(), ["common.proto".to_string()]);
    assert!(file.is_generated());
    assert_eq!(file.go_package_name(), "testv2pb");
    assert_eq!(file.go_package_import(), "github.com/acme/testv2");
    assert_eq!(
        ids(file.messages()),
        vec![".testv2.Message", ".testv2.OtherMessage", ".testv2.PrivateMessage"]
    );
    assert_eq!(ids(file.enums()), vec![".testv2.Enum", ".testv2.OtherEnum"]);
    assert_eq!(ids(file.services()), vec![".testv2.Service", ".testv2.OtherService"]);

    let common = model.file_by_name("common.proto").unwrap();
    assert!(!common.is_generated());
    assert_eq!(common.go_package_name(), "common.proto");
    assert_eq!(common.go_package_import(), "common.proto");

    assert_eq!(model.parameter(), "templates=./tmpl");
    assert_eq!(model.compiler_version().unwrap().minor, 21);
    assert_eq!(model.files_to_generate(), ["testv2.proto", "extra.proto"]);
}

#[test]
fn test_message_properties() {
    let model = model();
    let message = model.message(".testv2.Message").unwrap();
    assert!(message.meta().has_tag("tag1"));
    assert_eq!(message.meta().extra.get("owner").map(String::as_str), Some("billing"));
    assert_eq!(message.reserved_names(), ["old_field".to_string()]);
    assert!(message.is_reserved_number(20));
    assert!(message.is_reserved_number(29));
    assert!(!message.is_reserved_number(30));
    assert!(!message.is_nested());
    assert_eq!(
        ids(message.messages()),
        vec![
            ".testv2.Message.EmbeddedMessage",
            ".testv2.Message.OtherEmbeddedMessage",
            ".testv2.Message.LegacyGroup",
        ]
    );
    assert_eq!(
        ids(message.enums()),
        vec![".testv2.Message.EmbeddedEnum", ".testv2.Message.OtherEmbeddedEnum"]
    );

    let embedded = model.message(".testv2.Message.EmbeddedMessage").unwrap();
    assert!(embedded.is_nested());
    assert_eq!(embedded.root(), message);
    assert_eq!(embedded.parent(), Some(message));

    assert!(model.message(".testv2.OtherMessage.LabelsEntry").unwrap().is_map_entry());
    assert!(!message.is_map_entry());
}

#[test]
fn test_field_properties() {
    let model = model();
    let field = |id: &str| model.field(id).unwrap();

    let string_field = field(".testv2.Message:string_field");
    assert_eq!(string_field.meta().visibility, Visibility::Private);
    assert_eq!(string_field.meta().generator.as_deref(), Some("email"));
    assert_eq!(string_field.json_name(), "stringField");
    assert_eq!(string_field.type_name_string(), "string");

    let int_field = field(".testv2.Message:int_field");
    assert_eq!(int_field.number(), 9);
    assert_eq!(int_field.default_value(), "42");
    assert_eq!(int_field.label(), FieldLabel::Optional);
    assert!(int_field.is_type(FieldType::Int32));

    assert!(field(".testv2.Message:repeated_string_field").is_repeated());
    assert_eq!(
        field(".testv2.Message:repeated_string_field").type_name_string(),
        "[]string"
    );
    assert_eq!(field(".testv2.Message:enum_field").type_name_string(), "testv2.Enum");
    assert_eq!(
        field(".testv2.Message:embedded_message_field").type_name_string(),
        "[]testv2.Message.EmbeddedMessage"
    );

    // Numeric enum encodings decode like symbolic ones.
    let seconds = field(".common.Timestamp:seconds");
    assert_eq!(seconds.field_type(), FieldType::Int64);
    assert_eq!(seconds.type_name_string(), "int64");
}

// ============================================================================
// Configuration and errors
// ============================================================================

fn request(json: &str) -> CodeGeneratorRequest {
    parse_request_json(json).expect("request parses")
}

#[test]
fn test_custom_extension_names() {
    let req = request(
        r#"{
            "fileToGenerate": ["a.proto"],
            "protoFile": [{
                "name": "a.proto", "package": "a",
                "messageType": [
                    { "name": "Custom", "options": { "[acme.meta.message]": { "visibility": "PRIVATE" } } },
                    { "name": "Default", "options": { "[template.message_meta]": { "visibility": "PRIVATE" } } }
                ]
            }]
        }"#,
    );
    let config = ModelConfig::from_json_str(r#"{"extensions": {"message": "acme.meta.message"}}"#)
        .unwrap();
    let model = Model::from_request(&req, config).unwrap();
    assert!(!model.message(".a.Custom").unwrap().is_visible());
    // The default name is no longer consulted.
    assert!(model.message(".a.Default").unwrap().is_visible());
}

#[test]
fn test_malformed_metadata_falls_back_to_default() {
    let req = request(
        r#"{
            "protoFile": [{
                "name": "a.proto", "package": "a",
                "messageType": [
                    { "name": "M", "options": { "[template.message_meta]": { "visibility": "SECRET" } } }
                ]
            }]
        }"#,
    );
    let model = Model::from_request(&req, ModelConfig::default()).unwrap();
    let message = model.message(".a.M").unwrap();
    assert_eq!(message.meta(), &Metadata::default());
    assert!(message.is_visible());
}

#[test]
fn test_snake_case_standard_options() {
    let req = request(
        r#"{
            "file_to_generate": ["a/b.proto"],
            "proto_file": [{
                "name": "a/b.proto", "package": "a",
                "options": { "go_package": "example.com/foo;foopb" },
                "message_type": [{
                    "name": "M",
                    "nested_type": [{ "name": "LabelsEntry", "options": { "map_entry": true } }]
                }]
            }]
        }"#,
    );
    let model = Model::from_request(&req, ModelConfig::default()).unwrap();

    let file = model.file_by_name("a/b.proto").unwrap();
    assert_eq!(file.go_package_name(), "foopb");
    assert_eq!(file.go_package_import(), "example.com/foo");
    assert!(model.message(".a.M.LabelsEntry").unwrap().is_map_entry());
    assert!(!model.message(".a.M").unwrap().is_map_entry());
}

#[test]
fn test_unresolved_method_type_aborts() {
    let req = request(
        r#"{
            "protoFile": [{
                "name": "a.proto", "package": "a",
                "messageType": [{ "name": "Req" }],
                "service": [{
                    "name": "S",
                    "method": [{ "name": "Call", "inputType": ".a.Req", "outputType": ".a.Missing" }]
                }]
            }]
        }"#,
    );
    let err = Model::from_request(&req, ModelConfig::default()).unwrap_err();
    match err {
        LinkError::UnresolvedMethodType {
            method,
            role,
            type_name,
            ..
        } => {
            assert_eq!(method.as_str(), ".a.S:Call");
            assert_eq!(role, IoRole::Output);
            assert_eq!(type_name, ".a.Missing");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_method_type_from_later_file_aborts() {
    // Dependencies must precede dependents.
    let req = request(
        r#"{
            "protoFile": [
                {
                    "name": "svc.proto", "package": "a",
                    "service": [{
                        "name": "S",
                        "method": [{ "name": "Call", "inputType": ".a.Req", "outputType": ".a.Req" }]
                    }]
                },
                { "name": "types.proto", "package": "a", "messageType": [{ "name": "Req" }] }
            ]
        }"#,
    );
    assert!(matches!(
        Model::from_request(&req, ModelConfig::default()),
        Err(LinkError::UnresolvedMethodType { role: IoRole::Input, .. })
    ));
}

#[test]
fn test_duplicate_type_across_files_aborts() {
    let req = request(
        r#"{
            "protoFile": [
                { "name": "one.proto", "package": "a", "messageType": [{ "name": "M" }] },
                { "name": "two.proto", "package": "a", "messageType": [{ "name": "M" }] }
            ]
        }"#,
    );
    let err = Model::from_request(&req, ModelConfig::default()).unwrap_err();
    assert!(matches!(err, LinkError::DuplicateIdentifier { kind: "message", .. }));
    assert!(err.to_string().contains(".a.M"));
}

#[test]
fn test_partial_request_leaves_field_types_unresolved() {
    let req = request(
        r#"{
            "protoFile": [{
                "name": "a.proto",
                "messageType": [{
                    "name": "M",
                    "field": [{
                        "name": "ext", "number": 1, "type": "TYPE_MESSAGE",
                        "typeName": ".elsewhere.Thing"
                    }]
                }]
            }]
        }"#,
    );
    let model = Model::from_request(&req, ModelConfig::default()).unwrap();
    // Empty package: no doubled dot.
    let field = model.field(".M:ext").unwrap();
    assert!(field.type_message().is_none());
    assert!(field.is_visible());
    assert_eq!(field.type_name_string(), "elsewhere.Thing");
    assert_eq!(model.file_by_name("a.proto").unwrap().syntax(), "proto2");
    assert!(model.packages_to_generate().is_empty());
}

#[test]
fn test_model_is_shared_across_threads() {
    let model = model();
    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| model.messages().visible().len()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(counts.windows(2).all(|w| w[0] == w[1]));
}
