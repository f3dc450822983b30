//! Model rendering for `protolink inspect`.

use colored::Colorize;
use protolink_model::{
    Enum, Field, File, Message, Model, Selection, Semantic, Service,
};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, Default)]
pub struct Filter {
    pub generated_only: bool,
    pub visible_only: bool,
}

impl Filter {
    fn files<'m>(&self, model: &'m Model) -> Selection<File<'m>> {
        let files = model.files();
        if self.generated_only {
            files.to_generate()
        } else {
            files
        }
    }

    fn apply<T: Semantic>(&self, items: Selection<T>) -> Selection<T> {
        if self.visible_only {
            items.visible()
        } else {
            items
        }
    }
}

// =============================================================================
// Tree
// =============================================================================

pub fn render_tree(model: &Model, filter: Filter) -> String {
    let mut out = String::new();
    for file in filter.files(model) {
        let mut flags = Vec::new();
        if file.is_generated() {
            flags.push("generate");
        }
        flags.extend(markers(&file));
        let _ = writeln!(
            out,
            "{} {} (package {}, {}){}",
            "file".green().bold(),
            file.name().bold(),
            display_package(file.package()),
            file.syntax(),
            flag_suffix(&flags)
        );
        for message in filter.apply(file.messages()) {
            render_message(&mut out, message, filter, 1);
        }
        for enumeration in filter.apply(file.enums()) {
            render_enum(&mut out, enumeration, filter, 1);
        }
        for service in filter.apply(file.services()) {
            render_service(&mut out, service, filter);
        }
    }
    out
}

fn render_message(out: &mut String, message: Message<'_>, filter: Filter, depth: usize) {
    let pad = "  ".repeat(depth);
    let _ = writeln!(
        out,
        "{pad}{} {}{}",
        "message".cyan(),
        message.id(),
        flag_suffix(&markers(&message))
    );
    for field in filter.apply(message.fields()) {
        render_field(out, field, depth + 1);
    }
    for oneof in filter.apply(message.oneofs()) {
        let members: Vec<_> = oneof.fields().iter().map(|f| f.name()).collect();
        let _ = writeln!(out, "{pad}  oneof {} {{{}}}", oneof.name(), members.join(", "));
    }
    for nested in filter.apply(message.messages()) {
        render_message(out, nested, filter, depth + 1);
    }
    for enumeration in filter.apply(message.enums()) {
        render_enum(out, enumeration, filter, depth + 1);
    }
}

fn render_field(out: &mut String, field: Field<'_>, depth: usize) {
    let pad = "  ".repeat(depth);
    let _ = writeln!(
        out,
        "{pad}field {} = {} : {}{}",
        field.name(),
        field.number(),
        field.type_name_string(),
        flag_suffix(&markers(&field))
    );
}

fn render_enum(out: &mut String, enumeration: Enum<'_>, filter: Filter, depth: usize) {
    let pad = "  ".repeat(depth);
    let _ = writeln!(
        out,
        "{pad}{} {}{}",
        "enum".magenta(),
        enumeration.id(),
        flag_suffix(&markers(&enumeration))
    );
    for value in filter.apply(enumeration.values()) {
        let _ = writeln!(
            out,
            "{pad}  value {} = {}{}",
            value.name(),
            value.number(),
            flag_suffix(&markers(&value))
        );
    }
}

fn render_service(out: &mut String, service: Service<'_>, filter: Filter) {
    let _ = writeln!(
        out,
        "  {} {}{}",
        "service".blue(),
        service.id(),
        flag_suffix(&markers(&service))
    );
    for method in filter.apply(service.methods()) {
        let stream = |on: bool| if on { "stream " } else { "" };
        let _ = writeln!(
            out,
            "    rpc {}({}{}) returns ({}{}){}",
            method.name(),
            stream(method.client_streaming()),
            method.input_type().id(),
            stream(method.server_streaming()),
            method.output_type().id(),
            flag_suffix(&markers(&method))
        );
    }
}

fn markers(entity: &impl Semantic) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if !entity.is_visible() {
        flags.push("hidden");
    }
    if entity.is_deprecated() {
        flags.push("deprecated");
    }
    flags
}

fn flag_suffix(flags: &[&str]) -> String {
    if flags.is_empty() {
        String::new()
    } else {
        format!(" {}", format!("[{}]", flags.join(", ")).yellow())
    }
}

fn display_package(package: &str) -> &str {
    if package.is_empty() {
        "<none>"
    } else {
        package
    }
}

// =============================================================================
// JSON
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ModelSummary<'m> {
    pub parameter: &'m str,
    pub packages_to_generate: Vec<&'m str>,
    pub files: Vec<FileSummary<'m>>,
}

#[derive(Debug, Serialize)]
pub struct FileSummary<'m> {
    pub id: &'m str,
    pub name: &'m str,
    pub package: &'m str,
    pub syntax: &'m str,
    pub generate: bool,
    pub visible: bool,
    pub deprecated: bool,
    pub messages: Vec<MessageSummary<'m>>,
    pub enums: Vec<EnumSummary<'m>>,
    pub services: Vec<ServiceSummary<'m>>,
}

#[derive(Debug, Serialize)]
pub struct MessageSummary<'m> {
    pub id: &'m str,
    pub visible: bool,
    pub deprecated: bool,
    pub fields: Vec<FieldSummary<'m>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub oneofs: Vec<&'m str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<MessageSummary<'m>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumSummary<'m>>,
}

#[derive(Debug, Serialize)]
pub struct FieldSummary<'m> {
    pub name: &'m str,
    pub number: i32,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oneof: Option<&'m str>,
    pub visible: bool,
    pub deprecated: bool,
}

#[derive(Debug, Serialize)]
pub struct EnumSummary<'m> {
    pub id: &'m str,
    pub visible: bool,
    pub deprecated: bool,
    pub values: Vec<(&'m str, i32)>,
}

#[derive(Debug, Serialize)]
pub struct ServiceSummary<'m> {
    pub id: &'m str,
    pub visible: bool,
    pub deprecated: bool,
    pub methods: Vec<MethodSummary<'m>>,
}

#[derive(Debug, Serialize)]
pub struct MethodSummary<'m> {
    pub name: &'m str,
    pub input: &'m str,
    pub output: &'m str,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub visible: bool,
    pub deprecated: bool,
}

pub fn summarize(model: &Model, filter: Filter) -> ModelSummary<'_> {
    ModelSummary {
        parameter: model.parameter(),
        packages_to_generate: model.packages_to_generate(),
        files: filter
            .files(model)
            .into_iter()
            .map(|file| FileSummary {
                id: file.id().as_str(),
                name: file.name(),
                package: file.package(),
                syntax: file.syntax(),
                generate: file.is_generated(),
                visible: file.is_visible(),
                deprecated: file.is_deprecated(),
                messages: filter
                    .apply(file.messages())
                    .into_iter()
                    .map(|m| summarize_message(m, filter))
                    .collect(),
                enums: filter
                    .apply(file.enums())
                    .into_iter()
                    .map(|e| summarize_enum(e, filter))
                    .collect(),
                services: filter
                    .apply(file.services())
                    .into_iter()
                    .map(|s| summarize_service(s, filter))
                    .collect(),
            })
            .collect(),
    }
}

fn summarize_message<'m>(message: Message<'m>, filter: Filter) -> MessageSummary<'m> {
    MessageSummary {
        id: message.id().as_str(),
        visible: message.is_visible(),
        deprecated: message.is_deprecated(),
        fields: filter
            .apply(message.fields())
            .into_iter()
            .map(|f| FieldSummary {
                name: f.name(),
                number: f.number(),
                type_name: f.type_name_string(),
                oneof: f.oneof().map(|o| o.name()),
                visible: f.is_visible(),
                deprecated: f.is_deprecated(),
            })
            .collect(),
        oneofs: filter
            .apply(message.oneofs())
            .into_iter()
            .map(|o| o.name())
            .collect(),
        messages: filter
            .apply(message.messages())
            .into_iter()
            .map(|m| summarize_message(m, filter))
            .collect(),
        enums: filter
            .apply(message.enums())
            .into_iter()
            .map(|e| summarize_enum(e, filter))
            .collect(),
    }
}

fn summarize_enum<'m>(enumeration: Enum<'m>, filter: Filter) -> EnumSummary<'m> {
    EnumSummary {
        id: enumeration.id().as_str(),
        visible: enumeration.is_visible(),
        deprecated: enumeration.is_deprecated(),
        values: filter
            .apply(enumeration.values())
            .into_iter()
            .map(|v| (v.name(), v.number()))
            .collect(),
    }
}

fn summarize_service<'m>(service: Service<'m>, filter: Filter) -> ServiceSummary<'m> {
    ServiceSummary {
        id: service.id().as_str(),
        visible: service.is_visible(),
        deprecated: service.is_deprecated(),
        methods: filter
            .apply(service.methods())
            .into_iter()
            .map(|m| MethodSummary {
                name: m.name(),
                input: m.input_type().id().as_str(),
                output: m.output_type().id().as_str(),
                client_streaming: m.client_streaming(),
                server_streaming: m.server_streaming(),
                visible: m.is_visible(),
                deprecated: m.is_deprecated(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protolink_descriptor::parse_request_json;
    use protolink_model::ModelConfig;

    const REQUEST: &str = r#"{
        "fileToGenerate": ["shop.proto"],
        "protoFile": [{
            "name": "shop.proto",
            "package": "shop",
            "messageType": [
                {
                    "name": "Order",
                    "field": [
                        { "name": "id", "number": 1, "type": "TYPE_STRING" },
                        { "name": "lines", "number": 2, "label": "LABEL_REPEATED",
                          "type": "TYPE_MESSAGE", "typeName": ".shop.Order.Line" }
                    ],
                    "nestedType": [{ "name": "Line" }]
                },
                {
                    "name": "Internal",
                    "options": { "[template.message_meta]": { "visibility": "PRIVATE" } }
                }
            ],
            "service": [{
                "name": "Orders",
                "method": [{
                    "name": "Watch", "inputType": ".shop.Order", "outputType": ".shop.Order",
                    "serverStreaming": true
                }]
            }]
        }]
    }"#;

    fn model() -> Model {
        let request = parse_request_json(REQUEST).unwrap();
        Model::from_request(&request, ModelConfig::default()).unwrap()
    }

    #[test]
    fn tree_lists_declarations() {
        colored::control::set_override(false);
        let tree = render_tree(&model(), Filter::default());
        assert!(tree.contains("file shop.proto (package shop, proto2) [generate]"));
        assert!(tree.contains("  message .shop.Order\n"));
        assert!(tree.contains("    field lines = 2 : []shop.Order.Line\n"));
        assert!(tree.contains("    message .shop.Order.Line\n"));
        assert!(tree.contains("  message .shop.Internal [hidden]\n"));
        assert!(tree.contains("rpc Watch(.shop.Order) returns (stream .shop.Order)"));
    }

    #[test]
    fn visible_only_drops_hidden_entities() {
        colored::control::set_override(false);
        let filter = Filter {
            visible_only: true,
            ..Filter::default()
        };
        let tree = render_tree(&model(), filter);
        assert!(!tree.contains(".shop.Internal"));
        assert!(tree.contains(".shop.Order"));
    }

    #[test]
    fn json_summary_shape() {
        let model = model();
        let summary = summarize(&model, Filter::default());
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["packages_to_generate"], serde_json::json!(["shop"]));
        let order = &value["files"][0]["messages"][0];
        assert_eq!(order["id"], ".shop.Order");
        assert_eq!(order["fields"][1]["type"], "[]shop.Order.Line");
        assert_eq!(order["messages"][0]["id"], ".shop.Order.Line");
        assert!(order.get("oneofs").is_none());
        let method = &value["files"][0]["services"][0]["methods"][0];
        assert_eq!(method["server_streaming"], true);
    }
}
