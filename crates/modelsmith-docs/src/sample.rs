//! Example values and `curl` requests for documented endpoints.

use modelsmith_core::config::DocsConfig;
use modelsmith_core::model::{Controller, DtoField, Endpoint, ProjectModel, Validation};
use serde_json::{Map, Value, json};

pub const EXAMPLE_UUID: &str = "123e4567-e89b-12d3-a456-426614174000";
pub const EXAMPLE_EMAIL: &str = "user@example.com";
pub const EXAMPLE_TOKEN: &str = "<token>";

/// Literal example for one DTO field, chosen from its validations and type
pub fn example_value(field: &DtoField) -> Value {
    let ty = field.ty.trim();
    if field.is_array() {
        json!([])
    } else if field.has(&Validation::Uuid) {
        json!(EXAMPLE_UUID)
    } else if field.has(&Validation::Email) {
        json!(EXAMPLE_EMAIL)
    } else if field.has(&Validation::Number) || ty == "number" {
        json!(0)
    } else if field.has(&Validation::Boolean) || ty == "boolean" {
        json!(true)
    } else {
        json!("string")
    }
}

/// Whether a client has to send this field
pub fn is_required(field: &DtoField) -> bool {
    !field.optional && !field.has(&Validation::Optional)
}

/// Example JSON body with every required field of a DTO, inherited ones included
pub fn example_body(model: &ProjectModel, dto: &str) -> Option<Value> {
    model.dto(dto)?;
    let body: Map<String, Value> = model
        .dto_fields(dto)
        .into_iter()
        .filter(|f| is_required(f))
        .map(|f| (f.name.clone(), example_value(f)))
        .collect();
    Some(Value::Object(body))
}

/// Stand-in for a path parameter
pub fn path_param_example(name: &str) -> &'static str {
    if name == "id" || name.ends_with("Id") || name.ends_with("_id") {
        EXAMPLE_UUID
    } else {
        "example"
    }
}

/// Route with every `:param` replaced by its example literal
pub fn example_path(route: &str) -> String {
    route
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(param) => path_param_example(param),
            None => segment,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Runnable `curl` invocation for one endpoint
pub fn curl_example(
    model: &ProjectModel,
    controller: &Controller,
    endpoint: &Endpoint,
    docs: &DocsConfig,
) -> String {
    let mut lines = vec![format!(
        "curl -X {} '{}{}'",
        endpoint.http_method,
        docs.api_url(),
        example_path(&endpoint.route)
    )];

    if controller.requires_auth(endpoint) {
        lines.push(format!("-H 'Authorization: Bearer {EXAMPLE_TOKEN}'"));
    }

    let body = endpoint
        .body_dto_name
        .as_deref()
        .and_then(|dto| example_body(model, dto));
    if let Some(body) = body {
        lines.push("-H 'Content-Type: application/json'".to_string());
        lines.push(format!("-d '{body}'"));
    }

    lines.join(" \\\n  ")
}
