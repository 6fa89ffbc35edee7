//! OpenAPI 3.0 document generation.
//!
//! Paths come from controller endpoints, schemas from DTOs:
//!
//! | Source | OpenAPI |
//! |--------|---------|
//! | `/reviews/:id` | `/reviews/{id}` |
//! | `POST` / `DELETE` / other | `201` / `204` / `200`, unless `@HttpCode` says otherwise |
//! | guard decorator on endpoint or controller | `security: [{ bearerAuth: [] }]` |
//! | `@Body() dto: CreateXDto` | `requestBody` referencing `#/components/schemas/CreateXDto` |

use crate::sample::is_required;
use modelsmith_core::config::ProjectConfig;
use modelsmith_core::model::{Controller, Dto, DtoField, Endpoint, HttpMethod, ProjectModel, Validation};
use serde_json::{Map, Value, json};

pub const OPENAPI_VERSION: &str = "3.0.3";

/// Build the OpenAPI document for a project model.
pub fn generate_openapi(model: &ProjectModel, config: &ProjectConfig) -> Value {
    let mut paths = Map::new();
    let mut any_guarded = false;

    for (controller, endpoint) in model.endpoints() {
        let guarded = controller.requires_auth(endpoint);
        any_guarded |= guarded;

        let path = openapi_path(&endpoint.route);
        let item = paths.entry(path).or_insert_with(|| json!({}));
        item[endpoint.http_method.as_lower()] = operation(model, controller, endpoint, guarded);
    }

    let mut schemas = Map::new();
    for dto in &model.dtos {
        schemas.insert(dto.name.clone(), dto_schema(model, dto));
    }

    let mut components = json!({ "schemas": schemas });
    if any_guarded {
        components["securitySchemes"] = json!({
            "bearerAuth": {
                "type": "http",
                "scheme": "bearer",
                "bearerFormat": "JWT",
            }
        });
    }

    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": config.title(),
            "version": config.project.version,
        },
        "servers": [{ "url": config.docs.api_url() }],
        "paths": paths,
        "components": components,
    })
}

/// `/reviews/:id` → `/reviews/{id}`
pub fn openapi_path(route: &str) -> String {
    route
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(param) => format!("{{{param}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Documented success status of an endpoint
pub fn success_status(endpoint: &Endpoint) -> u16 {
    endpoint.status_code.unwrap_or(match endpoint.http_method {
        HttpMethod::Post => 201,
        HttpMethod::Delete => 204,
        _ => 200,
    })
}

fn operation(model: &ProjectModel, controller: &Controller, endpoint: &Endpoint, guarded: bool) -> Value {
    let mut parameters: Vec<Value> = endpoint
        .path_params
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "in": "path",
                "required": true,
                "schema": { "type": "string" },
            })
        })
        .collect();

    for name in &endpoint.query_params {
        parameters.push(json!({
            "name": name,
            "in": "query",
            "required": false,
            "schema": { "type": "string" },
        }));
    }
    if let Some(ty) = &endpoint.query_param_type_name {
        for field in model.dto_fields(ty) {
            parameters.push(json!({
                "name": field.name,
                "in": "query",
                "required": is_required(field),
                "schema": field_schema(model, field),
            }));
        }
    }

    let status = success_status(endpoint);
    let mut responses = Map::new();
    responses.insert(
        status.to_string(),
        json!({ "description": status_description(status) }),
    );
    let mut op = json!({
        "tags": [controller_tag(controller)],
        "responses": responses,
    });

    if !endpoint.is_unresolved() {
        op["operationId"] = json!(format!("{}_{}", controller.name, endpoint.handler_name));
    }
    if !parameters.is_empty() {
        op["parameters"] = json!(parameters);
    }
    if let Some(dto) = &endpoint.body_dto_name {
        let schema = if model.dto(dto).is_some() {
            json!({ "$ref": format!("#/components/schemas/{dto}") })
        } else {
            json!({ "type": "object" })
        };
        op["requestBody"] = json!({
            "required": true,
            "content": { "application/json": { "schema": schema } },
        });
    }
    if guarded {
        op["security"] = json!([{ "bearerAuth": [] }]);
    }

    op
}

fn controller_tag(controller: &Controller) -> String {
    controller
        .name
        .strip_suffix("Controller")
        .filter(|s| !s.is_empty())
        .unwrap_or(&controller.name)
        .to_string()
}

fn status_description(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        _ => "Success",
    }
}

fn dto_schema(model: &ProjectModel, dto: &Dto) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in &dto.fields {
        properties.insert(field.name.clone(), field_schema(model, field));
        if is_required(field) {
            required.push(field.name.clone());
        }
    }

    let mut schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }

    match dto.extends.as_deref().filter(|base| model.dto(base).is_some()) {
        Some(base) => json!({
            "allOf": [
                { "$ref": format!("#/components/schemas/{base}") },
                schema,
            ]
        }),
        None => schema,
    }
}

fn field_schema(model: &ProjectModel, field: &DtoField) -> Value {
    if field.is_array() {
        let element = field
            .ty
            .trim()
            .strip_suffix("[]")
            .or_else(|| {
                field
                    .ty
                    .trim()
                    .strip_prefix("Array<")
                    .and_then(|t| t.strip_suffix('>'))
            })
            .unwrap_or("string");
        return json!({
            "type": "array",
            "items": type_schema(model, element),
        });
    }

    let mut schema = if field.has(&Validation::Uuid) {
        json!({ "type": "string", "format": "uuid" })
    } else if field.has(&Validation::Email) {
        json!({ "type": "string", "format": "email" })
    } else if field.has(&Validation::Number) {
        json!({ "type": "number" })
    } else if field.has(&Validation::Boolean) {
        json!({ "type": "boolean" })
    } else {
        type_schema(model, field.ty.trim())
    };

    for validation in &field.validations {
        match validation {
            Validation::MinLength(n) => schema["minLength"] = json!(n),
            Validation::MaxLength(n) => schema["maxLength"] = json!(n),
            Validation::Min(n) => schema["minimum"] = json!(n),
            Validation::Max(n) => schema["maximum"] = json!(n),
            _ => {}
        }
    }

    schema
}

/// Schema for a declared TypeScript type
fn type_schema(model: &ProjectModel, ty: &str) -> Value {
    match ty {
        "number" => json!({ "type": "number" }),
        "boolean" => json!({ "type": "boolean" }),
        "Date" => json!({ "type": "string", "format": "date-time" }),
        name if model.dto(name).is_some() => {
            json!({ "$ref": format!("#/components/schemas/{name}") })
        }
        _ => json!({ "type": "string" }),
    }
}

#[cfg(test)]
#[path = "openapi/openapi_tests.rs"]
mod openapi_tests;
