//! Markdown API reference, one section per controller.

use crate::reference::table_cell;
use crate::sample::{self, curl_example};
use modelsmith_core::config::DocsConfig;
use modelsmith_core::model::{Controller, Endpoint, ProjectModel, UNKNOWN_HANDLER};

pub fn render_api_markdown(model: &ProjectModel, title: &str, docs: &DocsConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {title} API Reference\n\n"));
    out.push_str(&format!("Base URL: `{}`\n\n", docs.api_url()));

    let mut controllers: Vec<&Controller> = model.controllers.iter().collect();
    controllers.sort_by(|a, b| a.name.cmp(&b.name));

    if controllers.is_empty() {
        out.push_str("No controllers found.\n");
        return out;
    }

    out.push_str("## Contents\n\n");
    for controller in &controllers {
        out.push_str(&format!(
            "- [{}](#{}) ({} endpoints)\n",
            controller.name,
            controller.name.to_lowercase(),
            controller.endpoints.len()
        ));
    }

    for controller in controllers {
        out.push('\n');
        render_controller(&mut out, model, controller, docs);
    }

    out
}

fn render_controller(out: &mut String, model: &ProjectModel, controller: &Controller, docs: &DocsConfig) {
    out.push_str(&format!("## {}\n\n", controller.name));
    out.push_str(&format!("Base route: `/{}`\n", controller.base_route));
    if controller.is_guarded() {
        out.push_str("\nAll endpoints require a bearer token.\n");
    }

    for endpoint in &controller.endpoints {
        out.push('\n');
        render_endpoint(out, model, controller, endpoint, docs);
    }
}

fn render_endpoint(
    out: &mut String,
    model: &ProjectModel,
    controller: &Controller,
    endpoint: &Endpoint,
    docs: &DocsConfig,
) {
    out.push_str(&format!("### {} {}\n\n", endpoint.http_method, endpoint.route));

    if endpoint.handler_name == UNKNOWN_HANDLER {
        out.push_str("- Handler: _unresolved_\n");
    } else {
        out.push_str(&format!("- Handler: `{}`\n", endpoint.handler_name));
    }
    if !endpoint.path_params.is_empty() {
        out.push_str(&format!("- Path parameters: {}\n", code_list(&endpoint.path_params)));
    }

    let mut query = endpoint.query_params.clone();
    if let Some(ty) = &endpoint.query_param_type_name {
        query.extend(model.dto_fields(ty).iter().map(|f| f.name.clone()));
    }
    if !query.is_empty() {
        out.push_str(&format!("- Query parameters: {}\n", code_list(&query)));
    }
    if let Some(dto) = &endpoint.body_dto_name {
        out.push_str(&format!("- Body: `{dto}`\n"));
    }
    if let Some(status) = endpoint.status_code {
        out.push_str(&format!("- Status: {status}\n"));
    }
    if controller.requires_auth(endpoint) {
        out.push_str("- Auth: bearer token\n");
    }

    if let Some(dto) = &endpoint.body_dto_name {
        let fields = model.dto_fields(dto);
        if !fields.is_empty() {
            out.push_str("\n| Field | Type | Required | Validations |\n");
            out.push_str("|-------|------|----------|-------------|\n");
            for field in fields {
                let validations = field
                    .validations
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                out.push_str(&format!(
                    "| `{}` | `{}` | {} | {} |\n",
                    field.name,
                    table_cell(&field.ty),
                    if sample::is_required(field) { "yes" } else { "no" },
                    table_cell(&validations)
                ));
            }
        }
    }

    out.push_str("\n```bash\n");
    out.push_str(&curl_example(model, controller, endpoint, docs));
    out.push_str("\n```\n");
}

fn code_list(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("`{i}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
