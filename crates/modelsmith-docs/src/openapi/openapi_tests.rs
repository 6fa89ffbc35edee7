#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn endpoint(method: HttpMethod, route: &str, handler: &str) -> Endpoint {
    Endpoint {
        http_method: method,
        route: route.to_string(),
        handler_name: handler.to_string(),
        path_params: Vec::new(),
        query_param_type_name: None,
        query_params: Vec::new(),
        body_dto_name: None,
        decorators: Vec::new(),
        status_code: None,
    }
}

fn dto_field(name: &str, ty: &str, validations: Vec<Validation>) -> DtoField {
    DtoField {
        name: name.to_string(),
        ty: ty.to_string(),
        optional: validations.contains(&Validation::Optional),
        validations,
    }
}

fn controller(name: &str, decorators: &[&str], endpoints: Vec<Endpoint>) -> Controller {
    Controller {
        name: name.to_string(),
        base_route: name.trim_end_matches("Controller").to_lowercase(),
        decorators: decorators.iter().map(|d| d.to_string()).collect(),
        endpoints,
        path: None,
    }
}

fn model() -> ProjectModel {
    let mut find_one = endpoint(HttpMethod::Get, "/reviews/:id", "findOne");
    find_one.path_params = vec!["id".to_string()];

    let mut create = endpoint(HttpMethod::Post, "/reviews", "create");
    create.body_dto_name = Some("CreateReviewDto".to_string());

    let mut remove = endpoint(HttpMethod::Delete, "/reviews/:id", "remove");
    remove.path_params = vec!["id".to_string()];
    remove.decorators = vec!["UseGuards(JwtAuthGuard)".to_string()];

    let mut archive = endpoint(HttpMethod::Post, "/reviews/:id/archive", UNKNOWN);
    archive.status_code = Some(200);

    ProjectModel {
        controllers: vec![controller(
            "ReviewsController",
            &[],
            vec![find_one, create, remove, archive],
        )],
        dtos: vec![
            Dto {
                name: "CreateReviewDto".to_string(),
                extends: None,
                fields: vec![
                    dto_field("title", "string", vec![Validation::String, Validation::MaxLength(80)]),
                    dto_field("productId", "string", vec![Validation::Uuid]),
                    dto_field("rating", "number", vec![Validation::Min(1), Validation::Max(5)]),
                    dto_field("tags", "string[]", vec![Validation::Optional, Validation::Array]),
                ],
                path: None,
            },
            Dto {
                name: "UpdateReviewDto".to_string(),
                extends: Some("CreateReviewDto".to_string()),
                fields: Vec::new(),
                path: None,
            },
        ],
        ..ProjectModel::default()
    }
}

const UNKNOWN: &str = modelsmith_core::model::UNKNOWN_HANDLER;

#[test_case("/reviews/:id", "/reviews/{id}" ; "single param")]
#[test_case("/products/:productId/reviews/:id", "/products/{productId}/reviews/{id}" ; "nested params")]
#[test_case("/reviews", "/reviews" ; "no params")]
fn openapi_path___converts_params(route: &str, expected: &str) {
    assert_eq!(openapi_path(route), expected);
}

#[test_case(HttpMethod::Post, None, 201 ; "post")]
#[test_case(HttpMethod::Delete, None, 204 ; "delete")]
#[test_case(HttpMethod::Get, None, 200 ; "get")]
#[test_case(HttpMethod::Patch, None, 200 ; "patch")]
#[test_case(HttpMethod::Post, Some(200), 200 ; "http code overrides")]
fn success_status___by_method(method: HttpMethod, code: Option<u16>, expected: u16) {
    let mut e = endpoint(method, "/x", "x");
    e.status_code = code;

    assert_eq!(success_status(&e), expected);
}

#[test]
fn generate_openapi___document_header() {
    let config = ProjectConfig::from_str("[project]\nname = \"shop\"\nversion = \"1.2.0\"\n").unwrap();

    let doc = generate_openapi(&model(), &config);

    assert_eq!(doc["openapi"], "3.0.3");
    assert_eq!(doc["info"]["title"], "shop");
    assert_eq!(doc["info"]["version"], "1.2.0");
    assert_eq!(doc["servers"][0]["url"], "http://localhost:3000");
}

#[test]
fn generate_openapi___paths_grouped_by_route() {
    let doc = generate_openapi(&model(), &ProjectConfig::default());

    let item = &doc["paths"]["/reviews/{id}"];
    assert_eq!(item["get"]["operationId"], "ReviewsController_findOne");
    assert_eq!(item["get"]["tags"], json!(["Reviews"]));
    assert_eq!(item["get"]["parameters"][0]["in"], "path");
    assert!(item["get"]["responses"]["200"].is_object());
    assert!(item["delete"]["responses"]["204"].is_object());
    assert!(doc["paths"]["/reviews"]["post"]["responses"]["201"].is_object());
}

#[test]
fn generate_openapi___request_body_references_schema() {
    let doc = generate_openapi(&model(), &ProjectConfig::default());

    assert_eq!(
        doc["paths"]["/reviews"]["post"]["requestBody"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/CreateReviewDto"
    );
}

#[test]
fn generate_openapi___guarded_endpoint_only___security_on_that_operation() {
    let doc = generate_openapi(&model(), &ProjectConfig::default());

    let item = &doc["paths"]["/reviews/{id}"];
    assert_eq!(item["delete"]["security"], json!([{ "bearerAuth": [] }]));
    assert!(item["get"].get("security").is_none());
    assert_eq!(
        doc["components"]["securitySchemes"]["bearerAuth"]["scheme"],
        "bearer"
    );
}

#[test]
fn generate_openapi___guarded_controller___every_operation_secured() {
    let mut m = model();
    m.controllers[0].decorators.push("UseGuards(JwtAuthGuard)".to_string());

    let doc = generate_openapi(&m, &ProjectConfig::default());

    assert!(doc["paths"]["/reviews/{id}"]["get"]["security"].is_array());
    assert!(doc["paths"]["/reviews"]["post"]["security"].is_array());
}

#[test]
fn generate_openapi___no_guards___no_security_schemes() {
    let mut m = model();
    m.controllers[0].endpoints[2].decorators.clear();

    let doc = generate_openapi(&m, &ProjectConfig::default());

    assert!(doc["components"].get("securitySchemes").is_none());
}

#[test]
fn generate_openapi___unresolved_handler___no_operation_id_and_http_code_status() {
    let doc = generate_openapi(&model(), &ProjectConfig::default());

    let op = &doc["paths"]["/reviews/{id}/archive"]["post"];
    assert!(op.get("operationId").is_none());
    assert!(op["responses"]["200"].is_object());
    assert!(op["responses"].get("201").is_none());
}

#[test]
fn generate_openapi___dto_schema_properties() {
    let doc = generate_openapi(&model(), &ProjectConfig::default());

    let schema = &doc["components"]["schemas"]["CreateReviewDto"];
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(["title", "productId", "rating"]));
    assert_eq!(
        schema["properties"]["title"],
        json!({ "type": "string", "maxLength": 80 })
    );
    assert_eq!(
        schema["properties"]["productId"],
        json!({ "type": "string", "format": "uuid" })
    );
    assert_eq!(
        schema["properties"]["rating"],
        json!({ "type": "number", "minimum": 1, "maximum": 5 })
    );
    assert_eq!(
        schema["properties"]["tags"],
        json!({ "type": "array", "items": { "type": "string" } })
    );
}

#[test]
fn generate_openapi___extending_dto___all_of_base() {
    let doc = generate_openapi(&model(), &ProjectConfig::default());

    let schema = &doc["components"]["schemas"]["UpdateReviewDto"];
    assert_eq!(
        schema["allOf"][0]["$ref"],
        "#/components/schemas/CreateReviewDto"
    );
    assert_eq!(schema["allOf"][1]["type"], "object");
}
