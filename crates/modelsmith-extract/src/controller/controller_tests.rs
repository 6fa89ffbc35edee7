#![allow(non_snake_case)]

use super::*;
use crate::lexer::tokenize;
use proptest::prelude::*;
use test_case::test_case;

fn controller(body: &str) -> Controller {
    let src = format!("@Controller('reviews')\nexport class ReviewsController {{\n{body}\n}}\n");
    extract_controller(&src).unwrap()
}

fn handlers(body: &str) -> Vec<String> {
    controller(body)
        .endpoints
        .into_iter()
        .map(|e| e.handler_name)
        .collect()
}

// extract_controller tests

#[test]
fn extract_controller___get_by_id___resolves_route_handler_and_params() {
    let controller = controller(
        "  @Get(':id')\n  async findOne(@Param('id') id: string) {\n    return this.reviewsService.findOne(id);\n  }",
    );

    assert_eq!(controller.name, "ReviewsController");
    assert_eq!(controller.base_route, "reviews");
    let endpoint = &controller.endpoints[0];
    assert_eq!(endpoint.http_method, HttpMethod::Get);
    assert_eq!(endpoint.route, "/reviews/:id");
    assert_eq!(endpoint.handler_name, "findOne");
    assert_eq!(endpoint.path_params, vec!["id"]);
}

#[test]
fn extract_controller___no_controller_marker___returns_none() {
    assert!(extract_controller("export class Plain { @Get() list() {} }").is_none());
    assert!(extract_controller("@Controller('x')").is_none());
}

#[test]
fn extract_controller___crud_controller___one_endpoint_per_marker() {
    let controller = controller(
        r#"
  constructor(private readonly reviewsService: ReviewsService) {}

  @Post()
  create(@Body() createReviewDto: CreateReviewDto) {
    return this.reviewsService.create(createReviewDto);
  }

  @Get()
  findAll(@Query() query: ListReviewsDto, @Query('page') page: number) {
    return this.reviewsService.findAll(query);
  }

  @Patch(':id')
  update(@Param('id') id: string, @Body() dto: UpdateReviewDto) {
    return this.reviewsService.update(id, dto);
  }

  @Delete(':id')
  @HttpCode(HttpStatus.NO_CONTENT)
  remove(@Param('id') id: string) {
    return this.reviewsService.remove(id);
  }
"#,
    );

    let summary: Vec<(HttpMethod, &str, &str)> = controller
        .endpoints
        .iter()
        .map(|e| (e.http_method, e.route.as_str(), e.handler_name.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (HttpMethod::Post, "/reviews", "create"),
            (HttpMethod::Get, "/reviews", "findAll"),
            (HttpMethod::Patch, "/reviews/:id", "update"),
            (HttpMethod::Delete, "/reviews/:id", "remove"),
        ]
    );

    let endpoints = &controller.endpoints;
    assert_eq!(endpoints[0].body_dto_name.as_deref(), Some("CreateReviewDto"));
    assert_eq!(endpoints[1].query_param_type_name.as_deref(), Some("ListReviewsDto"));
    assert_eq!(endpoints[1].query_params, vec!["page"]);
    assert_eq!(endpoints[2].body_dto_name.as_deref(), Some("UpdateReviewDto"));
    assert_eq!(endpoints[3].status_code, Some(204));
    assert_eq!(endpoints[3].decorators, vec!["HttpCode(HttpStatus.NO_CONTENT)"]);
}

#[test]
fn extract_controller___class_guard___recorded_on_controller() {
    let src = "@Controller('admin')\n@UseGuards(JwtAuthGuard)\nexport class AdminController {\n  @Get()\n  list() {}\n}";

    let controller = extract_controller(src).unwrap();

    assert_eq!(controller.decorators, vec!["UseGuards(JwtAuthGuard)"]);
    assert!(controller.is_guarded());
    assert!(controller.endpoints[0].decorators.is_empty());
}

#[test]
fn extract_controller___endpoint_decorator_run___records_guards_and_status() {
    let controller = controller(
        "  @Post(':id/approve')\n  @UseGuards(JwtAuthGuard, RolesGuard)\n  @HttpCode(200)\n  async approve(@Param('id') id: string, @Req() req: Request) {}",
    );

    let endpoint = &controller.endpoints[0];
    assert_eq!(endpoint.route, "/reviews/:id/approve");
    assert_eq!(endpoint.handler_name, "approve");
    assert_eq!(
        endpoint.decorators,
        vec!["UseGuards(JwtAuthGuard, RolesGuard)", "HttpCode(200)"]
    );
    assert_eq!(endpoint.status_code, Some(200));
    assert!(endpoint.has_guard());
}

#[test]
fn extract_controller___param_not_in_route___is_added() {
    let controller = controller(
        "  @Get(':id')\n  find(@Param('id') id: string, @Param('lang') lang: string) {}",
    );

    assert_eq!(controller.endpoints[0].path_params, vec!["id", "lang"]);
}

#[test]
fn extract_controller___primitive_body___is_not_a_dto() {
    let controller = controller("  @Post()\n  create(@Body() raw: string, @Body('name') name: string) {}");

    assert_eq!(controller.endpoints[0].body_dto_name, None);
}

// handler resolution tiers

#[test]
fn resolve_handler___async_binding_declaration_wins_over_earlier_call() {
    let names = handlers(
        "  @Get()\n  @UseInterceptors(cacheFor(60))\n  async find(@Query() q: ListDto) {}",
    );

    assert_eq!(names, vec!["find"]);
}

#[test]
fn resolve_handler___non_async_binding_declaration() {
    let names = handlers("  @Delete(':id')\n  @HttpCode(204)\n  remove(@Param('id') id: string) {}");

    assert_eq!(names, vec!["remove"]);
}

#[test]
fn resolve_handler___no_binding_marker___first_bare_call() {
    let names = handlers("  @Get('health')\n  check() {\n    return this.status.ok();\n  }");

    assert_eq!(names, vec!["check"]);
}

#[test]
fn resolve_handler___skips_control_flow_and_assignments() {
    let names = handlers("  @Get()\n  x = build();\n  if (ready) {}\n  real() {}");

    assert_eq!(names, vec!["real"]);
}

#[test]
fn extract_controller___guard_factory_call_between_marker_and_method___binds_method() {
    let controller = controller(
        "  @Get()\n  @UseGuards(AuthGuard('jwt'))\n  findAll() {\n    return [];\n  }",
    );

    let endpoint = &controller.endpoints[0];
    assert_eq!(endpoint.handler_name, "findAll");
    assert_eq!(endpoint.decorators, vec!["UseGuards(AuthGuard('jwt'))"]);
}

#[test]
fn extract_controller___interceptor_factory_call___binds_method_and_params() {
    let controller = controller(
        "  @Post('import')\n  @UseInterceptors(FileInterceptor('file'))\n  importCsv(@UploadedFile() file: Express.Multer.File) {}",
    );

    let endpoint = &controller.endpoints[0];
    assert_eq!(endpoint.route, "/reviews/import");
    assert_eq!(endpoint.handler_name, "importCsv");
}

#[test]
fn resolve_handler___calls_inside_decorator_arguments___skipped() {
    let tokens = tokenize("@UseGuards(AuthGuard('jwt')) @Roles(admin()) handle() {}");

    let handler = resolve_handler(&tokens, 0, tokens.len()).unwrap();

    assert_eq!(tokens[handler].text, "handle");
}

#[test]
fn resolve_handler___unterminated_decorator_arguments___unknown() {
    let tokens = tokenize("@UseGuards(AuthGuard('jwt') handle() {}");

    assert_eq!(resolve_handler(&tokens, 0, tokens.len()), None);
}

#[test]
fn resolve_handler___nothing_after_marker___is_unknown() {
    assert_eq!(handlers("  @Get()"), vec![UNKNOWN_HANDLER]);
}

#[test]
fn resolve_handler___window_stops_at_next_marker() {
    let names = handlers("  @Get('a')\n  @Post('b')\n  async create(@Body() dto: CreateDto) {}");

    assert_eq!(names, vec![UNKNOWN_HANDLER, "create"]);
}

#[test]
fn resolve_handler___window_is_bounded_in_size() {
    let filler = "  a = 1;\n".repeat(300);
    let body = format!("  @Get()\n{filler}  late(@Body() b: B) {{}}");

    assert_eq!(handlers(&body), vec![UNKNOWN_HANDLER]);
}

// join_route tests

#[test_case("reviews", ":id", "/reviews/:id")]
#[test_case("reviews", "", "/reviews" ; "empty route is base")]
#[test_case("/api/reviews/", "/:id/", "/api/reviews/:id" ; "slashes collapsed")]
#[test_case("", "", "/" ; "root")]
#[test_case("", "health", "/health" ; "no base")]
fn join_route___joins_and_normalizes(base: &str, route: &str, expected: &str) {
    assert_eq!(join_route(base, route), expected);
}

#[test]
fn route_params___lists_colon_segments() {
    assert_eq!(route_params("/shops/:shopId/items/:id"), vec!["shopId", "id"]);
    assert!(route_params("/health").is_empty());
}

// Property tests

const FRAGMENTS: &[&str] = &[
    "@Get()", "@Post(':id')", "@Delete", "@UseGuards(A)", "async ", "find", "if", "x", "(", ")",
    "{", "}", "@Body() b: B", "@Param('id') id", "=", ".", ";", ",", " ", "\n", "'", "`", "/*",
];

proptest! {
    #[test]
    fn extract_controller___any_body___handlers_are_identifiers_or_unknown(
        parts in prop::collection::vec(prop::sample::select(FRAGMENTS), 0..80)
    ) {
        let src = format!("@Controller('c') export class C {{ {} }}", parts.concat());

        if let Some(controller) = extract_controller(&src) {
            for endpoint in controller.endpoints {
                let name = endpoint.handler_name;
                let is_ident = !name.is_empty()
                    && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$');
                prop_assert!(is_ident, "handler {:?} is not an identifier", name);
                prop_assert!(endpoint.route.starts_with('/'));
            }
        }
    }
}
