#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn names(entity: &str) -> Names {
    Names::new(entity, &NamingConfig::default())
}

fn review_fields() -> Vec<Field> {
    vec![
        Field::new("name", SemanticType::String),
        Field::new("description", SemanticType::Text).nullable(),
    ]
}

fn product_relation() -> Relation {
    Relation {
        name: "product".to_string(),
        kind: RelationKind::ManyToOne,
        owner_entity: "Review".to_string(),
        target_entity: "Product".to_string(),
        foreign_key_name: Some("product_id".to_string()),
        nullable: true,
    }
}

fn validator_names(validators: &[Validator]) -> Vec<&'static str> {
    validators.iter().map(|v| v.name).collect()
}

// TemplateContext tests

#[test]
fn TemplateContext___apply___replaces_every_occurrence() {
    let ctx = TemplateContext::new().set("name", "Review").set("file", "review");

    let out = ctx.apply("{{name}} in {{file}}.ts, again {{name}}; {{unknown}} stays");

    assert_eq!(out, "Review in review.ts, again Review; {{unknown}} stays");
}

// Names tests

#[test]
fn Names___compound_entity___derives_all_forms() {
    let n = names("OrderItem");

    assert_eq!(n.entity_camel, "orderItem");
    assert_eq!(n.entity_file, "order-item");
    assert_eq!(n.folder, "order-items");
    assert_eq!(n.plural, "OrderItems");
    assert_eq!(n.plural_camel, "orderItems");
    assert_eq!(n.table, "orderitems");
}

#[test]
fn Names___naming_override___sets_folder_and_class_prefix() {
    let mut naming_config = NamingConfig::default();
    naming_config
        .modules
        .insert("Person".to_string(), "people".to_string());

    let n = Names::new("Person", &naming_config);

    assert_eq!(n.folder, "people");
    assert_eq!(n.plural, "People");
}

// dto_validators tests

#[test_case(SemanticType::String, false, &["IsString", "IsNotEmpty"] ; "required string")]
#[test_case(SemanticType::Text, false, &["IsString", "IsNotEmpty"] ; "required text")]
#[test_case(SemanticType::Number, false, &["IsNumber"] ; "required number")]
#[test_case(SemanticType::Uuid, false, &["IsUUID"] ; "required uuid")]
#[test_case(SemanticType::Json, false, &["IsObject"] ; "required json")]
#[test_case(SemanticType::String, true, &["IsOptional"] ; "optional string")]
#[test_case(SemanticType::Text, true, &["IsOptional"] ; "optional text")]
#[test_case(SemanticType::Number, true, &["IsOptional", "IsNumber"] ; "optional number")]
#[test_case(SemanticType::Uuid, true, &["IsOptional", "IsUUID"] ; "optional uuid")]
#[test_case(SemanticType::Json, true, &["IsOptional", "IsObject"] ; "optional json")]
fn dto_validators___by_type_and_optionality(ty: SemanticType, optional: bool, expected: &[&str]) {
    assert_eq!(validator_names(&dto_validators(ty, optional, None)), expected);
}

#[test]
fn dto_validators___explicit_length___appends_max_length() {
    let validators = dto_validators(SemanticType::String, false, Some(80));

    assert_eq!(validators.last().unwrap().to_string(), "@MaxLength(80)");
    assert_eq!(validators.len(), 3);
}

#[test]
fn dto_validators___length_on_number___ignored() {
    let validators = dto_validators(SemanticType::Number, false, Some(80));

    assert_eq!(validator_names(&validators), vec!["IsNumber"]);
}

// entity tests

#[test]
fn render_entity___fields_and_relation___emits_markers() {
    let out = render_entity(&names("Review"), &review_fields(), &[product_relation()]);

    assert!(out.starts_with(
        "import { Column, CreateDateColumn, Entity, JoinColumn, ManyToOne, PrimaryGeneratedColumn, UpdateDateColumn } from 'typeorm';\n"
    ));
    assert!(out.contains("import { Product } from './product.entity';\n\n@Entity('reviews')"));
    assert!(out.contains("  @Column({ type: 'varchar', length: 255 })\n  name: string;\n"));
    assert!(out.contains("  @Column({ type: 'text', nullable: true })\n  description?: string;\n"));
    assert!(out.contains(
        "  @ManyToOne(() => Product, { nullable: true })\n  @JoinColumn({ name: 'product_id' })\n  product?: Product;\n"
    ));
    assert!(!out.contains("{{"));
}

#[test]
fn render_entity___no_fields___omits_column_import() {
    let out = render_entity(&names("Tag"), &[], &[]);

    assert!(out.starts_with(
        "import { CreateDateColumn, Entity, PrimaryGeneratedColumn, UpdateDateColumn } from 'typeorm';\n\n@Entity('tags')"
    ));
}

#[test]
fn render_entity___to_many___uses_inverse_and_join_table() {
    let reviews = Relation {
        name: "reviews".to_string(),
        kind: RelationKind::OneToMany,
        owner_entity: "Product".to_string(),
        target_entity: "Review".to_string(),
        foreign_key_name: None,
        nullable: false,
    };
    let tags = Relation {
        name: "tags".to_string(),
        kind: RelationKind::ManyToMany,
        target_entity: "Tag".to_string(),
        ..reviews.clone()
    };

    let out = render_entity(&names("Product"), &[], &[reviews, tags]);

    assert!(out.contains("  @OneToMany(() => Review, (review) => review.product)\n  reviews: Review[];\n"));
    assert!(out.contains("  @ManyToMany(() => Tag)\n  @JoinTable()\n  tags: Tag[];\n"));
    assert!(out.contains("JoinTable, ManyToMany, OneToMany"));
}

#[test]
fn render_entity___same_input___identical_output() {
    let a = render_entity(&names("Review"), &review_fields(), &[product_relation()]);
    let b = render_entity(&names("Review"), &review_fields(), &[product_relation()]);

    assert_eq!(a, b);
}

// dto tests

#[test]
fn render_create_dto___review___validators_and_optional_marks() {
    let out = render_create_dto(&names("Review"), &review_fields(), &[]);

    assert_eq!(
        out,
        "import { IsNotEmpty, IsOptional, IsString } from 'class-validator';\n\n\
         export class CreateReviewDto {\n\
         \x20 @IsString()\n\
         \x20 @IsNotEmpty()\n\
         \x20 name: string;\n\
         \n\
         \x20 @IsOptional()\n\
         \x20 description?: string;\n\
         }\n"
    );
}

#[test]
fn render_create_dto___owned_relation___adds_id_property() {
    let out = render_create_dto(&names("Review"), &[], &[product_relation()]);

    assert!(out.contains("  @IsOptional()\n  @IsUUID()\n  productId?: string;\n"));
}

#[test]
fn render_create_dto___no_fields___no_validator_import() {
    let out = render_create_dto(&names("Tag"), &[], &[]);

    assert_eq!(out, "export class CreateTagDto {\n}\n");
}

#[test]
fn render_update_dto___extends_partial_create() {
    let out = render_update_dto(&names("OrderItem"));

    assert!(out.contains("import { CreateOrderItemDto } from './create-order-item.dto';"));
    assert!(out.contains("export class UpdateOrderItemDto extends PartialType(CreateOrderItemDto) {}"));
}

// service / controller / module tests

#[test]
fn render_service___lists_relations_in_find_options() {
    let out = render_service(
        &names("Review"),
        &[product_relation()],
        "../../entities/review.entity",
    );

    assert!(out.contains("import { Review } from '../../entities/review.entity';"));
    assert!(out.contains("export class ReviewsService {"));
    assert_eq!(out.matches("relations: ['product'],").count(), 2);
    assert!(out.contains("async findAll(page = 1, limit = 10): Promise<Paginated<Review>>"));
}

#[test]
fn render_controller___maps_rest_verbs_to_crud() {
    let out = render_controller(&names("Review"));

    assert!(out.contains("@Controller('reviews')"));
    assert!(out.contains("import { ReviewsService } from './reviews.service';"));
    for handler in ["create(", "findAll(", "findOne(", "update(", "remove("] {
        assert!(out.contains(handler), "missing {handler}");
    }
}

#[test]
fn render_module___full_and_stub() {
    let full = render_module(&names("Review"), "../../entities/review.entity");
    let stub = render_module_stub(&names("Review"));

    assert!(full.contains("imports: [TypeOrmModule.forFeature([Review])],"));
    assert!(full.contains("export class ReviewsModule {}"));
    assert!(!stub.contains("TypeOrmModule"));
    assert!(stub.contains("export class ReviewsModule {}"));
}

// migration tests

#[test]
fn render_migration___columns_and_foreign_key() {
    let out = render_migration(&names("Review"), &review_fields(), &[product_relation()]);

    assert!(out.contains("export class CreateReviewsTable implements MigrationInterface"));
    assert!(out.contains("import { MigrationInterface, QueryRunner, Table, TableForeignKey } from 'typeorm';"));
    assert!(out.contains("{ name: 'name', type: 'varchar', length: '255', isNullable: false },"));
    assert!(out.contains("{ name: 'description', type: 'text', isNullable: true },"));
    assert!(out.contains("{ name: 'product_id', type: 'uuid', isNullable: true },"));
    assert!(out.contains("referencedTableName: 'products',"));
    assert!(out.contains("onDelete: 'SET NULL',"));
    assert!(out.contains("await queryRunner.dropTable('reviews');"));
}

#[test]
fn render_migration___without_relations___is_deterministic_and_key_free() {
    let a = render_migration(&names("Review"), &review_fields(), &[]);
    let b = render_migration(&names("Review"), &review_fields(), &[]);

    assert_eq!(a, b);
    assert!(!a.contains("TableForeignKey"));
    assert!(!a.contains("{{"));
}

#[test]
fn migration_file_name___timestamp_prefix() {
    assert_eq!(
        migration_file_name(&names("OrderItem"), "1700000000000"),
        "1700000000000-CreateOrderItemsTable.ts"
    );
}

// frontend tests

#[test_case("Review", "reviews", "reviewsApi", "useReviews")]
#[test_case("reviews", "reviews", "reviewsApi", "useReviews")]
#[test_case("useReviews", "reviews", "reviewsApi", "useReviews")]
#[test_case("OrderItem", "order-items", "orderItemsApi", "useOrderItems")]
fn ResourceNames___singular_or_plural___same_resource(input: &str, route: &str, api: &str, hook: &str) {
    let resource = ResourceNames::new(input);

    assert_eq!(resource.route, route);
    assert_eq!(resource.api_object, api);
    assert_eq!(resource.hook, hook);
}

#[test]
fn render_component___props_interface_and_destructure() {
    let props = vec![
        Prop {
            name: "title".to_string(),
            ty: "string".to_string(),
            optional: false,
        },
        Prop {
            name: "onClose".to_string(),
            ty: "() => void".to_string(),
            optional: true,
        },
    ];

    let out = render_component("ReviewCard", &props);

    assert!(out.contains("export interface ReviewCardProps {\n  title: string;\n  onClose?: () => void;\n}"));
    assert!(out.contains("export const ReviewCard: React.FC<ReviewCardProps> = ({ title, onClose }) => {"));
    assert!(out.contains("className=\"review-card\""));
}

#[test]
fn render_component___no_props___empty_parameter_list() {
    let out = render_component("Spinner", &[]);

    assert!(out.contains("export interface SpinnerProps {\n}"));
    assert!(out.contains("= () => {"));
}

#[test]
fn render_page___appends_suffix_once() {
    assert_eq!(page_name("Reviews"), "ReviewsPage");
    assert_eq!(page_name("ReviewsPage"), "ReviewsPage");

    let out = render_page("OrderItems");
    assert!(out.contains("export const OrderItemsPage: React.FC = () => {"));
    assert!(out.contains("<h1>Order Items</h1>"));
}

#[test]
fn render_hook___imports_api_object() {
    let out = render_hook(&ResourceNames::new("Review"), "../api/reviews");

    assert!(out.contains("import { reviewsApi } from '../api/reviews';"));
    assert!(out.contains("export function useReviews(page = 1, limit = 10) {"));
}

#[test]
fn render_api_client___base_url_and_route() {
    let out = render_api_client(&ResourceNames::new("Review"), "http://localhost:3000/api");

    assert!(out.starts_with("const BASE_URL = 'http://localhost:3000/api/reviews';"));
    assert!(out.contains("export const reviewsApi = {"));
}

#[test]
fn render_animation___camel_case_variants() {
    let out = render_animation("fade-in");

    assert!(out.contains("export const fadeIn: Variants = {"));
    assert!(out.contains("export const fadeInTransition: Transition = {"));
}

// relative_import tests

#[test_case("src/modules/reviews", "src/entities/review.entity", "../../entities/review.entity")]
#[test_case("src", "src/modules/reviews/reviews.module", "./modules/reviews/reviews.module")]
#[test_case("frontend/src/hooks", "frontend/src/api/reviews", "../api/reviews")]
#[test_case("./a/b", "a/b/c", "./c" ; "current dir prefix")]
fn relative_import___computes_specifier(from: &str, target: &str, expected: &str) {
    assert_eq!(relative_import(Path::new(from), Path::new(target)), expected);
}
