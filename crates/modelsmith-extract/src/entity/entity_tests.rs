#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

const REVIEW: &str = r#"
import { Column, Entity, JoinColumn, ManyToOne, PrimaryGeneratedColumn } from 'typeorm';
import { Product } from './product.entity';

@Entity('reviews')
export class Review {
  @Column({ type: 'varchar', length: 255 })
  name: string;

  @Column({ type: 'text', nullable: true })
  description?: string;
}
"#;

fn column_field(decorator: &str, declared: &str) -> Field {
    let src = format!("@Entity() export class X {{ {decorator} value: {declared}; }}");
    let entity = extract_entity(&src).unwrap();
    entity.fields.into_iter().next().unwrap()
}

// extract_entity tests

#[test]
fn extract_entity___required_string_and_optional_text() {
    let entity = extract_entity(REVIEW).unwrap();

    assert_eq!(entity.name, "Review");
    assert_eq!(entity.table_name, "reviews");
    assert_eq!(entity.fields.len(), 2);

    let name = &entity.fields[0];
    assert_eq!(name.name, "name");
    assert_eq!(name.semantic_type, SemanticType::String);
    assert_eq!(name.length, Some(255));
    assert!(!name.nullable);

    let description = &entity.fields[1];
    assert_eq!(description.name, "description");
    assert_eq!(description.semantic_type, SemanticType::Text);
    assert!(description.nullable);
}

#[test]
fn extract_entity___no_entity_marker___returns_none() {
    assert!(extract_entity("export class NotAnEntity { name: string; }").is_none());
    assert!(extract_entity("").is_none());
}

#[test]
fn extract_entity___table_name___falls_back_to_plural_lowercase() {
    let bare = extract_entity("@Entity() export class Category {}").unwrap();
    let option = extract_entity("@Entity({ name: 'product_categories' }) export class Category {}")
        .unwrap();

    assert_eq!(bare.table_name, "categories");
    assert_eq!(option.table_name, "product_categories");
}

#[test_case("@Column('text')", "string", SemanticType::Text ; "leading string argument")]
#[test_case("@Column({ type: 'decimal', precision: 10, scale: 2 })", "number", SemanticType::Number ; "decimal")]
#[test_case("@Column({ type: 'int' })", "number", SemanticType::Number ; "int")]
#[test_case("@Column({ type: 'jsonb', default: {} })", "object", SemanticType::Json ; "jsonb")]
#[test_case("@Column({ type: 'uuid' })", "string", SemanticType::Uuid ; "uuid")]
#[test_case("@Column({ type: 'timestamp' })", "Date", SemanticType::String ; "unknown type")]
#[test_case("@Column()", "number", SemanticType::Number ; "untyped number")]
#[test_case("@Column()", "boolean", SemanticType::String ; "untyped other")]
#[test_case("@PrimaryGeneratedColumn('uuid')", "string", SemanticType::Uuid ; "uuid primary key")]
#[test_case("@PrimaryGeneratedColumn()", "number", SemanticType::Number ; "increment primary key")]
#[test_case("@PrimaryGeneratedColumn('increment')", "number", SemanticType::Number ; "explicit increment strategy")]
fn extract_entity___classifies_column(decorator: &str, declared: &str, expected: SemanticType) {
    assert_eq!(column_field(decorator, declared).semantic_type, expected);
}

#[test]
fn extract_entity___column_flags_and_name() {
    let field = column_field(
        "@Column({ type: 'varchar', length: 100, unique: true, nullable: false, name: 'email_address' })",
        "string",
    );

    assert_eq!(field.length, Some(100));
    assert!(field.unique);
    assert!(!field.nullable);
    assert_eq!(field.column_name.as_deref(), Some("email_address"));
    assert_eq!(field.marker, ColumnMarker::Column);
}

#[test]
fn extract_entity___date_columns___record_marker() {
    let entity = extract_entity(
        "@Entity() export class A {\n  @CreateDateColumn() createdAt: Date;\n  @UpdateDateColumn() updatedAt: Date;\n}",
    )
    .unwrap();

    let markers: Vec<ColumnMarker> = entity.fields.iter().map(|f| f.marker).collect();
    assert_eq!(
        markers,
        vec![ColumnMarker::CreateDateColumn, ColumnMarker::UpdateDateColumn]
    );
    assert_eq!(entity.fields[0].declared_type, "Date");
}

#[test]
fn extract_entity___undecorated_properties___are_ignored() {
    let entity = extract_entity(
        "@Entity() export class A {\n  transient: string;\n  @Column() kept: string;\n}",
    )
    .unwrap();

    assert_eq!(entity.fields.len(), 1);
    assert_eq!(entity.fields[0].name, "kept");
}

// relation tests

#[test]
fn extract_entity___to_one_relation___reads_thunk_and_join_column() {
    let entity = extract_entity(
        r#"
@Entity('reviews')
export class Review {
  @ManyToOne(() => Product, (product) => product.reviews, { nullable: true, onDelete: 'CASCADE' })
  @JoinColumn({ name: 'product_id' })
  product: Product;

  @Column({ name: 'product_id', type: 'uuid' })
  productId: string;
}
"#,
    )
    .unwrap();

    assert_eq!(
        entity.relations,
        vec![Relation {
            name: "product".to_string(),
            kind: RelationKind::ManyToOne,
            owner_entity: "Review".to_string(),
            target_entity: "Product".to_string(),
            foreign_key_name: Some("product_id".to_string()),
            nullable: true,
        }]
    );
    assert_eq!(entity.fields.len(), 1);
    assert_eq!(entity.fields[0].name, "productId");
}

#[test]
fn extract_entity___to_many_relation___array_typed_member() {
    let entity = extract_entity(
        "@Entity() export class Product {\n  @OneToMany(() => Review, (review) => review.product)\n  reviews: Review[];\n}",
    )
    .unwrap();

    let relation = &entity.relations[0];
    assert_eq!(relation.kind, RelationKind::OneToMany);
    assert_eq!(relation.target_entity, "Review");
    assert_eq!(relation.foreign_key_name, None);
    assert!(!relation.nullable);
}

#[test_case("Tag[]" ; "array suffix")]
#[test_case("Array<Tag>" ; "generic array")]
#[test_case("Tag" ; "plain type")]
fn extract_entity___relation_without_thunk___uses_declared_type(declared: &str) {
    let src = format!("@Entity() export class Post {{ @ManyToMany() tags: {declared}; }}");

    let entity = extract_entity(&src).unwrap();

    assert_eq!(entity.relations[0].target_entity, "Tag");
}

#[test]
fn extract_entity___malformed_source___is_best_effort() {
    let entity = extract_entity("@Entity('x') export class Half {\n  @Column({ type: 'text' \n  broken").unwrap();

    assert_eq!(entity.name, "Half");
    assert_eq!(entity.table_name, "x");
}
