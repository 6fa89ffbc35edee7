//! Entity extraction from `*.entity.ts` files.
//!
//! An entity is the first class carrying an `@Entity` marker. Each property
//! decorated with a column-family marker becomes a [`Field`], and each
//! property decorated with a relation marker becomes a [`Relation`].
//!
//! | Column type | Semantic type |
//! |-------------|---------------|
//! | `varchar` (length 255 unless given) | `string` |
//! | `text` | `text` |
//! | `decimal`, `int`, `integer`, `float`, `numeric`, `bigint`, `smallint` | `number` |
//! | `jsonb`, `json` | `json` |
//! | `uuid` | `uuid` |
//! | anything else | `string` |
//!
//! A marker without a type falls back to the declared TypeScript type:
//! `number` classifies as `number`, everything else as `string`.

use crate::scanner::{ClassDecl, Decorator, Property, Scanner};
use modelsmith_core::model::{ColumnMarker, Entity, Field, Relation, RelationKind, SemanticType};
use modelsmith_core::naming;
use tracing::debug;

/// Length assumed for a `varchar` column that does not declare one
pub const DEFAULT_VARCHAR_LENGTH: u32 = 255;

/// Extract the entity declared in one source file.
///
/// Returns `None` when the file has no `@Entity` class.
pub fn extract_entity(src: &str) -> Option<Entity> {
    let classes = Scanner::new(src).classes();
    let class = classes.iter().find(|c| c.has_decorator("Entity"))?;
    Some(entity_from_class(class))
}

fn entity_from_class(class: &ClassDecl) -> Entity {
    let table_name = class
        .decorator("Entity")
        .and_then(|d| d.first_string_arg().or_else(|| d.option_str("name")))
        .unwrap_or_else(|| naming::table_name(&class.name));

    let mut fields = Vec::new();
    let mut relations = Vec::new();

    for prop in class.properties() {
        if let Some(relation) = relation_from_property(&class.name, prop) {
            relations.push(relation);
        } else if let Some(field) = field_from_property(prop) {
            fields.push(field);
        }
    }

    debug!(
        entity = %class.name,
        table = %table_name,
        fields = fields.len(),
        relations = relations.len(),
        "entity extracted"
    );

    Entity {
        name: class.name.clone(),
        table_name,
        fields,
        relations,
        path: None,
    }
}

fn field_from_property(prop: &Property) -> Option<Field> {
    // the nearest preceding marker wins
    let (decorator, marker) = prop
        .decorators
        .iter()
        .rev()
        .find_map(|d| ColumnMarker::from_decorator(&d.name).map(|m| (d, m)))?;

    let column_type = declared_column_type(decorator, marker);
    let semantic_type = match &column_type {
        Some(ty) => SemanticType::from_column_type(ty),
        None if prop.type_text.trim() == "number" => SemanticType::Number,
        None => SemanticType::String,
    };

    let is_varchar = column_type
        .as_deref()
        .is_some_and(|ty| ty.eq_ignore_ascii_case("varchar"));
    let length = decorator
        .option_number("length")
        .or(is_varchar.then_some(DEFAULT_VARCHAR_LENGTH));

    Some(Field {
        name: prop.name.clone(),
        semantic_type,
        declared_type: prop.type_text.clone(),
        length,
        nullable: decorator.option_bool("nullable").unwrap_or(false),
        unique: decorator.option_bool("unique").unwrap_or(false),
        column_name: decorator.option_str("name"),
        marker,
    })
}

/// Column type from `type: '...'` or a leading string argument
fn declared_column_type(decorator: &Decorator, marker: ColumnMarker) -> Option<String> {
    let ty = decorator
        .option_str("type")
        .or_else(|| decorator.first_string_arg())?;

    // generation strategies, not column types
    if marker == ColumnMarker::PrimaryGeneratedColumn && !ty.eq_ignore_ascii_case("uuid") {
        return None;
    }
    Some(ty)
}

fn relation_from_property(owner: &str, prop: &Property) -> Option<Relation> {
    let (decorator, kind) = prop
        .decorators
        .iter()
        .find_map(|d| RelationKind::from_decorator(&d.name).map(|k| (d, k)))?;

    let target_entity = decorator
        .thunk_target()
        .unwrap_or_else(|| element_type(&prop.type_text));

    let foreign_key_name = prop
        .decorators
        .iter()
        .find(|d| d.name == "JoinColumn")
        .and_then(|d| d.option_str("name"));

    Some(Relation {
        name: prop.name.clone(),
        kind,
        owner_entity: owner.to_string(),
        target_entity,
        foreign_key_name,
        nullable: decorator.option_bool("nullable").unwrap_or(false),
    })
}

/// `Review[]` / `Array<Review>` → `Review`
fn element_type(type_text: &str) -> String {
    let ty = type_text.trim();
    let ty = ty.strip_suffix("[]").unwrap_or(ty);
    let ty = ty
        .strip_prefix("Array<")
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(ty);
    ty.trim().to_string()
}

#[cfg(test)]
#[path = "entity/entity_tests.rs"]
mod entity_tests;
