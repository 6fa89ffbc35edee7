//! DTO extraction.
//!
//! Every exported class in a DTO file is a [`Dto`]. Each property becomes a
//! [`DtoField`] whose validations come from the validator markers in that
//! property's own decorator run:
//!
//! | Marker | Validation |
//! |--------|------------|
//! | `IsNotEmpty` | `required` |
//! | `IsOptional` | `optional` |
//! | `IsEmail` | `email` |
//! | `MinLength(N)` / `MaxLength(N)` | `minLength:N` / `maxLength:N` |
//! | `Min(N)` / `Max(N)` | `min:N` / `max:N` |
//! | `IsUUID` | `uuid` |
//! | `IsNumber`, `IsInt` | `number` |
//! | `IsString` | `string` |
//! | `IsArray` | `array` |
//! | `IsBoolean` | `boolean` |
//! | `IsEnum` | `enum` |

use crate::lexer::{TokenKind, tokenize};
use crate::scanner::{ClassDecl, Decorator, Scanner};
use modelsmith_core::model::{Dto, DtoField, Validation};

/// Extract the first exported DTO class of a file.
pub fn extract_dto(src: &str) -> Option<Dto> {
    extract_dtos(src).into_iter().next()
}

/// Extract every exported class of a file as a DTO.
pub fn extract_dtos(src: &str) -> Vec<Dto> {
    Scanner::new(src)
        .classes()
        .iter()
        .filter(|c| c.exported)
        .map(dto_from_class)
        .collect()
}

fn dto_from_class(class: &ClassDecl) -> Dto {
    let fields = class
        .properties()
        .map(|prop| {
            let mut validations = Vec::new();
            for decorator in &prop.decorators {
                if let Some(validation) = validation(decorator) {
                    if !validations.contains(&validation) {
                        validations.push(validation);
                    }
                }
            }
            DtoField {
                name: prop.name.clone(),
                ty: prop.type_text.clone(),
                optional: prop.optional || validations.contains(&Validation::Optional),
                validations,
            }
        })
        .collect();

    Dto {
        name: class.name.clone(),
        extends: class.extends.as_deref().and_then(base_dto),
        fields,
        path: None,
    }
}

fn validation(decorator: &Decorator) -> Option<Validation> {
    let length = || {
        decorator
            .first_number_arg()
            .and_then(|n| u32::try_from(n).ok())
    };

    Some(match decorator.name.as_str() {
        "IsNotEmpty" | "IsDefined" => Validation::Required,
        "IsOptional" => Validation::Optional,
        "IsEmail" => Validation::Email,
        "MinLength" => Validation::MinLength(length()?),
        "MaxLength" => Validation::MaxLength(length()?),
        "Min" => Validation::Min(decorator.first_number_arg()?),
        "Max" => Validation::Max(decorator.first_number_arg()?),
        "IsUUID" => Validation::Uuid,
        "IsNumber" | "IsInt" | "IsPositive" => Validation::Number,
        "IsString" => Validation::String,
        "IsArray" => Validation::Array,
        "IsBoolean" => Validation::Boolean,
        "IsEnum" => Validation::Enum,
        _ => return None,
    })
}

/// Base DTO named by an `extends` clause.
///
/// Mapped types are unwrapped to their first argument:
/// `PartialType(CreateReviewDto)` → `CreateReviewDto`.
fn base_dto(extends: &str) -> Option<String> {
    tokenize(extends)
        .iter()
        .filter(|t| t.kind == TokenKind::Ident)
        .map(|t| t.text)
        .find(|name| !is_mapped_type(name))
        .map(str::to_string)
}

fn is_mapped_type(name: &str) -> bool {
    matches!(
        name,
        "PartialType" | "PickType" | "OmitType" | "IntersectionType"
    )
}

#[cfg(test)]
#[path = "dto/dto_tests.rs"]
mod dto_tests;
