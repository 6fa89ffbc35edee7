#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn tags(field: &DtoField) -> Vec<String> {
    field.validations.iter().map(ToString::to_string).collect()
}

// extract_dto tests

#[test]
fn extract_dto___create_dto___maps_validators_per_field() {
    let dto = extract_dto(
        r#"
import { IsEmail, IsNotEmpty, IsOptional, IsString, MinLength } from 'class-validator';

export class CreateUserDto {
  @IsEmail()
  @IsNotEmpty()
  email: string;

  @IsString()
  @MinLength(8)
  password: string;

  @IsOptional()
  @IsString()
  nickname?: string;
}
"#,
    )
    .unwrap();

    assert_eq!(dto.name, "CreateUserDto");
    assert_eq!(dto.extends, None);
    assert_eq!(dto.fields.len(), 3);
    assert_eq!(tags(&dto.fields[0]), vec!["email", "required"]);
    assert_eq!(tags(&dto.fields[1]), vec!["string", "minLength:8"]);
    assert_eq!(tags(&dto.fields[2]), vec!["optional", "string"]);
    assert!(!dto.fields[0].optional);
    assert!(dto.fields[2].optional);
}

#[test]
fn extract_dto___markers_do_not_bleed_across_members() {
    let dto = extract_dto(
        "export class D {\n  @IsUUID()\n  a: string;\n  b: string;\n  @IsInt() @Min(1) @Max(5)\n  c: number;\n}",
    )
    .unwrap();

    assert_eq!(tags(&dto.fields[0]), vec!["uuid"]);
    assert!(dto.fields[1].validations.is_empty());
    assert_eq!(tags(&dto.fields[2]), vec!["number", "min:1", "max:5"]);
}

#[test]
fn extract_dto___optional_marker_without_question_mark___is_optional() {
    let dto = extract_dto("export class D { @IsOptional() note: string; }").unwrap();

    assert!(dto.fields[0].optional);
}

#[test_case("PartialType(CreateReviewDto)", Some("CreateReviewDto") ; "partial type")]
#[test_case("OmitType(CreateReviewDto, ['rating'] as const)", Some("CreateReviewDto") ; "omit type")]
#[test_case("BaseDto", Some("BaseDto") ; "plain base")]
fn extract_dto___extends___unwraps_mapped_types(clause: &str, expected: Option<&str>) {
    let src = format!("export class UpdateReviewDto extends {clause} {{}}");

    let dto = extract_dto(&src).unwrap();

    assert_eq!(dto.extends.as_deref(), expected);
}

#[test]
fn extract_dtos___multiple_exported_classes() {
    let dtos = extract_dtos(
        "export class ListDto { @IsOptional() @IsInt() page?: number; }\nclass Hidden {}\nexport class OtherDto {}",
    );

    let names: Vec<&str> = dtos.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["ListDto", "OtherDto"]);
    assert_eq!(dtos[0].fields[0].ty, "number");
}

#[test]
fn extract_dto___no_exported_class___returns_none() {
    assert!(extract_dto("class Internal {}").is_none());
    assert!(extract_dto("export const x = 1;").is_none());
}

#[test]
fn extract_dto___array_and_enum_and_boolean() {
    let dto = extract_dto(
        "export class D {\n  @IsArray() tags: string[];\n  @IsEnum(Status) status: Status;\n  @IsBoolean() active: boolean;\n}",
    )
    .unwrap();

    assert_eq!(tags(&dto.fields[0]), vec!["array"]);
    assert!(dto.fields[0].is_array());
    assert_eq!(tags(&dto.fields[1]), vec!["enum"]);
    assert_eq!(tags(&dto.fields[2]), vec!["boolean"]);
}

#[test]
fn extract_dto___unknown_and_malformed_markers___are_ignored() {
    let dto = extract_dto("export class D { @ApiProperty() @MinLength(x) name: string; }").unwrap();

    assert!(dto.fields[0].validations.is_empty());
}
