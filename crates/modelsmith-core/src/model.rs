//! Structural model of a decorator-annotated codebase
//!
//! These records are produced by the extractors, aggregated by the model
//! builder and consumed by the generators and the documentation emitter. They
//! are rebuilt from scratch on every run; nothing here is persisted.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Fields and relations
// ============================================================================

/// Coarse column classification shared by entities and DTO generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    String,
    Text,
    Number,
    Uuid,
    Json,
}

impl SemanticType {
    pub const ALL: [SemanticType; 5] = [
        SemanticType::String,
        SemanticType::Text,
        SemanticType::Number,
        SemanticType::Uuid,
        SemanticType::Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::String => "string",
            SemanticType::Text => "text",
            SemanticType::Number => "number",
            SemanticType::Uuid => "uuid",
            SemanticType::Json => "json",
        }
    }

    /// Parse a user-facing type name (`string`, `text`, ...)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }

    /// Classify a database column type as written in a column marker
    pub fn from_column_type(column_type: &str) -> Self {
        match column_type.to_ascii_lowercase().as_str() {
            "varchar" | "character varying" | "char" => SemanticType::String,
            "text" => SemanticType::Text,
            "decimal" | "numeric" | "int" | "integer" | "bigint" | "smallint" | "float"
            | "double precision" | "real" => SemanticType::Number,
            "jsonb" | "json" => SemanticType::Json,
            "uuid" => SemanticType::Uuid,
            _ => SemanticType::String,
        }
    }

    /// Column type emitted by the entity generator
    pub fn column_type(&self) -> &'static str {
        match self {
            SemanticType::String => "varchar",
            SemanticType::Text => "text",
            SemanticType::Number => "decimal",
            SemanticType::Uuid => "uuid",
            SemanticType::Json => "jsonb",
        }
    }

    /// TypeScript property type for this column
    pub fn ts_type(&self) -> &'static str {
        match self {
            SemanticType::String | SemanticType::Text | SemanticType::Uuid => "string",
            SemanticType::Number => "number",
            SemanticType::Json => "Record<string, unknown>",
        }
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, SemanticType::String | SemanticType::Text)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which column-family marker declared a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnMarker {
    Column,
    PrimaryGeneratedColumn,
    PrimaryColumn,
    CreateDateColumn,
    UpdateDateColumn,
    DeleteDateColumn,
}

impl ColumnMarker {
    pub fn from_decorator(name: &str) -> Option<Self> {
        Some(match name {
            "Column" => ColumnMarker::Column,
            "PrimaryGeneratedColumn" => ColumnMarker::PrimaryGeneratedColumn,
            "PrimaryColumn" => ColumnMarker::PrimaryColumn,
            "CreateDateColumn" => ColumnMarker::CreateDateColumn,
            "UpdateDateColumn" => ColumnMarker::UpdateDateColumn,
            "DeleteDateColumn" => ColumnMarker::DeleteDateColumn,
            _ => return None,
        })
    }

    /// Columns filled in by the database rather than by API input
    pub fn is_managed(&self) -> bool {
        !matches!(self, ColumnMarker::Column)
    }
}

/// A persisted column of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    pub semantic_type: SemanticType,

    /// Declared TypeScript type, verbatim
    pub declared_type: String,

    pub length: Option<u32>,

    pub nullable: bool,

    pub unique: bool,

    /// Explicit column name (`name: 'user_id'`)
    pub column_name: Option<String>,

    pub marker: ColumnMarker,
}

impl Field {
    /// A plain `@Column` field with no flags set
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            declared_type: semantic_type.ts_type().to_string(),
            length: None,
            nullable: false,
            unique: false,
            column_name: None,
            marker: ColumnMarker::Column,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    ManyToOne,
    OneToMany,
    OneToOne,
    ManyToMany,
}

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::ManyToOne,
        RelationKind::OneToMany,
        RelationKind::OneToOne,
        RelationKind::ManyToMany,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::ManyToOne => "ManyToOne",
            RelationKind::OneToMany => "OneToMany",
            RelationKind::OneToOne => "OneToOne",
            RelationKind::ManyToMany => "ManyToMany",
        }
    }

    pub fn from_decorator(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Case-insensitive parse for CLI input
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
    }

    pub fn is_to_many(&self) -> bool {
        matches!(self, RelationKind::OneToMany | RelationKind::ManyToMany)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A relation between two entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Owning property name
    pub name: String,

    pub kind: RelationKind,

    pub owner_entity: String,

    /// May name an entity that does not exist; that is reported, not rejected
    pub target_entity: String,

    pub foreign_key_name: Option<String>,

    pub nullable: bool,
}

// ============================================================================
// Entities and modules
// ============================================================================

/// A persisted domain object, one per source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,

    pub table_name: String,

    pub fields: Vec<Field>,

    pub relations: Vec<Relation>,

    pub path: Option<PathBuf>,
}

impl Entity {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields written by API clients: plain `@Column`s that are not foreign keys
    /// backing a to-one relation.
    pub fn input_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| {
            !f.marker.is_managed()
                && !self.relations.iter().any(|r| {
                    r.foreign_key_name.is_some() && r.foreign_key_name == f.column_name
                })
        })
    }
}

/// Completeness record for one module folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub has_module_file: bool,
    pub has_service: bool,
    pub has_controller: bool,
    pub has_dto: bool,
}

impl Module {
    /// Conventional parts absent from the module folder
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.has_module_file {
            missing.push("module");
        }
        if !self.has_service {
            missing.push("service");
        }
        if !self.has_controller {
            missing.push("controller");
        }
        if !self.has_dto {
            missing.push("dto");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

// ============================================================================
// Controllers and endpoints
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
    ];

    /// Match a route decorator name (`Get`, `Post`, ...)
    pub fn from_decorator(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.decorator() == name)
    }

    pub fn decorator(&self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Post => "Post",
            HttpMethod::Put => "Put",
            HttpMethod::Patch => "Patch",
            HttpMethod::Delete => "Delete",
            HttpMethod::Options => "Options",
            HttpMethod::Head => "Head",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    pub fn as_lower(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name part of a recorded decorator (`UseGuards(JwtAuthGuard)` → `UseGuards`)
pub fn decorator_name(decorator: &str) -> &str {
    decorator
        .split_once('(')
        .map_or(decorator, |(name, _)| name)
        .trim()
}

/// Whether a recorded decorator protects a route with authentication
pub fn is_guard_decorator(decorator: &str) -> bool {
    let name = decorator_name(decorator);
    name == "UseGuards" || name.contains("Auth")
}

/// Handler name used when resolution fails
pub const UNKNOWN_HANDLER: &str = "unknown";

/// One HTTP method/route/handler triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub http_method: HttpMethod,

    /// Full route including the controller base, e.g. `/reviews/:id`
    pub route: String,

    /// Resolved handler, or [`UNKNOWN_HANDLER`]
    pub handler_name: String,

    pub path_params: Vec<String>,

    /// Type of a whole-object `@Query()` parameter
    pub query_param_type_name: Option<String>,

    /// Individually bound `@Query('name')` parameters
    pub query_params: Vec<String>,

    pub body_dto_name: Option<String>,

    /// Decorators in the handler's decorator run, e.g. `UseGuards(JwtAuthGuard)`
    pub decorators: Vec<String>,

    /// Explicit `@HttpCode(N)`
    pub status_code: Option<u16>,
}

impl Endpoint {
    pub fn has_guard(&self) -> bool {
        self.decorators.iter().any(|d| is_guard_decorator(d))
    }

    pub fn is_unresolved(&self) -> bool {
        self.handler_name == UNKNOWN_HANDLER
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    pub name: String,

    /// Argument of the class-level route marker, without slashes
    pub base_route: String,

    /// Class-level decorators other than the route marker
    pub decorators: Vec<String>,

    pub endpoints: Vec<Endpoint>,

    pub path: Option<PathBuf>,
}

impl Controller {
    pub fn is_guarded(&self) -> bool {
        self.decorators.iter().any(|d| is_guard_decorator(d))
    }

    /// Guarded at class level or on the endpoint itself
    pub fn requires_auth(&self, endpoint: &Endpoint) -> bool {
        self.is_guarded() || endpoint.has_guard()
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Validation inferred from a validator decorator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Validation {
    Required,
    Optional,
    Email,
    MinLength(u32),
    MaxLength(u32),
    Min(i64),
    Max(i64),
    Uuid,
    Number,
    String,
    Array,
    Boolean,
    Enum,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Required => f.write_str("required"),
            Validation::Optional => f.write_str("optional"),
            Validation::Email => f.write_str("email"),
            Validation::MinLength(n) => write!(f, "minLength:{n}"),
            Validation::MaxLength(n) => write!(f, "maxLength:{n}"),
            Validation::Min(n) => write!(f, "min:{n}"),
            Validation::Max(n) => write!(f, "max:{n}"),
            Validation::Uuid => f.write_str("uuid"),
            Validation::Number => f.write_str("number"),
            Validation::String => f.write_str("string"),
            Validation::Array => f.write_str("array"),
            Validation::Boolean => f.write_str("boolean"),
            Validation::Enum => f.write_str("enum"),
        }
    }
}

impl Serialize for Validation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DtoField {
    pub name: String,

    /// Declared TypeScript type, verbatim
    #[serde(rename = "type")]
    pub ty: String,

    pub optional: bool,

    pub validations: Vec<Validation>,
}

impl DtoField {
    pub fn has(&self, validation: &Validation) -> bool {
        self.validations.contains(validation)
    }

    pub fn is_array(&self) -> bool {
        self.has(&Validation::Array) || self.ty.ends_with("[]") || self.ty.starts_with("Array<")
    }
}

/// A request-body shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dto {
    pub name: String,

    /// Base DTO, unwrapped from mapped types such as `PartialType(CreateXDto)`
    pub extends: Option<String>,

    pub fields: Vec<DtoField>,

    pub path: Option<PathBuf>,
}

// ============================================================================
// Frontend components
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentKind {
    Component,
    Hook,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prop {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub optional: bool,
}

/// A frontend component or hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: String,
    pub kind: ComponentKind,
    pub props: Vec<Prop>,
    pub path: Option<PathBuf>,
}

// ============================================================================
// Consistency
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IssueKind {
    EntityWithoutModule,
    ModuleWithoutEntity,
    IncompleteModule,
    DanglingRelation,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IssueKind::EntityWithoutModule => "EntityWithoutModule",
            IssueKind::ModuleWithoutEntity => "ModuleWithoutEntity",
            IssueKind::IncompleteModule => "IncompleteModule",
            IssueKind::DanglingRelation => "DanglingRelation",
        })
    }
}

/// A derived fact about a gap between entities and modules
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConsistencyIssue {
    pub kind: IssueKind,
    pub subject: String,
    pub detail: String,
}

impl ConsistencyIssue {
    pub fn new(kind: IssueKind, subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}): {}", self.kind, self.subject, self.detail)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Everything extracted from one project scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectModel {
    pub entities: Vec<Entity>,
    pub modules: Vec<Module>,
    pub controllers: Vec<Controller>,
    pub dtos: Vec<Dto>,
    pub components: Vec<Component>,
}

impl ProjectModel {
    /// Case-insensitive entity lookup
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn dto(&self, name: &str) -> Option<&Dto> {
        self.dtos.iter().find(|d| d.name == name)
    }

    /// Every endpoint paired with its controller
    pub fn endpoints(&self) -> impl Iterator<Item = (&Controller, &Endpoint)> {
        self.controllers
            .iter()
            .flat_map(|c| c.endpoints.iter().map(move |e| (c, e)))
    }

    /// DTO fields including those inherited through `extends`
    pub fn dto_fields(&self, name: &str) -> Vec<&DtoField> {
        let mut fields = Vec::new();
        let mut seen = Vec::new();
        let mut current = self.dto(name);

        while let Some(dto) = current {
            if seen.contains(&dto.name.as_str()) {
                break;
            }
            seen.push(dto.name.as_str());
            for field in &dto.fields {
                if !fields.iter().any(|f: &&DtoField| f.name == field.name) {
                    fields.push(field);
                }
            }
            current = dto.extends.as_deref().and_then(|base| self.dto(base));
        }

        fields
    }
}
