//! Template rendering.
//!
//! Every function here is pure: identical input gives byte-identical output.
//! Templates are embedded at compile time and filled by `{{placeholder}}`
//! substitution; repeated sections (columns, validators, props) are rendered
//! in Rust and substituted as a whole.

use modelsmith_core::config::NamingConfig;
use modelsmith_core::model::{Field, Prop, Relation, RelationKind, SemanticType};
use modelsmith_core::naming;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path};

// ============================================================================
// Embedded Templates
// ============================================================================

mod templates {
    pub const ENTITY: &str = include_str!("../templates/entity.ts.tmpl");
    pub const CREATE_DTO: &str = include_str!("../templates/create-dto.ts.tmpl");
    pub const UPDATE_DTO: &str = include_str!("../templates/update-dto.ts.tmpl");
    pub const SERVICE: &str = include_str!("../templates/service.ts.tmpl");
    pub const CONTROLLER: &str = include_str!("../templates/controller.ts.tmpl");
    pub const MODULE: &str = include_str!("../templates/module.ts.tmpl");
    pub const MODULE_STUB: &str = include_str!("../templates/module-stub.ts.tmpl");
    pub const MIGRATION: &str = include_str!("../templates/migration.ts.tmpl");

    // Frontend
    pub const COMPONENT: &str = include_str!("../templates/component.tsx.tmpl");
    pub const PAGE: &str = include_str!("../templates/page.tsx.tmpl");
    pub const HOOK: &str = include_str!("../templates/hook.ts.tmpl");
    pub const API_CLIENT: &str = include_str!("../templates/api-client.ts.tmpl");
    pub const ANIMATION: &str = include_str!("../templates/animation.ts.tmpl");
}

/// Length written for a `string` column that does not declare one
pub const DEFAULT_STRING_LENGTH: u32 = 255;

// ============================================================================
// Template Context
// ============================================================================

/// Placeholder values for one rendering
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    vars: Vec<(String, String)>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.push((format!("{{{{{key}}}}}"), value.into()));
        self
    }

    /// Apply placeholder substitutions to template content
    pub fn apply(&self, template: &str) -> String {
        self.vars
            .iter()
            .fold(template.to_string(), |out, (placeholder, value)| {
                out.replace(placeholder, value)
            })
    }
}

/// Every name derived from one backend resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    /// `OrderItem`
    pub entity: String,
    /// `orderItem`
    pub entity_camel: String,
    /// `order-item`
    pub entity_file: String,
    /// Module folder and route segment: `order-items`
    pub folder: String,
    /// `OrderItems`, prefix of the service/controller/module classes
    pub plural: String,
    /// `orderItems`
    pub plural_camel: String,
    pub table: String,
}

impl Names {
    pub fn new(entity: &str, naming_config: &NamingConfig) -> Self {
        let folder = naming_config
            .module_for_entity(entity)
            .map(str::to_string)
            .unwrap_or_else(|| naming::route_segment(entity));

        Self {
            entity: entity.to_string(),
            entity_camel: naming::to_camel_case(entity),
            entity_file: naming::to_kebab_case(entity),
            plural: naming::to_pascal_case(&folder),
            plural_camel: naming::to_camel_case(&folder),
            table: naming::table_name(entity),
            folder,
        }
    }

    pub fn context(&self) -> TemplateContext {
        TemplateContext::new()
            .set("entity", &self.entity)
            .set("entity-camel", &self.entity_camel)
            .set("entity-file", &self.entity_file)
            .set("module-folder", &self.folder)
            .set("route", &self.folder)
            .set("plural", &self.plural)
            .set("plural-camel", &self.plural_camel)
            .set("table", &self.table)
    }
}

// ============================================================================
// Backend
// ============================================================================

pub fn render_entity(names: &Names, fields: &[Field], relations: &[Relation]) -> String {
    let mut imports: BTreeSet<&str> = [
        "CreateDateColumn",
        "Entity",
        "PrimaryGeneratedColumn",
        "UpdateDateColumn",
    ]
    .into_iter()
    .collect();
    if !fields.is_empty() {
        imports.insert("Column");
    }
    for relation in relations {
        imports.insert(relation.kind.as_str());
        if relation.foreign_key_name.is_some() {
            imports.insert("JoinColumn");
        }
        if relation.kind == RelationKind::ManyToMany {
            imports.insert("JoinTable");
        }
    }

    let relation_imports: String = relations
        .iter()
        .map(|r| r.target_entity.as_str())
        .filter(|target| *target != names.entity)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|target| {
            format!(
                "import {{ {target} }} from './{}.entity';\n",
                naming::to_kebab_case(target)
            )
        })
        .collect();

    names
        .context()
        .set("typeorm-imports", imports.into_iter().collect::<Vec<_>>().join(", "))
        .set("relation-imports", relation_imports)
        .set("columns", fields.iter().map(entity_column).collect::<String>())
        .set(
            "relations",
            relations
                .iter()
                .map(|r| entity_relation(&names.entity, r))
                .collect::<String>(),
        )
        .apply(templates::ENTITY)
}

fn entity_column(field: &Field) -> String {
    let mut options = vec![format!("type: '{}'", field.semantic_type.column_type())];
    match field.semantic_type {
        SemanticType::String => options.push(format!(
            "length: {}",
            field.length.unwrap_or(DEFAULT_STRING_LENGTH)
        )),
        SemanticType::Number => {
            options.push("precision: 10".to_string());
            options.push("scale: 2".to_string());
        }
        _ => {}
    }
    if let Some(column) = &field.column_name {
        options.push(format!("name: '{column}'"));
    }
    if field.nullable {
        options.push("nullable: true".to_string());
    }
    if field.unique {
        options.push("unique: true".to_string());
    }

    format!(
        "\n  @Column({{ {} }})\n  {}{}: {};\n",
        options.join(", "),
        field.name,
        if field.nullable { "?" } else { "" },
        field.semantic_type.ts_type()
    )
}

fn entity_relation(owner: &str, relation: &Relation) -> String {
    let target = &relation.target_entity;
    let kind = relation.kind;
    let options = if relation.nullable {
        ", { nullable: true }"
    } else {
        ""
    };

    match kind {
        RelationKind::ManyToOne | RelationKind::OneToOne => {
            let join = relation
                .foreign_key_name
                .as_ref()
                .map(|fk| format!("  @JoinColumn({{ name: '{fk}' }})\n"))
                .unwrap_or_default();
            format!(
                "\n  @{kind}(() => {target}{options})\n{join}  {}{}: {target};\n",
                relation.name,
                if relation.nullable { "?" } else { "" },
            )
        }
        RelationKind::OneToMany => {
            let param = naming::to_camel_case(target);
            format!(
                "\n  @OneToMany(() => {target}, ({param}) => {param}.{})\n  {}: {target}[];\n",
                naming::to_camel_case(owner),
                relation.name
            )
        }
        RelationKind::ManyToMany => format!(
            "\n  @ManyToMany(() => {target}{options})\n  @JoinTable()\n  {}: {target}[];\n",
            relation.name
        ),
    }
}

/// A class-validator decorator call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    pub name: &'static str,
    pub arg: Option<u32>,
}

impl Validator {
    const fn bare(name: &'static str) -> Self {
        Self { name, arg: None }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arg {
            Some(arg) => write!(f, "@{}({arg})", self.name),
            None => write!(f, "@{}()", self.name),
        }
    }
}

/// Validators inferred for one DTO property.
///
/// | Type | Required | Optional |
/// |------|----------|----------|
/// | `string`, `text` | `IsString`, `IsNotEmpty` | `IsOptional` |
/// | `number` | `IsNumber` | `IsOptional`, `IsNumber` |
/// | `uuid` | `IsUUID` | `IsOptional`, `IsUUID` |
/// | `json` | `IsObject` | `IsOptional`, `IsObject` |
///
/// An explicit length on a textual field appends `MaxLength(N)`.
pub fn dto_validators(semantic_type: SemanticType, optional: bool, length: Option<u32>) -> Vec<Validator> {
    let type_check = match semantic_type {
        SemanticType::String | SemanticType::Text => Validator::bare("IsString"),
        SemanticType::Number => Validator::bare("IsNumber"),
        SemanticType::Uuid => Validator::bare("IsUUID"),
        SemanticType::Json => Validator::bare("IsObject"),
    };

    let mut validators = match (optional, semantic_type.is_textual()) {
        (false, true) => vec![type_check, Validator::bare("IsNotEmpty")],
        (false, false) => vec![type_check],
        (true, true) => vec![Validator::bare("IsOptional")],
        (true, false) => vec![Validator::bare("IsOptional"), type_check],
    };

    if let Some(max) = length.filter(|_| semantic_type.is_textual()) {
        validators.push(Validator {
            name: "MaxLength",
            arg: Some(max),
        });
    }
    validators
}

/// Create DTO with one property per input field and one `<relation>Id` per
/// owned foreign key.
pub fn render_create_dto(names: &Names, fields: &[Field], relations: &[Relation]) -> String {
    let mut imports = BTreeSet::new();
    let mut members = Vec::new();

    let mut member = |name: &str, ty: SemanticType, optional: bool, length: Option<u32>| {
        let validators = dto_validators(ty, optional, length);
        let mut out = String::new();
        for validator in &validators {
            imports.insert(validator.name);
            out.push_str(&format!("  {validator}\n"));
        }
        out.push_str(&format!(
            "  {name}{}: {};\n",
            if optional { "?" } else { "" },
            ty.ts_type()
        ));
        members.push(out);
    };

    for field in fields {
        member(&field.name, field.semantic_type, field.nullable, field.length);
    }
    for relation in relations.iter().filter(|r| r.foreign_key_name.is_some()) {
        member(
            &format!("{}Id", relation.name),
            SemanticType::Uuid,
            relation.nullable,
            None,
        );
    }

    let validator_import = if imports.is_empty() {
        String::new()
    } else {
        format!(
            "import {{ {} }} from 'class-validator';\n\n",
            imports.into_iter().collect::<Vec<_>>().join(", ")
        )
    };

    names
        .context()
        .set("validator-import", validator_import)
        .set("dto-fields", members.join("\n"))
        .apply(templates::CREATE_DTO)
}

pub fn render_update_dto(names: &Names) -> String {
    names.context().apply(templates::UPDATE_DTO)
}

/// CRUD service; `relations` are loaded by `findAll` and `findOne`.
pub fn render_service(names: &Names, relations: &[Relation], entity_import: &str) -> String {
    let relation_list = relations
        .iter()
        .map(|r| format!("'{}'", r.name))
        .collect::<Vec<_>>()
        .join(", ");

    names
        .context()
        .set("entity-import", entity_import)
        .set("relation-list", relation_list)
        .apply(templates::SERVICE)
}

pub fn render_controller(names: &Names) -> String {
    names.context().apply(templates::CONTROLLER)
}

/// Full module wiring the entity repository, service and controller
pub fn render_module(names: &Names, entity_import: &str) -> String {
    names
        .context()
        .set("entity-import", entity_import)
        .apply(templates::MODULE)
}

pub fn render_module_stub(names: &Names) -> String {
    names.context().apply(templates::MODULE_STUB)
}

/// Create-table migration. Column names follow the entity's property names;
/// owned foreign keys get a column and a constraint.
pub fn render_migration(names: &Names, fields: &[Field], relations: &[Relation]) -> String {
    let mut columns = String::new();
    for field in fields {
        let name = field.column_name.as_deref().unwrap_or(&field.name);
        let mut parts = vec![
            format!("name: '{name}'"),
            format!("type: '{}'", field.semantic_type.column_type()),
        ];
        match field.semantic_type {
            SemanticType::String => parts.push(format!(
                "length: '{}'",
                field.length.unwrap_or(DEFAULT_STRING_LENGTH)
            )),
            SemanticType::Number => {
                parts.push("precision: 10".to_string());
                parts.push("scale: 2".to_string());
            }
            _ => {}
        }
        parts.push(format!("isNullable: {}", field.nullable));
        if field.unique {
            parts.push("isUnique: true".to_string());
        }
        columns.push_str(&format!("          {{ {} }},\n", parts.join(", ")));
    }

    let mut foreign_keys = String::new();
    for relation in relations {
        let Some(fk) = &relation.foreign_key_name else {
            continue;
        };
        columns.push_str(&format!(
            "          {{ name: '{fk}', type: 'uuid', isNullable: {} }},\n",
            relation.nullable
        ));
        foreign_keys.push_str(&format!(
            "    await queryRunner.createForeignKey(\n      '{}',\n      new TableForeignKey({{\n        columnNames: ['{fk}'],\n        referencedTableName: '{}',\n        referencedColumnNames: ['id'],\n        onDelete: '{}',\n      }}),\n    );\n",
            names.table,
            naming::table_name(&relation.target_entity),
            if relation.nullable { "SET NULL" } else { "CASCADE" }
        ));
    }

    let foreign_key_import = if foreign_keys.is_empty() {
        ""
    } else {
        ", TableForeignKey"
    };

    names
        .context()
        .set("migration-columns", columns)
        .set("foreign-keys", foreign_keys)
        .set("foreign-key-import", foreign_key_import)
        .apply(templates::MIGRATION)
}

/// `<timestamp>-Create<Plural>Table.ts`
pub fn migration_file_name(names: &Names, timestamp: &str) -> String {
    format!("{timestamp}-Create{}Table.ts", names.plural)
}

// ============================================================================
// Frontend
// ============================================================================

/// Names used by the list-oriented frontend artifacts (api client, hook)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    /// `order-items`
    pub route: String,
    /// `orderItemsApi`
    pub api_object: String,
    /// `useOrderItems`
    pub hook: String,
}

impl ResourceNames {
    /// Accepts singular or plural input: `Review`, `reviews` and `useReviews`
    /// all name the same resource.
    pub fn new(name: &str) -> Self {
        let base = strip_hook_prefix(name);
        let kebab = naming::to_kebab_case(base);
        let route = if naming::singularize(&kebab) != kebab {
            kebab
        } else {
            naming::pluralize(&kebab)
        };
        Self {
            api_object: format!("{}Api", naming::to_camel_case(&route)),
            hook: format!("use{}", naming::to_pascal_case(&route)),
            route,
        }
    }
}

fn strip_hook_prefix(name: &str) -> &str {
    for prefix in ["use", "Use"] {
        if let Some(rest) = name.strip_prefix(prefix) {
            if rest.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
                return rest;
            }
        }
    }
    name
}

pub fn render_component(name: &str, props: &[Prop]) -> String {
    let prop_fields: String = props
        .iter()
        .map(|p| {
            format!(
                "  {}{}: {};\n",
                p.name,
                if p.optional { "?" } else { "" },
                p.ty
            )
        })
        .collect();
    let destructure = if props.is_empty() {
        String::new()
    } else {
        format!(
            "{{ {} }}",
            props
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    TemplateContext::new()
        .set("component", name)
        .set("component-class", naming::to_kebab_case(name))
        .set("prop-fields", prop_fields)
        .set("prop-destructure", destructure)
        .apply(templates::COMPONENT)
}

/// Page component name: `Reviews` → `ReviewsPage`
pub fn page_name(name: &str) -> String {
    if name.ends_with("Page") {
        name.to_string()
    } else {
        format!("{name}Page")
    }
}

pub fn render_page(name: &str) -> String {
    let page = page_name(name);
    let title = naming::words(page.strip_suffix("Page").unwrap_or(&page))
        .iter()
        .map(|w| naming::capitalize(w))
        .collect::<Vec<_>>()
        .join(" ");

    TemplateContext::new()
        .set("page-class", naming::to_kebab_case(&page))
        .set("title", title)
        .set("page", page)
        .apply(templates::PAGE)
}

/// List hook calling the api client generated for the same resource
pub fn render_hook(resource: &ResourceNames, api_import: &str) -> String {
    TemplateContext::new()
        .set("hook", &resource.hook)
        .set("api-object", &resource.api_object)
        .set("api-import", api_import)
        .apply(templates::HOOK)
}

pub fn render_api_client(resource: &ResourceNames, base_url: &str) -> String {
    TemplateContext::new()
        .set("api-object", &resource.api_object)
        .set("route", &resource.route)
        .set("base-url", base_url)
        .apply(templates::API_CLIENT)
}

/// Animation variants; `fade-in` → `fadeIn`
pub fn render_animation(name: &str) -> String {
    TemplateContext::new()
        .set("animation", naming::to_camel_case(name))
        .apply(templates::ANIMATION)
}

// ============================================================================
// Paths
// ============================================================================

/// Relative module specifier from `from_dir` to `target` (given without extension).
///
/// ```
/// use modelsmith_codegen::render::relative_import;
/// use std::path::Path;
///
/// assert_eq!(
///     relative_import(Path::new("src/modules/reviews"), Path::new("src/entities/review.entity")),
///     "../../entities/review.entity"
/// );
/// assert_eq!(
///     relative_import(Path::new("src"), Path::new("src/modules/reviews/reviews.module")),
///     "./modules/reviews/reviews.module"
/// );
/// ```
pub fn relative_import(from_dir: &Path, target: &Path) -> String {
    let from = normal_components(from_dir);
    let to = normal_components(target);
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts = vec!["..".to_string(); from.len() - common];
    parts.extend(to.into_iter().skip(common));
    let joined = parts.join("/");

    if from.len() == common {
        format!("./{joined}")
    } else {
        joined
    }
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
#[path = "render/render_tests.rs"]
mod render_tests;
