//! Generator parameters and their command-line spec syntax.
//!
//! | Spec | Grammar | Example |
//! |------|---------|---------|
//! | field | `name:type[:optional][:unique][:length=N]` | `title:string:length=80` |
//! | relation | `Kind:Target[:nullable]` | `ManyToOne:Product:nullable` |
//! | prop | `name[:type][:optional]` | `onClose:() => void:optional` |
//!
//! Field types are the semantic types (`string`, `text`, `number`, `uuid`,
//! `json`). Relation kinds are matched case-insensitively.

use modelsmith_core::error::{ModelsmithError, ModelsmithResult};
use modelsmith_core::model::{Field, Prop, Relation, RelationKind, SemanticType};
use modelsmith_core::naming;

/// Everything a generator may consume besides the resource name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateParams {
    pub fields: Vec<Field>,
    pub relations: Vec<RelationSpec>,
    pub props: Vec<Prop>,

    /// Migration filename prefix, e.g. `1700000000000`
    pub timestamp: Option<String>,
}

impl GenerateParams {
    /// Parse raw `--fields`, `--relations` and `--props` entries
    pub fn parse<S: AsRef<str>>(fields: &[S], relations: &[S], props: &[S]) -> ModelsmithResult<Self> {
        Ok(Self {
            fields: fields
                .iter()
                .map(|s| parse_field(s.as_ref()))
                .collect::<ModelsmithResult<_>>()?,
            relations: relations
                .iter()
                .map(|s| RelationSpec::parse(s.as_ref()))
                .collect::<ModelsmithResult<_>>()?,
            props: props
                .iter()
                .map(|s| parse_prop(s.as_ref()))
                .collect::<ModelsmithResult<_>>()?,
            timestamp: None,
        })
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Whether the caller described the entity shape explicitly
    pub fn has_shape(&self) -> bool {
        !self.fields.is_empty() || !self.relations.is_empty()
    }

    /// Relations resolved against their owning entity
    pub fn relations_for(&self, owner: &str) -> Vec<Relation> {
        self.relations.iter().map(|r| r.to_relation(owner)).collect()
    }
}

/// A relation as given on the command line, before it has an owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationSpec {
    pub kind: RelationKind,
    pub target: String,
    pub nullable: bool,
}

impl RelationSpec {
    pub fn parse(spec: &str) -> ModelsmithResult<Self> {
        let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
        let (kind, target, flags) = match parts.as_slice() {
            [kind, target, flags @ ..] => (*kind, *target, flags),
            _ => {
                return Err(invalid(spec, "expected Kind:Target[:nullable]"));
            }
        };

        let kind = RelationKind::parse(kind).ok_or_else(|| {
            invalid(
                spec,
                &format!("unknown relation kind '{kind}' (ManyToOne, OneToMany, OneToOne, ManyToMany)"),
            )
        })?;
        let target = naming::resource_name(target)
            .map_err(|_| invalid(spec, &format!("'{target}' is not a valid entity name")))?;

        let mut nullable = false;
        for flag in flags {
            match *flag {
                "nullable" | "optional" => nullable = true,
                other => return Err(invalid(spec, &format!("unknown flag '{other}'"))),
            }
        }

        Ok(Self {
            kind,
            target,
            nullable,
        })
    }

    /// Property name on the owning side: `product` or `reviews`
    pub fn property_name(&self) -> String {
        if self.kind.is_to_many() {
            naming::to_camel_case(&naming::pluralize(&self.target))
        } else {
            naming::to_camel_case(&self.target)
        }
    }

    pub fn to_relation(&self, owner: &str) -> Relation {
        let name = self.property_name();
        let owns_key = matches!(self.kind, RelationKind::ManyToOne | RelationKind::OneToOne);
        Relation {
            foreign_key_name: owns_key.then(|| format!("{}_id", naming::to_snake_case(&name))),
            name,
            kind: self.kind,
            owner_entity: owner.to_string(),
            target_entity: self.target.clone(),
            nullable: self.nullable,
        }
    }
}

/// Parse one `name:type[:optional][:unique][:length=N]` entry.
pub fn parse_field(spec: &str) -> ModelsmithResult<Field> {
    let mut parts = spec.split(':').map(str::trim);
    let name = parts.next().unwrap_or_default();
    if !is_identifier(name) {
        return Err(invalid(spec, &format!("'{name}' is not a valid field name")));
    }

    let ty = parts
        .next()
        .ok_or_else(|| invalid(spec, "expected name:type"))?;
    let semantic_type = SemanticType::parse(ty).ok_or_else(|| {
        invalid(
            spec,
            &format!("unknown type '{ty}' (string, text, number, uuid, json)"),
        )
    })?;

    let mut field = Field::new(name, semantic_type);
    for flag in parts {
        if let Some(n) = flag.strip_prefix("length=") {
            let length = n
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid(spec, &format!("length must be a positive integer, got '{n}'")))?;
            field = field.with_length(length);
            continue;
        }
        field = match flag {
            "optional" | "nullable" => field.nullable(),
            "unique" => field.unique(),
            other => return Err(invalid(spec, &format!("unknown flag '{other}'"))),
        };
    }

    Ok(field)
}

/// Parse one `name[:type][:optional]` component prop. The type defaults to `string`.
pub fn parse_prop(spec: &str) -> ModelsmithResult<Prop> {
    let mut parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    let optional = parts.len() > 1 && parts.last() == Some(&"optional");
    if optional {
        parts.pop();
    }

    let name = parts.first().copied().unwrap_or_default();
    if !is_identifier(name) {
        return Err(invalid(spec, &format!("'{name}' is not a valid prop name")));
    }

    let ty = parts.get(1..).map(|rest| rest.join(":")).unwrap_or_default();
    Ok(Prop {
        name: name.to_string(),
        ty: if ty.is_empty() { "string".to_string() } else { ty },
        optional,
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn invalid(spec: &str, reason: &str) -> ModelsmithError {
    ModelsmithError::InvalidFieldSpec(format!("'{spec}': {reason}"))
}
