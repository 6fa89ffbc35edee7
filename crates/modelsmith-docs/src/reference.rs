//! Markdown references for frontend components and persisted entities.

use modelsmith_core::model::{Component, ComponentKind, Entity, ProjectModel};

pub fn render_components_markdown(model: &ProjectModel, title: &str) -> String {
    let mut out = format!("# {title} Components\n");

    let mut components: Vec<&Component> = model.components.iter().collect();
    components.sort_by(|a, b| a.name.cmp(&b.name));

    for (heading, kind) in [("Components", ComponentKind::Component), ("Hooks", ComponentKind::Hook)] {
        let group: Vec<&Component> = components.iter().copied().filter(|c| c.kind == kind).collect();
        out.push_str(&format!("\n## {heading}\n"));
        if group.is_empty() {
            out.push_str("\nNone found.\n");
            continue;
        }
        for component in group {
            out.push('\n');
            render_component(&mut out, component);
        }
    }

    out
}

fn render_component(out: &mut String, component: &Component) {
    out.push_str(&format!("### {}\n\n", component.name));
    if let Some(path) = &component.path {
        out.push_str(&format!("Source: `{}`\n\n", path.display()));
    }

    if component.props.is_empty() {
        out.push_str("No props.\n");
    } else {
        out.push_str("| Prop | Type | Required |\n");
        out.push_str("|------|------|----------|\n");
        for prop in &component.props {
            out.push_str(&format!(
                "| `{}` | `{}` | {} |\n",
                prop.name,
                table_cell(&prop.ty),
                if prop.optional { "no" } else { "yes" }
            ));
        }
    }

    out.push_str("\n```tsx\n");
    out.push_str(&usage_example(component));
    out.push_str("\n```\n");
}

/// Minimal usage snippet: required props only
pub fn usage_example(component: &Component) -> String {
    let required = component.props.iter().filter(|p| !p.optional);

    match component.kind {
        ComponentKind::Hook => {
            let args: Vec<&str> = required.map(|p| p.name.as_str()).collect();
            format!("const result = {}({});", component.name, args.join(", "))
        }
        ComponentKind::Component => {
            let attrs: String = required
                .map(|p| format!(" {}={{{}}}", p.name, p.name))
                .collect();
            format!("<{}{attrs} />", component.name)
        }
    }
}

pub fn render_entities_markdown(model: &ProjectModel, title: &str) -> String {
    let mut out = format!("# {title} Entities\n");

    let mut entities: Vec<&Entity> = model.entities.iter().collect();
    entities.sort_by(|a, b| a.name.cmp(&b.name));

    if entities.is_empty() {
        out.push_str("\nNo entities found.\n");
        return out;
    }

    for entity in entities {
        out.push('\n');
        render_entity(&mut out, entity);
    }

    out
}

fn render_entity(out: &mut String, entity: &Entity) {
    out.push_str(&format!("## {}\n\nTable: `{}`\n", entity.name, entity.table_name));

    if !entity.fields.is_empty() {
        out.push_str("\n| Field | Type | Column | Nullable | Unique |\n");
        out.push_str("|-------|------|--------|----------|--------|\n");
        for field in &entity.fields {
            let column = match field.length {
                Some(length) => format!("{}({length})", field.semantic_type.column_type()),
                None => field.semantic_type.column_type().to_string(),
            };
            out.push_str(&format!(
                "| `{}` | {} | `{}` | {} | {} |\n",
                field.name,
                field.semantic_type,
                column,
                yes_no(field.nullable),
                yes_no(field.unique)
            ));
        }
    }

    if !entity.relations.is_empty() {
        out.push_str("\n| Relation | Kind | Target | Foreign key |\n");
        out.push_str("|----------|------|--------|-------------|\n");
        for relation in &entity.relations {
            out.push_str(&format!(
                "| `{}` | {} | {} | {} |\n",
                relation.name,
                relation.kind.as_str(),
                relation.target_entity,
                relation
                    .foreign_key_name
                    .as_deref()
                    .map_or_else(|| "-".to_string(), |fk| format!("`{fk}`"))
            ));
        }
    }
}

/// Table cell text: `|` escaped and line breaks collapsed
pub(crate) fn table_cell(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
