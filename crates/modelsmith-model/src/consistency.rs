//! Consistency analysis between entities and module folders.
//!
//! ## Checks Performed
//!
//! 1. **EntityWithoutModule** - no module folder matches the entity
//! 2. **ModuleWithoutEntity** - no entity matches the module folder
//! 3. **IncompleteModule** - a module folder lacks a conventional part
//! 4. **DanglingRelation** - a relation targets an unknown entity
//!
//! Entity → module matching tries an explicit `[naming.modules]` entry first.
//! Without one, the candidates are the lowercase name, lowercase + `s`, the
//! kebab-case name and its plural (`OrderItem` → `orderitem`, `orderitems`,
//! `order-item`, `order-items`).
//!
//! Module → entity matching applies the table inversely, then tries the folder
//! name as-is, without a trailing `s`, and with `ies` → `y`. Names are compared
//! case-insensitively with hyphens removed.
//!
//! Analysis is pure: the same inputs always give the same report.

use modelsmith_core::config::NamingConfig;
use modelsmith_core::model::{ConsistencyIssue, Entity, IssueKind, Module};
use modelsmith_core::naming;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Outcome of [`analyze`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    pub entities_without_module: Vec<ConsistencyIssue>,
    pub modules_without_entity: Vec<ConsistencyIssue>,
    pub incomplete_modules: Vec<ConsistencyIssue>,
    pub dangling_relations: Vec<ConsistencyIssue>,
    pub suggestions: Vec<String>,
}

impl ConsistencyReport {
    /// All issues, grouped by kind
    pub fn issues(&self) -> impl Iterator<Item = &ConsistencyIssue> {
        self.entities_without_module
            .iter()
            .chain(&self.modules_without_entity)
            .chain(&self.incomplete_modules)
            .chain(&self.dangling_relations)
    }

    pub fn issue_count(&self) -> usize {
        self.issues().count()
    }

    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }

    pub fn contains(&self, kind: IssueKind, subject: &str) -> bool {
        self.issues().any(|i| i.kind == kind && i.subject == subject)
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = [
            ("Entities without module", &self.entities_without_module),
            ("Modules without entity", &self.modules_without_entity),
            ("Incomplete modules", &self.incomplete_modules),
            ("Dangling relations", &self.dangling_relations),
        ];

        for (title, issues) in sections {
            writeln!(f, "{title} ({})", issues.len())?;
            for issue in issues {
                writeln!(f, "  - {}: {}", issue.subject, issue.detail)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f, "\nSuggestions")?;
            for suggestion in &self.suggestions {
                writeln!(f, "  * {suggestion}")?;
            }
        }
        Ok(())
    }
}

/// Module folders that would satisfy an entity
pub fn module_candidates(entity: &str, naming_config: &NamingConfig) -> Vec<String> {
    if let Some(folder) = naming_config.module_for_entity(entity) {
        return vec![folder.to_string()];
    }

    let lower = entity.to_lowercase();
    let kebab = naming::to_kebab_case(entity);
    let mut candidates = vec![
        lower.clone(),
        format!("{lower}s"),
        kebab.clone(),
        naming::pluralize(&kebab),
    ];
    let mut seen = BTreeSet::new();
    candidates.retain(|c| seen.insert(c.clone()));
    candidates
}

/// Normalized entity names that would satisfy a module folder
pub fn entity_candidates(module: &str, naming_config: &NamingConfig) -> Vec<String> {
    if let Some(entity) = naming_config.entity_for_module(module) {
        return vec![normalize(entity)];
    }

    let mut candidates = vec![normalize(module), normalize(&naming::singularize(module))];
    // "statuses" and "boxes" both pluralize by "es"
    if let Some(stem) = module.strip_suffix("es") {
        candidates.push(normalize(stem));
    }
    if let Some(stem) = module.strip_suffix('s') {
        candidates.push(normalize(stem));
    }
    let mut seen = BTreeSet::new();
    candidates.retain(|c| !c.is_empty() && seen.insert(c.clone()));
    candidates
}

fn normalize(name: &str) -> String {
    name.to_lowercase().replace('-', "")
}

/// Compute the consistency report for a set of entities and modules.
pub fn analyze(
    entities: &[Entity],
    modules: &[Module],
    naming_config: &NamingConfig,
) -> ConsistencyReport {
    let mut entities: Vec<&Entity> = entities.iter().collect();
    entities.sort_by(|a, b| a.name.cmp(&b.name));
    let mut modules: Vec<&Module> = modules.iter().collect();
    modules.sort_by(|a, b| a.name.cmp(&b.name));

    let module_names: BTreeSet<String> = modules.iter().map(|m| m.name.to_lowercase()).collect();
    let entity_names: BTreeSet<String> = entities.iter().map(|e| normalize(&e.name)).collect();

    let mut report = ConsistencyReport::default();

    for entity in &entities {
        let candidates = module_candidates(&entity.name, naming_config);
        if !candidates
            .iter()
            .any(|c| module_names.contains(&c.to_lowercase()))
        {
            report.entities_without_module.push(ConsistencyIssue::new(
                IssueKind::EntityWithoutModule,
                &entity.name,
                format!("no module folder named {}", candidates.join(", ")),
            ));
            report.suggestions.push(format!(
                "run `modelsmith module {}` to scaffold module '{}'",
                entity.name,
                candidates.last().map_or("", String::as_str)
            ));
        }
    }

    for module in &modules {
        if naming_config.is_ignored(&module.name) {
            continue;
        }
        let candidates = entity_candidates(&module.name, naming_config);
        if !candidates.iter().any(|c| entity_names.contains(c)) {
            report.modules_without_entity.push(ConsistencyIssue::new(
                IssueKind::ModuleWithoutEntity,
                &module.name,
                "no entity matches this module folder",
            ));
            report.suggestions.push(format!(
                "add an entity for module '{}', map it in [naming.modules], or list it in naming.ignore_modules",
                module.name
            ));
        }
    }

    for module in &modules {
        let missing = module.missing();
        if !missing.is_empty() {
            report.incomplete_modules.push(ConsistencyIssue::new(
                IssueKind::IncompleteModule,
                &module.name,
                format!("missing {}", missing.join(", ")),
            ));
            report.suggestions.push(format!(
                "generate the missing {} for module '{}'",
                missing.join(", "),
                module.name
            ));
        }
    }

    for entity in &entities {
        for relation in &entity.relations {
            let known = entities
                .iter()
                .any(|e| e.name.eq_ignore_ascii_case(&relation.target_entity));
            if !known {
                report.dangling_relations.push(ConsistencyIssue::new(
                    IssueKind::DanglingRelation,
                    format!("{}.{}", entity.name, relation.name),
                    format!(
                        "{} target '{}' is not a known entity",
                        relation.kind, relation.target_entity
                    ),
                ));
                report.suggestions.push(format!(
                    "create entity '{}' or fix relation {}.{}",
                    relation.target_entity, entity.name, relation.name
                ));
            }
        }
    }

    report
}
