//! Dead-code reporter.
//!
//! A DTO is considered live when some endpoint uses it as its body or query
//! type, or when another DTO extends it. Endpoints whose handler resolved to
//! `"unknown"` are listed as well.

use modelsmith_core::model::ProjectModel;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A DTO class nothing refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedDto {
    pub name: String,
    pub path: Option<String>,
}

/// An endpoint whose handler resolved to `"unknown"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedEndpoint {
    pub controller: String,
    pub method: String,
    pub route: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeadCodeReport {
    pub unused_dtos: Vec<UnusedDto>,
    pub unresolved_endpoints: Vec<UnresolvedEndpoint>,
}

impl DeadCodeReport {
    pub fn is_clean(&self) -> bool {
        self.unused_dtos.is_empty() && self.unresolved_endpoints.is_empty()
    }
}

impl fmt::Display for DeadCodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unused DTOs ({})", self.unused_dtos.len())?;
        for dto in &self.unused_dtos {
            match &dto.path {
                Some(path) => writeln!(f, "  - {} ({path})", dto.name)?,
                None => writeln!(f, "  - {}", dto.name)?,
            }
        }

        writeln!(f, "Unresolved handlers ({})", self.unresolved_endpoints.len())?;
        for endpoint in &self.unresolved_endpoints {
            writeln!(
                f,
                "  - {} {} in {}",
                endpoint.method, endpoint.route, endpoint.controller
            )?;
        }
        Ok(())
    }
}

/// Find unreferenced DTOs and unresolved endpoints.
pub fn find_dead_code(model: &ProjectModel) -> DeadCodeReport {
    let mut referenced: BTreeSet<&str> = BTreeSet::new();

    for (_, endpoint) in model.endpoints() {
        referenced.extend(endpoint.body_dto_name.as_deref());
        referenced.extend(endpoint.query_param_type_name.as_deref());
    }
    referenced.extend(model.dtos.iter().filter_map(|d| d.extends.as_deref()));

    let mut unused_dtos: Vec<UnusedDto> = model
        .dtos
        .iter()
        .filter(|dto| !referenced.contains(dto.name.as_str()))
        .map(|dto| UnusedDto {
            name: dto.name.clone(),
            path: dto.path.as_ref().map(|p| p.display().to_string()),
        })
        .collect();
    unused_dtos.sort_by(|a, b| a.name.cmp(&b.name));

    let unresolved_endpoints = model
        .endpoints()
        .filter(|(_, endpoint)| endpoint.is_unresolved())
        .map(|(controller, endpoint)| UnresolvedEndpoint {
            controller: controller.name.clone(),
            method: endpoint.http_method.to_string(),
            route: endpoint.route.clone(),
        })
        .collect();

    DeadCodeReport {
        unused_dtos,
        unresolved_endpoints,
    }
}
