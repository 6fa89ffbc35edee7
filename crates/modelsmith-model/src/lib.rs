//! modelsmith-model - Project model and reporters
//!
//! ```text
//! FileSystem + ProjectConfig
//!     ↓
//!  [builder]      walk the layout, run the extractors  → ProjectModel
//!     ↓
//!  ├─→ [consistency]  entities ↔ modules               → ConsistencyReport
//!  └─→ [dead_code]    unreferenced DTOs, unknown handlers → DeadCodeReport
//! ```
//!
//! Both reporters are read-only views over a built model.

pub mod builder;
pub mod consistency;
pub mod dead_code;

pub use builder::ModelBuilder;
pub use consistency::{ConsistencyReport, analyze, entity_candidates, module_candidates};
pub use dead_code::{DeadCodeReport, UnresolvedEndpoint, UnusedDto, find_dead_code};

use modelsmith_core::config::ProjectConfig;
use modelsmith_core::error::ModelsmithResult;
use modelsmith_core::fs::FileSystem;
use modelsmith_core::model::ProjectModel;

/// Build the model and run the consistency analysis over it.
pub fn analyze_project<F: FileSystem + ?Sized>(
    fs: &F,
    config: &ProjectConfig,
) -> ModelsmithResult<(ProjectModel, ConsistencyReport)> {
    let model = ModelBuilder::new(fs, config).build()?;
    let report = analyze(&model.entities, &model.modules, &config.naming);
    Ok((model, report))
}
