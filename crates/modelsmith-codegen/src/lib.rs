//! modelsmith-codegen - Scaffolding from embedded templates
//!
//! ```text
//! kind + name + GenerateParams
//!     ↓
//!  [params]     field/relation/prop specs        → Field, RelationSpec, Prop
//!     ↓
//!  [render]     naming + template substitution   → file contents
//!     ↓
//!  [generator]  create-if-absent writes          → GenerationReport
//!     ↓
//!  [registry]   import + imports-array insertion → app.module.ts (module only)
//! ```
//!
//! Rendering is pure. Only [`Generator`] touches the filesystem, and it never
//! overwrites an existing file.

pub mod artifact;
pub mod generator;
pub mod params;
pub mod registry;
pub mod render;

pub use artifact::{ArtifactKind, GeneratedFile, GenerationReport, NOT_OVERWRITTEN, Outcome};
pub use generator::{Generator, MODULE_STEPS};
pub use params::{GenerateParams, RelationSpec, parse_field, parse_prop};
pub use registry::{Registration, register_module};
pub use render::{Validator, dto_validators};
