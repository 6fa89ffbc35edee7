//! modelsmith-docs - Reference documentation from a project model
//!
//! ```text
//! ProjectModel + ProjectConfig
//!     ↓
//!  ├─→ [api]        controllers, endpoints, curl  → API.md
//!  ├─→ [openapi]    paths, schemas, security      → openapi.json
//!  └─→ [reference]  components, hooks, entities   → COMPONENTS.md, ENTITIES.md
//!     ↓
//!  [emitter]  overwrite under docs.output_dir     → DocsReport
//! ```
//!
//! [`sample`] synthesizes the example values and requests shared by the
//! Markdown and OpenAPI outputs.

pub mod api;
pub mod emitter;
pub mod openapi;
pub mod reference;
pub mod sample;

pub use api::render_api_markdown;
pub use emitter::{
    API_FILE, COMPONENTS_FILE, DocStatus, DocsReport, Documentation, ENTITIES_FILE, EmittedDoc,
    OPENAPI_FILE, emit, write_docs,
};
pub use openapi::{generate_openapi, openapi_path, success_status};
pub use reference::{render_components_markdown, render_entities_markdown, usage_example};
pub use sample::{curl_example, example_body, example_value};
