//! modelsmith-extract - Token-level extraction from decorator-annotated sources
//!
//! Each extractor takes the text of one file and returns a best-effort record,
//! or `None` when the file lacks the expected top-level declaration. Extraction
//! never fails: unrecognized constructs are omitted, never reported as errors.
//!
//! ```text
//! source text
//!     ↓
//!  [lexer]    tokens with byte offsets, comments skipped
//!     ↓
//!  [scanner]  classes, decorators, members, parameters
//!     ↓
//!  ├─→ [entity]      *.entity.ts      → Entity
//!  ├─→ [controller]  *.controller.ts  → Controller + Endpoints
//!  ├─→ [dto]         dto/*.ts         → Dto
//!  └─→ [component]   *.tsx, hooks     → Component
//! ```

pub mod component;
pub mod controller;
pub mod dto;
pub mod entity;
pub mod lexer;
pub mod scanner;

pub use component::{extract_component, extract_components};
pub use controller::{extract_controller, join_route, resolve_handler, route_params};
pub use dto::{extract_dto, extract_dtos};
pub use entity::extract_entity;
pub use lexer::{Token, TokenKind, tokenize};
pub use scanner::{ClassDecl, Decorator, Scanner, scan_classes};
