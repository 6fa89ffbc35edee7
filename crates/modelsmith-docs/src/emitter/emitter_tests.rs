#![allow(non_snake_case)]

use super::*;
use modelsmith_core::fs::MemoryFs;

fn config() -> ProjectConfig {
    ProjectConfig::from_str("[project]\nname = \"shop\"\n").unwrap()
}

#[test]
fn emit___empty_model___all_documents_rendered() {
    let docs = emit(&ProjectModel::default(), &config());

    assert!(docs.api.starts_with("# shop API Reference"));
    assert_eq!(docs.openapi["openapi"], "3.0.3");
    assert!(docs.components.starts_with("# shop Components"));
    assert!(docs.entities.starts_with("# shop Entities"));
}

#[test]
fn Documentation___files___pretty_json_with_newline() {
    let docs = emit(&ProjectModel::default(), &config());

    let files = docs.files().unwrap();

    let names: Vec<&str> = files.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec![API_FILE, OPENAPI_FILE, COMPONENTS_FILE, ENTITIES_FILE]);
    let (_, json) = &files[1];
    assert!(json.starts_with("{\n  "));
    assert!(json.ends_with("}\n"));
}

#[test]
fn write_docs___writes_under_output_dir() {
    let fs = MemoryFs::new();
    let config = config();

    let report = write_docs(&fs, &config, &emit(&ProjectModel::default(), &config)).unwrap();

    assert_eq!(report.written(), 4);
    assert!(!report.has_failures());
    assert!(fs.contents("docs/API.md").is_some());
    assert!(fs.contents("docs/openapi.json").is_some());
    assert!(fs.contents("docs/COMPONENTS.md").is_some());
    assert!(fs.contents("docs/ENTITIES.md").is_some());
}

#[test]
fn write_docs___existing_files___overwritten() {
    let fs = MemoryFs::new().with_file("docs/API.md", "stale");
    let config = config();

    write_docs(&fs, &config, &emit(&ProjectModel::default(), &config)).unwrap();

    assert_ne!(fs.contents("docs/API.md").unwrap(), "stale");
}

#[test]
fn write_docs___denied_output___each_file_reported_failed() {
    let fs = MemoryFs::new();
    fs.deny_writes_under("docs");
    let config = config();

    let report = write_docs(&fs, &config, &emit(&ProjectModel::default(), &config)).unwrap();

    assert_eq!(report.failed(), 4);
    assert!(matches!(report.files[0].status, DocStatus::Failed(_)));
}

#[test]
fn DocsReport___display___lists_files_and_totals() {
    let report = DocsReport {
        files: vec![
            EmittedDoc {
                path: PathBuf::from("docs/API.md"),
                status: DocStatus::Written,
            },
            EmittedDoc {
                path: PathBuf::from("docs/openapi.json"),
                status: DocStatus::Failed("disk full".to_string()),
            },
        ],
    };

    assert_eq!(
        report.to_string(),
        "  written  docs/API.md\n  failed   docs/openapi.json (disk full)\n1 written, 1 failed"
    );
}
