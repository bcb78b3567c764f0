//! Schema loading and import resolution tests
//!
//! Every test works on fixture files in a temporary directory; `linkml:`
//! imports are pointed at a local directory instead of the network.

use linkml2sheets::parser::{ImportSettings, SchemaLoader};
use linkml2sheets::schema_view::SchemaView;
use linkml_core::error::LinkMLError;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn settings(linkml_base: &Path) -> ImportSettings {
    ImportSettings {
        linkml_base: linkml_base.to_string_lossy().into_owned(),
        ..ImportSettings::default()
    }
}

#[tokio::test]
async fn test_relative_imports() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write(
        dir.path(),
        "common/core.yaml",
        "id: https://example.org/core\nname: core\nslots:\n  id:\n    identifier: true\n",
    );
    let main = write(
        dir.path(),
        "main.yaml",
        "id: https://example.org/main\nname: main\nimports:\n  - common/core\nclasses:\n  Person:\n    slots: [id]\n",
    );

    let loaded = SchemaLoader::new(settings(dir.path())).load(&main).await?;
    assert!(loaded.schema.slots.is_empty());
    assert_eq!(loaded.merged.slots["id"].name, "id");
    assert!(loaded.merged.classes.contains_key("Person"));
    Ok(())
}

#[tokio::test]
async fn test_linkml_imports_use_configured_base() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("model");
    write(
        &base,
        "types.yaml",
        "id: https://w3id.org/linkml/types\nname: types\ntypes:\n  string:\n    uri: xsd:string\n",
    );
    let main = write(
        dir.path(),
        "schema.yaml",
        "id: https://example.org/s\nname: s\nimports:\n  - linkml:types\n",
    );

    let view = SchemaView::load(&main, &settings(&base)).await.unwrap();
    assert!(view.schema().types.is_empty());
    assert_eq!(view.merged().types["string"].uri.as_deref(), Some("xsd:string"));
}

#[tokio::test]
async fn test_cyclic_imports_terminate() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "b.yaml",
        "id: https://example.org/b\nname: b\nimports: [a]\nslots:\n  from_b:\n",
    );
    let a = write(
        dir.path(),
        "a.yaml",
        "id: https://example.org/a\nname: a\nimports: [b]\nslots:\n  from_a:\n",
    );

    let loaded = SchemaLoader::new(settings(dir.path())).load(&a).await.unwrap();
    let names: Vec<&str> = loaded.merged.slots.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["from_a", "from_b"]);
}

#[tokio::test]
async fn test_max_depth_exceeded() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "c.yaml", "id: x\nname: c\n");
    write(dir.path(), "b.yaml", "id: x\nname: b\nimports: [c]\n");
    let a = write(dir.path(), "a.yaml", "id: x\nname: a\nimports: [b]\n");

    let shallow = ImportSettings {
        max_depth: 1,
        ..settings(dir.path())
    };
    let err = SchemaLoader::new(shallow).load(&a).await.unwrap_err();
    assert!(matches!(err, LinkMLError::ImportError { .. }));

    let deep_enough = ImportSettings {
        max_depth: 2,
        ..settings(dir.path())
    };
    assert!(SchemaLoader::new(deep_enough).load(&a).await.is_ok());
}

#[tokio::test]
async fn test_missing_import() {
    let dir = TempDir::new().unwrap();
    let main = write(dir.path(), "main.yaml", "id: x\nname: s\nimports: [nowhere]\n");

    let err = SchemaLoader::new(settings(dir.path())).load(&main).await.unwrap_err();
    match err {
        LinkMLError::ImportError { import, .. } => assert_eq!(import, "nowhere"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_missing_schema_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.yaml");
    let result = SchemaLoader::new(settings(dir.path()))
        .load(&missing.to_string_lossy())
        .await;
    assert!(matches!(result, Err(LinkMLError::IoError(_))));
}

#[tokio::test]
async fn test_resolution_disabled() {
    let dir = TempDir::new().unwrap();
    let main = write(dir.path(), "main.yaml", "id: x\nname: s\nimports: [nowhere]\nslots:\n  a:\n");

    let settings = ImportSettings {
        resolve: false,
        ..settings(dir.path())
    };
    let loaded = SchemaLoader::new(settings).load(&main).await.unwrap();
    assert_eq!(loaded.schema, loaded.merged);
}

#[tokio::test]
async fn test_json_schema() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let main = write(
        dir.path(),
        "schema.json",
        r#"{"id": "x", "name": "s", "classes": {"Thing": {"attributes": {"label": null}}}}"#,
    );

    let loaded = SchemaLoader::new(settings(dir.path())).load(&main).await?;
    assert_eq!(loaded.schema.classes["Thing"].attributes["label"].name, "label");
    Ok(())
}

#[tokio::test]
async fn test_importing_schema_wins() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "base.yaml",
        "id: x\nname: base\nslots:\n  name:\n    range: integer\n  extra:\n",
    );
    let main = write(
        dir.path(),
        "main.yaml",
        "id: y\nname: main\nimports: [base]\nslots:\n  name:\n    range: string\n",
    );

    let loaded = SchemaLoader::new(settings(dir.path())).load(&main).await.unwrap();
    assert_eq!(loaded.merged.slots["name"].range.as_deref(), Some("string"));
    assert!(loaded.merged.slots.contains_key("extra"));
}
