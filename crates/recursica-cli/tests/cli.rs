use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use recursica_cli::cli::{Cli, Variant};
use recursica_cli::commands;
use recursica_cli::config::{Config, Settings};
use recursica_cli::run;
use serde_json::json;
use tempfile::TempDir;

fn write_json(dir: &Path, name: &str, value: serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}

fn write_documents(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let tokens = write_json(
        dir,
        "tokens.json",
        json!({ "tokens": { "colors": { "scale-02": { "500": "#ffffff" } } } }),
    );
    let brand = write_json(
        dir,
        "brand.json",
        json!({ "themes": { "light": {
            "palettes": { "neutral": { "100": { "color": { "tone": "{tokens.colors.scale-02.500}" } } } }
        } } }),
    );
    let uikit = write_json(dir, "uikit.json", json!({ "button": { "text": "Inter" } }));
    (tokens, brand, uikit)
}

fn utf8(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

fn settings(tokens: PathBuf, brand: PathBuf, ui_kit: PathBuf, out: &Path) -> Settings {
    Settings {
        tokens: Some(tokens),
        brand: Some(brand),
        ui_kit: Some(ui_kit),
        out: out.to_path_buf(),
        options: Default::default(),
    }
}

#[test]
fn test_export_writes_bundle() {
    let dir = TempDir::new().unwrap();
    let (tokens, brand, uikit) = write_documents(dir.path());
    let out = dir.path().join("dist");

    let cli = Cli::try_parse_from([
        "recursica",
        "export",
        "--tokens",
        utf8(&tokens),
        "--brand",
        utf8(&brand),
        "--ui-kit",
        utf8(&uikit),
        "--out",
        utf8(&out),
    ])
    .unwrap();
    run(cli).unwrap();

    let mut names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "recursica_brand.json",
            "recursica_tokens.json",
            "recursica_ui-kit.json",
            "recursica_variables_scoped.css",
            "recursica_variables_specific.css",
        ]
    );
    let specific = fs::read_to_string(out.join("recursica_variables_specific.css")).unwrap();
    assert!(specific.contains("--recursica_tokens_colors_scale-02_500: #ffffff;"));
    let brand_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("recursica_brand.json")).unwrap()).unwrap();
    assert!(brand_json.get("brand").is_some());
}

#[test]
fn test_export_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let (tokens, _, uikit) = write_documents(dir.path());
    let brand = write_json(
        dir.path(),
        "broken.json",
        json!({ "themes": { "dark": { "layers": { "layer-0": { "surface": "{brand.palettes.nope.100}" } } } } }),
    );
    let out = dir.path().join("dist");

    let err = commands::export(&settings(tokens, brand, uikit, &out)).unwrap_err();
    let message = commands::describe_error(&err);
    assert!(message.starts_with("error: 1 validation error(s) in "));
    assert!(message.contains("\nrecursica_brand.json:\n  brand.themes.dark.layers.layer-0.surface: "));
    assert!(!out.exists());
}

#[test]
fn test_export_write_failure_leaves_no_partial_bundle() {
    let dir = TempDir::new().unwrap();
    let (tokens, brand, uikit) = write_documents(dir.path());
    let out = dir.path().join("dist");
    // A directory where the last staged file would go makes its write fail.
    fs::create_dir_all(out.join(".recursica_variables_scoped.css.tmp")).unwrap();

    let err = commands::export(&settings(tokens, brand, uikit, &out)).unwrap_err();
    assert!(commands::describe_error(&err).starts_with("error: failed to write "));

    let names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![".recursica_variables_scoped.css.tmp"]);
}

#[test]
fn test_css_variants() {
    let dir = TempDir::new().unwrap();
    let (tokens, brand, uikit) = write_documents(dir.path());
    let settings = settings(tokens, brand, uikit, dir.path());

    let mut specific = Vec::new();
    commands::css(&settings, Variant::Specific, &mut specific).unwrap();
    let specific = String::from_utf8(specific).unwrap();
    assert!(specific.starts_with(":root {\n"));
    assert!(specific.contains("--recursica_ui-kit_button_text: \"Inter\";"));

    let mut scoped = Vec::new();
    commands::css(&settings, Variant::Scoped, &mut scoped).unwrap();
    let scoped = String::from_utf8(scoped).unwrap();
    assert!(scoped.contains(
        "[data-recursica-theme=\"light\"] {\n  --recursica_brand_palettes_neutral_100_color_tone: \
         var(--recursica_brand_themes_light_palettes_neutral_100_color_tone);\n}\n"
    ));
}

#[test]
fn test_rename_vars() {
    let dir = TempDir::new().unwrap();
    let (tokens, brand, uikit) = write_documents(dir.path());
    let css = dir.path().join("component.css");
    fs::write(
        &css,
        ".button { color: var(--recursica-tokens-colors-scale-02-500); gap: var(--recursica-unknown); }\n",
    )
    .unwrap();

    let mut out = Vec::new();
    commands::rename_vars(&settings(tokens, brand, uikit, dir.path()), &css, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        ".button { color: var(--recursica_tokens_colors_scale-02_500); gap: var(--recursica-unknown); }\n"
    );
}

#[test]
fn test_config_file_paths_are_relative_to_it() {
    let dir = TempDir::new().unwrap();
    write_documents(dir.path());
    let config_path = dir.path().join("recursica.yaml");
    fs::write(
        &config_path,
        "tokens: tokens.json\nbrand: brand.json\nui-kit: uikit.json\nout: dist\nstrict-references: true\n",
    )
    .unwrap();

    let config = Config::load(Some(&config_path)).unwrap();
    assert_eq!(config.tokens, Some(dir.path().join("tokens.json")));
    assert_eq!(config.out, Some(dir.path().join("dist")));
    assert!(config.transform.strict_references);

    let cli = Cli::try_parse_from(["recursica", "--config", utf8(&config_path), "export"]).unwrap();
    run(cli).unwrap();
    assert!(dir.path().join("dist/recursica_variables_scoped.css").is_file());
}

#[test]
fn test_unreadable_input() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    let settings = Settings {
        tokens: Some(missing),
        brand: None,
        ui_kit: None,
        out: dir.path().to_path_buf(),
        options: Default::default(),
    };
    let err = commands::export(&settings).unwrap_err();
    assert!(commands::describe_error(&err).starts_with("error: failed to read "));

    let invalid = write_json(dir.path(), "list.json", json!([1, 2]));
    let settings = Settings {
        tokens: Some(invalid),
        ..settings
    };
    let err = commands::export(&settings).unwrap_err();
    assert!(commands::describe_error(&err).contains("expected a JSON object, found an array"));
}
