//! End-to-end tests for the runtime engine: catalog loading from disk,
//! deferred evaluation, and graceful degradation.

use std::fs;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;
use weft::core::{TranslationCatalog, ValueMap, evaluate};

fn values(pairs: &[(&str, serde_json::Value)]) -> ValueMap {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

#[test]
fn evaluate_against_a_catalog_loaded_from_disk() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("en.json"),
        r#"{"locale": "en", "translations": {"cart": "{n, plural, =0 {Your cart is empty} one {# item in your cart} other {# items in your cart}}"}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("sv.json"),
        r#"{"locale": "sv", "translations": {"cart": "{n, plural, =0 {Din varukorg är tom} one {# sak i varukorgen} other {# saker i varukorgen}}"}}"#,
    )
    .unwrap();

    let catalog = TranslationCatalog::new();
    let locales = catalog.load_dir(dir.path()).unwrap();
    assert_eq!(locales, vec!["en", "sv"]);

    let default_template = "{n, plural, other {# items}}";

    let en = evaluate(&catalog, "cart", default_template, "en", &values(&[("n", json!(1))]));
    assert_eq!(en, "1 item in your cart");

    let sv = evaluate(&catalog, "cart", default_template, "sv", &values(&[("n", json!(3))]));
    assert_eq!(sv, "3 saker i varukorgen");

    let sv_empty = evaluate(&catalog, "cart", default_template, "sv", &values(&[("n", json!(0))]));
    assert_eq!(sv_empty, "Din varukorg är tom");
}

#[test]
fn unknown_locale_falls_back_to_the_embedded_template() {
    let catalog = TranslationCatalog::new();
    let out = evaluate(
        &catalog,
        "cart",
        "{n, plural, one {# item} other {# items}}",
        "xx-unloaded",
        &values(&[("n", json!(2))]),
    );
    assert_eq!(out, "2 items");
}

#[test]
fn unknown_message_id_falls_back_to_the_embedded_template() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("en.json"), r#"{"other-id": "irrelevant"}"#).unwrap();

    let catalog = TranslationCatalog::new();
    catalog.load_dir(dir.path()).unwrap();

    let out = evaluate(
        &catalog,
        "cart",
        "{n, plural, one {# item} other {# items}}",
        "en",
        &values(&[("n", json!(5))]),
    );
    assert_eq!(out, "5 items");
}

#[test]
fn russian_categories_resolve_through_locale_rules() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("ru.json"),
        r#"{"files": "{n, plural, one {# файл} few {# файла} many {# файлов} other {# файла}}"}"#,
    )
    .unwrap();

    let catalog = TranslationCatalog::new();
    catalog.load_dir(dir.path()).unwrap();

    let render = |n: i64| {
        evaluate(
            &catalog,
            "files",
            "{n, plural, other {# files}}",
            "ru",
            &values(&[("n", json!(n))]),
        )
    };

    assert_eq!(render(1), "1 файл");
    assert_eq!(render(2), "2 файла");
    assert_eq!(render(5), "5 файлов");
    assert_eq!(render(21), "21 файл");
}

#[test]
fn non_icu_translation_is_returned_unmodified() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("de.json"), r#"{"title": "Willkommen"}"#).unwrap();

    let catalog = TranslationCatalog::new();
    catalog.load_dir(dir.path()).unwrap();

    let out = evaluate(&catalog, "title", "Welcome", "de", &ValueMap::new());
    assert_eq!(out, "Willkommen");
}

#[test]
fn reload_swaps_the_locale_wholesale() {
    let catalog = TranslationCatalog::new();
    let mut first = weft::core::TranslationEntry::new("en");
    first.insert("a", "first");
    first.insert("b", "kept only in first");
    catalog.load(first);

    let mut second = weft::core::TranslationEntry::new("en");
    second.insert("a", "second");
    catalog.load(second);

    assert_eq!(
        evaluate(&catalog, "a", "default", "en", &ValueMap::new()),
        "second"
    );
    // "b" disappeared with the old entry; the embedded default wins.
    assert_eq!(
        evaluate(&catalog, "b", "default", "en", &ValueMap::new()),
        "default"
    );
}

#[test]
fn select_expressions_evaluate_end_to_end() {
    let catalog = TranslationCatalog::new();
    let out = evaluate(
        &catalog,
        "who",
        "{gender, select, male {He replied} female {She replied} other {They replied}}",
        "en",
        &values(&[("gender", json!("female"))]),
    );
    assert_eq!(out, "She replied");
}
