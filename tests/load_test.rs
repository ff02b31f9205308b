//! リソースディレクトリの読み込みに関する結合テスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use googletest::prelude::*;
use i18nco::{
    Internationalization,
    LoadError,
    LocaleId,
    parse_lang,
};
use i18nco::config::CONFIG_FILE_NAME;
use i18nco::lang::ParseErrorKind;
use rstest::rstest;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn locale(id: &str) -> LocaleId {
    LocaleId::new(id).unwrap()
}

/// 典型的なリソースディレクトリを作成する
fn resource_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        CONFIG_FILE_NAME,
        r#"{"firstLocale": "en_US", "secondLocale": "zh_CN", "autoAdjust": false}"#,
    );
    write(
        root,
        "en_US.lang",
        "; main strings\n\
         hello = Hello\n\
         #define superiors mode\n\
         singleton = Singleton Mode ; not a comment\n\
         #define superiors\n\
         robert = I have become death \\\n\
         \x20        the destroyer of worlds\n",
    );
    write(root, "zh_CN/menu.lang", "open = \"打开\"\nquit = 退出\n");
    write(root, "zh_CN/common.json", r#"{"only": {"zh": "仅中文"}}"#);
    write(root, "sheet.csv", "key,locale,value\nhello,ja_JP,こんにちは\nhello,zh_CN,你好\n");
    write(root, "notes.txt", "not a resource");
    temp_dir
}

#[googletest::test]
fn test_open_loads_every_resource() {
    let temp_dir = resource_tree();

    let i18n = Internationalization::open(temp_dir.path()).unwrap();

    let locales: Vec<&str> = i18n.available_locales().into_iter().map(LocaleId::as_str).collect();
    assert_eq!(locales, vec!["en_US", "ja_JP", "zh_CN"]);
    expect_that!(
        i18n.table().get("en_US", "mode.singleton"),
        some(eq("Singleton Mode ; not a comment"))
    );
    expect_that!(
        i18n.table().get("en_US", "robert"),
        some(eq("I have become death the destroyer of worlds"))
    );
    expect_that!(i18n.table().get("zh_CN", "menu.open"), some(eq("打开")));
    expect_that!(i18n.table().get("zh_CN", "only.zh"), some(eq("仅中文")));
    expect_that!(i18n.table().get("ja_JP", "hello"), some(eq("こんにちは")));
}

#[rstest]
#[case::first_locale("hello", None, "Hello")]
#[case::second_locale("menu.quit", None, "退出")]
#[case::explicit_locale("hello", Some("ja_JP"), "こんにちは")]
#[case::explicit_falls_back("mode.singleton", Some("ja_JP"), "Singleton Mode ; not a comment")]
#[case::raw_key("missing.key", None, "missing.key")]
fn test_lookup_fallback(#[case] key: &str, #[case] explicit: Option<&str>, #[case] expected: &str) {
    let temp_dir = resource_tree();
    let i18n = Internationalization::open(temp_dir.path()).unwrap();
    let explicit = explicit.map(locale);

    let text = i18n.translation(key, explicit.as_ref());

    assert_eq!(text.to_string(), expected);
}

#[googletest::test]
fn test_nested_access_and_format() {
    let temp_dir = resource_tree();
    let mut i18n = Internationalization::open(temp_dir.path()).unwrap();
    i18n.load_lang_str("welcome = \"Welcome, {name}! ({0} new)\"", Some(locale("en_US")), None)
        .unwrap();

    expect_that!(
        i18n.translation("mode", None).child("singleton").to_string(),
        eq("Singleton Mode ; not a comment")
    );
    expect_that!(
        i18n.translation("welcome", None).format(&[&2], &[("name", &"Ada")]),
        eq("Welcome, Ada! (2 new)")
    );
}

#[googletest::test]
fn test_broken_file_reports_path_and_line() {
    let temp_dir = resource_tree();
    let broken = write(temp_dir.path(), "fr_FR.lang", "bonjour = Bonjour\n\n#define locale\n");

    let err = Internationalization::open(temp_dir.path()).unwrap_err();

    match &err {
        LoadError::Parse { path, line, kind } => {
            expect_that!(path == &broken, eq(true));
            expect_that!(*line, eq(3));
            expect_that!(*kind == ParseErrorKind::EmptyLocaleDirective, eq(true));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    expect_that!(err.to_string(), ends_with(":3: `#define locale` requires at least one locale"));
}

#[googletest::test]
fn test_failed_file_leaves_earlier_loads_intact() {
    let temp_dir = resource_tree();
    let mut i18n = Internationalization::with_locales(locale("en_US"), locale("zh_CN")).unwrap();
    i18n.load_lang(&temp_dir.path().join("en_US.lang"), Some(locale("en_US")), None).unwrap();
    let broken = write(temp_dir.path(), "broken.lang", "a = 1\nb = \"unterminated\n");

    let result = i18n.load_lang(&broken, Some(locale("en_US")), None);

    expect_that!(matches!(result, Err(LoadError::Parse { line: 2, .. })), eq(true));
    expect_that!(i18n.table().get("en_US", "hello"), some(eq("Hello")));
    expect_that!(i18n.table().get("en_US", "a"), none());
}

#[googletest::test]
fn test_last_write_wins() {
    let mut i18n = Internationalization::with_locales(locale("en_US"), locale("zh_CN")).unwrap();

    i18n.load_lang_str("a = 1", Some(locale("en_US")), None).unwrap();
    i18n.load_lang_str("a = 2", Some(locale("en_US")), None).unwrap();

    expect_that!(i18n.table().get("en_US", "a"), some(eq("2")));
}

#[googletest::test]
fn test_auto_load_with_explicit_locale() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "menu.lang", "open = Open");
    write(root, "common.json", r#"{"ok": "OK"}"#);
    let mut i18n = Internationalization::with_locales(locale("en_GB"), locale("zh_CN")).unwrap();

    let count = i18n.auto_load(root, Some(&locale("en_GB"))).unwrap();

    expect_that!(count, eq(2));
    expect_that!(i18n.translation("menu.open", None).to_string(), eq("Open"));
    expect_that!(i18n.translation("ok", None).to_string(), eq("OK"));
}

#[googletest::test]
fn test_parse_lang_multi_locale_fan_out() {
    let entries =
        parse_lang("#define locale en_US en_GB\nhello = Hello\n", Some(locale("fr_FR")), None)
            .unwrap();

    let triples: Vec<(String, String, String)> = entries
        .into_iter()
        .map(|entry| (entry.locale.to_string(), entry.key.dotted(), entry.value))
        .collect();
    assert_eq!(
        triples,
        vec![
            ("en_US".to_string(), "hello".to_string(), "Hello".to_string()),
            ("en_GB".to_string(), "hello".to_string(), "Hello".to_string()),
        ]
    );
}
