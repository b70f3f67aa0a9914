use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::{contains_marker, normalize_text, strip_enumeration, strip_tags};

#[test]
fn normalize_strips_enumeration_glyphs_and_tags() {
    assert_eq!(normalize_text("3. 环境准备"), "环境准备");
    assert_eq!(normalize_text("🚀 Deploy  🎉"), "Deploy");
    assert_eq!(normalize_text("<code>foo</code> bar"), "foo bar");
    assert_eq!(normalize_text("  1.2. 📦 Install\tguide "), "Install guide");
    assert_eq!(normalize_text("3、目录"), "目录");
    assert_eq!(normalize_text("🎉🎉🎉"), "");
}

#[test]
fn normalize_keeps_plain_numbers() {
    assert_eq!(normalize_text("2024 Roadmap"), "2024 Roadmap");
    assert_eq!(normalize_text("Python 3.12"), "Python 3.12");
}

#[test]
fn strip_enumeration_consumes_repeated_prefixes() {
    assert_eq!(strip_enumeration("3. 4. x"), "x");
    assert_eq!(strip_enumeration("1.5.3 rest"), "3 rest");
    assert_eq!(strip_enumeration("none here"), "none here");
}

#[test]
fn strip_tags_repeats_until_clean() {
    assert_eq!(strip_tags("<b><i>text</i></b>"), "text");
    assert_eq!(strip_tags("<<a>b>text"), "b>text");
    assert_eq!(strip_tags("a < b"), "a < b");
}

#[test]
fn normalize_is_idempotent() {
    let mut runner = TestRunner::new(Config {
        cases: 256,
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&"[0-9a-z .、)<>🎉¶环境\t]{0,24}", |s| {
            let once = normalize_text(&s);
            let twice = normalize_text(&once);
            prop_assert_eq!(twice, once);
            Ok(())
        })
        .unwrap();
}

#[test]
fn marker_detection_is_case_insensitive() {
    let markers = vec!["目录".to_string(), "contents".to_string()];
    assert!(contains_marker("📚 目录", &markers));
    assert!(contains_marker("Table of Contents", &markers));
    assert!(!contains_marker("Introduction", &markers));
}

#[test]
fn glyphs_are_dropped_before_tags() {
    assert_eq!(normalize_text("<🎉b>环境   准备"), "环境 准备");
    assert_eq!(normalize_text("2.  <em>安装</em> ✨ 依赖"), "安装 依赖");
}
