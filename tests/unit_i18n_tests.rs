//! # I18n Unit Tests / 国际化单元测试
//!
//! Tests for locale resolution. Every explicitly requested locale either
//! matches an available translation or falls back to English.
//!
//! 区域解析的测试。显式请求的区域要么匹配可用翻译，要么回退到英文。

use case_runner::resolve_locale;

#[test]
fn test_exact_locale_is_kept() {
    assert_eq!(resolve_locale(Some("zh-CN")), "zh-CN");
    assert_eq!(resolve_locale(Some("en")), "en");
}

#[test]
fn test_region_falls_back_to_language_code() {
    assert_eq!(resolve_locale(Some("en-US")), "en");
    assert_eq!(resolve_locale(Some("en_GB")), "en");
}

#[test]
fn test_unknown_locale_falls_back_to_english() {
    assert_eq!(resolve_locale(Some("fr-FR")), "en");
    assert_eq!(resolve_locale(Some("")), "en");
}

#[test]
fn test_system_locale_always_resolves() {
    let resolved = resolve_locale(None);
    assert!(resolved == "en" || resolved == "zh-CN", "{resolved}");
}
