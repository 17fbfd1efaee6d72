//! 全文检索编码：把文本归一成 `to_tsvector(...)` / `to_tsquery(...)` 字面量。
//!
//! 归一化顺序：标点替换为空格 → 小写 → NFD 分解并去掉组合音标 → NFC 重组。

use crate::value::SqlValue;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

static SPECIAL_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.,=&;@/(){}]").expect("punctuation pattern is valid"));

const PREFIX_MATCH: &str = ":*";

/// 对一组值生成 `to_tsvector('tok1 tok2 ...')`，token 按首次出现顺序去重。
pub fn build_vector<I, V>(values: I) -> String
where
    I: IntoIterator<Item = V>,
    V: Into<SqlValue>,
{
    let mut tokens = Vec::new();
    for value in values {
        let text = plain_text(&value.into());
        push_unique(&mut tokens, tokenize(&text));
    }
    format!("to_tsvector('{}')", tokens.join(" "))
}

/// 对检索文本生成前缀匹配的 `to_tsquery('a:* & b:*')`。
pub fn build_query(text: &str) -> String {
    let mut tokens = Vec::new();
    push_unique(&mut tokens, tokenize(text));
    let expr = tokens
        .iter()
        .map(|t| format!("{t}{PREFIX_MATCH}"))
        .collect::<Vec<_>>()
        .join(" & ");
    format!("to_tsquery('{expr}')")
}

/// 单个值的归一化文本。
pub fn normalize(text: &str) -> String {
    simplify(&replace_special_characters(text))
}

fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn push_unique(dst: &mut Vec<String>, tokens: Vec<String>) {
    for t in tokens {
        if !dst.contains(&t) {
            dst.push(t);
        }
    }
}

fn replace_special_characters(text: &str) -> String {
    SPECIAL_CHARACTERS.replace_all(text, " ").replace('\'', "\u{2019}")
}

fn simplify(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

fn plain_text(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => String::new(),
        SqlValue::Bool(v) => v.to_string(),
        SqlValue::I64(v) => v.to_string(),
        SqlValue::F64(v) => v.to_string(),
        SqlValue::String(v) | SqlValue::Safe(v) => v.to_string(),
        SqlValue::DateTime(v) => v.date().to_string(),
        SqlValue::List(items) => items
            .iter()
            .map(plain_text)
            .collect::<Vec<_>>()
            .join(" "),
    }
}
