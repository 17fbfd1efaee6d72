//! Postgres 字面语法：标识符转义、分隔符与限定名。

pub(crate) const COLUMNS_DIVIDER: &str = ",";
pub(crate) const COUPLER: &str = ".";
pub(crate) const TERMINATOR: &str = ";";

/// 标识符加双引号；内部的 `"` 加倍。
pub fn escape(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 2);
    out.push('"');
    for c in ident.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// `"alias"."name"`，无别名时只输出 `"name"`。
pub(crate) fn qualify(alias: Option<&str>, name: &str) -> String {
    match alias {
        Some(alias) if !alias.is_empty() => {
            format!("{}{COUPLER}{}", escape(alias), escape(name))
        }
        _ => escape(name),
    }
}

/// 嵌入子查询前去掉末尾的语句终止符。
pub(crate) fn strip_terminator(sql: &str) -> &str {
    sql.strip_suffix(TERMINATOR).unwrap_or(sql)
}

/// `RETURNING` 子句：`None` 不输出，空列表输出 `*`。
pub(crate) fn returning(columns: Option<&[String]>) -> String {
    match columns {
        None => String::new(),
        Some([]) => "RETURNING *".to_string(),
        Some(columns) => {
            let escaped: Vec<String> = columns.iter().map(|c| escape(c)).collect();
            format!("RETURNING {}", escaped.join(COLUMNS_DIVIDER))
        }
    }
}

/// 文本归一化包装：小写 + 去重音，用于 slug 式比较。
pub(crate) fn webalize(fragment: &str) -> String {
    format!("LOWER(UNACCENT({fragment}))")
}
