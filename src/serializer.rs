//! 值序列化：按列的数据类型把 `SqlValue` 写成 SQL 字面量。
//!
//! 类型不匹配时不报错，返回空串（调用方据此省略该字面量），同时记一条 warn 日志。

use crate::column::{CURRENT_TIMESTAMP, Column, DataType};
use crate::fulltext::{build_query, build_vector};
use crate::value::{SqlValue, ValueKind};
use time::OffsetDateTime;
use time::macros::format_description;

/// 渲染场景：WHERE 中的全文列需要 tsquery，写入/定义场景需要 tsvector。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderContext {
    Where,
    Write,
    Definition,
}

/// 按列类型渲染字面量；没有列信息时返回空串。
pub fn render(column: Option<&Column>, value: &SqlValue, ctx: RenderContext) -> String {
    let Some(column) = column else {
        return String::new();
    };
    match value {
        SqlValue::Safe(fragment) => fragment.to_string(),
        SqlValue::Null => "NULL".to_string(),
        SqlValue::List(items) if column.data_type.is_array() && ctx != RenderContext::Where => {
            render_array(column, items)
        }
        SqlValue::List(items) => render_list(items),
        scalar => {
            if !validate(column.data_type, scalar.kind()) {
                tracing::warn!(
                    column = %column.name,
                    data_type = column.data_type.sql_name(),
                    kind = ?scalar.kind(),
                    "value kind does not match column type, literal dropped"
                );
                return String::new();
            }
            render_scalar(column.data_type, scalar, ctx)
        }
    }
}

pub fn validate(data_type: DataType, kind: ValueKind) -> bool {
    data_type.accepts(kind)
}

/// 列未提供值时使用的默认值。
pub fn default_for(column: &Column, ctx: RenderContext) -> SqlValue {
    if column.data_type == DataType::TsVector {
        let empty = match ctx {
            RenderContext::Where => build_query(""),
            RenderContext::Write | RenderContext::Definition => {
                build_vector(Vec::<SqlValue>::new())
            }
        };
        return SqlValue::Safe(empty.into());
    }
    if let Some(default) = &column.options.default
        && (default.kind() == ValueKind::Safe || validate(column.data_type, default.kind()))
    {
        return default.clone();
    }
    match column.data_type {
        t if t.is_timestamp() => SqlValue::Safe(CURRENT_TIMESTAMP.into()),
        DataType::Boolean => SqlValue::Bool(false),
        t if t.is_numeric() => SqlValue::I64(0),
        t if t.is_array() => SqlValue::List(Vec::new()),
        _ => SqlValue::String("".into()),
    }
}

/// 没有列信息时按值自身的种类渲染（子查询条件等场景）。
pub fn render_unknown(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Bool(v) => v.to_string(),
        SqlValue::I64(v) => v.to_string(),
        SqlValue::F64(v) => format!("{v:.6}"),
        SqlValue::String(v) => quote_literal(v),
        SqlValue::DateTime(v) => format_timestamp(v),
        SqlValue::List(items) => render_list(items),
        SqlValue::Safe(v) => v.to_string(),
    }
}

/// 单引号字面量，内部 `'` 加倍。
pub fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn render_list(items: &[SqlValue]) -> String {
    items
        .iter()
        .map(|item| match item {
            SqlValue::String(v) => quote_literal(v),
            SqlValue::I64(v) => v.to_string(),
            other => render_unknown(other),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// 数组列的写入字面量：`ARRAY[...]`，空列表写 `'{}'`。
fn render_array(column: &Column, items: &[SqlValue]) -> String {
    if items.is_empty() {
        return "'{}'".to_string();
    }
    let element = match column.data_type {
        DataType::ArrayInt => ValueKind::Int,
        _ => ValueKind::String,
    };
    if let Some(bad) = items.iter().find(|item| item.kind() != element) {
        tracing::warn!(
            column = %column.name,
            data_type = column.data_type.sql_name(),
            kind = ?bad.kind(),
            "array element does not match column type, literal dropped"
        );
        return String::new();
    }
    format!("ARRAY[{}]", render_list(items))
}

fn render_scalar(data_type: DataType, value: &SqlValue, ctx: RenderContext) -> String {
    match (data_type, value) {
        (DataType::TsVector, SqlValue::String(text)) => match ctx {
            RenderContext::Where => build_query(text),
            RenderContext::Write | RenderContext::Definition => build_vector([text.to_string()]),
        },
        (
            DataType::Varchar | DataType::Char | DataType::Text | DataType::Jsonb,
            SqlValue::String(text),
        ) => quote_literal(text),
        (DataType::Serial | DataType::Int | DataType::BigInt, SqlValue::I64(v)) => v.to_string(),
        (DataType::Float, SqlValue::I64(v)) => v.to_string(),
        (DataType::Float, SqlValue::F64(v)) => format!("{v:.6}"),
        (DataType::Boolean, SqlValue::Bool(v)) => v.to_string(),
        // 预格式化的时间字符串（含 CURRENT_TIMESTAMP）原样输出
        (DataType::Timestamp | DataType::TimestampWithZone, SqlValue::String(text)) => {
            text.to_string()
        }
        (DataType::Timestamp | DataType::TimestampWithZone, SqlValue::DateTime(dt)) => {
            format_timestamp(dt)
        }
        _ => String::new(),
    }
}

fn format_timestamp(dt: &OffsetDateTime) -> String {
    match dt.format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]")) {
        Ok(s) => quote_literal(&s),
        Err(err) => {
            tracing::warn!(%err, "timestamp could not be formatted");
            String::new()
        }
    }
}
