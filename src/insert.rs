//! InsertBuilder：构建单行 INSERT 语句。
//!
//! 列清单来自实体定义，值来自 `Record`。保留列（主键、时间戳、全文向量）优先处理；
//! 记录里缺失的列连同列名一起跳过，保证列与值一一对应。

use crate::column::{CREATED_AT, CURRENT_TIMESTAMP, Column, ID, UPDATED_AT, VECTORS};
use crate::entity::Entity;
use crate::error::Error;
use crate::executor::{self, Context, QueryKind};
use crate::fulltext::build_vector;
use crate::macros::{IntoStrings, collect_into_strings};
use crate::record::{Destination, Record};
use crate::serializer::{RenderContext, default_for, render};
use crate::string_builder::StringBuilder;
use crate::syntax::{COLUMNS_DIVIDER, TERMINATOR, escape, returning};
use crate::value::SqlValue;

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    entity: Entity,
    record: Option<Box<dyn Record>>,
    vectors: Option<String>,
    returning: Option<Vec<String>>,
    custom_id: bool,
    custom_timestamp: bool,
}

impl InsertBuilder {
    pub fn new(entity: &Entity) -> Self {
        Self {
            entity: entity.clone(),
            record: None,
            vectors: None,
            returning: None,
            custom_id: false,
            custom_timestamp: false,
        }
    }

    pub fn values(&mut self, record: impl Record + 'static) -> &mut Self {
        self.record = Some(Box::new(record));
        self
    }

    /// 由给定文本生成 `vectors` 列的值。
    pub fn set_vectors<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        self.vectors = Some(build_vector(values));
        self
    }

    /// 主键取自记录，而不是交给序列生成。
    pub fn custom_id(&mut self) -> &mut Self {
        self.custom_id = true;
        self
    }

    /// 时间戳取自记录，而不是 `CURRENT_TIMESTAMP`。
    pub fn custom_timestamp(&mut self) -> &mut Self {
        self.custom_timestamp = true;
        self
    }

    pub fn returning(&mut self, columns: impl IntoStrings) -> &mut Self {
        self.returning
            .get_or_insert_with(Vec::new)
            .extend(collect_into_strings(columns));
        self
    }

    pub fn returning_all(&mut self) -> &mut Self {
        self.returning.get_or_insert_with(Vec::new);
        self
    }

    pub fn sql(&self) -> String {
        let mut columns = Vec::new();
        let mut values = Vec::new();
        for column in self.entity.columns() {
            if column.name == ID && !self.custom_id {
                continue;
            }
            if let Some(value) = self.value_for(column) {
                columns.push(escape(&column.name));
                values.push(value);
            }
        }

        let mut buf = StringBuilder::new();
        buf.write_leading("INSERT INTO");
        buf.write_leading(&escape(self.entity.name()));
        buf.write_leading(&format!("({})", columns.join(COLUMNS_DIVIDER)));
        buf.write_leading("VALUES");
        buf.write_leading(&format!("({})", values.join(COLUMNS_DIVIDER)));
        buf.write_leading(&returning(self.returning.as_deref()));
        buf.into_string() + TERMINATOR
    }

    pub fn exec(&self, ctx: &Context) -> Result<u64, Error> {
        executor::execute(&self.entity, ctx, QueryKind::Insert, &self.sql())
    }

    /// 执行并回填 RETURNING 的结果。
    pub fn get_result<D: Destination + ?Sized>(
        &self,
        ctx: &Context,
        dest: &mut D,
    ) -> Result<(), Error> {
        executor::fetch(&self.entity, ctx, QueryKind::Insert, &self.sql(), dest)
    }

    fn value_for(&self, column: &Column) -> Option<String> {
        let name = column.name.as_str();
        if !self.custom_timestamp && (name == CREATED_AT || name == UPDATED_AT) {
            return Some(CURRENT_TIMESTAMP.to_string());
        }
        if name == VECTORS {
            return Some(
                self.vectors
                    .clone()
                    .unwrap_or_else(|| build_vector(Vec::<SqlValue>::new())),
            );
        }
        if column.options.exclude {
            return None;
        }
        let value = self.record.as_ref()?.field(name)?;
        if !value.is_zero() {
            let literal = render(Some(column), &value, RenderContext::Write);
            if !literal.is_empty() {
                return Some(literal);
            }
        }
        Some(zero_literal(column))
    }
}

/// 零值：可空列写 NULL，非空列写列默认值。
fn zero_literal(column: &Column) -> String {
    if !column.options.not_null {
        return "NULL".to_string();
    }
    render(
        Some(column),
        &default_for(column, RenderContext::Write),
        RenderContext::Write,
    )
}
