//! UpdateBuilder：构建 UPDATE 语句。

use crate::column::{CREATED_AT, CURRENT_TIMESTAMP, Column, DataType, ID, UPDATED_AT, VECTORS};
use crate::condition::{Condition, render_top_level};
use crate::entity::Entity;
use crate::error::Error;
use crate::executor::{self, Context, QueryKind};
use crate::fulltext::build_vector;
use crate::macros::{IntoStrings, collect_into_strings};
use crate::record::{Destination, Record};
use crate::serializer::{RenderContext, render};
use crate::string_builder::StringBuilder;
use crate::syntax::{COLUMNS_DIVIDER, TERMINATOR, escape, returning};
use crate::value::SqlValue;

#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    entity: Entity,
    record: Option<Box<dyn Record>>,
    columns: Vec<String>,
    vectors: Option<String>,
    wheres: Vec<Condition>,
    returning: Option<Vec<String>>,
}

impl UpdateBuilder {
    pub fn new(entity: &Entity) -> Self {
        Self {
            entity: entity.clone(),
            record: None,
            columns: Vec::new(),
            vectors: None,
            wheres: Vec::new(),
            returning: None,
        }
    }

    pub fn values(&mut self, record: impl Record + 'static) -> &mut Self {
        self.record = Some(Box::new(record));
        self
    }

    /// 只更新这些列；不调用时更新所有可写列。
    pub fn set_columns(&mut self, columns: impl IntoStrings) -> &mut Self {
        self.columns = collect_into_strings(columns);
        self
    }

    pub fn set_vectors<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        self.vectors = Some(build_vector(values));
        self
    }

    pub fn where_(&mut self) -> Condition {
        let entity = self.entity.clone();
        self.where_for(&entity)
    }

    pub fn where_for(&mut self, entity: &Entity) -> Condition {
        let c = Condition::new(entity);
        self.wheres.push(c.clone());
        c
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
        let sets: Vec<String> = self
            .entity
            .columns()
            .iter()
            .filter(|c| self.columns.is_empty() || self.columns.contains(&c.name))
            .filter_map(|c| {
                self.value_for(c)
                    .map(|value| format!("{} = {value}", escape(&c.name)))
            })
            .collect();

        let mut buf = StringBuilder::new();
        buf.write_leading("UPDATE");
        buf.write_leading(&escape(self.entity.name()));
        if let Some(alias) = self.entity.alias() {
            buf.write_leading("AS");
            buf.write_leading(&escape(alias));
        }
        buf.write_leading("SET");
        buf.write_leading(&sets.join(COLUMNS_DIVIDER));
        buf.write_leading(&render_top_level("WHERE", &self.wheres));
        buf.write_leading(&returning(self.returning.as_deref()));
        buf.into_string() + TERMINATOR
    }

    pub fn exec(&self, ctx: &Context) -> Result<u64, Error> {
        executor::execute(&self.entity, ctx, QueryKind::Update, &self.sql())
    }

    pub fn get_result<D: Destination + ?Sized>(
        &self,
        ctx: &Context,
        dest: &mut D,
    ) -> Result<(), Error> {
        executor::fetch(&self.entity, ctx, QueryKind::Update, &self.sql(), dest)
    }

    fn value_for(&self, column: &Column) -> Option<String> {
        let name = column.name.as_str();
        if name == ID || name == CREATED_AT {
            return None;
        }
        if name == VECTORS {
            return self.vectors.clone();
        }
        let field = self.record.as_ref().and_then(|r| r.field(name));
        if name == UPDATED_AT {
            return Some(match field {
                Some(value) if !value.is_zero() => {
                    let literal = render(Some(column), &value, RenderContext::Write);
                    if literal.is_empty() {
                        CURRENT_TIMESTAMP.to_string()
                    } else {
                        literal
                    }
                }
                _ => CURRENT_TIMESTAMP.to_string(),
            });
        }
        if column.options.exclude {
            return None;
        }
        let value = field?;
        if value.is_zero() {
            return Some(zero_literal(column, &value));
        }
        let literal = render(Some(column), &value, RenderContext::Write);
        if literal.is_empty() {
            // 类型不匹配：整列跳过
            return None;
        }
        Some(literal)
    }
}

/// 零值：可空列写 NULL，布尔列写 false，其余按零值本身序列化。
fn zero_literal(column: &Column, value: &SqlValue) -> String {
    if !column.options.not_null {
        return "NULL".to_string();
    }
    if column.data_type == DataType::Boolean {
        return "false".to_string();
    }
    render(Some(column), value, RenderContext::Write)
}
