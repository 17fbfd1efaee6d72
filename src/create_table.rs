//! CreateTableBuilder：按实体的列定义生成 CREATE TABLE。

use crate::column::{Column, ReferenceTarget};
use crate::entity::Entity;
use crate::error::Error;
use crate::executor::{self, Context, QueryKind};
use crate::serializer::{RenderContext, render};
use crate::string_builder::StringBuilder;
use crate::syntax::{COLUMNS_DIVIDER, TERMINATOR, escape};

#[derive(Debug, Clone)]
pub struct CreateTableBuilder {
    entity: Entity,
    if_not_exists: bool,
}

impl CreateTableBuilder {
    pub fn new(entity: &Entity) -> Self {
        Self {
            entity: entity.clone(),
            if_not_exists: false,
        }
    }

    pub fn if_not_exists(&mut self) -> &mut Self {
        self.if_not_exists = true;
        self
    }

    pub fn sql(&self) -> String {
        let definitions: Vec<String> = self
            .entity
            .columns()
            .iter()
            .map(|c| column_definition(&self.entity, c, true))
            .collect();

        let mut buf = StringBuilder::new();
        buf.write_leading("CREATE TABLE");
        if self.if_not_exists {
            buf.write_leading("IF NOT EXISTS");
        }
        buf.write_leading(&escape(self.entity.name()));
        buf.write_leading(&format!("({})", definitions.join(COLUMNS_DIVIDER)));
        buf.into_string() + TERMINATOR
    }

    pub fn exec(&self, ctx: &Context) -> Result<u64, Error> {
        executor::execute(&self.entity, ctx, QueryKind::CreateTable, &self.sql())
    }
}

/// 单列定义：`"name" TYPE [PRIMARY KEY] [NOT NULL] [UNIQUE] [DEFAULT v] [REFERENCES "t"("c")]`。
///
/// ALTER TABLE 的 ADD COLUMN 不输出 PRIMARY KEY。
pub(crate) fn column_definition(entity: &Entity, column: &Column, with_pk: bool) -> String {
    let options = &column.options;
    let mut parts = vec![escape(&column.name), column.ddl_type()];
    if with_pk && options.pk {
        parts.push("PRIMARY KEY".to_string());
    }
    if options.not_null {
        parts.push("NOT NULL".to_string());
    }
    if options.unique {
        parts.push("UNIQUE".to_string());
    }
    if let Some(default) = &options.default {
        let literal = render(Some(column), default, RenderContext::Definition);
        if !literal.is_empty() {
            parts.push(format!("DEFAULT {literal}"));
        }
    }
    if let Some(reference) = &options.reference
        && !reference.column.is_empty()
    {
        let table = match &reference.target {
            ReferenceTarget::Entity(name) => name.as_str(),
            ReferenceTarget::SelfRef => entity.name(),
        };
        parts.push(format!(
            "REFERENCES {}({})",
            escape(table),
            escape(&reference.column)
        ));
    }
    parts.join(" ")
}
