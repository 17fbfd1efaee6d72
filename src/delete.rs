//! DeleteBuilder：`DELETE FROM "t" [AS "a"] [WHERE ...] [RETURNING ...];`

use crate::condition::{Condition, render_top_level};
use crate::entity::Entity;
use crate::error::Error;
use crate::executor::{self, Context, QueryKind};
use crate::macros::{IntoStrings, collect_into_strings};
use crate::record::Destination;
use crate::string_builder::StringBuilder;
use crate::syntax::{TERMINATOR, escape, returning};

#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    entity: Entity,
    wheres: Vec<Condition>,
    returning: Option<Vec<String>>,
}

impl DeleteBuilder {
    pub fn new(entity: &Entity) -> Self {
        Self {
            entity: entity.clone(),
            wheres: Vec::new(),
            returning: None,
        }
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
        let mut buf = StringBuilder::new();
        buf.write_leading("DELETE FROM");
        buf.write_leading(&escape(self.entity.name()));
        if let Some(alias) = self.entity.alias() {
            buf.write_leading("AS");
            buf.write_leading(&escape(alias));
        }
        buf.write_leading(&render_top_level("WHERE", &self.wheres));
        buf.write_leading(&returning(self.returning.as_deref()));
        buf.into_string() + TERMINATOR
    }

    pub fn exec(&self, ctx: &Context) -> Result<u64, Error> {
        executor::execute(&self.entity, ctx, QueryKind::Delete, &self.sql())
    }

    pub fn get_result<D: Destination + ?Sized>(
        &self,
        ctx: &Context,
        dest: &mut D,
    ) -> Result<(), Error> {
        executor::fetch(&self.entity, ctx, QueryKind::Delete, &self.sql(), dest)
    }
}
