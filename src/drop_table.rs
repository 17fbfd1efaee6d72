//! DropTableBuilder：`DROP TABLE [IF EXISTS] "t" [CASCADE];`

use crate::entity::Entity;
use crate::error::Error;
use crate::executor::{self, Context, QueryKind};
use crate::string_builder::StringBuilder;
use crate::syntax::{TERMINATOR, escape};

#[derive(Debug, Clone)]
pub struct DropTableBuilder {
    entity: Entity,
    if_exists: bool,
    cascade: bool,
}

impl DropTableBuilder {
    pub fn new(entity: &Entity) -> Self {
        Self {
            entity: entity.clone(),
            if_exists: false,
            cascade: false,
        }
    }

    pub fn if_exists(&mut self) -> &mut Self {
        self.if_exists = true;
        self
    }

    pub fn cascade(&mut self) -> &mut Self {
        self.cascade = true;
        self
    }

    pub fn sql(&self) -> String {
        let mut buf = StringBuilder::new();
        buf.write_leading("DROP TABLE");
        if self.if_exists {
            buf.write_leading("IF EXISTS");
        }
        buf.write_leading(&escape(self.entity.name()));
        if self.cascade {
            buf.write_leading("CASCADE");
        }
        buf.into_string() + TERMINATOR
    }

    pub fn exec(&self, ctx: &Context) -> Result<u64, Error> {
        executor::execute(&self.entity, ctx, QueryKind::DropTable, &self.sql())
    }
}
