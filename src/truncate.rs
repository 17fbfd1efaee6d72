//! TruncateBuilder：`TRUNCATE "t" [RESTART IDENTITY] [CASCADE];`

use crate::entity::Entity;
use crate::error::Error;
use crate::executor::{self, Context, QueryKind};
use crate::string_builder::StringBuilder;
use crate::syntax::{TERMINATOR, escape};

#[derive(Debug, Clone)]
pub struct TruncateBuilder {
    entity: Entity,
    restart_identity: bool,
    cascade: bool,
}

impl TruncateBuilder {
    pub fn new(entity: &Entity) -> Self {
        Self {
            entity: entity.clone(),
            restart_identity: false,
            cascade: false,
        }
    }

    /// 同时重置表上的序列。
    pub fn restart_identity(&mut self) -> &mut Self {
        self.restart_identity = true;
        self
    }

    pub fn cascade(&mut self) -> &mut Self {
        self.cascade = true;
        self
    }

    pub fn sql(&self) -> String {
        let mut buf = StringBuilder::new();
        buf.write_leading("TRUNCATE");
        buf.write_leading(&escape(self.entity.name()));
        if self.restart_identity {
            buf.write_leading("RESTART IDENTITY");
        }
        if self.cascade {
            buf.write_leading("CASCADE");
        }
        buf.into_string() + TERMINATOR
    }

    pub fn exec(&self, ctx: &Context) -> Result<u64, Error> {
        executor::execute(&self.entity, ctx, QueryKind::Truncate, &self.sql())
    }
}
