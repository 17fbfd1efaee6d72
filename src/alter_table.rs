//! AlterTableBuilder：ADD COLUMN / RENAME / DROP COLUMN 组合成一条 ALTER TABLE。

use crate::column::{ColOpts, Column, DataType};
use crate::create_table::column_definition;
use crate::entity::Entity;
use crate::error::Error;
use crate::executor::{self, Context, QueryKind};
use crate::string_builder::StringBuilder;
use crate::syntax::{COLUMNS_DIVIDER, TERMINATOR, escape};

#[derive(Debug, Clone)]
pub struct AlterTableBuilder {
    entity: Entity,
    if_exists: bool,
    add: Vec<Column>,
    rename: Vec<(String, String)>,
    drop: Vec<String>,
}

impl AlterTableBuilder {
    pub fn new(entity: &Entity) -> Self {
        Self {
            entity: entity.clone(),
            if_exists: false,
            add: Vec::new(),
            rename: Vec::new(),
            drop: Vec::new(),
        }
    }

    pub fn if_exists(&mut self) -> &mut Self {
        self.if_exists = true;
        self
    }

    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        data_type: DataType,
        options: ColOpts,
    ) -> &mut Self {
        self.add.push(Column::new(name, data_type, options));
        self
    }

    pub fn rename_column(
        &mut self,
        current: impl Into<String>,
        new: impl Into<String>,
    ) -> &mut Self {
        self.rename.push((current.into(), new.into()));
        self
    }

    pub fn drop_column(&mut self, name: impl Into<String>) -> &mut Self {
        self.drop.push(name.into());
        self
    }

    /// 片段顺序：全部 ADD，然后 RENAME，最后 DROP。
    pub fn sql(&self) -> String {
        let mut alters: Vec<String> = self
            .add
            .iter()
            .map(|c| format!("ADD COLUMN {}", column_definition(&self.entity, c, false)))
            .collect();
        alters.extend(
            self.rename
                .iter()
                .map(|(from, to)| format!("RENAME {} TO {}", escape(from), escape(to))),
        );
        alters.extend(self.drop.iter().map(|c| format!("DROP COLUMN {}", escape(c))));

        let mut buf = StringBuilder::new();
        buf.write_leading("ALTER TABLE");
        if self.if_exists {
            buf.write_leading("IF EXISTS");
        }
        buf.write_leading(&escape(self.entity.name()));
        buf.write_leading(&alters.join(COLUMNS_DIVIDER));
        buf.into_string() + TERMINATOR
    }

    pub fn exec(&self, ctx: &Context) -> Result<u64, Error> {
        executor::execute(&self.entity, ctx, QueryKind::AlterTable, &self.sql())
    }
}
