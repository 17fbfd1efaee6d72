//! Entity：表的类型化描述（表名、别名、列），以及各语句 builder 的入口。
//!
//! 实体先用消费式 setter 构建好，之后以 `Rc` 句柄共享给 builder；builder 只读取它。

use crate::alter_table::AlterTableBuilder;
use crate::column::{
    CREATED_AT, CURRENT_TIMESTAMP, ColOpts, Column, DataType, ID, UPDATED_AT, VECTORS,
};
use crate::config::Config;
use crate::create_table::CreateTableBuilder;
use crate::delete::DeleteBuilder;
use crate::drop_table::DropTableBuilder;
use crate::error::Error;
use crate::executor::{self, Context, Executor, QueryKind};
use crate::insert::InsertBuilder;
use crate::migrate::{Migrations, Migrator};
use crate::select::SelectBuilder;
use crate::truncate::TruncateBuilder;
use crate::update::UpdateBuilder;
use crate::value::safe;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// 实体工厂：持有配置和执行端，创建出的实体共享它们。
#[derive(Clone, Default)]
pub struct Land {
    config: Config,
    executor: Option<Rc<dyn Executor>>,
}

impl Land {
    /// 不绑定执行端，只用于生成 SQL。
    pub fn new(config: Config) -> Self {
        Self {
            config,
            executor: None,
        }
    }

    pub fn with_executor(config: Config, executor: impl Executor + 'static) -> Self {
        Self {
            config,
            executor: Some(Rc::new(executor)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn create_entity(&self, name: impl Into<String>) -> Entity {
        Entity {
            inner: Rc::new(EntityDef {
                name: name.into(),
                alias: None,
                columns: Vec::new(),
                fulltext: Vec::new(),
                config: self.config,
                executor: self.executor.clone(),
                errors: Rc::default(),
            }),
        }
    }

    /// 创建迁移器；迁移器内部以迁移模式运行。
    pub fn migrator(&self, migrations: Migrations) -> Migrator {
        let land = Self {
            config: self.config.with_migration(true),
            executor: self.executor.clone(),
        };
        Migrator::new(land, migrations)
    }
}

impl fmt::Debug for Land {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Land")
            .field("config", &self.config)
            .field("executor", &self.executor.is_some())
            .finish()
    }
}

#[derive(Clone)]
struct EntityDef {
    name: String,
    alias: Option<String>,
    columns: Vec<Column>,
    fulltext: Vec<Entity>,
    config: Config,
    executor: Option<Rc<dyn Executor>>,
    errors: Rc<RefCell<Vec<Error>>>,
}

#[derive(Clone)]
pub struct Entity {
    inner: Rc<EntityDef>,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.inner.name)
            .field("alias", &self.inner.alias)
            .field("columns", &self.inner.columns.len())
            .finish()
    }
}

impl Entity {
    fn def_mut(&mut self) -> &mut EntityDef {
        Rc::make_mut(&mut self.inner)
    }

    pub fn set_alias(mut self, alias: impl Into<String>) -> Self {
        self.def_mut().alias = Some(alias.into());
        self
    }

    pub fn set_column(
        mut self,
        name: impl Into<String>,
        data_type: DataType,
        options: ColOpts,
    ) -> Self {
        self.def_mut()
            .columns
            .push(Column::new(name, data_type, options));
        self
    }

    /// 主键列 `id SERIAL`。
    pub fn set_id_column(self) -> Self {
        self.set_column(
            ID,
            DataType::Serial,
            ColOpts::new().pk().not_null().unique(),
        )
    }

    /// 启用全文检索：追加 `vectors TSVECTOR` 列，并登记伴随实体。
    pub fn set_fulltext(mut self, companions: impl IntoIterator<Item = Entity>) -> Self {
        let def = self.def_mut();
        def.fulltext.extend(companions);
        def.columns.push(Column::new(
            VECTORS,
            DataType::TsVector,
            ColOpts::new().not_null().default_value("").exclude(),
        ));
        self
    }

    pub fn set_created_at(self) -> Self {
        let data_type = self.date_data_type();
        self.set_column(
            CREATED_AT,
            data_type,
            ColOpts::new().not_null().default_value(safe(CURRENT_TIMESTAMP)),
        )
    }

    pub fn set_updated_at(self) -> Self {
        let data_type = self.date_data_type();
        self.set_column(
            UPDATED_AT,
            data_type,
            ColOpts::new().not_null().default_value(safe(CURRENT_TIMESTAMP)),
        )
    }

    fn date_data_type(&self) -> DataType {
        if self.inner.config.timezone {
            DataType::TimestampWithZone
        } else {
            DataType::Timestamp
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.inner.alias.as_deref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.inner.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.inner.columns.iter().find(|c| c.name == name)
    }

    /// 全文检索的伴随实体。
    pub fn fulltext_companions(&self) -> &[Entity] {
        &self.inner.fulltext
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub(crate) fn executor(&self) -> Option<Rc<dyn Executor>> {
        self.inner.executor.clone()
    }

    pub fn select(&self) -> SelectBuilder {
        SelectBuilder::new(self)
    }

    pub fn insert(&self) -> InsertBuilder {
        InsertBuilder::new(self)
    }

    pub fn update(&self) -> UpdateBuilder {
        UpdateBuilder::new(self)
    }

    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(self)
    }

    pub fn create_table(&self) -> CreateTableBuilder {
        CreateTableBuilder::new(self)
    }

    pub fn alter_table(&self) -> AlterTableBuilder {
        AlterTableBuilder::new(self)
    }

    pub fn drop_table(&self) -> DropTableBuilder {
        DropTableBuilder::new(self)
    }

    pub fn truncate(&self) -> TruncateBuilder {
        TruncateBuilder::new(self)
    }

    pub fn begin(&self, ctx: &Context) -> Result<(), Error> {
        executor::execute(self, ctx, QueryKind::Transaction, "BEGIN;").map(|_| ())
    }

    pub fn commit(&self, ctx: &Context) -> Result<(), Error> {
        executor::execute(self, ctx, QueryKind::Transaction, "COMMIT;").map(|_| ())
    }

    pub fn rollback(&self, ctx: &Context) -> Result<(), Error> {
        executor::execute(self, ctx, QueryKind::Transaction, "ROLLBACK;").map(|_| ())
    }

    /// 累积的执行错误（按发生顺序）。
    pub fn errors(&self) -> Vec<Error> {
        self.inner.errors.borrow().clone()
    }

    pub fn is_error(&self) -> bool {
        !self.inner.errors.borrow().is_empty()
    }

    pub fn last_error(&self) -> Option<Error> {
        self.inner.errors.borrow().last().cloned()
    }

    pub(crate) fn record_error(&self, err: Error) {
        self.inner.errors.borrow_mut().push(err);
    }
}
