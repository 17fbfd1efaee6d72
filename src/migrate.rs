//! 迁移：按注册顺序执行 up，按应用顺序回滚 down。
//!
//! 已应用的迁移记录在 `land_migrations` 表中。迁移器总是运行在迁移模式下，
//! 任一执行错误都会以 `Error::Fatal` 返回。

use crate::column::{CREATED_AT, ColOpts, DataType, ID};
use crate::entity::{Entity, Land};
use crate::error::Error;
use crate::executor::Context;
use std::fmt;
use std::rc::Rc;

pub const MIGRATIONS_ENTITY: &str = "land_migrations";
const NAME: &str = "name";

type Step = Rc<dyn Fn(&Land) -> Result<(), Error>>;

/// 单个迁移：一个唯一 id 加上 up / down 两个步骤。
#[derive(Clone)]
pub struct Migration {
    id: String,
    up: Option<Step>,
    down: Option<Step>,
}

impl Migration {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn up(&mut self, step: impl Fn(&Land) -> Result<(), Error> + 'static) -> &mut Self {
        self.up = Some(Rc::new(step));
        self
    }

    pub fn down(&mut self, step: impl Fn(&Land) -> Result<(), Error> + 'static) -> &mut Self {
        self.down = Some(Rc::new(step));
        self
    }
}

impl fmt::Debug for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Migration")
            .field("id", &self.id)
            .field("up", &self.up.is_some())
            .field("down", &self.down.is_some())
            .finish()
    }
}

/// 迁移注册表，保持注册顺序。
#[derive(Debug, Clone, Default)]
pub struct Migrations {
    items: Vec<Migration>,
}

impl Migrations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: impl Into<String>) -> &mut Migration {
        self.items.push(Migration {
            id: id.into(),
            up: None,
            down: None,
        });
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn get(&self, id: &str) -> Option<&Migration> {
        self.items.iter().find(|m| m.id == id)
    }
}

#[derive(Debug, Clone, Default)]
struct LandMigration {
    id: i64,
    name: String,
}

crate::record! {
    impl LandMigration {
        id,
        name,
    }
}

#[derive(Debug)]
pub struct Migrator {
    land: Land,
    migrations: Migrations,
    entity: Entity,
}

impl Migrator {
    pub fn new(land: Land, migrations: Migrations) -> Self {
        let entity = land
            .create_entity(MIGRATIONS_ENTITY)
            .set_id_column()
            .set_column(NAME, DataType::Text, ColOpts::new().not_null())
            .set_created_at()
            .set_updated_at();
        Self {
            land,
            migrations,
            entity,
        }
    }

    /// 迁移记录表对应的实体。
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// 创建迁移记录表（已存在时不报错）。
    pub fn init(&self, ctx: &Context) -> Result<(), Error> {
        tracing::info!(entity = MIGRATIONS_ENTITY, "initializing migrations");
        self.entity
            .create_table()
            .if_not_exists()
            .exec(ctx)
            .map_err(Error::into_fatal)?;
        Ok(())
    }

    /// 依次应用尚未记录的迁移，返回本次应用的 id。
    pub fn up(&self, ctx: &Context) -> Result<Vec<String>, Error> {
        let applied = self.applied(ctx)?;
        let mut done = Vec::new();
        for migration in &self.migrations.items {
            if applied.iter().any(|m| m.name == migration.id) {
                continue;
            }
            tracing::info!(id = %migration.id, "migrating");
            self.run_step(ctx, migration.up.as_ref())?;
            let mut insert = self.entity.insert();
            insert.values(LandMigration {
                id: 0,
                name: migration.id.clone(),
            });
            insert.exec(ctx).map_err(Error::into_fatal)?;
            tracing::info!(id = %migration.id, "migration applied");
            done.push(migration.id.clone());
        }
        Ok(done)
    }

    /// 回滚最近一次应用的迁移；没有可回滚的迁移时返回 `None`。
    pub fn down(&self, ctx: &Context) -> Result<Option<String>, Error> {
        let mut last: Option<LandMigration> = None;
        {
            let mut q = self.entity.select();
            q.columns([ID, NAME]);
            q.order().desc(CREATED_AT);
            q.single()
                .get_result(ctx, &mut last)
                .map_err(Error::into_fatal)?;
        }
        let Some(migration) = last.and_then(|m| self.migrations.get(&m.name)) else {
            return Ok(None);
        };
        tracing::info!(id = %migration.id, "rolling back");
        self.run_step(ctx, migration.down.as_ref())?;
        let mut delete = self.entity.delete();
        delete.where_().column(NAME).equal(migration.id.clone());
        delete.exec(ctx).map_err(Error::into_fatal)?;
        tracing::info!(id = %migration.id, "rollback finished");
        Ok(Some(migration.id.clone()))
    }

    fn applied(&self, ctx: &Context) -> Result<Vec<LandMigration>, Error> {
        let mut rows = Vec::new();
        let mut q = self.entity.select();
        q.columns([ID, NAME]);
        q.order().asc(CREATED_AT);
        q.all()
            .get_result(ctx, &mut rows)
            .map_err(Error::into_fatal)?;
        Ok(rows)
    }

    /// 在事务中执行一步；失败时回滚事务。
    fn run_step(&self, ctx: &Context, step: Option<&Step>) -> Result<(), Error> {
        self.entity.begin(ctx).map_err(Error::into_fatal)?;
        if let Some(step) = step
            && let Err(err) = step(&self.land)
        {
            if let Err(rollback) = self.entity.rollback(ctx) {
                tracing::error!(%rollback, "rollback after failed migration step");
            }
            return Err(err.into_fatal());
        }
        self.entity.commit(ctx).map_err(Error::into_fatal)
    }
}
