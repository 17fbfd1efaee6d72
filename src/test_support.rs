//! 测试夹具：与各测试文件共享的实体定义和内存执行端。

use crate::column::{ColOpts, DataType};
use crate::config::Config;
use crate::entity::{Entity, Land};
use crate::error::BoxError;
use crate::executor::{Context, Executor, Row};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub(crate) const NAME: &str = "name";
pub(crate) const LASTNAME: &str = "lastname";
pub(crate) const ACTIVE: &str = "active";

#[derive(Debug, Clone, Default)]
pub(crate) struct Person {
    pub(crate) name: String,
    pub(crate) lastname: String,
    pub(crate) active: bool,
}

crate::record! {
    impl Person {
        name,
        lastname,
        active,
    }
}

pub(crate) fn land() -> Land {
    Land::new(Config::new().with_log(true))
}

pub(crate) fn with_columns(entity: Entity) -> Entity {
    entity
        .set_column(NAME, DataType::Varchar, ColOpts::new().limit(255).not_null())
        .set_column(LASTNAME, DataType::Varchar, ColOpts::new().limit(255).not_null())
}

/// `tests AS t`：id、name、lastname、active、vectors、created_at、updated_at。
pub(crate) fn test_entity(land: &Land) -> Entity {
    with_columns(land.create_entity("tests").set_alias("t").set_id_column())
        .set_column(
            ACTIVE,
            DataType::Boolean,
            ColOpts::new().not_null().default_value(false),
        )
        .set_fulltext([])
        .set_created_at()
        .set_updated_at()
}

/// 同一张表的第二个别名 `t2`，没有 active 列。
pub(crate) fn second_entity(land: &Land) -> Entity {
    with_columns(land.create_entity("tests").set_alias("t2").set_id_column())
        .set_fulltext([])
        .set_created_at()
        .set_updated_at()
}

/// 内存执行端：记录收到的 SQL，按顺序返回预置的结果集；
/// SQL 包含 `fail_on` 片段时返回错误。
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeExecutor {
    pub(crate) log: Rc<RefCell<Vec<String>>>,
    pub(crate) results: Rc<RefCell<VecDeque<Vec<Row>>>>,
    pub(crate) fail_on: Rc<RefCell<Option<String>>>,
}

impl FakeExecutor {
    pub(crate) fn push_rows(&self, rows: Vec<Row>) {
        self.results.borrow_mut().push_back(rows);
    }

    pub(crate) fn fail_on(&self, fragment: &str) {
        *self.fail_on.borrow_mut() = Some(fragment.to_string());
    }

    pub(crate) fn statements(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn run(&self, sql: &str) -> Result<(), BoxError> {
        self.log.borrow_mut().push(sql.to_string());
        match self.fail_on.borrow().as_deref() {
            Some(fragment) if sql.contains(fragment) => {
                Err(format!("syntax error near \"{fragment}\"").into())
            }
            _ => Ok(()),
        }
    }
}

impl Executor for FakeExecutor {
    fn execute(&self, _ctx: &Context, sql: &str) -> Result<u64, BoxError> {
        self.run(sql)?;
        Ok(1)
    }

    fn query(&self, _ctx: &Context, sql: &str) -> Result<Vec<Row>, BoxError> {
        self.run(sql)?;
        Ok(self.results.borrow_mut().pop_front().unwrap_or_default())
    }
}

/// 绑定了 `FakeExecutor` 的工厂，返回执行端的共享句柄供断言。
pub(crate) fn executing_land(config: Config) -> (Land, FakeExecutor) {
    let executor = FakeExecutor::default();
    (Land::with_executor(config, executor.clone()), executor)
}
