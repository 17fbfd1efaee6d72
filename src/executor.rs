//! 执行协作方：`Executor` 抽象、取消上下文、结果行，以及带日志的执行入口。

use crate::entity::Entity;
use crate::error::{BoxError, Error, recover};
use crate::record::Destination;
use crate::value::SqlValue;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// 数据库执行端。本库只依赖这两个调用，不关心连接管理。
pub trait Executor {
    /// 执行不返回行的语句，返回受影响行数。
    fn execute(&self, ctx: &Context, sql: &str) -> Result<u64, BoxError>;

    /// 执行查询并返回结果行。
    fn query(&self, ctx: &Context, sql: &str) -> Result<Vec<Row>, BoxError>;
}

/// 可取消的执行上下文：一个取消标记 + 可选截止时间。
///
/// clone 出来的上下文共享同一个取消标记，可以从其他线程调用 `cancel`。
#[derive(Debug, Clone, Default)]
pub struct Context {
    canceled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Context {
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            canceled: Arc::default(),
            deadline: Some(deadline),
        }
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub(crate) fn check(&self, query: &str) -> Result<(), Error> {
        if self.is_canceled() {
            return Err(Error::Canceled {
                query: query.to_string(),
            });
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(Error::DeadlineExceeded {
                query: query.to_string(),
            });
        }
        Ok(())
    }
}

/// 一行结果：按列顺序保存 `(列名, 值)`。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.columns.push((column.into(), value.into()));
        self
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    pub fn first(&self) -> Option<&SqlValue> {
        self.columns.first().map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<SqlValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// 语句种类，用于日志。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
    CreateTable,
    AlterTable,
    DropTable,
    Truncate,
    Transaction,
}

impl QueryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::CreateTable => "CREATE TABLE",
            Self::AlterTable => "ALTER TABLE",
            Self::DropTable => "DROP TABLE",
            Self::Truncate => "TRUNCATE",
            Self::Transaction => "TRANSACTION",
        }
    }
}

/// 执行不返回行的语句。
pub(crate) fn execute(
    entity: &Entity,
    ctx: &Context,
    kind: QueryKind,
    sql: &str,
) -> Result<u64, Error> {
    guarded(entity, || {
        let executor = bound_executor(entity)?;
        ctx.check(sql)?;
        let start = Instant::now();
        let affected = executor
            .execute(ctx, sql)
            .map_err(|e| Error::execution(sql, e))?;
        log_query(entity, kind, start.elapsed(), sql);
        Ok(affected)
    })
}

/// 执行查询并把结果填入 `dest`。
pub(crate) fn fetch<D: Destination + ?Sized>(
    entity: &Entity,
    ctx: &Context,
    kind: QueryKind,
    sql: &str,
    dest: &mut D,
) -> Result<(), Error> {
    guarded(entity, || {
        let executor = bound_executor(entity)?;
        ctx.check(sql)?;
        let start = Instant::now();
        let rows = executor
            .query(ctx, sql)
            .map_err(|e| Error::execution(sql, e))?;
        log_query(entity, kind, start.elapsed(), sql);
        dest.fill(rows)
    })
}

fn bound_executor(entity: &Entity) -> Result<std::rc::Rc<dyn Executor>, Error> {
    entity.executor().ok_or_else(|| Error::NoExecutor {
        entity: entity.name().to_string(),
    })
}

/// 失败时把错误记入实体的错误列表，再交给恢复边界。
fn guarded<T>(entity: &Entity, op: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
    op().map_err(|err| {
        entity.record_error(err.clone());
        recover(entity.config(), err)
    })
}

fn log_query(entity: &Entity, kind: QueryKind, elapsed: Duration, sql: &str) {
    if entity.config().log {
        tracing::info!(
            kind = kind.as_str(),
            ?elapsed,
            "{} in {:?}: {}",
            kind.as_str(),
            elapsed,
            sql
        );
    } else {
        tracing::debug!(kind = kind.as_str(), ?elapsed, sql, "query executed");
    }
}
