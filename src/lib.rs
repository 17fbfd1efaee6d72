//! land：面向 PostgreSQL 的类型化 SQL 语句构建库。
//!
//! 先用 `Land::create_entity` 声明实体（表名、别名、带类型的列），再通过实体上的
//! `select` / `insert` / `update` / `delete` 及 DDL 入口组合语句。所有值都按列类型
//! 直接序列化进 SQL 文本；执行交给调用方提供的 `Executor`。

pub mod alter_table;
pub mod column;
pub mod column_expr;
#[cfg(test)]
mod column_expr_tests;
pub mod condition;
pub mod config;
pub mod create_table;
pub mod cte;
pub mod delete;
pub mod drop_table;
pub mod entity;
pub mod error;
pub mod executor;
pub mod fulltext;
pub mod group;
pub mod insert;
#[cfg(test)]
mod insert_tests;
pub mod join;
pub mod macros;
pub use crate::macros::*;
pub mod migrate;
pub mod order;
pub mod record;
pub mod select;
pub mod serializer;
#[cfg(test)]
mod serializer_tests;
mod string_builder;
pub mod syntax;
#[cfg(test)]
mod test_support;
pub mod truncate;
pub mod update;
#[cfg(test)]
mod update_delete_tests;
pub mod value;

pub use crate::alter_table::AlterTableBuilder;
pub use crate::column::{
    CREATED_AT, CURRENT_TIMESTAMP, ColOpts, Column, DataType, ID, Reference, ReferenceTarget,
    UPDATED_AT, VECTORS,
};
pub use crate::column_expr::{Aggregate, CoalesceExpr, ColumnExpr, ColumnsExpr, Comparison};
pub use crate::condition::{Condition, ConditionKind};
pub use crate::config::Config;
pub use crate::create_table::CreateTableBuilder;
pub use crate::cte::With;
pub use crate::delete::DeleteBuilder;
pub use crate::drop_table::DropTableBuilder;
pub use crate::entity::{Entity, Land};
pub use crate::error::{BoxError, Error};
pub use crate::executor::{Context, Executor, QueryKind, Row};
pub use crate::fulltext::{build_query, build_vector};
pub use crate::group::Group;
pub use crate::insert::InsertBuilder;
pub use crate::join::{Join, JoinKind};
pub use crate::migrate::{Migration, Migrations, Migrator};
pub use crate::order::{Direction, Order, OrderParam};
pub use crate::record::{Destination, FromRow, FromValue, FromValueError, Record};
pub use crate::select::{DEFAULT_LIMIT, Param, SelectBuilder};
pub use crate::truncate::TruncateBuilder;
pub use crate::update::UpdateBuilder;
pub use crate::value::{SqlValue, ValueKind, safe};
