//! 记录：INSERT/UPDATE 的取值来源，以及查询结果到业务类型的映射。
//!
//! Rust 没有运行时反射，业务 struct 通过 `record!` 宏声明"字段 ↔ 列"的对应关系，
//! 宏同时生成取值（`Record`）和回填（`FromRow`）两部分。

use crate::error::Error;
use crate::executor::Row;
use crate::value::{SqlValue, ValueKind};
use dyn_clone::DynClone;
use std::collections::HashMap;
use std::fmt::Debug;
use time::OffsetDateTime;

/// 按列名取值。返回 `None` 表示记录里没有这一列，对应列会被整列跳过。
pub trait Record: DynClone + Debug {
    fn field(&self, column: &str) -> Option<SqlValue>;
}

dyn_clone::clone_trait_object!(Record);

impl Record for HashMap<String, SqlValue> {
    fn field(&self, column: &str) -> Option<SqlValue> {
        self.get(column).cloned()
    }
}

impl Record for HashMap<&'static str, SqlValue> {
    fn field(&self, column: &str) -> Option<SqlValue> {
        self.get(column).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FromValueError {
    #[error("expected {expected}, got {found:?}")]
    Mismatch {
        expected: &'static str,
        found: ValueKind,
    },
    #[error("integer {0} out of range")]
    OutOfRange(i64),
}

/// 单个值到字段类型的转换。
pub trait FromValue: Sized {
    fn from_value(value: &SqlValue) -> Result<Self, FromValueError>;
}

fn mismatch<T>(expected: &'static str, value: &SqlValue) -> Result<T, FromValueError> {
    Err(FromValueError::Mismatch {
        expected,
        found: value.kind(),
    })
}

impl FromValue for SqlValue {
    fn from_value(value: &SqlValue) -> Result<Self, FromValueError> {
        Ok(value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &SqlValue) -> Result<Self, FromValueError> {
        match value {
            SqlValue::String(v) | SqlValue::Safe(v) => Ok(v.to_string()),
            other => mismatch("string", other),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &SqlValue) -> Result<Self, FromValueError> {
        match value {
            SqlValue::I64(v) => Ok(*v),
            other => mismatch("integer", other),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &SqlValue) -> Result<Self, FromValueError> {
        let v = i64::from_value(value)?;
        i32::try_from(v).map_err(|_| FromValueError::OutOfRange(v))
    }
}

impl FromValue for f64 {
    fn from_value(value: &SqlValue) -> Result<Self, FromValueError> {
        match value {
            SqlValue::F64(v) => Ok(*v),
            SqlValue::I64(v) => Ok(*v as f64),
            other => mismatch("float", other),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &SqlValue) -> Result<Self, FromValueError> {
        match value {
            SqlValue::Bool(v) => Ok(*v),
            other => mismatch("boolean", other),
        }
    }
}

impl FromValue for OffsetDateTime {
    fn from_value(value: &SqlValue) -> Result<Self, FromValueError> {
        match value {
            SqlValue::DateTime(v) => Ok(*v),
            other => mismatch("timestamp", other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &SqlValue) -> Result<Self, FromValueError> {
        match value {
            SqlValue::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// 一行结果到业务类型的映射。
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, Error>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(row.clone())
    }
}

impl FromRow for HashMap<String, SqlValue> {
    fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(row
            .columns()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect())
    }
}

/// 取出一列并转换；`record!` 生成的代码使用。
#[doc(hidden)]
pub fn hydrate<T: FromValue>(row: &Row, column: &str, slot: &mut T) -> Result<(), Error> {
    let Some(value) = row.get(column) else {
        return Ok(());
    };
    *slot = T::from_value(value).map_err(|e| Error::Hydration {
        column: column.to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

/// 查询结果的接收方。
pub trait Destination {
    fn fill(&mut self, rows: Vec<Row>) -> Result<(), Error>;
}

impl<T: FromRow> Destination for Vec<T> {
    fn fill(&mut self, rows: Vec<Row>) -> Result<(), Error> {
        self.reserve(rows.len());
        for row in &rows {
            self.push(T::from_row(row)?);
        }
        Ok(())
    }
}

/// 只取第一行；没有结果时为 `None`。
impl<T: FromRow> Destination for Option<T> {
    fn fill(&mut self, rows: Vec<Row>) -> Result<(), Error> {
        *self = match rows.first() {
            Some(row) => Some(T::from_row(row)?),
            None => None,
        };
        Ok(())
    }
}

/// `SELECT EXISTS(...)` 的结果：第一行第一列。
impl Destination for bool {
    fn fill(&mut self, rows: Vec<Row>) -> Result<(), Error> {
        let Some(value) = rows.first().and_then(Row::first) else {
            *self = false;
            return Ok(());
        };
        *self = bool::from_value(value).map_err(|e| Error::Hydration {
            column: "exists".to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

/// 为业务 struct 生成 `Record` 与 `FromRow`。
///
/// 未写列名的字段使用字段名本身作为列名。类型需实现 `Clone + Debug + Default`。
///
/// ```ignore
/// #[derive(Debug, Clone, Default)]
/// struct Person { id: i64, name: String, lastname: String }
///
/// land::record! {
///     impl Person {
///         id,
///         name: "name",
///         lastname,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        impl $ty:ty {
            $( $field:ident $(: $col:literal)? ),* $(,)?
        }
    ) => {
        impl $crate::record::Record for $ty {
            fn field(&self, column: &str) -> ::std::option::Option<$crate::value::SqlValue> {
                $(
                    if column == $crate::__record_column!($field $(, $col)?) {
                        return ::std::option::Option::Some(
                            $crate::value::SqlValue::from(::std::clone::Clone::clone(&self.$field)),
                        );
                    }
                )*
                ::std::option::Option::None
            }
        }

        impl $crate::record::FromRow for $ty {
            fn from_row(
                row: &$crate::executor::Row,
            ) -> ::std::result::Result<Self, $crate::error::Error> {
                let mut out = <$ty as ::std::default::Default>::default();
                $(
                    $crate::record::hydrate(
                        row,
                        $crate::__record_column!($field $(, $col)?),
                        &mut out.$field,
                    )?;
                )*
                ::std::result::Result::Ok(out)
            }
        }
    };
}

/// 宏内部 helper：列名缺省时取字段名。
#[doc(hidden)]
#[macro_export]
macro_rules! __record_column {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $col:literal) => {
        $col
    };
}
