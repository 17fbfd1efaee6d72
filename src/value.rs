//! SQL 字面量值类型：builder 接收的所有值都先归一成 `SqlValue`。

use std::borrow::Cow;
use time::OffsetDateTime;

/// 写入 SQL 文本的值。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(Cow<'static, str>),
    DateTime(OffsetDateTime),
    /// 列表值，渲染为逗号分隔的字面量序列（用于 IN）。
    List(Vec<SqlValue>),
    /// 调用方已转义的原始 SQL 片段，跳过类型校验直接输出。
    Safe(Cow<'static, str>),
}

/// 值的种类，用于和列的数据类型做匹配校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    DateTime,
    List,
    Safe,
}

/// 构造一个原样输出的 SQL 片段（如 `now()`）。
pub fn safe(fragment: impl Into<Cow<'static, str>>) -> SqlValue {
    SqlValue::Safe(fragment.into())
}

impl SqlValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::I64(_) => ValueKind::Int,
            Self::F64(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::List(_) => ValueKind::List,
            Self::Safe(_) => ValueKind::Safe,
        }
    }

    /// 零值判断：INSERT/UPDATE 据此决定写 NULL 还是列默认值。
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(v) => !*v,
            Self::I64(v) => *v == 0,
            // 用 bits 判断，-0.0 不算零值
            Self::F64(v) => v.to_bits() == 0,
            Self::String(v) | Self::Safe(v) => v.is_empty(),
            // 时间点没有零值，缺省值以 Null 表示
            Self::DateTime(_) => false,
            Self::List(v) => v.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! int_value {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for SqlValue {
            fn from(v: $t) -> Self {
                Self::I64(v as i64)
            }
        })+
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::F64(v as f64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&String> for SqlValue {
    fn from(v: &String) -> Self {
        Self::String(Cow::Owned(v.clone()))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<OffsetDateTime> for SqlValue {
    fn from(v: OffsetDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<time::PrimitiveDateTime> for SqlValue {
    fn from(v: time::PrimitiveDateTime) -> Self {
        Self::DateTime(v.assume_utc())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for SqlValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SqlValue>, const N: usize> From<[T; N]> for SqlValue {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{SqlValue, ValueKind, safe};
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    #[test]
    fn option_maps_to_null() {
        assert_eq!(SqlValue::from(Some(123_i64)), SqlValue::I64(123));
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
    }

    #[test]
    fn vec_becomes_list() {
        let v: SqlValue = vec![1, 2].into();
        assert_eq!(v, SqlValue::List(vec![SqlValue::I64(1), SqlValue::I64(2)]));
        assert_eq!(v.kind(), ValueKind::List);
    }

    #[test]
    fn zero_values() {
        assert!(SqlValue::from("").is_zero());
        assert!(SqlValue::from(false).is_zero());
        assert!(SqlValue::from(0_i32).is_zero());
        assert!(!SqlValue::from(-0.0_f64).is_zero());
        assert!(!SqlValue::from("a").is_zero());
        assert!(!safe("now()").is_zero());
        assert!(!SqlValue::from(datetime!(1970-01-01 00:00:00 UTC)).is_zero());
    }
}
