//! 列元数据：数据类型、列选项与外键引用。

use crate::entity::Entity;
use crate::value::{SqlValue, ValueKind};

pub const ID: &str = "id";
pub const VECTORS: &str = "vectors";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";
pub const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

/// 列的数据类型（封闭集合）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Varchar,
    Char,
    Text,
    Int,
    BigInt,
    Float,
    Boolean,
    Jsonb,
    ArrayText,
    ArrayInt,
    TsVector,
    Timestamp,
    TimestampWithZone,
    Serial,
}

impl DataType {
    /// DDL 中使用的类型名。
    pub fn sql_name(self) -> &'static str {
        match self {
            Self::Varchar => "VARCHAR",
            Self::Char => "CHAR",
            Self::Text => "TEXT",
            Self::Int => "INT",
            Self::BigInt => "BIGINT",
            Self::Float => "FLOAT",
            Self::Boolean => "BOOLEAN",
            Self::Jsonb => "JSONB",
            Self::ArrayText => "TEXT[]",
            Self::ArrayInt => "INTEGER[]",
            Self::TsVector => "TSVECTOR",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampWithZone => "TIMESTAMPTZ",
            Self::Serial => "SERIAL",
        }
    }

    /// 该类型能否接收给定种类的值。
    pub fn accepts(self, kind: ValueKind) -> bool {
        match self {
            Self::Varchar | Self::Char | Self::Text | Self::TsVector | Self::Jsonb => {
                kind == ValueKind::String
            }
            Self::Serial | Self::Int | Self::BigInt => kind == ValueKind::Int,
            Self::Float => matches!(kind, ValueKind::Float | ValueKind::Int),
            Self::Boolean => kind == ValueKind::Bool,
            Self::Timestamp | Self::TimestampWithZone => {
                matches!(kind, ValueKind::String | ValueKind::DateTime)
            }
            Self::ArrayText | Self::ArrayInt => kind == ValueKind::List,
        }
    }

    pub fn is_timestamp(self) -> bool {
        matches!(self, Self::Timestamp | Self::TimestampWithZone)
    }

    pub fn is_array(self) -> bool {
        matches!(self, Self::ArrayText | Self::ArrayInt)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::BigInt | Self::Float | Self::Serial)
    }
}

/// 外键引用目标。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceTarget {
    /// 引用其他实体（只记录表名）。
    Entity(String),
    /// 引用当前实体自身。
    SelfRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub target: ReferenceTarget,
    pub column: String,
}

impl Reference {
    pub fn to(entity: &Entity, column: impl Into<String>) -> Self {
        Self {
            target: ReferenceTarget::Entity(entity.name().to_string()),
            column: column.into(),
        }
    }

    pub fn to_self(column: impl Into<String>) -> Self {
        Self {
            target: ReferenceTarget::SelfRef,
            column: column.into(),
        }
    }
}

/// 列选项。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColOpts {
    pub default: Option<SqlValue>,
    /// 字符长度限制，仅 VARCHAR/CHAR 生效。
    pub limit: u32,
    pub pk: bool,
    pub not_null: bool,
    pub unique: bool,
    /// 不从调用方数据中取值（INSERT/UPDATE 跳过）。
    pub exclude: bool,
    pub reference: Option<Reference>,
}

impl ColOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_value(mut self, value: impl Into<SqlValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn pk(mut self) -> Self {
        self.pk = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub options: ColOpts,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType, options: ColOpts) -> Self {
        Self {
            name: name.into(),
            data_type,
            options,
        }
    }

    /// DDL 类型：`VARCHAR(255)` 这类带长度的写法只对 VARCHAR/CHAR 生效。
    pub fn ddl_type(&self) -> String {
        match self.data_type {
            DataType::Varchar | DataType::Char if self.options.limit > 0 => {
                format!("{}({})", self.data_type.sql_name(), self.options.limit)
            }
            other => other.sql_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ColOpts, Column, DataType};
    use crate::value::ValueKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn ddl_type_appends_limit_for_character_types() {
        let c = Column::new("name", DataType::Varchar, ColOpts::new().limit(255));
        assert_eq!(c.ddl_type(), "VARCHAR(255)");
        let c = Column::new("code", DataType::Char, ColOpts::new().limit(2));
        assert_eq!(c.ddl_type(), "CHAR(2)");
        let c = Column::new("age", DataType::Int, ColOpts::new().limit(3));
        assert_eq!(c.ddl_type(), "INT");
        let c = Column::new("bio", DataType::Varchar, ColOpts::new());
        assert_eq!(c.ddl_type(), "VARCHAR");
    }

    #[test]
    fn float_accepts_int() {
        assert!(DataType::Float.accepts(ValueKind::Int));
        assert!(DataType::Float.accepts(ValueKind::Float));
        assert!(!DataType::Int.accepts(ValueKind::Float));
        assert!(!DataType::Boolean.accepts(ValueKind::String));
        assert!(DataType::Timestamp.accepts(ValueKind::DateTime));
        assert!(DataType::ArrayText.accepts(ValueKind::List));
        assert!(!DataType::ArrayInt.accepts(ValueKind::Int));
    }
}
