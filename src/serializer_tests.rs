#[cfg(test)]
mod tests {
    use crate::column::{ColOpts, Column, DataType};
    use crate::serializer::{RenderContext, default_for, render, render_unknown};
    use crate::value::{SqlValue, safe};
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    fn col(data_type: DataType) -> Column {
        Column::new("c", data_type, ColOpts::new())
    }

    fn write(data_type: DataType, value: impl Into<SqlValue>) -> String {
        render(Some(&col(data_type)), &value.into(), RenderContext::Write)
    }

    #[test]
    fn no_column_renders_nothing() {
        assert_eq!(render(None, &SqlValue::from(1), RenderContext::Where), "");
    }

    #[test]
    fn text_family_is_quoted() {
        assert_eq!(write(DataType::Varchar, "daar"), "'daar'");
        assert_eq!(write(DataType::Text, "it's"), "'it''s'");
        assert_eq!(write(DataType::Jsonb, r#"{"a":1}"#), r#"'{"a":1}'"#);
    }

    #[test]
    fn numbers_render_bare() {
        assert_eq!(write(DataType::Int, 42), "42");
        assert_eq!(write(DataType::BigInt, -7_i64), "-7");
        assert_eq!(write(DataType::Float, 3), "3");
        assert_eq!(write(DataType::Float, 1.5), "1.500000");
        assert_eq!(write(DataType::Boolean, true), "true");
    }

    #[test]
    fn timestamps() {
        assert_eq!(
            write(DataType::Timestamp, datetime!(2024-03-01 12:30:05 UTC)),
            "'2024-03-01 12:30:05'"
        );
        assert_eq!(
            write(DataType::TimestampWithZone, "CURRENT_TIMESTAMP"),
            "CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn tsvector_depends_on_context() {
        let c = col(DataType::TsVector);
        let v = SqlValue::from("Hello world");
        assert_eq!(
            render(Some(&c), &v, RenderContext::Where),
            "to_tsquery('hello:* & world:*')"
        );
        assert_eq!(
            render(Some(&c), &v, RenderContext::Write),
            "to_tsvector('hello world')"
        );
    }

    #[test]
    fn mismatch_degrades_to_empty() {
        assert_eq!(write(DataType::Int, "abc"), "");
        assert_eq!(write(DataType::Boolean, 1), "");
        assert_eq!(write(DataType::Varchar, 1.5), "");
    }

    #[test]
    fn safe_null_and_lists_bypass_validation() {
        assert_eq!(write(DataType::Int, safe("nextval('s')")), "nextval('s')");
        assert_eq!(write(DataType::Int, SqlValue::Null), "NULL");
        assert_eq!(write(DataType::Int, vec![1, 2, 3]), "1,2,3");
        assert_eq!(write(DataType::Varchar, vec!["a", "b"]), "'a','b'");
    }

    #[test]
    fn array_columns_write_array_literals() {
        assert_eq!(
            write(DataType::ArrayText, vec!["a", "it's"]),
            "ARRAY['a','it''s']"
        );
        assert_eq!(write(DataType::ArrayInt, vec![1, 2]), "ARRAY[1,2]");
        assert_eq!(write(DataType::ArrayInt, Vec::<i64>::new()), "'{}'");
        assert_eq!(write(DataType::ArrayInt, vec!["x"]), "");
        assert_eq!(write(DataType::ArrayText, "a"), "");
        let c = col(DataType::ArrayText);
        assert_eq!(
            render(Some(&c), &SqlValue::from(vec!["a", "b"]), RenderContext::Where),
            "'a','b'"
        );
        assert_eq!(
            default_for(&c, RenderContext::Write),
            SqlValue::List(Vec::new())
        );
    }

    #[test]
    fn defaults_by_type() {
        let c = Column::new(
            "active",
            DataType::Boolean,
            ColOpts::new().default_value(true),
        );
        assert_eq!(default_for(&c, RenderContext::Write), SqlValue::Bool(true));
        // 默认值类型不匹配时退回类型零值
        let c = Column::new("n", DataType::Int, ColOpts::new().default_value("x"));
        assert_eq!(default_for(&c, RenderContext::Write), SqlValue::I64(0));
        assert_eq!(
            default_for(&col(DataType::Timestamp), RenderContext::Write),
            safe("CURRENT_TIMESTAMP")
        );
        assert_eq!(
            default_for(&col(DataType::Boolean), RenderContext::Write),
            SqlValue::Bool(false)
        );
        assert_eq!(
            default_for(&col(DataType::Varchar), RenderContext::Write),
            SqlValue::from("")
        );
        assert_eq!(
            default_for(&col(DataType::TsVector), RenderContext::Where),
            safe("to_tsquery('')")
        );
        assert_eq!(
            default_for(&col(DataType::TsVector), RenderContext::Definition),
            safe("to_tsvector('')")
        );
    }

    #[test]
    fn unknown_column_renders_by_value_kind() {
        assert_eq!(render_unknown(&SqlValue::from("x")), "'x'");
        assert_eq!(render_unknown(&SqlValue::from(5)), "5");
        assert_eq!(render_unknown(&SqlValue::from(false)), "false");
    }
}
