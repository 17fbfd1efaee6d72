#[cfg(test)]
mod tests {
    use crate::column::{ColOpts, DataType, ID};
    use crate::test_support::{Person, land, test_entity};
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use time::macros::datetime;

    fn dominik() -> Person {
        Person {
            name: "Dominik".to_string(),
            lastname: "Linduska".to_string(),
            active: false,
        }
    }

    #[test]
    fn insert_record_with_vectors_and_returning() {
        let e = test_entity(&land());
        let mut q = e.insert();
        q.values(dominik()).set_vectors(["Dominik", "Linduska"]);
        q.returning([ID, "name", "lastname"]);
        assert_eq!(
            q.sql(),
            r#"INSERT INTO "tests" ("name","lastname","active","vectors","created_at","updated_at") VALUES ('Dominik','Linduska',false,to_tsvector('dominik linduska'),CURRENT_TIMESTAMP,CURRENT_TIMESTAMP) RETURNING "id","name","lastname";"#
        );
    }

    #[test]
    fn empty_vectors_when_not_set() {
        let e = test_entity(&land());
        let mut q = e.insert();
        q.values(dominik()).returning_all();
        assert_eq!(
            q.sql(),
            r#"INSERT INTO "tests" ("name","lastname","active","vectors","created_at","updated_at") VALUES ('Dominik','Linduska',false,to_tsvector(''),CURRENT_TIMESTAMP,CURRENT_TIMESTAMP) RETURNING *;"#
        );
    }

    #[test]
    fn map_record_skips_missing_columns() {
        let e = test_entity(&land());
        let values: HashMap<String, SqlValue> = [("name".to_string(), SqlValue::from("Jana"))]
            .into_iter()
            .collect();
        let mut q = e.insert();
        q.values(values);
        assert_eq!(
            q.sql(),
            r#"INSERT INTO "tests" ("name","vectors","created_at","updated_at") VALUES ('Jana',to_tsvector(''),CURRENT_TIMESTAMP,CURRENT_TIMESTAMP);"#
        );
    }

    #[test]
    fn zero_values_use_null_or_default() {
        let e = land()
            .create_entity("people")
            .set_column("nickname", DataType::Varchar, ColOpts::new())
            .set_column(
                "score",
                DataType::Int,
                ColOpts::new().not_null().default_value(10),
            )
            .set_column("title", DataType::Text, ColOpts::new().not_null());
        let values: HashMap<&'static str, SqlValue> = [
            ("nickname", SqlValue::from("")),
            ("score", SqlValue::from(0)),
            ("title", SqlValue::Null),
        ]
        .into_iter()
        .collect();
        let mut q = e.insert();
        q.values(values);
        assert_eq!(
            q.sql(),
            r#"INSERT INTO "people" ("nickname","score","title") VALUES (NULL,10,'');"#
        );
    }

    #[test]
    fn custom_id_and_timestamp() {
        let e = land()
            .create_entity("events")
            .set_id_column()
            .set_column("kind", DataType::Varchar, ColOpts::new().limit(32))
            .set_created_at()
            .set_updated_at();
        let values: HashMap<&'static str, SqlValue> = [
            ("id", SqlValue::from(7)),
            ("kind", SqlValue::from("boot")),
            ("created_at", SqlValue::from(datetime!(2024-01-02 03:04:05 UTC))),
        ]
        .into_iter()
        .collect();
        let mut q = e.insert();
        q.values(values).custom_id().custom_timestamp();
        assert_eq!(
            q.sql(),
            r#"INSERT INTO "events" ("id","kind","created_at") VALUES (7,'boot','2024-01-02 03:04:05');"#
        );
    }

    #[test]
    fn excluded_column_is_never_written() {
        let e = land()
            .create_entity("docs")
            .set_column("body", DataType::Text, ColOpts::new())
            .set_column("computed", DataType::Int, ColOpts::new().exclude());
        let values: HashMap<&'static str, SqlValue> =
            [("body", SqlValue::from("x")), ("computed", SqlValue::from(3))]
                .into_iter()
                .collect();
        let mut q = e.insert();
        q.values(values);
        assert_eq!(q.sql(), r#"INSERT INTO "docs" ("body") VALUES ('x');"#);
    }

    #[test]
    fn render_twice_is_identical() {
        let e = test_entity(&land());
        let mut q = e.insert();
        q.values(dominik());
        assert_eq!(q.sql(), q.sql());
    }

    #[test]
    fn array_columns_get_array_literals() {
        let e = land()
            .create_entity("posts")
            .set_column("title", DataType::Text, ColOpts::new())
            .set_column("tags", DataType::ArrayText, ColOpts::new())
            .set_column("scores", DataType::ArrayInt, ColOpts::new().not_null());
        let values: HashMap<&'static str, SqlValue> = [
            ("title", SqlValue::from("x")),
            ("tags", SqlValue::from(vec!["a", "b"])),
            ("scores", SqlValue::from(Vec::<i64>::new())),
        ]
        .into_iter()
        .collect();
        let mut q = e.insert();
        q.values(values);
        assert_eq!(
            q.sql(),
            r#"INSERT INTO "posts" ("title","tags","scores") VALUES ('x',ARRAY['a','b'],'{}');"#
        );
    }

    #[test]
    fn epoch_timestamp_is_kept() {
        let e = land()
            .create_entity("events")
            .set_column("at", DataType::Timestamp, ColOpts::new())
            .set_created_at();
        let values: HashMap<&'static str, SqlValue> = [
            ("at", SqlValue::from(datetime!(1970-01-01 00:00:00 UTC))),
            ("created_at", SqlValue::from(datetime!(1970-01-01 00:00:00 UTC))),
        ]
        .into_iter()
        .collect();
        let mut q = e.insert();
        q.values(values).custom_timestamp();
        assert_eq!(
            q.sql(),
            r#"INSERT INTO "events" ("at","created_at") VALUES ('1970-01-01 00:00:00','1970-01-01 00:00:00');"#
        );
    }

    #[test]
    fn mismatched_value_falls_back_to_zero_policy() {
        let e = land()
            .create_entity("counters")
            .set_column("total", DataType::Int, ColOpts::new().not_null())
            .set_column("rank", DataType::Int, ColOpts::new());
        let values: HashMap<&'static str, SqlValue> =
            [("total", SqlValue::from("abc")), ("rank", SqlValue::from("abc"))]
                .into_iter()
                .collect();
        let mut q = e.insert();
        q.values(values);
        assert_eq!(
            q.sql(),
            r#"INSERT INTO "counters" ("total","rank") VALUES (0,NULL);"#
        );
    }
}
