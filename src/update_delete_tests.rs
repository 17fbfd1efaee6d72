#[cfg(test)]
mod tests {
    use crate::column::{ColOpts, DataType, ID};
    use crate::test_support::{Person, land, test_entity};
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use time::macros::datetime;

    #[test]
    fn update_record_with_vectors() {
        let e = test_entity(&land());
        let mut q = e.update();
        q.values(Person {
            name: "Dominik".to_string(),
            lastname: "Linduska".to_string(),
            active: false,
        })
        .set_vectors(["Dominik", "Linduska"]);
        q.returning([ID, "name", "lastname"]);
        assert_eq!(
            q.sql(),
            r#"UPDATE "tests" AS "t" SET "name" = 'Dominik',"lastname" = 'Linduska',"active" = false,"vectors" = to_tsvector('dominik linduska'),"updated_at" = CURRENT_TIMESTAMP RETURNING "id","name","lastname";"#
        );
    }

    #[test]
    fn update_from_map_with_where() {
        let e = test_entity(&land());
        let values: HashMap<String, SqlValue> = [
            ("name".to_string(), SqlValue::from("Dominik")),
            ("lastname".to_string(), SqlValue::from("Linduska")),
        ]
        .into_iter()
        .collect();
        let mut q = e.update();
        q.values(values);
        q.where_().column(ID).equal(1);
        q.returning([ID, "name", "lastname"]);
        assert_eq!(
            q.sql(),
            r#"UPDATE "tests" AS "t" SET "name" = 'Dominik',"lastname" = 'Linduska',"updated_at" = CURRENT_TIMESTAMP WHERE "t"."id" = 1 RETURNING "id","name","lastname";"#
        );
    }

    #[test]
    fn set_columns_restricts_the_set_list() {
        let e = test_entity(&land());
        let mut q = e.update();
        q.values(Person {
            name: "A".to_string(),
            lastname: "B".to_string(),
            active: true,
        })
        .set_columns(["active", "id", "created_at"]);
        assert_eq!(q.sql(), r#"UPDATE "tests" AS "t" SET "active" = true;"#);
    }

    #[test]
    fn updated_at_from_record() {
        let e = test_entity(&land());
        let values: HashMap<&'static str, SqlValue> = [
            ("updated_at", SqlValue::from(datetime!(2023-05-06 07:08:09 UTC))),
            ("created_at", SqlValue::from(datetime!(2020-01-01 00:00:00 UTC))),
        ]
        .into_iter()
        .collect();
        let mut q = e.update();
        q.values(values);
        assert_eq!(
            q.sql(),
            r#"UPDATE "tests" AS "t" SET "updated_at" = '2023-05-06 07:08:09';"#
        );
    }

    #[test]
    fn zero_values_in_update() {
        let e = land()
            .create_entity("people")
            .set_column("nickname", DataType::Varchar, ColOpts::new())
            .set_column("score", DataType::Int, ColOpts::new().not_null())
            .set_column("enabled", DataType::Boolean, ColOpts::new().not_null());
        let values: HashMap<&'static str, SqlValue> = [
            ("nickname", SqlValue::from("")),
            ("score", SqlValue::from(0)),
            ("enabled", SqlValue::from(false)),
        ]
        .into_iter()
        .collect();
        let mut q = e.update();
        q.values(values);
        assert_eq!(
            q.sql(),
            r#"UPDATE "people" SET "nickname" = NULL,"score" = 0,"enabled" = false;"#
        );
    }

    #[test]
    fn delete_with_where_and_returning() {
        let e = test_entity(&land());
        let mut q = e.delete();
        q.where_().column(ID).equal(1);
        q.returning([ID]);
        assert_eq!(
            q.sql(),
            r#"DELETE FROM "tests" AS "t" WHERE "t"."id" = 1 RETURNING "id";"#
        );
    }

    #[test]
    fn delete_without_alias() {
        let e = land()
            .create_entity("tests")
            .set_id_column();
        let mut q = e.delete();
        q.where_().column(ID).equal(1);
        q.returning([ID]);
        assert_eq!(q.sql(), r#"DELETE FROM "tests" WHERE "id" = 1 RETURNING "id";"#);
    }

    #[test]
    fn delete_everything() {
        let e = test_entity(&land());
        assert_eq!(e.delete().sql(), r#"DELETE FROM "tests" AS "t";"#);
    }

    #[test]
    fn update_array_column() {
        let e = land()
            .create_entity("posts")
            .set_column("tags", DataType::ArrayText, ColOpts::new());
        let values: HashMap<&'static str, SqlValue> =
            [("tags", SqlValue::from(vec!["a", "b"]))].into_iter().collect();
        let mut q = e.update();
        q.values(values);
        assert_eq!(q.sql(), r#"UPDATE "posts" SET "tags" = ARRAY['a','b'];"#);
    }

    #[test]
    fn mismatched_value_is_left_out_of_set() {
        let e = land()
            .create_entity("people")
            .set_column("name", DataType::Varchar, ColOpts::new())
            .set_column("score", DataType::Int, ColOpts::new().not_null());
        let values: HashMap<&'static str, SqlValue> =
            [("name", SqlValue::from("x")), ("score", SqlValue::from("abc"))]
                .into_iter()
                .collect();
        let mut q = e.update();
        q.values(values);
        assert_eq!(q.sql(), r#"UPDATE "people" SET "name" = 'x';"#);
    }
}
