#[cfg(test)]
mod tests {
    use crate::column_expr::{CoalesceExpr, ColumnExpr, ColumnsExpr};
    use crate::test_support::{land, test_entity};
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_column() {
        let e = test_entity(&land());
        assert_eq!(ColumnExpr::new(&e, "name").render(), r#""t"."name""#);
    }

    #[test]
    fn aggregates_with_alias() {
        let e = test_entity(&land());
        let c = ColumnExpr::new(&e, "name");
        c.count().alias("count_name");
        assert_eq!(c.render(), r#"COUNT("t"."name") AS "count_name""#);

        let c = ColumnExpr::new(&e, "name");
        c.sum().alias("sum_name");
        assert_eq!(c.render(), r#"SUM("t"."name") AS "sum_name""#);

        let c = ColumnExpr::new(&e, "posts");
        c.min().alias("min_posts");
        assert_eq!(c.render(), r#"MIN("t"."posts") AS "min_posts""#);

        let c = ColumnExpr::new(&e, "posts");
        c.max().alias("max_posts");
        assert_eq!(c.render(), r#"MAX("t"."posts") AS "max_posts""#);

        let c = ColumnExpr::new(&e, "posts");
        c.array_agg().alias("posts_array");
        assert_eq!(c.render(), r#"ARRAY_AGG("t"."posts") AS "posts_array""#);

        let c = ColumnExpr::new(&e, "name");
        c.length();
        assert_eq!(c.render(), r#"LENGTH("t"."name")"#);
    }

    #[test]
    fn string_agg_with_separator_literal() {
        let e = test_entity(&land());
        let name = ColumnExpr::new(&e, "name");
        let space = ColumnExpr::literal(" ");
        let lastname = ColumnExpr::new(&e, "lastname");
        name.string_agg([space, lastname]).separator(",").alias("value");
        assert_eq!(
            name.render(),
            r#"STRING_AGG("t"."name" || ' ' || "t"."lastname", ',') AS "value""#
        );
    }

    #[test]
    fn emptied_column_is_unqualified() {
        let e = test_entity(&land());
        let c = ColumnExpr::new(&e, "total");
        c.empty();
        assert_eq!(c.render(), r#""total""#);
    }

    #[test]
    fn inline_comparison() {
        let e = test_entity(&land());
        let c = ColumnExpr::new(&e, "id");
        c.count().gt(5);
        assert_eq!(c.render(), r#"COUNT("t"."id") > 5"#);

        let c = ColumnExpr::new(&e, "active");
        c.eq(true).alias("is_active");
        assert_eq!(c.render(), r#""t"."active" = true AS "is_active""#);

        let c = ColumnExpr::new(&e, "name");
        c.ne("x");
        assert_eq!(c.render(), r#""t"."name" != 'x'"#);
    }

    #[test]
    fn webalized_column() {
        let e = test_entity(&land());
        let c = ColumnExpr::new(&e, "name");
        c.webalize().alias("slug");
        assert_eq!(c.render(), r#"LOWER(UNACCENT("t"."name")) AS "slug""#);
    }

    #[test]
    fn subquery_column() {
        let e = test_entity(&land());
        let mut sub = e.select();
        sub.column("id").max();
        sub.all();
        let c = ColumnExpr::new(&e, "ignored");
        c.subquery(&sub).alias("max_id");
        assert_eq!(
            c.render(),
            r#"(SELECT MAX("t"."id") FROM "tests" AS "t") AS "max_id""#
        );
    }

    #[test]
    fn columns_shorthand() {
        let e = test_entity(&land());
        let c = ColumnsExpr::new(&e, ["daar", "walker"]);
        assert_eq!(
            c.render_items(),
            vec![r#""t"."daar""#.to_string(), r#""t"."walker""#.to_string()]
        );
    }

    #[test]
    fn coalesce_columns_and_values() {
        let e = test_entity(&land());
        let c = CoalesceExpr::new(&e);
        c.columns(["name", "lastname"]).value("unknown").alias("label");
        assert_eq!(
            c.render(),
            r#"COALESCE("t"."name","t"."lastname",'unknown') AS "label""#
        );
        assert_eq!(CoalesceExpr::new(&e).render(), "");
    }
}
