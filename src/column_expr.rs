//! 列表达式：SELECT 列表里的单列 / 聚合 / 子查询列、多列简写，以及 COALESCE。

use crate::entity::Entity;
use crate::macros::{IntoStrings, collect_into_strings};
use crate::select::SelectBuilder;
use crate::serializer::{RenderContext, quote_literal, render, render_unknown};
use crate::syntax::{COLUMNS_DIVIDER, escape, qualify, strip_terminator, webalize};
use crate::value::SqlValue;
use std::cell::RefCell;
use std::rc::Rc;

/// 聚合函数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Avg,
    Count,
    Sum,
    Min,
    Max,
    ArrayAgg,
    Length,
    StringAgg,
}

impl Aggregate {
    fn as_str(self) -> &'static str {
        match self {
            Self::Avg => "AVG",
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::ArrayAgg => "ARRAY_AGG",
            Self::Length => "LENGTH",
            Self::StringAgg => "STRING_AGG",
        }
    }
}

/// 列表达式后的行内比较。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Lt,
    Gte,
    Lte,
    Eq,
    Ne,
}

impl Comparison {
    fn as_str(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Eq => "=",
            Self::Ne => "!=",
        }
    }
}

#[derive(Debug)]
struct ColumnNode {
    entity: Option<Entity>,
    name: String,
    alias: Option<String>,
    subquery: Option<String>,
    aggregate: Option<Aggregate>,
    siblings: Vec<ColumnExpr>,
    separator: String,
    comparison: Option<(Comparison, SqlValue)>,
    webalize: bool,
    used: bool,
}

/// 单列表达式句柄。
#[derive(Debug, Clone)]
pub struct ColumnExpr {
    node: Rc<RefCell<ColumnNode>>,
}

impl ColumnExpr {
    pub fn new(entity: &Entity, name: impl Into<String>) -> Self {
        Self::build(Some(entity.clone()), name.into())
    }

    /// 不绑定实体的分隔符常量，用作 STRING_AGG 的参数（渲染为 `'sep'`）。
    pub fn literal(separator: impl Into<String>) -> Self {
        let c = Self::build(None, String::new());
        c.separator(separator);
        c
    }

    fn build(entity: Option<Entity>, name: String) -> Self {
        Self {
            node: Rc::new(RefCell::new(ColumnNode {
                entity,
                name,
                alias: None,
                subquery: None,
                aggregate: None,
                siblings: Vec::new(),
                separator: String::new(),
                comparison: None,
                webalize: false,
                used: true,
            })),
        }
    }

    /// 解除实体绑定。
    pub fn empty(&self) -> &Self {
        self.node.borrow_mut().entity = None;
        self
    }

    pub fn entity(&self, entity: &Entity) -> &Self {
        self.node.borrow_mut().entity = Some(entity.clone());
        self
    }

    pub fn alias(&self, alias: impl Into<String>) -> &Self {
        self.node.borrow_mut().alias = Some(alias.into());
        self
    }

    pub fn use_(&self, used: bool) -> &Self {
        self.node.borrow_mut().used = used;
        self
    }

    pub fn avg(&self) -> &Self {
        self.aggregate(Aggregate::Avg)
    }

    pub fn count(&self) -> &Self {
        self.aggregate(Aggregate::Count)
    }

    pub fn sum(&self) -> &Self {
        self.aggregate(Aggregate::Sum)
    }

    pub fn min(&self) -> &Self {
        self.aggregate(Aggregate::Min)
    }

    pub fn max(&self) -> &Self {
        self.aggregate(Aggregate::Max)
    }

    pub fn array_agg(&self) -> &Self {
        self.aggregate(Aggregate::ArrayAgg)
    }

    pub fn length(&self) -> &Self {
        self.aggregate(Aggregate::Length)
    }

    /// `STRING_AGG(self || sibling || ..., 'separator')`。
    pub fn string_agg(&self, siblings: impl IntoIterator<Item = ColumnExpr>) -> &Self {
        let mut node = self.node.borrow_mut();
        node.aggregate = Some(Aggregate::StringAgg);
        node.siblings.extend(siblings);
        drop(node);
        self
    }

    pub fn aggregate(&self, aggregate: Aggregate) -> &Self {
        self.node.borrow_mut().aggregate = Some(aggregate);
        self
    }

    pub fn subquery(&self, query: &SelectBuilder) -> &Self {
        let sql = query.sql();
        self.node.borrow_mut().subquery = Some(strip_terminator(&sql).to_string());
        self
    }

    pub fn separator(&self, separator: impl Into<String>) -> &Self {
        self.node.borrow_mut().separator = separator.into();
        self
    }

    pub fn compare(&self, op: Comparison, value: impl Into<SqlValue>) -> &Self {
        self.node.borrow_mut().comparison = Some((op, value.into()));
        self
    }

    pub fn gt(&self, value: impl Into<SqlValue>) -> &Self {
        self.compare(Comparison::Gt, value)
    }

    pub fn lt(&self, value: impl Into<SqlValue>) -> &Self {
        self.compare(Comparison::Lt, value)
    }

    pub fn gte(&self, value: impl Into<SqlValue>) -> &Self {
        self.compare(Comparison::Gte, value)
    }

    pub fn lte(&self, value: impl Into<SqlValue>) -> &Self {
        self.compare(Comparison::Lte, value)
    }

    pub fn eq(&self, value: impl Into<SqlValue>) -> &Self {
        self.compare(Comparison::Eq, value)
    }

    pub fn ne(&self, value: impl Into<SqlValue>) -> &Self {
        self.compare(Comparison::Ne, value)
    }

    pub fn webalize(&self) -> &Self {
        self.node.borrow_mut().webalize = true;
        self
    }

    pub fn is_used(&self) -> bool {
        self.node.borrow().used
    }

    pub(crate) fn name(&self) -> String {
        self.node.borrow().name.clone()
    }

    pub(crate) fn alias_name(&self) -> Option<String> {
        self.node.borrow().alias.clone()
    }

    pub(crate) fn entity_alias(&self) -> Option<String> {
        let node = self.node.borrow();
        node.entity
            .as_ref()
            .and_then(|e| e.alias().map(str::to_string))
    }

    pub fn render(&self) -> String {
        let node = self.node.borrow();
        if node.entity.is_none() && !node.separator.is_empty() {
            return quote_literal(&node.separator);
        }

        let mut col = match &node.subquery {
            Some(sub) => format!("({sub})"),
            None => match &node.entity {
                Some(entity) => qualify(entity.alias(), &node.name),
                None => escape(&node.name),
            },
        };
        if let Some(aggregate) = node.aggregate {
            col = node.wrap_aggregate(aggregate, col);
        }
        if node.webalize {
            col = webalize(&col);
        }
        if let Some((op, value)) = &node.comparison {
            let literal = node.comparison_literal(value);
            if !literal.is_empty() {
                col = format!("{col} {} {literal}", op.as_str());
            }
        }
        match &node.alias {
            Some(alias) => format!("{col} AS {}", escape(alias)),
            None => col,
        }
    }
}

impl ColumnNode {
    fn wrap_aggregate(&self, aggregate: Aggregate, col: String) -> String {
        if aggregate != Aggregate::StringAgg {
            return format!("{}({col})", aggregate.as_str());
        }
        let mut items = vec![col];
        items.extend(self.siblings.iter().map(ColumnExpr::render));
        format!(
            "STRING_AGG({}, {})",
            items.join(" || "),
            quote_literal(&self.separator)
        )
    }

    fn comparison_literal(&self, value: &SqlValue) -> String {
        // 聚合结果的类型与列类型无关，按值自身渲染
        let column = match (&self.entity, self.aggregate) {
            (Some(entity), None) => entity.column(&self.name),
            _ => None,
        };
        match column {
            Some(column) => render(Some(column), value, RenderContext::Where),
            None => render_unknown(value),
        }
    }
}

/// 多列简写：`"t"."a","t"."b"`。
#[derive(Debug, Clone)]
pub struct ColumnsExpr {
    node: Rc<RefCell<ColumnsNode>>,
}

#[derive(Debug)]
struct ColumnsNode {
    entity: Entity,
    columns: Vec<String>,
    used: bool,
}

impl ColumnsExpr {
    pub fn new(entity: &Entity, columns: impl IntoStrings) -> Self {
        Self {
            node: Rc::new(RefCell::new(ColumnsNode {
                entity: entity.clone(),
                columns: collect_into_strings(columns),
                used: true,
            })),
        }
    }

    pub fn entity(&self, entity: &Entity) -> &Self {
        self.node.borrow_mut().entity = entity.clone();
        self
    }

    pub fn use_(&self, used: bool) -> &Self {
        self.node.borrow_mut().used = used;
        self
    }

    pub fn is_used(&self) -> bool {
        self.node.borrow().used
    }

    pub(crate) fn declares(&self, column: &str) -> bool {
        self.node.borrow().columns.iter().any(|c| c == column)
    }

    pub(crate) fn entity_alias(&self) -> Option<String> {
        self.node.borrow().entity.alias().map(str::to_string)
    }

    pub fn render_items(&self) -> Vec<String> {
        let node = self.node.borrow();
        node.columns
            .iter()
            .map(|c| qualify(node.entity.alias(), c))
            .collect()
    }
}

/// `COALESCE(列..., 值...) [AS "alias"]`。
#[derive(Debug, Clone)]
pub struct CoalesceExpr {
    node: Rc<RefCell<CoalesceNode>>,
}

#[derive(Debug)]
struct CoalesceNode {
    entity: Entity,
    columns: Vec<String>,
    values: Vec<SqlValue>,
    alias: Option<String>,
    used: bool,
}

impl CoalesceExpr {
    pub fn new(entity: &Entity) -> Self {
        Self {
            node: Rc::new(RefCell::new(CoalesceNode {
                entity: entity.clone(),
                columns: Vec::new(),
                values: Vec::new(),
                alias: None,
                used: true,
            })),
        }
    }

    pub fn columns(&self, columns: impl IntoStrings) -> &Self {
        self.node
            .borrow_mut()
            .columns
            .extend(collect_into_strings(columns));
        self
    }

    pub fn value(&self, value: impl Into<SqlValue>) -> &Self {
        self.node.borrow_mut().values.push(value.into());
        self
    }

    pub fn entity(&self, entity: &Entity) -> &Self {
        self.node.borrow_mut().entity = entity.clone();
        self
    }

    pub fn alias(&self, alias: impl Into<String>) -> &Self {
        self.node.borrow_mut().alias = Some(alias.into());
        self
    }

    pub fn use_(&self, used: bool) -> &Self {
        self.node.borrow_mut().used = used;
        self
    }

    pub fn is_used(&self) -> bool {
        self.node.borrow().used
    }

    pub fn render(&self) -> String {
        let node = self.node.borrow();
        let mut args: Vec<String> = node
            .columns
            .iter()
            .map(|c| qualify(node.entity.alias(), c))
            .collect();
        args.extend(node.values.iter().map(render_unknown));
        if args.is_empty() {
            return String::new();
        }
        let sql = format!("COALESCE({})", args.join(COLUMNS_DIVIDER));
        match &node.alias {
            Some(alias) => format!("{sql} AS {}", escape(alias)),
            None => sql,
        }
    }
}

/// SELECT 列表中的一项。
#[derive(Debug, Clone)]
pub(crate) enum SelectItem {
    Columns(ColumnsExpr),
    Column(ColumnExpr),
    Coalesce(CoalesceExpr),
}

impl SelectItem {
    pub(crate) fn render_items(&self) -> Vec<String> {
        match self {
            Self::Columns(c) if c.is_used() => c.render_items(),
            Self::Column(c) if c.is_used() => vec![c.render()],
            Self::Coalesce(c) if c.is_used() => vec![c.render()],
            _ => Vec::new(),
        }
    }
}
