//! SelectBuilder：构建 SELECT 语句。
//!
//! 子句顺序固定为 WITH → SELECT [DISTINCT] → FROM → JOIN → WHERE → GROUP BY → HAVING
//! → ORDER BY → LIMIT → OFFSET。渲染不修改 builder 状态，可重复调用。

use crate::column::VECTORS;
use crate::column_expr::{CoalesceExpr, ColumnExpr, ColumnsExpr, SelectItem};
use crate::condition::{Condition, render_top_level};
use crate::cte::With;
use crate::entity::Entity;
use crate::error::Error;
use crate::executor::{self, Context, QueryKind};
use crate::group::Group;
use crate::join::Join;
use crate::macros::IntoStrings;
use crate::order::{Order, OrderEntry, OrderParam};
use crate::record::Destination;
use crate::string_builder::{StringBuilder, join_non_empty};
use crate::syntax::{COLUMNS_DIVIDER, TERMINATOR, escape, strip_terminator};

/// 未显式设置时的 LIMIT。
pub const DEFAULT_LIMIT: u64 = 20;

/// 分页 / 检索参数，通常来自外部请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub fulltext: String,
    pub offset: u64,
    pub limit: u64,
    pub order: Vec<OrderParam>,
    pub all: bool,
}

impl Default for Param {
    fn default() -> Self {
        Self {
            fulltext: String::new(),
            offset: 0,
            limit: DEFAULT_LIMIT,
            order: Vec::new(),
            all: false,
        }
    }
}

#[derive(Debug)]
pub struct SelectBuilder {
    entity: Entity,
    distinct: bool,
    exists: bool,
    items: Vec<SelectItem>,
    ctes: Vec<With>,
    joins: Vec<Join>,
    wheres: Vec<Condition>,
    groups: Vec<Group>,
    havings: Vec<Condition>,
    orders: Vec<Order>,
    param_order: Option<Order>,
    fulltext: String,
    offset: u64,
    limit: u64,
    all: bool,
}

impl SelectBuilder {
    pub fn new(entity: &Entity) -> Self {
        Self {
            entity: entity.clone(),
            distinct: false,
            exists: false,
            items: Vec::new(),
            ctes: Vec::new(),
            joins: Vec::new(),
            wheres: Vec::new(),
            groups: Vec::new(),
            havings: Vec::new(),
            orders: Vec::new(),
            param_order: None,
            fulltext: String::new(),
            offset: 0,
            limit: DEFAULT_LIMIT,
            all: false,
        }
    }

    /// 登记一个单列表达式，返回其句柄供继续配置。
    pub fn column(&mut self, name: impl Into<String>) -> ColumnExpr {
        let c = ColumnExpr::new(&self.entity, name);
        self.items.push(SelectItem::Column(c.clone()));
        c
    }

    pub fn columns(&mut self, columns: impl IntoStrings) -> ColumnsExpr {
        let c = ColumnsExpr::new(&self.entity, columns);
        self.items.push(SelectItem::Columns(c.clone()));
        c
    }

    pub fn coalesce(&mut self) -> CoalesceExpr {
        let c = CoalesceExpr::new(&self.entity);
        self.items.push(SelectItem::Coalesce(c.clone()));
        c
    }

    pub fn with(&mut self, name: impl Into<String>) -> With {
        let w = With::new(name);
        self.ctes.push(w.clone());
        w
    }

    pub fn join(&mut self) -> Join {
        let entity = self.entity.clone();
        self.join_from(&entity)
    }

    /// 以 `entity` 为左侧实体的 JOIN。
    pub fn join_from(&mut self, entity: &Entity) -> Join {
        let j = Join::new(entity);
        self.joins.push(j.clone());
        j
    }

    pub fn where_(&mut self) -> Condition {
        let entity = self.entity.clone();
        self.where_for(&entity)
    }

    pub fn where_for(&mut self, entity: &Entity) -> Condition {
        let c = Condition::new(entity);
        self.wheres.push(c.clone());
        c
    }

    pub fn having(&mut self) -> Condition {
        let entity = self.entity.clone();
        self.having_for(&entity)
    }

    pub fn having_for(&mut self, entity: &Entity) -> Condition {
        let c = Condition::new(entity);
        self.havings.push(c.clone());
        c
    }

    pub fn group(&mut self) -> Group {
        let entity = self.entity.clone();
        self.group_for(&entity)
    }

    pub fn group_for(&mut self, entity: &Entity) -> Group {
        let g = Group::new(entity);
        self.groups.push(g.clone());
        g
    }

    pub fn order(&mut self) -> Order {
        let entity = self.entity.clone();
        self.order_for(&entity)
    }

    pub fn order_for(&mut self, entity: &Entity) -> Order {
        let o = Order::new(entity);
        self.orders.push(o.clone());
        o
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    /// 对主实体的 `vectors` 列追加全文条件（渲染时生成）。
    pub fn fulltext(&mut self, text: impl Into<String>) -> &mut Self {
        self.fulltext = text.into();
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = offset;
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = limit;
        self
    }

    /// 不输出 LIMIT。
    pub fn all(&mut self) -> &mut Self {
        self.all = true;
        self
    }

    pub fn single(&mut self) -> &mut Self {
        self.limit(1)
    }

    /// 整体替换分页参数；其中的排序项按名字匹配已登记的列。
    pub fn param(&mut self, param: Param) -> &mut Self {
        self.fulltext = param.fulltext;
        self.offset = param.offset;
        self.limit = param.limit;
        self.all = param.all;
        let entries = param
            .order
            .iter()
            .filter_map(|p| OrderEntry::from_param(p, true))
            .collect();
        self.param_order = Some(Order::with_entries(&self.entity, entries));
        self
    }

    /// 改为 `SELECT EXISTS(...)`，结果为单个布尔值。
    pub fn exists(&mut self) -> &mut Self {
        self.exists = true;
        self
    }

    pub fn sql(&self) -> String {
        let query = self.render();
        if self.exists {
            format!("SELECT EXISTS({}){TERMINATOR}", strip_terminator(&query))
        } else {
            query + TERMINATOR
        }
    }

    pub fn exec(&self, ctx: &Context) -> Result<u64, Error> {
        executor::execute(&self.entity, ctx, QueryKind::Select, &self.sql())
    }

    pub fn get_result<D: Destination + ?Sized>(
        &self,
        ctx: &Context,
        dest: &mut D,
    ) -> Result<(), Error> {
        executor::fetch(&self.entity, ctx, QueryKind::Select, &self.sql(), dest)
    }

    fn render(&self) -> String {
        let mut buf = StringBuilder::new();

        let ctes: Vec<String> = self.ctes.iter().map(With::render).collect();
        buf.write_clause("WITH", &ctes, COLUMNS_DIVIDER);

        buf.write_leading("SELECT");
        if self.distinct {
            buf.write_leading("DISTINCT");
        }
        let columns: Vec<String> = self.items.iter().flat_map(SelectItem::render_items).collect();
        let columns = join_non_empty(&columns, COLUMNS_DIVIDER);
        buf.write_leading(if columns.is_empty() { "*" } else { &columns });

        buf.write_leading("FROM");
        buf.write_leading(&escape(self.entity.name()));
        if let Some(alias) = self.entity.alias() {
            buf.write_leading("AS");
            buf.write_leading(&escape(alias));
        }

        for join in &self.joins {
            buf.write_leading(&join.render());
        }

        let wheres = self.conditions_with_fulltext();
        buf.write_leading(&render_top_level("WHERE", &wheres));

        let groups: Vec<String> = self.groups.iter().map(Group::render).collect();
        buf.write_clause("GROUP BY", &groups, COLUMNS_DIVIDER);

        buf.write_leading(&render_top_level("HAVING", &self.havings));

        let orders: Vec<String> = self
            .orders
            .iter()
            .chain(self.param_order.iter())
            .map(|o| o.render(&self.items))
            .collect();
        buf.write_clause("ORDER BY", &orders, COLUMNS_DIVIDER);

        if !self.all && self.limit > 0 {
            buf.write_leading(&format!("LIMIT {}", self.limit));
        }
        if self.offset > 0 {
            buf.write_leading(&format!("OFFSET {}", self.offset));
        }

        buf.into_string()
    }

    fn conditions_with_fulltext(&self) -> Vec<Condition> {
        let mut wheres = self.wheres.clone();
        if self.fulltext.is_empty() {
            return wheres;
        }
        if self.entity.column(VECTORS).is_none() {
            tracing::warn!(
                entity = self.entity.name(),
                "fulltext requested on entity without vectors column"
            );
            return wheres;
        }
        let cond = Condition::new(&self.entity);
        cond.column(VECTORS).fulltext(self.fulltext.clone());
        wheres.push(cond);
        wheres
    }
}
