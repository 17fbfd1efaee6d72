//! ORDER BY 子句。
//!
//! 排序键统一转 snake_case，方向统一大写。动态排序项（来自 `Param`）不直接引用实体，
//! 而是按名字匹配 SELECT 列表里已登记的列；匹配不到就不输出。

use crate::column_expr::SelectItem;
use crate::entity::Entity;
use crate::syntax::{COLUMNS_DIVIDER, escape, qualify};
use heck::ToSnakeCase;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// 大小写不敏感地解析 `asc` / `desc`。
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// 外部传入的排序参数（如分页请求）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderParam {
    pub key: String,
    pub direction: String,
}

impl OrderParam {
    pub fn new(key: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: direction.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderEntry {
    key: String,
    direction: Direction,
    dynamic: bool,
}

impl OrderEntry {
    fn new(key: &str, direction: Direction, dynamic: bool) -> Self {
        Self {
            key: key.to_snake_case(),
            direction,
            dynamic,
        }
    }

    /// 方向无法识别的参数被丢弃。
    pub(crate) fn from_param(param: &OrderParam, dynamic: bool) -> Option<Self> {
        match Direction::parse(&param.direction) {
            Some(direction) => Some(Self::new(&param.key, direction, dynamic)),
            None => {
                tracing::warn!(
                    key = %param.key,
                    direction = %param.direction,
                    "unknown order direction, entry dropped"
                );
                None
            }
        }
    }
}

#[derive(Debug)]
struct OrderNode {
    entity: Entity,
    entries: Vec<OrderEntry>,
}

#[derive(Debug, Clone)]
pub struct Order {
    node: Rc<RefCell<OrderNode>>,
}

impl Order {
    pub fn new(entity: &Entity) -> Self {
        Self::with_entries(entity, Vec::new())
    }

    pub(crate) fn with_entries(entity: &Entity, entries: Vec<OrderEntry>) -> Self {
        Self {
            node: Rc::new(RefCell::new(OrderNode {
                entity: entity.clone(),
                entries,
            })),
        }
    }

    pub fn asc(&self, key: &str) -> &Self {
        self.push(OrderEntry::new(key, Direction::Asc, false))
    }

    pub fn desc(&self, key: &str) -> &Self {
        self.push(OrderEntry::new(key, Direction::Desc, false))
    }

    pub fn slice(&self, params: impl IntoIterator<Item = OrderParam>) -> &Self {
        for p in params {
            if let Some(entry) = OrderEntry::from_param(&p, false) {
                self.push(entry);
            }
        }
        self
    }

    pub fn entity(&self, entity: &Entity) -> &Self {
        self.node.borrow_mut().entity = entity.clone();
        self
    }

    fn push(&self, entry: OrderEntry) -> &Self {
        self.node.borrow_mut().entries.push(entry);
        self
    }

    pub(crate) fn render(&self, items: &[SelectItem]) -> String {
        let node = self.node.borrow();
        let mut out = Vec::new();
        for entry in &node.entries {
            if entry.dynamic {
                out.extend(resolve_dynamic(entry, items));
            } else {
                out.push(order_sql(node.entity.alias(), entry));
            }
        }
        out.join(COLUMNS_DIVIDER)
    }
}

fn order_sql(alias: Option<&str>, entry: &OrderEntry) -> String {
    format!("{} {}", qualify(alias, &entry.key), entry.direction.as_str())
}

fn resolve_dynamic(entry: &OrderEntry, items: &[SelectItem]) -> Vec<String> {
    let mut out = Vec::new();
    for item in items {
        match item {
            SelectItem::Columns(c) if c.declares(&entry.key) => {
                out.push(order_sql(c.entity_alias().as_deref(), entry));
            }
            SelectItem::Column(c) if c.name() == entry.key => {
                out.push(order_sql(c.entity_alias().as_deref(), entry));
            }
            SelectItem::Column(c) if c.alias_name().as_deref() == Some(entry.key.as_str()) => {
                out.push(format!("{} {}", escape(&entry.key), entry.direction.as_str()));
            }
            _ => {}
        }
    }
    out
}
