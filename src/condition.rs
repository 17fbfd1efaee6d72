//! Condition：WHERE / HAVING 谓词树。
//!
//! 每个节点是一个共享句柄；`and` / `or` 收养子节点后，子节点被标记为"已收养"，
//! 语句顶层渲染时会跳过它们，避免同一谓词出现两次。

use crate::entity::Entity;
use crate::macros::{IntoConditions, collect_into_conditions};
use crate::select::SelectBuilder;
use crate::serializer::{RenderContext, render, render_unknown};
use crate::syntax::{qualify, strip_terminator, webalize};
use crate::value::SqlValue;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Equal,
    Contains,
    Like,
    Null,
    Fulltext,
}

impl ConditionKind {
    pub fn operator(self, negated: bool) -> &'static str {
        match (self, negated) {
            (Self::Equal, false) => "=",
            (Self::Equal, true) => "!=",
            (Self::Contains, false) => "IN",
            (Self::Contains, true) => "NOT IN",
            (Self::Like, false) => "LIKE",
            (Self::Like, true) => "NOT LIKE",
            (Self::Null, false) => "IS NULL",
            (Self::Null, true) => "IS NOT NULL",
            (Self::Fulltext, _) => "@@",
        }
    }
}

#[derive(Debug)]
struct ConditionNode {
    entity: Entity,
    kind: Option<ConditionKind>,
    column: Option<String>,
    value: SqlValue,
    subquery: Option<String>,
    and: Vec<Condition>,
    or: Vec<Condition>,
    adopted: bool,
    used: bool,
    negated: bool,
    webalize: bool,
}

#[derive(Debug, Clone)]
pub struct Condition {
    node: Rc<RefCell<ConditionNode>>,
}

impl Condition {
    pub fn new(entity: &Entity) -> Self {
        Self {
            node: Rc::new(RefCell::new(ConditionNode {
                entity: entity.clone(),
                kind: None,
                column: None,
                value: SqlValue::Null,
                subquery: None,
                and: Vec::new(),
                or: Vec::new(),
                adopted: false,
                used: true,
                negated: false,
                webalize: false,
            })),
        }
    }

    pub fn column(&self, name: impl Into<String>) -> &Self {
        self.node.borrow_mut().column = Some(name.into());
        self
    }

    pub fn equal(&self, value: impl Into<SqlValue>) -> &Self {
        self.set(ConditionKind::Equal, value.into())
    }

    pub fn contains(&self, value: impl Into<SqlValue>) -> &Self {
        self.set(ConditionKind::Contains, value.into())
    }

    pub fn like(&self, value: impl Into<SqlValue>) -> &Self {
        self.set(ConditionKind::Like, value.into())
    }

    pub fn null(&self) -> &Self {
        self.set(ConditionKind::Null, SqlValue::Null)
    }

    pub(crate) fn fulltext(&self, text: impl Into<String>) -> &Self {
        self.set(ConditionKind::Fulltext, SqlValue::from(text.into()))
    }

    fn set(&self, kind: ConditionKind, value: SqlValue) -> &Self {
        let mut node = self.node.borrow_mut();
        node.kind = Some(kind);
        node.value = value;
        drop(node);
        self
    }

    pub fn not(&self) -> &Self {
        self.node.borrow_mut().negated = true;
        self
    }

    /// 收养子条件，以 `AND` 连接。
    pub fn and(&self, conditions: impl IntoConditions) -> &Self {
        let children = adopt(conditions);
        self.node.borrow_mut().and.extend(children);
        self
    }

    /// 收养子条件，以 `OR` 连接。
    pub fn or(&self, conditions: impl IntoConditions) -> &Self {
        let children = adopt(conditions);
        self.node.borrow_mut().or.extend(children);
        self
    }

    /// 以子查询代替列谓词；子查询在调用时渲染。
    pub fn subquery(&self, query: &SelectBuilder) -> &Self {
        let sql = query.sql();
        self.node.borrow_mut().subquery = Some(strip_terminator(&sql).to_string());
        self
    }

    pub fn use_(&self, used: bool) -> &Self {
        self.node.borrow_mut().used = used;
        self
    }

    pub fn webalize(&self) -> &Self {
        self.node.borrow_mut().webalize = true;
        self
    }

    pub fn is_adopted(&self) -> bool {
        self.node.borrow().adopted
    }

    pub fn is_used(&self) -> bool {
        self.node.borrow().used
    }

    pub fn render(&self) -> String {
        let node = self.node.borrow();
        let grouped = !node.and.is_empty() || !node.or.is_empty();

        let mut parts: Vec<String> = Vec::new();
        if let Some(predicate) = node.predicate() {
            parts.push(predicate);
        }
        for (joiner, children) in [("AND", &node.and), ("OR", &node.or)] {
            for child in children {
                let sql = child.render();
                if sql.is_empty() {
                    continue;
                }
                if !parts.is_empty() {
                    parts.push(joiner.to_string());
                }
                parts.push(sql);
            }
        }

        let sql = parts.join(" ");
        if grouped && !sql.is_empty() {
            format!("({sql})")
        } else {
            sql
        }
    }
}

fn adopt(conditions: impl IntoConditions) -> Vec<Condition> {
    let children = collect_into_conditions(conditions);
    for child in &children {
        child.node.borrow_mut().adopted = true;
    }
    children
}

impl ConditionNode {
    /// 节点自身的谓词（不含子节点）。
    fn predicate(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(sub) = &self.subquery {
            parts.push(format!("({sub})"));
        } else if let Some(column) = &self.column {
            let col = qualify(self.entity.alias(), column);
            parts.push(if self.webalize { webalize(&col) } else { col });
        } else {
            return None;
        }
        if self.is_empty_contains() {
            if self.negated {
                // NOT IN 空集恒为真：整个谓词省略
                tracing::warn!(
                    column = ?self.column,
                    "empty list in NOT IN, condition dropped"
                );
                return None;
            }
            parts.push("IN (NULL)".to_string());
            return Some(parts.join(" "));
        }
        if let Some(kind) = self.kind {
            parts.push(kind.operator(self.negated).to_string());
            let value = self.value_sql(kind);
            if !value.is_empty() {
                parts.push(value);
            }
        }
        Some(parts.join(" "))
    }

    fn is_empty_contains(&self) -> bool {
        self.kind == Some(ConditionKind::Contains)
            && matches!(&self.value, SqlValue::List(items) if items.is_empty())
    }

    fn value_sql(&self, kind: ConditionKind) -> String {
        if kind == ConditionKind::Null {
            return String::new();
        }
        if let SqlValue::Safe(fragment) = &self.value {
            return fragment.to_string();
        }
        let column = self
            .column
            .as_deref()
            .and_then(|name| self.entity.column(name));
        let value = match (column, &self.subquery) {
            (None, None) => return String::new(),
            (None, Some(_)) => render_unknown(&self.value),
            (Some(column), _) => render(Some(column), &self.value, RenderContext::Where),
        };
        if value.is_empty() {
            return value;
        }
        let value = if self.webalize { webalize(&value) } else { value };
        if kind == ConditionKind::Contains {
            format!("({value})")
        } else {
            value
        }
    }
}

/// 渲染语句顶层的条件列表：第一个输出带 `keyword`，其后以 `AND` 连接；
/// 已收养或停用的条件跳过。
pub(crate) fn render_top_level(keyword: &str, conditions: &[Condition]) -> String {
    let mut parts = Vec::new();
    for cond in conditions {
        if cond.is_adopted() || !cond.is_used() {
            continue;
        }
        let sql = cond.render();
        if sql.is_empty() {
            continue;
        }
        let joiner = if parts.is_empty() { keyword } else { "AND" };
        parts.push(joiner.to_string());
        parts.push(sql);
    }
    parts.join(" ")
}
