//! JOIN 子句。

use crate::column::ID;
use crate::entity::Entity;
use crate::syntax::qualify;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Left,
    Right,
    Inner,
}

impl JoinKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Inner => "INNER",
        }
    }
}

#[derive(Debug)]
struct JoinNode {
    kind: JoinKind,
    entity: Entity,
    column: String,
    target: Option<(Entity, String)>,
}

/// JOIN 句柄：默认 LEFT JOIN，两侧默认用 `id` 列关联。
#[derive(Debug, Clone)]
pub struct Join {
    node: Rc<RefCell<JoinNode>>,
}

impl Join {
    pub fn new(entity: &Entity) -> Self {
        Self {
            node: Rc::new(RefCell::new(JoinNode {
                kind: JoinKind::Left,
                entity: entity.clone(),
                column: ID.to_string(),
                target: None,
            })),
        }
    }

    pub fn left(&self) -> &Self {
        self.node.borrow_mut().kind = JoinKind::Left;
        self
    }

    pub fn right(&self) -> &Self {
        self.node.borrow_mut().kind = JoinKind::Right;
        self
    }

    pub fn inner(&self) -> &Self {
        self.node.borrow_mut().kind = JoinKind::Inner;
        self
    }

    /// 替换 ON 左侧的实体。
    pub fn entity(&self, entity: &Entity) -> &Self {
        self.node.borrow_mut().entity = entity.clone();
        self
    }

    /// ON 左侧的列。
    pub fn column(&self, column: impl Into<String>) -> &Self {
        self.node.borrow_mut().column = column.into();
        self
    }

    /// 关联目标实体，右侧列为 `id`。
    pub fn on(&self, entity: &Entity) -> &Self {
        self.on_column(entity, ID)
    }

    pub fn on_column(&self, entity: &Entity, column: impl Into<String>) -> &Self {
        self.node.borrow_mut().target = Some((entity.clone(), column.into()));
        self
    }

    /// 未调用 `on` 时渲染为空串。
    pub fn render(&self) -> String {
        let node = self.node.borrow();
        let Some((target, target_column)) = &node.target else {
            return String::new();
        };
        let mut parts = vec![node.kind.as_str(), "JOIN", target.name()];
        if let Some(alias) = target.alias() {
            parts.extend(["AS", alias]);
        }
        format!(
            "{} ON {} = {}",
            parts.join(" "),
            qualify(node.entity.alias(), &node.column),
            qualify(target.alias(), target_column)
        )
    }
}
