//! GROUP BY 子句。

use crate::entity::Entity;
use crate::macros::{IntoStrings, collect_into_strings};
use crate::syntax::{COLUMNS_DIVIDER, qualify};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
struct GroupNode {
    entity: Entity,
    columns: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Group {
    node: Rc<RefCell<GroupNode>>,
}

impl Group {
    pub fn new(entity: &Entity) -> Self {
        Self {
            node: Rc::new(RefCell::new(GroupNode {
                entity: entity.clone(),
                columns: Vec::new(),
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

    pub fn render(&self) -> String {
        let node = self.node.borrow();
        node.columns
            .iter()
            .map(|c| qualify(node.entity.alias(), c))
            .collect::<Vec<_>>()
            .join(COLUMNS_DIVIDER)
    }
}
