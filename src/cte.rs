//! WITH 子句中的单个公用表表达式。

use crate::select::SelectBuilder;
use crate::syntax::strip_terminator;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
struct WithNode {
    name: String,
    query: Option<String>,
}

/// `name AS (SELECT ...)`；查询在调用 `query` 时渲染。
#[derive(Debug, Clone)]
pub struct With {
    node: Rc<RefCell<WithNode>>,
}

impl With {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            node: Rc::new(RefCell::new(WithNode {
                name: name.into(),
                query: None,
            })),
        }
    }

    pub fn name(&self, name: impl Into<String>) -> &Self {
        self.node.borrow_mut().name = name.into();
        self
    }

    pub fn query(&self, query: &SelectBuilder) -> &Self {
        let sql = query.sql();
        self.node.borrow_mut().query = Some(strip_terminator(&sql).to_string());
        self
    }

    pub fn render(&self) -> String {
        let node = self.node.borrow();
        match &node.query {
            Some(query) if !node.name.is_empty() => format!("{} AS ({query})", node.name),
            _ => String::new(),
        }
    }
}
