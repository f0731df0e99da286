//! 组织树
//!
//! 组织以 parent_id 指针存储。这里把它们放进一个扁平的 arena，
//! 按索引记录子节点，下级查询用显式栈迭代完成。

use std::collections::HashMap;

use crate::errors::{EvaluationError, Result};
use crate::models::organizations::entities::Organization;

#[derive(Debug, Clone)]
pub struct OrganizationTree {
    nodes: Vec<Organization>,
    index: HashMap<i64, usize>,
    children: Vec<Vec<usize>>,
}

impl OrganizationTree {
    pub fn new(organizations: Vec<Organization>) -> Self {
        let index: HashMap<i64, usize> = organizations
            .iter()
            .enumerate()
            .map(|(i, org)| (org.id, i))
            .collect();

        let mut children = vec![Vec::new(); organizations.len()];
        for (i, org) in organizations.iter().enumerate() {
            // 指向不存在组织的 parent_id 视为顶层
            if let Some(&parent) = org.parent_id.and_then(|pid| index.get(&pid)) {
                children[parent].push(i);
            }
        }

        Self {
            nodes: organizations,
            index,
            children,
        }
    }

    /// 根组织及其全部下级组织的 ID（根在首位）
    ///
    /// 根不存在时返回 `DepartmentNotFound`；遍历中重复访问到同一节点说明
    /// parent 指针成环，返回 `OrganizationCycle`。
    pub fn descendants_of(&self, root_id: i64) -> Result<Vec<i64>> {
        let &root = self.index.get(&root_id).ok_or_else(|| {
            EvaluationError::department_not_found(format!("部门不存在: {root_id}"))
        })?;

        let mut visited = vec![false; self.nodes.len()];
        let mut result = Vec::new();
        let mut stack = vec![root];

        while let Some(current) = stack.pop() {
            if visited[current] {
                return Err(EvaluationError::organization_cycle(format!(
                    "组织 {} 的上下级关系存在环",
                    self.nodes[current].id
                )));
            }
            visited[current] = true;
            result.push(self.nodes[current].id);
            stack.extend(self.children[current].iter().rev().copied());
        }

        Ok(result)
    }
}
