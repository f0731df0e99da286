pub mod tree;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::users::entities::User;
use crate::storage::Storage;

pub use tree::OrganizationTree;

pub struct OrganizationService {
    storage: Arc<dyn Storage>,
}

impl OrganizationService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 加载全部组织并构建树
    pub async fn load_tree(&self) -> Result<OrganizationTree> {
        let organizations = self.storage.list_organizations().await?;
        Ok(OrganizationTree::new(organizations))
    }

    /// 部门及其全部下级组织的成员
    pub async fn department_members(&self, department_id: i64) -> Result<Vec<User>> {
        let tree = self.load_tree().await?;
        let organization_ids = tree.descendants_of(department_id)?;
        self.storage
            .list_users_by_organizations(&organization_ids)
            .await
    }
}
