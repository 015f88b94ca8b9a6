// ==========================================
// 餐厅 POS 后台 - 菜单分组 API
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::domain::menu::{MenuGroup, NewMenuGroup};
use crate::repository::menu_group_repo::MenuGroupStore;

/// 菜单分组目录
pub struct MenuGroupCatalog {
    menu_group_store: Arc<dyn MenuGroupStore>,
}

impl MenuGroupCatalog {
    pub fn new(menu_group_store: Arc<dyn MenuGroupStore>) -> Self {
        Self { menu_group_store }
    }

    pub fn create(&self, request: MenuGroupRequest) -> ApiResult<MenuGroupResponse> {
        let menu_group = NewMenuGroup::new(request.name)?;
        let saved = self.menu_group_store.save(&menu_group)?;
        tracing::info!(menu_group_id = saved.id, name = %saved.name, "菜单分组已创建");
        Ok(MenuGroupResponse::from(saved))
    }

    pub fn list(&self) -> ApiResult<Vec<MenuGroupResponse>> {
        let groups = self.menu_group_store.find_all()?;
        Ok(groups.into_iter().map(MenuGroupResponse::from).collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuGroupRequest {
    pub name: String,
}

impl MenuGroupRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuGroupResponse {
    pub id: i64,
    pub name: String,
}

impl From<MenuGroup> for MenuGroupResponse {
    fn from(group: MenuGroup) -> Self {
        Self {
            id: group.id,
            name: group.name,
        }
    }
}
