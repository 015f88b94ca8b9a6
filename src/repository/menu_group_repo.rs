// ==========================================
// 餐厅 POS 后台 - 菜单分组数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::menu::{MenuGroup, NewMenuGroup};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// MenuGroupStore Trait
// ==========================================
pub trait MenuGroupStore: Send + Sync {
    fn save(&self, menu_group: &NewMenuGroup) -> RepositoryResult<MenuGroup>;

    /// 菜单创建时的分组存在性校验
    fn exists_by_id(&self, id: i64) -> RepositoryResult<bool>;

    fn find_all(&self) -> RepositoryResult<Vec<MenuGroup>>;
}

// ==========================================
// MenuGroupRepository - 菜单分组仓储
// ==========================================
pub struct MenuGroupRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MenuGroupRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl MenuGroupStore for MenuGroupRepository {
    fn save(&self, menu_group: &NewMenuGroup) -> RepositoryResult<MenuGroup> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO menu_group (name) VALUES (?1)",
            params![menu_group.name()],
        )?;
        Ok(MenuGroup {
            id: conn.last_insert_rowid(),
            name: menu_group.name().to_string(),
        })
    }

    fn exists_by_id(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM menu_group WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn find_all(&self) -> RepositoryResult<Vec<MenuGroup>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM menu_group ORDER BY id ASC")?;
        let groups = stmt
            .query_map([], |row| {
                Ok(MenuGroup {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(groups)
    }
}
