// ==========================================
// 餐厅 POS 后台 - 桌组数据仓储
// ==========================================
// 说明: 桌组记录只增不删，解散只解除成员关系
// ==========================================

use crate::domain::table::TableGroup;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// TableGroupStore Trait
// ==========================================
pub trait TableGroupStore: Send + Sync {
    /// 保存桌组，返回成员为空的实体
    fn save(&self, created_date: NaiveDateTime) -> RepositoryResult<TableGroup>;

    /// 按 ID 查询（成员为空，需另行装配）
    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<TableGroup>>;
}

// ==========================================
// TableGroupRepository - 桌组仓储
// ==========================================
pub struct TableGroupRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TableGroupRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl TableGroupStore for TableGroupRepository {
    fn save(&self, created_date: NaiveDateTime) -> RepositoryResult<TableGroup> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO table_group (created_date) VALUES (?1)",
            params![created_date],
        )?;
        Ok(TableGroup {
            id: conn.last_insert_rowid(),
            created_date,
            order_tables: Vec::new(),
        })
    }

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<TableGroup>> {
        let conn = self.get_conn()?;
        let group = conn
            .query_row(
                "SELECT id, created_date FROM table_group WHERE id = ?1",
                params![id],
                |row| {
                    Ok(TableGroup {
                        id: row.get(0)?,
                        created_date: row.get(1)?,
                        order_tables: Vec::new(),
                    })
                },
            )
            .optional()?;
        Ok(group)
    }
}
