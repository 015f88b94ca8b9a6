// ==========================================
// 餐厅 POS 后台 - 餐桌数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::table::{DiningTable, NewDiningTable};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sql_utils::in_placeholders;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

const SELECT_COLUMNS: &str = "SELECT id, table_group_id, number_of_guests, empty FROM dining_table";

// ==========================================
// DiningTableStore Trait
// ==========================================
pub trait DiningTableStore: Send + Sync {
    fn save(&self, table: &NewDiningTable) -> RepositoryResult<DiningTable>;

    /// 整行覆盖更新（桌组ID / 客人数 / 占用标志）
    fn update(&self, table: &DiningTable) -> RepositoryResult<DiningTable>;

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<DiningTable>>;

    fn find_all(&self) -> RepositoryResult<Vec<DiningTable>>;

    /// 批量按 ID 查询（重复 ID 只返回一行）
    fn find_all_by_id_in(&self, ids: &[i64]) -> RepositoryResult<Vec<DiningTable>>;

    /// 查询桌组成员
    fn find_all_by_table_group_id(&self, table_group_id: i64) -> RepositoryResult<Vec<DiningTable>>;
}

// ==========================================
// DiningTableRepository - 餐桌仓储
// ==========================================
pub struct DiningTableRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DiningTableRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<DiningTable> {
        Ok(DiningTable {
            id: row.get(0)?,
            table_group_id: row.get(1)?,
            number_of_guests: row.get(2)?,
            empty: row.get(3)?,
        })
    }
}

impl DiningTableStore for DiningTableRepository {
    fn save(&self, table: &NewDiningTable) -> RepositoryResult<DiningTable> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO dining_table (table_group_id, number_of_guests, empty) VALUES (NULL, ?1, ?2)",
            params![table.number_of_guests(), table.empty()],
        )?;
        Ok(table.into_table(conn.last_insert_rowid()))
    }

    fn update(&self, table: &DiningTable) -> RepositoryResult<DiningTable> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE dining_table
            SET table_group_id = ?2, number_of_guests = ?3, empty = ?4
            WHERE id = ?1
            "#,
            params![
                table.id,
                table.table_group_id,
                table.number_of_guests,
                table.empty
            ],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "DiningTable".to_string(),
                id: table.id.to_string(),
            });
        }
        Ok(table.clone())
    }

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<DiningTable>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let table = conn
            .query_row(&sql, params![id], Self::map_row)
            .optional()?;
        Ok(table)
    }

    fn find_all(&self) -> RepositoryResult<Vec<DiningTable>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY id ASC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let tables = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(tables)
    }

    fn find_all_by_id_in(&self, ids: &[i64]) -> RepositoryResult<Vec<DiningTable>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE id IN ({}) ORDER BY id ASC",
            SELECT_COLUMNS,
            in_placeholders(ids.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let tables = stmt
            .query_map(params_from_iter(ids.iter()), Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(tables)
    }

    fn find_all_by_table_group_id(&self, table_group_id: i64) -> RepositoryResult<Vec<DiningTable>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE table_group_id = ?1 ORDER BY id ASC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let tables = stmt
            .query_map(params![table_group_id], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(tables)
    }
}
