// ==========================================
// 餐厅 POS 后台 - 菜单数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: menu 与 menu_product 分开仓储，菜单行的装配由 API 层显式完成
// ==========================================

use crate::domain::menu::{Menu, MenuProduct, NewMenu, NewMenuProduct};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sql_utils::{in_placeholders, price_to_sql, read_price};
use rusqlite::{params, params_from_iter, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// MenuStore Trait
// ==========================================
pub trait MenuStore: Send + Sync {
    /// 保存菜单头（不含菜单行）
    fn save(&self, menu: &NewMenu) -> RepositoryResult<Menu>;

    /// 查询全部菜单头（菜单行为空，需另行装配）
    fn find_all(&self) -> RepositoryResult<Vec<Menu>>;

    /// 统计给定 ID 中实际存在的菜单数量（重复 ID 只计一次）
    fn count_by_id_in(&self, ids: &[i64]) -> RepositoryResult<usize>;
}

// ==========================================
// MenuProductStore Trait
// ==========================================
pub trait MenuProductStore: Send + Sync {
    /// 保存菜单行，返回带序号的实体
    fn save(&self, menu_id: i64, menu_product: &NewMenuProduct) -> RepositoryResult<MenuProduct>;

    /// 按菜单查询菜单行（按序号升序）
    fn find_all_by_menu_id(&self, menu_id: i64) -> RepositoryResult<Vec<MenuProduct>>;
}

// ==========================================
// MenuRepository - 菜单仓储
// ==========================================
pub struct MenuRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MenuRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl MenuStore for MenuRepository {
    fn save(&self, menu: &NewMenu) -> RepositoryResult<Menu> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO menu (name, price, menu_group_id) VALUES (?1, ?2, ?3)",
            params![menu.name(), price_to_sql(menu.price()), menu.menu_group_id()],
        )?;
        Ok(Menu {
            id: conn.last_insert_rowid(),
            name: menu.name().to_string(),
            price: menu.price(),
            menu_group_id: menu.menu_group_id(),
            menu_products: Vec::new(),
        })
    }

    fn find_all(&self) -> RepositoryResult<Vec<Menu>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, price, menu_group_id FROM menu ORDER BY id ASC")?;
        let menus = stmt
            .query_map([], |row| {
                Ok(Menu {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    price: read_price(row, 2)?,
                    menu_group_id: row.get(3)?,
                    menu_products: Vec::new(),
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(menus)
    }

    fn count_by_id_in(&self, ids: &[i64]) -> RepositoryResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT COUNT(*) FROM menu WHERE id IN ({})",
            in_placeholders(ids.len())
        );
        let count: i64 = conn.query_row(&sql, params_from_iter(ids.iter()), |row| row.get(0))?;
        Ok(count as usize)
    }
}

// ==========================================
// MenuProductRepository - 菜单行仓储
// ==========================================
pub struct MenuProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MenuProductRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl MenuProductStore for MenuProductRepository {
    fn save(&self, menu_id: i64, menu_product: &NewMenuProduct) -> RepositoryResult<MenuProduct> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO menu_product (menu_id, product_id, quantity) VALUES (?1, ?2, ?3)",
            params![menu_id, menu_product.product_id(), menu_product.quantity()],
        )?;
        Ok(MenuProduct {
            seq: conn.last_insert_rowid(),
            menu_id,
            product_id: menu_product.product_id(),
            quantity: menu_product.quantity(),
        })
    }

    fn find_all_by_menu_id(&self, menu_id: i64) -> RepositoryResult<Vec<MenuProduct>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT seq, menu_id, product_id, quantity
            FROM menu_product
            WHERE menu_id = ?1
            ORDER BY seq ASC
            "#,
        )?;
        let lines = stmt
            .query_map(params![menu_id], |row| {
                Ok(MenuProduct {
                    seq: row.get(0)?,
                    menu_id: row.get(1)?,
                    product_id: row.get(2)?,
                    quantity: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(lines)
    }
}
