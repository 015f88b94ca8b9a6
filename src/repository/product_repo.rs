// ==========================================
// 餐厅 POS 后台 - 菜品数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::product::{NewProduct, Product};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sql_utils::{price_to_sql, read_price};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ProductStore Trait
// ==========================================
// 用途: 菜品目录读写 / 菜单组合时的单价查询
// 实现者: ProductRepository（使用 rusqlite）
pub trait ProductStore: Send + Sync {
    /// 保存菜品，返回带生成 ID 的实体
    fn save(&self, product: &NewProduct) -> RepositoryResult<Product>;

    /// 按 ID 查询
    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>>;

    /// 查询全部菜品
    fn find_all(&self) -> RepositoryResult<Vec<Product>>;
}

// ==========================================
// ProductRepository - 菜品仓储
// ==========================================
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<Product> {
        Ok(Product {
            id: row.get(0)?,
            name: row.get(1)?,
            price: read_price(row, 2)?,
        })
    }
}

impl ProductStore for ProductRepository {
    fn save(&self, product: &NewProduct) -> RepositoryResult<Product> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO product (name, price) VALUES (?1, ?2)",
            params![product.name(), price_to_sql(product.price())],
        )?;
        Ok(product.clone().into_product(conn.last_insert_rowid()))
    }

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let product = conn
            .query_row(
                "SELECT id, name, price FROM product WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(product)
    }

    fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, name, price FROM product ORDER BY id ASC")?;
        let products = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(products)
    }
}
