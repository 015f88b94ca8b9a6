// ==========================================
// 餐厅 POS 后台 - 订单数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: orders 与 order_line_item 分开仓储，订单行的装配由 API 层显式完成
// ==========================================

use crate::domain::order::{NewOrder, NewOrderLineItem, Order, OrderLineItem};
use crate::domain::types::OrderStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sql_utils::{in_placeholders, in_placeholders_from, read_order_status};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

const SELECT_COLUMNS: &str = "SELECT id, order_table_id, order_status, ordered_time FROM orders";

// ==========================================
// OrderStore Trait
// ==========================================
pub trait OrderStore: Send + Sync {
    /// 保存订单头（不含订单行）
    fn save(&self, order: &NewOrder) -> RepositoryResult<Order>;

    /// 更新订单状态（餐桌ID与下单时间不可变）
    fn update_status(&self, order_id: i64, status: OrderStatus) -> RepositoryResult<()>;

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Order>>;

    fn find_all(&self) -> RepositoryResult<Vec<Order>>;

    /// 指定餐桌是否存在给定状态的订单
    fn exists_by_order_table_id_and_order_status_in(
        &self,
        order_table_id: i64,
        statuses: &[OrderStatus],
    ) -> RepositoryResult<bool>;

    /// 任一指定餐桌是否存在给定状态的订单
    fn exists_by_order_table_id_in_and_order_status_in(
        &self,
        order_table_ids: &[i64],
        statuses: &[OrderStatus],
    ) -> RepositoryResult<bool>;
}

// ==========================================
// OrderLineItemStore Trait
// ==========================================
pub trait OrderLineItemStore: Send + Sync {
    fn save(&self, order_id: i64, line: &NewOrderLineItem) -> RepositoryResult<OrderLineItem>;

    /// 按订单查询订单行（按序号升序）
    fn find_all_by_order_id(&self, order_id: i64) -> RepositoryResult<Vec<OrderLineItem>>;
}

// ==========================================
// OrderRepository - 订单仓储
// ==========================================
pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<Order> {
        Ok(Order {
            id: row.get(0)?,
            order_table_id: row.get(1)?,
            order_status: read_order_status(row, 2)?,
            ordered_time: row.get(3)?,
            order_line_items: Vec::new(),
        })
    }
}

impl OrderStore for OrderRepository {
    fn save(&self, order: &NewOrder) -> RepositoryResult<Order> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO orders (order_table_id, order_status, ordered_time) VALUES (?1, ?2, ?3)",
            params![
                order.order_table_id(),
                order.order_status().to_db_str(),
                order.ordered_time()
            ],
        )?;
        Ok(order.clone().into_order(conn.last_insert_rowid()))
    }

    fn update_status(&self, order_id: i64, status: OrderStatus) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE orders SET order_status = ?2 WHERE id = ?1",
            params![order_id, status.to_db_str()],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Order".to_string(),
                id: order_id.to_string(),
            });
        }
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Order>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let order = conn
            .query_row(&sql, params![id], Self::map_row)
            .optional()?;
        Ok(order)
    }

    fn find_all(&self) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY id ASC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let orders = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(orders)
    }

    fn exists_by_order_table_id_and_order_status_in(
        &self,
        order_table_id: i64,
        statuses: &[OrderStatus],
    ) -> RepositoryResult<bool> {
        self.exists_by_order_table_id_in_and_order_status_in(&[order_table_id], statuses)
    }

    fn exists_by_order_table_id_in_and_order_status_in(
        &self,
        order_table_ids: &[i64],
        statuses: &[OrderStatus],
    ) -> RepositoryResult<bool> {
        if order_table_ids.is_empty() || statuses.is_empty() {
            return Ok(false);
        }
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM orders WHERE order_table_id IN ({}) AND order_status IN ({}))",
            in_placeholders(order_table_ids.len()),
            in_placeholders_from(order_table_ids.len() + 1, statuses.len())
        );
        let bind_values: Vec<Value> = order_table_ids
            .iter()
            .map(|id| Value::Integer(*id))
            .chain(
                statuses
                    .iter()
                    .map(|s| Value::Text(s.to_db_str().to_string())),
            )
            .collect();
        let exists: bool = conn.query_row(&sql, params_from_iter(bind_values), |row| row.get(0))?;
        Ok(exists)
    }
}

// ==========================================
// OrderLineItemRepository - 订单行仓储
// ==========================================
pub struct OrderLineItemRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderLineItemRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl OrderLineItemStore for OrderLineItemRepository {
    fn save(&self, order_id: i64, line: &NewOrderLineItem) -> RepositoryResult<OrderLineItem> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO order_line_item (order_id, menu_id, quantity) VALUES (?1, ?2, ?3)",
            params![order_id, line.menu_id(), line.quantity()],
        )?;
        Ok(OrderLineItem {
            seq: conn.last_insert_rowid(),
            order_id,
            menu_id: line.menu_id(),
            quantity: line.quantity(),
        })
    }

    fn find_all_by_order_id(&self, order_id: i64) -> RepositoryResult<Vec<OrderLineItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT seq, order_id, menu_id, quantity
            FROM order_line_item
            WHERE order_id = ?1
            ORDER BY seq ASC
            "#,
        )?;
        let lines = stmt
            .query_map(params![order_id], |row| {
                Ok(OrderLineItem {
                    seq: row.get(0)?,
                    order_id: row.get(1)?,
                    menu_id: row.get(2)?,
                    quantity: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(lines)
    }
}
