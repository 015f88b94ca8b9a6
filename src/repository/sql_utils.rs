// ==========================================
// 餐厅 POS 后台 - 仓储层 SQL 辅助函数
// ==========================================
// 职责: IN 子句占位符、金额/状态列解析
// ==========================================

use crate::domain::types::{OrderStatus, Price};
use rusqlite::types::Type;
use rusqlite::Row;
use rust_decimal::Decimal;
use std::str::FromStr;

/// 生成 IN 子句占位符: "?1, ?2, ?3"
pub fn in_placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 生成 IN 子句占位符，从指定序号开始
pub fn in_placeholders_from(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 金额以 TEXT 存储，避免浮点误差
pub fn price_to_sql(price: Price) -> String {
    price.value().to_string()
}

/// 读取金额列
pub fn read_price(row: &Row<'_>, idx: usize) -> rusqlite::Result<Price> {
    let raw: String = row.get(idx)?;
    let value = Decimal::from_str(raw.trim())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))?;
    Price::new(Some(value))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// 读取订单状态列
pub fn read_order_status(row: &Row<'_>, idx: usize) -> rusqlite::Result<OrderStatus> {
    let raw: String = row.get(idx)?;
    OrderStatus::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
