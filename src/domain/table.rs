// ==========================================
// 餐厅 POS 后台 - 餐桌/桌组领域模型
// ==========================================
// 红线: 已并桌的餐桌不能单独变更占用状态
// 红线: 空桌不能设置客人数
// ==========================================

use crate::domain::error::DomainError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// DiningTable - 餐桌
// ==========================================
// 对齐: dining_table 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub table_group_id: Option<i64>, // None 表示未并桌
    pub number_of_guests: i32,       // 仅在非空桌时有意义
    pub empty: bool,                 // 占用标志
}

impl DiningTable {
    /// 是否已加入桌组
    pub fn is_grouped(&self) -> bool {
        self.table_group_id.is_some()
    }

    /// 能否加入新的桌组（必须是空桌且未并桌）
    pub fn is_groupable(&self) -> bool {
        self.empty && !self.is_grouped()
    }

    /// 加入桌组：绑定桌组ID并标记为占用
    pub fn join_group(&mut self, table_group_id: i64) {
        self.table_group_id = Some(table_group_id);
        self.empty = false;
    }

    /// 离开桌组：仅清除桌组ID，占用标志保持不变
    pub fn leave_group(&mut self) {
        self.table_group_id = None;
    }
}

/// 待持久化餐桌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewDiningTable {
    number_of_guests: i32,
    empty: bool,
}

impl NewDiningTable {
    pub fn new(number_of_guests: i32, empty: bool) -> Result<Self, DomainError> {
        if number_of_guests < 0 {
            return Err(DomainError::NegativeGuestCount(number_of_guests));
        }
        Ok(Self {
            number_of_guests,
            empty,
        })
    }

    pub fn number_of_guests(&self) -> i32 {
        self.number_of_guests
    }

    pub fn empty(&self) -> bool {
        self.empty
    }

    pub fn into_table(self, id: i64) -> DiningTable {
        DiningTable {
            id,
            table_group_id: None,
            number_of_guests: self.number_of_guests,
            empty: self.empty,
        }
    }
}

// ==========================================
// TableGroup - 桌组（并桌）
// ==========================================
// 说明: 解散时只解除成员关系，桌组记录本身保留
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGroup {
    pub id: i64,
    pub created_date: NaiveDateTime,
    pub order_tables: Vec<DiningTable>,
}
