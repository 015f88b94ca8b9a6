// ==========================================
// 全业务流程 E2E 测试
// ==========================================
// 流程: 菜品 → 菜单分组 → 菜单 → 餐桌 → 并桌 → 下单 → 状态流转 → 解散 → 清台
// 另含: 错误分类（验证 / 未找到 / 基础设施故障透传）
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use kitchen_pos::db::open_sqlite_connection;
use rust_decimal::Decimal;

#[test]
fn test_菜单定价场景() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let fried = env.create_product("原味炸鸡", 16000);
    let seasoned = env.create_product("调味炸鸡", 16000);
    let group = env.create_menu_group("双拼菜单");
    let lines = [(fried.id, 1), (seasoned.id, 1)];

    let combo = env
        .menu_composer
        .create(env.menu_request(30000, group.id, &lines))
        .expect("30000 ≤ 32000 应创建成功");
    assert_eq!(combo.price, Decimal::from(30000));

    let err = env
        .menu_composer
        .create(env.menu_request(33000, group.id, &lines))
        .unwrap_err();
    assert!(err.is_validation());

    assert_eq!(env.menu_composer.list().unwrap(), vec![combo]);
}

#[test]
fn test_并桌场景() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let t1 = env.create_empty_table();
    let t2 = env.create_empty_table();

    let group = env
        .table_group_coordinator
        .create(TableGroupRequest::new(vec![t1.id, t2.id]))
        .expect("并桌失败");
    let tables = env.table_manager.list().unwrap();
    assert!(tables
        .iter()
        .all(|t| !t.empty && t.table_group_id == Some(group.id)));

    let err = env
        .table_group_coordinator
        .create(TableGroupRequest::new(vec![t1.id]))
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_订单终态场景() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let menu = env.create_combo_menu();
    let table = env.create_seated_table(2);

    let order = env.place_order(table.id, menu.id);
    assert_eq!(order.order_status, OrderStatus::Cooking);

    env.order_workflow
        .change_order_status(order.id, OrderStatus::Completion)
        .expect("COOKING → COMPLETION 失败");
    let err = env
        .order_workflow
        .change_order_status(order.id, OrderStatus::Meal)
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_全流程_并桌下单结账解散() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let menu = env.create_combo_menu();

    // 1. 两张空桌并桌
    let t1 = env.create_empty_table();
    let t2 = env.create_empty_table();
    let group = env
        .table_group_coordinator
        .create(TableGroupRequest::new(vec![t1.id, t2.id]))
        .expect("并桌失败");

    // 2. 并桌后设置客人数并下单
    env.table_manager
        .change_number_of_guests(t1.id, 6)
        .expect("设置客人数失败");
    let order = env
        .order_workflow
        .create(OrderRequest::new(
            t1.id,
            vec![OrderLineRequest::new(menu.id, 3)],
        ))
        .expect("下单失败");

    // 3. 用餐中不能解散，也不能单独清台
    env.order_workflow
        .change_order_status(order.id, OrderStatus::Meal)
        .expect("上菜失败");
    assert!(env
        .table_group_coordinator
        .ungroup(group.id)
        .unwrap_err()
        .is_validation());
    assert!(env
        .table_manager
        .change_empty(t1.id, true)
        .unwrap_err()
        .is_validation());

    // 4. 结账后解散并清台
    env.order_workflow
        .change_order_status(order.id, OrderStatus::Completion)
        .expect("结账失败");
    env.table_group_coordinator
        .ungroup(group.id)
        .expect("解散失败");
    for id in [t1.id, t2.id] {
        let cleared = env.table_manager.change_empty(id, true).expect("清台失败");
        assert!(cleared.empty);
        assert_eq!(cleared.table_group_id, None);
    }

    // 5. 订单列表保留完整历史
    let orders = env.order_workflow.list().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_status, OrderStatus::Completion);
    assert_eq!(orders[0].order_line_items[0].quantity, 3);
}

#[test]
fn test_错误分类_基础设施故障透传() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    // 另一连接破坏表结构，模拟存储故障
    let conn = open_sqlite_connection(&env.db_path).expect("无法打开数据库");
    conn.execute_batch("DROP TABLE product;").expect("删表失败");

    let err = env.product_catalog.list().unwrap_err();
    assert!(err.is_infrastructure(), "存储故障应原样透传: {:?}", err);
    assert!(!err.is_validation());
    assert!(!err.is_not_found());
}

#[test]
fn test_错误分类_未找到与验证() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let not_found = env
        .order_workflow
        .change_order_status(1, OrderStatus::Meal)
        .unwrap_err();
    assert!(not_found.is_not_found());
    assert_eq!(not_found.to_string(), "资源未找到: Order(id=1)");

    let validation = env
        .table_group_coordinator
        .create(TableGroupRequest::new(vec![]))
        .unwrap_err();
    assert!(validation.is_validation());
    assert!(!validation.is_infrastructure());
}
