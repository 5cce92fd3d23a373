//! Order actor against scripted stock and counter collections.

use chrono::Utc;
use kardex::clients::{CounterClient, OrderClient, OrderNumbering, StockClient};
use kardex::counter_actor::CounterActionResult;
use kardex::model::{
    Counter, CounterId, EmployeeId, Movement, MovementKind, OrderCreate, OrderLine, OrderStatus,
    StockItem, StockItemId,
};
use kardex::order_actor::{self, OrderContext, OrderError};
use kardex::stock_actor::{StockAction, StockActionResult, StockError};
use resource_actor::mock::{create_mock_client, expect_action, MockClient};
use resource_actor::{ActorClient, FrameworkError};
use rust_decimal_macros::dec;

fn movement(item: u32, kind: MovementKind, quantity: u32, balance: u32) -> StockActionResult {
    StockActionResult::Record(Movement {
        seq: 1,
        item_id: StockItemId(item),
        kind,
        quantity,
        balance,
        at: Utc::now(),
        reference: Some("order_1".into()),
        note: None,
    })
}

fn shortage(requested: u32, available: u32) -> FrameworkError {
    FrameworkError::EntityError(Box::new(StockError::InsufficientStock {
        requested,
        available,
    }))
}

fn order(lines: &[(u32, u32)]) -> OrderCreate {
    OrderCreate {
        buyer: "Construtora Lima".into(),
        salesperson: EmployeeId(1),
        lines: lines
            .iter()
            .map(|&(item, qty)| OrderLine::new(StockItemId(item), qty, dec!(5)))
            .collect(),
        notes: None,
    }
}

fn start(stock: &MockClient<StockItem>, counters: &MockClient<Counter>) -> OrderClient {
    let (actor, client) = order_actor::new(10);
    let numbering = OrderNumbering::new(
        CounterClient::new(counters.client()),
        CounterId(1),
        "PED-",
        6,
    );
    tokio::spawn(actor.run(OrderContext {
        stock: StockClient::new(stock.client()),
        numbering,
    }));
    OrderClient::new(client)
}

#[tokio::test]
async fn test_place_order_issues_each_line_then_numbers() {
    let mut stock = MockClient::<StockItem>::new();
    let mut counters = MockClient::<Counter>::new();
    stock
        .expect_action(StockItemId(1))
        .return_ok(movement(1, MovementKind::Exit, 2, 8));
    stock
        .expect_action(StockItemId(2))
        .return_ok(movement(2, MovementKind::Exit, 1, 0));
    counters
        .expect_action(CounterId(1))
        .return_ok(CounterActionResult::Next(7));

    let orders = start(&stock, &counters);
    let id = orders.place_order(order(&[(1, 2), (2, 1)])).await.unwrap();

    let placed = orders.get(id).await.unwrap().unwrap();
    assert_eq!(placed.number, "PED-000007");
    assert_eq!(placed.status, OrderStatus::Pending);
    assert_eq!(placed.total, dec!(15));

    stock.verify();
    counters.verify();
}

#[tokio::test]
async fn test_failed_second_line_compensates_first() {
    let mut stock = MockClient::<StockItem>::new();
    let counters = MockClient::<Counter>::new();
    stock
        .expect_action(StockItemId(1))
        .return_ok(movement(1, MovementKind::Exit, 4, 6));
    stock.expect_action(StockItemId(2)).return_err(shortage(9, 3));
    // Entry returning line one.
    stock
        .expect_action(StockItemId(1))
        .return_ok(movement(1, MovementKind::Entry, 4, 10));

    let orders = start(&stock, &counters);
    let err = orders
        .place_order(order(&[(1, 4), (2, 9)]))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OrderError::InsufficientStock {
            item: "item_2".into(),
            requested: 9,
            available: 3
        }
    );
    assert!(orders.list().await.unwrap().is_empty());
    stock.verify();
    counters.verify();
}

#[tokio::test]
async fn test_numbering_failure_returns_all_stock() {
    let mut stock = MockClient::<StockItem>::new();
    let mut counters = MockClient::<Counter>::new();
    stock
        .expect_action(StockItemId(1))
        .return_ok(movement(1, MovementKind::Exit, 1, 0));
    counters
        .expect_action(CounterId(1))
        .return_err(FrameworkError::ActorClosed);
    stock
        .expect_action(StockItemId(1))
        .return_ok(movement(1, MovementKind::Entry, 1, 1));

    let orders = start(&stock, &counters);
    let err = orders.place_order(order(&[(1, 1)])).await.unwrap_err();

    assert!(matches!(err, OrderError::Numbering(_)));
    assert!(orders.list().await.unwrap().is_empty());
    stock.verify();
    counters.verify();
}

#[tokio::test]
async fn test_unknown_item_fails_without_numbering() {
    let mut stock = MockClient::<StockItem>::new();
    let counters = MockClient::<Counter>::new();
    stock
        .expect_action(StockItemId(5))
        .return_err(FrameworkError::NotFound("item_5".into()));

    let orders = start(&stock, &counters);
    let err = orders.place_order(order(&[(5, 1)])).await.unwrap_err();

    assert_eq!(err, OrderError::InvalidItem("item_5".into()));
    stock.verify();
    counters.verify();
}

#[tokio::test]
async fn test_cancel_returns_every_line() {
    let mut stock = MockClient::<StockItem>::new();
    let mut counters = MockClient::<Counter>::new();
    stock
        .expect_action(StockItemId(1))
        .return_ok(movement(1, MovementKind::Exit, 3, 2));
    stock
        .expect_action(StockItemId(2))
        .return_ok(movement(2, MovementKind::Exit, 1, 4));
    counters
        .expect_action(CounterId(1))
        .return_ok(CounterActionResult::Next(1));
    stock
        .expect_action(StockItemId(1))
        .return_ok(movement(1, MovementKind::Entry, 3, 5));
    stock
        .expect_action(StockItemId(2))
        .return_ok(movement(2, MovementKind::Entry, 1, 5));

    let orders = start(&stock, &counters);
    let id = orders.place_order(order(&[(1, 3), (2, 1)])).await.unwrap();
    assert_eq!(orders.cancel(id.clone()).await.unwrap(), OrderStatus::Pending);
    assert_eq!(
        orders.get(id).await.unwrap().unwrap().status,
        OrderStatus::Cancelled
    );

    stock.verify();
    counters.verify();
}

#[tokio::test]
async fn test_failed_cancel_reissues_returned_lines() {
    let mut stock = MockClient::<StockItem>::new();
    let mut counters = MockClient::<Counter>::new();
    stock
        .expect_action(StockItemId(1))
        .return_ok(movement(1, MovementKind::Exit, 1, 0));
    stock
        .expect_action(StockItemId(2))
        .return_ok(movement(2, MovementKind::Exit, 1, 0));
    counters
        .expect_action(CounterId(1))
        .return_ok(CounterActionResult::Next(1));
    // Cancel: line one comes back, line two fails, line one goes out again.
    stock
        .expect_action(StockItemId(1))
        .return_ok(movement(1, MovementKind::Entry, 1, 1));
    stock
        .expect_action(StockItemId(2))
        .return_err(FrameworkError::EntityError(Box::new(StockError::BalanceOverflow)));
    stock
        .expect_action(StockItemId(1))
        .return_ok(movement(1, MovementKind::Exit, 1, 0));

    let orders = start(&stock, &counters);
    let id = orders.place_order(order(&[(1, 1), (2, 1)])).await.unwrap();
    let err = orders.cancel(id.clone()).await.unwrap_err();

    assert!(matches!(err, OrderError::Stock(_)));
    assert_eq!(
        orders.get(id).await.unwrap().unwrap().status,
        OrderStatus::Pending
    );
    stock.verify();
    counters.verify();
}

#[tokio::test]
async fn test_exit_carries_order_reference() {
    let (stock, mut stock_requests) = create_mock_client::<StockItem>(10);
    let mut counters = MockClient::<Counter>::new();
    counters
        .expect_action(CounterId(1))
        .return_ok(CounterActionResult::Next(1));

    let (actor, client) = order_actor::new(10);
    tokio::spawn(actor.run(OrderContext {
        stock: StockClient::new(stock),
        numbering: OrderNumbering::new(
            CounterClient::new(counters.client()),
            CounterId(1),
            "PED-",
            6,
        ),
    }));
    let orders = OrderClient::new(client);
    let placing = tokio::spawn(async move { orders.place_order(order(&[(3, 2)])).await });

    let (item, action, respond_to) = expect_action(&mut stock_requests)
        .await
        .expect("Expected stock action");
    assert_eq!(item, StockItemId(3));
    let StockAction::Record(draft) = action else {
        panic!("Expected a ledger record, got {action:?}");
    };
    assert_eq!(draft.kind, MovementKind::Exit);
    assert_eq!(draft.quantity, 2);
    assert_eq!(draft.reference.as_deref(), Some("order_1"));
    respond_to
        .send(Ok(movement(3, MovementKind::Exit, 2, 0)))
        .unwrap();

    let id = placing.await.unwrap().unwrap();
    assert_eq!(id.to_string(), "order_1");
    counters.verify();
}
