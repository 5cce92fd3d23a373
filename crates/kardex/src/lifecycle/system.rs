use crate::access::{Authenticator, RoutePolicy};
use crate::clients::{
    BrandClient, CategoryClient, CounterClient, EmployeeClient, OrderClient, OrderNumbering,
    StockClient, SupplierClient, UnitClient,
};
use crate::config::KardexConfig;
use crate::counter_actor::CounterError;
use crate::model::{BrandKind, CategoryKind, CounterCreate, StockItemId, SupplierKind, UnitKind};
use crate::order_actor::OrderContext;
use crate::reports::{self, CommissionRow, InventoryValuation, KardexSummary, LowStockRow};
use crate::status_log::StatusLog;
use crate::{catalog_actor, counter_actor, employee_actor, order_actor, stock_actor};
use resource_actor::ActorClient;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Name of the counter order numbers are minted from.
pub const ORDER_COUNTER: &str = "orders";

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Order counter setup failed: {0}")]
    Counter(#[from] CounterError),

    #[error("Report failed: {0}")]
    Report(String),

    #[error("Actor task failed: {0}")]
    Task(String),
}

/// Every collection actor, started and wired.
///
/// # Example
///
/// ```rust
/// use kardex::config::KardexConfig;
/// use kardex::lifecycle::KardexSystem;
/// use kardex::model::{OrderCreate, OrderLine, EmployeeId, StockItemCreate};
/// use rust_decimal_macros::dec;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = KardexSystem::start(&KardexConfig::default()).await?;
///
///     let item = system.stock.create_item(StockItemCreate::new("CAB-10", "Cabo 10mm", 10)).await?;
///     let _order = system.orders.place_order(OrderCreate {
///         buyer: "Obra Centro".into(),
///         salesperson: EmployeeId(1),
///         lines: vec![OrderLine::new(item.clone(), 4, dec!(12.90))],
///         notes: None,
///     }).await?;
///
///     assert_eq!(system.stock.check_stock(item).await?, 6);
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct KardexSystem {
    pub stock: StockClient,
    pub orders: OrderClient,
    pub counters: CounterClient,
    pub numbering: OrderNumbering,
    pub suppliers: SupplierClient,
    pub categories: CategoryClient,
    pub brands: BrandClient,
    pub units: UnitClient,
    pub employees: EmployeeClient,
    pub authenticator: Authenticator,
    pub routes: RoutePolicy,
    pub status_log: StatusLog,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl KardexSystem {
    /// Spawns every actor and creates the order counter.
    ///
    /// Actors without dependencies start with `()`; the order actor gets the stock client and
    /// the numbering handle as its context.
    pub async fn start(config: &KardexConfig) -> Result<Self, SystemError> {
        Self::start_with_log(config, StatusLog::new(config.status_log.capacity)).await
    }

    /// Like [`start`](Self::start), sharing an existing status log (the one wired into tracing).
    pub async fn start_with_log(
        config: &KardexConfig,
        status_log: StatusLog,
    ) -> Result<Self, SystemError> {
        let buffer = config.actors.buffer_size;

        let (stock_actor, stock) = stock_actor::new(buffer);
        let (counter_actor, counters) = counter_actor::new(buffer);
        let (order_actor, orders) = order_actor::new(buffer);
        let (employee_actor, employees) = employee_actor::new(buffer);
        let (supplier_actor, suppliers) = catalog_actor::new::<SupplierKind>(buffer);
        let (category_actor, categories) = catalog_actor::new::<CategoryKind>(buffer);
        let (brand_actor, brands) = catalog_actor::new::<BrandKind>(buffer);
        let (unit_actor, units) = catalog_actor::new::<UnitKind>(buffer);

        let stock = StockClient::new(stock);
        let counters = CounterClient::new(counters);
        let employees = EmployeeClient::with_cost(employees, config.auth.bcrypt_cost);

        let mut handles = vec![
            tokio::spawn(stock_actor.run(())),
            tokio::spawn(counter_actor.run(())),
            tokio::spawn(employee_actor.run(())),
            tokio::spawn(supplier_actor.run(())),
            tokio::spawn(category_actor.run(())),
            tokio::spawn(brand_actor.run(())),
            tokio::spawn(unit_actor.run(())),
        ];

        let counter_id = match counters.find_by_name(ORDER_COUNTER).await? {
            Some(counter) => counter.id,
            None => {
                counters
                    .create_counter(CounterCreate::named(ORDER_COUNTER))
                    .await?
            }
        };
        let numbering = OrderNumbering::new(
            counters.clone(),
            counter_id,
            config.order_number.prefix.clone(),
            config.order_number.width,
        );

        handles.push(tokio::spawn(order_actor.run(OrderContext {
            stock: stock.clone(),
            numbering: numbering.clone(),
        })));

        info!(actors = handles.len(), "System started");
        Ok(Self {
            stock,
            orders: OrderClient::new(orders),
            counters,
            numbering,
            suppliers: SupplierClient::new(suppliers),
            categories: CategoryClient::new(categories),
            brands: BrandClient::new(brands),
            units: UnitClient::new(units),
            authenticator: Authenticator::new(employees.clone()),
            employees,
            routes: RoutePolicy::default(),
            status_log,
            handles,
        })
    }

    pub async fn low_stock(&self) -> Result<Vec<LowStockRow>, SystemError> {
        let items = self.stock.list().await.map_err(report_error)?;
        Ok(reports::low_stock(&items))
    }

    pub async fn inventory_valuation(&self) -> Result<InventoryValuation, SystemError> {
        let items = self.stock.list().await.map_err(report_error)?;
        Ok(reports::inventory_valuation(&items))
    }

    pub async fn kardex_summary(&self, item: StockItemId) -> Result<KardexSummary, SystemError> {
        let movements = self
            .stock
            .movements(item, Default::default())
            .await
            .map_err(report_error)?;
        Ok(KardexSummary::from_movements(&movements))
    }

    pub async fn commissions(&self) -> Result<Vec<CommissionRow>, SystemError> {
        let orders = self.orders.list().await.map_err(report_error)?;
        let employees = self.employees.list().await.map_err(report_error)?;
        Ok(reports::commissions(&orders, &employees))
    }

    /// Drops every client, then waits for each actor to drain its queue and stop.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        let Self {
            stock,
            orders,
            counters,
            numbering,
            suppliers,
            categories,
            brands,
            units,
            employees,
            authenticator,
            handles,
            ..
        } = self;
        drop((stock, orders, counters, numbering));
        drop((suppliers, categories, brands, units));
        drop((employees, authenticator));

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(SystemError::Task(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

fn report_error(e: impl std::fmt::Display) -> SystemError {
    SystemError::Report(e.to_string())
}
