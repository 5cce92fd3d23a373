//! Demo: seeds a stock item and a salesperson, places two orders, cancels one and prints the
//! item's Kardex.
//!
//! ```bash
//! RUST_LOG=info cargo run -p kardex
//! KARDEX__ORDER_NUMBER__PREFIX=PV- cargo run -p kardex
//! ```

use kardex::config::KardexConfig;
use kardex::lifecycle::{setup_tracing, KardexSystem};
use kardex::model::{
    CatalogCreate, MovementFilter, NewEmployee, OrderCreate, OrderLine, Role, StockItemCreate,
};
use kardex::status_log::StatusLog;
use resource_actor::ActorClient;
use rust_decimal_macros::dec;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = KardexConfig::load()?;
    let status_log = StatusLog::new(config.status_log.capacity);
    setup_tracing(&config.log, Some((&status_log, config.status_log.capture_info)))?;

    info!("Starting kardex demo");
    let system = KardexSystem::start_with_log(&config, status_log).await?;

    let supplier = system
        .suppliers
        .create(CatalogCreate::new("F001", "Ferragens Silva").with_attribute("cnpj", "12.345.678/0001-90"))
        .await?;
    info!(%supplier, "Supplier registered");

    let seller = system
        .employees
        .register(NewEmployee {
            name: "Maria Souza".into(),
            username: "maria".into(),
            password: "troque-me".into(),
            role: Role::Seller,
            commission_rate: dec!(0.05),
        })
        .await?;
    let session = system.authenticator.authenticate("maria", "troque-me").await?;
    system.routes.authorize(&session, "/pedidos")?;

    let mut item = StockItemCreate::new("PAR-001", "Parafuso sextavado 10mm", 10);
    item.reorder_level = 5;
    item.price = dec!(1.20);
    item.cost = dec!(0.65);
    let item = system.stock.create_item(item).await?;

    let first = async {
        system
            .orders
            .place_order(OrderCreate {
                buyer: "Obra Centro".into(),
                salesperson: seller.clone(),
                lines: vec![OrderLine::new(item.clone(), 4, dec!(1.20))],
                notes: None,
            })
            .await
    }
    .instrument(tracing::info_span!("order_processing"))
    .await?;

    // More than what is left on hand: rejected, nothing written.
    let oversized = system
        .orders
        .place_order(OrderCreate {
            buyer: "Loja Norte".into(),
            salesperson: seller.clone(),
            lines: vec![OrderLine::new(item.clone(), 50, dec!(1.20))],
            notes: None,
        })
        .await;
    if let Err(e) = &oversized {
        error!(error = %e, "Order rejected");
    }

    let second = system
        .orders
        .place_order(OrderCreate {
            buyer: "Loja Norte".into(),
            salesperson: seller,
            lines: vec![OrderLine::new(item.clone(), 2, dec!(1.10))],
            notes: Some("Retirada no balcão".into()),
        })
        .await?;
    system.orders.cancel(second).await?;

    for order in system.orders.list().await? {
        println!("{} {} {} {}", order.number, order.buyer, order.status, order.total);
    }
    for m in system.stock.movements(item.clone(), MovementFilter::default()).await? {
        println!(
            "{:>3} {:<10} {:>4} saldo {:>4} {}",
            m.seq,
            m.kind.to_string(),
            m.quantity,
            m.balance,
            m.reference.unwrap_or_default()
        );
    }
    for row in system.commissions().await? {
        println!("{} vendas {} comissão {}", row.name, row.sales, row.commission);
    }
    info!(order = %first, warnings = system.status_log.len(), "Demo finished");

    system.shutdown().await?;
    Ok(())
}
