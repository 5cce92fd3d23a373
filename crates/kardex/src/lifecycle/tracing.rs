//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber: an `EnvFilter` (taken from
//! `RUST_LOG`, or the configured level when that is unset) in front of a compact or JSON
//! formatter, and optionally the [`StatusLogLayer`](crate::status_log::StatusLogLayer) behind its
//! own level filter. Console verbosity does not change what reaches the status log.
//!
//! The compact format hides the module path (`with_target(false)`); actor logs carry an
//! `entity_type` field instead.
//!
//! ```text
//! INFO Actor started entity_type="StockItem"
//! INFO Created entity_type="StockItem" id=item_1 size=1
//! INFO place_order: Sending place_order to actor buyer=Obra Centro lines=1
//! INFO Action ok entity_type="StockItem" id=item_1
//! INFO Order placed order=order_1 number=PED-000001 total=51.60
//! INFO Created entity_type="Order" id=order_1 size=1
//! ```
//!
//! ```bash
//! RUST_LOG=debug cargo run      # also logs request payloads
//! KARDEX__LOG__FORMAT=json cargo run
//! ```

use crate::config::{LogConfig, LogFormat};
use crate::status_log::StatusLog;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Installs the global subscriber. Fails if one is already installed.
///
/// The `EnvFilter` only governs console output. `status` routes WARN/ERROR events (and INFO
/// when its flag is set) into the status log whatever the console level is, and installs the
/// log's panic hook.
pub fn setup_tracing(
    config: &LogConfig,
    status: Option<(&StatusLog, bool)>,
) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let status_layer = status.map(|(log, capture_info)| {
        let level = if capture_info {
            LevelFilter::INFO
        } else {
            LevelFilter::WARN
        };
        log.layer(capture_info).with_filter(level)
    });
    let registry = tracing_subscriber::registry().with(status_layer);

    let installed = match config.format {
        LogFormat::Compact => registry
            .with(fmt::layer().with_target(false).compact().with_filter(filter))
            .try_init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_filter(filter)).try_init(),
    };
    installed?;

    if let Some((log, _)) = status {
        log.install_panic_hook();
    }
    Ok(())
}
