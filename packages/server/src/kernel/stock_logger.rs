//! Production stock event sink backed by `tracing`.

use tracing::info;

use super::BaseStockLogger;

/// Emits every stock event as an `info` event on the `stock_control` target.
#[derive(Debug, Clone, Default)]
pub struct TracingStockLogger;

impl TracingStockLogger {
    pub fn new() -> Self {
        Self
    }
}

impl BaseStockLogger for TracingStockLogger {
    fn log(&self, message: &str, context: serde_json::Value) {
        let is_empty = match &context {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        };

        if is_empty {
            info!(target: "stock_control", "[stock-control] {}", message);
        } else {
            info!(target: "stock_control", context = %context, "[stock-control] {}", message);
        }
    }
}
