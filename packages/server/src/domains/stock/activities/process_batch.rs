//! Batch processor: runs every item through the pipeline, in order, and
//! aggregates per-item outcomes.
//!
//! Item pipeline: validate -> resolve identifier -> mutate -> record.
//! A failure at any stage ends that item only. Store errors and panics are
//! caught at the item boundary and reported as `internal_error`.

use futures::FutureExt;
use serde_json::{json, Value};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::debug;

use super::{apply_stock, identifier_label, normalize_input, resolve_product, validate_item};
use crate::domains::stock::models::{
    BatchAccumulator, BatchResponse, ErrorEntry, ItemError, ItemStatus, NormalizedInput,
    ResultEntry, StockErrorCode, StockMode,
};
use crate::kernel::ServerDeps;

/// Processes stock update batches against the injected catalog.
///
/// Built once at startup and shared by the transport layer.
#[derive(Clone)]
pub struct BatchProcessor {
    deps: ServerDeps,
}

impl BatchProcessor {
    pub fn new(deps: ServerDeps) -> Self {
        Self { deps }
    }

    /// Process `items` sequentially.
    ///
    /// Every index yields exactly one result or one error. If the catalog is
    /// unavailable nothing is processed and a single request-level error is
    /// returned.
    pub async fn process(&self, items: &[Value], default_mode: &str) -> BatchResponse {
        if !self.deps.catalog.is_available().await {
            return BatchResponse::request_failure(
                StockErrorCode::CatalogNotAvailable,
                "The product catalog is required to update stock.",
            );
        }

        let mut batch = BatchAccumulator::default();

        for (index, item) in items.iter().enumerate() {
            let input = normalize_input(item);

            let outcome = AssertUnwindSafe(self.process_item(index, item, default_mode, &input))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(ItemError::Fault(panic_message(panic.as_ref()))));

            match outcome {
                Ok(entry) => {
                    self.deps.logger.log(
                        "Stock update item updated",
                        json!({
                            "index": index,
                            "input": &entry.input,
                            "product_id": entry.resolved_product_id,
                            "old_stock": entry.old_stock,
                            "new_stock": entry.new_stock,
                            "mode": entry.mode,
                        }),
                    );
                    batch.push_result(entry);
                }
                Err(err) => {
                    let entry = self.item_error(index, item, err, input);
                    batch.push_error(entry);
                }
            }
        }

        let response = batch.finish();
        debug!(
            items = items.len(),
            results = response.results().len(),
            errors = response.errors().len(),
            "Stock batch processed"
        );
        response
    }

    async fn process_item(
        &self,
        index: usize,
        item: &Value,
        default_mode: &str,
        input: &NormalizedInput,
    ) -> Result<ResultEntry, ItemError> {
        let intent = validate_item(item, default_mode)?;
        let catalog = self.deps.catalog.as_ref();

        let context = resolve_product(&intent.identifier, catalog).await?;
        let change = apply_stock(&context.product, intent.qty, catalog).await?;

        Ok(ResultEntry {
            index,
            input: input.clone(),
            resolved_product_id: context.product_id(),
            status: ItemStatus::Updated,
            identifier: context.identifier,
            mode: StockMode::Set,
            old_stock: change.old_stock,
            new_stock: change.new_stock,
        })
    }

    fn item_error(
        &self,
        index: usize,
        item: &Value,
        err: ItemError,
        input: NormalizedInput,
    ) -> ErrorEntry {
        if let Some(detail) = err.fault_detail() {
            self.deps.logger.log(
                "Item processing exception",
                json!({
                    "index": index,
                    "message": detail,
                    "input": &input,
                }),
            );
        }

        let entry = ErrorEntry::item(
            index,
            identifier_label(item),
            err.code(),
            err.public_message(),
            input,
        );

        self.deps.logger.log(
            "Stock update item failed",
            json!({
                "index": entry.index,
                "identifier": &entry.identifier,
                "code": entry.code,
                "message": &entry.message,
                "input": entry.input.clone().unwrap_or_default(),
            }),
        );

        entry
    }
}

/// Best-effort text of a caught panic payload
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
