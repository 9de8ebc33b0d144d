use anyhow::Context;
use core_types::{Order, Shipment, Snapshot};
use serde_json::from_str;
use std::fs;
use std::path::Path;

/// Reads the two JSON record files and assembles a validated snapshot.
pub fn load_snapshot(orders_path: &Path, shipments_path: &Path) -> anyhow::Result<Snapshot> {
    let orders: Vec<Order> = read_records(orders_path)?;
    let shipments: Vec<Shipment> = read_records(shipments_path)?;

    tracing::info!(
        orders = orders.len(),
        shipments = shipments.len(),
        "Loaded snapshot."
    );

    Snapshot::new(orders, shipments).context("Snapshot failed validation")
}

fn read_records<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    from_str(&raw).with_context(|| format!("Failed to parse records in {}", path.display()))
}
