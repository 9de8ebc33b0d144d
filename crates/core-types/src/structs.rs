use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A customer order as supplied by the data loader.
///
/// Fields are validated once in [`Order::new`] and never change afterwards.
/// Deserialization goes through the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOrder")]
pub struct Order {
    order_id: String,
    customer: String,
    status: String,
    order_date: DateTime<Utc>,
    total_value: Decimal,
}

impl Order {
    pub fn new(
        order_id: impl Into<String>,
        customer: impl Into<String>,
        status: impl Into<String>,
        order_date: DateTime<Utc>,
        total_value: Decimal,
    ) -> Result<Self, CoreError> {
        let order_id = required("order_id", order_id.into())?;
        let customer = required("customer", customer.into())?;
        let status = required("status", status.into())?;

        if total_value < Decimal::ZERO {
            return Err(CoreError::NegativeValue(order_id, total_value));
        }

        Ok(Self {
            order_id,
            customer,
            status,
            order_date,
            total_value,
        })
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    pub fn total_value(&self) -> Decimal {
        self.total_value
    }
}

/// A shipment record. Either date may be missing in the source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawShipment")]
pub struct Shipment {
    shipment_id: String,
    carrier: String,
    status: String,
    ship_date: Option<DateTime<Utc>>,
    estimated_arrival: Option<DateTime<Utc>>,
}

impl Shipment {
    pub fn new(
        shipment_id: impl Into<String>,
        carrier: impl Into<String>,
        status: impl Into<String>,
        ship_date: Option<DateTime<Utc>>,
        estimated_arrival: Option<DateTime<Utc>>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            shipment_id: required("shipment_id", shipment_id.into())?,
            carrier: required("carrier", carrier.into())?,
            status: required("status", status.into())?,
            ship_date,
            estimated_arrival,
        })
    }

    pub fn shipment_id(&self) -> &str {
        &self.shipment_id
    }

    pub fn carrier(&self) -> &str {
        &self.carrier
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn ship_date(&self) -> Option<DateTime<Utc>> {
        self.ship_date
    }

    pub fn estimated_arrival(&self) -> Option<DateTime<Utc>> {
        self.estimated_arrival
    }
}

/// The two record collections for one invocation of the pipeline.
///
/// Construction guarantees that ids are unique within each collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    orders: Vec<Order>,
    shipments: Vec<Shipment>,
}

impl Snapshot {
    pub fn new(orders: Vec<Order>, shipments: Vec<Shipment>) -> Result<Self, CoreError> {
        ensure_unique("order", orders.iter().map(Order::order_id))?;
        ensure_unique("shipment", shipments.iter().map(Shipment::shipment_id))?;

        tracing::debug!(
            orders = orders.len(),
            shipments = shipments.len(),
            "Snapshot assembled."
        );

        Ok(Self { orders, shipments })
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }
}

// --- Wire shapes ---
// These mirror the loader's record schema and exist only to route
// deserialization through the validating constructors.

#[derive(Deserialize)]
struct RawOrder {
    order_id: String,
    customer: String,
    status: String,
    order_date: DateTime<Utc>,
    total_value: Decimal,
}

impl TryFrom<RawOrder> for Order {
    type Error = CoreError;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        Order::new(
            raw.order_id,
            raw.customer,
            raw.status,
            raw.order_date,
            raw.total_value,
        )
    }
}

#[derive(Deserialize)]
struct RawShipment {
    shipment_id: String,
    carrier: String,
    status: String,
    #[serde(default)]
    ship_date: Option<DateTime<Utc>>,
    #[serde(default)]
    estimated_arrival: Option<DateTime<Utc>>,
}

impl TryFrom<RawShipment> for Shipment {
    type Error = CoreError;

    fn try_from(raw: RawShipment) -> Result<Self, Self::Error> {
        Shipment::new(
            raw.shipment_id,
            raw.carrier,
            raw.status,
            raw.ship_date,
            raw.estimated_arrival,
        )
    }
}

fn required(field: &str, value: String) -> Result<String, CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            field.to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(value)
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
