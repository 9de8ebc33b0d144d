use analytics::{
    AnalyticsEngine, DashboardCriteria, DateRange, FilterEngine, OrderCriteria, Restriction,
    ShipmentCriteria, observed_values,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_types::{Order, Shipment, Snapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap()
}

fn fixture() -> Snapshot {
    let orders = vec![
        Order::new("ORD-1001", "Acme Corp", "Delivered", at(1, 1, 9), dec!(1200.50)).unwrap(),
        Order::new("ORD-1002", "Globex", "Pending", at(1, 1, 17), dec!(300)).unwrap(),
        Order::new("ORD-1003", "Initech", "Shipped", at(1, 2, 8), dec!(875.25)).unwrap(),
        Order::new("ORD-1004", "Acme Corp", "Shipped", at(1, 4, 12), dec!(99.50)).unwrap(),
        Order::new("ORD-1005", "Umbrella", "Cancelled", at(1, 4, 23), dec!(0)).unwrap(),
        Order::new("ORD-1006", "Hooli", "Delivered", at(1, 7, 10), dec!(640)).unwrap(),
        Order::new("ORD-1007", "Stark", "Pending", at(1, 9, 11), dec!(2100)).unwrap(),
        Order::new("ORD-1008", "Globex", "Delivered", at(1, 9, 15), dec!(1000)).unwrap(),
    ];
    let shipments = vec![
        Shipment::new("SHP-20001", "FedEx", "Delivered", Some(at(1, 2, 8)), Some(at(1, 5, 8))).unwrap(),
        Shipment::new("SHP-20002", "UPS", "Delayed", Some(at(1, 3, 8)), Some(at(1, 10, 8))).unwrap(),
        Shipment::new("SHP-20003", "FedEx", "In Transit", Some(at(1, 6, 8)), None).unwrap(),
        Shipment::new("SHP-20004", "DHL", "Delivered", Some(at(1, 4, 8)), Some(at(1, 8, 8))).unwrap(),
        Shipment::new("SHP-20005", "UPS", "Delivered", None, None).unwrap(),
        Shipment::new("SHP-20006", "FedEx", "Delayed", Some(at(1, 7, 8)), Some(at(1, 12, 8))).unwrap(),
    ];
    Snapshot::new(orders, shipments).unwrap()
}

#[test]
fn default_selection_is_identity_filter() {
    let snap = fixture();
    let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let criteria = DashboardCriteria {
        orders: OrderCriteria {
            status: Restriction::from_selection(observed_values(snap.orders(), Order::status)),
            date_range: Some(DateRange::spanning(snap.orders(), today)),
        },
        shipments: ShipmentCriteria {
            status: Restriction::from_selection(observed_values(snap.shipments(), Shipment::status)),
            carrier: Restriction::from_selection(observed_values(snap.shipments(), Shipment::carrier)),
        },
    };

    let report = AnalyticsEngine::new().build_dashboard(&snap, &criteria);
    assert_eq!(report.filtered_orders, snap.orders());
    assert_eq!(report.filtered_shipments, snap.shipments());
}

#[test]
fn filter_narrowing_holds_for_every_carrier_subset() {
    let snap = fixture();
    let carriers = observed_values(snap.shipments(), Shipment::carrier);
    let engine = FilterEngine::new();

    for mask in 1..(1u32 << carriers.len()) {
        let selected: Vec<&String> = carriers
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, c)| c)
            .collect();
        let criteria = ShipmentCriteria {
            status: Restriction::Unrestricted,
            carrier: Restriction::from_selection(selected.iter().map(|c| c.as_str())),
        };

        let filtered = engine.filter_shipments(snap.shipments(), &criteria);
        assert!(filtered.len() <= snap.shipments().len());
        assert!(filtered.iter().all(|s| selected.iter().any(|c| *c == s.carrier())));
    }
}

#[test]
fn order_views_match_fixture() {
    let snap = fixture();
    let report = AnalyticsEngine::new().build_dashboard(&snap, &DashboardCriteria::default());

    let total: usize = report.orders.status_distribution.iter().map(|r| r.count).sum();
    assert_eq!(total, snap.orders().len());

    let dates: Vec<(u32, usize)> = report
        .orders
        .orders_over_time
        .iter()
        .map(|r| (chrono::Datelike::day(&r.date), r.count))
        .collect();
    assert_eq!(dates, vec![(1, 2), (2, 1), (4, 2), (7, 1), (9, 2)]);

    let top = &report.orders.top_customers;
    assert!(top.len() <= 5);
    assert!(top.windows(2).all(|w| w[0].total_value >= w[1].total_value));
    assert_eq!(top[0].group, "Stark");
    // Acme Corp (1200.50 + 99.50) ties Globex (300 + 1000); names break the tie.
    assert_eq!(top[1].group, "Acme Corp");
    assert_eq!(top[1].order_count, 2);
    assert_eq!(top[1].total_value, dec!(1300));
    assert_eq!(top[2].group, "Globex");
    assert_eq!(top[2].total_value, top[1].total_value);
}

#[test]
fn shipment_views_match_fixture() {
    let snap = fixture();
    let report = AnalyticsEngine::new().build_dashboard(&snap, &DashboardCriteria::default());

    let perf: Vec<(&str, usize, Option<Decimal>)> = report
        .shipments
        .carrier_performance
        .iter()
        .map(|p| (p.group.as_str(), p.total_count, p.on_time_pct))
        .collect();
    assert_eq!(perf[0], ("DHL", 1, Some(dec!(100))));
    assert_eq!(perf[2], ("UPS", 2, Some(dec!(50))));
    let fedex = perf[1].2.unwrap();
    assert!(fedex > dec!(66.66) && fedex < dec!(66.67));

    let labels: Vec<&str> = report.shipments.timeline.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["SHP-0001", "SHP-0002", "SHP-0004", "SHP-0006"]);
}

#[test]
fn timeline_follows_shipment_filters() {
    let snap = fixture();
    let criteria = DashboardCriteria {
        orders: OrderCriteria::default(),
        shipments: ShipmentCriteria {
            status: Restriction::from_selection(["Delayed"]),
            carrier: Restriction::Unrestricted,
        },
    };

    let report = AnalyticsEngine::new().build_dashboard(&snap, &criteria);
    assert_eq!(report.shipments.timeline.len(), 2);
    assert!(report.shipments.timeline.iter().all(|t| t.status == "Delayed"));
    // Charts still cover the whole snapshot under the default scope.
    assert_eq!(report.shipments.carrier_performance.len(), 3);
}

#[test]
fn repeated_invocation_is_deterministic() {
    let snap = fixture();
    let engine = AnalyticsEngine::new();
    let criteria = DashboardCriteria::default();
    assert_eq!(
        engine.build_dashboard(&snap, &criteria),
        engine.build_dashboard(&snap, &criteria)
    );
}
