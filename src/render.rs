use analytics::DashboardReport;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use rust_decimal::Decimal;

/// Prints every view of the report as a titled table.
pub fn print_report(report: &DashboardReport) {
    println!(
        "Filtered: {} orders, {} shipments\n",
        report.filtered_orders.len(),
        report.filtered_shipments.len()
    );

    let mut orders = new_table(&["Order", "Customer", "Status", "Date", "Value"]);
    for o in &report.filtered_orders {
        orders.add_row(vec![
            Cell::new(o.order_id()),
            Cell::new(o.customer()),
            Cell::new(o.status()),
            Cell::new(o.order_date().format("%Y-%m-%d %H:%M")),
            Cell::new(money(o.total_value())),
        ]);
    }
    section("Orders", orders);

    let mut statuses = new_table(&["Status", "Count"]);
    for row in &report.orders.status_distribution {
        statuses.add_row(vec![Cell::new(&row.status), Cell::new(row.count)]);
    }
    section("Orders by Status", statuses);

    let mut series = new_table(&["Date", "Count"]);
    for row in &report.orders.orders_over_time {
        series.add_row(vec![Cell::new(row.date), Cell::new(row.count)]);
    }
    section("Orders Over Time", series);

    let mut top = new_table(&["Customer", "# Orders", "Total Value"]);
    for row in &report.orders.top_customers {
        top.add_row(vec![
            Cell::new(&row.group),
            Cell::new(row.order_count),
            Cell::new(money(row.total_value)),
        ]);
    }
    section("Top Customers", top);

    let mut shipments = new_table(&["Shipment", "Carrier", "Status", "Shipped", "ETA"]);
    for s in &report.filtered_shipments {
        let day = |d: Option<chrono::DateTime<chrono::Utc>>| {
            d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
        };
        shipments.add_row(vec![
            Cell::new(s.shipment_id()),
            Cell::new(s.carrier()),
            Cell::new(s.status()),
            Cell::new(day(s.ship_date())),
            Cell::new(day(s.estimated_arrival())),
        ]);
    }
    section("Shipments", shipments);

    let mut shipment_statuses = new_table(&["Status", "Count"]);
    for row in &report.shipments.status_distribution {
        shipment_statuses.add_row(vec![Cell::new(&row.status), Cell::new(row.count)]);
    }
    section("Shipments by Status", shipment_statuses);

    let mut carriers = new_table(&["Carrier", "Shipments", "Delayed", "On-Time %"]);
    for row in &report.shipments.carrier_performance {
        let pct = row
            .on_time_pct
            .map(|p| p.round_dp(1).to_string())
            .unwrap_or_else(|| "no data".to_string());
        carriers.add_row(vec![
            Cell::new(&row.group),
            Cell::new(row.total_count),
            Cell::new(row.delayed_count),
            Cell::new(pct),
        ]);
    }
    section("Carrier Performance", carriers);

    let mut timeline = new_table(&["Task", "Start", "Finish", "Status"]);
    for entry in &report.shipments.timeline {
        timeline.add_row(vec![
            Cell::new(&entry.label),
            Cell::new(entry.start.format("%Y-%m-%d %H:%M")),
            Cell::new(entry.finish.format("%Y-%m-%d %H:%M")),
            Cell::new(&entry.status),
        ]);
    }
    section("Estimated Delivery Timeline", timeline);
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn section(title: &str, table: Table) {
    if table.row_iter().next().is_none() {
        println!("{title}: no data\n");
        return;
    }
    println!("{title}\n{table}\n");
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}
