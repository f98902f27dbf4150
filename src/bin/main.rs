// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::{Parser, ValueEnum};
use csv::{ReaderBuilder, Trim, Writer};
use order_pricing_rs::{
    Adjustment, Engine, ItemKind, LineItem, OrderId, OrderTotals, ParseAdjustmentError,
    PricingSettings, ProductId, ReportSummary,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing::{Level, error, info, warn};

/// Order Pricing - Price order line items from CSV files
///
/// Reads line items from a CSV file, groups them by order, and writes the
/// priced items to stdout. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "order-pricing-rs")]
#[command(about = "Prices rental and sale orders from a line item CSV", long_about = None)]
struct Args {
    /// Path to CSV file with line items
    ///
    /// Expected format: order,product,kind,unit_price,quantity,discount,surcharge
    /// Example: cargo run -- items.csv --discount 10% > priced.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Order-level discount applied to every order (`10%` or `5.00`)
    #[arg(long, value_name = "ADJ")]
    discount: Option<Adjustment>,

    /// Order-level surcharge applied to every order (`10%` or `5.00`)
    #[arg(long, value_name = "ADJ")]
    surcharge: Option<Adjustment>,

    /// Settings file (defaults to pricing.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Log pricing details
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One row per priced item
    Csv,
    /// Every order's totals plus the report summary
    Json,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = match PricingSettings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Error loading settings: {e}");
            process::exit(1);
        }
    };
    let engine = Engine::with_settings(settings);

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            error!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let orders = match read_orders(BufReader::new(file)) {
        Ok(orders) => orders,
        Err(e) => {
            error!("Error reading line items: {e}");
            process::exit(1);
        }
    };

    let priced = price_orders(&engine, orders, args.discount, args.surcharge);
    let scale = engine.settings().scale;

    let result = match args.format {
        OutputFormat::Csv => {
            write_items(&priced, scale, std::io::stdout()).map_err(|e| e.to_string())
        }
        OutputFormat::Json => {
            write_report(&priced, scale, std::io::stdout()).map_err(|e| e.to_string())
        }
    };
    if let Err(e) = result {
        error!("Error writing output: {e}");
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `order, product, kind, unit_price, quantity, discount, surcharge`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    order: u32,
    product: u32,
    kind: ItemKind,
    unit_price: Decimal,
    quantity: u32,
    #[serde(default)]
    discount: Option<String>,
    #[serde(default)]
    surcharge: Option<String>,
}

impl CsvRecord {
    fn into_line_item(self) -> Result<(OrderId, LineItem), ParseAdjustmentError> {
        let discount = self.discount.as_deref().map(str::parse::<Adjustment>).transpose()?;
        let surcharge = self.surcharge.as_deref().map(str::parse::<Adjustment>).transpose()?;

        let item = LineItem {
            product_id: ProductId(self.product),
            kind: self.kind,
            unit_price: self.unit_price,
            quantity: self.quantity,
            discount,
            surcharge,
        };
        Ok((OrderId(self.order), item))
    }
}

/// Reads line items and groups them by order.
///
/// Malformed rows and rows with unparseable adjustments are skipped with a
/// warning.
///
/// # Example
///
/// ```csv
/// order,product,kind,unit_price,quantity,discount,surcharge
/// 1,10,rental,100.00,1,10%,
/// 1,11,sale,50.00,2,5,
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the header cannot be read.
pub fn read_orders<R: Read>(reader: R) -> Result<BTreeMap<OrderId, Vec<LineItem>>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true) // trailing adjustment columns may be omitted
        .has_headers(true)
        .from_reader(reader);

    let mut orders: BTreeMap<OrderId, Vec<LineItem>> = BTreeMap::new();
    for result in rdr.deserialize::<CsvRecord>() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping malformed row: {e}");
                continue;
            }
        };

        match record.into_line_item() {
            Ok((order_id, item)) => orders.entry(order_id).or_default().push(item),
            Err(e) => warn!("Skipping row with invalid adjustment: {e}"),
        }
    }

    Ok(orders)
}

/// Validates and prices every order, dropping the ones that fail validation.
pub fn price_orders(
    engine: &Engine,
    orders: BTreeMap<OrderId, Vec<LineItem>>,
    discount: Option<Adjustment>,
    surcharge: Option<Adjustment>,
) -> Vec<(OrderId, OrderTotals)> {
    let scale = engine.settings().scale;
    let mut priced = Vec::with_capacity(orders.len());

    for (order_id, items) in orders {
        if let Err(e) = engine.validate(&items, discount.as_ref(), surcharge.as_ref()) {
            warn!("Skipping order {order_id}: {e}");
            continue;
        }

        let totals = engine.compute_order_totals(&items, discount, surcharge);
        info!(
            order = %order_id,
            subtotal = %totals.subtotal.round_dp(scale),
            discount = %totals.total_discount_amount.round_dp(scale),
            surcharge = %totals.total_surcharge_amount.round_dp(scale),
            total = %totals.grand_total.round_dp(scale),
            "order priced"
        );
        priced.push((order_id, totals));
    }

    priced
}

fn summarize(orders: &[(OrderId, OrderTotals)]) -> ReportSummary {
    let mut summary = ReportSummary::new();
    for (_, totals) in orders {
        summary.record(totals, &[]);
    }
    summary
}

#[derive(Debug, Serialize)]
struct ItemRow {
    order: OrderId,
    product: ProductId,
    kind: ItemKind,
    quantity: u32,
    unit_price: Decimal,
    subtotal: Decimal,
    discount: Decimal,
    surcharge: Decimal,
    total: Decimal,
}

/// Writes one CSV row per priced item, amounts rounded to `scale`.
///
/// # CSV Format
///
/// Columns: `order, product, kind, quantity, unit_price, subtotal, discount, surcharge, total`
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_items<W: Write>(
    orders: &[(OrderId, OrderTotals)],
    scale: u32,
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for (order_id, totals) in orders {
        for item in &totals.items {
            let item = item.rounded(scale);
            wtr.serialize(ItemRow {
                order: *order_id,
                product: item.product_id,
                kind: item.kind,
                quantity: item.quantity,
                unit_price: item.unit_price,
                subtotal: item.subtotal,
                discount: item.discount_amount,
                surcharge: item.surcharge_amount,
                total: item.total,
            })?;
        }
    }

    wtr.flush()?;

    let summary = summarize(orders).rounded(scale);
    info!(
        orders = summary.total_orders,
        items = summary.total_items,
        amount = %summary.total_amount,
        discount = %summary.total_discount,
        "report complete"
    );
    Ok(())
}

#[derive(Debug, Serialize)]
struct OrderReport {
    order: OrderId,
    #[serde(flatten)]
    totals: OrderTotals,
}

#[derive(Debug, Serialize)]
struct Report {
    orders: Vec<OrderReport>,
    summary: ReportSummary,
}

/// Writes every order's rounded totals and the summary as JSON.
///
/// # Errors
///
/// Returns a JSON error if serialization or writing fails.
pub fn write_report<W: Write>(
    orders: &[(OrderId, OrderTotals)],
    scale: u32,
    mut writer: W,
) -> Result<(), serde_json::Error> {
    let report = Report {
        orders: orders
            .iter()
            .map(|(order, totals)| OrderReport {
                order: *order,
                totals: totals.rounded(scale),
            })
            .collect(),
        summary: summarize(orders).rounded(scale),
    };

    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    Ok(())
}
