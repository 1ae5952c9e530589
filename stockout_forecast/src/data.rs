//! Inventory and sales records, daily aggregation and CSV loading

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A stocked product as held by the inventory store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Product identifier
    pub id: i64,
    /// Display name
    pub product_name: String,
    /// Product category
    pub category: Option<String>,
    /// Units currently on hand
    pub current_stock: u32,
    /// Stock level below which restocking should be triggered
    pub reorder_point: u32,
    /// Purchase cost per unit
    pub unit_cost: f64,
    /// Sale price per unit
    pub selling_price: f64,
}

impl InventoryItem {
    /// Create an item with only the fields the forecaster reads
    pub fn new(id: i64, current_stock: u32) -> Self {
        Self {
            id,
            product_name: format!("Product {}", id),
            category: None,
            current_stock,
            reorder_point: 0,
            unit_cost: 0.0,
            selling_price: 0.0,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    /// Set the reorder point
    pub fn with_reorder_point(mut self, reorder_point: u32) -> Self {
        self.reorder_point = reorder_point;
        self
    }

    /// Set the unit cost
    pub fn with_unit_cost(mut self, unit_cost: f64) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    /// Whether stock has fallen below the reorder point
    pub fn below_reorder_point(&self) -> bool {
        self.current_stock < self.reorder_point
    }

    /// Current stock divided by reorder point; infinite when no reorder point is set
    pub fn stock_ratio(&self) -> f64 {
        if self.reorder_point == 0 {
            return f64::INFINITY;
        }
        self.current_stock as f64 / self.reorder_point as f64
    }

    /// Value of the stock on hand at purchase cost
    pub fn stock_value(&self) -> f64 {
        self.current_stock as f64 * self.unit_cost
    }
}

/// A recorded sale of one product on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub product_id: i64,
    pub sale_date: NaiveDate,
    pub quantity_sold: u32,
}

impl SaleRecord {
    pub fn new(product_id: i64, sale_date: NaiveDate, quantity_sold: u32) -> Self {
        Self {
            product_id,
            sale_date,
            quantity_sold,
        }
    }
}

/// Units sold on one calendar date, positioned relative to the earliest date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAggregate {
    /// Days elapsed since the earliest aggregated date
    pub days_since_window_start: i64,
    /// Sum of quantities sold on that date
    pub total_quantity: u64,
}

/// Collapse sales into one point per distinct date, ordered by date.
///
/// Offsets are measured from the earliest date present, not from the
/// boundary of any window the records were selected from.
pub fn aggregate_daily<'a, I>(records: I) -> Vec<DailyAggregate>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.sale_date).or_insert(0) += u64::from(record.quantity_sold);
    }

    let Some(first) = totals.keys().next().copied() else {
        return Vec::new();
    };

    totals
        .into_iter()
        .map(|(date, total_quantity)| DailyAggregate {
            days_since_window_start: (date - first).num_days(),
            total_quantity,
        })
        .collect()
}

/// Columns an inventory sheet must carry
pub const REQUIRED_INVENTORY_COLUMNS: [&str; 3] = ["product_name", "current_stock", "reorder_point"];

/// Inventory row as found in a sheet; ids and pricing may be absent
#[derive(Debug, Deserialize)]
struct InventoryRow {
    id: Option<i64>,
    product_name: String,
    category: Option<String>,
    current_stock: u32,
    reorder_point: u32,
    #[serde(default)]
    unit_cost: Option<f64>,
    #[serde(default)]
    selling_price: Option<f64>,
}

/// Loader for inventory and sales records
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load sales history from a CSV file with
    /// `product_id,sale_date,quantity_sold` columns
    pub fn sales_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SaleRecord>> {
        let file = File::open(path)?;
        Self::sales_from_reader(file)
    }

    /// Load sales history from any CSV source
    pub fn sales_from_reader<R: Read>(reader: R) -> Result<Vec<SaleRecord>> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        for row in rdr.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    /// Load inventory from a CSV file
    pub fn inventory_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<InventoryItem>> {
        let file = File::open(path)?;
        Self::inventory_from_reader(file)
    }

    /// Load inventory from any CSV source.
    ///
    /// Rows without an `id` column are numbered from 1 in file order.
    pub fn inventory_from_reader<R: Read>(reader: R) -> Result<Vec<InventoryItem>> {
        let mut rdr = csv::Reader::from_reader(reader);

        let headers = rdr.headers()?.clone();
        let missing: Vec<&str> = REQUIRED_INVENTORY_COLUMNS
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h.trim() == *col))
            .collect();
        if !missing.is_empty() {
            return Err(ForecastError::DataError(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        let mut items = Vec::new();
        for (index, row) in rdr.deserialize::<InventoryRow>().enumerate() {
            let row = row?;
            items.push(InventoryItem {
                id: row.id.unwrap_or(index as i64 + 1),
                product_name: row.product_name,
                category: row.category.filter(|c| !c.is_empty()),
                current_stock: row.current_stock,
                reorder_point: row.reorder_point,
                unit_cost: row.unit_cost.unwrap_or(0.0),
                selling_price: row.selling_price.unwrap_or(0.0),
            });
        }
        Ok(items)
    }
}
