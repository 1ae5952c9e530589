//! Inventory persistence
//!
//! The forecaster only reads items and sales; stock corrections go back
//! through [`InventoryStore::update_stock_batch`].

use crate::data::{InventoryItem, SaleRecord};
use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::collections::HashSet;
use std::sync::RwLock;
use tracing::info;

/// Read access to inventory and sales plus batch stock updates
pub trait InventoryStore: Send + Sync {
    /// All inventory items
    fn items(&self) -> Result<Vec<InventoryItem>>;

    /// The full sales table
    fn sales(&self) -> Result<Vec<SaleRecord>>;

    /// Set `current_stock` for each `(id, stock)` pair, all or nothing.
    ///
    /// Returns the number of items updated.
    fn update_stock_batch(&self, updates: &[(i64, u32)]) -> Result<usize>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Vec<InventoryItem>>,
    sales: RwLock<Vec<SaleRecord>>,
}

/// Premium office equipment catalog used for demo data:
/// name, category, stock, reorder point, unit cost, selling price
const MOCK_CATALOG: [(&str, &str, u32, u32, f64, f64); 15] = [
    ("Herman Miller Aeron Chair", "Furniture", 12, 15, 800.00, 1450.00),
    ("MacBook Pro M3 Max", "Computers", 8, 10, 2200.00, 3199.00),
    ("Dell UltraSharp 32 4K Monitor", "Displays", 25, 12, 600.00, 950.00),
    ("Logitech MX Master 3S", "Accessories", 45, 20, 60.00, 99.00),
    ("Keychron Q1 Pro Mechanical Keyboard", "Accessories", 30, 10, 140.00, 220.00),
    ("Sony WH-1000XM5 Headphones", "Audio", 18, 15, 250.00, 399.00),
    ("iPad Pro 12.9-inch", "Tablets", 14, 10, 900.00, 1199.00),
    ("Standing Desk Pro (Walnut)", "Furniture", 20, 8, 450.00, 850.00),
    ("CalDigit TS4 Docking Station", "Accessories", 15, 10, 280.00, 400.00),
    ("Fujitsu ScanSnap iX1600", "Office", 10, 5, 350.00, 500.00),
    ("Epson EcoTank Pro ET-5850", "Printers", 8, 4, 600.00, 899.00),
    ("Ubiquiti UniFi Dream Machine", "Networking", 12, 8, 300.00, 450.00),
    ("Samsung 2TB T7 Shield SSD", "Storage", 50, 25, 110.00, 180.00),
    ("Poly Studio P15 Video Bar", "Conferencing", 16, 6, 400.00, 599.00),
    ("Dyson Purifier Cool Gen1", "Office Environment", 10, 5, 350.00, 550.00),
];

/// Days of mock sales generated per product, ending today
pub const MOCK_HISTORY_DAYS: i64 = 60;

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given records
    pub fn with_records(items: Vec<InventoryItem>, sales: Vec<SaleRecord>) -> Self {
        Self {
            items: RwLock::new(items),
            sales: RwLock::new(sales),
        }
    }

    /// Create a store seeded with the demo catalog and random daily sales
    pub fn with_mock_data<R: Rng>(rng: &mut R, today: NaiveDate) -> Result<Self> {
        let store = Self::new();
        store.seed_mock_data(rng, today)?;
        Ok(store)
    }

    /// Whether the store holds no inventory
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read_items()?.is_empty())
    }

    /// Seed demo data, but only into an empty store.
    ///
    /// Returns whether anything was inserted.
    pub fn seed_mock_data<R: Rng>(&self, rng: &mut R, today: NaiveDate) -> Result<bool> {
        if !self.is_empty()? {
            return Ok(false);
        }

        let mut items = self.write_items()?;
        let mut sales = self
            .sales
            .write()
            .map_err(|_| ForecastError::StoreError("sales lock poisoned".to_string()))?;

        for (index, &(name, category, stock, reorder, cost, price)) in MOCK_CATALOG.iter().enumerate() {
            let id = index as i64 + 1;
            items.push(InventoryItem {
                id,
                product_name: name.to_string(),
                category: Some(category.to_string()),
                current_stock: stock,
                reorder_point: reorder,
                unit_cost: cost,
                selling_price: price,
            });

            let max_qty = if category == "Accessories" { 8 } else { 3 };
            for day in 0..MOCK_HISTORY_DAYS {
                let mut qty = rng.gen_range(0..=max_qty);
                // 30% chance of a day without sales
                if rng.gen::<f64>() > 0.7 {
                    qty = 0;
                }
                sales.push(SaleRecord::new(id, today - Duration::days(day), qty));
            }
        }

        info!(items = items.len(), sales = sales.len(), "seeded mock inventory");
        Ok(true)
    }

    fn read_items(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<InventoryItem>>> {
        self.items
            .read()
            .map_err(|_| ForecastError::StoreError("inventory lock poisoned".to_string()))
    }

    fn write_items(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<InventoryItem>>> {
        self.items
            .write()
            .map_err(|_| ForecastError::StoreError("inventory lock poisoned".to_string()))
    }
}

impl InventoryStore for MemoryStore {
    fn items(&self) -> Result<Vec<InventoryItem>> {
        Ok(self.read_items()?.clone())
    }

    fn sales(&self) -> Result<Vec<SaleRecord>> {
        let sales = self
            .sales
            .read()
            .map_err(|_| ForecastError::StoreError("sales lock poisoned".to_string()))?;
        Ok(sales.clone())
    }

    fn update_stock_batch(&self, updates: &[(i64, u32)]) -> Result<usize> {
        let mut items = self.write_items()?;

        let known: HashSet<i64> = items.iter().map(|item| item.id).collect();
        if let Some((missing, _)) = updates.iter().find(|(id, _)| !known.contains(id)) {
            return Err(ForecastError::StoreError(format!(
                "No inventory item with id {}",
                missing
            )));
        }

        for &(id, stock) in updates {
            if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                item.current_stock = stock;
            }
        }

        info!(updated = updates.len(), "applied stock updates");
        Ok(updates.len())
    }
}
