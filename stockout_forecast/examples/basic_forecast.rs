use chrono::{Duration, NaiveDate};
use stockout_forecast::models::{BurnRateModel, DailyMean, TrendProjection};
use stockout_forecast::{data::aggregate_daily, InventoryItem, SaleRecord, StockoutForecaster};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Stockout Forecast: Basic Example");
    println!("================================\n");

    let today = NaiveDate::from_ymd_opt(2024, 6, 30).ok_or("invalid date")?;
    let as_of = today.and_hms_opt(9, 0, 0).ok_or("invalid time")?;

    // Demand climbing by one unit every three days
    let sales: Vec<SaleRecord> = (0..30)
        .map(|day| SaleRecord::new(1, today - Duration::days(day), 2 + (29 - day as u32) / 3))
        .collect();

    let daily = aggregate_daily(&sales);
    println!("Aggregated {} sale dates", daily.len());
    println!("Daily mean:       {:.2}", DailyMean::new().estimate(&daily)?);
    println!(
        "Trend projection: {:.2}\n",
        TrendProjection::next_day().estimate(&daily)?
    );

    let forecaster = StockoutForecaster::new();
    for stock in [10, 60, 400] {
        let item = InventoryItem::new(1, stock);
        let result = forecaster.forecast_at(&item, &sales, as_of);
        println!(
            "stock {:>4}: burn {:.2}/day, runway {:.1} days, {}",
            stock, result.burn_rate, result.days_to_stockout, result.status
        );
    }

    Ok(())
}
