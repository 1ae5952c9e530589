use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use stockout_forecast::{
    ForecastConfig, ForecastResult, InventoryItem, SaleRecord, StockStatus, StockoutForecaster,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn as_of() -> NaiveDateTime {
    today().and_hms_opt(12, 0, 0).unwrap()
}

/// One sale per day for `days` consecutive days ending today
fn daily_sales(product_id: i64, days: i64, quantity: u32) -> Vec<SaleRecord> {
    (0..days)
        .map(|day| SaleRecord::new(product_id, today() - Duration::days(day), quantity))
        .collect()
}

/// Sales of 1, 2, 3, ... on consecutive days ending today
fn rising_sales(product_id: i64, days: i64) -> Vec<SaleRecord> {
    (0..days)
        .map(|day| {
            SaleRecord::new(
                product_id,
                today() - Duration::days(days - 1 - day),
                (day + 1) as u32,
            )
        })
        .collect()
}

#[fixture]
fn forecaster() -> StockoutForecaster {
    StockoutForecaster::new()
}

#[rstest]
fn test_no_matching_sales_is_no_data(forecaster: StockoutForecaster) {
    let other_product = daily_sales(2, 30, 5);

    let result = forecaster.forecast_at(&InventoryItem::new(1, 100), &other_product, as_of());

    assert_eq!(result, ForecastResult::no_data());
    assert_eq!(result.burn_rate, 0.0);
    assert_eq!(result.days_to_stockout, f64::INFINITY);
    assert_eq!(result.status, StockStatus::NoData);
}

#[rstest]
fn test_empty_history_is_no_data(forecaster: StockoutForecaster) {
    let result = forecaster.forecast_at(&InventoryItem::new(1, 100), &[], as_of());
    assert_eq!(result.status, StockStatus::NoData);
}

#[rstest]
fn test_only_old_sales_is_stable(forecaster: StockoutForecaster) {
    let old: Vec<SaleRecord> = (31..60)
        .map(|day| SaleRecord::new(1, today() - Duration::days(day), 4))
        .collect();

    let result = forecaster.forecast_at(&InventoryItem::new(1, 100), &old, as_of());

    assert_eq!(result, ForecastResult::stable());
    assert_eq!(result.days_to_stockout, f64::INFINITY);
}

#[rstest]
fn test_window_lower_bound(forecaster: StockoutForecaster) {
    let item = InventoryItem::new(1, 100);
    let exactly_thirty = vec![SaleRecord::new(1, today() - Duration::days(30), 4)];

    // Evaluated at midnight the boundary date is inside the window
    let midnight = today().and_hms_opt(0, 0, 0).unwrap();
    let inside = forecaster.forecast_at(&item, &exactly_thirty, midnight);
    assert_eq!(inside.status, StockStatus::Healthy);
    assert_eq!(inside.burn_rate, 4.0);

    // Later in the day it has fallen out
    let outside = forecaster.forecast_at(&item, &exactly_thirty, as_of());
    assert_eq!(outside.status, StockStatus::Stable);
}

#[rstest]
fn test_high_burn_is_critical(forecaster: StockoutForecaster) {
    let sales = daily_sales(1, 30, 20);

    let result = forecaster.forecast_at(&InventoryItem::new(1, 50), &sales, as_of());

    assert_eq!(result.burn_rate, 20.0);
    assert_eq!(result.days_to_stockout, 2.5);
    assert_eq!(result.status, StockStatus::Critical);
}

#[rstest]
fn test_slow_burn_is_healthy(forecaster: StockoutForecaster) {
    let sales = daily_sales(1, 30, 1);

    let result = forecaster.forecast_at(&InventoryItem::new(1, 1000), &sales, as_of());

    assert_eq!(result.burn_rate, 1.0);
    assert_eq!(result.days_to_stockout, 1000.0);
    assert_eq!(result.status, StockStatus::Healthy);
}

#[rstest]
fn test_zero_stock_is_immediately_critical(forecaster: StockoutForecaster) {
    let sales = daily_sales(1, 10, 3);

    let result = forecaster.forecast_at(&InventoryItem::new(1, 0), &sales, as_of());

    assert_eq!(result.days_to_stockout, 0.0);
    assert_eq!(result.status, StockStatus::Critical);
}

#[rstest]
fn test_five_dates_use_mean(forecaster: StockoutForecaster) {
    // 1..=5: mean 3, trend would project 6
    let sales = rising_sales(1, 5);

    let result = forecaster.forecast_at(&InventoryItem::new(1, 30), &sales, as_of());

    assert_eq!(result.burn_rate, 3.0);
    assert_eq!(result.days_to_stockout, 10.0);
}

#[rstest]
fn test_six_dates_use_trend(forecaster: StockoutForecaster) {
    // 1..=6: mean 3.5, trend projects 7
    let sales = rising_sales(1, 6);

    let result = forecaster.forecast_at(&InventoryItem::new(1, 35), &sales, as_of());

    assert_eq!(result.burn_rate, 7.0);
    assert_eq!(result.days_to_stockout, 5.0);
    assert_eq!(result.status, StockStatus::Critical);
}

#[rstest]
fn test_same_day_sales_count_as_one_date(forecaster: StockoutForecaster) {
    // Ten sales spread over five dates stays on the mean path
    let mut sales = rising_sales(1, 5);
    sales.extend(rising_sales(1, 5));

    let result = forecaster.forecast_at(&InventoryItem::new(1, 60), &sales, as_of());

    assert_eq!(result.burn_rate, 6.0);
    assert_eq!(result.days_to_stockout, 10.0);
}

#[rstest]
fn test_falling_trend_is_floored(forecaster: StockoutForecaster) {
    let sales: Vec<SaleRecord> = (0..8)
        .map(|day| SaleRecord::new(1, today() - Duration::days(7 - day), (14 - 2 * day) as u32))
        .collect();

    let result = forecaster.forecast_at(&InventoryItem::new(1, 5), &sales, as_of());

    assert_eq!(result.burn_rate, 0.1);
    assert_eq!(result.days_to_stockout, 50.0);
    assert_eq!(result.status, StockStatus::Healthy);
}

#[rstest]
fn test_zero_demand_still_has_finite_runway(forecaster: StockoutForecaster) {
    let sales = daily_sales(1, 3, 0);

    let result = forecaster.forecast_at(&InventoryItem::new(1, 2), &sales, as_of());

    assert_eq!(result.burn_rate, 0.1);
    assert_eq!(result.days_to_stockout, 20.0);
    assert!(result.days_to_stockout.is_finite());
}

#[rstest]
#[case(0)]
#[case(7)]
#[case(123)]
#[case(4999)]
fn test_runway_matches_stock_over_rate(forecaster: StockoutForecaster, #[case] stock: u32) {
    let sales: Vec<SaleRecord> = (0..20)
        .map(|day| SaleRecord::new(1, today() - Duration::days(day), 3 + (day % 4) as u32))
        .collect();

    let result = forecaster.forecast_at(&InventoryItem::new(1, stock), &sales, as_of());

    assert!(result.burn_rate >= 0.1);
    assert_relative_eq!(
        result.days_to_stockout,
        stock as f64 / result.burn_rate,
        epsilon = 0.05 + stock as f64 * 0.001
    );
}

#[rstest]
fn test_gaps_keep_calendar_spacing(forecaster: StockoutForecaster) {
    // Sales every other day rising by one: the slope is 0.5 per day
    let sales: Vec<SaleRecord> = (0..6)
        .map(|n| SaleRecord::new(1, today() - Duration::days(10 - 2 * n), (n + 1) as u32))
        .collect();

    let result = forecaster.forecast_at(&InventoryItem::new(1, 100), &sales, as_of());

    // Offsets 0..=10, line y = 0.5x + 1 evaluated at 11
    assert_eq!(result.burn_rate, 6.5);
}

#[rstest]
fn test_forecast_is_idempotent(forecaster: StockoutForecaster) {
    let sales = rising_sales(1, 12);
    let item = InventoryItem::new(1, 80);

    let first = forecaster.forecast_at(&item, &sales, as_of());
    let second = forecaster.forecast_at(&item, &sales, as_of());

    assert_eq!(first, second);
}

#[rstest]
fn test_half_day_runway_rounds_to_even(forecaster: StockoutForecaster) {
    // 5 / 4 = 1.25 days
    let sales = vec![SaleRecord::new(1, today(), 4)];

    let result = forecaster.forecast_at(&InventoryItem::new(1, 5), &sales, as_of());

    assert_eq!(result.burn_rate, 4.0);
    assert_eq!(result.days_to_stockout, 1.2);
    assert_eq!(result.status, StockStatus::Critical);
}

/// Sales of 10, 10 and 11 on the last three days: mean 10.333...
fn uneven_sales(product_id: i64) -> Vec<SaleRecord> {
    vec![
        SaleRecord::new(product_id, today() - Duration::days(2), 10),
        SaleRecord::new(product_id, today() - Duration::days(1), 10),
        SaleRecord::new(product_id, today(), 11),
    ]
}

#[rstest]
fn test_burn_rate_rounds_to_two_decimals(forecaster: StockoutForecaster) {
    let result = forecaster.forecast_at(&InventoryItem::new(1, 100), &uneven_sales(1), as_of());

    assert_eq!(result.burn_rate, 10.33);
    // 100 / 10.333... = 9.677...
    assert_eq!(result.days_to_stockout, 9.7);
    assert_eq!(result.status, StockStatus::Healthy);
}

#[rstest]
fn test_status_uses_unrounded_runway(forecaster: StockoutForecaster) {
    // 72 / 10.333... = 6.97 days, shown as 7.0 but still below the threshold
    let result = forecaster.forecast_at(&InventoryItem::new(1, 72), &uneven_sales(1), as_of());

    assert_eq!(
        result,
        ForecastResult {
            burn_rate: 10.33,
            days_to_stockout: 7.0,
            status: StockStatus::Critical,
        }
    );
}

#[test]
fn test_window_wider_than_calendar_keeps_all_sales() {
    let config = ForecastConfig {
        window_days: 200_000_000,
        ..ForecastConfig::default()
    };
    let forecaster = StockoutForecaster::with_config(&config).unwrap();
    let sales = vec![SaleRecord::new(1, today() - Duration::days(5000), 4)];

    let result = forecaster.forecast_at(&InventoryItem::new(1, 40), &sales, as_of());

    assert_eq!(result.burn_rate, 4.0);
    assert_eq!(result.days_to_stockout, 10.0);
    assert_eq!(result.status, StockStatus::Healthy);
}

#[test]
fn test_forecast_uses_current_time() {
    let today = chrono::Local::now().date_naive();
    let sales: Vec<SaleRecord> = (0..10)
        .map(|day| SaleRecord::new(1, today - Duration::days(day), 2))
        .collect();

    let result = StockoutForecaster::new().forecast(&InventoryItem::new(1, 10), &sales);

    assert_eq!(result.burn_rate, 2.0);
    assert_eq!(result.status, StockStatus::Critical);
}

#[test]
fn test_configured_threshold_and_window() {
    let config = ForecastConfig {
        window_days: 5,
        min_trend_points: 2,
        ..ForecastConfig::default()
    };
    let forecaster = StockoutForecaster::with_config(&config).unwrap();

    // Only the last five days (offsets 0..=4 rising 26..=30) stay in the window
    let sales = rising_sales(1, 30);
    let result = forecaster.forecast_at(&InventoryItem::new(1, 310), &sales, as_of());

    assert_eq!(result.burn_rate, 31.0);
    assert_eq!(result.days_to_stockout, 10.0);
}

#[rstest]
fn test_forecast_all(forecaster: StockoutForecaster) {
    let items = vec![
        InventoryItem::new(1, 50),
        InventoryItem::new(2, 50),
        InventoryItem::new(3, 50),
    ];
    let mut sales = daily_sales(1, 30, 20);
    sales.extend((40..45).map(|day| SaleRecord::new(2, today() - Duration::days(day), 1)));

    let results = forecaster.forecast_all(&items, &sales, as_of());

    let statuses: Vec<(i64, StockStatus)> = results.iter().map(|(id, r)| (*id, r.status)).collect();
    assert_eq!(
        statuses,
        vec![
            (1, StockStatus::Critical),
            (2, StockStatus::Stable),
            (3, StockStatus::NoData),
        ]
    );
}
