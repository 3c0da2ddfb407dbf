use chrono::{NaiveDate, TimeZone, Utc};
use koperasi::{db_interaction::get_report_data, domain::DateRange, models::{ProfitRow, ReportRow, TransactionRow}};

use crate::helpers::TestApp;

#[actix_web::test]
async fn history_lists_purchases_with_item_details(){
    let app = TestApp::spawn_app().await;
    let token = app.login_token().await;
    let id_barang = app.insert_item("Gula Pasir", 10, 5.0, 8.0);

    app.post_beli(&token, id_barang, 4, "Budi").await;

    let response = app.get_report_endpoint("transaction_history", &token, &[]).await;
    assert_eq!(response.status().as_u16(), 200);

    let rows = response.json::<Vec<TransactionRow>>().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].nama_barang, "Gula Pasir");
    assert_eq!(rows[0].qty_pembelian, 4);
    assert_eq!(rows[0].harga_beli, 5.0);
    assert_eq!(rows[0].harga_jual, 8.0);
    assert_eq!(rows[0].nama_pembeli, "Budi");
}

#[actix_web::test]
async fn history_keeps_purchases_of_deleted_items(){
    let app = TestApp::spawn_app().await;
    let token = app.login_token().await;
    let id_barang = app.insert_item("Gula Pasir", 10, 5.0, 8.0);

    app.post_beli(&token, id_barang, 2, "Budi").await;
    app.delete_item(&token, id_barang).await;

    let rows = app.get_report_endpoint("transaction_history", &token, &[]).await
        .json::<Vec<TransactionRow>>()
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
}

#[actix_web::test]
async fn profit_is_computed_per_item(){
    let app = TestApp::spawn_app().await;
    let token = app.login_token().await;
    let gula = app.insert_item("Gula Pasir", 10, 5.0, 8.0);
    let beras = app.insert_item("Beras", 10, 10.0, 12.0);

    app.post_beli(&token, gula, 4, "Budi").await;
    app.post_beli(&token, beras, 1, "Siti").await;
    app.post_beli(&token, beras, 2, "Siti").await;

    let response = app.get_report_endpoint("get_profit", &token, &[]).await;
    assert_eq!(response.status().as_u16(), 200);

    let mut rows = response.json::<Vec<ProfitRow>>().await.unwrap();
    rows.sort_by(|a, b| a.nama_barang.cmp(&b.nama_barang));

    assert_eq!(rows, vec![
        ProfitRow{ nama_barang: "Beras".to_string(), profit: 6.0, qty_terjual: 3 },
        ProfitRow{ nama_barang: "Gula Pasir".to_string(), profit: 12.0, qty_terjual: 4 },
    ]);
}

#[actix_web::test]
async fn profit_respects_date_range(){
    let app = TestApp::spawn_app().await;
    let token = app.login_token().await;
    let old = app.insert_item("Beras", 10, 10.0, 12.0);
    let recent = app.insert_item("Gula Pasir", 10, 5.0, 8.0);

    app.post_beli(&token, old, 1, "Siti").await;
    app.post_beli(&token, recent, 4, "Budi").await;

    app.backdate_purchases(old, Utc.with_ymd_and_hms(2023, 1, 15, 9, 0, 0).unwrap());
    app.backdate_purchases(recent, Utc.with_ymd_and_hms(2024, 10, 31, 23, 30, 0).unwrap());

    let range = [("from_", "2024-10-01"), ("to_", "2024-10-31")];
    let rows = app.get_report_endpoint("get_profit", &token, &range).await
        .json::<Vec<ProfitRow>>()
        .await
        .unwrap();

    assert_eq!(rows, vec![
        ProfitRow{ nama_barang: "Gula Pasir".to_string(), profit: 12.0, qty_terjual: 4 },
    ]);

    let history = app.get_report_endpoint("transaction_history", &token, &range).await
        .json::<Vec<TransactionRow>>()
        .await
        .unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].nama_barang, "Gula Pasir");
}

#[actix_web::test]
async fn a_single_bound_is_ignored(){
    let app = TestApp::spawn_app().await;
    let token = app.login_token().await;
    let id_barang = app.insert_item("Beras", 10, 10.0, 12.0);

    app.post_beli(&token, id_barang, 1, "Siti").await;
    app.backdate_purchases(id_barang, Utc.with_ymd_and_hms(2023, 1, 15, 9, 0, 0).unwrap());

    let rows = app.get_report_endpoint("get_profit", &token, &[("from_", "2024-10-01")]).await
        .json::<Vec<ProfitRow>>()
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
}

#[actix_web::test]
async fn malformed_date_is_rejected(){
    let app = TestApp::spawn_app().await;
    let token = app.login_token().await;

    let response = app.get_report_endpoint("get_profit", &token, &[("from_", "31-10-2024"), ("to_", "2024-10-31")]).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn report_returns_pdf(){
    let app = TestApp::spawn_app().await;
    let token = app.login_token().await;
    let id_barang = app.insert_item("Gula Pasir", 10, 5.0, 8.0);

    app.post_beli(&token, id_barang, 4, "Budi").await;

    let response = app.get_report_endpoint("report", &token, &[("from_", "2000-01-01"), ("to_", "2100-12-31")]).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get("content-type").unwrap().to_str().unwrap(),
        "application/pdf"
    );

    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[actix_web::test]
async fn report_without_range_covers_everything(){
    let app = TestApp::spawn_app().await;
    let token = app.login_token().await;

    let response = app.get_report_endpoint("report", &token, &[]).await;
    assert_eq!(response.status().as_u16(), 200);

    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn report_row(nama_barang: &str, qty_pembelian: i64, harga_beli: f64, harga_jual: f64, profit: f64) -> ReportRow {
    ReportRow{ nama_barang: nama_barang.to_string(), qty_pembelian, harga_beli, harga_jual, profit }
}

// Gula bought 4 + 1 at margin 3, Beras bought 2 at margin 2.5
async fn seed_report_sales(app: &TestApp) -> (i32, i32) {
    let token = app.login_token().await;
    let gula = app.insert_item("Gula Pasir", 20, 5.0, 8.0);
    let beras = app.insert_item("Beras", 20, 10.0, 12.5);

    app.post_beli(&token, gula, 4, "Budi").await;
    app.post_beli(&token, gula, 1, "Siti").await;
    app.post_beli(&token, beras, 2, "Siti").await;

    (gula, beras)
}

#[actix_web::test]
async fn report_data_aggregates_per_item_with_total(){
    let app = TestApp::spawn_app().await;
    seed_report_sales(&app).await;

    let data = get_report_data(app.pool.get().unwrap(), None).await.unwrap();

    assert_eq!(data.rows, vec![
        report_row("Gula Pasir", 5, 5.0, 8.0, 15.0),
        report_row("Beras", 2, 10.0, 12.5, 5.0),
    ]);
    assert_eq!(data.total_profit, 20.0);
}

#[actix_web::test]
async fn report_data_only_counts_sales_in_range(){
    let app = TestApp::spawn_app().await;
    let (gula, beras) = seed_report_sales(&app).await;

    app.backdate_purchases(gula, Utc.with_ymd_and_hms(2024, 10, 31, 23, 59, 0).unwrap());
    app.backdate_purchases(beras, Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap());

    let range = DateRange::from_days(day(2024, 10, 1), day(2024, 10, 31));
    let data = get_report_data(app.pool.get().unwrap(), Some(range)).await.unwrap();

    assert_eq!(data.rows, vec![report_row("Gula Pasir", 5, 5.0, 8.0, 15.0)]);
    assert_eq!(data.total_profit, 15.0);
}

#[actix_web::test]
async fn report_data_for_range_without_sales_is_empty(){
    let app = TestApp::spawn_app().await;
    seed_report_sales(&app).await;

    let range = DateRange::from_days(day(2020, 1, 1), day(2020, 1, 2));
    let data = get_report_data(app.pool.get().unwrap(), Some(range)).await.unwrap();

    assert!(data.rows.is_empty());
    assert_eq!(data.total_profit, 0.0);
}
