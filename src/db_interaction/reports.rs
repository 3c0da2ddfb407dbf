use anyhow::Context;
use diesel::{sql_types::{Double, Nullable, Timestamptz}, Connection, ExpressionMethods, QueryDsl, QueryableByName, RunQueryDsl};

use crate::{domain::DateRange, models::{ProfitRow, ReportRow, TransactionRow}, schema::{barang, pembelian}, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

// $1 / $2 are bound as NULL when no range is given
const RANGE_FILTER: &str = "
    WHERE ($1 IS NULL OR pembelian.tanggal_pembelian >= $1)
      AND ($2 IS NULL OR pembelian.tanggal_pembelian < $2)";

const PROFIT_PER_ITEM: &str = "
    SELECT barang.nama_barang,
           (SUM(pembelian.qty_pembelian) * (barang.harga_jual - barang.harga_beli))::float8 AS profit,
           SUM(pembelian.qty_pembelian)::int8 AS qty_terjual
    FROM pembelian
    INNER JOIN barang ON barang.id_barang = pembelian.id_barang";

const REPORT_PER_ITEM: &str = "
    SELECT barang.nama_barang,
           SUM(pembelian.qty_pembelian)::int8 AS qty_pembelian,
           barang.harga_beli,
           barang.harga_jual,
           SUM(pembelian.qty_pembelian * (barang.harga_jual - barang.harga_beli))::float8 AS profit
    FROM pembelian
    INNER JOIN barang ON barang.id_barang = pembelian.id_barang";

const TOTAL_PROFIT: &str = "
    SELECT COALESCE(SUM(pembelian.qty_pembelian * (barang.harga_jual - barang.harga_beli)), 0)::float8 AS total_profit
    FROM pembelian
    INNER JOIN barang ON barang.id_barang = pembelian.id_barang";

const GROUP_PER_ITEM: &str = "
    GROUP BY barang.id_barang
    ORDER BY barang.id_barang";

#[derive(QueryableByName)]
struct TotalProfit{
    #[diesel(sql_type = Double)]
    total_profit: f64
}

// Per-item rows and grand total behind the sales report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData{
    pub rows: Vec<ReportRow>,
    pub total_profit: f64
}

#[tracing::instrument(
    "Getting transaction history",
    skip(conn)
)]
pub async fn get_transaction_history(
    mut conn: DbConnection,
    range: Option<DateRange>
) -> Result<Vec<TransactionRow>, anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        let mut query = pembelian::table
            .inner_join(barang::table)
            .select((
                barang::nama_barang,
                pembelian::qty_pembelian,
                barang::harga_beli,
                barang::harga_jual,
                pembelian::nama_pembeli,
                pembelian::tanggal_pembelian
            ))
            .order((pembelian::tanggal_pembelian.asc(), pembelian::id_pembelian.asc()))
            .into_boxed();

        if let Some(range) = range {
            query = query
                .filter(pembelian::tanggal_pembelian.ge(range.start))
                .filter(pembelian::tanggal_pembelian.lt(range.end));
        }

        query
            .load::<TransactionRow>(&mut conn)
            .context("Failed to load transaction history")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[tracing::instrument(
    "Getting profit per item",
    skip(conn)
)]
pub async fn get_profit_per_item(
    mut conn: DbConnection,
    range: Option<DateRange>
) -> Result<Vec<ProfitRow>, anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        diesel::sql_query(format!("{PROFIT_PER_ITEM}{RANGE_FILTER}{GROUP_PER_ITEM}"))
            .bind::<Nullable<Timestamptz>, _>(DateRange::lower_bound(range))
            .bind::<Nullable<Timestamptz>, _>(DateRange::upper_bound(range))
            .load::<ProfitRow>(&mut conn)
            .context("Failed to aggregate profit per item")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Both aggregations run in one transaction so the total matches the rows
#[tracing::instrument(
    "Getting sales report data",
    skip(conn)
)]
pub async fn get_report_data(
    mut conn: DbConnection,
    range: Option<DateRange>
) -> Result<ReportData, anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<ReportData, anyhow::Error, _>(|conn| {
            let rows = diesel::sql_query(format!("{REPORT_PER_ITEM}{RANGE_FILTER}{GROUP_PER_ITEM}"))
                .bind::<Nullable<Timestamptz>, _>(DateRange::lower_bound(range))
                .bind::<Nullable<Timestamptz>, _>(DateRange::upper_bound(range))
                .load::<ReportRow>(conn)
                .context("Failed to aggregate report rows")?;

            let total = diesel::sql_query(format!("{TOTAL_PROFIT}{RANGE_FILTER}"))
                .bind::<Nullable<Timestamptz>, _>(DateRange::lower_bound(range))
                .bind::<Nullable<Timestamptz>, _>(DateRange::upper_bound(range))
                .get_result::<TotalProfit>(conn)
                .context("Failed to aggregate total profit")?;

            Ok(ReportData{ rows, total_profit: total.total_profit })
        })
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}
