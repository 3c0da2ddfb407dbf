use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, QueryableByName, Selectable};
use diesel::sql_types::{BigInt, Double, Text};
use serde::{Deserialize, Serialize};

use crate::schema::{barang, pembelian, users};

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = users)]
pub struct User{
    pub id_user: i32,
    pub nama: String,
    pub username: String,
    pub password: String
}

// Users are created outside the api, this is only used to seed rows directly
#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser{
    pub nama: String,
    pub username: String,
    pub password: String
}

// Row of the barang table, soft-deleted rows included
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = barang)]
pub struct Item{
    pub id_barang: i32,
    pub nama_barang: String,
    pub qty: i32,
    pub harga_beli: f64,
    pub harga_jual: f64,
    pub deleted_on: Option<DateTime<Utc>>
}

// Used both for inserting and for the full replacement done by update_item
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = barang)]
pub struct NewItem{
    pub nama_barang: String,
    pub qty: i32,
    pub harga_beli: f64,
    pub harga_jual: f64
}

#[derive(Insertable, Debug)]
#[diesel(table_name = pembelian)]
pub struct NewPurchase{
    pub nama_pembeli: String,
    pub id_barang: i32,
    pub qty_pembelian: i32
}

#[derive(Queryable, Serialize, Deserialize, Debug, PartialEq)]
pub struct TransactionRow{
    pub nama_barang: String,
    pub qty_pembelian: i32,
    pub harga_beli: f64,
    pub harga_jual: f64,
    pub nama_pembeli: String,
    pub tanggal_pembelian: DateTime<Utc>
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, PartialEq)]
pub struct ProfitRow{
    #[diesel(sql_type = Text)]
    pub nama_barang: String,
    #[diesel(sql_type = Double)]
    pub profit: f64,
    #[diesel(sql_type = BigInt)]
    pub qty_terjual: i64
}

#[derive(QueryableByName, Serialize, Debug, Clone, PartialEq)]
pub struct ReportRow{
    #[diesel(sql_type = Text)]
    pub nama_barang: String,
    #[diesel(sql_type = BigInt)]
    pub qty_pembelian: i64,
    #[diesel(sql_type = Double)]
    pub harga_beli: f64,
    #[diesel(sql_type = Double)]
    pub harga_jual: f64,
    #[diesel(sql_type = Double)]
    pub profit: f64
}
