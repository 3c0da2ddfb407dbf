use std::error::Error;

use chrono::{DateTime, Utc};
use diesel::{pg::Pg, r2d2::ConnectionManager, Connection, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use koperasi::{auth::AUTH_HEADER, configuration::{DatabaseSettings, Settings}, models::{NewItem, NewUser}, password::compute_password_hash, schema::{barang, pembelian, users}, startup::Application, telemetry::{get_subscriber, init_subscriber}, utils::DbPool};
use once_cell::sync::Lazy;
use r2d2::Pool;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use uuid::Uuid;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "koperasi-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub const TEST_USERNAME: &str = "kasir";
pub const TEST_PASSWORD: &str = "rahasia@1";

fn run_migrations(connection: &mut impl MigrationHarness<Pg>)
    -> Result<(), Box<dyn Error + Send + Sync + 'static>>
{
    connection.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub api_client: reqwest::Client
}

impl TestApp {
    fn create_db(settings: &DatabaseSettings) -> DbPool{
        let mut connection = PgConnection::establish(&settings.get_database_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");

        let pool = Pool::new(ConnectionManager::<PgConnection>::new(settings.get_database_table_url()))
            .expect("Failed to build connection pool to test database");

        let mut conn = pool.get().expect("Failed to get connection to test database");
        run_migrations(&mut conn).expect("Failed to run migrations");

        pool
    }

    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    pub async fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let mut settings = Settings::get().expect("Failed to read configuration");
        settings.application.port = 0;
        settings.database.name = Uuid::new_v4().to_string();

        let pool = TestApp::create_db(&settings.database);

        let application = Application::build(settings)
                            .expect("Failed to build application");
        let host = application.host.clone();
        let port = application.port;

        actix_web::rt::spawn(application.run_until_stopped());

        TestApp{
            host,
            port,
            pool,
            api_client: reqwest::Client::new()
        }
    }

    pub fn seed_user(&self, nama: &str, username: &str, password: &str) -> i32{
        let hash = compute_password_hash(SecretString::from(password.to_string()))
                    .expect("Failed to hash password");
        let mut conn = self.pool.get().unwrap();

        diesel::insert_into(users::table)
            .values(NewUser{
                nama: nama.to_string(),
                username: username.to_string(),
                password: hash.expose_secret().to_string()
            })
            .returning(users::id_user)
            .get_result::<i32>(&mut conn)
            .expect("Failed to seed user")
    }

    pub fn delete_user(&self, id_user: i32){
        let mut conn = self.pool.get().unwrap();

        diesel::delete(users::table.filter(users::id_user.eq(id_user)))
            .execute(&mut conn)
            .unwrap();
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response{
        self.api_client.post(format!("{}/login", self.get_app_url()))
            .json(&serde_json::json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to send request to login endpoint")
    }

    // Seeds the default user and returns a credential for it
    pub async fn login_token(&self) -> String{
        self.seed_user("Kasir Satu", TEST_USERNAME, TEST_PASSWORD);

        let response = self.login(TEST_USERNAME, TEST_PASSWORD).await;
        assert_eq!(response.status().as_u16(), 200);

        response.json::<String>().await.unwrap()
    }

    pub fn insert_item(&self, nama_barang: &str, qty: i32, harga_beli: f64, harga_jual: f64) -> i32{
        let mut conn = self.pool.get().unwrap();

        diesel::insert_into(barang::table)
            .values(NewItem{
                nama_barang: nama_barang.to_string(),
                qty,
                harga_beli,
                harga_jual
            })
            .returning(barang::id_barang)
            .get_result::<i32>(&mut conn)
            .unwrap()
    }

    pub fn item_qty(&self, id_barang: i32) -> i32{
        let mut conn = self.pool.get().unwrap();

        barang::table
            .filter(barang::id_barang.eq(id_barang))
            .select(barang::qty)
            .first::<i32>(&mut conn)
            .unwrap()
    }

    pub fn item_deleted_on(&self, id_barang: i32) -> Option<DateTime<Utc>>{
        let mut conn = self.pool.get().unwrap();

        barang::table
            .filter(barang::id_barang.eq(id_barang))
            .select(barang::deleted_on)
            .first::<Option<DateTime<Utc>>>(&mut conn)
            .unwrap()
    }

    pub fn purchase_count(&self, id_barang: i32) -> i64{
        let mut conn = self.pool.get().unwrap();

        pembelian::table
            .filter(pembelian::id_barang.eq(id_barang))
            .count()
            .get_result::<i64>(&mut conn)
            .unwrap()
    }

    // Moves every purchase of an item to the given time
    pub fn backdate_purchases(&self, id_barang: i32, at: DateTime<Utc>){
        let mut conn = self.pool.get().unwrap();

        diesel::update(pembelian::table.filter(pembelian::id_barang.eq(id_barang)))
            .set(pembelian::tanggal_pembelian.eq(at))
            .execute(&mut conn)
            .unwrap();
    }

    pub async fn post_new_item(&self, token: &str, body: &Value) -> reqwest::Response{
        self.api_client.post(format!("{}/new_item", self.get_app_url()))
            .header(AUTH_HEADER, token)
            .json(body)
            .send()
            .await
            .expect("Failed to send request to new_item endpoint")
    }

    pub async fn get_items(&self, token: &str, jumlah: Option<u32>) -> reqwest::Response{
        let mut request = self.api_client.get(format!("{}/get_items", self.get_app_url()))
            .header(AUTH_HEADER, token);

        if let Some(jumlah) = jumlah {
            request = request.query(&[("jumlah", jumlah)]);
        }

        request.send()
            .await
            .expect("Failed to send request to get_items endpoint")
    }

    pub async fn post_beli(&self, token: &str, id_barang: i32, qty: i32, nama: &str) -> reqwest::Response{
        self.api_client.post(format!("{}/beli", self.get_app_url()))
            .header(AUTH_HEADER, token)
            .json(&serde_json::json!({
                "id_barang": id_barang,
                "qty": qty,
                "nama": nama
            }))
            .send()
            .await
            .expect("Failed to send request to beli endpoint")
    }

    pub async fn put_add_qty(&self, token: &str, id_barang: i32, qty: i32) -> reqwest::Response{
        self.api_client.put(format!("{}/add_qty/{}", self.get_app_url(), id_barang))
            .header(AUTH_HEADER, token)
            .query(&[("qty", qty)])
            .send()
            .await
            .expect("Failed to send request to add_qty endpoint")
    }

    pub async fn put_update_item(&self, token: &str, id_barang: i32, body: &Value) -> reqwest::Response{
        self.api_client.put(format!("{}/update_item/{}", self.get_app_url(), id_barang))
            .header(AUTH_HEADER, token)
            .json(body)
            .send()
            .await
            .expect("Failed to send request to update_item endpoint")
    }

    pub async fn delete_item(&self, token: &str, id_barang: i32) -> reqwest::Response{
        self.api_client.delete(format!("{}/delete_item/{}", self.get_app_url(), id_barang))
            .header(AUTH_HEADER, token)
            .send()
            .await
            .expect("Failed to send request to delete_item endpoint")
    }

    // GET on one of the reporting endpoints with optional from_ / to_
    pub async fn get_report_endpoint(&self, path: &str, token: &str, range: &[(&str, &str)]) -> reqwest::Response{
        self.api_client.get(format!("{}/{}", self.get_app_url(), path))
            .header(AUTH_HEADER, token)
            .query(range)
            .send()
            .await
            .expect("Failed to send request to reporting endpoint")
    }
}
