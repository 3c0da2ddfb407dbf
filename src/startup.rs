use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{auth::Tokenizer, configuration::Settings, routes::{add_qty, beli, delete_item, get_items, get_profit, health_check, login, new_item, report, transaction_history, update_item}, utils::{build_pool, DbPool}};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    // Binding port 0 picks a random free port, the real one is read back from the listener
    pub fn build(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = build_pool(&settings.database);
        let tokenizer = Tokenizer::new(&settings.auth);

        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))?;
        let port = listener.local_addr()?.port();

        let server = run(
            listener,
            pool,
            tokenizer,
            settings.application.cors_allowed_origins
        )?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error>{
        self.server.await
    }
}

// "*" in the allowed origins opens CORS to any origin, method and header
pub fn build_cors(allowed_origins: &[String]) -> Cors{
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header();

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin()
    }

    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

pub fn run(
    listener: TcpListener,
    pool: DbPool,
    tokenizer: Tokenizer,
    allowed_origins: Vec<String>
) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);
    let tokenizer = web::Data::new(tokenizer);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(build_cors(&allowed_origins))
            .app_data(pool.clone())
            .app_data(tokenizer.clone())
            .route("/health", web::get().to(health_check))
            .route("/login", web::post().to(login))
            .route("/new_item", web::post().to(new_item))
            .route("/get_items", web::get().to(get_items))
            .route("/beli", web::post().to(beli))
            .route("/add_qty/{id_barang}", web::put().to(add_qty))
            .route("/transaction_history", web::get().to(transaction_history))
            .route("/update_item/{id_barang}", web::put().to(update_item))
            .route("/get_profit", web::get().to(get_profit))
            .route("/delete_item/{id_barang}", web::delete().to(delete_item))
            .route("/report", web::get().to(report))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
