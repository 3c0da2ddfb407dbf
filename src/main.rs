use koperasi::{configuration::Settings, startup::Application, telemetry::{get_subscriber, init_subscriber}};

#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("koperasi".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = Settings::get()?;

    let application = Application::build(config)?;
    tracing::info!(host = %application.host, port = application.port, "Starting server");
    application.run_until_stopped().await?;
    Ok(())
}
