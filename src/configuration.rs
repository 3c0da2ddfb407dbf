use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings{
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub name: String,
    pub pool_max_size: u32,
    pub pool_timeout_seconds: u64
}

impl DatabaseSettings {
    // Url of the postgres server itself, used to create databases
    pub fn get_database_url(&self) -> String{
        format!(
            "postgres://{}:{}@{}:{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port
        )
    }

    pub fn get_database_table_url(&self) -> String{
        format!("{}/{}", self.get_database_url(), self.name)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AuthSettings{
    pub secret: SecretString,
    pub expiry_hours: u64
}

impl Settings{
    /// Reads `configuration/base.yaml`, then applies `APP_`-prefixed environment
    /// overrides such as `APP_DATABASE__HOST`.
    pub fn get() -> Result<Self, ConfigError>{
        Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
