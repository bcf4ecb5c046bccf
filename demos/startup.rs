use std::time::Duration;

use section_bind::{bind_section, config_enum, Config, TimeUnit};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy)]
enum Environment {
    Development,
    Production,
}

config_enum!(Environment { Development, Production });

#[derive(Debug)]
struct AppConfig {
    name: String,
    environment: Environment,
    database: DatabaseSection,
    servers: Vec<ServerSection>,
}

bind_section!(AppConfig {
    name => get_string("App:Name"),
    environment => get_enum("App:Environment"),
    database => get("Database"),
    servers => get_many("Servers"),
});

#[derive(Debug)]
struct DatabaseSection {
    url: String,
    pool_size: u32,
    timeout: Duration,
}

bind_section!(DatabaseSection {
    url => get_string("Url"),
    pool_size => get_int("PoolSize"),
    timeout => get_duration("Timeout", TimeUnit::InSeconds),
});

#[derive(Debug)]
struct ServerSection {
    host: String,
    port: u16,
}

bind_section!(ServerSection {
    host => get_string("Host"),
    port => get_int("Port"),
});

const DEFAULTS: &str = r#"
[App]
Name = "demo"
Environment = "development"

[Database]
Host = "localhost"
Url = "postgres://${Database:Host}/demo"
PoolSize = 4
TimeoutInSeconds = 2.5

[[Servers]]
Host = "a.internal"
Port = 8080

[[Servers]]
Host = "b.internal"
Port = 8081
"#;

fn main() -> Result<(), section_bind::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // defaults -> optional local file -> DEMO__Section__Key environment overrides
    let config: AppConfig = Config::builder()
        .with_toml(DEFAULTS)
        .with_file("demos/local.toml", false)
        .with_env("DEMO", "__")
        .build_as()?;

    println!("App: {} ({:?})", config.name, config.environment);
    println!(
        "Database: {} (pool={}, timeout={:?})",
        config.database.url, config.database.pool_size, config.database.timeout
    );
    for server in &config.servers {
        println!("Server: {}:{}", server.host, server.port);
    }

    Ok(())
}
