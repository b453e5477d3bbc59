//! Basic usage example

use envbind::Bind;

#[derive(Debug, Default, Bind)]
struct Config {
    // Required field: loaded from the DATABASE_URL environment variable
    #[env("DATABASE_URL")]
    pub database_url: String,

    // Numeric types are range checked against the field's width
    #[env("MAX_CONNECTIONS")]
    pub max_connections: u32,

    #[env("SAMPLE_RATE")]
    pub sample_rate: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("MAX_CONNECTIONS", "32");
    std::env::set_var("SAMPLE_RATE", "0.25");

    // Bind configuration
    let mut config = Config::default();
    envbind::bind(&mut config)?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Sample Rate: {}", config.sample_rate);

    Ok(())
}
