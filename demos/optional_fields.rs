//! Example demonstrating omitempty for optional fields

use envbind::Bind;

#[derive(Debug, Bind)]
struct Config {
    // Required field
    #[env("APP_NAME")]
    pub app_name: String,

    // Optional fields - keep their current value if not set
    #[env("PORT,omitempty")]
    pub port: u16,

    #[env("LOG_LEVEL,omitempty")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    // Set only some environment variables
    std::env::set_var("APP_NAME", "my-application");
    std::env::set_var("PORT", "8080");
    std::env::remove_var("LOG_LEVEL");

    // Defaults live in the value itself
    let mut config = Config {
        app_name: String::new(),
        port: 3000,
        log_level: "info".to_string(),
    };
    envbind::bind(&mut config)?;

    println!("Configuration:");
    println!("  App Name: {}", config.app_name);
    println!("  Port: {}", config.port); // 8080
    println!("  Log Level: {}", config.log_level); // info

    // A missing required variable is an error
    std::env::remove_var("APP_NAME");
    if let Err(e) = envbind::bind(&mut config) {
        println!("Expected error: {e}");
    }

    Ok(())
}
