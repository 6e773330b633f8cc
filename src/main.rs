mod app;
mod config;
mod core;
mod utils;

#[tokio::main]
async fn main() {
    // .env is optional; the key may come from the real environment or config.toml
    let _ = dotenvy::dotenv();

    let config = match config::Config::init() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to initialize configuration: {e}");
            std::process::exit(2);
        }
    };
    app::common::init_logging(&config);

    if let Err(e) = app::pipeline::run(&config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
