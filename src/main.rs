use crate::config::Config;
use crate::error::Result;
use crate::services::calendar::ErrorResponse;
use crate::services::App;
use chrono::Utc;
use std::process::ExitCode;
use tracing::{error, Level};

mod config;
mod domain;
mod error;
mod infrastructure;
mod services;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = config.args.log_level.parse().unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let app = App::new(config);
    let json = app.command().wants_json();

    match run(&app).await {
        Ok(output) => {
            print!("{}", output);
            if json && !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            if json {
                let body = ErrorResponse {
                    error: e.to_string(),
                };
                println!(
                    "{}",
                    serde_json::to_string(&body).unwrap_or_else(|_| "{}".to_string())
                );
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(app: &App) -> Result<String> {
    app.ensure_directories()?;
    app.run(Utc::now()).await
}
