// src/bin/cli.rs
use vehicle_feed::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    cli::run()
}
