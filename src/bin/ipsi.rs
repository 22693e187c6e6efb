#[path = "ipsi/app/mod.rs"]
mod app;
#[path = "ipsi/args.rs"]
mod args;
#[path = "ipsi/config/mod.rs"]
mod config;
#[path = "ipsi/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
