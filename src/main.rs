mod app;
mod config;
mod db;
mod utils;
use color_eyre::Result;

#[actix_web::main]
async fn main() -> Result<()> {
  // Pick up a .env file if there's one around:
  dotenv::dotenv().ok();
  // Default log level when RUST_LOG isn't set, the
  // config module relies on this being done first:
  if std::env::var("RUST_LOG").is_err() {
    std::env::set_var("RUST_LOG", "info,actix_web=info");
  }
  env_logger::init();

  app::run().await
}
