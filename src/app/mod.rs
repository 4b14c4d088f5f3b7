use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use r2d2_sqlite::{self, SqliteConnectionManager};
use color_eyre::Result;
use eyre::WrapErr;
use log::debug;
// I think we have to add crate here because
// of the other crate named "config" that we
// use as a dependency.
use crate::config::{Config, SiteDefaults};
use crate::db::{self, Pool};
mod handlers;
mod dtos;
mod error;

// Declare app state struct:
pub struct AppState {
  pub pool: Pool,
  pub defaults: SiteDefaults
}

// Turning malformed path args, query strings and JSON
// bodies into 400s instead of the actix defaults.
// No idea how these work exactly but they do.
pub fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|_, _| {
    actix_web::error::ErrorBadRequest("Invalid path arguments")
  })
}

pub fn query_config() -> web::QueryConfig {
  web::QueryConfig::default().error_handler(|_, _| {
    actix_web::error::ErrorBadRequest("Invalid query string arguments")
  })
}

pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|_, _| {
    actix_web::error::ErrorBadRequest("Invalid JSON body")
  })
}

// Function to start the server.
// Has to be async because there should be a .await at
// the end, the #[actix_web::main] decorator thingy
// lives in main.rs.
pub async fn run() -> Result<()> {
  let config = Config::from_env()
    .expect("Configuration (environment or .env file) is missing");
  debug!("Current config: {:?}", config);
  // Foreign keys are off by default in SQLite, and the
  // whole referential integrity part of this API
  // depends on them, so every pooled connection turns
  // them on.
  let manager = SqliteConnectionManager::file(&config.db_path)
    .with_init(|c| c.execute_batch("PRAGMA foreign_keys = ON;"));
  let pool = Pool::new(manager)
    .expect("Database connection failed");

  // No-op when the tables are already there:
  db::init_schema(&pool)
    .expect("Could not create the database tables");

  // Got to save the bind_address for later because
  // we'll be destroying "config" by moving it into
  // app_state as the SiteDefaults struct.
  let bind_address = config.bind_address.clone();

  let app_state = web::Data::new(
    AppState {
      pool,
      defaults: config.into()
    }
  );

  HttpServer::new(move || {
    App::new()
      .app_data(app_state.clone())
      .app_data(path_config())
      .app_data(query_config())
      .app_data(json_config())
      .wrap(middleware::Logger::default())
      // Public read-mostly API, anyone may call it from
      // a browser:
      .wrap(
        Cors::default()
          .allow_any_origin()
          .allow_any_method()
          .allow_any_header()
      )
      .configure(base_endpoints_config)
      .default_service(web::route().to(handlers::not_found))
  })
  .bind(bind_address)?
  .run()
  .await
  .context("Start Actix web server")

}

// Route configuration:
pub fn base_endpoints_config(cfg: &mut web::ServiceConfig) {
  cfg.route("/", web::get().to(handlers::index))
    .service(
      web::scope("/api")
        .route("", web::get().to(handlers::api_index))
        .route("/topics", web::get().to(handlers::topics))
        .route("/articles", web::get().to(handlers::articles))
        .route("/articles", web::post().to(handlers::post_article))
        .route("/articles/{article_id}", web::get().to(handlers::article))
        .route("/articles/{article_id}", web::patch().to(handlers::patch_article_votes))
        .route("/articles/{article_id}/comments", web::get().to(handlers::comments))
        .route("/articles/{article_id}/comments", web::post().to(handlers::post_comment))
        .route("/comments/{comment_id}", web::delete().to(handlers::delete_comment))
        .route("/comments/{comment_id}", web::patch().to(handlers::patch_comment_votes))
        .route("/users", web::get().to(handlers::users))
        .route("/users/{username}", web::get().to(handlers::user))
    );
}
