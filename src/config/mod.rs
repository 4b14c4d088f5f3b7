// Adding the context method to errors:
use eyre::WrapErr;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::convert::From;

#[derive(Debug, Deserialize)]
pub struct Config {
  pub db_path: String,
  pub bind_address: String,
  // Fallback image for articles posted without one:
  pub default_article_img_url: String
}

// Subset of the config that handlers need at request
// time. Having another struct felt better than moving
// the whole config into app_state, especially since
// there could be sensible info in the config someday.
#[derive(Debug, Serialize)]
pub struct SiteDefaults {
  pub article_img_url: String
}

impl From<Config> for SiteDefaults {
  fn from(config: Config) -> Self {
    Self {
      article_img_url: config.default_article_img_url
    }
  }
}

impl Config {

  pub fn from_env() -> Result<Config> {
    let mut c = config::Config::new();
    // RUST_LOG is already set in main.rs if it
    // was absent.
    // Let's set other default values. You have
    // to use lowercase when compared to what's
    // in the .env file.
    c.set_default("db_path", "./newsboard.db")?;
    c.set_default("bind_address", "127.0.0.1:8080")?;
    // Same default the old API was shipping when posts
    // came in without an image:
    c.set_default(
      "default_article_img_url",
      "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700"
    )?;

    c.merge(config::Environment::default())?;
    // The error has to be given a context for
    // color_eyre to work here:
    c.try_into()
      .context("Loading configuration from env")
  }

}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn config_has_sane_defaults() {
    let config = Config::from_env().unwrap();
    assert!(!config.bind_address.is_empty());
    assert!(!config.default_article_img_url.is_empty());
  }
}
