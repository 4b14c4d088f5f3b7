use super::entities::Topic;
use super::mappers::map_topic;
use super::{select_many, select_one, Pool};
use color_eyre::Result;
use rusqlite::{params, NO_PARAMS};

pub fn all_topics(pool: &Pool) -> Result<Vec<Topic>> {
  select_many(
    pool,
    "SELECT slug, description, img_url FROM topics ORDER BY slug ASC",
    NO_PARAMS,
    map_topic
  )
}

// Existence check for the articles listing topic
// filter. None is how callers tell an unknown topic
// (404) apart from a topic with no articles (200 and
// an empty page).
pub fn topic_by_slug(pool: &Pool, slug: &str) -> Result<Option<Topic>> {
  select_one(
    pool,
    "SELECT slug, description, img_url FROM topics WHERE slug = ?",
    params![slug],
    map_topic
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::test_support::seeded_pool;

  #[test]
  fn all_topics_sorted_by_slug() {
    let pool = seeded_pool();
    let topics = all_topics(&pool).unwrap();
    let slugs: Vec<&str> = topics.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, vec!["coding", "cooking", "gardening"]);
  }

  #[test]
  fn topic_lookup_is_tri_state() {
    let pool = seeded_pool();
    let found = topic_by_slug(&pool, "coding").unwrap();
    assert_eq!(found.unwrap().slug, "coding");
    assert!(topic_by_slug(&pool, "twin-peaks").unwrap().is_none());
  }
}
