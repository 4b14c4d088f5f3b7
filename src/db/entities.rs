use serde::{Deserialize, Serialize};

// Ultra simple datatypes, which is something SQLite
// fits naturally into. The JSON-facing shapes live in
// the dtos module, like real pros do.

#[derive(Debug, Serialize, Deserialize)]
pub struct Topic {
  pub slug: String,
  pub description: Option<String>,
  pub img_url: Option<String>
}

#[derive(Debug, Serialize, Deserialize)]
pub struct User {
  pub username: String,
  pub name: String,
  pub avatar_url: Option<String>
}

// The body is an Option because listing queries never
// select it, only single article lookups do.
// comment_count is derived from a join at query time,
// it's not a column.
#[derive(Debug, Serialize, Deserialize)]
pub struct Article {
  pub article_id: i64,
  pub title: String,
  pub topic: String,
  pub author: String,
  pub body: Option<String>,
  pub created_at: i64,
  pub votes: i64,
  pub article_img_url: Option<String>,
  pub comment_count: i64
}

// What an insert needs. The image URL is resolved to
// the configured default before this is built.
#[derive(Debug)]
pub struct NewArticle {
  pub author: String,
  pub title: String,
  pub body: String,
  pub topic: String,
  pub article_img_url: String
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Comment {
  pub comment_id: i64,
  pub article_id: i64,
  pub body: String,
  pub votes: i64,
  pub author: String,
  pub created_at: i64
}
