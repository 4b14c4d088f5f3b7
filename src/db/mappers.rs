use super::entities::*;
use rusqlite::{Error, Row};

pub fn map_topic(row: &Row) -> Result<Topic, Error> {
  Ok(Topic {
    slug: row.get(0)?,
    description: row.get(1)?,
    img_url: row.get(2)?
  })
}

pub fn map_user(row: &Row) -> Result<User, Error> {
  Ok(User {
    username: row.get(0)?,
    name: row.get(1)?,
    avatar_url: row.get(2)?
  })
}

// Expects the listing column order, with the aggregate
// comment_count last and no body selected.
pub fn map_article_summary(row: &Row) -> Result<Article, Error> {
  Ok(Article {
    article_id: row.get(0)?,
    title: row.get(1)?,
    topic: row.get(2)?,
    author: row.get(3)?,
    created_at: row.get(4)?,
    votes: row.get(5)?,
    article_img_url: row.get(6)?,
    comment_count: row.get(7)?,
    body: None
  })
}

// Single article lookups select the body right before
// the comment_count.
pub fn map_article_full(row: &Row) -> Result<Article, Error> {
  Ok(Article {
    article_id: row.get(0)?,
    title: row.get(1)?,
    topic: row.get(2)?,
    author: row.get(3)?,
    created_at: row.get(4)?,
    votes: row.get(5)?,
    article_img_url: row.get(6)?,
    body: row.get(7)?,
    comment_count: row.get(8)?
  })
}

pub fn map_comment(row: &Row) -> Result<Comment, Error> {
  Ok(Comment {
    comment_id: row.get(0)?,
    article_id: row.get(1)?,
    body: row.get(2)?,
    votes: row.get(3)?,
    author: row.get(4)?,
    created_at: row.get(5)?
  })
}
