use super::entities::Comment;
use super::mappers::map_comment;
use super::{execute, insert, select_many, select_one, Pool, VoteTarget};
use crate::utils::time_utils;
use color_eyre::Result;
use eyre::eyre;
use rusqlite::params;

const COMMENT_FIELDS: &str =
  "comment_id, article_id, body, votes, author, created_at";

// Newest first, like every comment thread ever.
// Whether a missing article is worth a 404 is the
// caller's business, this just returns rows.
pub fn comments_for_article(
  pool: &Pool,
  article_id: i64
) -> Result<Vec<Comment>> {
  let query = format!(
    "SELECT {} FROM comments WHERE article_id = ? ORDER BY created_at DESC",
    COMMENT_FIELDS
  );
  select_many(pool, &query, params![article_id], map_comment)
}

pub fn comment_by_id(pool: &Pool, comment_id: i64) -> Result<Option<Comment>> {
  let query = format!(
    "SELECT {} FROM comments WHERE comment_id = ?",
    COMMENT_FIELDS
  );
  select_one(pool, &query, params![comment_id], map_comment)
}

// The author reference is left to the foreign key, an
// unknown username comes back as a constraint error.
// The article is checked by the handler first because
// a missing article has to be a 404 while a missing
// author is a 400.
pub fn insert_comment(
  pool: &Pool,
  article_id: i64,
  username: &str,
  body: &str
) -> Result<Comment> {
  let id = insert(
    pool,
    "INSERT INTO comments(article_id, body, author, created_at, votes) \
    VALUES (?1, ?2, ?3, ?4, 0)",
    params![article_id, body, username, time_utils::current_timestamp()]
  )?;
  comment_by_id(pool, id)?
    .ok_or_else(|| eyre!("Comment {} missing right after insert", id))
}

// True when a row was actually removed. Deleting by id
// and looking at the affected row count avoids a
// separate existence query.
pub fn delete_comment(pool: &Pool, comment_id: i64) -> Result<bool> {
  let changed = execute(
    pool,
    "DELETE FROM comments WHERE comment_id = ?",
    params![comment_id]
  )?;
  Ok(changed > 0)
}

impl VoteTarget for Comment {

  fn exists(pool: &Pool, id: i64) -> Result<Option<Comment>> {
    comment_by_id(pool, id)
  }

  fn increment_votes(pool: &Pool, id: i64, delta: i64) -> Result<Option<Comment>> {
    let changed = execute(
      pool,
      "UPDATE comments SET votes = votes + ?1 WHERE comment_id = ?2",
      params![delta, id]
    )?;
    if changed == 0 {
      return Ok(None);
    }
    comment_by_id(pool, id)
  }

}
