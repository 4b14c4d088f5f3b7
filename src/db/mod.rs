use rusqlite::{Row, ToSql};
pub mod entities;
mod mappers;
mod queries;
mod schema;
pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;
use eyre::WrapErr;
use color_eyre::Result;

pub use queries::Order;
pub use schema::init_schema;

// Type alias to make function signatures much clearer:
pub type Pool = r2d2::Pool<r2d2_sqlite::SqliteConnectionManager>;

// All the DB stuff is done in a non-async way, the
// queries are small indexed lookups and actix doesn't
// seem to mind.

// Typed per-entity take on the votes columns. Both
// implementors use their own literal SQL, table or
// column names never come from runtime strings.
pub trait VoteTarget: Sized {
  // Tri-state existence check: Ok(None) means confirmed
  // absent, it's never an error at this level.
  fn exists(pool: &Pool, id: i64) -> Result<Option<Self>>;
  // Adds delta to the stored votes in a single UPDATE,
  // the addition happens inside SQLite so two
  // concurrent increments can't lose one. Ok(None)
  // when no row matched the id.
  fn increment_votes(pool: &Pool, id: i64, delta: i64) -> Result<Option<Self>>;
}

// Stole most of the signature from the rusqlite doc.
// Careful to use a later version of the crate,
// Google takes you to old versions of the doc.
fn select_many<T, P, F>(
  pool: &Pool,
  query: &str,
  params: P,
  mapper: F
) -> Result<Vec<T>>
  where
    P: IntoIterator,
    P::Item: ToSql,
    F: FnMut(&Row<'_>) -> Result<T, rusqlite::Error>,
{
  // Do the reference counting thing and get a connection
  let conn = pool.clone().get()?;
  let mut stmt = conn.prepare(query)?;
  stmt.query_map(params, mapper)
    .and_then(Iterator::collect)
    .context("Generic select_many query")
}

// Same thing for single row lookups. A missing row is
// a regular outcome here, not an error.
fn select_one<T, P, F>(
  pool: &Pool,
  query: &str,
  params: P,
  mapper: F
) -> Result<Option<T>>
  where
    P: IntoIterator,
    P::Item: ToSql,
    F: FnOnce(&Row<'_>) -> Result<T, rusqlite::Error>,
{
  let conn = pool.clone().get()?;
  let mut stmt = conn.prepare(query)?;
  match stmt.query_row(params, mapper) {
    Ok(record) => Ok(Some(record)),
    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
    Err(e) => Err(e).context("Generic select_one query")
  }
}

// Returns the number of affected rows, which callers
// use to turn "nothing matched" into a not found
// condition without a separate existence query.
fn execute<P>(
  pool: &Pool,
  query: &str,
  params: P
) -> Result<usize>
  where
    P: IntoIterator,
    P::Item: ToSql,
{
  let conn = pool.clone().get()?;
  conn.execute(query, params)
    .context("Generic execute query")
}

// The generated id has to be read on the same
// connection the insert ran on.
fn insert<P>(
  pool: &Pool,
  query: &str,
  params: P
) -> Result<i64>
  where
    P: IntoIterator,
    P::Item: ToSql,
{
  let conn = pool.clone().get()?;
  conn.execute(query, params)
    .context("Generic insert query")?;
  Ok(conn.last_insert_rowid())
}


#[cfg(test)]
mod tests {
  use super::*;
  use rusqlite::params;

  #[test]
  fn select_one_is_none_on_no_rows() {
    let pool = test_support::empty_pool();
    let result: Option<String> = select_one(
      &pool,
      "SELECT slug FROM topics WHERE slug = ?",
      params!["nope"],
      |row| row.get(0)
    ).unwrap();
    assert!(result.is_none());
  }

  #[test]
  fn execute_reports_affected_rows() {
    let pool = test_support::seeded_pool();
    let changed = execute(
      &pool,
      "UPDATE articles SET votes = votes + 1 WHERE article_id = ?",
      params![1]
    ).unwrap();
    assert_eq!(changed, 1);
    let changed = execute(
      &pool,
      "UPDATE articles SET votes = votes + 1 WHERE article_id = ?",
      params![9999]
    ).unwrap();
    assert_eq!(changed, 0);
  }
}
