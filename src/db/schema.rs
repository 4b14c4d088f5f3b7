use super::Pool;
use eyre::WrapErr;
use color_eyre::Result;

// The old API kept the DDL with the seeding scripts.
// We create the tables at startup instead, IF NOT
// EXISTS makes it a no-op on a live database.
// Foreign keys only get enforced because every pooled
// connection runs PRAGMA foreign_keys = ON, see the
// pool setup in app::run.
const CREATE_TABLES: &str = "
  CREATE TABLE IF NOT EXISTS topics(
    slug TEXT PRIMARY KEY NOT NULL,
    description TEXT,
    img_url TEXT
  );
  CREATE TABLE IF NOT EXISTS users(
    username TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    avatar_url TEXT
  );
  CREATE TABLE IF NOT EXISTS articles(
    article_id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    topic TEXT NOT NULL REFERENCES topics(slug),
    author TEXT NOT NULL REFERENCES users(username),
    body TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    votes INTEGER NOT NULL DEFAULT 0,
    article_img_url TEXT
  );
  CREATE TABLE IF NOT EXISTS comments(
    comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    article_id INTEGER NOT NULL REFERENCES articles(article_id),
    body TEXT NOT NULL,
    votes INTEGER NOT NULL DEFAULT 0,
    author TEXT NOT NULL REFERENCES users(username),
    created_at INTEGER NOT NULL
  );
";

pub fn init_schema(pool: &Pool) -> Result<()> {
  let conn = pool.clone().get()?;
  conn.execute_batch(CREATE_TABLES)
    .context("Creating tables")
}
