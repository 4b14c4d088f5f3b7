use super::entities::User;
use super::mappers::map_user;
use super::{select_many, select_one, Pool};
use color_eyre::Result;
use rusqlite::{params, NO_PARAMS};

// No pagination here, the users table is small.
pub fn all_users(pool: &Pool) -> Result<Vec<User>> {
  select_many(
    pool,
    "SELECT username, name, avatar_url FROM users ORDER BY username ASC",
    NO_PARAMS,
    map_user
  )
}

pub fn user_by_username(pool: &Pool, username: &str) -> Result<Option<User>> {
  select_one(
    pool,
    "SELECT username, name, avatar_url FROM users WHERE username = ?",
    params![username],
    map_user
  )
}
