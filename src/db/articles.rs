use super::entities::{Article, NewArticle};
use super::mappers::{map_article_full, map_article_summary};
use super::queries::{self, Order, OrderBy};
use super::{execute, insert, select_many, select_one, Pool, VoteTarget};
use crate::utils::time_utils;
use color_eyre::Result;
use derive_more::Display;
use eyre::eyre;
use rusqlite::{params, NO_PARAMS};
use serde::Deserialize;

const DEFAULT_LIMIT: i64 = 10;

// Listings never select the body on purpose, that
// column can get big.
const SUMMARY_FIELDS: [&str; 8] = [
  "articles.article_id",
  "articles.title",
  "articles.topic",
  "articles.author",
  "articles.created_at",
  "articles.votes",
  "articles.article_img_url",
  "count(comments.comment_id) AS comment_count"
];

const FULL_FIELDS: [&str; 9] = [
  "articles.article_id",
  "articles.title",
  "articles.topic",
  "articles.author",
  "articles.created_at",
  "articles.votes",
  "articles.article_img_url",
  "articles.body",
  "count(comments.comment_id) AS comment_count"
];

const ARTICLES_WITH_COMMENTS: &str =
  "articles LEFT JOIN comments ON comments.article_id = articles.article_id";

// The sortable columns, which double as the greenlist
// for the sort_by query parameter. Every variant maps
// to a fixed identifier so user input never reaches
// the query string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortBy {
  Title,
  Topic,
  Author,
  Votes,
  CreatedAt,
  CommentCount
}

impl SortBy {

  pub fn parse(value: &str) -> Option<SortBy> {
    match value {
      "title" => Some(SortBy::Title),
      "topic" => Some(SortBy::Topic),
      "author" => Some(SortBy::Author),
      "votes" => Some(SortBy::Votes),
      "created_at" => Some(SortBy::CreatedAt),
      "comment_count" => Some(SortBy::CommentCount),
      _ => None
    }
  }

  pub fn column(&self) -> &'static str {
    match self {
      SortBy::Title => "articles.title",
      SortBy::Topic => "articles.topic",
      SortBy::Author => "articles.author",
      SortBy::Votes => "articles.votes",
      SortBy::CreatedAt => "articles.created_at",
      // The aggregate has no real column, we order on
      // its alias.
      SortBy::CommentCount => "comment_count"
    }
  }

  // The numeric-ish columns read best newest or biggest
  // first, the text ones alphabetically.
  pub fn default_order(&self) -> Order {
    match self {
      SortBy::Votes | SortBy::CreatedAt | SortBy::CommentCount => Order::Desc,
      _ => Order::Asc
    }
  }

}

// Raw query string parameters, everything optional.
// Non-integer limit or p text gets bounced by the query
// deserializer before we ever see it.
#[derive(Debug, Deserialize)]
pub struct ArticlesQuery {
  pub sort_by: Option<String>,
  pub order: Option<String>,
  pub topic: Option<String>,
  pub limit: Option<i64>,
  pub p: Option<i64>
}

#[derive(Debug, Display)]
pub enum ParamError {
  #[display(fmt = "p must be a positive integer")]
  InvalidPage,
  #[display(fmt = "limit must be a positive integer")]
  InvalidLimit,
  #[display(fmt = "Cannot sort articles by '{}'", _0)]
  InvalidSortBy(String),
  #[display(fmt = "Order must be 'asc' or 'desc', not '{}'", _0)]
  InvalidOrder(String)
}

// The resolved, validated version of ArticlesQuery.
// Defaulting happens here once and nowhere else.
#[derive(Debug)]
pub struct ArticlesListing {
  pub sort_by: SortBy,
  pub order: Order,
  pub topic: Option<String>,
  pub limit: i64,
  pub page: i64
}

impl ArticlesListing {

  pub fn resolve(query: ArticlesQuery) -> Result<ArticlesListing, ParamError> {
    let page = query.p.unwrap_or(1);
    if page < 1 {
      return Err(ParamError::InvalidPage);
    }
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if limit < 1 {
      return Err(ParamError::InvalidLimit);
    }
    let sort_by = match query.sort_by {
      Some(value) => match SortBy::parse(&value) {
        Some(sort_by) => sort_by,
        None => return Err(ParamError::InvalidSortBy(value))
      },
      None => SortBy::CreatedAt
    };
    let order = match query.order {
      Some(value) => match value.as_str() {
        "asc" => Order::Asc,
        "desc" => Order::Desc,
        _ => return Err(ParamError::InvalidOrder(value))
      },
      None => sort_by.default_order()
    };
    Ok(ArticlesListing {
      sort_by,
      order,
      topic: query.topic,
      limit,
      page
    })
  }

  pub fn offset(&self) -> i64 {
    (self.page - 1) * self.limit
  }

}

// Count of all matching rows before pagination, what
// the API reports as total_count. Counting the bare
// table is enough, the comments join never changes the
// number of groups.
pub fn count_articles(pool: &Pool, topic: Option<&str>) -> Result<i64> {
  let conn = pool.clone().get()?;
  let count: i64 = match topic {
    Some(topic) => {
      let mut stmt = conn.prepare(
        "SELECT count(*) FROM articles WHERE topic = ?"
      )?;
      stmt.query_row(params![topic], |row| row.get(0))?
    },
    None => {
      let mut stmt = conn.prepare("SELECT count(*) FROM articles")?;
      stmt.query_row(NO_PARAMS, |row| row.get(0))?
    }
  };
  Ok(count)
}

pub fn list_articles(
  pool: &Pool,
  listing: &ArticlesListing
) -> Result<Vec<Article>> {
  let mut q_where = Vec::new();
  if listing.topic.is_some() {
    q_where.push(queries::generate_field_equal_qmark("articles.topic"));
  }
  let query = queries::select_query_builder(
    &SUMMARY_FIELDS,
    ARTICLES_WITH_COMMENTS,
    &q_where,
    Some("articles.article_id"),
    Some(&OrderBy::new(listing.order, listing.sort_by.column())),
    true
  );
  // Positional parameters, so two calls depending on
  // whether the WHERE clause is there:
  match &listing.topic {
    Some(topic) => select_many(
      pool,
      &query,
      params![topic, listing.limit, listing.offset()],
      map_article_summary
    ),
    None => select_many(
      pool,
      &query,
      params![listing.limit, listing.offset()],
      map_article_summary
    )
  }
}

// Single lookup keeps the same join and aggregate shape
// as the listing but does include the body.
pub fn article_by_id(pool: &Pool, article_id: i64) -> Result<Option<Article>> {
  let query = queries::select_query_builder(
    &FULL_FIELDS,
    ARTICLES_WITH_COMMENTS,
    &[queries::generate_field_equal_qmark("articles.article_id")],
    Some("articles.article_id"),
    None,
    false
  );
  select_one(pool, &query, params![article_id], map_article_full)
}

// Referential checks are left to the foreign keys, a
// violation bubbles up as a constraint error that the
// app layer reports as a bad request.
pub fn insert_article(pool: &Pool, article: &NewArticle) -> Result<Article> {
  let id = insert(
    pool,
    "INSERT INTO articles(title, topic, author, body, created_at, votes, article_img_url) \
    VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
    params![
      article.title,
      article.topic,
      article.author,
      article.body,
      time_utils::current_timestamp(),
      article.article_img_url
    ]
  )?;
  article_by_id(pool, id)?
    .ok_or_else(|| eyre!("Article {} missing right after insert", id))
}

impl VoteTarget for Article {

  fn exists(pool: &Pool, id: i64) -> Result<Option<Article>> {
    article_by_id(pool, id)
  }

  fn increment_votes(pool: &Pool, id: i64, delta: i64) -> Result<Option<Article>> {
    let changed = execute(
      pool,
      "UPDATE articles SET votes = votes + ?1 WHERE article_id = ?2",
      params![delta, id]
    )?;
    if changed == 0 {
      return Ok(None);
    }
    article_by_id(pool, id)
  }

}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::test_support::seeded_pool;

  fn resolve(
    sort_by: Option<&str>,
    order: Option<&str>,
    topic: Option<&str>,
    limit: Option<i64>,
    p: Option<i64>
  ) -> Result<ArticlesListing, ParamError> {
    ArticlesListing::resolve(ArticlesQuery {
      sort_by: sort_by.map(String::from),
      order: order.map(String::from),
      topic: topic.map(String::from),
      limit,
      p
    })
  }

  fn ids(articles: &[Article]) -> Vec<i64> {
    articles.iter().map(|a| a.article_id).collect()
  }

  #[test]
  fn resolve_applies_documented_defaults() {
    let listing = resolve(None, None, None, None, None).unwrap();
    assert_eq!(listing.sort_by, SortBy::CreatedAt);
    assert_eq!(listing.order, Order::Desc);
    assert_eq!(listing.limit, 10);
    assert_eq!(listing.page, 1);
    assert_eq!(listing.offset(), 0);
    assert!(listing.topic.is_none());
  }

  #[test]
  fn default_order_depends_on_sort_column() {
    for (column, expected) in &[
      ("title", Order::Asc),
      ("topic", Order::Asc),
      ("author", Order::Asc),
      ("votes", Order::Desc),
      ("created_at", Order::Desc),
      ("comment_count", Order::Desc)
    ] {
      let listing = resolve(Some(*column), None, None, None, None).unwrap();
      assert_eq!(listing.order, *expected, "sort_by={}", column);
    }
  }

  #[test]
  fn explicit_order_beats_the_default() {
    let listing = resolve(Some("votes"), Some("asc"), None, None, None).unwrap();
    assert_eq!(listing.order, Order::Asc);
  }

  #[test]
  fn invalid_params_are_rejected() {
    assert!(resolve(Some("not-valid"), None, None, None, None).is_err());
    assert!(resolve(Some("not-valid"), Some("asc"), None, None, None).is_err());
    assert!(resolve(None, Some("wacky"), None, None, None).is_err());
    assert!(resolve(None, None, None, Some(-10), None).is_err());
    assert!(resolve(None, None, None, Some(0), None).is_err());
    assert!(resolve(None, None, None, None, Some(-4)).is_err());
    assert!(resolve(None, None, None, None, Some(0)).is_err());
  }

  #[test]
  fn listing_defaults_to_newest_first_ten_without_bodies() {
    let pool = seeded_pool();
    let listing = resolve(None, None, None, None, None).unwrap();
    let articles = list_articles(&pool, &listing).unwrap();
    // 13 seeded articles, default limit is 10:
    assert_eq!(ids(&articles), vec![13, 12, 11, 10, 9, 8, 7, 6, 5, 4]);
    for article in &articles {
      assert!(article.body.is_none());
    }
  }

  #[test]
  fn listing_carries_the_aggregate_comment_count() {
    let pool = seeded_pool();
    let listing = resolve(None, Some("asc"), None, None, None).unwrap();
    let articles = list_articles(&pool, &listing).unwrap();
    assert_eq!(articles[0].comment_count, 3);
    assert_eq!(articles[1].comment_count, 1);
    assert_eq!(articles[2].comment_count, 0);
  }

  #[test]
  fn listing_sorts_by_votes_and_title() {
    let pool = seeded_pool();
    let by_votes = resolve(Some("votes"), None, None, Some(20), None).unwrap();
    let articles = list_articles(&pool, &by_votes).unwrap();
    assert_eq!(
      ids(&articles),
      vec![1, 13, 3, 11, 8, 6, 9, 5, 2, 7, 10, 12, 4]
    );

    let by_title = resolve(Some("title"), None, None, Some(20), None).unwrap();
    let articles = list_articles(&pool, &by_title).unwrap();
    assert_eq!(
      ids(&articles),
      vec![2, 1, 9, 6, 5, 8, 12, 3, 7, 11, 10, 13, 4]
    );
  }

  #[test]
  fn listing_sorts_by_comment_count() {
    let pool = seeded_pool();
    let listing = resolve(Some("comment_count"), None, None, None, None).unwrap();
    let articles = list_articles(&pool, &listing).unwrap();
    assert_eq!(articles[0].article_id, 1);
    assert_eq!(articles[1].article_id, 2);
  }

  #[test]
  fn topic_filter_only_returns_that_topic() {
    let pool = seeded_pool();
    let listing = resolve(None, None, Some("coding"), Some(20), None).unwrap();
    let articles = list_articles(&pool, &listing).unwrap();
    assert_eq!(articles.len(), 7);
    for article in &articles {
      assert_eq!(article.topic, "coding");
    }
    assert_eq!(count_articles(&pool, Some("coding")).unwrap(), 7);
  }

  #[test]
  fn empty_topic_is_an_empty_page_not_an_error() {
    let pool = seeded_pool();
    let listing = resolve(None, None, Some("gardening"), None, None).unwrap();
    assert!(list_articles(&pool, &listing).unwrap().is_empty());
    assert_eq!(count_articles(&pool, Some("gardening")).unwrap(), 0);
  }

  #[test]
  fn pages_slice_the_full_listing() {
    let pool = seeded_pool();
    let full = resolve(None, None, None, Some(20), None).unwrap();
    let all = list_articles(&pool, &full).unwrap();

    let page = resolve(None, None, None, Some(3), Some(2)).unwrap();
    let articles = list_articles(&pool, &page).unwrap();
    assert_eq!(ids(&articles), ids(&all[3..6]));

    // The last page can be a partial one:
    let last = resolve(None, None, None, Some(3), Some(5)).unwrap();
    let articles = list_articles(&pool, &last).unwrap();
    assert_eq!(ids(&articles), ids(&all[12..]));
  }

  #[test]
  fn total_count_ignores_pagination() {
    let pool = seeded_pool();
    assert_eq!(count_articles(&pool, None).unwrap(), 13);
  }

  #[test]
  fn single_article_includes_body_and_count() {
    let pool = seeded_pool();
    let article = article_by_id(&pool, 1).unwrap().unwrap();
    assert_eq!(article.comment_count, 3);
    assert!(article.body.is_some());
    assert!(article_by_id(&pool, 9999).unwrap().is_none());
  }

  #[test]
  fn insert_returns_the_created_article() {
    let pool = seeded_pool();
    let article = insert_article(
      &pool,
      &NewArticle {
        author: "ada".to_string(),
        title: "Fearless concurrency".to_string(),
        body: "Hold my mutex".to_string(),
        topic: "coding".to_string(),
        article_img_url: "https://example.com/fearless.jpg".to_string()
      }
    ).unwrap();
    assert_eq!(article.article_id, 14);
    assert_eq!(article.votes, 0);
    assert_eq!(article.comment_count, 0);
    assert_eq!(article.author, "ada");
  }

  #[test]
  fn insert_rejects_unknown_author_or_topic() {
    let pool = seeded_pool();
    let mut article = NewArticle {
      author: "jt".to_string(),
      title: "t".to_string(),
      body: "b".to_string(),
      topic: "coding".to_string(),
      article_img_url: "i".to_string()
    };
    assert!(insert_article(&pool, &article).is_err());
    article.author = "ada".to_string();
    article.topic = "twin-peaks".to_string();
    assert!(insert_article(&pool, &article).is_err());
  }

  #[test]
  fn vote_increments_round_trip() {
    let pool = seeded_pool();
    let article = Article::increment_votes(&pool, 1, 10).unwrap().unwrap();
    assert_eq!(article.votes, 110);
    let article = Article::increment_votes(&pool, 1, -10).unwrap().unwrap();
    assert_eq!(article.votes, 100);
    assert!(Article::increment_votes(&pool, 9999, 1).unwrap().is_none());
  }
}
