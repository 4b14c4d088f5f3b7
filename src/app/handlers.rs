use actix_web::{web, HttpResponse};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::db::{self, Pool, VoteTarget};
use crate::db::articles::{ArticlesListing, ArticlesQuery};
use crate::db::entities::{Article, Comment, NewArticle};
use crate::utils::serde_utils;
use super::dtos::*;
use super::error::{map_db_error, Error};
use super::AppState;

// Module with all the API handler functions.
// Should probably be split into a directory
// with multiple files grouping handlers together.

/* --- Request body objects --- */
// These have to be public.
#[derive(Serialize, Deserialize)]
pub struct NewArticleBody {
  pub author: String,
  pub title: String,
  pub body: String,
  pub topic: String,
  pub article_img_url: Option<String>
}

#[derive(Serialize, Deserialize)]
pub struct NewCommentBody {
  pub username: String,
  pub body: String
}

// inc_votes stays an Option so a missing field reaches
// the handler instead of bouncing at deserialization,
// the error message is nicer that way. A wrong type
// still gets a 400 from the JsonConfig handler.
#[derive(Serialize, Deserialize)]
pub struct VotesBody {
  pub inc_votes: Option<i64>
}
/* --- End request body objects --- */

lazy_static! {
  // What GET /api responds with. The shape mirrors the
  // endpoints.json document the old API was serving.
  static ref ENDPOINTS: Value = json!({
    "GET /api": {
      "description": "Serves a json representation of all the available endpoints"
    },
    "GET /api/topics": {
      "description": "Serves an array of all topics"
    },
    "GET /api/articles": {
      "description": "Serves a page of article summaries plus a total_count",
      "queries": ["sort_by", "order", "topic", "limit", "p"]
    },
    "POST /api/articles": {
      "description": "Adds an article and serves it back"
    },
    "GET /api/articles/:article_id": {
      "description": "Serves the article with the given id, body included"
    },
    "PATCH /api/articles/:article_id": {
      "description": "Applies an inc_votes delta and serves the updated article"
    },
    "GET /api/articles/:article_id/comments": {
      "description": "Serves the comments of an article, newest first"
    },
    "POST /api/articles/:article_id/comments": {
      "description": "Adds a comment to an article and serves it back"
    },
    "DELETE /api/comments/:comment_id": {
      "description": "Deletes the comment with the given id"
    },
    "PATCH /api/comments/:comment_id": {
      "description": "Applies an inc_votes delta and serves the updated comment"
    },
    "GET /api/users": {
      "description": "Serves an array of all users"
    },
    "GET /api/users/:username": {
      "description": "Serves the user with the given username"
    }
  });
}

// Shared by the two PATCH endpoints, which have the
// exact same contract on top of different tables.
// Rejecting a zero delta is deliberate, a zero
// increment is treated as missing input.
fn apply_vote_patch<T, D>(
  pool: &Pool,
  id: i64,
  body: VotesBody,
  missing_msg: &str
) -> Result<D, Error>
  where
    T: VoteTarget,
    D: From<T>,
{
  let delta = match body.inc_votes {
    None | Some(0) => return Err(Error::BadRequest(
      String::from("inc_votes must be a non-zero integer")
    )),
    Some(delta) => delta
  };
  match T::increment_votes(pool, id, delta).map_err(map_db_error)? {
    Some(record) => Ok(D::from(record)),
    None => Err(Error::NotFound(String::from(missing_msg)))
  }
}

pub async fn index() -> HttpResponse {
  HttpResponse::Ok().body("Nothing here, try /api")
}

// Default response when no route matched the request:
pub async fn not_found() -> Result<HttpResponse, Error> {
  Err(Error::NotFound(String::from("Endpoint doesn't exist")))
}

pub async fn api_index() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "endpoints": ENDPOINTS.clone() }))
}

// Let's use Result everywhere to be consistent,
// see the "error" module for the Error to response
// conversions.
pub async fn topics(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let topics = db::topics::all_topics(&app_state.pool)
    .map_err(map_db_error)?;
  Ok(HttpResponse::Ok().json(json!({ "topics": topics })))
}

// The articles listing. Validation happens in one go
// through ArticlesListing::resolve, then the ordering
// of checks matters:
// an unknown topic is a 404 while a known topic with
// no articles is an empty page, and a page that starts
// beyond the last row is a 404 unless it's the first
// page.
pub async fn articles(
  app_state: web::Data<AppState>,
  query: web::Query<ArticlesQuery>
) -> Result<HttpResponse, Error> {
  let listing = ArticlesListing::resolve(query.into_inner())?;

  if let Some(topic) = &listing.topic {
    if db::topics::topic_by_slug(&app_state.pool, topic)
      .map_err(map_db_error)?
      .is_none() {
        return Err(Error::NotFound(
          format!("Topic '{}' does not exist", topic)
        ));
    }
  }

  let total_count = db::articles::count_articles(
    &app_state.pool,
    listing.topic.as_deref()
  ).map_err(map_db_error)?;

  let offset = listing.offset();
  if offset > 0 && offset >= total_count {
    return Err(Error::NotFound(String::from("Page is past the last article")));
  }

  let articles = db::articles::list_articles(&app_state.pool, &listing)
    .map_err(map_db_error)?;
  let page = ArticlesPageDto {
    articles: articles.into_iter().map(Into::into).collect(),
    total_count
  };
  Ok(HttpResponse::Ok().json(page))
}

// Path variables have to be in a tuple.
pub async fn article(
  app_state: web::Data<AppState>,
  path: web::Path<(i64,)>
) -> Result<HttpResponse, Error> {
  let article_id = path.into_inner().0;
  match db::articles::article_by_id(&app_state.pool, article_id)
    .map_err(map_db_error)? {
      Some(article) => Ok(
        HttpResponse::Ok().json(json!({ "article": ArticleDto::from(article) }))
      ),
      None => Err(Error::NotFound(String::from("Article does not exist")))
  }
}

pub async fn post_article(
  app_state: web::Data<AppState>,
  body: web::Json<NewArticleBody>
) -> Result<HttpResponse, Error> {
  let body = body.into_inner();
  // The deserializer already enforces field presence,
  // this catches present-but-blank values:
  if body.author.trim().is_empty()
    || body.title.trim().is_empty()
    || body.body.trim().is_empty()
    || body.topic.trim().is_empty() {
      return Err(Error::BadRequest(
        String::from("author, title, body and topic are all required")
      ));
  }
  let article_img_url = serde_utils::empty_string_to_none(body.article_img_url)
    .unwrap_or_else(|| app_state.defaults.article_img_url.clone());
  let new_article = NewArticle {
    author: body.author,
    title: body.title,
    body: body.body,
    topic: body.topic,
    article_img_url
  };
  // Unknown author or topic trips a foreign key here,
  // which map_db_error turns into a 400:
  let created = db::articles::insert_article(&app_state.pool, &new_article)
    .map_err(map_db_error)?;
  Ok(HttpResponse::Created().json(json!({ "article": ArticleDto::from(created) })))
}

pub async fn patch_article_votes(
  app_state: web::Data<AppState>,
  path: web::Path<(i64,)>,
  body: web::Json<VotesBody>
) -> Result<HttpResponse, Error> {
  let article_id = path.into_inner().0;
  let article: ArticleDto = apply_vote_patch::<Article, ArticleDto>(
    &app_state.pool,
    article_id,
    body.into_inner(),
    "Article does not exist"
  )?;
  Ok(HttpResponse::Ok().json(json!({ "article": article })))
}

pub async fn comments(
  app_state: web::Data<AppState>,
  path: web::Path<(i64,)>
) -> Result<HttpResponse, Error> {
  let article_id = path.into_inner().0;
  // A comment-less article is an empty array, only a
  // missing article is a 404, hence the existence
  // check first:
  if Article::exists(&app_state.pool, article_id)
    .map_err(map_db_error)?
    .is_none() {
      return Err(Error::NotFound(String::from("Article does not exist")));
  }
  let comments: Vec<CommentDto> =
    db::comments::comments_for_article(&app_state.pool, article_id)
      .map_err(map_db_error)?
      .into_iter()
      .map(Into::into)
      .collect();
  Ok(HttpResponse::Ok().json(json!({ "comments": comments })))
}

pub async fn post_comment(
  app_state: web::Data<AppState>,
  path: web::Path<(i64,)>,
  body: web::Json<NewCommentBody>
) -> Result<HttpResponse, Error> {
  let article_id = path.into_inner().0;
  let body = body.into_inner();
  if body.username.trim().is_empty() || body.body.trim().is_empty() {
    return Err(Error::BadRequest(
      String::from("username and body are both required")
    ));
  }
  // The article has to be checked here: commenting on a
  // missing article is a 404, while the unknown-author
  // case below is a foreign key violation and a 400.
  if Article::exists(&app_state.pool, article_id)
    .map_err(map_db_error)?
    .is_none() {
      return Err(Error::NotFound(String::from("Article does not exist")));
  }
  let comment = db::comments::insert_comment(
    &app_state.pool,
    article_id,
    &body.username,
    &body.body
  ).map_err(map_db_error)?;
  Ok(HttpResponse::Created().json(json!({ "comment": CommentDto::from(comment) })))
}

pub async fn delete_comment(
  app_state: web::Data<AppState>,
  path: web::Path<(i64,)>
) -> Result<HttpResponse, Error> {
  let comment_id = path.into_inner().0;
  if db::comments::delete_comment(&app_state.pool, comment_id)
    .map_err(map_db_error)? {
      Ok(HttpResponse::NoContent().finish())
  } else {
    Err(Error::NotFound(String::from("Comment does not exist")))
  }
}

pub async fn patch_comment_votes(
  app_state: web::Data<AppState>,
  path: web::Path<(i64,)>,
  body: web::Json<VotesBody>
) -> Result<HttpResponse, Error> {
  let comment_id = path.into_inner().0;
  let comment: CommentDto = apply_vote_patch::<Comment, CommentDto>(
    &app_state.pool,
    comment_id,
    body.into_inner(),
    "Comment does not exist"
  )?;
  Ok(HttpResponse::Ok().json(json!({ "comment": comment })))
}

pub async fn users(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let users = db::users::all_users(&app_state.pool)
    .map_err(map_db_error)?;
  Ok(HttpResponse::Ok().json(json!({ "users": users })))
}

pub async fn user(
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>
) -> Result<HttpResponse, Error> {
  let username = path.into_inner().0;
  match db::users::user_by_username(&app_state.pool, &username)
    .map_err(map_db_error)? {
      Some(user) => Ok(HttpResponse::Ok().json(json!({ "user": user }))),
      None => Err(Error::NotFound(String::from("User does not exist")))
  }
}
