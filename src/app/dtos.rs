use serde::{Deserialize, Serialize};
use crate::db::entities::*;
use crate::utils::time_utils;

// Entity to DTO conversion goes through the From
// trait. Only one way, we never need DTO to entity.

// These two are exactly their entities, so just
// re-export instead of copying the struct:
pub use crate::db::entities::Topic as TopicDto;
pub use crate::db::entities::User as UserDto;

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleDto {
  pub article_id: i64,
  pub title: String,
  pub topic: String,
  pub author: String,
  // Listing queries never load the body, and a None
  // here means the key stays out of the JSON entirely:
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body: Option<String>,
  pub created_at: String,
  pub votes: i64,
  pub article_img_url: Option<String>,
  pub comment_count: i64
}

impl From<Article> for ArticleDto {
  fn from(article: Article) -> Self {
    Self {
      article_id: article.article_id,
      title: article.title,
      topic: article.topic,
      author: article.author,
      body: article.body,
      created_at: time_utils::timestamp_to_date_string(article.created_at),
      votes: article.votes,
      article_img_url: article.article_img_url,
      comment_count: article.comment_count
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentDto {
  pub comment_id: i64,
  pub article_id: i64,
  pub body: String,
  pub votes: i64,
  pub author: String,
  pub created_at: String
}

impl From<Comment> for CommentDto {
  fn from(comment: Comment) -> Self {
    Self {
      comment_id: comment.comment_id,
      article_id: comment.article_id,
      body: comment.body,
      votes: comment.votes,
      author: comment.author,
      created_at: time_utils::timestamp_to_date_string(comment.created_at)
    }
  }
}

// The listing response carries the pre-pagination row
// count next to the page itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticlesPageDto {
  pub articles: Vec<ArticleDto>,
  pub total_count: i64
}
