use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer};

pub type ArticleId = u64;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// One entry of the article list endpoint.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct ArticleSummary {
    pub id: ArticleId,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(deserialize_with = "timestamp")]
    pub published_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub author: Option<u64>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub comment_count: Option<u64>,
}

/// A full article as served by the single-article endpoint.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub summary: ArticleSummary,
    /// Newline-delimited paragraphs.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct Comment {
    pub id: u64,
    pub author_name: String,
    #[serde(default)]
    pub content: String,
    #[serde(deserialize_with = "timestamp")]
    pub created_date: DateTime<FixedOffset>,
}

/// The list endpoint answers either with a bare array or with a paginated
/// envelope carrying the array under `results`.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
#[serde(untagged)]
pub enum ArticleListResponse {
    Bare(Vec<ArticleSummary>),
    Envelope {
        #[serde(default)]
        results: Option<Vec<ArticleSummary>>,
    },
}

impl ArticleListResponse {
    pub fn into_articles(self) -> Option<Vec<ArticleSummary>> {
        match self {
            ArticleListResponse::Bare(articles) => Some(articles),
            ArticleListResponse::Envelope { results } => results,
        }
    }
}

/// Parses RFC 3339, falling back to a naive timestamp read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn summary_json(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Article {id}"),
            "slug": format!("article-{id}"),
            "excerpt": "Short",
            "author": 1,
            "category": {"id": 2, "name": "Спорт", "slug": "sport", "description": ""},
            "image": null,
            "published_date": "2024-03-05T10:00:00+03:00",
            "views": 12,
            "is_featured": false,
            "comment_count": 0
        })
    }

    #[test]
    fn bare_list_is_accepted() {
        let raw = json!([summary_json(1), summary_json(2)]);
        let response: ArticleListResponse = serde_json::from_value(raw).unwrap();
        let ids: Vec<_> = response.into_articles().unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn envelope_is_unwrapped() {
        let raw = json!({"count": 2, "next": null, "previous": null, "results": [summary_json(7), summary_json(3)]});
        let response: ArticleListResponse = serde_json::from_value(raw).unwrap();
        let ids: Vec<_> = response.into_articles().unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn envelope_without_results_is_absent() {
        let response: ArticleListResponse =
            serde_json::from_value(json!({"results": null})).unwrap();
        assert_eq!(response.into_articles(), None);
    }

    #[test]
    fn optional_fields_default() {
        let raw = json!({"id": 5, "title": "Bare", "published_date": "2024-01-01T00:00:00Z"});
        let article: ArticleSummary = serde_json::from_value(raw).unwrap();
        assert_eq!(article.excerpt, "");
        assert_eq!(article.views, 0);
        assert_eq!(article.image, None);
        assert_eq!(article.category, None);
        assert!(!article.is_featured);
    }

    #[test]
    fn missing_title_is_rejected() {
        let raw = json!({"id": 5, "published_date": "2024-01-01T00:00:00Z"});
        assert!(serde_json::from_value::<ArticleSummary>(raw).is_err());
    }

    #[test]
    fn detail_carries_content_and_comments() {
        let mut raw = summary_json(9);
        raw["content"] = json!("First\nSecond");
        raw["comments"] = json!([
            {"id": 1, "author_name": "Анна", "content": "Спасибо", "created_date": "2024-03-06T08:00:00Z"}
        ]);
        let detail: ArticleDetail = serde_json::from_value(raw).unwrap();
        assert_eq!(detail.summary.id, 9);
        assert_eq!(detail.content, "First\nSecond");
        assert_eq!(detail.comments.len(), 1);
        assert_eq!(detail.comments[0].author_name, "Анна");
    }

    #[test]
    fn naive_timestamps_are_utc() {
        let parsed = parse_timestamp("2024-02-29T23:15:00.123456").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert_eq!((parsed.day(), parsed.hour()), (29, 23));
        assert!(parse_timestamp("yesterday").is_none());
    }
}
