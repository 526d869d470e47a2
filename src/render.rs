use crate::article::{ArticleDetail, ArticleSummary, Comment};
use crate::view::{Action, Card, CommentBlock, DetailScreen, ImageSlot, ListHeading, ListScreen};
use chrono::{DateTime, FixedOffset};

/// Turns API records into view-model screens.
#[derive(Debug, Clone)]
pub struct Renderer {
    media_root: String,
    offset: FixedOffset,
}

impl Renderer {
    pub fn new(media_root: &str, offset: FixedOffset) -> Self {
        Self {
            media_root: media_root.trim_end_matches('/').to_string(),
            offset,
        }
    }

    /// Absolute and root-relative paths pass through, anything else lives
    /// under the media root.
    pub fn resolve_image_url(&self, raw: Option<&str>) -> Option<String> {
        let path = raw.filter(|p| !p.is_empty())?;
        if path.starts_with("http") || path.starts_with('/') {
            Some(path.to_string())
        } else {
            Some(format!("{}/{}", self.media_root, path))
        }
    }

    /// Day, month and year the way ru-RU writes them: `05.03.2024`.
    pub fn format_date(&self, timestamp: &DateTime<FixedOffset>) -> String {
        timestamp
            .with_timezone(&self.offset)
            .format("%d.%m.%Y")
            .to_string()
    }

    fn image(&self, raw: Option<&str>, title: &str) -> ImageSlot {
        match self.resolve_image_url(raw) {
            Some(src) => ImageSlot::Picture {
                src,
                alt: title.to_string(),
            },
            None => ImageSlot::Placeholder,
        }
    }

    fn card(&self, article: &ArticleSummary) -> Card {
        Card {
            action: Action::LoadArticle(article.id),
            image: self.image(article.image.as_deref(), &article.title),
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            date: self.format_date(&article.published_date),
            views: article.views,
            category: article.category.as_ref().map(|c| c.name.clone()),
            featured: article.is_featured,
            comment_count: article.comment_count,
        }
    }

    /// One card per article, in the order the API returned them.
    pub fn list(&self, heading: ListHeading, articles: Option<&[ArticleSummary]>) -> ListScreen {
        match articles {
            Some(articles) if !articles.is_empty() => ListScreen::Grid {
                heading,
                cards: articles.iter().map(|a| self.card(a)).collect(),
            },
            _ => ListScreen::Empty {
                retry: Action::LoadArticles,
            },
        }
    }

    fn comment(&self, comment: &Comment) -> CommentBlock {
        CommentBlock {
            author: comment.author_name.clone(),
            date: self.format_date(&comment.created_date),
            paragraphs: paragraphs(&comment.content),
        }
    }

    pub fn detail(&self, article: &ArticleDetail) -> DetailScreen {
        let summary = &article.summary;
        DetailScreen {
            back: Action::LoadArticles,
            title: summary.title.clone(),
            date: self.format_date(&summary.published_date),
            views: summary.views,
            category: summary.category.as_ref().map(|c| c.name.clone()),
            image: self.image(summary.image.as_deref(), &summary.title),
            paragraphs: paragraphs(&article.content),
            comments: article.comments.iter().map(|c| self.comment(c)).collect(),
        }
    }
}

/// Splits body text on newlines, dropping blank lines.
pub fn paragraphs(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
