use crate::error::{Error, NewsResult};
use crate::html;
use crate::view::ViewState;
use maud::html as markup;
use regex::{NoExpand, Regex};
use std::path::Path;

pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/index.html");

/// Host page with a single `{{ content }}` mount point. Rendering replaces
/// the mount point with the markup of one state; nothing else in the
/// template changes apart from `{{ title }}`.
#[derive(Debug)]
pub struct Document {
    template: String,
    content_marker: Regex,
    title_marker: Regex,
}

impl Document {
    pub fn new(template: String) -> NewsResult<Document> {
        let content_marker = Regex::new(r"\{\{\s*content\s*\}\}")?;
        let title_marker = Regex::new(r"\{\{\s*title\s*\}\}")?;

        if !content_marker.is_match(&template) {
            return Err(Error::MissingMountPoint);
        }

        Ok(Document {
            template,
            content_marker,
            title_marker,
        })
    }

    pub fn builtin() -> NewsResult<Document> {
        Document::new(DEFAULT_TEMPLATE.to_string())
    }

    pub fn from_file(path: &Path) -> NewsResult<Document> {
        let template = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Document::new(template)
    }

    pub fn render(&self, state: &ViewState) -> String {
        let content = html::render(state).into_string();
        let title = markup! { (html::page_title(state)) }.into_string();

        let page = self
            .content_marker
            .replace_all(&self.template, NoExpand(&content));
        self.title_marker
            .replace_all(&page, NoExpand(&title))
            .into_owned()
    }
}
