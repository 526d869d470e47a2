//! Client-side view layer for the news site.
//!
//! Article data is fetched from the backend API, turned into a view-model
//! ([`view::ViewState`]) and written into the mount point of a host HTML
//! document. Every load replaces the mount point wholesale.

pub mod article;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod fetch;
pub mod html;
pub mod mount;
pub mod render;
pub mod view;

pub use article::{ArticleDetail, ArticleId, ArticleListResponse, ArticleSummary, Category, Comment};
pub use config::Config;
pub use controller::ViewController;
pub use document::Document;
pub use error::{Error, NewsResult};
pub use fetch::{DataFetcher, FetchError};
pub use mount::{MemoryMount, Mount};
pub use view::{Action, Event, ViewState};
