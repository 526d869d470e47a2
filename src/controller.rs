use crate::article::{ArticleDetail, ArticleId, ArticleListResponse, ArticleSummary};
use crate::config::Config;
use crate::error::NewsResult;
use crate::fetch::DataFetcher;
use crate::mount::Mount;
use crate::render::Renderer;
use crate::view::{Action, Event, ListHeading, ViewState};
use serde::de::DeserializeOwned;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Owns the mount point and drives every load through fetch, render and
/// the state transition.
///
/// Overlapping loads are allowed. By default the response that completes
/// last is what stays on screen; with `discard_stale_responses` set, only
/// the most recently started load may write.
#[derive(Debug)]
pub struct ViewController<M: Mount> {
    fetcher: DataFetcher,
    renderer: Renderer,
    mount: M,
    region: Mutex<Region>,
    discard_stale: bool,
}

/// What is on screen and which load last claimed it. Both change under the
/// same lock so a superseded load cannot write after its check passed.
#[derive(Debug, Default)]
struct Region {
    view: ViewState,
    generation: u64,
}

impl<M: Mount> ViewController<M> {
    pub fn new(config: &Config, mount: M) -> NewsResult<Self> {
        Ok(Self {
            fetcher: DataFetcher::new(&config.origin, &config.api_base)?,
            renderer: Renderer::new(&config.media_root, config.utc_offset()?),
            mount,
            region: Mutex::new(Region::default()),
            discard_stale: config.discard_stale_responses,
        })
    }

    pub fn mount(&self) -> &M {
        &self.mount
    }

    pub fn state(&self) -> ViewState {
        self.region
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .view
            .clone()
    }

    /// Startup, and what a reload re-runs.
    pub async fn init(&self) {
        self.load_articles().await;
    }

    pub async fn load_articles(&self) {
        info!("loading article list");
        self.load_list("articles/", &[], ListHeading::Latest).await;
    }

    pub async fn load_featured(&self) {
        info!("loading featured articles");
        self.load_list("articles/featured/", &[], ListHeading::Featured)
            .await;
    }

    pub async fn search(&self, query: &str) {
        info!(query, "searching articles");
        self.load_list(
            "articles/search/",
            &[("q", query)],
            ListHeading::Search(query.to_string()),
        )
        .await;
    }

    pub async fn load_article_detail(&self, id: ArticleId) {
        let generation = self.begin();
        info!(id, "loading article");

        let path = format!("articles/{id}/");
        let Some(article) = self.fetch::<ArticleDetail>(generation, &path, &[]).await else {
            return;
        };
        info!(id, title = %article.summary.title, "article loaded");

        let screen = self.renderer.detail(&article);
        self.commit(generation, Event::DetailLoaded(screen));
    }

    pub async fn dispatch(&self, action: Action) {
        debug!(action = action.name(), "dispatching");
        match action {
            Action::LoadArticles => self.load_articles().await,
            Action::LoadArticle(id) => self.load_article_detail(id).await,
            Action::Reload => self.init().await,
        }
    }

    async fn load_list(&self, path: &str, query: &[(&str, &str)], heading: ListHeading) {
        let generation = self.begin();

        let Some(response) = self
            .fetch::<ArticleListResponse>(generation, path, query)
            .await
        else {
            return;
        };
        let articles: Option<Vec<ArticleSummary>> = response.into_articles();
        info!(
            count = articles.as_ref().map_or(0, Vec::len),
            "articles received"
        );

        let screen = self.renderer.list(heading, articles.as_deref());
        self.commit(generation, Event::ListLoaded(screen));
    }

    /// Shows the loading placeholder and claims a new generation.
    fn begin(&self) -> u64 {
        let mut region = self.region.lock().unwrap_or_else(PoisonError::into_inner);
        region.generation += 1;
        self.apply(&mut region, Event::LoadStarted);
        region.generation
    }

    /// Failures are shown in the error view and come back as `None`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        generation: u64,
        path: &str,
        query: &[(&str, &str)],
    ) -> Option<T> {
        match self.fetcher.get_json(path, query).await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%err, path, "load failed");
                self.commit(generation, Event::Failed(err.to_string()));
                None
            }
        }
    }

    fn commit(&self, generation: u64, event: Event) {
        let mut region = self.region.lock().unwrap_or_else(PoisonError::into_inner);
        if self.discard_stale && generation != region.generation {
            debug!(generation, "discarding response of a superseded load");
            return;
        }
        self.apply(&mut region, event);
    }

    fn apply(&self, region: &mut Region, event: Event) {
        let next = region.view.transition(event);
        region.view = next.clone();
        self.mount.replace(next);
    }
}
