//! View-model of the content region and the transitions between its states.
//!
//! Renderers turn API records into these types; a rendering target (see
//! [`crate::html`]) turns them into markup.

use crate::article::ArticleId;
use tracing::trace;

/// User actions bound to buttons and cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LoadArticles,
    LoadArticle(ArticleId),
    /// Full re-initialization of the application shell.
    Reload,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::LoadArticles => "load-articles",
            Action::LoadArticle(_) => "load-article",
            Action::Reload => "reload",
        }
    }

    pub fn article_id(&self) -> Option<ArticleId> {
        match self {
            Action::LoadArticle(id) => Some(*id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    Picture { src: String, alt: String },
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListHeading {
    Latest,
    Featured,
    Search(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Bound to the whole card.
    pub action: Action,
    pub image: ImageSlot,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub views: u64,
    pub category: Option<String>,
    pub featured: bool,
    pub comment_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScreen {
    Empty { retry: Action },
    Grid { heading: ListHeading, cards: Vec<Card> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub author: String,
    pub date: String,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailScreen {
    pub back: Action,
    pub title: String,
    pub date: String,
    pub views: u64,
    pub category: Option<String>,
    pub image: ImageSlot,
    pub paragraphs: Vec<String>,
    pub comments: Vec<CommentBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorScreen {
    pub message: String,
    /// Back to the list, then reload.
    pub actions: [Action; 2],
}

impl ErrorScreen {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            actions: [Action::LoadArticles, Action::Reload],
        }
    }
}

/// Everything the content region can show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    ListView(ListScreen),
    DetailView(DetailScreen),
    ErrorView(ErrorScreen),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    LoadStarted,
    ListLoaded(ListScreen),
    DetailLoaded(DetailScreen),
    Failed(String),
}

impl ViewState {
    pub fn kind(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::ListView(_) => "list",
            ViewState::DetailView(_) => "detail",
            ViewState::ErrorView(_) => "error",
        }
    }

    /// No state is terminal and every event is accepted from every state.
    pub fn transition(&self, event: Event) -> ViewState {
        let next = match event {
            Event::LoadStarted => ViewState::Loading,
            Event::ListLoaded(screen) => ViewState::ListView(screen),
            Event::DetailLoaded(screen) => ViewState::DetailView(screen),
            Event::Failed(message) => ViewState::ErrorView(ErrorScreen::new(message)),
        };
        trace!(from = self.kind(), to = next.kind(), "view transition");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn detail() -> DetailScreen {
        DetailScreen {
            back: Action::LoadArticles,
            title: "T".into(),
            date: "01.01.2024".into(),
            views: 0,
            category: None,
            image: ImageSlot::Placeholder,
            paragraphs: vec![],
            comments: vec![],
        }
    }

    #[test]
    fn starts_loading() {
        assert_eq!(ViewState::default(), ViewState::Loading);
    }

    #[test]
    fn every_state_can_start_loading() {
        let states = [
            ViewState::Loading,
            ViewState::ListView(ListScreen::Empty { retry: Action::LoadArticles }),
            ViewState::DetailView(detail()),
            ViewState::ErrorView(ErrorScreen::new("boom")),
        ];
        for state in states {
            assert_eq!(state.transition(Event::LoadStarted), ViewState::Loading);
        }
    }

    #[test]
    fn loading_resolves_to_loaded_views() {
        let list = ListScreen::Grid { heading: ListHeading::Latest, cards: vec![] };
        assert_eq!(
            ViewState::Loading.transition(Event::ListLoaded(list.clone())),
            ViewState::ListView(list)
        );
        assert_eq!(
            ViewState::Loading.transition(Event::DetailLoaded(detail())),
            ViewState::DetailView(detail())
        );
    }

    #[test]
    fn failure_offers_list_and_reload() {
        let next = ViewState::DetailView(detail()).transition(Event::Failed("API ошибка: 500".into()));
        let ViewState::ErrorView(screen) = next else {
            panic!("expected error view");
        };
        assert_eq!(screen.message, "API ошибка: 500");
        assert_eq!(screen.actions, [Action::LoadArticles, Action::Reload]);
    }

    #[test]
    fn action_attributes() {
        assert_eq!(Action::LoadArticle(3).name(), "load-article");
        assert_eq!(Action::LoadArticle(3).article_id(), Some(3));
        assert_eq!(Action::Reload.article_id(), None);
    }
}
