//! HTML rendering of the view-model. Interpolated text is escaped by maud.

use crate::view::{
    Action, Card, CommentBlock, DetailScreen, ErrorScreen, ImageSlot, ListHeading, ListScreen,
    ViewState,
};
use maud::{html, Markup};

const LOADING: &str = "Загрузка...";
const LATEST: &str = "Последние новости";
const FEATURED: &str = "Рекомендуемые новости";
const ERROR: &str = "Ошибка";

pub fn page_title(state: &ViewState) -> String {
    match state {
        ViewState::Loading => LOADING.to_string(),
        ViewState::ListView(ListScreen::Grid { heading, .. }) => heading_text(heading),
        ViewState::ListView(ListScreen::Empty { .. }) => LATEST.to_string(),
        ViewState::DetailView(screen) => screen.title.clone(),
        ViewState::ErrorView(_) => ERROR.to_string(),
    }
}

fn heading_text(heading: &ListHeading) -> String {
    match heading {
        ListHeading::Latest => LATEST.to_string(),
        ListHeading::Featured => FEATURED.to_string(),
        ListHeading::Search(query) => format!("Результаты поиска: «{query}»"),
    }
}

/// Markup for the whole content region.
pub fn render(state: &ViewState) -> Markup {
    match state {
        ViewState::Loading => loading(),
        ViewState::ListView(screen) => list(screen),
        ViewState::DetailView(screen) => detail(screen),
        ViewState::ErrorView(screen) => error(screen),
    }
}

fn loading() -> Markup {
    html! {
        div class="loading" {
            i class="fas fa-spinner fa-spin" {}
            p { (LOADING) }
        }
    }
}

fn button(action: Action, class: &str, label: &str) -> Markup {
    html! {
        button type="button" class=(class) data-action=(action.name()) data-article-id=[action.article_id()] {
            (label)
        }
    }
}

fn image(slot: &ImageSlot, class: &str) -> Markup {
    html! {
        @match slot {
            ImageSlot::Picture { src, alt } => {
                img src=(src) alt=(alt) class=(class);
            }
            ImageSlot::Placeholder => {
                div class=(format!("{class} image-placeholder")) {
                    i class="fas fa-newspaper" {}
                }
            }
        }
    }
}

fn category(name: Option<&str>) -> Markup {
    html! {
        @if let Some(name) = name {
            span class="article-category" { (name) }
        }
    }
}

fn card(card: &Card) -> Markup {
    html! {
        div class="article-card" data-action=(card.action.name()) data-article-id=[card.action.article_id()] {
            (image(&card.image, "article-image"))
            div class="article-content" {
                h3 class="article-title" {
                    (card.title)
                    @if card.featured {
                        " "
                        span class="article-featured" title="Рекомендуемая" { "★" }
                    }
                }
                p class="article-excerpt" { (card.excerpt) }
                div class="article-meta" {
                    span { (card.date) }
                    span { "👁️ " (card.views) }
                    @if let Some(count) = card.comment_count {
                        span { "💬 " (count) }
                    }
                    (category(card.category.as_deref()))
                }
            }
        }
    }
}

fn list(screen: &ListScreen) -> Markup {
    match screen {
        ListScreen::Empty { retry } => html! {
            div class="error" {
                h2 { "Новости не найдены" }
                p { "Попробуйте создать статьи в админке" }
                (button(*retry, "btn", "Обновить"))
            }
        },
        ListScreen::Grid { heading, cards } => html! {
            h2 class="articles-heading" { (heading_text(heading)) }
            div class="articles-grid" {
                @for c in cards {
                    (card(c))
                }
            }
        },
    }
}

fn comment(block: &CommentBlock) -> Markup {
    html! {
        div class="comment" {
            div class="comment-meta" {
                strong { (block.author) }
                " "
                span { (block.date) }
            }
            @for paragraph in &block.paragraphs {
                p { (paragraph) }
            }
        }
    }
}

fn detail(screen: &DetailScreen) -> Markup {
    html! {
        div class="article-detail" {
            (button(screen.back, "btn btn-back", "← Назад к списку новостей"))
            article {
                h1 { (screen.title) }
                div class="article-meta" {
                    span { strong { "Опубликовано:" } " " (screen.date) }
                    span { strong { "Просмотры:" } " " (screen.views) }
                    (category(screen.category.as_deref()))
                }
                (image(&screen.image, "article-cover"))
                div class="article-body" {
                    @for paragraph in &screen.paragraphs {
                        p { (paragraph) }
                    }
                }
                @if !screen.comments.is_empty() {
                    section class="comments" {
                        h3 { "Комментарии (" (screen.comments.len()) ")" }
                        @for block in &screen.comments {
                            (comment(block))
                        }
                    }
                }
            }
        }
    }
}

fn error(screen: &ErrorScreen) -> Markup {
    let [to_list, reload] = screen.actions;
    html! {
        div class="error" {
            i class="fas fa-exclamation-triangle" {}
            h3 { (ERROR) }
            p { (screen.message) }
            div class="error-actions" {
                (button(to_list, "btn", "К списку новостей"))
                " "
                (button(reload, "btn btn-danger", "Обновить страницу"))
            }
        }
    }
}
