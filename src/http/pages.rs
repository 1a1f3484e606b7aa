//! Full-page templates returned by the shell.

use askama::Template;
use askama_web::WebTemplate;

/// A resolved route: layout and views composed into `body`.
#[derive(Template, WebTemplate)]
#[template(path = "pages/shell.html")]
pub struct ShellPage {
    pub root_class: &'static str,
    pub title: String,
    pub app_title: String,
    pub body: String,
}

/// Fallback for paths no route matches.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundPage {
    pub root_class: &'static str,
    pub title: String,
    pub app_title: String,
    pub path: String,
    pub alert: String,
}

/// Retry page for a view that failed to load.
#[derive(Template, WebTemplate)]
#[template(path = "pages/load_failed.html")]
pub struct LoadFailedPage {
    pub root_class: &'static str,
    pub title: String,
    pub app_title: String,
    pub view: String,
    pub alert: String,
}
