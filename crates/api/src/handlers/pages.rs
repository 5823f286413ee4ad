//! Static HTML pages served to the operator's browser.

use axum::response::Html;

const LOGIN_PAGE: &str = include_str!("../../assets/login.html");
const DASHBOARD_PAGE: &str = include_str!("../../assets/dashboard.html");

/// Marker in the login page replaced by the error banner.
const ERROR_SLOT: &str = "<!-- error -->";

/// Render the login page, optionally with an error banner.
pub fn render_login(error: Option<&str>) -> Html<String> {
    let banner = error
        .map(|msg| format!("<p class=\"error\">{msg}</p>"))
        .unwrap_or_default();
    Html(LOGIN_PAGE.replace(ERROR_SLOT, &banner))
}

/// GET /login
pub async fn login_page() -> Html<String> {
    render_login(None)
}

/// GET /
///
/// Session-gated. The page pulls its data from the `/api/*` routes.
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}
