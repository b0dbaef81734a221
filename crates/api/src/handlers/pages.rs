//! Fallback handler for page navigation.
//!
//! Everything outside `/api` and `/health` lands here after passing the
//! gate middleware. The server's job ends at the access decision; the
//! shell it returns is a placeholder for the client bundle, which owns
//! rendering.

use axum::response::Html;

const SHELL: &str = "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>SkillSwap</title></head>\n<body><div id=\"app\"></div></body>\n</html>\n";

/// Serve the application shell.
pub async fn app_shell() -> Html<&'static str> {
    Html(SHELL)
}
