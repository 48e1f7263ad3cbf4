//! The single-page UI, embedded in the binary.
//!
//! All computation happens server-side; the page only uploads the photo,
//! relays the clarifying question, and formats the returned numbers.

use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}
