use axum::response::Html;

const INDEX_HTML: &str = include_str!("static/index.html");

/// GET /
/// Serves the single-page form: two text areas and a generate button.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_page_has_both_inputs_and_button() {
        let Html(page) = index_handler().await;
        assert!(page.contains("id=\"resume\""));
        assert!(page.contains("id=\"job-description\""));
        assert!(page.contains("id=\"generate\""));
        assert!(page.contains("/api/v1/tailor"));
    }
}
