use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT,
};

/// Build browser-like headers for TopCV page requests
///
/// When `user_agent` is `None` the header is left out and the client's
/// default user agent is sent instead. Accept-Encoding is left to reqwest so
/// compressed bodies are decoded transparently.
///
/// # Examples
///
/// ```
/// use jobsnitch::crawler::headers::build_page_headers;
///
/// let headers = build_page_headers(Some("Mozilla/5.0 (X11; Linux x86_64)"));
/// assert!(headers.contains_key("user-agent"));
/// ```
pub fn build_page_headers(user_agent: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Some(value) = user_agent.and_then(|ua| HeaderValue::from_str(ua).ok()) {
        headers.insert(USER_AGENT, value);
    }
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("vi-VN,vi;q=0.9,en-US;q=0.8,en;q=0.7"),
    );

    // Sec-Fetch headers for modern browser compatibility
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );

    headers
}
