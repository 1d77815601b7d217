//! Mock sigevent endpoint and colormap host.

use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, Request, ResponseTemplate,
};

/// Path the mock sigevent service listens on
pub const EVENTS_PATH: &str = "/sigevent/events/create";

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockSigevent {
    pub server: MockServer,
}

impl MockSigevent {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Full URL of the events endpoint
    pub fn events_url(&self) -> String {
        format!("{}{}", self.server.uri(), EVENTS_PATH)
    }

    /// Get URL for a specific path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Accept any report
    pub async fn accept_events(&self) {
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Fail every report with `status`
    pub async fn reject_events(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Expect exactly `times` reports of `severity`
    pub async fn expect_severity(&self, severity: &str, times: u64) {
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .and(query_param("type", severity))
            .respond_with(ResponseTemplate::new(200))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Serve a colormap document at `endpoint`
    pub async fn serve_colormap(&self, endpoint: &str, xml: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(xml)
                    .insert_header("content-type", "application/xml"),
            )
            .mount(&self.server)
            .await;
    }

    /// Requests received on the events endpoint, in order
    pub async fn events(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == EVENTS_PATH)
            .collect()
    }
}

/// Value of query parameter `key` on `request`
pub fn query(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
