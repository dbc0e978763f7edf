use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that appends an API key as a URL query parameter.
///
/// Carto accepts its key as `api_key`; anonymous access to public tables
/// needs no wrapper at all.
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub key: String,
}

impl<C> UrlParam<C> {
    pub fn carto(inner: C, key: String) -> Self {
        Self {
            inner,
            param_name: "api_key".to_string(),
            key,
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(&self.param_name, &self.key);
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{BasicClient, fetch_bytes};
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_appends_key_to_existing_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/sql")
                    .query_param("q", "SELECT 1")
                    .query_param("api_key", "secret");
                then.status(200).body("ok");
            })
            .await;
        let client = UrlParam::carto(BasicClient::new().unwrap(), "secret".to_string());

        let body = fetch_bytes(&client, &server.url("/sql?q=SELECT%201")).await.unwrap();

        assert_eq!(body, b"ok");
        mock.assert_async().await;
    }
}
