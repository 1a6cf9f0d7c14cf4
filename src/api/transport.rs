use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::{Client, Method, header::CONTENT_TYPE};

use super::error::{ApiError, ApiResult};

/// One outgoing request, already fully built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Serialized JSON, `None` for GET and DELETE.
    pub body: Option<String>,
}

/// Seam between the client and the network.
///
/// `send` is called synchronously at dispatch time, so requests reach the
/// transport in the order they were issued. The returned future resolves to
/// the response body of a 2xx reply.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> BoxFuture<'static, ApiResult<String>>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> ApiResult<Self> {
        // no timeout: the transport default applies
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'static, ApiResult<String>> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        async move {
            let response = builder.send().await?;
            let status = response.status();
            let text = response.text().await?;

            if !status.is_success() {
                let text = text.trim();
                let message = if text.is_empty() {
                    status.canonical_reason().unwrap_or("unknown status").to_string()
                } else {
                    text.to_string()
                };
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    message,
                });
            }

            Ok(text)
        }
        .boxed()
    }
}
