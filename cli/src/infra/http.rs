//! Infrastructure implementation of the `HttpTransport` port using `ureq`.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{ApiRequest, ApiResponse, HttpTransport};
use crate::domain::RemoteError;

/// Timeout applied to every API call.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTPS transport.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("agentspace-registrar/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(HTTP_TIMEOUT)
    }
}

fn read_body(url: &str, response: ureq::Response) -> Result<String> {
    response.into_string().map_err(|e| {
        RemoteError::Transport {
            url: url.to_string(),
            message: format!("reading response body: {e}"),
        }
        .into()
    })
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut req = self.agent.request(request.method.as_str(), &request.url);
        for (key, value) in &request.query {
            req = req.query(key, value);
        }
        for (key, value) in &request.headers {
            req = req.set(key, value);
        }

        let result = match &request.body {
            Some(body) => req.send_string(&body.to_string()),
            None => req.call(),
        };

        match result {
            Ok(resp) => {
                let status = resp.status();
                Ok(ApiResponse {
                    status,
                    body: read_body(&request.url, resp)?,
                })
            }
            Err(ureq::Error::Status(status, resp)) => Ok(ApiResponse {
                status,
                body: read_body(&request.url, resp).unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(t)) => Err(RemoteError::Transport {
                url: request.url.clone(),
                message: t.to_string(),
            }
            .into()),
        }
    }
}
