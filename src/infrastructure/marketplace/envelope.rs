use super::transport::TransportResponse;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Top-level shape of every partner API reply.
///
/// Failed calls carry `error`/`message` and usually no `response`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `response` of `/api/v2/product/get_category`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListPayload {
    /// Absent and empty both mean "no categories".
    #[serde(default)]
    pub category_list: Option<Vec<RawCategory>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    pub category_id: Option<i64>,
    pub display_category_name: Option<String>,
    pub original_category_name: Option<String>,
    pub parent_category_id: Option<i64>,
    pub has_children: Option<bool>,
}

/// `response` of `/api/v2/product/category_recommend`.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendPayload {
    #[serde(default)]
    pub category_id: Option<Vec<i64>>,
}

/// Why a partner API reply carried no usable data.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum UpstreamDataError {
    #[error("partner API answered with status {status} ({error:?}: {message:?})")]
    UnexpectedStatus {
        status: u16,
        error: Option<String>,
        message: Option<String>,
    },
    #[error("partner API body is not JSON")]
    NotJson,
    #[error("partner API reply has no response object ({error:?}: {message:?})")]
    MissingResponse {
        error: Option<String>,
        message: Option<String>,
    },
    #[error("partner API reply is malformed: {0}")]
    Malformed(String),
}

/// Extracts the `response` object of a successful reply.
pub fn decode<T: DeserializeOwned>(response: &TransportResponse) -> Result<T, UpstreamDataError> {
    if response.status != 200 {
        let (error, message) = response
            .body
            .as_ref()
            .map(error_fields)
            .unwrap_or((None, None));
        return Err(UpstreamDataError::UnexpectedStatus {
            status: response.status,
            error,
            message,
        });
    }

    let body = response.body.clone().ok_or(UpstreamDataError::NotJson)?;

    let envelope: Envelope<T> =
        serde_json::from_value(body).map_err(|e| UpstreamDataError::Malformed(e.to_string()))?;

    envelope
        .response
        .ok_or(UpstreamDataError::MissingResponse {
            error: envelope.error,
            message: envelope.message,
        })
}

fn error_fields(body: &serde_json::Value) -> (Option<String>, Option<String>) {
    let field = |name: &str| body.get(name).and_then(|v| v.as_str()).map(str::to_string);
    (field("error"), field("message"))
}
