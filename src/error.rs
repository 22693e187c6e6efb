use thiserror::Error;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "알 수 없는 오류가 발생했습니다.";

/// Error types that can occur while storing credentials or calling Gemini.
///
/// The `Display` text of every variant is the message shown to the user.
#[derive(Debug, Error)]
pub enum HubError {
    /// Missing credential or input text; raised before any network call
    #[error("{0}")]
    Validation(String),
    /// Non-success HTTP status returned by the generation endpoint
    #[error("Gemini API 오류 ({status}): {detail}")]
    RemoteApi { status: u16, detail: String },
    /// Success status but no extractable text
    #[error("응답 텍스트가 비어 있습니다. 입력을 구체화해 다시 시도해 주세요.")]
    EmptyResponse,
    /// Transport level failures
    #[error("{0}")]
    Http(String),
    /// Storage backend I/O failures
    #[error("저장소 오류: {0}")]
    Storage(String),
}

impl HubError {
    pub fn validation(message: impl Into<String>) -> Self {
        HubError::Validation(message.into())
    }

    /// Message to surface to the user, falling back to a generic one when
    /// the underlying error had nothing to say.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for HubError {
    /// The request URL carries the key as a query parameter, so it is
    /// stripped before the error is rendered.
    fn from(err: reqwest::Error) -> Self {
        HubError::Http(err.without_url().to_string())
    }
}

impl From<std::io::Error> for HubError {
    fn from(err: std::io::Error) -> Self {
        HubError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_api_message_carries_status_and_detail() {
        let err = HubError::RemoteApi {
            status: 403,
            detail: "API key invalid".to_string(),
        };
        assert_eq!(err.to_string(), "Gemini API 오류 (403): API key invalid");
    }

    #[tokio::test]
    async fn transport_error_omits_request_url() {
        let err = reqwest::Client::new()
            .post("http://127.0.0.1:1/v1beta/models/m:generateContent")
            .query(&[("key", "AIzaSECRET123456")])
            .send()
            .await
            .unwrap_err();
        let err = HubError::from(err);
        assert!(matches!(err, HubError::Http(_)));
        assert!(!err.to_string().contains("AIzaSECRET123456"));
        assert!(!format!("{err:?}").contains("key="));
    }

    #[test]
    fn blank_message_falls_back_to_generic_text() {
        let err = HubError::Http(String::new());
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }
}
