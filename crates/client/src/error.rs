use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("invalid client configuration: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("product not found: {0}")]
    NotFound(String),
    #[error("request rejected by catalog: {0}")]
    Rejected(String),
}

impl ClientError {
    /// Message shown to the shopper in place of the failed screen.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::NotFound(_) => "Product not found".to_string(),
            ClientError::Network(_) => {
                "Could not reach the store. Check your connection and try again.".to_string()
            }
            ClientError::Rejected(message) if !message.is_empty() => message.clone(),
            _ => "Something went wrong".to_string(),
        }
    }

    /// Whether repeating the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Api(status, _) => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
