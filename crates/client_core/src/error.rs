use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

/// Shown when the server gave nothing better to display.
pub const GENERIC_FAILURE_MESSAGE: &str = "Une erreur est survenue. Veuillez réessayer.";
const MISSING_TOKEN_MESSAGE: &str = "Authentification requise. Veuillez vous reconnecter.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("authentication required: no token in session")]
    MissingToken,
    #[error("server rejected {method} {path}: {source}")]
    Http {
        method: &'static str,
        path: String,
        #[source]
        source: ApiError,
    },
    #[error("request {method} {path} failed: {source}")]
    Transport {
        method: &'static str,
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected payload from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },
    #[error("precondition failed: {0}")]
    Precondition(String),
    #[error("no parent contract known for this {0}")]
    MissingParent(&'static str),
    #[error("item {0} is not in the list")]
    UnknownItem(String),
}

impl ClientError {
    pub fn is_missing_token(&self) -> bool {
        matches!(self, Self::MissingToken)
            || matches!(self, Self::Http { source, .. } if source.code == ErrorCode::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { source, .. } => Some(source.status),
            Self::Transport { source, .. } => source.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Text for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingToken => MISSING_TOKEN_MESSAGE.to_string(),
            Self::Http { source, .. } => source
                .message
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            Self::Validation { missing } => {
                format!("Champs obligatoires manquants : {}", missing.join(", "))
            }
            Self::Precondition(reason) => reason.clone(),
            Self::MissingParent(_) => {
                "Contrat parent introuvable, impossible d'ouvrir la page du contrat.".to_string()
            }
            Self::Transport { .. }
            | Self::Decode { .. }
            | Self::InvalidBaseUrl(_)
            | Self::UnknownItem(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> ClientError {
        ClientError::Http {
            method: "POST",
            path: "/api/articles".to_string(),
            source: ApiError::from_response(status, body),
        }
    }

    #[test]
    fn server_message_wins_over_fallback() {
        let err = http(400, r#"{"message":"Le titre est trop long"}"#);
        assert_eq!(err.user_message(), "Le titre est trop long");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn falls_back_to_generic_message() {
        assert_eq!(http(500, "").user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn unauthorized_counts_as_missing_token() {
        assert!(ClientError::MissingToken.is_missing_token());
        assert!(http(401, "{}").is_missing_token());
        assert!(!http(403, "{}").is_missing_token());
    }

    #[test]
    fn validation_lists_missing_fields() {
        let err = ClientError::Validation {
            missing: vec!["titre", "description"],
        };
        assert_eq!(err.to_string(), "missing required fields: titre, description");
        assert!(err.user_message().contains("titre, description"));
    }
}
