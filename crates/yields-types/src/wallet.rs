//! Classification of errors raised by browser-injected wallet providers
//! (EIP-1193), so front ends can show a consistent message.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use utoipa::ToSchema;

/// How long a front end waits on a provider request before giving up.
pub const PROVIDER_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_REJECTED_CODE: i64 = 4001;
const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;
const REQUEST_PENDING_CODE: i64 = -32002;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ToSchema, Eq, PartialEq, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProviderErrorKind {
    UserRejected,
    UnsupportedNetwork,
    RequestPending,
    Timeout,
    Unknown,
}

impl ProviderErrorKind {
    /// Best-effort classification from the provider error code and message.
    pub fn classify(code: Option<i64>, message: &str) -> Self {
        match code {
            Some(USER_REJECTED_CODE) => Self::UserRejected,
            Some(UNRECOGNIZED_CHAIN_CODE) => Self::UnsupportedNetwork,
            Some(REQUEST_PENDING_CODE) => Self::RequestPending,
            _ => {
                let message = message.to_lowercase();
                if message.contains("timeout") || message.contains("timed out") {
                    Self::Timeout
                } else if message.contains("user rejected") || message.contains("user denied") {
                    Self::UserRejected
                } else {
                    Self::Unknown
                }
            }
        }
    }

    pub const fn user_message(self) -> &'static str {
        match self {
            Self::UserRejected => "Connection request was rejected.",
            Self::UnsupportedNetwork => {
                "This network is not available in your wallet. Please add it and try again."
            }
            Self::RequestPending => {
                "A wallet request is already pending. Please open your wallet to continue."
            }
            Self::Timeout => "The wallet did not respond in time. Please try again.",
            Self::Unknown => "Failed to connect wallet. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_codes() {
        assert_eq!(
            ProviderErrorKind::classify(Some(4001), ""),
            ProviderErrorKind::UserRejected
        );
        assert_eq!(
            ProviderErrorKind::classify(Some(4902), "Unrecognized chain ID"),
            ProviderErrorKind::UnsupportedNetwork
        );
        assert_eq!(
            ProviderErrorKind::classify(Some(-32002), "Request already pending"),
            ProviderErrorKind::RequestPending
        );
    }

    #[test]
    fn test_classify_from_message() {
        assert_eq!(
            ProviderErrorKind::classify(None, "Request Timeout after 30s"),
            ProviderErrorKind::Timeout
        );
        assert_eq!(
            ProviderErrorKind::classify(Some(-32603), "User denied account authorization"),
            ProviderErrorKind::UserRejected
        );
        assert_eq!(
            ProviderErrorKind::classify(Some(-32603), "Internal JSON-RPC error"),
            ProviderErrorKind::Unknown
        );
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ProviderErrorKind::RequestPending.as_ref(), "request_pending");
        assert!(!ProviderErrorKind::Unknown.user_message().is_empty());
    }
}
