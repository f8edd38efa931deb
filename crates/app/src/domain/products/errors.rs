//! Products validator errors.

use std::time::Duration;

use async_nats::{RequestError, RequestErrorKind};
use orders::products::ProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductsValidatorError {
    #[error("products service did not reply within {0:?}")]
    Timeout(Duration),

    #[error("products service has no responders")]
    NoResponders,

    #[error("products request failed")]
    Transport(#[source] RequestError),

    #[error("validate-products rejected: {message}")]
    Rejected { status: u16, message: String },

    #[error("unknown products: {0:?}")]
    MissingProducts(Vec<ProductId>),

    #[error("failed to encode products request")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode products reply")]
    Decode(#[source] serde_json::Error),
}

impl ProductsValidatorError {
    /// Returns `true` when the product service could not be reached, as
    /// opposed to having answered that the request is invalid.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::NoResponders | Self::Transport(_)
        )
    }
}

impl ProductsValidatorError {
    pub(crate) fn from_request(error: RequestError, timeout: Duration) -> Self {
        match error.kind() {
            RequestErrorKind::TimedOut => Self::Timeout(timeout),
            RequestErrorKind::NoResponders => Self::NoResponders,
            _ => Self::Transport(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_service_is_unavailable() {
        assert!(ProductsValidatorError::Timeout(Duration::from_secs(1)).is_unavailable());
        assert!(ProductsValidatorError::NoResponders.is_unavailable());
    }

    #[test]
    fn rejections_are_not_unavailable() {
        let rejected = ProductsValidatorError::Rejected {
            status: 400,
            message: "Some products were not found".to_string(),
        };

        assert!(!rejected.is_unavailable());
        assert!(!ProductsValidatorError::MissingProducts(vec![3]).is_unavailable());
    }

    #[test]
    fn request_errors_map_by_kind() {
        let timeout = Duration::from_secs(1);

        let timed_out =
            ProductsValidatorError::from_request(RequestErrorKind::TimedOut.into(), timeout);
        let no_responders =
            ProductsValidatorError::from_request(RequestErrorKind::NoResponders.into(), timeout);
        let other = ProductsValidatorError::from_request(RequestErrorKind::Other.into(), timeout);

        assert!(matches!(
            timed_out,
            ProductsValidatorError::Timeout(elapsed) if elapsed == timeout
        ));
        assert!(matches!(no_responders, ProductsValidatorError::NoResponders));
        assert!(matches!(other, ProductsValidatorError::Transport(_)));
        assert!(other.is_unavailable());
    }

    #[test]
    fn rejection_names_the_operation() {
        let rejected = ProductsValidatorError::Rejected {
            status: 400,
            message: "Some products were not found".to_string(),
        };

        assert_eq!(
            rejected.to_string(),
            "validate-products rejected: Some products were not found"
        );
    }
}
