use crate::backend::BackendError;
use thiserror::Error;

/// Errors returned by the broker's lifecycle operations
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("This service plan requires client support for asynchronous service operations.")]
    AsyncRequired,

    #[error("instance does not exist")]
    InstanceDoesNotExist,

    #[error("instance not updateable")]
    InstanceNotUpdateable,

    #[error("instance not bindable")]
    InstanceNotBindable,

    #[error("Service '{0}' not found")]
    ServiceNotFound(String),

    #[error("Service Plan '{0}' not found")]
    PlanNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] serde_json::Error),

    #[error(transparent)]
    Backend(BackendError),
}

impl BrokerError {
    /// Backend failure on an existing instance: a missing cluster becomes
    /// [`BrokerError::InstanceDoesNotExist`], everything else passes through
    pub(crate) fn for_existing_instance(err: BackendError) -> Self {
        match err {
            BackendError::NotFound => BrokerError::InstanceDoesNotExist,
            other => BrokerError::Backend(other),
        }
    }
}

pub type BrokerResult<T> = Result<T, BrokerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_becomes_instance_does_not_exist() {
        let err = BrokerError::for_existing_instance(BackendError::NotFound);
        assert!(matches!(err, BrokerError::InstanceDoesNotExist));
    }

    #[test]
    fn test_api_errors_pass_through_verbatim() {
        let err = BrokerError::for_existing_instance(BackendError::api("Throttling", "Rate exceeded"));
        assert_eq!(err.to_string(), "Throttling: Rate exceeded");
    }

    #[test]
    fn test_plan_not_found_names_plan() {
        assert_eq!(
            BrokerError::PlanNotFound("p1".to_string()).to_string(),
            "Service Plan 'p1' not found"
        );
    }
}
