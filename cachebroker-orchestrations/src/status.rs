//! Mapping from cache cluster status to operation state

use cachebroker_models::OperationState;

/// Every status the backend reports that is not a failure.
///
/// The backend has no explicit failure status, so anything missing here
/// (including an empty status) is treated as failed.
const CACHE_CLUSTER_STATUS_STATES: &[(&str, OperationState)] = &[
    ("available", OperationState::Succeeded),
    ("backing-up", OperationState::InProgress),
    ("creating", OperationState::InProgress),
    ("deleting", OperationState::InProgress),
    ("deleted", OperationState::InProgress),
    ("incompatible-network", OperationState::InProgress),
    ("modifying", OperationState::InProgress),
    ("rebooting cache cluster nodes", OperationState::InProgress),
    ("restore-failed", OperationState::InProgress),
    ("snapshotting", OperationState::InProgress),
];

pub fn classify(status: &str) -> OperationState {
    CACHE_CLUSTER_STATUS_STATES
        .iter()
        .find(|(known, _)| *known == status)
        .map(|(_, state)| *state)
        .unwrap_or(OperationState::Failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_available_succeeds() {
        assert_eq!(classify("available"), OperationState::Succeeded);
    }

    #[test]
    fn test_transitional_statuses_are_in_progress() {
        for status in [
            "backing-up",
            "creating",
            "deleting",
            "deleted",
            "incompatible-network",
            "modifying",
            "rebooting cache cluster nodes",
            "restore-failed",
            "snapshotting",
        ] {
            assert_eq!(classify(status), OperationState::InProgress, "status {}", status);
        }
    }

    #[test]
    fn test_unknown_statuses_fail() {
        assert_eq!(classify(""), OperationState::Failed);
        assert_eq!(classify("Available"), OperationState::Failed);
        assert_eq!(classify("rebooting cache cluster nodes,"), OperationState::Failed);
        assert_eq!(classify("exploded"), OperationState::Failed);
    }

    #[test]
    fn test_table_has_no_duplicate_statuses() {
        let mut statuses: Vec<_> = CACHE_CLUSTER_STATUS_STATES.iter().map(|(s, _)| *s).collect();
        statuses.sort_unstable();
        statuses.dedup();
        assert_eq!(statuses.len(), CACHE_CLUSTER_STATUS_STATES.len());
    }

    proptest! {
        #[test]
        fn prop_unlisted_statuses_fail(status in "[a-z ,-]{0,32}") {
            prop_assume!(CACHE_CLUSTER_STATUS_STATES.iter().all(|(known, _)| *known != status));
            prop_assert_eq!(classify(&status), OperationState::Failed);
        }

        #[test]
        fn prop_classify_is_deterministic(status in ".{0,32}") {
            prop_assert_eq!(classify(&status), classify(&status));
        }
    }
}
