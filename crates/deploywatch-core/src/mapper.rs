//! Status mapper
//!
//! Translates a provider's raw stage/status labels into a
//! [`ReconciliationState`]. Labels the vocabulary does not know about are
//! treated as "still going": a missed terminal state degrades to attempt
//! exhaustion, never to an error.

use crate::model::{RawStatusSnapshot, ReconciliationState};

/// Provider-specific labels the mapper compares against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusVocabulary {
    /// Stage that ends the provider pipeline (e.g. "deploy")
    pub terminal_stage: String,

    /// Status that marks a stage as finished successfully
    pub success_label: String,

    /// Statuses the provider uses for a failed stage
    pub failure_labels: Vec<String>,
}

impl StatusVocabulary {
    pub fn new(
        terminal_stage: impl Into<String>,
        success_label: impl Into<String>,
        failure_labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            terminal_stage: terminal_stage.into(),
            success_label: success_label.into(),
            failure_labels: failure_labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_failure(&self, status: &str) -> bool {
        self.failure_labels.iter().any(|label| label == status)
    }
}

/// Classify a snapshot
///
/// A failure status wins over any stage. Only the terminal stage with the
/// success status counts as success; everything else is in progress.
pub fn classify(
    snapshot: &RawStatusSnapshot,
    vocabulary: &StatusVocabulary,
) -> ReconciliationState {
    if vocabulary.is_failure(&snapshot.status) {
        return ReconciliationState::Failed;
    }

    if snapshot.stage == vocabulary.terminal_stage && snapshot.status == vocabulary.success_label {
        return ReconciliationState::Succeeded;
    }

    ReconciliationState::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vocabulary() -> StatusVocabulary {
        StatusVocabulary::new("deploy", "success", ["failure", "failed"])
    }

    #[test]
    fn test_deploy_success_is_succeeded() {
        let snapshot = RawStatusSnapshot::new("deploy", "success");
        assert_eq!(classify(&snapshot, &vocabulary()), ReconciliationState::Succeeded);
    }

    #[test]
    fn test_failure_wins_over_stage() {
        for stage in ["queued", "initialize", "clone_repo", "build", "deploy", ""] {
            for status in ["failure", "failed"] {
                let snapshot = RawStatusSnapshot::new(stage, status);
                assert_eq!(
                    classify(&snapshot, &vocabulary()),
                    ReconciliationState::Failed,
                    "{stage}/{status}"
                );
            }
        }
    }

    #[test]
    fn test_success_of_earlier_stage_is_in_progress() {
        let snapshot = RawStatusSnapshot::new("build", "success");
        assert_eq!(classify(&snapshot, &vocabulary()), ReconciliationState::InProgress);
    }

    #[test]
    fn test_active_deploy_is_in_progress() {
        let snapshot = RawStatusSnapshot::new("deploy", "active");
        assert_eq!(classify(&snapshot, &vocabulary()), ReconciliationState::InProgress);
    }

    #[test]
    fn test_unrecognised_labels_are_in_progress() {
        let snapshot = RawStatusSnapshot::new("publish", "canceled");
        assert_eq!(classify(&snapshot, &vocabulary()), ReconciliationState::InProgress);
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let snapshot = RawStatusSnapshot::new("Deploy", "SUCCESS");
        assert_eq!(classify(&snapshot, &vocabulary()), ReconciliationState::InProgress);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            .. ProptestConfig::default()
        })]

        /// PROPERTY: a failure status classifies as Failed whatever the stage.
        #[test]
        fn property_failure_ignores_stage(stage in ".*", failure in prop::sample::select(vec!["failure", "failed"])) {
            let snapshot = RawStatusSnapshot::new(stage, failure);
            prop_assert_eq!(classify(&snapshot, &vocabulary()), ReconciliationState::Failed);
        }

        /// PROPERTY: changing only the stage away from the terminal stage yields InProgress.
        #[test]
        fn property_non_terminal_stage_success_is_in_progress(stage in "[a-z_]{0,12}") {
            prop_assume!(stage != "deploy");
            let snapshot = RawStatusSnapshot::new(stage, "success");
            prop_assert_eq!(classify(&snapshot, &vocabulary()), ReconciliationState::InProgress);
        }

        /// PROPERTY: changing only the status away from success yields InProgress
        /// unless the new status is a failure label.
        #[test]
        fn property_terminal_stage_other_status(status in "[a-z_ ]{0,12}") {
            prop_assume!(status != "success" && status != "failure" && status != "failed");
            let snapshot = RawStatusSnapshot::new("deploy", status);
            prop_assert_eq!(classify(&snapshot, &vocabulary()), ReconciliationState::InProgress);
        }

        /// PROPERTY: classify is total and deterministic and never yields a state
        /// outside {Succeeded, Failed, InProgress}.
        #[test]
        fn property_classify_is_pure(stage in ".*", status in ".*", id in proptest::option::of("[a-f0-9]{8}")) {
            let mut snapshot = RawStatusSnapshot::new(stage, status);
            snapshot.id = id;
            let first = classify(&snapshot, &vocabulary());
            let second = classify(&snapshot, &vocabulary());
            prop_assert_eq!(first, second);
            prop_assert!(matches!(
                first,
                ReconciliationState::Succeeded | ReconciliationState::Failed | ReconciliationState::InProgress
            ));
        }
    }
}
