//! Output values handed back to the invoking CI system

use crate::error::Result;
use crate::model::ReconciliationState;
use crate::reconcile::ReconcileOutcome;

/// Publishes named output values in a CI system's convention
pub trait OutputEmitter {
    fn emit(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Emit `<prefix>-deployment-id` and `<prefix>-url` for a successful outcome
///
/// Returns `false` without emitting anything unless the outcome succeeded.
/// Missing values are emitted as empty strings so downstream steps always
/// see both names.
pub fn emit_deployment_outputs(
    emitter: &mut dyn OutputEmitter,
    prefix: &str,
    outcome: &ReconcileOutcome,
) -> Result<bool> {
    if outcome.state != ReconciliationState::Succeeded {
        return Ok(false);
    }

    emitter.emit(
        &format!("{}-deployment-id", prefix),
        outcome.deployment_id.as_deref().unwrap_or_default(),
    )?;
    emitter.emit(
        &format!("{}-url", prefix),
        outcome.deployment_url.as_deref().unwrap_or_default(),
    )?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingEmitter {
        values: Vec<(String, String)>,
    }

    impl OutputEmitter for RecordingEmitter {
        fn emit(&mut self, name: &str, value: &str) -> Result<()> {
            self.values.push((name.to_string(), value.to_string()));
            Ok(())
        }
    }

    fn outcome(state: ReconciliationState) -> ReconcileOutcome {
        ReconcileOutcome {
            state,
            attempts: 3,
            deployment_id: Some("abc123".to_string()),
            deployment_url: Some("https://abc123.site.pages.dev".to_string()),
        }
    }

    #[test]
    fn test_emits_both_values_on_success() {
        let mut emitter = RecordingEmitter::default();
        let emitted = emit_deployment_outputs(
            &mut emitter,
            "cloudflare-pages",
            &outcome(ReconciliationState::Succeeded),
        )
        .unwrap();

        assert!(emitted);
        assert_eq!(
            emitter.values,
            vec![
                (
                    "cloudflare-pages-deployment-id".to_string(),
                    "abc123".to_string()
                ),
                (
                    "cloudflare-pages-url".to_string(),
                    "https://abc123.site.pages.dev".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_nothing_emitted_for_failure_or_unknown() {
        for state in [ReconciliationState::Failed, ReconciliationState::Unknown] {
            let mut emitter = RecordingEmitter::default();
            let emitted =
                emit_deployment_outputs(&mut emitter, "cloudflare-pages", &outcome(state)).unwrap();
            assert!(!emitted);
            assert!(emitter.values.is_empty());
        }
    }
}
