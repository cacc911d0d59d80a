//! Field rewriting — one completion per non-blank field, in canonical field
//! order, with emphasis markup stripped from each reply.

use tracing::debug;

use crate::llm_client::{CompletionBackend, LlmError};
use crate::optimizer::fields::{Listing, ListingField, OptimizedListing};
use crate::optimizer::prompts::{optimize_prompt, OPTIMIZE_SYSTEM};

/// Rewrites one field's text in plain language. The reply is returned with
/// emphasis markup stripped and is otherwise verbatim: no trimming, no case
/// changes.
pub async fn optimize_field(
    backend: &dyn CompletionBackend,
    text: &str,
    field: ListingField,
) -> Result<String, LlmError> {
    let prompt = optimize_prompt(field, text);
    let reply = backend.complete(OPTIMIZE_SYSTEM, &prompt).await?;
    Ok(strip_emphasis(&reply))
}

/// Optimizes every non-blank field of a listing.
///
/// Fields that are empty or whitespace-only after trimming are skipped with
/// no provider call and produce no key. Requests are issued one at a time;
/// the first provider failure aborts the batch, so no partial result is ever
/// returned.
pub async fn generate_optimized_listing(
    backend: &dyn CompletionBackend,
    listing: &Listing,
) -> Result<OptimizedListing, LlmError> {
    let mut result = OptimizedListing::default();

    for field in ListingField::ALL {
        let raw = listing.field(field);
        if raw.trim().is_empty() {
            continue;
        }
        let optimized = optimize_field(backend, raw, field).await?;
        debug!("Optimized field '{}'", field.name());
        result.set(field, optimized);
    }

    Ok(result)
}

/// Strips emphasis markup — every run of asterisk/underscore characters —
/// from a model reply. Idempotent; the rest of the text passes through
/// untouched, whitespace included.
pub fn strip_emphasis(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '*' | '_')).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    /// Counts completion requests and replies with a canned rewrite.
    struct MockBackend {
        calls: AtomicUsize,
        reply: String,
    }

    impl MockBackend {
        fn new(reply: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: reply.to_string(),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionBackend for MockBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    /// Counts completion requests and fails every one of them.
    struct FailingBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionBackend for FailingBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(LlmError::Provider {
                status: 500,
                body: "upstream failure".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn all_blank_listing_issues_no_calls() {
        let backend = MockBackend::new("unused");
        let listing = Listing {
            study_title: "   ".to_string(),
            pitch: "\t\n".to_string(),
            ..Default::default()
        };

        let result = generate_optimized_listing(&backend, &listing).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn only_non_blank_fields_are_optimized() {
        let backend = MockBackend::new("Why this matters, in plain words.");
        let listing = Listing {
            study_title: "  ".to_string(),
            purpose: "Why this matters.".to_string(),
            ..Default::default()
        };

        let result = generate_optimized_listing(&backend, &listing).await.unwrap();

        assert_eq!(backend.calls(), 1);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.get(ListingField::Purpose),
            Some("Why this matters, in plain words.")
        );
        assert_eq!(result.get(ListingField::StudyTitle), None);
    }

    #[tokio::test]
    async fn emphasis_markup_is_stripped_from_replies() {
        let backend = MockBackend::new("**Join us today!**");
        let listing = Listing {
            pitch: "Please consider enrollment.".to_string(),
            ..Default::default()
        };

        let result = generate_optimized_listing(&backend, &listing).await.unwrap();

        assert_eq!(result.get(ListingField::Pitch), Some("Join us today!"));
    }

    #[tokio::test]
    async fn first_provider_failure_aborts_the_batch() {
        let backend = FailingBackend {
            calls: AtomicUsize::new(0),
        };
        let listing = Listing {
            purpose: "Why this matters.".to_string(),
            compensation: "You get $50.".to_string(),
            ..Default::default()
        };

        let err = generate_optimized_listing(&backend, &listing)
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Provider { status: 500, .. }));
        // purpose fails first; compensation is never attempted
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn strip_emphasis_removes_markup_runs() {
        assert_eq!(strip_emphasis("**Join us today!**"), "Join us today!");
        assert_eq!(strip_emphasis("_really_ *important*"), "really important");
        assert_eq!(strip_emphasis("***bold italic***"), "bold italic");
        assert_eq!(strip_emphasis("no markup here"), "no markup here");
    }

    #[test]
    fn strip_emphasis_preserves_surrounding_whitespace() {
        assert_eq!(strip_emphasis("  **hi**  "), "  hi  ");
    }

    #[test]
    fn strip_emphasis_is_idempotent() {
        for input in ["**bold** and _italic_", "____", "a*b_c", "plain", "  *  "] {
            let once = strip_emphasis(input);
            let twice = strip_emphasis(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }
}
