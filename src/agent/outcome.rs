//! Parsing of the agent's final free text into a structured outcome.

use crate::task::Outcome;

/// Convert the final assistant message into an [`Outcome`].
///
/// The system prompt instructs the model to end with a single-line JSON
/// summary; everything above it is prose for humans. Parsing is
/// best-effort: malformed output degrades to `no_action` with the raw text
/// preserved for diagnosis, it never fails the run.
pub fn extract_outcome(text: &str) -> Outcome {
    let last_line = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last();

    let Some(last_line) = last_line else {
        return Outcome::no_action("Empty final response from LLM.");
    };

    match serde_json::from_str::<Outcome>(last_line) {
        Ok(outcome) => outcome,
        Err(_) => {
            let mut outcome = Outcome::no_action("Could not parse final JSON summary.");
            outcome.raw_response = Some(text.to_string());
            outcome
        }
    }
}
