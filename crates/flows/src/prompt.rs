//! The generic prompt-wrapper contract.
//!
//! A [`PromptFlow`] is a typed input, a fixed natural-language template, and a
//! typed output with a JSON Schema. The [`crate::LlmGateway`] turns any flow
//! into one provider call followed by an explicit extract / deserialize /
//! validate step.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;

/// One schema-validated prompt wrapper.
pub trait PromptFlow {
    /// Flow name used in logs and errors.
    const NAME: &'static str;

    /// Structured input substituted into the template.
    type Input: Send + Sync;

    /// Structured output the model must return.
    type Output: DeserializeOwned + Send;

    /// Substitutes `input` into the flow's template.
    fn render(input: &Self::Input) -> String;

    /// JSON Schema describing [`Self::Output`], shown to the model.
    fn output_schema() -> Value;

    /// Checks that serde cannot express. The default accepts everything.
    fn validate(_output: &Self::Output) -> Result<(), String> {
        Ok(())
    }
}

/// Builds the system instruction that pins the model to `schema`.
pub(crate) fn output_instruction(schema: &Value) -> String {
    let schema = serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
    format!(
        "Respond with exactly one JSON object and nothing else. \
         The object must conform to this JSON Schema:\n\n{schema}"
    )
}

/// Locates the JSON object in a model reply.
///
/// Models wrap JSON in Markdown fences or a sentence of prose often enough that
/// the reply is narrowed to the first complete object it contains. Each `{` is
/// tried in order and the span ends where that one value ends, so braces in
/// trailing prose are never pulled in. Returns `None` when no `{` starts a
/// well-formed object.
pub fn extract_json_object(text: &str) -> Option<&str> {
    text.match_indices('{').find_map(|(start, _)| {
        let mut values =
            serde_json::Deserializer::from_str(&text[start..]).into_iter::<IgnoredAny>();
        match values.next() {
            Some(Ok(_)) => Some(&text[start..start + values.byte_offset()]),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bare_object_is_returned_unchanged() {
        assert_eq!(extract_json_object(r#"{"a":1}"#), Some(r#"{"a":1}"#));
    }

    #[test]
    fn code_fences_and_prose_are_stripped() {
        let reply = "Here you go:\n```json\n{\"summary\": \"short\"}\n```\nAnything else?";
        assert_eq!(extract_json_object(reply), Some("{\"summary\": \"short\"}"));
    }

    #[test]
    fn nested_braces_stay_inside_the_span() {
        let reply = r#"{"pipelineDefinition": "{\"steps\":[{\"a\":1}]}"}"#;
        assert_eq!(extract_json_object(reply), Some(reply));
    }

    #[test]
    fn replies_without_an_object_yield_none() {
        assert_eq!(extract_json_object(""), None);
        assert_eq!(extract_json_object("I cannot help with that."), None);
        assert_eq!(extract_json_object("} backwards {"), None);
        assert_eq!(extract_json_object("{ not json }"), None);
    }

    #[test]
    fn braces_in_trailing_prose_are_left_out() {
        let reply = "```json\n{\"summary\": \"short\"}\n```\nLet me know if you want {more} detail.";
        assert_eq!(extract_json_object(reply), Some("{\"summary\": \"short\"}"));
    }

    #[test]
    fn leading_prose_braces_that_are_not_json_are_skipped() {
        let reply = "Filling in {the template}: {\"errors\": [], \"suggestions\": []}";
        assert_eq!(
            extract_json_object(reply),
            Some("{\"errors\": [], \"suggestions\": []}")
        );
    }

    #[test]
    fn instruction_embeds_the_schema() {
        let schema = serde_json::json!({"type": "object", "required": ["summary"]});
        let text = output_instruction(&schema);
        assert!(text.contains("\"required\""));
        assert!(text.contains("\"summary\""));
    }

    proptest! {
        #[test]
        fn surrounding_prose_never_changes_the_extracted_object(
            before in "[^{}]{0,40}",
            after in "\\PC{0,40}",
        ) {
            let object = r#"{"errors":["x"],"suggestions":[]}"#;
            let reply = format!("{before}{object}{after}");
            prop_assert_eq!(extract_json_object(&reply), Some(object));
        }
    }
}
