use crate::llm::{LlmClient, LlmMessage};
use thiserror::Error;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("copy generation failed: {0}")]
    Llm(String),
    #[error("completion has no title/description separator")]
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCopy {
    pub title: String,
    pub description: String,
}

/// Asks the model for combined listing copy for an artwork/variant pair
/// and splits the raw completion into title and description.
pub async fn generate(
    llm: &LlmClient,
    object_title: &str,
    variant_title: &str,
) -> Result<ProductCopy, CopyError> {
    let prompt = format!(
        "Create a short product title and description that combines '{object_title}' \
         with the following product variant: '{variant_title}'."
    );
    let messages = [LlmMessage::system(SYSTEM_PROMPT), LlmMessage::user(prompt)];
    let response = llm
        .chat(&messages)
        .await
        .map_err(|err| CopyError::Llm(err.to_string()))?;
    split_completion(&response.text)
}

/// Everything before the first line break is the title, everything after
/// it the description. The separation is a textual convention the model
/// is expected to follow, not a structured field; a completion with no
/// line break is malformed rather than a listing with an empty
/// description.
pub fn split_completion(text: &str) -> Result<ProductCopy, CopyError> {
    let (title, description) = text.split_once('\n').ok_or(CopyError::Malformed)?;
    Ok(ProductCopy {
        title: title.trim().to_string(),
        description: description.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_title_from_description_on_first_break() {
        let copy =
            split_completion("Wheat Field Poster\n\nA sweeping landscape print.").expect("split");
        assert_eq!(copy.title, "Wheat Field Poster");
        assert_eq!(copy.description, "A sweeping landscape print.");
    }

    #[test]
    fn later_line_breaks_stay_inside_the_description() {
        let copy = split_completion("Title\nFirst paragraph.\n\nSecond paragraph.").expect("split");
        assert_eq!(copy.title, "Title");
        assert_eq!(copy.description, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let copy = split_completion("  Title  \n  Body text.  ").expect("split");
        assert_eq!(copy.title, "Title");
        assert_eq!(copy.description, "Body text.");
    }

    #[test]
    fn single_line_completion_is_malformed() {
        let err = split_completion("Title only, no description").unwrap_err();
        assert!(matches!(err, CopyError::Malformed));
    }
}
