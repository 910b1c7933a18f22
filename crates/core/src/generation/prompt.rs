/// Instruction asking a text model for exactly `count` cards about `topic`
/// as a bare JSON array.
#[must_use]
pub fn flashcard_prompt(topic: &str, count: usize) -> String {
    format!(
        r#"Generate {count} flashcards about "{topic}".
Your response MUST be a valid JSON array with objects containing "id", "question", and "answer" fields.
DO NOT include any explanatory text before or after the JSON.
ONLY return the raw JSON array.

Example of the expected format:
[
  {{"id": "1", "question": "What is photosynthesis?", "answer": "Photosynthesis is the process by which green plants and some other organisms use sunlight to synthesize foods with the help of chlorophyll."}},
  {{"id": "2", "question": "Another question?", "answer": "Another answer"}}
]"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_count_and_quoted_topic() {
        let prompt = flashcard_prompt("World Capitals", 3);
        assert!(prompt.starts_with("Generate 3 flashcards about \"World Capitals\"."));
        assert!(prompt.contains("ONLY return the raw JSON array."));
    }

    #[test]
    fn example_block_is_valid_json() {
        let prompt = flashcard_prompt("x", 1);
        let start = prompt.find('[').unwrap();
        let end = prompt.rfind(']').unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&prompt[start..=end]).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }
}
