//! The fixed instruction every provider receives ahead of the user's text.

/// Persona and mandated output shape, shared by all providers.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert in logic and rhetoric who breaks arguments down into their parts. \
    Read the argument the user provides and identify its main claim and the premises offered in support of it, \
    in the order they appear. Then rate how strongly the text expresses each of five emotions on an integer scale \
    from 1 (absent) to 5 (very strong). \
    Respond ONLY with a JSON object of exactly this shape and nothing else: \
    {\"claim\": \"<the main claim>\", \"premises\": [\"<premise>\", ...], \
    \"emotions\": {\"Anger\": <1-5>, \"Sadness\": <1-5>, \"Joy\": <1-5>, \"Fear\": <1-5>, \"Surprise\": <1-5>}}";

/// Joins the instruction and the user's text into one prompt string, for
/// providers that take a single prompt instead of a message list.
pub fn single_prompt(text: &str) -> String {
    format!("{SYSTEM_INSTRUCTION}\n\n{text}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::EMOTION_NAMES;

    #[test]
    fn test_instruction_names_every_field() {
        assert!(SYSTEM_INSTRUCTION.contains("\"claim\""));
        assert!(SYSTEM_INSTRUCTION.contains("\"premises\""));
        assert!(SYSTEM_INSTRUCTION.contains("\"emotions\""));
        for name in EMOTION_NAMES {
            assert!(SYSTEM_INSTRUCTION.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_single_prompt_puts_text_last() {
        let prompt = single_prompt("Cats are better than dogs.");
        assert!(prompt.starts_with(SYSTEM_INSTRUCTION));
        assert!(prompt.ends_with("\n\nCats are better than dogs."));
    }
}
