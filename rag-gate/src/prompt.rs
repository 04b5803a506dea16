//! Prompt builders for the scoring and composing calls.

use crate::cfg::DocumentProfile;

/// System instruction for the relevance scorer, with one worked example.
///
/// # Example
/// ```
/// use rag_gate::{DocumentProfile, prompt::scoring_instruction};
/// let p = scoring_instruction(&DocumentProfile::default());
/// assert!(p.contains("\"Oxford Guide-2022.pdf\""));
/// ```
pub fn scoring_instruction(profile: &DocumentProfile) -> String {
    let DocumentProfile { domain, title, .. } = profile;
    format!(
        r#"You are a query relevance checker for a question-answering app.
The app answers questions using only the document "{title}".

For the user query you receive:
1. Decide whether it is about {domain} or the content of "{title}".
2. Reply with a confidence score between 0 and 1:
   - 0 = completely unrelated to {domain}.
   - 1 = fully about {domain}.

Output ONLY the decimal number. No words, no explanation, no formatting.

Example:
Input: "what is {domain} famous for?"
Output: 0.95"#
    )
}

/// Single user message for the composer: context first, then the query, then rules.
///
/// Chunks are inserted verbatim in rank order, separated by blank lines.
pub fn grounding_prompt(query: &str, chunks: &[String]) -> String {
    let mut out = String::new();
    out.push_str("You are an assistant that answers questions using the provided context.\n\n");
    out.push_str("CONTEXT:\n");
    out.push_str(&chunks.join("\n\n"));
    out.push_str("\n\nUSER QUERY:\n");
    out.push_str(query);
    out.push_str(
        "\n\nInstructions:\n\
         - Answer the query using ONLY the information in the CONTEXT.\n\
         - Keep the answer clear and relevant.\n\
         - Do not speculate beyond the CONTEXT.\n\n\
         Answer:\n",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_instruction_is_parameterized() {
        let p = scoring_instruction(&DocumentProfile {
            domain: "Rust".into(),
            title: "The Book.pdf".into(),
            collection: "book".into(),
        });
        assert!(p.contains("\"The Book.pdf\""));
        assert!(p.contains("unrelated to Rust"));
        assert!(p.contains("Output: 0.95"));
        assert!(!p.contains("Oxford"));
    }

    #[test]
    fn grounding_prompt_keeps_rank_order_then_query() {
        let chunks = vec!["first chunk".to_string(), "second chunk".to_string()];
        let p = grounding_prompt("What is Oxford famous for?", &chunks);

        let ctx = p.find("CONTEXT:").unwrap();
        let c1 = p.find("first chunk").unwrap();
        let c2 = p.find("second chunk").unwrap();
        let q = p.find("USER QUERY:\nWhat is Oxford famous for?").unwrap();
        let rules = p.find("ONLY the information in the CONTEXT").unwrap();
        assert!(ctx < c1 && c1 < c2 && c2 < q && q < rules);
    }

    #[test]
    fn empty_context_still_builds_a_prompt() {
        let p = grounding_prompt("q", &[]);
        assert!(p.contains("CONTEXT:\n\n\nUSER QUERY:\nq"));
    }
}
