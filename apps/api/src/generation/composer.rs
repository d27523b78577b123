//! Prompt Composer: fills the tailoring template from the two documents and
//! the extracted keywords.

use crate::generation::prompts::{BULLETS_MARKER, COVER_LETTER_MARKER, TAILOR_PROMPT_TEMPLATE};
use crate::keywords::KeywordSet;

/// Builds the tailoring prompt. Deterministic; empty inputs leave empty sections.
pub fn compose_prompt(job_desc: &str, resume: &str, keywords: &KeywordSet) -> String {
    let keyword_str = keywords.display();
    fill_template(
        TAILOR_PROMPT_TEMPLATE,
        &[
            ("job_description", job_desc),
            ("resume", resume),
            ("keywords", &keyword_str),
            ("bullets_marker", BULLETS_MARKER),
            ("cover_letter_marker", COVER_LETTER_MARKER),
        ],
    )
}

/// Single-pass `{name}` substitution. Substituted values are never re-scanned,
/// so user text containing `{resume}` and the like comes through literally.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let value_len: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + value_len);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
