//! Rule-based response engine
//!
//! Pure, total mapping from an utterance to a canned reply. Rules are an
//! ordered table evaluated top to bottom; the first rule whose keyword set
//! matches wins, and an utterance that matches nothing gets the fallback.

pub mod templates;

/// A classified reply: the response text plus a rendering hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// True when the reply body is a code sample (monospace rendering).
    pub is_code: bool,
}

/// One classification rule: any keyword hit selects the template.
struct Rule {
    keywords: &'static [&'static str],
    template: &'static str,
}

/// Evaluation order is significant: earlier rules shadow later ones.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["code", "implement", "function"],
        template: templates::CODE_SAMPLE,
    },
    Rule {
        keywords: &["brd", "requirement", "business"],
        template: templates::BRD_GUIDANCE,
    },
    Rule {
        keywords: &["improve", "optimize", "review"],
        template: templates::IMPROVEMENT_CHECKLIST,
    },
];

/// Classify an utterance. Case-insensitive substring matching; every input
/// produces a reply, there is no "no match" error state.
pub fn classify(utterance: &str) -> Reply {
    let lowered = utterance.to_lowercase();
    let template = RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
        .map_or(templates::FALLBACK, |rule| rule.template);

    let is_code = template.contains("```");
    let text = if is_code {
        strip_code_fences(template)
    } else {
        template.to_string()
    };

    Reply { text, is_code }
}

/// Remove fence delimiter lines (` ``` ` with an optional language tag),
/// leaving the code body and surrounding prose intact.
fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}
