use crate::domain::model::{Bounty, Evaluation, Verdict};

/// Titles that need physical equipment. Checked before the allowlist.
pub const BLOCKLIST: [&str; 4] = ["hardware", "miner", "fpga", "asic"];

pub const ALLOWLIST: [&str; 6] = ["documentation", "test", "tool", "cli", "api", "script"];

pub fn evaluate(bounty: &Bounty) -> Evaluation {
    evaluate_title(&bounty.title)
}

/// Case-insensitive substring match; the blocklist wins over the allowlist.
pub fn evaluate_title(title: &str) -> Evaluation {
    let title = title.to_lowercase();

    if BLOCKLIST.iter().any(|kw| title.contains(kw)) {
        return Evaluation {
            verdict: Verdict::Unsuitable,
            reason: "requires physical hardware",
        };
    }

    if ALLOWLIST.iter().any(|kw| title.contains(kw)) {
        return Evaluation {
            verdict: Verdict::Suitable,
            reason: "suitable for autonomous handling",
        };
    }

    Evaluation {
        verdict: Verdict::NeedsReview,
        reason: "requires manual evaluation",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocklist_takes_precedence() {
        let eval = evaluate_title("Hardware Test Tool");
        assert_eq!(eval.verdict, Verdict::Unsuitable);
        assert_eq!(eval.reason, "requires physical hardware");
    }

    #[test]
    fn test_blocklist_any_case_and_position() {
        for title in ["FPGA port", "support for ASIC boards", "New MiNeR CLI", "xhardwarex"] {
            assert_eq!(evaluate_title(title).verdict, Verdict::Unsuitable, "{}", title);
        }
    }

    #[test]
    fn test_allowlist_is_suitable() {
        let eval = evaluate_title("Improve CLI documentation");
        assert_eq!(eval.verdict, Verdict::Suitable);
        assert_eq!(eval.reason, "suitable for autonomous handling");

        for title in ["Add API endpoint", "deploy SCRIPT", "Unit tests for wallet", "Tooling"] {
            assert_eq!(evaluate_title(title).verdict, Verdict::Suitable, "{}", title);
        }
    }

    #[test]
    fn test_substring_match_inside_words() {
        // "latest" contains "test", "rapid" contains "api"
        assert_eq!(evaluate_title("Bump latest version").verdict, Verdict::Suitable);
        assert_eq!(evaluate_title("Rapid sync").verdict, Verdict::Suitable);
    }

    #[test]
    fn test_no_keyword_needs_review() {
        let eval = evaluate_title("Refactor consensus module");
        assert_eq!(eval.verdict, Verdict::NeedsReview);
        assert_eq!(eval.reason, "requires manual evaluation");
        assert_eq!(evaluate_title("").verdict, Verdict::NeedsReview);
    }
}
