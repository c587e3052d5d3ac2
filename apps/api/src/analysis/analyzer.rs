//! Analyzer — substring skill matching and role scoring over free-text resumes.
//!
//! Pure and deterministic: the same (text, role, taxonomy) always yields the same
//! `Summary`. Malformed input never fails; empty text produces a zero-match summary.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::taxonomy::SkillTaxonomy;

/// Result of analyzing one resume against one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Resolved key — the default role's key when the requested one is unknown.
    pub role_key: String,
    pub role_label: String,
    /// The role's skills in configured order.
    pub expected_skills: Vec<String>,
    pub found_for_role: Vec<String>,
    pub missing_for_role: Vec<String>,
    /// Matches across every role, not only the resolved one.
    pub found_hard: Vec<String>,
    pub found_soft: Vec<String>,
    pub missing_soft: Vec<String>,
    pub score: u8, // 0 – 100
}

/// Analyzes `resume_text` against the role named by `role_key`.
///
/// Algorithm:
/// 1. Lowercase the text
/// 2. Resolve the role (unknown keys → default role)
/// 3. A phrase is found iff it occurs as a contiguous substring of the text
/// 4. Partition role skills and soft skills into found/missing, sorted ascending
/// 5. score = round(100 × found / expected), 0 when the role has no skills
pub fn analyze(resume_text: &str, role_key: &str, taxonomy: &SkillTaxonomy) -> Summary {
    let text = resume_text.to_lowercase();
    let role = taxonomy.resolve_role(role_key);

    let (found_for_role, missing_for_role) = partition_matches(&text, &role.skills);
    let (found_soft, missing_soft) = partition_matches(&text, taxonomy.soft_skills());

    // all_hard_skills is already sorted and deduplicated
    let found_hard: Vec<String> = taxonomy
        .all_hard_skills()
        .iter()
        .filter(|skill| contains_skill(&text, skill))
        .cloned()
        .collect();

    let score = compute_score(found_for_role.len(), role.skills.len());

    Summary {
        role_key: role.key.clone(),
        role_label: role.label.clone(),
        expected_skills: role.skills.clone(),
        found_for_role,
        missing_for_role,
        found_hard,
        found_soft,
        missing_soft,
        score,
    }
}

/// Plain substring containment. `text` must already be lowercase.
///
/// No word boundaries: "python" matches inside "pythonic".
pub fn contains_skill(text: &str, skill: &str) -> bool {
    !skill.is_empty() && text.contains(skill)
}

/// Splits `skills` into (found, missing), each deduplicated and sorted ascending.
fn partition_matches(text: &str, skills: &[String]) -> (Vec<String>, Vec<String>) {
    let mut found = BTreeSet::new();
    let mut missing = BTreeSet::new();

    for skill in skills {
        if contains_skill(text, skill) {
            found.insert(skill.clone());
        } else {
            missing.insert(skill.clone());
        }
    }

    (found.into_iter().collect(), missing.into_iter().collect())
}

/// Percentage of expected skills found, rounded half-to-even.
///
/// `expected` counts configured entries, duplicates included.
fn compute_score(found: usize, expected: usize) -> u8 {
    if expected == 0 {
        return 0;
    }
    let pct = (found as f64 / expected as f64 * 100.0).round_ties_even();
    pct.clamp(0.0, 100.0) as u8
}
