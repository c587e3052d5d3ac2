//! Skill Taxonomy — role profiles and soft skills the analyzer matches against.
//!
//! Loaded once at startup from JSON (embedded reference table or `TAXONOMY_PATH`)
//! and shared read-only as `Arc<SkillTaxonomy>`. Never mutated after construction.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reference role table shipped with the binary.
const DEFAULT_TAXONOMY_JSON: &str = include_str!("default_taxonomy.json");

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Taxonomy must declare at least one role")]
    NoRoles,

    #[error("Role key cannot be empty")]
    EmptyRoleKey,

    #[error("Duplicate role key '{0}'")]
    DuplicateRole(String),
}

/// A named job-profile bucket with its expected hard skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfile {
    pub key: String,
    pub label: String,
    /// Lowercase phrases in configured order.
    pub skills: Vec<String>,
}

/// On-disk shape of a taxonomy document.
#[derive(Debug, Deserialize)]
struct TaxonomyDocument {
    roles: Vec<RoleProfile>,
    #[serde(default)]
    soft_skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    /// Declared order is preserved; the first role is the fallback.
    roles: Vec<RoleProfile>,
    soft_skills: Vec<String>,
    /// Deduplicated union of every role's skills, ascending.
    all_hard_skills: Vec<String>,
}

impl SkillTaxonomy {
    /// The reference table compiled into the binary.
    pub fn builtin() -> Result<Self, TaxonomyError> {
        Self::from_json_str(DEFAULT_TAXONOMY_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self, TaxonomyError> {
        let doc: TaxonomyDocument = serde_json::from_str(json)?;
        Self::new(doc.roles, doc.soft_skills)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Validates role keys and normalizes every phrase to trimmed lowercase.
    pub fn new(roles: Vec<RoleProfile>, soft_skills: Vec<String>) -> Result<Self, TaxonomyError> {
        if roles.is_empty() {
            return Err(TaxonomyError::NoRoles);
        }

        let mut seen = HashSet::new();
        let mut normalized_roles = Vec::with_capacity(roles.len());
        for role in roles {
            let key = role.key.trim().to_string();
            if key.is_empty() {
                return Err(TaxonomyError::EmptyRoleKey);
            }
            if !seen.insert(key.clone()) {
                return Err(TaxonomyError::DuplicateRole(key));
            }
            normalized_roles.push(RoleProfile {
                key,
                label: role.label.trim().to_string(),
                skills: normalize_phrases(role.skills),
            });
        }

        let all_hard_skills: BTreeSet<String> = normalized_roles
            .iter()
            .flat_map(|r| r.skills.iter().cloned())
            .collect();

        Ok(Self {
            roles: normalized_roles,
            soft_skills: normalize_phrases(soft_skills),
            all_hard_skills: all_hard_skills.into_iter().collect(),
        })
    }

    /// Looks up `key`, falling back to the default role for unknown keys.
    pub fn resolve_role(&self, key: &str) -> &RoleProfile {
        self.role(key.trim()).unwrap_or_else(|| self.default_role())
    }

    pub fn role(&self, key: &str) -> Option<&RoleProfile> {
        self.roles.iter().find(|r| r.key == key)
    }

    pub fn default_role(&self) -> &RoleProfile {
        // `new` rejects an empty role list.
        &self.roles[0]
    }

    pub fn roles(&self) -> &[RoleProfile] {
        &self.roles
    }

    pub fn soft_skills(&self) -> &[String] {
        &self.soft_skills
    }

    pub fn all_hard_skills(&self) -> &[String] {
        &self.all_hard_skills
    }
}

fn normalize_phrases(phrases: Vec<String>) -> Vec<String> {
    phrases
        .into_iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(key: &str, skills: &[&str]) -> RoleProfile {
        RoleProfile {
            key: key.to_string(),
            label: format!("{key} label"),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_builtin_declares_six_roles_in_order() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let keys: Vec<&str> = taxonomy.roles().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "ai_ds_student",
                "python_developer",
                "data_analyst",
                "ml_engineer",
                "web_developer",
                "cloud_devops"
            ]
        );
        for role in taxonomy.roles() {
            assert!(
                (10..=20).contains(&role.skills.len()),
                "{} has {} skills",
                role.key,
                role.skills.len()
            );
        }
        assert_eq!(taxonomy.soft_skills().len(), 11);
    }

    #[test]
    fn test_default_role_is_first_declared() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        assert_eq!(taxonomy.default_role().key, "ai_ds_student");
        assert_eq!(taxonomy.default_role().label, "AI & DS Student (Placements)");
    }

    #[test]
    fn test_unknown_role_falls_back_to_default() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        assert_eq!(taxonomy.resolve_role("nonexistent_role").key, "ai_ds_student");
        assert_eq!(taxonomy.resolve_role("").key, "ai_ds_student");
        assert_eq!(taxonomy.resolve_role("ml_engineer").key, "ml_engineer");
    }

    #[test]
    fn test_all_hard_skills_is_sorted_union_without_duplicates() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let all = taxonomy.all_hard_skills();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        // "git" is listed by five roles but appears once.
        assert_eq!(all.iter().filter(|s| *s == "git").count(), 1);
        assert!(all.contains(&"terraform".to_string()));
        assert!(all.contains(&"vlookup".to_string()));
    }

    #[test]
    fn test_phrases_are_lowercased_and_trimmed() {
        let taxonomy = SkillTaxonomy::new(
            vec![role("dev", &["  Rust ", "Tokio", ""])],
            vec!["Communication ".to_string()],
        )
        .unwrap();
        assert_eq!(taxonomy.default_role().skills, vec!["rust", "tokio"]);
        assert_eq!(taxonomy.soft_skills(), &["communication".to_string()]);
    }

    #[test]
    fn test_rejects_empty_and_duplicate_roles() {
        assert!(matches!(
            SkillTaxonomy::new(vec![], vec![]),
            Err(TaxonomyError::NoRoles)
        ));
        assert!(matches!(
            SkillTaxonomy::new(vec![role("a", &[]), role("a", &[])], vec![]),
            Err(TaxonomyError::DuplicateRole(k)) if k == "a"
        ));
        assert!(matches!(
            SkillTaxonomy::new(vec![role("  ", &[])], vec![]),
            Err(TaxonomyError::EmptyRoleKey)
        ));
    }

    #[test]
    fn test_duplicate_skills_within_role_are_tolerated() {
        let taxonomy = SkillTaxonomy::new(vec![role("dev", &["sql", "sql"])], vec![]).unwrap();
        assert_eq!(taxonomy.default_role().skills.len(), 2);
        assert_eq!(taxonomy.all_hard_skills(), &["sql".to_string()]);
    }

    #[test]
    fn test_from_json_str_without_soft_skills() {
        let json = r#"{"roles": [{"key": "ops", "label": "Ops", "skills": ["Linux"]}]}"#;
        let taxonomy = SkillTaxonomy::from_json_str(json).unwrap();
        assert!(taxonomy.soft_skills().is_empty());
        assert_eq!(taxonomy.default_role().skills, vec!["linux"]);
    }

    #[test]
    fn test_from_json_str_rejects_malformed_json() {
        assert!(matches!(
            SkillTaxonomy::from_json_str("{ not json"),
            Err(TaxonomyError::Parse(_))
        ));
    }
}
