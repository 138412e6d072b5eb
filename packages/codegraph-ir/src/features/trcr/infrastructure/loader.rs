//! YAML rule document loading: parse → validate each `TaintRuleSpec`.

use crate::features::trcr::domain::{SpecValidationError, TaintRuleSpec};

#[derive(Debug, thiserror::Error)]
pub enum YamlLoadError {
    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("rule validation failed: {0}")]
    Validation(#[from] SpecValidationError),
}

/// A YAML rule document is either a bare list of rules or `{ rules: [...] }`.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum RuleDocument {
    List(Vec<TaintRuleSpec>),
    Wrapped { rules: Vec<TaintRuleSpec> },
}

/// Parses `content` as a rule document and validates every rule spec.
/// A single invalid rule fails the whole load — callers wanting
/// continue-on-error should use `load_atoms_yaml_lenient`.
pub fn load_atoms_yaml(content: &str) -> Result<Vec<TaintRuleSpec>, YamlLoadError> {
    let doc: RuleDocument = serde_yaml::from_str(content)?;
    let specs = match doc {
        RuleDocument::List(specs) => specs,
        RuleDocument::Wrapped { rules } => rules,
    };
    for spec in &specs {
        spec.validate()?;
    }
    Ok(specs)
}

/// Parses and validates leniently: valid specs are returned alongside a
/// `(rule_id, error)` diagnostic per invalid one, rather than failing the
/// whole document.
pub fn load_atoms_yaml_lenient(
    content: &str,
) -> Result<(Vec<TaintRuleSpec>, Vec<(String, SpecValidationError)>), serde_yaml::Error> {
    let doc: RuleDocument = serde_yaml::from_str(content)?;
    let specs = match doc {
        RuleDocument::List(specs) => specs,
        RuleDocument::Wrapped { rules } => rules,
    };

    let mut valid = Vec::new();
    let mut errors = Vec::new();
    for spec in specs {
        match spec.validate() {
            Ok(()) => valid.push(spec),
            Err(e) => errors.push((spec.rule_id.clone(), e)),
        }
    }
    Ok((valid, errors))
}
