//! Crate error type.
//!
//! Errors only arise at the boundary: rule-set mutation, recipe
//! application and configuration. Evaluation itself never fails.

use thiserror::Error;

use crate::rules::RuleId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("rule id `{0}` already exists in the rule set")]
    DuplicateRuleId(RuleId),

    #[error("no rule with id `{0}`")]
    UnknownRule(RuleId),

    #[error("rule index {index} out of range for rule set of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("id generator produced {attempts} colliding ids in a row")]
    IdExhausted { attempts: usize },

    #[error("id generator has no fresh ids left")]
    IdsDepleted,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
