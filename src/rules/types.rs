//! Rule DSL: operators, rule types, conditions and rules.
//!
//! The operator names (`equals | contains | gt | lt | regex`) and rule
//! type names (`boost | demote | filter`) are what persisted rule data
//! stores. Names outside those sets parse into the `Unknown` variants
//! rather than failing, so rule data written by a newer schema still
//! loads; the engine then treats those parts as non-matching.

use std::fmt;

/// Comparison applied by a [`Condition`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Operator {
    /// Equality after coercion to the operand's type.
    Equals,
    /// Case-insensitive substring test.
    Contains,
    /// Numeric greater-than.
    Gt,
    /// Numeric less-than.
    Lt,
    /// Pattern match against the field's text.
    Regex,
    /// An operator name this version does not know.
    Unknown(String),
}

impl Operator {
    /// Parses a DSL name. Never fails: unrecognized names become `Unknown`.
    pub fn parse(name: &str) -> Self {
        match name {
            "equals" => Operator::Equals,
            "contains" => Operator::Contains,
            "gt" => Operator::Gt,
            "lt" => Operator::Lt,
            "regex" => Operator::Regex,
            other => Operator::Unknown(other.to_string()),
        }
    }

    /// DSL name of this operator.
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Equals => "equals",
            Operator::Contains => "contains",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Regex => "regex",
            Operator::Unknown(name) => name,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        Operator::parse(&name)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

/// What a matching rule does to an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum RuleType {
    /// Adds the rule's weight to the net score.
    Boost,
    /// Adds the rule's weight (conventionally negative) to the net score.
    Demote,
    /// Excludes the item from the feed. Weight is ignored.
    Filter,
    /// A rule type name this version does not know.
    Unknown(String),
}

impl RuleType {
    /// Parses a DSL name. Never fails: unrecognized names become `Unknown`.
    pub fn parse(name: &str) -> Self {
        match name {
            "boost" => RuleType::Boost,
            "demote" => RuleType::Demote,
            "filter" => RuleType::Filter,
            other => RuleType::Unknown(other.to_string()),
        }
    }

    /// DSL name of this rule type.
    pub fn as_str(&self) -> &str {
        match self {
            RuleType::Boost => "boost",
            RuleType::Demote => "demote",
            RuleType::Filter => "filter",
            RuleType::Unknown(name) => name,
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RuleType {
    fn from(name: String) -> Self {
        RuleType::parse(&name)
    }
}

impl From<RuleType> for String {
    fn from(rt: RuleType) -> Self {
        rt.as_str().to_string()
    }
}

/// Right-hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Operand {
    /// Used by `gt` and `lt`; `equals` compares numerically.
    Number(f64),
    /// Substring, pattern or text to compare against.
    Text(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(n) => write!(f, "{n}"),
            Operand::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(n)
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Number(f64::from(n))
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

/// A single field/operator/value test.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    /// Attribute name looked up on the content item.
    pub field: String,
    /// Comparison to apply.
    pub operator: Operator,
    /// Right-hand side. Its type decides how `equals` coerces the field.
    pub value: Operand,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Operand>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// `field equals value`.
    pub fn equals(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::new(field, Operator::Equals, value)
    }

    /// Case-insensitive `field contains value`.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Operator::Contains, Operand::Text(value.into()))
    }

    /// Numeric `field > value`.
    pub fn gt(field: impl Into<String>, value: f64) -> Self {
        Self::new(field, Operator::Gt, Operand::Number(value))
    }

    /// Numeric `field < value`.
    pub fn lt(field: impl Into<String>, value: f64) -> Self {
        Self::new(field, Operator::Lt, Operand::Number(value))
    }

    /// `field` matches the regular expression `pattern`.
    pub fn regex(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, Operator::Regex, Operand::Text(pattern.into()))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

/// Stable rule identifier. Assigned once at creation, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RuleId(String);

impl RuleId {
    /// Wraps an existing identifier. Does not check uniqueness.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A user-authored boost, demote or filter policy.
///
/// Conditions are AND-combined. An empty condition list matches every
/// item ("apply to everything").
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub rule_type: RuleType,
    /// Score contribution for boost/demote. Ignored for filters.
    pub weight: i32,
    pub conditions: Vec<Condition>,
    pub enabled: bool,
}

impl Rule {
    /// Creates an enabled rule with no conditions and zero weight.
    pub fn new(id: impl Into<RuleId>, name: impl Into<String>, rule_type: RuleType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rule_type,
            weight: 0,
            conditions: Vec::new(),
            enabled: true,
        }
    }

    /// Boost rule with the given weight.
    pub fn boost(id: impl Into<RuleId>, name: impl Into<String>, weight: i32) -> Self {
        Self::new(id, name, RuleType::Boost).with_weight(weight)
    }

    /// Demote rule. Pass a negative weight to lower the score.
    pub fn demote(id: impl Into<RuleId>, name: impl Into<String>, weight: i32) -> Self {
        Self::new(id, name, RuleType::Demote).with_weight(weight)
    }

    /// Filter rule; hides every item its conditions match.
    pub fn filter(id: impl Into<RuleId>, name: impl Into<String>) -> Self {
        Self::new(id, name, RuleType::Filter)
    }

    /// Sets the score contribution.
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    /// Appends a condition to the AND list.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Replaces all conditions.
    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Disabled rules stay in the set but are skipped by scoring.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Applies a partial update. `id` and `rule_type` are never touched.
    pub fn apply(&mut self, patch: RulePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(conditions) = patch.conditions {
            self.conditions = conditions;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
    }
}

/// Partial update for a [`Rule`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulePatch {
    pub name: Option<String>,
    pub weight: Option<i32>,
    pub conditions: Option<Vec<Condition>>,
    pub enabled: Option<bool>,
}

impl RulePatch {
    /// Renames the rule.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the score contribution.
    pub fn weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Replaces the whole condition list.
    pub fn conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Enables or disables the rule.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }
}
