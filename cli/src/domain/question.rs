//! Declarative question nodes.
//!
//! A flow is an ordered `Vec<QuestionNode>`. Preconditions and derived
//! defaults are plain functions over the answers collected so far, so a node
//! can only ever see keys answered before it.

use crate::domain::answers::{AnswerRecord, AnswerValue};

/// Predicate deciding whether a node is shown.
pub type Precondition = fn(&AnswerRecord) -> bool;

/// How the operator answers a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Pick one of a fixed list of options; the answer is the option text.
    SingleChoice(Vec<String>),
    /// Free text.
    FreeText,
    /// Yes / no.
    Confirm,
}

/// Where a node's default comes from.
#[derive(Debug, Clone)]
pub enum DefaultValue {
    None,
    Literal(AnswerValue),
    /// Computed from earlier answers.
    Derived(fn(&AnswerRecord) -> Option<AnswerValue>),
    /// Freshly generated random secret of the given length.
    Secret(usize),
    /// Current value stored under the given settings name.
    Stored(String),
}

/// Validation rule applied to a candidate answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The domain must resolve to this server's public IP.
    DomainPointsHere,
    /// The DNS provider must accept the email (`dns_email`) and this API key.
    DnsAccount,
    /// The zone must contain a record named after the `domain` answer.
    DnsZone,
    /// At least this many characters.
    MinLength(usize),
    /// Between `min` and `max` characters, inclusive.
    LengthBetween(usize, usize),
}

/// Outcome of validating one candidate answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(String),
}

impl Verdict {
    pub fn reject(message: impl Into<String>) -> Self {
        Self::Reject(message.into())
    }

    #[must_use]
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// One prompt definition.
#[derive(Debug, Clone)]
pub struct QuestionNode {
    pub key: String,
    pub kind: QuestionKind,
    pub prompt: String,
    pub default: DefaultValue,
    pub precondition: Option<Precondition>,
    pub validator: Option<Rule>,
}

impl QuestionNode {
    fn new(key: &str, kind: QuestionKind, prompt: &str) -> Self {
        Self {
            key: key.to_string(),
            kind,
            prompt: prompt.to_string(),
            default: DefaultValue::None,
            precondition: None,
            validator: None,
        }
    }

    #[must_use]
    pub fn text(key: &str, prompt: &str) -> Self {
        Self::new(key, QuestionKind::FreeText, prompt)
    }

    #[must_use]
    pub fn confirm(key: &str, prompt: &str) -> Self {
        Self::new(key, QuestionKind::Confirm, prompt)
    }

    #[must_use]
    pub fn choice(key: &str, prompt: &str, options: &[&str]) -> Self {
        let options = options.iter().map(ToString::to_string).collect();
        Self::new(key, QuestionKind::SingleChoice(options), prompt)
    }

    #[must_use]
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    #[must_use]
    pub fn when(mut self, precondition: Precondition) -> Self {
        self.precondition = Some(precondition);
        self
    }

    #[must_use]
    pub fn validate(mut self, rule: Rule) -> Self {
        self.validator = Some(rule);
        self
    }

    /// Whether the node is shown given the answers so far.
    #[must_use]
    pub fn applies(&self, answers: &AnswerRecord) -> bool {
        self.precondition.is_none_or(|p| p(answers))
    }
}

/// Checks a rule that needs no external service.
///
/// Returns `None` for rules that must be delegated to a remote check.
#[must_use]
pub fn check_local(rule: Rule, value: &AnswerValue) -> Option<Verdict> {
    let len = value.as_text().map_or(0, |s| s.chars().count());
    match rule {
        Rule::MinLength(min) if len < min => Some(Verdict::Reject(format!(
            "Password must be at least {min} characters"
        ))),
        Rule::LengthBetween(min, max) if len < min || len > max => Some(Verdict::Reject(
            format!("Value must be between {min} and {max} characters"),
        )),
        Rule::MinLength(_) | Rule::LengthBetween(..) => Some(Verdict::Accept),
        Rule::DomainPointsHere | Rule::DnsAccount | Rule::DnsZone => None,
    }
}
