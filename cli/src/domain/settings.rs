//! Stored settings: one named value per accepted answer.

use serde::{Deserialize, Serialize};

use crate::domain::answers::{AnswerRecord, AnswerValue};
use crate::domain::question::{DefaultValue, QuestionNode};

/// Answers that only steer the wizard and are never stored.
pub const TRANSIENT_KEYS: &[&str] = &["upload_amount", "domain_confirm"];

/// One persisted setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingRecord {
    pub name: String,
    pub value: AnswerValue,
}

impl SettingRecord {
    pub fn new(name: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Menu label, e.g. `domain ( example.com )`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ( {} )", self.name, self.value)
    }
}

/// The records to write for a confirmed wizard run, in answer order.
#[must_use]
pub fn persistable(answers: &AnswerRecord) -> Vec<SettingRecord> {
    answers
        .without(TRANSIENT_KEYS)
        .iter()
        .map(|(k, v)| SettingRecord::new(k, v.clone()))
        .collect()
}

/// Rebuild an answer record from stored settings.
#[must_use]
pub fn to_answers(settings: &[SettingRecord]) -> AnswerRecord {
    settings
        .iter()
        .map(|s| (s.name.clone(), s.value.clone()))
        .collect()
}

/// One-node flow for editing `setting`; the default is its stored value.
#[must_use]
pub fn edit_question(setting: &SettingRecord) -> QuestionNode {
    let node = match setting.value {
        AnswerValue::Flag(_) => QuestionNode::confirm(
            &setting.name,
            &format!("Would you like to Enable / Disable {}", setting.name),
        ),
        AnswerValue::Text(_) => {
            QuestionNode::text(&setting.name, &format!("Enter new value for: {}", setting.name))
        }
    };
    node.with_default(DefaultValue::Stored(setting.name.clone()))
}
