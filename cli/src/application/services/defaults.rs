//! Application service: resolves question defaults.

use anyhow::Result;
use rand::Rng as _;
use rand::distributions::Alphanumeric;

use crate::application::ports::SettingsStore;
use crate::application::services::question_flow::DefaultResolver;
use crate::domain::{AnswerRecord, AnswerValue, DefaultValue};

/// Random alphanumeric secret of `len` characters.
#[must_use]
pub fn generate_secret(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Resolves stored-value defaults through the settings store.
pub struct StoredDefaults<'a, S> {
    store: &'a S,
}

impl<'a, S: SettingsStore> StoredDefaults<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S: SettingsStore> DefaultResolver for StoredDefaults<'_, S> {
    async fn resolve(
        &self,
        default: &DefaultValue,
        answers: &AnswerRecord,
    ) -> Result<Option<AnswerValue>> {
        Ok(match default {
            DefaultValue::None => None,
            DefaultValue::Literal(value) => Some(value.clone()),
            DefaultValue::Derived(derive) => derive(answers),
            DefaultValue::Secret(len) => Some(AnswerValue::Text(generate_secret(*len))),
            DefaultValue::Stored(name) => self.store.find_one(name).await?.map(|r| r.value),
        })
    }
}
