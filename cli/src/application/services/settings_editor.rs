//! Application service: browse and edit stored settings.

use anyhow::{Context, Result};

use crate::application::ports::{ProgressReporter, Prompter, SettingsStore};
use crate::application::services::SessionEnd;
use crate::application::services::question_flow::{AnswerValidator, DefaultResolver, QuestionFlow};
use crate::domain::settings::edit_question;
use crate::domain::{AnswerRecord, SettingRecord};

/// Menu labels: numbered settings, then Back and Exit.
#[must_use]
pub fn menu_labels(settings: &[SettingRecord]) -> Vec<String> {
    let mut labels: Vec<String> = settings
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}.) {}", i + 1, s.label()))
        .collect();
    labels.push("Back".to_string());
    labels.push("Exit".to_string());
    labels
}

/// Loop over the settings menu until Back or Exit.
///
/// # Errors
///
/// Returns an error if the store cannot be listed or a prompt fails.
pub async fn edit_settings<P, V, D, R>(
    flow: &QuestionFlow<'_, P, V, D, R>,
    store: &impl SettingsStore,
) -> Result<SessionEnd>
where
    P: Prompter,
    V: AnswerValidator,
    D: DefaultResolver,
    R: ProgressReporter,
{
    let prompter = flow.prompter();
    loop {
        let settings = store.find_all().await.context("listing settings")?;
        let labels = menu_labels(&settings);

        prompter.clear();
        let index = prompter.select("What would you like to change?", &labels, 0)?;
        let Some(setting) = settings.get(index) else {
            return Ok(if index == settings.len() {
                SessionEnd::Back
            } else {
                SessionEnd::Exit
            });
        };

        let answers = flow
            .collect(&[edit_question(setting)], &AnswerRecord::new())
            .await?;
        let Some(value) = answers.get(&setting.name) else {
            continue;
        };
        let updated = SettingRecord::new(setting.name.clone(), value.clone());
        if let Err(e) = store.upsert(&updated).await {
            tracing::warn!(setting = %updated.name, error = %e, "could not save setting");
            prompter.notice(&format!("Could not save {}: {e}", updated.name));
        }
    }
}
