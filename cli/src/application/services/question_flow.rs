//! Application service: walks a list of question nodes.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Remote checks and default lookups are injected through
//! [`AnswerValidator`] and [`DefaultResolver`].

use anyhow::Result;

use crate::application::ports::{ProgressReporter, Prompter};
use crate::domain::question::check_local;
use crate::domain::{AnswerRecord, AnswerValue, DefaultValue, QuestionKind, QuestionNode, Rule, Verdict};

/// Shown when a validator could not reach its service.
pub const GENERIC_REJECTION: &str =
    "Could not verify this answer right now. Please check it and try again.";

/// Final question after the summary table.
pub const SUMMARY_CONFIRMATION: &str = "Is the information above correct?";

/// Checks one candidate answer against a rule.
///
/// Implementations must be read-only: a node may be validated many times,
/// and a whole flow may be replayed after a declined summary.
#[allow(async_fn_in_trait)]
pub trait AnswerValidator {
    /// # Errors
    ///
    /// Transport failures. The flow turns them into [`GENERIC_REJECTION`].
    async fn validate(
        &self,
        rule: Rule,
        value: &AnswerValue,
        answers: &AnswerRecord,
    ) -> Result<Verdict>;
}

/// Turns a node's [`DefaultValue`] into a concrete value.
#[allow(async_fn_in_trait)]
pub trait DefaultResolver {
    /// # Errors
    ///
    /// Lookup failures. The flow treats them as "no default".
    async fn resolve(
        &self,
        default: &DefaultValue,
        answers: &AnswerRecord,
    ) -> Result<Option<AnswerValue>>;
}

/// Reporter for flows that show no progress output.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn step(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}

/// The question flow engine.
///
/// Remote validation and batch calls are reported through `R`; flows built
/// with [`QuestionFlow::new`] stay silent until [`QuestionFlow::with_reporter`].
pub struct QuestionFlow<'a, P, V, D, R = NoProgress> {
    prompter: &'a P,
    validator: &'a V,
    defaults: &'a D,
    reporter: &'a R,
}

impl<'a, P, V, D> QuestionFlow<'a, P, V, D>
where
    P: Prompter,
    V: AnswerValidator,
    D: DefaultResolver,
{
    pub fn new(prompter: &'a P, validator: &'a V, defaults: &'a D) -> Self {
        Self {
            prompter,
            validator,
            defaults,
            reporter: &NoProgress,
        }
    }

    /// Same flow, with progress shown through `reporter`.
    #[must_use]
    pub fn with_reporter<R: ProgressReporter>(
        self,
        reporter: &'a R,
    ) -> QuestionFlow<'a, P, V, D, R> {
        QuestionFlow {
            prompter: self.prompter,
            validator: self.validator,
            defaults: self.defaults,
            reporter,
        }
    }
}

impl<'a, P, V, D, R> QuestionFlow<'a, P, V, D, R>
where
    P: Prompter,
    V: AnswerValidator,
    D: DefaultResolver,
    R: ProgressReporter,
{
    #[must_use]
    pub fn prompter(&self) -> &'a P {
        self.prompter
    }

    #[must_use]
    pub fn reporter(&self) -> &'a R {
        self.reporter
    }

    /// Ask every applicable node in order and return `seed` extended with the
    /// accepted answers.
    ///
    /// Seed answers are visible to preconditions and validators. A node whose
    /// precondition is false leaves its key absent.
    ///
    /// # Errors
    ///
    /// Only terminal failures (no TTY, closed stdin). Validation and default
    /// lookup failures never abort the flow.
    pub async fn collect(&self, nodes: &[QuestionNode], seed: &AnswerRecord) -> Result<AnswerRecord> {
        let mut answers = seed.clone();
        for node in nodes {
            if !node.applies(&answers) {
                tracing::debug!(key = %node.key, "precondition false, skipping");
                continue;
            }
            let default = self.resolve_default(node, &answers).await;
            loop {
                let value = self.ask(node, default.as_ref())?;
                match self.check(node, &value, &answers).await {
                    Verdict::Accept => {
                        answers.insert(node.key.clone(), value);
                        break;
                    }
                    Verdict::Reject(message) => {
                        tracing::debug!(key = %node.key, %message, "answer rejected");
                        self.prompter.notice(&message);
                    }
                }
            }
        }
        Ok(answers)
    }

    /// Collect answers, show `summary`, and ask for confirmation.
    ///
    /// Declining throws every answer away and starts again from the first
    /// node.
    ///
    /// # Errors
    ///
    /// Only terminal failures.
    pub async fn run(
        &self,
        nodes: &[QuestionNode],
        summary: impl Fn(&AnswerRecord) -> Vec<(String, String)>,
    ) -> Result<AnswerRecord> {
        loop {
            let answers = self.collect(nodes, &AnswerRecord::new()).await?;
            self.prompter.clear();
            self.prompter.table(&summary(&answers));
            if self.prompter.confirm(SUMMARY_CONFIRMATION, true)? {
                return Ok(answers);
            }
            tracing::info!("summary declined, restarting the flow");
        }
    }

    async fn resolve_default(&self, node: &QuestionNode, answers: &AnswerRecord) -> Option<AnswerValue> {
        match self.defaults.resolve(&node.default, answers).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %node.key, error = %e, "default lookup failed");
                None
            }
        }
    }

    fn ask(&self, node: &QuestionNode, default: Option<&AnswerValue>) -> Result<AnswerValue> {
        match &node.kind {
            QuestionKind::SingleChoice(options) => {
                let current = default
                    .and_then(AnswerValue::as_text)
                    .and_then(|d| options.iter().position(|o| o == d))
                    .unwrap_or(0);
                let index = self.prompter.select(&node.prompt, options, current)?;
                let choice = options.get(index).cloned().unwrap_or_default();
                Ok(AnswerValue::Text(choice))
            }
            QuestionKind::FreeText => {
                let default = default.map(ToString::to_string);
                let text = self.prompter.input(&node.prompt, default.as_deref())?;
                // The validated value is the stored value.
                Ok(AnswerValue::Text(text.trim().to_string()))
            }
            QuestionKind::Confirm => {
                let current = default.and_then(AnswerValue::as_flag).unwrap_or(true);
                Ok(AnswerValue::Flag(self.prompter.confirm(&node.prompt, current)?))
            }
        }
    }

    async fn check(&self, node: &QuestionNode, value: &AnswerValue, answers: &AnswerRecord) -> Verdict {
        let Some(rule) = node.validator else {
            return Verdict::Accept;
        };
        let remote = check_local(rule, value).is_none();
        if remote {
            self.reporter.step(&format!("checking {}...", node.key));
        }
        let verdict = match self.validator.validate(rule, value, answers).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!(key = %node.key, error = %e, "validator failed");
                Verdict::reject(GENERIC_REJECTION)
            }
        };
        if remote {
            match &verdict {
                Verdict::Accept => self.reporter.success(&format!("{} verified", node.key)),
                Verdict::Reject(_) => self.reporter.warn(&format!("{} not accepted", node.key)),
            }
        }
        verdict
    }
}
