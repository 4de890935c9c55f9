//! Tests for the question flow engine.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use appdock_cli::application::services::question_flow::{
    AnswerValidator, DefaultResolver, GENERIC_REJECTION, QuestionFlow, SUMMARY_CONFIRMATION,
};
use appdock_cli::application::services::validation::RemoteValidator;
use appdock_cli::domain::setup::{proxy_questions, wizard_questions, wizard_summary};
use appdock_cli::domain::{
    AnswerRecord, AnswerValue, DefaultValue, QuestionNode, Rule, Verdict,
};

use crate::mocks::{
    AcceptAll, FakeDnsApi, FakeResolver, PlainDefaults, RecordingReporter, Reply,
    ScriptedPrompter,
};

/// Fails the first `failures` calls, then accepts.
struct Flaky {
    failures: usize,
    calls: AtomicUsize,
}

impl AnswerValidator for Flaky {
    async fn validate(&self, _: Rule, _: &AnswerValue, _: &AnswerRecord) -> Result<Verdict> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
            anyhow::bail!("timed out");
        }
        Ok(Verdict::Accept)
    }
}

/// Every default lookup fails.
struct BrokenDefaults;

impl DefaultResolver for BrokenDefaults {
    async fn resolve(&self, _: &DefaultValue, _: &AnswerRecord) -> Result<Option<AnswerValue>> {
        anyhow::bail!("settings store offline")
    }
}

#[tokio::test]
async fn test_local_storage_skips_cloud_questions() {
    let prompter = ScriptedPrompter::new([
        Reply::Select(0),
        Reply::Confirm(false),
        Reply::Confirm(true),
    ]);
    let flow = QuestionFlow::new(&prompter, &AcceptAll, &PlainDefaults);

    let answers = flow
        .collect(&wizard_questions(), &AnswerRecord::new())
        .await
        .unwrap();

    assert_eq!(
        answers.keys().collect::<Vec<_>>(),
        vec!["storage", "sso", "dashboard"]
    );
    assert!(!answers.contains("upload_amount"));
    assert!(!answers.contains("domain"));
    assert_eq!(answers.text("storage"), Some("Local"));
    assert!(answers.flag("dashboard"));
}

#[tokio::test]
async fn test_declining_domain_skips_dns_questions() {
    let prompter = ScriptedPrompter::new([
        Reply::Select(1),
        Reply::Confirm(false),
        Reply::Confirm(false),
        Reply::Confirm(true),
        Reply::Confirm(false),
    ]);
    let flow = QuestionFlow::new(&prompter, &AcceptAll, &PlainDefaults);

    let answers = flow
        .collect(&wizard_questions(), &AnswerRecord::new())
        .await
        .unwrap();

    assert_eq!(
        answers.keys().collect::<Vec<_>>(),
        vec!["storage", "upload_amount", "domain_confirm", "sso", "dashboard"]
    );
    assert_eq!(prompter.remaining(), 0);
}

#[tokio::test]
async fn test_padded_domain_is_stored_trimmed_for_later_checks() {
    let prompter = ScriptedPrompter::new([
        Reply::Select(1),
        Reply::Confirm(false),
        Reply::Confirm(true),
        Reply::Text("example.com "),
        Reply::Text("ops@example.com"),
        Reply::Text("global-key"),
        Reply::Text("zone-1"),
        Reply::Confirm(false),
        Reply::Confirm(true),
    ]);
    let resolver = FakeResolver::new("203.0.113.5").with_name("example.com", "203.0.113.5");
    let dns = FakeDnsApi::new("ops@example.com", "global-key", "zone-1", &["example.com"]);
    let validator = RemoteValidator::new(&resolver, &dns, &dns);
    let reporter = RecordingReporter::default();
    let flow = QuestionFlow::new(&prompter, &validator, &PlainDefaults).with_reporter(&reporter);

    let answers = flow
        .collect(&wizard_questions(), &AnswerRecord::new())
        .await
        .unwrap();

    assert_eq!(answers.text("domain"), Some("example.com"));
    assert_eq!(answers.text("cloudflare_zone_id"), Some("zone-1"));
    assert!(prompter.notices().is_empty(), "zone check must see the trimmed domain");
    assert_eq!(prompter.remaining(), 0);
    assert_eq!(
        reporter.events(),
        vec![
            "step:checking domain...",
            "success:domain verified",
            "step:checking cloudflare_api_key...",
            "success:cloudflare_api_key verified",
            "step:checking cloudflare_zone_id...",
            "success:cloudflare_zone_id verified",
        ]
    );
}

#[tokio::test]
async fn test_rejection_reprompts_same_node_and_keeps_earlier_answers() {
    let nodes = vec![
        QuestionNode::text("sso_username", "Please enter a username?"),
        QuestionNode::text("redis_password", "Please enter a new password for redis?")
            .validate(Rule::MinLength(12)),
    ];
    let prompter = ScriptedPrompter::new([
        Reply::Text("admin"),
        Reply::Text("short"),
        Reply::Text("long-enough-secret"),
    ]);
    let resolver = FakeResolver::new("203.0.113.5");
    let dns = FakeDnsApi::new("ops@example.com", "key", "zone", &[]);
    let validator = RemoteValidator::new(&resolver, &dns, &dns);
    let flow = QuestionFlow::new(&prompter, &validator, &PlainDefaults);

    let answers = flow.collect(&nodes, &AnswerRecord::new()).await.unwrap();

    assert_eq!(answers.text("sso_username"), Some("admin"));
    assert_eq!(answers.text("redis_password"), Some("long-enough-secret"));
    assert_eq!(
        prompter.notices(),
        vec!["Password must be at least 12 characters".to_string()]
    );
    let prompts = prompter.prompts();
    assert_eq!(
        prompts.iter().filter(|p| p.contains("username")).count(),
        1,
        "earlier node must not be asked again"
    );
    assert_eq!(prompts.iter().filter(|p| p.contains("redis")).count(), 2);
}

#[tokio::test]
async fn test_validator_error_becomes_generic_rejection() {
    let nodes = vec![
        QuestionNode::text("cloudflare_api_key", "Please enter your CloudFlare Api Key?")
            .validate(Rule::DnsAccount),
    ];
    let prompter = ScriptedPrompter::new([Reply::Text("first"), Reply::Text("second")]);
    let validator = Flaky {
        failures: 1,
        calls: AtomicUsize::new(0),
    };
    let flow = QuestionFlow::new(&prompter, &validator, &PlainDefaults);

    let answers = flow.collect(&nodes, &AnswerRecord::new()).await.unwrap();

    assert_eq!(answers.text("cloudflare_api_key"), Some("second"));
    assert_eq!(prompter.notices(), vec![GENERIC_REJECTION.to_string()]);
}

#[tokio::test]
async fn test_failed_default_lookup_means_no_default() {
    let nodes = vec![
        QuestionNode::text("domain", "Enter new value for: domain")
            .with_default(DefaultValue::Stored("domain".to_string())),
    ];
    let prompter = ScriptedPrompter::new([Reply::Text("example.com")]);
    let flow = QuestionFlow::new(&prompter, &AcceptAll, &BrokenDefaults);

    let answers = flow.collect(&nodes, &AnswerRecord::new()).await.unwrap();

    assert_eq!(answers.text("domain"), Some("example.com"));
    assert_eq!(*prompter.defaults.lock().unwrap(), vec![None]);
}

#[tokio::test]
async fn test_empty_input_accepts_literal_default() {
    let nodes = vec![
        QuestionNode::text("sso_username", "Please enter a username?")
            .with_default(DefaultValue::Literal(AnswerValue::from("admin"))),
    ];
    let prompter = ScriptedPrompter::new([Reply::Text("")]);
    let flow = QuestionFlow::new(&prompter, &AcceptAll, &PlainDefaults);

    let answers = flow.collect(&nodes, &AnswerRecord::new()).await.unwrap();

    assert_eq!(answers.text("sso_username"), Some("admin"));
}

#[tokio::test]
async fn test_seed_answers_drive_preconditions() {
    let prompter = ScriptedPrompter::new([Reply::Text("cf-token")]);
    let flow = QuestionFlow::new(&prompter, &AcceptAll, &PlainDefaults);

    let cloud: AnswerRecord = [("storage".to_string(), AnswerValue::from("Cloud"))]
        .into_iter()
        .collect();
    let answers = flow.collect(&proxy_questions(), &cloud).await.unwrap();
    assert_eq!(answers.text("proxy_token"), Some("cf-token"));
    assert_eq!(answers.text("storage"), Some("Cloud"));

    let local: AnswerRecord = [("storage".to_string(), AnswerValue::from("Local"))]
        .into_iter()
        .collect();
    let answers = flow.collect(&proxy_questions(), &local).await.unwrap();
    assert!(!answers.contains("proxy_token"));
}

#[tokio::test]
async fn test_declined_summary_restarts_from_first_node() {
    let prompter = ScriptedPrompter::new([
        // first pass
        Reply::Select(0),
        Reply::Confirm(true),
        Reply::Confirm(true),
        Reply::Confirm(false),
        // second pass
        Reply::Select(0),
        Reply::Confirm(false),
        Reply::Confirm(false),
        Reply::Confirm(true),
    ]);
    let flow = QuestionFlow::new(&prompter, &AcceptAll, &PlainDefaults);

    let answers = flow.run(&wizard_questions(), wizard_summary).await.unwrap();

    assert!(!answers.flag("sso"));
    assert!(!answers.flag("dashboard"));
    let prompts = prompter.prompts();
    assert_eq!(
        prompts.iter().filter(|p| *p == SUMMARY_CONFIRMATION).count(),
        2
    );
    assert_eq!(
        prompts
            .iter()
            .filter(|p| p.starts_with("How would you like to store"))
            .count(),
        2
    );
    let tables = prompter.tables();
    assert_eq!(tables.len(), 2);
    assert!(tables[0].contains(&("SSO".to_string(), "Enabled".to_string())));
    assert!(tables[1].contains(&("SSO".to_string(), "Disabled".to_string())));
}

#[tokio::test]
async fn test_prompt_failure_propagates() {
    let prompter = ScriptedPrompter::new([]);
    let flow = QuestionFlow::new(&prompter, &AcceptAll, &PlainDefaults);
    let result = flow.collect(&wizard_questions(), &AnswerRecord::new()).await;
    assert!(result.is_err());
}
