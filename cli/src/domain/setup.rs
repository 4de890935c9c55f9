//! Question definitions for the initial setup wizard and the payloads
//! derived from its answers.

use appdock_common::{SetupAppRequest, SetupRequest};

use crate::domain::answers::AnswerRecord;
use crate::domain::question::{DefaultValue, QuestionNode, Rule};

pub const STORAGE_LOCAL: &str = "Local";
pub const STORAGE_CLOUD: &str = "Cloud";

fn is_cloud(a: &AnswerRecord) -> bool {
    a.text("storage") == Some(STORAGE_CLOUD)
}

fn wants_domain(a: &AnswerRecord) -> bool {
    is_cloud(a) && a.flag("domain_confirm")
}

/// The main wizard: storage, domain and DNS credentials, feature toggles.
#[must_use]
pub fn wizard_questions() -> Vec<QuestionNode> {
    vec![
        QuestionNode::choice(
            "storage",
            "How would you like to store your data?",
            &[STORAGE_LOCAL, STORAGE_CLOUD],
        ),
        QuestionNode::confirm(
            "upload_amount",
            "Will you be uploading more than 750GB of data per day?",
        )
        .when(is_cloud),
        QuestionNode::confirm("domain_confirm", "Would you like to add a domain?").when(is_cloud),
        QuestionNode::text("domain", "What is your domain?")
            .when(wants_domain)
            .validate(Rule::DomainPointsHere),
        QuestionNode::text("cloudflare_email", "Please enter your CloudFlare Email?")
            .when(wants_domain),
        QuestionNode::text("cloudflare_api_key", "Please enter your CloudFlare Api Key?")
            .when(wants_domain)
            .validate(Rule::DnsAccount),
        QuestionNode::text("cloudflare_zone_id", "Please enter your CloudFlare Domain Zone ID?")
            .when(wants_domain)
            .validate(Rule::DnsZone),
        QuestionNode::confirm(
            "sso",
            "Would you like to protect your apps with a single password? ( Authelia )",
        ),
        QuestionNode::confirm("dashboard", "Would you like to enable the Web Dashboard?"),
    ]
}

fn enabled(flag: bool) -> String {
    if flag { "Enabled" } else { "Disabled" }.to_string()
}

/// Rows of the confirmation table shown after the wizard questions.
#[must_use]
pub fn wizard_summary(a: &AnswerRecord) -> Vec<(String, String)> {
    let mut rows = vec![(
        "Storage".to_string(),
        a.text("storage").unwrap_or_default().to_string(),
    )];
    if a.contains("upload_amount") {
        let amount = if a.flag("upload_amount") {
            "750GB+"
        } else {
            "Less than 750GB"
        };
        rows.push(("Upload Amount".to_string(), amount.to_string()));
    }
    for (key, title) in [
        ("domain", "Domain"),
        ("cloudflare_email", "CloudFlare Email"),
        ("cloudflare_api_key", "CloudFlare Global API Key"),
        ("cloudflare_zone_id", "CloudFlare Zone ID"),
    ] {
        if let Some(v) = a.text(key) {
            rows.push((title.to_string(), v.to_string()));
        }
    }
    rows.push(("SSO".to_string(), enabled(a.flag("sso"))));
    rows.push(("Dashboard".to_string(), enabled(a.flag("dashboard"))));
    rows
}

/// Credentials for the single-sign-on stack; every secret gets a generated
/// default.
#[must_use]
pub fn sso_questions() -> Vec<QuestionNode> {
    vec![
        QuestionNode::text("sso_username", "Please enter a username?"),
        QuestionNode::text("sso_password", "Please enter a password?")
            .with_default(DefaultValue::Secret(32)),
        QuestionNode::text("redis_password", "Please enter a new password for redis?")
            .with_default(DefaultValue::Secret(32))
            .validate(Rule::MinLength(12)),
        QuestionNode::text("mysql_password", "Please enter a new password for mysql?")
            .with_default(DefaultValue::Secret(32))
            .validate(Rule::MinLength(12)),
        QuestionNode::text("jwt_secret", "Please enter a new JWT password?")
            .with_default(DefaultValue::Secret(32))
            .validate(Rule::MinLength(12)),
        QuestionNode::text("session_secret", "Please enter a new session password?")
            .with_default(DefaultValue::Secret(64))
            .validate(Rule::MinLength(12)),
        QuestionNode::text(
            "storage_encryption_key",
            "Please enter a new storage encryption password?",
        )
        .with_default(DefaultValue::Secret(64))
        .validate(Rule::LengthBetween(20, 64)),
    ]
}

/// Secrets worth showing the operator once installation finishes.
pub const SSO_SECRET_TITLES: &[(&str, &str)] = &[
    ("sso_password", "SSO Password"),
    ("redis_password", "Redis Password"),
    ("mysql_password", "MySQL Password"),
    ("jwt_secret", "JWT Password"),
    ("session_secret", "Secret Session Password"),
    ("storage_encryption_key", "Storage Encryption Key"),
];

/// Reverse-proxy credentials, only asked for cloud storage.
#[must_use]
pub fn proxy_questions() -> Vec<QuestionNode> {
    vec![QuestionNode::text("proxy_token", "Please enter your CloudFlare Token!").when(is_cloud)]
}

fn owned(a: &AnswerRecord, key: &str) -> Option<String> {
    a.text(key).map(str::to_string)
}

/// Request for the backend's install plan.
#[must_use]
pub fn setup_request(a: &AnswerRecord) -> SetupRequest {
    SetupRequest {
        domain: owned(a, "domain"),
        cf_email: owned(a, "cloudflare_email"),
        cf_api_key: owned(a, "cloudflare_api_key"),
        storage_type: a.text("storage").unwrap_or(STORAGE_LOCAL).to_string(),
        sso: a.flag("sso"),
        dashboard: a.flag("dashboard"),
    }
}

/// Payload for one planned app; `a` holds wizard, SSO and proxy answers.
#[must_use]
pub fn setup_app_request(a: &AnswerRecord) -> SetupAppRequest {
    SetupAppRequest {
        domain: owned(a, "domain"),
        cftoken: owned(a, "proxy_token"),
        email: owned(a, "cloudflare_email"),
        username: owned(a, "sso_username"),
        password: owned(a, "sso_password"),
        redispassword: owned(a, "redis_password"),
        mysqlpassword: owned(a, "mysql_password"),
        jwt_secret: owned(a, "jwt_secret"),
        secretsession: owned(a, "session_secret"),
        storageencryptionkey: owned(a, "storage_encryption_key"),
    }
}

/// Answer keys forwarded with every catalog install.
pub const INSTALL_CONTEXT_KEYS: &[&str] = &[
    "storage",
    "domain",
    "cloudflare_email",
    "cloudflare_api_key",
    "cloudflare_zone_id",
    "sso",
    "dashboard",
];
