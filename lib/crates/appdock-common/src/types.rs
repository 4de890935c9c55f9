use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Catalog setting flag marking apps that need operator input at install time.
pub const USER_PROMPTS_SETTING: &str = "User_Prompts";

// ── Public catalog ──────────────────────────────────────────────────────────

/// One page of the public app catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogPage {
    pub results: Vec<CatalogApp>,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    #[serde(rename = "totalApps")]
    pub total_apps: u32,
}

/// A catalog entry as listed on a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogApp {
    #[serde(rename = "_id", alias = "id", deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// Catalog ids arrive as strings from the public catalog but as numbers from
/// some self-hosted mirrors.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Response of the per-app detail endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppDetails {
    #[serde(default)]
    pub results: Option<AppDetailsBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppDetailsBody {
    #[serde(default)]
    pub settings: Vec<String>,
    #[serde(default, rename = "userPrompts")]
    pub user_prompts: Vec<UserPrompt>,
}

impl AppDetails {
    /// Prompts the app declares, empty unless the app carries the
    /// [`USER_PROMPTS_SETTING`] flag.
    #[must_use]
    pub fn prompts(&self) -> &[UserPrompt] {
        match &self.results {
            Some(body) if body.settings.iter().any(|s| s == USER_PROMPTS_SETTING) => {
                &body.user_prompts
            }
            _ => &[],
        }
    }
}

/// A free-text question an app needs answered before it can be installed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPrompt {
    pub name: String,
    pub question: String,
}

// ── Backend: containers ─────────────────────────────────────────────────────

/// Response of the backend's container listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstalledListing {
    #[serde(default)]
    pub results: Vec<Container>,
}

/// A container as reported by the backend (Docker API casing).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Container {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Names", default)]
    pub names: Vec<String>,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "Status", default)]
    pub status: String,
}

impl Container {
    /// Container name without the leading `/` Docker prepends.
    #[must_use]
    pub fn name(&self) -> &str {
        self.names
            .first()
            .map_or(self.id.as_str(), |n| n.trim_start_matches('/'))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}

/// Lifecycle action applied to a single container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContainerAction {
    Start,
    Stop,
    Restart,
    Kill,
}

impl ContainerAction {
    pub const ALL: [ContainerAction; 4] = [Self::Start, Self::Stop, Self::Restart, Self::Kill];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
            Self::Restart => "Restart",
            Self::Kill => "Kill",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerActionRequest {
    pub id: String,
    pub action: ContainerAction,
}

/// Install request for a catalog app.
///
/// `context` carries the stored answers relevant to installation (domain,
/// credentials, feature toggles); `questions` carries the app's own prompts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstallRequest {
    pub id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub questions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallReply {
    #[serde(default)]
    pub installed: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteReply {
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Backend: initial setup ──────────────────────────────────────────────────

/// Answers the backend needs to compute the initial install plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetupRequest {
    pub domain: Option<String>,
    pub cf_email: Option<String>,
    pub cf_api_key: Option<String>,
    #[serde(rename = "storageType")]
    pub storage_type: String,
    pub sso: bool,
    pub dashboard: bool,
}

/// Apps the backend decided to install for a [`SetupRequest`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupPlan {
    #[serde(default)]
    pub results: Vec<String>,
}

/// Payload for installing one app of the setup plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetupAppRequest {
    pub domain: Option<String>,
    pub cftoken: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub redispassword: Option<String>,
    pub mysqlpassword: Option<String>,
    #[serde(rename = "jwtSecret")]
    pub jwt_secret: Option<String>,
    pub secretsession: Option<String>,
    pub storageencryptionkey: Option<String>,
}

// ── DNS provider API ────────────────────────────────────────────────────────

/// Envelope every DNS provider API response is wrapped in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub result: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}
