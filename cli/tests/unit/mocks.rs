//! Shared mock infrastructure for unit tests.
//!
//! Hand-written port implementations: a scripted terminal, a recording
//! backend, an in-memory catalog and settings store, and fixed DNS answers.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::net::IpAddr;
use std::sync::Mutex;

use anyhow::Result;
use appdock_cli::application::ports::{
    AccountChecker, AppBackend, CatalogSource, DomainResolver, ProgressReporter, Prompter,
    SettingsStore, ZoneLookup,
};
use appdock_cli::application::services::question_flow::{AnswerValidator, DefaultResolver};
use appdock_cli::domain::{AnswerRecord, AnswerValue, DefaultValue, Rule, SettingRecord, Verdict};
use appdock_common::{
    AppDetails, AppDetailsBody, CatalogApp, CatalogPage, Container, ContainerAction, DeleteReply,
    DnsRecord, InstallReply, InstallRequest, InstalledListing, SetupAppRequest, SetupPlan,
    SetupRequest, USER_PROMPTS_SETTING, UserPrompt,
};

// ── Prompter ──────────────────────────────────────────────────────────────────

/// One scripted operator reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Select(usize),
    /// Empty text accepts the offered default, like the real terminal.
    Text(&'static str),
    Confirm(bool),
}

/// Replays a fixed script and records everything shown.
#[derive(Default)]
pub struct ScriptedPrompter {
    script: Mutex<VecDeque<Reply>>,
    pub prompts: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<String>>,
    pub tables: Mutex<Vec<Vec<(String, String)>>>,
    pub menus: Mutex<Vec<Vec<String>>>,
    pub defaults: Mutex<Vec<Option<String>>>,
}

impl ScriptedPrompter {
    pub fn new(script: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Self::default()
        }
    }

    fn next(&self, prompt: &str) -> Result<Reply> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted at prompt: {prompt}"))
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn menus(&self) -> Vec<Vec<String>> {
        self.menus.lock().unwrap().clone()
    }

    pub fn tables(&self) -> Vec<Vec<(String, String)>> {
        self.tables.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, prompt: &str, items: &[String], _default: usize) -> Result<usize> {
        self.menus.lock().unwrap().push(items.to_vec());
        match self.next(prompt)? {
            Reply::Select(i) if i < items.len() => Ok(i),
            other => anyhow::bail!("unexpected reply {other:?} for select '{prompt}' {items:?}"),
        }
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        self.defaults
            .lock()
            .unwrap()
            .push(default.map(str::to_string));
        match self.next(prompt)? {
            Reply::Text("") => Ok(default.unwrap_or_default().to_string()),
            Reply::Text(text) => Ok(text.to_string()),
            other => anyhow::bail!("unexpected reply {other:?} for input '{prompt}'"),
        }
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Reply::Confirm(yes) => Ok(yes),
            other => anyhow::bail!("unexpected reply {other:?} for confirm '{prompt}'"),
        }
    }

    fn notice(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn table(&self, rows: &[(String, String)]) {
        self.tables.lock().unwrap().push(rows.to_vec());
    }

    fn clear(&self) {}
}

// ── Reporter ──────────────────────────────────────────────────────────────────

/// Records `kind:message` for every progress event.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events.lock().unwrap().push(format!("step:{message}"));
    }
    fn success(&self, message: &str) {
        self.events.lock().unwrap().push(format!("success:{message}"));
    }
    fn warn(&self, message: &str) {
        self.events.lock().unwrap().push(format!("warn:{message}"));
    }
}

// ── Validators and defaults ───────────────────────────────────────────────────

/// Accepts everything.
pub struct AcceptAll;

impl AnswerValidator for AcceptAll {
    async fn validate(&self, _: Rule, _: &AnswerValue, _: &AnswerRecord) -> Result<Verdict> {
        Ok(Verdict::Accept)
    }
}

/// Literal and derived defaults only; stored and secret defaults resolve to
/// nothing.
pub struct PlainDefaults;

impl DefaultResolver for PlainDefaults {
    async fn resolve(
        &self,
        default: &DefaultValue,
        answers: &AnswerRecord,
    ) -> Result<Option<AnswerValue>> {
        Ok(match default {
            DefaultValue::Literal(v) => Some(v.clone()),
            DefaultValue::Derived(f) => f(answers),
            _ => None,
        })
    }
}

// ── DNS ───────────────────────────────────────────────────────────────────────

/// Fixed public IP and name table.
pub struct FakeResolver {
    pub public_ip: Option<IpAddr>,
    pub names: HashMap<String, IpAddr>,
    pub lookups: Mutex<Vec<String>>,
}

impl FakeResolver {
    pub fn new(public_ip: &str) -> Self {
        Self {
            public_ip: Some(public_ip.parse().unwrap()),
            names: HashMap::new(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn with_name(mut self, name: &str, ip: &str) -> Self {
        self.names.insert(name.to_string(), ip.parse().unwrap());
        self
    }
}

impl DomainResolver for FakeResolver {
    async fn resolve(&self, domain: &str) -> Result<IpAddr> {
        self.lookups.lock().unwrap().push(domain.to_string());
        self.names
            .get(domain)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("NXDOMAIN {domain}"))
    }

    async fn current_public_ip(&self) -> Result<IpAddr> {
        self.public_ip
            .ok_or_else(|| anyhow::anyhow!("public IP service unreachable"))
    }
}

/// DNS provider with one valid credential and one zone.
pub struct FakeDnsApi {
    pub email: String,
    pub key: String,
    pub zone_id: String,
    pub records: Vec<String>,
    pub down: bool,
}

impl FakeDnsApi {
    pub fn new(email: &str, key: &str, zone_id: &str, records: &[&str]) -> Self {
        Self {
            email: email.to_string(),
            key: key.to_string(),
            zone_id: zone_id.to_string(),
            records: records.iter().map(ToString::to_string).collect(),
            down: false,
        }
    }
}

impl AccountChecker for FakeDnsApi {
    async fn check_credential(&self, email: &str, key: &str) -> Result<bool> {
        if self.down {
            anyhow::bail!("dns provider timed out");
        }
        Ok(email == self.email && key == self.key)
    }
}

impl ZoneLookup for FakeDnsApi {
    async fn list_dns_records(
        &self,
        zone_id: &str,
        domain: &str,
        email: &str,
        key: &str,
    ) -> Result<Vec<DnsRecord>> {
        if self.down {
            anyhow::bail!("dns provider timed out");
        }
        if zone_id != self.zone_id || email != self.email || key != self.key {
            return Ok(Vec::new());
        }
        Ok(self
            .records
            .iter()
            .filter(|name| name.as_str() == domain)
            .map(|name| DnsRecord {
                name: name.clone(),
                kind: Some("A".to_string()),
                content: None,
            })
            .collect())
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

pub fn app(id: &str, name: &str) -> CatalogApp {
    CatalogApp {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Catalog split into fixed pages.
#[derive(Default)]
pub struct FakeCatalog {
    pub pages: Vec<Vec<CatalogApp>>,
    pub prompts: HashMap<String, Vec<UserPrompt>>,
    pub broken_details: HashSet<String>,
    pub page_requests: Mutex<Vec<u32>>,
    /// Every listing request fails.
    pub down: bool,
}

impl FakeCatalog {
    pub fn new(pages: Vec<Vec<CatalogApp>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    pub fn with_prompt(mut self, id: &str, name: &str, question: &str) -> Self {
        self.prompts
            .entry(id.to_string())
            .or_default()
            .push(UserPrompt {
                name: name.to_string(),
                question: question.to_string(),
            });
        self
    }
}

impl CatalogSource for FakeCatalog {
    async fn list_catalog(&self, page: u32) -> Result<CatalogPage> {
        self.page_requests.lock().unwrap().push(page);
        if self.down {
            anyhow::bail!("catalog returned HTTP 503");
        }
        let index = page.max(1) as usize - 1;
        let results = self.pages.get(index).cloned().unwrap_or_default();
        Ok(CatalogPage {
            results,
            total_pages: u32::try_from(self.pages.len()).unwrap(),
            total_apps: u32::try_from(self.pages.iter().map(Vec::len).sum::<usize>()).unwrap(),
        })
    }

    async fn app_details(&self, id: &str) -> Result<AppDetails> {
        if self.broken_details.contains(id) {
            anyhow::bail!("catalog returned HTTP 500");
        }
        let prompts = self.prompts.get(id).cloned().unwrap_or_default();
        let settings = if prompts.is_empty() {
            Vec::new()
        } else {
            vec![USER_PROMPTS_SETTING.to_string()]
        };
        Ok(AppDetails {
            results: Some(AppDetailsBody {
                settings,
                user_prompts: prompts,
            }),
        })
    }
}

// ── Backend ───────────────────────────────────────────────────────────────────

pub fn container(id: &str, name: &str, state: &str) -> Container {
    Container {
        id: id.to_string(),
        names: vec![format!("/{name}")],
        state: state.to_string(),
        status: if state == "running" {
            "Up 2 hours".to_string()
        } else {
            "Exited (0) 1 hour ago".to_string()
        },
    }
}

/// Backend that records every call in order.
#[derive(Default)]
pub struct RecordingBackend {
    pub installed: Mutex<Vec<Container>>,
    /// Ids the backend answers `installed: false` / `deleted: false` for.
    pub refuse: HashSet<String>,
    /// Ids whose call fails at the transport level.
    pub unreachable: HashSet<String>,
    pub plan: Vec<String>,
    /// `list_installed` fails.
    pub listing_down: bool,
    /// `setup_plan` fails.
    pub plan_down: bool,
    pub calls: Mutex<Vec<String>>,
    pub install_requests: Mutex<Vec<InstallRequest>>,
    pub setup_requests: Mutex<Vec<SetupRequest>>,
    pub setup_app_requests: Mutex<Vec<(String, SetupAppRequest)>>,
}

impl RecordingBackend {
    pub fn with_installed(containers: Vec<Container>) -> Self {
        Self {
            installed: Mutex::new(containers),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AppBackend for RecordingBackend {
    async fn list_installed(&self) -> Result<InstalledListing> {
        if self.listing_down {
            anyhow::bail!("backend unreachable");
        }
        Ok(InstalledListing {
            results: self.installed.lock().unwrap().clone(),
        })
    }

    async fn install(&self, request: &InstallRequest) -> Result<InstallReply> {
        self.record(format!("install:{}", request.id));
        self.install_requests.lock().unwrap().push(request.clone());
        if self.unreachable.contains(&request.id) {
            anyhow::bail!("connection reset");
        }
        Ok(InstallReply {
            installed: !self.refuse.contains(&request.id),
            message: None,
        })
    }

    async fn delete(&self, id: &str) -> Result<DeleteReply> {
        self.record(format!("delete:{id}"));
        if self.unreachable.contains(id) {
            anyhow::bail!("connection reset");
        }
        let deleted = !self.refuse.contains(id);
        if deleted {
            self.installed.lock().unwrap().retain(|c| c.id != id);
        }
        Ok(DeleteReply {
            deleted,
            message: (!deleted).then(|| "container is locked".to_string()),
        })
    }

    async fn container_action(&self, id: &str, action: ContainerAction) -> Result<()> {
        self.record(format!("{}:{id}", action.label().to_lowercase()));
        if self.unreachable.contains(id) {
            anyhow::bail!("connection reset");
        }
        Ok(())
    }

    async fn setup_plan(&self, request: &SetupRequest) -> Result<SetupPlan> {
        self.record("setup".to_string());
        self.setup_requests.lock().unwrap().push(request.clone());
        if self.plan_down {
            anyhow::bail!("backend unreachable");
        }
        Ok(SetupPlan {
            results: self.plan.clone(),
        })
    }

    async fn setup_app(&self, app: &str, request: &SetupAppRequest) -> Result<InstallReply> {
        self.record(format!("setup:{app}"));
        self.setup_app_requests
            .lock()
            .unwrap()
            .push((app.to_string(), request.clone()));
        Ok(InstallReply {
            installed: !self.refuse.contains(app),
            message: None,
        })
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// In-memory settings; writes for `failing` names are refused.
#[derive(Default)]
pub struct MemorySettings {
    pub records: Mutex<Vec<SettingRecord>>,
    pub failing: HashSet<String>,
}

impl MemorySettings {
    pub fn with(records: Vec<SettingRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            failing: HashSet::new(),
        }
    }

    pub fn snapshot(&self) -> Vec<SettingRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn value(&self, name: &str) -> Option<AnswerValue> {
        self.snapshot()
            .into_iter()
            .find(|r| r.name == name)
            .map(|r| r.value)
    }
}

impl SettingsStore for MemorySettings {
    async fn find_all(&self) -> Result<Vec<SettingRecord>> {
        Ok(self.snapshot())
    }

    async fn find_one(&self, name: &str) -> Result<Option<SettingRecord>> {
        Ok(self.snapshot().into_iter().find(|r| r.name == name))
    }

    async fn upsert(&self, record: &SettingRecord) -> Result<()> {
        if self.failing.contains(&record.name) {
            anyhow::bail!("write refused for {}", record.name);
        }
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.name == record.name) {
            Some(existing) => existing.value = record.value.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }
}
