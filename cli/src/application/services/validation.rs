//! Application service: adapts external checks to the [`AnswerValidator`]
//! contract.
//!
//! Length rules are decided locally; domain, account and zone rules are
//! delegated to the injected ports.

use anyhow::Result;

use crate::application::ports::{AccountChecker, DomainResolver, ZoneLookup};
use crate::application::services::question_flow::AnswerValidator;
use crate::domain::question::check_local;
use crate::domain::{AnswerRecord, AnswerValue, Rule, Verdict};

pub const INVALID_API_KEY: &str = "The API Key is not valid. Make sure your email is also correct";
pub const INVALID_ZONE: &str = "DNS Zone ID not valid";

/// Rejection for a domain that does not point at `public_ip`.
#[must_use]
pub fn domain_mismatch(public_ip: &str) -> String {
    format!("Make sure your domain points to this server's IP. Your IP: {public_ip}")
}

/// Validator backed by DNS resolution and the DNS provider API.
pub struct RemoteValidator<'a, R, A, Z> {
    resolver: &'a R,
    accounts: &'a A,
    zones: &'a Z,
}

impl<'a, R, A, Z> RemoteValidator<'a, R, A, Z>
where
    R: DomainResolver,
    A: AccountChecker,
    Z: ZoneLookup,
{
    pub fn new(resolver: &'a R, accounts: &'a A, zones: &'a Z) -> Self {
        Self {
            resolver,
            accounts,
            zones,
        }
    }

    async fn check_domain(&self, domain: &str) -> Result<Verdict> {
        let public_ip = self.resolver.current_public_ip().await?;
        match self.resolver.resolve(domain).await {
            Ok(address) if address == public_ip => Ok(Verdict::Accept),
            Ok(address) => {
                tracing::debug!(%domain, %address, %public_ip, "domain points elsewhere");
                Ok(Verdict::Reject(domain_mismatch(&public_ip.to_string())))
            }
            Err(e) => {
                tracing::debug!(%domain, error = %e, "domain did not resolve");
                Ok(Verdict::Reject(domain_mismatch(&public_ip.to_string())))
            }
        }
    }

    async fn check_account(&self, key: &str, answers: &AnswerRecord) -> Result<Verdict> {
        let email = answers.text("cloudflare_email").unwrap_or_default();
        if self.accounts.check_credential(email, key).await? {
            Ok(Verdict::Accept)
        } else {
            Ok(Verdict::reject(INVALID_API_KEY))
        }
    }

    async fn check_zone(&self, zone_id: &str, answers: &AnswerRecord) -> Result<Verdict> {
        let domain = answers.text("domain").unwrap_or_default();
        let email = answers.text("cloudflare_email").unwrap_or_default();
        let key = answers.text("cloudflare_api_key").unwrap_or_default();
        let records = self.zones.list_dns_records(zone_id, domain, email, key).await?;
        if records.iter().any(|r| r.name == domain) {
            Ok(Verdict::Accept)
        } else {
            Ok(Verdict::reject(INVALID_ZONE))
        }
    }
}

impl<R, A, Z> AnswerValidator for RemoteValidator<'_, R, A, Z>
where
    R: DomainResolver,
    A: AccountChecker,
    Z: ZoneLookup,
{
    async fn validate(
        &self,
        rule: Rule,
        value: &AnswerValue,
        answers: &AnswerRecord,
    ) -> Result<Verdict> {
        if let Some(verdict) = check_local(rule, value) {
            return Ok(verdict);
        }
        let text = value.as_text().unwrap_or_default().trim();
        match rule {
            Rule::DomainPointsHere => self.check_domain(text).await,
            Rule::DnsAccount => self.check_account(text, answers).await,
            Rule::DnsZone => self.check_zone(text, answers).await,
            Rule::MinLength(_) | Rule::LengthBetween(..) => Ok(Verdict::Accept),
        }
    }
}
