//! Correlation data pushed into Provider dashboards, and generated login users.

use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;
use uuid::Uuid;

use super::defaults;
use crate::domain::{EntityKind, MappingContext};

fn non_slug_chars() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").ok()).as_ref()
}

/// Lowercase the name and collapse every run of non-alphanumerics into one `-`.
pub fn slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let slug = match non_slug_chars() {
        Some(re) => re.replace_all(&lowered, "-").into_owned(),
        None => collapse_non_slug(&lowered),
    };
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "user".to_string()
    } else {
        slug.to_string()
    }
}

fn collapse_non_slug(lowered: &str) -> String {
    lowered
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// `<base>-<unix seconds>-<8 hex>@<domain>`; two calls never collide in practice
/// even within the same second.
pub fn unique_user_email(contact_email: Option<&str>, entity_name: &str) -> String {
    let (base, domain) = match contact_email.and_then(|e| e.trim().split_once('@')) {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            (local.to_string(), domain.to_string())
        }
        _ => (slug(entity_name), defaults::FALLBACK_EMAIL_DOMAIN.to_string()),
    };
    let random = Uuid::new_v4().simple().to_string();
    format!("{base}-{}-{}@{domain}", Utc::now().timestamp(), &random[..8])
}

/// `Org ID` / `Org Name` labels. Without an organization in the context the
/// entity's own organization id is still recorded.
pub fn org_labels(ctx: &MappingContext, organization_id: i64) -> Vec<String> {
    match &ctx.organization {
        Some(org) => vec![format!("Org ID: {}", org.id), format!("Org Name: {}", org.name)],
        None => vec![format!("Org ID: {organization_id}")],
    }
}

/// Internal notes: caller notes first, then `<Kind> ID: <id>[, User ID: <sub>]`.
pub fn internal_notes(
    kind: EntityKind,
    local_id: i64,
    ctx: &MappingContext,
    caller_notes: Option<&str>,
) -> String {
    let label = match kind {
        EntityKind::Advertiser => "Advertiser ID",
        EntityKind::Affiliate => "Affiliate ID",
        EntityKind::Campaign => "Campaign ID",
        EntityKind::TrackingLink => "Tracking Link ID",
    };
    let mut correlation = format!("{label}: {local_id}");
    if let Some(user) = ctx.user_id.as_deref().filter(|u| !u.is_empty()) {
        correlation.push_str(&format!(", User ID: {user}"));
    }
    match caller_notes.map(str::trim).filter(|n| !n.is_empty()) {
        Some(notes) => format!("{notes}\n{correlation}"),
        None => correlation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(slug("Acme & Sons, Ltd."), "acme-sons-ltd");
        assert_eq!(slug("!!!"), "user");
    }

    #[test]
    fn fallback_slugging_matches_the_pattern() {
        assert!(non_slug_chars().is_some());
        for name in ["acme & sons, ltd.", "--café 24/7--", "plain"] {
            let by_pattern = non_slug_chars().unwrap().replace_all(name, "-");
            assert_eq!(collapse_non_slug(name), by_pattern.trim_matches('-'));
        }
    }

    #[test]
    fn email_uses_contact_parts() {
        let email = unique_user_email(Some("ops@acme.io"), "Acme");
        assert!(email.starts_with("ops-"));
        assert!(email.ends_with("@acme.io"));
    }

    #[test]
    fn email_falls_back_to_slugged_name() {
        let email = unique_user_email(None, "Acme Corp");
        assert!(email.starts_with("acme-corp-"));
        assert!(email.ends_with("@everflow-test.com"));
        let suffix = email
            .trim_end_matches("@everflow-test.com")
            .rsplit('-')
            .next()
            .unwrap();
        assert_eq!(suffix.len(), 8);
    }

    #[test]
    fn emails_do_not_repeat() {
        let a = unique_user_email(None, "Acme");
        let b = unique_user_email(None, "Acme");
        assert_ne!(a, b);
    }

    #[test]
    fn notes_append_user_after_caller_text() {
        let ctx = MappingContext::default().with_user("auth0|abc");
        let notes = internal_notes(EntityKind::Advertiser, 42, &ctx, Some("VIP"));
        assert_eq!(notes, "VIP\nAdvertiser ID: 42, User ID: auth0|abc");
    }
}
