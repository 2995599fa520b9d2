//! Campaigns travel as Provider offers.

use super::{defaults, identity, merge_field, merge_text, status, EntityMapper, MergeOrigin};
use crate::domain::{Campaign, EntityKind, LocalEntity, MappingContext};
use crate::error::IntegrationError;
use crate::wire::offer::{OfferRequest, OfferResponse, PayoutRevenue};
use crate::wire::Nullable;

#[derive(Debug, Clone, Copy, Default)]
pub struct CampaignMapper;

impl CampaignMapper {
    fn request(&self, local: &Campaign, ctx: &MappingContext) -> Result<OfferRequest, IntegrationError> {
        let destination_url = local
            .destination_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                IntegrationError::InvalidEntity(format!(
                    "campaign {} has no destination_url",
                    local.id
                ))
            })?;
        let network_advertiser_id = ctx.network_advertiser_id.ok_or_else(|| {
            IntegrationError::InvalidEntity(format!(
                "campaign {} has no provider advertiser id in its mapping context",
                local.id
            ))
        })?;

        let mut req = OfferRequest::new(
            network_advertiser_id,
            local.name.clone(),
            destination_url,
            status::to_offer_status(local.status),
            vec![payout_revenue(local)],
        );
        req.network_tracking_domain_id = local.network_tracking_domain_id;
        req.network_category_id = local.network_category_id;
        req.thumbnail_url = local.thumbnail_url.clone();
        req.preview_url = local.preview_url.clone();
        req.server_side_url = local.server_side_url.clone();
        req.is_view_through_enabled = local.is_view_through_enabled;
        req.view_through_destination_url = local.view_through_destination_url.clone();
        req.html_description = local.description.clone();
        req.internal_notes = Some(identity::internal_notes(
            EntityKind::Campaign,
            local.id,
            ctx,
            local.internal_notes.as_deref(),
        ));
        req.labels = Some(identity::org_labels(ctx, local.organization_id));
        req.currency_id = Some(or_default(&local.currency_id, defaults::CURRENCY_ID));
        req.conversion_method = Some(or_default(&local.conversion_method, defaults::CONVERSION_METHOD));
        req.session_definition = Some(or_default(&local.session_definition, defaults::SESSION_DEFINITION));
        req.session_duration = Some(local.session_duration.unwrap_or(defaults::SESSION_DURATION));
        req.attribution_method = Some(or_default(&local.attribution_method, defaults::ATTRIBUTION_METHOD));
        req.email_attribution_method = Some(or_default(
            &local.email_attribution_method,
            defaults::EMAIL_ATTRIBUTION_METHOD,
        ));
        req.redirect_mode = Some(or_default(&local.redirect_mode, defaults::REDIRECT_MODE));
        req.visibility = Some(or_default(&local.visibility, defaults::VISIBILITY));

        if let Some(terms) = local.terms_and_conditions.as_deref().filter(|t| !t.is_empty()) {
            req.terms_and_conditions = Some(terms.to_string());
            req.is_using_explicit_terms_and_conditions = Some(true);
        }
        req.date_live_until = match local.end_date {
            Some(date) => Nullable::Value(date.format("%Y-%m-%d").to_string()),
            None => Nullable::Absent,
        };

        if let Some(caps) = &local.caps {
            let any_cap = [
                caps.daily_conversion_cap,
                caps.weekly_conversion_cap,
                caps.monthly_conversion_cap,
                caps.global_conversion_cap,
                caps.daily_click_cap,
                caps.weekly_click_cap,
                caps.monthly_click_cap,
                caps.global_click_cap,
            ]
            .iter()
            .any(Option::is_some);
            req.is_caps_enabled = Some(any_cap);
            req.caps_timezone_id = caps.caps_timezone_id;
            req.daily_conversion_cap = caps.daily_conversion_cap;
            req.weekly_conversion_cap = caps.weekly_conversion_cap;
            req.monthly_conversion_cap = caps.monthly_conversion_cap;
            req.global_conversion_cap = caps.global_conversion_cap;
            req.daily_click_cap = caps.daily_click_cap;
            req.weekly_click_cap = caps.weekly_click_cap;
            req.monthly_click_cap = caps.monthly_click_cap;
            req.global_click_cap = caps.global_click_cap;
        }
        Ok(req)
    }
}

impl EntityMapper for CampaignMapper {
    type Local = Campaign;
    type Request = OfferRequest;
    type Response = OfferResponse;

    const KIND: EntityKind = EntityKind::Campaign;
    const COLLECTION_PATH: &'static str = "/networks/offers";
    const ID_KEY: &'static str = "network_offer_id";

    fn local_id(local: &Campaign) -> i64 {
        local.id
    }

    fn provider_id(response: &OfferResponse) -> String {
        response.network_offer_id.to_string()
    }

    fn from_entity(entity: LocalEntity) -> Option<Campaign> {
        match entity {
            LocalEntity::Campaign(campaign) => Some(campaign),
            _ => None,
        }
    }

    fn into_entity(local: Campaign) -> LocalEntity {
        LocalEntity::Campaign(local)
    }

    fn to_create_request(
        &self,
        local: &Campaign,
        ctx: &MappingContext,
    ) -> Result<OfferRequest, IntegrationError> {
        self.request(local, ctx)
    }

    fn to_update_request(
        &self,
        local: &Campaign,
        ctx: &MappingContext,
    ) -> Result<OfferRequest, IntegrationError> {
        self.request(local, ctx)
    }

    fn merge_response(&self, wire: &OfferResponse, mut local: Campaign, origin: MergeOrigin) -> Campaign {
        if origin == MergeOrigin::Read {
            if let Some(provider_status) = wire.offer_status.as_deref().filter(|s| !s.is_empty()) {
                local.status = status::from_offer_status(provider_status);
            }
        }
        merge_text(&mut local.destination_url, wire.destination_url.as_ref(), origin);
        merge_text(&mut local.thumbnail_url, wire.thumbnail_url.as_ref(), origin);
        merge_text(&mut local.preview_url, wire.preview_url.as_ref(), origin);
        merge_text(&mut local.currency_id, wire.currency_id.as_ref(), origin);
        merge_text(&mut local.conversion_method, wire.conversion_method.as_ref(), origin);
        merge_text(&mut local.session_definition, wire.session_definition.as_ref(), origin);
        merge_field(&mut local.session_duration, wire.session_duration.as_ref(), origin);
        merge_text(&mut local.attribution_method, wire.attribution_method.as_ref(), origin);
        merge_text(
            &mut local.email_attribution_method,
            wire.email_attribution_method.as_ref(),
            origin,
        );
        merge_text(&mut local.redirect_mode, wire.redirect_mode.as_ref(), origin);
        merge_text(&mut local.visibility, wire.visibility.as_ref(), origin);
        merge_field(
            &mut local.network_tracking_domain_id,
            wire.network_tracking_domain_id.as_ref(),
            origin,
        );
        local
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// The single default payout/revenue entry. Duplicate conversions are refused.
fn payout_revenue(local: &Campaign) -> PayoutRevenue {
    let mut entry = PayoutRevenue::new(
        or_default(&local.payout_type, defaults::PAYOUT_TYPE),
        or_default(&local.revenue_type, defaults::REVENUE_TYPE),
        true,
        false,
    );
    entry.payout_amount = local.payout_amount;
    entry.revenue_amount = local.revenue_amount;
    entry
}
