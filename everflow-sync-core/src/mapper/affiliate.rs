use super::advertiser::contact_address;
use super::{defaults, identity, merge_field, merge_text, status, EntityMapper, MergeOrigin};
use crate::domain::{Affiliate, EntityKind, LocalEntity, MappingContext};
use crate::error::IntegrationError;
use crate::wire::affiliate::{
    AffiliateBilling, AffiliateBillingDetails, AffiliatePayment, AffiliateRequest,
    AffiliateResponse,
};
use crate::wire::common::AccountUser;

#[derive(Debug, Clone, Copy, Default)]
pub struct AffiliateMapper;

impl AffiliateMapper {
    fn base_request(&self, local: &Affiliate, ctx: &MappingContext) -> AffiliateRequest {
        let mut req = AffiliateRequest::new(
            local.name.clone(),
            status::to_account_status(local.status),
            local
                .network_employee_id
                .unwrap_or(defaults::NETWORK_EMPLOYEE_ID),
        );
        req.default_currency_id = Some(currency(local));
        req.internal_notes = Some(identity::internal_notes(
            EntityKind::Affiliate,
            local.id,
            ctx,
            local.internal_notes.as_deref(),
        ));
        req.labels = Some(identity::org_labels(ctx, local.organization_id));
        req.enable_media_cost_tracking_links = local.enable_media_cost_tracking_links;
        req.referrer_id = local.referrer_id.into();
        req.network_affiliate_tier_id = local.network_affiliate_tier_id.into();
        req.billing = Some(billing(local));
        if let Some(address) = &local.address {
            req.contact_address = Some(contact_address(address));
            req.is_contact_address_enabled = Some(true);
        }
        req
    }
}

impl EntityMapper for AffiliateMapper {
    type Local = Affiliate;
    type Request = AffiliateRequest;
    type Response = AffiliateResponse;

    const KIND: EntityKind = EntityKind::Affiliate;
    const COLLECTION_PATH: &'static str = "/networks/affiliates";
    const ID_KEY: &'static str = "network_affiliate_id";

    fn local_id(local: &Affiliate) -> i64 {
        local.id
    }

    fn provider_id(response: &AffiliateResponse) -> String {
        response.network_affiliate_id.to_string()
    }

    fn from_entity(entity: LocalEntity) -> Option<Affiliate> {
        match entity {
            LocalEntity::Affiliate(affiliate) => Some(affiliate),
            _ => None,
        }
    }

    fn into_entity(local: Affiliate) -> LocalEntity {
        LocalEntity::Affiliate(local)
    }

    fn to_create_request(
        &self,
        local: &Affiliate,
        ctx: &MappingContext,
    ) -> Result<AffiliateRequest, IntegrationError> {
        validate(local)?;
        let mut req = self.base_request(local, ctx);
        if local.contact_email.as_deref().is_some_and(|e| !e.trim().is_empty()) {
            req.users = Some(vec![AccountUser::new(
                "User",
                "Account",
                identity::unique_user_email(local.contact_email.as_deref(), &local.name),
                defaults::USER_ACCOUNT_STATUS,
                defaults::USER_LANGUAGE_ID,
                defaults::REPORTING_TIMEZONE_ID,
                currency(local),
            )]);
        }
        Ok(req)
    }

    fn to_update_request(
        &self,
        local: &Affiliate,
        ctx: &MappingContext,
    ) -> Result<AffiliateRequest, IntegrationError> {
        validate(local)?;
        Ok(self.base_request(local, ctx))
    }

    fn merge_response(
        &self,
        wire: &AffiliateResponse,
        mut local: Affiliate,
        origin: MergeOrigin,
    ) -> Affiliate {
        if origin == MergeOrigin::Read {
            if let Some(provider_status) = wire.account_status.as_deref().filter(|s| !s.is_empty()) {
                local.status = status::from_account_status(provider_status);
            }
        }
        merge_text(&mut local.default_currency_id, wire.default_currency_id.as_ref(), origin);
        merge_field(&mut local.network_employee_id, wire.network_employee_id.as_ref(), origin);
        merge_field(&mut local.referrer_id, wire.referrer_id.as_option(), origin);
        merge_field(
            &mut local.enable_media_cost_tracking_links,
            wire.enable_media_cost_tracking_links.as_ref(),
            origin,
        );
        merge_field(
            &mut local.network_affiliate_tier_id,
            wire.network_affiliate_tier_id.as_option(),
            origin,
        );
        local
    }
}

fn validate(local: &Affiliate) -> Result<(), IntegrationError> {
    if local.name.trim().is_empty() {
        return Err(IntegrationError::InvalidEntity(format!(
            "affiliate {} has an empty name",
            local.id
        )));
    }
    Ok(())
}

fn currency(local: &Affiliate) -> String {
    local
        .default_currency_id
        .clone()
        .unwrap_or_else(|| defaults::CURRENCY_ID.to_string())
}

fn billing(local: &Affiliate) -> AffiliateBilling {
    let settings = local.billing.clone().unwrap_or_default();
    let mut billing = AffiliateBilling::new(
        settings
            .billing_frequency
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| defaults::AFFILIATE_BILLING_FREQUENCY.to_string()),
        settings
            .payment_type
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| defaults::AFFILIATE_PAYMENT_TYPE.to_string()),
    );
    billing.tax_id = settings.tax_id.into();
    billing.details = Some(AffiliateBillingDetails {
        day_of_month: Some(
            settings
                .day_of_month
                .unwrap_or(defaults::AFFILIATE_BILLING_DAY_OF_MONTH),
        ),
    });
    billing.invoice_amount_threshold = local.invoice_amount_threshold;
    billing.default_payment_terms = local.default_payment_terms;
    billing.payment = local.payment_details.as_ref().map(|p| AffiliatePayment {
        account_number: p.account_number.clone(),
        routing_number: p.routing_number.clone(),
        account_name: p.account_name.clone(),
        bank_name: p.bank_name.clone(),
        bank_address: p.bank_address.clone(),
        swift_code: p.swift_code.clone(),
        email: p.email.clone(),
        paxum_id: p.paxum_id.clone(),
    });
    billing
}
