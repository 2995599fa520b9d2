use super::{defaults, identity, merge_field, merge_text, status, EntityMapper, MergeOrigin};
use crate::domain::{
    Address, Advertiser, BillingDetails, EntityKind, LocalEntity, MappingContext,
};
use crate::error::IntegrationError;
use crate::wire::advertiser::{
    AdvertiserBilling, AdvertiserRequest, AdvertiserResponse, AdvertiserSettings,
    BillingScheduleDetails, ExposedVariables,
};
use crate::wire::common::{AccountUser, ContactAddress};
use crate::wire::Nullable;

/// Region used when a billing address carries no state.
pub const DEFAULT_REGION_CODE: &str = "NY";

#[derive(Debug, Clone, Copy, Default)]
pub struct AdvertiserMapper;

impl AdvertiserMapper {
    fn base_request(&self, local: &Advertiser, ctx: &MappingContext) -> AdvertiserRequest {
        let currency = local
            .default_currency_id
            .clone()
            .unwrap_or_else(|| defaults::CURRENCY_ID.to_string());
        let mut req = AdvertiserRequest::new(
            local.name.clone(),
            status::to_account_status(local.status),
            defaults::NETWORK_EMPLOYEE_ID,
            currency,
            local
                .reporting_timezone_id
                .unwrap_or(defaults::REPORTING_TIMEZONE_ID),
            local
                .attribution_method
                .clone()
                .unwrap_or_else(|| defaults::ATTRIBUTION_METHOD.to_string()),
            local
                .email_attribution_method
                .clone()
                .unwrap_or_else(|| defaults::EMAIL_ATTRIBUTION_METHOD.to_string()),
            local
                .attribution_priority
                .clone()
                .unwrap_or_else(|| defaults::ATTRIBUTION_PRIORITY.to_string()),
        );

        req.internal_notes = Some(identity::internal_notes(
            EntityKind::Advertiser,
            local.id,
            ctx,
            local.internal_notes.as_deref(),
        ));
        req.labels = Some(identity::org_labels(ctx, local.organization_id));
        req.platform_name = local.platform_name.clone();
        req.platform_url = local.platform_url.clone();
        req.platform_username = local.platform_username.clone();
        req.accounting_contact_email = local.accounting_contact_email.clone();
        req.offer_id_macro = local.offer_id_macro.clone();
        req.affiliate_id_macro = local.affiliate_id_macro.clone();
        req.is_expose_publisher_reporting_data = local.is_expose_publisher_reporting_data;
        req.billing = Some(billing(local.billing_details.as_ref()));
        req.settings = Some(AdvertiserSettings {
            exposed_variables: Some(default_exposed_variables()),
        });

        if let Some(address) = local
            .billing_details
            .as_ref()
            .and_then(|details| details.address.as_ref())
        {
            req.contact_address = Some(contact_address(address));
            req.is_contact_address_enabled = Some(true);
        }
        req
    }
}

impl EntityMapper for AdvertiserMapper {
    type Local = Advertiser;
    type Request = AdvertiserRequest;
    type Response = AdvertiserResponse;

    const KIND: EntityKind = EntityKind::Advertiser;
    const COLLECTION_PATH: &'static str = "/networks/advertisers";
    const ID_KEY: &'static str = "network_advertiser_id";

    fn local_id(local: &Advertiser) -> i64 {
        local.id
    }

    fn provider_id(response: &AdvertiserResponse) -> String {
        response.network_advertiser_id.to_string()
    }

    fn from_entity(entity: LocalEntity) -> Option<Advertiser> {
        match entity {
            LocalEntity::Advertiser(advertiser) => Some(advertiser),
            _ => None,
        }
    }

    fn into_entity(local: Advertiser) -> LocalEntity {
        LocalEntity::Advertiser(local)
    }

    fn to_create_request(
        &self,
        local: &Advertiser,
        ctx: &MappingContext,
    ) -> Result<AdvertiserRequest, IntegrationError> {
        validate(local)?;
        let mut req = self.base_request(local, ctx);
        // The Provider enforces globally unique user emails.
        req.users = Some(vec![AccountUser::new(
            "User",
            "Account",
            identity::unique_user_email(local.contact_email.as_deref(), &local.name),
            defaults::USER_ACCOUNT_STATUS,
            defaults::USER_LANGUAGE_ID,
            req.reporting_timezone_id,
            req.default_currency_id.clone(),
        )]);
        Ok(req)
    }

    fn to_update_request(
        &self,
        local: &Advertiser,
        ctx: &MappingContext,
    ) -> Result<AdvertiserRequest, IntegrationError> {
        validate(local)?;
        Ok(self.base_request(local, ctx))
    }

    fn merge_response(
        &self,
        wire: &AdvertiserResponse,
        mut local: Advertiser,
        origin: MergeOrigin,
    ) -> Advertiser {
        if origin == MergeOrigin::Read {
            if let Some(provider_status) = wire.account_status.as_deref().filter(|s| !s.is_empty()) {
                local.status = status::from_account_status(provider_status);
            }
        }
        merge_text(&mut local.default_currency_id, wire.default_currency_id.as_ref(), origin);
        merge_text(&mut local.platform_name, wire.platform_name.as_ref(), origin);
        merge_text(&mut local.platform_url, wire.platform_url.as_ref(), origin);
        merge_text(&mut local.platform_username, wire.platform_username.as_ref(), origin);
        merge_text(
            &mut local.accounting_contact_email,
            wire.accounting_contact_email.as_ref(),
            origin,
        );
        merge_text(&mut local.offer_id_macro, wire.offer_id_macro.as_ref(), origin);
        merge_text(&mut local.affiliate_id_macro, wire.affiliate_id_macro.as_ref(), origin);
        merge_text(&mut local.attribution_method, wire.attribution_method.as_ref(), origin);
        merge_text(
            &mut local.email_attribution_method,
            wire.email_attribution_method.as_ref(),
            origin,
        );
        merge_text(&mut local.attribution_priority, wire.attribution_priority.as_ref(), origin);
        merge_field(
            &mut local.reporting_timezone_id,
            wire.reporting_timezone_id.as_ref(),
            origin,
        );
        merge_field(
            &mut local.is_expose_publisher_reporting_data,
            wire.is_expose_publisher_reporting_data.as_ref(),
            origin,
        );
        local
    }
}

fn validate(local: &Advertiser) -> Result<(), IntegrationError> {
    if local.name.trim().is_empty() {
        return Err(IntegrationError::InvalidEntity(format!(
            "advertiser {} has an empty name",
            local.id
        )));
    }
    Ok(())
}

fn billing(details: Option<&BillingDetails>) -> AdvertiserBilling {
    let Some(details) = details else {
        let mut billing = AdvertiserBilling::new(defaults::ADVERTISER_BILLING_FREQUENCY);
        billing.default_payment_terms = Some(defaults::ADVERTISER_PAYMENT_TERMS);
        return billing;
    };

    let mut billing = AdvertiserBilling::new(
        details
            .frequency
            .clone()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| defaults::ADVERTISER_BILLING_FREQUENCY.to_string()),
    );
    billing.tax_id = details.tax_id.clone().into();
    billing.is_invoice_creation_auto = details.is_invoice_creation_auto;
    billing.auto_invoice_start_date = details.auto_invoice_start_date.clone().into();
    billing.default_invoice_is_hidden = details.default_invoice_is_hidden;
    billing.invoice_generation_days_delay = details.invoice_generation_days_delay;
    billing.invoice_amount_threshold = details.invoice_amount_threshold;
    billing.default_payment_terms = Some(
        details
            .default_payment_terms
            .unwrap_or(defaults::ADVERTISER_PAYMENT_TERMS),
    );
    billing.details = details.schedule.as_ref().map(|s| BillingScheduleDetails {
        day_of_week: s.day_of_week,
        day_of_month: s.day_of_month,
        day_of_month_one: s.day_of_month_one,
        day_of_month_two: s.day_of_month_two,
        starting_month: s.starting_month,
    });
    billing
}

pub(crate) fn contact_address(address: &Address) -> ContactAddress {
    let mut contact = ContactAddress::new(
        address.line1.clone(),
        address.city.clone(),
        address
            .state
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION_CODE.to_string()),
        address.country.to_ascii_uppercase(),
        address.postal_code.clone(),
    );
    contact.address_2 = match address.line2.as_deref() {
        Some(line2) if !line2.is_empty() => Nullable::Value(line2.to_string()),
        _ => Nullable::Absent,
    };
    contact.country_id = defaults::country_id(&address.country);
    contact
}

/// Affiliate id and the first two sub ids are visible to advertisers.
fn default_exposed_variables() -> ExposedVariables {
    ExposedVariables {
        affiliate: Some(false),
        affiliate_id: Some(true),
        offer_url: Some(false),
        source_id: Some(false),
        sub1: Some(true),
        sub2: Some(true),
        sub3: Some(false),
        sub4: Some(false),
        sub5: Some(false),
    }
}
