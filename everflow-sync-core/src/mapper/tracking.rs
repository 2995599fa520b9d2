//! Tracking links have no local entity; the request is assembled from the two
//! resolved Provider ids plus the caller's sub ids and flags.

use crate::domain::TrackingLinkInput;
use crate::wire::tracking::TrackingLinkRequest;

pub const TRACKING_LINK_PATH: &str = "/networks/tracking/offers/clicks";

pub fn to_tracking_request(
    input: &TrackingLinkInput,
    network_affiliate_id: i64,
    network_offer_id: i64,
) -> TrackingLinkRequest {
    let mut req = TrackingLinkRequest::new(network_affiliate_id, network_offer_id);
    req.network_tracking_domain_id = input.network_tracking_domain_id;
    req.network_offer_url_id = input.network_offer_url_id;
    req.creative_id = input.creative_id;
    req.network_traffic_source_id = input.network_traffic_source_id;
    req.source_id = input.source_id.clone();
    req.sub1 = input.sub1.clone();
    req.sub2 = input.sub2.clone();
    req.sub3 = input.sub3.clone();
    req.sub4 = input.sub4.clone();
    req.sub5 = input.sub5.clone();
    req.is_encrypt_parameters = input.is_encrypt_parameters;
    req.is_redirect_link = input.is_redirect_link;
    req
}
