//! Discriminated unions over the ISO 15118-2 request/response catalog.
//!
//! `spec.md` §9 ("Tagged variants for messages"): the original source models
//! a request/response as a dynamically-typed record with optional
//! sub-bodies, only one of which is populated at a time. Here that becomes
//! an exhaustive enum; every `process_message` dispatch below matches on it
//! instead of testing `is_some()` on a handful of optional fields.

use super::authorization::{AuthorizationRequest, AuthorizationResponse};
use super::cable_check::{CableCheckRequest, CableCheckResponse};
use super::certificate_installation::{CertificateInstallationRequest, CertificateInstallationResponse};
use super::charge_parameter_discovery::{ChargeParameterDiscoveryRequest, ChargeParameterDiscoveryResponse};
use super::charging_status::{ChargingStatusRequest, ChargingStatusResponse};
use super::current_demand::{CurrentDemandRequest, CurrentDemandResponse};
use super::metering_receipt::{MeteringReceiptRequest, MeteringReceiptResponse};
use super::payment_details::{PaymentDetailsRequest, PaymentDetailsResponse};
use super::payment_service_selection::{PaymentServiceSelectionRequest, PaymentServiceSelectionResponse};
use super::power_delivery::{PowerDeliveryRequest, PowerDeliveryResponse};
use super::pre_charge::{PreChargeRequest, PreChargeResponse};
use super::service_detail::{ServiceDetailRequest, ServiceDetailResponse};
use super::service_discovery::{ServiceDiscoveryRequest, ServiceDiscoveryResponse};
use super::session_setup::{SessionSetupRequest, SessionSetupResponse};
use super::session_stop::{SessionStopRequest, SessionStopResponse};
use super::welding_detection::{WeldingDetectionRequest, WeldingDetectionResponse};

macro_rules! tagged_union {
    ($name:ident { $($variant:ident($inner:ty)),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $($variant($inner)),+
        }

        impl $name {
            pub fn type_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant)),+
                }
            }
        }
    };
}

tagged_union!(Iso2Request {
    SessionSetup(SessionSetupRequest),
    ServiceDiscovery(ServiceDiscoveryRequest),
    ServiceDetail(ServiceDetailRequest),
    PaymentServiceSelection(PaymentServiceSelectionRequest),
    CertificateInstallation(CertificateInstallationRequest),
    PaymentDetails(PaymentDetailsRequest),
    Authorization(AuthorizationRequest),
    ChargeParameterDiscovery(ChargeParameterDiscoveryRequest),
    PowerDelivery(PowerDeliveryRequest),
    ChargingStatus(ChargingStatusRequest),
    CurrentDemand(CurrentDemandRequest),
    MeteringReceipt(MeteringReceiptRequest),
    CableCheck(CableCheckRequest),
    PreCharge(PreChargeRequest),
    WeldingDetection(WeldingDetectionRequest),
    SessionStop(SessionStopRequest),
});

tagged_union!(Iso2Response {
    SessionSetup(SessionSetupResponse),
    ServiceDiscovery(ServiceDiscoveryResponse),
    ServiceDetail(ServiceDetailResponse),
    PaymentServiceSelection(PaymentServiceSelectionResponse),
    CertificateInstallation(CertificateInstallationResponse),
    PaymentDetails(PaymentDetailsResponse),
    Authorization(AuthorizationResponse),
    ChargeParameterDiscovery(ChargeParameterDiscoveryResponse),
    PowerDelivery(PowerDeliveryResponse),
    ChargingStatus(ChargingStatusResponse),
    CurrentDemand(CurrentDemandResponse),
    MeteringReceipt(MeteringReceiptResponse),
    CableCheck(CableCheckResponse),
    PreCharge(PreChargeResponse),
    WeldingDetection(WeldingDetectionResponse),
    SessionStop(SessionStopResponse),
});
