//! Discriminated unions over the DIN SPEC 70121 request/response catalog.
//! See `iso2::message` for the rationale.

use super::cable_check::{CableCheckRequest, CableCheckResponse};
use super::charge_parameter_discovery::{ChargeParameterDiscoveryRequest, ChargeParameterDiscoveryResponse};
use super::contract_authentication::{ContractAuthenticationRequest, ContractAuthenticationResponse};
use super::current_demand::{CurrentDemandRequest, CurrentDemandResponse};
use super::power_delivery::{PowerDeliveryRequest, PowerDeliveryResponse};
use super::pre_charge::{PreChargeRequest, PreChargeResponse};
use super::service_discovery::{ServiceDiscoveryRequest, ServiceDiscoveryResponse};
use super::service_payment_selection::{ServicePaymentSelectionRequest, ServicePaymentSelectionResponse};
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

tagged_union!(DinRequest {
    SessionSetup(SessionSetupRequest),
    ServiceDiscovery(ServiceDiscoveryRequest),
    ServicePaymentSelection(ServicePaymentSelectionRequest),
    ContractAuthentication(ContractAuthenticationRequest),
    ChargeParameterDiscovery(ChargeParameterDiscoveryRequest),
    CableCheck(CableCheckRequest),
    PreCharge(PreChargeRequest),
    PowerDelivery(PowerDeliveryRequest),
    CurrentDemand(CurrentDemandRequest),
    WeldingDetection(WeldingDetectionRequest),
    SessionStop(SessionStopRequest),
});

tagged_union!(DinResponse {
    SessionSetup(SessionSetupResponse),
    ServiceDiscovery(ServiceDiscoveryResponse),
    ServicePaymentSelection(ServicePaymentSelectionResponse),
    ContractAuthentication(ContractAuthenticationResponse),
    ChargeParameterDiscovery(ChargeParameterDiscoveryResponse),
    CableCheck(CableCheckResponse),
    PreCharge(PreChargeResponse),
    PowerDelivery(PowerDeliveryResponse),
    CurrentDemand(CurrentDemandResponse),
    WeldingDetection(WeldingDetectionResponse),
    SessionStop(SessionStopResponse),
});
