//! Discriminated unions over the implemented slice of the ISO 15118-20
//! catalog (`spec.md` §9: DC charge loop and WPT/ACDP flows deferred).

use super::ac_charge_loop::{AcChargeLoopRequest, AcChargeLoopResponse};
use super::authorization::{AuthorizationRequest, AuthorizationResponse};
use super::authorization_setup::{AuthorizationSetupRequest, AuthorizationSetupResponse};
use super::charge_parameter_discovery::{
    AcChargeParameterDiscoveryRequest, AcChargeParameterDiscoveryResponse, DcChargeParameterDiscoveryRequest, DcChargeParameterDiscoveryResponse,
};
use super::metering_confirmation::{MeteringConfirmationRequest, MeteringConfirmationResponse};
use super::power_delivery::{PowerDeliveryRequest, PowerDeliveryResponse};
use super::schedule_exchange::{ScheduleExchangeRequest, ScheduleExchangeResponse};
use super::service_detail::{ServiceDetailRequest, ServiceDetailResponse};
use super::service_discovery::{ServiceDiscoveryRequest, ServiceDiscoveryResponse};
use super::service_selection::{ServiceSelectionRequest, ServiceSelectionResponse};
use super::session_setup::{SessionSetupRequest, SessionSetupResponse};
use super::session_stop::{SessionStopRequest, SessionStopResponse};

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

tagged_union!(Iso20Request {
    SessionSetup(SessionSetupRequest),
    AuthorizationSetup(AuthorizationSetupRequest),
    Authorization(AuthorizationRequest),
    ServiceDiscovery(ServiceDiscoveryRequest),
    ServiceDetail(ServiceDetailRequest),
    ServiceSelection(ServiceSelectionRequest),
    ScheduleExchange(ScheduleExchangeRequest),
    AcChargeParameterDiscovery(AcChargeParameterDiscoveryRequest),
    DcChargeParameterDiscovery(DcChargeParameterDiscoveryRequest),
    PowerDelivery(PowerDeliveryRequest),
    AcChargeLoop(AcChargeLoopRequest),
    MeteringConfirmation(MeteringConfirmationRequest),
    SessionStop(SessionStopRequest),
});

tagged_union!(Iso20Response {
    SessionSetup(SessionSetupResponse),
    AuthorizationSetup(AuthorizationSetupResponse),
    Authorization(AuthorizationResponse),
    ServiceDiscovery(ServiceDiscoveryResponse),
    ServiceDetail(ServiceDetailResponse),
    ServiceSelection(ServiceSelectionResponse),
    ScheduleExchange(ScheduleExchangeResponse),
    AcChargeParameterDiscovery(AcChargeParameterDiscoveryResponse),
    DcChargeParameterDiscovery(DcChargeParameterDiscoveryResponse),
    PowerDelivery(PowerDeliveryResponse),
    AcChargeLoop(AcChargeLoopResponse),
    MeteringConfirmation(MeteringConfirmationResponse),
    SessionStop(SessionStopResponse),
});
