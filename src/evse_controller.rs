//! The EVSE Controller Interface (`spec.md` §4.3): the one local
//! collaborator the state machine consults for physical-EVSE facts. The
//! actual contactor/voltage/current control lives in the (external) EVSE
//! controller implementation; this crate only defines the contract.
//!
//! Every method is `async` per `spec.md` §5 / §9 ("all EVSE-controller calls
//! are potentially suspending") and the trait requires `Send + Sync` so one
//! controller instance can be shared across concurrently running sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::common::enums::{AuthorizationStatus, EnergyTransferMode};
use crate::common::schedule::SaScheduleTuple;
use crate::common::status::{AcEvseChargeParameter, DcEvseChargeParameter, MeterInfo};

#[async_trait]
pub trait EvseController: Send + Sync {
    async fn get_evse_id(&self) -> String;

    async fn get_supported_energy_transfer_modes(&self) -> Vec<EnergyTransferMode>;

    async fn get_ac_evse_charge_parameter(&self) -> AcEvseChargeParameter;

    async fn get_dc_evse_charge_parameter(&self) -> DcEvseChargeParameter;

    async fn get_ac_evse_status(&self) -> crate::common::status::AcEvseStatus;

    async fn get_dc_evse_status(&self) -> crate::common::status::DcEvseStatus;

    /// Returns up to `max_entries` SA schedule tuples covering the EV's
    /// intended `departure_time`, ordered by preference. An empty list
    /// signals "not ready yet" — `ChargeParameterDiscovery` reports
    /// `EVSEProcessing::Ongoing` in that case (`spec.md` §4.4).
    async fn get_sa_schedule_list(&self, max_entries: u8, departure_time: Option<DateTime<Utc>>) -> Vec<SaScheduleTuple>;

    /// Resolves the open question in `spec.md` §9.1: a three-valued
    /// authorization decision rather than a boolean, so `Authorization` can
    /// distinguish "still deciding" from "explicitly rejected."
    async fn is_authorised(&self) -> AuthorizationStatus;

    async fn get_meter_info(&self) -> MeterInfo;

    /// Toggles the EVSE's high-level-communication charging flag; called
    /// when `PowerDelivery` starts/stops energy transfer.
    async fn set_hlc_charging(&self, active: bool);

    /// Present DC output voltage/current, polled by `CurrentDemand` and
    /// `PreCharge`/`WeldingDetection`. Kept distinct from
    /// `get_dc_evse_charge_parameter` (the charge *limits*) since these are
    /// live readings that change every poll.
    async fn get_dc_present_voltage(&self) -> crate::common::physical_value::PhysicalValue;
    async fn get_dc_present_current(&self) -> crate::common::physical_value::PhysicalValue;
    async fn get_dc_target_voltage(&self) -> crate::common::physical_value::PhysicalValue;
}
