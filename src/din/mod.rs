//! DIN SPEC 70121 message catalog: the simpler, DC-only, EIM-only variant
//! of the ISO 15118-2 sequence (`spec.md` §4.4).

pub mod cable_check;
pub mod charge_parameter_discovery;
pub mod contract_authentication;
pub mod current_demand;
pub mod message;
pub mod power_delivery;
pub mod pre_charge;
pub mod service_discovery;
pub mod service_payment_selection;
pub mod session_setup;
pub mod session_stop;
pub mod welding_detection;

pub use message::{DinRequest, DinResponse};
