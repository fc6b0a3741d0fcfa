//! ISO 15118-2 message catalog: one module per request/response pair, plus
//! the [`message::Iso2Request`]/[`message::Iso2Response`] tagged unions the
//! state machine dispatches on.

pub mod authorization;
pub mod cable_check;
pub mod certificate_installation;
pub mod charge_parameter_discovery;
pub mod charging_status;
pub mod current_demand;
pub mod message;
pub mod metering_receipt;
pub mod payment_details;
pub mod payment_service_selection;
pub mod power_delivery;
pub mod pre_charge;
pub mod service_detail;
pub mod service_discovery;
pub mod session_setup;
pub mod session_stop;
pub mod welding_detection;

pub use message::{Iso2Request, Iso2Response};
