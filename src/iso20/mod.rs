//! ISO 15118-20 scaffolding (`spec.md` §4.4, §9): the common envelope plus
//! the AC-loop sequence that `failed_responses.py`'s
//! `init_failed_responses_iso_v20` itself implements. DC charge loop and
//! WPT/ACDP flows are out of scope (`spec.md` Non-goals).

pub mod ac_charge_loop;
pub mod authorization;
pub mod authorization_setup;
pub mod charge_parameter_discovery;
pub mod header;
pub mod message;
pub mod metering_confirmation;
pub mod power_delivery;
pub mod schedule_exchange;
pub mod service_detail;
pub mod service_discovery;
pub mod service_selection;
pub mod session_setup;
pub mod session_stop;

pub use header::{ISOV20PayloadTypes, MessageHeader, Namespace};
pub use message::{Iso20Request, Iso20Response};
