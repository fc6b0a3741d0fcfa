//! Datatypes shared across DIN SPEC 70121, ISO 15118-2 and ISO 15118-20
//! message catalogs: physical values, enumerations, certificate chains,
//! schedules, service descriptors and EVSE status records.

pub mod certificate;
pub mod charging_profile;
pub mod enums;
pub mod physical_value;
pub mod schedule;
pub mod service;
pub mod status;

pub use certificate::*;
pub use charging_profile::*;
pub use enums::*;
pub use physical_value::*;
pub use schedule::*;
pub use service::*;
pub use status::*;
