//! Common envelope for every ISO 15118-20 message (`spec.md` §6): a
//! `MessageHeader` carrying the session id and a timestamp, plus the
//! `Namespace`/`ISOV20PayloadTypes` pair a response needs to route EXI
//! encoding, since ISO 15118-20 multiplexes several XSD namespaces
//! (Common Messages, AC, DC, ...) the way -2 did not.

use serde::{Deserialize, Serialize};

use crate::session::context::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub session_id: SessionId,
    pub timestamp: u64,
}

impl MessageHeader {
    pub fn new(session_id: SessionId, timestamp: u64) -> Self {
        MessageHeader { session_id, timestamp }
    }
}

impl Serialize for MessageHeader {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("MessageHeader", 2)?;
        s.serialize_field("sessionID", &self.session_id.to_hex())?;
        s.serialize_field("timestamp", &self.timestamp)?;
        s.end()
    }
}

impl<'de> Deserialize<'de> for MessageHeader {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            session_id: String,
            timestamp: u64,
        }
        let raw = Raw::deserialize(deserializer)?;
        let session_id = SessionId::from_hex(&raw.session_id).ok_or_else(|| serde::de::Error::custom("invalid sessionID hex"))?;
        Ok(MessageHeader { session_id, timestamp: raw.timestamp })
    }
}

/// Which ISO 15118-20 XSD namespace a message belongs to, needed alongside
/// [`ISOV20PayloadTypes`] to route EXI encoding for the external codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    CommonMessages,
    Ac,
    Dc,
}

impl Namespace {
    pub fn uri(self) -> &'static str {
        match self {
            Namespace::CommonMessages => "urn:iso:std:iso:15118:-20:CommonMessages",
            Namespace::Ac => "urn:iso:std:iso:15118:-20:AC",
            Namespace::Dc => "urn:iso:std:iso:15118:-20:DC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ISOV20PayloadTypes {
    SessionSetupReq,
    SessionSetupRes,
    AuthorizationSetupReq,
    AuthorizationSetupRes,
    AuthorizationReq,
    AuthorizationRes,
    ServiceDiscoveryReq,
    ServiceDiscoveryRes,
    ServiceDetailReq,
    ServiceDetailRes,
    ServiceSelectionReq,
    ServiceSelectionRes,
    ScheduleExchangeReq,
    ScheduleExchangeRes,
    AcChargeParameterDiscoveryReq,
    AcChargeParameterDiscoveryRes,
    DcChargeParameterDiscoveryReq,
    DcChargeParameterDiscoveryRes,
    PowerDeliveryReq,
    PowerDeliveryRes,
    AcChargeLoopReq,
    AcChargeLoopRes,
    MeteringConfirmationReq,
    MeteringConfirmationRes,
    SessionStopReq,
    SessionStopRes,
}
