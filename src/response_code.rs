//! `ResponseCode`, carried by every response body per `spec.md` §3/§6.
//!
//! The same variant set is reused for DIN SPEC 70121 and ISO 15118-2
//! (`spec.md` §9: "Equivalent per protocol version"); a handful of
//! DIN-specific or ISO-2-specific codes are included since the wire strings
//! differ only in which codes a given protocol's messages ever emit, not in
//! spelling.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ResponseCode {
    #[serde(rename = "OK")]
    #[strum(serialize = "OK")]
    Ok,
    #[serde(rename = "OK_NewSessionEstablished")]
    #[strum(serialize = "OK_NewSessionEstablished")]
    OkNewSessionEstablished,
    #[serde(rename = "OK_OldSessionJoined")]
    #[strum(serialize = "OK_OldSessionJoined")]
    OkOldSessionJoined,
    #[serde(rename = "OK_CertificateExpiresSoon")]
    #[strum(serialize = "OK_CertificateExpiresSoon")]
    OkCertificateExpiresSoon,

    #[serde(rename = "FAILED")]
    #[strum(serialize = "FAILED")]
    Failed,
    #[serde(rename = "FAILED_SequenceError")]
    #[strum(serialize = "FAILED_SequenceError")]
    FailedSequenceError,
    #[serde(rename = "FAILED_ServiceIDInvalid")]
    #[strum(serialize = "FAILED_ServiceIDInvalid")]
    FailedServiceIdInvalid,
    #[serde(rename = "FAILED_UnknownSession")]
    #[strum(serialize = "FAILED_UnknownSession")]
    FailedUnknownSession,
    #[serde(rename = "FAILED_ServiceSelectionInvalid")]
    #[strum(serialize = "FAILED_ServiceSelectionInvalid")]
    FailedServiceSelectionInvalid,
    #[serde(rename = "FAILED_PaymentSelectionInvalid")]
    #[strum(serialize = "FAILED_PaymentSelectionInvalid")]
    FailedPaymentSelectionInvalid,
    #[serde(rename = "FAILED_NoChargeServiceSelected")]
    #[strum(serialize = "FAILED_NoChargeServiceSelected")]
    FailedNoChargeServiceSelected,
    #[serde(rename = "FAILED_CertificateExpired")]
    #[strum(serialize = "FAILED_CertificateExpired")]
    FailedCertificateExpired,
    #[serde(rename = "FAILED_SignatureError")]
    #[strum(serialize = "FAILED_SignatureError")]
    FailedSignatureError,
    #[serde(rename = "FAILED_NoCertificateAvailable")]
    #[strum(serialize = "FAILED_NoCertificateAvailable")]
    FailedNoCertificateAvailable,
    #[serde(rename = "FAILED_CertChainError")]
    #[strum(serialize = "FAILED_CertChainError")]
    FailedCertChainError,
    #[serde(rename = "FAILED_ChallengeInvalid")]
    #[strum(serialize = "FAILED_ChallengeInvalid")]
    FailedChallengeInvalid,
    #[serde(rename = "FAILED_ContactorError")]
    #[strum(serialize = "FAILED_ContactorError")]
    FailedContactorError,
    #[serde(rename = "FAILED_CertificateRevoked")]
    #[strum(serialize = "FAILED_CertificateRevoked")]
    FailedCertificateRevoked,
    #[serde(rename = "FAILED_WrongChargeParameter")]
    #[strum(serialize = "FAILED_WrongChargeParameter")]
    FailedWrongChargeParameter,
    #[serde(rename = "FAILED_PowerDeliveryNotApplied")]
    #[strum(serialize = "FAILED_PowerDeliveryNotApplied")]
    FailedPowerDeliveryNotApplied,
    #[serde(rename = "FAILED_TariffSelectionInvalid")]
    #[strum(serialize = "FAILED_TariffSelectionInvalid")]
    FailedTariffSelectionInvalid,
    #[serde(rename = "FAILED_ChargingProfileInvalid")]
    #[strum(serialize = "FAILED_ChargingProfileInvalid")]
    FailedChargingProfileInvalid,
    #[serde(rename = "FAILED_MeteringSignatureNotValid")]
    #[strum(serialize = "FAILED_MeteringSignatureNotValid")]
    FailedMeteringSignatureNotValid,
    #[serde(rename = "FAILED_WrongEnergyTransferMode")]
    #[strum(serialize = "FAILED_WrongEnergyTransferMode")]
    FailedWrongEnergyTransferMode,
    #[serde(rename = "FAILED_EVSEVoltageToLow")]
    #[strum(serialize = "FAILED_EVSEVoltageToLow")]
    FailedEvseVoltageTooLow,
}

impl ResponseCode {
    pub fn is_ok(self) -> bool {
        matches!(self, ResponseCode::Ok | ResponseCode::OkNewSessionEstablished | ResponseCode::OkOldSessionJoined | ResponseCode::OkCertificateExpiresSoon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_ok_variant_is_ok() {
        assert!(ResponseCode::Ok.is_ok());
        assert!(ResponseCode::OkNewSessionEstablished.is_ok());
        assert!(ResponseCode::OkOldSessionJoined.is_ok());
        assert!(ResponseCode::OkCertificateExpiresSoon.is_ok());
    }

    #[test]
    fn every_failed_variant_is_not_ok() {
        assert!(!ResponseCode::Failed.is_ok());
        assert!(!ResponseCode::FailedSequenceError.is_ok());
        assert!(!ResponseCode::FailedWrongEnergyTransferMode.is_ok());
    }

    #[test]
    fn wire_strings_use_the_registry_spelling() {
        assert_eq!(ResponseCode::OkNewSessionEstablished.to_string(), "OK_NewSessionEstablished");
        assert_eq!(ResponseCode::FailedWrongEnergyTransferMode.to_string(), "FAILED_WrongEnergyTransferMode");
    }

    #[test]
    fn serializes_with_the_same_renamed_strings() {
        let json = serde_json::to_string(&ResponseCode::FailedNoChargeServiceSelected).unwrap();
        assert_eq!(json, "\"FAILED_NoChargeServiceSelected\"");
    }
}
