//! Per-message and per-phase timeouts, given in seconds.
//!
//! Grounded on `examples/original_source/iso15118/shared/messages/din_spec/timeouts.py`
//! (DIN SPEC 70121 §9.6.2 / §9.6.5.5); the ISO 15118-2 values reuse the same
//! table (the standards share the underlying V2G transport-layer timing
//! rules) except where noted.

use std::time::Duration;

/// Non-message-specific timings (DIN SPEC 70121 Table 77 / ISO 15118-2
/// equivalent).
pub const V2G_SECC_READYTOCHARGE_PERFORMANCE_TIME: Duration = Duration::from_millis(148_000);
pub const V2G_EVCC_READYTOCHARGE_TIMEOUT: Duration = Duration::from_millis(150_000);
pub const V2G_SECC_COMMUNICATION_SETUP_PERFORMANCE_TIME: Duration = Duration::from_secs(18);
pub const V2G_EVCC_COMMUNICATION_SETUP_TIMEOUT: Duration = Duration::from_secs(20);
pub const V2G_SECC_CABLE_CHECK_PERFORMANCE_TIME: Duration = Duration::from_secs(38);
pub const V2G_EVCC_CABLE_CHECK_TIMEOUT: Duration = Duration::from_secs(40);
pub const V2G_SECC_PRE_CHARGE_PERFORMANCE_TIME: Duration = Duration::from_secs(5);
pub const V2G_EVCC_PRE_CHARGE_TIMEOUT: Duration = Duration::from_secs(7);

/// The default per-state sequence timeout: how long the SECC will wait for
/// the next expected request before abandoning the session (`spec.md` §5).
pub const V2G_SECC_SEQUENCE_TIMEOUT: Duration = Duration::from_secs(60);
pub const V2G_EVCC_SEQUENCE_PERFORMANCE_TIME: Duration = Duration::from_secs(59);

/// `CurrentDemandReq` has the tightest response budget of any message in
/// the catalog, since it drives the live DC charge loop.
pub const CURRENT_DEMAND_REQ: Duration = Duration::from_millis(250);
pub const CURRENT_DEMAND_RES: Duration = Duration::from_millis(25);

/// Message-specific request/response timings (DIN SPEC 70121 Table 75),
/// reused for the structurally identical ISO 15118-2 messages.
pub const REQ_DEFAULT: Duration = Duration::from_secs(2);
pub const RES_DEFAULT: Duration = Duration::from_millis(1500);

/// Returns the per-state sequence timeout to apply while waiting for the
/// named request. Only `CurrentDemandReq` deviates from the default.
pub fn sequence_timeout_for(message_name: &str) -> Duration {
    if message_name == "CurrentDemandReq" {
        CURRENT_DEMAND_REQ
    } else {
        V2G_SECC_SEQUENCE_TIMEOUT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_demand_gets_the_tight_budget() {
        assert_eq!(sequence_timeout_for("CurrentDemandReq"), CURRENT_DEMAND_REQ);
    }

    #[test]
    fn everything_else_gets_the_default_sequence_timeout() {
        assert_eq!(sequence_timeout_for("ChargeParameterDiscoveryReq"), V2G_SECC_SEQUENCE_TIMEOUT);
        assert_eq!(sequence_timeout_for("SessionSetupReq"), V2G_SECC_SEQUENCE_TIMEOUT);
    }
}
