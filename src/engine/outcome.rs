//! The engine's shared vocabulary of possible step results, per `spec.md`
//! §9: "The engine is a function `(state, ctx, inbound) -> (ctx, outcome)`
//! where `outcome` is `{Reply(response, next_state, timeout, ns, sig?),
//! Remain, Abort(code, response)}`."

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<Response, State> {
    /// A response was produced and the session advances (or the state names
    /// itself again, for a state that legitimately re-enters on certain
    /// inbound types).
    Reply { response: Response, next_state: State, timeout: Duration },
    /// The current state's accepted-type set includes an inbound type that
    /// produces no reply and causes no transition (unused by the protocols
    /// implemented here, but kept for the data model's completeness per
    /// `spec.md` §9).
    Remain,
    /// A terminal failure: `response` is a failed-response-registry entry
    /// with `response_code` overridden to the most specific `FAILED_*`
    /// variant. The session handler sends `response` and transitions to
    /// `Terminate`.
    Abort { response: Response },
}
