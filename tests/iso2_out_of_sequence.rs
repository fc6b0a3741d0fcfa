//! An unexpected message type for the current state must abort with
//! `FAILED_SequenceError` rather than being silently accepted or panicking.

mod support;

use iso15118_secc::iso2::authorization::AuthorizationRequest;
use iso15118_secc::iso2::message::{Iso2Request, Iso2Response};
use iso15118_secc::iso2::session_setup::SessionSetupRequest;
use iso15118_secc::response_code::ResponseCode;
use iso15118_secc::session_handler::run_iso2_session;

use support::{LoopbackTransport, MockEvse};

#[tokio::test]
async fn jumping_straight_to_authorization_is_a_sequence_error() {
    let evse = MockEvse::default();
    let requests = vec![
        Iso2Request::SessionSetup(SessionSetupRequest { evcc_id: "EVCC-OOS".to_string() }),
        // ServiceDiscovery/PaymentServiceSelection skipped entirely.
        Iso2Request::Authorization(AuthorizationRequest { id: None, gen_challenge: None, signature: None }),
    ];

    let mut transport = LoopbackTransport::new(requests);
    let stop = run_iso2_session(&mut transport, &evse, None, false, None).await;

    assert!(!stop.normal);
    assert_eq!(transport.sent.len(), 2);
    match transport.sent.last().unwrap() {
        Iso2Response::Authorization(r) => assert_eq!(r.response_code, ResponseCode::FailedSequenceError),
        other => panic!("expected AuthorizationRes, got {other:?}"),
    }
}
