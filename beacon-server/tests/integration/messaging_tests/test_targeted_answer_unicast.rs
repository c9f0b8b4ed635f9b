use crate::init_tracing;
use crate::utils::TestRelay;
use beacon_core::{ClientEvent, ServerEvent};
use serde_json::json;

#[test]
fn answer_with_target_goes_only_to_that_connection() {
    init_tracing();

    let relay = TestRelay::new();
    let mut a = relay.connect();
    let mut b = relay.connect();
    let mut c = relay.connect();

    relay.join(&a, "r1", "alice");
    relay.join(&b, "r1", "bob");
    relay.join(&c, "r1", "carol");
    a.drain();
    b.drain();
    c.drain();

    // Target wins even though a room is supplied and c is also a member.
    relay.router.handle_event(
        a.id,
        ClientEvent::Answer {
            room: Some("r1".into()),
            sdp: json!("Y"),
            target: Some(b.id),
        },
    );

    assert_eq!(
        b.recv_event(),
        ServerEvent::Answer {
            sdp: json!("Y"),
            from: a.id,
        }
    );
    a.assert_no_events();
    c.assert_no_events();
}
