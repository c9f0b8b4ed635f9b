use crate::init_tracing;
use crate::utils::TestRelay;
use beacon_core::RoomId;

#[test]
fn room_is_removed_once_empty_and_leave_disconnect_do_not_conflict() {
    init_tracing();

    let relay = TestRelay::new();
    let a = relay.connect();

    relay.join(&a, "r1", "alice");
    assert_eq!(relay.registry.room_count(), 1);

    // Explicit leave first, then the socket drops.
    assert!(relay.registry.leave(&RoomId::from("r1"), &a.id));
    assert_eq!(relay.registry.room_count(), 0);

    relay.disconnect(&a);
    assert_eq!(relay.registry.room_count(), 0);
}
