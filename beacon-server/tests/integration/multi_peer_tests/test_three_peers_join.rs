use crate::init_tracing;
use crate::utils::TestRelay;
use beacon_core::ServerEvent;

#[test]
fn each_joiner_sees_pre_join_snapshot_and_existing_members_hear_once() {
    init_tracing();

    let relay = TestRelay::new();
    let mut a = relay.connect();
    let mut b = relay.connect();
    let mut c = relay.connect();

    relay.join(&a, "r1", "alice");
    relay.join(&b, "r1", "bob");
    relay.join(&c, "r1", "carol");

    // c saw a and b already in the room, never itself.
    let events = c.drain();
    assert_eq!(events.len(), 1);
    match &events[0] {
        ServerEvent::RoomInfo { participants, .. } => {
            assert_eq!(participants.len(), 2);
            assert!(participants.contains(&a.id));
            assert!(participants.contains(&b.id));
            assert!(!participants.contains(&c.id));
        }
        other => panic!("expected room-info, got {:?}", other),
    }

    // a: own room-info, then one user-joined for b and one for c.
    let events = a.drain();
    assert_eq!(events.len(), 3);
    let joined: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ServerEvent::UserJoined { connection_id, .. } => Some(*connection_id),
            _ => None,
        })
        .collect();
    assert_eq!(joined, vec![b.id, c.id]);

    // b: room-info with [a], then c's arrival.
    let events = b.drain();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        ServerEvent::RoomInfo { participants, .. } if participants.as_slice() == [a.id]
    ));
    assert!(matches!(
        &events[1],
        ServerEvent::UserJoined { connection_id, user_id: Some(u) }
            if *connection_id == c.id && u == "carol"
    ));
}
