use uuid::Uuid;

use super::ConnectionInfo;
use crate::models::Role;

/// Compute the delivery set for one inbound chat message from a registry
/// snapshot.
///
/// - citizens reach the police collective, never other citizens;
/// - a directed police reply reaches every connection bound to the target
///   principal, unioned with every other live police connection (only the
///   peer group excludes the sender's own connection);
/// - an undirected police message is a peer broadcast.
///
/// Each live connection is considered once, so a connection matching both
/// groups receives exactly one copy.
pub fn delivery_targets(
    sender: &ConnectionInfo,
    recipient_id: Option<Uuid>,
    live: &[ConnectionInfo],
) -> Vec<Uuid> {
    let mut targets = Vec::new();
    for connection in live {
        let matched = match sender.role {
            Role::Citizen => connection.role == Role::Police,
            Role::Police => {
                // The is_some guard keeps an unbound principal (None) from
                // matching an absent recipient.
                let addressed = recipient_id.is_some() && connection.user_id == recipient_id;
                let police_peer = connection.role == Role::Police && connection.id != sender.id;
                addressed || police_peer
            }
        };
        if matched {
            targets.push(connection.id);
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(user_id: Option<Uuid>, role: Role) -> ConnectionInfo {
        ConnectionInfo {
            id: Uuid::new_v4(),
            user_id,
            role,
        }
    }

    #[test]
    fn citizen_reaches_every_police_connection_and_no_citizen() {
        let sender = conn(None, Role::Citizen);
        let p1 = conn(Some(Uuid::new_v4()), Role::Police);
        let p2 = conn(Some(Uuid::new_v4()), Role::Police);
        let c2 = conn(None, Role::Citizen);
        let live = [sender, p1, p2, c2];

        let targets = delivery_targets(&sender, None, &live);
        assert!(targets.contains(&p1.id));
        assert!(targets.contains(&p2.id));
        assert!(!targets.contains(&c2.id));
        assert!(!targets.contains(&sender.id));
    }

    #[test]
    fn citizen_recipient_field_is_ignored() {
        let sender = conn(None, Role::Citizen);
        let target_user = Uuid::new_v4();
        let c2 = conn(Some(target_user), Role::Citizen);
        let p1 = conn(Some(Uuid::new_v4()), Role::Police);
        let live = [sender, c2, p1];

        // Citizens cannot address another citizen directly.
        let targets = delivery_targets(&sender, Some(target_user), &live);
        assert_eq!(targets, vec![p1.id]);
    }

    #[test]
    fn directed_police_reply_unions_recipient_and_peers() {
        let sender = conn(Some(Uuid::new_v4()), Role::Police);
        let citizen_user = Uuid::new_v4();
        let citizen = conn(Some(citizen_user), Role::Citizen);
        let p2 = conn(Some(Uuid::new_v4()), Role::Police);
        let live = [sender, citizen, p2];

        let targets = delivery_targets(&sender, Some(citizen_user), &live);
        assert!(targets.contains(&citizen.id));
        assert!(targets.contains(&p2.id));
        assert!(!targets.contains(&sender.id));
    }

    #[test]
    fn directed_reply_reaches_every_connection_of_the_principal() {
        let sender = conn(Some(Uuid::new_v4()), Role::Police);
        let citizen_user = Uuid::new_v4();
        let phone = conn(Some(citizen_user), Role::Citizen);
        let laptop = conn(Some(citizen_user), Role::Citizen);
        let live = [sender, phone, laptop];

        let targets = delivery_targets(&sender, Some(citizen_user), &live);
        assert!(targets.contains(&phone.id));
        assert!(targets.contains(&laptop.id));
    }

    #[test]
    fn police_recipient_in_both_groups_gets_one_copy() {
        let sender = conn(Some(Uuid::new_v4()), Role::Police);
        let p2_user = Uuid::new_v4();
        let p2 = conn(Some(p2_user), Role::Police);
        let live = [sender, p2];

        let targets = delivery_targets(&sender, Some(p2_user), &live);
        assert_eq!(targets, vec![p2.id]);
    }

    #[test]
    fn undirected_police_message_is_a_peer_broadcast() {
        let sender = conn(Some(Uuid::new_v4()), Role::Police);
        let p2 = conn(Some(Uuid::new_v4()), Role::Police);
        let p3 = conn(Some(Uuid::new_v4()), Role::Police);
        let citizen = conn(None, Role::Citizen);
        let live = [sender, p2, p3, citizen];

        let targets = delivery_targets(&sender, None, &live);
        assert!(targets.contains(&p2.id));
        assert!(targets.contains(&p3.id));
        assert!(!targets.contains(&citizen.id));
        assert!(!targets.contains(&sender.id));
    }

    #[test]
    fn anonymous_connections_never_match_a_directed_recipient() {
        let sender = conn(Some(Uuid::new_v4()), Role::Police);
        let anonymous = conn(None, Role::Citizen);
        let live = [sender, anonymous];

        let targets = delivery_targets(&sender, Some(Uuid::new_v4()), &live);
        assert!(targets.is_empty());
    }

    #[test]
    fn no_live_recipients_yields_an_empty_set() {
        let sender = conn(None, Role::Citizen);
        let targets = delivery_targets(&sender, None, &[sender]);
        assert!(targets.is_empty());
    }
}
