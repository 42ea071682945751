//! Call room bookkeeping as a synchronous state machine.
//!
//! [`Registry`] owns every room and the participant info of every connected
//! socket. Each transition takes the sender's connection id and one
//! [`ClientEvent`] and returns the [`Delivery`] list the caller must push to
//! sockets; no I/O happens here.
//!
//! Invariants:
//! - a room always has an admin, and the admin is a member;
//! - a room with no members does not exist;
//! - join requests are only ever forwarded to the current admin.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde_json::Value;
use uuid::Uuid;

use super::protocol::{ClientEvent, ConnId, Participant, ParticipantInfo, ServerEvent};

const ROOM_CODE_LENGTH: usize = 6;

/// An outbound frame addressed to one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: ConnId,
    pub event: ServerEvent,
}

impl Delivery {
    fn new(to: impl Into<ConnId>, event: ServerEvent) -> Self {
        Self {
            to: to.into(),
            event,
        }
    }
}

#[derive(Debug)]
struct Room {
    admin: ConnId,
    members: BTreeSet<ConnId>,
    /// Outstanding join requests, in arrival order of connection id.
    pending: BTreeMap<ConnId, ParticipantInfo>,
    /// Approved by the admin but not yet joined.
    approved: BTreeSet<ConnId>,
}

#[derive(Debug, Default)]
struct Connection {
    info: ParticipantInfo,
    user_id: Option<Value>,
}

#[derive(Debug, Default)]
pub struct Registry {
    rooms: HashMap<String, Room>,
    connections: HashMap<ConnId, Connection>,
}

fn error(to: &str, message: impl Into<String>) -> Vec<Delivery> {
    vec![Delivery::new(
        to,
        ServerEvent::Error {
            message: message.into(),
        },
    )]
}

fn rejected(to: &str, reason: impl Into<String>) -> Delivery {
    Delivery::new(
        to,
        ServerEvent::JoinRejected {
            reason: reason.into(),
        },
    )
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a socket. `user_id` is the authenticated user, if any.
    pub fn connect(&mut self, conn: &str, user_id: Option<Value>) {
        self.connections.insert(
            conn.to_string(),
            Connection {
                info: ParticipantInfo::default(),
                user_id,
            },
        );
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room_admin(&self, room_id: &str) -> Option<&str> {
        self.rooms.get(room_id).map(|r| r.admin.as_str())
    }

    pub fn room_members(&self, room_id: &str) -> Vec<ConnId> {
        self.rooms
            .get(room_id)
            .map(|r| r.members.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Apply one client message.
    pub fn handle(&mut self, from: &str, event: ClientEvent) -> Vec<Delivery> {
        if !self.connections.contains_key(from) {
            return error(from, "Unknown connection");
        }
        match event {
            ClientEvent::Create { user } => {
                let room_id = self.fresh_room_code();
                self.create_room(from, room_id, user)
            }
            ClientEvent::RequestJoin { room_id, user } => self.request_join(from, &room_id, user),
            ClientEvent::Approve { room_id, socket_id } => {
                self.decide(from, &room_id, &socket_id, true)
            }
            ClientEvent::Reject { room_id, socket_id } => {
                self.decide(from, &room_id, &socket_id, false)
            }
            ClientEvent::Join {
                room_id,
                user_id,
                user,
            } => self.join(from, &room_id, user_id, user),
            ClientEvent::Offer { to, description } => self.relay(
                from,
                &to,
                ServerEvent::Offer {
                    from: from.to_string(),
                    description,
                },
            ),
            ClientEvent::Answer { to, description } => self.relay(
                from,
                &to,
                ServerEvent::Answer {
                    from: from.to_string(),
                    description,
                },
            ),
            ClientEvent::Candidate { to, candidate } => self.relay(
                from,
                &to,
                ServerEvent::Candidate {
                    from: from.to_string(),
                    candidate,
                },
            ),
            ClientEvent::Leave { room_id } => self.depart(from, &room_id),
        }
    }

    /// Open a room with `from` as admin and first member.
    pub fn create_room(
        &mut self,
        from: &str,
        room_id: String,
        user: Option<ParticipantInfo>,
    ) -> Vec<Delivery> {
        self.remember_info(from, user);
        self.rooms.insert(
            room_id.clone(),
            Room {
                admin: from.to_string(),
                members: BTreeSet::from([from.to_string()]),
                pending: BTreeMap::new(),
                approved: BTreeSet::new(),
            },
        );
        tracing::debug!(room_id = %room_id, admin = %from, "Call room created");
        vec![Delivery::new(
            from,
            ServerEvent::Created {
                room_id,
                admin: true,
            },
        )]
    }

    fn request_join(
        &mut self,
        from: &str,
        room_id: &str,
        user: Option<ParticipantInfo>,
    ) -> Vec<Delivery> {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return vec![rejected(from, "Room not found")];
        };
        if room.members.contains(from) {
            return error(from, "Already in this room");
        }
        let info = user.unwrap_or_default();
        room.pending.insert(from.to_string(), info.clone());
        let admin = room.admin.clone();
        self.remember_info(from, Some(info.clone()));

        vec![Delivery::new(
            admin,
            ServerEvent::JoinRequest {
                room_id: room_id.to_string(),
                socket_id: from.to_string(),
                user: info,
            },
        )]
    }

    fn decide(&mut self, from: &str, room_id: &str, target: &str, approve: bool) -> Vec<Delivery> {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return error(from, "Room not found");
        };
        if room.admin != from {
            return error(from, "Only the room admin can answer join requests");
        }
        if room.pending.remove(target).is_none() {
            return error(from, "No pending join request from that participant");
        }

        if approve {
            room.approved.insert(target.to_string());
            vec![Delivery::new(
                target,
                ServerEvent::JoinApproved {
                    room_id: room_id.to_string(),
                },
            )]
        } else {
            vec![rejected(target, "The host declined your request")]
        }
    }

    fn join(
        &mut self,
        from: &str,
        room_id: &str,
        user_id: Option<Value>,
        user: Option<ParticipantInfo>,
    ) -> Vec<Delivery> {
        let Some(room) = self.rooms.get(room_id) else {
            return vec![rejected(from, "Room not found")];
        };
        let already_member = room.members.contains(from);
        if !already_member && !room.approved.contains(from) {
            return vec![rejected(from, "Join request has not been approved")];
        }

        self.remember_info(from, user);
        if let Some(conn) = self.connections.get_mut(from) {
            if conn.user_id.is_none() {
                conn.user_id = user_id;
            }
        }

        let Some(room) = self.rooms.get_mut(room_id) else {
            return Vec::new();
        };
        room.approved.remove(from);
        room.members.insert(from.to_string());
        let others: Vec<ConnId> = room.members.iter().filter(|m| *m != from).cloned().collect();
        let admin = room.admin.clone();

        let participants = others
            .iter()
            .map(|id| self.participant(id, id == &admin))
            .collect();
        let mut out = vec![Delivery::new(
            from,
            ServerEvent::ParticipantsList { participants },
        )];

        if !already_member {
            let me = self.participant(from, false);
            out.extend(others.into_iter().map(|to| {
                Delivery::new(
                    to,
                    ServerEvent::UserJoined {
                        socket_id: me.socket_id.clone(),
                        user_id: me.user_id.clone(),
                        user: me.user.clone(),
                    },
                )
            }));
        }
        out
    }

    fn relay(&self, from: &str, to: &str, event: ServerEvent) -> Vec<Delivery> {
        let shares_room = self
            .rooms
            .values()
            .any(|r| r.members.contains(from) && r.members.contains(to));
        if !shares_room {
            return error(from, "Peer is not in any of your rooms");
        }
        vec![Delivery::new(to, event)]
    }

    /// Remove `conn` from one room with the same bookkeeping as a disconnect.
    fn depart(&mut self, conn: &str, room_id: &str) -> Vec<Delivery> {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return Vec::new();
        };
        room.pending.remove(conn);
        room.approved.remove(conn);
        if !room.members.remove(conn) {
            return Vec::new();
        }

        let mut out: Vec<Delivery> = room
            .members
            .iter()
            .map(|m| {
                Delivery::new(
                    m.clone(),
                    ServerEvent::UserLeft {
                        socket_id: conn.to_string(),
                    },
                )
            })
            .collect();

        if room.members.is_empty() {
            out.extend(
                room.pending
                    .keys()
                    .chain(room.approved.iter())
                    .map(|waiting| rejected(waiting, "Room closed")),
            );
            self.rooms.remove(room_id);
            tracing::debug!(room_id = %room_id, "Call room closed");
            return out;
        }

        if room.admin == conn {
            let Some(next) = room.members.iter().next().cloned() else {
                return out;
            };
            room.admin = next.clone();
            tracing::debug!(room_id = %room_id, admin = %next, "Call room admin promoted");
            out.push(Delivery::new(
                next.clone(),
                ServerEvent::Promoted {
                    room_id: room_id.to_string(),
                },
            ));
            out.extend(room.pending.iter().map(|(socket_id, user)| {
                Delivery::new(
                    next.clone(),
                    ServerEvent::JoinRequest {
                        room_id: room_id.to_string(),
                        socket_id: socket_id.clone(),
                        user: user.clone(),
                    },
                )
            }));
        }
        out
    }

    /// Drop a socket from every room it touched and forget it.
    pub fn disconnect(&mut self, conn: &str) -> Vec<Delivery> {
        let mut touched: Vec<String> = self
            .rooms
            .iter()
            .filter(|(_, r)| {
                r.members.contains(conn) || r.pending.contains_key(conn) || r.approved.contains(conn)
            })
            .map(|(id, _)| id.clone())
            .collect();
        touched.sort();

        let mut out = Vec::new();
        for room_id in touched {
            out.extend(self.depart(conn, &room_id));
        }
        self.connections.remove(conn);
        out.retain(|d| d.to != conn);
        out
    }

    fn remember_info(&mut self, conn: &str, user: Option<ParticipantInfo>) {
        if let (Some(user), Some(c)) = (user, self.connections.get_mut(conn)) {
            c.info = user;
        }
    }

    fn participant(&self, conn: &str, is_admin: bool) -> Participant {
        let (info, user_id) = self
            .connections
            .get(conn)
            .map(|c| (c.info.clone(), c.user_id.clone()))
            .unwrap_or_default();
        Participant {
            socket_id: conn.to_string(),
            user_id,
            name: info.display_name().to_string(),
            is_admin,
            user: info,
        }
    }

    fn fresh_room_code(&self) -> String {
        loop {
            let code: String = Uuid::new_v4()
                .simple()
                .to_string()
                .chars()
                .take(ROOM_CODE_LENGTH)
                .collect::<String>()
                .to_uppercase();
            if !self.rooms.contains_key(&code) {
                return code;
            }
        }
    }
}
