//! Wire format of the call signaling channel.
//!
//! Every frame is a JSON text message `{"event": "<name>", "data": {...}}`.
//! Field names inside `data` are camelCase to match the browser client.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Connection id assigned by the server when a socket connects.
pub type ConnId = String;

/// Display information a client attaches to itself. Unknown fields are kept
/// and relayed verbatim to other participants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ParticipantInfo {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Guest")
    }
}

/// Messages a client may send.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "vc:create")]
    Create {
        #[serde(default)]
        user: Option<ParticipantInfo>,
    },
    #[serde(rename = "vc:request-join", rename_all = "camelCase")]
    RequestJoin {
        room_id: String,
        #[serde(default)]
        user: Option<ParticipantInfo>,
    },
    #[serde(rename = "vc:approve", rename_all = "camelCase")]
    Approve { room_id: String, socket_id: ConnId },
    #[serde(rename = "vc:reject", rename_all = "camelCase")]
    Reject { room_id: String, socket_id: ConnId },
    #[serde(rename = "vc:join", rename_all = "camelCase")]
    Join {
        room_id: String,
        #[serde(default)]
        user_id: Option<Value>,
        #[serde(default)]
        user: Option<ParticipantInfo>,
    },
    #[serde(rename = "vc:offer")]
    Offer { to: ConnId, description: Value },
    #[serde(rename = "vc:answer")]
    Answer { to: ConnId, description: Value },
    #[serde(rename = "vc:candidate")]
    Candidate { to: ConnId, candidate: Value },
    #[serde(rename = "vc:leave", rename_all = "camelCase")]
    Leave { room_id: String },
}

/// One entry of a `vc:participants-list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub socket_id: ConnId,
    pub user_id: Option<Value>,
    pub name: String,
    pub is_admin: bool,
    pub user: ParticipantInfo,
}

/// Messages the server sends.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// First frame on every connection; tells the client its own id.
    #[serde(rename = "vc:connected", rename_all = "camelCase")]
    Connected { socket_id: ConnId },
    #[serde(rename = "vc:created", rename_all = "camelCase")]
    Created { room_id: String, admin: bool },
    #[serde(rename = "vc:join-request", rename_all = "camelCase")]
    JoinRequest {
        room_id: String,
        socket_id: ConnId,
        user: ParticipantInfo,
    },
    #[serde(rename = "vc:join-approved", rename_all = "camelCase")]
    JoinApproved { room_id: String },
    #[serde(rename = "vc:join-rejected")]
    JoinRejected { reason: String },
    #[serde(rename = "vc:participants-list")]
    ParticipantsList { participants: Vec<Participant> },
    #[serde(rename = "vc:user-joined", rename_all = "camelCase")]
    UserJoined {
        socket_id: ConnId,
        user_id: Option<Value>,
        user: ParticipantInfo,
    },
    #[serde(rename = "vc:user-left", rename_all = "camelCase")]
    UserLeft { socket_id: ConnId },
    #[serde(rename = "vc:promoted", rename_all = "camelCase")]
    Promoted { room_id: String },
    #[serde(rename = "vc:offer")]
    Offer { from: ConnId, description: Value },
    #[serde(rename = "vc:answer")]
    Answer { from: ConnId, description: Value },
    #[serde(rename = "vc:candidate")]
    Candidate { from: ConnId, candidate: Value },
    #[serde(rename = "vc:error")]
    Error { message: String },
}
