//! One detected interaction.

use blob_core::{AgentId, InteractionId, ObjectId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// Both agents see each other; both become occupied.
    Mutual,
    /// Only the first participant sees the second.
    OneSided,
    /// An agent sees a world object.
    AgentObject,
}

impl InteractionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionKind::Mutual => "mutual",
            InteractionKind::OneSided => "one_sided",
            InteractionKind::AgentObject => "agent_object",
        }
    }
}

/// Who takes part.  For one-sided interactions the observer comes first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Participants {
    Agents(AgentId, AgentId),
    AgentObject(AgentId, ObjectId),
}

/// A per-tick interaction record.  Created by detection, processed once,
/// then dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Interaction {
    pub id:           InteractionId,
    pub kind:         InteractionKind,
    pub participants: Participants,
    pub distance:     f64,
    pub processed:    bool,
}

impl Interaction {
    pub fn new(id: InteractionId, kind: InteractionKind, participants: Participants, distance: f64) -> Self {
        Self { id, kind, participants, distance, processed: false }
    }
}
