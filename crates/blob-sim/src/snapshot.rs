//! Serializable copies of world state for out-of-process viewers.
//!
//! Every type here owns its data, so a snapshot can cross a thread or be
//! encoded long after the tick that produced it.  Field names are the wire
//! format.

use serde::{Deserialize, Serialize};

/// One full world snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sim_data:    SimData,
    pub world_data:  WorldData,
    pub blobs_data:  Vec<BlobData>,
    pub things_data: Vec<ThingData>,
}

/// Engine-level counters and wall-clock stamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimData {
    /// Unix seconds when the engine was created.
    pub starting_realtime: f64,
    /// Unix seconds at the latest tick.
    pub current_realtime:  f64,
    pub sim_ticks:         u64,
    pub renderer_ticks:    u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldData {
    pub name:             String,
    /// `[length, width, height]`.
    pub dimensions:       [f64; 3],
    /// `"day"` or `"night"`.
    pub day_phase:        String,
    pub day:              u64,
    pub hour:             u64,
    pub day_hour:         u64,
    pub current_sim_time: f64,
}

/// One agent.  Dead agents are included with `alive = false`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlobData {
    pub id:        u32,
    pub name:      String,
    pub location:  [f64; 3],
    pub color:     String,
    /// Activity name, e.g. `"walking_timed"`.
    pub state:     String,
    pub alive:     bool,
    pub direction: [f64; 3],
    pub radius:    f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThingData {
    pub name:     String,
    pub location: [f64; 3],
}

impl Snapshot {
    pub fn alive_count(&self) -> usize {
        self.blobs_data.iter().filter(|b| b.alive).count()
    }
}
