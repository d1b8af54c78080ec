//! Static world objects ("things").
//!
//! Objects never move, have no visual range and hold no interaction state.
//! They are stored in the same parallel-array layout as agents so the
//! detector can take their positions as one slice.

use blob_core::{ObjectId, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct WorldObject {
    pub id:   ObjectId,
    pub name: String,
}

/// Append-only arena of world objects.
#[derive(Default)]
pub struct ObjectStore {
    objects:   Vec<WorldObject>,
    positions: Vec<Vec3>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new object.  The only insertion path.
    pub fn add(&mut self, name: impl Into<String>, position: Vec3) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(WorldObject { id, name: name.into() });
        self.positions.push(position);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.get(id.index())
    }

    #[inline]
    pub fn position(&self, id: ObjectId) -> Option<Vec3> {
        self.positions.get(id.index()).copied()
    }

    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// `(object, position)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&WorldObject, Vec3)> + '_ {
        self.objects.iter().zip(self.positions.iter().copied())
    }
}
