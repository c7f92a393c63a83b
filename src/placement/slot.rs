//! Single-occupancy ownership record for the placed object.

/// Holds at most one placed object handle.
///
/// The slot only records ownership. Destroying the occupant is the
/// controller's job, which is why `replace` and `take` hand the previous
/// handle back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementSlot<H> {
    occupant: Option<H>,
}

impl<H> Default for PlacementSlot<H> {
    fn default() -> Self {
        Self { occupant: None }
    }
}

impl<H: Copy> PlacementSlot<H> {
    pub fn has_placement(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<H> {
        self.occupant
    }

    /// Store a new occupant, returning the previous one.
    pub fn replace(&mut self, handle: H) -> Option<H> {
        self.occupant.replace(handle)
    }

    /// Empty the slot, returning the occupant if there was one.
    pub fn take(&mut self) -> Option<H> {
        self.occupant.take()
    }
}
