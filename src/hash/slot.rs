/// One cell of an open-addressing table.
///
/// A probe sequence stops at `Empty` or at a matching `Occupied` slot.
/// `Deleted` (a tombstone) is stepped over during lookups so that keys placed
/// further along the same collision chain stay reachable, but an insertion
/// may reuse it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot<E> {
    Empty,
    Occupied(E),
    Deleted,
}

impl<E> Slot<E> {
    pub(crate) fn occupied(&self) -> Option<&E> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    pub(crate) fn occupied_mut(&mut self) -> Option<&mut E> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    /// Turns an occupied slot into a tombstone and returns its entry.
    pub(crate) fn take(&mut self) -> Option<E> {
        match std::mem::replace(self, Slot::Deleted) {
            Slot::Occupied(entry) => Some(entry),
            other => {
                *self = other;
                None
            }
        }
    }
}

#[cfg(feature = "logging")]
impl<E> Slot<E> {
    pub(crate) fn log_landing(&self, index: usize) {
        if matches!(self, Slot::Deleted) {
            log::trace!("Reusing the tombstone at slot {}", index);
        }
    }
}

impl<E> Default for Slot<E> {
    fn default() -> Self {
        Slot::Empty
    }
}
