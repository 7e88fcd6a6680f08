use crate::models::event::EventId;

/// Delete confirmation: `Idle → ConfirmPending(id) → {Deleted | Idle}`.
///
/// At most one deletion is pending; a new request replaces the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingDelete {
    #[default]
    Idle,
    ConfirmPending(EventId),
}

impl PendingDelete {
    pub fn request(&mut self, id: EventId) {
        *self = PendingDelete::ConfirmPending(id);
    }

    pub fn cancel(&mut self) {
        *self = PendingDelete::Idle;
    }

    /// Leave the pending state, handing back the id to delete (if any).
    pub fn take(&mut self) -> Option<EventId> {
        match std::mem::take(self) {
            PendingDelete::ConfirmPending(id) => Some(id),
            PendingDelete::Idle => None,
        }
    }
}
