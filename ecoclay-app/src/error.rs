use claystore::{StorageError, StoreError};

/// Nothing here is fatal: every variant is scoped to the user action that
/// triggered it, and already-persisted unrelated records are never touched.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no user is signed in")]
    NotSignedIn,

    #[error("{0:?} is not a usable email address")]
    InvalidEmail(String),

    #[error("no event with id {0}")]
    UnknownEvent(String),

    #[error("already joined event {event_id}")]
    AlreadyJoined { event_id: String },

    #[error("event {event_id} is full ({max_participants} participants)")]
    EventFull {
        event_id: String,
        max_participants: u32,
    },

    #[error("event {event_id} is not open for joining")]
    NotJoinable { event_id: String },

    #[error("event {event_id} is not fundraising")]
    NotFundraising { event_id: String },

    #[error("donation amount must be positive, got {0}")]
    InvalidAmount(f64),

    /// The donation record was written but updating the event's received
    /// total failed, so the donation was rolled back and the ledger is
    /// unchanged.
    #[error("donation rolled back: updating the event total failed: {source}")]
    SettlementRolledBack {
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
