//! Search-as-you-type suggestions.
//!
//! [`SearchSession`] is the synchronous state machine for one input field; it
//! decides when a query may be sent and which responses may be shown.
//! [`SuggestController`] drives a session with real timers and requests.

mod controller;
mod session;

pub use controller::{SnapshotView, SuggestController, SuggestSnapshot};
pub use session::{
    DebounceTicket, Edit, Query, QueryOutcome, RequestToken, Resolution, SearchSession,
    SuggestView,
};

/// Inputs with fewer non-whitespace characters never reach the network.
pub const MIN_QUERY_CHARS: usize = 2;

/// Default quiet period after the last edit before a query is sent.
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;
