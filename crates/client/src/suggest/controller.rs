//! Async driver for a [`SearchSession`].

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, watch},
    task::JoinHandle,
    time,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::{api::CatalogApi, products::Product};

use super::session::{
    DebounceTicket, Query, QueryOutcome, RequestToken, Resolution, SearchSession, SuggestView,
};

/// Owned copy of [`SuggestView`] for publishing across tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SnapshotView {
    /// Nothing to show.
    #[default]
    Hidden,

    /// A query is in flight.
    Loading,

    /// The latest query matched nothing.
    NoResults,

    /// Matches for the current text.
    Suggestions(Vec<Product>),
}

/// Published state of the suggestion box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestSnapshot {
    /// Current input text.
    pub text: String,

    /// A query is in flight, even if the list itself is dismissed.
    pub loading: bool,

    /// What the list shows.
    pub view: SnapshotView,
}

impl SuggestSnapshot {
    fn of(session: &SearchSession<Product>) -> Self {
        let view = match session.view() {
            SuggestView::Hidden => SnapshotView::Hidden,
            SuggestView::Loading => SnapshotView::Loading,
            SuggestView::NoResults => SnapshotView::NoResults,
            SuggestView::Suggestions(products) => SnapshotView::Suggestions(products.to_vec()),
        };

        Self {
            text: session.text().to_string(),
            loading: session.is_loading(),
            view,
        }
    }
}

#[derive(Debug)]
struct InFlight {
    token: RequestToken,
    cancellation: CancellationToken,
}

#[derive(Debug, Default)]
struct DriverState {
    session: SearchSession<Product>,
    debounce: Option<JoinHandle<()>>,
    in_flight: Option<InFlight>,
}

impl DriverState {
    fn abort_debounce(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
    }

    fn cancel(&mut self, token: Option<RequestToken>) {
        let Some(token) = token else {
            return;
        };

        if let Some(in_flight) = self.in_flight.take_if(|in_flight| in_flight.token == token) {
            in_flight.cancellation.cancel();

            debug!(?token, "cancelled superseded suggestion query");
        }
    }
}

#[derive(Debug)]
struct Shared<A> {
    api: A,
    debounce: Duration,
    state: Mutex<DriverState>,
    snapshots: watch::Sender<SuggestSnapshot>,
}

impl<A> Shared<A> {
    fn publish(&self, state: &DriverState) {
        self.snapshots
            .send_replace(SuggestSnapshot::of(&state.session));
    }
}

/// Drives one suggestion box: debounces edits, sends at most one query at a
/// time, cancels superseded queries and publishes every state change.
#[derive(Debug)]
pub struct SuggestController<A> {
    shared: Arc<Shared<A>>,
}

impl<A> Clone for SuggestController<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A: CatalogApi + 'static> SuggestController<A> {
    pub fn new(api: A, debounce: Duration) -> Self {
        let (snapshots, _receiver) = watch::channel(SuggestSnapshot::default());

        Self {
            shared: Arc::new(Shared {
                api,
                debounce,
                state: Mutex::new(DriverState::default()),
                snapshots,
            }),
        }
    }

    /// Receive every published [`SuggestSnapshot`].
    pub fn subscribe(&self) -> watch::Receiver<SuggestSnapshot> {
        self.shared.snapshots.subscribe()
    }

    /// The most recently published state.
    pub fn snapshot(&self) -> SuggestSnapshot {
        self.shared.snapshots.borrow().clone()
    }

    /// The input text changed.
    pub async fn edit(&self, text: impl Into<String>) {
        let mut state = self.shared.state.lock().await;

        state.abort_debounce();

        let edit = state.session.edit(text);

        state.cancel(edit.cancel);

        if let Some(ticket) = edit.debounce {
            let shared = Arc::clone(&self.shared);

            state.debounce = Some(tokio::spawn(async move {
                time::sleep(shared.debounce).await;

                debounce_elapsed(shared, ticket).await;
            }));
        }

        self.shared.publish(&state);
    }

    /// Pick the visible suggestion at `index`, returning its name.
    pub async fn select(&self, index: usize) -> Option<String> {
        let mut state = self.shared.state.lock().await;

        let SuggestView::Suggestions(products) = state.session.view() else {
            return None;
        };

        let name = products.get(index)?.name.clone();

        state.abort_debounce();

        let cancel = state.session.select(name.clone());

        state.cancel(cancel);

        self.shared.publish(&state);

        Some(name)
    }

    /// Hide the list without dropping state.
    pub async fn dismiss(&self) {
        let mut state = self.shared.state.lock().await;

        state.session.dismiss();

        self.shared.publish(&state);
    }

    /// Re-show stored suggestions, if any.
    pub async fn focus(&self) {
        let mut state = self.shared.state.lock().await;

        state.session.focus();

        self.shared.publish(&state);
    }
}

async fn debounce_elapsed<A: CatalogApi>(shared: Arc<Shared<A>>, ticket: DebounceTicket) {
    let mut state = shared.state.lock().await;

    let Some(query) = state.session.debounce_elapsed(ticket) else {
        return;
    };

    // The timer has fired; later edits cancel the query instead.
    state.debounce = None;

    let cancellation = CancellationToken::new();

    state.in_flight = Some(InFlight {
        token: query.token,
        cancellation: cancellation.clone(),
    });

    shared.publish(&state);

    drop(state);

    run_query(&shared, query, &cancellation).await;
}

async fn run_query<A: CatalogApi>(
    shared: &Shared<A>,
    query: Query,
    cancellation: &CancellationToken,
) {
    let outcome = tokio::select! {
        biased;

        () = cancellation.cancelled() => {
            debug!(text = %query.text, "suggestion query cancelled before response");

            return;
        }
        result = shared.api.search_products(&query.text) => match result {
            Ok(products) => QueryOutcome::Found(products),
            Err(query_error) => {
                error!(text = %query.text, "suggestion query failed: {query_error}");

                QueryOutcome::Failed
            }
        },
    };

    let mut state = shared.state.lock().await;

    if state
        .in_flight
        .as_ref()
        .is_some_and(|in_flight| in_flight.token == query.token)
    {
        state.in_flight = None;
    }

    match state.session.resolve(query.token, outcome) {
        Resolution::Settled { count } => debug!(text = %query.text, count, "suggestions settled"),
        Resolution::Discarded => debug!(text = %query.text, "stale suggestions discarded"),
    }

    shared.publish(&state);
}
