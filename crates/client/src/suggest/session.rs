//! Suggestion state machine for a single input field.

use super::MIN_QUERY_CHARS;

/// Tags one dispatched query. Responses carrying an older token are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Tags one debounce period. Only the latest ticket may fire a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Debouncing(DebounceTicket),
    Querying(RequestToken),
    Settled,
}

/// What the driver must do after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Edit {
    /// In-flight request superseded by this edit.
    pub cancel: Option<RequestToken>,

    /// Start a debounce period for this ticket.
    pub debounce: Option<DebounceTicket>,
}

/// A query the driver must send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Tag to hand back to [`SearchSession::resolve`].
    pub token: RequestToken,

    /// Text to search for.
    pub text: String,
}

/// How a query ended, cancellation aside.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<T> {
    /// The API answered; possibly with nothing.
    Found(Vec<T>),

    /// Transport or server failure.
    Failed,
}

/// Whether a response was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Stored `count` suggestions.
    Settled { count: usize },

    /// The response was stale and ignored.
    Discarded,
}

/// What the suggestion list should show.
#[derive(Debug, PartialEq)]
pub enum SuggestView<'a, T> {
    /// Nothing to show.
    Hidden,

    /// A query is in flight.
    Loading,

    /// The latest query matched nothing.
    NoResults,

    /// Matches for the current text.
    Suggestions(&'a [T]),
}

/// Suggestion state for one input field.
///
/// Stored suggestions always belong to the current text: every edit clears
/// them, and only the response to the latest query may store new ones.
#[derive(Debug, Clone)]
pub struct SearchSession<T> {
    text: String,
    phase: Phase,
    suggestions: Vec<T>,
    visible: bool,
    dismissed: bool,
    last_ticket: u64,
    last_token: u64,
}

impl<T> Default for SearchSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchSession<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: String::new(),
            phase: Phase::Idle,
            suggestions: Vec::new(),
            visible: false,
            dismissed: false,
            last_ticket: 0,
            last_token: 0,
        }
    }

    /// Current input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Suggestions stored for the current text.
    pub fn suggestions(&self) -> &[T] {
        &self.suggestions
    }

    /// A query is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Querying(_))
    }

    /// The input text changed.
    ///
    /// Any pending debounce is superseded and any in-flight request must be
    /// cancelled. Text under the character floor goes straight back to idle.
    pub fn edit(&mut self, text: impl Into<String>) -> Edit {
        self.text = text.into();
        self.suggestions.clear();
        self.visible = false;
        self.dismissed = false;

        let cancel = self.in_flight();

        if !meets_floor(&self.text) {
            self.phase = Phase::Idle;

            return Edit {
                cancel,
                debounce: None,
            };
        }

        self.last_ticket += 1;

        let ticket = DebounceTicket(self.last_ticket);

        self.phase = Phase::Debouncing(ticket);

        Edit {
            cancel,
            debounce: Some(ticket),
        }
    }

    /// The debounce period for `ticket` ran out without another edit.
    ///
    /// Returns the single query to send for the current text, or `None` when
    /// the ticket has been superseded.
    pub fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> Option<Query> {
        if self.phase != Phase::Debouncing(ticket) {
            return None;
        }

        self.last_token += 1;

        let token = RequestToken(self.last_token);

        self.phase = Phase::Querying(token);

        Some(Query {
            token,
            text: self.text.clone(),
        })
    }

    /// A query finished. Only the current in-flight query may settle; a
    /// failure settles with no suggestions.
    pub fn resolve(&mut self, token: RequestToken, outcome: QueryOutcome<T>) -> Resolution {
        if self.phase != Phase::Querying(token) {
            return Resolution::Discarded;
        }

        self.suggestions = match outcome {
            QueryOutcome::Found(results) => results,
            QueryOutcome::Failed => Vec::new(),
        };

        self.phase = Phase::Settled;
        self.visible = !self.dismissed && !self.text.is_empty();

        Resolution::Settled {
            count: self.suggestions.len(),
        }
    }

    /// A suggestion was picked: its text replaces the input and the list
    /// hides. This is not an edit, so no new query starts; anything pending
    /// is abandoned and the in-flight request, if any, is returned for
    /// cancellation.
    pub fn select(&mut self, text: impl Into<String>) -> Option<RequestToken> {
        let cancel = self.in_flight();

        self.text = text.into();
        self.phase = Phase::Idle;
        self.visible = false;

        cancel
    }

    /// The user clicked away. State is kept and an in-flight query may still
    /// settle, but the list stays hidden until [`focus`](Self::focus).
    pub fn dismiss(&mut self) {
        self.visible = false;
        self.dismissed = true;
    }

    /// The input regained focus.
    pub fn focus(&mut self) {
        self.dismissed = false;

        if !self.suggestions.is_empty() {
            self.visible = true;
        }
    }

    /// What the suggestion list should display now.
    pub fn view(&self) -> SuggestView<'_, T> {
        if self.is_loading() && !self.dismissed {
            return SuggestView::Loading;
        }

        if !self.visible {
            return SuggestView::Hidden;
        }

        if self.suggestions.is_empty() {
            SuggestView::NoResults
        } else {
            SuggestView::Suggestions(&self.suggestions)
        }
    }

    fn in_flight(&self) -> Option<RequestToken> {
        match self.phase {
            Phase::Querying(token) => Some(token),
            Phase::Idle | Phase::Debouncing(_) | Phase::Settled => None,
        }
    }
}

fn meets_floor(text: &str) -> bool {
    text.chars()
        .filter(|character| !character.is_whitespace())
        .nth(MIN_QUERY_CHARS - 1)
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queried(session: &mut SearchSession<&'static str>, text: &str) -> Query {
        let edit = session.edit(text);
        let ticket = edit.debounce.unwrap_or(DebounceTicket(0));

        session
            .debounce_elapsed(ticket)
            .unwrap_or_else(|| Query {
                token: RequestToken(0),
                text: String::new(),
            })
    }

    #[test]
    fn floor_counts_non_whitespace_characters() {
        assert!(!meets_floor(""));
        assert!(!meets_floor("l"));
        assert!(!meets_floor(" l  "));
        assert!(meets_floor("la"));
        assert!(meets_floor(" l a "));
    }

    #[test]
    fn short_text_never_schedules_a_query() {
        let mut session = SearchSession::<&str>::new();

        for text in ["", "l", "   ", " x "] {
            let edit = session.edit(text);

            assert_eq!(edit.debounce, None, "no debounce for {text:?}");
            assert_eq!(session.view(), SuggestView::Hidden);
        }
    }

    #[test]
    fn rapid_edits_issue_one_query_for_final_text() {
        let mut session = SearchSession::<&str>::new();

        let first = session.edit("la").debounce;
        let second = session.edit("lap").debounce;
        let third = session.edit("lapt").debounce;

        for stale in [first, second].into_iter().flatten() {
            assert_eq!(session.debounce_elapsed(stale), None);
        }

        let query = third.and_then(|ticket| session.debounce_elapsed(ticket));

        assert_eq!(query.map(|query| query.text), Some("lapt".to_string()));
    }

    #[test]
    fn ticket_fires_at_most_once() {
        let mut session = SearchSession::<&str>::new();

        let ticket = session.edit("lamp").debounce;

        assert!(ticket.and_then(|t| session.debounce_elapsed(t)).is_some());
        assert!(ticket.and_then(|t| session.debounce_elapsed(t)).is_none());
    }

    #[test]
    fn loading_while_query_in_flight() {
        let mut session = SearchSession::<&str>::new();

        queried(&mut session, "lamp");

        assert!(session.is_loading());
        assert_eq!(session.view(), SuggestView::Loading);
    }

    #[test]
    fn response_settles_and_shows_suggestions() {
        let mut session = SearchSession::new();
        let query = queried(&mut session, "lamp");

        let resolution = session.resolve(query.token, QueryOutcome::Found(vec!["Desk Lamp LED"]));

        assert_eq!(resolution, Resolution::Settled { count: 1 });
        assert_eq!(session.view(), SuggestView::Suggestions(&["Desk Lamp LED"][..]));
    }

    #[test]
    fn empty_response_shows_no_results() {
        let mut session = SearchSession::<&str>::new();
        let query = queried(&mut session, "zzznope");

        session.resolve(query.token, QueryOutcome::Found(vec![]));

        assert_eq!(session.view(), SuggestView::NoResults);
    }

    #[test]
    fn failure_settles_as_empty() {
        let mut session = SearchSession::<&str>::new();
        let query = queried(&mut session, "lamp");

        let resolution = session.resolve(query.token, QueryOutcome::Failed);

        assert_eq!(resolution, Resolution::Settled { count: 0 });
        assert!(!session.is_loading());
        assert_eq!(session.view(), SuggestView::NoResults);
    }

    #[test]
    fn edit_during_query_cancels_it() {
        let mut session = SearchSession::<&str>::new();
        let query = queried(&mut session, "la");

        let edit = session.edit("lap");

        assert_eq!(edit.cancel, Some(query.token));
        assert!(edit.debounce.is_some(), "new text should debounce");
    }

    #[test]
    fn superseded_response_is_discarded_even_if_late() {
        let mut session = SearchSession::new();
        let stale = queried(&mut session, "la");
        let current = queried(&mut session, "lap");

        assert_eq!(
            session.resolve(current.token, QueryOutcome::Found(vec!["Laptop Pro 15"])),
            Resolution::Settled { count: 1 }
        );
        assert_eq!(
            session.resolve(stale.token, QueryOutcome::Found(vec!["Floor Lamp", "Laptop Pro 15"])),
            Resolution::Discarded
        );
        assert_eq!(session.view(), SuggestView::Suggestions(&["Laptop Pro 15"][..]));
    }

    #[test]
    fn response_after_text_drops_below_floor_is_discarded() {
        let mut session = SearchSession::new();
        let query = queried(&mut session, "la");

        let edit = session.edit("l");

        assert_eq!(edit.cancel, Some(query.token));
        assert_eq!(
            session.resolve(query.token, QueryOutcome::Found(vec!["Floor Lamp"])),
            Resolution::Discarded
        );
        assert_eq!(session.view(), SuggestView::Hidden);
    }

    #[test]
    fn edit_hides_suggestions_for_previous_text() {
        let mut session = SearchSession::new();
        let query = queried(&mut session, "lamp");

        session.resolve(query.token, QueryOutcome::Found(vec!["Desk Lamp LED"]));
        let _edit = session.edit("lamps");

        assert!(session.suggestions().is_empty());
        assert_eq!(session.view(), SuggestView::Hidden);
    }

    #[test]
    fn select_copies_text_and_hides_without_new_query() {
        let mut session = SearchSession::new();
        let query = queried(&mut session, "smart");

        session.resolve(query.token, QueryOutcome::Found(vec!["Smartphone Max 20"]));

        let cancel = session.select("Smartphone Max 20");

        assert_eq!(cancel, None);
        assert_eq!(session.text(), "Smartphone Max 20");
        assert_eq!(session.view(), SuggestView::Hidden);
        assert!(!session.is_loading());
    }

    #[test]
    fn select_abandons_pending_debounce_and_query() {
        let mut session = SearchSession::<&str>::new();
        let query = queried(&mut session, "lap");

        assert_eq!(session.select("Laptop Pro 15"), Some(query.token));
        assert_eq!(
            session.resolve(query.token, QueryOutcome::Found(vec!["Laptop Pro 15"])),
            Resolution::Discarded
        );

        let ticket = session.edit("desk").debounce;

        session.select("Desk Lamp LED");

        assert!(ticket.and_then(|t| session.debounce_elapsed(t)).is_none());
    }

    #[test]
    fn dismiss_hides_but_keeps_suggestions_for_focus() {
        let mut session = SearchSession::new();
        let query = queried(&mut session, "lamp");

        session.resolve(query.token, QueryOutcome::Found(vec!["Desk Lamp LED"]));
        session.dismiss();

        assert_eq!(session.view(), SuggestView::Hidden);
        assert_eq!(session.suggestions(), &["Desk Lamp LED"]);

        session.focus();

        assert_eq!(session.view(), SuggestView::Suggestions(&["Desk Lamp LED"][..]));
    }

    #[test]
    fn dismissed_query_settles_hidden_until_focus() {
        let mut session = SearchSession::new();
        let query = queried(&mut session, "lamp");

        session.dismiss();

        assert_eq!(session.view(), SuggestView::Hidden);
        assert_eq!(
            session.resolve(query.token, QueryOutcome::Found(vec!["Desk Lamp LED"])),
            Resolution::Settled { count: 1 }
        );
        assert_eq!(session.view(), SuggestView::Hidden);

        session.focus();

        assert_eq!(session.view(), SuggestView::Suggestions(&["Desk Lamp LED"][..]));
    }

    #[test]
    fn focus_with_nothing_stored_stays_hidden() {
        let mut session = SearchSession::<&str>::new();

        session.focus();

        assert_eq!(session.view(), SuggestView::Hidden);
    }
}
