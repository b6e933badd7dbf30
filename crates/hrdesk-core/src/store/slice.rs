// ── Request-lifecycle slices ──
//
// Each domain slice pairs a cached collection with lifecycle flags
// (`loading`, `error`, `success`, `message`). An operation moves its slice
// through `Pending` and then exactly one of `Fulfilled` or `Rejected`.
// State lives behind a `watch` channel; readers take `Arc` snapshots.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::record::{Child, Record};
use crate::error::CoreError;
use crate::stream::SliceStream;

// ── Lifecycle flags ──────────────────────────────────────────────────

/// Bookkeeping shared by every slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lifecycle {
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
    pub message: Option<String>,
}

impl Lifecycle {
    fn pending(&mut self) {
        self.loading = true;
        self.error = None;
        self.success = false;
        self.message = None;
    }

    fn fulfilled(&mut self, message: Option<String>) {
        self.loading = false;
        self.error = None;
        self.success = true;
        self.message = message;
    }

    fn rejected(&mut self, error: String) {
        self.loading = false;
        self.error = Some(error);
        self.success = false;
    }
}

/// One step of an operation's lifecycle.
#[derive(Debug, Clone)]
pub enum Phase<M> {
    Pending,
    Fulfilled(M),
    Rejected(String),
}

/// State shape owned by a slice.
pub trait SliceState: Clone + Default + Send + Sync + 'static {
    type Mutation: Send;

    fn lifecycle(&self) -> &Lifecycle;

    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    /// Apply a fulfilled mutation, returning the success message, if any.
    fn apply(&mut self, mutation: Self::Mutation) -> Option<String>;
}

/// The reducer: apply one lifecycle phase to a state.
pub fn reduce<S: SliceState>(state: &mut S, phase: Phase<S::Mutation>) {
    match phase {
        Phase::Pending => state.lifecycle_mut().pending(),
        Phase::Fulfilled(mutation) => {
            let message = state.apply(mutation);
            state.lifecycle_mut().fulfilled(message);
        }
        Phase::Rejected(error) => state.lifecycle_mut().rejected(error),
    }
}

// ── Flat collections ─────────────────────────────────────────────────

/// Changes a fulfilled operation makes to a [`ListState`].
#[derive(Debug, Clone)]
pub enum ListMutation<T> {
    /// Replace the whole collection (fetch).
    Replace(Vec<T>),
    /// Append a created entity; an entity with the same key is replaced.
    Insert(T),
    /// Replace the entity with the same key. No-op when absent.
    Update(T),
    /// Drop the entity with this key.
    Remove(String),
    /// Set the selected entity (single fetch).
    Select(T),
    /// Success with no data change.
    Keep(Option<String>),
}

/// An ordered collection plus an optional selected entity.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub selected: Option<T>,
    pub lifecycle: Lifecycle,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            lifecycle: Lifecycle::default(),
        }
    }
}

impl<T: Record> ListState<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Record> SliceState for ListState<T> {
    type Mutation = ListMutation<T>;

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn apply(&mut self, mutation: ListMutation<T>) -> Option<String> {
        match mutation {
            ListMutation::Replace(items) => {
                self.items = items;
                None
            }
            ListMutation::Insert(item) => {
                insert(&mut self.items, item);
                Some(format!("{} created", T::KIND))
            }
            ListMutation::Update(item) => {
                if self.selected.as_ref().is_some_and(|s| s.key() == item.key()) {
                    self.selected = Some(item.clone());
                }
                update(&mut self.items, item);
                Some(format!("{} updated", T::KIND))
            }
            ListMutation::Remove(key) => {
                if self.selected.as_ref().is_some_and(|s| s.key() == key) {
                    self.selected = None;
                }
                self.items.retain(|item| item.key() != key);
                Some(format!("{} deleted", T::KIND))
            }
            ListMutation::Select(item) => {
                self.selected = Some(item);
                None
            }
            ListMutation::Keep(message) => message,
        }
    }
}

fn insert<T: Record>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.key() == item.key()) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

fn update<T: Record>(items: &mut [T], item: T) {
    if let Some(existing) = items.iter_mut().find(|existing| existing.key() == item.key()) {
        *existing = item;
    }
}

// ── Collections grouped by parent lead ───────────────────────────────

#[derive(Debug, Clone)]
pub enum GroupMutation<T> {
    Replace { parent: String, items: Vec<T> },
    Insert(T),
    Update(T),
    Remove { parent: String, key: String },
}

/// Child entities (activities, notes) keyed by their parent's ID.
#[derive(Debug, Clone)]
pub struct GroupedState<T> {
    pub groups: BTreeMap<String, Vec<T>>,
    pub lifecycle: Lifecycle,
}

impl<T> Default for GroupedState<T> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
            lifecycle: Lifecycle::default(),
        }
    }
}

impl<T: Child> GroupedState<T> {
    /// Entities under one parent; empty when never fetched.
    pub fn children(&self, parent: &str) -> &[T] {
        self.groups.get(parent).map_or(&[][..], Vec::as_slice)
    }
}

impl<T: Child> SliceState for GroupedState<T> {
    type Mutation = GroupMutation<T>;

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn apply(&mut self, mutation: GroupMutation<T>) -> Option<String> {
        match mutation {
            GroupMutation::Replace { parent, items } => {
                self.groups.insert(parent, items);
                None
            }
            GroupMutation::Insert(item) => {
                let group = self.groups.entry(item.parent_key().to_owned()).or_default();
                insert(group, item);
                Some(format!("{} created", T::KIND))
            }
            GroupMutation::Update(item) => {
                if let Some(group) = self.groups.get_mut(item.parent_key()) {
                    update(group, item);
                }
                Some(format!("{} updated", T::KIND))
            }
            GroupMutation::Remove { parent, key } => {
                if let Some(group) = self.groups.get_mut(&parent) {
                    group.retain(|item| item.key() != key);
                }
                Some(format!("{} deleted", T::KIND))
            }
        }
    }
}

// ── Single values ────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum ValueMutation<T> {
    Set(T),
}

/// A single fetched value (attendance summary, dashboard).
#[derive(Debug, Clone)]
pub struct ValueState<T> {
    pub value: Option<T>,
    pub lifecycle: Lifecycle,
}

impl<T> Default for ValueState<T> {
    fn default() -> Self {
        Self {
            value: None,
            lifecycle: Lifecycle::default(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> SliceState for ValueState<T> {
    type Mutation = ValueMutation<T>;

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn apply(&mut self, mutation: ValueMutation<T>) -> Option<String> {
        let ValueMutation::Set(value) = mutation;
        self.value = Some(value);
        None
    }
}

// ── Slice ────────────────────────────────────────────────────────────

/// A named, observable state cell driven by the reducer.
pub struct Slice<S: SliceState> {
    name: &'static str,
    state: watch::Sender<Arc<S>>,
}

impl<S: SliceState> Slice<S> {
    pub(crate) fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(Arc::new(S::default()));
        Self { name, state }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current state (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<S> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> SliceStream<S> {
        SliceStream::new(self.state.subscribe())
    }

    /// Run the reducer for one phase and notify subscribers.
    pub fn dispatch(&self, phase: Phase<S::Mutation>) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.state
            .send_modify(|state| reduce(Arc::make_mut(state), phase));
    }

    /// Drive one operation through the lifecycle.
    ///
    /// Dispatches `Pending`, awaits `op`, then dispatches `Fulfilled` with
    /// the mutation built from the result, or `Rejected` with the error's
    /// display message. The typed result is handed back to the caller.
    pub(crate) async fn track<R, E, Fut, F>(
        &self,
        operation: &'static str,
        op: Fut,
        to_mutation: F,
    ) -> Result<R, CoreError>
    where
        Fut: Future<Output = Result<R, E>>,
        E: Into<CoreError>,
        F: FnOnce(&R) -> S::Mutation,
    {
        debug!(slice = self.name, operation, "pending");
        self.dispatch(Phase::Pending);

        match op.await.map_err(Into::into) {
            Ok(value) => {
                self.dispatch(Phase::Fulfilled(to_mutation(&value)));
                debug!(slice = self.name, operation, "fulfilled");
                Ok(value)
            }
            Err(err) => {
                let message = err.display_message();
                warn!(slice = self.name, operation, error = %message, "rejected");
                self.dispatch(Phase::Rejected(message));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hrdesk_api::models::{Department, Note};
    use pretty_assertions::assert_eq;

    use super::*;

    fn dept(id: &str, name: &str) -> Department {
        Department {
            department_id: id.into(),
            name: name.into(),
            description: None,
            company_id: Some("c1".into()),
            head_employee_id: None,
            is_active: Some(true),
        }
    }

    fn note(id: &str, lead: &str, content: &str) -> Note {
        Note {
            note_id: id.into(),
            lead_id: lead.into(),
            content: content.into(),
            created_by: None,
            created_at: None,
        }
    }

    #[test]
    fn pending_clears_previous_outcome() {
        let mut state = ListState::<Department>::default();
        reduce(&mut state, Phase::Rejected("boom".into()));
        reduce(&mut state, Phase::Pending);
        assert_eq!(
            state.lifecycle,
            Lifecycle {
                loading: true,
                error: None,
                success: false,
                message: None,
            }
        );
    }

    #[test]
    fn fulfilled_sets_success_and_message() {
        let mut state = ListState::default();
        reduce(&mut state, Phase::Pending);
        reduce(
            &mut state,
            Phase::Fulfilled(ListMutation::Insert(dept("d1", "Sales"))),
        );
        assert!(!state.lifecycle.loading);
        assert!(state.lifecycle.success);
        assert_eq!(state.lifecycle.message.as_deref(), Some("Department created"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn rejected_keeps_items() {
        let mut state = ListState::default();
        reduce(
            &mut state,
            Phase::Fulfilled(ListMutation::Replace(vec![dept("d1", "Sales")])),
        );
        reduce(&mut state, Phase::Pending);
        reduce(&mut state, Phase::Rejected("Name is required".into()));
        assert_eq!(state.lifecycle.error.as_deref(), Some("Name is required"));
        assert!(!state.lifecycle.success);
        assert!(!state.lifecycle.loading);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn update_of_missing_key_is_a_noop() {
        let mut state = ListState::default();
        state.apply(ListMutation::Replace(vec![dept("d1", "Sales")]));
        state.apply(ListMutation::Update(dept("d9", "Ghost")));
        assert_eq!(state.items, vec![dept("d1", "Sales")]);
    }

    #[test]
    fn update_refreshes_selection() {
        let mut state = ListState::default();
        state.apply(ListMutation::Replace(vec![dept("d1", "Sales")]));
        state.apply(ListMutation::Select(dept("d1", "Sales")));
        state.apply(ListMutation::Update(dept("d1", "Field Sales")));
        assert_eq!(state.selected.unwrap().name, "Field Sales");
        assert_eq!(state.items[0].name, "Field Sales");
    }

    #[test]
    fn insert_with_existing_key_replaces() {
        let mut state = ListState::default();
        state.apply(ListMutation::Insert(dept("d1", "Sales")));
        state.apply(ListMutation::Insert(dept("d1", "Sales EMEA")));
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("d1").unwrap().name, "Sales EMEA");
    }

    #[test]
    fn removing_selected_entity_clears_selection() {
        let mut state = ListState::default();
        state.apply(ListMutation::Replace(vec![dept("d1", "Sales"), dept("d2", "Ops")]));
        state.apply(ListMutation::Select(dept("d2", "Ops")));
        let message = state.apply(ListMutation::Remove("d2".into()));
        assert_eq!(message.as_deref(), Some("Department deleted"));
        assert!(state.selected.is_none());
        assert_eq!(state.items, vec![dept("d1", "Sales")]);
    }

    #[test]
    fn grouped_state_keeps_parents_apart() {
        let mut state = GroupedState::default();
        state.apply(GroupMutation::Replace {
            parent: "L1".into(),
            items: vec![note("n1", "L1", "called")],
        });
        state.apply(GroupMutation::Insert(note("n2", "L2", "emailed")));
        state.apply(GroupMutation::Remove {
            parent: "L1".into(),
            key: "n1".into(),
        });
        assert!(state.children("L1").is_empty());
        assert_eq!(state.children("L2").len(), 1);
        assert!(state.children("L3").is_empty());
    }

    #[tokio::test]
    async fn track_reports_rejection_to_subscribers() {
        let slice: Slice<ListState<Department>> = Slice::new("departments");
        let mut stream = slice.subscribe();

        let result = slice
            .track(
                "fetch_departments",
                async {
                    Err::<Vec<Department>, _>(CoreError::Api {
                        message: "Request failed with status code 500".into(),
                        status: Some(500),
                    })
                },
                |items| ListMutation::Replace(items.clone()),
            )
            .await;

        assert!(result.is_err());
        let state = stream.changed().await.unwrap();
        assert_eq!(
            state.lifecycle.error.as_deref(),
            Some("Request failed with status code 500")
        );
    }
}
