//! The flashcard collection page.
//!
//! Owns the current [`CollectionState`] snapshot and performs the effects
//! that reducer transitions ask for. The lock around the snapshot is only
//! held for one reducer step, never across an `.await`.
//!
//! Order writes run on the Tokio runtime the page was created in, or the
//! one given to [`FlashcardsPage::with_runtime`], so drops may come from
//! threads outside any runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use flashcard_core::{
    Action, CollectionState, Effect, Flashcard, FlashcardPatch, NewFlashcard, SortKey,
    StatusFilter, SwapPlan,
};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::launcher::Launcher;
use crate::store::{StoreClient, StoreError};

/// What a dispatched action produced, after effects were carried out.
#[derive(Debug, Default)]
struct Outcome {
    notices: Vec<String>,
    swap: Option<JoinHandle<Result<(), StoreError>>>,
    opened: Option<String>,
    accepts_drop: bool,
}

pub struct FlashcardsPage {
    store: StoreClient,
    launcher: Arc<dyn Launcher>,
    runtime: Option<Handle>,
    state: Mutex<CollectionState>,
}

impl FlashcardsPage {
    pub fn new(store: StoreClient, launcher: Arc<dyn Launcher>) -> Self {
        Self {
            store,
            launcher,
            runtime: Handle::try_current().ok(),
            state: Mutex::new(CollectionState::new()),
        }
    }

    /// Run order writes on `runtime`.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> CollectionState {
        self.lock().clone()
    }

    /// Filtered and sorted cards for rendering.
    pub fn visible(&self) -> Vec<Flashcard> {
        self.lock().visible()
    }

    /// Fetch every card once. On failure the list is left as it was.
    pub async fn load(&self) -> Result<usize, StoreError> {
        match self.store.list().await {
            Ok(cards) => {
                let count = cards.len();
                tracing::info!("Loaded {} flashcards", count);
                self.dispatch(Action::Loaded(cards));
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Error fetching flashcards: {}", e);
                Err(e)
            }
        }
    }

    pub fn set_search(&self, search: impl Into<String>) {
        self.dispatch(Action::SetSearch(search.into()));
    }

    pub fn set_status(&self, status: StatusFilter) {
        self.dispatch(Action::SetStatus(status));
    }

    pub fn set_sort(&self, sort: SortKey) {
        self.dispatch(Action::SetSort(sort));
    }

    /// Pick up a card. Returns the notice to show when dragging is refused.
    pub fn drag_start(&self, id: i64) -> Option<String> {
        self.dispatch(Action::DragStart(id)).notices.into_iter().next()
    }

    /// Whether the hovered card accepts a drop.
    pub fn drag_over(&self) -> bool {
        self.dispatch(Action::DragOver).accepts_drop
    }

    /// Drop the dragged card on `target_id`.
    ///
    /// The swap is visible in the snapshot as soon as this returns. The
    /// remote writes run on a spawned task whose handle is returned; it can
    /// be dropped without cancelling the writes. `None` means the drop was
    /// aborted and nothing changed, which includes having no runtime to run
    /// the writes on.
    pub fn drop_on(&self, target_id: i64) -> Option<JoinHandle<Result<(), StoreError>>> {
        let dragging = self.lock().drag().source_id().is_some();
        if dragging && self.runtime().is_none() {
            tracing::error!(
                "No Tokio runtime to save the new order, drop on {} ignored",
                target_id
            );
            return None;
        }
        self.dispatch(Action::Drop(target_id)).swap
    }

    /// Toggle a card in the selection. Returns whether it is now selected.
    pub fn toggle_select(&self, id: i64) -> bool {
        self.dispatch(Action::ToggleSelect(id));
        self.lock().selection().contains(id)
    }

    pub fn can_share(&self) -> bool {
        self.lock().can_share()
    }

    /// Share the selected visible cards by email.
    ///
    /// Returns the mail target that was handed to the launcher. The
    /// selection is cleared even if the launcher fails.
    pub fn share(&self) -> Option<String> {
        self.dispatch(Action::Share).opened
    }

    pub fn card_added(&self, card: Flashcard) {
        self.dispatch(Action::CardAdded(card));
    }

    pub fn card_updated(&self, card: Flashcard) {
        self.dispatch(Action::CardUpdated(card));
    }

    pub fn card_deleted(&self, id: i64) {
        self.dispatch(Action::CardDeleted(id));
    }

    /// Create a card remotely, then append it locally.
    pub async fn add_card(&self, card: &NewFlashcard) -> Result<Flashcard, StoreError> {
        let created = self.store.create(card).await?;
        self.card_added(created.clone());
        Ok(created)
    }

    /// Update a card remotely, then replace it locally.
    pub async fn edit_card(&self, id: i64, patch: &FlashcardPatch) -> Result<Flashcard, StoreError> {
        let updated = self.store.update(id, patch).await?;
        self.card_updated(updated.clone());
        Ok(updated)
    }

    /// Delete a card remotely, then drop it locally.
    pub async fn delete_card(&self, id: i64) -> Result<(), StoreError> {
        self.store.delete(id).await?;
        self.card_deleted(id);
        Ok(())
    }

    // === Private methods ===

    fn runtime(&self) -> Option<Handle> {
        self.runtime.clone().or_else(|| Handle::try_current().ok())
    }

    fn lock(&self) -> MutexGuard<'_, CollectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, action: Action) -> Outcome {
        let transition = {
            let mut state = self.lock();
            let transition = state.reduce(action);
            *state = transition.state.clone();
            transition
        };

        if let Some(error) = &transition.error {
            tracing::error!("Flashcard interaction aborted: {}", error);
        }

        let mut outcome = Outcome {
            accepts_drop: transition.accepts_drop,
            ..Outcome::default()
        };

        for effect in transition.effects {
            match effect {
                Effect::Notify(message) => {
                    tracing::warn!("{}", message);
                    outcome.notices.push(message);
                }
                Effect::PersistSwap(plan) => match self.runtime() {
                    Some(runtime) => outcome.swap = Some(self.spawn_swap(&runtime, plan)),
                    None => tracing::error!(?plan, "No Tokio runtime, order swap not saved"),
                },
                Effect::OpenMail(target) => {
                    if let Err(e) = self.launcher.open(&target) {
                        tracing::error!("Failed to open mail client: {}", e);
                    }
                    outcome.opened = Some(target);
                }
            }
        }

        outcome
    }

    fn spawn_swap(&self, runtime: &Handle, plan: SwapPlan) -> JoinHandle<Result<(), StoreError>> {
        let store = self.store.clone();
        runtime.spawn(async move {
            let result = store.persist_swap(&plan).await;
            match &result {
                Ok(()) => tracing::debug!(?plan, "Persisted personal order swap"),
                Err(e) => tracing::error!("Error updating flashcards: {}", e),
            }
            result
        })
    }
}
