// TUI application state
//
// App is the controller for one session: it owns the fact list, the loading
// flag, the current category and the form toggle. Store calls are spawned
// onto the runtime and report back as StoreEvents, which `apply` folds into
// state. Rendering only reads from here.

use super::components::{CategoryFilter, FactForm, FactList, Toast};
use super::modal::{Modal, LOAD_ERROR_MESSAGE};
use super::theme::Theme;
use crate::config::Config;
use crate::events::StoreEvent;
use crate::facts::{CategorySelection, Fact, FactId, VoteKind};
use crate::logging::LogBuffer;
use crate::store::{FactQuery, FactStore};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Categories,
    #[default]
    Facts,
    Form,
}

pub struct App {
    store: Arc<dyn FactStore>,
    events_tx: mpsc::Sender<StoreEvent>,
    fetch_limit: usize,

    /// Facts currently displayed, in display order
    pub facts: Vec<Fact>,

    /// A list query is in flight
    pub is_loading: bool,

    /// Active category filter
    pub current_category: CategorySelection,

    /// Whether the submission form is open
    pub show_form: bool,

    pub form: FactForm,

    /// Facts with a vote in flight
    pub updating: HashSet<FactId>,

    pub focus: Focus,
    /// The category sidebar fit on the last frame
    sidebar_visible: bool,
    pub category_filter: CategoryFilter,
    pub fact_list: FactList,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,

    pub theme: Theme,
    pub log_buffer: LogBuffer,
    pub should_quit: bool,

    animation_frame: usize,
}

impl App {
    pub fn with_config(
        store: Arc<dyn FactStore>,
        events_tx: mpsc::Sender<StoreEvent>,
        config: &Config,
        log_buffer: LogBuffer,
    ) -> Self {
        Self {
            store,
            events_tx,
            fetch_limit: config.fetch_limit,
            facts: Vec::new(),
            is_loading: false,
            current_category: CategorySelection::All,
            show_form: false,
            form: FactForm::new(),
            updating: HashSet::new(),
            focus: Focus::default(),
            sidebar_visible: true,
            category_filter: CategoryFilter::new(),
            fact_list: FactList::new(),
            modal: None,
            toast: None,
            theme: Theme::from_name(&config.theme),
            log_buffer,
            should_quit: false,
            animation_frame: 0,
        }
    }

    /// Run a store call in the background and deliver its event to the UI loop
    fn spawn_store_call<F, Fut>(&self, call: F)
    where
        F: FnOnce(Arc<dyn FactStore>) -> Fut,
        Fut: Future<Output = StoreEvent> + Send + 'static,
    {
        let fut = call(Arc::clone(&self.store));
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = fut.await;
            // Receiver gone means the UI is shutting down
            let _ = tx.send(event).await;
        });
    }

    /// Fetch the list for the current category; the result replaces the list
    pub fn load_facts(&mut self) {
        self.is_loading = true;
        let selection = self.current_category;
        let query = FactQuery::new(selection, self.fetch_limit);
        tracing::debug!("Loading facts for {}", selection);

        self.spawn_store_call(move |store| async move {
            StoreEvent::FactsLoaded {
                selection,
                result: store.select(query).await,
            }
        });
    }

    /// Switch the category filter; reloads only when it actually changes
    pub fn set_category(&mut self, selection: CategorySelection) {
        if selection == self.current_category {
            return;
        }
        self.current_category = selection;
        self.load_facts();
    }

    pub fn toggle_form(&mut self) {
        if self.show_form {
            self.close_form();
        } else {
            self.show_form = true;
            self.focus = Focus::Form;
        }
    }

    fn close_form(&mut self) {
        self.show_form = false;
        if self.focus == Focus::Form {
            self.focus = Focus::Facts;
        }
    }

    /// Validate the form and post it. Invalid input never reaches the store.
    pub fn submit_form(&mut self) {
        if self.form.uploading {
            return;
        }
        let new_fact = match self.form.validate() {
            Ok(fact) => fact,
            Err(e) => {
                tracing::debug!("Form not submitted: {}", e);
                self.show_toast(format!("✗ {}", e));
                return;
            }
        };

        self.form.uploading = true;
        tracing::info!("Posting new fact in {}", new_fact.category);
        self.spawn_store_call(move |store| async move {
            StoreEvent::FactInserted {
                result: store.insert(new_fact).await,
            }
        });
    }

    /// Vote on the selected fact
    pub fn vote_selected(&mut self, kind: VoteKind) {
        let Some(fact) = self.selected_fact() else {
            return;
        };
        let id = fact.id;
        self.vote(id, kind);
    }

    /// Increment one counter on a fact, based on the value held locally.
    /// Ignored while a vote on the same fact is in flight.
    pub fn vote(&mut self, id: FactId, kind: VoteKind) {
        if self.updating.contains(&id) {
            return;
        }
        let Some(fact) = self.facts.iter().find(|f| f.id == id) else {
            return;
        };
        let patch = fact.vote_patch(kind);
        self.updating.insert(id);
        tracing::debug!("Voting {} on fact {}", kind.column(), id);

        self.spawn_store_call(move |store| async move {
            StoreEvent::FactUpdated {
                id,
                result: store.update(id, patch).await,
            }
        });
    }

    /// Fold a completed store call into state
    pub fn apply(&mut self, event: StoreEvent) {
        tracing::trace!(
            kind = event.kind(),
            failed = event.error().is_some(),
            "Applying store event"
        );

        match event {
            StoreEvent::FactsLoaded { selection, result } => {
                self.is_loading = false;
                match result {
                    Ok(facts) => {
                        tracing::info!("Loaded {} facts for {}", facts.len(), selection);
                        self.facts = facts;
                        self.fact_list.clamp(self.facts.len());
                    }
                    Err(e) => {
                        tracing::error!("Failed to load facts for {}: {}", selection, e);
                        self.modal = Some(Modal::alert(LOAD_ERROR_MESSAGE));
                    }
                }
            }
            StoreEvent::FactInserted { result } => {
                match result {
                    Ok(fact) => {
                        tracing::info!("Posted fact {}", fact.id);
                        self.facts.insert(0, fact);
                        self.fact_list.select_first(self.facts.len());
                    }
                    Err(e) => {
                        tracing::warn!("Failed to post fact: {}", e);
                        self.show_toast("✗ Could not post fact");
                    }
                }
                self.form.uploading = false;
                self.form.clear();
                self.close_form();
            }
            StoreEvent::FactUpdated { id, result } => {
                self.updating.remove(&id);
                match result {
                    Ok(updated) => {
                        for slot in self.facts.iter_mut().filter(|f| f.id == id) {
                            *slot = updated.clone();
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Vote on fact {} failed: {}", id, e);
                        self.show_toast("✗ Vote not saved");
                    }
                }
            }
        }
    }

    pub fn selected_fact(&self) -> Option<&Fact> {
        self.fact_list
            .selected()
            .and_then(|idx| self.facts.get(idx))
    }

    /// Record whether the sidebar is on screen; a hidden sidebar cannot keep focus
    pub fn set_sidebar_visible(&mut self, visible: bool) {
        self.sidebar_visible = visible;
        if !visible && self.focus == Focus::Categories {
            self.focus = Focus::Facts;
            self.fact_list.clamp(self.facts.len());
        }
    }

    /// Cycle focus between sidebar (when shown), list and (when open) form
    pub fn focus_next(&mut self) {
        let after_list = if self.show_form {
            Focus::Form
        } else if self.sidebar_visible {
            Focus::Categories
        } else {
            Focus::Facts
        };
        self.focus = match self.focus {
            Focus::Categories => Focus::Facts,
            Focus::Facts => after_list,
            Focus::Form if self.sidebar_visible => Focus::Categories,
            Focus::Form => Focus::Facts,
        };
        if self.focus == Focus::Facts {
            self.fact_list.clamp(self.facts.len());
        }
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Categories => self.category_filter.move_up(),
            Focus::Facts => self.fact_list.move_up(self.facts.len()),
            Focus::Form => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Categories => self.category_filter.move_down(),
            Focus::Facts => self.fact_list.move_down(self.facts.len()),
            Focus::Form => {}
        }
    }

    /// Apply the sidebar entry under the cursor
    pub fn choose_highlighted_category(&mut self) {
        let selection = self.category_filter.highlighted();
        self.set_category(selection);
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Advance animations and expire the toast
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{sample_fact, Category, VotePatch};
    use crate::store::memory::{MemoryFactStore, StoreCall};

    fn setup(rows: Vec<Fact>) -> (App, Arc<MemoryFactStore>, mpsc::Receiver<StoreEvent>) {
        let store = Arc::new(MemoryFactStore::with_facts(rows));
        let (tx, rx) = mpsc::channel(16);
        let app = App::with_config(
            store.clone(),
            tx,
            &Config::default(),
            LogBuffer::new(),
        );
        (app, store, rx)
    }

    async fn settle(app: &mut App, rx: &mut mpsc::Receiver<StoreEvent>) {
        let event = rx.recv().await.expect("store event");
        app.apply(event);
    }

    fn fill_form(app: &mut App, text: &str, source: &str, category: &str) {
        app.toggle_form();
        app.form.text = text.to_string();
        app.form.source = source.to_string();
        app.form.category = category.to_string();
    }

    #[tokio::test]
    async fn initial_load_selects_all_and_replaces_list() {
        let (mut app, store, mut rx) = setup(vec![
            sample_fact(1, "alpha", "science"),
            sample_fact(2, "beta", "history"),
        ]);

        app.load_facts();
        assert!(app.is_loading);
        settle(&mut app, &mut rx).await;

        assert!(!app.is_loading);
        let texts: Vec<_> = app.facts.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["beta", "alpha"]);
        assert_eq!(
            store.calls(),
            vec![StoreCall::Select(FactQuery::new(CategorySelection::All, 100))]
        );
    }

    #[tokio::test]
    async fn switching_category_issues_one_filtered_select() {
        let (mut app, store, mut rx) = setup(vec![
            sample_fact(1, "alpha", "science"),
            sample_fact(2, "beta", "history"),
        ]);
        app.load_facts();
        settle(&mut app, &mut rx).await;

        let history = CategorySelection::Category(Category::History);
        app.set_category(history);
        settle(&mut app, &mut rx).await;

        let selects: Vec<_> = store
            .calls()
            .into_iter()
            .filter(|c| matches!(c, StoreCall::Select(q) if q.selection == history))
            .collect();
        assert_eq!(selects.len(), 1);
        assert_eq!(app.facts.len(), 1);
        assert_eq!(app.facts[0].text, "beta");
    }

    #[tokio::test]
    async fn reselecting_same_category_does_not_reload() {
        let (mut app, store, _rx) = setup(vec![]);
        app.set_category(CategorySelection::All);
        assert!(store.calls().is_empty());
        assert!(!app.is_loading);
    }

    #[tokio::test]
    async fn failed_select_keeps_list_and_raises_alert() {
        let (mut app, store, mut rx) = setup(vec![sample_fact(1, "alpha", "science")]);
        app.load_facts();
        settle(&mut app, &mut rx).await;
        assert_eq!(app.facts.len(), 1);

        store.fail_selects(true);
        app.set_category(CategorySelection::Category(Category::History));
        settle(&mut app, &mut rx).await;

        assert!(!app.is_loading);
        assert_eq!(app.facts.len(), 1);
        assert_eq!(app.facts[0].text, "alpha");
        assert_eq!(app.modal, Some(Modal::alert(LOAD_ERROR_MESSAGE)));
        assert_eq!(
            app.current_category,
            CategorySelection::Category(Category::History)
        );
    }

    #[tokio::test]
    async fn empty_text_never_reaches_the_store() {
        let (mut app, store, _rx) = setup(vec![]);
        fill_form(&mut app, "", "https://example.com", "SCIENCE");

        app.submit_form();

        assert!(store.calls().is_empty());
        assert!(!app.form.uploading);
        assert!(app.show_form);
    }

    #[tokio::test]
    async fn invalid_source_never_reaches_the_store() {
        let (mut app, store, _rx) = setup(vec![]);
        fill_form(&mut app, "A fact", "ftp://x.com", "SCIENCE");

        app.submit_form();

        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn successful_post_prepends_and_closes_form() {
        let (mut app, store, mut rx) = setup(vec![sample_fact(1, "zzz", "news")]);
        app.load_facts();
        settle(&mut app, &mut rx).await;

        fill_form(
            &mut app,
            "Bees can recognize human faces.",
            "https://example.com",
            "SCIENCE",
        );
        app.submit_form();
        assert!(app.form.uploading);
        settle(&mut app, &mut rx).await;

        let inserted = store.calls().into_iter().find_map(|c| match c {
            StoreCall::Insert(new) => Some(new),
            _ => None,
        });
        assert_eq!(inserted.map(|n| n.category), Some(Category::Science));

        assert_eq!(app.facts[0].text, "Bees can recognize human faces.");
        assert_eq!(app.facts[0].category, "science");
        assert_eq!(app.facts.len(), 2);
        assert!(!app.show_form);
        assert!(!app.form.uploading);
        assert!(app.form.text.is_empty() && app.form.source.is_empty());
        assert!(app.form.category.is_empty());
    }

    #[tokio::test]
    async fn failed_post_leaves_list_but_still_resets_form() {
        let (mut app, store, mut rx) = setup(vec![]);
        store.fail_inserts(true);

        fill_form(&mut app, "A fact", "https://example.com", "HEALTH");
        app.submit_form();
        settle(&mut app, &mut rx).await;

        assert!(app.facts.is_empty());
        assert!(!app.show_form);
        assert!(app.form.text.is_empty());
        assert!(!app.form.uploading);
        assert!(app.toast.is_some());
    }

    #[tokio::test]
    async fn vote_increments_and_replaces_only_that_fact() {
        let mut voted = sample_fact(1, "bbb", "science");
        voted.votes_interesting = 3;
        let other = sample_fact(2, "aaa", "science");
        let (mut app, store, mut rx) = setup(vec![voted, other.clone()]);
        app.load_facts();
        settle(&mut app, &mut rx).await;

        app.vote(FactId(1), VoteKind::Interesting);
        assert!(app.updating.contains(&FactId(1)));
        settle(&mut app, &mut rx).await;

        assert!(store.calls().contains(&StoreCall::Update(
            FactId(1),
            VotePatch {
                kind: VoteKind::Interesting,
                value: 4
            }
        )));
        assert_eq!(app.facts[0].votes_interesting, 4);
        assert_eq!(app.facts[1], other);
        assert!(app.updating.is_empty());
    }

    #[tokio::test]
    async fn second_vote_while_updating_is_ignored() {
        let (mut app, store, mut rx) = setup(vec![sample_fact(1, "a", "news")]);
        app.load_facts();
        settle(&mut app, &mut rx).await;

        app.vote(FactId(1), VoteKind::False);
        app.vote(FactId(1), VoteKind::False);
        settle(&mut app, &mut rx).await;

        let updates = store
            .calls()
            .into_iter()
            .filter(|c| matches!(c, StoreCall::Update(..)))
            .count();
        assert_eq!(updates, 1);
        assert_eq!(app.facts[0].votes_false, 1);
    }

    #[tokio::test]
    async fn failed_vote_leaves_fact_unchanged() {
        let (mut app, store, mut rx) = setup(vec![sample_fact(1, "a", "news")]);
        app.load_facts();
        settle(&mut app, &mut rx).await;
        let before = app.facts.clone();

        store.fail_updates(true);
        app.vote(FactId(1), VoteKind::Mindblowing);
        settle(&mut app, &mut rx).await;

        assert_eq!(app.facts, before);
        assert!(app.updating.is_empty());
    }

    #[tokio::test]
    async fn vote_selected_uses_list_selection() {
        let (mut app, _store, mut rx) = setup(vec![
            sample_fact(1, "b", "news"),
            sample_fact(2, "a", "news"),
        ]);
        app.load_facts();
        settle(&mut app, &mut rx).await;

        app.move_down();
        app.vote_selected(VoteKind::Interesting);
        settle(&mut app, &mut rx).await;

        assert_eq!(app.facts[1].id, FactId(2));
        assert_eq!(app.facts[1].votes_interesting, 1);
        assert_eq!(app.facts[0].votes_interesting, 0);
    }

    #[tokio::test]
    async fn focus_cycle_includes_form_only_when_open() {
        let (mut app, _store, _rx) = setup(vec![]);
        assert_eq!(app.focus, Focus::Facts);
        app.focus_next();
        assert_eq!(app.focus, Focus::Categories);
        app.focus_next();
        assert_eq!(app.focus, Focus::Facts);

        app.toggle_form();
        assert_eq!(app.focus, Focus::Form);
        app.focus_next();
        assert_eq!(app.focus, Focus::Categories);
        app.focus_next();
        app.focus_next();
        assert_eq!(app.focus, Focus::Form);

        app.toggle_form();
        assert!(!app.show_form);
        assert_eq!(app.focus, Focus::Facts);
    }

    #[tokio::test]
    async fn hidden_sidebar_is_skipped_by_focus_cycle() {
        let (mut app, _store, _rx) = setup(vec![]);
        app.focus_next();
        assert_eq!(app.focus, Focus::Categories);

        app.set_sidebar_visible(false);
        assert_eq!(app.focus, Focus::Facts);
        app.focus_next();
        assert_eq!(app.focus, Focus::Facts);

        app.toggle_form();
        app.focus_next();
        assert_eq!(app.focus, Focus::Facts);
        app.focus_next();
        assert_eq!(app.focus, Focus::Form);

        app.set_sidebar_visible(true);
        app.focus_next();
        assert_eq!(app.focus, Focus::Categories);
    }
}
