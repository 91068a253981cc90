//! # Capsule list state machine
//!
//! [`CapsuleListState`] is everything the capsule list view knows: the fetch
//! phase, the capsules of the current session, which capsule the detail modal
//! shows, whether the creation form is open, and the last inline action error.
//! The component drives it; network calls happen outside and their results
//! are fed back in.
//!
//! ## Fetch supersession
//!
//! Every [`begin_fetch`](CapsuleListState::begin_fetch) hands out a
//! [`FetchTicket`] carrying a generation number. Only the ticket of the most
//! recent fetch may commit in [`finish_fetch`](CapsuleListState::finish_fetch);
//! a slow response from an older fetch is dropped.
//!
//! ## Phases
//!
//! ```text
//! Loading ──ok──▶ Loaded ──begin_fetch──▶ Loading
//!    └────err──▶ Errored ──begin_fetch──▶ Loading
//! ```
//!
//! Open/view actions are only accepted in `Loaded`; their failures are
//! recorded as an inline error and never leave `Loaded`.

use thiserror::Error;

use crate::models::{Capsule, CapsuleStatus};

/// Fetch phase of the list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListPhase {
    #[default]
    Loading,
    Loaded,
    Errored(String),
}

/// Proof that a fetch was started; see module docs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Why a list action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("capsules are not loaded")]
    NotLoaded,
    #[error("unknown capsule {0}")]
    UnknownCapsule(String),
    #[error("capsule {0} is already opened")]
    AlreadyOpened(String),
    #[error("capsule {0} has not been opened yet")]
    NotOpened(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapsuleListState {
    phase: ListPhase,
    capsules: Vec<Capsule>,
    generation: u64,
    selected: Option<Capsule>,
    show_create_form: bool,
    action_error: Option<String>,
}

impl CapsuleListState {
    /// A fresh list waiting for its first fetch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    /// Cards to render. Empty unless the list is loaded.
    pub fn capsules(&self) -> &[Capsule] {
        match self.phase {
            ListPhase::Loaded => &self.capsules,
            _ => &[],
        }
    }

    pub fn get(&self, capsule_id: &str) -> Option<&Capsule> {
        self.capsules().iter().find(|c| c.capsule_id == capsule_id)
    }

    /// Capsule currently shown in the detail modal.
    pub fn selected(&self) -> Option<&Capsule> {
        self.selected.as_ref()
    }

    pub fn create_form_visible(&self) -> bool {
        self.show_create_form
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// Start a fetch, superseding any fetch still in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.phase = ListPhase::Loading;
        self.action_error = None;
        FetchTicket(self.generation)
    }

    /// Commit a fetch result. Returns `false` if the ticket was superseded.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Capsule>, String>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        match result {
            Ok(capsules) => {
                self.capsules = capsules.into_iter().map(Capsule::redacted).collect();
                self.phase = ListPhase::Loaded;
            }
            Err(message) => {
                self.capsules.clear();
                self.phase = ListPhase::Errored(message);
            }
        }
        true
    }

    /// Check that `capsule_id` may be opened now.
    pub fn open_capsule(&self, capsule_id: &str) -> Result<(), ListError> {
        if self.phase != ListPhase::Loaded {
            return Err(ListError::NotLoaded);
        }
        match self.get(capsule_id) {
            None => Err(ListError::UnknownCapsule(capsule_id.to_string())),
            Some(c) if c.status == CapsuleStatus::Opened => {
                Err(ListError::AlreadyOpened(capsule_id.to_string()))
            }
            Some(_) => Ok(()),
        }
    }

    /// Apply the outcome of opening `capsule_id`.
    pub fn finish_open(&mut self, capsule_id: &str, result: Result<Capsule, String>) {
        match result {
            Ok(opened) => {
                if let Some(card) = self
                    .capsules
                    .iter_mut()
                    .find(|c| c.capsule_id == capsule_id)
                {
                    card.status = CapsuleStatus::Opened;
                }
                self.action_error = None;
                self.selected = Some(opened);
            }
            Err(message) => self.action_error = Some(message),
        }
    }

    /// Check that `capsule` may be viewed; returns the id to reopen.
    pub fn view_capsule<'a>(&self, capsule: &'a Capsule) -> Result<&'a str, ListError> {
        if self.phase != ListPhase::Loaded {
            return Err(ListError::NotLoaded);
        }
        if capsule.status != CapsuleStatus::Opened {
            return Err(ListError::NotOpened(capsule.capsule_id.clone()));
        }
        Ok(&capsule.capsule_id)
    }

    /// Apply the outcome of re-fetching an opened capsule.
    pub fn finish_view(&mut self, result: Result<Capsule, String>) {
        match result {
            Ok(capsule) => {
                self.action_error = None;
                self.selected = Some(capsule);
            }
            Err(message) => self.action_error = Some(message),
        }
    }

    /// The creation form succeeded: close it and refetch everything.
    pub fn capsule_created(&mut self) -> FetchTicket {
        self.show_create_form = false;
        self.begin_fetch()
    }

    pub fn show_create_form(&mut self) {
        self.show_create_form = true;
    }

    pub fn hide_create_form(&mut self) {
        self.show_create_form = false;
    }

    pub fn close_modal(&mut self) {
        self.selected = None;
    }
}
