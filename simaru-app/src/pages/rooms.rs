//! The rooms page: searchable card grid with an "available only" filter,
//! full CRUD, and two feature-flagged extras (direct status changes and ad
//! hoc category management).

use std::sync::Arc;

use simaru_core::pipeline::{apply, ListState, PageView, RoomField};
use simaru_core::repository::RoomRepository;
use simaru_domain::{Category, Room, RoomDraft, RoomStatus};

use crate::notify::Notifier;
use crate::pages::{Confirm, Modal};

pub struct RoomsPage {
    repo: Arc<dyn RoomRepository>,
    items: Vec<Room>,
    pub list: ListState<RoomField>,
    pub only_available: bool,
    pub modal: Modal<RoomDraft>,
    pub notifier: Notifier,
    categories: Vec<Category>,
}

impl RoomsPage {
    pub fn new(repo: Arc<dyn RoomRepository>) -> Self {
        RoomsPage {
            repo,
            items: Vec::new(),
            list: ListState::unpaged(),
            only_available: false,
            modal: Modal::default(),
            notifier: Notifier::default(),
            categories: Vec::new(),
        }
    }

    pub async fn load(&mut self) {
        match self.repo.list_rooms().await {
            Ok(rooms) => self.items = rooms,
            Err(err) => self.notifier.error(format!("failed to load rooms: {err}")),
        }
    }

    pub fn items(&self) -> &[Room] {
        &self.items
    }

    /// Derived listing for the current search and availability filter.
    pub fn view(&self) -> PageView<Room> {
        apply(&self.items, &self.list, |room| {
            !self.only_available || room.status.is_available()
        })
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.list.set_search(term);
    }

    pub fn open_new(&mut self) {
        self.modal.open_new();
    }

    pub fn open_edit(&mut self, id: u64) -> bool {
        match self.items.iter().find(|room| room.id == id) {
            Some(room) => {
                self.modal.open_edit(id, room.draft());
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.modal.cancel();
    }

    /// Submit the open dialog. Validation failures and repository errors
    /// keep the dialog open and the collection untouched.
    pub async fn submit(&mut self) -> bool {
        let (editing, draft) = match &self.modal {
            Modal::Open { editing, draft } => (*editing, draft.clone()),
            Modal::Closed => return false,
        };

        if let Err(err) = draft.validate() {
            self.notifier.error(err.to_string());
            return false;
        }

        let result = match editing {
            Some(id) => self.repo.update_room(id, &draft).await,
            None => self.repo.create_room(&draft).await,
        };

        match result {
            Ok(room) => {
                match editing {
                    Some(id) => {
                        if let Some(existing) = self.items.iter_mut().find(|r| r.id == id) {
                            *existing = room;
                        }
                        self.notifier.success("room updated");
                    }
                    None => {
                        self.items.push(room);
                        self.notifier.success("room added");
                    }
                }
                self.modal.cancel();
                true
            }
            Err(err) => {
                self.notifier.error(format!("failed to save room: {err}"));
                false
            }
        }
    }

    pub async fn delete(&mut self, id: u64, confirm: Confirm) -> bool {
        if confirm == Confirm::No {
            return false;
        }
        match self.repo.delete_room(id).await {
            Ok(()) => {
                self.items.retain(|room| room.id != id);
                self.notifier.success("room deleted");
                true
            }
            Err(err) => {
                self.notifier.error(format!("failed to delete room: {err}"));
                false
            }
        }
    }

    /// Status modal: change a room's status without opening the full edit
    /// form. Feature-flag gated at the CLI surface.
    pub async fn set_status(&mut self, id: u64, status: RoomStatus) -> bool {
        let Some(room) = self.items.iter().find(|room| room.id == id) else {
            self.notifier.error(format!("room {id} not found"));
            return false;
        };
        let mut draft = room.draft();
        draft.status = status;

        match self.repo.update_room(id, &draft).await {
            Ok(updated) => {
                if let Some(existing) = self.items.iter_mut().find(|r| r.id == id) {
                    *existing = updated;
                }
                self.notifier.success(format!("room status set to {status}"));
                true
            }
            Err(err) => {
                self.notifier.error(format!("failed to update status: {err}"));
                false
            }
        }
    }

    // Categories are created client-side only and never persisted.

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn add_category(&mut self, name: impl Into<String>) -> bool {
        let next_id = self
            .categories
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(1, |max| max + 1);
        match Category::new(next_id, name) {
            Ok(category) => {
                self.categories.push(category);
                true
            }
            Err(err) => {
                self.notifier.error(err.to_string());
                false
            }
        }
    }

    pub fn remove_category(&mut self, id: u64) {
        self.categories.retain(|category| category.id != id);
    }
}
