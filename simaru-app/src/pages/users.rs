//! The users page: a paginated table with column sorting and a search box
//! matching name or email.

use std::sync::Arc;

use simaru_core::pipeline::{apply, ListState, PageView, UserField};
use simaru_core::repository::UserRepository;
use simaru_domain::{User, UserDraft};

use crate::notify::Notifier;
use crate::pages::{Confirm, Modal};

pub struct UsersPage {
    repo: Arc<dyn UserRepository>,
    items: Vec<User>,
    pub list: ListState<UserField>,
    pub modal: Modal<UserDraft>,
    pub notifier: Notifier,
}

impl UsersPage {
    pub fn new(repo: Arc<dyn UserRepository>, page_size: usize) -> Self {
        UsersPage {
            repo,
            items: Vec::new(),
            list: ListState::new(page_size),
            modal: Modal::default(),
            notifier: Notifier::default(),
        }
    }

    pub async fn load(&mut self) {
        match self.repo.list_users().await {
            Ok(users) => self.items = users,
            Err(err) => self.notifier.error(format!("failed to load users: {err}")),
        }
    }

    pub fn items(&self) -> &[User] {
        &self.items
    }

    pub fn view(&self) -> PageView<User> {
        apply(&self.items, &self.list, |_| true)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.list.set_search(term);
    }

    pub fn toggle_sort(&mut self, field: UserField) {
        self.list.toggle_sort(field);
    }

    pub fn open_new(&mut self) {
        self.modal.open_new();
    }

    pub fn open_edit(&mut self, id: u64) -> bool {
        match self.items.iter().find(|user| user.id == id) {
            Some(user) => {
                self.modal.open_edit(id, user.draft());
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.modal.cancel();
    }

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
            Some(id) => self.repo.update_user(id, &draft).await,
            None => self.repo.create_user(&draft).await,
        };

        match result {
            Ok(user) => {
                match editing {
                    Some(id) => {
                        if let Some(existing) = self.items.iter_mut().find(|u| u.id == id) {
                            *existing = user;
                        }
                        self.notifier.success("user updated");
                    }
                    None => {
                        self.items.push(user);
                        self.notifier.success("user added");
                    }
                }
                self.modal.cancel();
                true
            }
            Err(err) => {
                self.notifier.error(format!("failed to save user: {err}"));
                false
            }
        }
    }

    pub async fn delete(&mut self, id: u64, confirm: Confirm) -> bool {
        if confirm == Confirm::No {
            return false;
        }
        match self.repo.delete_user(id).await {
            Ok(()) => {
                self.items.retain(|user| user.id != id);
                self.notifier.success("user deleted");
                true
            }
            Err(err) => {
                self.notifier.error(format!("failed to delete user: {err}"));
                false
            }
        }
    }
}
