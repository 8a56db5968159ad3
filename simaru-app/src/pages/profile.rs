//! The profile page. Edits happen on a draft copy; the stored profile only
//! changes on a successful save.

use simaru_domain::Profile;

use crate::notify::Notifier;

pub struct ProfilePage {
    profile: Profile,
    editing: Option<Profile>,
    pub notifier: Notifier,
}

impl ProfilePage {
    pub fn new() -> Self {
        ProfilePage {
            profile: Profile::sample(),
            editing: None,
            notifier: Notifier::default(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn edit(&mut self) {
        if self.editing.is_none() {
            self.editing = Some(self.profile.clone());
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut Profile> {
        self.editing.as_mut()
    }

    /// Commit the draft. An invalid draft stays open for correction.
    pub fn save(&mut self) -> bool {
        let Some(draft) = &self.editing else {
            return false;
        };
        if let Err(err) = draft.validate() {
            self.notifier.error(err.to_string());
            return false;
        }
        self.profile = self.editing.take().unwrap_or_default();
        self.notifier.success("profile updated");
        true
    }

    pub fn cancel(&mut self) {
        self.editing = None;
    }
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new()
    }
}
