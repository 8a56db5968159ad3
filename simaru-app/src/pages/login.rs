//! The login page. The loading flag guards against double submission; the
//! error slot holds the last failure message until the next attempt.

use simaru_core::repository::RepoError;

use crate::nav::Route;
use crate::state::AppState;

#[derive(Debug, Default)]
pub struct LoginPage {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub loading: bool,
}

impl LoginPage {
    pub fn new() -> Self {
        LoginPage::default()
    }

    /// Already-authenticated visitors skip the form entirely.
    pub fn on_mount(state: &AppState) -> Option<Route> {
        if state.session.is_logged_in() {
            Some(Route::Landing)
        } else {
            None
        }
    }

    /// Attempt the login. Returns the redirect target on success; on
    /// failure the form stays up with the error message set.
    pub async fn submit(&mut self, state: &mut AppState) -> Option<Route> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;

        let result = state.login(&self.email, &self.password).await;
        self.loading = false;

        match result {
            Ok(()) => Some(Route::Landing),
            Err(RepoError::Unauthorized(message)) | Err(RepoError::Api { message, .. }) => {
                self.error = Some(message);
                None
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }
}
