//! Navigation chrome and the client-side auth gate. The gate reads the
//! session once and decides which routes to offer; it is a convenience,
//! not a security boundary.

use simaru_core::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Rooms,
    Bookings,
    Users,
    Profile,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Rooms => "/rooms",
            Route::Bookings => "/bookings",
            Route::Users => "/users",
            Route::Profile => "/profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Landing => "Dashboard",
            Route::Login => "Login",
            Route::Rooms => "Rooms",
            Route::Bookings => "Bookings",
            Route::Users => "Users",
            Route::Profile => "Profile",
        }
    }
}

/// Routes shown in the navigation bar for the given session.
pub fn links(session: &Session) -> Vec<Route> {
    if session.is_logged_in() {
        vec![
            Route::Landing,
            Route::Rooms,
            Route::Bookings,
            Route::Users,
            Route::Profile,
        ]
    } else {
        vec![Route::Landing, Route::Login]
    }
}
