//! The landing page: static marketing copy plus the entry routes offered to
//! a visitor.

use crate::nav::Route;

pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub struct Landing;

impl Landing {
    pub fn title() -> &'static str {
        "Simaru"
    }

    pub fn tagline() -> &'static str {
        "Sistem Manajemen Ruangan: plan, book, and track your rooms in one place."
    }

    pub fn features() -> Vec<Feature> {
        vec![
            Feature {
                title: "Manage Rooms",
                description: "Keep every room's capacity and availability up to date.",
            },
            Feature {
                title: "Book Rooms",
                description: "Reserve a room for a date and follow its status.",
            },
            Feature {
                title: "Reports",
                description: "See who booked what at a glance.",
            },
        ]
    }

    pub fn entry_routes() -> Vec<Route> {
        vec![Route::Login, Route::Rooms]
    }
}
