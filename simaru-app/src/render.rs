//! Plain-text rendering of page views: padded tables for users and
//! bookings, a card list for rooms, and the shared pagination footer.

use simaru_core::pipeline::PageView;
use simaru_domain::{Booking, Profile, Room, User};

use crate::notify::{Toast, ToastLevel};
use crate::pages::BookingsPage;

fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

/// "Page x of y (n items)" or the empty-state line.
pub fn footer<T>(view: &PageView<T>, empty_message: &str) -> String {
    if view.is_empty() {
        empty_message.to_string()
    } else {
        format!(
            "Page {} of {} ({} items)",
            view.page, view.total_pages, view.total_items
        )
    }
}

pub fn users_table(view: &PageView<User>) -> String {
    if view.is_empty() {
        return footer(view, "No users found.");
    }

    let name_width = view
        .items
        .iter()
        .map(|u| u.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!("{:<4} {} EMAIL\n", "ID", pad("NAME", name_width));
    for user in &view.items {
        out.push_str(&format!(
            "{:<4} {} {}\n",
            user.id,
            pad(&user.name, name_width),
            user.email
        ));
    }
    out.push_str(&footer(view, ""));
    out
}

pub fn rooms_cards(view: &PageView<Room>) -> String {
    if view.is_empty() {
        return "No rooms found.".to_string();
    }

    let mut out = String::new();
    for room in &view.items {
        out.push_str(&format!(
            "[{}] {} ({})\n    capacity {}: {}\n",
            room.id, room.name, room.status, room.capacity, room.description
        ));
    }
    out.push_str(&format!("{} rooms", view.total_items));
    out
}

pub fn bookings_table(page: &BookingsPage, view: &PageView<Booking>) -> String {
    if view.is_empty() {
        return footer(view, "No bookings found.");
    }

    let mut out = format!("{:<4} {:<24} {:<12} {:<10} USER\n", "ID", "ROOM", "DATE", "STATUS");
    for booking in &view.items {
        out.push_str(&format!(
            "{:<4} {:<24} {:<12} {:<10} {}\n",
            booking.id,
            page.room_name(booking.room_id),
            booking.booking_date,
            booking.status,
            booking.user
        ));
    }
    out.push_str(&footer(view, ""));
    out
}

pub fn profile_card(profile: &Profile) -> String {
    format!(
        "{}\n{} | {}\n{}\nskills: {}",
        profile.name,
        profile.email,
        profile.phone,
        profile.bio,
        profile.skills.join(", ")
    )
}

pub fn toast_line(toast: &Toast) -> String {
    match toast.level {
        ToastLevel::Success => format!("ok: {}", toast.message),
        ToastLevel::Error => format!("error: {}", toast.message),
    }
}
