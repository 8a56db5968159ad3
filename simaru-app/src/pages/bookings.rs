//! The bookings page. Unlike rooms and users, this page never splices its
//! local copy after a write: every successful save or delete refetches the
//! collection so the listing reflects what the backend actually stored.

use std::sync::Arc;

use simaru_core::pipeline::{apply, BookingField, ListState, PageView};
use simaru_core::repository::{BookingRepository, RepoError, RoomRepository};
use simaru_domain::{Booking, BookingDraft, Room};

use crate::notify::Notifier;
use crate::pages::{Confirm, Modal};

pub struct BookingsPage {
    bookings: Arc<dyn BookingRepository>,
    rooms: Arc<dyn RoomRepository>,
    items: Vec<Booking>,
    room_index: Vec<Room>,
    pub list: ListState<BookingField>,
    pub modal: Modal<BookingDraft>,
    pub notifier: Notifier,
    load_generation: u64,
}

impl BookingsPage {
    pub fn new(bookings: Arc<dyn BookingRepository>, rooms: Arc<dyn RoomRepository>) -> Self {
        BookingsPage {
            bookings,
            rooms,
            items: Vec::new(),
            room_index: Vec::new(),
            list: ListState::default(),
            modal: Modal::default(),
            notifier: Notifier::default(),
            load_generation: 0,
        }
    }

    /// Start a fetch and return its generation token. A token is only valid
    /// until the next `begin_load`, so an overlapping refresh invalidates
    /// any fetch still in flight.
    pub fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.load_generation
    }

    /// Apply a fetch result if it is still current; stale results are
    /// dropped without touching state.
    pub fn finish_load(&mut self, generation: u64, result: Result<Vec<Booking>, RepoError>) {
        if generation != self.load_generation {
            tracing::debug!(generation, current = self.load_generation, "stale fetch dropped");
            return;
        }
        match result {
            Ok(bookings) => self.items = bookings,
            Err(err) => self
                .notifier
                .error(format!("failed to load bookings: {err}")),
        }
    }

    pub async fn load(&mut self) {
        let generation = self.begin_load();
        let result = self.bookings.list_bookings().await;
        self.finish_load(generation, result);

        match self.rooms.list_rooms().await {
            Ok(rooms) => self.room_index = rooms,
            Err(err) => self.notifier.error(format!("failed to load rooms: {err}")),
        }
    }

    pub fn items(&self) -> &[Booking] {
        &self.items
    }

    pub fn view(&self) -> PageView<Booking> {
        apply(&self.items, &self.list, |_| true)
    }

    /// Room name for a booking row, falling back to the raw id when the
    /// room list has no match.
    pub fn room_name(&self, room_id: u64) -> String {
        self.room_index
            .iter()
            .find(|room| room.id == room_id)
            .map(|room| room.name.clone())
            .unwrap_or_else(|| format!("Room ID: {room_id}"))
    }

    pub fn rooms(&self) -> &[Room] {
        &self.room_index
    }

    pub fn open_new(&mut self) {
        self.modal.open_new();
    }

    pub fn open_edit(&mut self, id: u64) -> bool {
        match self.items.iter().find(|booking| booking.id == id) {
            Some(booking) => {
                self.modal.open_edit(id, booking.draft());
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
            Some(id) => self.bookings.update_booking(id, &draft).await,
            None => self.bookings.create_booking(&draft).await,
        };

        match result {
            Ok(_) => {
                self.notifier.success(match editing {
                    Some(_) => "booking updated",
                    None => "booking created",
                });
                self.modal.cancel();
                self.load().await;
                true
            }
            Err(err) => {
                self.notifier.error(format!("failed to save booking: {err}"));
                false
            }
        }
    }

    pub async fn delete(&mut self, id: u64, confirm: Confirm) -> bool {
        if confirm == Confirm::No {
            return false;
        }
        match self.bookings.delete_booking(id).await {
            Ok(()) => {
                self.notifier.success("booking deleted");
                self.load().await;
                true
            }
            Err(err) => {
                self.notifier
                    .error(format!("failed to delete booking: {err}"));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use simaru_domain::RoomDraft;
    use simaru_store::MemoryStore;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn seeded_page() -> BookingsPage {
        let rooms = vec![Room::from_draft(
            1,
            &RoomDraft {
                name: "Aula Utama".into(),
                description: "main hall".into(),
                capacity: 50,
                status: simaru_domain::RoomStatus::Available,
            },
        )];
        let bookings = vec![Booking {
            id: 1,
            room_id: 1,
            booking_date: date(1),
            user: "budi".into(),
            status: simaru_domain::BookingStatus::Pending,
        }];
        let store = Arc::new(MemoryStore::new(rooms, bookings, Vec::new()));
        BookingsPage::new(store.clone(), store)
    }

    #[tokio::test]
    async fn test_room_name_join_with_fallback() {
        let mut page = seeded_page();
        page.load().await;

        assert_eq!(page.room_name(1), "Aula Utama");
        assert_eq!(page.room_name(99), "Room ID: 99");
    }

    #[tokio::test]
    async fn test_submit_refetches_from_backend() {
        let mut page = seeded_page();
        page.load().await;
        page.open_new();
        {
            let draft = page.modal.draft_mut().unwrap();
            draft.room_id = Some(1);
            draft.booking_date = Some(date(2));
            draft.user = "ani".to_string();
        }

        assert!(page.submit().await);
        assert!(!page.modal.is_open());
        assert_eq!(page.items().len(), 2);
        // Backend assigned the id, not the page.
        assert_eq!(page.items()[1].id, 2);
    }

    #[tokio::test]
    async fn test_missing_room_blocks_submission() {
        let mut page = seeded_page();
        page.load().await;
        page.open_new();
        page.modal.draft_mut().unwrap().booking_date = Some(date(2));

        assert!(!page.submit().await);
        assert!(page.modal.is_open());
        assert_eq!(page.items().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_fetch_result_is_dropped() {
        let mut page = seeded_page();
        let first = page.begin_load();
        let second = page.begin_load();

        page.finish_load(
            first,
            Ok(vec![Booking {
                id: 99,
                room_id: 1,
                booking_date: date(9),
                user: "stale".into(),
                status: simaru_domain::BookingStatus::Pending,
            }]),
        );
        assert!(page.items().is_empty());

        page.finish_load(second, Ok(Vec::new()));
        assert!(page.items().is_empty());
        assert!(page.notifier.is_empty());
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_keeps_collection() {
        let mut page = seeded_page();
        page.load().await;

        assert!(!page.delete(1, Confirm::No).await);
        assert_eq!(page.items().len(), 1);

        assert!(page.delete(1, Confirm::Yes).await);
        assert!(page.items().is_empty());
    }
}
