//! Command-line surface. Each subcommand drives one page controller
//! through a single load, action, render cycle.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use simaru_core::pipeline::{BookingField, RoomField, SortDirection, UserField};
use simaru_domain::{BookingDraft, RoomDraft, RoomStatus, UserDraft};
use simaru_store::app_config::Config;

use crate::nav;
use crate::pages::{BookingsPage, Confirm, Landing, LoginPage, ProfilePage, RoomsPage, UsersPage};
use crate::render;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "simaru", about = "Room booking administration", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Authenticate and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Manage rooms
    Rooms {
        #[command(subcommand)]
        action: RoomsAction,
    },
    /// Manage bookings
    Bookings {
        #[command(subcommand)]
        action: BookingsAction,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// View or edit the signed-in profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoomSort {
    Id,
    Name,
    Capacity,
}

impl From<RoomSort> for RoomField {
    fn from(sort: RoomSort) -> Self {
        match sort {
            RoomSort::Id => RoomField::Id,
            RoomSort::Name => RoomField::Name,
            RoomSort::Capacity => RoomField::Capacity,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UserSort {
    Id,
    Name,
    Email,
}

impl From<UserSort> for UserField {
    fn from(sort: UserSort) -> Self {
        match sort {
            UserSort::Id => UserField::Id,
            UserSort::Name => UserField::Name,
            UserSort::Email => UserField::Email,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BookingSort {
    Id,
    Date,
}

impl From<BookingSort> for BookingField {
    fn from(sort: BookingSort) -> Self {
        match sort {
            BookingSort::Id => BookingField::Id,
            BookingSort::Date => BookingField::Date,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Available,
    Booked,
    Maintenance,
}

impl From<StatusArg> for RoomStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Available => RoomStatus::Available,
            StatusArg::Booked => RoomStatus::Booked,
            StatusArg::Maintenance => RoomStatus::Maintenance,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter rows by a case-insensitive substring
    #[arg(long, default_value = "")]
    pub search: String,
    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,
    /// Page to show, starting from 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Debug, Subcommand)]
pub enum RoomsAction {
    /// List rooms as a card grid
    List {
        #[command(flatten)]
        common: ListArgs,
        #[arg(long, value_enum, default_value = "id")]
        sort: RoomSort,
        /// Show only rooms currently available
        #[arg(long)]
        available_only: bool,
    },
    /// Add a room
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        capacity: u32,
        #[arg(long, value_enum, default_value = "available")]
        status: StatusArg,
    },
    /// Edit a room; omitted flags keep the current value
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Delete a room
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Change a room's status without a full edit
    SetStatus {
        id: u64,
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Manage room categories
    Categories {
        /// Add a category with this name
        #[arg(long)]
        add: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum BookingsAction {
    /// List bookings with room names resolved
    List {
        #[command(flatten)]
        common: ListArgs,
        #[arg(long, value_enum, default_value = "id")]
        sort: BookingSort,
    },
    /// Create a booking
    Add {
        #[arg(long)]
        room_id: u64,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = "")]
        user: String,
    },
    /// Edit a booking; omitted flags keep the current value
    Edit {
        id: u64,
        #[arg(long)]
        room_id: Option<u64>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        user: Option<String>,
    },
    /// Delete a booking
    Delete {
        id: u64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// List users as a paginated table
    List {
        #[command(flatten)]
        common: ListArgs,
        #[arg(long, value_enum, default_value = "id")]
        sort: UserSort,
    },
    /// Add a user
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Edit a user; omitted flags keep the current value
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a user
    Delete {
        id: u64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Show the profile
    Show,
    /// Edit profile fields; omitted flags keep the current value
    Edit {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        /// Replace the skill list (repeatable)
        #[arg(long)]
        skill: Vec<String>,
    },
}

/// Prompt on stdin unless `--yes` was given.
fn confirm(prompt: &str, yes: bool) -> io::Result<Confirm> {
    if yes {
        return Ok(Confirm::Yes);
    }
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Confirm::Yes,
        _ => Confirm::No,
    })
}

fn drain_toasts(notifier: &mut crate::notify::Notifier) {
    for toast in notifier.drain() {
        println!("{}", render::toast_line(&toast));
    }
}

fn require_login(state: &AppState) -> anyhow::Result<()> {
    if !state.session.is_logged_in() {
        bail!("not logged in; run `simaru login` first");
    }
    Ok(())
}

fn show_landing(state: &AppState) {
    println!("{}", Landing::title());
    println!("{}\n", Landing::tagline());
    for feature in Landing::features() {
        println!("  {}: {}", feature.title, feature.description);
    }
    let links: Vec<&str> = nav::links(&state.session)
        .iter()
        .map(|route| route.label())
        .collect();
    println!("\nNavigation: {}", links.join(" | "));
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let mut state = AppState::from_config(&config)?;

    match cli.command {
        None => show_landing(&state),
        Some(Command::Login { email, password }) => {
            let mut page = LoginPage::new();
            page.email = email;
            page.password = password;
            match page.submit(&mut state).await {
                Some(_) => {
                    let name = state
                        .session
                        .user
                        .as_ref()
                        .map(|u| u.name.as_str())
                        .unwrap_or("user");
                    println!("logged in as {name}");
                }
                None => bail!(page.error.unwrap_or_else(|| "login failed".to_string())),
            }
        }
        Some(Command::Logout) => {
            state.logout().context("failed to clear session")?;
            println!("logged out");
        }
        Some(Command::Rooms { action }) => {
            require_login(&state)?;
            let mut page = RoomsPage::new(state.rooms.clone());
            page.load().await;
            run_rooms(&mut page, &state, action).await?;
            drain_toasts(&mut page.notifier);
        }
        Some(Command::Bookings { action }) => {
            require_login(&state)?;
            let mut page = BookingsPage::new(state.bookings.clone(), state.rooms.clone());
            page.load().await;
            run_bookings(&mut page, action).await?;
            drain_toasts(&mut page.notifier);
        }
        Some(Command::Users { action }) => {
            require_login(&state)?;
            let mut page = UsersPage::new(state.users.clone(), state.page_size);
            page.load().await;
            run_users(&mut page, action).await?;
            drain_toasts(&mut page.notifier);
        }
        Some(Command::Profile { action }) => {
            require_login(&state)?;
            let mut page = ProfilePage::new();
            match action.unwrap_or(ProfileAction::Show) {
                ProfileAction::Show => println!("{}", render::profile_card(page.profile())),
                ProfileAction::Edit {
                    name,
                    email,
                    phone,
                    bio,
                    skill,
                } => {
                    page.edit();
                    if let Some(draft) = page.draft_mut() {
                        if let Some(name) = name {
                            draft.name = name;
                        }
                        if let Some(email) = email {
                            draft.email = email;
                        }
                        if let Some(phone) = phone {
                            draft.phone = phone;
                        }
                        if let Some(bio) = bio {
                            draft.bio = bio;
                        }
                        if !skill.is_empty() {
                            draft.skills = skill;
                        }
                    }
                    if page.save() {
                        println!("{}", render::profile_card(page.profile()));
                    }
                }
            }
            drain_toasts(&mut page.notifier);
        }
    }

    Ok(())
}

async fn run_rooms(page: &mut RoomsPage, state: &AppState, action: RoomsAction) -> anyhow::Result<()> {
    match action {
        RoomsAction::List {
            common,
            sort,
            available_only,
        } => {
            page.set_search(common.search);
            page.list.sort_by = sort.into();
            if common.desc {
                page.list.direction = SortDirection::Descending;
            }
            page.list.page = common.page;
            page.only_available = available_only;
            println!("{}", render::rooms_cards(&page.view()));
        }
        RoomsAction::Add {
            name,
            description,
            capacity,
            status,
        } => {
            page.open_new();
            if let Some(draft) = page.modal.draft_mut() {
                *draft = RoomDraft {
                    name,
                    description,
                    capacity,
                    status: status.into(),
                };
            }
            page.submit().await;
        }
        RoomsAction::Edit {
            id,
            name,
            description,
            capacity,
            status,
        } => {
            if !page.open_edit(id) {
                bail!("room {id} not found");
            }
            if let Some(draft) = page.modal.draft_mut() {
                if let Some(name) = name {
                    draft.name = name;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
                if let Some(capacity) = capacity {
                    draft.capacity = capacity;
                }
                if let Some(status) = status {
                    draft.status = status.into();
                }
            }
            page.submit().await;
        }
        RoomsAction::Delete { id, yes } => {
            let confirm = confirm(&format!("Delete room {id}?"), yes)?;
            page.delete(id, confirm).await;
        }
        RoomsAction::SetStatus { id, status } => {
            if !state.features.status_modal {
                bail!("status changes are not enabled; set features.status_modal");
            }
            page.set_status(id, status.into()).await;
        }
        RoomsAction::Categories { add } => {
            if !state.features.category_management {
                bail!("category management is not enabled; set features.category_management");
            }
            if let Some(name) = add {
                page.add_category(name);
            }
            for category in page.categories() {
                println!("[{}] {}", category.id, category.name);
            }
        }
    }
    Ok(())
}

async fn run_bookings(page: &mut BookingsPage, action: BookingsAction) -> anyhow::Result<()> {
    match action {
        BookingsAction::List { common, sort } => {
            page.list.set_search(common.search);
            page.list.sort_by = sort.into();
            if common.desc {
                page.list.direction = SortDirection::Descending;
            }
            page.list.page = common.page;
            let view = page.view();
            println!("{}", render::bookings_table(page, &view));
        }
        BookingsAction::Add { room_id, date, user } => {
            page.open_new();
            if let Some(draft) = page.modal.draft_mut() {
                *draft = BookingDraft {
                    room_id: Some(room_id),
                    booking_date: Some(date),
                    user,
                };
            }
            page.submit().await;
        }
        BookingsAction::Edit {
            id,
            room_id,
            date,
            user,
        } => {
            if !page.open_edit(id) {
                bail!("booking {id} not found");
            }
            if let Some(draft) = page.modal.draft_mut() {
                if let Some(room_id) = room_id {
                    draft.room_id = Some(room_id);
                }
                if let Some(date) = date {
                    draft.booking_date = Some(date);
                }
                if let Some(user) = user {
                    draft.user = user;
                }
            }
            page.submit().await;
        }
        BookingsAction::Delete { id, yes } => {
            let confirm = confirm(&format!("Delete booking {id}?"), yes)?;
            page.delete(id, confirm).await;
        }
    }
    Ok(())
}

async fn run_users(page: &mut UsersPage, action: UsersAction) -> anyhow::Result<()> {
    match action {
        UsersAction::List { common, sort } => {
            page.set_search(common.search);
            page.list.sort_by = sort.into();
            if common.desc {
                page.list.direction = SortDirection::Descending;
            }
            page.list.page = common.page;
            println!("{}", render::users_table(&page.view()));
        }
        UsersAction::Add { name, email } => {
            page.open_new();
            if let Some(draft) = page.modal.draft_mut() {
                *draft = UserDraft { name, email };
            }
            page.submit().await;
        }
        UsersAction::Edit { id, name, email } => {
            if !page.open_edit(id) {
                bail!("user {id} not found");
            }
            if let Some(draft) = page.modal.draft_mut() {
                if let Some(name) = name {
                    draft.name = name;
                }
                if let Some(email) = email {
                    draft.email = email;
                }
            }
            page.submit().await;
        }
        UsersAction::Delete { id, yes } => {
            let confirm = confirm(&format!("Delete user {id}?"), yes)?;
            page.delete(id, confirm).await;
        }
    }
    Ok(())
}
