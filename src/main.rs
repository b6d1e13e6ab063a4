use iced::{window, Element, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

mod config;
mod error;
mod imaging;
mod state;
mod ui;

use config::Settings;
use error::{ActionError, Notice, NoticeLevel};
use state::store::{Store, StoreError};
use ui::workbench::Workbench;
use ui::{Screen, ScreenKind};

/// Directory name used under the user's data and config directories
pub const APP_DIR_NAME: &str = "image-restore";

/// Extensions offered by the file picker
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// Main application state
struct App {
    /// The browse history; `None` if it could not be opened at startup
    store: Option<Store>,
    settings: Settings,
    /// Current screen and its transient state
    screen: Screen,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Switch to another screen, discarding the current one
    Navigate(ScreenKind),
    /// User clicked "Browse Image"
    Browse,
    /// User clicked "Load from Database"
    LoadFromStore,
    /// User clicked the screen's filter button
    ApplyFilter,
    Exit,
}

impl App {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();

        // The app stays usable without its database; store-backed actions report the problem
        let store = match open_store(&settings) {
            Ok(store) => Some(store),
            Err(e) => {
                log::error!("❌ Could not open image database: {}", e);
                None
            }
        };

        let status = match &store {
            Some(store) => {
                let image_count = store.count().unwrap_or(0);
                log::info!("🎨 Image Processing App initialized with {} images", image_count);

                if let Ok(records) = store.records() {
                    if let Some(latest) = records.last() {
                        log::debug!("Most recent image: #{} {}", latest.id, latest.file_path);
                    }
                }
                if let Some(path) = store.path() {
                    log::debug!("Library file: {}", path.display());
                }

                format!("Ready. {} images in library.", image_count)
            }
            None => "Image database unavailable.".to_string(),
        };

        let startup = if settings.fullscreen {
            window::get_oldest()
                .and_then(|id| window::change_mode(id, window::Mode::Fullscreen))
        } else {
            Task::none()
        };

        (
            App {
                store,
                settings,
                screen: Screen::default(),
                status,
            },
            startup,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(kind) => {
                self.screen = Screen::enter(kind, self.settings.preview_size);
                self.status.clear();
                log::debug!("Entered {:?} screen", self.screen.kind());
                Task::none()
            }
            Message::Browse => {
                let Some(bench) = self.screen.workbench() else {
                    return Task::none();
                };

                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Image files", IMAGE_EXTENSIONS)
                    .pick_file();

                let Some(path) = picked else {
                    return Task::none();
                };

                let result = self.store().and_then(|store| bench.browse(&path, store));
                self.commit(result);
                Task::none()
            }
            Message::LoadFromStore => {
                let Some(bench) = self.screen.workbench() else {
                    return Task::none();
                };

                let result = self.store().and_then(|store| bench.load_from_store(store));
                self.commit(result);
                Task::none()
            }
            Message::ApplyFilter => {
                if let Some(bench) = self.screen.workbench() {
                    if bench.original().is_some() {
                        self.status = format!("{} applied.", bench.filter().action_label());
                    }
                    let next = bench.apply_filter();
                    self.screen.replace_workbench(next);
                }
                Task::none()
            }
            Message::Exit => iced::exit(),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        self.screen.view(&self.status)
    }

    fn title(&self) -> String {
        self.screen.title().to_string()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn store(&self) -> Result<&Store, ActionError> {
        self.store
            .as_ref()
            .ok_or(ActionError::Storage(StoreError::Unavailable))
    }

    /// Keep the new per-screen state, or report why the action failed
    fn commit(&mut self, result: Result<Workbench, ActionError>) {
        match result {
            Ok(next) => {
                if let Some(path) = next.source() {
                    self.status = format!("Loaded {}", path.display());
                }
                self.screen.replace_workbench(next);
            }
            Err(err) => {
                if err.is_informational() {
                    log::info!("{}", err);
                } else {
                    log::error!("⚠️  {}", err);
                }

                let notice = err.notice();
                self.status = notice.body.clone();
                show_notice(&notice);
            }
        }
    }
}

fn open_store(settings: &Settings) -> Result<Store, StoreError> {
    let db_path = match &settings.database_path {
        Some(path) => path.clone(),
        None => Store::default_path()?,
    };
    Store::open(&db_path)
}

/// Blocking native message box
fn show_notice(notice: &Notice) {
    let level = match notice.level {
        NoticeLevel::Info => MessageLevel::Info,
        NoticeLevel::Error => MessageLevel::Error,
    };

    MessageDialog::new()
        .set_level(level)
        .set_title(notice.title)
        .set_description(notice.body.clone())
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application(App::title, App::update, App::view)
        .theme(App::theme)
        .centered()
        .run_with(App::new)
}
