/// Screens and their widgets
///
/// - Screen controller: which of the three screens is shown (this file)
/// - Per-screen state and actions (workbench.rs)
/// - Widget layouts (view.rs)
/// - Cumulative distribution chart (histogram.rs)

pub mod histogram;
pub mod view;
pub mod workbench;

use iced::Element;

use crate::Message;
use workbench::{Filter, Workbench};

/// Screen names used for navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    MainMenu,
    Restore,
    Histogram,
}

/// The screen currently shown, together with its transient state.
///
/// Switching screens replaces the whole value, so nothing loaded on
/// one screen survives navigation.
#[derive(Debug, Default)]
pub enum Screen {
    #[default]
    MainMenu,
    Restore(Workbench),
    Histogram(Workbench),
}

impl Screen {
    /// Build a fresh screen of the given kind
    pub fn enter(kind: ScreenKind, preview_size: u32) -> Self {
        match kind {
            ScreenKind::MainMenu => Screen::MainMenu,
            ScreenKind::Restore => Screen::Restore(Workbench::new(Filter::RemoveNoise, preview_size)),
            ScreenKind::Histogram => {
                Screen::Histogram(Workbench::new(Filter::EqualizeHistogram, preview_size))
            }
        }
    }

    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::MainMenu => ScreenKind::MainMenu,
            Screen::Restore(_) => ScreenKind::Restore,
            Screen::Histogram(_) => ScreenKind::Histogram,
        }
    }

    /// Window title for this screen
    pub fn title(&self) -> &'static str {
        match self {
            Screen::MainMenu => "Image Processing App - Main Page",
            Screen::Restore(_) => "Restore Image",
            Screen::Histogram(_) => "Histogram Equalization",
        }
    }

    pub fn workbench(&self) -> Option<&Workbench> {
        match self {
            Screen::MainMenu => None,
            Screen::Restore(bench) | Screen::Histogram(bench) => Some(bench),
        }
    }

    /// Swap in the result of an action. Ignored on the main menu.
    pub fn replace_workbench(&mut self, next: Workbench) {
        match self {
            Screen::MainMenu => {}
            Screen::Restore(bench) | Screen::Histogram(bench) => *bench = next,
        }
    }

    /// Render the screen from its state
    pub fn view<'a>(&'a self, status: &'a str) -> Element<'a, Message> {
        match self {
            Screen::MainMenu => view::main_menu(status),
            Screen::Restore(bench) | Screen::Histogram(bench) => view::workbench(bench, status),
        }
    }
}
