//! Interactive terminal UI.
//!
//! One loop: draw, block on the next key, translate it, apply it to the
//! [`ViewController`], run any returned effect. Nothing runs concurrently.

mod grid;
mod keys;
mod render;

use aisles_core::{AppConfig, Catalog, Effect, Event, Query, StoreId, ViewController, ViewMode, ViewState};
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use ratatui::DefaultTerminal;

use self::keys::{Action, InputMode};

/// Run the interactive browser until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be initialised, drawn to, or read
/// from.
pub(crate) fn run(
    catalog: Catalog,
    query: Query,
    mode: ViewMode,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let state = ViewState {
        query,
        mode,
        ..ViewState::default()
    };
    let app = App::new(ViewController::from_config(catalog, state, config));

    let mut terminal = ratatui::try_init()?;
    let result = app.run(&mut terminal);
    finish_session(result, ratatui::try_restore())
}

/// Combine the session outcome with the terminal restore outcome. A session
/// error is never replaced by a restore error.
fn finish_session(
    session: anyhow::Result<()>,
    restore: std::io::Result<()>,
) -> anyhow::Result<()> {
    match (session, restore) {
        (Ok(()), Err(e)) => Err(e.into()),
        (session, Err(e)) => {
            tracing::warn!(error = %e, "failed to restore terminal");
            session
        }
        (session, Ok(())) => session,
    }
}

pub(crate) struct App {
    controller: ViewController,
    input: InputMode,
    /// Index into the current listing of the focused card or marker.
    cursor: usize,
    /// Grid row shown at the top of the card area.
    first_row: usize,
    /// Card to centre on the next grid draw.
    pending_scroll: Option<StoreId>,
    status: Option<String>,
    quit: bool,
}

impl App {
    pub(crate) fn new(controller: ViewController) -> Self {
        Self {
            controller,
            input: InputMode::Normal,
            cursor: 0,
            first_row: 0,
            pending_scroll: None,
            status: None,
            quit: false,
        }
    }

    fn run(mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.quit {
            terminal.draw(|frame| render::draw(frame, &mut self))?;

            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = keys::translate(key, self.input);
                    self.handle(action);
                }
            }
        }
        tracing::info!("session ended");
        Ok(())
    }

    pub(crate) fn handle(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit = true,
            Action::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            Action::CursorDown => {
                let len = self.controller.listing().len();
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
            }
            Action::ActivateCursor => {
                let focused = self
                    .controller
                    .listing()
                    .stores()
                    .get(self.cursor)
                    .map(|s| s.id);
                if let Some(id) = focused {
                    self.dispatch(Event::Activate(id));
                }
            }
            Action::EnterSearch => self.input = InputMode::Search,
            Action::LeaveSearch => self.input = InputMode::Normal,
            Action::Apply(event) => self.dispatch(event),
            Action::Ignore => {}
        }
    }

    fn dispatch(&mut self, event: Event) {
        self.status = None;
        let effect = self.controller.apply(event);

        let len = self.controller.listing().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));

        match effect {
            Some(Effect::ScrollTo(id)) => self.pending_scroll = Some(id),
            Some(Effect::OpenUrl { store, url }) => self.open_directions(store, &url),
            None => {}
        }
    }

    fn open_directions(&mut self, store: StoreId, url: &str) {
        let name = self
            .controller
            .catalog()
            .get(store)
            .map_or_else(|| store.to_string(), |s| s.name.clone());

        self.status = Some(match open::that_detached(url) {
            Ok(()) => format!("Opened directions to {name}"),
            Err(e) => {
                tracing::warn!(store = %name, error = %e, "failed to launch browser");
                format!("Could not open a browser: {url}")
            }
        });
    }

    /// Resolve the grid's first visible row for a viewport of `shape`.
    ///
    /// A pending scroll request wins over cursor following; it is dropped
    /// once consumed or when its card is not in the listing.
    pub(crate) fn scroll_for(&mut self, shape: grid::GridShape) -> usize {
        let listing = self.controller.listing();
        match self.pending_scroll.take() {
            Some(id) => {
                if let Some(index) = listing.position_of(id) {
                    self.cursor = index;
                    self.first_row = shape.centre_on(index);
                }
            }
            None => self.first_row = shape.follow(self.first_row, self.cursor),
        }
        self.first_row
    }
}

#[cfg(test)]
mod tests {
    use aisles_core::{ProjectionSettings, Selection, Viewport};

    use super::*;

    fn app() -> App {
        App::new(ViewController::new(
            Catalog::seed().unwrap(),
            ViewState::default(),
            &ProjectionSettings::Fit { padding: 40.0 },
            Viewport {
                width: 800.0,
                height: 600.0,
            },
            "https://maps.example",
        ))
    }

    #[test]
    fn activate_cursor_selects_focused_store() {
        let mut app = app();
        app.handle(Action::CursorDown);
        app.handle(Action::ActivateCursor);
        // Name order: Dragon Market, Saigon Market, ...
        assert_eq!(app.controller.state().selection, Selection::Selected(6));
        assert_eq!(app.pending_scroll, Some(6));
    }

    #[test]
    fn cursor_stays_within_listing() {
        let mut app = app();
        app.handle(Action::CursorUp);
        assert_eq!(app.cursor, 0);
        for _ in 0..10 {
            app.handle(Action::CursorDown);
        }
        assert_eq!(app.cursor, 5);
        app.handle(Action::Apply(Event::SetSearch("seoul".to_string())));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn pending_scroll_centres_and_moves_cursor() {
        let mut app = app();
        app.handle(Action::Apply(Event::Activate(1)));
        let shape = grid::GridShape::new(40, 3 * grid::CARD_HEIGHT, 6);
        // Tokyo Mart is last by name.
        assert_eq!(app.scroll_for(shape), 3);
        assert_eq!(app.cursor, 5);
        assert_eq!(app.pending_scroll, None);
    }

    #[test]
    fn later_state_wins_over_stale_scroll() {
        let mut app = app();
        app.handle(Action::Apply(Event::Activate(1)));
        app.handle(Action::Apply(Event::SetSearch("seoul".to_string())));
        let shape = grid::GridShape::new(40, 3 * grid::CARD_HEIGHT, 1);
        assert_eq!(app.scroll_for(shape), 0);
        assert_eq!(app.pending_scroll, None);
    }

    #[test]
    fn search_mode_round_trip() {
        let mut app = app();
        app.handle(Action::EnterSearch);
        assert_eq!(app.input, InputMode::Search);
        app.handle(Action::Apply(Event::AppendSearch('t')));
        app.handle(Action::LeaveSearch);
        assert_eq!(app.input, InputMode::Normal);
        assert_eq!(app.controller.state().query.search, "t");
    }

    #[test]
    fn session_error_outlives_restore_error() {
        let restore = || Err(std::io::Error::other("restore failed"));

        let err = finish_session(Err(anyhow::anyhow!("read failed")), restore()).unwrap_err();
        assert_eq!(err.to_string(), "read failed");

        let err = finish_session(Ok(()), restore()).unwrap_err();
        assert_eq!(err.to_string(), "restore failed");

        assert!(finish_session(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = app();
        app.handle(Action::Quit);
        assert!(app.quit);
    }
}
