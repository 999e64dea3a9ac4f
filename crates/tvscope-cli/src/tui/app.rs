//! Browser application model and terminal session driver.
//!
//! Fetches run as spawned tasks that report back over an in-process
//! channel; the event loop multiplexes terminal input, settled fetches,
//! and the search debounce timer on one thread. All state transitions
//! go through the controllers in [`super::state`], so superseded
//! responses are dropped at the moment they arrive.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tvscope_api::tmdb::{
    Episode, FetchError, LocalCatalogApi, SIZE_W500, SearchTvParams, TmdbClient, TvShow,
    TvShowDetails, TvShowPage, image_url,
};

use super::state::detail::{DetailPane, DetailRequest, DetailState};
use super::state::home::{Category, HomeState};
use super::state::search::{SearchRequest, SearchState};
use super::ui;

/// A settled fetch delivered back to the event loop.
#[derive(Debug)]
pub enum CatalogEvent {
    /// One home category rail settled.
    Category {
        /// Rail the result belongs to.
        category: Category,
        /// Fetch outcome.
        result: Result<Vec<TvShow>, FetchError>,
    },
    /// A show header settled.
    Detail {
        /// Show the result belongs to.
        show_id: u64,
        /// Fetch outcome.
        result: Result<TvShowDetails, FetchError>,
    },
    /// A similar-shows rail settled.
    Similar {
        /// Show the result belongs to.
        show_id: u64,
        /// Fetch outcome.
        result: Result<Vec<TvShow>, FetchError>,
    },
    /// One season's episode list settled.
    Episodes {
        /// Show the result belongs to.
        show_id: u64,
        /// Season the episodes were requested for.
        season_number: u32,
        /// Fetch outcome.
        result: Result<Vec<Episode>, FetchError>,
    },
    /// A search request settled.
    Search {
        /// Sequence tag of the issuing request.
        seq: u64,
        /// Fetch outcome.
        result: Result<TvShowPage, FetchError>,
    },
}

/// Active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Category rails and featured panel.
    Home,
    /// One show with seasons, episodes and similar shows.
    Detail,
}

/// Top-level state for one terminal session.
#[derive(Debug)]
pub struct BrowserApp {
    client: Arc<TmdbClient>,
    events: mpsc::UnboundedSender<CatalogEvent>,
    /// Screen currently shown.
    pub screen: Screen,
    /// Home screen state, kept alive across detail visits.
    pub home: HomeState,
    /// Detail screen state while one is open.
    pub detail: Option<DetailState>,
    /// Search overlay state.
    pub search: SearchState,
    /// `true` while the search overlay is open.
    pub search_open: bool,
}

impl BrowserApp {
    /// Creates the app and dispatches the four home category fetches.
    fn new(client: Arc<TmdbClient>, events: mpsc::UnboundedSender<CatalogEvent>) -> Self {
        let (home, categories) = HomeState::new();
        let app = Self {
            client,
            events,
            screen: Screen::Home,
            home,
            detail: None,
            search: SearchState::new(),
            search_open: false,
        };
        for category in categories {
            app.dispatch_category(category);
        }
        app
    }

    /// Applies one settled fetch through the owning controller.
    pub fn apply_event(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::Category { category, result } => {
                self.home.resolve(category, result);
            }
            CatalogEvent::Detail { show_id, result } => {
                let follow_up = self
                    .detail
                    .as_mut()
                    .and_then(|detail| detail.resolve_detail(show_id, result));
                if let Some(request) = follow_up {
                    self.dispatch_detail_request(request);
                }
            }
            CatalogEvent::Similar { show_id, result } => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.resolve_similar(show_id, result);
                }
            }
            CatalogEvent::Episodes {
                show_id,
                season_number,
                result,
            } => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.resolve_episodes(show_id, season_number, result);
                }
            }
            CatalogEvent::Search { seq, result } => {
                self.search.resolve(seq, result);
            }
        }
    }

    /// Applies one key press. Returns `true` when the session should
    /// end.
    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if self.search_open {
            self.handle_search_key(key, now);
            return false;
        }
        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Detail => self.handle_detail_key(key),
        }
    }

    /// Issues the search request whose quiet period has elapsed.
    pub fn issue_due_search(&mut self, now: Instant) {
        if let Some(request) = self.search.take_due_request(now) {
            self.dispatch_search(request);
        }
    }

    /// Deadline of the pending search debounce timer, if any.
    #[must_use]
    pub const fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Handles key input while the search overlay is open.
    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => {
                self.search.clear();
                self.search_open = false;
            }
            KeyCode::Enter => {
                if let Some(show_id) = self.search.selected_show().map(|show| show.id) {
                    self.open_show(show_id);
                }
            }
            KeyCode::Backspace => {
                let mut query = self.search.query.clone();
                query.pop();
                self.search.input(query, now);
            }
            KeyCode::Up => self.search.move_up(),
            KeyCode::Down => self.search.move_down(),
            KeyCode::Char(c) => {
                let mut query = self.search.query.clone();
                query.push(c);
                self.search.input(query, now);
            }
            _ => {}
        }
    }

    /// Handles key input on the home screen. Returns `true` to exit.
    fn handle_home_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('/') => {
                self.search.clear();
                self.search_open = true;
            }
            KeyCode::Tab => self.home.next_category(),
            KeyCode::BackTab => self.home.prev_category(),
            KeyCode::Up | KeyCode::Char('k') => self.home.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.home.move_down(),
            KeyCode::Enter => {
                if let Some(show_id) = self.home.selected_show().map(|show| show.id) {
                    self.open_show(show_id);
                }
            }
            KeyCode::Char('o') => self.open_selected_image(),
            _ => {}
        }
        false
    }

    /// Handles key input on the detail screen. Returns `true` to exit.
    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Backspace => {
                // Back to home; anything still in flight for this show
                // is dropped by the show-id guards when it lands.
                self.detail = None;
                self.screen = Screen::Home;
            }
            KeyCode::Char('/') => {
                self.search.clear();
                self.search_open = true;
            }
            KeyCode::Tab => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.focus_next_pane();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.move_up();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.move_down();
                }
            }
            KeyCode::Enter => self.activate_detail_selection(),
            KeyCode::Char('o') => self.open_selected_image(),
            _ => {}
        }
        false
    }

    /// Navigates to a show's detail screen, replacing any open one.
    fn open_show(&mut self, show_id: u64) {
        if self.search_open {
            self.search.clear();
            self.search_open = false;
        }
        let (detail, requests) = DetailState::open(show_id);
        self.detail = Some(detail);
        self.screen = Screen::Detail;
        for request in requests {
            self.dispatch_detail_request(request);
        }
    }

    fn activate_detail_selection(&mut self) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        match detail.pane {
            DetailPane::Seasons => {
                let request = detail
                    .season_under_cursor()
                    .and_then(|season_number| detail.select_season(season_number));
                if let Some(request) = request {
                    self.dispatch_detail_request(request);
                }
            }
            DetailPane::Similar => {
                let show_id = detail.selected_similar().map(|show| show.id);
                if let Some(show_id) = show_id {
                    self.open_show(show_id);
                }
            }
            DetailPane::Episodes => {}
        }
    }

    /// Opens the current show's backdrop (or poster when there is
    /// none) in the system browser.
    fn open_selected_image(&self) {
        let path = match self.screen {
            Screen::Home => self.home.selected_show().and_then(|show| {
                show.backdrop_path
                    .clone()
                    .or_else(|| show.poster_path.clone())
            }),
            Screen::Detail => self
                .detail
                .as_ref()
                .and_then(|detail| detail.detail.ready())
                .and_then(|details| {
                    details
                        .backdrop_path
                        .clone()
                        .or_else(|| details.poster_path.clone())
                }),
        };
        if let Some(path) = path {
            let url = image_url(Some(&path), SIZE_W500);
            if let Err(error) = open::that(&url) {
                tracing::warn!(%error, %url, "failed to open image in browser");
            }
        }
    }

    fn dispatch_category(&self, category: Category) {
        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = match category {
                Category::Trending => client.trending().await,
                Category::Popular => client.popular().await,
                Category::TopRated => client.top_rated().await,
                Category::AiringToday => client.airing_today().await,
            };
            let _ = events.send(CatalogEvent::Category { category, result });
        });
    }

    fn dispatch_detail_request(&self, request: DetailRequest) {
        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match request {
                DetailRequest::Detail(show_id) => CatalogEvent::Detail {
                    show_id,
                    result: client.tv_details(show_id).await,
                },
                DetailRequest::Similar(show_id) => CatalogEvent::Similar {
                    show_id,
                    result: client.similar(show_id).await,
                },
                DetailRequest::Episodes {
                    show_id,
                    season_number,
                } => CatalogEvent::Episodes {
                    show_id,
                    season_number,
                    result: client.season_episodes(show_id, season_number).await,
                },
            };
            let _ = events.send(event);
        });
    }

    fn dispatch_search(&self, request: SearchRequest) {
        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        tokio::spawn(async move {
            let params = SearchTvParams::new(request.query);
            let result = client.search_tv(&params).await;
            let _ = events.send(CatalogEvent::Search {
                seq: request.seq,
                result,
            });
        });
    }
}

/// Runs the interactive catalog browser until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser(client: TmdbClient) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut app = BrowserApp::new(Arc::new(client), events_tx);

    let result = run_event_loop(&mut terminal, &mut app, events_rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut BrowserApp,
    mut events: mpsc::UnboundedReceiver<CatalogEvent>,
) -> Result<()> {
    let mut input = EventStream::new();
    loop {
        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("failed to draw TUI")?;

        let debounce = app.search_deadline();
        tokio::select! {
            maybe_event = input.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if app.on_key(key, Instant::now()) {
                            return Ok(());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        return Err(error).context("failed to read terminal event");
                    }
                    None => return Ok(()),
                }
            }
            Some(event) = events.recv() => {
                app.apply_event(event);
                // Settle everything already queued before redrawing.
                while let Ok(event) = events.try_recv() {
                    app.apply_event(event);
                }
            }
            () = sleep_until(debounce) => {
                app.issue_due_search(Instant::now());
            }
        }
    }
}

/// Sleeps until `deadline`, or forever when none is pending.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
