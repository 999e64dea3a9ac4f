//! TUI rendering logic for the catalog browser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use tvscope_api::tmdb::TvShow;

use super::app::{BrowserApp, Screen};
use super::state::detail::{DetailPane, DetailState};
use super::state::home::{Category, HomeState};
use super::state::remote::Remote;
use super::state::search::{SearchPhase, SearchState};

/// Draws the active screen and the search overlay on top of it.
pub fn draw(frame: &mut Frame, app: &BrowserApp) {
    match (app.screen, app.detail.as_ref()) {
        (Screen::Detail, Some(detail)) => draw_detail(frame, detail),
        _ => draw_home(frame, &app.home),
    }
    if app.search_open {
        draw_search_overlay(frame, &app.search);
    }
}

/// Draws the home screen: featured panel, category tabs, show list.
#[allow(clippy::indexing_slicing)]
fn draw_home(frame: &mut Frame, home: &HomeState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // featured
            Constraint::Length(3), // category tabs
            Constraint::Min(5),    // show list
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_featured(frame, chunks[0], home);
    draw_category_tabs(frame, chunks[1], home);
    draw_show_list(frame, chunks[2], home);
    draw_footer(
        frame,
        chunks[3],
        "Tab: category  \u{2191}\u{2193}/j/k: move  Enter: open  /: search  o: poster  q: quit",
    );
}

/// Draws the featured show panel.
fn draw_featured(frame: &mut Frame, area: Rect, home: &HomeState) {
    let lines = if home.is_loading() {
        vec![Line::from("Loading...")]
    } else {
        home.featured().map_or_else(
            || vec![Line::from("Nothing is trending right now.")],
            |show| {
                vec![
                    Line::from(Span::styled(
                        show.name.clone(),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!(
                        "{}  \u{2605} {}",
                        fmt_year(show.first_air_date.as_deref()),
                        fmt_rating(show.vote_average)
                    )),
                    Line::from(""),
                    Line::from(show.overview.clone()),
                ]
            },
        )
    };

    let featured = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Featured "));
    frame.render_widget(featured, area);
}

/// Draws the category tab bar.
fn draw_category_tabs(frame: &mut Frame, area: Rect, home: &HomeState) {
    let mut spans: Vec<Span> = Vec::new();
    for category in Category::ALL {
        let style = if category == home.category {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(category.label(), style));
        spans.push(Span::raw("   "));
    }

    let tabs = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Categories "));
    frame.render_widget(tabs, area);
}

/// Draws the show list of the selected category.
fn draw_show_list(frame: &mut Frame, area: Rect, home: &HomeState) {
    let items: Vec<ListItem> = if home.is_loading() {
        vec![ListItem::new("Loading...")]
    } else {
        home.current_shows()
            .iter()
            .enumerate()
            .map(|(i, show)| show_row(show, i == home.cursor))
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", home.category.label())),
    );
    frame.render_widget(list, area);
}

/// Draws the show detail screen.
#[allow(clippy::indexing_slicing)]
fn draw_detail(frame: &mut Frame, detail: &DetailState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // header
            Constraint::Min(5),    // panes
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_detail_header(frame, chunks[0], detail);

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22),
            Constraint::Percentage(48),
            Constraint::Percentage(30),
        ])
        .split(chunks[1]);

    draw_seasons_pane(frame, pane_chunks[0], detail);
    draw_episodes_pane(frame, pane_chunks[1], detail);
    draw_similar_pane(frame, pane_chunks[2], detail);

    draw_footer(
        frame,
        chunks[2],
        "Tab: pane  \u{2191}\u{2193}/j/k: move  Enter: select  Esc: back  /: search  o: poster  q: quit",
    );
}

/// Draws the show header: name, meta line and overview.
fn draw_detail_header(frame: &mut Frame, area: Rect, detail: &DetailState) {
    let lines = if detail.header_loading() {
        vec![Line::from("Loading...")]
    } else {
        match &detail.detail {
            Remote::Ready(details) => {
                let mut meta = format!(
                    "{}  \u{2605} {}  {} seasons  {} episodes",
                    fmt_year(details.first_air_date.as_deref()),
                    fmt_rating(details.vote_average),
                    details.number_of_seasons,
                    details.number_of_episodes,
                );
                if let Some(status) = &details.status {
                    meta.push_str("  ");
                    meta.push_str(status);
                }
                let mut lines = vec![
                    Line::from(Span::styled(
                        details.name.clone(),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(meta),
                ];
                if !details.tagline.is_empty() {
                    lines.push(Line::from(Span::styled(
                        details.tagline.clone(),
                        Style::default().add_modifier(Modifier::ITALIC),
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(details.overview.clone()));
                lines
            }
            Remote::Loading | Remote::Failed => {
                vec![Line::from(Span::styled(
                    "Show not found.",
                    Style::default().fg(Color::Red),
                ))]
            }
        }
    };

    let header = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    frame.render_widget(header, area);
}

/// Draws the season selector (left pane). Specials are not listed.
fn draw_seasons_pane(frame: &mut Frame, area: Rect, detail: &DetailState) {
    let is_active = detail.pane == DetailPane::Seasons;

    let items: Vec<ListItem> = detail
        .selectable_seasons()
        .iter()
        .enumerate()
        .map(|(i, season)| {
            let marker = if i == detail.season_cursor && is_active {
                "\u{25b8} "
            } else {
                "  "
            };
            let style = if i == detail.season_cursor && is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if detail.selected_season == Some(season.season_number) {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(String::from(marker)),
                Span::styled(
                    format!("{} ({})", season.name, season.episode_count),
                    style,
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border(is_active))
            .title(" Seasons "),
    );
    frame.render_widget(list, area);
}

/// Draws the episode table (center pane).
fn draw_episodes_pane(frame: &mut Frame, area: Rect, detail: &DetailState) {
    let is_active = detail.pane == DetailPane::Episodes;

    let items: Vec<ListItem> = match &detail.episodes {
        Remote::Loading => vec![ListItem::new("Loading...")],
        Remote::Ready(episodes) if episodes.is_empty() => {
            vec![ListItem::new("No episodes available.")]
        }
        Remote::Ready(episodes) => episodes
            .iter()
            .enumerate()
            .map(|(i, episode)| {
                let style = if i == detail.episode_cursor && is_active {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let runtime = fmt_runtime(episode.runtime);
                ListItem::new(Line::from(Span::styled(
                    format!(
                        "E{:>2}  {}  {}  \u{2605} {}",
                        episode.episode_number,
                        episode.name,
                        runtime,
                        fmt_rating(episode.vote_average)
                    ),
                    style,
                )))
            })
            .collect(),
        Remote::Failed => vec![ListItem::new("No episodes available.")],
    };

    let title = detail.selected_season.map_or_else(
        || String::from(" Episodes "),
        |season_number| format!(" Season {season_number} "),
    );
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border(is_active))
            .title(title),
    );
    frame.render_widget(list, area);
}

/// Draws the similar shows list (right pane).
fn draw_similar_pane(frame: &mut Frame, area: Rect, detail: &DetailState) {
    let is_active = detail.pane == DetailPane::Similar;

    let items: Vec<ListItem> = match &detail.similar {
        Remote::Loading => vec![ListItem::new("Loading...")],
        Remote::Ready(shows) if shows.is_empty() => {
            vec![ListItem::new("No similar shows found.")]
        }
        Remote::Ready(shows) => shows
            .iter()
            .enumerate()
            .map(|(i, show)| show_row(show, i == detail.similar_cursor && is_active))
            .collect(),
        Remote::Failed => vec![ListItem::new("No similar shows found.")],
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border(is_active))
            .title(" Similar "),
    );
    frame.render_widget(list, area);
}

/// Draws the search overlay centered over the active screen.
#[allow(clippy::indexing_slicing)]
fn draw_search_overlay(frame: &mut Frame, search: &SearchState) {
    let area = centered_rect(frame.area(), 60, 16);
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let input = Paragraph::new(search.query.clone())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(input, chunks[0]);

    let items: Vec<ListItem> = match search.phase() {
        SearchPhase::Idle => vec![ListItem::new("Type to search.")],
        SearchPhase::Pending => vec![ListItem::new("Searching...")],
        SearchPhase::Settled if search.results.is_empty() => {
            vec![ListItem::new("No results.")]
        }
        SearchPhase::Settled => search
            .results
            .iter()
            .enumerate()
            .map(|(i, show)| show_row(show, i == search.cursor))
            .collect(),
    };

    let results = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Results "),
    );
    frame.render_widget(results, chunks[1]);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, help_text: &str) {
    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// One show row with cursor marker, name, year and rating.
fn show_row(show: &TvShow, is_cursor: bool) -> ListItem<'static> {
    let marker = if is_cursor { "\u{25b8} " } else { "  " };
    let style = if is_cursor {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(vec![
        Span::raw(String::from(marker)),
        Span::styled(
            format!(
                "{}  ({})  \u{2605} {}",
                show.name,
                fmt_year(show.first_air_date.as_deref()),
                fmt_rating(show.vote_average)
            ),
            style,
        ),
    ]))
}

/// Border style for a pane depending on focus.
fn pane_border(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Centers a fixed-height rect of the given width percentage.
#[allow(clippy::indexing_slicing)]
fn centered_rect(area: Rect, width_pct: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(width_pct),
            Constraint::Fill(1),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Year portion of a date string, or `N/A` when absent.
fn fmt_year(date: Option<&str>) -> String {
    date.and_then(|date| date.get(..4))
        .map_or_else(|| String::from("N/A"), String::from)
}

/// Vote average with one decimal place.
fn fmt_rating(vote_average: f64) -> String {
    format!("{vote_average:.1}")
}

/// Runtime in minutes, or empty when unknown.
fn fmt_runtime(runtime: Option<u32>) -> String {
    runtime.map_or_else(String::new, |minutes| format!("{minutes}m"))
}
