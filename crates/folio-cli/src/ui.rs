use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use folio_core::actions::Key;
use folio_core::actions::UserAction;
use folio_core::catalog::card;
use folio_core::catalog::Project;
use folio_core::catalog::ProjectStatus;
use folio_core::mount_gate::theme_toggle_view;
use folio_core::mount_gate::ToggleView;
use folio_core::navigation::Location;
use folio_core::navigation::Route;
use folio_core::navigation::FOCUS_AREAS;
use folio_core::navigation::NAVIGATION;
use folio_core::persistence::PreferenceStore;
use folio_core::state::SiteState;
use folio_core::theme::EffectiveTheme;
use folio_core::theme::ThemePreference;
use folio_host::SiteRuntime;

use crate::config::SiteConfig;

const TICK: Duration = Duration::from_millis(100);
const CARD_HEIGHT: u16 = 9;
/// Terminal cells reserved for the theme toggle, placeholder included.
const TOGGLE_CELLS: u16 = 3;

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

/// Selection state that belongs to the terminal shell, not the site.
#[derive(Debug, Default)]
struct Cursor {
    menu: usize,
    focus: usize,
    /// First card row shown on the projects page.
    scroll: usize,
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    fg: Color,
    bg: Color,
    muted: Color,
    accent: Color,
    honey: Color,
}

impl Palette {
    fn for_theme(theme: EffectiveTheme) -> Self {
        match theme {
            EffectiveTheme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Rgb(37, 99, 235),
                honey: Color::Rgb(214, 158, 46),
            },
            EffectiveTheme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                muted: Color::Gray,
                accent: Color::Rgb(96, 165, 250),
                honey: Color::Rgb(246, 193, 66),
            },
        }
    }

    fn base(self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

pub fn run<S: PreferenceStore>(
    runtime: &mut SiteRuntime<S>,
    site: &SiteConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
    let _guard = TuiGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    run_app(&mut terminal, runtime, site)?;
    Ok(())
}

fn run_app<B: Backend, S: PreferenceStore>(
    terminal: &mut Terminal<B>,
    runtime: &mut SiteRuntime<S>,
    site: &SiteConfig,
) -> io::Result<()> {
    let mut cursor = Cursor::default();
    loop {
        if runtime.take_frame_request() {
            redraw(terminal, runtime, site, &mut cursor)?;
        }
        runtime.pump();

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            // Resize and focus events just need a repaint.
            redraw(terminal, runtime, site, &mut cursor)?;
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(());
        }

        // Every key goes through the global key stream first.
        if let Some(mapped) = map_key(key.code) {
            runtime.key_down(mapped);
        }

        let menu_open = runtime.state().menu.is_open();
        let route = runtime.state().location.route;
        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('m') => runtime.dispatch(UserAction::ToggleMenu.into()),
            KeyCode::Char('t') => runtime.dispatch(UserAction::ToggleTheme.into()),
            KeyCode::Char('s') => runtime.dispatch(
                UserAction::SetThemePreference(ThemePreference::System).into(),
            ),
            KeyCode::Char(digit @ '1'..='4') => {
                let index = digit as usize - '1' as usize;
                runtime.dispatch(UserAction::Navigate(Location::new(NAVIGATION[index])).into());
            }
            KeyCode::Char('f') => {
                let next = next_filter(runtime.state());
                cursor.scroll = 0;
                runtime.dispatch(UserAction::SetFilter(next).into());
            }
            KeyCode::Up if menu_open => {
                cursor.menu = cursor.menu.checked_sub(1).unwrap_or(NAVIGATION.len() - 1);
                redraw(terminal, runtime, site, &mut cursor)?;
            }
            KeyCode::Down if menu_open => {
                cursor.menu = (cursor.menu + 1) % NAVIGATION.len();
                redraw(terminal, runtime, site, &mut cursor)?;
            }
            KeyCode::Enter if menu_open => {
                let target = Location::new(NAVIGATION[cursor.menu]);
                runtime.dispatch(UserAction::Navigate(target).into());
            }
            KeyCode::Up if route == Route::Projects => {
                cursor.scroll = cursor.scroll.saturating_sub(1);
                redraw(terminal, runtime, site, &mut cursor)?;
            }
            KeyCode::Down if route == Route::Projects => {
                cursor.scroll += 1;
                redraw(terminal, runtime, site, &mut cursor)?;
            }
            KeyCode::Left if route == Route::Home => {
                cursor.focus = cursor.focus.checked_sub(1).unwrap_or(FOCUS_AREAS.len() - 1);
                redraw(terminal, runtime, site, &mut cursor)?;
            }
            KeyCode::Right if route == Route::Home => {
                cursor.focus = (cursor.focus + 1) % FOCUS_AREAS.len();
                redraw(terminal, runtime, site, &mut cursor)?;
            }
            KeyCode::Enter if route == Route::Home => {
                let target = FOCUS_AREAS[cursor.focus].location();
                runtime.dispatch(UserAction::Navigate(target).into());
            }
            _ => {}
        }
    }
}

fn redraw<B: Backend, S: PreferenceStore>(
    terminal: &mut Terminal<B>,
    runtime: &mut SiteRuntime<S>,
    site: &SiteConfig,
    cursor: &mut Cursor,
) -> io::Result<()> {
    let root = runtime.root_theme();
    runtime.render(|state| {
        terminal
            .draw(|frame| draw(frame, state, root, site, cursor))
            .map(|_| ())
    })
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Cycles through the catalog's tags, then back to the unfiltered listing.
fn next_filter(state: &SiteState) -> Option<String> {
    let tags = state.catalog.tags();
    let next = match state.active_filter() {
        None => tags.first(),
        Some(current) => tags
            .iter()
            .position(|tag| *tag == current)
            .and_then(|index| tags.get(index + 1)),
    };
    next.map(|tag| tag.to_string())
}

fn draw(frame: &mut Frame, state: &SiteState, root: EffectiveTheme, site: &SiteConfig, cursor: &mut Cursor) {
    let palette = Palette::for_theme(root);
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, chunks[0], state, site, palette);
    match state.location.route {
        Route::Home => draw_home(frame, chunks[1], site, palette, cursor),
        Route::Projects => draw_projects(frame, chunks[1], state, palette, &mut cursor.scroll),
        Route::About => draw_about(frame, chunks[1], site, palette),
        Route::Contact => draw_contact(frame, chunks[1], palette),
    }
    draw_footer(frame, chunks[2], state, palette);

    if state.menu.is_open() {
        draw_mobile_nav(frame, chunks[1], state, palette, cursor);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, state: &SiteState, site: &SiteConfig, palette: Palette) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(TOGGLE_CELLS + 4),
        ])
        .split(inner);

    let mut spans = vec![
        Span::styled(
            site.owner_name.clone(),
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];
    for (index, route) in NAVIGATION.iter().enumerate() {
        let style = if *route == state.location.route {
            Style::default().fg(palette.accent).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(format!("{} {}", index + 1, route.label()), style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), columns[0]);

    let toggle = match theme_toggle_view(&state.mount, &state.theme) {
        ToggleView::Placeholder { .. } => Span::raw(" ".repeat(TOGGLE_CELLS as usize)),
        ToggleView::Ready { effective, .. } => {
            let glyph = if effective.is_dark() { " ☾ " } else { " ☀ " };
            Span::styled(glyph, Style::default().fg(palette.honey))
        }
    };
    let menu = if state.menu.is_open() { " ✕" } else { " ☰" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![toggle, Span::raw(menu)])).alignment(Alignment::Right),
        columns[1],
    );
}

fn draw_mobile_nav(frame: &mut Frame, body: Rect, state: &SiteState, palette: Palette, cursor: &Cursor) {
    let width = body.width.min(28);
    let height = (NAVIGATION.len() as u16 + 4).min(body.height);
    let area = Rect {
        x: body.x + body.width.saturating_sub(width),
        y: body.y,
        width,
        height,
    };
    let mut lines: Vec<Line> = NAVIGATION
        .iter()
        .enumerate()
        .map(|(index, route)| {
            let marker = if index == cursor.menu { "> " } else { "  " };
            let style = if *route == state.location.route {
                Style::default().fg(palette.accent)
            } else {
                Style::default().fg(palette.fg)
            };
            Line::styled(format!("{marker}{}", route.label()), style)
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "  View Work",
        Style::default().fg(palette.honey).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).style(palette.base()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Navigation ")
                .border_style(Style::default().fg(palette.accent)),
        ),
        area,
    );
}

fn draw_home(frame: &mut Frame, area: Rect, site: &SiteConfig, palette: Palette, cursor: &Cursor) {
    let first_name = site.owner_name.split_whitespace().next().unwrap_or_default();
    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("Hi, I'm ", Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
            Span::styled(
                first_name.to_string(),
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
        Line::styled(site.tagline.clone(), Style::default().fg(palette.muted)),
        Line::raw(""),
        Line::styled("[ View My Projects: press 2 ]", Style::default().fg(palette.honey)),
        Line::raw(""),
        Line::styled("About Me", Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
        Line::styled(
            "I am a product builder fascinated in the intersection of data, technology, psychology and education.",
            Style::default().fg(palette.muted),
        ),
        Line::raw(""),
    ];
    let areas: Vec<Span> = FOCUS_AREAS
        .iter()
        .enumerate()
        .flat_map(|(index, focus)| {
            let style = if index == cursor.focus {
                Style::default().fg(palette.accent).add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(palette.fg)
            };
            [
                Span::styled(format!(" {} {} ", focus.icon, focus.label), style),
                Span::raw("   "),
            ]
        })
        .collect();
    lines.push(Line::from(areas));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridWindow {
    first_row: usize,
    rows: usize,
    hidden_above: usize,
    hidden_below: usize,
}

/// Card rows that fit on screen, with `scroll` clamped so the last row stays
/// reachable and the window never runs past it.
fn grid_window(cards: usize, per_row: usize, rows_fit: usize, scroll: usize) -> GridWindow {
    let total_rows = cards.div_ceil(per_row);
    let rows_fit = rows_fit.max(1);
    let first_row = scroll.min(total_rows.saturating_sub(rows_fit));
    let rows = rows_fit.min(total_rows - first_row);
    let hidden_above = first_row * per_row;
    GridWindow {
        first_row,
        rows,
        hidden_above,
        hidden_below: cards.saturating_sub((first_row + rows) * per_row),
    }
}

fn draw_projects(frame: &mut Frame, area: Rect, state: &SiteState, palette: Palette, scroll: &mut usize) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let projects = state.visible_projects();
    let grid = rows[1];
    let per_row = if grid.width >= 100 { 3 } else if grid.width >= 60 { 2 } else { 1 };
    let window = grid_window(
        projects.len(),
        per_row,
        (grid.height / CARD_HEIGHT) as usize,
        *scroll,
    );
    *scroll = window.first_row;

    let filter = match state.active_filter() {
        Some(tag) => format!("Filtered by \"{tag}\"  (f: next tag)"),
        None => "All projects  (f: filter by tag)".to_string(),
    };
    let more = match (window.hidden_above, window.hidden_below) {
        (0, 0) => String::new(),
        (above, below) => format!("{above} above · {below} more below  (↑/↓ scroll)"),
    };
    frame.render_widget(
        Paragraph::new(vec![
            Line::styled("My Projects", Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
            Line::styled(filter, Style::default().fg(palette.muted)),
            Line::styled(more, Style::default().fg(palette.honey)),
        ])
        .alignment(Alignment::Center),
        rows[0],
    );

    if projects.is_empty() {
        frame.render_widget(
            Paragraph::new("No projects match this filter.")
                .style(Style::default().fg(palette.muted))
                .alignment(Alignment::Center),
            grid,
        );
        return;
    }

    let shown = projects
        .chunks(per_row)
        .skip(window.first_row)
        .take(window.rows);
    for (row_index, chunk) in shown.enumerate() {
        let top = row_index as u16 * CARD_HEIGHT;
        let row = Rect {
            x: grid.x,
            y: grid.y + top,
            width: grid.width,
            height: CARD_HEIGHT.min(grid.height.saturating_sub(top)),
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, per_row as u32); per_row])
            .split(row);
        for (project, cell) in chunk.iter().zip(cells.iter()) {
            draw_card(frame, *cell, project, palette);
        }
    }
}

fn draw_card(frame: &mut Frame, area: Rect, project: &Project, palette: Palette) {
    let card = card(project);
    let badge = Span::styled(
        format!(" {} ", project.status.label()),
        Style::default().fg(Color::Black).bg(badge_color(project.status)),
    );
    let button_style = if card.presentation.button_disabled {
        Style::default().fg(palette.muted).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(palette.honey).add_modifier(Modifier::BOLD)
    };
    let button = match &card.link {
        Some(link) => format!("[ {} ] {link}", card.presentation.button_label),
        None => format!("[ {} ]", card.presentation.button_label),
    };
    let lines = vec![
        Line::from(badge),
        Line::styled(project.description.clone(), Style::default().fg(palette.muted)),
        Line::styled(project.tags.join(" · "), Style::default().fg(palette.accent)),
        Line::styled(button, button_style),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", project.title))
                .border_style(Style::default().fg(palette.muted)),
        ),
        area,
    );
}

fn badge_color(status: ProjectStatus) -> Color {
    match status {
        ProjectStatus::Completed => Color::Green,
        ProjectStatus::InProgress => Color::Blue,
        ProjectStatus::Planning => Color::Yellow,
    }
}

fn draw_about(frame: &mut Frame, area: Rect, site: &SiteConfig, palette: Palette) {
    let lines = vec![
        Line::raw(""),
        Line::styled("About", Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled(
            format!(
                "{} builds products where data, technology, psychology and education meet.",
                site.owner_name
            ),
            Style::default().fg(palette.muted),
        ),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_contact(frame: &mut Frame, area: Rect, palette: Palette) {
    let lines = vec![
        Line::raw(""),
        Line::styled(
            "Interested in collaborating?",
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            "I'm always excited to work on projects that sit at the intersection of my interests.",
            Style::default().fg(palette.muted),
        ),
        Line::raw(""),
        Line::styled("[ Get In Touch ]", Style::default().fg(palette.honey).add_modifier(Modifier::BOLD)),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &SiteState, palette: Palette) {
    let hints = if state.menu.is_open() {
        "↑/↓ select · enter go · esc close · q quit"
    } else {
        "1-4 pages · m menu · t theme · s system theme · f filter · q quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(state.location.href(), Style::default().fg(palette.accent)),
            Span::raw("  "),
            Span::styled(hints, Style::default().fg(palette.muted)),
        ])),
        area,
    );
}
