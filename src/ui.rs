use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use private_laws_dashboard::stats::{category_breakdown, CategoryCount};
use private_laws_dashboard::{truncate_label, CategoryKind, Dataset, FilterState, PrivateLaw};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Laws,
    Subjects,
    Relief,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Laws => Page::Subjects,
            Page::Subjects => Page::Relief,
            Page::Relief => Page::Laws,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Laws => Page::Relief,
            Page::Subjects => Page::Laws,
            Page::Relief => Page::Subjects,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Laws => "Private Laws",
            Page::Subjects => "Subject Breakdown",
            Page::Relief => "Relief Breakdown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App {
    pub dataset: Dataset,
    pub filters: FilterState,
    /// Indices into dataset.laws matching the current filters
    pub filtered: Vec<usize>,
    pub state: TableState,
    pub subject_state: TableState,
    pub relief_state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
    pub input_mode: InputMode,
}

impl App {
    pub fn new(dataset: Dataset) -> Self {
        let (year_min, year_max) = dataset.year_bounds();

        let mut state = TableState::default();
        if !dataset.is_empty() {
            state.select(Some(0));
        }
        let mut subject_state = TableState::default();
        subject_state.select(Some(0));
        let mut relief_state = TableState::default();
        relief_state.select(Some(0));

        let mut app = Self {
            dataset,
            filters: FilterState::new(year_min, year_max),
            filtered: Vec::new(),
            state,
            subject_state,
            relief_state,
            current_page: Page::Laws,
            show_detail: false,
            input_mode: InputMode::Normal,
        };
        app.apply_filters();
        app
    }

    pub fn apply_filters(&mut self) {
        self.filtered = self
            .dataset
            .laws
            .iter()
            .enumerate()
            .filter(|(_, law)| self.filters.matches(law))
            .map(|(i, _)| i)
            .collect();

        if self.filtered.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn clear_filters(&mut self) {
        let (year_min, year_max) = self.dataset.year_bounds();
        self.filters = FilterState::new(year_min, year_max);
        self.apply_filters();
    }

    pub fn selected_law(&self) -> Option<&PrivateLaw> {
        self.state
            .selected()
            .and_then(|i| self.filtered.get(i))
            .and_then(|&idx| self.dataset.laws.get(idx))
    }

    /// Toggle a category filter from a breakdown page; selecting the
    /// active label again clears it, like clicking the chart twice.
    pub fn toggle_category(&mut self, kind: CategoryKind) {
        let breakdown = self.breakdown(kind);
        let table_state = match kind {
            CategoryKind::Subject => &self.subject_state,
            CategoryKind::Relief => &self.relief_state,
        };
        let Some(row) = table_state.selected() else {
            return;
        };
        let Some(entry) = breakdown.get(row) else {
            return;
        };
        let label = entry.category.clone();

        let slot = match kind {
            CategoryKind::Subject => &mut self.filters.subject,
            CategoryKind::Relief => &mut self.filters.relief,
        };
        if slot.as_deref() == Some(label.as_str()) {
            *slot = None;
        } else {
            *slot = Some(label);
        }
        self.apply_filters();
    }

    pub fn breakdown(&self, kind: CategoryKind) -> Vec<CategoryCount> {
        category_breakdown(&self.dataset.laws, &self.filters, kind)
    }

    pub fn next(&mut self) {
        self.move_selection(1);
    }

    pub fn previous(&mut self) {
        self.move_selection(-1);
    }

    pub fn page_down(&mut self) {
        self.move_selection(20);
    }

    pub fn page_up(&mut self) {
        self.move_selection(-20);
    }

    fn move_selection(&mut self, delta: i64) {
        let len = self.current_list_len();
        if len == 0 {
            return;
        }
        let state = self.current_table_state();
        let current = state.selected().unwrap_or(0) as i64;
        let next = if delta.abs() == 1 {
            // Single steps wrap around, like the original table
            (current + delta).rem_euclid(len as i64)
        } else {
            (current + delta).clamp(0, len as i64 - 1)
        };
        self.current_table_state().select(Some(next as usize));
    }

    fn current_list_len(&self) -> usize {
        match self.current_page {
            Page::Laws => self.filtered.len(),
            Page::Subjects => self.breakdown(CategoryKind::Subject).len(),
            Page::Relief => self.breakdown(CategoryKind::Relief).len(),
        }
    }

    fn current_table_state(&mut self) -> &mut TableState {
        match self.current_page {
            Page::Laws => &mut self.state,
            Page::Subjects => &mut self.subject_state,
            Page::Relief => &mut self.relief_state,
        }
    }

    pub fn select_first(&mut self) {
        if self.current_list_len() > 0 {
            self.current_table_state().select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.current_list_len();
        if len > 0 {
            self.current_table_state().select(Some(len - 1));
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if app.input_mode == InputMode::Search {
                match key.code {
                    KeyCode::Esc => {
                        app.filters.search.clear();
                        app.input_mode = InputMode::Normal;
                        app.apply_filters();
                    }
                    KeyCode::Enter => app.input_mode = InputMode::Normal,
                    KeyCode::Backspace => {
                        app.filters.search.pop();
                        app.apply_filters();
                    }
                    KeyCode::Char(c) => {
                        app.filters.search.push(c);
                        app.apply_filters();
                    }
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('/') => {
                    app.input_mode = InputMode::Search;
                    app.current_page = Page::Laws;
                }
                KeyCode::Enter => match app.current_page {
                    Page::Laws => app.toggle_detail(),
                    Page::Subjects => app.toggle_category(CategoryKind::Subject),
                    Page::Relief => app.toggle_category(CategoryKind::Relief),
                },
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.current_page = app.current_page.previous();
                    } else {
                        app.current_page = app.current_page.next();
                    }
                }
                KeyCode::Char('c') => {
                    app.clear_filters();
                    app.current_page = Page::Laws;
                }
                KeyCode::Char('[') => {
                    let (year_min, _) = app.dataset.year_bounds();
                    app.filters.year_from = (app.filters.year_from - 10).max(year_min);
                    app.apply_filters();
                }
                KeyCode::Char(']') => {
                    app.filters.year_from = (app.filters.year_from + 10).min(app.filters.year_to);
                    app.apply_filters();
                }
                KeyCode::Char('{') => {
                    app.filters.year_to = (app.filters.year_to - 10).max(app.filters.year_from);
                    app.apply_filters();
                }
                KeyCode::Char('}') => {
                    let (_, year_max) = app.dataset.year_bounds();
                    app.filters.year_to = (app.filters.year_to + 10).min(year_max);
                    app.apply_filters();
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.select_first(),
                KeyCode::End => app.select_last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail && app.current_page == Page::Laws {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Law table
                Constraint::Percentage(40), // Info panel
            ])
            .split(chunks[1]);

        render_law_table(f, content_chunks[0], app);
        render_info_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Laws => render_law_table(f, chunks[1], app),
            Page::Subjects => render_breakdown(f, chunks[1], app, CategoryKind::Subject),
            Page::Relief => render_breakdown(f, chunks[1], app, CategoryKind::Relief),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Laws, Page::Subjects, Page::Relief];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("{} laws", app.filtered.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("{} - {}", app.filters.year_from, app.filters.year_to),
        Style::default().fg(Color::Cyan),
    ));

    if let Some(subject) = &app.filters.subject {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("Subject: {}", truncate_label(subject, 25)),
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(relief) = &app.filters.relief {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("Relief: {}", truncate_label(relief, 25)),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_law_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Congress", "Vol", "Ch", "Title", "Date", "Subject"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered.iter().map(|&idx| {
        let law = &app.dataset.laws[idx];
        let cells = vec![
            Cell::from(law.congress_display()),
            Cell::from(law.volume.map(|v| v.to_string()).unwrap_or_default()),
            Cell::from(law.chapter.map(|c| c.to_string()).unwrap_or_default()),
            Cell::from(truncate_label(&law.title, 48)),
            Cell::from(law.date.clone()),
            Cell::from(truncate_label(&law.subject_category, 30))
                .style(Style::default().fg(Color::Blue)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(50),
            Constraint::Length(12),
            Constraint::Length(32),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" Private Laws ({}) ", app.filtered.len())),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_info_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Law Details ");

    let Some(law) = app.selected_law() else {
        let placeholder = Paragraph::new("Select a private law from the table to view details")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let accent = Style::default().fg(Color::Blue);

    let subject = if law.subject_category.is_empty() {
        "Not categorized"
    } else {
        law.subject_category.as_str()
    };
    let relief = if law.relief_category.is_empty() {
        "Not categorized"
    } else {
        law.relief_category.as_str()
    };
    let summary = if law.summary.is_empty() {
        "No summary available."
    } else {
        law.summary.as_str()
    };

    let mut lines = vec![
        Line::from(Span::styled("Title", label)),
        Line::from(Span::styled(law.title.clone(), value)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Congress: ", label),
            Span::styled(law.congress_display(), value),
            Span::styled("   Volume: ", label),
            Span::styled(law.volume.map(|v| v.to_string()).unwrap_or_default(), value),
            Span::styled("   Chapter: ", label),
            Span::styled(law.chapter.map(|c| c.to_string()).unwrap_or_default(), value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Date Enacted: ", label),
            Span::styled(law.display_date(), value),
        ]),
        Line::from(""),
        Line::from(Span::styled("Subject Matter Category", label)),
        Line::from(Span::styled(subject.to_string(), accent)),
        Line::from(""),
        Line::from(Span::styled("Relief Category", label)),
        Line::from(Span::styled(relief.to_string(), accent)),
        Line::from(""),
        Line::from(Span::styled("Summary", label)),
        Line::from(Span::styled(summary.to_string(), value)),
    ];

    if !law.pdf_link.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("PDF: ", label),
            Span::styled(law.pdf_link.clone(), accent),
        ]));
    }
    if !law.details_link.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Congress.gov: ", label),
            Span::styled(law.details_link.clone(), accent),
        ]));
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(panel, area);
}

/// Placeholder shown when a breakdown has no counted rows. The relief
/// column ships unclassified until the categorization pipeline lands, so
/// it gets the "coming soon" wording; an empty subject breakdown just
/// means the current year range matched nothing.
fn empty_breakdown_message(kind: CategoryKind) -> &'static str {
    match kind {
        CategoryKind::Subject => {
            "No subject category data to display\n\
             Widen the year range to bring laws back into view."
        }
        CategoryKind::Relief => {
            "Relief category data coming soon\n\
             This section will populate automatically once data is available."
        }
    }
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &mut App, kind: CategoryKind) {
    let breakdown = app.breakdown(kind);
    let selected_label = match kind {
        CategoryKind::Subject => app.filters.subject.clone(),
        CategoryKind::Relief => app.filters.relief.clone(),
    };
    let has_data = breakdown.iter().any(|c| c.count > 0);

    let title = match kind {
        CategoryKind::Subject => " Subject Breakdown ",
        CategoryKind::Relief => " Relief Breakdown ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(title);

    if !has_data {
        let placeholder = Paragraph::new(empty_breakdown_message(kind))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let header_cells = ["", "Category", "Laws", "Share"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = breakdown.iter().map(|entry| {
        let is_selected = selected_label.as_deref() == Some(entry.category.as_str());
        let marker = if is_selected { "◉" } else { "○" };
        let color = if is_selected { Color::Yellow } else { Color::Gray };

        let cells = vec![
            Cell::from(marker).style(Style::default().fg(color)),
            Cell::from(truncate_label(&entry.category, 52)).style(Style::default().fg(color)),
            Cell::from(format!("{}", entry.count)).style(Style::default().fg(Color::Blue)),
            Cell::from(format!("{:.1}%", entry.percentage)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(54),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    let state = match kind {
        CategoryKind::Subject => &mut app.subject_state,
        CategoryKind::Relief => &mut app.relief_state,
    };
    f.render_stateful_widget(table, area, state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if app.input_mode == InputMode::Search {
        status_spans.push(Span::styled(" Search: ", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::styled(
            format!("{}▌", app.filters.search),
            Style::default().fg(Color::White),
        ));
        status_spans.push(Span::raw("  ("));
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" keep | "));
        status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" clear)"));
    } else {
        let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
        status_spans.push(Span::styled(
            format!(" Row: {}/{} ", selected, app.filtered.len()),
            Style::default().fg(Color::Cyan),
        ));

        if !app.filters.search.is_empty() {
            status_spans.push(Span::raw("| "));
            status_spans.push(Span::styled(
                format!("Search: {} ", app.filters.search),
                Style::default().fg(Color::Green),
            ));
        }

        status_spans.push(Span::raw("| "));
        status_spans.push(Span::styled("/", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Search | "));
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Details/Filter | "));
        status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Page | "));
        status_spans.push(Span::styled("[ ] { }", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Years | "));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Clear | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new(Dataset::sample(300))
    }

    #[test]
    fn test_search_narrows_filtered_set() {
        let mut app = test_app();
        let all = app.filtered.len();

        app.filters.search = "relief of john".to_string();
        app.apply_filters();

        assert!(app.filtered.len() < all);
        assert!(app.filtered.iter().all(|&i| {
            app.dataset.laws[i]
                .title
                .to_lowercase()
                .contains("relief of john")
        }));
    }

    #[test]
    fn test_toggle_category_twice_clears_filter() {
        let mut app = test_app();
        app.current_page = Page::Subjects;
        app.subject_state.select(Some(0));

        app.toggle_category(CategoryKind::Subject);
        assert!(app.filters.subject.is_some(), "First toggle selects");

        app.toggle_category(CategoryKind::Subject);
        assert!(app.filters.subject.is_none(), "Second toggle clears");
    }

    #[test]
    fn test_clear_filters_restores_full_dataset() {
        let mut app = test_app();
        app.filters.subject = Some("Defense".to_string());
        app.filters.search = "mary".to_string();
        app.apply_filters();
        let narrowed = app.filtered.len();

        app.clear_filters();

        assert!(app.filtered.len() >= narrowed);
        assert_eq!(app.filtered.len(), app.dataset.len());
    }

    #[test]
    fn test_empty_breakdown_message_names_its_own_column() {
        let subject = empty_breakdown_message(CategoryKind::Subject);
        let relief = empty_breakdown_message(CategoryKind::Relief);

        assert!(subject.contains("subject category"), "Subject page keeps its own wording");
        assert!(!subject.contains("Relief"));
        assert!(relief.contains("Relief category data coming soon"));
    }

    #[test]
    fn test_selection_wraps_on_single_step() {
        let mut app = test_app();
        app.select_last();
        app.next();
        assert_eq!(app.state.selected(), Some(0), "Down from last wraps to first");

        app.previous();
        assert_eq!(
            app.state.selected(),
            Some(app.filtered.len() - 1),
            "Up from first wraps to last"
        );
    }
}
