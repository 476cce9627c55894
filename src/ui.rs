use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kr_regnum::{mask_input, validate, IdKind, ValidationResult};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use tracing::info;

const MAX_INPUT: usize = 32;
const MAX_HISTORY: usize = 200;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub kind: IdKind,
    /// Masked when the digit count matched, as typed otherwise
    pub shown: String,
    pub result: ValidationResult,
}

pub struct App {
    pub kind: IdKind,
    pub input: String,
    pub result: Option<ValidationResult>,
    pub history: Vec<HistoryEntry>,
    pub history_state: TableState,
}

impl App {
    pub fn new(kind: IdKind) -> Self {
        Self {
            kind,
            input: String::new(),
            result: None,
            history: Vec::new(),
            history_state: TableState::default(),
        }
    }

    fn revalidate(&mut self) {
        self.result = if self.input.is_empty() {
            None
        } else {
            Some(validate(self.kind, &self.input))
        };
    }

    pub fn next_kind(&mut self) {
        self.kind = self.kind.next();
        self.revalidate();
    }

    pub fn previous_kind(&mut self) {
        self.kind = self.kind.previous();
        self.revalidate();
    }

    pub fn push_char(&mut self, c: char) {
        if self.input.chars().count() >= MAX_INPUT || c.is_control() {
            return;
        }
        self.input.push(c);
        self.revalidate();
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.revalidate();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.result = None;
    }

    /// Move the current input into history (newest first)
    pub fn commit(&mut self) {
        let result = match self.result.take() {
            Some(result) => result,
            None => return,
        };

        let shown = mask_input(self.kind, &self.input).unwrap_or_else(|_| self.input.clone());
        self.history.insert(
            0,
            HistoryEntry {
                kind: self.kind,
                shown,
                result,
            },
        );
        self.history.truncate(MAX_HISTORY);
        self.history_state.select(Some(0));
        self.input.clear();
    }

    pub fn next(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let i = match self.history_state.selected() {
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.history_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let i = self.history_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.history_state.select(Some(i));
    }

    pub fn valid_count(&self) -> usize {
        self.history.iter().filter(|h| h.result.is_valid).count()
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

    res?;
    info!(checked = app.history.len(), valid = app.valid_count(), "checker closed");

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_kind();
                    } else {
                        app.next_kind();
                    }
                }
                KeyCode::BackTab => app.previous_kind(),
                KeyCode::Enter => app.commit(),
                KeyCode::Backspace => app.backspace(),
                KeyCode::Delete => app.clear_input(),
                KeyCode::Down => app.next(),
                KeyCode::Up => app.previous(),
                KeyCode::Char(c) => app.push_char(c),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Kind tabs
            Constraint::Length(3), // Input
            Constraint::Length(8), // Result
            Constraint::Min(0),    // History
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_input(f, chunks[1], app);
    render_result(f, chunks[2], app);
    render_history(f, chunks[3], app);
    render_status_bar(f, chunks[4], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, kind) in IdKind::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *kind == app.kind {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(
            format!("{} ({}자리)", kind.label(), kind.length()),
            style,
        ));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("✓ {}", app.valid_count()),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("✗ {}", app.history.len() - app.valid_count()),
        Style::default().fg(Color::Red),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let color = match &app.result {
        Some(r) if r.is_valid => Color::Green,
        Some(_) => Color::Red,
        None => Color::White,
    };

    let input = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(app.input.as_str(), Style::default().fg(color)),
        Span::styled("▏", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", app.kind.label())),
    );

    f.render_widget(input, area);
}

fn field(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {}: ", name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn render_result(f: &mut Frame, area: Rect, app: &App) {
    let mut content = vec![];

    match &app.result {
        None => content.push(Line::from(Span::styled(
            "  번호를 입력하세요",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))),
        Some(result) => {
            let (mark, color) = if result.is_valid {
                ("✓", Color::Green)
            } else {
                ("✗", Color::Red)
            };
            content.push(Line::from(Span::styled(
                format!("  {} {}", mark, result.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));

            if let Some(details) = &result.details {
                let checksum = if details.checksum_passed { "passed" } else { "failed" };
                content.push(field("Checksum", checksum.to_string()));

                if let Some(t) = details.business_type {
                    content.push(field("Type", format!("{} ({})", t.label(), t.as_str())));
                }
                if let Some(info) = &details.resident {
                    let birth = info
                        .birth_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "invalid date".to_string());
                    content.push(field("Birth", birth));
                    content.push(field("Gender", info.gender.label().to_string()));
                    content.push(field("Foreigner", info.foreigner.to_string()));
                }
                if let Some(info) = &details.corporate {
                    content.push(field("Registry office", info.registry_office.clone()));
                    content.push(field("Kind code", info.kind_code.clone()));
                }
            }
        }
    }

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Result "),
    );

    f.render_widget(panel, area);
}

fn render_history(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Kind", "Value", "Valid", "Message"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.history.iter().map(|h| {
        let color = if h.result.is_valid { Color::Green } else { Color::Red };

        Row::new(vec![
            Cell::from(h.kind.code()),
            Cell::from(h.shown.clone()),
            Cell::from(if h.result.is_valid { "yes" } else { "no" }).style(Style::default().fg(color)),
            Cell::from(h.result.message.clone()),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(18),
            Constraint::Length(7),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" History "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.history_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, _app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let status_spans = vec![
        Span::raw(" "),
        key("Tab"),
        Span::raw(" Kind | "),
        key("Enter"),
        Span::raw(" Save | "),
        key("Del"),
        Span::raw(" Clear | "),
        key("↑/↓"),
        Span::raw(" History | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
