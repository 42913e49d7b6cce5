use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use idrcrds_content_engine::{
    Field, FileStore, SiteContent,
    editing::render,
    parsing::markers::Marker,
    read_content,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::{Stdout, stdout};

struct App {
    store: FileStore,
    content: SiteContent,
    section_state: ListState,
}

impl App {
    fn new(store: FileStore) -> Self {
        let content = read_content(&store);
        let mut section_state = ListState::default();
        section_state.select(Some(0));
        Self {
            store,
            content,
            section_state,
        }
    }

    fn selected_field(&self) -> Field {
        let index = self.section_state.selected().unwrap_or(0);
        Field::ALL[index % Field::ALL.len()]
    }

    fn next_section(&mut self) {
        let i = match self.section_state.selected() {
            Some(i) => (i + 1) % Field::ALL.len(),
            None => 0,
        };
        self.section_state.select(Some(i));
    }

    fn previous_section(&mut self) {
        let i = match self.section_state.selected() {
            Some(0) | None => Field::ALL.len() - 1,
            Some(i) => i - 1,
        };
        self.section_state.select(Some(i));
    }

    fn reload(&mut self) {
        log::debug!("Reloading {}", self.store.path().display());
        self.content = read_content(&self.store);
    }
}

/// Lines shown in the content panel for `field`.
fn section_lines(content: &SiteContent, field: Field) -> Vec<String> {
    let lines = match field {
        Field::Subtitle => text_block(&content.subtitle),
        Field::Mission => text_block(&content.mission),
        Field::Packages => content
            .packages
            .iter()
            .flat_map(|pkg| {
                let mut lines = render::package_lines(std::slice::from_ref(pkg));
                lines.push(String::new());
                lines
            })
            .collect(),
        Field::AdditionalServices => render::bullet_lines(&content.additional_services),
        Field::ScenarioA if content.scenario_a.title.is_empty() => Vec::new(),
        Field::ScenarioA => render::scenario_lines(&content.scenario_a, Marker::ScenarioA),
        Field::ScenarioB if content.scenario_b.title.is_empty() => Vec::new(),
        Field::ScenarioB => render::scenario_lines(&content.scenario_b, Marker::ScenarioB),
        Field::Booking => text_block(&content.booking),
        Field::Closing => text_block(&content.closing),
    };
    if lines.is_empty() {
        vec!["(not found in the document)".to_string()]
    } else {
        lines
    }
}

fn text_block(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

pub fn run(store: FileStore) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_section(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_section(),
                KeyCode::Char('r') => app.reload(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    let sections: Vec<ListItem> = Field::ALL
        .iter()
        .map(|field| ListItem::new(field.label()))
        .collect();
    let title = format!("Sections ({})", app.store.path().display());
    let sections = List::new(sections)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(sections, columns[0], &mut app.section_state);

    let field = app.selected_field();
    let body: Vec<Line> = section_lines(&app.content, field)
        .into_iter()
        .map(Line::from)
        .collect();
    let body = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(field.label()))
        .wrap(Wrap { trim: false });
    f.render_widget(body, columns[1]);

    let help = Paragraph::new(Line::from("q: Quit | ↑/k: Previous | ↓/j: Next | r: Reload"));
    f.render_widget(help, rows[1]);
}
