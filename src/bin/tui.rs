use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal, widgets::{Block, Borders, List, ListItem, Paragraph, ListState}, layout::{Layout, Constraint, Direction}, style::{Style, Modifier, Color}};

use taskvista::{
    application::board_service::{BoardService, BoardServiceImpl},
    domain::{
        task::{CreateTask, Priority, Status, Task, UpdateTask},
        views,
    },
    infrastructure::file_repo::{FileBoardRepository, Theme},
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let store_path = std::env::var("TASKVISTA_STORE").unwrap_or_else(|_| "taskvista.json".to_string());
    let store = FileBoardRepository::open(&store_path)?;
    let service = BoardServiceImpl::new(store.clone());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, store, service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode { View, Create, Edit }

#[derive(Clone, Copy, PartialEq, Eq)]
enum ActiveField { Title, Description }

struct App {
    store: FileBoardRepository,
    service: BoardServiceImpl<FileBoardRepository>,
    tasks: Vec<Task>,
    selected: usize,
    last_tick: Instant,
    mode: Mode,
    list_state: ListState,
    filter: Option<Status>,
    filtered_indices: Vec<usize>,
    field: ActiveField,
    draft_title: String,
    draft_desc: String,
}

impl App {
    async fn load(&mut self) -> Result<()> {
        self.tasks = self.service.list_tasks().await?;
        self.recompute_filtered();
        Ok(())
    }

    fn recompute_filtered(&mut self) {
        let filter = views::TaskFilter { status: self.filter, ..Default::default() };
        self.filtered_indices = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| filter.matches(t))
            .map(|(i, _)| i)
            .collect();
        // Clamp selection within filtered bounds
        let len = self.filtered_indices.len();
        if len == 0 { self.selected = 0; self.list_state.select(None); }
        else { if self.selected >= len { self.selected = len - 1; } self.list_state.select(Some(self.selected)); }
    }

    fn selected_task(&self) -> Option<&Task> {
        self.filtered_indices.get(self.selected).and_then(|&idx| self.tasks.get(idx))
    }

    fn stats_line(&self) -> String {
        let counts = views::status_counts(&self.tasks);
        let today = Local::now().date_naive();
        format!(
            "{} tasks | {} todo, {} in progress, {} completed | {}% done | due today: {} | urgent: {}",
            self.tasks.len(),
            counts.todo,
            counts.in_progress,
            counts.completed,
            views::completion_rate(&self.tasks),
            views::due_today(&self.tasks, today).len(),
            views::urgent_tasks(&self.tasks).len(),
        )
    }
}

fn status_mark(status: Status) -> &'static str {
    match status { Status::Todo => "[ ]", Status::InProgress => "[~]", Status::Completed => "[x]" }
}

fn status_label(status: Status) -> &'static str {
    match status { Status::Todo => "Todo", Status::InProgress => "In progress", Status::Completed => "Completed" }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority { Priority::Low => "low", Priority::Medium => "medium", Priority::High => "high", Priority::Urgent => "URGENT" }
}

fn next_status(status: Status) -> Status {
    match status { Status::Todo => Status::InProgress, Status::InProgress => Status::Completed, Status::Completed => Status::Todo }
}

fn next_priority(priority: Priority) -> Priority {
    match priority { Priority::Low => Priority::Medium, Priority::Medium => Priority::High, Priority::High => Priority::Urgent, Priority::Urgent => Priority::Low }
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, store: FileBoardRepository, service: BoardServiceImpl<FileBoardRepository>) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut app = App { store, service, tasks: vec![], selected: 0, last_tick: Instant::now(), mode: Mode::View, list_state: ListState::default(), filter: None, filtered_indices: Vec::new(), field: ActiveField::Title, draft_title: String::new(), draft_desc: String::new() };
    app.load().await?;

    loop {
        let highlight = match app.store.theme() { Theme::Light => Color::Blue, Theme::Dark => Color::Cyan };
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let header = Paragraph::new(app.stats_line())
                .block(Block::default().borders(Borders::ALL).title("taskvista (Enter: status, p: priority, n: new, e: edit, d: delete, f: filter, t: theme, q: quit)"));
            f.render_widget(header, chunks[0]);

            let middle = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);

            let list_items: Vec<ListItem> = app.filtered_indices.iter().filter_map(|&idx| app.tasks.get(idx)).map(|t| {
                ListItem::new(format!("{} {} ({})", status_mark(t.status), t.title, priority_label(t.priority)))
            }).collect();
            if app.filtered_indices.is_empty() { app.list_state.select(None); } else { app.list_state.select(Some(app.selected)); }
            let filter_title = app.filter.map_or("All", status_label);
            let list = List::new(list_items)
                .block(Block::default().borders(Borders::ALL).title(format!("tasks [{filter_title}]")))
                .highlight_style(Style::default().fg(highlight).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, middle[0], &mut app.list_state);

            let detail = if let Some(t) = app.selected_task() {
                let due = t.due_date.map_or_else(|| "(none)".to_string(), |d| d.to_string());
                let desc = if t.description.is_empty() { "(no description)".to_string() } else { t.description.clone() };
                format!(
                    "Title:\n{}\n\nStatus: {}\nPriority: {}\nDue: {}\n\nDescription:\n{}",
                    t.title, status_label(t.status), priority_label(t.priority), due, desc,
                )
            } else { String::new() };
            let details = Paragraph::new(detail)
                .block(Block::default().borders(Borders::ALL).title("details"));
            f.render_widget(details, middle[1]);

            let footer_text = match app.mode {
                Mode::View => format!("store={}  |  theme={:?}  |  filter=[{filter_title}]", app.store.path().display(), app.store.theme()),
                Mode::Create => format!("Create — {}: {}_  |  (Tab to switch, Enter to save, Esc to cancel)", match app.field { ActiveField::Title => "Title", ActiveField::Description => "Desc" }, match app.field { ActiveField::Title => &app.draft_title, ActiveField::Description => &app.draft_desc }),
                Mode::Edit => format!("Edit — {}: {}_  |  (Tab to switch, Enter to save, Esc to cancel)", match app.field { ActiveField::Title => "Title", ActiveField::Description => "Desc" }, match app.field { ActiveField::Title => &app.draft_title, ActiveField::Description => &app.draft_desc }),
            };
            let footer = Paragraph::new(footer_text)
                .block(Block::default().borders(Borders::ALL).title(match app.mode { Mode::View => "info", Mode::Create => "create", Mode::Edit => "edit" }));
            f.render_widget(footer, chunks[2]);
        })?;

        let timeout = tick_rate.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                match app.mode {
                    Mode::View => match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Up => { if app.selected > 0 { app.selected -= 1; } }
                        KeyCode::Down => { let len = app.filtered_indices.len(); if app.selected + 1 < len { app.selected += 1; } }
                        KeyCode::Enter => {
                            if let Some(t) = app.selected_task() {
                                let id = t.id.clone();
                                let status = next_status(t.status);
                                let _ = app.service.update_task(id, UpdateTask { status: Some(status), ..Default::default() }).await;
                                app.load().await?;
                            }
                        }
                        KeyCode::Char('p') => {
                            if let Some(t) = app.selected_task() {
                                let id = t.id.clone();
                                let priority = next_priority(t.priority);
                                let _ = app.service.update_task(id, UpdateTask { priority: Some(priority), ..Default::default() }).await;
                                app.load().await?;
                            }
                        }
                        KeyCode::Char('n') => {
                            app.mode = Mode::Create;
                            app.field = ActiveField::Title;
                            app.draft_title.clear();
                            app.draft_desc.clear();
                        }
                        KeyCode::Char('e') => {
                            if let Some((title, desc)) = app.selected_task().map(|t| (t.title.clone(), t.description.clone())) {
                                app.draft_title = title;
                                app.draft_desc = desc;
                                app.mode = Mode::Edit;
                                app.field = ActiveField::Title;
                            }
                        }
                        KeyCode::Char('d') => {
                            if let Some(t) = app.selected_task() {
                                let id = t.id.clone();
                                let _ = app.service.delete_task(id).await;
                                if app.selected > 0 { app.selected -= 1; }
                                app.load().await?;
                            }
                        }
                        KeyCode::Char('f') => {
                            app.filter = match app.filter {
                                None => Some(Status::Todo),
                                Some(Status::Todo) => Some(Status::InProgress),
                                Some(Status::InProgress) => Some(Status::Completed),
                                Some(Status::Completed) => None,
                            };
                            app.recompute_filtered();
                        }
                        KeyCode::Char('t') => { let _ = app.store.toggle_theme(); }
                        _ => {}
                    },
                    Mode::Create => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; app.draft_title.clear(); app.draft_desc.clear(); }
                        KeyCode::Enter => {
                            let title = app.draft_title.trim();
                            let desc = app.draft_desc.trim();
                            if !title.is_empty() {
                                let input = CreateTask {
                                    title: title.to_string(),
                                    description: desc.to_string(),
                                    due_date: None,
                                    priority: Priority::default(),
                                    status: Status::default(),
                                    project_id: None,
                                };
                                let _ = app.service.create_task(input).await;
                            }
                            app.mode = Mode::View;
                            app.draft_title.clear();
                            app.draft_desc.clear();
                            app.load().await?;
                        }
                        KeyCode::Backspace => { match app.field { ActiveField::Title => { app.draft_title.pop(); }, ActiveField::Description => { app.draft_desc.pop(); } } }
                        KeyCode::Char(c) => { match app.field { ActiveField::Title => app.draft_title.push(c), ActiveField::Description => app.draft_desc.push(c) } }
                        KeyCode::Tab => { app.field = match app.field { ActiveField::Title => ActiveField::Description, ActiveField::Description => ActiveField::Title }; }
                        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => { /* ignore nav in input */ }
                        _ => {}
                    },
                    Mode::Edit => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; app.draft_title.clear(); app.draft_desc.clear(); }
                        KeyCode::Enter => {
                            if let Some(t) = app.selected_task() {
                                let id = t.id.clone();
                                let title = app.draft_title.trim().to_string();
                                let desc = app.draft_desc.trim().to_string();
                                let patch = UpdateTask {
                                    title: if title.is_empty() { None } else { Some(title) },
                                    description: Some(desc),
                                    ..Default::default()
                                };
                                let _ = app.service.update_task(id, patch).await;
                            }
                            app.mode = Mode::View;
                            app.draft_title.clear();
                            app.draft_desc.clear();
                            app.load().await?;
                        }
                        KeyCode::Backspace => { match app.field { ActiveField::Title => { app.draft_title.pop(); }, ActiveField::Description => { app.draft_desc.pop(); } } }
                        KeyCode::Char(c) => { match app.field { ActiveField::Title => app.draft_title.push(c), ActiveField::Description => app.draft_desc.push(c) } }
                        KeyCode::Tab => { app.field = match app.field { ActiveField::Title => ActiveField::Description, ActiveField::Description => ActiveField::Title }; }
                        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => { /* ignore nav in input */ }
                        _ => {}
                    },
                }
            }
        }
        if app.last_tick.elapsed() >= tick_rate {
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}
