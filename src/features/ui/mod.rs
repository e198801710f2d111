mod input;
mod render;
mod state;

use crate::config::GlobalConfig;
use crate::data_model::TimeQuery;
use crate::features::app::{ClockWidget, LookupOutcome, WorkerHandle};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{QueueableCommand, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::info;

use input::{KeyOutcome, handle_key, submit_form};
use render::{draw_footer, draw_header, draw_help_popup, draw_main, draw_terminal_too_small};
use state::{Field, FormState, InputMode, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH};

/// Runs the interactive clock until the user quits. When `initial` is set the
/// form is prefilled and a fetch starts right away.
pub fn run_ui(
    mut widget: ClockWidget,
    global: &GlobalConfig,
    worker: WorkerHandle,
    outcome_rx: crossbeam_channel::Receiver<LookupOutcome>,
    initial: Option<TimeQuery>,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut form = FormState::from_query(initial.as_ref());
    let mut input_mode = if initial.is_some() {
        submit_form(&mut widget, &worker, &form);
        InputMode::Normal
    } else {
        InputMode::Editing(Field::Region)
    };
    let started = Instant::now();
    let mut should_quit = false;
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_secs_f64(1.0 / global.ui_refresh_hz as f64);

    let result = loop {
        if should_quit {
            break Ok(());
        }

        while let Ok(outcome) = outcome_rx.try_recv() {
            widget.complete_request(&outcome.request, outcome.result);
        }
        widget.poll_tick();

        let drawn = terminal.draw(|frame| {
            let size = frame.area();

            if size.width < MIN_TERMINAL_WIDTH || size.height < MIN_TERMINAL_HEIGHT {
                draw_terminal_too_small(frame, size);
                return;
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Header
                    Constraint::Min(9),    // Content
                    Constraint::Length(1), // Footer
                ])
                .split(size);

            draw_header(frame, chunks[0], &widget);
            draw_main(
                frame,
                chunks[1],
                &widget,
                &form,
                input_mode,
                started.elapsed(),
            );
            draw_footer(frame, chunks[2], input_mode);

            if input_mode == InputMode::Help {
                draw_help_popup(frame, size);
            }
        });
        if let Err(err) = drawn {
            break Err(err);
        }

        let mut timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if let Some(deadline) = widget.next_deadline() {
            timeout = timeout.min(deadline.saturating_duration_since(Instant::now()));
        }
        let ready = match event::poll(timeout) {
            Ok(ready) => ready,
            Err(err) => break Err(err),
        };
        if ready {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    match handle_key(key, &mut input_mode, &mut form) {
                        KeyOutcome::Quit => should_quit = true,
                        KeyOutcome::Submit => submit_form(&mut widget, &worker, &form),
                        KeyOutcome::Continue => {}
                    }
                }
                Ok(_) => {}
                Err(err) => break Err(err),
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    };

    cleanup_terminal(&mut terminal)?;
    drop(worker);
    info!("ui closed");
    result
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().queue(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    terminal.backend_mut().flush()?;
    Ok(())
}
