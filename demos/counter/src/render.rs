//! Presentation layer: paints the counter state onto the terminal

use std::cell::RefCell;
use std::io;

use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Flex, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::reducer::CounterState;

const HELP: &str = "k/Up: +1  j/Down: -1  r: reset  q: quit";

/// Owns the terminal and redraws it from a state snapshot
///
/// Drawing happens inside store listeners, which cannot return errors, so
/// the first I/O failure is kept until the event loop collects it.
pub struct Renderer<B: Backend> {
    terminal: RefCell<Terminal<B>>,
    error: RefCell<Option<io::Error>>,
}

impl<B: Backend> Renderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal: RefCell::new(terminal),
            error: RefCell::new(None),
        }
    }

    /// Draw `state`. An absent state is shown as a placeholder.
    pub fn render(&self, state: Option<&CounterState>) {
        let mut terminal = self.terminal.borrow_mut();
        if let Err(err) = terminal.draw(|frame| draw_counter(frame, state)) {
            self.error.borrow_mut().get_or_insert(err);
        }
    }

    /// Take the first draw error, if any
    pub fn take_error(&self) -> Option<io::Error> {
        self.error.borrow_mut().take()
    }

    #[cfg(test)]
    fn backend(&self) -> std::cell::Ref<'_, B> {
        std::cell::Ref::map(self.terminal.borrow(), |t| t.backend())
    }
}

fn draw_counter(frame: &mut Frame, state: Option<&CounterState>) {
    let area = frame.area();

    let [_, center, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(30),
        Constraint::Fill(1),
    ])
    .flex(Flex::Center)
    .areas(center);

    let block = Block::default()
        .title(" Counter ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let text = match state {
        Some(state) => state.count.to_string(),
        None => "-".to_string(),
    };
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, center);

    let [_, help_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
    let help = Paragraph::new(HELP)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area);
}
