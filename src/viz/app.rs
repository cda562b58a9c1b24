use std::{
    io,
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use super::{
    components::{help::render_help, Component, Logs, Plots, ValueGrid},
    tui::Tui,
    util::event_keycode,
    Update,
};

const TABS: [&str; 3] = ["Values", "Plots", "Logs"];

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    #[default]
    Train,
    /// Training finished, the final values stay on screen until quit
    Done,
    Quit,
}

/// The root TUI component which holds the main app state and runs the render loop
pub struct App {
    state: State,
    episode: u32,
    total_episodes: u32,
    selected_tab: usize,
    show_help: bool,
    values: ValueGrid,
    plots: Plots,
    logs: Logs,
}

impl App {
    /// Initialize the app with one plot per metric name and a value grid of `(rows, columns)` cells
    pub fn new(plots: &[&'static str], episodes: u32, shape: (usize, usize)) -> Self {
        Self {
            state: State::default(),
            episode: 0,
            total_episodes: episodes,
            selected_tab: 0,
            show_help: false,
            values: ValueGrid::new(shape),
            plots: Plots::new(plots.to_vec(), episodes),
            logs: Logs::new(),
        }
    }

    /// Mark states to be drawn as terminal in the value grid
    pub fn with_terminals(mut self, terminals: Vec<usize>) -> Self {
        self.values = self.values.with_terminals(terminals);
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Apply an update from the training loop
    pub fn apply(&mut self, update: Update) {
        self.episode = update.episode;
        self.plots.update(&update);
        if !update.values.is_empty() {
            self.values.update(update.values);
        }
    }

    /// React to a terminal event, forwarding unhandled keys to the selected tab
    ///
    /// **Returns** whether the app needs to be redrawn
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event_keycode(event) {
            Some(KeyCode::Char('q')) => self.state = State::Quit,
            Some(KeyCode::Char('h')) => self.show_help = !self.show_help,
            Some(KeyCode::Tab) => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            Some(_) => {
                return match self.selected_tab {
                    1 => self.plots.handle_ui_event(event),
                    2 => self.logs.handle_ui_event(event),
                    _ => false,
                };
            }
            None => return matches!(event, Event::Resize(..)),
        }
        true
    }

    /// Apply every pending update
    ///
    /// **Returns** whether anything changed
    fn drain(&mut self, rx: &Receiver<Update>) -> bool {
        let mut changed = false;
        loop {
            match rx.try_recv() {
                Ok(update) => self.apply(update),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.state = State::Done;
                    return true;
                }
            }
            changed = true;
        }
        changed
    }

    /// Initialize the terminal and run the main loop until the user quits
    ///
    /// Only redraws after an update or a handled event. Restores the terminal on exit
    pub fn run(&mut self, rx: Receiver<Update>) -> io::Result<()> {
        let mut tui = Tui::enter()?;
        let mut dirty = true;

        while self.state != State::Quit {
            if self.state == State::Train {
                dirty |= self.drain(&rx);
            }

            if dirty {
                tui.terminal
                    .draw(|frame| frame.render_widget(&*self, frame.size()))?;
                dirty = false;
            }

            if event::poll(Duration::from_millis(16))? {
                let event = event::read()?;
                dirty = self.handle_event(&event);
            }
        }

        Ok(())
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Layout
        let [menu_area, main_area, progress_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        // Menu
        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        // Main
        match self.selected_tab {
            0 => self.values.render_ref(main_area, buf),
            1 => self.plots.render_ref(main_area, buf),
            2 => self.logs.render_ref(main_area, buf),
            _ => {}
        }

        // Progress bar
        let (title, ratio) = match self.state {
            State::Done => ("Done (press q to quit)", 1.0),
            _ => (
                "Progress",
                f64::from(self.episode) / f64::from(self.total_episodes.max(1)),
            ),
        };
        Gauge::default()
            .block(Block::bordered().border_type(BorderType::Rounded).title(title))
            .gauge_style(Color::Cyan)
            .ratio(ratio.clamp(0.0, 1.0))
            .render(progress_area, buf);

        if self.show_help {
            render_help(area, buf, self.selected_tab);
        }
    }
}
