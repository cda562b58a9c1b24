use std::{
    io,
    sync::mpsc::{self, Sender},
    thread::{self, JoinHandle},
};

pub use app::{App, State};

mod app;
mod components;
mod tui;
mod util;

/// Format for updating the app from the training loop
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    /// The episode the update belongs to
    pub episode: u32,
    /// One value per plot, in the order the plots were named
    pub data: Vec<f64>,
    /// A snapshot of the value table, or empty to keep the previous one
    pub values: Vec<f32>,
}

/// Install `tui-logger` as the logger and start the app on its own thread
///
/// `plots` names one plot per entry of [`Update::data`], `shape` is the `(rows, columns)` layout of the
/// value grid and `terminals` the states drawn as terminal. The app runs until the user quits; dropping the
/// returned sender marks training as done.
pub fn init(
    plots: &[&'static str],
    episodes: u32,
    shape: (usize, usize),
    terminals: Vec<usize>,
) -> (JoinHandle<io::Result<()>>, Sender<Update>) {
    if tui_logger::init_logger(log::LevelFilter::Debug).is_ok() {
        tui_logger::set_default_level(log::LevelFilter::Debug);
    }

    let plots = plots.to_vec();
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        App::new(&plots, episodes, shape)
            .with_terminals(terminals)
            .run(rx)
    });

    (handle, tx)
}
