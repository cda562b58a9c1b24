use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::viz::{util::event_keycode, Update};

use super::Component;

/// A scatter plot of one metric against the episode number
pub struct Plot {
    title: String,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    data: Vec<(f64, f64)>,
}

impl Plot {
    pub fn new(title: &str) -> Self {
        Self {
            title: String::from(title),
            x_bounds: [f64::MAX, f64::MIN],
            y_bounds: [f64::MAX, f64::MIN],
            data: Vec::new(),
        }
    }

    /// Provide initial x bounds
    pub fn with_x_bounds(mut self, x_bounds: [f64; 2]) -> Self {
        self.x_bounds = x_bounds;
        self
    }

    /// Add a point, growing the bounds to fit it
    pub fn push(&mut self, point: (f64, f64)) {
        let (x, y) = point;
        self.x_bounds = [self.x_bounds[0].min(x), self.x_bounds[1].max(x)];
        self.y_bounds = [self.y_bounds[0].min(y), self.y_bounds[1].max(y)];
        self.data.push(point);
    }

    fn labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
        bounds.iter().map(|x| format!("{x:.2}").bold()).collect()
    }
}

impl WidgetRef for Plot {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .cyan()
            .data(&self.data);

        let x_axis = Axis::default()
            .title("Episode")
            .dark_gray()
            .labels(Self::labels(self.x_bounds))
            .bounds(self.x_bounds);

        let y_axis = Axis::default()
            .title(self.title.as_str())
            .dark_gray()
            .labels(Self::labels(self.y_bounds))
            .bounds(self.y_bounds);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Plots")
            .padding(Padding::uniform(4));

        Chart::new(vec![dataset])
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

/// A set of [`Plot`]s, one shown at a time
pub struct Plots {
    names: Vec<&'static str>,
    plots: Vec<Plot>,
    selected: usize,
}

impl Plots {
    pub fn new(names: Vec<&'static str>, episodes: u32) -> Self {
        let plots = names
            .iter()
            .map(|k| Plot::new(k).with_x_bounds([0.0, episodes.into()]))
            .collect();
        Self {
            names,
            plots,
            selected: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    pub fn next_plot(&mut self) {
        if !self.is_empty() {
            self.selected = (self.selected + 1) % self.len();
        }
    }

    pub fn prev_plot(&mut self) {
        if !self.is_empty() {
            let len = self.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Add the metrics of an update, matched to the plots by position
    pub fn update(&mut self, update: &Update) {
        for (plot, metric) in self.plots.iter_mut().zip(&update.data) {
            plot.push((update.episode.into(), *metric));
        }
    }
}

impl WidgetRef for Plots {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        Tabs::new(self.names.iter().copied())
            .block(Block::default().padding(Padding::uniform(2)))
            .white()
            .highlight_style(Style::default().light_green())
            .select(self.selected)
            .render(area, buf);

        if let Some(plot) = self.plots.get(self.selected) {
            plot.render_ref(area, buf);
        }
    }
}

impl Component for Plots {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match event_keycode(event) {
            Some(KeyCode::Left) => self.prev_plot(),
            Some(KeyCode::Right) => self.next_plot(),
            _ => return false,
        }
        true
    }
}
