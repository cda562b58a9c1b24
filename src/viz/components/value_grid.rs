use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthStr;

/// A color in hue (degrees), saturation and lightness (percent)
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Hsl(pub f64, pub f64, pub f64);

impl Hsl {
    /// Linear interpolation between two colors, `t` is clamped to `[0, 1]`
    fn lerp(self, other: Hsl, t: f64) -> Hsl {
        let t = t.clamp(0.0, 1.0);
        Hsl(
            self.0 + (other.0 - self.0) * t,
            self.1 + (other.1 - self.1) * t,
            self.2 + (other.2 - self.2) * t,
        )
    }
}

impl From<Hsl> for Color {
    fn from(value: Hsl) -> Self {
        let Hsl(h, s, l) = value;
        Color::from_hsl(h, s, l)
    }
}

/// Heatmap of the state value table laid out on the environment's grid
///
/// Each cell is labelled with its value. Terminal states are drawn in gray.
pub struct ValueGrid {
    shape: (usize, usize),
    values: Vec<f32>,
    terminals: Vec<usize>,
    gradient: (Hsl, Hsl),
}

impl ValueGrid {
    /// Initialize a zeroed grid of `(rows, columns)` cells
    pub fn new(shape: (usize, usize)) -> Self {
        Self {
            shape,
            values: vec![0.0; shape.0 * shape.1],
            terminals: Vec::new(),
            gradient: (Hsl(230.0, 60.0, 35.0), Hsl(10.0, 80.0, 55.0)),
        }
    }

    /// Mark states to be drawn as terminal
    pub fn with_terminals(mut self, terminals: Vec<usize>) -> Self {
        self.terminals = terminals;
        self
    }

    pub fn update(&mut self, values: Vec<f32>) {
        self.values = values;
    }

    fn label(value: f32, width: u16) -> String {
        [3, 2, 1, 0]
            .into_iter()
            .map(|p| format!("{value:.p$}"))
            .find(|l| l.width() <= width as usize)
            .unwrap_or_default()
    }
}

impl WidgetRef for ValueGrid {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("State Values");
        let inner = block.inner(area);
        block.render(area, buf);

        let (rows, cols) = self.shape;
        if rows == 0 || cols == 0 {
            return;
        }

        let (lo, hi) = self
            .values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(inner);
        for (r, row_area) in row_areas.iter().enumerate() {
            let cells =
                Layout::horizontal(vec![Constraint::Ratio(1, cols as u32); cols]).split(*row_area);
            for (c, cell) in cells.iter().enumerate() {
                let state = r * cols + c;
                let Some(&value) = self.values.get(state) else {
                    continue;
                };

                let bg = if self.terminals.contains(&state) {
                    Color::DarkGray
                } else {
                    let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.0 };
                    self.gradient.0.lerp(self.gradient.1, t as f64).into()
                };

                buf.set_style(*cell, Style::default().bg(bg));

                let label_area = Rect {
                    y: cell.y + cell.height.saturating_sub(1) / 2,
                    height: cell.height.min(1),
                    ..*cell
                };
                Paragraph::new(Self::label(value, cell.width))
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::White).bg(bg).bold())
                    .render(label_area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_fits_cell() {
        assert_eq!(ValueGrid::label(0.12345, 10), "0.123");
        assert_eq!(ValueGrid::label(0.12345, 4), "0.12");
        assert_eq!(ValueGrid::label(0.12345, 1), "0");
        assert_eq!(ValueGrid::label(-0.5, 0), "");
    }

    #[test]
    fn value_grid_renders_every_cell() {
        let mut grid = ValueGrid::new((2, 2)).with_terminals(vec![3]);
        grid.update(vec![0.0, 0.25, 0.5, 0.0]);

        let area = Rect::new(0, 0, 26, 8);
        let mut buf = Buffer::empty(area);
        grid.render_ref(area, &mut buf);

        let text = buf
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(text.contains("State Values"), "Block title is drawn");
        assert!(text.contains("0.250"), "Values are labelled");
        assert!(text.contains("0.500"));
        assert_eq!(buf.get(20, 5).bg, Color::DarkGray, "Terminal cell is gray");
    }
}
