use ratatui::{prelude::*, widgets::*};

fn binding(keys: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::from(keys).light_cyan().bold(),
        Span::raw(" : "),
        Span::raw(description),
    ])
}

/// Render the key bindings of the app and of the selected tab as a centered popup
pub fn render_help(area: Rect, buf: &mut Buffer, selected_tab: usize) {
    let mut lines = vec![
        binding("  q  ", "Quit the viz, stopping training if it is still running"),
        binding("  h  ", "Toggle help popup"),
        binding(" Tab ", "Switch tabs"),
    ];

    match selected_tab {
        1 => lines.push(binding("⬅ / ➡", "Switch plots")),
        2 => lines.extend([
            binding("  s  ", "Toggle target selector"),
            binding("  f  ", "Focus on the selected target only"),
            binding("⬆ / ⬇", "Switch log target"),
            binding("⬅ / ➡", "Show fewer/more log levels"),
            binding("- / +", "Capture fewer/more log levels"),
            binding("PgUp ", "Enter page mode and scroll up"),
            binding("PgDn ", "Scroll down in page mode"),
            binding(" Esc ", "Leave page mode"),
            binding("Space", "Toggle hiding of disabled targets"),
        ]),
        _ => {}
    }

    let [_, center_vert, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length((lines.len() + 4) as u16),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(80),
        Constraint::Fill(1),
    ])
    .areas(center_vert);

    Clear.render(center, buf);

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::proportional(1))
                .title("Help"),
        )
        .wrap(Wrap { trim: false })
        .render(center, buf);
}
