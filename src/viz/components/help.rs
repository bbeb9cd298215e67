use ratatui::{prelude::*, widgets::*};

pub fn render_help(area: Rect, buf: &mut Buffer) {
    let keys = [
        ("  q  ", "Exit (also Ctrl-C)"),
        ("  h  ", "Toggle this help"),
        ("  s  ", "Show/hide the log target selector"),
        ("⬅ / ➡", "Show fewer/more log levels"),
        ("- / +", "Capture fewer/more log levels"),
        ("PgUp ", "Scroll back through the log"),
        ("PgDn ", "Scroll forward (page mode only)"),
        (" Esc ", "Leave page mode"),
    ];

    let lines = keys
        .into_iter()
        .map(|(key, text)| {
            Line::from(vec![
                Span::from(key).light_cyan().bold(),
                Span::raw(format!(" : {text}")),
            ])
        })
        .collect::<Vec<_>>();

    let [_, center_vert, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length((lines.len() + 4) as u16),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(60),
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
        .render(center, buf);
}
