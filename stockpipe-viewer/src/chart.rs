//! Line chart of the daily Low price.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::data_loader::{ChartData, PLOTTED_COLUMN};
use crate::theme;

pub const TITLE: &str = "Daily Low Prices";

pub fn render(f: &mut Frame, area: Rect, data: &ChartData) {
    let block = Block::bordered()
        .title(Span::styled(TITLE, theme::title()))
        .title_bottom(Line::from(Span::styled(" q / Esc to quit ", theme::muted())));

    if data.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("No rows in the stored table.", theme::muted())),
            Line::from(Span::styled(
                "Run `stockpipe run` first to populate it.",
                theme::muted(),
            )),
        ];
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let [y_min, y_max] = data.y_bounds();
    let dataset = Dataset::default()
        .name(PLOTTED_COLUMN)
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(data.xy());

    let x_labels: Vec<Span> = data
        .x_labels()
        .into_iter()
        .map(|l| Span::styled(l, theme::muted()))
        .collect();

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds(data.x_bounds())
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(PLOTTED_COLUMN, theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
