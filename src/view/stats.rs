//! Memory-stats panel: the "watch memory stay flat while you scroll"
//! readout.

use crate::manager::WindowStats;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// Widget summarizing the manager's bookkeeping for one frame.
pub struct StatsPanel {
    stats: WindowStats,
    in_flight: usize,
    disposed: usize,
}

impl StatsPanel {
    /// Build the panel from the manager's counters plus shell-side ones.
    pub fn new(stats: WindowStats, in_flight: usize, disposed: usize) -> Self {
        Self {
            stats,
            in_flight,
            disposed,
        }
    }
}

impl Widget for StatsPanel {
    fn render(self, area: ratatui::layout::Rect, buf: &mut ratatui::buffer::Buffer) {
        let stats = self.stats;
        let saved = stats.total.saturating_sub(stats.tracked);
        let range = match stats.range {
            Some((start, end)) => format!("{start}-{end}"),
            None => "—".to_string(),
        };
        let lines = vec![
            Line::from(format!("Total items: {:>5}", stats.total)),
            Line::from(format!("In memory:   {:>5}", stats.tracked)),
            Line::from(format!("Loaded:      {:>5}", stats.loaded)),
            Line::from(format!("Pending:     {:>5}", stats.pending)),
            Line::from(format!("Failed:      {:>5}", stats.failed)),
            Line::from(format!("In flight:   {:>5}", self.in_flight)),
            Line::from(format!("Disposed:    {:>5}", self.disposed)),
            Line::from(format!("Range:       {range:>5}")),
            Line::from(format!("Saved:       {saved:>5}")),
        ];
        Paragraph::new(lines)
            .style(Style::default().fg(Color::Green))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" memory stats "),
            )
            .render(area, buf);
    }
}
