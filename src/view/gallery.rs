//! Gallery pane: renders tracked slots as tiles in the scrolled viewport.

use crate::model::{ItemIndex, ListLayout};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;
use std::collections::HashMap;

/// Palette cycled by item index; eight colors keep neighboring tiles
/// distinct.
const PALETTE: [Color; 8] = [
    Color::LightMagenta,
    Color::Cyan,
    Color::LightRed,
    Color::Yellow,
    Color::LightGreen,
    Color::LightBlue,
    Color::Magenta,
    Color::LightCyan,
];

/// Fill glyph per pattern, one of six procedural "textures".
const PATTERNS: [char; 6] = ['·', '╱', '▪', '▫', '◦', '╳'];

/// The demo's resource type: a procedurally "decoded image".
///
/// Stands in for a texture handle; producing one is the payoff of a
/// successful simulated load, and the disposer counts how many were
/// released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileArt {
    /// Palette color index.
    pub color: u8,
    /// Fill pattern index.
    pub pattern: u8,
}

impl TileArt {
    /// Deterministic procedural art for an item index.
    pub fn procedural(index: ItemIndex) -> Self {
        Self {
            color: (index.get() % PALETTE.len()) as u8,
            pattern: (index.get() % PATTERNS.len()) as u8,
        }
    }

    fn style(&self) -> Style {
        Style::default().fg(PALETTE[self.color as usize % PALETTE.len()])
    }

    fn glyph(&self) -> char {
        PATTERNS[self.pattern as usize % PATTERNS.len()]
    }
}

/// Presentation state for one tracked slot, maintained by the shell from
/// observer callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileVisual {
    /// Placeholder with a progress fraction.
    Loading {
        /// Load progress in `[0, 1]`.
        fraction: f64,
    },
    /// Failed affordance until the retry fires or the slot is evicted.
    Failed,
    /// Loaded art.
    Ready(TileArt),
}

/// Widget drawing every tracked tile at its layout position, offset by
/// the current scroll, clipped to the pane.
pub struct GalleryView<'a> {
    layout: &'a ListLayout,
    offset: f64,
    visuals: &'a HashMap<ItemIndex, TileVisual>,
}

impl<'a> GalleryView<'a> {
    /// Build the widget for one frame.
    pub fn new(
        layout: &'a ListLayout,
        offset: f64,
        visuals: &'a HashMap<ItemIndex, TileVisual>,
    ) -> Self {
        Self {
            layout,
            offset,
            visuals,
        }
    }

    fn tile_width(&self, area: Rect) -> u16 {
        (area.width / self.layout.columns() as u16).max(1)
    }
}

impl Widget for GalleryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let tile_width = self.tile_width(area);
        let tile_height = self.layout.item_height().round().max(1.0) as i64;

        for (index, visual) in self.visuals {
            let position = self.layout.item_position(*index);
            // Top of the tile relative to the pane top.
            let top = (position.y + self.offset).round() as i64;
            if top + tile_height <= 0 || top >= area.height as i64 {
                continue;
            }
            let x = area.left() + position.col as u16 * tile_width;
            let width = tile_width.saturating_sub(1).max(1);
            render_tile(
                buf,
                area,
                x,
                top,
                width,
                tile_height,
                *index,
                visual,
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_tile(
    buf: &mut Buffer,
    area: Rect,
    x: u16,
    top: i64,
    width: u16,
    height: i64,
    index: ItemIndex,
    visual: &TileVisual,
) {
    let style = match visual {
        TileVisual::Loading { .. } => Style::default().fg(Color::DarkGray),
        TileVisual::Failed => Style::default().fg(Color::Red),
        TileVisual::Ready(art) => art.style(),
    };

    for line in 0..height {
        let pane_row = top + line;
        if pane_row < 0 || pane_row >= area.height as i64 {
            continue;
        }
        let y = area.top() + pane_row as u16;
        let content = tile_line(line, height, width, index, visual);
        buf.set_string(x, y, &content, style);
    }
}

/// One text row of a tile: box-drawing frame around a state-dependent
/// interior.
fn tile_line(line: i64, height: i64, width: u16, index: ItemIndex, visual: &TileVisual) -> String {
    let width = width as usize;
    if width < 4 {
        return "│".repeat(width.min(1));
    }
    let inner = width - 2;

    if line == 0 {
        let label = format!(" #{} ", index.display());
        let dashes = inner.saturating_sub(label.len());
        return format!("┌{label}{}┐", "─".repeat(dashes));
    }
    if line == height - 1 {
        return format!("└{}┘", "─".repeat(inner));
    }

    let middle = height / 2;
    let body = match visual {
        TileVisual::Loading { fraction } => {
            if line == middle {
                centered(&format!("Loading… {:>3.0}%", fraction * 100.0), inner)
            } else if line == middle + 1 {
                progress_bar(*fraction, inner)
            } else {
                " ".repeat(inner)
            }
        }
        TileVisual::Failed => {
            if line == middle {
                centered("✗ failed — retrying", inner)
            } else {
                " ".repeat(inner)
            }
        }
        TileVisual::Ready(art) => {
            let glyph = art.glyph();
            // Sparse fill; every other cell keeps the "texture" readable.
            (0..inner)
                .map(|col| if (col + line as usize) % 2 == 0 { glyph } else { ' ' })
                .collect()
        }
    };
    format!("│{body}│")
}

fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0)) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Draw a proportional scrollbar thumb in the rightmost column of `area`.
pub fn render_scrollbar(buf: &mut Buffer, area: Rect, offset: f64, layout: &ListLayout) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let max_scroll = layout.max_scroll();
    if max_scroll <= 0.0 {
        return;
    }
    let track = area.height as f64;
    let thumb_height = ((layout.viewport_height() / layout.content_height()) * track)
        .max(1.0)
        .round() as u16;
    let fraction = (-offset / max_scroll).clamp(0.0, 1.0);
    let thumb_top = (fraction * (track - thumb_height as f64)).round() as u16;

    let x = area.right().saturating_sub(1);
    let style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::DIM);
    for row in 0..area.height {
        let symbol = if row >= thumb_top && row < thumb_top + thumb_height {
            "█"
        } else {
            "│"
        };
        buf.set_string(x, area.top() + row, symbol, style);
    }
}
