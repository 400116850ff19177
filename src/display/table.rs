use crate::api::models::{RegionTotal, StatsResponse};
use crate::utils::formatting::{Locale, format_number, format_percentage};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, presets};
use crossterm::terminal;

/// Renders server statistics as terminal tables
pub struct StatsDisplay {
    max_width: Option<u16>,
    use_colors: bool,
    locale: Locale,
}

impl Default for StatsDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsDisplay {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
            locale: Locale::PtBr,
        }
    }

    fn detect_terminal_width() -> Option<u16> {
        match terminal::size() {
            Ok((cols, _rows)) => Some(cols.clamp(40, 200)),
            Err(_) => Some(80),
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    fn header_cell(&self, text: &str) -> Cell {
        if self.use_colors {
            Cell::new(text)
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan)
        } else {
            Cell::new(text)
        }
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
        if let Some(width) = self.max_width {
            table.set_width(width);
        }
        table
    }

    /// Summary (totals and period) table
    pub fn render_summary(&self, stats: &StatsResponse) -> String {
        let mut table = self.new_table();
        table.set_header(vec![self.header_cell("Metric"), self.header_cell("Value")]);

        let count = |value: Option<u64>| {
            value
                .map(|v| format_number(v as f64, self.locale))
                .unwrap_or_else(|| "-".to_string())
        };

        let period = match (&stats.periodo_inicio, &stats.periodo_fim) {
            (Some(start), Some(end)) => format!("{} - {}", start, end),
            _ => "-".to_string(),
        };

        table.add_row(vec![
            Cell::new("Total shipments"),
            Cell::new(count(stats.total_embarques)).set_alignment(CellAlignment::Right),
        ]);
        table.add_row(vec![
            Cell::new("Origin regions"),
            Cell::new(count(stats.total_origens.map(u64::from)))
                .set_alignment(CellAlignment::Right),
        ]);
        table.add_row(vec![
            Cell::new("Destination regions"),
            Cell::new(count(stats.total_destinos.map(u64::from)))
                .set_alignment(CellAlignment::Right),
        ]);
        table.add_row(vec![Cell::new("Period"), Cell::new(period)]);

        table.to_string()
    }

    /// Ranked region table with each region's share of `total`
    pub fn render_ranking(&self, title: &str, regions: &[RegionTotal], total: Option<u64>) -> String {
        let mut table = self.new_table();
        table.set_header(vec![
            self.header_cell("#"),
            self.header_cell(title),
            self.header_cell("Shipments"),
            self.header_cell("Share"),
        ]);

        for (rank, region) in regions.iter().enumerate() {
            let share = total
                .map(|t| format_percentage(region.embarques as f64, t as f64, 1))
                .unwrap_or_else(|| "-".to_string());
            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(&region.regiao),
                Cell::new(format_number(region.embarques as f64, self.locale))
                    .set_alignment(CellAlignment::Right),
                Cell::new(share).set_alignment(CellAlignment::Right),
            ]);
        }

        table.to_string()
    }

    pub fn render_stats(&self, stats: &StatsResponse) -> String {
        let mut output = self.render_summary(stats);
        if !stats.top_origens.is_empty() {
            output.push_str("\n\nTop origins\n");
            output.push_str(&self.render_ranking(
                "Origin",
                &stats.top_origens,
                stats.total_embarques,
            ));
        }
        if !stats.top_destinos.is_empty() {
            output.push_str("\n\nTop destinations\n");
            output.push_str(&self.render_ranking(
                "Destination",
                &stats.top_destinos,
                stats.total_embarques,
            ));
        }
        output
    }
}
