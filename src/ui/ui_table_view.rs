use eframe::egui::{Grid, RichText, ScrollArea, Ui};

use crate::models::DisplayRow;
use crate::models::table::PLACEHOLDER;
use crate::ui::config::{UI_CONFIG, UI_TEXT};

/// The tabular rendition of the loaded rows — same data, same order as the
/// chart's axis, one row per trading day.
pub(super) fn render_table(ui: &mut Ui, rows: &[DisplayRow]) {
    ScrollArea::vertical().id_salt("detail_table").show(ui, |ui| {
        Grid::new("detail_table_grid")
            .num_columns(8)
            .spacing([18.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                for header in [
                    UI_TEXT.col_date,
                    UI_TEXT.col_open,
                    UI_TEXT.col_high,
                    UI_TEXT.col_low,
                    UI_TEXT.col_close,
                    UI_TEXT.col_pct,
                    UI_TEXT.col_vol,
                    UI_TEXT.col_amount,
                ] {
                    ui.label(RichText::new(header).strong());
                }
                ui.end_row();

                for row in rows {
                    ui.label(&row.trade_date);
                    ui.label(&row.open);
                    ui.label(&row.high);
                    ui.label(&row.low);
                    ui.label(&row.close);
                    ui.label(pct_text(&row.pct_chg));
                    ui.label(&row.vol);
                    ui.label(&row.amount);
                    ui.end_row();
                }
            });
    });
}

/// Shown exactly as delivered; color is the only presentation added.
fn pct_text(pct: &str) -> RichText {
    if pct == PLACEHOLDER {
        return RichText::new(pct);
    }
    let color = if pct.starts_with('-') {
        UI_CONFIG.colors.bear_text
    } else {
        UI_CONFIG.colors.bull_text
    };
    RichText::new(pct).color(color)
}
