use eframe::egui::{
    Button, CentralPanel, Context, Frame, Grid, Margin, RichText, ScrollArea, TopBottomPanel,
};

use crate::ui::app::KlineDeckApp;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::utils;

impl KlineDeckApp {
    pub(super) fn render_list_view(&mut self, ctx: &Context) {
        self.render_list_toolbar(ctx);

        let frame = Frame::new().fill(UI_CONFIG.colors.central_panel);
        CentralPanel::default().frame(frame).show(ctx, |ui| {
            if let Some(notice) = self.list_notice.clone() {
                utils::notice_label(ui, &notice);
                ui.add_space(6.0);
            }

            if self.instruments.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading(UI_TEXT.list_empty);
                });
                return;
            }

            // Clicking a row navigates after the grid is done borrowing.
            let mut open_request: Option<String> = None;

            ScrollArea::vertical().id_salt("instrument_list").show(ui, |ui| {
                Grid::new("instrument_grid")
                    .num_columns(5)
                    .spacing([24.0, 6.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for header in [
                            UI_TEXT.col_code,
                            UI_TEXT.col_name,
                            UI_TEXT.col_industry,
                            UI_TEXT.col_area,
                            UI_TEXT.col_action,
                        ] {
                            ui.label(RichText::new(header).strong());
                        }
                        ui.end_row();

                        for instrument in &self.instruments {
                            ui.label(&instrument.ts_code);
                            ui.label(&instrument.name);
                            ui.label(instrument.industry.as_deref().unwrap_or(UI_TEXT.placeholder));
                            ui.label(instrument.area.as_deref().unwrap_or(UI_TEXT.placeholder));
                            if ui.button(UI_TEXT.view_detail).clicked() {
                                open_request = Some(instrument.ts_code.clone());
                            }
                            ui.end_row();
                        }
                    });
            });

            if let Some(ts_code) = open_request {
                self.open_detail(&ts_code);
            }
        });
    }

    fn render_list_toolbar(&mut self, ctx: &Context) {
        let toolbar_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 6));
        TopBottomPanel::top("list_toolbar")
            .frame(toolbar_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(utils::colored_heading(UI_TEXT.list_heading));
                    ui.separator();

                    ui.label(UI_TEXT.start_date_label);
                    ui.text_edit_singleline(&mut self.range_start_input);
                    ui.label(UI_TEXT.end_date_label);
                    ui.text_edit_singleline(&mut self.range_end_input);
                    ui.separator();

                    if ui.button(UI_TEXT.refresh_list).clicked() {
                        self.start_list_refresh(true);
                    }

                    let sweep_running = self.sweep_promise.is_some();
                    if ui
                        .add_enabled(!sweep_running, Button::new(UI_TEXT.refresh_data))
                        .clicked()
                    {
                        self.start_refresh_sweep();
                    }

                    if sweep_running || self.list_promise.is_some() {
                        ui.spinner();
                    }
                });
            });
    }
}
