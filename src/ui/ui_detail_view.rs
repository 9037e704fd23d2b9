use eframe::egui::{CentralPanel, Context, Frame, Margin, RichText, Slider, TopBottomPanel};

use crate::data::LoadError;
use crate::models::ZoomWindow;
use crate::ui::app::{KlineDeckApp, View};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::ui_table_view;
use crate::ui::utils;

impl KlineDeckApp {
    pub(super) fn render_detail_view(&mut self, ctx: &Context) {
        // The session is taken out for the frame so the chart view and the
        // panels can borrow freely, then put back.
        let Some(mut session) = self.detail.take() else {
            // A detail view with nothing selected is the missing-identifier
            // hard error: route back to the list and say so.
            self.view = View::List;
            self.list_notice =
                Some(LoadError::MalformedInput(UI_TEXT.missing_code.to_string()).to_string());
            return;
        };

        let mut go_back = false;
        let mut reload = false;

        let toolbar_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 6));
        TopBottomPanel::top("detail_toolbar")
            .frame(toolbar_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button(UI_TEXT.detail_back).clicked() {
                        go_back = true;
                    }
                    ui.separator();

                    ui.label(utils::colored_heading(session.title.clone()));
                    ui.label(
                        RichText::new(session.range.to_string()).color(UI_CONFIG.colors.label),
                    );
                    ui.separator();

                    ui.label(UI_TEXT.start_date_label);
                    ui.text_edit_singleline(&mut session.start_input);
                    ui.label(UI_TEXT.end_date_label);
                    ui.text_edit_singleline(&mut session.end_input);
                    if ui.button(UI_TEXT.apply_range).clicked() {
                        reload = true;
                    }

                    if session.loading {
                        ui.spinner();
                    }
                });
            });

        let central_frame = Frame::new().fill(UI_CONFIG.colors.central_panel);
        CentralPanel::default().frame(central_frame).show(ctx, |ui| {
            if let Some(notice) = &session.notice {
                utils::notice_label(ui, notice);
                ui.add_space(4.0);
            }

            match session.chart.as_mut() {
                Some(chart) => {
                    let chart_height = (ui.available_height() * 0.62).max(220.0);
                    self.chart_view
                        .show(ui, chart, session.chart_revision, chart_height);

                    if !chart.is_empty() {
                        // The slider twin of the in-chart zoom gestures;
                        // both feed the same window.
                        ui.horizontal(|ui| {
                            ui.label(UI_TEXT.zoom_label);
                            let mut start = chart.zoom.start_pct();
                            let mut end = chart.zoom.end_pct();
                            ui.add(Slider::new(&mut start, 0.0..=100.0).text(UI_TEXT.zoom_start));
                            ui.add(Slider::new(&mut end, 0.0..=100.0).text(UI_TEXT.zoom_end));
                            if ui.button(UI_TEXT.zoom_reset).clicked() {
                                chart.zoom = ZoomWindow::full();
                            } else {
                                chart.zoom.set(start, end);
                            }
                        });

                        utils::spaced_separator(ui);
                        ui_table_view::render_table(ui, &session.rows);
                    }
                }
                None if session.loading => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.spinner();
                        ui.add_space(12.0);
                        ui.heading(UI_TEXT.loading);
                    });
                }
                None => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.heading(UI_TEXT.empty_chart);
                    });
                }
            }
        });

        self.detail = Some(session);

        if go_back {
            self.close_detail();
        } else if reload {
            self.start_detail_load();
        }
    }
}
