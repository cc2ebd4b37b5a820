//! The activity board: roster cards, signup form, and the status banner.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::Roster;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{BoardAction, StatusBanner, StatusSeverity, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

/// Wakes the UI often enough to drain worker events and hit the banner
/// deadline without user input.
const REPAINT_POLL_INTERVAL: Duration = Duration::from_millis(200);

const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

enum RosterView {
    Loading,
    Loaded(Roster),
    Failed,
}

pub struct BoardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    roster: RosterView,
    email_input: String,
    selected_activity: Option<String>,
    banner: Option<StatusBanner>,
}

impl BoardApp {
    pub fn new(
        server_url: String,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            server_url,
            roster: RosterView::Loading,
            email_input: String::new(),
            selected_activity: None,
            banner: None,
        };
        // The page-load fetch.
        dispatch_backend_command(&app.cmd_tx, BackendCommand::LoadRoster, &mut app.banner);
        app
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::RosterLoaded(roster) => {
                // The selected activity may have vanished between fetches.
                if self
                    .selected_activity
                    .as_ref()
                    .is_some_and(|selected| !roster.contains_key(selected))
                {
                    self.selected_activity = None;
                }
                self.roster = RosterView::Loaded(roster);
            }
            UiEvent::RosterLoadFailed { reason } => {
                tracing::warn!(%reason, "replacing roster view with failure notice");
                self.roster = RosterView::Failed;
            }
            UiEvent::SignupSucceeded { message } => {
                self.banner = Some(StatusBanner::success(message));
                self.email_input.clear();
                self.selected_activity = None;
                dispatch_backend_command(&self.cmd_tx, BackendCommand::LoadRoster, &mut self.banner);
            }
            UiEvent::SignupFailed(failure) => {
                self.banner = Some(StatusBanner::error(
                    failure.display_text(BoardAction::Signup),
                ));
            }
            UiEvent::UnregisterSucceeded { message } => {
                self.banner = Some(StatusBanner::success(message));
                dispatch_backend_command(&self.cmd_tx, BackendCommand::LoadRoster, &mut self.banner);
            }
            UiEvent::UnregisterFailed(failure) => {
                self.banner = Some(StatusBanner::error(
                    failure.display_text(BoardAction::Unregister),
                ));
            }
        }
    }

    fn expire_banner(&mut self, now: Instant) {
        if self
            .banner
            .as_ref()
            .is_some_and(|banner| banner.expired_at(now))
        {
            self.banner = None;
        }
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = &self.banner else {
            return;
        };
        let (fill, accent) = match banner.severity {
            StatusSeverity::Success => (
                egui::Color32::from_rgb(223, 240, 216),
                egui::Color32::from_rgb(60, 118, 61),
            ),
            StatusSeverity::Error => (
                egui::Color32::from_rgb(242, 222, 222),
                egui::Color32::from_rgb(169, 68, 66),
            ),
        };
        egui::Frame::new()
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, accent))
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.colored_label(accent, banner.message.as_str());
            });
        ui.add_space(8.0);
    }

    fn show_signup_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Sign Up for an Activity");
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Email:");
            ui.add(
                egui::TextEdit::singleline(&mut self.email_input)
                    .hint_text("your-email@mergington.edu")
                    .desired_width(260.0),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Activity:");
            let selected_label = self
                .selected_activity
                .clone()
                .unwrap_or_else(|| SELECT_PLACEHOLDER.to_string());
            egui::ComboBox::from_id_salt("activity_select")
                .width(260.0)
                .selected_text(selected_label)
                .show_ui(ui, |ui| {
                    if let RosterView::Loaded(roster) = &self.roster {
                        for name in roster.keys() {
                            ui.selectable_value(
                                &mut self.selected_activity,
                                Some(name.clone()),
                                name.as_str(),
                            );
                        }
                    }
                });
        });
        ui.add_space(4.0);

        let ready = !self.email_input.trim().is_empty() && self.selected_activity.is_some();
        if ui.add_enabled(ready, egui::Button::new("Sign Up")).clicked() {
            if let Some(activity) = self.selected_activity.clone() {
                let email = self.email_input.trim().to_string();
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::Signup { activity, email },
                    &mut self.banner,
                );
            }
        }
    }

    fn show_roster(&mut self, ui: &mut egui::Ui) {
        ui.heading("Activities");
        ui.add_space(4.0);
        match &self.roster {
            RosterView::Loading => {
                ui.label("Loading activities...");
            }
            RosterView::Failed => {
                ui.label("Failed to load activities. Please try again later.");
            }
            RosterView::Loaded(roster) => {
                let mut pending_unregister: Option<(String, String)> = None;
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for (name, activity) in roster {
                            egui::Frame::group(ui.style()).show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.strong(name.as_str());
                                ui.label(activity.description.as_str());
                                ui.label(format!("Schedule: {}", activity.schedule));
                                ui.label(format!(
                                    "Availability: {} spots left",
                                    activity.spots_left()
                                ));
                                ui.separator();
                                ui.small("Participants");
                                for participant in &activity.participants {
                                    ui.horizontal(|ui| {
                                        ui.label(participant.as_str());
                                        if ui.small_button("Remove").clicked() {
                                            pending_unregister =
                                                Some((name.clone(), participant.clone()));
                                        }
                                    });
                                }
                            });
                            ui.add_space(8.0);
                        }
                    });
                if let Some((activity, email)) = pending_unregister {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::Unregister { activity, email },
                        &mut self.banner,
                    );
                }
            }
        }
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.expire_banner(Instant::now());

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Activity Board");
                ui.small("Discover, sign up, and manage extracurricular activities");
            });
        });
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.small(egui::RichText::new(format!("Server: {}", self.server_url)).weak());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_banner(ui);
            self.show_signup_form(ui);
            ui.separator();
            self.show_roster(ui);
        });

        // Wake up in time for the banner deadline, or at the regular poll
        // interval when nothing is showing.
        let wakeup = match &self.banner {
            Some(banner) => banner
                .deadline()
                .saturating_duration_since(Instant::now())
                .min(REPAINT_POLL_INTERVAL),
            None => REPAINT_POLL_INTERVAL,
        };
        ctx.request_repaint_after(wakeup);
    }
}
