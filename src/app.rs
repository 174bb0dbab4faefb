//! Desktop front end. Displays the current problem, collects answers and
//! edits the selection; every decision is delegated to [`DrillSession`].

use eframe::egui;
use math_facts::export::json::{export_progress_to_path, import_progress};
use math_facts::{DrillSession, Feedback, Operator};
use std::time::{Duration, Instant};

const FEEDBACK_DURATION: Duration = Duration::from_millis(1000);

pub struct MathFactsApp {
    session: DrillSession,
    answer_input: String,
    feedback_shown_at: Option<Instant>,
    focus_answer: bool,

    show_settings: bool,
    show_reset_dialog: bool,
    show_confirmation_dialog: bool,
    allowed_to_close: bool,

    show_result_dialog: bool,
    result_message: String,
}

impl eframe::App for MathFactsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.expire_feedback(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Settings").clicked() {
                    self.show_settings = !self.show_settings;
                }
                if ui.button("Export Progress").clicked() {
                    self.handle_export();
                }
                if ui.button("Import Progress").clicked() {
                    self.handle_import();
                }
                if ui.button("Reset Progress").clicked() {
                    self.show_reset_dialog = true;
                }
            });
        });

        if self.show_settings {
            self.render_settings(ctx);
        }
        self.render_quiz(ctx);

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                        }
                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if self.show_reset_dialog {
            egui::Window::new("Reset all progress?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Review history and scheduling will be cleared.");
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.show_reset_dialog = false;
                        }
                        if ui.button("Reset").clicked() {
                            self.session.reset_progress();
                            self.show_reset_dialog = false;
                        }
                    });
                });
        }

        if self.show_result_dialog {
            egui::Window::new("Import/Export Result")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.result_message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_result_dialog = false;
                    }
                });
        }
    }
}

impl MathFactsApp {
    pub fn new(session: DrillSession) -> Self {
        Self {
            session,
            answer_input: String::new(),
            feedback_shown_at: None,
            focus_answer: true,
            show_settings: false,
            show_reset_dialog: false,
            show_confirmation_dialog: false,
            allowed_to_close: false,
            show_result_dialog: false,
            result_message: String::new(),
        }
    }

    fn expire_feedback(&mut self, ctx: &egui::Context) {
        if let Some(shown_at) = self.feedback_shown_at {
            let elapsed = shown_at.elapsed();
            if elapsed >= FEEDBACK_DURATION {
                self.session.clear_feedback();
                self.feedback_shown_at = None;
            } else {
                ctx.request_repaint_after(FEEDBACK_DURATION - elapsed);
            }
        }
    }

    /// Renders the current problem and the answer field
    fn render_quiz(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let problem = self.session.current_problem();
            let summary = self.session.summary();

            ui.label(format!(
                "Answered {} ({} correct) · {} due · {} new of {}",
                summary.attempted, summary.correct, summary.due, summary.unseen, summary.eligible
            ));

            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(problem.to_string()).size(56.0));

                ui.add_space(20.0);

                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.answer_input)
                        .hint_text("answer")
                        .desired_width(120.0),
                );
                if self.focus_answer {
                    response.request_focus();
                    self.focus_answer = false;
                }

                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui.button("Check").clicked();
                if submitted || clicked {
                    self.handle_submit();
                }

                ui.add_space(20.0);

                match self.session.feedback() {
                    Some(Feedback::Correct) => {
                        ui.label(egui::RichText::new("👍").size(40.0));
                    }
                    Some(Feedback::Incorrect) => {
                        ui.label(egui::RichText::new("❌").size(40.0));
                    }
                    None => {}
                }
            });
        });
    }

    /// Renders operand checkboxes and the operator choice
    fn render_settings(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings;
        let mut new_problem = false;

        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let selection = self.session.current_selection();

                ui.label("Numbers:");
                ui.horizontal_wrapped(|ui| {
                    for n in 1..=10 {
                        let mut checked = selection.selected_operands.contains(&n);
                        if ui.checkbox(&mut checked, n.to_string()).changed() {
                            self.session.set_selected_operand(n, checked);
                        }
                    }
                });

                ui.separator();

                ui.label("Operation:");
                let mut operator = selection.selected_operator;
                ui.horizontal(|ui| {
                    ui.radio_value(&mut operator, Operator::Multiply, "Multiply ×");
                    ui.radio_value(&mut operator, Operator::Divide, "Divide ÷");
                });
                if operator != selection.selected_operator {
                    self.session.set_selected_operator(operator);
                }

                ui.separator();

                if ui.button("Done").clicked() {
                    new_problem = true;
                }
            });

        if new_problem {
            open = false;
        }
        if self.show_settings && !open {
            // the selection may have changed while the dialog was open
            self.session.request_next_problem();
            self.answer_input.clear();
            self.focus_answer = true;
        }
        self.show_settings = open;
    }

    fn handle_submit(&mut self) {
        let Ok(value) = self.answer_input.trim().parse::<i64>() else {
            self.focus_answer = true;
            return;
        };

        self.session.submit_answer(value);
        self.feedback_shown_at = Some(Instant::now());

        self.answer_input.clear();
        self.session.request_next_problem();
        self.focus_answer = true;
    }

    /// Handles progress export to JSON file
    fn handle_export(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("math-facts-progress.json")
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            self.result_message = match export_progress_to_path(&self.session.saved_state(), &path) {
                Ok(()) => "Progress exported successfully!".to_string(),
                Err(e) => format!("Export failed: {}", e),
            };
            self.show_result_dialog = true;
        }
    }

    /// Handles progress import from JSON file
    fn handle_import(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        {
            match import_progress(&path) {
                Ok(saved) => {
                    let entries = saved.review_stats.len();
                    self.session.replace_progress(saved);
                    self.session.request_next_problem();
                    self.answer_input.clear();
                    self.result_message =
                        format!("Progress imported successfully with {} reviewed problems!", entries);
                }
                Err(e) => {
                    self.result_message = format!("Import failed: {}", e);
                }
            }
            self.show_result_dialog = true;
        }
    }
}
