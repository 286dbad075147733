use crate::grader::{AnswerSheet, ScoreReport};
use crate::number_generator::{GenerationRequest, MAX_SIZE, MIN_SIZE};
use crate::operations::{Level, OperationType};
use crate::report::{cell_verdict, render_score, render_time};
use crate::session::PracticeSession;
use crate::time_format::format_timer;
use eframe::egui;
use log::warn;
use std::time::Duration;

const TIMER_REFRESH: Duration = Duration::from_secs(1);

pub struct MatrixPracticeApp {
    session: PracticeSession,
    operation: OperationType,
    level: Level,
    size: usize,
    digits_row: u32,
    digits_col: u32,
    user_answers: Vec<Vec<String>>,
    report: Option<ScoreReport>,
    error_message: Option<String>,
    state: AppState,
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Configuring,
    ShowingMatrix,
    ShowingResults,
}

impl MatrixPracticeApp {
    pub fn new(session: PracticeSession, defaults: GenerationRequest) -> Self {
        let mut app = Self {
            session,
            operation: defaults.operation,
            level: defaults.level,
            size: defaults.size.clamp(MIN_SIZE, MAX_SIZE),
            digits_row: defaults.digits_row,
            digits_col: defaults.digits_col,
            user_answers: Vec::new(),
            report: None,
            error_message: None,
            state: AppState::Configuring,
        };
        app.normalize_selection();
        app
    }

    /// Keeps level and digit choices within what the operation offers
    fn normalize_selection(&mut self) {
        if !self.operation.offers_level(self.level) {
            self.level = self.operation.levels()[0];
        }

        let offered = self.operation.digit_options(self.level);
        if !offered.contains(&self.digits_row) {
            self.digits_row = offered[0];
        }
        if !offered.contains(&self.digits_col) {
            self.digits_col = offered[0];
        }
    }

    fn request(&self) -> GenerationRequest {
        GenerationRequest {
            size: self.size,
            digits_row: self.digits_row,
            digits_col: self.digits_col,
            operation: self.operation,
            level: self.level,
        }
    }

    fn generate_matrix(&mut self) {
        let request = self.request();
        match self.session.generate(&request) {
            Ok(result) => {
                let n = result.size();
                self.user_answers = vec![vec![String::new(); n]; n];
                self.report = None;
                self.error_message = None;
                self.state = AppState::ShowingMatrix;
            }
            Err(e) => {
                warn!("Matrix generation failed: {}", e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn submit_answers(&mut self) {
        let answers = AnswerSheet::from_rows(&self.user_answers);
        match self.session.submit(&answers) {
            Ok(report) => {
                self.report = Some(report);
                self.state = AppState::ShowingResults;
            }
            Err(e) => {
                warn!("Submission ignored: {}", e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    // Helper methods for testing
    pub fn get_current_state(&self) -> &AppState {
        &self.state
    }

    pub fn get_report(&self) -> Option<&ScoreReport> {
        self.report.as_ref()
    }

    pub fn get_error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn get_session(&self) -> &PracticeSession {
        &self.session
    }

    pub fn get_selection(&self) -> GenerationRequest {
        self.request()
    }

    pub fn select_operation(&mut self, operation: OperationType) {
        self.operation = operation;
        self.normalize_selection();
    }

    pub fn select_level(&mut self, level: Level) {
        self.level = level;
        self.normalize_selection();
    }

    pub fn select_size(&mut self, size: usize) {
        self.size = size.clamp(MIN_SIZE, MAX_SIZE);
    }

    pub fn select_digits(&mut self, digits_row: u32, digits_col: u32) {
        self.digits_row = digits_row;
        self.digits_col = digits_col;
        self.normalize_selection();
    }

    pub fn generate(&mut self) {
        self.generate_matrix();
    }

    pub fn set_answer(&mut self, row: usize, col: usize, answer: String) {
        if let Some(cell) = self.user_answers.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = answer;
        }
    }

    pub fn submit(&mut self) {
        self.submit_answers();
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        let before = (self.operation, self.level);

        egui::ComboBox::from_label("Operation")
            .selected_text(self.operation.name())
            .show_ui(ui, |ui| {
                for operation in OperationType::ALL {
                    ui.selectable_value(&mut self.operation, operation, operation.name());
                }
            });

        if self.operation != before.0 {
            self.normalize_selection();
        }

        ui.horizontal(|ui| {
            ui.label("Difficulty:");
            for &level in self.operation.levels() {
                ui.radio_value(&mut self.level, level, level.name());
            }
        });

        if (self.operation, self.level) != before {
            self.normalize_selection();
        }

        ui.add(egui::Slider::new(&mut self.size, MIN_SIZE..=MAX_SIZE).text("Matrix size (n x n)"));

        let offered = self.operation.digit_options(self.level);
        egui::ComboBox::from_label("Digits for row numbers")
            .selected_text(self.digits_row.to_string())
            .show_ui(ui, |ui| {
                for &digits in offered {
                    ui.selectable_value(&mut self.digits_row, digits, digits.to_string());
                }
            });
        egui::ComboBox::from_label("Digits for column numbers")
            .selected_text(self.digits_col.to_string())
            .show_ui(ui, |ui| {
                for &digits in offered {
                    ui.selectable_value(&mut self.digits_col, digits, digits.to_string());
                }
            });

        ui.add_space(10.0);

        if ui.button("Generate Matrix").clicked() {
            self.generate_matrix();
        }

        if let Some(message) = &self.error_message {
            ui.colored_label(egui::Color32::RED, message.as_str());
        }
    }

    fn show_matrix(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(current) = self.session.current() else {
            return;
        };
        let row_values = current.row_values.clone();
        let col_values = current.col_values.clone();
        let operation = current.request.operation;
        let level = current.request.level;

        ui.heading(format!("Fill in the answers ({})", level.name()));
        ui.label(format!("Each cell = Row {} Column", operation.symbol()));

        if let Some(elapsed) = self.session.elapsed_seconds() {
            ui.label(format!("Time: {}", format_timer(elapsed)));
        }
        // Display only; grading reads the session's own start time
        ctx.request_repaint_after(TIMER_REFRESH);

        ui.add_space(10.0);

        egui::Grid::new("answer_matrix").striped(true).show(ui, |ui| {
            ui.label(egui::RichText::new(operation.symbol()).strong());
            for col_value in &col_values {
                ui.label(egui::RichText::new(col_value.to_string()).strong());
            }
            ui.end_row();

            for (i, row_value) in row_values.iter().enumerate() {
                ui.label(egui::RichText::new(row_value.to_string()).strong());
                for j in 0..col_values.len() {
                    if let Some(cell) = self.user_answers.get_mut(i).and_then(|r| r.get_mut(j)) {
                        ui.add(egui::TextEdit::singleline(cell).desired_width(60.0));
                    }
                }
                ui.end_row();
            }
        });

        ui.add_space(10.0);

        if ui.button("Submit Answers").clicked() {
            self.submit_answers();
        }
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        let Some(report) = &self.report else {
            return;
        };

        ui.heading("Results");
        ui.add_space(10.0);

        egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
            for cell in &report.cell_results {
                let color = if cell.is_correct {
                    egui::Color32::GREEN
                } else {
                    egui::Color32::RED
                };
                let answer = cell.user_raw_text.trim();

                ui.horizontal(|ui| {
                    ui.label(format!(
                        "{} {} {} = {}",
                        cell.row_value,
                        report.operation.symbol(),
                        cell.col_value,
                        if answer.is_empty() { "?" } else { answer }
                    ));
                    ui.label(egui::RichText::new(cell_verdict(cell)).color(color).strong());
                });
            }
        });

        ui.add_space(10.0);
        ui.label(egui::RichText::new(render_score(report)).strong());
        ui.label(render_time(report));
    }
}

impl eframe::App for MatrixPracticeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Matrix Math Practice");
            ui.add_space(10.0);

            self.show_controls(ui);
            ui.separator();

            match self.state {
                AppState::Configuring => {
                    ui.label("Choose your options and generate a matrix.");
                }
                AppState::ShowingMatrix => self.show_matrix(ui, ctx),
                AppState::ShowingResults => self.show_results(ui),
            }
        });
    }
}

pub fn run_app(session: PracticeSession, defaults: GenerationRequest) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([760.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Matrix Math Practice",
        options,
        Box::new(|_cc| Ok(Box::new(MatrixPracticeApp::new(session, defaults)))),
    )
}
