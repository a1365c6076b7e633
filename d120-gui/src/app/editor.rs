use d120::prelude::*;
use eframe::egui::{self, RichText};

use super::{MUTED, color32};

pub enum EditorAction {
    Save(Vec<Choice>),
    Cancel,
}

/// The "Configure Choices" window. Holds a draft until applied or cancelled.
pub struct EditorWindow {
    draft: ChoiceDraft,
}

impl EditorWindow {
    pub fn new(choices: &[Choice]) -> Self {
        Self {
            draft: ChoiceDraft::new(choices),
        }
    }

    fn change_count(&mut self, delta: isize) {
        if let Err(e) = self.draft.change_count(delta) {
            log::warn!("{}", e);
        }
    }

    fn rows_ui(&mut self, ui: &mut egui::Ui) {
        let entries = self.draft.entries().to_vec();
        let preview = self.draft.preview();

        egui::Grid::new("choice_rows")
            .striped(true)
            .num_columns(4)
            .show(ui, |ui| {
                for (i, (entry, ranged)) in entries.iter().zip(&preview).enumerate() {
                    ui.label(RichText::new(format!("{}", i + 1)).color(MUTED));

                    let mut rgb = entry.color.to_array();
                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                        if let Err(e) = self.draft.set_color(i, Color::from_array(rgb)) {
                            log::warn!("{}", e);
                        }
                    }

                    let mut name = entry.name.clone();
                    let edit = egui::TextEdit::singleline(&mut name)
                        .char_limit(MAX_NAME_LEN)
                        .hint_text(Choice::placeholder_name(i));
                    if ui.add(edit).changed() {
                        if let Err(e) = self.draft.set_name(i, &name) {
                            log::warn!("{}", e);
                        }
                    }

                    ui.label(RichText::new(ranged.range_label()).color(color32(ranged.color)));
                    ui.end_row();
                }
            });
    }

    /// Draws the window. `rolling` disables Apply, since a live roll refuses new choices.
    pub fn show(&mut self, ctx: &egui::Context, rolling: bool) -> Option<EditorAction> {
        let mut action = None;
        let mut open = true;

        egui::Window::new("Configure Choices")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("Name each option and set how many fate decides between.")
                        .color(MUTED),
                );
                ui.add_space(6.0);

                ui.horizontal(|ui| {
                    ui.label("Number of choices");
                    if ui
                        .add_enabled(self.draft.can_shrink(), egui::Button::new("\u{2212}"))
                        .clicked()
                    {
                        self.change_count(-1);
                    }
                    ui.label(RichText::new(self.draft.len().to_string()).strong());
                    if ui
                        .add_enabled(self.draft.can_grow(), egui::Button::new("+"))
                        .clicked()
                    {
                        self.change_count(1);
                    }
                });
                ui.separator();

                self.rows_ui(ui);

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        action = Some(EditorAction::Cancel);
                    }
                    if ui.add_enabled(!rolling, egui::Button::new("Apply")).clicked() {
                        match self.draft.clone().save() {
                            Ok(choices) => action = Some(EditorAction::Save(choices)),
                            Err(e) => log::warn!("Could not save choices: {}", e),
                        }
                    }
                });
            });

        if !open {
            action = Some(EditorAction::Cancel);
        }
        action
    }
}
