use std::time::Duration;

use d120::prelude::*;
use eframe::egui::{self, Color32, RichText};

pub mod die;
pub mod editor;

const GOLD: Color32 = Color32::from_rgb(0xc9, 0xa8, 0x4c);
const MUTED: Color32 = Color32::from_rgb(0x8a, 0xa8, 0x9e);
const TEXTURE_SIZE: usize = 512;
const RESULT_FADE_SECS: f32 = 0.35;

pub fn color32(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

pub struct App {
    pub sequencer: RollSequencer,
    pub editor: Option<editor::EditorWindow>,
    motion: DieMotion,
    flavor: Roller,
    marble: MarbleTexture,
    texture: Option<egui::TextureHandle>,
    die_center: egui::Pos2,
}

impl App {
    pub fn new(config: Config) -> d120::Result<Self> {
        let mut roller = Roller::new();
        let mut flavor = roller.fork();
        let marble = MarbleTexture::generate(&mut flavor, TEXTURE_SIZE);
        Ok(Self {
            sequencer: RollSequencer::from_config(&config, roller)?,
            editor: None,
            motion: DieMotion::new(),
            flavor,
            marble,
            texture: None,
            die_center: egui::Pos2::ZERO,
        })
    }

    fn roll(&mut self, now: Duration) {
        if let Trigger::Started(session) = self.sequencer.roll_dice(now) {
            log::debug!("Roll {} started", session);
            let spin = self.sequencer.timing().spin();
            self.motion.spin(&mut self.flavor, now, spin);
        }
    }

    fn texture(&mut self, ctx: &egui::Context) -> egui::TextureHandle {
        let marble = &self.marble;
        self.texture
            .get_or_insert_with(|| {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [marble.size, marble.size],
                    &marble.to_rgba_bytes(),
                );
                ctx.load_texture("marble", image, egui::TextureOptions::LINEAR)
            })
            .clone()
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        ctx.request_repaint();

        let now = Duration::from_secs_f64(ctx.input(|i| i.time));
        if let Err(e) = self.sequencer.advance(now) {
            log::error!("Roll failed: {}", e);
        }
        self.motion.update(now);

        let texture = self.texture(ctx);
        let mut roll_requested = false;
        let mut edit_requested = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.label(RichText::new("D120").size(52.0).strong().color(GOLD));
                ui.label(RichText::new("decision roller").italics().color(MUTED));
                ui.add_space(8.0);

                let state = self.sequencer.state();
                let response = die::die_ui(ui, &texture, &self.marble, &self.motion, state);
                self.die_center = response.rect.center();
                roll_requested |= response.clicked();

                ui.add_space(8.0);
                self.result_ui(ui, ctx);
                ui.add_space(12.0);
                self.legend_ui(ui);
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    let rolling = self.sequencer.is_rolling();
                    if ui
                        .add_enabled(!rolling, egui::Button::new("Roll the Dice"))
                        .clicked()
                    {
                        roll_requested = true;
                    }
                    if ui.button("Edit Choices").clicked() {
                        edit_requested = true;
                    }
                });
            });
        });

        if let Some(burst) = &self.sequencer.state().particles {
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("particles"),
            ));
            die::paint_particles(&painter, self.die_center, burst, now);
        }

        if roll_requested {
            self.roll(now);
        }
        if edit_requested && self.editor.is_none() {
            self.editor = Some(editor::EditorWindow::new(self.sequencer.choices()));
        }

        let rolling = self.sequencer.is_rolling();
        let action = self.editor.as_mut().and_then(|e| e.show(ctx, rolling));
        match action {
            Some(editor::EditorAction::Save(choices)) => match self.sequencer.reconfigure(choices) {
                Ok(()) => {
                    log::info!("Applied {} choices", self.sequencer.choices().len());
                    self.editor = None;
                }
                Err(e) => log::warn!("Could not apply choices: {}", e),
            },
            Some(editor::EditorAction::Cancel) => self.editor = None,
            None => {}
        }
    }

    fn result_ui(&self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let state = self.sequencer.state();
        let shown = ctx.animate_bool_with_time(
            egui::Id::new("result_visible"),
            state.result_visible,
            RESULT_FADE_SECS,
        );

        ui.label(RichText::new("the fates have chosen").color(MUTED.gamma_multiply(shown)));
        match &state.outcome {
            Some(outcome) => {
                ui.label(
                    RichText::new(&outcome.choice.name)
                        .size(34.0 + 4.0 * shown)
                        .strong()
                        .color(color32(outcome.choice.color).gamma_multiply(shown)),
                );
                ui.label(
                    RichText::new(format!(
                        "Rolled {} \u{b7} Range {}",
                        outcome.roll,
                        outcome.choice.range_label()
                    ))
                    .color(MUTED.gamma_multiply(shown)),
                );
            }
            None => {
                ui.label(RichText::new("\u{2014}").size(34.0).color(MUTED));
                ui.label("");
            }
        }
    }

    fn legend_ui(&self, ui: &mut egui::Ui) {
        let state = self.sequencer.state();
        let winner = state.visible_outcome().map(|o| o.index);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            for (i, range) in self.sequencer.ranges().iter().enumerate() {
                ui.horizontal(|ui| {
                    let (dot, _) =
                        ui.allocate_exact_size(egui::Vec2::splat(12.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(dot.center(), 5.0, color32(range.color));
                    let text = format!("{} ({})", range.name, range.range_label());
                    if winner == Some(i) {
                        ui.label(RichText::new(text).strong().color(color32(range.color)));
                    } else {
                        ui.label(text);
                    }
                });
            }
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
