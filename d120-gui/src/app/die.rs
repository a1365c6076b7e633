use std::time::Duration;

use d120::prelude::*;
use eframe::egui::{self, Color32, FontId, Pos2, Vec2, epaint::Vertex};

use super::{GOLD, color32};

const DIE_SIZE: f32 = 260.0;
const RADIUS: f32 = DIE_SIZE * 0.42;
const RIM_SEGMENTS: usize = 64;
const PARTICLE_RADIUS: f32 = 3.0;
const ROLLING_NUMBER_ALPHA: f32 = 0.6;

fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Maps a screen offset from the die center to marble texture coordinates.
fn uv_at(offset: Vec2, motion: &DieMotion) -> Pos2 {
    let local = rotate(offset / (2.0 * RADIUS), motion.angle);
    Pos2::new(0.5 + local.x, 0.5 + local.y + motion.tilt * 0.1)
}

fn marble_mesh(texture: &egui::TextureHandle, center: Pos2, motion: &DieMotion) -> egui::Mesh {
    let mut mesh = egui::Mesh::with_texture(texture.id());
    mesh.vertices.push(Vertex {
        pos: center,
        uv: uv_at(Vec2::ZERO, motion),
        color: Color32::WHITE,
    });
    for i in 0..RIM_SEGMENTS {
        let theta = i as f32 / RIM_SEGMENTS as f32 * std::f32::consts::TAU;
        let offset = Vec2::angled(theta) * RADIUS;
        mesh.vertices.push(Vertex {
            pos: center + offset,
            uv: uv_at(offset, motion),
            color: Color32::WHITE,
        });
    }
    for i in 0..RIM_SEGMENTS as u32 {
        let next = (i + 1) % RIM_SEGMENTS as u32;
        mesh.add_triangle(0, i + 1, next + 1);
    }
    mesh
}

pub fn die_ui(
    ui: &mut egui::Ui,
    texture: &egui::TextureHandle,
    marble: &MarbleTexture,
    motion: &DieMotion,
    state: &RollState,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(DIE_SIZE), egui::Sense::click());
    let painter = ui.painter_at(rect);
    let center = rect.center();

    painter.circle_filled(
        center + Vec2::new(0.0, RADIUS * 0.9),
        RADIUS * 0.55,
        Color32::from_black_alpha(40),
    );
    painter.add(marble_mesh(texture, center, motion));

    // Labels ride the texture, so they are placed with the inverse of the uv rotation.
    let size = marble.size as f32;
    for label in &marble.labels {
        let local = Vec2::new(label.x / size - 0.5, label.y / size - 0.5 - motion.tilt * 0.1);
        if local.length() > 0.45 {
            continue;
        }
        let pos = center + rotate(local, -motion.angle) * (2.0 * RADIUS);
        painter.text(
            pos,
            egui::Align2::CENTER_CENTER,
            label.value.to_string(),
            FontId::proportional(11.0),
            GOLD,
        );
    }

    painter.circle_filled(
        center + Vec2::new(-RADIUS * 0.35, -RADIUS * 0.4),
        RADIUS * 0.22,
        Color32::from_white_alpha(28),
    );
    painter.circle_stroke(center, RADIUS, egui::Stroke::new(2.0, Color32::from_black_alpha(90)));

    let alpha = if state.in_progress() { ROLLING_NUMBER_ALPHA } else { 1.0 };
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        state.displayed.to_string(),
        FontId::proportional(44.0),
        Color32::WHITE.gamma_multiply(alpha),
    );

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

pub fn paint_particles(painter: &egui::Painter, center: Pos2, burst: &ParticleBurst, now: Duration) {
    let elapsed = burst.elapsed(now);
    for particle in &burst.particles {
        if let Some((dx, dy, alpha)) = particle.offset_at(elapsed) {
            painter.circle_filled(
                center + Vec2::new(dx, dy),
                PARTICLE_RADIUS,
                color32(particle.color).gamma_multiply(alpha),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_center_is_texture_center() {
        let motion = DieMotion::new();
        let uv = uv_at(Vec2::ZERO, &motion);
        assert!((uv.x - 0.5).abs() < 1e-6);
        assert!((uv.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rim_stays_inside_texture() {
        let mut motion = DieMotion::new();
        motion.angle = 1.3;
        for i in 0..RIM_SEGMENTS {
            let theta = i as f32 / RIM_SEGMENTS as f32 * std::f32::consts::TAU;
            let uv = uv_at(Vec2::angled(theta) * RADIUS, &motion);
            assert!((-0.01..=1.01).contains(&uv.x));
            assert!((-0.01..=1.01).contains(&uv.y));
        }
    }
}
