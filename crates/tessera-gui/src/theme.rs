//! Visual styling for the editor panel.
//!
//! A flat dark style: no rounding on sliders, and hovered/active widgets
//! keep their idle colors so a dragged slider only changes by its fill.

use egui::{Color32, CornerRadius, Stroke, Style, Visuals};

/// Theme colors for the editor.
pub struct Theme {
    /// Backdrops behind parameter groups, cycled in group order.
    pub group_fills: [Color32; 2],
    /// Empty part of a slider.
    pub slider_track: Color32,
    /// Filled part of a slider.
    pub slider_fill: Color32,
    /// Group titles and slider captions.
    pub text_primary: Color32,
    /// Value readouts.
    pub text_secondary: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            group_fills: [
                Color32::from_rgb(0x41, 0x7c, 0x8c),
                Color32::from_rgb(0x61, 0x5c, 0x9c),
            ],
            slider_track: Color32::from_rgb(0x29, 0x4a, 0x7a),
            slider_fill: Color32::from_rgb(0x3d, 0x85, 0xe0),
            text_primary: Color32::from_rgb(235, 235, 240),
            text_secondary: Color32::from_rgb(200, 205, 215),
        }
    }
}

impl Theme {
    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();
        let mut visuals = Visuals::dark();

        // Transparent panels: the GL clear color is the window background.
        visuals.panel_fill = Color32::TRANSPARENT;
        visuals.window_fill = Color32::TRANSPARENT;

        let idle = self.slider_track;
        for widget in [
            &mut visuals.widgets.inactive,
            &mut visuals.widgets.hovered,
            &mut visuals.widgets.active,
        ] {
            widget.bg_fill = idle;
            widget.weak_bg_fill = idle;
            widget.bg_stroke = Stroke::NONE;
            widget.fg_stroke = Stroke::new(1.0, self.text_primary);
            widget.corner_radius = CornerRadius::ZERO;
            widget.expansion = 0.0;
        }

        visuals.selection.bg_fill = self.slider_fill;
        visuals.selection.stroke = Stroke::new(1.0, self.slider_fill);
        visuals.override_text_color = Some(self.text_primary);

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(10.0, 4.0);
        style.spacing.window_margin = egui::Margin::same(5);

        ctx.set_style(style);
    }

    /// Backdrop color for the group at `index`.
    pub fn group_fill(&self, index: usize) -> Color32 {
        self.group_fills[index % self.group_fills.len()]
    }
}
