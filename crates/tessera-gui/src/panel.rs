//! The editor's parameter panel: titled groups of vertical sliders.
//!
//! Slider values are read from the [`ParamSession`] every frame, so idle
//! refreshes and host automation show up without extra plumbing. A drag
//! writes straight back through the session, updating the mirror and the
//! host in one step.

use std::ops::Range;

use egui::{Align, CornerRadius, Frame, Layout, Margin, RichText};
use tessera_core::{PARAMETER_COUNT, ParamSession};

use crate::theme::Theme;
use crate::widgets::VSlider;

/// A titled run of consecutive parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamGroup {
    /// Heading drawn above the sliders.
    pub title: &'static str,
    /// Parameter indices in the group.
    pub params: Range<usize>,
}

/// Group layout for `count` parameters.
///
/// The default eight-parameter table gets Filter / Envelope ADSR / Amp
/// groups; any other count is shown as a single "Parameters" group.
pub fn layout_groups(count: usize) -> Vec<ParamGroup> {
    match count {
        0 => Vec::new(),
        PARAMETER_COUNT => vec![
            ParamGroup {
                title: "Filter",
                params: 0..2,
            },
            ParamGroup {
                title: "Envelope ADSR",
                params: 2..6,
            },
            ParamGroup {
                title: "Amp",
                params: 6..8,
            },
        ],
        n => vec![ParamGroup {
            title: "Parameters",
            params: 0..n,
        }],
    }
}

/// Immediate-mode panel drawing every mirrored parameter.
pub struct ParameterPanel {
    groups: Vec<ParamGroup>,
    names: Vec<String>,
    /// Values at open time; double-click resets to these.
    defaults: Vec<f32>,
    theme: Theme,
}

impl ParameterPanel {
    /// Build the panel for the parameters in `params`.
    pub fn new(params: &ParamSession, theme: Theme) -> Self {
        let len = params.len();
        Self {
            groups: layout_groups(len),
            names: (0..len).map(|i| params.name(i)).collect(),
            defaults: (0..len).map(|i| params.value(i)).collect(),
            theme,
        }
    }

    /// The panel's theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Draw one frame of the panel.
    pub fn show(&self, ctx: &egui::Context, params: &ParamSession) {
        egui::CentralPanel::default()
            .frame(Frame::NONE.inner_margin(Margin::same(5)))
            .show(ctx, |ui| {
                ui.horizontal_top(|ui| {
                    for (index, group) in self.groups.iter().enumerate() {
                        self.show_group(ui, index, group, params);
                    }
                });
            });
    }

    fn show_group(&self, ui: &mut egui::Ui, index: usize, group: &ParamGroup, params: &ParamSession) {
        Frame::NONE
            .fill(self.theme.group_fill(index))
            .corner_radius(CornerRadius::same(3))
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(group.title).strong());
                    ui.add_space(4.0);
                    ui.horizontal_top(|ui| {
                        for param in group.params.clone() {
                            self.show_slider(ui, param, params);
                        }
                    });
                });
            });
    }

    fn show_slider(&self, ui: &mut egui::Ui, param: usize, params: &ParamSession) {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            let mut value = params.value(param);
            let default = self.defaults.get(param).copied().unwrap_or(0.0);
            let response = ui
                .push_id(param, |ui| {
                    ui.add(VSlider::new(&mut value, 0.0..=1.0).default(default))
                })
                .inner;
            if response.changed() {
                params.write(param, value);
            }

            let name = self.names.get(param).map_or("", String::as_str);
            ui.label(RichText::new(name).small());
            ui.label(
                RichText::new(format!("{value:.2}"))
                    .small()
                    .color(self.theme.text_secondary),
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tessera_core::{HostStub, ParameterHost, ParameterMirror};

    use super::*;

    fn session(host: &Arc<HostStub>, len: usize) -> ParamSession {
        let mirror = Arc::new(ParameterMirror::from_host(host.as_ref(), len));
        ParamSession::new(mirror, Arc::clone(host) as Arc<dyn ParameterHost>)
    }

    #[test]
    fn default_table_gets_named_groups() {
        let groups = layout_groups(PARAMETER_COUNT);
        let titles: Vec<_> = groups.iter().map(|g| g.title).collect();
        assert_eq!(titles, ["Filter", "Envelope ADSR", "Amp"]);
        assert_eq!(groups[1].params, 2..6);
    }

    #[test]
    fn groups_cover_every_parameter_once() {
        for count in 0..=10 {
            let covered: Vec<usize> = layout_groups(count)
                .into_iter()
                .flat_map(|g| g.params)
                .collect();
            assert_eq!(covered, (0..count).collect::<Vec<_>>());
        }
    }

    #[test]
    fn other_counts_fall_back_to_one_group() {
        let groups = layout_groups(5);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "Parameters");
    }

    #[test]
    fn panel_captures_names_and_defaults() {
        let host = Arc::new(HostStub::new());
        let panel = ParameterPanel::new(&session(&host, 8), Theme::default());
        assert_eq!(panel.names[1], "Res");
        assert_eq!(panel.defaults[4], 0.7);
    }

    #[test]
    fn frame_without_input_leaves_parameters_alone() {
        let host = Arc::new(HostStub::new());
        let params = session(&host, 8);
        let panel = ParameterPanel::new(&params, Theme::default());

        let ctx = egui::Context::default();
        panel.theme().apply(&ctx);
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| panel.show(ctx, &params));
        }

        assert_eq!(params.mirror().snapshot(), [0.6, 0.3, 0.0, 0.2, 0.7, 0.2, 1.0, 0.5]);
        assert_eq!(host.get_parameter(0), 0.6);
    }
}
