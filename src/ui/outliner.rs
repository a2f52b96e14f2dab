//! Scene outliner panel.
//!
//! Lists the scene hierarchy and lets the user build the selection the
//! tagging session runs on. In the standalone tool this stands in for the
//! host application's own outliner; it also shows the `GuerillaTags` value
//! each transform currently carries, which makes the tool's effect visible
//! without digging through an attribute editor.

use imgui::{Condition, Ui};

use crate::scene::{NodeKind, SceneGraph};
use crate::tagging::TAG_ATTRIBUTE;

/// Draws the outliner window. Clicking a row toggles that object in and out
/// of the selection.
pub fn scene_outliner(ui: &Ui, scene: &mut SceneGraph) {
    ui.window("Outliner")
        .size([420.0, 560.0], Condition::FirstUseEver)
        .position([20.0, 30.0], Condition::FirstUseEver)
        .build(|| {
            ui.text(format!("Scene Objects ({})", scene.len()));
            ui.separator();

            if scene.is_empty() {
                ui.text_disabled("Empty scene");
                return;
            }

            ui.child_window("object_list")
                .size([0.0, 330.0])
                .border(true)
                .build(|| {
                    for (id, depth) in scene.flattened() {
                        let node = scene.node(id);
                        let label = format!("{}{}##{id}", "  ".repeat(depth), node.name);
                        let is_shape = node.kind == NodeKind::Shape;
                        let is_selected = scene.is_selected(id);

                        if is_shape {
                            let _style = ui.push_style_color(
                                imgui::StyleColor::Text,
                                [0.55, 0.55, 0.55, 1.0],
                            );
                            if ui.selectable_config(&label).selected(is_selected).build() {
                                scene.toggle_selected(id);
                            }
                        } else if ui.selectable_config(&label).selected(is_selected).build() {
                            scene.toggle_selected(id);
                        }
                    }
                });

            if ui.button("Clear selection") {
                scene.clear_selection();
            }

            ui.spacing();
            ui.text("Tags on selection:");
            ui.separator();
            render_selection_tags(ui, scene);
        });
}

/// Current `GuerillaTags` values of the selected objects.
fn render_selection_tags(ui: &Ui, scene: &SceneGraph) {
    let selected = scene.selected_ids();
    if selected.is_empty() {
        ui.text_disabled("Nothing selected");
        return;
    }

    for &id in selected {
        let node = scene.node(id);
        match node.attributes.get(TAG_ATTRIBUTE) {
            Some(tags) if !tags.is_empty() => {
                ui.text(format!("{}: {tags}", node.name));
            }
            Some(_) => ui.text_disabled(format!("{}: (empty)", node.name)),
            None => ui.text_disabled(format!("{}: -", node.name)),
        }
    }
}
