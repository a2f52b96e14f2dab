// src/ui/tool.rs
//! The GTags tool window.
//!
//! Owns everything the window needs across frames: the current radio-group
//! choices, the free-form tags text, the in-flight [`TagSession`] and the
//! notification footer. The window has an explicit open/close lifecycle and
//! is driven once per frame from the application loop.

use imgui::{Condition, Ui};

use crate::host::NoticeLevel;
use crate::scene::SceneGraph;
use crate::tagging::{
    AssetCategory, HierarchyMode, SessionEvent, SessionState, SubdivisionLevel, TagError,
    TagOptions, TagSession,
};

const CONFIRM_TITLE: &str = "Guerilla tags found";

/// How many footer notices stay around before the oldest are dropped.
const NOTICE_BACKLOG: usize = 24;

/// State of the GTags tool window.
pub struct GtagsTool {
    open: bool,
    category: AssetCategory,
    level: SubdivisionLevel,
    hierarchy: HierarchyMode,
    extra_tags: String,
    session: Option<TagSession>,
    confirm_open: bool,
    notices: Vec<(NoticeLevel, String)>,
}

impl Default for GtagsTool {
    fn default() -> Self {
        Self::new()
    }
}

impl GtagsTool {
    pub fn new() -> Self {
        Self {
            open: false,
            category: AssetCategory::default(),
            level: SubdivisionLevel::default(),
            hierarchy: HierarchyMode::default(),
            extra_tags: String::new(),
            session: None,
            confirm_open: false,
            notices: Vec::new(),
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Draws the tool window and advances any in-flight tagging session.
    pub fn draw(&mut self, ui: &Ui, scene: &mut SceneGraph) {
        if !self.open {
            return;
        }

        self.pump(scene);

        let mut open = self.open;
        ui.window("GTags")
            .opened(&mut open)
            .size([400.0, 560.0], Condition::FirstUseEver)
            .position([460.0, 30.0], Condition::FirstUseEver)
            .build(|| {
                self.section_category(ui);
                ui.separator();
                self.section_subdivision(ui);
                ui.separator();
                self.section_hierarchy(ui);
                ui.separator();
                self.section_extra_tags(ui);
                ui.separator();

                if ui.button("Apply") {
                    self.apply(scene);
                }

                self.section_notices(ui);
                self.confirm_modal(ui);
            });
        self.open = open;
    }

    fn section_category(&mut self, ui: &Ui) {
        ui.text("Select type:");
        let categories = AssetCategory::all();
        for category in categories {
            ui.radio_button(category.as_str(), &mut self.category, category);
            if category != categories[categories.len() - 1] {
                ui.same_line();
            }
        }
    }

    fn section_subdivision(&mut self, ui: &Ui) {
        ui.text("Select subdivision level:");
        let levels = SubdivisionLevel::all();
        for level in levels {
            ui.radio_button(level.as_str(), &mut self.level, level);
            if level != levels[levels.len() - 1] {
                ui.same_line();
            }
        }
    }

    fn section_hierarchy(&mut self, ui: &Ui) {
        ui.text("Select automated tags type:");
        // Two rows of two, like the radio grid artists know from the old tool.
        for (index, mode) in HierarchyMode::all().into_iter().enumerate() {
            ui.radio_button(mode.as_str(), &mut self.hierarchy, mode);
            if index % 2 == 0 {
                ui.same_line_with_pos(200.0);
            }
        }
    }

    fn section_extra_tags(&mut self, ui: &Ui) {
        ui.text("Add additional tags");
        ui.text("More tags:");
        ui.same_line();
        ui.set_next_item_width(-1.0);
        ui.input_text("##extra_tags", &mut self.extra_tags)
            .hint("example1,example2,example3")
            .build();
    }

    fn section_notices(&mut self, ui: &Ui) {
        if self.notices.is_empty() {
            return;
        }
        ui.spacing();
        ui.separator();
        ui.child_window("notices").build(|| {
            for (level, message) in &self.notices {
                match level {
                    NoticeLevel::Warning => {
                        ui.text_colored([1.0, 0.73, 0.2, 1.0], message);
                    }
                    NoticeLevel::Info => ui.text_colored([0.75, 0.75, 0.75, 1.0], message),
                }
            }
        });
    }

    /// The one-time "overwrite existing tags?" modal. "No" is the safe
    /// answer; closing the window without choosing counts as "No".
    fn confirm_modal(&mut self, ui: &Ui) {
        if self.awaiting_choice() && !self.confirm_open {
            ui.open_popup(CONFIRM_TITLE);
            self.confirm_open = true;
        }

        let shown = ui
            .modal_popup_config(CONFIRM_TITLE)
            .always_auto_resize(true)
            .build(|| {
                ui.text("Some objects already have Guerilla tags.");
                ui.text("Do you want to overwrite them?");
                ui.spacing();
                if ui.button("Yes") {
                    self.resolve_choice(true);
                    ui.close_current_popup();
                }
                ui.same_line();
                if ui.button("No") {
                    self.resolve_choice(false);
                    ui.close_current_popup();
                }
            });

        // Dismissed without an answer (e.g. Escape): same as "No".
        if self.confirm_open && shown.is_none() {
            self.resolve_choice(false);
        }
    }

    fn awaiting_choice(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.state() == SessionState::AwaitingOverwriteChoice)
    }

    fn resolve_choice(&mut self, allow: bool) {
        if let Some(session) = self.session.as_mut() {
            session.choose_overwrite(allow);
        }
        self.confirm_open = false;
    }

    /// Starts a new invocation from the current window state.
    fn apply(&mut self, scene: &mut SceneGraph) {
        if self.session.is_some() {
            // An invocation is still parked on the overwrite question.
            return;
        }

        let options = TagOptions {
            category: self.category,
            level: self.level,
            hierarchy: self.hierarchy,
            extra_tags: self.extra_tags.clone(),
        };

        let mut session = TagSession::new(options);
        match session.begin(scene) {
            Ok(_) => self.session = Some(session),
            Err(TagError::NoSelection) => {
                self.push_notice(NoticeLevel::Warning, "No objects selected!".to_owned());
            }
        }
    }

    /// Steps the in-flight session until it finishes or parks on the
    /// overwrite question.
    fn pump(&mut self, scene: &mut SceneGraph) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        loop {
            match session.step(scene) {
                SessionEvent::AwaitingOverwriteChoice => {
                    self.session = Some(session);
                    return;
                }
                SessionEvent::Tagged(_) => {}
                SessionEvent::Skipped { object, reason } => {
                    self.push_notice(
                        NoticeLevel::Warning,
                        format!("Skipping {object}, {reason}"),
                    );
                }
                SessionEvent::Finished => {
                    self.push_notice(NoticeLevel::Info, session.report().summary());
                    return;
                }
            }
        }
    }

    fn push_notice(&mut self, level: NoticeLevel, message: String) {
        self.notices.push((level, message));
        if self.notices.len() > NOTICE_BACKLOG {
            let excess = self.notices.len() - NOTICE_BACKLOG;
            self.notices.drain(..excess);
        }
    }
}
