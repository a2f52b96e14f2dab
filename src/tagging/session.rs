//! Per-invocation tagging session.
//!
//! A [`TagSession`] owns everything one Apply press touches: the resolved
//! object queue, the memoized overwrite decision, and the outcome report.
//! The session is an explicit state machine so a non-blocking front end can
//! park it while the overwrite question is on screen:
//!
//! ```text
//! Idle -> Processing -> (AwaitingOverwriteChoice -> Processing)* -> Done
//! ```
//!
//! Hosts with a blocking modal dialog can instead use [`TagSession::run`],
//! which pumps the machine to completion against an [`Interaction`].

use std::collections::VecDeque;
use std::fmt;

use log::{debug, info, warn};

use crate::host::{HostError, Interaction, NoticeLevel, ObjectPath, SceneHost};

use super::{compose_tags, resolve_leaf_transforms, TagError, TagOptions, TAG_ATTRIBUTE};

/// Whether pre-existing tags may be replaced. Resolved at most once per
/// invocation; the answer then covers every remaining object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteDecision {
    #[default]
    Unset,
    Allow,
    Deny,
}

/// Lifecycle of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, selection not resolved yet.
    Idle,
    /// Objects queued, stepping through them.
    Processing,
    /// The front object has pre-existing tags and the overwrite policy is
    /// still undecided; parked until [`TagSession::choose_overwrite`].
    AwaitingOverwriteChoice,
    /// Queue drained; the report is final.
    Done,
}

/// What a single [`TagSession::step`] did.
#[derive(Debug)]
pub enum SessionEvent {
    /// The session needs the one-time overwrite answer before it can
    /// continue. The object stays queued.
    AwaitingOverwriteChoice,
    Tagged(ObjectPath),
    Skipped {
        object: ObjectPath,
        reason: SkipReason,
    },
    Finished,
}

/// Why an object was passed over. Skips never abort the batch.
#[derive(Debug)]
pub enum SkipReason {
    /// Pre-existing tags and the artist declined to overwrite.
    ExistingTags,
    /// The host failed to read or write the attribute.
    Host(HostError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExistingTags => f.write_str("existing tags not overwritten"),
            Self::Host(err) => fmt::Display::fmt(err, f),
        }
    }
}

/// Outcome of one invocation.
#[derive(Debug, Default)]
pub struct TagReport {
    pub tagged: Vec<ObjectPath>,
    pub skipped: Vec<ObjectPath>,
    pub warnings: Vec<String>,
}

impl TagReport {
    /// One-line completion notice, shown regardless of how many objects were
    /// skipped.
    pub fn summary(&self) -> String {
        if self.skipped.is_empty() {
            format!("Guerilla tags added to {} transform(s)", self.tagged.len())
        } else {
            format!(
                "Guerilla tags added to {} transform(s), {} skipped",
                self.tagged.len(),
                self.skipped.len()
            )
        }
    }
}

enum StepOutcome {
    Tagged,
    NeedsChoice,
    SkippedExisting,
}

/// State machine for one Apply press.
pub struct TagSession {
    options: TagOptions,
    state: SessionState,
    decision: OverwriteDecision,
    queue: VecDeque<ObjectPath>,
    report: TagReport,
}

impl TagSession {
    pub fn new(options: TagOptions) -> Self {
        Self {
            options,
            state: SessionState::Idle,
            decision: OverwriteDecision::Unset,
            queue: VecDeque::new(),
            report: TagReport::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn options(&self) -> &TagOptions {
        &self.options
    }

    pub fn report(&self) -> &TagReport {
        &self.report
    }

    pub fn into_report(self) -> TagReport {
        self.report
    }

    /// Resolves the selection and queues the leaf transforms.
    ///
    /// Returns the number of queued objects. On [`TagError::NoSelection`]
    /// nothing has been touched and the session stays [`SessionState::Idle`].
    pub fn begin<H: SceneHost>(&mut self, host: &H) -> Result<usize, TagError> {
        let leaves = resolve_leaf_transforms(host)?;
        let count = leaves.len();
        self.queue = leaves.into();
        self.state = SessionState::Processing;
        debug!("tagging session started over {count} object(s)");
        Ok(count)
    }

    /// Processes the object at the front of the queue.
    ///
    /// Per-object host failures become [`SessionEvent::Skipped`] with a
    /// recorded warning; the batch always continues.
    pub fn step<H: SceneHost>(&mut self, host: &mut H) -> SessionEvent {
        match self.state {
            SessionState::Idle | SessionState::Done => return SessionEvent::Finished,
            SessionState::AwaitingOverwriteChoice => return SessionEvent::AwaitingOverwriteChoice,
            SessionState::Processing => {}
        }

        let Some(object) = self.queue.front().cloned() else {
            self.state = SessionState::Done;
            info!("{}", self.report.summary());
            return SessionEvent::Finished;
        };

        match self.process(host, &object) {
            Ok(StepOutcome::NeedsChoice) => {
                self.state = SessionState::AwaitingOverwriteChoice;
                SessionEvent::AwaitingOverwriteChoice
            }
            Ok(StepOutcome::Tagged) => {
                self.queue.pop_front();
                self.report.tagged.push(object.clone());
                SessionEvent::Tagged(object)
            }
            Ok(StepOutcome::SkippedExisting) => {
                self.queue.pop_front();
                self.skip(object, SkipReason::ExistingTags)
            }
            Err(err) => {
                self.queue.pop_front();
                self.skip(object, SkipReason::Host(err))
            }
        }
    }

    /// Resolves the pending overwrite question and resumes processing.
    /// Ignored unless the session is parked on the choice.
    pub fn choose_overwrite(&mut self, allow: bool) {
        if self.state == SessionState::AwaitingOverwriteChoice {
            self.decision = if allow {
                OverwriteDecision::Allow
            } else {
                OverwriteDecision::Deny
            };
            self.state = SessionState::Processing;
        }
    }

    fn process<H: SceneHost>(
        &self,
        host: &mut H,
        object: &ObjectPath,
    ) -> Result<StepOutcome, HostError> {
        host.ensure_string_attribute(object, TAG_ATTRIBUTE)?;
        let current = host
            .string_attribute(object, TAG_ATTRIBUTE)?
            .unwrap_or_default();

        if !current.is_empty() {
            match self.decision {
                OverwriteDecision::Unset => return Ok(StepOutcome::NeedsChoice),
                OverwriteDecision::Deny => return Ok(StepOutcome::SkippedExisting),
                OverwriteDecision::Allow => {}
            }
        }

        let tags = compose_tags(host, object, &self.options);
        host.set_string_attribute(object, TAG_ATTRIBUTE, &tags)?;
        debug!("tagged {object}: {tags}");
        Ok(StepOutcome::Tagged)
    }

    fn skip(&mut self, object: ObjectPath, reason: SkipReason) -> SessionEvent {
        let message = format!("Skipping {object}, {reason}");
        warn!("{message}");
        self.report.warnings.push(message);
        self.report.skipped.push(object.clone());
        SessionEvent::Skipped { object, reason }
    }

    /// Runs a whole invocation against a blocking [`Interaction`].
    ///
    /// The overwrite question is forwarded to [`Interaction::confirm`]
    /// exactly once per invocation, skips surface as warnings, and the
    /// completion notice is always delivered, even when every object was
    /// skipped.
    pub fn run<H, I>(
        host: &mut H,
        interaction: &mut I,
        options: TagOptions,
    ) -> Result<TagReport, TagError>
    where
        H: SceneHost,
        I: Interaction,
    {
        let mut session = TagSession::new(options);
        if let Err(err) = session.begin(host) {
            interaction.notify(NoticeLevel::Warning, "No objects selected!");
            return Err(err);
        }

        loop {
            match session.step(host) {
                SessionEvent::AwaitingOverwriteChoice => {
                    let allow = interaction.confirm(
                        "Guerilla tags found",
                        "Some objects already have Guerilla tags. Do you want to overwrite them?",
                    );
                    session.choose_overwrite(allow);
                }
                SessionEvent::Skipped { object, reason } => {
                    interaction
                        .notify(NoticeLevel::Warning, &format!("Skipping {object}, {reason}"));
                }
                SessionEvent::Tagged(_) => {}
                SessionEvent::Finished => break,
            }
        }

        interaction.notify(NoticeLevel::Info, &session.report().summary());
        Ok(session.into_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneGraph;
    use crate::tagging::{AssetCategory, HierarchyMode, SubdivisionLevel};

    /// Interaction double with canned confirm answers.
    #[derive(Default)]
    struct ScriptedInteraction {
        answers: Vec<bool>,
        confirms: usize,
        notices: Vec<(NoticeLevel, String)>,
    }

    impl ScriptedInteraction {
        fn answering(answer: bool) -> Self {
            Self {
                answers: vec![answer],
                ..Default::default()
            }
        }
    }

    impl Interaction for ScriptedInteraction {
        fn confirm(&mut self, _title: &str, _message: &str) -> bool {
            let answer = self.answers.get(self.confirms).copied().unwrap_or(false);
            self.confirms += 1;
            answer
        }

        fn notify(&mut self, level: NoticeLevel, message: &str) {
            self.notices.push((level, message.to_owned()));
        }
    }

    /// Host wrapper that fails attribute writes on one object.
    struct FailingWrite {
        inner: SceneGraph,
        fail_on: ObjectPath,
    }

    impl SceneHost for FailingWrite {
        fn selection(&self) -> Vec<ObjectPath> {
            self.inner.selection()
        }
        fn is_transform(&self, object: &ObjectPath) -> bool {
            self.inner.is_transform(object)
        }
        fn has_transform_children(&self, object: &ObjectPath) -> bool {
            self.inner.has_transform_children(object)
        }
        fn transform_descendants(&self, object: &ObjectPath) -> Vec<ObjectPath> {
            self.inner.transform_descendants(object)
        }
        fn parent(&self, object: &ObjectPath) -> Option<ObjectPath> {
            self.inner.parent(object)
        }
        fn ensure_string_attribute(
            &mut self,
            object: &ObjectPath,
            name: &str,
        ) -> Result<(), HostError> {
            self.inner.ensure_string_attribute(object, name)
        }
        fn string_attribute(
            &self,
            object: &ObjectPath,
            name: &str,
        ) -> Result<Option<String>, HostError> {
            self.inner.string_attribute(object, name)
        }
        fn set_string_attribute(
            &mut self,
            object: &ObjectPath,
            name: &str,
            value: &str,
        ) -> Result<(), HostError> {
            if object == &self.fail_on {
                return Err(HostError::Attribute {
                    object: object.to_string(),
                    message: "attribute is locked".to_owned(),
                });
            }
            self.inner.set_string_attribute(object, name, value)
        }
    }

    fn options() -> TagOptions {
        TagOptions {
            category: AssetCategory::Props,
            level: SubdivisionLevel::S2,
            hierarchy: HierarchyMode::ObjectName,
            extra_tags: String::new(),
        }
    }

    /// Two leaf props under a selected group.
    fn selected_scene() -> SceneGraph {
        let mut scene = SceneGraph::new();
        let grp = scene.add_transform("Grp", None);
        scene.add_transform("Prop_A", Some(grp));
        scene.add_transform("Prop_B", Some(grp));
        scene.select(grp);
        scene
    }

    fn tags_of(scene: &SceneGraph, path: &str) -> Option<String> {
        scene
            .string_attribute(&ObjectPath::from(path), TAG_ATTRIBUTE)
            .unwrap()
    }

    fn pretag(scene: &mut SceneGraph, path: &str, value: &str) {
        scene
            .set_string_attribute(&ObjectPath::from(path), TAG_ATTRIBUTE, value)
            .unwrap();
    }

    #[test]
    fn fresh_objects_are_tagged_without_any_prompt() {
        let mut scene = selected_scene();
        let mut ui = ScriptedInteraction::default();

        let report = TagSession::run(&mut scene, &mut ui, options()).unwrap();

        assert_eq!(report.tagged.len(), 2);
        assert_eq!(ui.confirms, 0);
        assert_eq!(tags_of(&scene, "/Grp/Prop_A").unwrap(), "props,s2,Prop_A");
        assert_eq!(tags_of(&scene, "/Grp/Prop_B").unwrap(), "props,s2,Prop_B");
    }

    #[test]
    fn no_selection_aborts_before_any_mutation() {
        let mut scene = SceneGraph::new();
        scene.add_transform("Prop_A", None);
        let mut ui = ScriptedInteraction::default();

        let result = TagSession::run(&mut scene, &mut ui, options());

        assert!(matches!(result, Err(TagError::NoSelection)));
        assert_eq!(tags_of(&scene, "/Prop_A"), None);
        assert_eq!(ui.notices.len(), 1);
        assert_eq!(ui.notices[0].0, NoticeLevel::Warning);
    }

    #[test]
    fn prompt_appears_once_and_governs_the_whole_batch() {
        let mut scene = selected_scene();
        pretag(&mut scene, "/Grp/Prop_A", "old,tags");
        pretag(&mut scene, "/Grp/Prop_B", "old,tags");
        let mut ui = ScriptedInteraction::answering(true);

        let report = TagSession::run(&mut scene, &mut ui, options()).unwrap();

        assert_eq!(ui.confirms, 1);
        assert_eq!(report.tagged.len(), 2);
        assert_eq!(tags_of(&scene, "/Grp/Prop_A").unwrap(), "props,s2,Prop_A");
        assert_eq!(tags_of(&scene, "/Grp/Prop_B").unwrap(), "props,s2,Prop_B");
    }

    #[test]
    fn denied_overwrite_leaves_attributes_untouched() {
        let mut scene = selected_scene();
        pretag(&mut scene, "/Grp/Prop_A", "old,tags");
        let mut ui = ScriptedInteraction::answering(false);

        let report = TagSession::run(&mut scene, &mut ui, options()).unwrap();

        assert_eq!(tags_of(&scene, "/Grp/Prop_A").unwrap(), "old,tags");
        assert_eq!(report.skipped, [ObjectPath::from("/Grp/Prop_A")]);
        // The untagged sibling is still processed.
        assert_eq!(tags_of(&scene, "/Grp/Prop_B").unwrap(), "props,s2,Prop_B");
        assert!(ui
            .notices
            .iter()
            .any(|(level, message)| *level == NoticeLevel::Warning
                && message.contains("/Grp/Prop_A")));
    }

    #[test]
    fn completion_notice_fires_even_when_everything_is_skipped() {
        let mut scene = selected_scene();
        pretag(&mut scene, "/Grp/Prop_A", "old");
        pretag(&mut scene, "/Grp/Prop_B", "old");
        let mut ui = ScriptedInteraction::answering(false);

        let report = TagSession::run(&mut scene, &mut ui, options()).unwrap();

        assert_eq!(report.tagged.len(), 0);
        assert_eq!(report.skipped.len(), 2);
        let (level, message) = ui.notices.last().unwrap();
        assert_eq!(*level, NoticeLevel::Info);
        assert!(message.contains("2 skipped"));
    }

    #[test]
    fn retagging_with_allow_is_idempotent() {
        let mut scene = selected_scene();

        let mut ui = ScriptedInteraction::default();
        TagSession::run(&mut scene, &mut ui, options()).unwrap();
        let first = tags_of(&scene, "/Grp/Prop_A").unwrap();

        let mut ui = ScriptedInteraction::answering(true);
        TagSession::run(&mut scene, &mut ui, options()).unwrap();

        assert_eq!(tags_of(&scene, "/Grp/Prop_A").unwrap(), first);
    }

    #[test]
    fn host_failure_on_one_object_does_not_abort_the_batch() {
        let mut host = FailingWrite {
            inner: selected_scene(),
            fail_on: ObjectPath::from("/Grp/Prop_A"),
        };
        let mut ui = ScriptedInteraction::default();

        let report = TagSession::run(&mut host, &mut ui, options()).unwrap();

        assert_eq!(report.skipped, [ObjectPath::from("/Grp/Prop_A")]);
        assert_eq!(report.tagged, [ObjectPath::from("/Grp/Prop_B")]);
        assert_eq!(
            tags_of(&host.inner, "/Grp/Prop_B").unwrap(),
            "props,s2,Prop_B"
        );
    }

    #[test]
    fn step_api_parks_on_the_overwrite_choice() {
        let mut scene = selected_scene();
        pretag(&mut scene, "/Grp/Prop_A", "old");

        let mut session = TagSession::new(options());
        assert_eq!(session.begin(&scene).unwrap(), 2);
        assert_eq!(session.state(), SessionState::Processing);

        assert!(matches!(
            session.step(&mut scene),
            SessionEvent::AwaitingOverwriteChoice
        ));
        assert_eq!(session.state(), SessionState::AwaitingOverwriteChoice);
        // Stepping again without an answer stays parked.
        assert!(matches!(
            session.step(&mut scene),
            SessionEvent::AwaitingOverwriteChoice
        ));

        session.choose_overwrite(false);
        assert!(matches!(
            session.step(&mut scene),
            SessionEvent::Skipped { .. }
        ));
        assert!(matches!(session.step(&mut scene), SessionEvent::Tagged(_)));
        assert!(matches!(session.step(&mut scene), SessionEvent::Finished));
        assert_eq!(session.state(), SessionState::Done);
    }
}
