//! The dialog: a pending-aware window driven through phase processes.
//!
//! Opening runs the setup process then the ready process; closing runs hold
//! then teardown. Actions run as single-use processes while the dialog is
//! marked busy. Every process is built fresh from the dialog's own steps plus
//! whatever the [`DialogBehavior`] adds.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, error, warn};

use super::actions::{ActionFilter, ActionSet};
use super::behavior::{DefaultBehavior, DialogBehavior};
use super::config::{CloseData, DialogConfig, OpenData};
use crate::capabilities::{LabelConfig, Labelled, Pending, Titled, TitledConfig};
use crate::dom::{NodeData, NodeId};
use crate::event::{BindingAction, Key, KeyBindingRegistry, KeyEvent, Modifiers};
use crate::mixin::{Element, MixinError, Value};
use crate::process::{Process, ProcessError, Step, StepError};
use crate::widget::lifecycle::{LifecycleError, LifecycleEvent, LifecycleState, LifecycleTracker};
use crate::widgets::{ActionConfig, ActionWidget};

const READY_CLASS: &str = "ui-window-ready";
const ACTION_NODE_CLASS: &str = "ui-dialog-action";

/// Outcome of a completed close.
///
/// Closing always reaches `Closed`; failures along the way are reported here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloseReport {
    /// Value from the close data.
    pub value: Value,
    /// Failure of the hold process, if any.
    pub hold: Option<ProcessError>,
    /// Every teardown failure, in step order.
    pub teardown: Vec<ProcessError>,
}

impl CloseReport {
    /// Whether hold and teardown both ran without failure.
    pub fn is_clean(&self) -> bool {
        self.hold.is_none() && self.teardown.is_empty()
    }
}

struct Inner {
    config: DialogConfig,
    element: RefCell<Element>,
    title: RefCell<Element>,
    head: NodeId,
    body: NodeId,
    actions_node: NodeId,
    lifecycle: RefCell<LifecycleTracker>,
    actions: RefCell<ActionSet>,
    attached: RefCell<Vec<String>>,
    current_action: RefCell<Option<String>>,
    listening: Cell<bool>,
    bindings: RefCell<KeyBindingRegistry>,
    behavior: Box<dyn DialogBehavior>,
}

/// Shared handle to a dialog. Clones refer to the same dialog.
#[derive(Clone)]
pub struct Dialog {
    inner: Rc<Inner>,
}

impl Dialog {
    pub fn new(config: DialogConfig) -> Result<Self, MixinError> {
        Self::with_behavior(config, DefaultBehavior)
    }

    pub fn with_behavior(
        config: DialogConfig,
        behavior: impl DialogBehavior + 'static,
    ) -> Result<Self, MixinError> {
        let mut element = Element::new("Dialog", "div");
        let mut title = Element::new("LabelWidget", "span");
        if let Some(theme) = &config.theme {
            element = element.with_theme(theme.clone());
            title = title.with_theme(theme.clone());
        }

        let root = element.root();
        element.update_node(root, |n| {
            n.add_class("ui-window");
            n.add_class("ui-dialog");
            n.set_attr("role", "dialog");
        });
        let dom = element.dom_mut();
        let head = dom.insert_child(root, NodeData::new("div").with_class("ui-window-head"));
        let body = dom.insert_child(
            root,
            NodeData::new("div").with_class("ui-window-body").with_class("ui-dialog-content"),
        );
        let actions_node =
            dom.insert_child(root, NodeData::new("div").with_class("ui-dialog-actions"));
        Pending::mixin(&mut element, Some(head))?;

        let title_root = title.root();
        title.update_node(title_root, |n| n.add_class("ui-labelWidget"));
        Labelled::mixin(
            &mut title,
            LabelConfig {
                label: None,
                label_node: Some(title_root),
            },
        )?;
        Titled::mixin(&mut title, TitledConfig::default())?;

        let mut bindings = KeyBindingRegistry::dialog_defaults();
        if !config.escapable {
            bindings.unbind(Key::Escape, Modifiers::NONE);
        }

        Ok(Self {
            inner: Rc::new(Inner {
                config,
                element: RefCell::new(element),
                title: RefCell::new(title),
                head,
                body,
                actions_node,
                lifecycle: RefCell::new(LifecycleTracker::new()),
                actions: RefCell::new(ActionSet::new()),
                attached: RefCell::new(Vec::new()),
                current_action: RefCell::new(None),
                listening: Cell::new(false),
                bindings: RefCell::new(bindings),
                behavior: Box::new(behavior),
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn config(&self) -> &DialogConfig {
        &self.inner.config
    }

    // -- queries ----------------------------------------------------------

    pub fn state(&self) -> LifecycleState {
        self.inner.lifecycle.borrow().state()
    }

    pub fn is_opening(&self) -> bool {
        self.state() == LifecycleState::Opening
    }

    pub fn is_open(&self) -> bool {
        self.state() == LifecycleState::Open
    }

    pub fn is_closing(&self) -> bool {
        self.state() == LifecycleState::Closing
    }

    pub fn is_pending(&self) -> bool {
        self.pending_count() > 0
    }

    /// Number of actions currently executing.
    pub fn pending_count(&self) -> usize {
        self.inner
            .element
            .borrow()
            .capability::<Pending>()
            .map_or(0, Pending::count)
    }

    pub fn current_action(&self) -> Option<String> {
        self.inner.current_action.borrow().clone()
    }

    /// Whether key events are currently handled.
    pub fn is_listening(&self) -> bool {
        self.inner.listening.get()
    }

    /// Current title label.
    pub fn title(&self) -> Option<String> {
        self.inner
            .title
            .borrow()
            .capability::<Labelled>()
            .and_then(Labelled::label)
            .map(str::to_owned)
    }

    /// Drain the lifecycle events recorded since the last call.
    pub fn drain_events(&self) -> Vec<LifecycleEvent> {
        self.inner.lifecycle.borrow_mut().pending_events()
    }

    /// Node that carries the busy marker.
    pub fn head(&self) -> NodeId {
        self.inner.head
    }

    /// Node callers fill with dialog content.
    pub fn body(&self) -> NodeId {
        self.inner.body
    }

    /// Names of the actions currently attached to the action area.
    pub fn attached_actions(&self) -> Vec<String> {
        self.inner.attached.borrow().clone()
    }

    pub fn with_element<R>(&self, f: impl FnOnce(&Element) -> R) -> R {
        f(&self.inner.element.borrow())
    }

    pub fn with_element_mut<R>(&self, f: impl FnOnce(&mut Element) -> R) -> R {
        f(&mut self.inner.element.borrow_mut())
    }

    pub fn with_title_element<R>(&self, f: impl FnOnce(&Element) -> R) -> R {
        f(&self.inner.title.borrow())
    }

    /// Read the action set.
    pub fn with_actions<R>(&self, f: impl FnOnce(&ActionSet) -> R) -> R {
        f(&self.inner.actions.borrow())
    }

    /// Change the action set, then re-sync the action area.
    pub fn update_actions<R>(&self, f: impl FnOnce(&mut ActionSet) -> R) -> R {
        let out = f(&mut self.inner.actions.borrow_mut());
        self.on_actions_change();
        out
    }

    /// Add or replace a key binding.
    pub fn bind_key(&self, key: Key, modifiers: Modifiers, action: BindingAction) {
        self.inner.bindings.borrow_mut().bind(key, modifiers, action);
    }

    // -- transitions ------------------------------------------------------

    /// Open the dialog: setup, then ready.
    ///
    /// Only legal while closed. On failure the dialog returns to closed and
    /// the ready process does not run after a setup failure.
    pub async fn open(&self, data: OpenData) -> Result<(), LifecycleError> {
        self.inner.lifecycle.borrow_mut().begin_open()?;
        debug!(dialog = %self.name(), "opening");
        match self.run_open(&data).await {
            Ok(()) => {
                self.inner.lifecycle.borrow_mut().finish_open()?;
                debug!(dialog = %self.name(), "opened");
                Ok(())
            }
            Err(source) => {
                warn!(dialog = %self.name(), %source, "open failed");
                self.release();
                self.update_root(|n| n.remove_class(READY_CLASS));
                self.inner.lifecycle.borrow_mut().abort_open()?;
                Err(LifecycleError::OpenFailed { source })
            }
        }
    }

    /// Close the dialog: hold, then teardown.
    ///
    /// Only legal while open. Teardown always runs to completion, even after
    /// a hold failure; failures are logged and returned in the report.
    pub async fn close(&self, data: CloseData) -> Result<CloseReport, LifecycleError> {
        self.inner.lifecycle.borrow_mut().begin_close()?;
        debug!(dialog = %self.name(), "closing");

        let hold = match self.hold_process(&data) {
            Ok(process) => process.execute().await.err(),
            Err(err) => Some(err),
        };
        if let Some(err) = &hold {
            warn!(dialog = %self.name(), %err, "hold failed, tearing down anyway");
        }

        let (teardown, hook_err) = self.teardown_process(&data);
        let mut failures: Vec<ProcessError> = hook_err.into_iter().collect();
        failures.extend(teardown.execute_best_effort().await);
        for err in &failures {
            warn!(dialog = %self.name(), %err, "teardown step failed");
        }

        self.inner.lifecycle.borrow_mut().finish_close()?;
        debug!(dialog = %self.name(), "closed");
        Ok(CloseReport {
            value: data.value,
            hold,
            teardown: failures,
        })
    }

    /// Run the named action while the dialog is marked busy.
    ///
    /// The busy counter is released exactly once when this returns, whatever
    /// the outcome. The empty action closes the dialog.
    pub async fn execute_action(&self, action: &str) -> Result<(), LifecycleError> {
        let _busy = BusyGuard::enter(self);
        *self.inner.current_action.borrow_mut() = Some(action.to_owned());
        debug!(dialog = %self.name(), action, "executing action");
        let process = self.action_process(action)?;
        process.execute().await.map_err(|source| {
            warn!(dialog = %self.name(), action, %source, "action failed");
            LifecycleError::ActionFailed {
                action: action.to_owned(),
                source,
            }
        })
    }

    /// Execute `action` as if its widget were clicked. Ignored, returning
    /// `Ok(false)`, while the dialog is pending.
    pub async fn click_action(&self, action: &str) -> Result<bool, LifecycleError> {
        if self.is_pending() {
            debug!(dialog = %self.name(), action, "click ignored while pending");
            return Ok(false);
        }
        self.execute_action(action).await.map(|()| true)
    }

    /// Handle a key press. Returns whether the key was consumed.
    pub async fn handle_key(&self, event: KeyEvent) -> Result<bool, LifecycleError> {
        if !self.inner.listening.get() {
            return Ok(false);
        }
        let binding = self.inner.bindings.borrow().resolve(&event).cloned();
        let action = match binding {
            Some(BindingAction::Dismiss) => String::new(),
            Some(BindingAction::Primary) => {
                let primary = self
                    .inner
                    .actions
                    .borrow()
                    .get(&ActionFilter::primary())
                    .first()
                    .map(|w| w.action().to_owned());
                match primary {
                    Some(action) => action,
                    None => return Ok(false),
                }
            }
            Some(BindingAction::Action(name)) => name,
            _ => return Ok(false),
        };
        self.execute_action(&action).await.map(|()| true)
    }

    // -- phase processes --------------------------------------------------

    fn setup_process(&self, data: &OpenData) -> Result<Process, ProcessError> {
        let setup = Step::sync_with(self.clone(), data.clone(), |d, data| d.initialize(data));
        let mut process = Process::from_steps([setup.named("dialog setup")]);
        self.inner.behavior.setup_process(self, data, &mut process)?;
        Ok(process)
    }

    fn ready_process(&self, data: &OpenData) -> Result<Process, ProcessError> {
        let mut process = Process::from_steps([Step::sync(self.clone(), |d| {
            d.update_root(|n| n.add_class(READY_CLASS));
            Ok(())
        })
        .named("dialog ready")]);
        self.inner.behavior.ready_process(self, data, &mut process)?;
        Ok(process)
    }

    fn hold_process(&self, data: &CloseData) -> Result<Process, ProcessError> {
        let mut process = Process::from_steps([Step::sync(self.clone(), |d| {
            d.update_root(|n| n.remove_class(READY_CLASS));
            Ok(())
        })
        .named("dialog hold")]);
        self.inner.behavior.hold_process(self, data, &mut process)?;
        Ok(process)
    }

    /// Teardown still runs when the behaviour hook fails; the hook error is
    /// returned alongside.
    fn teardown_process(&self, data: &CloseData) -> (Process, Option<ProcessError>) {
        let mut process = Process::from_steps([Step::sync(self.clone(), |d| {
            d.release();
            Ok(())
        })
        .named("dialog teardown")]);
        let err = self.inner.behavior.teardown_process(self, data, &mut process).err();
        (process, err)
    }

    fn action_process(&self, action: &str) -> Result<Process, ProcessError> {
        let mut process = Process::new().single_use();
        if action.is_empty() {
            process.next(
                Step::task(self.clone(), |d| async move {
                    d.close(CloseData::default())
                        .await
                        .map(|_| ())
                        .map_err(StepError::from)
                })
                .named("dismiss"),
            )?;
        }
        self.inner.behavior.action_process(self, action, &mut process)?;
        Ok(process)
    }

    // -- internals --------------------------------------------------------

    async fn run_open(&self, data: &OpenData) -> Result<(), ProcessError> {
        self.setup_process(data)?.execute().await?;
        self.ready_process(data)?.execute().await
    }

    /// Base setup: title, actions, key listening.
    fn initialize(&self, data: &OpenData) -> Result<(), StepError> {
        let config = &self.inner.config;
        let title = data.title.clone().unwrap_or_else(|| config.title.clone());
        {
            let mut element = self.inner.title.borrow_mut();
            element.invoke("set_label", &[title.clone().into()])?;
            element.invoke("set_title", &[title.into()])?;
        }

        let actions = data.actions.clone().unwrap_or_else(|| config.actions.clone());
        let widgets = actions
            .into_iter()
            .map(|c| self.make_action(c))
            .collect::<Result<Vec<_>, _>>()?;
        self.update_actions(|set| set.add(widgets));

        self.inner.listening.set(true);
        Ok(())
    }

    fn make_action(&self, config: ActionConfig) -> Result<ActionWidget, MixinError> {
        match &self.inner.config.theme {
            Some(theme) => ActionWidget::themed(config, theme.clone()),
            None => ActionWidget::new(config),
        }
    }

    /// Stop listening and forget actions.
    fn release(&self) {
        self.inner.listening.set(false);
        self.update_actions(ActionSet::clear);
        *self.inner.current_action.borrow_mut() = None;
    }

    fn on_actions_change(&self) {
        self.detach_actions();
        if !self.is_closing() {
            self.attach_actions();
        }
    }

    fn attach_actions(&self) {
        let actions = self.inner.actions.borrow();
        let mut element = self.inner.element.borrow_mut();
        let mut attached = self.inner.attached.borrow_mut();
        for widget in actions.iter() {
            let mut node = NodeData::new("span")
                .with_class(ACTION_NODE_CLASS)
                .with_attr("data-action", widget.action());
            if let Some(label) = widget.label() {
                node = node.with_text(label);
            }
            element.dom_mut().insert_child(self.inner.actions_node, node);
            attached.push(widget.action().to_owned());
        }
    }

    fn detach_actions(&self) {
        let mut element = self.inner.element.borrow_mut();
        let children = element.dom().children(self.inner.actions_node).to_vec();
        for child in children {
            element.dom_mut().remove(child);
        }
        self.inner.attached.borrow_mut().clear();
    }

    fn update_root(&self, f: impl FnOnce(&mut NodeData)) {
        let mut element = self.inner.element.borrow_mut();
        let root = element.root();
        element.update_node(root, f);
    }
}

impl fmt::Debug for Dialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialog")
            .field("name", &self.name())
            .field("state", &self.state())
            .field("pending", &self.pending_count())
            .field("current_action", &self.current_action())
            .field("actions", &self.inner.actions.borrow().len())
            .finish()
    }
}

/// Holds one unit of the dialog's busy counter. Released on drop, so a
/// cancelled or failed action still releases exactly once.
struct BusyGuard<'a> {
    dialog: &'a Dialog,
    held: bool,
}

impl<'a> BusyGuard<'a> {
    fn enter(dialog: &'a Dialog) -> Self {
        let held = match dialog.inner.element.borrow_mut().invoke("push_pending", &[]) {
            Ok(_) => true,
            Err(err) => {
                error!(dialog = %dialog.name(), %err, "could not mark dialog pending");
                false
            }
        };
        Self { dialog, held }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if !self.held {
            return;
        }
        match self.dialog.inner.element.try_borrow_mut() {
            Ok(mut element) => {
                if let Err(err) = element.invoke("pop_pending", &[]) {
                    error!(dialog = %self.dialog.name(), %err, "could not release pending");
                }
            }
            Err(_) => error!(
                dialog = %self.dialog.name(),
                "element borrowed while releasing pending"
            ),
        }
    }
}
