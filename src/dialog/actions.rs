//! The dialog's set of action widgets and filtered lookup.

use crate::widgets::ActionWidget;

/// Criteria for [`ActionSet::get`].
///
/// A widget matches a list criterion if it matches any entry in the list;
/// it must match every criterion that is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionFilter {
    pub actions: Option<Vec<String>>,
    pub flags: Option<Vec<String>>,
    pub visible: Option<bool>,
    pub disabled: Option<bool>,
}

impl ActionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.actions.get_or_insert_with(Vec::new).push(action.into());
        self
    }

    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.get_or_insert_with(Vec::new).push(flag.into());
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Filter for the Ctrl+Enter target: visible, enabled, flagged `primary`.
    pub fn primary() -> Self {
        Self::new().flag("primary").visible(true).disabled(false)
    }

    pub fn matches(&self, widget: &ActionWidget) -> bool {
        let action_ok = self
            .actions
            .as_ref()
            .is_none_or(|names| names.iter().any(|n| n == widget.action()));
        let flag_ok = self
            .flags
            .as_ref()
            .is_none_or(|flags| flags.iter().any(|f| widget.has_flag(f)));
        let visible_ok = self.visible.is_none_or(|v| v == widget.is_visible());
        let disabled_ok = self.disabled.is_none_or(|d| d == widget.is_disabled());
        action_ok && flag_ok && visible_ok && disabled_ok
    }
}

/// Ordered collection of action widgets.
#[derive(Debug, Default)]
pub struct ActionSet {
    list: Vec<ActionWidget>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, widgets: impl IntoIterator<Item = ActionWidget>) {
        self.list.extend(widgets);
    }

    /// Remove every widget whose action is in `actions`. Returns how many went.
    pub fn remove(&mut self, actions: &[&str]) -> usize {
        let before = self.list.len();
        self.list.retain(|w| !actions.contains(&w.action()));
        before - self.list.len()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Widgets matching `filter`, in insertion order.
    pub fn get(&self, filter: &ActionFilter) -> Vec<&ActionWidget> {
        self.list.iter().filter(|w| filter.matches(w)).collect()
    }

    /// First widget for `action`.
    pub fn find(&self, action: &str) -> Option<&ActionWidget> {
        self.list.iter().find(|w| w.action() == action)
    }

    pub fn find_mut(&mut self, action: &str) -> Option<&mut ActionWidget> {
        self.list.iter_mut().find(|w| w.action() == action)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionWidget> {
        self.list.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ActionWidget> {
        self.list.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::ActionConfig;

    fn set() -> ActionSet {
        let mut set = ActionSet::new();
        let widgets = [
            ActionConfig::new("save").with_flag("primary").disabled(true),
            ActionConfig::new("continue").with_flag("primary"),
            ActionConfig::new("delete").with_flag("destructive"),
            ActionConfig::new("help").visible(false),
        ]
        .into_iter()
        .map(|c| ActionWidget::new(c).unwrap());
        set.add(widgets);
        set
    }

    fn names(widgets: Vec<&ActionWidget>) -> Vec<&str> {
        widgets.into_iter().map(ActionWidget::action).collect()
    }

    #[test]
    fn primary_filter_skips_disabled() {
        assert_eq!(names(set().get(&ActionFilter::primary())), vec!["continue"]);
    }

    #[test]
    fn list_criteria_match_any_entry() {
        let set = set();
        let filter = ActionFilter::new().flag("primary").flag("destructive");
        assert_eq!(names(set.get(&filter)), vec!["save", "continue", "delete"]);
        let filter = ActionFilter::new().action("help").action("delete").visible(true);
        assert_eq!(names(set.get(&filter)), vec!["delete"]);
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(set().get(&ActionFilter::new()).len(), 4);
    }

    #[test]
    fn remove_and_find() {
        let mut set = set();
        assert_eq!(set.remove(&["save", "help", "nope"]), 2);
        assert!(set.find("save").is_none());
        set.find_mut("delete").unwrap().set_disabled(true);
        assert!(set.find("delete").unwrap().is_disabled());
        set.clear();
        assert!(set.is_empty());
    }
}
