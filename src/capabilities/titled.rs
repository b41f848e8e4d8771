//! Titled capability: maintains a `title` attribute on a target node.
//!
//! When the host also carries an access key, the title text is passed through
//! `format_title_with_access_key` before it is written. That coupling is
//! probed with `supports`, never assumed.

use super::{node_arg, text_arg};
use crate::dom::NodeId;
use crate::mixin::{resolve_text, CapabilityType, Element, Method, MixinError, TextSource, Value};

const FORMAT_WITH_ACCESS_KEY: &str = "format_title_with_access_key";

// ---------------------------------------------------------------------------
// TitledConfig
// ---------------------------------------------------------------------------

/// Options for [`Titled::mixin`].
#[derive(Debug, Clone, Default)]
pub struct TitledConfig {
    /// Title text or producer. Omitted falls back to `default_title`.
    pub title: Option<TextSource>,
    /// The host type's own default title.
    pub default_title: Option<TextSource>,
    /// Node receiving the attribute. Defaults to the host root.
    pub titled: Option<NodeId>,
    /// Label text, used as the title when the label is invisible.
    pub label: Option<String>,
    /// Whether the host hides its label.
    pub invisible_label: bool,
}

impl TitledConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<TextSource>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_default_title(mut self, title: impl Into<TextSource>) -> Self {
        self.default_title = Some(title.into());
        self
    }

    pub fn with_titled(mut self, node: NodeId) -> Self {
        self.titled = Some(node);
        self
    }

    /// Use `label` as the fallback title of an invisible label.
    pub fn with_invisible_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self.invisible_label = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Titled
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Titled {
    titled: Option<NodeId>,
    title: Option<String>,
}

impl Titled {
    /// Attach to `host` and apply `config`.
    pub fn mixin(host: &mut Element, config: TitledConfig) -> Result<usize, MixinError> {
        let slot = host.attach(Titled::default());

        let mut title = resolve_text(config.title.as_ref().or(config.default_title.as_ref()));
        if title.is_none() && config.invisible_label {
            title = config.label;
        }
        Self::set_title_in(host, slot, title)?;

        let target = config.titled.unwrap_or(host.root());
        Self::set_titled_element_in(host, slot, target)?;
        Ok(slot)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn titled_node(&self) -> Option<NodeId> {
        self.titled
    }

    fn set_title_in(
        host: &mut Element,
        slot: usize,
        title: Option<String>,
    ) -> Result<(), MixinError> {
        let me = host.slot_mut::<Self>(slot)?;
        if me.title != title {
            me.title = title;
            Self::update_title_in(host, slot)?;
        }
        Ok(())
    }

    fn set_titled_element_in(
        host: &mut Element,
        slot: usize,
        node: NodeId,
    ) -> Result<(), MixinError> {
        let previous = host.slot_mut::<Self>(slot)?.titled.replace(node);
        if let Some(old) = previous {
            host.update_node(old, |n| n.remove_attr("title"));
        }
        Self::update_title_in(host, slot)
    }

    fn update_title_in(host: &mut Element, slot: usize) -> Result<(), MixinError> {
        let me = host.slot::<Self>(slot)?;
        let (Some(node), title) = (me.titled, me.title.clone()) else {
            return Ok(());
        };
        match title {
            Some(text) => {
                let text = if host.supports(&[FORMAT_WITH_ACCESS_KEY]) {
                    host.invoke(FORMAT_WITH_ACCESS_KEY, &[text.clone().into()])?
                        .into_string()
                        .unwrap_or(text)
                } else {
                    text
                };
                host.update_node(node, |n| n.set_attr("title", text));
            }
            None => {
                host.update_node(node, |n| n.remove_attr("title"));
            }
        }
        Ok(())
    }

    fn call_set_title(
        host: &mut Element,
        slot: usize,
        args: &[Value],
    ) -> Result<Value, MixinError> {
        let title = text_arg("set_title", args)?;
        Self::set_title_in(host, slot, title)?;
        Ok(Value::Null)
    }

    fn call_get_title(host: &mut Element, slot: usize, _: &[Value]) -> Result<Value, MixinError> {
        Ok(host.slot::<Self>(slot)?.title.clone().into())
    }

    fn call_update_title(
        host: &mut Element,
        slot: usize,
        _: &[Value],
    ) -> Result<Value, MixinError> {
        Self::update_title_in(host, slot)?;
        Ok(Value::Null)
    }

    fn call_set_titled_element(
        host: &mut Element,
        slot: usize,
        args: &[Value],
    ) -> Result<Value, MixinError> {
        let node = node_arg("set_titled_element", args)?;
        Self::set_titled_element_in(host, slot, node)?;
        Ok(Value::Null)
    }
}

impl CapabilityType for Titled {
    const KIND: &'static str = "Titled";
    const TARGET_PROPERTY: Option<&'static str> = Some("titled");
    const METHODS: &'static [Method] = &[
        Method::new("set_title", Self::call_set_title),
        Method::new("get_title", Self::call_get_title),
        Method::new("update_title", Self::call_update_title),
        Method::new("set_titled_element", Self::call_set_titled_element),
    ];

    fn target(&self) -> Option<NodeId> {
        self.titled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeData;

    fn title_attr(host: &Element, node: NodeId) -> Option<String> {
        host.dom().get(node).and_then(|n| n.attr("title")).map(str::to_owned)
    }

    #[test]
    fn config_title_written_to_root() {
        let mut host = Element::new("Button", "div");
        Titled::mixin(&mut host, TitledConfig::new().with_title("Save")).unwrap();
        assert_eq!(title_attr(&host, host.root()).as_deref(), Some("Save"));
        assert_eq!(host.capability::<Titled>().and_then(Titled::title), Some("Save"));
    }

    #[test]
    fn default_title_used_when_omitted() {
        let mut host = Element::new("Button", "div");
        Titled::mixin(&mut host, TitledConfig::new().with_default_title("Default")).unwrap();
        assert_eq!(host.invoke("get_title", &[]), Ok("Default".into()));
    }

    #[test]
    fn invisible_label_fallback() {
        let mut host = Element::new("Button", "div");
        Titled::mixin(&mut host, TitledConfig::new().with_invisible_label("Close")).unwrap();
        assert_eq!(title_attr(&host, host.root()).as_deref(), Some("Close"));
    }

    #[test]
    fn null_title_removes_attribute() {
        let mut host = Element::new("Button", "div");
        Titled::mixin(&mut host, TitledConfig::new().with_title("x")).unwrap();
        host.invoke("set_title", &[Value::Null]).unwrap();
        assert_eq!(title_attr(&host, host.root()), None);
        assert_eq!(host.invoke("get_title", &[]), Ok(Value::Null));
    }

    #[test]
    fn producer_title_resolved_once_at_set() {
        let mut host = Element::new("Button", "div");
        let config = TitledConfig::new().with_title(TextSource::producer(|| Some("made".into())));
        Titled::mixin(&mut host, config).unwrap();
        assert_eq!(title_attr(&host, host.root()).as_deref(), Some("made"));
    }

    #[test]
    fn retarget_moves_attribute() {
        let mut host = Element::new("Button", "div");
        let button = host.create_node(NodeData::new("a"));
        Titled::mixin(&mut host, TitledConfig::new().with_title("Go")).unwrap();
        host.invoke("set_titled_element", &[button.into()]).unwrap();
        assert_eq!(title_attr(&host, host.root()), None);
        assert_eq!(title_attr(&host, button).as_deref(), Some("Go"));
        assert_eq!(host.delegated_property("titled"), Ok(button));
    }

    #[test]
    fn set_title_rejects_non_text() {
        let mut host = Element::new("Button", "div");
        Titled::mixin(&mut host, TitledConfig::new()).unwrap();
        assert!(matches!(
            host.invoke("set_title", &[Value::Bool(true)]),
            Err(MixinError::InvalidArgument { method: "set_title", .. })
        ));
    }
}
