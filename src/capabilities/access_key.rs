//! Access-key capability: an `accesskey` attribute plus title formatting.

use super::{node_arg, text_arg};
use crate::dom::NodeId;
use crate::mixin::{resolve_text, CapabilityType, Element, Method, MixinError, TextSource, Value};

const UPDATE_TITLE: &str = "update_title";

/// Options for [`AccessKeyed::mixin`].
#[derive(Debug, Clone, Default)]
pub struct AccessKeyConfig {
    /// Key or producer of the key. Omitted means no access key.
    pub access_key: Option<TextSource>,
    /// Node receiving the attribute. Defaults to the host root.
    pub access_keyed: Option<NodeId>,
}

impl AccessKeyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_access_key(mut self, key: impl Into<TextSource>) -> Self {
        self.access_key = Some(key.into());
        self
    }

    pub fn with_access_keyed(mut self, node: NodeId) -> Self {
        self.access_keyed = Some(node);
        self
    }
}

#[derive(Debug, Default)]
pub struct AccessKeyed {
    access_keyed: Option<NodeId>,
    access_key: Option<String>,
}

impl AccessKeyed {
    /// Attach to `host` and apply `config`.
    ///
    /// If the host is also titled, its title is refreshed once the target is
    /// known so that it picks up the key.
    pub fn mixin(host: &mut Element, config: AccessKeyConfig) -> Result<usize, MixinError> {
        let slot = host.attach(AccessKeyed::default());
        Self::set_access_key_in(host, slot, resolve_text(config.access_key.as_ref()))?;
        let target = config.access_keyed.unwrap_or(host.root());
        Self::set_access_keyed_element_in(host, slot, target)?;
        if host.supports(&[UPDATE_TITLE]) {
            host.invoke(UPDATE_TITLE, &[])?;
        }
        Ok(slot)
    }

    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }

    /// Append the key to a tooltip title, once a target is set. An empty key
    /// leaves the title alone.
    pub fn format_title(&self, title: &str) -> String {
        match (&self.access_keyed, &self.access_key) {
            (Some(_), Some(key)) if !key.is_empty() => format!("{title} [{key}]"),
            _ => title.to_owned(),
        }
    }

    fn set_access_key_in(
        host: &mut Element,
        slot: usize,
        key: Option<String>,
    ) -> Result<(), MixinError> {
        let me = host.slot_mut::<Self>(slot)?;
        if me.access_key == key {
            return Ok(());
        }
        me.access_key = key.clone();
        if let Some(node) = me.access_keyed {
            host.update_node(node, |n| match key {
                Some(k) => n.set_attr("accesskey", k),
                None => n.remove_attr("accesskey"),
            });
        }
        if host.supports(&[UPDATE_TITLE]) {
            host.invoke(UPDATE_TITLE, &[])?;
        }
        Ok(())
    }

    fn set_access_keyed_element_in(
        host: &mut Element,
        slot: usize,
        node: NodeId,
    ) -> Result<(), MixinError> {
        let me = host.slot_mut::<Self>(slot)?;
        let previous = me.access_keyed.replace(node);
        let key = me.access_key.clone();
        if let Some(old) = previous {
            host.update_node(old, |n| n.remove_attr("accesskey"));
        }
        if let Some(k) = key {
            host.update_node(node, |n| n.set_attr("accesskey", k));
        }
        Ok(())
    }

    fn call_set_access_key(
        host: &mut Element,
        slot: usize,
        args: &[Value],
    ) -> Result<Value, MixinError> {
        let key = text_arg("set_access_key", args)?;
        Self::set_access_key_in(host, slot, key)?;
        Ok(Value::Null)
    }

    fn call_get_access_key(
        host: &mut Element,
        slot: usize,
        _: &[Value],
    ) -> Result<Value, MixinError> {
        Ok(host.slot::<Self>(slot)?.access_key.clone().into())
    }

    fn call_set_access_keyed_element(
        host: &mut Element,
        slot: usize,
        args: &[Value],
    ) -> Result<Value, MixinError> {
        let node = node_arg("set_access_keyed_element", args)?;
        Self::set_access_keyed_element_in(host, slot, node)?;
        Ok(Value::Null)
    }

    fn call_format_title(
        host: &mut Element,
        slot: usize,
        args: &[Value],
    ) -> Result<Value, MixinError> {
        let title = text_arg("format_title_with_access_key", args)?.unwrap_or_default();
        Ok(host.slot::<Self>(slot)?.format_title(&title).into())
    }
}

impl CapabilityType for AccessKeyed {
    const KIND: &'static str = "AccessKeyed";
    const TARGET_PROPERTY: Option<&'static str> = Some("accessKeyed");
    const METHODS: &'static [Method] = &[
        Method::new("set_access_key", Self::call_set_access_key),
        Method::new("get_access_key", Self::call_get_access_key),
        Method::new("set_access_keyed_element", Self::call_set_access_keyed_element),
        Method::new("format_title_with_access_key", Self::call_format_title),
    ];

    fn target(&self) -> Option<NodeId> {
        self.access_keyed
    }
}
