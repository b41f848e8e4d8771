//! Built-in capabilities: titled, access key, indicator, label, pending.
//!
//! Each capability exposes a constructor-style `mixin(host, config)` that
//! attaches it to an [`Element`](crate::mixin::Element) and runs its
//! initialisation against that host. Afterwards its behaviour is reached
//! through the host's dispatch (`invoke`) or by typed lookup.

pub mod access_key;
pub mod indicator;
pub mod label;
pub mod pending;
pub mod titled;

pub use access_key::{AccessKeyConfig, AccessKeyed};
pub use indicator::{Indicator, IndicatorConfig};
pub use label::{LabelConfig, Labelled};
pub use pending::Pending;
pub use titled::{Titled, TitledConfig};

use crate::dom::NodeId;
use crate::mixin::{MixinError, Value};

/// First argument as optional text: `Str` is text, `Null` or missing is none.
pub(crate) fn text_arg(method: &'static str, args: &[Value]) -> Result<Option<String>, MixinError> {
    match args.first() {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Str(s)) => Ok(Some(s.clone())),
        Some(other) => Err(MixinError::InvalidArgument {
            method,
            reason: format!("expected text or null, got {other:?}"),
        }),
    }
}

/// First argument as a node id.
pub(crate) fn node_arg(method: &'static str, args: &[Value]) -> Result<NodeId, MixinError> {
    args.first()
        .and_then(Value::as_node)
        .ok_or_else(|| MixinError::InvalidArgument {
            method,
            reason: "expected a node".to_owned(),
        })
}
