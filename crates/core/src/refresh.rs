use crate::module::{Module, Registry};
use crate::text::BoundedText;
use std::panic::{self, AssertUnwindSafe};
use tracing::{trace, warn};

/// Query every producer in registry order and store its (bounded) output.
///
/// Producers run sequentially on the calling thread. A panicking producer is
/// contained at the module boundary: its module shows the producer's fallback
/// text and the remaining modules still refresh.
pub fn refresh_all(registry: &mut Registry) {
    for module in registry.modules_mut() {
        refresh_one(module);
    }
}

fn refresh_one(module: &mut Module) {
    let produced = panic::catch_unwind(AssertUnwindSafe(|| module.producer_mut().produce()));

    let text: BoundedText = match produced {
        Ok(text) => BoundedText::from_string(text),
        Err(payload) => {
            warn!(
                "module '{}' panicked: {}; showing fallback",
                module.name(),
                panic_message(payload.as_ref())
            );
            BoundedText::new(module.fallback())
        }
    };

    trace!(module = module.name(), text = text.as_str(), "refreshed");
    module.store(text);
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "<non-string panic>"
    }
}
