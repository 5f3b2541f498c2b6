//! Two-phase nested scroll negotiation.
//!
//! Parties are ordered outer parent, this component, inner child. Before the
//! component consumes a delta the outer parent may claim part of it
//! (pre-phase); whatever the component leaves is offered to the inner child
//! and then the parent (post-phase). Flings follow the same shape over
//! velocity, once per release.

mod connection;
mod dispatcher;
mod source;

pub use connection::{NestedScrollConnection, NestedScrollNode, NoOpConnection};
pub use dispatcher::NestedScrollDispatcher;
pub use source::{NestedScrollSource, ScrollEvent};

use crate::coerce::ScrollVector;

/// Coerces a collaborator reply to what was offered, warning when it
/// claimed something it was not given.
pub(crate) fn legalize<T: ScrollVector>(reply: T, offered: T, phase: &str) -> T {
    let legal = reply.coerce_to_available(offered);
    if legal != reply {
        log::warn!(
            "{} reply {:?} exceeds offer {:?}; using {:?}",
            phase,
            reply,
            offered,
            legal
        );
    }
    legal
}
