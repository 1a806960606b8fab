//! Platform fullscreen bindings.
//!
//! A platform reports fullscreen changes under one of four event names (the
//! unprefixed name and the webkit/moz/MS vendor variants). The panel core never
//! sees those names; `api::FullscreenController` collapses them into a single
//! boolean change signal.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};

/// Platform event identifiers that announce a fullscreen change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FullscreenEventName {
    Standard,
    Webkit,
    Moz,
    Ms,
}

impl FullscreenEventName {
    pub const ALL: [FullscreenEventName; 4] = [
        FullscreenEventName::Standard,
        FullscreenEventName::Webkit,
        FullscreenEventName::Moz,
        FullscreenEventName::Ms,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FullscreenEventName::Standard => "fullscreenchange",
            FullscreenEventName::Webkit => "webkitfullscreenchange",
            FullscreenEventName::Moz => "mozfullscreenchange",
            FullscreenEventName::Ms => "MSFullscreenChange",
        }
    }
}

impl fmt::Display for FullscreenEventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FullscreenEventName {
    type Err = ChartError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        FullscreenEventName::ALL
            .into_iter()
            .find(|name| name.as_str() == input)
            .ok_or_else(|| {
                ChartError::InvalidInput(format!("unknown fullscreen event `{input}`"))
            })
    }
}

/// Handle returned by [`FullscreenPlatform::add_change_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Callback receiving the platform's fullscreen status after a change event.
pub type ChangeListener = Rc<dyn Fn(bool)>;

/// Fullscreen capabilities of the surface hosting the chart container.
pub trait FullscreenPlatform {
    /// Asks the platform to present the chart container fullscreen. Success
    /// only means the request was accepted; the status change arrives as an
    /// event.
    fn request_fullscreen(&mut self) -> ChartResult<()>;
    fn exit_fullscreen(&mut self) -> ChartResult<()>;
    fn is_fullscreen(&self) -> bool;
    fn add_change_listener(
        &mut self,
        event: FullscreenEventName,
        listener: ChangeListener,
    ) -> ListenerId;
    /// Returns `false` when the id was not registered.
    fn remove_change_listener(&mut self, id: ListenerId) -> bool;
}

/// In-memory platform for headless hosts and tests.
///
/// Change events are queued and delivered by [`Self::dispatch_pending`], the
/// way a browser delivers them on a later event-loop turn.
pub struct HeadlessFullscreenPlatform {
    fullscreen: bool,
    deny_requests: bool,
    /// Event names emitted for one internally requested transition.
    emitted_events: Vec<FullscreenEventName>,
    listeners: IndexMap<ListenerId, (FullscreenEventName, ChangeListener)>,
    next_listener_id: u64,
    pending: VecDeque<FullscreenEventName>,
}

impl Default for HeadlessFullscreenPlatform {
    fn default() -> Self {
        Self {
            fullscreen: false,
            deny_requests: false,
            emitted_events: vec![FullscreenEventName::Standard],
            listeners: IndexMap::new(),
            next_listener_id: 0,
            pending: VecDeque::new(),
        }
    }
}

impl fmt::Debug for HeadlessFullscreenPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessFullscreenPlatform")
            .field("fullscreen", &self.fullscreen)
            .field("deny_requests", &self.deny_requests)
            .field("listeners", &self.listeners.len())
            .field("pending", &self.pending)
            .finish()
    }
}

impl HeadlessFullscreenPlatform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects subsequent `request_fullscreen` calls, as a platform does
    /// without a user gesture or permission.
    pub fn set_deny_requests(&mut self, deny: bool) {
        self.deny_requests = deny;
    }

    /// Event names queued per transition, e.g. both `Standard` and `Webkit`
    /// for engines that fire prefixed and unprefixed events.
    pub fn set_emitted_events(&mut self, events: Vec<FullscreenEventName>) {
        self.emitted_events = events;
    }

    /// User-driven exit (Escape key, window switch) reported under `event`.
    pub fn simulate_external_exit(&mut self, event: FullscreenEventName) {
        self.fullscreen = false;
        self.pending.push_back(event);
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Delivers queued events to the listeners registered under each name.
    /// Returns the number of listener invocations.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.pending.pop_front() {
            let targets: Vec<ChangeListener> = self
                .listeners
                .values()
                .filter(|(name, _)| *name == event)
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            trace!(%event, listeners = targets.len(), fullscreen = self.fullscreen, "dispatch fullscreen event");
            for listener in targets {
                listener(self.fullscreen);
                delivered += 1;
            }
        }
        delivered
    }

    fn queue_transition(&mut self) {
        self.pending.extend(self.emitted_events.iter().copied());
    }
}

impl FullscreenPlatform for HeadlessFullscreenPlatform {
    fn request_fullscreen(&mut self) -> ChartResult<()> {
        if self.deny_requests {
            return Err(ChartError::FullscreenRequestFailure(
                "fullscreen request denied by platform".to_owned(),
            ));
        }
        if !self.fullscreen {
            self.fullscreen = true;
            self.queue_transition();
        }
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> ChartResult<()> {
        if !self.fullscreen {
            return Err(ChartError::FullscreenRequestFailure(
                "document is not in fullscreen mode".to_owned(),
            ));
        }
        self.fullscreen = false;
        self.queue_transition();
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn add_change_listener(
        &mut self,
        event: FullscreenEventName,
        listener: ChangeListener,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.insert(id, (event, listener));
        id
    }

    fn remove_change_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{FullscreenEventName, FullscreenPlatform, HeadlessFullscreenPlatform};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn event_names_round_trip_through_platform_strings() {
        for name in FullscreenEventName::ALL {
            assert_eq!(name.as_str().parse::<FullscreenEventName>().expect("parse"), name);
        }
        assert_eq!(FullscreenEventName::Ms.as_str(), "MSFullscreenChange");
        assert!("fullscreenerror".parse::<FullscreenEventName>().is_err());
    }

    #[test]
    fn events_only_reach_listeners_of_the_same_name() {
        let mut platform = HeadlessFullscreenPlatform::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        platform.add_change_listener(
            FullscreenEventName::Moz,
            Rc::new(move |is_fullscreen| sink.borrow_mut().push(is_fullscreen)),
        );

        platform.request_fullscreen().expect("accepted");
        assert_eq!(platform.dispatch_pending(), 0);

        platform.simulate_external_exit(FullscreenEventName::Moz);
        assert_eq!(platform.dispatch_pending(), 1);
        assert_eq!(*seen.borrow(), vec![false]);
    }

    #[test]
    fn removed_listeners_are_not_called() {
        let mut platform = HeadlessFullscreenPlatform::new();
        let id = platform.add_change_listener(FullscreenEventName::Standard, Rc::new(|_| {}));
        assert_eq!(platform.listener_count(), 1);
        assert!(platform.remove_change_listener(id));
        assert!(!platform.remove_change_listener(id));
        assert_eq!(platform.listener_count(), 0);
    }
}
