use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::error::{ChartError, ChartResult};
use crate::platform::{FullscreenEventName, FullscreenPlatform, ListenerId};

/// Handle returned by [`FullscreenController::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(bool)>;

#[derive(Default)]
struct ControllerShared {
    is_fullscreen: bool,
    subscribers: IndexMap<SubscriptionId, Subscriber>,
    next_subscription: u64,
    notifications: u64,
}

impl ControllerShared {
    fn observe(&mut self, is_fullscreen: bool, event: FullscreenEventName) {
        if self.is_fullscreen == is_fullscreen {
            trace!(%event, is_fullscreen, "fullscreen event without status change");
            return;
        }
        self.is_fullscreen = is_fullscreen;
        self.notifications += 1;
        debug!(%event, is_fullscreen, "fullscreen status changed");
        for subscriber in self.subscribers.values_mut() {
            subscriber(is_fullscreen);
        }
    }
}

/// Normalizes platform fullscreen events into one `on_change(bool)` signal.
///
/// The tracked status is written only from platform events, never from
/// `enter`/`exit` directly. Listeners registered by [`Self::attach`] are removed
/// by [`Self::detach`] and always on drop.
pub struct FullscreenController<P: FullscreenPlatform> {
    platform: P,
    shared: Rc<RefCell<ControllerShared>>,
    listener_ids: Vec<ListenerId>,
}

impl<P: FullscreenPlatform> fmt::Debug for FullscreenController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("FullscreenController")
            .field("is_fullscreen", &shared.is_fullscreen)
            .field("subscribers", &shared.subscribers.len())
            .field("listeners", &self.listener_ids.len())
            .finish()
    }
}

impl<P: FullscreenPlatform> FullscreenController<P> {
    #[must_use]
    pub fn new(platform: P) -> Self {
        let shared = ControllerShared {
            is_fullscreen: platform.is_fullscreen(),
            ..ControllerShared::default()
        };
        Self {
            platform,
            shared: Rc::new(RefCell::new(shared)),
            listener_ids: Vec::new(),
        }
    }

    /// Registers one handler under every platform event name. Idempotent.
    pub fn attach(&mut self) {
        if self.is_attached() {
            return;
        }
        self.shared.borrow_mut().is_fullscreen = self.platform.is_fullscreen();
        for event in FullscreenEventName::ALL {
            let shared = Rc::clone(&self.shared);
            let id = self.platform.add_change_listener(
                event,
                Rc::new(move |is_fullscreen| shared.borrow_mut().observe(is_fullscreen, event)),
            );
            self.listener_ids.push(id);
        }
        debug!(listeners = self.listener_ids.len(), "fullscreen listeners attached");
    }

    pub fn detach(&mut self) {
        if self.listener_ids.is_empty() {
            return;
        }
        for id in self.listener_ids.drain(..) {
            if !self.platform.remove_change_listener(id) {
                warn!(?id, "fullscreen listener was already removed by the platform");
            }
        }
        debug!("fullscreen listeners detached");
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.listener_ids.is_empty()
    }

    /// Last status confirmed by a platform event.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.shared.borrow().is_fullscreen
    }

    /// Number of `on_change` notifications delivered so far.
    #[must_use]
    pub fn notification_count(&self) -> u64 {
        self.shared.borrow().notifications
    }

    pub fn on_change(&mut self, subscriber: impl FnMut(bool) + 'static) -> SubscriptionId {
        let mut shared = self.shared.borrow_mut();
        let id = SubscriptionId(shared.next_subscription);
        shared.next_subscription += 1;
        shared.subscribers.insert(id, Box::new(subscriber));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.shared.borrow_mut().subscribers.shift_remove(&id).is_some()
    }

    /// Requests fullscreen; a no-op when already fullscreen.
    pub fn enter(&mut self) -> ChartResult<()> {
        if self.is_fullscreen() {
            trace!("enter fullscreen ignored: already fullscreen");
            return Ok(());
        }
        self.platform.request_fullscreen().map_err(|err| {
            let err = into_request_failure(err);
            warn!(error = %err, "fullscreen request rejected");
            err
        })
    }

    /// Requests fullscreen exit; a no-op when not fullscreen.
    pub fn exit(&mut self) -> ChartResult<()> {
        if !self.is_fullscreen() {
            trace!("exit fullscreen ignored: not fullscreen");
            return Ok(());
        }
        self.platform.exit_fullscreen().map_err(|err| {
            let err = into_request_failure(err);
            warn!(error = %err, "fullscreen exit rejected");
            err
        })
    }

    pub fn toggle(&mut self) -> ChartResult<()> {
        if self.is_fullscreen() {
            self.exit()
        } else {
            self.enter()
        }
    }

    #[must_use]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}

impl<P: FullscreenPlatform> Drop for FullscreenController<P> {
    fn drop(&mut self) {
        self.detach();
    }
}

fn into_request_failure(err: ChartError) -> ChartError {
    match err {
        ChartError::FullscreenRequestFailure(_) => err,
        other => ChartError::FullscreenRequestFailure(other.to_string()),
    }
}
