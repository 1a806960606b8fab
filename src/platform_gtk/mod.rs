use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk::glib;
use gtk::prelude::*;
use indexmap::IndexMap;
use tracing::trace;

use crate::error::ChartResult;
use crate::platform::{ChangeListener, FullscreenEventName, FullscreenPlatform, ListenerId};

type ListenerTable = IndexMap<ListenerId, (FullscreenEventName, ChangeListener)>;

/// [`FullscreenPlatform`] backed by a GTK4 toplevel window.
///
/// GTK reports fullscreen through the `fullscreened` property, so every
/// registered listener sees each notification regardless of its event name.
pub struct GtkFullscreenPlatform {
    window: gtk::Window,
    listeners: Rc<RefCell<ListenerTable>>,
    next_listener_id: u64,
    notify_handler: Option<glib::SignalHandlerId>,
}

impl GtkFullscreenPlatform {
    #[must_use]
    pub fn new(window: gtk::Window) -> Self {
        let listeners: Rc<RefCell<ListenerTable>> = Rc::new(RefCell::new(IndexMap::new()));
        let table = Rc::clone(&listeners);
        let notify_handler = window.connect_fullscreened_notify(move |window| {
            let is_fullscreen = window.is_fullscreen();
            let targets: Vec<ChangeListener> = table
                .borrow()
                .values()
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            trace!(is_fullscreen, listeners = targets.len(), "gtk fullscreened notify");
            for listener in targets {
                listener(is_fullscreen);
            }
        });
        Self {
            window,
            listeners,
            next_listener_id: 0,
            notify_handler: Some(notify_handler),
        }
    }

    #[must_use]
    pub fn window(&self) -> &gtk::Window {
        &self.window
    }
}

impl FullscreenPlatform for GtkFullscreenPlatform {
    fn request_fullscreen(&mut self) -> ChartResult<()> {
        self.window.fullscreen();
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> ChartResult<()> {
        self.window.unfullscreen();
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.window.is_fullscreen()
    }

    fn add_change_listener(
        &mut self,
        event: FullscreenEventName,
        listener: ChangeListener,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.borrow_mut().insert(id, (event, listener));
        id
    }

    fn remove_change_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().shift_remove(&id).is_some()
    }
}

impl Drop for GtkFullscreenPlatform {
    fn drop(&mut self) {
        if let Some(handler) = self.notify_handler.take() {
            self.window.disconnect(handler);
        }
    }
}
