use std::cell::RefCell;
use std::rc::Rc;
use std::rc::Weak;

use folio_core::actions::Key;
use folio_core::actions::SiteAction;
use tracing::trace;

pub type KeyHandler = Box<dyn Fn(&Key) -> Option<SiteAction>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, KeyHandler)>,
}

/// Global key-event listeners, like a document-level `keydown` target.
#[derive(Clone, Default)]
pub struct KeyListenerRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for KeyListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyListenerRegistry")
            .field("active", &self.active())
            .finish()
    }
}

impl KeyListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` until the returned guard is dropped.
    pub fn attach(&self, handler: KeyHandler) -> ListenerGuard {
        let mut registry = self.inner.borrow_mut();
        registry.next_id = registry.next_id.saturating_add(1);
        let id = ListenerId(registry.next_id);
        registry.listeners.push((id, handler));
        trace!(id = id.0, active = registry.listeners.len(), "key listener attached");
        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    pub fn active(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Runs every listener and returns the actions they produced. Handlers
    /// must not touch the registry.
    pub fn dispatch(&self, key: &Key) -> Vec<SiteAction> {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter_map(|(_, handler)| handler(key))
            .collect()
    }
}

/// Detaches its listener on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        registry.listeners.retain(|(id, _)| *id != self.id);
        trace!(id = self.id.0, active = registry.listeners.len(), "key listener detached");
    }
}
