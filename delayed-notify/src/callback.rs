//! Callback bindings.
//!
//! A [`CallbackBinding`] fixes the callback and its argument at registration
//! time, so the drain loop never needs to know what a pending item represents.

use std::fmt;
use std::sync::Arc;

/// Callback invoked with the bound data when a binding is drained.
pub type NotificationCallback<D> = Arc<dyn Fn(D) + Send + Sync>;

/// Identity of a shared handle, used for diagnostics only.
///
/// Two clones of the same `Arc` report the same identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(usize);

impl HandleId {
    /// Identity of the allocation behind `arc`.
    pub fn of<T: ?Sized>(arc: &Arc<T>) -> Self {
        Self(Arc::as_ptr(arc) as *const () as usize)
    }

    /// The identity as an integer.
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A shared-ownership payload that can travel through the queue.
///
/// Implemented for every `Arc<T>` whose target is thread-safe, which covers
/// `Arc<NotificationRecord<R>>` as well as arbitrary caller payloads.
pub trait SharedHandle: Clone + Send + Sync + 'static {
    /// Identity reported to the diagnostics sink.
    fn handle_id(&self) -> HandleId;
}

impl<T: ?Sized + Send + Sync + 'static> SharedHandle for Arc<T> {
    fn handle_id(&self) -> HandleId {
        HandleId::of(self)
    }
}

/// A callback paired with the data it will be invoked with.
///
/// A binding without a callback is legal and drains as a no-op.
pub struct CallbackBinding<D> {
    callback: Option<NotificationCallback<D>>,
    data: D,
}

impl<D: SharedHandle> CallbackBinding<D> {
    /// Bind `callback` to `data`.
    pub fn new(callback: Option<NotificationCallback<D>>, data: D) -> Self {
        Self { callback, data }
    }

    /// The bound `(callback, data)` pair. Pure; may be called repeatedly.
    pub fn get(&self) -> (Option<NotificationCallback<D>>, D) {
        (self.callback.clone(), self.data.clone())
    }

    /// Identity of the callback, `None` for a no-op binding.
    pub fn callback_id(&self) -> Option<HandleId> {
        self.callback.as_ref().map(HandleId::of)
    }

    /// Identity of the bound data.
    pub fn data_id(&self) -> HandleId {
        self.data.handle_id()
    }

    /// Consume the binding, handing out its parts without cloning.
    pub(crate) fn into_parts(self) -> (Option<NotificationCallback<D>>, D) {
        (self.callback, self.data)
    }
}

impl<D: SharedHandle> fmt::Debug for CallbackBinding<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackBinding")
            .field("callback", &self.callback_id())
            .field("data", &self.data_id())
            .finish()
    }
}
