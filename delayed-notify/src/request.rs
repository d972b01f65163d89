//! Notification records: what a deferred callback needs to know about a request.
//!
//! A [`NotificationRecord`] is created when a communication operation is
//! issued but its completion cannot be resolved synchronously. It is usually
//! wrapped in an `Arc` and handed to the queue as the callback data, so the
//! originating operation and the queue share it until the last holder drops.

use std::fmt;
use std::sync::Arc;

/// Opaque handle of the communication context (worker) owning a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerHandle(u64);

impl WorkerHandle {
    /// Wrap a raw worker identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker:{:x}", self.0)
    }
}

/// Opaque handle of the endpoint a request travels through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointHandle(u64);

impl EndpointHandle {
    /// Wrap a raw endpoint identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EndpointHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ep:{:x}", self.0)
    }
}

/// Opaque tag used for message matching.
///
/// `Tag::UNTAGGED` (zero) is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(u64);

impl Tag {
    /// The "no tag" value.
    pub const UNTAGGED: Tag = Tag(0);

    /// Wrap a raw tag value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw tag value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether a non-default tag was supplied.
    pub const fn is_tagged(self) -> bool {
        self.0 != 0
    }
}

impl From<u64> for Tag {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Address of a buffer owned by someone else.
///
/// The record never dereferences it. Keeping the memory alive until the
/// bound callback has run is the request owner's job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BufferAddress(usize);

impl BufferAddress {
    /// A null address, for operations without a user buffer.
    pub const NULL: BufferAddress = BufferAddress(0);

    /// Address of the first byte of `buffer`.
    pub fn of(buffer: &[u8]) -> Self {
        Self(buffer.as_ptr() as usize)
    }

    /// Address from a raw pointer.
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }

    /// The address as an integer.
    pub const fn addr(self) -> usize {
        self.0
    }

    /// Whether this is the null address.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for BufferAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Direction of a communication operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Outgoing transfer.
    Send,
    /// Incoming transfer.
    Receive,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Send => f.write_str("send"),
            Direction::Receive => f.write_str("recv"),
        }
    }
}

/// Immutable snapshot of one pending notification.
///
/// `R` is the transport's request type; the record holds a shared reference
/// to exactly one request. All fields are read-only after construction.
pub struct NotificationRecord<R> {
    worker: WorkerHandle,
    endpoint: EndpointHandle,
    request: Arc<R>,
    is_send: bool,
    buffer: BufferAddress,
    length: usize,
    tag: Tag,
}

impl<R> NotificationRecord<R> {
    /// Create an untagged record.
    pub fn new(
        worker: WorkerHandle,
        endpoint: EndpointHandle,
        request: Arc<R>,
        is_send: bool,
        buffer: BufferAddress,
        length: usize,
    ) -> Self {
        Self {
            worker,
            endpoint,
            request,
            is_send,
            buffer,
            length,
            tag: Tag::UNTAGGED,
        }
    }

    /// Set the match tag. Only usable before the record is shared.
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Owning worker.
    pub fn worker(&self) -> WorkerHandle {
        self.worker
    }

    /// Endpoint of the operation.
    pub fn endpoint(&self) -> EndpointHandle {
        self.endpoint
    }

    /// The in-flight request this record describes.
    pub fn request(&self) -> &Arc<R> {
        &self.request
    }

    /// `true` for sends, `false` for receives.
    pub fn is_send(&self) -> bool {
        self.is_send
    }

    /// Direction derived from [`is_send`](Self::is_send).
    pub fn direction(&self) -> Direction {
        if self.is_send {
            Direction::Send
        } else {
            Direction::Receive
        }
    }

    /// Borrowed buffer address.
    pub fn buffer(&self) -> BufferAddress {
        self.buffer
    }

    /// Buffer length in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Match tag, [`Tag::UNTAGGED`] when none was given.
    pub fn tag(&self) -> Tag {
        self.tag
    }
}

impl<R> fmt::Debug for NotificationRecord<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationRecord")
            .field("worker", &self.worker)
            .field("endpoint", &self.endpoint)
            .field("request", &Arc::as_ptr(&self.request))
            .field("direction", &self.direction())
            .field("buffer", &format_args!("{}", self.buffer))
            .field("length", &self.length)
            .field("tag", &self.tag.raw())
            .finish()
    }
}
