//! Managed-runtime bridge abstraction.
//!
//! The popup trigger does not reach for ambient platform state; it is
//! handed a capability object implementing [`VmBridge`]. On Android the
//! implementation in [`android`] wraps the activity's JVM via JNI; tests
//! drive the trigger with an in-memory mock instead.

use anyhow::Result;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(target_os = "android")]
pub use android::{ActivityHandle, JniBridge};

/// Capability to attach the calling thread to a managed runtime.
///
/// Attachment is per-thread and per-call: every [`attach`](VmBridge::attach)
/// yields an independent session, and dropping the session detaches the
/// thread again. Nothing carries over between calls.
pub trait VmBridge {
    /// An attached session. Dropping it detaches the calling thread.
    type Attached<'a>: AttachedVm
    where
        Self: 'a;

    /// Attach the calling thread to the managed runtime, registering the
    /// thread with it if it is not attached already.
    ///
    /// An error means the runtime refused the attachment.
    fn attach(&self) -> Result<Self::Attached<'_>>;
}

/// A thread currently attached to the managed runtime.
pub trait AttachedVm {
    /// Resolve a no-argument `void` method on the managed activity object
    /// and invoke it synchronously on the calling thread.
    ///
    /// Resolution failures and exceptions thrown by the managed side are
    /// reported as errors.
    fn call_void_method(&mut self, name: &str) -> Result<()>;
}
