//! JNI-backed bridge over the activity's JVM.
//!
//! The platform hands native code an `ANativeActivity` carrying the JVM
//! pointer and the managed activity object. [`ActivityHandle`] borrows
//! those two pointers, [`JniBridge`] wraps them for the trigger, and
//! [`JniAttached`] is the per-call attachment whose guard detaches the
//! thread when dropped.

use std::ffi::c_void;

use anyhow::{Context, Result};
use jni::errors::Error as JniError;
use jni::objects::JObject;
use jni::sys::jobject;
use jni::{AttachGuard, JavaVM};

use super::{AttachedVm, VmBridge};

/// Borrowed reference to the running platform activity.
///
/// The handle owns neither pointer; it is only valid for the duration of
/// the call it was created for and must not be stored.
#[derive(Clone, Copy)]
pub struct ActivityHandle {
    vm: *mut jni::sys::JavaVM,
    activity: jobject,
}

impl ActivityHandle {
    /// Borrow the JVM and activity object carried by an `ANativeActivity`.
    ///
    /// # Safety
    ///
    /// `activity` must point to a live `ANativeActivity` whose `vm` and
    /// `clazz` fields stay valid while the handle is in use.
    pub unsafe fn from_native_activity(activity: *mut ndk_sys::ANativeActivity) -> Self {
        let raw = unsafe { &*activity };
        Self {
            vm: raw.vm.cast(),
            activity: raw.clazz.cast(),
        }
    }

    /// Build a handle from raw JVM and activity-object pointers, e.g. the
    /// ones published through `ndk-context`.
    ///
    /// # Safety
    ///
    /// `vm` must point to a live `JavaVM` and `activity` must be a valid
    /// JNI reference to the activity object, both outliving the handle.
    pub unsafe fn from_raw(vm: *mut c_void, activity: *mut c_void) -> Self {
        Self {
            vm: vm.cast(),
            activity: activity.cast(),
        }
    }
}

/// [`VmBridge`] implementation over the real JVM.
pub struct JniBridge {
    vm: JavaVM,
    activity: jobject,
}

impl JniBridge {
    /// Wrap the JVM referenced by `handle`.
    pub fn new(handle: &ActivityHandle) -> Result<Self> {
        let vm = unsafe { JavaVM::from_raw(handle.vm) }.context("invalid JavaVM pointer")?;
        Ok(Self {
            vm,
            activity: handle.activity,
        })
    }

    /// Build a bridge from the ambient context published by the standard
    /// Rust android glue. Requires the glue to have initialized
    /// `ndk-context` beforehand.
    pub fn from_ndk_context() -> Result<Self> {
        let ctx = ndk_context::android_context();
        let handle = unsafe { ActivityHandle::from_raw(ctx.vm(), ctx.context()) };
        Self::new(&handle)
    }
}

impl VmBridge for JniBridge {
    type Attached<'a>
        = JniAttached<'a>
    where
        Self: 'a;

    fn attach(&self) -> Result<Self::Attached<'_>> {
        let guard = self
            .vm
            .attach_current_thread()
            .context("JVM refused to attach the current thread")?;
        Ok(JniAttached {
            guard,
            activity: self.activity,
        })
    }
}

/// A JNI attachment scoped to one trigger call.
pub struct JniAttached<'a> {
    guard: AttachGuard<'a>,
    activity: jobject,
}

impl AttachedVm for JniAttached<'_> {
    fn call_void_method(&mut self, name: &str) -> Result<()> {
        let activity = unsafe { JObject::from_raw(self.activity) };
        let result = self.guard.call_method(&activity, name, "()V", &[]);

        // A thrown exception stays pending on the thread; surface it to
        // logcat and clear it so the thread can detach cleanly.
        if let Err(JniError::JavaException) = &result {
            let _ = self.guard.exception_describe();
            let _ = self.guard.exception_clear();
        }

        result.with_context(|| format!("invoking {name}()V on the activity failed"))?;
        Ok(())
    }
}
