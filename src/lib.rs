//! Native-side ad popup trigger for Android activities.
//!
//! NativeActivity-based games render from native code, but advertisements
//! live on the managed side of the app. This crate bridges that gap: it
//! attaches the calling thread to the JVM, invokes the activity's
//! `showAdPopup()` method, and detaches the thread again before returning.
//!
//! The JVM is reached through the [`bridge::VmBridge`] capability object
//! rather than ambient platform state, so the trigger logic runs against
//! an in-memory mock off device. On Android, [`ffi`] exports the classic
//! `void showAdPopup(ANativeActivity*)` C entry point for existing
//! platform glue.

pub mod bridge;
mod ffi;
pub mod popup;

pub use bridge::{AttachedVm, VmBridge};
pub use popup::{AdPopup, SHOW_AD_POPUP_METHOD, show_ad_popup};

#[cfg(target_os = "android")]
pub use bridge::{ActivityHandle, JniBridge};
