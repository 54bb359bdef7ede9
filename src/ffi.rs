//! C ABI entry point for NativeActivity applications.
//!
//! Exports `showAdPopup` with the signature classic platform glue links
//! against: `void showAdPopup(ANativeActivity *activity)`. The export
//! keeps the void contract of that interface: every failure is logged,
//! none crosses the C boundary, the process is never aborted from here.

#[cfg(target_os = "android")]
mod android {
    use tracing::{error, warn};

    use crate::bridge::{ActivityHandle, JniBridge};
    use crate::popup::show_ad_popup;

    fn init_logging() {
        android_logger::init_once(
            android_logger::Config::default()
                .with_tag("AdPopup")
                .with_max_level(log::LevelFilter::Debug),
        );
    }

    /// Trigger the ad popup on the activity's managed side.
    ///
    /// # Safety
    ///
    /// `activity` must be null or point to a live `ANativeActivity`.
    #[allow(non_snake_case)]
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn showAdPopup(activity: *mut ndk_sys::ANativeActivity) {
        init_logging();

        if activity.is_null() {
            warn!("showAdPopup called with a null activity");
            return;
        }

        let handle = unsafe { ActivityHandle::from_native_activity(activity) };

        // Unwind barrier: a panic must not cross into the C caller.
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            match JniBridge::new(&handle) {
                Ok(bridge) => show_ad_popup(bridge),
                Err(e) => error!("could not wrap the activity's JVM: {:#}", e),
            }
        }));

        if result.is_err() {
            error!("panic while showing the ad popup");
        }
    }
}
