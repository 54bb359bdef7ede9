//! The ad popup trigger.
//!
//! One linear sequence per call: attach the calling thread to the managed
//! runtime, invoke `showAdPopup()` on the activity object, detach. A
//! runtime that refuses the attachment skips the popup without failing
//! the caller; a missing method or a throwing managed implementation is a
//! checked error instead of a runtime fault.

use anyhow::{Context, Result};
use tracing::{debug, error};

use crate::bridge::{AttachedVm, VmBridge};

/// Name of the no-argument `void` method the activity class is expected
/// to expose.
pub const SHOW_AD_POPUP_METHOD: &str = "showAdPopup";

/// Triggers the advertisement popup on the managed side of the app.
///
/// The bridge is injected rather than picked up from ambient platform
/// state, so the same trigger runs against the real JVM on device and
/// against an in-memory mock in tests.
pub struct AdPopup<B> {
    bridge: B,
}

impl<B: VmBridge> AdPopup<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    /// Attach the calling thread, invoke `showAdPopup()` on the activity
    /// object, and detach before returning.
    ///
    /// A runtime that refuses the attachment is a no-op: the popup is
    /// skipped and `Ok(())` is returned. Method resolution and invocation
    /// failures are returned to the caller.
    pub fn show(&self) -> Result<()> {
        let mut vm = match self.bridge.attach() {
            Ok(vm) => vm,
            Err(e) => {
                debug!("runtime refused thread attachment, skipping ad popup: {:#}", e);
                return Ok(());
            }
        };

        // `vm` detaches the thread on drop, whether or not the invocation
        // succeeded.
        vm.call_void_method(SHOW_AD_POPUP_METHOD)
            .context("ad popup invocation failed")
    }
}

/// Fire-and-forget form of [`AdPopup::show`], matching the original
/// platform contract: nothing is surfaced to the caller, failures are
/// logged.
pub fn show_ad_popup<B: VmBridge>(bridge: B) {
    if let Err(e) = AdPopup::new(bridge).show() {
        error!("{:#}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
    enum Event {
        Attached,
        Called(String),
        Detached,
    }

    #[derive(Clone, Default)]
    struct MockVm {
        events: Rc<RefCell<Vec<Event>>>,
        refuse_attach: bool,
        missing_method: bool,
    }

    impl MockVm {
        fn refusing_attach() -> Self {
            Self {
                refuse_attach: true,
                ..Default::default()
            }
        }

        fn without_method() -> Self {
            Self {
                missing_method: true,
                ..Default::default()
            }
        }

        fn call_count(&self) -> usize {
            self.events
                .borrow()
                .iter()
                .filter(|e| matches!(e, Event::Called(_)))
                .count()
        }

        fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }
    }

    struct MockSession {
        vm: MockVm,
    }

    impl VmBridge for MockVm {
        type Attached<'a>
            = MockSession
        where
            Self: 'a;

        fn attach(&self) -> Result<MockSession> {
            if self.refuse_attach {
                anyhow::bail!("attachment refused");
            }
            self.events.borrow_mut().push(Event::Attached);
            Ok(MockSession { vm: self.clone() })
        }
    }

    impl AttachedVm for MockSession {
        fn call_void_method(&mut self, name: &str) -> Result<()> {
            if self.vm.missing_method {
                anyhow::bail!("no method {name}()V on the activity class");
            }
            self.vm
                .events
                .borrow_mut()
                .push(Event::Called(name.to_string()));
            Ok(())
        }
    }

    impl Drop for MockSession {
        fn drop(&mut self) {
            self.vm.events.borrow_mut().push(Event::Detached);
        }
    }

    #[test]
    fn show_invokes_method_once_and_detaches() {
        let vm = MockVm::default();
        let popup = AdPopup::new(vm.clone());

        popup.show().unwrap();

        assert_eq!(vm.call_count(), 1);
        assert_eq!(
            vm.events(),
            vec![
                Event::Attached,
                Event::Called(SHOW_AD_POPUP_METHOD.to_string()),
                Event::Detached,
            ]
        );
    }

    #[test]
    fn repeated_shows_are_independent_cycles() {
        let vm = MockVm::default();
        let popup = AdPopup::new(vm.clone());

        popup.show().unwrap();
        popup.show().unwrap();

        // Two full attach/call/detach cycles, no attachment carried over.
        assert_eq!(
            vm.events(),
            vec![
                Event::Attached,
                Event::Called(SHOW_AD_POPUP_METHOD.to_string()),
                Event::Detached,
                Event::Attached,
                Event::Called(SHOW_AD_POPUP_METHOD.to_string()),
                Event::Detached,
            ]
        );
    }

    #[test]
    fn three_shows_three_invocations() {
        let vm = MockVm::default();
        let popup = AdPopup::new(vm.clone());

        for _ in 0..3 {
            popup.show().unwrap();
        }

        assert_eq!(vm.call_count(), 3);
    }

    #[test]
    fn refused_attachment_is_a_silent_noop() {
        let vm = MockVm::refusing_attach();
        let popup = AdPopup::new(vm.clone());

        for _ in 0..5 {
            popup.show().unwrap();
        }

        assert_eq!(vm.call_count(), 0);
        assert!(vm.events().is_empty());
    }

    #[test]
    fn missing_method_is_a_checked_error() {
        let vm = MockVm::without_method();
        let popup = AdPopup::new(vm.clone());

        let err = popup.show().unwrap_err();
        assert!(err.to_string().contains("ad popup invocation failed"));

        // The thread still detached after the failed invocation.
        assert_eq!(vm.events(), vec![Event::Attached, Event::Detached]);
    }

    #[test]
    fn fire_and_forget_swallows_failures() {
        let vm = MockVm::without_method();

        show_ad_popup(vm.clone());

        assert_eq!(vm.call_count(), 0);
        assert_eq!(vm.events(), vec![Event::Attached, Event::Detached]);
    }
}
