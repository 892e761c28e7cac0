//! Transition Sequence - the suspending routine driving one open or close
//! cycle from state change to terminal event dispatch.
//!
//! The sequence is a single cooperative coroutine. It never runs on another
//! thread; every suspension yields a [`Suspend`] reason back to the host,
//! which resumes the sequence once the condition is satisfied (the render
//! pass committed, the transition timer elapsed, the native primitive
//! confirmed dismissal). Each step reads live shared state, not state
//! captured when the sequence started.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use genawaiter::rc::{Co, Gen};
use genawaiter::GeneratorState;

use super::native::NativeModal;
use super::scroll::DividerState;
use super::{DialogState, LifecycleEvent, LifecycleStage, SharedSink, ACTION_NONE};

/// Why a transition sequence is suspended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Suspend {
    /// Waiting for the declarative render pass to commit
    Render,
    /// Waiting out the enter/exit transition
    Timer(Duration),
    /// Waiting for the native primitive's dismissal confirmation
    Dismissal,
}

/// Object-safe resume handle over the underlying generator
trait Resumable {
    fn resume_seq(&mut self) -> Option<Suspend>;
}

struct GenWrapper<F: Future<Output = ()>> {
    gen: Gen<Suspend, (), F>,
}

impl<F: Future<Output = ()>> Resumable for GenWrapper<F> {
    fn resume_seq(&mut self) -> Option<Suspend> {
        match self.gen.resume() {
            GeneratorState::Yielded(s) => Some(s),
            GeneratorState::Complete(()) => None,
        }
    }
}

/// One in-flight open or close transition
///
/// The dialog holds at most one of these; spawning a replacement discards
/// the prior sequence along with its remaining steps.
pub(crate) struct TransitionSequence {
    gen: Box<dyn Resumable>,
    waiting: Option<Suspend>,
}

impl TransitionSequence {
    pub fn spawn(
        state: Rc<RefCell<DialogState>>,
        native: Rc<RefCell<dyn NativeModal>>,
        sink: SharedSink,
    ) -> Self {
        let gen = Gen::new(move |co| run_transition(co, state, native, sink));
        TransitionSequence {
            gen: Box::new(GenWrapper { gen }),
            waiting: None,
        }
    }

    /// What the sequence is currently suspended on
    pub fn waiting(&self) -> Option<&Suspend> {
        self.waiting.as_ref()
    }

    /// Run to the next suspension point; false once the sequence completed
    pub fn resume(&mut self) -> bool {
        match self.gen.resume_seq() {
            Some(s) => {
                self.waiting = Some(s);
                true
            }
            None => {
                self.waiting = None;
                false
            }
        }
    }
}

pub(crate) fn dispatch(sink: &SharedSink, event: LifecycleEvent) {
    if let Some(callback) = sink.borrow_mut().as_mut() {
        callback(&event);
    }
}

fn resolved_action(state: &Rc<RefCell<DialogState>>) -> String {
    let st = state.borrow();
    st.current_action
        .clone()
        .unwrap_or_else(|| st.default_action.clone())
}

async fn run_transition(
    co: Co<Suspend>,
    state: Rc<RefCell<DialogState>>,
    native: Rc<RefCell<dyn NativeModal>>,
    sink: SharedSink,
) {
    // Wait for the render pass that reflects the new opening/closing flags.
    co.yield_(Suspend::Render).await;

    let open = state.borrow().open;
    if open {
        {
            let mut st = state.borrow_mut();
            st.scroll.scroll_top = 0;
            st.dividers = DividerState::evaluate(&st.scroll);
        }
        native.borrow_mut().show_modal();
    }

    // Opening the primitive changes what is on screen; settle the latest
    // state into the tree before focusing or measuring.
    co.yield_(Suspend::Render).await;

    let open = state.borrow().open;
    if open {
        let target = state.borrow().autofocus_target.clone();
        if let Some(id) = target {
            state.borrow_mut().focus.focus(&id);
        }
    }
    state.borrow_mut().showing_open = open;

    let action = resolved_action(&state);
    if open {
        dispatch(
            &sink,
            LifecycleEvent::new(LifecycleStage::Opening, ACTION_NONE),
        );
    } else {
        dispatch(&sink, LifecycleEvent::new(LifecycleStage::Closing, &action));
    }

    // Motion tokens are read here rather than at sequence start so a theme
    // swap mid-flight uses the latest duration. Zero skips the wait.
    let duration = {
        let st = state.borrow();
        if open {
            st.motion.dialog_enter
        } else {
            st.motion.dialog_exit
        }
    };
    if !duration.is_zero() {
        co.yield_(Suspend::Timer(duration)).await;
    }

    {
        let mut st = state.borrow_mut();
        st.opening = false;
        st.closing = false;
    }

    // The native primitive updates its own open/closed bookkeeping
    // asynchronously; closure is not complete just because close() returned.
    if !open && native.borrow().is_open() {
        native.borrow_mut().close(&action);
        co.yield_(Suspend::Dismissal).await;
    }

    if open {
        dispatch(
            &sink,
            LifecycleEvent::new(LifecycleStage::Opened, ACTION_NONE),
        );
    } else {
        dispatch(&sink, LifecycleEvent::new(LifecycleStage::Closed, &action));
    }
    state.borrow_mut().current_action = None;
}

#[cfg(test)]
mod tests {
    use super::super::native::ModalLayer;
    use super::*;
    use crate::theme::MotionTokens;

    fn fresh_state(open: bool) -> Rc<RefCell<DialogState>> {
        let mut st = DialogState::new("close");
        st.open = open;
        st.opening = open;
        st.closing = !open;
        st.motion = MotionTokens::instant();
        Rc::new(RefCell::new(st))
    }

    #[test]
    fn test_open_sequence_suspension_order() {
        let state = fresh_state(true);
        let native: Rc<RefCell<dyn NativeModal>> = Rc::new(RefCell::new(ModalLayer::new()));
        let sink: SharedSink = Rc::new(RefCell::new(None));

        let mut seq = TransitionSequence::spawn(state.clone(), native.clone(), sink);
        assert!(seq.resume());
        assert_eq!(seq.waiting(), Some(&Suspend::Render));

        assert!(seq.resume());
        assert_eq!(seq.waiting(), Some(&Suspend::Render));
        // First render resumed: the primitive is now shown
        assert!(native.borrow().is_open());

        // Instant motion: the rest of the sequence completes in one resume
        assert!(!seq.resume());
        assert!(state.borrow().showing_open);
        assert!(!state.borrow().opening);
    }

    #[test]
    fn test_close_sequence_waits_for_dismissal() {
        let state = fresh_state(false);
        let native: Rc<RefCell<dyn NativeModal>> = Rc::new(RefCell::new(ModalLayer::new()));
        native.borrow_mut().show_modal();
        let sink: SharedSink = Rc::new(RefCell::new(None));

        let mut seq = TransitionSequence::spawn(state.clone(), native.clone(), sink);
        seq.resume();
        seq.resume();
        assert!(seq.resume());
        assert_eq!(seq.waiting(), Some(&Suspend::Dismissal));

        // Host observes the dismissal, then resumes
        assert!(native.borrow_mut().take_dismissal().is_some());
        assert!(!seq.resume());
        assert!(!state.borrow().showing_open);
    }

    #[test]
    fn test_nonzero_motion_yields_timer() {
        let state = fresh_state(true);
        state.borrow_mut().motion = MotionTokens {
            dialog_enter: Duration::from_millis(500),
            dialog_exit: Duration::from_millis(150),
        };
        let native: Rc<RefCell<dyn NativeModal>> = Rc::new(RefCell::new(ModalLayer::new()));
        let sink: SharedSink = Rc::new(RefCell::new(None));

        let mut seq = TransitionSequence::spawn(state, native, sink);
        seq.resume();
        seq.resume();
        assert!(seq.resume());
        assert_eq!(
            seq.waiting(),
            Some(&Suspend::Timer(Duration::from_millis(500)))
        );
    }
}
