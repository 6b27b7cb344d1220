use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use gloo_render::{request_animation_frame, AnimationFrame};

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

/// Runs `tick` once per animation frame until it returns false or the loop is
/// stopped. Dropping the loop cancels the pending frame.
pub struct FrameLoop {
    next: FrameSlot,
}

impl FrameLoop {
    pub fn start<F>(tick: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let next: FrameSlot = Rc::new(RefCell::new(None));
        schedule(Rc::downgrade(&next), tick);
        Self { next }
    }

    pub fn is_running(&self) -> bool {
        self.next.borrow().is_some()
    }

    pub fn stop(&self) {
        self.next.borrow_mut().take();
    }
}

fn schedule<F>(slot: Weak<RefCell<Option<AnimationFrame>>>, mut tick: F)
where
    F: FnMut(f64) -> bool + 'static,
{
    let Some(owner) = slot.upgrade() else {
        return;
    };

    let handle = request_animation_frame(move |timestamp| {
        let Some(owner) = slot.upgrade() else {
            return;
        };
        owner.borrow_mut().take();

        if tick(timestamp) {
            schedule(Rc::downgrade(&owner), tick);
        }
    });
    *owner.borrow_mut() = Some(handle);
}
