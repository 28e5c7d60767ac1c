//! Serialized event delivery for one controller.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use super::{AnimationController, ControllerEvent};

/// One element's controller and its pending events.
///
/// Collaborator callbacks may fire while the controller is handling an
/// earlier event. Posting only queues; whichever call holds the
/// controller drains the queue before returning. A teardown requested
/// while the controller is held runs as soon as that delivery returns.
#[derive(Debug, Default)]
pub struct Mailbox {
    queue: RefCell<VecDeque<ControllerEvent>>,
    controller: RefCell<Option<AnimationController>>,
    closed: Cell<bool>,
}

impl Mailbox {
    /// An empty mailbox awaiting its controller.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Hand over the mounted controller and deliver anything queued
    /// during mount.
    pub fn install(&self, mut controller: AnimationController) {
        if self.closed.get() {
            log::debug!("mailbox closed during mount, tearing down");
            controller.teardown();
            return;
        }
        if let Ok(mut slot) = self.controller.try_borrow_mut() {
            *slot = Some(controller);
        } else {
            controller.teardown();
            return;
        }
        self.pump();
    }

    /// Queue an event and deliver it unless a delivery is in progress.
    pub fn post(&self, event: ControllerEvent) {
        if self.closed.get() {
            return;
        }
        self.queue.borrow_mut().push_back(event);
        self.pump();
    }

    /// Tear the controller down; queued and later events are dropped.
    pub fn teardown(&self) {
        self.closed.set(true);
        self.queue.borrow_mut().clear();
        self.pump();
    }

    /// Whether teardown was requested.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    fn pump(&self) {
        // Held by a delivery further up the stack, which finishes the job.
        let Ok(mut slot) = self.controller.try_borrow_mut() else {
            return;
        };
        if let Some(controller) = slot.as_mut() {
            while !self.closed.get() {
                let next = self.queue.borrow_mut().pop_front();
                match next {
                    Some(event) => controller.handle_event(event),
                    None => break,
                }
            }
        }
        if self.closed.get() {
            if let Some(mut controller) = slot.take() {
                controller.teardown();
            }
        }
    }
}
