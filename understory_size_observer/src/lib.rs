// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_size_observer --heading-base-level=0

//! Understory Size Observer: notice when a rendering surface changes size.
//!
//! A [`SizeObserver`] measures one target surface (anything implementing
//! [`MeasureSurface`]) and delivers `(new, previous)` size pairs to its
//! subscribers. Hosts drive it in one of two ways:
//! - call [`SizeObserver::tick`] once per display frame, which measures the
//!   target while at least one subscriber exists, or
//! - push sizes from a native resize notification with
//!   [`SizeObserver::report`].
//!
//! Both paths share the same contract: a notification fires only when the
//! width or the height differs from the last delivered size, and a new
//! subscriber is immediately handed the current size with no previous size.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::Size;
//! use understory_size_observer::SizeObserver;
//!
//! let width = Rc::new(Cell::new(100.0));
//! let w = width.clone();
//! let mut observer = SizeObserver::new(move || Some(Size::new(w.get(), 50.0)));
//!
//! let seen = Rc::new(Cell::new(0));
//! let s = seen.clone();
//! let id = observer.subscribe(move |_size, _prev| s.set(s.get() + 1));
//! assert_eq!(seen.get(), 1); // eager delivery
//!
//! observer.tick();
//! assert_eq!(seen.get(), 1); // unchanged size, no notification
//!
//! width.set(120.0);
//! observer.tick();
//! assert_eq!(seen.get(), 2);
//!
//! observer.unsubscribe(id);
//! assert!(!observer.is_running());
//! ```

use core::fmt;

use kurbo::Size;

/// A surface whose current size can be measured.
pub trait MeasureSurface {
    /// Measures the surface's bounding box.
    ///
    /// Returns `None` when the surface is not attached to anything
    /// renderable. The observer treats that as [`Size::ZERO`].
    fn measure(&self) -> Option<Size>;
}

impl<F> MeasureSurface for F
where
    F: Fn() -> Option<Size>,
{
    fn measure(&self) -> Option<Size> {
        self()
    }
}

/// Handle returned by [`SizeObserver::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(Size, Option<Size>)>;

/// Observes the size of one surface and notifies subscribers on change.
///
/// All subscribers share a single measurement per frame; the cost of
/// [`SizeObserver::tick`] does not depend on the number of subscribers.
pub struct SizeObserver<M> {
    target: M,
    current: Option<Size>,
    listeners: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
    running: bool,
}

impl<M> fmt::Debug for SizeObserver<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeObserver")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl<M: MeasureSurface> SizeObserver<M> {
    /// Creates an observer for `target`. Nothing is measured until the first
    /// subscription.
    pub fn new(target: M) -> Self {
        Self {
            target,
            current: None,
            listeners: Vec::new(),
            next_id: 0,
            running: false,
        }
    }

    /// Registers `handler`.
    ///
    /// The first subscriber starts the measurement loop and triggers a
    /// synchronous measurement. Every new subscriber is then called once
    /// with `(current, None)`.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(Size, Option<Size>) + 'static,
    {
        if self.listeners.is_empty() {
            self.running = true;
            tracing::debug!("size observer loop started");
            self.update();
        }
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let mut handler: Handler = Box::new(handler);
        handler(self.current.unwrap_or(Size::ZERO), None);
        self.listeners.push((id, handler));
        id
    }

    /// Removes a subscriber. Returns `false` if `id` was not subscribed.
    ///
    /// Removing the last subscriber stops the measurement loop.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        let removed = self.listeners.len() != before;
        if removed && self.listeners.is_empty() {
            self.running = false;
            tracing::debug!("size observer loop stopped");
        }
        removed
    }

    /// Runs one frame of the measurement loop.
    ///
    /// Does nothing while stopped. Returns `true` if subscribers were
    /// notified.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.update()
    }

    /// Pushes a size obtained from a native resize notification.
    ///
    /// Change detection and delivery are the same as for [`SizeObserver::tick`].
    /// Reports are ignored while stopped.
    pub fn report(&mut self, size: Size) -> bool {
        if !self.running {
            return false;
        }
        self.deliver(size)
    }

    /// Returns `true` while at least one subscriber keeps the loop running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// The last delivered size, if anything was measured yet.
    pub fn current_size(&self) -> Option<Size> {
        self.current
    }

    /// The observed surface.
    pub fn target(&self) -> &M {
        &self.target
    }

    /// Mutable access to the observed surface.
    pub fn target_mut(&mut self) -> &mut M {
        &mut self.target
    }

    fn update(&mut self) -> bool {
        let size = self.target.measure().unwrap_or_else(|| {
            tracing::warn!("size observer target is detached; using zero size");
            Size::ZERO
        });
        self.deliver(size)
    }

    fn deliver(&mut self, size: Size) -> bool {
        let prev = self.current;
        if prev.is_some_and(|p| p.width == size.width && p.height == size.height) {
            tracing::trace!(?size, "size unchanged");
            return false;
        }
        self.current = Some(size);
        tracing::debug!(?size, ?prev, "surface size changed");
        for (_, handler) in &mut self.listeners {
            handler(size, prev);
        }
        true
    }
}
