// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Size;
use understory_batch::CancellationToken;
use understory_size_observer::{MeasureSurface, SizeObserver, SubscriptionId};

/// Host for a resizable drawing surface with a draw callback.
///
/// The host observes the surface size and hands every redraw a fresh
/// [`CancellationToken`]. Starting a redraw cancels the token of the
/// previous one first, so a draw callback that batches its work can stop
/// as soon as it has been superseded.
#[derive(Debug)]
pub struct ResponsiveSurface<M> {
    observer: SizeObserver<M>,
    subscription: Option<SubscriptionId>,
    size: Rc<Cell<Size>>,
    resized: Rc<Cell<bool>>,
    token: Option<CancellationToken>,
}

impl<M: MeasureSurface> ResponsiveSurface<M> {
    /// Creates an unmounted host for `target`.
    pub fn new(target: M) -> Self {
        Self {
            observer: SizeObserver::new(target),
            subscription: None,
            size: Rc::new(Cell::new(Size::ZERO)),
            resized: Rc::new(Cell::new(false)),
            token: None,
        }
    }

    /// Starts observing the surface size.
    ///
    /// The current size is measured synchronously, so [`ResponsiveSurface::size`]
    /// is valid right after mounting and the next [`ResponsiveSurface::poll_resize`]
    /// reports a resize.
    pub fn mount(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let size = Rc::clone(&self.size);
        let resized = Rc::clone(&self.resized);
        let id = self.observer.subscribe(move |new, _prev| {
            size.set(new);
            resized.set(true);
        });
        self.subscription = Some(id);
    }

    /// Stops observing and cancels the current redraw.
    pub fn unmount(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.observer.unsubscribe(id);
        }
        self.cancel();
    }

    /// Returns `true` while mounted.
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Last delivered surface size; [`Size::ZERO`] before mounting.
    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// Runs one frame of size observation.
    ///
    /// Returns `true` if the size changed since the last call.
    pub fn poll_resize(&mut self) -> bool {
        self.observer.tick();
        self.take_resized()
    }

    /// Pushes a size from a native resize notification.
    ///
    /// Returns `true` if the size changed since the last call.
    pub fn report_size(&mut self, size: Size) -> bool {
        self.observer.report(size);
        self.take_resized()
    }

    /// Returns and resets the "size changed" flag without measuring.
    pub fn take_resized(&mut self) -> bool {
        self.resized.replace(false)
    }

    /// Cancels the current redraw token and returns a fresh one.
    pub fn next_token(&mut self) -> CancellationToken {
        self.cancel();
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        token
    }

    /// Token of the most recent redraw, if it has not been cancelled.
    pub fn active_token(&self) -> Option<&CancellationToken> {
        self.token.as_ref().filter(|t| !t.is_cancelled())
    }

    /// Cancels the current redraw, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }

    /// Invokes `draw` with the painter, the current size and a fresh token.
    ///
    /// The previous token is cancelled before `draw` runs.
    pub fn redraw<P, F, R>(&mut self, painter: &mut P, draw: F) -> R
    where
        P: ?Sized,
        F: FnOnce(&mut P, Size, &CancellationToken) -> R,
    {
        let token = self.next_token();
        draw(painter, self.size(), &token)
    }

    /// The observed surface.
    pub fn target(&self) -> &M {
        self.observer.target()
    }

    /// Mutable access to the observed surface.
    pub fn target_mut(&mut self) -> &mut M {
        self.observer.target_mut()
    }
}
