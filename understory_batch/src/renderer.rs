// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::pass::{DrawItems, PassState, RenderPass};
use crate::policy::BatchPolicy;
use crate::token::CancellationToken;

/// Owner of the render pass for one surface.
///
/// At most one pass is running at a time. [`BatchRenderer::start`] cancels
/// the current pass synchronously, so nothing from the old pass can be drawn
/// once the new pass exists.
#[derive(Debug)]
pub struct BatchRenderer<T, C = SystemClock> {
    clock: C,
    policy: BatchPolicy,
    pass: Option<RenderPass<T>>,
    started: u64,
}

impl<T> BatchRenderer<T> {
    /// Creates a renderer using the system clock.
    pub fn new(policy: BatchPolicy) -> Self {
        Self::with_clock(policy, SystemClock::default())
    }
}

impl<T, C: Clock> BatchRenderer<T, C> {
    /// Creates a renderer with an explicit clock.
    pub fn with_clock(policy: BatchPolicy, clock: C) -> Self {
        Self {
            clock,
            policy,
            pass: None,
            started: 0,
        }
    }

    /// Policy used for passes started from now on.
    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    /// Changes the policy for future passes. A running pass keeps its policy.
    pub fn set_policy(&mut self, policy: BatchPolicy) {
        self.policy = policy;
    }

    /// Clock used for time-boxed batches.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Starts a new pass over `items` and returns its token.
    ///
    /// A running pass is cancelled first.
    pub fn start(&mut self, items: Arc<[T]>) -> CancellationToken {
        let token = CancellationToken::new();
        self.start_with(items, token.clone());
        token
    }

    /// Starts a new pass observing a caller-provided token.
    ///
    /// A running pass is cancelled first. Passing an already cancelled token
    /// yields a pass that finishes as [`PassState::Cancelled`] on its first
    /// pump without drawing.
    pub fn start_with(&mut self, items: Arc<[T]>, token: CancellationToken) {
        self.cancel();
        self.started += 1;
        tracing::debug!(
            pass = self.started,
            items = items.len(),
            policy = ?self.policy,
            "render pass started"
        );
        self.pass = Some(RenderPass::new(items, self.policy, token));
    }

    /// Cancels the running pass, if any.
    pub fn cancel(&mut self) {
        if let Some(pass) = &mut self.pass {
            if pass.state() == PassState::Running {
                pass.token().cancel();
                // Settle the state without drawing; a cancelled step never
                // touches the sink.
                pass.step(&self.clock, &mut NoDraw);
            }
        }
    }

    /// Draws the next batch of the running pass.
    ///
    /// Hosts call this once per turn of their event loop.
    pub fn pump<D>(&mut self, sink: &mut D) -> PassState
    where
        D: DrawItems<T> + ?Sized,
    {
        match &mut self.pass {
            Some(pass) => pass.step(&self.clock, sink),
            None => PassState::Idle,
        }
    }

    /// Pumps until the running pass completes or is cancelled.
    pub fn run_to_completion<D>(&mut self, sink: &mut D) -> PassState
    where
        D: DrawItems<T> + ?Sized,
    {
        loop {
            let state = self.pump(sink);
            if state != PassState::Running {
                return state;
            }
        }
    }

    /// State of the most recent pass; [`PassState::Idle`] before the first.
    pub fn state(&self) -> PassState {
        self.pass.as_ref().map_or(PassState::Idle, RenderPass::state)
    }

    /// Returns `true` while a pass has batches left to draw.
    pub fn is_running(&self) -> bool {
        self.state() == PassState::Running
    }

    /// The most recent pass.
    pub fn pass(&self) -> Option<&RenderPass<T>> {
        self.pass.as_ref()
    }

    /// Number of passes started over the renderer's lifetime.
    pub fn passes_started(&self) -> u64 {
        self.started
    }
}

struct NoDraw;

impl<T> DrawItems<T> for NoDraw {
    fn clear(&mut self) {}
    fn draw(&mut self, _: &T) {}
}
