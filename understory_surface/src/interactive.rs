// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use kurbo::{Point, Rect, Size};
use understory_batch::{BatchRenderer, Clock, DrawItems, PassState, SystemClock};
use understory_index::Index;
use understory_painter::{Painter, StrokeStyle};
use understory_size_observer::MeasureSurface;
use understory_view2d::{Transform, TransformError, TransformState, ZoomEvent, ZoomGesture};

use crate::config::{ConfigError, SurfaceConfig};
use crate::hit::hit_test;
use crate::mappings::{Domain, Mappings};
use crate::overlay::HighlightOverlay;
use crate::responsive::ResponsiveSurface;
use crate::segment::{ColorRamp, Segment};

/// Mappings and size captured when a render pass starts.
#[derive(Clone, Copy, Debug)]
struct PassContext {
    mappings: Mappings,
    size: Size,
}

/// Draws segments onto a painter with the mappings of one pass.
struct SegmentDrawer<'a, P: ?Sized> {
    painter: &'a mut P,
    ctx: PassContext,
    ramp: &'a ColorRamp,
    line_width: f64,
}

impl<P: Painter + ?Sized> DrawItems<Segment> for SegmentDrawer<'_, P> {
    fn clear(&mut self) {
        self.painter
            .clear(Rect::from_origin_size(Point::ZERO, self.ctx.size));
    }

    fn draw(&mut self, seg: &Segment) {
        let color = self.ramp.color(seg.value);
        self.painter
            .set_stroke(StrokeStyle::new(color, self.line_width));
        self.painter.stroke_line(
            self.ctx.mappings.to_surface(seg.p1),
            self.ctx.mappings.to_surface(seg.p2),
        );
    }
}

/// A resizable, pannable, zoomable surface showing line segments.
///
/// This is the composition root tying together size observation, the
/// pan/zoom transform, the spatial index, and batched rendering:
/// - [`InteractiveSurface::mount`] subscribes to size changes and computes
///   the first mappings.
/// - [`InteractiveSurface::set_segments`] rebuilds the index and restarts
///   rendering.
/// - Gestures and size changes recompute the mappings and restart rendering.
/// - Pointer movement updates the [`HighlightOverlay`] without touching the
///   segment layer.
/// - [`InteractiveSurface::teardown`] unsubscribes, cancels, and drops the
///   index.
///
/// The host drives everything from its event loop: call
/// [`InteractiveSurface::frame`] once per display frame with the segment
/// layer's painter, and [`InteractiveSurface::draw_overlay`] with the overlay
/// layer's painter.
#[derive(Debug)]
pub struct InteractiveSurface<M, C = SystemClock> {
    config: SurfaceConfig,
    host: ResponsiveSurface<M>,
    domain: Domain,
    state: TransformState,
    gesture: ZoomGesture,
    segments: Arc<[Segment]>,
    index: Arc<Index<usize>>,
    ramp: ColorRamp,
    mappings: Option<Mappings>,
    pass: Option<PassContext>,
    renderer: BatchRenderer<Segment, C>,
    overlay: HighlightOverlay,
    overlay_dirty: bool,
}

impl<M: MeasureSurface> InteractiveSurface<M> {
    /// Creates an unmounted surface using the system clock.
    pub fn new(target: M, domain: Domain, config: SurfaceConfig) -> Result<Self, ConfigError> {
        Self::with_clock(target, domain, config, SystemClock::default())
    }
}

impl<M: MeasureSurface, C: Clock> InteractiveSurface<M, C> {
    /// Creates an unmounted surface with an explicit clock for time-boxed
    /// batches.
    pub fn with_clock(
        target: M,
        domain: Domain,
        config: SurfaceConfig,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = TransformState::new();
        if let Some((min, max)) = config.scale_extent {
            state
                .set_scale_extent(min, max)
                .map_err(|_| ConfigError::InvalidScaleExtent { min, max })?;
        }
        Ok(Self {
            renderer: BatchRenderer::with_clock(config.batch_policy, clock),
            config,
            host: ResponsiveSurface::new(target),
            domain,
            state,
            gesture: ZoomGesture::default(),
            segments: Arc::from(Vec::new()),
            index: Arc::new(Index::default()),
            ramp: ColorRamp::default(),
            mappings: None,
            pass: None,
            overlay: HighlightOverlay::default(),
            overlay_dirty: false,
        })
    }

    /// Subscribes to size changes and starts the first render pass.
    pub fn mount(&mut self) {
        if self.host.is_mounted() {
            return;
        }
        self.host.mount();
        tracing::debug!(size = ?self.host.size(), "surface mounted");
        if self.index.len() != self.segments.len() {
            self.rebuild_index();
        }
        if self.host.take_resized() {
            self.on_size_change();
        }
    }

    /// Unsubscribes, cancels rendering, and discards the index.
    pub fn teardown(&mut self) {
        self.host.unmount();
        self.gesture.pointer_up();
        self.renderer.cancel();
        self.index = Arc::new(Index::default());
        self.mappings = None;
        self.pass = None;
        self.overlay.clear();
        self.overlay_dirty = true;
        tracing::debug!("surface torn down");
    }

    /// Returns `true` between [`InteractiveSurface::mount`] and
    /// [`InteractiveSurface::teardown`].
    pub fn is_mounted(&self) -> bool {
        self.host.is_mounted()
    }

    /// Replaces the segment collection.
    ///
    /// The index is rebuilt from scratch and swapped in, and a new render
    /// pass replaces the running one.
    pub fn set_segments(&mut self, segments: impl Into<Arc<[Segment]>>) {
        self.segments = segments.into();
        self.rebuild_index();
        self.refresh_hover();
        self.restart_pass();
    }

    /// Changes the data domain shown on the surface.
    pub fn set_domain(&mut self, domain: Domain) {
        self.domain = domain;
        self.on_mappings_changed();
    }

    /// Changes the color ramp and redraws.
    pub fn set_color_ramp(&mut self, ramp: ColorRamp) {
        self.ramp = ramp;
        self.restart_pass();
    }

    /// Applies a pan/zoom gesture event.
    ///
    /// Invalid transforms are rejected and leave everything unchanged.
    pub fn on_gesture(&mut self, event: &ZoomEvent) -> Result<Transform, TransformError> {
        let revision = self.state.revision();
        let stored = self.state.update_from(event).inspect_err(|err| {
            tracing::warn!(%err, source = ?event.source, "rejected transform");
        })?;
        if self.state.revision() != revision {
            self.on_mappings_changed();
        }
        Ok(stored)
    }

    /// Starts a pan drag at `pos`.
    pub fn pointer_down(&mut self, pos: Point) {
        self.gesture.pointer_down(pos);
    }

    /// Moves the pointer over the surface.
    ///
    /// Pans while a drag is active, then updates the highlight. Returns the
    /// keys of the segments near the pointer.
    pub fn pointer_move(&mut self, pos: Point) -> Option<&[usize]> {
        if let Some(ev) = self.gesture.pointer_move(&self.state.transform(), pos) {
            // Rejections are logged by `on_gesture`.
            let _ = self.on_gesture(&ev);
        }
        self.hover(Some(pos))
    }

    /// Ends a pan drag.
    pub fn pointer_up(&mut self) {
        self.gesture.pointer_up();
    }

    /// The pointer left the surface.
    pub fn pointer_leave(&mut self) {
        self.gesture.pointer_up();
        self.hover(None);
    }

    /// Zooms about `anchor` for a wheel tick.
    pub fn wheel(&mut self, anchor: Point, delta_y: f64) -> Result<Transform, TransformError> {
        let ev = self.gesture.wheel(&self.state.transform(), anchor, delta_y);
        self.on_gesture(&ev)
    }

    /// Zooms in 2x about `anchor`.
    pub fn double_click(&mut self, anchor: Point) -> Result<Transform, TransformError> {
        let ev = self.gesture.double_click(&self.state.transform(), anchor);
        self.on_gesture(&ev)
    }

    /// Resets pan/zoom to identity.
    pub fn reset_transform(&mut self) {
        let revision = self.state.revision();
        self.state.reset();
        if self.state.revision() != revision {
            self.on_mappings_changed();
        }
    }

    /// Updates the highlight for a pointer position, `None` meaning the
    /// pointer is not over the surface.
    ///
    /// Only the overlay is marked for redraw; the segment layer is untouched.
    /// An unmounted surface has no pointer over it and always returns `None`.
    pub fn hover(&mut self, pointer: Option<Point>) -> Option<&[usize]> {
        let pointer = pointer.filter(|_| self.host.is_mounted());
        let matches = pointer.map(|p| self.hit_test(p)).unwrap_or_default();
        self.overlay.update(pointer, matches);
        self.overlay_dirty = true;
        self.overlay.matches()
    }

    /// Keys of the segments within the hit tolerance of `pointer`, using the
    /// current transform. Empty before the first size is known.
    pub fn hit_test(&self, pointer: Point) -> Vec<usize> {
        match &self.mappings {
            Some(mappings) => hit_test(
                &self.index,
                &self.segments,
                mappings,
                pointer,
                &self.config.hit_params(),
            ),
            None => Vec::new(),
        }
    }

    /// Runs one frame: observes the size, then draws one batch.
    pub fn frame<P: Painter + ?Sized>(&mut self, painter: &mut P) -> PassState {
        if self.host.poll_resize() {
            self.on_size_change();
        }
        self.pump(painter)
    }

    /// Applies a size from a native resize notification.
    pub fn report_size(&mut self, size: Size) {
        if self.host.report_size(size) {
            self.on_size_change();
        }
    }

    /// Draws one batch of the running pass.
    pub fn pump<P: Painter + ?Sized>(&mut self, painter: &mut P) -> PassState {
        let Some(ctx) = self.pass else {
            return self.renderer.state();
        };
        let mut drawer = SegmentDrawer {
            painter,
            ctx,
            ramp: &self.ramp,
            line_width: self.config.line_width,
        };
        self.renderer.pump(&mut drawer)
    }

    /// Draws batches until the running pass finishes.
    pub fn finish_pass<P: Painter + ?Sized>(&mut self, painter: &mut P) -> PassState {
        loop {
            let state = self.pump(painter);
            if state != PassState::Running {
                return state;
            }
        }
    }

    /// Redraws the overlay layer if the highlight changed since the last call.
    pub fn draw_overlay<P: Painter + ?Sized>(&mut self, painter: &mut P) -> bool {
        if !self.overlay_dirty {
            return false;
        }
        let size = self.host.size();
        let mappings = self.mappings.unwrap_or_else(|| self.domain.base(size));
        self.overlay.draw(
            painter,
            size,
            &self.segments,
            &mappings,
            self.config.hit_tolerance,
            &self.config.overlay_style,
        );
        self.overlay_dirty = false;
        true
    }

    /// Current transform.
    pub fn transform(&self) -> Transform {
        self.state.transform()
    }

    /// Current mappings, once the size is known.
    pub fn mappings(&self) -> Option<&Mappings> {
        self.mappings.as_ref()
    }

    /// Last observed surface size.
    pub fn size(&self) -> Size {
        self.host.size()
    }

    /// Current segments.
    pub fn segments(&self) -> &Arc<[Segment]> {
        &self.segments
    }

    /// Current index.
    pub fn index(&self) -> &Arc<Index<usize>> {
        &self.index
    }

    /// Highlight state.
    pub fn overlay(&self) -> &HighlightOverlay {
        &self.overlay
    }

    /// State of the current render pass.
    pub fn pass_state(&self) -> PassState {
        self.renderer.state()
    }

    /// The batch renderer.
    pub fn renderer(&self) -> &BatchRenderer<Segment, C> {
        &self.renderer
    }

    /// The configuration.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    fn rebuild_index(&mut self) {
        self.index = Arc::new(Index::build(
            self.segments.iter().enumerate().map(|(i, s)| s.entry(i)),
        ));
        tracing::debug!(segments = self.segments.len(), "index rebuilt");
    }

    fn on_size_change(&mut self) {
        tracing::debug!(size = ?self.host.size(), "surface resized");
        self.on_mappings_changed();
    }

    fn on_mappings_changed(&mut self) {
        if !self.host.is_mounted() {
            return;
        }
        let size = self.host.size();
        self.mappings = Some(self.domain.base(size).rescaled(&self.state.transform()));
        self.refresh_hover();
        self.restart_pass();
    }

    fn refresh_hover(&mut self) {
        if let Some(pointer) = self.overlay.pointer() {
            self.hover(Some(pointer));
        }
    }

    fn restart_pass(&mut self) {
        if !self.host.is_mounted() {
            return;
        }
        let Some(mappings) = self.mappings else {
            return;
        };
        let token = self.host.next_token();
        self.pass = Some(PassContext {
            mappings,
            size: self.host.size(),
        });
        self.renderer.start_with(Arc::clone(&self.segments), token);
    }
}
