use crate::Error;
use crate::controller::BackgroundVideo;
use crate::element::video_frame;
use crate::options::{BackgroundVideoOptions, OuterWrap};
use crate::surface::{ReadyState, Surface};
use crate::transform::Transform;
use crate::vendor::Vendor;
use crate::video::Video;
use gpui::{
    Context, ElementId, EventEmitter, InteractiveElement, IntoElement, MouseButton, MouseDownEvent,
    ParentElement, Pixels, Point, Render, ScrollHandle, Size, Styled, Window, div, point,
    prelude::FluentBuilder as _, px, size,
};

/// Events that can be emitted by a background video view.
#[derive(Debug, Clone)]
pub enum BackgroundVideoEvent {
    /// The video became ready and was sized for the first time.
    Ready { width: u32, height: u32 },
    /// Video reached end of stream.
    EndOfStream,
    /// Error occurred while playing or binding the video.
    Error(String),
}

/// Layout state of the video wrap, written by the controller and read back when rendering.
#[derive(Debug)]
pub(crate) struct WrapSurface {
    video: Video,
    outer_wrap: OuterWrap,
    viewport: Size<f32>,
    scroll_top: f32,
    container: Size<f32>,
    overflow_hidden: bool,
    container_scroll: Point<f32>,
    video_size: Option<Size<f32>>,
    transform: Transform,
}

impl WrapSurface {
    fn new(video: Video, outer_wrap: OuterWrap) -> Self {
        Self {
            video,
            outer_wrap,
            viewport: Size::default(),
            scroll_top: 0.0,
            container: Size::default(),
            overflow_hidden: false,
            container_scroll: Point::default(),
            video_size: None,
            transform: Transform::identity(true),
        }
    }
}

impl Surface for WrapSurface {
    fn viewport_size(&self) -> Size<f32> {
        self.viewport
    }

    fn outer_size(&self) -> Size<f32> {
        match self.outer_wrap {
            OuterWrap::Window => self.viewport,
            OuterWrap::Fixed(size) => size,
        }
    }

    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn container_height(&self) -> f32 {
        self.container.height
    }

    fn set_container_size(&mut self, size: Size<f32>) {
        self.container = size;
    }

    fn set_container_overflow_hidden(&mut self) {
        self.overflow_hidden = true;
    }

    fn set_container_scroll(&mut self, scroll: Point<f32>) {
        let content = self.video_size.unwrap_or_default();
        self.container_scroll = clamp_scroll(scroll, content, self.container);
    }

    fn set_video_size(&mut self, size: Size<f32>) {
        self.video_size = Some(size);
    }

    fn set_video_transform(&mut self, transform: Transform, _vendor: Option<Vendor>) {
        self.transform = transform;
    }

    fn ready_state(&self) -> ReadyState {
        self.video.ready_state()
    }

    fn intrinsic_size(&self) -> Option<Size<u32>> {
        self.video.size().map(|(width, height)| size(width, height))
    }

    fn play(&mut self) {
        if playback_change(self.video.paused(), true).is_some() {
            if let Err(err) = self.video.play() {
                log::error!("failed to play background video: {err}");
            }
        }
    }

    fn pause(&mut self) {
        if playback_change(self.video.paused(), false).is_some() {
            if let Err(err) = self.video.pause() {
                log::error!("failed to pause background video: {err}");
            }
        }
    }

    fn supports_3d_transforms(&self) -> bool {
        // Everything gpui paints is composited on the GPU.
        true
    }
}

/// Like a scrollable box, the offset is limited to the overflowing part of the content.
fn clamp_scroll(scroll: Point<f32>, content: Size<f32>, container: Size<f32>) -> Point<f32> {
    let max_x = (content.width - container.width).max(0.0);
    let max_y = (content.height - container.height).max(0.0);
    point(scroll.x.clamp(0.0, max_x), scroll.y.clamp(0.0, max_y))
}

/// Scroll distance of the page. The page scrolls its content up, so the offset is negative.
fn page_scroll_top(offset: Point<Pixels>) -> f32 {
    -f32::from(offset.y)
}

/// Record `now` and report whether it differs from the last value seen.
fn track_change<T: PartialEq + Copy>(last: &mut Option<T>, now: T) -> bool {
    let changed = *last != Some(now);
    *last = Some(now);
    changed
}

/// Readiness is signalled from the decoder thread, so the view polls while the
/// controller still listens for it and the video has not failed.
fn polls_for_ready(controller: &BackgroundVideo, failed: bool) -> bool {
    !failed && controller.awaiting_ready()
}

/// Whether playback has to change: `Some(true)` to start, `Some(false)` to stop.
fn playback_change(paused: bool, play: bool) -> Option<bool> {
    (paused == play).then_some(play)
}

/// A video that covers its wrap, following window resizes and page scrolling.
pub struct BackgroundVideoView {
    id: ElementId,
    controller: BackgroundVideo,
    surface: WrapSurface,
    page_scroll: ScrollHandle,
    last_viewport: Option<Size<f32>>,
    last_scroll_top: Option<f32>,
    failed: bool,
}

impl BackgroundVideoView {
    /// Bind `video` to a new view. `page_scroll` is the handle of the
    /// scrollable page the video sits in.
    pub fn new(
        id: impl Into<ElementId>,
        video: Video,
        page_scroll: ScrollHandle,
        options: BackgroundVideoOptions,
    ) -> Result<Self, Error> {
        let mut surface = WrapSurface::new(video, options.outer_wrap);
        let controller = BackgroundVideo::new(options, &mut surface)?;
        Ok(Self {
            id: id.into(),
            controller,
            surface,
            page_scroll,
            last_viewport: None,
            last_scroll_top: None,
            failed: false,
        })
    }

    pub fn controller(&self) -> &BackgroundVideo {
        &self.controller
    }

    pub fn video(&self) -> &Video {
        &self.surface.video
    }

    /// Stop the parallax effect and leave the video where it is.
    pub fn disable_parallax(&mut self, cx: &mut Context<Self>) {
        self.controller.disable_parallax();
        cx.notify();
    }

    /// Stop reacting to resize, scroll and right clicks.
    pub fn detach(&mut self, cx: &mut Context<Self>) {
        self.controller.detach();
        cx.notify();
    }

    fn handle_bus_messages(&mut self, cx: &mut Context<Self>) {
        let (errors, ended) = self.surface.video.write().drain_bus();
        if !errors.is_empty() && !self.controller.is_initialized() {
            // The video will never become ready, stop polling for it.
            self.failed = true;
        }
        for error in errors {
            cx.emit(BackgroundVideoEvent::Error(error));
        }
        if ended {
            cx.emit(BackgroundVideoEvent::EndOfStream);
        }
    }

    fn handle_ready(&mut self, cx: &mut Context<Self>) {
        if !polls_for_ready(&self.controller, self.failed)
            || self.surface.ready_state() < ReadyState::HaveEnoughData
        {
            return;
        }

        match self.controller.on_ready(&mut self.surface) {
            Ok(()) => {
                if let Some(intrinsic) = self.controller.intrinsic_size() {
                    cx.emit(BackgroundVideoEvent::Ready {
                        width: intrinsic.width as u32,
                        height: intrinsic.height as u32,
                    });
                }
            }
            Err(err) => {
                self.failed = true;
                cx.emit(BackgroundVideoEvent::Error(err.to_string()));
            }
        }
    }
}

impl EventEmitter<BackgroundVideoEvent> for BackgroundVideoView {}

impl Render for BackgroundVideoView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.handle_bus_messages(cx);

        let viewport = window.viewport_size();
        let viewport = size(f32::from(viewport.width), f32::from(viewport.height));
        let resized = track_change(&mut self.last_viewport, viewport);
        self.surface.viewport = viewport;

        let was_initialized = self.controller.is_initialized();
        self.handle_ready(cx);
        if polls_for_ready(&self.controller, self.failed) {
            window.request_animation_frame();
        }
        // A fresh init already ran its own resize.
        if resized && was_initialized {
            self.controller.on_resize(&mut self.surface);
        }

        let scroll_top = page_scroll_top(self.page_scroll.offset());
        if track_change(&mut self.last_scroll_top, scroll_top) {
            self.surface.scroll_top = scroll_top;
            self.controller.on_scroll(&mut self.surface);
        }

        let container = self.surface.container;
        let left = -self.surface.container_scroll.x;
        let top = -self.surface.container_scroll.y + self.surface.transform.y();

        div()
            .id(self.id.clone())
            .relative()
            .w(px(container.width))
            .h(px(container.height))
            .when(self.surface.overflow_hidden, |wrap| wrap.overflow_hidden())
            .when_some(self.surface.video_size, |wrap, video_size| {
                wrap.child(
                    div().absolute().left(px(left)).top(px(top)).child(video_frame(
                        self.surface.video.clone(),
                        px(video_size.width),
                        px(video_size.height),
                    )),
                )
            })
            .on_mouse_down(
                MouseButton::Right,
                cx.listener(|this, _event: &MouseDownEvent, _window, cx| {
                    if this.controller.on_context_menu() {
                        cx.stop_propagation();
                    }
                }),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stands in for a video that has not decoded anything yet.
    struct Pending;

    impl Surface for Pending {
        fn viewport_size(&self) -> Size<f32> {
            size(800.0, 600.0)
        }
        fn outer_size(&self) -> Size<f32> {
            size(800.0, 600.0)
        }
        fn scroll_top(&self) -> f32 {
            0.0
        }
        fn container_height(&self) -> f32 {
            600.0
        }
        fn set_container_size(&mut self, _size: Size<f32>) {}
        fn set_container_overflow_hidden(&mut self) {}
        fn set_container_scroll(&mut self, _scroll: Point<f32>) {}
        fn set_video_size(&mut self, _size: Size<f32>) {}
        fn set_video_transform(&mut self, _transform: Transform, _vendor: Option<Vendor>) {}
        fn ready_state(&self) -> ReadyState {
            ReadyState::HaveNothing
        }
        fn intrinsic_size(&self) -> Option<Size<u32>> {
            None
        }
        fn play(&mut self) {}
        fn pause(&mut self) {}
    }

    fn pending_controller() -> BackgroundVideo {
        BackgroundVideo::new(BackgroundVideoOptions::default(), &mut Pending).unwrap()
    }

    #[test]
    fn polls_until_ready_while_listening() {
        let controller = pending_controller();
        assert!(polls_for_ready(&controller, false));
        assert!(!polls_for_ready(&controller, true));
    }

    #[test]
    fn detached_view_stops_polling() {
        let mut controller = pending_controller();
        controller.detach();
        assert!(!polls_for_ready(&controller, false));
    }

    #[test]
    fn page_offset_becomes_positive_scroll_top() {
        assert_eq!(page_scroll_top(point(px(0.0), px(0.0))), 0.0);
        assert_eq!(page_scroll_top(point(px(0.0), px(-240.0))), 240.0);
    }

    #[test]
    fn change_tracking_reports_first_and_new_values() {
        let mut last = None;
        assert!(track_change(&mut last, size(800.0, 600.0)));
        assert!(!track_change(&mut last, size(800.0, 600.0)));
        assert!(track_change(&mut last, size(1024.0, 768.0)));
        assert_eq!(last, Some(size(1024.0, 768.0)));
    }

    #[test]
    fn playback_changes_only_when_state_differs() {
        assert_eq!(playback_change(true, true), Some(true));
        assert_eq!(playback_change(false, true), None);
        assert_eq!(playback_change(false, false), Some(false));
        assert_eq!(playback_change(true, false), None);
    }

    #[test]
    fn centering_scroll_fits_inside_overflow() {
        let scroll = clamp_scroll(point(133.0, 0.0), size(1066.0, 600.0), size(800.0, 600.0));
        assert_eq!(scroll, point(133.0, 0.0));
    }

    #[test]
    fn scroll_is_clamped_to_overflow() {
        // A wrap shorter than the viewport can only scroll as far as the video overflows it.
        let scroll = clamp_scroll(point(10.0, 500.0), size(1066.0, 600.0), size(800.0, 300.0));
        assert_eq!(scroll, point(10.0, 300.0));

        let scroll = clamp_scroll(point(-5.0, -5.0), size(400.0, 225.0), size(800.0, 600.0));
        assert_eq!(scroll, point(0.0, 0.0));
    }
}
