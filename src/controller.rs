use crate::Error;
use crate::cover::CoverLayout;
use crate::options::BackgroundVideoOptions;
use crate::surface::{ReadyState, Surface};
use crate::transform::Transform;
use crate::vendor::Vendor;
use gpui::{Size, size};

/// Event handlers currently bound by a [`BackgroundVideo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Listeners {
    pub ready: bool,
    pub resize: bool,
    pub parallax_scroll: bool,
    pub play_pause_scroll: bool,
    pub context_menu: bool,
}

/// Controller that keeps a video covering its wrap.
///
/// The host forwards ready, resize, scroll and context-menu events; the
/// controller computes layout and writes it back through a [`Surface`].
#[derive(Debug, Clone)]
pub struct BackgroundVideo {
    options: BackgroundVideoOptions,
    vendor: Option<Vendor>,
    has_3d: bool,
    intrinsic: Option<Size<f32>>,
    listeners: Listeners,
    layout: Option<CoverLayout>,
}

impl BackgroundVideo {
    /// Bind to `surface`. Initializes right away when the video already has
    /// enough data, otherwise waits for [`on_ready`](Self::on_ready).
    pub fn new(options: BackgroundVideoOptions, surface: &mut impl Surface) -> Result<Self, Error> {
        let vendor = surface.user_agent().as_deref().and_then(Vendor::detect);
        let has_3d = surface.supports_3d_transforms();
        log::debug!(
            "background video bound (vendor: {}, 3d transforms: {has_3d})",
            vendor.map_or("unknown", Vendor::name)
        );

        surface.set_container_overflow_hidden();

        let mut this = Self {
            options,
            vendor,
            has_3d,
            intrinsic: None,
            listeners: Listeners {
                ready: true,
                ..Listeners::default()
            },
            layout: None,
        };

        // The video may already be buffered before anyone listened for it.
        if surface.ready_state() >= ReadyState::HaveEnoughData {
            this.on_ready(surface)?;
        }

        Ok(this)
    }

    pub fn options(&self) -> &BackgroundVideoOptions {
        &self.options
    }

    pub fn vendor(&self) -> Option<Vendor> {
        self.vendor
    }

    pub fn has_3d(&self) -> bool {
        self.has_3d
    }

    /// Intrinsic size captured when the video became ready.
    pub fn intrinsic_size(&self) -> Option<Size<f32>> {
        self.intrinsic
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    /// Last layout applied by [`on_resize`](Self::on_resize).
    pub fn layout(&self) -> Option<CoverLayout> {
        self.layout
    }

    pub fn is_initialized(&self) -> bool {
        self.intrinsic.is_some()
    }

    /// Whether a ready event would still be handled. False once initialized or detached.
    pub fn awaiting_ready(&self) -> bool {
        self.listeners.ready && self.intrinsic.is_none()
    }

    /// Handle the video's ready event: capture the intrinsic size, bind the
    /// remaining listeners and run a first resize. Repeated ready events are ignored.
    pub fn on_ready(&mut self, surface: &mut impl Surface) -> Result<(), Error> {
        if !self.listeners.ready || self.intrinsic.is_some() {
            return Ok(());
        }

        let Some(intrinsic) = surface.intrinsic_size() else {
            log::debug!("ready event without an intrinsic size, still waiting");
            return Ok(());
        };
        if intrinsic.width == 0 || intrinsic.height == 0 {
            log::error!(
                "refusing to cover with a {}x{} video",
                intrinsic.width,
                intrinsic.height
            );
            return Err(Error::Dimensions {
                width: intrinsic.width,
                height: intrinsic.height,
            });
        }

        self.intrinsic = Some(size(intrinsic.width as f32, intrinsic.height as f32));
        self.listeners.ready = false;
        self.init(surface);
        Ok(())
    }

    fn init(&mut self, surface: &mut impl Surface) {
        self.listeners.resize = true;
        self.listeners.parallax_scroll = self.options.parallax;
        self.listeners.play_pause_scroll = self.options.pause_video_on_view_loss;
        self.listeners.context_menu = self.options.prevent_context_menu;

        if self.options.autoplay {
            surface.play();
        }
        self.on_resize(surface);
    }

    /// Recompute the cover layout for the current viewport and apply it.
    pub fn on_resize(&mut self, surface: &mut impl Surface) {
        if !self.listeners.resize {
            return;
        }
        let Some(intrinsic) = self.intrinsic else {
            return;
        };

        let outer = surface.outer_size();
        surface.set_container_size(outer);

        let viewport = surface.viewport_size();
        let layout = CoverLayout::compute(intrinsic, viewport, self.options.minimum_video_width);

        surface.set_video_size(layout.video);
        surface.set_container_scroll(layout.scroll);
        self.layout = Some(layout);
    }

    /// Dispatch a scroll event to the parallax and play/pause listeners.
    pub fn on_scroll(&mut self, surface: &mut impl Surface) {
        if self.listeners.parallax_scroll {
            self.parallax_scroll(surface);
        }
        if self.listeners.play_pause_scroll {
            self.play_pause(surface);
        }
    }

    fn parallax_scroll(&self, surface: &mut impl Surface) {
        let scroll_top = surface.scroll_top();
        let parallax = self.options.parallax_options;

        if scroll_top > parallax.offset {
            // Past the bottom of the wrap the video is invisible, leave it be.
            if scroll_top >= surface.container_height() {
                return;
            }
            let translate = (scroll_top - parallax.offset) * parallax.effect;
            surface.set_video_transform(Transform::translate_y(translate, self.has_3d), self.vendor);
        } else {
            surface.set_video_transform(Transform::identity(self.has_3d), self.vendor);
        }
    }

    fn play_pause(&self, surface: &mut impl Surface) {
        if surface.scroll_top() < surface.container_height() {
            surface.play();
        } else {
            surface.pause();
        }
    }

    /// Returns `true` when the context menu should be suppressed.
    pub fn on_context_menu(&self) -> bool {
        self.listeners.context_menu
    }

    /// Stop reacting to scroll with the parallax effect.
    pub fn disable_parallax(&mut self) {
        self.listeners.parallax_scroll = false;
    }

    /// Unbind every listener. The controller ignores all further events.
    pub fn detach(&mut self) {
        self.listeners = Listeners::default();
    }
}
