use gpui::Size;

/// Element whose size the video wrap follows on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OuterWrap {
    /// Follow the window viewport.
    #[default]
    Window,
    /// Follow a fixed size in pixels.
    Fixed(Size<f32>),
}

/// Scroll-driven translation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxOptions {
    /// Scroll distance (px) before the effect starts, e.g. the height of a header.
    pub offset: f32,
    /// Fraction of the scroll distance applied as translation, in `0.0..=1.0`.
    pub effect: f32,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            offset: 0.0,
            effect: 0.5,
        }
    }
}

impl ParallaxOptions {
    /// Set the scroll offset the effect starts after.
    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the effect factor. Values outside `0.0..=1.0` are clamped.
    pub fn effect(mut self, effect: f32) -> Self {
        let clamped = if effect.is_nan() { 0.0 } else { effect.clamp(0.0, 1.0) };
        if clamped != effect {
            log::warn!("parallax effect {effect} is outside 0..=1, using {clamped}");
        }
        self.effect = clamped;
        self
    }
}

/// Configuration for a background video.
///
/// Defaults: outer wrap follows the window, minimum width of 400px, parallax
/// on with no offset and half-speed effect, context menu allowed, autoplay,
/// and the video pauses once the wrap scrolls out of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundVideoOptions {
    pub outer_wrap: OuterWrap,
    pub minimum_video_width: f32,
    pub prevent_context_menu: bool,
    pub parallax: bool,
    pub parallax_options: ParallaxOptions,
    pub pause_video_on_view_loss: bool,
    /// Start playback as soon as the video is ready.
    pub autoplay: bool,
}

impl Default for BackgroundVideoOptions {
    fn default() -> Self {
        Self {
            outer_wrap: OuterWrap::Window,
            minimum_video_width: 400.0,
            prevent_context_menu: false,
            parallax: true,
            parallax_options: ParallaxOptions::default(),
            pause_video_on_view_loss: true,
            autoplay: true,
        }
    }
}

impl BackgroundVideoOptions {
    /// Set the element the video wrap is sized to.
    pub fn outer_wrap(mut self, outer_wrap: OuterWrap) -> Self {
        self.outer_wrap = outer_wrap;
        self
    }

    /// Set the width (px) the scaled video never shrinks below.
    pub fn minimum_video_width(mut self, width: f32) -> Self {
        self.minimum_video_width = width.max(0.0);
        self
    }

    /// Swallow right clicks on the video.
    pub fn prevent_context_menu(mut self, prevent: bool) -> Self {
        self.prevent_context_menu = prevent;
        self
    }

    /// Enable or disable the parallax effect.
    pub fn parallax(mut self, parallax: bool) -> Self {
        self.parallax = parallax;
        self
    }

    pub fn parallax_options(mut self, options: ParallaxOptions) -> Self {
        self.parallax_options = options;
        self
    }

    /// Pause the video while its wrap is scrolled out of view.
    pub fn pause_video_on_view_loss(mut self, pause: bool) -> Self {
        self.pause_video_on_view_loss = pause;
        self
    }

    pub fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }
}
