use gpui::{
    App, Application, Context, Entity, IntoElement, ParentElement, Render, ScrollHandle, Styled,
    Subscription, Window, WindowOptions, div, prelude::*, px, rgb,
};
use gpui_background_video::{
    BackgroundVideoEvent, BackgroundVideoOptions, BackgroundVideoView, ParallaxOptions, Video,
    background_video,
};
use std::path::PathBuf;
use url::Url;

struct ScrollingPage {
    scroll: ScrollHandle,
    hero: Entity<BackgroundVideoView>,
    _events: Subscription,
}

impl ScrollingPage {
    fn new(scroll: ScrollHandle, hero: Entity<BackgroundVideoView>, cx: &mut Context<Self>) -> Self {
        let events = cx.subscribe(&hero, |_, _, event: &BackgroundVideoEvent, _| match event {
            BackgroundVideoEvent::Ready { width, height } => {
                log::info!("background video ready at {width}x{height}")
            }
            BackgroundVideoEvent::EndOfStream => log::info!("background video looped"),
            BackgroundVideoEvent::Error(err) => log::error!("background video failed: {err}"),
        });
        Self {
            scroll,
            hero,
            _events: events,
        }
    }
}

impl Render for ScrollingPage {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .id("page")
            .size_full()
            .bg(rgb(0x101010))
            .overflow_y_scroll()
            .track_scroll(&self.scroll)
            .child(self.hero.clone())
            .children((1..=24).map(|section| {
                div()
                    .h(px(120.0))
                    .px_4()
                    .flex()
                    .items_center()
                    .text_color(rgb(0xcccccc))
                    .child(format!("Section {section}"))
            }))
    }
}

fn main() {
    env_logger::init();
    Application::new().run(|cx: &mut App| {
        let path = std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("./assets/test.mp4"));
        let path = std::fs::canonicalize(&path).expect("video file not found");
        let uri = Url::from_file_path(&path).expect("invalid file path");

        cx.open_window(
            WindowOptions {
                focus: true,
                ..Default::default()
            },
            |_, cx| {
                let scroll = ScrollHandle::new();
                let video = Video::new(&uri).expect("failed to open video");
                let options = BackgroundVideoOptions::default()
                    .prevent_context_menu(true)
                    .parallax_options(ParallaxOptions::default().offset(0.0).effect(0.4));
                let hero = background_video("hero", video, scroll.clone(), options, cx)
                    .expect("failed to bind background video");
                cx.new(|cx| ScrollingPage::new(scroll, hero, cx))
            },
        )
        .unwrap();
        cx.activate(true);
    });
}
