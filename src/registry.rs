use crate::Error;
use crate::options::BackgroundVideoOptions;
use crate::video::Video;
use crate::view::BackgroundVideoView;
use gpui::{App, AppContext, ElementId, Entity, Global, ScrollHandle, WeakEntity};
use std::collections::HashMap;

/// Views bound so far, keyed by element id, so an element is never bound twice.
#[derive(Default)]
pub struct BackgroundVideoRegistry {
    views: HashMap<ElementId, WeakEntity<BackgroundVideoView>>,
}

impl Global for BackgroundVideoRegistry {}

impl BackgroundVideoRegistry {
    pub fn get(&self, id: &ElementId) -> Option<Entity<BackgroundVideoView>> {
        self.views.get(id).and_then(WeakEntity::upgrade)
    }

    fn insert(&mut self, id: ElementId, view: &Entity<BackgroundVideoView>) {
        self.views.retain(|_, view| view.upgrade().is_some());
        self.views.insert(id, view.downgrade());
    }
}

/// Bind `video` as the background video of element `id`.
///
/// Calling this again for an id that is still alive returns the existing view
/// and drops `video` and `options`.
pub fn background_video(
    id: impl Into<ElementId>,
    video: Video,
    page_scroll: ScrollHandle,
    options: BackgroundVideoOptions,
    cx: &mut App,
) -> Result<Entity<BackgroundVideoView>, Error> {
    let id = id.into();
    if let Some(existing) = cx.default_global::<BackgroundVideoRegistry>().get(&id) {
        log::debug!("background video {id:?} already bound");
        return Ok(existing);
    }

    let view = BackgroundVideoView::new(id.clone(), video, page_scroll, options)?;
    let entity = cx.new(|_| view);
    cx.default_global::<BackgroundVideoRegistry>()
        .insert(id, &entity);
    Ok(entity)
}
