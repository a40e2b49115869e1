//! The viewer controller: dataset, pager and render bookkeeping.
//!
//! Rendering is split in two steps so the front ends can await descriptor
//! loads without holding a borrow of the viewer:
//!
//! 1. [`Viewer::render_request`] snapshots what to draw and the current generation
//! 2. [`RenderRequest::load_descriptors`] awaits the descriptor files
//! 3. the caller checks [`Viewer::is_current`] and, if the viewer hasn't moved on,
//!    draws [`Viewer::view_model`]
//!
//! Every dispatched action bumps the generation, so a slow response that
//! resolves after the user navigated away is dropped instead of painted.

use std::rc::Rc;

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Pager, ViewerAction};
use crate::config::ViewerConfig;
use crate::data::{DataSource, DescriptorLoader, Manifests};
use crate::model::{ClassMap, ImageEntry};
use crate::render::{DescriptorView, ViewModel};

/// Snapshot of the image to draw, taken before descriptors are loaded.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Generation the viewer had when the request was made
    pub generation: u64,
    /// Image to draw
    pub entry: ImageEntry,
    /// Class map for the sibling lookup
    pub classes: Rc<ClassMap>,
    /// Whether to load sibling-class descriptors
    pub with_class_descriptors: bool,
}

impl RenderRequest {
    /// Load the descriptor lists this request needs.
    pub async fn load_descriptors<S: DataSource>(
        &self,
        loader: &DescriptorLoader<S>,
    ) -> DescriptorView {
        let own = loader.load(&self.entry.species).await;
        let class_only = if self.with_class_descriptors {
            Some(
                loader
                    .class_descriptors(&self.classes, &self.entry, &own)
                    .await,
            )
        } else {
            None
        };
        DescriptorView { own, class_only }
    }
}

/// Owns the loaded dataset and the navigation state.
///
/// All state changes go through [`Viewer::dispatch`].
#[derive(Debug)]
pub struct Viewer {
    images: Vec<ImageEntry>,
    classes: Rc<ClassMap>,
    pager: Pager,
    generation: u64,
    image_base_url: String,
    show_class_descriptors: bool,
    shuffle_enabled: bool,
}

impl Viewer {
    /// Create a viewer over loaded manifests.
    pub fn new(manifests: Manifests, config: &ViewerConfig) -> Self {
        let pager = Pager::new(manifests.images.len());
        Self {
            images: manifests.images,
            classes: Rc::new(manifests.classes),
            pager,
            generation: 0,
            image_base_url: config.image_base_url.clone(),
            show_class_descriptors: config.show_class_descriptors,
            shuffle_enabled: config.shuffle_enabled,
        }
    }

    /// Images in display order.
    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    /// Navigation state.
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Image on screen, if any.
    pub fn current(&self) -> Option<&ImageEntry> {
        self.images.get(self.pager.index())
    }

    /// Whether a render started at `generation` still matches the state.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Apply an action. Returns the new generation.
    pub fn dispatch(&mut self, action: ViewerAction) -> u64 {
        self.dispatch_with_rng(action, &mut rand::thread_rng())
    }

    /// Apply an action using `rng` for shuffling.
    pub fn dispatch_with_rng<R: Rng + ?Sized>(&mut self, action: ViewerAction, rng: &mut R) -> u64 {
        match action {
            ViewerAction::Next => self.pager.next(),
            ViewerAction::Previous => self.pager.prev(),
            ViewerAction::Jump(index) => self.pager.jump(index),
            ViewerAction::JumpSlot(slot) => match self.pager.slot_index(slot) {
                Some(index) => self.pager.jump(index),
                None => log::debug!("No jump button in slot {}", slot + 1),
            },
            ViewerAction::AdvancePage => self.pager.advance_page(),
            ViewerAction::Shuffle => {
                if self.shuffle_enabled {
                    self.images.shuffle(rng);
                    self.pager.reset();
                    log::info!("Shuffled {} images", self.images.len());
                } else {
                    log::debug!("Shuffle is disabled");
                }
            }
        }

        self.generation = self.generation.wrapping_add(1);
        log::debug!("{:?} -> image {}", action, self.pager.progress());
        self.generation
    }

    /// What to draw next. None when there are no images.
    pub fn render_request(&self) -> Option<RenderRequest> {
        let entry = self.current()?;
        Some(RenderRequest {
            generation: self.generation,
            entry: entry.clone(),
            classes: Rc::clone(&self.classes),
            with_class_descriptors: self.show_class_descriptors,
        })
    }

    /// View model for the current image with the given descriptors.
    pub fn view_model(&self, descriptors: &DescriptorView) -> Option<ViewModel> {
        let entry = self.current()?;
        Some(ViewModel::build(
            entry,
            &self.pager,
            descriptors,
            &self.image_base_url,
            self.shuffle_enabled,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NO_DESCRIPTORS;
    use crate::data::MemorySource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn manifests(count: usize) -> Manifests {
        let images = (0..count)
            .map(|i| ImageEntry::new(format!("img/{}.jpg", i), format!("species_{}", i % 3)))
            .collect();
        let mut classes = ClassMap::new();
        classes.insert(
            "0",
            vec!["species_0".into(), "species_1".into(), "species_2".into()],
        );
        Manifests { images, classes }
    }

    fn viewer(count: usize) -> Viewer {
        Viewer::new(manifests(count), &ViewerConfig::default())
    }

    #[test]
    fn test_dispatch_bumps_generation() {
        let mut viewer = viewer(3);
        let request = viewer.render_request().unwrap();
        assert!(viewer.is_current(request.generation));

        let generation = viewer.dispatch(ViewerAction::Next);
        assert!(!viewer.is_current(request.generation));
        assert!(viewer.is_current(generation));
        assert_eq!(viewer.current().unwrap().image_path, "img/1.jpg");
    }

    #[test]
    fn test_ten_nexts_over_ten_images() {
        let mut viewer = viewer(10);
        for _ in 0..10 {
            viewer.dispatch(ViewerAction::Next);
        }
        assert_eq!(viewer.pager().index(), 0);
    }

    #[test]
    fn test_jump_slot_past_end_is_ignored() {
        let mut viewer = viewer(4);
        viewer.dispatch(ViewerAction::Jump(2));
        viewer.dispatch(ViewerAction::JumpSlot(6));
        assert_eq!(viewer.pager().index(), 2);
        viewer.dispatch(ViewerAction::JumpSlot(0));
        assert_eq!(viewer.pager().index(), 0);
    }

    #[test]
    fn test_shuffle_disabled_by_default() {
        let mut viewer = viewer(5);
        viewer.dispatch(ViewerAction::Jump(3));
        viewer.dispatch(ViewerAction::Shuffle);
        assert_eq!(viewer.pager().index(), 3);
        assert_eq!(viewer.images()[0].image_path, "img/0.jpg");
    }

    #[test]
    fn test_shuffle_permutes_and_resets() {
        let config = ViewerConfig {
            shuffle_enabled: true,
            ..ViewerConfig::default()
        };
        let mut viewer = Viewer::new(manifests(30), &config);
        viewer.dispatch(ViewerAction::Jump(20));

        let mut rng = StdRng::seed_from_u64(7);
        viewer.dispatch_with_rng(ViewerAction::Shuffle, &mut rng);
        assert_eq!(viewer.pager().index(), 0);
        assert_eq!(viewer.pager().page(), 0);

        let mut paths: Vec<String> = viewer.images().iter().map(|e| e.image_path.clone()).collect();
        let original: Vec<String> = manifests(30).images.into_iter().map(|e| e.image_path).collect();
        assert_ne!(paths, original);
        paths.sort();
        let mut sorted_original = original;
        sorted_original.sort();
        assert_eq!(paths, sorted_original);
    }

    #[test]
    fn test_empty_dataset_renders_nothing() {
        let mut viewer = viewer(0);
        viewer.dispatch(ViewerAction::Next);
        assert_eq!(viewer.pager().index(), 0);
        assert!(viewer.render_request().is_none());
        assert!(viewer.view_model(&DescriptorView::default()).is_none());
    }

    #[test]
    fn test_render_pipeline() {
        let source = MemorySource::new()
            .with_file("data/descriptors/species_0.json", r#"{"attributes": ["x"]}"#)
            .with_file("data/descriptors/species_1.json", r#"["x", "y"]"#);
        let loader = DescriptorLoader::new(source, "data/descriptors");
        let viewer = viewer(4);

        let request = viewer.render_request().unwrap();
        let descriptors = pollster::block_on(request.load_descriptors(&loader));
        assert_eq!(descriptors.own, ["x"]);
        assert_eq!(descriptors.class_only.as_deref(), Some(&["y".to_string()][..]));

        let vm = viewer.view_model(&descriptors).unwrap();
        assert_eq!(vm.meta, "1 / 4: species 0");
        assert_eq!(vm.class_rows.unwrap(), ["y"]);
    }

    #[test]
    fn test_class_descriptors_disabled() {
        let config = ViewerConfig {
            show_class_descriptors: false,
            ..ViewerConfig::default()
        };
        let viewer = Viewer::new(manifests(2), &config);
        let loader = DescriptorLoader::new(MemorySource::new(), "data/descriptors");

        let request = viewer.render_request().unwrap();
        let descriptors = pollster::block_on(request.load_descriptors(&loader));
        assert!(descriptors.class_only.is_none());
        assert_eq!(loader.cached_count(), 1);

        let vm = viewer.view_model(&descriptors).unwrap();
        assert_eq!(vm.descriptor_rows, [NO_DESCRIPTORS]);
        assert!(vm.class_rows.is_none());
    }

    #[test]
    fn test_stale_render_is_detected() {
        let loader = DescriptorLoader::new(MemorySource::new(), "data/descriptors");
        let mut viewer = viewer(3);

        let stale = viewer.render_request().unwrap();
        viewer.dispatch(ViewerAction::Next);
        let fresh = viewer.render_request().unwrap();

        pollster::block_on(stale.load_descriptors(&loader));
        assert!(!viewer.is_current(stale.generation));
        assert!(viewer.is_current(fresh.generation));
        assert_eq!(fresh.entry.image_path, "img/1.jpg");
    }
}
