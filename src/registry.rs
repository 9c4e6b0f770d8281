//! Owns every effect instance, keyed by target identity.
//!
//! Replaces tagging elements with an "already initialized" flag: a target is
//! initialized at most once, and the registry is the only place that knows.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};

use crate::config::GlassConfig;
use crate::effect::EffectInstance;
use crate::error::{GlassError, GlassResult};
use crate::lookup::LookupTexture;
use crate::surface::{SurfaceFactory, SurfaceSize};

/// Shared with the animation and resize callbacks.
pub type EffectHandle<S> = Rc<RefCell<EffectInstance<S>>>;

pub enum Init<S> {
    Created(EffectHandle<S>),
    /// The target already had an instance; nothing was touched.
    Existing,
}

impl<S> Init<S> {
    pub fn created(self) -> Option<EffectHandle<S>> {
        match self {
            Init::Created(handle) => Some(handle),
            Init::Existing => None,
        }
    }
}

pub struct EffectRegistry<K, S> {
    entries: Vec<(K, EffectHandle<S>)>,
}

impl<K, S> Default for EffectRegistry<K, S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K, S> EffectRegistry<K, S>
where
    K: PartialEq + Clone,
    S: crate::surface::Surface,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an instance for `target` unless it already has one.
    ///
    /// Targets smaller than the minimum size yield [`GlassError::TooSmall`]
    /// and are not registered, so a later call may pick them up once laid out.
    pub fn init<F>(
        &mut self,
        factory: &F,
        target: &K,
        size: SurfaceSize,
        config: &GlassConfig,
    ) -> GlassResult<Init<S>>
    where
        F: SurfaceFactory<Target = K, Surface = S>,
    {
        if self.contains(target) {
            return Ok(Init::Existing);
        }
        if !size.is_renderable() {
            warn!(
                "element has no size ({}x{}); give it a height or min-height",
                size.width, size.height
            );
            return Err(GlassError::TooSmall {
                width: size.width,
                height: size.height,
            });
        }

        let lookup = LookupTexture::new(config.columns);
        let surface = factory.create(target, size, config, &lookup)?;
        let handle = Rc::new(RefCell::new(EffectInstance::new(surface, config, lookup)));
        self.entries.push((target.clone(), Rc::clone(&handle)));
        info!(
            "glass initialized ({}x{}, {} columns, {} mode)",
            size.width,
            size.height,
            handle.borrow().lookup().columns(),
            config.mode.id()
        );
        Ok(Init::Created(handle))
    }

    pub fn contains(&self, target: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == target)
    }

    pub fn get(&self, target: &K) -> Option<EffectHandle<S>> {
        self.entries
            .iter()
            .find(|(k, _)| k == target)
            .map(|(_, handle)| Rc::clone(handle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
