//! One pass over the page's marked elements.
//!
//! The page shell supplies the candidates lazily and the outcome of the
//! rendering-library check; everything that decides whether an instance is
//! created lives here.

use log::{debug, error, warn};

use crate::config::{self, GlassConfig};
use crate::error::{GlassError, GlassResult};
use crate::registry::{EffectHandle, EffectRegistry, Init};
use crate::surface::{Surface, SurfaceFactory, SurfaceSize};

/// A marked element as seen at scan time.
pub struct Candidate<K> {
    pub target: K,
    /// Raw marker attribute value.
    pub marker: Option<String>,
    pub size: SurfaceSize,
    pub config: GlassConfig,
}

/// Initialize every enabled candidate that has no instance yet.
///
/// When `factory` is an error the library is unavailable: the scan is
/// abandoned before a single candidate is pulled. Returns the instances
/// created by this pass, in document order.
pub fn scan<K, S, F, I>(
    registry: &mut EffectRegistry<K, S>,
    factory: GlassResult<F>,
    candidates: I,
) -> Vec<(K, EffectHandle<S>)>
where
    K: PartialEq + Clone,
    S: Surface,
    F: SurfaceFactory<Target = K, Surface = S>,
    I: IntoIterator<Item = Candidate<K>>,
{
    let factory = match factory {
        Ok(factory) => factory,
        Err(e) => {
            warn!("{e}; glass effect disabled");
            return Vec::new();
        }
    };

    let mut created = Vec::new();
    for candidate in candidates {
        if !config::is_enabled(candidate.marker.as_deref()) {
            continue;
        }
        match registry.init(&factory, &candidate.target, candidate.size, &candidate.config) {
            Ok(Init::Created(handle)) => created.push((candidate.target, handle)),
            Ok(Init::Existing) => debug!("glass already initialized, skipping"),
            // Already reported by the registry.
            Err(GlassError::TooSmall { .. }) => {}
            Err(e) => error!("glass init failed: {e}"),
        }
    }
    created
}
