//! Z-ordered asset store
//!
//! The compositor owns up to [`MAX_ASSETS`] widgets and hands out
//! [`AssetId`] handles for them. Handles come from a monotonic counter and
//! are never reused, so a handle kept after `remove` can only ever miss.

use heapless::Vec;
use monoplot_surface::Surface;

use crate::asset::{Asset, Widget};

/// Number of asset slots
pub const MAX_ASSETS: usize = 20;

/// Handle to an asset owned by a [`Compositor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AssetId(u32);

impl AssetId {
    /// Raw handle value
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Compositor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompositorError {
    /// All slots are taken
    Full,
    /// No asset with this handle
    UnknownAsset,
}

#[derive(Debug, Clone)]
struct Slot {
    id: AssetId,
    asset: Asset,
}

/// Bounded collection of assets rendered in z-index order
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    slots: Vec<Slot, MAX_ASSETS>,
    next_id: u32,
}

impl Compositor {
    /// Create an empty compositor
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
        }
    }

    /// Take ownership of an asset
    ///
    /// Fails with [`CompositorError::Full`] when every slot is taken; the
    /// asset is dropped in that case and the store is unchanged.
    pub fn add(&mut self, asset: impl Into<Asset>) -> Result<AssetId, CompositorError> {
        let id = AssetId(self.next_id);
        let slot = Slot {
            id,
            asset: asset.into(),
        };
        if self.slots.push(slot).is_err() {
            warn!("compositor full, rejected asset ({} slots)", MAX_ASSETS);
            return Err(CompositorError::Full);
        }
        self.next_id = self.next_id.wrapping_add(1);
        trace!("added asset {} ({} in use)", id.0, self.slots.len());
        Ok(id)
    }

    /// Remove an asset and hand it back
    pub fn remove(&mut self, id: AssetId) -> Result<Asset, CompositorError> {
        match self.position(id) {
            Some(index) => Ok(self.slots.remove(index).asset),
            None => {
                trace!("remove: unknown asset {}", id.0);
                Err(CompositorError::UnknownAsset)
            }
        }
    }

    /// Borrow an asset by handle
    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.slots.iter().find(|s| s.id == id).map(|s| &s.asset)
    }

    /// Mutably borrow an asset by handle
    pub fn get_mut(&mut self, id: AssetId) -> Option<&mut Asset> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| &mut s.asset)
    }

    /// Check if a handle refers to a live asset
    pub fn contains(&self, id: AssetId) -> bool {
        self.position(id).is_some()
    }

    /// Drop every asset
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        MAX_ASSETS
    }

    /// Iterate over assets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (AssetId, &Asset)> {
        self.slots.iter().map(|s| (s.id, &s.asset))
    }

    /// Handles in the order `render_all` draws them
    ///
    /// Ascending z-index; equal z-indices keep insertion order. Hidden
    /// assets are included.
    pub fn draw_order(&self) -> Vec<AssetId, MAX_ASSETS> {
        let mut order: Vec<(i16, usize), MAX_ASSETS> = self
            .slots
            .iter()
            .enumerate()
            .map(|(index, s)| (s.asset.z_index(), index))
            .collect();
        order.sort_unstable();
        order.iter().map(|&(_, index)| self.slots[index].id).collect()
    }

    /// Draw every visible asset, lowest z-index first
    pub fn render_all<S: Surface>(&mut self, surface: &mut S) {
        for id in self.draw_order() {
            if let Some(index) = self.position(id) {
                let asset = &mut self.slots[index].asset;
                if asset.is_visible() {
                    trace!("render asset {} z={}", id.0, asset.z_index());
                    asset.draw(surface);
                }
            }
        }
    }

    fn position(&self, id: AssetId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }
}
