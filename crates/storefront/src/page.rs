//! The page the widgets render into.
//!
//! A `Page` is the set of named regions a given page layout carries. Each
//! page only mounts the regions it has markup for; writes to an unmounted
//! region are dropped, which is how renderers stay silent on pages that do
//! not show them.

use std::collections::BTreeMap;

/// Named regions of the storefront markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Header badge showing the number of items in the cart.
    CartCount,
    /// Product gallery container.
    Gallery,
    /// Cart line items on the checkout page.
    CartItems,
    /// Cart total text on the checkout page.
    TotalPrice,
    /// Carousel slide track; its content is the track transform.
    Slides,
}

impl Region {
    /// Markup selector the region corresponds to.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::CartCount => "#cart-count",
            Self::Gallery => ".product-gallery",
            Self::CartItems => "#cart-items",
            Self::TotalPrice => "#total-price",
            Self::Slides => ".slides-container",
        }
    }
}

/// What changed in application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Catalog,
    Cart,
}

/// Mounted regions and their current contents.
#[derive(Debug, Clone, Default)]
pub struct Page {
    regions: BTreeMap<Region, String>,
    slide_count: usize,
}

impl Page {
    /// A page with no regions mounted.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Product page: header count, gallery and a carousel of `slides` slides.
    #[must_use]
    pub fn index(slides: usize) -> Self {
        Self::blank()
            .with_region(Region::CartCount)
            .with_region(Region::Gallery)
            .with_slides(slides)
    }

    /// Upload page: header count only.
    #[must_use]
    pub fn upload() -> Self {
        Self::blank().with_region(Region::CartCount)
    }

    /// Checkout page: header count, cart items and total.
    #[must_use]
    pub fn checkout() -> Self {
        Self::blank()
            .with_region(Region::CartCount)
            .with_region(Region::CartItems)
            .with_region(Region::TotalPrice)
    }

    /// Mount an empty region.
    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.entry(region).or_default();
        self
    }

    /// Mount the slide track with `count` slides.
    #[must_use]
    pub fn with_slides(mut self, count: usize) -> Self {
        self.slide_count = count;
        self.with_region(Region::Slides)
    }

    #[must_use]
    pub fn is_mounted(&self, region: Region) -> bool {
        self.regions.contains_key(&region)
    }

    /// Current contents of a mounted region.
    #[must_use]
    pub fn text(&self, region: Region) -> Option<&str> {
        self.regions.get(&region).map(String::as_str)
    }

    /// Replace a region's contents. Returns `false` if it is not mounted.
    pub fn set(&mut self, region: Region, content: String) -> bool {
        match self.regions.get_mut(&region) {
            Some(slot) => {
                *slot = content;
                true
            }
            None => false,
        }
    }

    /// Number of slides in the slide track, `None` if the page has no track.
    #[must_use]
    pub fn slide_count(&self) -> Option<usize> {
        self.is_mounted(Region::Slides).then_some(self.slide_count)
    }
}
