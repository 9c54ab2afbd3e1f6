//! Styled surfaces and the surface registry
//!
//! A style authority never holds surfaces directly. It keeps [`SurfaceId`]s
//! and resolves them through a [`SurfaceStore`] each time it notifies, so a
//! surface can be destroyed at any moment without the authority noticing
//! until its next touch.

use slotmap::{new_key_type, SlotMap};

use crate::authority::AuthorityLink;
use crate::style::{ColorStyle, ResolvedStyle, ThemeStyle};

new_key_type! {
    /// Registry handle of a themed surface
    pub struct SurfaceId;
}

/// Style inputs carried by every themed surface
#[derive(Clone, Debug, Default)]
pub struct SurfaceStyle {
    /// Local color override; `Default` inherits
    pub color_style: ColorStyle,
    /// Local theme override; `Default` inherits
    pub theme_style: ThemeStyle,
    /// Set while the surface is edited in a visual designer
    pub design_time: bool,
    pub(crate) authority: Option<AuthorityLink>,
}

impl SurfaceStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color_style(mut self, color_style: ColorStyle) -> Self {
        self.color_style = color_style;
        self
    }

    pub fn with_theme_style(mut self, theme_style: ThemeStyle) -> Self {
        self.theme_style = theme_style;
        self
    }

    pub fn with_design_time(mut self, design_time: bool) -> Self {
        self.design_time = design_time;
        self
    }

    /// Back-reference to the owning authority, if any
    pub fn authority(&self) -> Option<&AuthorityLink> {
        self.authority.as_ref()
    }

    /// Whether the surface has a live style authority
    pub fn has_authority(&self) -> bool {
        self.authority.as_ref().is_some_and(AuthorityLink::is_alive)
    }
}

/// A themeable widget
pub trait StyledSurface {
    fn surface_style(&self) -> &SurfaceStyle;

    fn surface_style_mut(&mut self) -> &mut SurfaceStyle;

    /// Called with the freshly resolved style after an authority change
    fn style_changed(&mut self, resolved: ResolvedStyle) {
        let _ = resolved;
    }
}

/// Lookup of surfaces by id
pub trait SurfaceStore {
    /// `None` once the surface has been destroyed
    fn styled_mut(&mut self, id: SurfaceId) -> Option<&mut dyn StyledSurface>;
}

/// Owner of themed surfaces, keyed by [`SurfaceId`]
#[derive(Debug)]
pub struct SurfaceRegistry<S> {
    surfaces: SlotMap<SurfaceId, S>,
}

impl<S> SurfaceRegistry<S> {
    pub fn new() -> Self {
        Self {
            surfaces: SlotMap::with_key(),
        }
    }

    pub fn insert(&mut self, surface: S) -> SurfaceId {
        self.surfaces.insert(surface)
    }

    /// Destroy a surface. Authorities holding its id prune it on their next notify.
    pub fn remove(&mut self, id: SurfaceId) -> Option<S> {
        self.surfaces.remove(id)
    }

    pub fn get(&self, id: SurfaceId) -> Option<&S> {
        self.surfaces.get(id)
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut S> {
        self.surfaces.get_mut(id)
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.surfaces.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SurfaceId, &S)> {
        self.surfaces.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SurfaceId, &mut S)> {
        self.surfaces.iter_mut()
    }
}

impl<S> Default for SurfaceRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StyledSurface> SurfaceStore for SurfaceRegistry<S> {
    fn styled_mut(&mut self, id: SurfaceId) -> Option<&mut dyn StyledSurface> {
        self.surfaces
            .get_mut(id)
            .map(|surface| surface as &mut dyn StyledSurface)
    }
}
