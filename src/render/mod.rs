//! Shape rendering for chart primitives
//!
//! This module is organized into submodules:
//! - `defaults`: tuning constants
//! - `settings`: anti-aliasing, shadow softness, region processing
//! - `guard`: scoped transform / clip / anti-alias state
//! - `shadow`: shadow colours and paints
//! - `rect`: rectangles and bar finishes
//! - `circle`: ellipses, polygons and the 3D circle
//! - `pie`: pie and doughnut sectors with edge effects
//! - `marker`: point markers
//! - `line`: lines with offset shadows

pub mod circle;
pub mod defaults;
pub mod guard;
pub mod line;
pub mod marker;
pub mod pie;
pub mod rect;
pub mod settings;
pub mod shadow;

pub use circle::CircleSpec;
pub use guard::{AntiAliasGuard, ClipGuard, TransformGuard};
pub use line::LineSpec;
pub use marker::{MarkerDescriptor, MarkerStyle};
pub use pie::{PieEdge, PieSpec};
pub use rect::{BarFinish, RectangleSpec};
pub use settings::{AntiAliasing, RenderSettings};
pub use shadow::ShadowPass;

use crate::canvas::{Canvas, HotRegionRegistry, ImageLoader, NoImages, Path, RegionMetadata};
use crate::coords::{CanvasSize, CoordinateSpace};
use crate::errors::Result;
use crate::log::debug;
use crate::style::{ShadowDescriptor, StyleResolver};

/// One render pass over one canvas.
///
/// Owns the canvas, the coordinate space derived from its size, the style
/// resolver and the optional hot region registry. Every drawing method leaves
/// the canvas transform, clip and anti-aliasing mode as it found them.
pub struct ChartRenderer<C: Canvas> {
    pub(crate) canvas: C,
    pub(crate) space: CoordinateSpace,
    pub(crate) settings: RenderSettings,
    pub(crate) resolver: StyleResolver,
    regions: Option<Box<dyn HotRegionRegistry>>,
}

impl<C: Canvas> ChartRenderer<C> {
    pub fn new(canvas: C) -> Result<Self> {
        Self::with_image_loader(canvas, Box::new(NoImages))
    }

    pub fn with_image_loader(mut canvas: C, loader: Box<dyn ImageLoader>) -> Result<Self> {
        let size = canvas.size();
        let space = CoordinateSpace::new(CanvasSize::new(
            size.width.0.max(0.0) as u32,
            size.height.0.max(0.0) as u32,
        ))?;
        let settings = RenderSettings::default();
        canvas.set_anti_alias(settings.anti_aliasing.graphics());
        debug!(width = size.width.0, height = size.height.0, "renderer ready");
        Ok(ChartRenderer {
            canvas,
            space,
            settings,
            resolver: StyleResolver::new(loader, size),
            regions: None,
        })
    }

    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self.canvas.set_anti_alias(settings.anti_aliasing.graphics());
        self
    }

    pub fn with_regions(mut self, registry: Box<dyn HotRegionRegistry>) -> Self {
        self.regions = Some(registry);
        self
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn space(&self) -> &CoordinateSpace {
        &self.space
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    pub fn resolver_mut(&mut self) -> &mut StyleResolver {
        &mut self.resolver
    }

    /// Shadow to draw for a descriptor under the current settings
    pub(crate) fn shadow_pass(
        &self,
        shadow: &ShadowDescriptor,
        fill_alpha: u8,
    ) -> Option<ShadowPass> {
        let color = shadow.visible_color()?;
        Some(ShadowPass {
            offset: shadow.offset,
            color,
            soft: self.settings.soft_shadows,
            fill_alpha,
        })
    }

    /// Hand a drawn outline to the registry, mapped by the current transform
    pub(crate) fn report_region(&mut self, outline: &Path, metadata: Option<&RegionMetadata>) {
        if !self.settings.process_regions {
            return;
        }
        let (Some(registry), Some(metadata)) = (self.regions.as_mut(), metadata) else {
            return;
        };
        registry.add_region(&outline.transformed(self.canvas.transform()), metadata);
    }
}
