//! Per-renderer configuration.

/// Which primitives are drawn anti-aliased
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AntiAliasing {
    None,
    Graphics,
    Text,
    #[default]
    All,
}

impl AntiAliasing {
    pub fn graphics(self) -> bool {
        matches!(self, AntiAliasing::Graphics | AntiAliasing::All)
    }

    pub fn text(self) -> bool {
        matches!(self, AntiAliasing::Text | AntiAliasing::All)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// Blurred shadows instead of flat offset copies
    pub soft_shadows: bool,
    pub anti_aliasing: AntiAliasing,
    /// Report drawn shapes to the hot region registry
    pub process_regions: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            soft_shadows: true,
            anti_aliasing: AntiAliasing::All,
            process_regions: false,
        }
    }
}

impl RenderSettings {
    pub fn with_soft_shadows(mut self, on: bool) -> Self {
        self.soft_shadows = on;
        self
    }

    pub fn with_anti_aliasing(mut self, mode: AntiAliasing) -> Self {
        self.anti_aliasing = mode;
        self
    }

    pub fn with_process_regions(mut self, on: bool) -> Self {
        self.process_regions = on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anti_aliasing_flags() {
        assert!(AntiAliasing::All.graphics() && AntiAliasing::All.text());
        assert!(!AntiAliasing::Text.graphics());
        assert!(!AntiAliasing::None.text());
    }
}
