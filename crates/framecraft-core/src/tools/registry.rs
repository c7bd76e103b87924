//! Tool registry: resolves tool ids to actions and owns the creation tools.

use super::{
    DYNAMIC_BACKGROUND_TOOL, DynamicBackgroundTool, Tool, ToolError, WEB_CONTAINER_TOOL,
    WebContainerTool,
};
use crate::editor::modes;
use crate::settings::Settings;
use crate::shapes::BackgroundType;
use serde::Serialize;

/// Tool id of the image insertion button.
pub const IMAGE_TOOL: &str = "image";

/// Separator between a tool id and a variant name.
const VARIANT_SEPARATOR: char = ':';

/// Toolbar icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    MousePointer,
    Hand,
    Type,
    Image,
    Globe,
    Sparkles,
    Waves,
    Flame,
    Grain,
}

/// One toolbar button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolEntry {
    pub id: String,
    pub label: String,
    pub icon: Icon,
    pub shortcut: Option<char>,
}

impl ToolEntry {
    fn new(id: impl Into<String>, label: impl Into<String>, icon: Icon, shortcut: Option<char>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon,
            shortcut,
        }
    }
}

/// A tool with a dropdown of variants, each addressed as `tool:variant`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantGroup {
    pub entry: ToolEntry,
    pub variants: Vec<ToolEntry>,
}

/// Toolbar data, grouped the way the toolbar lays it out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCatalogue {
    pub basic: Vec<ToolEntry>,
    pub media: Vec<ToolEntry>,
    pub custom: Vec<ToolEntry>,
    pub multi_variant: Vec<VariantGroup>,
}

impl ToolCatalogue {
    fn new() -> Self {
        let variants = BackgroundType::ALL
            .iter()
            .map(|t| {
                let icon = match t {
                    BackgroundType::GradientFlow => Icon::Waves,
                    BackgroundType::Heatmap => Icon::Flame,
                    BackgroundType::GrainGradient => Icon::Grain,
                };
                ToolEntry::new(
                    format!("{DYNAMIC_BACKGROUND_TOOL}{VARIANT_SEPARATOR}{}", t.as_str()),
                    t.label(),
                    icon,
                    None,
                )
            })
            .collect();

        Self {
            basic: vec![
                ToolEntry::new(modes::SELECT, "Select", Icon::MousePointer, Some('v')),
                ToolEntry::new(modes::HAND, "Hand", Icon::Hand, Some('h')),
                ToolEntry::new(modes::TEXT, "Text", Icon::Type, Some('t')),
            ],
            media: vec![ToolEntry::new(IMAGE_TOOL, "Image", Icon::Image, Some('i'))],
            custom: vec![ToolEntry::new(
                WEB_CONTAINER_TOOL,
                "Web Container",
                Icon::Globe,
                Some('w'),
            )],
            multi_variant: vec![VariantGroup {
                entry: ToolEntry::new(
                    DYNAMIC_BACKGROUND_TOOL,
                    "Dynamic Background",
                    Icon::Sparkles,
                    Some('b'),
                ),
                variants,
            }],
        }
    }

    /// All entries, including variants, in toolbar order.
    pub fn entries(&self) -> impl Iterator<Item = &ToolEntry> {
        self.basic
            .iter()
            .chain(&self.media)
            .chain(&self.custom)
            .chain(
                self.multi_variant
                    .iter()
                    .flat_map(|g| std::iter::once(&g.entry).chain(&g.variants)),
            )
    }

    /// Entry bound to a keyboard shortcut.
    pub fn by_shortcut(&self, key: char) -> Option<&ToolEntry> {
        let key = key.to_ascii_lowercase();
        self.entries().find(|e| e.shortcut == Some(key))
    }
}

/// Side-channel actions that bypass the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideAction {
    /// Open the host's media picker.
    InsertMedia,
}

/// Outcome of a tool switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    /// A mode the host engine implements itself.
    Builtin(&'static str),
    /// A registered creation tool.
    Creation(&'static str),
    SideChannel(SideAction),
}

/// Owns the creation tools and maps toolbar ids to them.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    catalogue: ToolCatalogue,
}

impl ToolRegistry {
    /// Registry with every creation tool, configured from `settings`.
    pub fn new(settings: &Settings) -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(WebContainerTool::new(settings.web_container_factory())));
        registry.register(Box::new(DynamicBackgroundTool::new(
            settings.dynamic_background_factory(),
        )));
        registry
    }

    /// Registry with no creation tools.
    pub fn empty() -> Self {
        Self {
            tools: Vec::new(),
            catalogue: ToolCatalogue::new(),
        }
    }

    /// Add a tool, replacing any tool with the same id.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let id = tool.id();
        if let Some(slot) = self.tools.iter_mut().find(|t| t.id() == id) {
            log::debug!("replacing tool {id}");
            *slot = tool;
        } else {
            self.tools.push(tool);
        }
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.tools.iter().any(|t| t.id() == id)
    }

    pub fn tool(&self, id: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.id() == id).map(|t| t.as_ref())
    }

    pub fn tool_mut(&mut self, id: &str) -> Option<&mut (dyn Tool + 'static)> {
        self.tools.iter_mut().find(|t| t.id() == id).map(|t| t.as_mut())
    }

    pub fn catalogue(&self) -> &ToolCatalogue {
        &self.catalogue
    }

    /// Resolve a toolbar id.
    ///
    /// `tool:variant` ids select the variant before activating the tool.
    /// Unknown ids leave everything untouched.
    pub fn switch_to_tool(&mut self, id: &str) -> Result<ToolAction, ToolError> {
        if let Some(mode) = modes::BUILTIN.iter().copied().find(|m| *m == id) {
            return Ok(ToolAction::Builtin(mode));
        }
        if id == IMAGE_TOOL {
            return Ok(ToolAction::SideChannel(SideAction::InsertMedia));
        }

        let (tool_id, variant) = match id.split_once(VARIANT_SEPARATOR) {
            Some((tool_id, variant)) => (tool_id, Some(variant)),
            None => (id, None),
        };
        let Some(tool) = self.tool_mut(tool_id) else {
            log::warn!("unknown tool id: {id}");
            return Err(ToolError::UnknownTool(id.to_string()));
        };
        if let Some(variant) = variant {
            if !tool.select_variant(variant) {
                log::warn!("tool {tool_id} has no variant {variant}");
                return Err(ToolError::UnknownVariant {
                    tool: tool_id.to_string(),
                    variant: variant.to_string(),
                });
            }
        }
        Ok(ToolAction::Creation(tool.id()))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::editor::Editor;
    use crate::shapes::DynamicBackgroundProps;
    use kurbo::Point;

    #[test]
    fn test_builtin_modes() {
        let mut registry = ToolRegistry::default();
        assert_eq!(registry.switch_to_tool("select"), Ok(ToolAction::Builtin(modes::SELECT)));
        assert_eq!(registry.switch_to_tool("hand"), Ok(ToolAction::Builtin(modes::HAND)));
        assert_eq!(registry.switch_to_tool("text"), Ok(ToolAction::Builtin(modes::TEXT)));
    }

    #[test]
    fn test_creation_tools() {
        let mut registry = ToolRegistry::default();
        assert_eq!(
            registry.switch_to_tool(WEB_CONTAINER_TOOL),
            Ok(ToolAction::Creation(WEB_CONTAINER_TOOL))
        );
        assert_eq!(
            registry.switch_to_tool(DYNAMIC_BACKGROUND_TOOL),
            Ok(ToolAction::Creation(DYNAMIC_BACKGROUND_TOOL))
        );
    }

    #[test]
    fn test_image_is_side_channel() {
        let mut registry = ToolRegistry::default();
        assert_eq!(
            registry.switch_to_tool(IMAGE_TOOL),
            Ok(ToolAction::SideChannel(SideAction::InsertMedia))
        );
        assert!(!registry.is_registered(IMAGE_TOOL));
    }

    #[test]
    fn test_unknown_tool() {
        let mut registry = ToolRegistry::default();
        assert_eq!(
            registry.switch_to_tool("lasso"),
            Err(ToolError::UnknownTool("lasso".to_string()))
        );
        assert_eq!(
            registry.switch_to_tool("lasso:wide"),
            Err(ToolError::UnknownTool("lasso:wide".to_string()))
        );
    }

    #[test]
    fn test_variant_selection_affects_created_shape() {
        let mut registry = ToolRegistry::default();
        assert_eq!(
            registry.switch_to_tool("dynamic-background:heatmap"),
            Ok(ToolAction::Creation(DYNAMIC_BACKGROUND_TOOL))
        );

        let mut canvas = Canvas::new();
        canvas.set_active_mode(DYNAMIC_BACKGROUND_TOOL);
        let tool = registry.tool_mut(DYNAMIC_BACKGROUND_TOOL).unwrap();
        tool.on_click(&mut canvas, Point::new(0.0, 0.0));

        let background_type = canvas
            .document
            .committed()
            .next()
            .and_then(|s| s.props.as_dynamic_background())
            .map(DynamicBackgroundProps::background_type);
        assert_eq!(background_type, Some(BackgroundType::Heatmap));
    }

    #[test]
    fn test_unknown_variant() {
        let mut registry = ToolRegistry::default();
        assert_eq!(
            registry.switch_to_tool("dynamic-background:plasma"),
            Err(ToolError::UnknownVariant {
                tool: DYNAMIC_BACKGROUND_TOOL.to_string(),
                variant: "plasma".to_string(),
            })
        );
        assert_eq!(
            registry.switch_to_tool("web-container:wide"),
            Err(ToolError::UnknownVariant {
                tool: WEB_CONTAINER_TOOL.to_string(),
                variant: "wide".to_string(),
            })
        );
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = ToolRegistry::empty();
        assert!(!registry.is_registered(WEB_CONTAINER_TOOL));
        registry.register(Box::new(WebContainerTool::new(Default::default())));
        registry.register(Box::new(WebContainerTool::new(Default::default())));
        assert!(registry.is_registered(WEB_CONTAINER_TOOL));
        assert_eq!(registry.tools.len(), 1);
    }

    #[test]
    fn test_catalogue_groups() {
        let registry = ToolRegistry::default();
        let catalogue = registry.catalogue();
        let ids: Vec<&str> = catalogue.basic.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["select", "hand", "text"]);
        assert_eq!(catalogue.media[0].id, IMAGE_TOOL);
        assert_eq!(catalogue.custom[0].id, WEB_CONTAINER_TOOL);

        let group = &catalogue.multi_variant[0];
        assert_eq!(group.entry.id, DYNAMIC_BACKGROUND_TOOL);
        let variants: Vec<&str> = group.variants.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            variants,
            [
                "dynamic-background:gradient-flow",
                "dynamic-background:heatmap",
                "dynamic-background:grain-gradient",
            ]
        );
    }

    #[test]
    fn test_every_catalogue_id_resolves() {
        let mut registry = ToolRegistry::default();
        let ids: Vec<String> = registry.catalogue().entries().map(|e| e.id.clone()).collect();
        for id in ids {
            assert!(registry.switch_to_tool(&id).is_ok(), "{id} did not resolve");
        }
    }

    #[test]
    fn test_shortcuts() {
        let registry = ToolRegistry::default();
        let catalogue = registry.catalogue();
        assert_eq!(catalogue.by_shortcut('W').unwrap().id, WEB_CONTAINER_TOOL);
        assert_eq!(catalogue.by_shortcut('v').unwrap().id, modes::SELECT);
        assert!(catalogue.by_shortcut('z').is_none());
    }

    #[test]
    fn test_catalogue_serializes() {
        let json = serde_json::to_value(ToolRegistry::default().catalogue()).unwrap();
        assert_eq!(json["custom"][0]["icon"], "globe");
        assert_eq!(json["basic"][0]["shortcut"], "v");
    }
}
