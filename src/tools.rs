use crate::color::Color;
use serde::{Deserialize, Serialize};

/// The drawing tools the host UI can select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Fill,
    Eyedropper,
}

impl Tool {
    /// Return the name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pencil => "pencil",
            Tool::Eraser => "eraser",
            Tool::Fill => "fill",
            Tool::Eyedropper => "eyedropper",
        }
    }

    /// Looks a tool up by the name the host UI uses.
    pub fn from_name(name: &str) -> Option<Tool> {
        match name {
            "pencil" => Some(Tool::Pencil),
            "eraser" => Some(Tool::Eraser),
            "fill" => Some(Tool::Fill),
            "eyedropper" => Some(Tool::Eyedropper),
            _ => None,
        }
    }
}

/// Tool selection passed explicitly into the drawing engine, so the engine
/// stays free of ambient UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolState {
    pub tool: Tool,
    pub color: Color,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            color: Color::BLACK,
        }
    }
}
