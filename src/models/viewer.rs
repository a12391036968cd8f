use grayscale_core::{Authorizer, SurfaceKind};
use serde::Serialize;

/// Request header carrying the viewer's role, set by the fronting host
pub const VIEWER_ROLE_HEADER: &str = "X-Viewer-Role";

/// Role of whoever is looking at the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
    #[default]
    Visitor,
    Editor,
    Administrator,
}

impl ViewerRole {
    /// Parse a role name; unknown names are treated as plain visitors.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "administrator" | "admin" => ViewerRole::Administrator,
            "editor" => ViewerRole::Editor,
            _ => ViewerRole::Visitor,
        }
    }
}

/// The viewer of one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewer {
    pub role: ViewerRole,
}

impl Viewer {
    pub fn visitor() -> Self {
        Self::default()
    }

    pub fn administrator() -> Self {
        Self {
            role: ViewerRole::Administrator,
        }
    }

    /// Build from the role header, if present
    pub fn from_role(role: Option<&str>) -> Self {
        Self {
            role: role.map(ViewerRole::parse).unwrap_or_default(),
        }
    }

    /// Whether the viewer may manage site options
    pub fn can_manage_options(&self) -> bool {
        self.role == ViewerRole::Administrator
    }
}

impl Authorizer for Viewer {
    fn authorize(&self, kind: SurfaceKind) -> bool {
        !kind.requires_privilege() || self.can_manage_options()
    }
}
