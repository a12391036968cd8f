use grayscale_core::{
    Configuration, EffectApplier, RenderContext, SurfaceKind, TriggerSurface, FORCED_OFF,
    NOT_FORCED_OFF, PREFERENCE_KEY, ROOT_CLASS, STYLE_ID, TITLE_OFF, TITLE_ON, USER_OFF_CLASS,
};
use serde::Serialize;
use tera::{Context, Tera};

use crate::assets::AssetLoader;

/// Text of the toolbar item
pub const HOST_CHROME_TEXT: &str = "Grayscale: Toggle";

/// Id of the style element carrying the button styles
pub const BUTTON_STYLE_ID: &str = "sgm-toggle-style";

const BUTTON_STYLESHEET: &str = "\
.sgm-toggle-btn {
  padding: .6rem .8rem; font-size: 14px; line-height: 1; cursor: pointer;
  border: 1px solid rgba(0,0,0,.15); background: #fff; border-radius: .5rem;
  box-shadow: 0 2px 8px rgba(0,0,0,.12);
}
.sgm-toggle-btn--floating { position: fixed; z-index: 99999; bottom: 1rem; right: 1rem; }
.sgm-toggle-btn:focus { outline: 2px solid #2271b1; outline-offset: 2px; }
@media (prefers-reduced-motion: reduce) { .sgm-toggle-btn { transition: none; } }
";

/// Error type for template rendering
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),
}

/// A link in the site navigation
#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub href: String,
    pub title: String,
}

/// Everything `page.html` needs
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub site_title: &'a str,
    pub page_title: &'a str,
    pub head: String,
    pub body_classes: Vec<&'static str>,
    pub toolbar: String,
    pub nav: Vec<NavLink>,
    pub content: String,
    pub footer: String,
}

/// Everything `admin.html` needs
#[derive(Debug, Serialize)]
pub struct AdminView<'a> {
    pub site_title: &'a str,
    pub head: String,
    pub body_classes: Vec<&'static str>,
    pub toolbar: String,
    pub config: &'a Configuration,
    pub settings_source: &'a str,
    pub opt_out_class: &'static str,
}

/// Renders the grayscale layer and the pages around it with Tera
pub struct MarkupRenderer {
    tera: Tera,
}

impl MarkupRenderer {
    pub const TEMPLATES: [&'static str; 6] = [
        "head.html",
        "floating_button.html",
        "inline_button.html",
        "host_chrome.html",
        "page.html",
        "admin.html",
    ];

    /// Load every template through the asset loader
    pub fn new(loader: &AssetLoader) -> Result<Self, TemplateError> {
        let mut sources = Vec::with_capacity(Self::TEMPLATES.len());
        for name in Self::TEMPLATES {
            let source = loader.read_template_string(name).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TemplateError::NotFound(name.to_string())
                } else {
                    TemplateError::Io(e)
                }
            })?;
            sources.push((name, source));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(sources)?;

        tracing::info!(
            templates = Self::TEMPLATES.len(),
            source = loader
                .templates_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "embedded".to_string()),
            "Markup renderer initialized"
        );

        Ok(Self { tera })
    }

    /// Head markup for `context`: a script that declares the filter rules
    /// (once per document, however often it is inserted) and installs the
    /// shared toggle behavior. `None` when the effect is off in that context.
    pub fn head(
        &self,
        config: &Configuration,
        context: RenderContext,
    ) -> Result<Option<String>, TemplateError> {
        let Some(rules) = EffectApplier::plan(config, context) else {
            tracing::debug!(%context, "Grayscale off, no head markup");
            return Ok(None);
        };

        let mut ctx = Context::new();
        ctx.insert("style_id", STYLE_ID);
        ctx.insert("stylesheet", &rules.stylesheet());
        ctx.insert("button_style_id", BUTTON_STYLE_ID);
        ctx.insert("button_stylesheet", BUTTON_STYLESHEET);
        ctx.insert("storage_key", PREFERENCE_KEY);
        ctx.insert("forced_off", FORCED_OFF);
        ctx.insert("not_forced_off", NOT_FORCED_OFF);
        ctx.insert("root_class", ROOT_CLASS);
        ctx.insert("user_off_class", USER_OFF_CLASS);
        ctx.insert("title_on", TITLE_ON);
        ctx.insert("title_off", TITLE_OFF);
        ctx.insert(
            "buttons",
            &(config.surfaces_allowed(context) && SurfaceKind::Floating.offered_in(context)),
        );

        Ok(Some(self.tera.render("head.html", &ctx)?))
    }

    /// The fixed-position button
    pub fn floating_button(&self, label: &str) -> Result<String, TemplateError> {
        self.button("floating_button.html", &TriggerSurface::floating(), label)
    }

    /// A shortcode button; `surface` carries its unique id
    pub fn inline_button(
        &self,
        surface: &TriggerSurface,
        label: &str,
    ) -> Result<String, TemplateError> {
        self.button("inline_button.html", surface, label)
    }

    fn button(
        &self,
        template: &str,
        surface: &TriggerSurface,
        label: &str,
    ) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("id", surface.mount_id());
        ctx.insert("label", label);
        ctx.insert("title", TITLE_ON);
        Ok(self.tera.render(template, &ctx)?)
    }

    /// The toolbar item
    pub fn host_chrome(&self) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("id", TriggerSurface::host_chrome().mount_id());
        ctx.insert("text", HOST_CHROME_TEXT);
        ctx.insert("title", TITLE_ON);
        Ok(self.tera.render("host_chrome.html", &ctx)?)
    }

    pub fn render_page(&self, view: &PageView<'_>) -> Result<String, TemplateError> {
        let ctx = Context::from_serialize(view)?;
        Ok(self.tera.render("page.html", &ctx)?)
    }

    pub fn render_admin(&self, view: &AdminView<'_>) -> Result<String, TemplateError> {
        let ctx = Context::from_serialize(view)?;
        Ok(self.tera.render("admin.html", &ctx)?)
    }
}
