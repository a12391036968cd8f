use grayscale_core::{
    Configuration, RenderContext, TriggerSurface, BODY_CLASS, OPT_OUT_CLASS,
};

use super::markup::{AdminView, MarkupRenderer, NavLink, PageView, TemplateError};
use super::settings_provider::Settings;
use super::shortcode::expand_toggles;
use crate::error::ApiError;
use crate::models::{SiteConfig, Viewer};

/// Composes full pages: the site content with the grayscale layer and
/// whichever toggle surfaces apply to the viewer.
pub struct PageService {
    markup: MarkupRenderer,
}

impl PageService {
    pub fn new(markup: MarkupRenderer) -> Self {
        Self { markup }
    }

    /// Render a public page; `None` selects the front page.
    pub fn render_public(
        &self,
        settings: &Settings,
        slug: Option<&str>,
        viewer: &Viewer,
    ) -> Result<String, ApiError> {
        let site = &settings.site;
        let config = &settings.config;
        let context = RenderContext::Public;

        let page = match slug {
            Some(slug) => site.page(slug),
            None => site.front_page(),
        }
        .ok_or_else(|| ApiError::PageNotFound(slug.unwrap_or("/").to_string()))?;

        let content = expand_toggles(&page.content, |ordinal| {
            let surface = TriggerSurface::inline(ordinal);
            if surface.should_render(config, context, viewer) {
                self.markup.inline_button(&surface, &config.button_label)
            } else {
                Ok(String::new())
            }
        })?;

        let footer = if TriggerSurface::floating().should_render(config, context, viewer) {
            self.markup.floating_button(&config.button_label)?
        } else {
            String::new()
        };

        let mut body_classes = Vec::new();
        if config.enabled {
            body_classes.push(BODY_CLASS);
        }

        tracing::debug!(
            page = %page.slug,
            role = ?viewer.role,
            grayscale = config.enabled_for(context),
            floating = !footer.is_empty(),
            "Rendering public page"
        );

        let view = PageView {
            site_title: &site.title,
            page_title: &page.title,
            head: self.head_snippet(config, context)?,
            body_classes,
            toolbar: self.toolbar(config, context, viewer)?,
            nav: nav_links(site),
            content,
            footer,
        };

        Ok(self.markup.render_page(&view)?)
    }

    /// Render the administrative dashboard.
    pub fn render_admin(&self, settings: &Settings, viewer: &Viewer) -> Result<String, ApiError> {
        let config = &settings.config;
        let context = RenderContext::Admin;

        tracing::debug!(
            role = ?viewer.role,
            grayscale = config.enabled_for(context),
            "Rendering admin page"
        );

        let view = AdminView {
            site_title: &settings.site.title,
            head: self.head_snippet(config, context)?,
            body_classes: Vec::new(),
            toolbar: self.toolbar(config, context, viewer)?,
            config,
            settings_source: &settings.source,
            opt_out_class: OPT_OUT_CLASS,
        };

        Ok(self.markup.render_admin(&view)?)
    }

    /// Head markup for `context`, empty when the effect is off there.
    pub fn head_snippet(
        &self,
        config: &Configuration,
        context: RenderContext,
    ) -> Result<String, TemplateError> {
        Ok(self.markup.head(config, context)?.unwrap_or_default())
    }

    fn toolbar(
        &self,
        config: &Configuration,
        context: RenderContext,
        viewer: &Viewer,
    ) -> Result<String, TemplateError> {
        if TriggerSurface::host_chrome().should_render(config, context, viewer) {
            self.markup.host_chrome()
        } else {
            Ok(String::new())
        }
    }
}

fn nav_links(site: &SiteConfig) -> Vec<NavLink> {
    site.pages
        .iter()
        .enumerate()
        .map(|(i, page)| NavLink {
            href: if i == 0 {
                "/".to_string()
            } else {
                format!("/pages/{}", page.slug)
            },
            title: page.title.clone(),
        })
        .collect()
}
