//! Handlebars template engine wrapper

use crate::{config::HandlebarsConfig, error::TemplateError, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Handlebars template engine.
///
/// Loads every template below the configured directory at construction;
/// template names are the relative paths without the extension, so
/// `templates/site/detail.hbs` registers as `site/detail`.
#[derive(Clone)]
pub struct HandlebarsEngine {
    handlebars: Arc<RwLock<Handlebars<'static>>>,
    config: HandlebarsConfig,
}

impl HandlebarsEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: HandlebarsConfig) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(config.strict_mode);

        let engine = Self {
            handlebars: Arc::new(RwLock::new(handlebars)),
            config,
        };

        engine.load_templates()?;

        Ok(engine)
    }

    /// Load all templates from the configured directory
    fn load_templates(&self) -> Result<()> {
        if !self.config.template_dir.exists() {
            return Err(TemplateError::ConfigError(format!(
                "Template directory not found: {:?}",
                self.config.template_dir
            )));
        }

        self.load_templates_from_dir(&self.config.template_dir)
    }

    /// Register templates from a directory recursively
    fn load_templates_from_dir(&self, dir: &Path) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                self.load_templates_from_dir(&path)?;
            } else if let Some(ext) = path.extension() {
                if ext == self.config.template_extension.trim_start_matches('.') {
                    let template_name = path
                        .strip_prefix(&self.config.template_dir)
                        .unwrap_or(&path)
                        .with_extension("")
                        .to_string_lossy()
                        .replace('\\', "/");

                    let template_content = fs::read_to_string(&path)?;

                    let mut handlebars = self.handlebars.write().unwrap();
                    handlebars.register_template_string(&template_name, template_content)?;
                }
            }
        }

        Ok(())
    }

    /// Render a template with data.
    ///
    /// Rendering is a pure function of name and data, so identical inputs
    /// always yield identical output.
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        // In dev mode, reload templates on each render
        if self.config.dev_mode {
            self.reload_templates()?;
        }

        let handlebars = self.handlebars.read().unwrap();
        if !handlebars.has_template(template) {
            return Err(TemplateError::TemplateNotFound(template.to_string()));
        }
        handlebars
            .render(template, data)
            .map_err(TemplateError::from)
    }

    /// Register a template from a string
    pub fn register_template(&self, name: &str, template: &str) -> Result<()> {
        let mut handlebars = self.handlebars.write().unwrap();
        handlebars
            .register_template_string(name, template)
            .map_err(TemplateError::from)
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        let handlebars = self.handlebars.read().unwrap();
        handlebars.has_template(name)
    }

    /// Get the list of registered template names
    pub fn template_names(&self) -> Vec<String> {
        let handlebars = self.handlebars.read().unwrap();
        handlebars.get_templates().keys().cloned().collect()
    }

    /// Reload all templates from disk
    pub fn reload_templates(&self) -> Result<()> {
        {
            let mut handlebars = self.handlebars.write().unwrap();
            handlebars.clear_templates();
        }
        self.load_templates()
    }

    /// Get the configuration
    pub fn config(&self) -> &HandlebarsConfig {
        &self.config
    }
}
