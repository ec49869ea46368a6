// Seams between the core and its external collaborators

use crate::Error;

/// Template rendering seam.
///
/// Implemented by the templating integration crate; the application's
/// `template()` passthrough delegates here. Rendering must be a pure
/// function of the template name and context.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String, Error>;
}
