//! HTML template rendering.
//!
//! Handlers build a serializable view model and hand it to a [`Renderer`]
//! by template name. The production renderer loads templates from a
//! directory with minijinja.

use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template `{0}` not found")]
    NotFound(String),

    #[error("failed to render `{name}`: {message}")]
    Failed { name: String, message: String },
}

pub trait Renderer: Send + Sync + 'static {
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String, RenderError>;
}

/// Templates loaded on demand from a directory on disk.
pub struct TemplateDir {
    env: minijinja::Environment<'static>,
}

impl TemplateDir {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let mut env = minijinja::Environment::new();
        env.set_loader(minijinja::path_loader(dir.as_ref().to_path_buf()));
        Self { env }
    }
}

impl Renderer for TemplateDir {
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String, RenderError> {
        let template = self.env.get_template(name).map_err(|e| match e.kind() {
            minijinja::ErrorKind::TemplateNotFound => RenderError::NotFound(name.to_string()),
            _ => RenderError::Failed {
                name: name.to_string(),
                message: e.to_string(),
            },
        })?;

        template.render(context).map_err(|e| RenderError::Failed {
            name: name.to_string(),
            message: e.to_string(),
        })
    }
}
