use core::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Anything that can report the identifier of the model it is bound to.
///
/// Callers that already hold a constructed model binding can hand it to the
/// pipeline through [`ModelSource::ByObject`] instead of a bare name.
pub trait NamedModel: Send + Sync {
    /// Identifier of the underlying model, if one is known.
    fn model_name(&self) -> Option<&str>;
}

/// Where the pipeline obtains the model identifier from.
#[derive(Clone)]
pub enum ModelSource {
    /// A model identifier given directly.
    ByName(String),
    /// An existing model handle whose identifier is read on demand.
    ByObject(Arc<dyn NamedModel>),
}

impl ModelSource {
    /// Returns the non-empty model identifier carried by this source.
    pub fn model_name(&self) -> Option<&str> {
        let name = match self {
            Self::ByName(name) => Some(name.as_str()),
            Self::ByObject(handle) => handle.model_name(),
        };
        name.filter(|value| !value.trim().is_empty())
    }
}

impl fmt::Debug for ModelSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName(name) => formatter.debug_tuple("ByName").field(name).finish(),
            Self::ByObject(handle) => formatter
                .debug_tuple("ByObject")
                .field(&handle.model_name())
                .finish(),
        }
    }
}

/// Caller-owned description of the project a database is generated for.
///
/// The pipeline only reads from it.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    /// Absolute filesystem root of the target project.
    pub project_path: PathBuf,
    /// Free-text description of the application's domain.
    pub project_description: String,
    /// Source of the model identifier, if any.
    pub model: Option<ModelSource>,
}

impl ExecutionContext {
    /// Creates a context without a model source.
    pub fn new(project_path: impl Into<PathBuf>, project_description: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            project_description: project_description.into(),
            model: None,
        }
    }

    /// Uses the given model identifier.
    #[must_use]
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model = Some(ModelSource::ByName(model_name.into()));
        self
    }

    /// Uses an existing model handle.
    #[must_use]
    pub fn with_model(mut self, model: Arc<dyn NamedModel>) -> Self {
        self.model = Some(ModelSource::ByObject(model));
        self
    }
}
