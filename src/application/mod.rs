//! Application layer: builds and renders trees according to [`Settings`].

pub mod error;

use tracing::instrument;

pub use error::{ApplicationError, ApplicationResult};

use crate::config::Settings;
use crate::domain::{Record, TreeArena, TreeBuilder};
use crate::render::Renderer;

/// Builds trees under the configured root id and renders them with the
/// configured outline style.
#[derive(Debug, Clone, Default)]
pub struct TreeService {
    settings: Settings,
}

impl TreeService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Service with settings from [`Settings::load`] without a local file.
    pub fn from_env() -> ApplicationResult<Self> {
        Ok(Self::new(Settings::load(None)?))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn builder(&self) -> TreeBuilder {
        TreeBuilder::new().root_id(self.settings.root_id.clone())
    }

    pub fn renderer(&self) -> Renderer {
        self.settings.render.renderer()
    }

    #[instrument(level = "debug", skip_all)]
    pub fn build<D, I>(&self, records: I) -> ApplicationResult<TreeArena<D>>
    where
        D: Record,
        I: IntoIterator<Item = D>,
    {
        Ok(self.builder().build(records)?)
    }

    pub fn render<D>(&self, tree: &TreeArena<D>) -> String {
        self.renderer().render(tree)
    }
}
