//! Graph manager for rendering a batch of charts.

use crate::bar::BarChartRenderer;
use crate::line::LineChartRenderer;
use crate::renderer::{ChartRenderer, RenderedChart};
use crate::resolve::ResolvedChart;
use futures::future::join_all;
use optiplot_common::{ChartId, ChartKind, Result};
use optiplot_config::{AppConfig, ChartDefinition};
use optiplot_i18n::LabelTranslator;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Outcome of rendering one chart of a batch.
#[derive(Debug)]
pub struct RenderOutcome {
    /// Chart the outcome belongs to.
    pub id: ChartId,
    /// Written file, or why the chart failed.
    pub result: Result<RenderedChart>,
}

impl RenderOutcome {
    /// Whether the chart was written.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Renders independent charts concurrently.
///
/// Charts share nothing but the translator and settings, which are
/// immutable, so each one is resolved and drawn on its own.
pub struct GraphManager {
    translator: Arc<LabelTranslator>,
    config: Arc<AppConfig>,
    line: LineChartRenderer,
    bar: BarChartRenderer,
}

impl GraphManager {
    /// Creates a new graph manager.
    pub fn new(translator: Arc<LabelTranslator>, config: Arc<AppConfig>) -> Self {
        Self {
            translator,
            config,
            line: LineChartRenderer::new(),
            bar: BarChartRenderer::new(),
        }
    }

    /// Settings charts are resolved against.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Renderer for a chart kind.
    pub fn renderer_for(&self, kind: ChartKind) -> &dyn ChartRenderer {
        match kind {
            ChartKind::Line => &self.line,
            ChartKind::Bar => &self.bar,
        }
    }

    /// Resolves one definition against this manager's translator and settings.
    pub fn resolve(&self, definition: &ChartDefinition) -> Result<ResolvedChart> {
        ResolvedChart::resolve(definition, &self.translator, &self.config)
    }

    /// Resolves and renders one chart.
    pub async fn render_one(&self, definition: &ChartDefinition) -> Result<RenderedChart> {
        let chart = self.resolve(definition)?;
        self.renderer_for(chart.kind()).render(&chart).await
    }

    /// Renders every definition.
    ///
    /// Outcomes come back in input order. A failing chart is reported in its
    /// outcome and does not stop the others.
    #[instrument(skip_all, fields(count = definitions.len()))]
    pub async fn render_all(&self, definitions: &[ChartDefinition]) -> Vec<RenderOutcome> {
        let outcomes = join_all(definitions.iter().map(|definition| async move {
            let result = self.render_one(definition).await;
            if let Err(e) = &result {
                warn!(id = %definition.id(), error = %e, "chart failed");
            }
            RenderOutcome {
                id: definition.id().clone(),
                result,
            }
        }))
        .await;

        let rendered = outcomes.iter().filter(|o| o.is_ok()).count();
        info!(
            rendered,
            failed = outcomes.len() - rendered,
            "batch finished"
        );
        outcomes
    }
}
