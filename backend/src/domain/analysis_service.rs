//! Progress analysis.
//!
//! There is no real model behind this yet: [`SimulatedAnalyzer`] returns the
//! same canned observations for every child, only the summary mentions the
//! child's name. A real analyzer can be plugged in through
//! [`ProgressAnalyzer`] without touching the REST layer.

use shared::{AnalysisResult, Child};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::child_service::ChildService;
use crate::domain::error::DomainResult;

pub trait ProgressAnalyzer: Send + Sync {
    fn analyze(&self, child: &Child) -> AnalysisResult;
}

const STRENGTHS: [&str; 2] = [
    "Participação ativa nas aulas de História.",
    "Progresso notável em conceitos básicos de Matemática.",
];

const AREAS_FOR_ATTENTION: [&str; 2] = [
    "Pode se beneficiar de mais prática em escrita cursiva.",
    "Explorar diferentes abordagens para os experimentos de Ciências pode aumentar o interesse.",
];

const SUGGESTIONS: [&str; 3] = [
    "Introduzir jogos educativos para reforçar a tabuada.",
    "Visitar um museu local para complementar os estudos de História.",
    "Realizar um projeto de ciências sobre o ciclo da água.",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Fixed, non-personalized analysis
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedAnalyzer;

impl ProgressAnalyzer for SimulatedAnalyzer {
    fn analyze(&self, child: &Child) -> AnalysisResult {
        AnalysisResult {
            analysis_id: Uuid::new_v4().to_string(),
            summary: format!(
                "Análise simulada para {}. No geral, demonstra bom engajamento nas atividades registradas.",
                child.name
            ),
            strengths: owned(&STRENGTHS),
            areas_for_attention: owned(&AREAS_FOR_ATTENTION),
            suggestions: owned(&SUGGESTIONS),
        }
    }
}

#[derive(Clone)]
pub struct AnalysisService {
    child_service: ChildService,
    analyzer: Arc<dyn ProgressAnalyzer>,
}

impl AnalysisService {
    pub fn new(child_service: ChildService, analyzer: Arc<dyn ProgressAnalyzer>) -> Self {
        Self {
            child_service,
            analyzer,
        }
    }

    /// Analyze a child's progress; only the child's existence is checked
    pub async fn analyze(&self, child_id: &str) -> DomainResult<AnalysisResult> {
        info!("🤖 ANALYSIS: Simulated analysis for child_id: {}", child_id);

        let child = self.child_service.require_child(child_id).await?;
        let result = self.analyzer.analyze(&child);

        info!("✅ ANALYSIS: Produced analysis {}", result.analysis_id);
        Ok(result)
    }
}
