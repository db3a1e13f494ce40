//! Test utilities: a full set of domain services over a fresh seeded store.

use printpdf::lopdf::content::Content;
use printpdf::lopdf::{Document, Object};
use shared::CreateChildRequest;
use std::sync::Arc;

use crate::domain::{
    default_subjects, ActivityService, AnalysisService, ChildService, EntityFactory, GoalService,
    PdfReportRenderer, ReportRenderer, ReportService, SimulatedAnalyzer, SubjectService,
};
use crate::storage::{InMemoryStore, Storage};

pub struct TestServices {
    pub child_service: ChildService,
    pub goal_service: GoalService,
    pub activity_service: ActivityService,
    pub report_service: ReportService,
    pub analysis_service: AnalysisService,
}

impl TestServices {
    pub fn new() -> Self {
        Self::with_renderer(Arc::new(PdfReportRenderer))
    }

    pub fn with_renderer(renderer: Arc<dyn ReportRenderer>) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(InMemoryStore::with_subjects(default_subjects()));
        let factory = EntityFactory::default();

        let child_service = ChildService::new(storage.clone(), factory.clone());
        let subject_service = SubjectService::new(storage.clone());

        Self {
            goal_service: GoalService::new(
                storage.clone(),
                child_service.clone(),
                subject_service.clone(),
                factory.clone(),
            ),
            activity_service: ActivityService::new(
                storage.clone(),
                child_service.clone(),
                subject_service,
                factory,
            ),
            report_service: ReportService::new(storage, child_service.clone(), renderer),
            analysis_service: AnalysisService::new(child_service.clone(), Arc::new(SimulatedAnalyzer)),
            child_service,
        }
    }

    /// Create a child and return its generated id
    pub async fn add_child(&self, name: &str) -> String {
        self.child_service
            .create_child(CreateChildRequest {
                id: None,
                name: name.to_string(),
                birth_date: None,
                created_at: None,
            })
            .await
            .expect("Failed to create test child")
            .id
    }
}

fn push_string(object: &Object, run: &mut String) {
    match object {
        // built-in fonts are WinAnsi encoded, which matches Latin-1 for the
        // accented letters used in reports
        Object::String(bytes, _) => run.extend(bytes.iter().map(|b| char::from(*b))),
        Object::Array(items) => items.iter().for_each(|item| push_string(item, run)),
        _ => {}
    }
}

/// Text shown by `Tj`/`TJ` operators, page by page in drawing order
pub fn pdf_text_runs(pdf: &[u8]) -> Vec<String> {
    let document = Document::load_mem(pdf).expect("Failed to parse PDF");
    let mut runs = Vec::new();

    for page_id in document.get_pages().into_values() {
        let raw = document
            .get_page_content(page_id)
            .expect("Failed to read page content");
        let content = Content::decode(&raw).expect("Failed to decode page content");

        for operation in content.operations {
            if operation.operator == "Tj" || operation.operator == "TJ" {
                let mut run = String::new();
                operation.operands.iter().for_each(|o| push_string(o, &mut run));
                runs.push(run);
            }
        }
    }
    runs
}
