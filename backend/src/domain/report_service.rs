//! Progress report generation.
//!
//! Building the report is split in two: [`ReportLayout::build`] turns already
//! loaded data into styled text lines (pure, no I/O), and a
//! [`ReportRenderer`] serializes those lines into a document. Writing the
//! document anywhere is left to the transport layer.

use shared::{Child, LearningGoal, LoggedActivity, Subject};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::child_service::ChildService;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::report_renderer::ReportRenderer;
use crate::storage::Storage;

/// Activities listed under "Atividades Recentes"
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

pub const GOALS_HEADING: &str = "Metas de Aprendizagem";
pub const ACTIVITIES_HEADING: &str = "Atividades Recentes";
pub const NO_GOALS: &str = "Nenhuma meta cadastrada.";
pub const NO_ACTIVITIES: &str = "Nenhuma atividade registrada.";
pub const UNKNOWN_SUBJECT: &str = "Desconhecida";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
    /// Indented observation under an activity
    Note,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub style: LineStyle,
    pub text: String,
}

impl ReportLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// Fixed-layout content of a progress report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    pub title: String,
    pub lines: Vec<ReportLine>,
}

impl ReportLayout {
    /// Lay out a report for `child`.
    ///
    /// `activities` must already be sorted most recent first; only the first
    /// [`RECENT_ACTIVITY_LIMIT`] are listed. Subjects missing from `subjects`
    /// render as "Desconhecida".
    pub fn build(
        child: &Child,
        goals: &[LearningGoal],
        activities: &[LoggedActivity],
        subjects: &HashMap<String, Subject>,
    ) -> Self {
        let subject_name = |subject_id: &str| {
            subjects
                .get(subject_id)
                .map(|subject| subject.name.as_str())
                .unwrap_or(UNKNOWN_SUBJECT)
        };

        let title = format!("Relatório de Progresso - {}", child.name);
        let mut lines = vec![ReportLine::new(LineStyle::Title, title.clone())];

        lines.push(ReportLine::new(LineStyle::Heading, GOALS_HEADING));
        if goals.is_empty() {
            lines.push(ReportLine::new(LineStyle::Body, NO_GOALS));
        }
        for goal in goals {
            lines.push(ReportLine::new(
                LineStyle::Body,
                format!(
                    "- [{}] {} (Status: {})",
                    subject_name(&goal.subject_id),
                    goal.description,
                    goal.status
                ),
            ));
        }

        lines.push(ReportLine::new(LineStyle::Heading, ACTIVITIES_HEADING));
        if activities.is_empty() {
            lines.push(ReportLine::new(LineStyle::Body, NO_ACTIVITIES));
        }
        for activity in activities.iter().take(RECENT_ACTIVITY_LIMIT) {
            lines.push(ReportLine::new(
                LineStyle::Body,
                format!(
                    "- {} [{}]: {}",
                    activity.activity_date.format("%d/%m/%Y"),
                    subject_name(&activity.subject_id),
                    activity.description
                ),
            ));
            if let Some(observations) = activity.observations.as_deref().filter(|o| !o.is_empty()) {
                lines.push(ReportLine::new(LineStyle::Note, format!("  Obs: {}", observations)));
            }
        }

        Self { title, lines }
    }

    /// Non-heading lines between `heading` and the next heading
    pub fn section(&self, heading: &str) -> Vec<&ReportLine> {
        self.lines
            .iter()
            .skip_while(|line| !(line.style == LineStyle::Heading && line.text == heading))
            .skip(1)
            .take_while(|line| line.style != LineStyle::Heading)
            .collect()
    }
}

/// A rendered report ready for download
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub child_id: String,
    pub filename: String,
    pub content: Vec<u8>,
}

/// Download name for a child's report. Quotes and control characters are
/// dropped so the name can sit inside a Content-Disposition header.
pub fn report_filename(child_name: &str) -> String {
    let name: String = child_name
        .chars()
        .filter(|c| *c != '"' && *c != '\\' && !c.is_control())
        .collect();
    format!("relatorio_{}.pdf", name)
}

#[derive(Clone)]
pub struct ReportService {
    storage: Arc<dyn Storage>,
    child_service: ChildService,
    renderer: Arc<dyn ReportRenderer>,
}

impl ReportService {
    pub fn new(
        storage: Arc<dyn Storage>,
        child_service: ChildService,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            storage,
            child_service,
            renderer,
        }
    }

    /// Load a child's data and lay out its report
    pub async fn build_layout(&self, child_id: &str) -> DomainResult<(Child, ReportLayout)> {
        let child = self.child_service.require_child(child_id).await?;

        let mut activities = self.storage.list_activities(child_id).await?;
        // stable: same-date activities keep store order
        activities.sort_by(|a, b| b.activity_date.cmp(&a.activity_date));

        let goals = self.storage.list_goals(child_id).await?;
        let subjects: HashMap<String, Subject> = self
            .storage
            .list_subjects()
            .await?
            .into_iter()
            .map(|subject| (subject.id.clone(), subject))
            .collect();

        let layout = ReportLayout::build(&child, &goals, &activities, &subjects);
        Ok((child, layout))
    }

    /// Generate the PDF progress report for a child
    pub async fn generate_report(&self, child_id: &str) -> DomainResult<GeneratedReport> {
        info!("📄 REPORT: Generating report for child_id: {}", child_id);

        let (child, layout) = self.build_layout(child_id).await?;

        let content = self.renderer.render(&layout).map_err(|e| {
            error!("❌ REPORT: Rendering failed for child {}: {}", child_id, e);
            DomainError::Internal(format!("Erro ao gerar PDF: {}", e))
        })?;

        info!(
            "✅ REPORT: Rendered {} lines into {} bytes for {}",
            layout.lines.len(),
            content.len(),
            child.name
        );

        Ok(GeneratedReport {
            child_id: child.id,
            filename: report_filename(&child.name),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report_renderer::RenderError;
    use crate::domain::subject_service::default_subjects;
    use crate::domain::test_utils::{pdf_text_runs, TestServices};
    use chrono::{Duration, TimeZone, Utc};
    use shared::{CreateGoalRequest, GoalStatus, LogActivityRequest};

    fn subjects() -> HashMap<String, Subject> {
        default_subjects()
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect()
    }

    fn child(name: &str) -> Child {
        Child {
            id: "c1".to_string(),
            name: name.to_string(),
            birth_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn texts(lines: Vec<&ReportLine>) -> Vec<String> {
        lines.into_iter().map(|line| line.text.clone()).collect()
    }

    #[test]
    fn test_empty_report_uses_placeholders() {
        let layout = ReportLayout::build(&child("Ana"), &[], &[], &subjects());

        assert_eq!(layout.title, "Relatório de Progresso - Ana");
        assert_eq!(layout.lines[0].style, LineStyle::Title);
        assert_eq!(texts(layout.section(GOALS_HEADING)), vec![NO_GOALS]);
        assert_eq!(texts(layout.section(ACTIVITIES_HEADING)), vec![NO_ACTIVITIES]);
    }

    #[test]
    fn test_goal_and_activity_lines() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 15, 0, 0).unwrap();
        let goals = vec![LearningGoal {
            id: "g1".to_string(),
            subject_id: "math".to_string(),
            description: "Tabuada".to_string(),
            status: GoalStatus::Completed,
            created_at: date,
        }];
        let activities = vec![
            LoggedActivity {
                id: "a1".to_string(),
                activity_date: date,
                subject_id: "hist".to_string(),
                description: "Leu sobre Roma".to_string(),
                observations: Some("Muito interessado".to_string()),
                related_goal_id: None,
                created_at: date,
            },
            LoggedActivity {
                id: "a2".to_string(),
                activity_date: date,
                subject_id: "gone".to_string(),
                description: "Sem disciplina".to_string(),
                observations: Some(String::new()),
                related_goal_id: None,
                created_at: date,
            },
        ];

        let layout = ReportLayout::build(&child("Ana"), &goals, &activities, &subjects());

        assert_eq!(
            texts(layout.section(GOALS_HEADING)),
            vec!["- [Matemática] Tabuada (Status: Concluído)"]
        );

        let activity_lines = layout.section(ACTIVITIES_HEADING);
        assert_eq!(
            texts(activity_lines.clone()),
            vec![
                "- 05/03/2024 [História]: Leu sobre Roma",
                "  Obs: Muito interessado",
                "- 05/03/2024 [Desconhecida]: Sem disciplina",
            ]
        );
        assert_eq!(activity_lines[1].style, LineStyle::Note);
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(report_filename("Ana"), "relatorio_Ana.pdf");
        assert_eq!(report_filename("Ana \"Bia\"\n"), "relatorio_Ana Bia.pdf");
    }

    #[tokio::test]
    async fn test_report_lists_ten_most_recent_activities() {
        let services = TestServices::new();
        let child_id = services.add_child("Ana").await;
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();

        // logged oldest first; the report must reverse them
        for day in 0..15 {
            services
                .activity_service
                .log_activity(
                    &child_id,
                    LogActivityRequest {
                        id: None,
                        activity_date: Some(base + Duration::days(day)),
                        subject_id: "math".to_string(),
                        description: format!("Atividade {}", day),
                        observations: None,
                        related_goal_id: None,
                        created_at: None,
                    },
                )
                .await
                .unwrap();
        }

        let (_, layout) = services.report_service.build_layout(&child_id).await.unwrap();
        let lines = texts(layout.section(ACTIVITIES_HEADING));

        assert_eq!(lines.len(), RECENT_ACTIVITY_LIMIT);
        assert_eq!(lines[0], "- 15/01/2024 [Matemática]: Atividade 14");
        assert_eq!(lines[9], "- 06/01/2024 [Matemática]: Atividade 5");
    }

    #[tokio::test]
    async fn test_generate_report_end_to_end() {
        let services = TestServices::new();
        let child_id = services.add_child("Ana").await;

        let goal = services
            .goal_service
            .create_goal(
                &child_id,
                CreateGoalRequest {
                    id: None,
                    subject_id: "math".to_string(),
                    description: "Tabuada".to_string(),
                    status: None,
                    created_at: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(goal.status, GoalStatus::Pending);

        services
            .activity_service
            .log_activity(
                &child_id,
                LogActivityRequest {
                    id: None,
                    activity_date: None,
                    subject_id: "math".to_string(),
                    description: "Praticou tabuada".to_string(),
                    observations: Some("Foco bom".to_string()),
                    related_goal_id: Some(goal.id.clone()),
                    created_at: None,
                },
            )
            .await
            .unwrap();

        let (_, layout) = services.report_service.build_layout(&child_id).await.unwrap();
        let goals = texts(layout.section(GOALS_HEADING));
        let activities = texts(layout.section(ACTIVITIES_HEADING));
        assert!(goals.iter().any(|l| l.contains("Tabuada") && l.contains("Pendente")));
        assert!(activities.iter().any(|l| l.contains("Praticou tabuada")));
        assert!(activities.iter().any(|l| l == "  Obs: Foco bom"));

        let report = services.report_service.generate_report(&child_id).await.unwrap();
        assert_eq!(report.filename, "relatorio_Ana.pdf");
        assert_eq!(report.child_id, child_id);
        assert!(report.content.starts_with(b"%PDF"));

        let runs = pdf_text_runs(&report.content);
        let position = |needle: &str| runs.iter().position(|run| run.contains(needle));
        let goal_at = position("- [Matemática] Tabuada (Status: Pendente)").unwrap();
        let activity_at = position("[Matemática]: Praticou tabuada").unwrap();
        let note_at = position("  Obs: Foco bom").unwrap();
        assert!(position(GOALS_HEADING).unwrap() < goal_at);
        assert!(goal_at < position(ACTIVITIES_HEADING).unwrap());
        assert!(position(ACTIVITIES_HEADING).unwrap() < activity_at);
        assert_eq!(note_at, activity_at + 1);
    }

    #[tokio::test]
    async fn test_generate_report_unknown_child() {
        let services = TestServices::new();

        let err = services.report_service.generate_report("missing").await.unwrap_err();
        assert_eq!(err, DomainError::child_not_found());
    }

    struct FailingRenderer;

    impl ReportRenderer for FailingRenderer {
        fn render(&self, _layout: &ReportLayout) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::Pdf("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn test_render_failure_is_internal() {
        let services = TestServices::with_renderer(Arc::new(FailingRenderer));
        let child_id = services.add_child("Ana").await;

        let err = services.report_service.generate_report(&child_id).await.unwrap_err();
        match err {
            DomainError::Internal(message) => {
                assert!(message.starts_with("Erro ao gerar PDF"));
                assert!(message.contains("disk on fire"));
            }
            other => panic!("expected internal error, got {:?}", other),
        }
    }
}
