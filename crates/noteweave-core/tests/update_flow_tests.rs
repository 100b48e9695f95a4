//! Integration tests for the plan → reconstruct flow.

use noteweave_core::{
    plan, reconstruct, validate, ChangeAction, EmrDialect, MergeStrategy, NoteContext, PlanError,
    RegeneratedSection, SectionDetector, SectionType, UpdateDirective, VisitType,
};

const NOTE: &str = "HPI:\nAnxiety stable on sertraline for three months.\n\nMental Status Exam:\nAlert, oriented, affect congruent.\n\nAssessment and Plan:\nGAD, continue current dose and weekly therapy.";

fn make_context() -> NoteContext {
    NoteContext {
        clinic: "northside".into(),
        dialect: EmrDialect::Credible,
        visit_type: VisitType::FollowUp,
    }
}

#[test]
fn test_replace_flow_preserves_untouched_sections() {
    let parsed = SectionDetector::new().parse(NOTE);
    let directives = vec![UpdateDirective::update(SectionType::Hpi, MergeStrategy::Replace)
        .with_reason("new interval history")];

    let update_plan = plan(
        &parsed,
        &directives,
        &make_context(),
        "Patient reports two panic episodes this week after a job change.",
    )
    .unwrap();

    // Simulate the external generator succeeding
    let generated_text = "Two panic episodes this week following a job change; otherwise stable on sertraline.";
    let regenerated = vec![RegeneratedSection {
        section_type: SectionType::Hpi,
        text: generated_text.to_string(),
        strategy: MergeStrategy::Replace,
        reason: Some("new interval history".to_string()),
    }];

    let result = reconstruct(&parsed, &update_plan.preserve, &regenerated);

    // Regenerated section equals the generator output exactly
    let hpi_change = result
        .changes
        .iter()
        .find(|c| c.section_type == SectionType::Hpi)
        .unwrap();
    assert_eq!(hpi_change.new_content, generated_text);
    assert_eq!(hpi_change.action, ChangeAction::Updated);
    assert_eq!(hpi_change.change_reason, "new interval history");

    // All other sections byte-for-byte
    assert!(result
        .content
        .contains("Mental Status Exam:\nAlert, oriented, affect congruent."));
    assert!(result
        .content
        .contains("Assessment and Plan:\nGAD, continue current dose and weekly therapy."));
    assert!(!result.content.contains("stable on sertraline for three months"));
}

#[test]
fn test_directive_for_absent_section_fails_named() {
    let parsed = SectionDetector::new().parse(
        "SUBJECTIVE:\nDoing well overall.\n\nPLAN:\nContinue as before.",
    );
    let directives = vec![UpdateDirective::update(
        SectionType::FollowUp,
        MergeStrategy::Replace,
    )];

    let err = plan(&parsed, &directives, &make_context(), "new info").unwrap_err();

    match err {
        PlanError::SectionNotFound(section_type) => {
            assert_eq!(section_type, SectionType::FollowUp);
        }
    }
    assert!(err.to_string().contains("FollowUp"));
}

#[test]
fn test_preservation_round_trip_then_validates() {
    let parsed = SectionDetector::new().parse(NOTE);
    let update_plan = plan(&parsed, &[], &make_context(), "").unwrap();
    let result = reconstruct(&parsed, &update_plan.preserve, &[]);

    assert_eq!(result.content.trim_end(), NOTE);
    assert!(result
        .changes
        .iter()
        .all(|c| c.action == ChangeAction::Preserved));

    // The preserved note is clean under its own dialect
    let validation = validate(&result.content, &make_context());
    assert!(validation.is_valid, "errors: {:?}", validation.errors);
}

#[test]
fn test_append_flow_keeps_history() {
    let parsed = SectionDetector::new().parse(NOTE);
    let directives = vec![UpdateDirective::update(
        SectionType::AssessmentAndPlan,
        MergeStrategy::Append,
    )];
    let update_plan = plan(&parsed, &directives, &make_context(), "dose increase").unwrap();

    let regenerated = vec![RegeneratedSection {
        section_type: SectionType::AssessmentAndPlan,
        text: "Increase sertraline to 75mg given breakthrough symptoms.".to_string(),
        strategy: MergeStrategy::Append,
        reason: None,
    }];

    let result = reconstruct(&parsed, &update_plan.preserve, &regenerated);

    assert!(result.content.contains(
        "GAD, continue current dose and weekly therapy.\n\nIncrease sertraline to 75mg"
    ));
}
