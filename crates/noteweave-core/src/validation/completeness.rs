//! Clinical completeness checklists, keyed by visit type.
//!
//! Keyword heuristics only: the engine checks that expected elements are
//! mentioned, not that they are clinically adequate.

use crate::models::{Finding, NoteContext, VisitType};

/// One expected element of a visit-type checklist.
struct ChecklistItem {
    label: &'static str,
    keywords: &'static [&'static str],
    penalty: u32,
    recommendation: &'static str,
}

const INTAKE_CHECKLIST: &[ChecklistItem] = &[
    ChecklistItem {
        label: "chief complaint",
        keywords: &["chief complaint", "presenting problem", "presents with", "presenting with"],
        penalty: 8,
        recommendation: "State the chief complaint or presenting problem",
    },
    ChecklistItem {
        label: "history of present illness",
        keywords: &["history of present illness", "hpi", "onset", "reports"],
        penalty: 8,
        recommendation: "Document the history of the presenting problem",
    },
    ChecklistItem {
        label: "mental status exam",
        keywords: &["mental status", "mse", "alert", "oriented"],
        penalty: 10,
        recommendation: "Document a mental status examination",
    },
    ChecklistItem {
        label: "risk assessment",
        keywords: &["risk", "ideation", "suicid", "self-harm"],
        penalty: 10,
        recommendation: "Document a suicide and violence risk assessment",
    },
    ChecklistItem {
        label: "treatment plan",
        keywords: &["plan"],
        penalty: 10,
        recommendation: "Document an initial treatment plan",
    },
];

const FOLLOW_UP_CHECKLIST: &[ChecklistItem] = &[
    ChecklistItem {
        label: "interval history",
        keywords: &["since last", "interval", "reports"],
        penalty: 5,
        recommendation: "Describe the interval since the previous visit",
    },
    ChecklistItem {
        label: "treatment response",
        keywords: &["response", "improv", "tolerating", "worse", "stable"],
        penalty: 5,
        recommendation: "Describe response to the current treatment",
    },
    ChecklistItem {
        label: "plan",
        keywords: &["plan"],
        penalty: 8,
        recommendation: "Document the updated plan",
    },
];

const THERAPY_SESSION_CHECKLIST: &[ChecklistItem] = &[
    ChecklistItem {
        label: "interventions used",
        keywords: &["intervention", "cbt", "technique", "discussed", "explored"],
        penalty: 6,
        recommendation: "Name the therapeutic interventions used this session",
    },
    ChecklistItem {
        label: "progress toward goals",
        keywords: &["progress", "goal"],
        penalty: 6,
        recommendation: "Relate session content to treatment goals",
    },
    ChecklistItem {
        label: "plan",
        keywords: &["plan"],
        penalty: 6,
        recommendation: "Document the plan for future sessions",
    },
];

const MED_MANAGEMENT_CHECKLIST: &[ChecklistItem] = &[
    ChecklistItem {
        label: "current medications",
        keywords: &["medication", "mg", "dose"],
        penalty: 8,
        recommendation: "List current medications with doses",
    },
    ChecklistItem {
        label: "medication response",
        keywords: &["response", "tolerating", "improv", "effective"],
        penalty: 6,
        recommendation: "Describe response to the current regimen",
    },
    ChecklistItem {
        label: "side effects",
        keywords: &["side effect", "adverse", "denies side"],
        penalty: 6,
        recommendation: "Document presence or absence of side effects",
    },
    ChecklistItem {
        label: "plan",
        keywords: &["plan"],
        penalty: 8,
        recommendation: "Document medication continuation or changes",
    },
];

const CRISIS_CHECKLIST: &[ChecklistItem] = &[
    ChecklistItem {
        label: "acute risk assessment",
        keywords: &["risk", "ideation", "intent", "suicid"],
        penalty: 12,
        recommendation: "Document the acute risk assessment",
    },
    ChecklistItem {
        label: "safety plan",
        keywords: &["safety plan", "crisis plan", "means restriction"],
        penalty: 12,
        recommendation: "Document the collaborative safety plan",
    },
    ChecklistItem {
        label: "disposition",
        keywords: &["disposition", "admit", "discharge", "referred"],
        penalty: 8,
        recommendation: "Document the disposition decision and rationale",
    },
];

const SAFETY_KEYWORDS: &[&str] = &["risk", "safety", "ideation", "suicid", "harm"];

/// Check the note against the visit type's completeness checklist.
pub fn check(text: &str, context: &NoteContext) -> Vec<Finding> {
    let lower = text.to_lowercase();
    let mut findings = Vec::new();

    for item in checklist_for(context.visit_type) {
        let mentioned = item.keywords.iter().any(|k| lower.contains(k));
        if !mentioned {
            findings.push(
                Finding::warning(
                    "completeness.missing_item",
                    format!(
                        "No {} documented for this {} note",
                        item.label,
                        visit_label(context.visit_type)
                    ),
                    item.penalty,
                )
                .with_recommendation(item.recommendation),
            );
        }
    }

    // Every visit type except a plain follow-up carries an explicit
    // safety/risk statement.
    if context.visit_type != VisitType::FollowUp
        && !SAFETY_KEYWORDS.iter().any(|k| lower.contains(k))
    {
        findings.push(
            Finding::warning(
                "completeness.no_safety_language",
                "No explicit safety or risk assessment language found",
                5,
            )
            .with_recommendation("State the risk assessment even when risk is low"),
        );
    }

    findings
}

fn checklist_for(visit_type: VisitType) -> &'static [ChecklistItem] {
    match visit_type {
        VisitType::Intake => INTAKE_CHECKLIST,
        VisitType::FollowUp => FOLLOW_UP_CHECKLIST,
        VisitType::TherapySession => THERAPY_SESSION_CHECKLIST,
        VisitType::MedManagement => MED_MANAGEMENT_CHECKLIST,
        VisitType::CrisisEvaluation => CRISIS_CHECKLIST,
        VisitType::Other => &[],
    }
}

fn visit_label(visit_type: VisitType) -> &'static str {
    match visit_type {
        VisitType::Intake => "intake",
        VisitType::FollowUp => "follow-up",
        VisitType::TherapySession => "therapy session",
        VisitType::MedManagement => "medication management",
        VisitType::CrisisEvaluation => "crisis evaluation",
        VisitType::Other => "clinical",
    }
}
