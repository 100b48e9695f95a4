//! Instruction templates for section regeneration.
//!
//! A closed two-key lookup table, (section type, visit type) → instruction
//! text, with a generic default for pairs the table does not name. Table
//! dispatch, not a trait hierarchy.

use crate::models::{SectionType, VisitType};

/// Generic instruction used when no table entry matches. `{section}` is
/// replaced with the section's canonical title.
const GENERIC_TEMPLATE: &str = "Rewrite the {section} section so it reflects the new encounter \
information. Keep the clinical register, level of detail, and formatting conventions of the \
original section. Do not invent findings that appear in neither source.";

const INSTRUCTION_TEMPLATES: &[((SectionType, VisitType), &str)] = &[
    (
        (SectionType::Hpi, VisitType::Intake),
        "Write the History of Present Illness for an intake evaluation: onset, duration, and \
course of the presenting problem, precipitating stressors, prior treatment history, and impact \
on functioning, drawn from the new encounter information.",
    ),
    (
        (SectionType::Hpi, VisitType::FollowUp),
        "Update the History of Present Illness with interval history since the last visit: \
symptom trajectory, treatment response, adherence, and any new stressors from the new encounter \
information.",
    ),
    (
        (SectionType::Hpi, VisitType::TherapySession),
        "Summarize the session narrative for the History of Present Illness: themes discussed, \
patient-reported progress, and in-session observations from the new encounter information.",
    ),
    (
        (SectionType::AssessmentAndPlan, VisitType::Intake),
        "Write the initial Assessment and Plan: diagnostic impressions with supporting evidence, \
rule-outs, and a numbered initial treatment plan covering therapy, medication, and follow-up \
interval.",
    ),
    (
        (SectionType::AssessmentAndPlan, VisitType::FollowUp),
        "Update the Assessment and Plan: current diagnostic status, response to treatment, and \
plan adjustments, keeping unchanged plan items verbatim.",
    ),
    (
        (SectionType::PsychiatricExam, VisitType::Intake),
        "Document the full mental status examination: appearance, behavior, speech, mood, \
affect, thought process, thought content, cognition, insight, and judgment, using the standard \
element order.",
    ),
    (
        (SectionType::CurrentMedications, VisitType::MedManagement),
        "List current psychiatric and relevant medical medications with dose, route, frequency, \
and start date where known. One medication per line.",
    ),
    (
        (SectionType::MedicationsPlan, VisitType::MedManagement),
        "Document medication changes from this visit: continued, titrated, started, and \
discontinued agents, each with its rationale from the new encounter information.",
    ),
    (
        (SectionType::Risks, VisitType::Intake),
        "Document the baseline risk assessment: suicidal and homicidal ideation, self-harm \
history, access to means, protective factors, and overall risk formulation.",
    ),
    (
        (SectionType::Risks, VisitType::CrisisEvaluation),
        "Document the acute risk assessment for this crisis contact: current ideation, intent, \
plan, means, acute stressors, protective factors, and disposition rationale.",
    ),
    (
        (SectionType::SafetyPlan, VisitType::CrisisEvaluation),
        "Write the collaborative safety plan: warning signs, internal coping strategies, social \
contacts and settings that provide distraction, people to ask for help, professional contacts, \
and means restriction steps agreed with the patient.",
    ),
    (
        (SectionType::Subjective, VisitType::FollowUp),
        "Update the subjective interval report: patient-stated progress, current symptoms, side \
effects, and concerns from the new encounter information.",
    ),
    (
        (SectionType::Plan, VisitType::FollowUp),
        "Update the plan: continued interventions, changes made this visit, patient homework or \
referrals, and the agreed follow-up interval.",
    ),
    (
        (SectionType::FollowUp, VisitType::FollowUp),
        "State the follow-up arrangement: interval, modality, and any conditions that should \
prompt earlier contact.",
    ),
];

/// Instruction text for a (section type, visit type) pair.
pub fn instruction_for(section_type: SectionType, visit_type: VisitType) -> String {
    INSTRUCTION_TEMPLATES
        .iter()
        .find(|((ty, visit), _)| *ty == section_type && *visit == visit_type)
        .map(|(_, template)| (*template).to_string())
        .unwrap_or_else(|| {
            GENERIC_TEMPLATE.replace("{section}", section_type.canonical_title())
        })
}
