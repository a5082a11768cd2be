use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use medicaid_assist::workflows::medicaid::{
    AgentKind, ComplianceIssue, ComplianceStatus, EligibilityStatus, EntryStatus,
    InMemoryMemberRepository, MemberId, MemberWorkflowService, SampleScenario, WorkflowConfig,
    WorkflowRun, WorkflowSummary,
};

fn run_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0)
        .single()
        .expect("valid run date")
}

fn process(scenario: SampleScenario) -> WorkflowRun {
    let service = MemberWorkflowService::new(
        Arc::new(InMemoryMemberRepository::seeded()),
        WorkflowConfig::default(),
    );
    service
        .process_at(&MemberId::new(scenario.member_id()), run_date())
        .expect("sample member processes")
}

fn audit_agents(run: &WorkflowRun) -> Vec<AgentKind> {
    run.state
        .audit_log()
        .iter()
        .map(|entry| entry.agent)
        .collect()
}

#[test]
fn every_sample_member_completes_cleanly() {
    for scenario in SampleScenario::ordered() {
        let run = process(scenario);
        assert!(
            run.is_completed(),
            "{} should complete without step failures",
            scenario.label()
        );
        assert!(run.state.eligibility_verified);
        assert!(run.state.compliance_status.is_some());
        assert!(run
            .state
            .audit_log()
            .iter()
            .all(|entry| entry.member_id.as_str() == scenario.member_id()));
    }
}

#[test]
fn renewal_member_gets_spanish_reminders_over_sms() {
    let run = process(SampleScenario::RenewalNeeded);
    let state = &run.state;

    assert_eq!(state.documents_submitted, vec!["income_verification"]);
    assert_eq!(
        state.reminders,
        vec![
            "Your Medicaid benefits expire on 2024-02-15. Please renew soon.",
            "Please submit the following documents: address_proof",
        ]
    );
    assert!(state.multilingual_supported);
    assert_eq!(
        state.compliance_issues,
        vec![ComplianceIssue::MissingRequiredDocuments]
    );

    let eligibility = state
        .interactions_by(AgentKind::EligibilityChecker)
        .next()
        .expect("eligibility interaction");
    assert_eq!(
        eligibility.details,
        "Status: renewal_needed, Renewal: 2024-02-15 (due soon)"
    );

    let reminder = state
        .interactions_by(AgentKind::Reminder)
        .next()
        .expect("reminder interaction");
    assert_eq!(reminder.details, "2 reminders sent via SMS");

    assert_eq!(
        audit_agents(&run),
        vec![
            AgentKind::EligibilityChecker,
            AgentKind::DocumentAssistant,
            AgentKind::Reminder,
            AgentKind::MultilingualChat,
            AgentKind::AuditCompliance,
        ]
    );
}

#[test]
fn work_shortfall_is_non_compliant() {
    let run = process(SampleScenario::WorkShortfall);
    let summary = WorkflowSummary::from_run(&run);

    assert_eq!(summary.compliance_label(), "non_compliant");
    assert_eq!(summary.compliance_issues, vec!["Work requirements not met"]);
    assert_eq!(
        summary.reminders,
        vec!["You need to report 35 more work hours this month."]
    );
    let work = summary.work.expect("work summary for required member");
    assert_eq!(work.hours_reported, 45);
    assert!(!work.met);
}

#[test]
fn missing_documents_are_listed_in_required_order() {
    let run = process(SampleScenario::MissingDocuments);
    let state = &run.state;

    assert_eq!(state.documents_submitted, vec!["identity_proof"]);
    assert_eq!(
        state.missing_documents(),
        vec!["medical_records", "income_verification"]
    );
    let audit = state
        .audit_entries_by(AgentKind::DocumentAssistant)
        .next()
        .expect("document audit entry");
    assert_eq!(audit.status, EntryStatus::Incomplete);
}

#[test]
fn arabic_speaker_meets_work_requirement() {
    let run = process(SampleScenario::NonEnglish);
    let state = &run.state;

    assert_eq!(state.compliance_status, Some(ComplianceStatus::Compliant));
    assert!(state.work_requirements_met);
    assert!(state.reminders.is_empty());
    let translation = state
        .interactions_by(AgentKind::MultilingualChat)
        .next()
        .expect("translation interaction");
    assert_eq!(translation.language.as_deref(), Some("Arabic"));
}

#[test]
fn compliant_member_only_touches_required_steps() {
    let run = process(SampleScenario::Compliant);

    assert_eq!(
        run.state.compliance_status,
        Some(ComplianceStatus::Compliant)
    );
    assert_eq!(
        audit_agents(&run),
        vec![AgentKind::EligibilityChecker, AgentKind::AuditCompliance]
    );
}

#[test]
fn inactive_member_is_flagged_and_reminded() {
    let run = process(SampleScenario::Inactive);
    let state = &run.state;

    assert_eq!(state.member.eligibility.status, EligibilityStatus::Inactive);
    assert_eq!(
        state.compliance_issues,
        vec![ComplianceIssue::InactiveEligibility]
    );
    assert_eq!(
        audit_agents(&run),
        vec![
            AgentKind::EligibilityChecker,
            AgentKind::Reminder,
            AgentKind::AuditCompliance,
        ]
    );
    let reminder = state
        .audit_entries_by(AgentKind::Reminder)
        .next()
        .expect("reminder audit entry");
    assert_eq!(reminder.extra("channel").and_then(|v| v.as_str()), Some("Mail"));
}
