use crate::infra::{parse_status, seeded_service, workflow_config};
use clap::Args;
use medicaid_assist::config::AppConfig;
use medicaid_assist::error::AppError;
use medicaid_assist::workflows::medicaid::{
    AgentKind, EligibilityStatus, MemberId, MemberListing, SampleScenario, WorkflowRun,
    WorkflowSummary,
};
use serde_json::json;

#[derive(Args, Debug)]
pub(crate) struct ProcessArgs {
    /// Identifier of the stored member to process
    #[arg(long)]
    pub(crate) member_id: String,
    /// Print the full run (summary, final state, logs) as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Stop the run at the first failing step
    #[arg(long)]
    pub(crate) halt_on_error: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct MembersArgs {
    /// Only list members with this eligibility status (active, renewal_needed, inactive)
    #[arg(long, value_parser = parse_status)]
    pub(crate) status: Option<EligibilityStatus>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print every interaction and audit entry for each scenario
    #[arg(long)]
    pub(crate) show_log: bool,
    /// Stop each run at the first failing step
    #[arg(long)]
    pub(crate) halt_on_error: bool,
}

pub(crate) fn run_process(args: ProcessArgs) -> Result<(), AppError> {
    let ProcessArgs {
        member_id,
        json,
        halt_on_error,
    } = args;

    let config = AppConfig::load()?;
    let service = seeded_service(workflow_config(&config, halt_on_error));
    let run = service.process(&MemberId::new(member_id))?;
    let summary = WorkflowSummary::from_run(&run);

    if json {
        let payload = json!({ "summary": summary, "run": run });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Member {} ({})", summary.member_id, summary.member_name);
    println!("Eligibility verified: {}", summary.eligibility_verified);
    println!("Audit log entries: {}", summary.audit_entries);
    println!("Compliance status: {}", summary.compliance_label());
    println!("Run outcome: {}", summary.outcome);
    for failure in &summary.failures {
        println!("- {} failed: {}", failure.agent.label(), failure.message);
    }

    Ok(())
}

pub(crate) fn run_members(args: MembersArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = seeded_service(workflow_config(&config, false));
    let members = service.members(args.status)?;

    if members.is_empty() {
        println!("No members found");
        return Ok(());
    }

    for member in &members {
        let listing = MemberListing::from(member);
        println!(
            "- {} | {} | {} | renewal {} | {} required documents | work required: {} | {} via {}",
            listing.member_id,
            listing.name,
            listing.status_label,
            listing.renewal_date,
            listing.required_documents,
            listing.work_required,
            listing.preferred_language,
            listing.preferred_contact_method.label()
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        show_log,
        halt_on_error,
    } = args;

    let config = AppConfig::load()?;
    let service = seeded_service(workflow_config(&config, halt_on_error));

    println!("Medicaid member workflow demo");
    for scenario in SampleScenario::ordered() {
        println!("\n=== {} ===", scenario.label());
        let run = match service.process(&MemberId::new(scenario.member_id())) {
            Ok(run) => run,
            Err(err) => {
                println!("  Scenario unavailable: {}", err);
                continue;
            }
        };
        render_run(&run, show_log);
    }

    Ok(())
}

pub(crate) fn render_run(run: &WorkflowRun, show_log: bool) {
    let summary = WorkflowSummary::from_run(run);
    let member = &run.state.member;

    println!("Member: {} (ID {})", summary.member_name, summary.member_id);
    println!(
        "Eligibility: {} | renewal {}",
        member.eligibility.status.label(),
        member.eligibility.renewal_date
    );
    println!(
        "Contact: {} via {}",
        summary.preferred_language,
        member.contact.preferred_contact_method.label()
    );

    println!("\nWorkflow results");
    println!("- Eligibility verified: {}", summary.eligibility_verified);
    if summary.documents_required.is_empty() {
        println!("- Documents: none required");
    } else if summary.missing_documents.is_empty() {
        println!(
            "- Documents: all {} on file",
            summary.documents_required.len()
        );
    } else {
        println!(
            "- Documents: missing {}",
            summary.missing_documents.join(", ")
        );
    }
    match &summary.work {
        Some(work) => println!(
            "- Work hours: {}/{} ({})",
            work.hours_reported,
            work.hours_needed,
            if work.met { "met" } else { "not met" }
        ),
        None => println!("- Work hours: not required"),
    }
    println!("- Multilingual support: {}", summary.multilingual_supported);
    println!("- Compliance status: {}", summary.compliance_label());
    if !summary.compliance_issues.is_empty() {
        println!("  Issues: {}", summary.compliance_issues.join(", "));
    }

    if summary.reminders.is_empty() {
        println!("\nReminders: none");
    } else {
        println!("\nReminders");
        for reminder in &summary.reminders {
            println!("- {}", reminder);
        }
    }

    println!(
        "\nAgents executed: {} | interactions {} | audit entries {} | outcome {}",
        summary.agents_executed, summary.interactions, summary.audit_entries, summary.outcome
    );

    if !show_log {
        return;
    }

    println!("\nInteractions");
    for interaction in run.state.interactions() {
        let language = interaction
            .language
            .as_deref()
            .map(|language| format!(" [{language}]"))
            .unwrap_or_default();
        println!(
            "- {} {} -> {}: {}{}",
            interaction.agent.label(),
            interaction.action,
            interaction.result.as_str(),
            interaction.details,
            language
        );
    }

    println!("\nAudit trail");
    for agent in AgentKind::ordered() {
        for entry in run.state.audit_entries_by(agent) {
            println!(
                "- {} {} -> {} {}",
                agent.as_str(),
                entry.action,
                entry.status.as_str(),
                serde_json::Value::Object(entry.extras.clone())
            );
        }
    }
}
