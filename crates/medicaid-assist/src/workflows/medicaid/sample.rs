use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::domain::{
    ContactChannel, ContactPreferences, DocumentRecord, EligibilityInfo, EligibilityStatus,
    Member, MemberId, WorkRequirement,
};

/// Demo scenario each sample member represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleScenario {
    RenewalNeeded,
    WorkShortfall,
    MissingDocuments,
    NonEnglish,
    Compliant,
    Inactive,
}

impl SampleScenario {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::RenewalNeeded,
            Self::WorkShortfall,
            Self::MissingDocuments,
            Self::NonEnglish,
            Self::Compliant,
            Self::Inactive,
        ]
    }

    pub const fn member_id(self) -> &'static str {
        match self {
            Self::RenewalNeeded => "1",
            Self::WorkShortfall => "2",
            Self::MissingDocuments => "3",
            Self::NonEnglish => "4",
            Self::Compliant => "5",
            Self::Inactive => "6",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RenewalNeeded => "Member Needing Renewal",
            Self::WorkShortfall => "Member Below Work Requirements",
            Self::MissingDocuments => "Member Missing Documents",
            Self::NonEnglish => "Non-English Speaking Member",
            Self::Compliant => "Fully Compliant Member",
            Self::Inactive => "Member With Inactive Coverage",
        }
    }
}

fn on_file(submitted_on: (i32, u32, u32)) -> DocumentRecord {
    let (year, month, day) = submitted_on;
    DocumentRecord {
        submitted_on: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
        verified: true,
    }
}

#[allow(clippy::too_many_arguments)]
fn member(
    id: &str,
    name: (&str, &str),
    status: EligibilityStatus,
    renewal_date: &str,
    required_documents: &[&str],
    work_requirement: WorkRequirement,
    contact: (&str, ContactChannel),
    documents: &[(&str, (i32, u32, u32))],
) -> Member {
    Member {
        id: MemberId::new(id),
        first_name: name.0.to_string(),
        last_name: name.1.to_string(),
        eligibility: EligibilityInfo {
            program: "Medicaid".to_string(),
            status,
            renewal_date: renewal_date.to_string(),
            required_documents: required_documents.iter().map(|doc| doc.to_string()).collect(),
        },
        work_requirement,
        contact: ContactPreferences {
            preferred_language: contact.0.to_string(),
            preferred_contact_method: contact.1,
        },
        documents: documents
            .iter()
            .map(|(kind, submitted_on)| (kind.to_string(), on_file(*submitted_on)))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Synthetic members, one per [`SampleScenario`].
pub fn sample_members() -> Vec<Member> {
    vec![
        member(
            "1",
            ("Maria", "Rodriguez"),
            EligibilityStatus::RenewalNeeded,
            "2024-02-15",
            &["income_verification", "address_proof"],
            WorkRequirement::not_required(),
            ("Spanish", ContactChannel::Sms),
            &[("income_verification", (2024, 1, 8))],
        ),
        member(
            "2",
            ("James", "Johnson"),
            EligibilityStatus::Active,
            "2024-06-30",
            &[],
            WorkRequirement::required_with_hours(45),
            ("English", ContactChannel::Email),
            &[],
        ),
        member(
            "3",
            ("Sarah", "Chen"),
            EligibilityStatus::Active,
            "2024-08-20",
            &["medical_records", "income_verification", "identity_proof"],
            WorkRequirement::not_required(),
            ("English", ContactChannel::Email),
            &[("identity_proof", (2023, 11, 2))],
        ),
        member(
            "4",
            ("Ahmed", "Hassan"),
            EligibilityStatus::Active,
            "2024-05-10",
            &[],
            WorkRequirement::required_with_hours(85),
            ("Arabic", ContactChannel::Phone),
            &[],
        ),
        member(
            "5",
            ("Jennifer", "Smith"),
            EligibilityStatus::Active,
            "2024-12-01",
            &[],
            WorkRequirement::not_required(),
            ("English", ContactChannel::Email),
            &[],
        ),
        member(
            "6",
            ("Robert", "Williams"),
            EligibilityStatus::Inactive,
            "2023-09-30",
            &[],
            WorkRequirement {
                exemption_status: "disability".to_string(),
                ..WorkRequirement::not_required()
            },
            ("English", ContactChannel::Mail),
            &[],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scenario_has_a_sample_member() {
        let members = sample_members();
        for scenario in SampleScenario::ordered() {
            assert!(
                members
                    .iter()
                    .any(|member| member.id.as_str() == scenario.member_id()),
                "missing sample member for {}",
                scenario.label()
            );
        }
    }

    #[test]
    fn sample_documents_are_dated() {
        let members = sample_members();
        let maria = &members[0];
        let record = maria
            .documents
            .get("income_verification")
            .expect("document on file");
        assert_eq!(
            record.submitted_on,
            NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date")
        );
    }
}
