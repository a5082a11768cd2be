use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::domain::{EligibilityStatus, Member, MemberId};
use super::sample::sample_members;

/// Storage abstraction so the workflow service can be exercised against any member store.
pub trait MemberRepository: Send + Sync {
    fn get(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError>;
    fn list(&self) -> Result<Vec<Member>, RepositoryError>;
    fn list_by_status(&self, status: EligibilityStatus) -> Result<Vec<Member>, RepositoryError>;
    fn upsert(&self, member: Member) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local member table. Contents reset on restart.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMemberRepository {
    members: Arc<RwLock<BTreeMap<MemberId, Member>>>,
}

impl InMemoryMemberRepository {
    /// Repository pre-populated with the sample members.
    pub fn seeded() -> Self {
        let repository = Self::default();
        repository.load(sample_members());
        repository
    }

    /// Insert or replace every member in `members`, returning how many are now stored.
    pub fn load(&self, members: impl IntoIterator<Item = Member>) -> usize {
        let mut guard = match self.members.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for member in members {
            guard.insert(member.id.clone(), member);
        }
        guard.len()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("member table lock poisoned".to_string())
}

impl MemberRepository for InMemoryMemberRepository {
    fn get(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError> {
        let guard = self.members.read().map_err(|_| poisoned())?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Member>, RepositoryError> {
        let guard = self.members.read().map_err(|_| poisoned())?;
        Ok(guard.values().cloned().collect())
    }

    fn list_by_status(&self, status: EligibilityStatus) -> Result<Vec<Member>, RepositoryError> {
        let guard = self.members.read().map_err(|_| poisoned())?;
        Ok(guard
            .values()
            .filter(|member| member.eligibility.status == status)
            .cloned()
            .collect())
    }

    fn upsert(&self, member: Member) -> Result<(), RepositoryError> {
        let mut guard = self.members.write().map_err(|_| poisoned())?;
        guard.insert(member.id.clone(), member);
        Ok(())
    }
}
