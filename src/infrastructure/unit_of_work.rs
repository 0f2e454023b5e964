//! Identity-scoped unit of work over a member repository.
//!
//! Within one unit of work each member id maps to exactly one in-memory
//! instance. Loading a member that is already tracked returns the tracked
//! instance, not the row just read. Bulk operations go straight to storage
//! and never touch tracked instances, so after a bulk write the unit of work
//! must be [`clear`](UnitOfWork::clear)ed before reads reflect storage again.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::RepositoryResult;
use crate::domain::member::Member;
use crate::domain::repositories::MemberRepository;

pub struct UnitOfWork {
    members: Arc<dyn MemberRepository>,
    identity_map: HashMap<Uuid, Member>,
    dirty: HashSet<Uuid>,
}

impl UnitOfWork {
    /// Starts an empty unit of work
    pub fn begin(members: Arc<dyn MemberRepository>) -> Self {
        Self {
            members,
            identity_map: HashMap::new(),
            dirty: HashSet::new(),
        }
    }

    /// Returns the tracked instance, loading and tracking it on first access
    pub async fn find_member(&mut self, id: Uuid) -> RepositoryResult<Option<Member>> {
        if let Some(member) = self.identity_map.get(&id) {
            return Ok(Some(member.clone()));
        }

        let loaded = self.members.find_by_id(id).await?;
        Ok(loaded.map(|member| self.track(member)))
    }

    /// Loads every member; ids already tracked resolve to the tracked instance
    pub async fn find_all_members(&mut self) -> RepositoryResult<Vec<Member>> {
        let rows = self.members.find_all().await?;
        Ok(rows.into_iter().map(|row| self.track(row)).collect())
    }

    /// Loads members by username; ids already tracked resolve to the tracked instance
    pub async fn find_members_by_username(&mut self, username: &str) -> RepositoryResult<Vec<Member>> {
        let rows = self.members.find_by_username(username).await?;
        Ok(rows.into_iter().map(|row| self.track(row)).collect())
    }

    /// Tracks a new or changed member; written on the next [`flush`](Self::flush)
    pub fn persist(&mut self, member: Member) {
        let id = member.id();
        self.identity_map.insert(id, member);
        self.dirty.insert(id);
    }

    /// Mutable access to a tracked member, marking it dirty
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Member> {
        let member = self.identity_map.get_mut(&id)?;
        self.dirty.insert(id);
        Some(member)
    }

    /// Writes dirty members to storage; tracked instances stay tracked
    pub async fn flush(&mut self) -> RepositoryResult<usize> {
        let pending: Vec<Uuid> = self.dirty.iter().copied().collect();
        let mut written = 0;
        for id in pending {
            if let Some(member) = self.identity_map.get(&id) {
                self.members.save(member).await?;
                written += 1;
            }
            self.dirty.remove(&id);
        }

        tracing::debug!(written, "unit of work flushed");
        Ok(written)
    }

    /// Detaches every tracked member, dropping unflushed changes
    pub fn clear(&mut self) {
        if !self.dirty.is_empty() {
            tracing::warn!(pending = self.dirty.len(), "clearing unit of work with unflushed changes");
        }
        self.identity_map.clear();
        self.dirty.clear();
    }

    /// Adds `delta` to every stored age, bypassing tracked instances
    pub async fn bulk_add_age(&self, delta: i32) -> RepositoryResult<u64> {
        self.members.bulk_add_age(delta).await
    }

    /// Renames stored members younger than `age`, bypassing tracked instances
    pub async fn bulk_rename_younger_than(&self, age: i32, username: &str) -> RepositoryResult<u64> {
        self.members.bulk_rename_younger_than(age, username).await
    }

    /// Deletes stored members older than `age`, bypassing tracked instances
    pub async fn bulk_delete_older_than(&self, age: i32) -> RepositoryResult<u64> {
        self.members.bulk_delete_older_than(age).await
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.identity_map.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.identity_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identity_map.is_empty()
    }

    fn track(&mut self, row: Member) -> Member {
        self.identity_map.entry(row.id()).or_insert(row).clone()
    }
}
