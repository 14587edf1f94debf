use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::index::staging_session::StagingSession;
use crate::errors::GitterError;
use std::io::Write;

impl Repository {
    pub fn checkout(&self, branch: &str, create: bool) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch)?;

        let index = self.load_index()?;
        if !self.status().initialize(&index)?.is_clean() {
            return Err(GitterError::UncommittedChanges.into());
        }

        if create {
            return self.create_and_switch(&branch_name);
        }

        if !self.refs().branch_exists(&branch_name) {
            return Err(GitterError::BranchNotFound(branch_name.to_string()).into());
        }

        if self.refs().is_current_branch(&branch_name)? {
            writeln!(self.writer(), "Already on '{branch_name}'")?;
            return Ok(());
        }

        let source_oid = self.refs().read_head()?;
        let target_oid = self.refs().read_branch(&branch_name)?;
        let migration = Migration::plan(
            &self.database().load_manifest(source_oid.as_ref())?,
            &self.database().load_manifest(target_oid.as_ref())?,
        );

        tracing::debug!(
            added = migration.paths_with_action(ActionType::Add).len(),
            modified = migration.paths_with_action(ActionType::Modify).len(),
            deleted = migration.paths_with_action(ActionType::Delete).len(),
            "planned migration"
        );

        self.refs().set_head(&branch_name)?;

        let mut session = StagingSession::open(self)?;
        session.sync_to_commit(target_oid.as_ref())?;
        session.write()?;

        if migration.is_empty() {
            tracing::debug!("working tree already matches the target branch");
        } else {
            self.workspace()
                .apply_migration(&migration, self.database())?;
        }

        tracing::info!(branch = %branch_name, "switched branch");
        writeln!(self.writer(), "Switched to branch '{branch_name}'")?;

        Ok(())
    }

    /// `checkout -b`: branch off the current commit, which may not exist yet
    fn create_and_switch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        let current_oid = self.refs().read_head()?;

        self.refs().create_branch(branch_name, current_oid.as_ref())?;
        self.refs().set_head(branch_name)?;

        tracing::info!(branch = %branch_name, "created branch");
        writeln!(self.writer(), "Switched to a new branch '{branch_name}'")?;

        Ok(())
    }
}
