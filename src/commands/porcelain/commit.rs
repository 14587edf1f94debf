use crate::areas::repository::Repository;
use crate::artifacts::index::Manifest;
use crate::artifacts::index::staging_session::StagingSession;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitterError;
use std::io::Write;

impl Repository {
    pub fn commit(&self, message: &str, all: bool) -> anyhow::Result<()> {
        let mut session = StagingSession::open(self)?;

        if all {
            let status = self.status().initialize(session.index())?;
            session.stage_modified(&status)?;
        }

        let parent = self.refs().read_head()?;
        let head_manifest = self.database().load_manifest(parent.as_ref())?;
        let manifest = session.index().manifest();

        let changed = Self::count_changed_files(&head_manifest, &manifest);
        if changed == 0 {
            return Err(GitterError::NothingToCommit.into());
        }

        let commit = Commit::new(message.to_string(), parent, manifest);
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        session.sync_to_commit(Some(&commit_id))?;
        session.write()?;

        let branch = self.refs().current_branch()?;
        tracing::info!(%branch, oid = %commit_id, "created commit");

        writeln!(
            self.writer(),
            "[{} {}] {}",
            branch,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;
        writeln!(self.writer(), "{changed} file(s) changed")?;

        Ok(())
    }

    /// Paths added, modified or removed between two manifests
    fn count_changed_files(before: &Manifest, after: &Manifest) -> usize {
        let written = after
            .iter()
            .filter(|(path, oid)| before.get(*path) != Some(*oid))
            .count();
        let removed = before.keys().filter(|path| !after.contains_key(*path)).count();

        written + removed
    }
}
