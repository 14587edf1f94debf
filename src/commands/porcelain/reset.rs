use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::core::pathspec::Pathspec;
use crate::artifacts::index::staging_session::StagingSession;
use std::io::Write;

impl Repository {
    /// Either move the branch to a revision or unstage paths
    ///
    /// Arguments starting with `HEAD` (or no arguments at all) select a
    /// revision; anything else is a list of pathspecs.
    pub fn reset(&self, args: &[String]) -> anyhow::Result<()> {
        match args.first() {
            None => self.reset_to_revision(HEAD_REF_NAME),
            Some(revision) if revision.starts_with(HEAD_REF_NAME) => {
                self.reset_to_revision(revision)
            }
            Some(_) => self.reset_paths(args),
        }
    }

    /// Point the branch at a commit and sync the index; the working tree is
    /// left untouched
    fn reset_to_revision(&self, revision: &str) -> anyhow::Result<()> {
        let target_oid = Revision::parse(revision)?.resolve(self)?;

        self.refs().update_head(&target_oid)?;

        let mut session = StagingSession::open(self)?;
        session.sync_to_commit(Some(&target_oid))?;
        session.write()?;

        tracing::info!(%revision, oid = %target_oid, "reset branch");
        writeln!(self.writer(), "HEAD is now at {}", target_oid.to_short_oid())?;

        Ok(())
    }

    fn reset_paths(&self, patterns: &[String]) -> anyhow::Result<()> {
        let working_files = self.workspace().hash_files()?;
        let mut session = StagingSession::open(self)?;

        let mut unstaged = 0;
        for pattern in patterns {
            let pathspec = Pathspec::parse(pattern, self.prefix())?;
            unstaged += session.unstage_pattern(&pathspec, &working_files)?;
        }
        session.write()?;

        if unstaged == 0 {
            writeln!(self.writer(), "No files were unstaged.")?;
        } else {
            writeln!(self.writer(), "Unstaged {unstaged} file(s).")?;
        }

        Ok(())
    }
}
