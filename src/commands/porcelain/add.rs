use crate::areas::repository::Repository;
use crate::artifacts::core::pathspec::Pathspec;
use crate::artifacts::index::staging_session::StagingSession;

impl Repository {
    pub fn add(&self, patterns: &[String]) -> anyhow::Result<()> {
        let mut session = StagingSession::open(self)?;
        let status = self.status().initialize(session.index())?;

        // a failing pattern drops the session, so earlier patterns are not saved
        for pattern in patterns {
            let pathspec = Pathspec::parse(pattern, self.prefix())?;
            session.add_pattern(&pathspec, &status)?;
        }

        if session.write()? {
            tracing::info!(patterns = patterns.len(), "updated index");
        }

        Ok(())
    }
}
