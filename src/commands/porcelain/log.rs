use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use colored::Colorize;
use std::io::Write;

/// Commits shown by `log` when no limit is given
pub const DEFAULT_LOG_LIMIT: usize = 10;

impl Repository {
    pub fn log(&self, max_count: usize) -> anyhow::Result<()> {
        let Some(head) = self.refs().read_head()? else {
            writeln!(self.writer(), "No commits yet.")?;
            return Ok(());
        };

        for commit in RevList::new(self, Some(head), Some(max_count)) {
            self.show_commit_medium(&commit?)?;
        }

        Ok(())
    }

    fn show_commit_medium(&self, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        let oid = commit.oid().map(ToString::to_string).unwrap_or_default();
        writeln!(writer, "{}", format!("commit {oid}").yellow())?;
        writeln!(writer, "Date:   {}", commit.readable_timestamp())?;
        writeln!(writer)?;
        for message_line in commit.message().lines() {
            writeln!(writer, "    {message_line}")?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
