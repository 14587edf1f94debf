use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::FileChangeType;
use crate::artifacts::status::status_info::WorkingDirectoryStatus;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn show_status(&self) -> anyhow::Result<()> {
        let index = self.load_index()?;
        let status = self.status().initialize(&index)?;

        writeln!(self.writer(), "On branch {}", self.refs().current_branch()?)?;

        if status.is_clean() {
            writeln!(self.writer())?;
            writeln!(self.writer(), "Nothing to commit, working tree clean")?;
            return Ok(());
        }

        self.print_changes(
            "Changes to be committed:",
            "(use \"gitter reset\" to unstage)",
            &status.index_changeset(),
        )?;
        self.print_changes(
            "Changes not staged for commit:",
            "(use \"gitter add <file>...\" to update what will be committed)",
            &status.workspace_changeset(),
        )?;
        self.print_untracked(&status)?;

        Ok(())
    }

    fn print_changes(
        &self,
        title: &str,
        hint: &str,
        changes: &[(&str, FileChangeType)],
    ) -> anyhow::Result<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut writer = self.writer();
        writeln!(writer)?;
        writeln!(writer, "{title}")?;
        writeln!(writer, "  {hint}")?;
        writeln!(writer)?;

        for (path, change) in changes {
            let path = match change {
                FileChangeType::Index(_) => path.green(),
                FileChangeType::Workspace(_) => path.red(),
            };
            writeln!(writer, "{change}{path}")?;
        }

        Ok(())
    }

    fn print_untracked(&self, status: &WorkingDirectoryStatus) -> anyhow::Result<()> {
        if status.untracked.is_empty() {
            return Ok(());
        }

        let mut writer = self.writer();
        writeln!(writer)?;
        writeln!(writer, "Untracked files:")?;
        writeln!(
            writer,
            "  (use \"gitter add <file>...\" to include in what will be committed)"
        )?;
        writeln!(writer)?;

        for path in &status.untracked {
            writeln!(writer, "        {}", path.red())?;
        }

        Ok(())
    }
}
