use crate::areas::repository::Repository;
use crate::artifacts::diff::diff_algorithm::diff_lines;
use crate::artifacts::diff::hunk::Hunk;
use crate::artifacts::diff::{CONTEXT_LINES, split_lines};
use crate::artifacts::status::file_change::{FileChangeType, WorkspaceChangeType};
use anyhow::Context;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Show what changed in tracked files since they were last staged
    pub fn diff(&self) -> anyhow::Result<()> {
        let index = self.load_index()?;
        let status = self.status().initialize(&index)?;
        let head_manifest = self
            .database()
            .load_manifest(self.refs().read_head()?.as_ref())?;

        for (path, change) in status.workspace_changeset() {
            // an unstaged path is compared with the version it was committed as
            let tracked_oid = index
                .entry_by_path(path)
                .map(|entry| &entry.oid)
                .or_else(|| head_manifest.get(path))
                .with_context(|| format!("{path} is neither staged nor committed"))?;
            let old_text = self.database().parse_object_as_blob(tracked_oid)?.text();

            let deleted = change == FileChangeType::Workspace(WorkspaceChangeType::Deleted);
            let new_text = if deleted {
                String::new()
            } else {
                String::from_utf8_lossy(&self.workspace().read_file(path)?).into_owned()
            };

            self.print_file_diff(path, &old_text, &new_text, deleted)?;
        }

        Ok(())
    }

    fn print_file_diff(
        &self,
        path: &str,
        old_text: &str,
        new_text: &str,
        deleted: bool,
    ) -> anyhow::Result<()> {
        let old_lines = split_lines(old_text);
        let new_lines = split_lines(new_text);
        let edits = diff_lines(&old_lines, &new_lines);

        let mut writer = self.writer();
        writeln!(writer, "{}", format!("diff --gitter a/{path} b/{path}").bold())?;
        if deleted {
            writeln!(writer, "{}", "deleted file".red())?;
        }

        for hunk in Hunk::build(&edits, &old_lines, &new_lines, CONTEXT_LINES) {
            writeln!(writer, "{}", hunk.header().cyan())?;
            for line in &hunk.lines {
                writeln!(writer, "{}", line.colored())?;
            }
        }

        Ok(())
    }
}
