use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            writeln!(
                self.writer(),
                "Gitter repository already exists at {}",
                self.git_path().display()
            )?;
            return Ok(());
        }

        let heads_path = self.refs().heads_path();
        for dir in [self.database().objects_path(), &*heads_path] {
            fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
        }

        let main = BranchName::default();
        self.refs()
            .create_branch(&main, None)
            .and_then(|()| self.refs().set_head(&main))
            .context("cannot point HEAD at the default branch")?;

        fs::write(self.index_path(), b"").context("cannot create an empty index")?;

        tracing::info!(path = %self.path().display(), "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty Gitter repository in {}",
            self.git_path().display()
        )?;

        Ok(())
    }
}
