//! Helpers shared by several commands: ignore rules, pathspecs and the log pager

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

pub mod ignore;
pub mod pathspec;

/// `Write` sink that buffers everything into a `minus` pager
///
/// `main` hands one to `log` when stdout is a terminal, then calls
/// `minus::page_all` once the history has been written.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = std::str::from_utf8(buf)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
