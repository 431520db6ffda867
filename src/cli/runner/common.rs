use std::io::{self, Write as _};

use serde::Serialize;

use crate::cfg::{form_blocks, NamedCfg};
use crate::error::Result;
use crate::ir::Function;

use super::super::args::Cli;

impl Cli {
    pub(super) fn write_stdout<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut io::StdoutLock<'_>) -> io::Result<()>,
    {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        match f(&mut handle) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub(super) fn render_json<T: Serialize>(&self, value: &T) -> io::Result<String> {
        if self.json_compact {
            serde_json::to_string(value)
        } else {
            serde_json::to_string_pretty(value)
        }
        .map_err(io::Error::other)
    }

    pub(super) fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = self.render_json(value)?;
        self.write_stdout(|out| writeln!(out, "{json}"))
    }
}

/// Build the normalised, validated CFG a pass would build internally:
/// `form_blocks` -> `block_map` -> `add_entry` -> `add_terminators`, plus
/// the malformed-CFG check (a branch to an undefined label is fatal).
pub(super) fn normalized_cfg(function: &Function) -> Result<NamedCfg> {
    let mut cfg = NamedCfg::from_blocks(form_blocks(&function.instrs));
    cfg.add_entry();
    cfg.add_terminators();
    cfg.validate(&function.name)?;
    Ok(cfg)
}
