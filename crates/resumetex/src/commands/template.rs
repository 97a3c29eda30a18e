//! Template command - print the built-in layout

use crate::output::print_raw;
use anyhow::Result;
use resumetex_core::Layout;

pub fn run() -> Result<()> {
    print_raw(Layout::resume().source)?;
    Ok(())
}
