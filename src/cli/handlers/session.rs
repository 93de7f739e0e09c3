//! Interactive session handler.

use anyhow::{Context, Result};

use crate::infra::ContextResolver;
use crate::session::{EffectRunner, Session, StartMode, TerminalFrontend, drive};
use crate::store::{NoteFilter, NoteStore};

/// Browses `filter` in the terminal until the user quits.
pub fn handle_session(
    store: &mut NoteStore,
    context: &dyn ContextResolver,
    filter: NoteFilter,
    start: StartMode,
) -> Result<()> {
    log::info!("starting session for {filter:?}");
    let mut session = Session::new(filter, start);
    let mut runner = EffectRunner::new(store, context);
    let mut frontend = TerminalFrontend::enter().context("failed to set up the terminal")?;

    drive(&mut session, &mut runner, &mut frontend).context("terminal session failed")
}
