use anyhow::{bail, Result};

use pipet::prompt::build_prompt;
use pipet::CommandKind;

use super::SelectionArgs;

/// `prompt <kind>`: print the request that would be sent, without sending it.
pub fn run(kind: CommandKind, args: &SelectionArgs) -> Result<()> {
    let Some(selection) = super::read_selection(args)? else {
        bail!("No selection: pipe text on stdin or pass --file");
    };
    print!("{}", build_prompt(kind.profile(), &selection.text));
    Ok(())
}
