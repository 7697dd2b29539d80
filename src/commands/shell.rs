use clap::Args as ClapArgs;

use crate::shell::{Route, Shell};

use super::Context;

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Panel to open first: code-analyzer, summarize, optimizer or security
    pub route: Option<String>,
}

pub async fn run(args: Args, ctx: &Context) -> miette::Result<()> {
    let client = ctx.client()?;
    let start = Route::resolve(args.route.as_deref().unwrap_or_default());

    Shell::new(client).run(start).await
}
