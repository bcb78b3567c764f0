//! `gen-pop-linkml2sheets` command-line tool
//!
//! Generates a metamodel-derived template and populates it with the slot
//! usage of a `LinkML` schema.

use linkml2sheets::cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    cli::run().await?;
    Ok(())
}
