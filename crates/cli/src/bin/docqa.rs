use anyhow::Result;

fn main() -> Result<()> {
    docqa_cli::main_entry()
}
