fn main() -> anyhow::Result<()> {
    titan_message::cli::run_cli()
}
