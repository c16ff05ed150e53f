fn main() -> anyhow::Result<()> {
    if let Err(e) = contextshot_lib::run() {
        log::error!("Fatal: {e:#}");
        return Err(e);
    }
    Ok(())
}
