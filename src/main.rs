fn main() -> anyhow::Result<()> {
    td::run()
}
