fn main() -> anyhow::Result<()> {
    sinebench::run()
}
