mod command;
mod input;
mod logging;
mod report_file;

fn main() -> anyhow::Result<()> {
    logging::init()?;
    command::run()
}
